use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::time::Instant;

use crate::ui::{is_quiet, theme, Icons};
use owo_colors::OwoColorize;

/// Progress bar for `vecstore seed`; hidden when stdout is not a terminal
pub struct SeedProgress {
    bar: ProgressBar,
    started: Instant,
}

impl SeedProgress {
    pub fn new(total: usize) -> Self {
        let bar = if console::Term::stdout().is_term() && !is_quiet() {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };

        if let Ok(style) =
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_message("Inserting vectors");

        Self {
            bar,
            started: Instant::now(),
        }
    }

    pub fn inserted(&self, id: i64) {
        self.bar.inc(1);
        self.bar.set_message(format!("vector {}", id));
    }

    pub fn failed(&self, reason: &str) {
        self.bar.inc(1);
        self.bar.println(format!("{} {}", Icons::CROSS, reason.style(theme().error.clone())));
    }

    pub fn finish(self, inserted: usize) {
        self.bar.finish_and_clear();
        if !is_quiet() {
            println!(
                "{} Seeded {} vectors in {}",
                Icons::SPARKLE,
                inserted,
                HumanDuration(self.started.elapsed())
            );
        }
    }
}
