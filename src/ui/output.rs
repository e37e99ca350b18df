use crate::ui::icons::shape_icon;
use crate::ui::{theme, Icons};
use crate::Vector;
use owo_colors::OwoColorize;
use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// `VECSTORE_QUIET=1` silences decorative output; warnings still print
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("VECSTORE_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

pub fn header(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::ROCKET, text.style(theme().header.clone()));
}

pub fn status(icon: &str, label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}: {}", icon, label.style(theme().dim.clone()), value);
}

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn section(title: &str) {
    if is_quiet() {
        return;
    }
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

/// One-line description of a vector, tinted with its own color
pub fn vector_summary(vector: &Vector) {
    if is_quiet() {
        return;
    }
    let label = match vector.id() {
        Some(id) => format!("Vector {}", id),
        None => "Vector".to_string(),
    };
    println!(
        "{} {}: {} {} with {} dimensions",
        shape_icon(vector.shape()),
        label.style(theme().header.clone()),
        vector.color().style(theme().vector_color(vector.color())),
        vector.shape(),
        vector.length()
    );
}
