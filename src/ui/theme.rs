use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub colored: bool,
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub dim: Style,
}

impl Theme {
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            colored: true,
            header: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            dim: Style::new().white().dimmed(),
        }
    }

    pub fn plain() -> Self {
        Self {
            colored: false,
            header: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            dim: Style::new(),
        }
    }

    /// Terminal style for a vector's color name
    pub fn vector_color(&self, color: &str) -> Style {
        if !self.colored {
            return Style::new();
        }
        match color {
            "red" => Style::new().red(),
            "green" => Style::new().green(),
            "blue" => Style::new().blue(),
            _ => Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use owo_colors::OwoColorize;

    #[test]
    fn test_plain_theme_leaves_text_alone() {
        let plain = Theme::plain();
        assert_eq!("red".style(plain.vector_color("red")).to_string(), "red");
        assert_eq!("ok".style(plain.success).to_string(), "ok");
    }
}
