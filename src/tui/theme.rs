use ratatui::style::{Color, Modifier, Style};

/// Colour set for every widget. Selected by name from the `[ui]` config
/// section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub border: Color,
    pub highlight: Color,
    pub secondary: Color,
}

impl Theme {
    pub const fn dark() -> Self {
        Self {
            bg: Color::Rgb(29, 32, 33),
            fg: Color::Rgb(213, 196, 161),
            accent: Color::Rgb(131, 165, 152),
            success: Color::Rgb(184, 187, 38),
            warning: Color::Rgb(250, 189, 47),
            error: Color::Rgb(251, 73, 52),
            border: Color::Rgb(102, 92, 84),
            highlight: Color::Rgb(142, 192, 124),
            secondary: Color::Rgb(146, 131, 116),
        }
    }

    pub const fn light() -> Self {
        Self {
            bg: Color::Rgb(253, 246, 227),
            fg: Color::Rgb(88, 110, 117),
            accent: Color::Rgb(38, 139, 210),
            success: Color::Rgb(133, 153, 0),
            warning: Color::Rgb(181, 137, 0),
            error: Color::Rgb(220, 50, 47),
            border: Color::Rgb(147, 161, 161),
            highlight: Color::Rgb(42, 161, 152),
            secondary: Color::Rgb(131, 148, 150),
        }
    }

    /// Unknown names fall back to dark; config validation rejects them first.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Application names and key labels.
    pub fn highlight(&self) -> Style {
        Style::default().fg(self.highlight).add_modifier(Modifier::BOLD)
    }

    pub fn secondary(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Highlighted list row or the active dialog button.
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("light"), Theme::light());
        assert_eq!(Theme::from_name(" Light "), Theme::light());
        assert_eq!(Theme::from_name("dark"), Theme::dark());
        assert_eq!(Theme::from_name("solarized"), Theme::dark());
    }

    #[test]
    fn test_selected_row_is_inverted() {
        let theme = Theme::light();
        let style = theme.selected();
        assert_eq!(style.fg, Some(theme.bg));
        assert_eq!(style.bg, Some(theme.accent));
    }
}
