use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parses a stored value. Anything unrecognised means "no preference".
    pub fn parse(value: &str) -> Option<Theme> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                base: Style::default().fg(Color::Black).bg(Color::White),
                accent: Color::Blue,
                muted: Color::Gray,
                done: Color::DarkGray,
                highlight: Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
                popup_bg: Color::Rgb(235, 235, 235),
            },
            Theme::Dark => Palette {
                base: Style::default().fg(Color::White).bg(Color::Rgb(24, 24, 24)),
                accent: Color::Cyan,
                muted: Color::DarkGray,
                done: Color::Gray,
                highlight: Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
                popup_bg: Color::Rgb(38, 38, 38),
            },
        }
    }
}

/// Colors the renderer pulls from the active theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub base: Style,
    pub accent: Color,
    pub muted: Color,
    pub done: Color,
    pub highlight: Style,
    pub popup_bg: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_round_trip() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(Theme::parse(theme.as_str()), Some(theme));
        }
        assert_eq!(Theme::parse("dark\n"), Some(Theme::Dark));
        assert_eq!(Theme::parse("solarized"), None);
        assert_eq!(Theme::parse(""), None);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::default(), Theme::Light);
    }
}
