use crate::settings::ThemeMode;
use ratatui::style::Modifier;
use ratatui::style::Style;

#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub danger: Style,
    pub border: Style,
    pub header: Style,
    pub pinned: Style,
    pub row_alt: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().blue(),
            danger: Style::default().red(),
            border: Style::default().gray(),
            header: Style::default().add_modifier(Modifier::BOLD),
            pinned: Style::default().add_modifier(Modifier::ITALIC),
            row_alt: Style::default(),
        }
    }

    pub fn dark() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default().white(),
            text_muted: Style::default().gray(),
            accent: Style::default().cyan(),
            danger: Style::default().light_red(),
            border: Style::default().dark_gray(),
            header: Style::default().white().add_modifier(Modifier::BOLD),
            pinned: Style::default().light_cyan(),
            row_alt: Style::default().on_black(),
        }
    }
}
