use ratatui::style::Style;

/// Base palette shared by the widgets in this crate.
///
/// Widget option styles are patched on top of these, so an app can restyle everything by
/// swapping the theme and only override specifics through options.
#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub surface_alt: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Color;
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            surface_alt: Style::default().bg(Color::Indexed(236)),
        }
    }
}
