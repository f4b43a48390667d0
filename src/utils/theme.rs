use ratatui::style::Color;

/// Color palette for the whole interface. The accent is the brand teal the
/// mobile client used for buttons and highlights.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub price: Color,
    pub original_price: Color,
    pub temperature: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            muted: Color::DarkGray,
            accent: Color::Rgb(92, 234, 212),
            price: Color::Rgb(92, 234, 212),
            original_price: Color::DarkGray,
            temperature: Color::Rgb(255, 140, 60),
            border: Color::DarkGray,
            selection_bg: Color::Rgb(92, 234, 212),
            selection_fg: Color::Black,
            danger: Color::Rgb(255, 77, 77),
        }
    }
}
