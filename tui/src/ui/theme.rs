use ratatui::style::{Color, Modifier, Style};

/// Cold steel-blue theme for the prediction form.
///
/// Light blue foreground on near-black, amber for warnings, red for
/// errors, cyan for the focused widget.
pub struct Theme;

impl Theme {
    // Core palette
    pub const BG: Color = Color::Rgb(8, 10, 16);
    pub const FG: Color = Color::Rgb(170, 200, 230);
    pub const FG_DIM: Color = Color::Rgb(100, 125, 150);
    pub const FG_MUTED: Color = Color::Rgb(70, 80, 95);

    // Accents
    pub const ACCENT: Color = Color::Rgb(0, 220, 255);
    pub const ACCENT_YELLOW: Color = Color::Rgb(255, 200, 0);
    pub const ACCENT_RED: Color = Color::Rgb(255, 80, 80);
    pub const ACCENT_GREEN: Color = Color::Rgb(120, 255, 160);

    /// Default full-screen style.
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    /// Panel borders.
    pub fn border() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    /// Titles (bold).
    pub fn title() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    /// Regular text.
    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    /// Secondary/dim text.
    pub fn dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    /// Muted/disabled text.
    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    /// The result value.
    pub fn result() -> Style {
        Style::default()
            .fg(Self::ACCENT_GREEN)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warn() -> Style {
        Style::default()
            .fg(Self::ACCENT_YELLOW)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ACCENT_RED)
            .add_modifier(Modifier::BOLD)
    }

    /// Focused widget accent.
    pub fn focus() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }
}
