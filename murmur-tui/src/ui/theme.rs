use ratatui::style::Color;

pub struct ThemeColors {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub text: Color,
    pub text_dim: Color,
    pub background: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub highlight_bg: Color,
}

/// Single dark theme with violet accents.
pub fn get_theme_colors() -> ThemeColors {
    ThemeColors {
        primary: Color::Rgb(167, 139, 250),  // Violet
        secondary: Color::Rgb(96, 165, 250), // Blue
        accent: Color::Rgb(244, 114, 182),   // Pink
        text: Color::Rgb(220, 220, 225),     // Light gray
        text_dim: Color::Rgb(120, 120, 130), // Medium gray
        background: Color::Rgb(18, 18, 24),  // Very dark blue-gray
        border: Color::Rgb(55, 55, 70),      // Dark gray-blue
        success: Color::Rgb(74, 222, 128),   // Green
        warning: Color::Rgb(250, 204, 21),   // Yellow
        error: Color::Rgb(248, 113, 113),    // Red
        highlight_bg: Color::Rgb(38, 38, 52), // Slightly lighter than bg
    }
}
