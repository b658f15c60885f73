use ratatui::style::Color;

pub const APP_TITLE: &str = "lil news";

pub const COLOR_ACCENT: Color = Color::Rgb(137, 180, 250);
pub const COLOR_TEXT_PRIMARY: Color = Color::Rgb(205, 214, 244);
pub const COLOR_TEXT_SECONDARY: Color = Color::Rgb(147, 153, 178);
pub const COLOR_SELECTED_BG: Color = Color::Rgb(49, 50, 68);
pub const COLOR_ERROR: Color = Color::Rgb(243, 139, 168);
pub const COLOR_PLACEHOLDER: Color = Color::DarkGray;

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize]
}
