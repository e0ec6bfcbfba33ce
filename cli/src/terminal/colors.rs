use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const MAC_ADDR: Color = Color::BrightCyan;
pub const PREFIX: Color = Color::Cyan;
pub const VENDOR: Color = Color::BrightMagenta;
pub const FRAME: Color = Color::BrightBlue;
