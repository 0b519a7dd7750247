use colored::Color;

pub const PRIMARY: Color = Color::BrightBlue;
pub const ACCENT: Color = Color::BrightCyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const HEALTHY: Color = Color::Green;
pub const UNHEALTHY: Color = Color::Yellow;
pub const ERRORED: Color = Color::Red;
