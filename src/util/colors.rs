use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x0050fa7b);
pub const SECONDARY: Color = Color::from_u32(0x00287a43);
pub const NEUTRAL: Color = Color::from_u32(0x00404040);
pub const BACKGROUND: Color = Color::from_u32(0x000d0d0d);
pub const ACCENT: Color = Color::from_u32(0x008be9fd);
