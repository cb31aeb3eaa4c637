use plotters::style::RGBColor;

/// Series colours, cycled by series index.
pub const SERIES_COLORS: [&str; 5] = [
    "#3b82f6", // blue
    "#ef4444", // red
    "#10b981", // green
    "#f59e0b", // orange
    "#8b5cf6", // purple
];

pub fn series_hex(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

pub fn series_color(index: usize) -> RGBColor {
    hex_to_rgb(series_hex(index)).unwrap_or(RGBColor(59, 130, 246))
}

/// Parse `#rrggbb`.
pub fn hex_to_rgb(hex: &str) -> Option<RGBColor> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}
