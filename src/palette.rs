use plotters::style::RGBColor;
use serde::Serialize;

/// Low end of the continuous scale
pub const LINEAR_LOW: RGBColor = RGBColor(235, 244, 255);
/// High end of the continuous scale
pub const LINEAR_HIGH: RGBColor = RGBColor(8, 48, 107);
/// Used for every value when the domain is degenerate
pub const NEUTRAL: RGBColor = RGBColor(204, 204, 204);

/// Low -> high severity
pub const CLASSIFY_3: [RGBColor; 3] = [
    RGBColor(46, 204, 113),
    RGBColor(241, 196, 15),
    RGBColor(231, 76, 60),
];

/// Low -> high severity
pub const CLASSIFY_5: [RGBColor; 5] = [
    RGBColor(26, 152, 80),
    RGBColor(145, 207, 96),
    RGBColor(254, 224, 139),
    RGBColor(252, 141, 89),
    RGBColor(215, 48, 39),
];

/// Luminance above which black text is used (0-255 scale)
pub const DEFAULT_TEXT_THRESHOLD: f64 = 128.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    Black,
    White,
}

impl TextColor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextColor::Black => "black",
            TextColor::White => "white",
        }
    }
}

/// ITU-R BT.601 perceived brightness, 0-255
pub fn luminance(color: RGBColor) -> f64 {
    let RGBColor(r, g, b) = color;
    (299.0 * r as f64 + 587.0 * g as f64 + 114.0 * b as f64) / 1000.0
}

/// Higher-contrast foreground for text drawn on `background`
pub fn text_color_for(background: RGBColor, threshold: f64) -> TextColor {
    if luminance(background) > threshold {
        TextColor::Black
    } else {
        TextColor::White
    }
}

/// Channel-wise interpolation, `t` clamped to [0, 1]
pub fn lerp(from: RGBColor, to: RGBColor, t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

pub fn to_hex(color: RGBColor) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}

/// Parse a color string into RGBColor, supporting hex (#RRGGBB, #RGB) and named colors
pub fn parse_color(color_str: &str) -> Option<RGBColor> {
    let color_str = color_str.trim();

    if color_str.starts_with('#') {
        return parse_hex_color(color_str);
    }

    match color_str.to_lowercase().as_str() {
        "white" => Some(RGBColor(255, 255, 255)),
        "black" => Some(RGBColor(0, 0, 0)),
        "red" => Some(RGBColor(255, 0, 0)),
        "green" => Some(RGBColor(0, 128, 0)),
        "blue" => Some(RGBColor(0, 0, 255)),
        "yellow" => Some(RGBColor(255, 255, 0)),
        "orange" => Some(RGBColor(255, 165, 0)),
        "gray" | "grey" => Some(RGBColor(128, 128, 128)),
        "lightgray" | "lightgrey" => Some(RGBColor(192, 192, 192)),
        _ => None,
    }
}

/// Parse hex color (#RRGGBB or #RGB)
fn parse_hex_color(hex: &str) -> Option<RGBColor> {
    let hex = hex.trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(RGBColor(r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(RGBColor(r, g, b))
        }
        _ => None,
    }
}
