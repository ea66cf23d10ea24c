//! 色名・16進表記を egui の色に変換

use egui::Color32;
use trendscope_common::types::DEFAULT_MARKER_COLOR;

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("red", [220, 38, 38]),
    ("blue", [37, 99, 235]),
    ("green", [22, 163, 74]),
    ("black", [20, 20, 20]),
    ("white", [245, 245, 245]),
    ("yellow", [234, 179, 8]),
    ("grey", [128, 128, 128]),
    ("gray", [128, 128, 128]),
    ("navy", [30, 41, 99]),
    ("pink", [236, 72, 153]),
    ("purple", [147, 51, 234]),
    ("orange", [249, 115, 22]),
    ("brown", [120, 72, 40]),
    ("beige", [222, 205, 170]),
    ("maroon", [128, 0, 0]),
];

pub fn parse_color(value: &str) -> Option<Color32> {
    let value = value.trim().to_lowercase();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, [r, g, b])| Color32::from_rgb(*r, *g, *b))
}

fn parse_hex(hex: &str) -> Option<Color32> {
    // 以降はバイト位置で切り出す
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color32::from_rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        // #rgb は各桁を2回繰り返す
        3 => {
            let digit = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(Color32::from_rgb(digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}

/// 不明な色は既定のマーカー色
pub fn marker_color(value: &str) -> Color32 {
    parse_color(value)
        .or_else(|| parse_color(DEFAULT_MARKER_COLOR))
        .unwrap_or(Color32::GRAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_color("#8884d8"), Some(Color32::from_rgb(0x88, 0x84, 0xd8)));
        assert_eq!(parse_color("#fff"), Some(Color32::from_rgb(255, 255, 255)));
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
    }

    #[test]
    fn test_non_ascii_hex_falls_back() {
        assert_eq!(parse_color("#éa"), None);
        assert_eq!(parse_color("#ffé0"), None);
        assert_eq!(marker_color("#éa"), Color32::from_rgb(0x88, 0x84, 0xd8));
    }

    #[test]
    fn test_named_colors_case_insensitive() {
        assert_eq!(parse_color("Blue"), parse_color("blue"));
        assert!(parse_color("grey").is_some());
    }

    #[test]
    fn test_unknown_falls_back_to_default_marker() {
        assert_eq!(marker_color("chartreuse-ish"), Color32::from_rgb(0x88, 0x84, 0xd8));
    }
}
