//! 日本語フォールバックフォント

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};
use tracing::debug;

const FALLBACK_NAME: &str = "jp_fallback";

const FONT_CANDIDATES: &[&str] = &[
    r"C:\Windows\Fonts\meiryo.ttc",
    r"C:\Windows\Fonts\msgothic.ttc",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
];

/// 既定フォントの末尾にフォールバックを足す（比例・等幅とも）
fn with_fallback(data: Vec<u8>) -> FontDefinitions {
    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert(FALLBACK_NAME.to_string(), FontData::from_owned(data));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(FALLBACK_NAME.to_string());
    }
    fonts
}

pub fn configure_fonts(ctx: &egui::Context) {
    let Some((path, data)) = FONT_CANDIDATES
        .iter()
        .find_map(|path| std::fs::read(path).ok().map(|data| (*path, data)))
    else {
        debug!("no fallback font found");
        return;
    };
    debug!(path, "fallback font loaded");
    ctx.set_fonts(with_fallback(data));
}
