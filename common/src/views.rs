//! 詳細（カルーセル）とテーブルのビューモデル
//!
//! どちらも選択状態だけから作る純粋な関数。描画側（CLI/デスクトップ）は
//! ここで決まった文字列とフラグをそのまま表示する。

use serde::Serialize;

use crate::selection::Selection;
use crate::timestamp::format_date;
use crate::types::Item;

pub const NO_COLOR_INFO: &str = "No color info";
pub const NO_IMAGE: &str = "Garment Viewer not available";

/// 色表示
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "colors", rename_all = "snake_case")]
pub enum Swatches {
    Colors(Vec<String>),
    NoColorInfo,
}

impl Swatches {
    pub fn for_item(item: &Item) -> Self {
        let colors = item.swatches();
        if colors.is_empty() {
            Swatches::NoColorInfo
        } else {
            Swatches::Colors(colors)
        }
    }

    pub fn label(&self) -> String {
        match self {
            Swatches::Colors(colors) => colors.join(", "),
            Swatches::NoColorInfo => NO_COLOR_INFO.to_string(),
        }
    }
}

/// 画像表示
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "snake_case")]
pub enum ImageView {
    Link(String),
    Placeholder,
}

impl ImageView {
    pub fn resolve(item: &Item, base: &str) -> Self {
        match item.image_ref() {
            Some(reference) => ImageView::Link(join_image_ref(base, reference)),
            None => ImageView::Placeholder,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ImageView::Link(location) => location,
            ImageView::Placeholder => NO_IMAGE,
        }
    }
}

/// 画像参照をベースと結合（絶対URLはそのまま）
pub fn join_image_ref(base: &str, reference: &str) -> String {
    if reference.starts_with("http://") || reference.starts_with("https://") || base.is_empty() {
        return reference.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        reference.trim_start_matches('/')
    )
}

/// カルーセル
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    /// 1始まりの位置
    pub position: usize,
    pub total: usize,
    pub show_navigation: bool,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub garment_type: String,
    pub swatches: Swatches,
    pub pattern: String,
    pub style: String,
    pub engagement_likes: u64,
    pub engagement_views: u64,
    pub image: ImageView,
}

impl DetailView {
    /// 選択が空なら表示しない
    pub fn build(selection: &Selection, image_base: &str) -> Option<Self> {
        let item = selection.current()?;
        let total = selection.len();
        Some(Self {
            position: selection.index() + 1,
            total,
            show_navigation: total > 1,
            prev_enabled: !selection.is_first(),
            next_enabled: !selection.is_last(),
            garment_type: item.garment_type.clone(),
            swatches: Swatches::for_item(item),
            pattern: item.pattern.clone().unwrap_or_default(),
            style: item.style.clone().unwrap_or_default(),
            engagement_likes: item.engagement_likes,
            engagement_views: item.engagement_views,
            image: ImageView::resolve(item, image_base),
        })
    }

    /// "i of N"
    pub fn position_label(&self) -> String {
        format!("{} of {}", self.position, self.total)
    }

    pub fn engagement_label(&self) -> String {
        format!("{} likes / {} views", self.engagement_likes, self.engagement_views)
    }
}

/// テーブル1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub garment_type: String,
    pub source: String,
    pub views: u64,
    pub likes: u64,
    pub date: String,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub rows: Vec<TableRow>,
}

pub const TABLE_HEADERS: [&str; 5] = ["Garment Type", "Source", "Views", "Likes", "Date"];

impl TableView {
    /// 2件以上のときだけ作る（1件なら詳細だけで十分）
    pub fn build(selection: &Selection) -> Option<Self> {
        if selection.len() <= 1 {
            return None;
        }
        let rows = selection
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| TableRow {
                garment_type: item.garment_type.clone(),
                source: item.source.clone(),
                views: item.engagement_views,
                likes: item.engagement_likes,
                date: item.timestamp.as_ref().map(format_date).unwrap_or_else(|| "-".to_string()),
                focused: i == selection.index(),
            })
            .collect();
        Some(Self { rows })
    }
}
