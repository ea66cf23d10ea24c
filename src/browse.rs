//! 対話式ブラウズ
//!
//! 点を選ぶ → カルーセルで前後移動・テーブル行選択 → 戻る、を繰り返す。

use crate::error::{Result, TrendscopeError};
use crate::render::{point_labels, render_chart, render_selection};
use dialoguer::Select;
use trendscope_common::{DetailView, Direction, ResultVisualizationPipeline, TableView};

/// カルーセル画面の操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselAction {
    Prev,
    Next,
    PickRow,
    Back,
    Quit,
}

impl CarouselAction {
    pub fn label(&self) -> &'static str {
        match self {
            CarouselAction::Prev => "<- Previous",
            CarouselAction::Next => "Next ->",
            CarouselAction::PickRow => "テーブルから選ぶ",
            CarouselAction::Back => "点の選択に戻る",
            CarouselAction::Quit => "終了",
        }
    }
}

/// 現在の表示で選べる操作（無効なボタンは出さない）
pub fn carousel_actions(detail: Option<&DetailView>, table: Option<&TableView>) -> Vec<CarouselAction> {
    let mut actions = Vec::new();
    if let Some(detail) = detail {
        if detail.next_enabled {
            actions.push(CarouselAction::Next);
        }
        if detail.prev_enabled {
            actions.push(CarouselAction::Prev);
        }
    }
    if table.is_some() {
        actions.push(CarouselAction::PickRow);
    }
    actions.push(CarouselAction::Back);
    actions.push(CarouselAction::Quit);
    actions
}

/// 対話式で結果を閲覧
pub fn run_interactive_browse(
    pipeline: &mut ResultVisualizationPipeline,
    image_base: &str,
) -> Result<()> {
    println!("{}", render_chart(pipeline));

    if pipeline.chart().points().is_empty() {
        return Ok(());
    }

    loop {
        let mut labels = point_labels(pipeline);
        labels.push("終了".to_string());

        let choice = prompt("点を選択", &labels)?;
        if choice + 1 == labels.len() {
            return Ok(());
        }
        pipeline.click_point(choice)?;

        if !run_carousel(pipeline, image_base)? {
            return Ok(());
        }
    }
}

/// `false` を返したら終了
fn run_carousel(pipeline: &mut ResultVisualizationPipeline, image_base: &str) -> Result<bool> {
    loop {
        println!("\n{}", render_selection(pipeline, image_base));

        let detail = pipeline.detail_view(image_base);
        let table = pipeline.table_view();
        let actions = carousel_actions(detail.as_ref(), table.as_ref());
        let labels: Vec<&str> = actions.iter().map(CarouselAction::label).collect();

        match actions[prompt("操作", &labels)?] {
            CarouselAction::Next => {
                pipeline.navigate(Direction::Next);
            }
            CarouselAction::Prev => {
                pipeline.navigate(Direction::Prev);
            }
            CarouselAction::PickRow => {
                if let Some(table) = table {
                    let rows: Vec<String> = table
                        .rows
                        .iter()
                        .map(|r| format!("{}  {}  {}", r.garment_type, r.source, r.date))
                        .collect();
                    let row = prompt("行を選択", &rows)?;
                    pipeline.select_row(row);
                }
            }
            CarouselAction::Back => return Ok(true),
            CarouselAction::Quit => return Ok(false),
        }
    }
}

fn prompt<T: ToString>(message: &str, items: &[T]) -> Result<usize> {
    Select::new()
        .with_prompt(message)
        .items(items)
        .default(0)
        .interact()
        .map_err(|e| TrendscopeError::Prompt(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use trendscope_common::{Item, Selection};

    fn selection(n: usize) -> Selection {
        let items: Vec<Item> = (0..n)
            .map(|i| Item { id: format!("i{}", i), ..Default::default() })
            .collect();
        let mut selection = Selection::default();
        selection.select(Arc::from(items));
        selection
    }

    #[test]
    fn test_actions_single_item() {
        let s = selection(1);
        let detail = DetailView::build(&s, "");
        let table = TableView::build(&s);
        assert_eq!(
            carousel_actions(detail.as_ref(), table.as_ref()),
            vec![CarouselAction::Back, CarouselAction::Quit]
        );
    }

    #[test]
    fn test_actions_first_of_many() {
        let s = selection(3);
        let detail = DetailView::build(&s, "");
        let table = TableView::build(&s);
        assert_eq!(
            carousel_actions(detail.as_ref(), table.as_ref()),
            vec![
                CarouselAction::Next,
                CarouselAction::PickRow,
                CarouselAction::Back,
                CarouselAction::Quit
            ]
        );
    }

    #[test]
    fn test_actions_last_of_many() {
        let mut s = selection(2);
        s.navigate(Direction::Next);
        let detail = DetailView::build(&s, "");
        let actions = carousel_actions(detail.as_ref(), TableView::build(&s).as_ref());
        assert!(actions.contains(&CarouselAction::Prev));
        assert!(!actions.contains(&CarouselAction::Next));
    }
}
