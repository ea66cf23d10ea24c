//! 選択コントローラ
//!
//! 現在選択中のアイテム列とフォーカス位置を持つ。
//! 位置は両端で止まり、折り返さない。

use std::sync::Arc;

use crate::types::Item;

/// カルーセルの移動方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

#[derive(Debug, Clone)]
pub struct Selection {
    items: Arc<[Item]>,
    index: usize,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            items: Arc::from(Vec::new()),
            index: 0,
        }
    }
}

impl Selection {
    /// アイテム列を丸ごと置き換え、位置を先頭に戻す
    pub fn select(&mut self, items: Arc<[Item]>) {
        self.items = items;
        self.index = 0;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// 位置が変わったら `true`
    pub fn navigate(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Next if self.index + 1 < self.items.len() => {
                self.index += 1;
                true
            }
            Direction::Prev if self.index > 0 && !self.items.is_empty() => {
                self.index -= 1;
                true
            }
            _ => false,
        }
    }

    /// テーブル行クリック。範囲外は無視する
    pub fn focus(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.index = index;
            true
        } else {
            false
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn shared_items(&self) -> Arc<[Item]> {
        Arc::clone(&self.items)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current(&self) -> Option<&Item> {
        self.items.get(self.index)
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.items.len()
    }
}
