//! 属性フィルタ
//!
//! 各グループは先頭アイテムの色・柄・フィットで代表させる。
//! 異なる属性のアイテムが混在するグループでも先頭以外は見ない。

use serde::{Deserialize, Serialize};

use crate::types::ResultGroup;

/// 「制約なし」を表す値
pub const ALL: &str = "all";

pub const COLOR_OPTIONS: &[&str] = &["red", "blue", "green", "black", "white", "yellow", "grey"];
pub const PATTERN_OPTIONS: &[&str] = &["solid", "stripes", "checks", "floral", "polka dots"];
pub const FIT_OPTIONS: &[&str] = &["slim", "regular", "oversized", "straight", "relaxed"];

/// フィルタ条件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub color: String,
    pub pattern: String,
    pub fit: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            color: ALL.to_string(),
            pattern: ALL.to_string(),
            fit: ALL.to_string(),
        }
    }
}

impl FilterState {
    /// CLIなどの省略可能な引数から構築（`None` は "all"）
    pub fn from_options(color: Option<&str>, pattern: Option<&str>, fit: Option<&str>) -> Self {
        let normalize = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_lowercase)
                .unwrap_or_else(|| ALL.to_string())
        };
        Self {
            color: normalize(color),
            pattern: normalize(pattern),
            fit: normalize(fit),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        is_all(&self.color) && is_all(&self.pattern) && is_all(&self.fit)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 先頭アイテムの派生属性がすべての条件を満たすか
    pub fn matches(&self, group: &ResultGroup) -> bool {
        let first = group.first_item();
        field_matches(&self.color, &first.color_or_default())
            && field_matches(&self.pattern, &first.pattern_or_unknown())
            && field_matches(&self.fit, &first.fit_or_unknown())
    }
}

fn is_all(value: &str) -> bool {
    value.eq_ignore_ascii_case(ALL)
}

fn field_matches(wanted: &str, derived: &str) -> bool {
    is_all(wanted) || derived.to_lowercase().contains(&wanted.to_lowercase())
}

/// 条件に合うグループだけを入力順のまま返す
pub fn filter_groups(groups: &[ResultGroup], state: &FilterState) -> Vec<ResultGroup> {
    groups.iter().filter(|g| state.matches(g)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::{group, item};
    use crate::types::Item;

    fn sample() -> Vec<ResultGroup> {
        vec![
            group("2025-10-01", vec![item("a", "blue", "solid")], 100.0),
            group("2025-10-05", vec![item("b", "Navy Blue", "Stripes")], 200.0),
            group("2025-10-07", vec![item("c", "red", "floral"), item("d", "blue", "solid")], 50.0),
        ]
    }

    #[test]
    fn test_all_filters_return_input() {
        let groups = sample();
        let filtered = filter_groups(&groups, &FilterState::default());
        assert_eq!(filtered, groups);
    }

    #[test]
    fn test_color_substring_case_insensitive() {
        let groups = sample();
        let state = FilterState { color: "BLUE".into(), ..Default::default() };
        let ids: Vec<_> = filter_groups(&groups, &state)
            .iter()
            .map(|g| g.first_item().id.clone())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_first_item_represents_group() {
        // 2件目が blue でも先頭が red のグループは除外される
        let groups = sample();
        let state = FilterState { color: "blue".into(), pattern: "solid".into(), ..Default::default() };
        let filtered = filter_groups(&groups, &state);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].first_item().id, "a");
    }

    #[test]
    fn test_missing_attributes_use_sentinels() {
        let groups = vec![group("2025-10-01", vec![Item::default()], 1.0)];
        let unknown = FilterState { pattern: "unknown".into(), fit: "unknown".into(), ..Default::default() };
        assert_eq!(filter_groups(&groups, &unknown).len(), 1);

        let default_color = FilterState { color: "#8884d8".into(), ..Default::default() };
        assert_eq!(filter_groups(&groups, &default_color).len(), 1);

        let slim = FilterState { fit: "slim".into(), ..Default::default() };
        assert!(filter_groups(&groups, &slim).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let groups = sample();
        let state = FilterState { pattern: "s".into(), ..Default::default() };
        let once = filter_groups(&groups, &state);
        let twice = filter_groups(&once, &state);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_keeps_item_count_invariant() {
        let groups = sample();
        let state = FilterState { color: "red".into(), ..Default::default() };
        for g in filter_groups(&groups, &state) {
            assert_eq!(g.item_count(), g.items().len());
        }
    }

    #[test]
    fn test_from_options_and_reset() {
        let mut state = FilterState::from_options(Some(" Red "), None, Some(""));
        assert_eq!(state.color, "red");
        assert_eq!(state.pattern, ALL);
        assert_eq!(state.fit, ALL);
        assert!(!state.is_unconstrained());

        state.reset();
        assert!(state.is_unconstrained());
    }
}
