//! Search engine - multi-field substring filter over an item snapshot / 搜索引擎
//!
//! An item matches when any of name, category, location, or one of its tags
//! contains the query, ignoring case. Results keep the snapshot order and each
//! item appears at most once.
//!
//! There is no index: every call scans the whole snapshot. Callers re-run it on
//! each query change (e.g. per keystroke), which is fine at catalog sizes.

use crate::models::Item;

use super::normalize::{contains_folded, normalize_query};

/// A prepared query / 预处理后的查询
///
/// Folding happens once here rather than per item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    needle: Option<String>,
}

impl ItemQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: normalize_query(raw),
        }
    }

    /// True when the query is blank and every item passes.
    pub fn is_match_all(&self) -> bool {
        self.needle.is_none()
    }

    /// The matching predicate.
    pub fn matches(&self, item: &Item) -> bool {
        let needle = match &self.needle {
            Some(n) => n,
            None => return true,
        };

        contains_folded(&item.name, needle)
            || contains_folded(&item.category, needle)
            || contains_folded(&item.location, needle)
            || item.tags.iter().any(|tag| contains_folded(tag, needle))
    }

    /// Borrowing filter, stable order.
    pub fn filter<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// Filter a snapshot by query / 按查询过滤物品
pub fn search(items: &[Item], query: &str) -> Vec<Item> {
    let query = ItemQuery::new(query);
    if query.is_match_all() {
        return items.to_vec();
    }
    query.filter(items).into_iter().cloned().collect()
}

/// Owning variant for callers that already hold the snapshot by value.
pub fn search_owned(items: Vec<Item>, query: &str) -> Vec<Item> {
    let query = ItemQuery::new(query);
    if query.is_match_all() {
        return items;
    }
    items.into_iter().filter(|item| query.matches(item)).collect()
}
