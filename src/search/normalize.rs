//! Text normalization for matching / 匹配用文本标准化
//!
//! Both sides of a comparison go through the same folding so that the server
//! filter and any client-side filter agree on what "case-insensitive" means.

/// Fold text for case-insensitive comparison / 转小写
///
/// Unicode-aware lowercasing; no whitespace collapsing and no character
/// substitution, so a query is always matched literally.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Normalize a raw query. Returns `None` for a blank query.
///
/// Trimming only decides blankness; the needle keeps its surrounding
/// whitespace, so `" b"` matches "shelf B" but not "Bag".
pub fn normalize_query(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(fold_case(query))
    }
}

/// Case-insensitive substring test against an already-folded needle.
///
/// Folds the haystack on every call; one allocation per field per query is
/// fine at catalog sizes.
pub fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    fold_case(haystack).contains(folded_needle)
}
