/// Split a comma separated tag field into trimmed tags / 拆分逗号分隔的标签输入
///
/// For Rust clients building a draft from a single text field. The store and
/// the search engine take tags as an already split list and never call this.
/// Empty elements are kept, so `"a,,b"` yields `["a", "", "b"]` and `""`
/// yields `[""]`.
pub fn split_tag_input(text: &str) -> Vec<String> {
    text.split(',').map(|tag| tag.trim().to_string()).collect()
}

/// Inverse of `split_tag_input` for prefilling an edit field.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}
