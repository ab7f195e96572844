//! Search module - pure filtering over an item snapshot / 搜索模块
//!
//! The module owns no storage. Callers fetch the candidate set from the item
//! store and pass it in; the same predicate serves the HTTP search endpoint and
//! any client that filters a previously fetched list.

pub mod engine;
pub mod normalize;

pub use engine::{search, search_owned, ItemQuery};
