pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod store;
pub mod utils;

pub use error::CatalogError;
pub use models::{Item, ItemDraft};
pub use store::ItemStore;
