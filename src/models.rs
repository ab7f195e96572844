use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CatalogError, Result};

/// A cataloged physical item / 物品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub category: String,
    pub location: String,
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Create request body / 新建物品请求
///
/// Absent or `null` text fields decode as empty strings so they fail
/// validation the same way an explicit `""` does. `null` tags are an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemDraft {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ItemDraft {
    pub fn new(name: &str, category: &str, location: &str) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            location: location.to_string(),
            image: None,
            tags: Vec::new(),
        }
    }

    pub fn image(mut self, val: &str) -> Self {
        self.image = Some(val.to_string());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Check required fields; whitespace-only counts as empty.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("category", &self.category),
            ("location", &self.location),
        ] {
            if value.trim().is_empty() {
                return Err(CatalogError::missing_field(field));
            }
        }
        Ok(())
    }

    /// Turn a validated draft into a record. Values are kept as submitted.
    pub fn into_item(self, id: String, created_at: DateTime<Utc>) -> Item {
        Item {
            id,
            name: self.name,
            category: self.category,
            location: self.location,
            image: self.image,
            tags: self.tags,
            created_at,
        }
    }
}
