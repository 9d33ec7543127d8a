use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::storage::Record;
use crate::validation::ValidationErrors;

/// Collection-specific fields of a content document.
pub trait ContentBody:
    std::fmt::Debug + Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Collection name used in ids and logs.
    const COLLECTION: &'static str;
    /// Public read routes.
    const PUBLIC_PATH: &'static str;
    /// Editor CRUD routes.
    const ADMIN_PATH: &'static str;

    /// Source text for derived slugs.
    fn title(&self) -> &str;

    fn validate(&self, errors: &mut ValidationErrors);

    /// Explicit display position; unordered collections list newest first.
    fn order(&self) -> Option<u32> {
        None
    }
}

/// Stored document: shared metadata plus the collection body, flattened on
/// the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct ContentDocument<T> {
    pub id: String,
    pub slug: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub body: T,
}

impl<T: ContentBody> Record for ContentDocument<T> {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Create or replace payload. `slug` falls back to the title and
/// `published` to the current state (drafts when new).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct ContentDraft<T> {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(flatten)]
    pub body: T,
}

/// Lowercase ASCII words joined by single hyphens.
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_hyphen = false;

    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
