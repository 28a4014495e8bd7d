//! Typed document records.
//!
//! The repository never hands out raw rows; every read path maps onto
//! [`Document`] and every write path goes through [`NewDocument`]. The
//! keyword set is derived from the comma-separated `keywords` column, never
//! stored separately on the struct, so the two cannot drift apart.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A stored document with its repository-assigned identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub document_type: String,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub department: Option<String>,
    pub status: String,
    pub jurisdiction: Option<String>,
    /// Comma-separated keyword list as authored.
    pub keywords: String,
    pub document_url: Option<String>,
    /// Static boost weight for lexical ranking; 1 means no boost.
    pub search_priority: i64,
    /// Denormalized concatenation used for substring matching.
    pub full_text_content: Option<String>,
    pub created_at_us: i64,
}

impl Document {
    /// Keyword tokens derived from the comma-separated `keywords` string.
    ///
    /// Deterministic: split on commas, trim whitespace, drop empty entries.
    #[must_use]
    pub fn keyword_set(&self) -> BTreeSet<String> {
        self.keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }

    /// Text fed to the vector index: title, content, and the derived keyword
    /// tokens combined. Keywords go in as tokens, not as the raw
    /// comma-separated string, so `"UGC,regulation"` indexes as two terms.
    #[must_use]
    pub fn index_text(&self) -> String {
        let keywords: Vec<String> = self.keyword_set().into_iter().collect();
        format!("{} {} {}", self.title, self.content, keywords.join(" "))
    }

    /// Whether the document carries any indexable text.
    ///
    /// Documents failing this check are skipped at fit time with a warning.
    #[must_use]
    pub fn has_index_text(&self) -> bool {
        !self.title.trim().is_empty() || !self.content.trim().is_empty()
    }
}

/// A document as authored, before insertion assigns an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    pub title: String,
    pub content: String,
    pub document_type: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub document_url: Option<String>,
    #[serde(default = "default_search_priority")]
    pub search_priority: i64,
    #[serde(default)]
    pub full_text_content: Option<String>,
}

impl NewDocument {
    /// Keyword tokens, same derivation as [`Document::keyword_set`].
    #[must_use]
    pub fn keyword_set(&self) -> BTreeSet<String> {
        self.keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }
}

fn default_status() -> String {
    "Active".to_string()
}

const fn default_search_priority() -> i64 {
    1
}
