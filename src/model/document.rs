// src/model/document.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub const UNTITLED: &str = "Untitled";

/// A node in the document tree.
///
/// `content` is an opaque serialized editor payload; the engine stores and
/// returns it without parsing. `parent_id` is absent for root documents,
/// `workspace_id` is absent for unscoped documents. `sort_order` is ascending
/// among siblings; gaps are tolerated and only a full reorder pass rewrites
/// the whole group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    pub owner_id: String,
    pub is_archived: bool,
    pub is_published: bool,
    pub content: Option<String>,
    pub cover_image: Option<String>,
    pub icon: Option<String>,
    pub parent_id: Option<Uuid>,
    pub workspace_id: Option<Uuid>,
    pub sort_order: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn new(title: String, owner_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            owner_id,
            is_archived: false,
            is_published: false,
            content: None,
            cover_image: None,
            icon: None,
            parent_id: None,
            workspace_id: None,
            sort_order: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Short id prefix for human-readable output.
    pub fn short_id(&self) -> String {
        self.id.to_string()[..7].to_string()
    }
}

/// Relative position for a sibling reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderPosition {
    Before,
    After,
}

impl std::fmt::Display for ReorderPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReorderPosition::Before => write!(f, "before"),
            ReorderPosition::After => write!(f, "after"),
        }
    }
}

impl std::str::FromStr for ReorderPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "before" => Ok(ReorderPosition::Before),
            "after" => Ok(ReorderPosition::After),
            _ => Err(format!("Invalid position: {} (expected before/after)", s)),
        }
    }
}

/// Update payload for a document. Last-write-wins on every field.
///
/// `icon` and `cover_image` distinguish "leave unchanged" (None) from
/// "clear" (Some(None)) from "set" (Some(Some(value))).
#[derive(Debug, Default, Deserialize)]
pub struct DocumentUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub icon: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub cover_image: Option<Option<String>>,
    pub is_published: Option<bool>,
}

// A present-but-null JSON field must deserialize to Some(None), not None.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}
