// src/model/workspace.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named container for a user's document forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub owner_id: String,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

impl Workspace {
    pub fn new(name: String, owner_id: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description: None,
            icon: None,
            owner_id,
            is_archived: false,
            created_at: Utc::now(),
        }
    }

    pub fn short_id(&self) -> String {
        self.id.to_string()[..7].to_string()
    }
}
