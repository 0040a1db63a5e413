//! Category model
//!
//! Categories are ordered, named groupings of budget items. The reserved
//! "None" category always exists and collects items whose own category was
//! deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Name of the reserved category that always exists and is never deletable
pub const NONE_CATEGORY: &str = "None";

/// A named grouping of budget items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Display name (unique, case-sensitive compare)
    pub name: String,

    /// Manual ordering number
    pub sort_order: i32,

    /// When this category was created
    pub created_at: DateTime<Utc>,

    /// When this category was last modified
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether this is the reserved "None" category
    pub fn is_none_category(&self) -> bool {
        self.name == NONE_CATEGORY
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Category name cannot be empty".into());
        }
        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
