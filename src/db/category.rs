//! Category model for inkpost.

use serde::Serialize;

/// A post category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    /// Unique category ID.
    pub id: i64,
    /// Category name (unique).
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

/// Data for creating or replacing a category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// Category name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

impl NewCategory {
    /// Create a category without a description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
