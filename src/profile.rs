//! The user profile
//!
//! One profile per database. Text fields use empty strings for "unset"
//! in memory and NULL on disk.

use serde::{Deserialize, Serialize};

/// Fixed row id of the singleton profile
pub const PROFILE_ID: i64 = 1;

/// User attributes for this database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub age: Option<i64>,
    pub height_inches: Option<f64>,
}

impl UserProfile {
    /// Create a profile with only names set
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Default::default()
        }
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    pub fn with_age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_height_inches(mut self, height: f64) -> Self {
        self.height_inches = Some(height);
        self
    }

    /// "First Last", skipping whichever part is empty
    pub fn display_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Map an in-memory text field to its column value (blank becomes NULL)
pub(crate) fn text_to_column(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
