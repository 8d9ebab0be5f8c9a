//! Tag input for the ask-question form.

use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationError};

pub const MAX_TAGS: usize = 5;

/// Offered as one-click additions next to the form.
pub const POPULAR_TAGS: [&str; 8] = [
    "javascript",
    "react",
    "typescript",
    "nodejs",
    "python",
    "css",
    "html",
    "database",
];

/// An ordered set of at most [`MAX_TAGS`] distinct, trimmed, non-empty tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `raw` after trimming it. The set is left untouched on error.
    pub fn add(&mut self, raw: &str) -> Result<(), ValidationError> {
        let tag = raw.trim();
        if tag.is_empty() {
            return Err(ValidationError::MissingField(Field::Tag));
        }
        if self.contains(tag) {
            return Err(ValidationError::DuplicateTag(tag.to_string()));
        }
        if self.is_full() {
            return Err(ValidationError::TagLimitExceeded);
        }
        self.tags.push(tag.to_string());
        Ok(())
    }

    /// Removes by exact match. Returns whether anything was removed.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_full(&self) -> bool {
        self.tags.len() >= MAX_TAGS
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}
