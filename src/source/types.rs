use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Article source unavailable: {0}")]
    Unavailable(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The fetch task panicked before producing a result.
    #[error("Fetch task panicked: {0}")]
    TaskPanicked(String),
}

// ============================================================================
// Data Types
// ============================================================================

/// A single article summary as delivered by a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub summary: String,
    /// Opaque image reference (file name or URI).
    pub image: String,
}

/// One settled fetch: the articles of the requested page plus the category
/// labels known to the source, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlePage {
    pub articles: Vec<Article>,
    pub categories: Vec<String>,
}

/// Arguments of a single fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// `None` means "All Categories".
    pub category: Option<String>,
    /// 1-based page number.
    pub page: u32,
}

impl PageQuery {
    pub fn new(category: Option<String>, page: u32) -> Self {
        Self { category, page }
    }

    /// First page of the given category.
    pub fn first(category: Option<String>) -> Self {
        Self::new(category, 1)
    }
}
