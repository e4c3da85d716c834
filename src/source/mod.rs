//! Article data providers.
//!
//! The page controller only knows the [`ArticleSource`] trait. Anything that
//! can answer "give me page N of category C" plugs in here:
//!
//! - [`StubSource`] - fixed in-process data served after a simulated latency
//!
//! # Example
//!
//! ```ignore
//! use frontpage::source::{ArticleSource, PageQuery, StubSource};
//!
//! let source = StubSource::default();
//! let page = source.fetch(&PageQuery::first(None)).await?;
//! assert_eq!(page.articles.len(), 4);
//! ```

mod stub;
mod types;

pub use stub::{StubSource, DEFAULT_LATENCY};
pub use types::{Article, ArticlePage, PageQuery, SourceError};

use futures::future::BoxFuture;

/// Asynchronous provider of article pages.
///
/// Implementations must be shareable across tasks: the controller holds an
/// `Arc<dyn ArticleSource>` and every fetch runs on its own tokio task.
pub trait ArticleSource: Send + Sync {
    /// Fetch one page of articles for the given filter.
    fn fetch<'a>(&'a self, query: &'a PageQuery) -> BoxFuture<'a, Result<ArticlePage, SourceError>>;
}
