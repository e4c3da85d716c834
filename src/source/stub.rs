//! In-process stand-in for a real article backend.
//!
//! Serves the same four articles and three categories for every query after a
//! fixed delay. The filter and page arguments are accepted and logged but do
//! not change the result.

use super::{Article, ArticlePage, ArticleSource, PageQuery, SourceError};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::time::Duration;

/// Simulated round-trip time of the stub backend.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

const CATEGORIES: [&str; 3] = ["Business", "Technology", "Entertainment"];

/// Fixed-data article source with simulated latency.
#[derive(Debug, Clone)]
pub struct StubSource {
    latency: Duration,
}

impl StubSource {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// The page every query resolves to.
    pub fn fixed_page() -> ArticlePage {
        let articles = (1..=4)
            .map(|n| Article {
                id: n,
                title: format!("Article {}", n),
                summary: format!("Summary {}", n),
                image: format!("image{}.jpg", n),
            })
            .collect();

        ArticlePage {
            articles,
            categories: CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Default for StubSource {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

impl ArticleSource for StubSource {
    fn fetch<'a>(&'a self, query: &'a PageQuery) -> BoxFuture<'a, Result<ArticlePage, SourceError>> {
        async move {
            tracing::debug!(
                category = query.category.as_deref().unwrap_or(""),
                page = query.page,
                latency_ms = self.latency.as_millis() as u64,
                "Stub fetch"
            );
            tokio::time::sleep(self.latency).await;
            Ok(Self::fixed_page())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixed_page_contents() {
        let page = StubSource::fixed_page();
        let titles: Vec<&str> = page.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["Article 1", "Article 2", "Article 3", "Article 4"]);
        assert_eq!(page.articles[2].summary, "Summary 3");
        assert_eq!(page.articles[3].image, "image4.jpg");
        assert_eq!(page.categories, ["Business", "Technology", "Entertainment"]);
    }

    #[test]
    fn test_article_ids_unique() {
        let page = StubSource::fixed_page();
        let mut ids: Vec<u64> = page.articles.iter().map(|a| a.id).collect();
        ids.dedup();
        assert_eq!(ids, [1, 2, 3, 4]);
    }

    #[test]
    fn test_default_latency() {
        assert_eq!(StubSource::default().latency(), DEFAULT_LATENCY);
        assert_eq!(
            StubSource::new(Duration::ZERO).latency(),
            Duration::ZERO
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_waits_for_latency() {
        let source = StubSource::new(Duration::from_millis(1000));
        let query = PageQuery::first(None);
        let start = tokio::time::Instant::now();

        let page = source.fetch(&query).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert_eq!(page.articles.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_ignores_filter_and_page() {
        let source = StubSource::default();
        let all = source.fetch(&PageQuery::first(None)).await.unwrap();
        let tech = source
            .fetch(&PageQuery::new(Some("Technology".to_string()), 7))
            .await
            .unwrap();
        assert_eq!(all, tech);
    }
}
