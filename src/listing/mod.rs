//! Post listing flow
//!
//! Walks the content repository's paged post query. All state lives in
//! [`Listing`] and advances through a single reducer, so the display
//! list, cursor and page number always move together.

use crate::client::{ClientError, ContentApi, DocumentPage};
use crate::config::SiteConfig;
use crate::content::{PostSummary, POST_TYPE};

/// Data fields requested from the listing query
const SUMMARY_FIELDS: &[&str] = &["posts.title", "posts.subtitle", "posts.author"];

/// Where the listing stands in the repository's result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// The first page has not been requested yet
    NotStarted,
    /// More results exist at this URL
    HasMore(String),
    /// The result set is exhausted
    Exhausted,
}

/// Listing state: the display list plus the cursor position.
///
/// The display list is append-only, in fetch order; this flow never
/// reorders or deduplicates.
#[derive(Debug, Clone)]
pub struct Listing {
    pub posts: Vec<PostSummary>,
    pub cursor: Cursor,
    pub page: usize,
}

impl Listing {
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            cursor: Cursor::NotStarted,
            page: 0,
        }
    }

    /// Whether a further page exists
    pub fn has_more(&self) -> bool {
        matches!(self.cursor, Cursor::HasMore(_))
    }

    /// Fold one fetched page into the listing.
    ///
    /// Appends the normalized summaries and replaces the cursor and page
    /// number in the same transition; there is no intermediate state in
    /// which they disagree.
    pub fn apply_page(mut self, page: DocumentPage, date_format: &str) -> Self {
        self.posts.extend(
            page.results
                .iter()
                .map(|doc| PostSummary::from_document(doc, date_format)),
        );
        self.cursor = match page.next_page {
            Some(url) => Cursor::HasMore(url),
            None => Cursor::Exhausted,
        };
        self.page = page.page;
        self
    }
}

impl Default for Listing {
    fn default() -> Self {
        Self::new()
    }
}

/// Load the first listing page. A failure here is fatal to the build.
pub async fn initial_load(
    api: &dyn ContentApi,
    config: &SiteConfig,
) -> Result<Listing, ClientError> {
    let page = api.query(POST_TYPE, SUMMARY_FIELDS, config.per_page).await?;
    Ok(Listing::new().apply_page(page, &config.date_format))
}

/// Fetch the next page and return the advanced listing.
///
/// The input listing is untouched, so a failed fetch leaves the caller
/// with a consistent state to retry from. An exhausted cursor is a
/// no-op; a `NotStarted` cursor performs the initial query.
pub async fn load_more(
    api: &dyn ContentApi,
    listing: &Listing,
    config: &SiteConfig,
) -> Result<Listing, ClientError> {
    let page = match &listing.cursor {
        Cursor::NotStarted => api.query(POST_TYPE, SUMMARY_FIELDS, config.per_page).await?,
        Cursor::HasMore(url) => api.fetch_page(url).await?,
        Cursor::Exhausted => return Ok(listing.clone()),
    };
    Ok(listing.clone().apply_page(page, &config.date_format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{RawData, RawDocument};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::collections::HashMap;

    fn doc(uid: &str, title: &str) -> RawDocument {
        RawDocument {
            uid: uid.to_string(),
            first_publication_date: Some("2021-03-15T19:25:28+0000".to_string()),
            data: RawData {
                title: title.to_string(),
                subtitle: format!("{} subtitle", title),
                author: "Ada".to_string(),
                banner: None,
                content: Vec::new(),
            },
        }
    }

    fn page(page: usize, next_page: Option<&str>, uids: &[&str]) -> DocumentPage {
        DocumentPage {
            page,
            next_page: next_page.map(str::to_string),
            results: uids.iter().map(|uid| doc(uid, uid)).collect(),
        }
    }

    /// In-memory content repository: one first page plus cursor pages by URL
    struct FakeApi {
        first: DocumentPage,
        pages: HashMap<String, DocumentPage>,
    }

    #[async_trait]
    impl ContentApi for FakeApi {
        async fn query(
            &self,
            doc_type: &str,
            fields: &[&str],
            page_size: usize,
        ) -> Result<DocumentPage, ClientError> {
            assert_eq!(doc_type, "posts");
            assert_eq!(fields, SUMMARY_FIELDS);
            assert_eq!(page_size, 5);
            Ok(self.first.clone())
        }

        async fn fetch_page(&self, url: &str) -> Result<DocumentPage, ClientError> {
            self.pages.get(url).cloned().ok_or(ClientError::Status {
                status: StatusCode::NOT_FOUND,
                url: url.to_string(),
            })
        }

        async fn get_by_uid(
            &self,
            _doc_type: &str,
            _uid: &str,
        ) -> Result<Option<RawDocument>, ClientError> {
            Ok(None)
        }
    }

    fn fake_api() -> FakeApi {
        let mut pages = HashMap::new();
        pages.insert(
            "http://cms.example.com/page2".to_string(),
            page(2, None, &["f", "g", "h"]),
        );
        FakeApi {
            first: page(
                1,
                Some("http://cms.example.com/page2"),
                &["a", "b", "c", "d", "e"],
            ),
            pages,
        }
    }

    #[tokio::test]
    async fn test_initial_load() {
        let api = fake_api();
        let listing = initial_load(&api, &SiteConfig::default()).await.unwrap();

        assert_eq!(listing.posts.len(), 5);
        assert_eq!(listing.page, 1);
        assert!(listing.has_more());
        assert_eq!(
            listing.cursor,
            Cursor::HasMore("http://cms.example.com/page2".to_string())
        );
    }

    #[tokio::test]
    async fn test_initial_load_exhausted_when_cursor_null() {
        let api = FakeApi {
            first: page(1, None, &["a", "b"]),
            pages: HashMap::new(),
        };
        let listing = initial_load(&api, &SiteConfig::default()).await.unwrap();

        assert!(!listing.has_more());
        assert_eq!(listing.cursor, Cursor::Exhausted);
    }

    #[tokio::test]
    async fn test_load_more_appends_and_advances_cursor() {
        let api = fake_api();
        let config = SiteConfig::default();
        let first = initial_load(&api, &config).await.unwrap();

        let second = load_more(&api, &first, &config).await.unwrap();
        assert_eq!(second.posts.len(), 8);
        assert_eq!(second.page, 2);
        assert_eq!(second.cursor, Cursor::Exhausted);

        // fetch order preserved, nothing dropped
        let uids: Vec<&str> = second.posts.iter().map(|p| p.uid.as_str()).collect();
        assert_eq!(uids, ["a", "b", "c", "d", "e", "f", "g", "h"]);
    }

    #[tokio::test]
    async fn test_load_more_on_exhausted_is_noop() {
        let api = fake_api();
        let config = SiteConfig::default();
        let mut listing = initial_load(&api, &config).await.unwrap();
        listing = load_more(&api, &listing, &config).await.unwrap();

        let again = load_more(&api, &listing, &config).await.unwrap();
        assert_eq!(again.posts.len(), 8);
        assert_eq!(again.page, 2);
        assert_eq!(again.cursor, Cursor::Exhausted);
    }

    #[tokio::test]
    async fn test_load_more_from_not_started_runs_initial_query() {
        let api = fake_api();
        let config = SiteConfig::default();

        let listing = load_more(&api, &Listing::new(), &config).await.unwrap();
        assert_eq!(listing.posts.len(), 5);
        assert_eq!(listing.page, 1);
    }

    #[tokio::test]
    async fn test_failed_load_more_leaves_state_intact() {
        let config = SiteConfig::default();
        let api = FakeApi {
            first: page(1, Some("http://cms.example.com/gone"), &["a"]),
            pages: HashMap::new(),
        };
        let listing = initial_load(&api, &config).await.unwrap();

        let result = load_more(&api, &listing, &config).await;
        assert!(result.is_err());

        // the caller still holds a consistent, retryable state
        assert_eq!(listing.posts.len(), 1);
        assert_eq!(listing.page, 1);
        assert!(listing.has_more());
    }

    #[tokio::test]
    async fn test_summaries_are_normalized_with_display_dates() {
        let api = fake_api();
        let listing = initial_load(&api, &SiteConfig::default()).await.unwrap();
        assert_eq!(
            listing.posts[0].first_publication_date.as_deref(),
            Some("15 Mar 2021")
        );
    }
}
