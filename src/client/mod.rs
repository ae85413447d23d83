//! Content repository client
//!
//! The content repository is a remote headless CMS. It exposes a paged
//! query endpoint, an opaque next-page cursor URL, and a
//! fetch-by-identifier endpoint.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::content::RawDocument;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid content repository URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },
}

/// One page of query results, as returned by the content repository
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentPage {
    #[serde(default)]
    pub page: usize,

    /// Opaque cursor; fetched verbatim, only checked for presence
    pub next_page: Option<String>,

    pub results: Vec<RawDocument>,
}

/// Operations the content repository exposes
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Query documents of a type, selecting only the named data fields
    async fn query(
        &self,
        doc_type: &str,
        fields: &[&str],
        page_size: usize,
    ) -> Result<DocumentPage, ClientError>;

    /// Fetch a pagination cursor URL verbatim
    async fn fetch_page(&self, url: &str) -> Result<DocumentPage, ClientError>;

    /// Fetch one document by uid; `None` means it does not exist
    async fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
    ) -> Result<Option<RawDocument>, ClientError>;
}

/// HTTP implementation of [`ContentApi`]
pub struct ContentClient {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl ContentClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        // a trailing slash keeps Url::join from replacing the last path segment
        let mut endpoint = config.endpoint.clone();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        let base = Url::parse(&endpoint)?;
        let client = Client::builder().user_agent(user_agent()).build()?;

        Ok(Self {
            client,
            base,
            token: config.token(),
        })
    }

    fn get(&self, url: Url) -> reqwest::RequestBuilder {
        let mut req = self.client.get(url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn fetch_json<T: for<'de> Deserialize<'de>>(&self, url: Url) -> Result<T, ClientError> {
        let resp = self.get(url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(ClientError::Status {
                status: resp.status(),
                url: url.to_string(),
            });
        }
        Ok(resp.json().await?)
    }
}

fn user_agent() -> &'static str {
    concat!("startrail/", env!("CARGO_PKG_VERSION"))
}

#[async_trait]
impl ContentApi for ContentClient {
    async fn query(
        &self,
        doc_type: &str,
        fields: &[&str],
        page_size: usize,
    ) -> Result<DocumentPage, ClientError> {
        let mut url = self.base.join("documents/search")?;
        url.query_pairs_mut()
            .append_pair("type", doc_type)
            .append_pair("fields", &fields.join(","))
            .append_pair("page_size", &page_size.to_string());
        self.fetch_json(url).await
    }

    async fn fetch_page(&self, url: &str) -> Result<DocumentPage, ClientError> {
        let url = Url::parse(url)?;
        self.fetch_json(url).await
    }

    async fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
    ) -> Result<Option<RawDocument>, ClientError> {
        let url = self.base.join(&format!("documents/{}/{}", doc_type, uid))?;
        let resp = self.get(url.clone()).send().await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(ClientError::Status {
                status: resp.status(),
                url: url.to_string(),
            });
        }
        Ok(Some(resp.json().await?))
    }
}
