//! # scmview-sdk
//!
//! REST client for the SCM backend the console widgets read from.
//!
//! ## Example
//!
//! ```no_run
//! use scmview_core::ScmBackend;
//! use scmview_sdk::ScmClient;
//!
//! # async fn run() -> scmview_core::Result<()> {
//! let client = ScmClient::new("http://localhost:8080/scm/api/rest/")?;
//!
//! // List the root of repository 42 at its latest revision
//! let listing = client.browse("42", "", None).await?;
//! for file in listing.files {
//!     println!("{}", file.path);
//! }
//! # Ok(())
//! # }
//! ```

use scmview_core::backend::{browse_url, changesets_url, content_url, repository_url};
use scmview_core::{
    BrowserResult, ChangesetPage, ConsoleConfig, Error, Repository, Result, ScmBackend,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct ScmClient {
    base_url: String,
    client: reqwest::Client,
}

fn map_error(url: &str, error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Timeout(url.to_string())
    } else if let Some(status) = error.status() {
        Error::Http {
            status: status.as_u16(),
            url: url.to_string(),
        }
    } else {
        Error::Network(error.to_string())
    }
}

impl ScmClient {
    /// Create a new client
    ///
    /// # Arguments
    ///
    /// * `base_url` - REST root of the backend (e.g., "http://localhost:8080/scm/api/rest/")
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client whose requests fail with [`Error::Timeout`] after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &ConsoleConfig) -> Result<Self> {
        Self::with_timeout(config.backend_url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` and return the raw body, e.g. a viewer tab's content URL
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_error(url, e))?
            .error_for_status()
            .map_err(|e| map_error(url, e))?;

        let body = response.bytes().await.map_err(|e| map_error(url, e))?;
        Ok(body.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.fetch(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Check backend availability
    pub async fn health_check(&self) -> bool {
        match self.client.get(&self.base_url).send().await {
            Ok(response) => !response.status().is_server_error(),
            Err(_) => false,
        }
    }
}

impl ScmBackend for ScmClient {
    async fn repository(&self, id: &str) -> Result<Repository> {
        self.get_json(&repository_url(&self.base_url, id)).await
    }

    async fn browse(
        &self,
        repository_id: &str,
        path: &str,
        revision: Option<&str>,
    ) -> Result<BrowserResult> {
        self.get_json(&browse_url(&self.base_url, repository_id, path, revision))
            .await
    }

    async fn changesets(
        &self,
        repository_id: &str,
        start: usize,
        limit: usize,
    ) -> Result<ChangesetPage> {
        self.get_json(&changesets_url(&self.base_url, repository_id, start, limit))
            .await
    }

    async fn content(
        &self,
        repository_id: &str,
        path: &str,
        revision: Option<&str>,
    ) -> Result<Vec<u8>> {
        self.fetch(&content_url(&self.base_url, repository_id, path, revision))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use std::collections::HashMap;

    async fn stub_backend() -> String {
        let app = Router::new()
            .route(
                "/repositories/42/browse.json",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    let path = params.get("path").cloned().unwrap_or_default();
                    let revision = params.get("revision").cloned();
                    Json(serde_json::json!({
                        "revision": revision,
                        "files": [{
                            "path": format!("{}/readme.txt", path),
                            "name": "readme.txt",
                            "length": 12,
                            "lastModified": 1300000000000i64,
                            "directory": false
                        }]
                    }))
                }),
            )
            .route(
                "/repositories/42/content",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    format!("content of {}", params.get("path").cloned().unwrap_or_default())
                }),
            )
            .route(
                "/repositories/42/changesets.json",
                get(|| async { "{ not json" }),
            )
            .route(
                "/repositories/slow/browse.json",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "{}"
                }),
            )
            .route(
                "/repositories/broken/browse.json",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_client_creation() {
        let client = ScmClient::new("http://localhost:8080/scm/api/rest").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/scm/api/rest/");
    }

    #[tokio::test]
    async fn test_browse() {
        let client = ScmClient::new(stub_backend().await).unwrap();

        let result = client.browse("42", "docs/api", Some("tip")).await.unwrap();

        assert_eq!(result.revision.as_deref(), Some("tip"));
        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].path, "docs/api/readme.txt");
        assert!(result.files[0].last_modified.is_some());
    }

    #[tokio::test]
    async fn test_content() {
        let client = ScmClient::new(stub_backend().await).unwrap();

        let content = client.content("42", "a b/c.txt", None).await.unwrap();

        assert_eq!(String::from_utf8(content).unwrap(), "content of a b/c.txt");
    }

    #[tokio::test]
    async fn test_error_mapping() {
        let base = stub_backend().await;
        let client = ScmClient::with_timeout(base, Duration::from_millis(200)).unwrap();

        assert!(matches!(
            client.browse("unknown", "", None).await,
            Err(Error::Http { status: 404, .. })
        ));
        assert!(matches!(
            client.browse("broken", "", None).await,
            Err(Error::Http { status: 500, .. })
        ));
        assert!(matches!(
            client.browse("slow", "", None).await,
            Err(Error::Timeout(_))
        ));
        assert!(matches!(
            client.changesets("42", 0, 20).await,
            Err(Error::MalformedData(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let client = ScmClient::new("http://127.0.0.1:9").unwrap();

        let result = client.browse("42", "", None).await;

        assert!(result.unwrap_err().is_network());
        assert!(!client.health_check().await);
    }
}
