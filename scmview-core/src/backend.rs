//! The REST backend as seen by the widgets.

use crate::error::{Error, Result};
use crate::models::{BrowserResult, ChangesetPage, Repository};
use percent_encoding::{percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

pub trait ScmBackend: Send + Sync {
    fn repository(&self, id: &str) -> impl Future<Output = Result<Repository>> + Send;

    /// Lists `path` (root when empty) at `revision` (latest when `None`).
    fn browse(
        &self,
        repository_id: &str,
        path: &str,
        revision: Option<&str>,
    ) -> impl Future<Output = Result<BrowserResult>> + Send;

    fn changesets(
        &self,
        repository_id: &str,
        start: usize,
        limit: usize,
    ) -> impl Future<Output = Result<ChangesetPage>> + Send;

    fn content(
        &self,
        repository_id: &str,
        path: &str,
        revision: Option<&str>,
    ) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

fn encode(value: &str) -> String {
    percent_encode(value.as_bytes(), QUERY_VALUE).to_string()
}

fn with_revision(mut url: String, revision: Option<&str>) -> String {
    if let Some(revision) = revision {
        url.push_str(if url.contains('?') { "&" } else { "?" });
        url.push_str("revision=");
        url.push_str(&encode(revision));
    }
    url
}

pub fn repository_url(base: &str, repository_id: &str) -> String {
    format!("{}repositories/{}.json", base, encode(repository_id))
}

pub fn browse_url(base: &str, repository_id: &str, path: &str, revision: Option<&str>) -> String {
    let mut url = format!("{}repositories/{}/browse.json", base, encode(repository_id));
    if !path.is_empty() {
        url.push_str("?path=");
        url.push_str(&encode(path));
    }
    with_revision(url, revision)
}

pub fn content_url(base: &str, repository_id: &str, path: &str, revision: Option<&str>) -> String {
    let url = format!(
        "{}repositories/{}/content?path={}",
        base,
        encode(repository_id),
        encode(path)
    );
    with_revision(url, revision)
}

pub fn changesets_url(base: &str, repository_id: &str, start: usize, limit: usize) -> String {
    format!(
        "{}repositories/{}/changesets.json?start={}&limit={}",
        base,
        encode(repository_id),
        start,
        limit
    )
}

type ListingKey = (String, Option<String>, String);

#[derive(Debug, Default)]
struct MemoryState {
    repositories: HashMap<String, Repository>,
    listings: HashMap<ListingKey, BrowserResult>,
    contents: HashMap<ListingKey, Vec<u8>>,
    changesets: HashMap<String, Vec<crate::models::Changeset>>,
}

/// Backend held entirely in memory, for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn add_repository(&self, repository: Repository) {
        self.state()
            .repositories
            .insert(repository.id.clone(), repository);
    }

    pub fn add_listing(
        &self,
        repository_id: &str,
        revision: Option<&str>,
        path: &str,
        result: BrowserResult,
    ) {
        self.state().listings.insert(
            (
                repository_id.to_string(),
                revision.map(str::to_string),
                path.to_string(),
            ),
            result,
        );
    }

    pub fn add_content(
        &self,
        repository_id: &str,
        revision: Option<&str>,
        path: &str,
        content: impl Into<Vec<u8>>,
    ) {
        self.state().contents.insert(
            (
                repository_id.to_string(),
                revision.map(str::to_string),
                path.to_string(),
            ),
            content.into(),
        );
    }

    pub fn add_changesets(&self, repository_id: &str, changesets: Vec<crate::models::Changeset>) {
        self.state()
            .changesets
            .insert(repository_id.to_string(), changesets);
    }
}

fn not_found(url: String) -> Error {
    Error::Http { status: 404, url }
}

impl ScmBackend for MemoryBackend {
    async fn repository(&self, id: &str) -> Result<Repository> {
        self.state()
            .repositories
            .get(id)
            .cloned()
            .ok_or_else(|| not_found(repository_url("memory:/", id)))
    }

    async fn browse(
        &self,
        repository_id: &str,
        path: &str,
        revision: Option<&str>,
    ) -> Result<BrowserResult> {
        let key = (
            repository_id.to_string(),
            revision.map(str::to_string),
            path.to_string(),
        );
        self.state()
            .listings
            .get(&key)
            .cloned()
            .ok_or_else(|| not_found(browse_url("memory:/", repository_id, path, revision)))
    }

    async fn changesets(
        &self,
        repository_id: &str,
        start: usize,
        limit: usize,
    ) -> Result<ChangesetPage> {
        let state = self.state();
        let all = state
            .changesets
            .get(repository_id)
            .ok_or_else(|| not_found(changesets_url("memory:/", repository_id, start, limit)))?;

        Ok(ChangesetPage {
            total: all.len(),
            changesets: all.iter().skip(start).take(limit).cloned().collect(),
        })
    }

    async fn content(
        &self,
        repository_id: &str,
        path: &str,
        revision: Option<&str>,
    ) -> Result<Vec<u8>> {
        let key = (
            repository_id.to_string(),
            revision.map(str::to_string),
            path.to_string(),
        );
        self.state()
            .contents
            .get(&key)
            .cloned()
            .ok_or_else(|| not_found(content_url("memory:/", repository_id, path, revision)))
    }
}
