//! Repository file browser widget.
//!
//! The widget lists one directory of one repository at an optional revision.
//! A host drives it with [`RepositoryBrowser::begin_load`] and
//! [`RepositoryBrowser::complete_load`]; only the most recent request can
//! change what is displayed.

use crate::backend::{content_url, ScmBackend};
use crate::config::{ConsoleConfig, IconSet};
use crate::error::{Error, Result};
use crate::format::{escape_html, Formatter, Html};
use crate::grid::{Column, Grid};
use crate::models::{file_name, BrowserResult, FileEntry, Repository};
use crate::shell::{Shell, TabConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const WIDGET_NAME: &str = "repositoryBrowser";

const PARENT_NAME: &str = "..";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

/// What a click on a row does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavAction {
    pub kind: EntryKind,
    pub path: String,
}

impl NavAction {
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Directory,
            path: path.into(),
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::File,
            path: path.into(),
        }
    }

    /// `dir:<path>` or `file:<path>`.
    pub fn marker(&self) -> String {
        match self.kind {
            EntryKind::Directory => format!("dir:{}", self.path),
            EntryKind::File => format!("file:{}", self.path),
        }
    }

    pub fn parse(marker: &str) -> Result<Self> {
        match marker.split_once(':') {
            Some(("dir", path)) => Ok(Self::directory(path)),
            Some(("file", path)) => Ok(Self::file(path)),
            _ => Err(Error::InvalidMarker(marker.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserState {
    Idle,
    Loading { path: String },
    Loaded,
    Error { message: String },
}

/// A listing request handed out by [`RepositoryBrowser::begin_load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    generation: u64,
    pub path: String,
    pub revision: Option<String>,
}

impl LoadRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer request was issued; the response was dropped.
    Stale,
    Failed,
}

/// View-model of one listing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserRow {
    pub icon: String,
    pub name: String,
    pub action: NavAction,
    pub size: String,
    pub last_modified: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub label: String,
    pub path: String,
}

impl Crumb {
    pub fn action(&self) -> NavAction {
        NavAction::directory(self.path.clone())
    }
}

/// Clickable path prefixes followed by the static repository context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub segments: Vec<Crumb>,
    pub repository_name: String,
    pub revision: Option<String>,
}

impl Breadcrumb {
    pub fn for_path(path: &str, repository_name: &str, revision: Option<&str>) -> Self {
        let mut segments = vec![Crumb {
            label: String::new(),
            path: String::new(),
        }];

        let mut prefix = String::new();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(part);
            segments.push(Crumb {
                label: part.to_string(),
                path: prefix.clone(),
            });
        }

        Self {
            segments,
            repository_name: repository_name.to_string(),
            revision: revision.map(str::to_string),
        }
    }

    pub fn paths(&self) -> Vec<&str> {
        self.segments.iter().map(|c| c.path.as_str()).collect()
    }

    pub fn to_html(&self, folder_icon: &str) -> Html {
        let mut out = String::from("<div class=\"scm-breadcrumb\">");
        for crumb in &self.segments {
            out.push_str(&format!(
                "<a class=\"scm-browser\" href=\"#\" data-kind=\"dir\" data-path=\"{}\"><img src=\"{}\" alt=\"\" />{}/</a>",
                escape_html(&crumb.path),
                escape_html(folder_icon),
                escape_html(&crumb.label)
            ));
        }
        out.push_str(&format!(
            "<span class=\"scm-repository\">{}</span>",
            escape_html(&self.repository_name)
        ));
        if let Some(revision) = &self.revision {
            out.push_str(&format!(
                "<span class=\"scm-revision\">: {}</span>",
                escape_html(revision)
            ));
        }
        out.push_str("</div>");
        Html::trusted(out)
    }
}

/// Parent of `path`; root is `""`.
pub fn parent_path(path: &str) -> String {
    let path = path.strip_suffix('/').unwrap_or(path);
    match path.rfind('/') {
        Some(index) if index > 0 => path[..index].to_string(),
        _ => String::new(),
    }
}

/// Extension of the file name in `path`, if it has one. Dotfiles such as
/// `.hgignore` have none.
pub fn extension(path: &str) -> Option<&str> {
    let name = file_name(path);
    match name.rfind('.') {
        Some(index) if index > 0 && index + 1 < name.len() => Some(&name[index + 1..]),
        _ => None,
    }
}

/// Size column text; always empty for directories.
pub fn render_length(entry: &FileEntry, formatter: &Formatter) -> String {
    if entry.directory {
        String::new()
    } else {
        formatter.file_size(entry.length)
    }
}

fn row_grid(title: String) -> Grid<BrowserRow> {
    Grid::new(
        "repository-browser",
        vec![
            Column::new("icon", "", |r: &BrowserRow| {
                let name = escape_html(&r.name);
                Html::trusted(format!(
                    "<img src=\"{}\" alt=\"{}\" title=\"{}\" />",
                    escape_html(&r.icon),
                    name,
                    name
                ))
            })
            .with_width(28),
            Column::new("name", "Name", |r: &BrowserRow| {
                let kind = match r.action.kind {
                    EntryKind::Directory => "dir",
                    EntryKind::File => "file",
                };
                Html::trusted(format!(
                    "<a class=\"scm-browser\" href=\"#\" data-kind=\"{}\" data-path=\"{}\">{}</a>",
                    kind,
                    escape_html(&r.action.path),
                    escape_html(&r.name)
                ))
            })
            .with_width(180),
            Column::new("length", "Length", |r: &BrowserRow| Html::text(&r.size)),
            Column::new("lastModified", "Last Modified", |r: &BrowserRow| {
                Html::text(&r.last_modified)
            }),
            Column::new("description", "Description", |r: &BrowserRow| {
                Html::text(&r.description)
            }),
        ],
    )
    .with_title(title)
    .auto_expand("description")
}

pub struct RepositoryBrowser<S> {
    repository: Repository,
    revision: Option<String>,
    base_url: String,
    formatter: Formatter,
    icons: IconSet,
    shell: S,
    span: tracing::Span,
    grid: Grid<BrowserRow>,

    state: BrowserState,
    current_path: String,
    entries: Vec<FileEntry>,
    breadcrumb: Breadcrumb,
    generation: u64,
    pending: Option<u64>,
}

impl<S: Shell> RepositoryBrowser<S> {
    pub fn new(
        repository: Repository,
        revision: Option<String>,
        shell: S,
        config: &ConsoleConfig,
    ) -> Self {
        let span = tracing::debug_span!(
            "repository_browser",
            repository = %repository.id,
            revision = revision.as_deref().unwrap_or("")
        );
        span.in_scope(|| {
            debug!(
                "create new browser for repository {} and revision {:?}",
                repository.name, revision
            )
        });

        let breadcrumb = Breadcrumb::for_path("", &repository.name, revision.as_deref());
        let grid = row_grid(format!("Source: {}", repository.name));

        Self {
            base_url: config.backend_url.clone(),
            formatter: config.formatter(),
            icons: config.icons.clone(),
            grid,
            repository,
            revision,
            shell,
            span,
            state: BrowserState::Idle,
            current_path: String::new(),
            entries: Vec::new(),
            breadcrumb,
            generation: 0,
            pending: None,
        }
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    /// The last directory that loaded successfully.
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn breadcrumb(&self) -> &Breadcrumb {
        &self.breadcrumb
    }

    /// Displayed entries, including the synthetic `..` entry.
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub fn column_ids(&self) -> Vec<&'static str> {
        self.grid.column_ids()
    }

    pub fn title(&self) -> String {
        format!("Source: {}", self.repository.name)
    }

    /// Starts listing `path`. Any request issued earlier becomes stale.
    pub fn begin_load(&mut self, path: &str) -> LoadRequest {
        let _enter = self.span.enter();
        // Backend paths are relative to the repository root.
        let path = path.trim_start_matches('/');

        self.generation += 1;
        self.pending = Some(self.generation);
        self.state = BrowserState::Loading {
            path: path.to_string(),
        };
        self.shell.set_loading(true);
        debug!(generation = self.generation, "load directory: {}", path);

        LoadRequest {
            generation: self.generation,
            path: path.to_string(),
            revision: self.revision.clone(),
        }
    }

    pub fn complete_load(
        &mut self,
        request: LoadRequest,
        result: Result<BrowserResult>,
    ) -> LoadOutcome {
        let _enter = self.span.enter();

        if self.pending != Some(request.generation) {
            debug!(
                generation = request.generation,
                "discarding stale listing of {}", request.path
            );
            return LoadOutcome::Stale;
        }
        self.pending = None;
        self.shell.set_loading(false);

        match result {
            Ok(result) => {
                let mut entries = Vec::with_capacity(result.files.len() + 1);
                if !request.path.is_empty() {
                    entries.push(FileEntry {
                        name: PARENT_NAME.to_string(),
                        path: parent_path(&request.path),
                        directory: true,
                        ..Default::default()
                    });
                }
                entries.extend(result.files);

                self.entries = entries;
                self.breadcrumb = Breadcrumb::for_path(
                    &request.path,
                    &self.repository.name,
                    self.revision.as_deref(),
                );
                self.current_path = request.path;
                self.state = BrowserState::Loaded;
                LoadOutcome::Applied
            }
            Err(e) => {
                warn!("could not load directory {}: {}", request.path, e);
                let message = format!("Could not load directory '{}': {}", request.path, e);
                self.shell.notify_error("Error", &message);
                self.state = BrowserState::Error { message };
                LoadOutcome::Failed
            }
        }
    }

    /// Lists `path` through `backend` and applies the response.
    pub async fn load<B: ScmBackend>(&mut self, backend: &B, path: &str) -> LoadOutcome {
        let request = self.begin_load(path);
        let result = backend
            .browse(&self.repository.id, &request.path, request.revision.as_deref())
            .await;
        self.complete_load(request, result)
    }

    pub fn change_directory(&mut self, path: &str) -> LoadRequest {
        let path = path.strip_suffix('/').unwrap_or(path);
        self.span
            .in_scope(|| debug!("change directory: {}", path));
        self.begin_load(path)
    }

    /// Requests a viewer tab for `path`; the listing is left untouched.
    pub fn open_file(&self, path: &str) {
        let _enter = self.span.enter();
        debug!("open file: {}", path);

        let mut status_bar = vec![path.to_string(), self.repository.name.clone()];
        if let Some(revision) = &self.revision {
            status_bar.push(revision.clone());
        }

        self.shell.add_tab(TabConfig {
            id: format!("{}-b-{}", self.repository.id, path),
            title: file_name(path).to_string(),
            content_url: content_url(
                &self.base_url,
                &self.repository.id,
                path,
                self.revision.as_deref(),
            ),
            syntax: extension(path).map(str::to_string),
            closable: true,
            status_bar,
        });
    }

    /// Directory clicks return the listing request to run; file clicks open
    /// a tab and return `None`.
    pub fn on_row_click(&mut self, action: &NavAction) -> Option<LoadRequest> {
        match action.kind {
            EntryKind::Directory => Some(self.change_directory(&action.path)),
            EntryKind::File => {
                self.open_file(&action.path);
                None
            }
        }
    }

    /// Runs a click to completion against `backend`.
    pub async fn navigate<B: ScmBackend>(
        &mut self,
        backend: &B,
        action: &NavAction,
    ) -> Option<LoadOutcome> {
        let request = self.on_row_click(action)?;
        let result = backend
            .browse(&self.repository.id, &request.path, request.revision.as_deref())
            .await;
        Some(self.complete_load(request, result))
    }

    pub fn rows(&self) -> Vec<BrowserRow> {
        self.entries.iter().map(|e| self.row(e)).collect()
    }

    fn row(&self, entry: &FileEntry) -> BrowserRow {
        let (icon, action) = if entry.directory {
            (&self.icons.folder, NavAction::directory(entry.path.clone()))
        } else {
            (&self.icons.document, NavAction::file(entry.path.clone()))
        };

        BrowserRow {
            icon: icon.clone(),
            name: entry.name.clone(),
            action,
            size: render_length(entry, &self.formatter),
            last_modified: self.formatter.timestamp(entry.last_modified),
            description: entry.description.clone().unwrap_or_default(),
        }
    }

    pub fn to_html(&self) -> Html {
        let mut html = Html::trusted("<div class=\"repository-browser-panel\">");
        if matches!(self.state, BrowserState::Loading { .. }) {
            html.push(&Html::trusted("<div class=\"loading-mask\">Loading...</div>"));
        }
        html.push(&self.grid.to_html(&self.rows()));
        html.push(&self.breadcrumb.to_html(&self.icons.folder));
        html.push(&Html::trusted("</div>"));
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::shell::CollectingShell;

    fn browser(revision: Option<&str>) -> (RepositoryBrowser<CollectingShell>, CollectingShell) {
        let shell = CollectingShell::new();
        let browser = RepositoryBrowser::new(
            Repository::new("42", "heart-of-gold"),
            revision.map(str::to_string),
            shell.clone(),
            &ConsoleConfig::default(),
        );
        (browser, shell)
    }

    fn backend() -> MemoryBackend {
        let backend = MemoryBackend::new();
        backend.add_listing(
            "42",
            None,
            "",
            BrowserResult::new(vec![FileEntry::directory("a"), FileEntry::file("README", 12)]),
        );
        backend.add_listing(
            "42",
            None,
            "a",
            BrowserResult::new(vec![FileEntry::directory("a/b")]),
        );
        backend.add_listing(
            "42",
            None,
            "a/b",
            BrowserResult::new(vec![FileEntry::file("a/b/readme.txt", 2048)]),
        );
        backend
    }

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("a/b/c"), "a/b");
        assert_eq!(parent_path("a/b/c/"), "a/b");
        assert_eq!(parent_path("a"), "");
        assert_eq!(parent_path("/x"), "");
        assert_eq!(parent_path(""), "");
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("a/b/readme.txt"), Some("txt"));
        assert_eq!(extension("archive.tar.gz"), Some("gz"));
        assert_eq!(extension("Makefile"), None);
        assert_eq!(extension("conf/.hgignore"), None);
        assert_eq!(extension("v1.2/LICENSE"), None);
        assert_eq!(extension("trailing."), None);
    }

    #[test]
    fn test_marker_round_trip() {
        assert_eq!(NavAction::parse("dir:a/b").unwrap(), NavAction::directory("a/b"));
        assert_eq!(
            NavAction::parse("file:c:/x.txt").unwrap(),
            NavAction::file("c:/x.txt")
        );
        assert_eq!(NavAction::file("a/b.txt").marker(), "file:a/b.txt");
        assert!(matches!(
            NavAction::parse("link:a"),
            Err(Error::InvalidMarker(_))
        ));
        assert!(NavAction::parse("a/b").is_err());
    }

    #[test]
    fn test_render_length_ignores_directories() {
        let formatter = Formatter::default();
        let mut dir = FileEntry::directory("src");
        for length in [0, 1, 4096, u64::MAX] {
            dir.length = length;
            assert_eq!(render_length(&dir, &formatter), "");
        }
        assert_eq!(render_length(&FileEntry::file("a", 2048), &formatter), "2 KB");
    }

    #[test]
    fn test_empty_listing_of_nested_path_has_parent_entry() {
        let (mut browser, _) = browser(None);

        let request = browser.begin_load("a/b/c");
        let outcome = browser.complete_load(request, Ok(BrowserResult::default()));

        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(browser.entries().len(), 1);
        let parent = &browser.entries()[0];
        assert_eq!(parent.name, "..");
        assert_eq!(parent.path, "a/b");
        assert!(parent.directory);
    }

    #[test]
    fn test_root_listing_has_no_parent_entry() {
        let (mut browser, _) = browser(None);

        let request = browser.begin_load("");
        browser.complete_load(request, Ok(BrowserResult::new(vec![FileEntry::file("x", 1)])));

        assert_eq!(browser.entries().len(), 1);
        assert!(browser.entries().iter().all(|e| e.name != ".."));
    }

    #[test]
    fn test_breadcrumb_ignores_trailing_slash() {
        assert_eq!(
            Breadcrumb::for_path("a/b/", "repo", Some("tip")),
            Breadcrumb::for_path("a/b", "repo", Some("tip"))
        );

        let crumb = Breadcrumb::for_path("a/b", "repo", None);
        assert_eq!(crumb.paths(), vec!["", "a", "a/b"]);
        assert_eq!(crumb.segments[2].label, "b");
        assert_eq!(crumb.segments[1].action(), NavAction::directory("a"));
    }

    #[test]
    fn test_breadcrumb_html() {
        let html = Breadcrumb::for_path("a", "heart <of> gold", Some("tip"))
            .to_html("folder.gif")
            .into_string();

        assert_eq!(html.matches("data-kind=\"dir\"").count(), 2);
        assert!(html.contains("data-path=\"a\""));
        assert!(html.contains("<span class=\"scm-repository\">heart &lt;of&gt; gold</span>"));
        assert!(html.contains("<span class=\"scm-revision\">: tip</span>"));
    }

    #[tokio::test]
    async fn test_directory_click_reloads_and_updates_breadcrumb() {
        let backend = backend();
        let (mut browser, _) = browser(None);
        browser.load(&backend, "").await;

        let outcome = browser
            .navigate(&backend, &NavAction::parse("dir:a/b").unwrap())
            .await;

        assert_eq!(outcome, Some(LoadOutcome::Applied));
        assert_eq!(browser.current_path(), "a/b");
        assert_eq!(browser.breadcrumb().paths(), vec!["", "a", "a/b"]);
        assert_eq!(browser.entries()[1].path, "a/b/readme.txt");
        assert_eq!(browser.state(), &BrowserState::Loaded);
    }

    #[tokio::test]
    async fn test_directory_click_strips_trailing_slash() {
        let backend = backend();
        let (mut browser, _) = browser(None);

        browser.navigate(&backend, &NavAction::directory("a/")).await;

        assert_eq!(browser.current_path(), "a");
        assert_eq!(browser.entries()[0].path, "");
    }

    #[tokio::test]
    async fn test_file_click_opens_tab_without_touching_listing() {
        let backend = backend();
        let (mut browser, shell) = browser(Some("tip"));
        backend.add_listing(
            "42",
            Some("tip"),
            "a/b",
            BrowserResult::new(vec![FileEntry::file("a/b/readme.txt", 2048)]),
        );
        browser.load(&backend, "a/b").await;
        let entries = browser.entries().to_vec();
        let breadcrumb = browser.breadcrumb().clone();

        let outcome = browser
            .navigate(&backend, &NavAction::parse("file:a/b/readme.txt").unwrap())
            .await;

        assert_eq!(outcome, None);
        assert_eq!(browser.entries(), entries.as_slice());
        assert_eq!(browser.breadcrumb(), &breadcrumb);
        assert_eq!(browser.state(), &BrowserState::Loaded);

        let tabs = shell.tabs();
        assert_eq!(tabs.len(), 1);
        let tab = &tabs[0];
        assert_eq!(tab.syntax.as_deref(), Some("txt"));
        assert_eq!(tab.title, "readme.txt");
        assert_eq!(tab.id, "42-b-a/b/readme.txt");
        assert_eq!(
            tab.content_url,
            "http://localhost:8080/scm/api/rest/repositories/42/content?path=a/b/readme.txt&revision=tip"
        );
        assert_eq!(tab.status_bar, vec!["a/b/readme.txt", "heart-of-gold", "tip"]);
    }

    #[test]
    fn test_late_response_cannot_overwrite_newer_state() {
        let (mut browser, shell) = browser(None);

        let p = browser.begin_load("p");
        let q = browser.begin_load("q");

        let q_outcome = browser.complete_load(
            q,
            Ok(BrowserResult::new(vec![FileEntry::file("q/one", 1)])),
        );
        let p_outcome = browser.complete_load(
            p,
            Ok(BrowserResult::new(vec![FileEntry::file("p/other", 1)])),
        );

        assert_eq!(q_outcome, LoadOutcome::Applied);
        assert_eq!(p_outcome, LoadOutcome::Stale);
        assert_eq!(browser.current_path(), "q");
        assert_eq!(browser.entries()[1].path, "q/one");
        assert_eq!(browser.breadcrumb().paths(), vec!["", "q"]);
        assert!(!shell.is_loading());
    }

    #[test]
    fn test_stale_response_while_newer_is_pending() {
        let (mut browser, shell) = browser(None);

        let p = browser.begin_load("p");
        let _q = browser.begin_load("q");

        let outcome = browser.complete_load(p, Err(Error::Timeout("p".to_string())));

        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(browser.state(), &BrowserState::Loading { path: "q".to_string() });
        assert!(shell.is_loading());
        assert!(shell.notifications().is_empty());
    }

    #[test]
    fn test_response_applies_only_once() {
        let (mut browser, _) = browser(None);

        let request = browser.begin_load("a");
        let duplicate = request.clone();
        browser.complete_load(request, Ok(BrowserResult::default()));

        assert_eq!(
            browser.complete_load(duplicate, Ok(BrowserResult::default())),
            LoadOutcome::Stale
        );
    }

    #[tokio::test]
    async fn test_failed_listing_keeps_last_good_state() {
        let backend = backend();
        let (mut browser, shell) = browser(None);
        browser.load(&backend, "a").await;

        let outcome = browser.navigate(&backend, &NavAction::directory("missing")).await;

        assert_eq!(outcome, Some(LoadOutcome::Failed));
        assert!(matches!(browser.state(), BrowserState::Error { .. }));
        assert_eq!(browser.current_path(), "a");
        assert_eq!(browser.breadcrumb().paths(), vec!["", "a"]);
        assert_eq!(browser.entries()[1].path, "a/b");

        let notifications = shell.notifications();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].message.contains("missing"));
        assert!(!shell.is_loading());

        let outcome = browser.navigate(&backend, &NavAction::directory("a/b")).await;
        assert_eq!(outcome, Some(LoadOutcome::Applied));
        assert_eq!(browser.state(), &BrowserState::Loaded);
    }

    #[tokio::test]
    async fn test_leading_slash_is_relative_to_root() {
        let backend = backend();
        let (mut browser, _) = browser(None);

        let outcome = browser.navigate(&backend, &NavAction::directory("/a/")).await;

        assert_eq!(outcome, Some(LoadOutcome::Applied));
        assert_eq!(browser.current_path(), "a");
        assert_eq!(browser.breadcrumb().paths(), vec!["", "a"]);
        assert_eq!(browser.entries()[0].path, "");
    }

    #[test]
    fn test_timeout_moves_to_error_state() {
        let (mut browser, shell) = browser(Some("tip"));
        let request = browser.begin_load("a");
        browser.complete_load(request, Ok(BrowserResult::default()));
        let breadcrumb = browser.breadcrumb().clone();

        let request = browser.change_directory("a/b");
        let outcome = browser.complete_load(request, Err(Error::Timeout("browse.json".into())));

        assert_eq!(outcome, LoadOutcome::Failed);
        assert!(matches!(browser.state(), BrowserState::Error { .. }));
        assert_eq!(browser.breadcrumb(), &breadcrumb);
        assert_eq!(browser.current_path(), "a");
        assert!(!shell.is_loading());

        let notifications = shell.notifications();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].message.contains("a/b"));
    }

    #[test]
    fn test_loading_indicator() {
        let (mut browser, shell) = browser(None);
        assert_eq!(browser.state(), &BrowserState::Idle);

        let request = browser.begin_load("");
        assert!(shell.is_loading());
        assert!(browser.to_html().as_str().contains("loading-mask"));

        browser.complete_load(request, Ok(BrowserResult::default()));
        assert!(!shell.is_loading());
        assert!(!browser.to_html().as_str().contains("loading-mask"));
    }

    #[tokio::test]
    async fn test_rows_and_html() {
        let backend = backend();
        let (mut browser, _) = browser(None);
        backend.add_listing(
            "42",
            None,
            "docs",
            BrowserResult::new(vec![
                FileEntry::directory("docs/img"),
                FileEntry::file("docs/a&b.md", 1536).with_description("<b>notes</b>"),
            ]),
        );
        browser.load(&backend, "docs").await;

        let rows = browser.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "..");
        assert_eq!(rows[0].action, NavAction::directory(""));
        assert_eq!(rows[1].icon, IconSet::default().folder);
        assert_eq!(rows[1].size, "");
        assert_eq!(rows[2].action, NavAction::file("docs/a&b.md"));
        assert_eq!(rows[2].size, "1.5 KB");
        assert_eq!(rows[2].description, "<b>notes</b>");

        let html = browser.to_html().into_string();
        assert!(html.contains("<caption>Source: heart-of-gold</caption>"));
        assert!(html.contains("data-kind=\"file\" data-path=\"docs/a&amp;b.md\">a&amp;b.md</a>"));
        assert!(html.contains("&lt;b&gt;notes&lt;/b&gt;"));
        assert!(html.contains("scm-breadcrumb"));
    }
}
