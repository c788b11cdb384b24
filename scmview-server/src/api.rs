use crate::error::Result;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use scmview_core::browser::extension;
use scmview_core::format::escape_html;
use scmview_core::{
    ChangesetViewerGrid, CollectingShell, ConsoleConfig, EntryKind, NavAction, Notification,
    RepositoryBrowser, ScmBackend, TabConfig, WidgetDescriptor, WidgetRegistry,
};
use serde::Deserialize;
use std::sync::Arc;

pub const SYNTAX_HEADER: &str = "x-scm-syntax";

pub struct AppState<B> {
    pub backend: Arc<B>,
    pub config: Arc<ConsoleConfig>,
    pub registry: Arc<WidgetRegistry>,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            config: Arc::clone(&self.config),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<B: ScmBackend> AppState<B> {
    pub fn new(backend: B, config: ConsoleConfig) -> Self {
        Self {
            backend: Arc::new(backend),
            config: Arc::new(config),
            registry: Arc::new(WidgetRegistry::with_defaults()),
        }
    }
}

pub fn create_router<B: ScmBackend + 'static>(state: AppState<B>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/widgets", get(list_widgets::<B>))
        .route("/widgets/:name", get(get_widget::<B>))
        .route("/repositories/:id/changesets", get(changesets::<B>))
        .route("/repositories/:id/browse", get(browse::<B>))
        .route("/repositories/:id/content", get(content::<B>))
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

async fn list_widgets<B: ScmBackend>(
    State(state): State<AppState<B>>,
) -> Json<Vec<WidgetDescriptor>> {
    Json(state.registry.descriptors().into_iter().cloned().collect())
}

async fn get_widget<B: ScmBackend>(
    State(state): State<AppState<B>>,
    Path(name): Path<String>,
) -> Result<Json<WidgetDescriptor>> {
    Ok(Json(state.registry.resolve(&name)?.clone()))
}

#[derive(Debug, Deserialize)]
struct ChangesetQuery {
    start: Option<usize>,
    limit: Option<usize>,
}

async fn changesets<B: ScmBackend>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
    Query(query): Query<ChangesetQuery>,
) -> Result<Html<String>> {
    let repository = state.backend.repository(&id).await?;
    let start = query.start.unwrap_or(0);
    let limit = query.limit.unwrap_or(state.config.page_size);
    let page = state.backend.changesets(&id, start, limit).await?;

    let grid = ChangesetViewerGrid::new(
        repository,
        state.config.formatter(),
        state.config.icons.clone(),
    );

    let mut out = String::from("<div class=\"changeset-viewer\">");
    out.push_str(grid.to_html(&page.changesets).as_str());
    out.push_str(&format!(
        "<div class=\"changeset-paging\" data-start=\"{}\" data-limit=\"{}\" data-total=\"{}\"></div>",
        start, limit, page.total
    ));
    out.push_str("</div>");

    Ok(Html(out))
}

#[derive(Debug, Deserialize)]
struct BrowseQuery {
    #[serde(default)]
    path: String,
    revision: Option<String>,
    /// A `dir:`/`file:` marker clicked in the listing at `path`.
    action: Option<String>,
}

async fn browse<B: ScmBackend>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
    Query(query): Query<BrowseQuery>,
) -> Result<Html<String>> {
    let action = query.action.as_deref().map(NavAction::parse).transpose()?;
    let repository = state.backend.repository(&id).await?;

    let shell = CollectingShell::new();
    let mut browser =
        RepositoryBrowser::new(repository, query.revision, shell.clone(), &state.config);

    let backend = state.backend.as_ref();
    match &action {
        // A `dir:` action replaces the listing at `path`.
        Some(action @ NavAction { kind: EntryKind::Directory, .. }) => {
            browser.navigate(backend, action).await;
        }
        Some(action) => {
            browser.load(backend, &query.path).await;
            browser.navigate(backend, action).await;
        }
        None => {
            browser.load(backend, &query.path).await;
        }
    }

    let mut out = format!(
        "<section class=\"scm-panel\"><h2>{}</h2>",
        escape_html(&browser.title())
    );
    out.push_str(&render_notifications(&shell.take_notifications()));
    out.push_str(browser.to_html().as_str());
    out.push_str(&render_tabs(&shell.take_tabs()));
    out.push_str("</section>");

    Ok(Html(out))
}

fn render_notifications(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(|n| {
            format!(
                "<div class=\"scm-error\"><strong>{}</strong> {}</div>",
                escape_html(&n.title),
                escape_html(&n.message)
            )
        })
        .collect()
}

fn render_tabs(tabs: &[TabConfig]) -> String {
    tabs.iter()
        .map(|tab| {
            format!(
                "<div class=\"scm-tab\" data-tab-id=\"{}\" data-syntax=\"{}\"><a href=\"{}\">{}</a><span class=\"scm-tab-bar\">{}</span></div>",
                escape_html(&tab.id),
                escape_html(tab.syntax.as_deref().unwrap_or("")),
                escape_html(&tab.content_url),
                escape_html(&tab.title),
                escape_html(&tab.status_bar.join(" : "))
            )
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct ContentQuery {
    path: String,
    revision: Option<String>,
}

async fn content<B: ScmBackend>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
    Query(query): Query<ContentQuery>,
) -> Result<Response> {
    let body = state
        .backend
        .content(&id, &query.path, query.revision.as_deref())
        .await?;
    let syntax = extension(&query.path).unwrap_or("").to_string();

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::HeaderName::from_static(SYNTAX_HEADER), syntax),
        ],
        body,
    )
        .into_response())
}
