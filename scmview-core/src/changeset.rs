//! Grid widget listing changesets.
//!
//! Renderers are total: any field of a [`Changeset`] may be missing and the
//! corresponding markup is simply left empty.

use crate::config::IconSet;
use crate::format::{escape_html, Formatter, Html};
use crate::grid::{Column, Grid};
use crate::models::{Changeset, Repository};
use serde::Serialize;
use std::sync::Arc;

pub const WIDGET_NAME: &str = "repositoryChangesetViewerGrid";

/// Rendered cells of one changeset row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangesetRow {
    pub id: String,
    pub metadata: String,
    pub tags_and_branches: String,
    pub modifications: String,
    pub identifier: String,
}

#[derive(Debug)]
struct Renderer {
    formatter: Formatter,
    icons: IconSet,
}

impl Renderer {
    fn metadata(&self, changeset: &Changeset) -> Html {
        let description = changeset
            .description
            .as_deref()
            .map(escape_html)
            .unwrap_or_default();

        let mut author = String::new();
        if let Some(person) = &changeset.author {
            author.push_str(&escape_html(&person.name));
            if let Some(mail) = &person.mail {
                let mail = escape_html(mail);
                author.push_str(&format!(
                    " &lt;<a href=\"mailto:{0}\">{0}</a>&gt;",
                    mail
                ));
            }
        }

        let date = escape_html(&self.formatter.timestamp(changeset.date));

        Html::trusted(format!(
            "<div class=\"cs-desc\">{}</div><div class=\"cs-author\">{}</div><div class=\"cs-date\">{}</div>",
            description, author, date
        ))
    }

    fn tags_and_branches(&self, changeset: &Changeset) -> Html {
        Html::trusted(format!(
            "<div class=\"changeset-tags\">{}</div><div class=\"changeset-branches\">{}</div>",
            labeled_list("Tags", &changeset.tags),
            labeled_list("Branches", &changeset.branches)
        ))
    }

    fn modifications(&self, changeset: &Changeset) -> Html {
        let (added, modified, removed) = changeset
            .modifications
            .as_ref()
            .map(|m| (m.added.len(), m.modified.len(), m.removed.len()))
            .unwrap_or_default();

        Html::trusted(format!(
            "<div class=\"cs-mod\">\
             <img src=\"{}\" alt=\"Added\"><span class=\"cs-mod-txt\">{}</span>\
             <img src=\"{}\" alt=\"Modified\"><span class=\"cs-mod-txt\">{}</span>\
             <img src=\"{}\" alt=\"Deleted\"><span class=\"cs-mod-txt\">{}</span>\
             </div>",
            escape_html(&self.icons.added),
            added,
            escape_html(&self.icons.modified),
            modified,
            escape_html(&self.icons.removed),
            removed
        ))
    }

    fn identifier(&self, changeset: &Changeset) -> Html {
        Html::trusted(format!("Commit: {}", escape_html(&changeset.id)))
    }
}

fn labeled_list(label: &str, values: &[String]) -> String {
    if values.is_empty() {
        return String::new();
    }
    let escaped: Vec<String> = values.iter().map(|v| escape_html(v)).collect();
    format!("{}: {}", label, escaped.join(", "))
}

pub struct ChangesetViewerGrid {
    repository: Repository,
    renderer: Arc<Renderer>,
    grid: Grid<Changeset>,
}

impl ChangesetViewerGrid {
    pub fn new(repository: Repository, formatter: Formatter, icons: IconSet) -> Self {
        let renderer = Arc::new(Renderer { formatter, icons });

        let metadata = Arc::clone(&renderer);
        let tags = Arc::clone(&renderer);
        let modifications = Arc::clone(&renderer);
        let identifier = Arc::clone(&renderer);

        let grid = Grid::new(
            "changeset-grid",
            vec![
                Column::new("metadata", "", move |c: &Changeset| metadata.metadata(c)),
                Column::new("tagsAndBranches", "", move |c: &Changeset| {
                    tags.tags_and_branches(c)
                }),
                Column::new("modifications", "", move |c: &Changeset| {
                    modifications.modifications(c)
                })
                .with_width(100),
                Column::new("ids", "", move |c: &Changeset| identifier.identifier(c))
                    .with_width(180),
            ],
        )
        .hide_headers()
        .auto_expand("metadata");

        Self {
            repository,
            renderer,
            grid,
        }
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn column_ids(&self) -> Vec<&'static str> {
        self.grid.column_ids()
    }

    /// Description, author (with mail link when known) and date.
    pub fn render_metadata(&self, changeset: &Changeset) -> Html {
        self.renderer.metadata(changeset)
    }

    pub fn render_tags_and_branches(&self, changeset: &Changeset) -> Html {
        self.renderer.tags_and_branches(changeset)
    }

    /// Added, modified and removed file counts.
    pub fn render_modifications(&self, changeset: &Changeset) -> Html {
        self.renderer.modifications(changeset)
    }

    pub fn render_identifier(&self, changeset: &Changeset) -> Html {
        self.renderer.identifier(changeset)
    }

    pub fn rows(&self, changesets: &[Changeset]) -> Vec<ChangesetRow> {
        changesets
            .iter()
            .map(|c| ChangesetRow {
                id: c.id.clone(),
                metadata: self.render_metadata(c).into_string(),
                tags_and_branches: self.render_tags_and_branches(c).into_string(),
                modifications: self.render_modifications(c).into_string(),
                identifier: self.render_identifier(c).into_string(),
            })
            .collect()
    }

    pub fn to_html(&self, changesets: &[Changeset]) -> Html {
        self.grid.to_html(changesets)
    }
}
