//! Named widget types a host can embed.

use crate::error::{Error, Result};
use crate::{browser, changeset};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WidgetKind {
    ChangesetViewerGrid,
    RepositoryBrowser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetDescriptor {
    pub name: &'static str,
    pub kind: WidgetKind,
    pub description: &'static str,
    pub columns: Vec<&'static str>,
}

#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    widgets: BTreeMap<&'static str, WidgetDescriptor>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(WidgetDescriptor {
            name: changeset::WIDGET_NAME,
            kind: WidgetKind::ChangesetViewerGrid,
            description: "Changeset list with metadata, tags, branches and modification counts",
            columns: vec!["metadata", "tagsAndBranches", "modifications", "ids"],
        });
        registry.register(WidgetDescriptor {
            name: browser::WIDGET_NAME,
            kind: WidgetKind::RepositoryBrowser,
            description: "Directory listing with navigation and file viewer tabs",
            columns: vec!["icon", "name", "length", "lastModified", "description"],
        });
        registry
    }

    /// Registers `descriptor`, replacing any widget of the same name.
    pub fn register(&mut self, descriptor: WidgetDescriptor) {
        self.widgets.insert(descriptor.name, descriptor);
    }

    pub fn get(&self, name: &str) -> Option<&WidgetDescriptor> {
        self.widgets.get(name)
    }

    pub fn resolve(&self, name: &str) -> Result<&WidgetDescriptor> {
        self.get(name)
            .ok_or_else(|| Error::UnknownWidget(name.to_string()))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.widgets.keys().copied().collect()
    }

    pub fn descriptors(&self) -> Vec<&WidgetDescriptor> {
        self.widgets.values().collect()
    }
}
