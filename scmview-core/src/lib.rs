//! # scmview-core
//!
//! Core library for scmview - the changeset grid and repository browser
//! widgets of the SCM web console.
//!
//! Widgets turn backend records into escaped HTML fragments and typed row
//! view-models. They never talk to the network or the page directly: data
//! comes in through [`ScmBackend`] and effects go out through [`Shell`].

pub mod backend;
pub mod browser;
pub mod changeset;
pub mod config;
pub mod error;
pub mod format;
pub mod grid;
pub mod models;
pub mod registry;
pub mod shell;

pub use backend::{MemoryBackend, ScmBackend};
pub use browser::{
    Breadcrumb, BrowserRow, BrowserState, EntryKind, LoadOutcome, LoadRequest, NavAction,
    RepositoryBrowser,
};
pub use changeset::{ChangesetRow, ChangesetViewerGrid};
pub use config::{ConsoleConfig, IconSet};
pub use error::{Error, Result};
pub use format::{Formatter, Html};
pub use models::{
    BrowserResult, Changeset, ChangesetPage, FileEntry, Modifications, Person, Repository,
};
pub use registry::{WidgetDescriptor, WidgetKind, WidgetRegistry};
pub use shell::{CollectingShell, Notification, Shell, TabConfig};
