//! # scmview-server
//!
//! Web console host for the scmview widgets. Renders the changeset grid and
//! the repository browser as HTML fragments on top of an [`ScmBackend`].
//!
//! [`ScmBackend`]: scmview_core::ScmBackend

pub mod api;
pub mod error;
pub mod server;

pub use error::AppError;
pub use server::ConsoleServer;
