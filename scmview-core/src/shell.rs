//! Services the host application offers to embedded widgets.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

/// A viewer tab requested by a widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabConfig {
    pub id: String,
    pub title: String,
    pub content_url: String,
    /// File extension used to pick a syntax highlighter.
    pub syntax: Option<String>,
    pub closable: bool,
    pub status_bar: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

pub trait Shell {
    fn add_tab(&self, tab: TabConfig);

    fn notify_error(&self, title: &str, message: &str);

    /// Shows or hides the loading indicator of the calling widget.
    fn set_loading(&self, loading: bool);
}

impl<S: Shell + ?Sized> Shell for Arc<S> {
    fn add_tab(&self, tab: TabConfig) {
        (**self).add_tab(tab)
    }

    fn notify_error(&self, title: &str, message: &str) {
        (**self).notify_error(title, message)
    }

    fn set_loading(&self, loading: bool) {
        (**self).set_loading(loading)
    }
}

#[derive(Debug, Default)]
struct Recorded {
    tabs: Vec<TabConfig>,
    notifications: Vec<Notification>,
    loading: bool,
}

/// Records every shell effect. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct CollectingShell {
    inner: Arc<Mutex<Recorded>>,
}

impl CollectingShell {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        // a panic while holding the lock leaves plain data behind
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn tabs(&self) -> Vec<TabConfig> {
        self.lock().tabs.clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().notifications.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn take_tabs(&self) -> Vec<TabConfig> {
        std::mem::take(&mut self.lock().tabs)
    }

    pub fn take_notifications(&self) -> Vec<Notification> {
        std::mem::take(&mut self.lock().notifications)
    }
}

impl Shell for CollectingShell {
    fn add_tab(&self, tab: TabConfig) {
        self.lock().tabs.push(tab);
    }

    fn notify_error(&self, title: &str, message: &str) {
        self.lock().notifications.push(Notification {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn set_loading(&self, loading: bool) {
        self.lock().loading = loading;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_shell_shares_record() {
        let shell = CollectingShell::new();
        let handle = shell.clone();

        shell.notify_error("Error", "listing failed");
        shell.set_loading(true);

        assert_eq!(handle.notifications().len(), 1);
        assert!(handle.is_loading());

        let taken = handle.take_notifications();
        assert_eq!(taken[0].message, "listing failed");
        assert!(shell.notifications().is_empty());
    }
}
