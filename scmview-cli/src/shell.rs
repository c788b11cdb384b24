//! Terminal implementation of the widget shell.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use scmview_core::{Shell, TabConfig};
use std::sync::Mutex;
use std::time::Duration;

/// Prints errors, spins while listings load and queues requested tabs so the
/// command can fetch and print them.
#[derive(Default)]
pub struct TerminalShell {
    spinner: Mutex<Option<ProgressBar>>,
    tabs: Mutex<Vec<TabConfig>>,
}

impl TerminalShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_tabs(&self) -> Vec<TabConfig> {
        let mut tabs = self.tabs.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *tabs)
    }
}

impl Shell for TerminalShell {
    fn add_tab(&self, tab: TabConfig) {
        self.tabs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(tab);
    }

    fn notify_error(&self, title: &str, message: &str) {
        eprintln!("{} {}", format!("{}:", title).red().bold(), message);
    }

    fn set_loading(&self, loading: bool) {
        let mut spinner = self.spinner.lock().unwrap_or_else(|e| e.into_inner());

        if loading {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
                bar.set_style(style);
            }
            bar.set_message("Loading...");
            bar.enable_steady_tick(Duration::from_millis(100));
            if let Some(previous) = spinner.replace(bar) {
                previous.finish_and_clear();
            }
        } else if let Some(bar) = spinner.take() {
            bar.finish_and_clear();
        }
    }
}

/// Fetches and prints every tab `shell` has queued.
pub async fn print_tabs(shell: &TerminalShell, client: &scmview_sdk::ScmClient) {
    for tab in shell.take_tabs() {
        shell.set_loading(true);
        let content = client.fetch(&tab.content_url).await;
        shell.set_loading(false);

        match content {
            Ok(bytes) => {
                println!(
                    "{} {}",
                    tab.title.bold().cyan(),
                    format!("[{}]", tab.syntax.as_deref().unwrap_or("plain")).dimmed()
                );
                println!("{}", tab.status_bar.join(" : ").dimmed());
                println!();
                println!("{}", String::from_utf8_lossy(&bytes));
            }
            Err(e) => shell.notify_error("Error", &format!("Could not open {}: {}", tab.title, e)),
        }
    }
}
