use anyhow::Result;
use colored::Colorize;
use scmview_core::{Breadcrumb, BrowserState, ConsoleConfig, EntryKind, RepositoryBrowser, Shell};

use crate::shell::TerminalShell;

pub async fn run(
    config: ConsoleConfig,
    repository: String,
    path: String,
    revision: Option<String>,
    html: bool,
) -> Result<()> {
    let (client, repository) = super::connect(&config, &repository).await?;
    let mut browser = RepositoryBrowser::new(repository, revision, TerminalShell::new(), &config);

    browser.load(&client, &path).await;

    if let BrowserState::Error { message } = browser.state() {
        anyhow::bail!("{}", message);
    }

    if html {
        println!("{}", browser.to_html());
    } else {
        print_listing(&browser);
    }

    Ok(())
}

pub fn print_listing<S: Shell>(browser: &RepositoryBrowser<S>) {
    println!("{}", browser.title().bold().cyan());
    println!("{}", format_breadcrumb(browser.breadcrumb()));
    println!();

    let rows = browser.rows();
    if rows.is_empty() {
        println!("{}", "Empty directory".yellow());
        return;
    }

    for row in rows {
        let name = match row.action.kind {
            EntryKind::Directory => format!("{}/", row.name).blue().bold(),
            EntryKind::File => row.name.normal(),
        };
        println!(
            "  {:>10}  {:19}  {}  {}",
            row.size,
            format!("{:19}", row.last_modified).dimmed(),
            name,
            row.description.dimmed()
        );
    }
}

pub fn format_breadcrumb(breadcrumb: &Breadcrumb) -> String {
    let trail: String = breadcrumb
        .segments
        .iter()
        .map(|c| format!("{}/", c.label))
        .collect();

    let mut out = format!("{}  @ {}", trail.bold(), breadcrumb.repository_name);
    if let Some(revision) = &breadcrumb.revision {
        out.push_str(&format!(" : {}", revision));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_breadcrumb() {
        colored::control::set_override(false);

        let breadcrumb = Breadcrumb::for_path("src/main", "heart-of-gold", Some("tip"));

        assert_eq!(
            format_breadcrumb(&breadcrumb),
            "/src/main/  @ heart-of-gold : tip"
        );
    }
}
