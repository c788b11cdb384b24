use anyhow::Result;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use scmview_core::{ConsoleConfig, EntryKind, NavAction, RepositoryBrowser, Shell};

use super::ls::{format_breadcrumb, print_listing};
use crate::shell::{print_tabs, TerminalShell};

pub async fn run(
    config: ConsoleConfig,
    repository: String,
    path: String,
    revision: Option<String>,
) -> Result<()> {
    let (client, repository) = super::connect(&config, &repository).await?;
    let mut browser = RepositoryBrowser::new(repository, revision, TerminalShell::new(), &config);

    browser.load(&client, &path).await;
    let theme = ColorfulTheme::default();

    loop {
        println!();
        print_listing(&browser);
        println!();

        let choices = choices(&browser);
        let labels: Vec<&str> = choices.iter().map(|(label, _)| label.as_str()).collect();

        let selection = Select::with_theme(&theme)
            .with_prompt(format_breadcrumb(browser.breadcrumb()))
            .items(&labels)
            .default(0)
            .interact_opt()?;

        let Some(index) = selection else {
            break;
        };
        let Some(action) = choices[index].1.clone() else {
            break;
        };

        // A failed listing is reported by the shell; the last listing stays.
        browser.navigate(&client, &action).await;
        print_tabs(browser.shell(), &client).await;
    }

    println!("{}", "Bye".dimmed());
    Ok(())
}

/// Row entries, then breadcrumb jumps, then quit.
fn choices<S: Shell>(browser: &RepositoryBrowser<S>) -> Vec<(String, Option<NavAction>)> {
    let mut choices: Vec<(String, Option<NavAction>)> = browser
        .rows()
        .into_iter()
        .map(|row| {
            let label = match row.action.kind {
                EntryKind::Directory => format!("{}/", row.name),
                EntryKind::File => row.name.clone(),
            };
            (label, Some(row.action))
        })
        .collect();

    let crumbs = &browser.breadcrumb().segments;
    for crumb in crumbs.iter().take(crumbs.len().saturating_sub(1)) {
        choices.push((format!("<- /{}", crumb.path), Some(crumb.action())));
    }

    choices.push(("Quit".to_string(), None));
    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use scmview_core::{BrowserResult, CollectingShell, FileEntry, Repository};

    #[test]
    fn test_choices() {
        let mut browser = RepositoryBrowser::new(
            Repository::new("42", "repo"),
            None,
            CollectingShell::new(),
            &ConsoleConfig::default(),
        );
        let request = browser.begin_load("a/b");
        browser.complete_load(
            request,
            Ok(BrowserResult::new(vec![FileEntry::file("a/b/x.txt", 3)])),
        );

        let choices = choices(&browser);
        let labels: Vec<&str> = choices.iter().map(|(l, _)| l.as_str()).collect();

        assert_eq!(labels, vec!["../", "x.txt", "<- /", "<- /a", "Quit"]);
        assert_eq!(choices[0].1, Some(NavAction::directory("a")));
        assert_eq!(choices[1].1, Some(NavAction::file("a/b/x.txt")));
        assert!(choices[4].1.is_none());
    }
}
