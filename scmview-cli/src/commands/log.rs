use anyhow::Result;
use colored::Colorize;
use scmview_core::{ChangesetViewerGrid, ConsoleConfig, ScmBackend};

pub async fn run(
    config: ConsoleConfig,
    repository: String,
    start: usize,
    limit: Option<usize>,
    html: bool,
) -> Result<()> {
    let (client, repository) = super::connect(&config, &repository).await?;
    let limit = limit.unwrap_or(config.page_size);
    let page = client.changesets(&repository.id, start, limit).await?;

    if html {
        let grid = ChangesetViewerGrid::new(repository, config.formatter(), config.icons.clone());
        println!("{}", grid.to_html(&page.changesets));
        return Ok(());
    }

    if page.changesets.is_empty() {
        println!("{}", "No changesets".yellow());
        return Ok(());
    }

    println!("{}", format!("Changesets of {}", repository.name).bold().cyan());
    println!();

    let formatter = config.formatter();
    for changeset in &page.changesets {
        println!(
            "{} {}",
            "changeset".yellow().bold(),
            changeset.id.yellow()
        );

        if let Some(author) = &changeset.author {
            match &author.mail {
                Some(mail) => println!("{}: {} <{}>", "Author".bold(), author.name, mail),
                None => println!("{}: {}", "Author".bold(), author.name),
            }
        }
        if changeset.date.is_some() {
            println!("{}: {}", "Date".bold(), formatter.timestamp(changeset.date));
        }
        if !changeset.tags.is_empty() {
            println!("{}: {}", "Tags".bold(), changeset.tags.join(", "));
        }
        if !changeset.branches.is_empty() {
            println!("{}: {}", "Branches".bold(), changeset.branches.join(", "));
        }

        println!();
        if let Some(description) = &changeset.description {
            println!("    {}", description);
            println!();
        }

        let (added, modified, removed) = changeset
            .modifications
            .as_ref()
            .map(|m| (m.added.len(), m.modified.len(), m.removed.len()))
            .unwrap_or_default();
        println!(
            "    {} {} {}",
            format!("+{}", added).green(),
            format!("~{}", modified).yellow(),
            format!("-{}", removed).red()
        );
        println!();
    }

    let shown = start + page.changesets.len();
    if page.total > shown {
        println!(
            "{}",
            format!("... and {} more changesets", page.total - shown).dimmed()
        );
        println!("Use {} to see more", format!("--start {}", shown).cyan());
    }

    Ok(())
}
