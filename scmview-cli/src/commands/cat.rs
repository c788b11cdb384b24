use anyhow::Result;
use scmview_core::{ConsoleConfig, RepositoryBrowser};

use crate::shell::{print_tabs, TerminalShell};

pub async fn run(
    config: ConsoleConfig,
    repository: String,
    path: String,
    revision: Option<String>,
) -> Result<()> {
    let (client, repository) = super::connect(&config, &repository).await?;
    let browser = RepositoryBrowser::new(repository, revision, TerminalShell::new(), &config);

    browser.open_file(&path);
    print_tabs(browser.shell(), &client).await;

    Ok(())
}
