use anyhow::Result;
use colored::Colorize;
use scmview_core::ConsoleConfig;
use scmview_server::ConsoleServer;

pub async fn run(config: ConsoleConfig, listen: Option<String>) -> Result<()> {
    let listen = listen.unwrap_or_else(|| config.listen.clone());

    println!("{}", "Starting scmview console...".bold().cyan());
    println!("   {}: {}", "Backend".bold(), config.backend_url);
    println!("   {}: {}s", "Timeout".bold(), config.timeout_secs);
    println!(
        "   {}: {}",
        "Console".bold(),
        format!("http://{}", listen).green()
    );
    println!();
    println!("{}", "Press Ctrl+C to stop".dimmed());
    println!();

    let server = ConsoleServer::from_config(config)?;
    let addr = listen.parse()?;
    server.serve(addr).await?;

    Ok(())
}
