use anyhow::Result;
use colored::Colorize;
use scmview_core::WidgetRegistry;

pub fn run() -> Result<()> {
    let registry = WidgetRegistry::with_defaults();

    println!("{}", "Registered widgets".bold().cyan());
    println!();

    for widget in registry.descriptors() {
        println!("{} {}", "widget".yellow().bold(), widget.name.yellow());
        println!("    {}", widget.description);
        println!("    {}: {}", "Columns".bold(), widget.columns.join(", "));
        println!();
    }

    Ok(())
}
