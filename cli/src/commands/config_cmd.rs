use anyhow::Result;
use colored::Colorize;

use crate::config::Config;

pub fn show_config() -> Result<()> {
    let config = Config::load()?;
    let text = toml::to_string_pretty(&config)?;
    println!("Current Configuration");
    println!("────────────────────────────────");
    println!();
    println!("{text}");
    Ok(())
}

pub fn init_config(force: bool) -> Result<()> {
    let config_file = Config::config_file()?;

    if config_file.exists() && !force {
        println!("Configuration file already exists at: {}", config_file.display());
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config::default();
    config.save()?;

    println!("{} Configuration initialized at: {}", "✓".green(), config_file.display());
    Ok(())
}
