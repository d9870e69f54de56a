//! Config commands: path, init, show.

use anyhow::{Context, Result};
use bookverse_core::config::{Config, default_config_template, paths};

use crate::cli::ConfigCommands;

pub fn dispatch(command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => path(),
        ConfigCommands::Init => init(),
        ConfigCommands::Show => show(),
    }
}

fn path() -> Result<()> {
    println!("{}", paths::config_path().display());
    Ok(())
}

fn init() -> Result<()> {
    let config_path = paths::config_path();
    if config_path.exists() {
        anyhow::bail!("Config already exists at {}", config_path.display());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(&config_path, default_config_template())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created config at {}", config_path.display());
    Ok(())
}

fn show() -> Result<()> {
    let config = Config::load()?;
    println!("config:   {}", paths::config_path().display());
    println!("base_url: {}", config.effective_base_url());
    Ok(())
}
