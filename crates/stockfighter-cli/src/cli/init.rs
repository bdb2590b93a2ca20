/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When CliConfig schema changes
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, theme::ColorfulTheme};
use std::path::{Path, PathBuf};

use crate::config::CliConfig;

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Welcome to Stockfighter CLI Init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a client configuration.").dim()
    );

    let theme = ColorfulTheme::default();

    let api_key: String = Input::with_theme(&theme)
        .with_prompt("API Key")
        .interact_text()?;

    println!("\n{}", style("--- Trading ---").bold());
    let account: String = Input::with_theme(&theme)
        .with_prompt("Trading Account (empty to set later)")
        .allow_empty(true)
        .interact_text()?;

    let venue: String = Input::with_theme(&theme)
        .with_prompt("Default Venue")
        .default("TESTEX".to_string())
        .interact_text()?;

    let stock: String = Input::with_theme(&theme)
        .with_prompt("Default Stock")
        .default("FOOBAR".to_string())
        .interact_text()?;

    let config = CliConfig {
        api_key,
        account: non_empty(account),
        venue: non_empty(venue),
        stock: non_empty(stock),
        ..CliConfig::default()
    };

    write_config(&config, &output)?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!("Configuration written to: {}", style(output.display()).cyan());

    Ok(())
}

pub fn write_config(config: &CliConfig, output: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(config).context("failed to serialize config to YAML")?;
    std::fs::write(output, yaml)
        .with_context(|| format!("failed to write config to {}", output.display()))
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
