//! First-run interactive setup for the console flow.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use url::Url;

use crate::providers::{Provider, PROVIDERS};
use crate::settings::Settings;

/// Ask the operator where each server runs and persist the resulting
/// endpoint settings. Called when no settings file exists yet.
pub fn run_first_time_setup(settings: &mut Settings) -> Result<()> {
    println!("{}", "Configuration not found. Let's set it up.".yellow());

    for provider in &PROVIDERS {
        let url = prompt_endpoint(provider)?;
        settings.set_url(provider.key, url);
    }

    settings.save()?;
    println!("{}", "Configuration saved!".green());
    println!();
    Ok(())
}

/// Local means the provider's default localhost endpoint; network asks for
/// an address and keeps the provider's default port. Anything other than
/// "network" is treated as local.
fn prompt_endpoint(provider: &Provider) -> Result<String> {
    let choice = prompt(&format!(
        "For {}: run on this PC (local) or over the network? [local/network]: ",
        provider.label.bold()
    ))?;

    if choice.trim().to_lowercase() != "network" {
        return Ok(provider.default_url());
    }

    loop {
        let host = prompt(&format!("Enter {} address: ", provider.label))?;
        let url = provider.url_for_host(host.trim());
        if Url::parse(&url).is_ok() {
            return Ok(url);
        }
        println!(
            "{}",
            format!("'{}' does not form a valid URL, try again.", host.trim()).red()
        );
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input)
}
