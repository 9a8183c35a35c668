mod fetch;
mod merge;
mod opencode;
mod providers;
mod report;
mod settings;
mod setup;

use anyhow::Result;
use crossterm::style::Stylize;
use futures::future::join_all;

use crate::merge::{FetchResults, MergeOutcome, ProviderResult};
use crate::providers::{base_url, Provider, PROVIDERS};
use crate::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "OpenCode Model Updater".blue().bold());
    println!();

    // Load or create endpoint settings; prompt on first run
    let mut settings = Settings::load()?;
    if !Settings::is_saved() {
        setup::run_first_time_setup(&mut settings)?;
    }

    let client = fetch::http_client()?;

    println!("Checking local model servers...");

    // One fetch per provider, all independent; each task owns its own slot
    // in the results map so they can run concurrently without coordination.
    let fetches = PROVIDERS.iter().map(|provider| {
        let client = client.clone();
        let url = settings.url_for(provider.key).to_string();
        async move { (provider.key, check_provider(provider, &client, &url).await) }
    });
    let results: FetchResults = join_all(fetches).await.into_iter().collect();

    println!();
    println!("{}", "Updating OpenCode configuration...".bold());

    let outcome = update_config(&results);

    report::print_summary(&results, &outcome);
    Ok(())
}

/// Fetch one provider's model list, reporting the outcome as it lands.
/// Every failure mode collapses to "unavailable" for the merge; the error
/// itself is only surfaced here, for the operator.
async fn check_provider(
    provider: &Provider,
    client: &reqwest::Client,
    url: &str,
) -> ProviderResult {
    let models = match fetch::list_models(client, url).await {
        Ok(models) => {
            println!(
                "  {} {}",
                format!("{}:", provider.label),
                format!("found {} models", models.len()).green()
            );
            Some(models)
        }
        Err(err) => {
            println!(
                "  {} {}",
                format!("{}:", provider.label),
                format!("unavailable ({:#})", err).red()
            );
            None
        }
    };

    ProviderResult {
        base_url: base_url(url),
        models,
    }
}

/// Run the merge against the on-disk OpenCode config. Any failure in the
/// read/merge/write step means zero providers updated and zero removals.
fn update_config(results: &FetchResults) -> MergeOutcome {
    let Some(path) = opencode::config_file_path() else {
        eprintln!("{}", "Could not determine the OpenCode config location.".red());
        return MergeOutcome::default();
    };

    if !path.exists() {
        eprintln!(
            "{}",
            format!("OpenCode config file not found at {}", path.display()).red()
        );
        return MergeOutcome::default();
    }

    match opencode::sync(&path, results) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("{}", format!("Error updating OpenCode config: {:#}", err).red());
            MergeOutcome::default()
        }
    }
}
