//! Console summary printed after the update step.

use crossterm::style::Stylize;

use crate::merge::{FetchResults, MergeOutcome};
use crate::providers::PROVIDERS;

/// Print the per-provider summary table followed by the run verdict.
pub fn print_summary(results: &FetchResults, outcome: &MergeOutcome) {
    println!();
    println!("{}", "Update Summary".bold());
    println!("  {:<12} {:<16} {:>12}", "Provider", "Status", "Models Found");

    for provider in &PROVIDERS {
        let models = results
            .get(&provider.key)
            .and_then(|r| r.models.as_ref());
        match models {
            Some(models) => println!(
                "  {:<12} {} {:>12}",
                provider.label,
                format!("{:<16}", "Updated").green(),
                models.len()
            ),
            None => println!(
                "  {:<12} {} {:>12}",
                provider.label,
                format!("{:<16}", "Failed/Skipped").red(),
                0
            ),
        }
    }

    if outcome.removed > 0 {
        println!();
        println!(
            "{}",
            format!(
                "Removed {} models that are no longer available.",
                outcome.removed
            )
            .yellow()
        );
    }

    println!();
    if outcome.updated_providers.is_empty() {
        println!(
            "{}",
            "No providers were updated. Please check your connections.".red()
        );
    } else {
        println!(
            "{}",
            "Success! OpenCode configuration has been updated.".green().bold()
        );
        println!(
            "Restart OpenCode and run {} to see your new models.",
            "/models".bold()
        );
    }
}
