//! Reconciles fetched model lists into the OpenCode configuration document.
//!
//! The document is externally owned, so it is handled as raw JSON: only the
//! `provider.{ollama,lmstudio,llamacpp}` subtrees are ever read or written,
//! and everything else passes through the merge untouched. A fetched list is
//! the full authoritative model set for its provider; anything stored that
//! is no longer served gets pruned.

use std::collections::{BTreeMap, HashSet};

use serde_json::{json, Map, Value};

use crate::providers::{ProviderKey, NPM_PACKAGE, PROVIDERS};

/// Outcome of one fetch attempt, keyed by provider in [`FetchResults`].
#[derive(Debug, Clone)]
pub struct ProviderResult {
    /// API base URL the server was reached at (endpoint minus `/models`).
    pub base_url: String,
    /// Model identifiers as reported by the server, or `None` if it was
    /// unavailable for any reason.
    pub models: Option<Vec<String>>,
}

pub type FetchResults = BTreeMap<ProviderKey, ProviderResult>;

/// What a merge did: how many stored models were pruned, and which providers
/// had their entries rewritten.
#[derive(Debug, Default, PartialEq)]
pub struct MergeOutcome {
    pub removed: usize,
    pub updated_providers: Vec<String>,
}

/// Merge fetched model lists into `document`, in place.
///
/// For each known provider with an available result: create its entry if
/// missing, prune stored models absent from the fetched list, then upsert
/// every fetched model with a derived display name. Providers that were
/// unavailable (or not fetched at all) are left exactly as they were; so is
/// anything in the document outside the recognized provider entries.
pub fn merge(document: &mut Map<String, Value>, results: &FetchResults) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    let provider_tree = document
        .entry("provider")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(provider_tree) = provider_tree.as_object_mut() else {
        // `provider` holds something that isn't an object; nothing we can
        // safely merge into, so leave the document alone.
        return outcome;
    };

    for provider in &PROVIDERS {
        let Some(result) = results.get(&provider.key) else {
            continue;
        };
        let Some(models) = &result.models else {
            continue;
        };

        outcome
            .updated_providers
            .push(provider.short_name().to_string());

        let entry = provider_tree
            .entry(provider.key.config_key())
            .or_insert_with(|| {
                json!({
                    "npm": NPM_PACKAGE,
                    "name": provider.display_name,
                    "options": { "baseURL": result.base_url },
                    "models": {}
                })
            });
        let Some(entry) = entry.as_object_mut() else {
            continue;
        };

        let models_value = entry
            .entry("models")
            .or_insert_with(|| Value::Object(Map::new()));
        if !models_value.is_object() {
            *models_value = Value::Object(Map::new());
        }
        let Some(model_map) = models_value.as_object_mut() else {
            continue;
        };

        // Removal pass: the fetched list is authoritative, prune the rest.
        let fetched: HashSet<&str> = models.iter().map(String::as_str).collect();
        let before = model_map.len();
        model_map.retain(|id, _| fetched.contains(id.as_str()));
        outcome.removed += before - model_map.len();

        // Upsert pass: entries always end up as exactly { "name": ... }.
        for id in models {
            model_map.insert(id.clone(), json!({ "name": friendly_name(id, provider.key) }));
        }
    }

    outcome
}

/// Derive a human-readable display name from a model identifier.
///
/// Ollama cloud-hosted models (identifier containing `:cloud`) show as the
/// base name plus " Cloud"; everything else has dashes and slashes turned
/// into spaces with each word capitalized. Total over any input.
pub fn friendly_name(id: &str, key: ProviderKey) -> String {
    if key == ProviderKey::Ollama && id.contains(":cloud") {
        let base = id.split(':').next().unwrap_or(id);
        let mut name = title_case(&base.replace('-', " "));
        name.push_str(" Cloud");
        return name;
    }
    title_case(&id.replace(['-', '/'], " "))
}

/// Capitalize the first character of each space-separated word, leaving the
/// rest of the word as-is ("8b" stays "8b").
fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
