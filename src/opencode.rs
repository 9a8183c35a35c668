//! Reads, merges, and rewrites the OpenCode configuration file.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::merge::{merge, FetchResults, MergeOutcome};

/// OpenCode keeps its config under ~/.config/opencode on every platform.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("opencode").join("opencode.json"))
}

/// Merge fetch results into the config file at `path`.
///
/// An error anywhere in the read/parse/write sequence means no providers
/// were updated: on read or parse failure nothing is touched, and on write
/// failure the computed merge is discarded. A timestamped backup of the
/// pre-merge file is attempted before the rewrite; backup failure never
/// blocks the update.
pub fn sync(path: &Path, results: &FetchResults) -> Result<MergeOutcome> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read OpenCode config at {}", path.display()))?;

    let mut document: Map<String, Value> = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse OpenCode config at {}", path.display()))?;

    let outcome = merge(&mut document, results);

    // Verbatim copy of the pre-merge file. Collisions within the same second
    // overwrite each other; last writer wins on the backup only.
    let _ = fs::copy(path, backup_path(path));

    let serialized =
        serde_json::to_string_pretty(&document).context("failed to serialize OpenCode config")?;
    fs::write(path, serialized)
        .with_context(|| format!("failed to write OpenCode config at {}", path.display()))?;

    Ok(outcome)
}

fn backup_path(path: &Path) -> PathBuf {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".backup.{}", seconds));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::ProviderResult;
    use crate::providers::ProviderKey;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn ollama_result(models: &[&str]) -> FetchResults {
        let mut results = BTreeMap::new();
        results.insert(
            ProviderKey::Ollama,
            ProviderResult {
                base_url: "http://localhost:11434/v1".to_string(),
                models: Some(models.iter().map(|m| m.to_string()).collect()),
            },
        );
        results
    }

    fn backup_files(dir: &Path, stem: &str) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&format!("{}.backup.", stem)))
            })
            .collect()
    }

    #[test]
    fn missing_config_reports_error_without_writing_anything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opencode.json");

        let result = sync(&path, &ollama_result(&["new-model"]));

        assert!(result.is_err());
        assert!(!path.exists());
        assert!(backup_files(dir.path(), "opencode.json").is_empty());
    }

    #[test]
    fn malformed_config_is_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opencode.json");
        fs::write(&path, "not json {").unwrap();

        let result = sync(&path, &ollama_result(&["new-model"]));

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json {");
        assert!(backup_files(dir.path(), "opencode.json").is_empty());
    }

    #[test]
    fn non_object_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opencode.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(sync(&path, &ollama_result(&["m"])).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2, 3]");
    }

    #[test]
    fn sync_replaces_models_and_leaves_a_backup_of_the_old_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opencode.json");
        let before = serde_json::to_string_pretty(&json!({
            "theme": "dark",
            "provider": {
                "ollama": {
                    "npm": "@ai-sdk/openai-compatible",
                    "name": "Ollama (remote)",
                    "options": { "baseURL": "http://localhost:11434/v1" },
                    "models": { "old-model": { "name": "Old Model" } }
                }
            }
        }))
        .unwrap();
        fs::write(&path, &before).unwrap();

        let outcome = sync(&path, &ollama_result(&["new-model-a", "new-model-b"])).unwrap();

        assert_eq!(outcome.removed, 1);
        assert_eq!(outcome.updated_providers, vec!["Ollama"]);

        let after: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(after["theme"], json!("dark"));
        assert_eq!(
            after["provider"]["ollama"]["models"],
            json!({
                "new-model-a": { "name": "New Model A" },
                "new-model-b": { "name": "New Model B" }
            })
        );

        let backups = backup_files(dir.path(), "opencode.json");
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(&backups[0]).unwrap(), before);
    }

    #[test]
    fn rewrite_uses_two_space_indentation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opencode.json");
        fs::write(&path, "{}").unwrap();

        sync(&path, &ollama_result(&["m"])).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("{\n  \"provider\""));
    }
}
