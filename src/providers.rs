//! The fixed directory of supported local model servers.
//!
//! OpenCode talks to all three through the same OpenAI-compatible
//! `@ai-sdk/openai-compatible` package, so the only per-provider facts we
//! need are the config key, the labels, and the default endpoint.

/// npm package OpenCode uses to talk to all of these servers.
pub const NPM_PACKAGE: &str = "@ai-sdk/openai-compatible";

/// Stable identifier for a supported server type. Doubles as the key under
/// `provider` in the OpenCode config (see [`ProviderKey::config_key`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProviderKey {
    Ollama,
    LmStudio,
    LlamaCpp,
}

impl ProviderKey {
    /// Key of this provider's entry in the OpenCode `provider` map.
    pub fn config_key(self) -> &'static str {
        match self {
            ProviderKey::Ollama => "ollama",
            ProviderKey::LmStudio => "lmstudio",
            ProviderKey::LlamaCpp => "llamacpp",
        }
    }
}

/// Static descriptor for one supported server type.
#[derive(Debug)]
pub struct Provider {
    pub key: ProviderKey,
    /// Short label for prompts and the summary table.
    pub label: &'static str,
    /// Name written into newly created OpenCode provider entries.
    pub display_name: &'static str,
    /// Port the server listens on by default.
    pub default_port: u16,
}

/// All supported providers, in the order they are checked and reported.
pub static PROVIDERS: [Provider; 3] = [
    Provider {
        key: ProviderKey::Ollama,
        label: "Ollama",
        display_name: "Ollama (remote)",
        default_port: 11434,
    },
    Provider {
        key: ProviderKey::LmStudio,
        label: "LM Studio",
        display_name: "LM Studio (remote)",
        default_port: 1234,
    },
    Provider {
        key: ProviderKey::LlamaCpp,
        label: "Llama.cpp",
        display_name: "Llama.cpp (remote)",
        default_port: 8080,
    },
];

impl Provider {
    /// Model-listing endpoint for a server running on this machine.
    pub fn default_url(&self) -> String {
        self.url_for_host("localhost")
    }

    /// Model-listing endpoint for a server reachable at `host`.
    pub fn url_for_host(&self, host: &str) -> String {
        format!("http://{}:{}/v1/models", host, self.default_port)
    }

    /// First word of the display name, e.g. "Ollama" from "Ollama (remote)".
    /// This is what gets reported in the updated-providers list.
    pub fn short_name(&self) -> &'static str {
        self.display_name
            .split_whitespace()
            .next()
            .unwrap_or(self.display_name)
    }
}

/// Look up the descriptor for a provider key.
pub fn provider_for(key: ProviderKey) -> &'static Provider {
    PROVIDERS
        .iter()
        .find(|p| p.key == key)
        .unwrap_or(&PROVIDERS[0])
}

/// Derive the API base URL from a model-listing endpoint by dropping the
/// trailing `/models` path segment. Unrecognized endpoints pass through
/// unchanged.
pub fn base_url(endpoint: &str) -> String {
    endpoint
        .strip_suffix("/models")
        .unwrap_or(endpoint)
        .to_string()
}
