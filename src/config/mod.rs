//! Configuration management.
//!
//! Settings come from a TOML file (`research-scout.toml` in the working
//! directory, or `research-scout/config.toml` under the user config dir)
//! layered with `RESEARCH_SCOUT_`-prefixed environment variables. Every
//! section has working defaults so the binary runs without any file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Paper store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// LLM settings for the chat client
    #[serde(default)]
    pub llm: LlmConfig,

    /// Chat loop settings
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Paper store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Root directory holding one subdirectory per topic
    #[serde(default = "default_store_dir")]
    pub directory: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            directory: default_store_dir(),
        }
    }
}

fn default_store_dir() -> PathBuf {
    PathBuf::from("./research_papers")
}

/// LLM configuration for the chat client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider name (anthropic, openai, ollama, gemini, groq, cohere)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model name as the provider knows it
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_llm_timeout(),
        }
    }
}

fn default_provider() -> String {
    "anthropic".to_string()
}

fn default_model() -> String {
    "claude-3-7-sonnet-latest".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_llm_timeout() -> u64 {
    120
}

/// Chat loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Maximum LLM/tool round trips per user query
    #[serde(default = "default_max_tool_turns")]
    pub max_tool_turns: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_tool_turns: default_max_tool_turns(),
        }
    }
}

fn default_max_tool_turns() -> usize {
    8
}

/// Load configuration from a file, layered with environment variables
pub fn load_config(path: &PathBuf) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .add_source(config::Environment::with_prefix("RESEARCH_SCOUT"))
        .build()?;

    settings.try_deserialize()
}

/// Find a config file in the default locations
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("research-scout.toml");
    if local.is_file() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("research-scout").join("config.toml");
    user.is_file().then_some(user)
}

/// Get the default configuration
pub fn get_config() -> Config {
    Config::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.directory, PathBuf::from("./research_papers"));
        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.llm.temperature, 0.3);
        assert_eq!(config.chat.max_tool_turns, 8);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("research-scout.toml");
        std::fs::write(
            &path,
            r#"
[store]
directory = "/tmp/papers"

[llm]
provider = "ollama"
model = "llama3.2"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.store.directory, PathBuf::from("/tmp/papers"));
        assert_eq!(config.llm.provider, "ollama");
        // Unset fields keep their defaults
        assert_eq!(config.llm.timeout_seconds, 120);
    }
}
