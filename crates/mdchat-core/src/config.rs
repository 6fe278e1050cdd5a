//! Configuration models.
//!
//! `AppConfig` mirrors `config.toml`, `SecretConfig` mirrors `secret.json`.
//! Both tolerate missing fields so an absent or partial file falls back to
//! defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Model used when neither secret.json nor the environment names one.
pub const DEFAULT_OPENAI_MODEL: &str = "o1";

/// Chat Completions endpoint used unless config.toml overrides it.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Directory (relative to the working directory) holding conversation documents.
pub const DEFAULT_CHATS_DIR: &str = "chats";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_chats_dir")]
    pub chats_dir: PathBuf,
    #[serde(default)]
    pub openai: OpenAIEndpointConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chats_dir: default_chats_dir(),
            openai: OpenAIEndpointConfig::default(),
        }
    }
}

fn default_chats_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CHATS_DIR)
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OpenAIEndpointConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Default for OpenAIEndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_tokens: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.to_string()
}

/// API credentials loaded from secret.json.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct SecretConfig {
    #[serde(default)]
    pub openai: Option<OpenAIConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OpenAIConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.chats_dir, PathBuf::from("chats"));
        assert_eq!(config.openai.base_url, DEFAULT_OPENAI_BASE_URL);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: AppConfig = toml::from_str(
            r#"
            chats_dir = "/tmp/logs"

            [openai]
            max_tokens = 2048
            "#,
        )
        .unwrap();

        assert_eq!(config.chats_dir, PathBuf::from("/tmp/logs"));
        assert_eq!(config.openai.max_tokens, Some(2048));
        assert_eq!(config.openai.base_url, DEFAULT_OPENAI_BASE_URL);
    }

    #[test]
    fn test_secret_config_without_model() {
        let secret: SecretConfig =
            serde_json::from_str(r#"{ "openai": { "api_key": "sk-test" } }"#).unwrap();
        let openai = secret.openai.unwrap();
        assert_eq!(openai.api_key, "sk-test");
        assert_eq!(openai.model_name, None);
    }
}
