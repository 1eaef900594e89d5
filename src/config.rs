use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::util::{secret_from_env, SecretString};

/// Per-repo config file name, looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "people-protocol.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    #[serde(default)]
    pub lightcast: LightcastConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>, // OpenAI-compatible endpoints and tests

    /// Response budget. Defaults to 1500, enough for 21 statements.
    #[serde(default)]
    pub max_tokens: Option<u32>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl LlmConfig {
    pub fn get_max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(1500)
    }

    /// Switch provider. A key variable that was just the old provider's
    /// conventional one moves along with it; an explicitly chosen one is kept.
    pub fn set_provider(&mut self, provider: &str) {
        let conventional = self.api_key_env.as_deref() == provider_key_env(&self.provider);
        self.provider = provider.to_string();
        if conventional {
            self.api_key_env = provider_key_env(provider).map(str::to_string);
        }
    }
}

/// Conventional API key variable for `provider`. `None` for endpoints that may run keyless.
pub fn provider_key_env(provider: &str) -> Option<&'static str> {
    match provider {
        "anthropic" => Some("ANTHROPIC_API_KEY"),
        "openai" => Some("OPENAI_API_KEY"),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightcastConfig {
    #[serde(default = "default_client_id_env")]
    pub client_id_env: String,
    #[serde(default = "default_client_secret_env")]
    pub client_secret_env: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    /// Base of the skills API; `/skills` is appended for listings.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
    #[serde(default = "default_browse_limit")]
    pub browse_limit: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LightcastConfig {
    fn default() -> Self {
        Self {
            client_id_env: default_client_id_env(),
            client_secret_env: default_client_secret_env(),
            auth_url: default_auth_url(),
            api_url: default_api_url(),
            scope: default_scope(),
            search_limit: default_search_limit(),
            browse_limit: default_browse_limit(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LightcastConfig {
    pub fn client_id(&self) -> Result<SecretString> {
        secret_from_env(&self.client_id_env).with_context(|| {
            format!(
                "Lightcast client id not found in environment variable: {}",
                self.client_id_env
            )
        })
    }

    pub fn client_secret(&self) -> Result<SecretString> {
        secret_from_env(&self.client_secret_env).with_context(|| {
            format!(
                "Lightcast client secret not found in environment variable: {}",
                self.client_secret_env
            )
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Give a skill one more round trip when its levels come back short.
    #[serde(default)]
    pub retry_invalid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_client_id_env() -> String {
    "LIGHTCAST_CLIENT_ID".to_string()
}

fn default_client_secret_env() -> String {
    "LIGHTCAST_CLIENT_SECRET".to_string()
}

fn default_auth_url() -> String {
    "https://auth.emsicloud.com/connect/token".to_string()
}

fn default_api_url() -> String {
    "https://emsiservices.com/skills/versions/latest".to_string()
}

fn default_scope() -> String {
    "emsi_open".to_string()
}

fn default_search_limit() -> usize {
    20
}

fn default_browse_limit() -> usize {
    30
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_output_path() -> PathBuf {
    PathBuf::from("people_protocol_skills.json")
}

impl Config {
    /// Load configuration from a specific path, or use default search paths
    pub fn load_with_path(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            debug!("Loading config from explicit path: {}", config_path.display());
            return Self::load_from_path(config_path);
        }

        if let Ok(config) = Self::load_from_path(LOCAL_CONFIG_FILE) {
            debug!("Loaded config from ./{}", LOCAL_CONFIG_FILE);
            return Ok(config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("people-protocol").join("config.toml");
            if let Ok(config) = Self::load_from_path(&config_path) {
                debug!("Loaded config from {:?}", config_path);
                return Ok(config);
            }
        }

        debug!("Using default config");
        Ok(Self::default())
    }

    fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// API key from the environment variable named in `[llm]`.
    pub fn get_api_key(&self) -> Result<SecretString> {
        match &self.llm.api_key_env {
            Some(env_var) => {
                // "none" means the endpoint takes no key (local models)
                if env_var.eq_ignore_ascii_case("none") {
                    return Ok(SecretString::default());
                }
                if self.llm.provider == "openai-compatible" {
                    return Ok(secret_from_env(env_var).unwrap_or_default());
                }
                secret_from_env(env_var).with_context(|| {
                    format!("API key not found in environment variable: {}", env_var)
                })
            }
            None => Ok(SecretString::default()),
        }
    }

    /// Names of every required credential variable that is unset, so they can be reported together.
    pub fn missing_credentials(&self, needs_catalog: bool) -> Vec<String> {
        let mut missing = Vec::new();
        if needs_catalog {
            for var in [&self.lightcast.client_id_env, &self.lightcast.client_secret_env] {
                if secret_from_env(var).is_none() {
                    missing.push(var.clone());
                }
            }
        }
        if let Some(ref var) = self.llm.api_key_env {
            let optional =
                var.eq_ignore_ascii_case("none") || self.llm.provider == "openai-compatible";
            if !optional && secret_from_env(var).is_none() {
                missing.push(var.clone());
            }
        }
        missing
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                provider: "anthropic".to_string(),
                model: "claude-sonnet-4-20250514".to_string(),
                api_key_env: provider_key_env("anthropic").map(str::to_string),
                base_url: None,
                max_tokens: None,
                timeout_secs: default_timeout_secs(),
            },
            lightcast: LightcastConfig::default(),
            generation: GenerationConfig::default(),
            output: OutputConfig::default(),
        }
    }
}
