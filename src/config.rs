use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub openai: OpenAiSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    pub api_key: String,
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    #[serde(default = "default_validation_model")]
    pub validation_model: String,
    #[serde(default = "default_matching_model")]
    pub matching_model: String,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_validation_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_matching_model() -> String {
    "gpt-4o".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub api_key: String,
    #[serde(default = "default_supabase_url")]
    pub url: String,
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,
}

fn default_supabase_url() -> String {
    "http://localhost:54321".to_string()
}

fn default_profiles_table() -> String {
    "profiles".to_string()
}

/// Settings for the match-finding path
///
/// `max_candidates` caps how many candidate profiles are embedded in the
/// matching prompt. Unset means unbounded, which grows linearly with the
/// total profile count.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub max_candidates: Option<usize>,
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with COLLAB_)
    ///
    /// Missing credentials (OPENAI_API_KEY, SUPABASE_KEY) fail the load,
    /// so the process refuses to start without them.
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with COLLAB_)
            // e.g., COLLAB_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("COLLAB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Apply the plain credential variables the deployment provides
        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("COLLAB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }
}

/// Override credential and endpoint values from their conventional
/// environment variable names (OPENAI_API_KEY, SUPABASE_KEY, SUPABASE_URL)
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let openai_api_key = env::var("OPENAI_API_KEY").ok();
    let supabase_key = env::var("SUPABASE_KEY").ok();
    let supabase_url = env::var("SUPABASE_URL").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = openai_api_key {
        builder = builder.set_override("openai.api_key", api_key)?;
    }
    if let Some(api_key) = supabase_key {
        builder = builder.set_override("supabase.api_key", api_key)?;
    }
    if let Some(url) = supabase_url {
        builder = builder.set_override("supabase.url", url)?;
    }

    builder.build()
}
