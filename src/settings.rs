use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://en.wikiquote.org/w/api.php";
const DEFAULT_USER_AGENT: &str = concat!("wikiquote_random/", env!("CARGO_PKG_VERSION"));

/// Runtime settings: defaults, then `wikiquote.{toml,json,yaml}`, then `WIKIQUOTE_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub user_agent: String,
    pub timeout_ms: u64,
    /// Extra attempts on HTTP 429/5xx. Zero means every failure is final.
    pub max_retries: u32,
    pub backoff_ms: u64,
    /// How many other sections to try when the chosen one has no quotes.
    pub empty_section_retries: usize,
    pub concurrency: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: 10_000,
            max_retries: 0,
            backoff_ms: 2000,
            empty_section_retries: 0,
            concurrency: 4,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::build(Environment::with_prefix("WIKIQUOTE").try_parsing(true))
    }

    fn build(env: Environment) -> Result<Self> {
        let d = Settings::default();
        let settings = Config::builder()
            .set_default("api_url", d.api_url)?
            .set_default("user_agent", d.user_agent)?
            .set_default("timeout_ms", d.timeout_ms as i64)?
            .set_default("max_retries", d.max_retries as i64)?
            .set_default("backoff_ms", d.backoff_ms as i64)?
            .set_default("empty_section_retries", d.empty_section_retries as i64)?
            .set_default("concurrency", d.concurrency as i64)?
            .add_source(File::with_name("wikiquote").required(false))
            .add_source(env)
            .build()
            .context("Failed to load settings")?;

        settings
            .try_deserialize()
            .context("Invalid settings")
    }
}
