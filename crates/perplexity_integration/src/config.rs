use std::{fmt, fs, io, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_SETTINGS_PATH: &str = "refiner.toml";

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.perplexity.ai".into(),
            model: "sonar".into(),
            temperature: 0.7,
            max_tokens: 500,
            timeout_seconds: 60,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Settings {
    pub fn chat_completions_url(&self) -> anyhow::Result<Url> {
        let base = self.base_url.trim().trim_end_matches('/');
        Url::parse(&format!("{base}/chat/completions"))
            .with_context(|| format!("invalid Perplexity base url '{}'", self.base_url))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.chat_completions_url()?;
        if !(0.0..=2.0).contains(&self.temperature) {
            bail!("temperature must be between 0 and 2, got {}", self.temperature);
        }
        if self.max_tokens == 0 {
            bail!("max_tokens must be greater than zero");
        }
        if self.timeout_seconds == 0 {
            bail!("timeout_seconds must be greater than zero");
        }
        Ok(())
    }
}

/// Defaults, then the TOML file at `path` if present, then the environment.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<Settings>(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => Settings::default(),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    };

    apply_env_overrides(&mut settings, env);
    settings.validate()?;
    Ok(settings)
}

fn apply_env_overrides(settings: &mut Settings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = env("PERPLEXITY_API_KEY") {
        settings.api_key = Some(v);
    }
    if let Some(v) = env("APP__PERPLEXITY_API_KEY") {
        settings.api_key = Some(v);
    }

    if let Some(v) = env("APP__PERPLEXITY_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = env("APP__PERPLEXITY_MODEL") {
        settings.model = v;
    }

    if let Some(v) = env("APP__PERPLEXITY_TEMPERATURE") {
        match v.parse::<f32>() {
            Ok(parsed) => settings.temperature = parsed,
            Err(_) => warn!(value = %v, "ignoring unparsable APP__PERPLEXITY_TEMPERATURE"),
        }
    }
    if let Some(v) = env("APP__PERPLEXITY_MAX_TOKENS") {
        match v.parse::<u32>() {
            Ok(parsed) => settings.max_tokens = parsed,
            Err(_) => warn!(value = %v, "ignoring unparsable APP__PERPLEXITY_MAX_TOKENS"),
        }
    }
    if let Some(v) = env("APP__PERPLEXITY_TIMEOUT_SECONDS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.timeout_seconds = parsed,
            Err(_) => warn!(value = %v, "ignoring unparsable APP__PERPLEXITY_TIMEOUT_SECONDS"),
        }
    }
}
