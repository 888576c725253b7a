use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use chrono::FixedOffset;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://api-mural.onrender.com/recados";
pub const DEFAULT_CONFIG_FILE: &str = "mural.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub utc_offset_minutes: Option<i32>,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            utc_offset_minutes: None,
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    endpoint: Option<String>,
    utc_offset_minutes: Option<i32>,
    request_timeout_secs: Option<u64>,
}

impl Settings {
    pub fn endpoint_url(&self) -> anyhow::Result<Url> {
        parse_endpoint(&self.endpoint)
    }

    /// `None` means "use the local offset".
    pub fn utc_offset(&self) -> anyhow::Result<Option<FixedOffset>> {
        let Some(minutes) = self.utc_offset_minutes else {
            return Ok(None);
        };
        FixedOffset::east_opt(minutes * 60)
            .map(Some)
            .with_context(|| format!("utc offset of {minutes} minutes is out of range"))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Defaults, then the config file, then environment variables. An explicit
/// `config_path` must exist; the default `mural.toml` is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match config_path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };
    if required || path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?;
    }

    apply_env(&mut settings, |name| std::env::var(name).ok())?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.endpoint {
        settings.endpoint = v;
    }
    if let Some(v) = file_cfg.utc_offset_minutes {
        settings.utc_offset_minutes = Some(v);
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = Some(v);
    }
    Ok(())
}

fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("MURAL_ENDPOINT") {
        settings.endpoint = v;
    }
    if let Some(v) = lookup("APP__ENDPOINT") {
        settings.endpoint = v;
    }

    if let Some(v) = lookup("APP__UTC_OFFSET_MINUTES") {
        let minutes = v
            .trim()
            .parse::<i32>()
            .with_context(|| format!("APP__UTC_OFFSET_MINUTES is not an integer: '{v}'"))?;
        settings.utc_offset_minutes = Some(minutes);
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        let secs = v
            .trim()
            .parse::<u64>()
            .with_context(|| format!("APP__REQUEST_TIMEOUT_SECS is not an integer: '{v}'"))?;
        settings.request_timeout_secs = Some(secs);
    }

    Ok(())
}

pub fn parse_endpoint(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid endpoint url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("endpoint must use http or https, got '{}'", url.scheme());
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
