use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use serde::Deserialize;
use shared::protocol::PREDICT_PATH;
use url::Url;

pub const SETTINGS_FILE_NAME: &str = "metastructure.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            request_timeout_secs: None,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn predict_endpoint(&self) -> anyhow::Result<String> {
        predict_endpoint(&self.server_url)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then the first settings file found, then environment overrides.
pub fn load_settings() -> ClientSettings {
    load_settings_from(&settings_file_candidates(), |name| std::env::var(name).ok())
}

pub fn settings_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(SETTINGS_FILE_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("metastructure").join(SETTINGS_FILE_NAME));
    }
    candidates
}

pub fn load_settings_from(
    candidates: &[PathBuf],
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Some(file_cfg) = candidates.iter().find_map(|path| read_file_settings(path)) {
        if let Some(v) = file_cfg.server_url {
            settings.server_url = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            settings.request_timeout_secs = Some(v);
        }
    }

    if let Some(v) = env("METASTRUCTURE_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = Some(parsed),
            Err(err) => tracing::warn!("ignoring APP__REQUEST_TIMEOUT_SECS={v:?}: {err}"),
        }
    }

    settings
}

fn read_file_settings(path: &Path) -> Option<FileSettings> {
    let raw = fs::read_to_string(path).ok()?;
    match toml::from_str::<FileSettings>(&raw) {
        Ok(cfg) => {
            tracing::debug!(path = %path.display(), "loaded client settings file");
            Some(cfg)
        }
        Err(err) => {
            tracing::warn!("ignoring unreadable settings file '{}': {err}", path.display());
            None
        }
    }
}

/// `http://host:5000/` -> `http://host:5000/predict`. Only http(s) URLs are accepted.
pub fn predict_endpoint(server_url: &str) -> anyhow::Result<String> {
    let server_url = server_url.trim();
    let parsed =
        Url::parse(server_url).with_context(|| format!("invalid server url '{server_url}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "unsupported server url scheme '{}' in '{server_url}'",
            parsed.scheme()
        );
    }
    Ok(format!("{}{PREDICT_PATH}", server_url.trim_end_matches('/')))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
