use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{File, FileFormat};
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable with a colon separated list of config files. Later
/// files override earlier ones.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG_PATH";

/// Loads the config from the files listed in `FOLIO_CONFIG_PATH`, falling
/// back to the `config.toml` at the workspace root.
pub fn load() -> anyhow::Result<Config> {
    load_paths(&config_paths())
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_override(paths, &[])
}

/// Like [`load_paths`], but additionally merges inline TOML snippets (e.g.
/// `relay.timeout = "5s"`) on top of the files.
pub fn load_with_override(paths: &[impl AsRef<Path>], overrides: &[&str]) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            anyhow::Ok(builder.add_source(File::from_str(&content, FileFormat::Toml)))
        })?;

    overrides
        .iter()
        .fold(builder, |builder, &source| {
            builder.add_source(File::from_str(source, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

fn config_paths() -> Vec<PathBuf> {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(paths) => std::env::split_paths(&paths).collect(),
        None => vec![DEFAULT_CONFIG_PATH.into()],
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub relay: RelayConfig,
}

#[derive(Debug, Deserialize)]
pub struct RelayConfig {
    pub endpoint_override: Option<Url>,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub access_token: Option<String>,
    pub timeout: Option<Duration>,
}
