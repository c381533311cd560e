//! XML configuration support (quick_xml + serde).
//!
//! Notes:
//! - A missing default config file simply means defaults.
//! - An explicit `$RELOCATE_CONFIG` must exist and parse.
//! - Unknown fields are rejected so typos surface instead of being ignored.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::CONFIG_ENV;
use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    create_dirs: Option<bool>,
    git_program: Option<String>,
}

// Accepts `  true ` etc.; anything unparsable is an error rather than a silent default.
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<bool>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected true or false, got '{s}'"))),
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = s.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }
    if let Some(s) = non_empty(parsed.log_file.as_deref()) {
        cfg.log_file = Some(PathBuf::from(s));
    }
    if let Some(b) = parsed.create_dirs {
        cfg.create_dirs = b;
    }
    if let Some(s) = non_empty(parsed.git_program.as_deref()) {
        cfg.git_program = PathBuf::from(s);
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in config xml '{}'", path.display()))
}

/// Load the effective Config.
///
/// `$RELOCATE_CONFIG` wins and must point at a readable file; otherwise the OS default
/// location is used when present, and built-in defaults when it is not.
pub fn load_config() -> Result<Config> {
    if let Some(p) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        let path = PathBuf::from(p);
        if !path.is_file() {
            bail!(
                "{CONFIG_ENV} points to '{}', which is not a readable file",
                path.display()
            );
        }
        debug!(path = %path.display(), "Loading config from {CONFIG_ENV}");
        return load_config_from_xml_path(&path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => {
            debug!(path = %path.display(), "Loading config from default location");
            load_config_from_xml_path(&path)
        }
        _ => Ok(Config::default()),
    }
}
