//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes the current settings back atomically at shutdown.
//!
//! Notes:
//! - A missing file is not an error: defaults are used and the file is created on save.
//! - Unknown XML fields are rejected to surface misconfigurations early.

use anyhow::{Context, Result, anyhow};
use quick_xml::de::from_str as from_xml_str;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::engine::ConflictMode;
use crate::platform::{atomic_write, set_dir_mode_0700};

use super::paths::{default_config_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel, WindowGeometry};

/// Struct mirroring the XML config for (de)serialization.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    include_hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    conflict_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    log_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    history_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    window: Option<XmlWindow>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct XmlWindow {
    #[serde(deserialize_with = "de_i32_trimmed")]
    x: i32,
    #[serde(deserialize_with = "de_i32_trimmed")]
    y: i32,
    #[serde(deserialize_with = "de_i32_trimmed")]
    w: i32,
    #[serde(deserialize_with = "de_i32_trimmed")]
    h: i32,
}

// Custom deserializer that trims surrounding whitespace for i32
fn de_i32_trimmed<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<i32>().map_err(serde::de::Error::custom)
}

fn trimmed_path(s: Option<&str>) -> Option<PathBuf> {
    s.map(str::trim).filter(|t| !t.is_empty()).map(PathBuf::from)
}

// Map XmlConfig -> Config; absent or unparsable values keep their defaults.
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    cfg.last_root = trimmed_path(parsed.last_root.as_deref());
    if let Some(p) = trimmed_path(parsed.log_file.as_deref()) {
        cfg.log_file = Some(p);
    }
    if let Some(p) = trimmed_path(parsed.history_file.as_deref()) {
        cfg.history_file = Some(p);
    }
    if let Some(level) = parsed.log_level.as_deref().and_then(|s| s.trim().parse::<LogLevel>().ok()) {
        cfg.log_level = level;
    }
    if let Some(mode) = parsed.conflict_mode.as_deref().and_then(ConflictMode::parse) {
        cfg.conflict_mode = mode;
    }
    cfg.include_hidden = parsed.include_hidden.unwrap_or(false);
    cfg.window = parsed.window.map(|w| WindowGeometry {
        x: w.x,
        y: w.y,
        w: w.w,
        h: w.h,
    });

    cfg
}

fn config_to_xml(cfg: &Config) -> XmlConfig {
    let path_str = |p: &Option<PathBuf>| p.as_ref().map(|p| p.display().to_string());
    XmlConfig {
        last_root: path_str(&cfg.last_root),
        include_hidden: Some(cfg.include_hidden),
        conflict_mode: Some(cfg.conflict_mode.to_string()),
        log_level: Some(cfg.log_level.to_string()),
        log_file: path_str(&cfg.log_file),
        history_file: path_str(&cfg.history_file),
        window: cfg.window.map(|w| XmlWindow {
            x: w.x,
            y: w.y,
            w: w.w,
            h: w.h,
        }),
    }
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// Load the config from the default location ($FOLDER_LEVELUP_CONFIG or the OS config dir).
/// Returns the config and the path it belongs to; a missing file yields defaults.
pub fn load_config() -> Result<(Config, Option<PathBuf>)> {
    let Some(path) = default_config_path() else {
        debug!("no config location available; using defaults");
        return Ok((Config::default(), None));
    };
    if !path.exists() {
        debug!(path = %path.display(), "config file not found; using defaults");
        return Ok((Config::default(), Some(path)));
    }
    let cfg = load_config_from_xml_path(&path)?;
    Ok((cfg, Some(path)))
}

/// Write `cfg` to `path` atomically, creating the parent directory if needed.
pub fn save_config_to_xml_path(cfg: &Config, path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow!(
            "Refusing to write config: ancestor of {} is a symlink",
            path.display()
        ));
    }
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config dir '{}'", parent.display()))?;
        let _ = set_dir_mode_0700(parent);
    }

    let mut body = String::new();
    let mut ser = quick_xml::se::Serializer::new(&mut body);
    ser.indent(' ', 2);
    config_to_xml(cfg)
        .serialize(ser)
        .map_err(|e| anyhow!("serialize config xml: {e}"))?;
    body.push('\n');

    atomic_write(path, body.as_bytes())?;
    info!(path = %path.display(), "config saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_element_gives_defaults() {
        let parsed: XmlConfig = from_xml_str("<config></config>").unwrap();
        let cfg = xml_to_config(parsed);
        assert_eq!(cfg.last_root, None);
        assert_eq!(cfg.conflict_mode, ConflictMode::Skip);
        assert!(!cfg.include_hidden);
    }

    #[test]
    fn blank_paths_are_ignored() {
        let parsed: XmlConfig =
            from_xml_str("<config><last_root>   </last_root></config>").unwrap();
        assert_eq!(xml_to_config(parsed).last_root, None);
    }
}
