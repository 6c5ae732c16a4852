//! Configuration discovery and effective settings resolution.
//!
//! Sudosort reads `sudosort.toml|yaml|yml` from the directory of the target
//! file (or the closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config.
//! Defaults:
//! - `output`: `human`
//! - `format.trailing_name`: `ignore`
//!
//! Overrides precedence: CLI > config file > defaults. `--check` and
//! `--diff` are CLI-only so that a plain run always rewrites the file.

use crate::parse::TrailingName;
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_NAMES: [&str; 3] = ["sudosort.toml", "sudosort.yaml", "sudosort.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Formatting-related configuration section under `[format]`.
pub struct FormatCfg {
    pub trailing_name: Option<TrailingName>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `sudosort.toml|yaml`.
pub struct SortConfig {
    pub output: Option<String>,
    pub format: Option<FormatCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the run after applying precedence.
pub struct Effective {
    pub config_root: PathBuf,
    pub output: String,
    pub check: bool,
    pub diff: bool,
    pub trailing_name: TrailingName,
}

/// Walk upward from `start` to find the directory that owns the config.
///
/// Stops when a `sudosort.toml|yaml|yml` or a `.git` entry is found.
pub fn detect_config_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `SortConfig` from `sudosort.toml` or `sudosort.yaml|yml` if present.
///
/// A config file that cannot be read or parsed is skipped with a warning.
pub fn load_config(root: &Path) -> Option<SortConfig> {
    let toml_path = root.join("sudosort.toml");
    if toml_path.exists() {
        let s = read_config(&toml_path)?;
        return match toml::from_str(&s) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                warn!("ignoring {}: {}", toml_path.display(), e);
                None
            }
        };
    }
    for yml in ["sudosort.yaml", "sudosort.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = read_config(&p)?;
            return match serde_yaml::from_str(&s) {
                Ok(cfg) => Some(cfg),
                Err(e) => {
                    warn!("ignoring {}: {}", p.display(), e);
                    None
                }
            };
        }
    }
    None
}

fn read_config(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .map_err(|e| warn!("cannot read {}: {}", path.display(), e))
        .ok()
}

/// Resolve `Effective` for `target` by merging CLI flags, discovered config,
/// and defaults.
pub fn resolve_effective(
    target: &Path,
    cli_output: Option<&str>,
    cli_check: Option<bool>,
    cli_diff: Option<bool>,
    cli_strict: Option<bool>,
) -> Effective {
    let start = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let config_root = detect_config_root(&start);
    let cfg = load_config(&config_root).unwrap_or_default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let check = cli_check.unwrap_or(false);
    let diff = cli_diff.unwrap_or(false);
    let trailing_name = cli_strict
        .map(|strict| {
            if strict {
                TrailingName::Error
            } else {
                TrailingName::Ignore
            }
        })
        .or_else(|| cfg.format.as_ref().and_then(|f| f.trailing_name))
        .unwrap_or_default();

    Effective {
        config_root,
        output,
        check,
        diff,
        trailing_name,
    }
}
