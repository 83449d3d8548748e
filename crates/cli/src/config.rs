use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use wheelcov_index::DEFAULT_INDEX_URL;

const BUILTIN_PACKAGES: &str = include_str!("../assets/default_packages.toml");

pub(crate) const ENV_INDEX_URL: &str = "WHEELCOV_INDEX_URL";
pub(crate) const ENV_CONFIG: &str = "WHEELCOV_CONFIG";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    packages: Option<Vec<String>>,
    index_url: Option<String>,
}

/// Settings read from a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FileConfig {
    pub packages: Vec<String>,
    pub index_url: Option<String>,
}

/// Where package listings come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SourceSpec {
    Index(String),
    Dir(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReportSettings {
    pub packages: Vec<String>,
    pub source: SourceSpec,
}

/// Inputs gathered from flags and the environment.
#[derive(Debug, Default)]
pub(crate) struct SettingsInput {
    pub packages: Vec<String>,
    pub config_path: Option<PathBuf>,
    pub index_url: Option<String>,
    pub index_dir: Option<PathBuf>,
    pub env_index_url: Option<String>,
    pub env_config: Option<PathBuf>,
}

/// Config files are JSON or TOML: `{"packages": [..], "index_url": ".."}`.
pub(crate) fn parse_config(bytes: &[u8]) -> Result<FileConfig> {
    let raw: RawConfig = match serde_json::from_slice(bytes) {
        Ok(raw) => raw,
        Err(json_err) => {
            let utf8 = std::str::from_utf8(bytes).map_err(|err| anyhow!("{json_err}; {err}"))?;
            toml::from_str(utf8).map_err(|toml_err| {
                anyhow!("Config is not valid JSON ({json_err}) or TOML ({toml_err})")
            })?
        }
    };

    let index_url = match raw.index_url.map(|url| url.trim().to_string()) {
        Some(url) if url.is_empty() => return Err(anyhow!("index_url must not be empty")),
        other => other,
    };

    Ok(FileConfig {
        packages: normalize_packages(raw.packages.unwrap_or_default())?,
        index_url,
    })
}

pub(crate) fn load_config(path: &Path) -> Result<FileConfig> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse_config(&bytes).with_context(|| format!("Invalid config {}", path.display()))
}

pub(crate) fn default_packages() -> Result<Vec<String>> {
    let config =
        parse_config(BUILTIN_PACKAGES.as_bytes()).context("Invalid built-in package list")?;
    Ok(config.packages)
}

/// Trim names, reject empty ones, drop repeats (first occurrence wins).
pub(crate) fn normalize_packages(packages: Vec<String>) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(packages.len());
    for package in packages {
        let package = package.trim().to_string();
        if package.is_empty() {
            return Err(anyhow!("Package names must not be empty"));
        }
        if seen.insert(package.clone()) {
            out.push(package);
        }
    }
    Ok(out)
}

/// Packages: arguments, else config file, else the built-in list.
/// Source: `--index-dir`, else `--index-url`, env, config file, PyPI.
pub(crate) fn resolve_settings(input: SettingsInput) -> Result<ReportSettings> {
    let config_path = input.config_path.or(input.env_config);
    let file = match &config_path {
        Some(path) => load_config(path)?,
        None => FileConfig::default(),
    };

    let packages = if !input.packages.is_empty() {
        normalize_packages(input.packages)?
    } else if !file.packages.is_empty() {
        file.packages
    } else {
        default_packages()?
    };

    let source = match input.index_dir {
        Some(dir) => SourceSpec::Dir(dir),
        None => SourceSpec::Index(
            input
                .index_url
                .or(input.env_index_url)
                .or(file.index_url)
                .unwrap_or_else(|| DEFAULT_INDEX_URL.to_string()),
        ),
    };

    Ok(ReportSettings { packages, source })
}
