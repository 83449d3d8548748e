use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{IndexError, Result};

pub const WHEEL_PACKAGETYPE: &str = "bdist_wheel";

/// Wheel filenames published for the latest version of one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRelease {
    pub package: String,
    pub version: String,
    pub filenames: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawProject {
    info: Option<RawInfo>,
    #[serde(default)]
    releases: HashMap<String, Vec<RawFile>>,
}

#[derive(Debug, Deserialize)]
struct RawInfo {
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFile {
    filename: String,
    #[serde(default)]
    packagetype: Option<String>,
}

/// Extract the wheel filenames of `info.version` from a project JSON document
/// (`{"info": {"version": ..}, "releases": {<version>: [{filename, packagetype}]}}`).
///
/// Files keep their response order. A version without wheels yields an empty
/// list; a missing version key is an error.
pub fn latest_wheel_filenames(package: &str, body: &[u8]) -> Result<LatestRelease> {
    let raw: RawProject = serde_json::from_slice(body).map_err(|source| IndexError::Json {
        package: package.to_string(),
        source,
    })?;

    let Some(version) = raw.info.and_then(|info| info.version) else {
        return Err(IndexError::missing_version(package, None));
    };
    let Some(files) = raw.releases.get(&version) else {
        return Err(IndexError::missing_version(package, Some(version)));
    };

    let filenames = files
        .iter()
        .filter(|file| file.packagetype.as_deref() == Some(WHEEL_PACKAGETYPE))
        .map(|file| file.filename.clone())
        .collect();

    Ok(LatestRelease {
        package: package.to_string(),
        version,
        filenames,
    })
}

/// Project names end up in URLs and file paths; keep them to the characters
/// the index allows.
pub fn validate_package_name(package: &str) -> Result<()> {
    let valid = !package.is_empty()
        && package
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !package.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(IndexError::InvalidPackage(package.to_string()))
    }
}
