use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{IndexError, Result};
use crate::release::{latest_wheel_filenames, validate_package_name, LatestRelease};

/// Anything that can list the wheels of a package's latest release.
#[async_trait]
pub trait WheelSource: Send + Sync {
    async fn latest_wheels(&self, package: &str) -> Result<LatestRelease>;

    /// Short human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Reads saved project JSON documents from `{dir}/{package}.json`.
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, package: &str) -> PathBuf {
        self.dir.join(format!("{package}.json"))
    }
}

#[async_trait]
impl WheelSource for DirSource {
    async fn latest_wheels(&self, package: &str) -> Result<LatestRelease> {
        validate_package_name(package)?;
        let path = self.path_for(package);
        log::debug!("Reading {}", path.display());
        let body = tokio::fs::read(&path)
            .await
            .map_err(|err| IndexError::io(&path, err))?;
        latest_wheel_filenames(package, &body)
    }

    fn describe(&self) -> String {
        format!("directory {}", self.dir.display())
    }
}
