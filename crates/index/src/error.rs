use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid index response for {package}: {source}")]
    Json {
        package: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Index response for {package} has no files for its latest version ({})", version.as_deref().unwrap_or("<missing info.version>"))]
    MissingVersion {
        package: String,
        version: Option<String>,
    },

    #[error("Invalid package name: {0:?}")]
    InvalidPackage(String),
}

impl IndexError {
    pub fn http(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn missing_version(package: impl Into<String>, version: Option<String>) -> Self {
        Self::MissingVersion {
            package: package.into(),
            version,
        }
    }
}
