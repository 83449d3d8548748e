use async_trait::async_trait;
use reqwest::Client;

use crate::error::{IndexError, Result};
use crate::release::{latest_wheel_filenames, validate_package_name, LatestRelease};
use crate::source::WheelSource;

pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/pypi";

/// Client for the PyPI JSON API (`GET {base}/{package}/json`).
#[derive(Debug, Clone)]
pub struct PypiClient {
    client: Client,
    base_url: String,
}

impl PypiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .user_agent(concat!("wheelcov/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| IndexError::http(&base_url, err))?;
        Ok(Self { client, base_url })
    }

    /// Use a preconfigured HTTP client (proxies, timeouts, TLS roots).
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn project_url(&self, package: &str) -> String {
        format!("{}/{package}/json", self.base_url)
    }
}

#[async_trait]
impl WheelSource for PypiClient {
    async fn latest_wheels(&self, package: &str) -> Result<LatestRelease> {
        validate_package_name(package)?;
        let url = self.project_url(package);
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| IndexError::http(&url, err))?
            .error_for_status()
            .map_err(|err| IndexError::http(&url, err))?;
        let body = response
            .bytes()
            .await
            .map_err(|err| IndexError::http(&url, err))?;

        latest_wheel_filenames(package, &body)
    }

    fn describe(&self) -> String {
        format!("index {}", self.base_url)
    }
}
