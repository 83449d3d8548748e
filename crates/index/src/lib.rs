//! # Wheelcov Index
//!
//! Lists the wheels of a package's latest release, either from the PyPI JSON
//! API or from saved copies of its responses on disk.
//!
//! ```no_run
//! use wheelcov_index::{PypiClient, WheelSource, DEFAULT_INDEX_URL};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PypiClient::new(DEFAULT_INDEX_URL)?;
//!     let release = client.latest_wheels("cryptography").await?;
//!     println!("{} {}: {} wheels", release.package, release.version, release.filenames.len());
//!     Ok(())
//! }
//! ```

mod error;
mod pypi;
mod release;
mod source;

pub use error::{IndexError, Result};
pub use pypi::{PypiClient, DEFAULT_INDEX_URL};
pub use release::{latest_wheel_filenames, validate_package_name, LatestRelease, WHEEL_PACKAGETYPE};
pub use source::{DirSource, WheelSource};
