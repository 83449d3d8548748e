use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TagError};

pub const WHEEL_SUFFIX: &str = ".whl";

/// Compatibility tags carried by one wheel filename.
///
/// Ordering and equality cover the full triple, so two artifacts with the same
/// tags collapse into one entry of a tag set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WheelTag {
    pub interpreter: String,
    pub abi: String,
    pub platform: String,
}

impl WheelTag {
    pub fn new(
        interpreter: impl Into<String>,
        abi: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            interpreter: interpreter.into(),
            abi: abi.into(),
            platform: platform.into(),
        }
    }

    /// Parse the trailing `{interpreter}-{abi}-{platform}.whl` of a filename.
    ///
    /// Only the suffix and the segment count are checked; the tag tokens are
    /// taken verbatim.
    pub fn from_filename(filename: &str) -> Result<Self> {
        let stem = filename
            .strip_suffix(WHEEL_SUFFIX)
            .ok_or_else(|| TagError::not_a_wheel(filename))?;

        let mut segments = stem.rsplit('-');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(platform), Some(abi), Some(interpreter)) => {
                Ok(Self::new(interpreter, abi, platform))
            }
            _ => Err(TagError::too_few_segments(
                filename,
                stem.split('-').count(),
            )),
        }
    }
}

impl fmt::Display for WheelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.interpreter, self.abi, self.platform)
    }
}
