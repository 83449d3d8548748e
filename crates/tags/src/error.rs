use thiserror::Error;

/// Result type for wheel tag operations
pub type Result<T> = std::result::Result<T, TagError>;

/// Errors raised while turning artifact filenames into tags
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// The filename does not carry the wheel suffix
    #[error("Not a wheel filename (expected `.whl` suffix): {0}")]
    NotAWheel(String),

    /// Fewer than three dash-separated segments before the suffix
    #[error("Malformed wheel filename, expected at least 3 dash-separated segments, found {found}: {filename}")]
    TooFewSegments { filename: String, found: usize },
}

impl TagError {
    /// Create a not-a-wheel error
    pub fn not_a_wheel(filename: impl Into<String>) -> Self {
        Self::NotAWheel(filename.into())
    }

    /// Create a too-few-segments error
    pub fn too_few_segments(filename: impl Into<String>, found: usize) -> Self {
        Self::TooFewSegments {
            filename: filename.into(),
            found,
        }
    }
}
