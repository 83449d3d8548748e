//! # Wheelcov Tags
//!
//! Wheel filename tags and the platform coverage matrix built from them.
//!
//! ## Pipeline
//!
//! ```text
//! Wheel filenames (per package)
//!     │
//!     ├──> WheelTag::from_filename
//!     │      └─> (interpreter, abi, platform)
//!     │
//!     ├──> CoverageMatrix (package → tag set, interpreter columns)
//!     │
//!     ├──> CellCoverage::evaluate (expected vs observed per lin/mac/win)
//!     │      └─> "LinMac---"
//!     │
//!     └──> CoverageTable::render
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wheelcov_tags::{CoverageMatrix, CoverageTable};
//!
//! let mut matrix = CoverageMatrix::new();
//! matrix.add_package("demo");
//! matrix
//!     .add_filename("demo", "demo-1.0-cp39-cp39-macosx_10_9_x86_64.whl")
//!     .unwrap();
//!
//! let table = CoverageTable::from_matrix(&matrix);
//! assert!(table.render().contains("---Mac---"));
//! ```

mod classify;
mod coverage;
mod error;
mod matrix;
mod table;
mod tag;

pub use classify::{platform_to_os, pretty_interpreter_tag, OsCategory};
pub use coverage::{CellCoverage, CoverageExpectation, CoverageLevel, OsCoverage, MISSING_CODE};
pub use error::{Result, TagError};
pub use matrix::CoverageMatrix;
pub use table::CoverageTable;
pub use tag::{WheelTag, WHEEL_SUFFIX};
