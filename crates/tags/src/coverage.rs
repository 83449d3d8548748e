use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::classify::{platform_to_os, OsCategory};
use crate::matrix::CoverageMatrix;
use crate::tag::WheelTag;

const BASE_LIN: usize = 2;
const BASE_MAC: usize = 1;
const BASE_WIN: usize = 2;

/// Placeholder for an OS bucket with no wheels at all.
pub const MISSING_CODE: &str = "---";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageLevel {
    Full,
    Partial,
    Missing,
}

impl CoverageLevel {
    pub fn classify(observed: usize, expected: usize) -> Self {
        if observed >= expected {
            CoverageLevel::Full
        } else if observed > 0 {
            CoverageLevel::Partial
        } else {
            CoverageLevel::Missing
        }
    }
}

/// Expected wheel counts per displayed OS bucket for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageExpectation {
    pub lin: usize,
    pub mac: usize,
    pub win: usize,
}

impl CoverageExpectation {
    /// Base counts, with Linux doubled once when both legacy manylinux
    /// generations are present and once more for `cp27` (`m` and `mu` ABIs).
    pub fn for_cell(interpreter: &str, tags: &[&WheelTag]) -> Self {
        let mut lin = BASE_LIN;
        let has_manylinux1 = tags.iter().any(|t| t.platform.starts_with("manylinux1_"));
        let has_manylinux2010 = tags
            .iter()
            .any(|t| t.platform.starts_with("manylinux2010_"));
        if has_manylinux1 && has_manylinux2010 {
            lin *= 2;
        }
        if interpreter == "cp27" {
            lin *= 2;
        }
        Self {
            lin,
            mac: BASE_MAC,
            win: BASE_WIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsCoverage {
    pub observed: usize,
    pub expected: usize,
    pub level: CoverageLevel,
}

impl OsCoverage {
    fn code(&self, os: &OsCategory) -> String {
        match self.level {
            CoverageLevel::Full => capitalize(os.as_str()),
            CoverageLevel::Partial => os.as_str().to_string(),
            CoverageLevel::Missing => MISSING_CODE.to_string(),
        }
    }
}

/// Coverage of one package × interpreter cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellCoverage {
    pub interpreter: String,
    pub lin: OsCoverage,
    pub mac: OsCoverage,
    pub win: OsCoverage,
    /// Platform tags outside lin/mac/win. Not part of the code.
    pub other: BTreeSet<String>,
}

impl CellCoverage {
    pub fn evaluate(matrix: &CoverageMatrix, package: &str, interpreter: &str) -> Self {
        let tags = matrix.filter_by_interpreter(package, interpreter);
        let expected = CoverageExpectation::for_cell(interpreter, &tags);

        let mut observed = [0usize; 3];
        let mut other = BTreeSet::new();
        for tag in &tags {
            match platform_to_os(&tag.platform) {
                OsCategory::Linux => observed[0] += 1,
                OsCategory::Mac => observed[1] += 1,
                OsCategory::Windows => observed[2] += 1,
                OsCategory::Other(platform) => {
                    other.insert(platform);
                }
            }
        }

        let bucket = |observed: usize, expected: usize| OsCoverage {
            observed,
            expected,
            level: CoverageLevel::classify(observed, expected),
        };

        Self {
            interpreter: interpreter.to_string(),
            lin: bucket(observed[0], expected.lin),
            mac: bucket(observed[1], expected.mac),
            win: bucket(observed[2], expected.win),
            other,
        }
    }

    pub fn os(&self, os: &OsCategory) -> Option<&OsCoverage> {
        match os {
            OsCategory::Linux => Some(&self.lin),
            OsCategory::Mac => Some(&self.mac),
            OsCategory::Windows => Some(&self.win),
            OsCategory::Other(_) => None,
        }
    }

    /// Three 3-character codes, lin then mac then win: `Lin`/`lin`/`---`.
    pub fn code(&self) -> String {
        OsCategory::DISPLAYED
            .iter()
            .filter_map(|os| self.os(os).map(|cov| cov.code(os)))
            .collect()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn matrix_with(package: &str, filenames: &[&str]) -> CoverageMatrix {
        let mut matrix = CoverageMatrix::new();
        matrix.add_package(package);
        for filename in filenames {
            matrix.add_filename(package, filename).expect("wheel");
        }
        matrix
    }

    #[test]
    fn base_expectation() {
        let expected = CoverageExpectation::for_cell("cp39", &[]);
        assert_eq!(
            expected,
            CoverageExpectation {
                lin: 2,
                mac: 1,
                win: 2
            }
        );
    }

    #[test]
    fn both_manylinux_generations_double_linux() {
        let matrix = matrix_with(
            "pkg",
            &[
                "pkg-1.0-cp39-cp39-manylinux1_x86_64.whl",
                "pkg-1.0-cp39-cp39-manylinux2010_x86_64.whl",
            ],
        );
        let cell = CellCoverage::evaluate(&matrix, "pkg", "cp39");
        assert_eq!(cell.lin.observed, 2);
        assert_eq!(cell.lin.expected, 4);
        assert_eq!(cell.lin.level, CoverageLevel::Partial);
        assert_eq!(cell.code(), "lin------");
    }

    #[test]
    fn single_manylinux_generation_keeps_base() {
        let matrix = matrix_with(
            "pkg",
            &[
                "pkg-1.0-cp39-cp39-manylinux2010_x86_64.whl",
                "pkg-1.0-cp39-cp39-manylinux2010_i686.whl",
            ],
        );
        let cell = CellCoverage::evaluate(&matrix, "pkg", "cp39");
        assert_eq!(cell.lin.expected, 2);
        assert_eq!(cell.code(), "Lin------");
    }

    #[test]
    fn cp27_doubles_linux() {
        let matrix = matrix_with(
            "pkg",
            &[
                "pkg-1.0-cp27-cp27m-manylinux1_x86_64.whl",
                "pkg-1.0-cp27-cp27mu-manylinux1_x86_64.whl",
            ],
        );
        let cell = CellCoverage::evaluate(&matrix, "pkg", "cp27");
        assert_eq!(cell.lin.observed, 2);
        assert_eq!(cell.lin.expected, 4);
        assert_eq!(cell.code(), "lin------");
    }

    #[test]
    fn cp27_with_both_generations_quadruples_linux() {
        let matrix = matrix_with(
            "pkg",
            &[
                "pkg-1.0-cp27-cp27m-manylinux1_x86_64.whl",
                "pkg-1.0-cp27-cp27m-manylinux2010_x86_64.whl",
            ],
        );
        let cell = CellCoverage::evaluate(&matrix, "pkg", "cp27");
        assert_eq!(cell.lin.expected, 8);
    }

    #[test]
    fn full_coverage_capitalizes_every_bucket() {
        let matrix = matrix_with(
            "pkg",
            &[
                "pkg-1.0-cp39-cp39-manylinux2014_x86_64.whl",
                "pkg-1.0-cp39-cp39-manylinux2014_aarch64.whl",
                "pkg-1.0-cp39-cp39-macosx_10_9_x86_64.whl",
                "pkg-1.0-cp39-cp39-win32.whl",
                "pkg-1.0-cp39-cp39-win_amd64.whl",
            ],
        );
        let cell = CellCoverage::evaluate(&matrix, "pkg", "cp39");
        assert_eq!(cell.code(), "LinMacWin");
    }

    #[test]
    fn missing_windows_renders_dashes() {
        let matrix = matrix_with(
            "pkg",
            &[
                "pkg-1.0-cp38-cp38-macosx_10_9_x86_64.whl",
                "pkg-1.0-cp38-cp38-manylinux2014_x86_64.whl",
            ],
        );
        let cell = CellCoverage::evaluate(&matrix, "pkg", "cp38");
        assert_eq!(cell.win.level, CoverageLevel::Missing);
        assert_eq!(cell.code(), "linMac---");
    }

    #[test]
    fn other_platforms_are_kept_out_of_the_code() {
        let matrix = matrix_with(
            "pkg",
            &[
                "pkg-1.0-cp39-cp39-linux_armv7l.whl",
                "pkg-1.0-cp39-cp39-win_amd64.whl",
            ],
        );
        let cell = CellCoverage::evaluate(&matrix, "pkg", "cp39");
        assert_eq!(cell.code(), "------win");
        assert_eq!(
            cell.other.iter().cloned().collect::<Vec<_>>(),
            vec!["linux_armv7l".to_string()]
        );
    }

    #[test]
    fn package_without_wheels_is_all_missing() {
        let matrix = matrix_with("pkg", &[]);
        let cell = CellCoverage::evaluate(&matrix, "pkg", "cp39");
        assert_eq!(cell.code(), "---------");
    }

    #[test]
    fn classify_levels() {
        assert_eq!(CoverageLevel::classify(2, 2), CoverageLevel::Full);
        assert_eq!(CoverageLevel::classify(3, 2), CoverageLevel::Full);
        assert_eq!(CoverageLevel::classify(1, 2), CoverageLevel::Partial);
        assert_eq!(CoverageLevel::classify(0, 2), CoverageLevel::Missing);
    }
}
