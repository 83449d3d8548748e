use std::collections::BTreeMap;

use anyhow::{Context, Result};
use wheelcov_index::WheelSource;
use wheelcov_protocol::{
    CoverageReport, ReportCell, ReportInterpreter, ReportLevel, ReportOsCoverage, ReportPackage,
    REPORT_SCHEMA_VERSION,
};
use wheelcov_tags::{
    pretty_interpreter_tag, CellCoverage, CoverageLevel, CoverageMatrix, OsCoverage,
};

/// Matrix plus the latest version seen for each package.
#[derive(Debug, Default)]
pub(crate) struct Collected {
    pub matrix: CoverageMatrix,
    pub versions: BTreeMap<String, String>,
}

/// Fetch and parse every package in order. The first fetch failure or
/// malformed filename aborts the whole run.
pub(crate) async fn collect(source: &dyn WheelSource, packages: &[String]) -> Result<Collected> {
    let mut collected = Collected::default();

    for package in packages {
        collected.matrix.add_package(package);

        let release = source
            .latest_wheels(package)
            .await
            .with_context(|| {
                format!(
                    "Failed to list wheels of {package} from {}",
                    source.describe()
                )
            })?;

        if release.filenames.is_empty() {
            log::warn!("{package} {}: no wheels published", release.version);
        } else {
            log::info!(
                "{package} {}: {} wheels",
                release.version,
                release.filenames.len()
            );
        }

        for filename in &release.filenames {
            collected
                .matrix
                .add_filename(package, filename)
                .with_context(|| {
                    format!("Malformed wheel filename in {package} {}", release.version)
                })?;
        }
        collected
            .versions
            .insert(package.clone(), release.version.clone());
    }

    Ok(collected)
}

pub(crate) fn build_report(collected: &Collected) -> CoverageReport {
    let matrix = &collected.matrix;
    let interpreters: Vec<&str> = matrix.interpreters().collect();

    let packages = matrix
        .packages()
        .map(|name| ReportPackage {
            name: name.to_string(),
            version: collected.versions.get(name).cloned(),
            wheel_count: matrix.tags(name).count(),
            cells: interpreters
                .iter()
                .map(|interpreter| {
                    report_cell(&CellCoverage::evaluate(matrix, name, interpreter))
                })
                .collect(),
        })
        .collect();

    CoverageReport {
        schema_version: REPORT_SCHEMA_VERSION,
        interpreters: interpreters
            .iter()
            .map(|tag| ReportInterpreter {
                tag: tag.to_string(),
                label: pretty_interpreter_tag(tag),
            })
            .collect(),
        packages,
    }
}

fn report_cell(cell: &CellCoverage) -> ReportCell {
    ReportCell {
        interpreter: cell.interpreter.clone(),
        code: cell.code(),
        lin: report_os(&cell.lin),
        mac: report_os(&cell.mac),
        win: report_os(&cell.win),
        other: cell.other.iter().cloned().collect(),
    }
}

fn report_os(cov: &OsCoverage) -> ReportOsCoverage {
    ReportOsCoverage {
        observed: cov.observed,
        expected: cov.expected,
        level: match cov.level {
            CoverageLevel::Full => ReportLevel::Full,
            CoverageLevel::Partial => ReportLevel::Partial,
            CoverageLevel::Missing => ReportLevel::Missing,
        },
    }
}
