use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportLevel {
    Full,
    Partial,
    Missing,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ReportInterpreter {
    /// Raw interpreter tag, e.g. `cp39`
    pub tag: String,
    /// Column label, e.g. `3.9`
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ReportOsCoverage {
    pub observed: usize,
    pub expected: usize,
    pub level: ReportLevel,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ReportCell {
    pub interpreter: String,
    /// Nine-character table code, e.g. `LinMac---`
    pub code: String,
    pub lin: ReportOsCoverage,
    pub mac: ReportOsCoverage,
    pub win: ReportOsCoverage,
    /// Platform tags outside lin/mac/win
    #[serde(default)]
    pub other: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ReportPackage {
    pub name: String,
    /// Latest version, when the package was fetched
    pub version: Option<String>,
    pub wheel_count: usize,
    pub cells: Vec<ReportCell>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct CoverageReport {
    pub schema_version: u32,
    pub interpreters: Vec<ReportInterpreter>,
    pub packages: Vec<ReportPackage>,
}

impl CoverageReport {
    pub fn package(&self, name: &str) -> Option<&ReportPackage> {
        self.packages.iter().find(|p| p.name == name)
    }
}

impl ReportPackage {
    pub fn cell(&self, interpreter: &str) -> Option<&ReportCell> {
        self.cells.iter().find(|c| c.interpreter == interpreter)
    }
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}

/// JSON Schema of [`CoverageReport`], pretty-printed.
pub fn report_schema() -> Result<String> {
    let schema = schemars::schema_for!(CoverageReport);
    serialize_json_pretty(&schema)
}
