use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;
use crate::tag::WheelTag;

/// Tags seen per package, plus the set of interpreter tags seen across all
/// packages (the table columns).
///
/// Built by a single writer before any read. Packages registered with
/// [`CoverageMatrix::add_package`] keep an entry even when no wheel is ever
/// added, so "no wheels" stays distinguishable from "not configured".
#[derive(Debug, Clone, Default)]
pub struct CoverageMatrix {
    interpreters: BTreeSet<String>,
    packages: BTreeMap<String, BTreeSet<WheelTag>>,
}

impl CoverageMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_package(&mut self, name: &str) {
        if !self.packages.contains_key(name) {
            self.packages.insert(name.to_string(), BTreeSet::new());
        }
    }

    pub fn add_wheel(&mut self, name: &str, tag: WheelTag) {
        self.interpreters.insert(tag.interpreter.clone());
        self.packages
            .entry(name.to_string())
            .or_default()
            .insert(tag);
    }

    /// Parse `filename` and add its tags. Returns the parsed tag.
    pub fn add_filename(&mut self, name: &str, filename: &str) -> Result<WheelTag> {
        let tag = WheelTag::from_filename(filename)?;
        log::debug!("{name}: {filename} -> {tag}");
        self.add_wheel(name, tag.clone());
        Ok(tag)
    }

    pub fn has_any(&self, name: &str, interpreter: &str) -> bool {
        self.tags(name).any(|tag| tag.interpreter == interpreter)
    }

    pub fn count_matching(&self, name: &str, interpreter: &str) -> usize {
        self.tags(name)
            .filter(|tag| tag.interpreter == interpreter)
            .count()
    }

    pub fn filter_by_interpreter(&self, name: &str, interpreter: &str) -> Vec<&WheelTag> {
        self.tags(name)
            .filter(|tag| tag.interpreter == interpreter)
            .collect()
    }

    /// Interpreter tags in lexical order.
    pub fn interpreters(&self) -> impl Iterator<Item = &str> {
        self.interpreters.iter().map(String::as_str)
    }

    /// Package names in lexical order.
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn contains_package(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// All tags of `name`; empty for unknown packages.
    pub fn tags(&self, name: &str) -> impl Iterator<Item = &WheelTag> {
        self.packages.get(name).into_iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> CoverageMatrix {
        let mut matrix = CoverageMatrix::new();
        matrix.add_package("alpha");
        matrix.add_wheel("alpha", WheelTag::new("cp39", "cp39", "manylinux1_x86_64"));
        matrix.add_wheel("alpha", WheelTag::new("cp39", "cp39", "win_amd64"));
        matrix.add_wheel("alpha", WheelTag::new("cp38", "cp38", "win_amd64"));
        matrix.add_package("empty");
        matrix
    }

    #[test]
    fn add_package_is_idempotent() {
        let mut matrix = sample();
        matrix.add_package("alpha");
        assert_eq!(matrix.count_matching("alpha", "cp39"), 2);
        assert_eq!(matrix.len(), 2);
    }

    #[test]
    fn duplicate_tags_collapse() {
        let mut matrix = sample();
        matrix.add_wheel("alpha", WheelTag::new("cp39", "cp39", "win_amd64"));
        assert_eq!(matrix.count_matching("alpha", "cp39"), 2);
    }

    #[test]
    fn queries_filter_by_interpreter() {
        let matrix = sample();
        assert!(matrix.has_any("alpha", "cp38"));
        assert!(!matrix.has_any("alpha", "cp27"));
        assert_eq!(matrix.count_matching("alpha", "cp38"), 1);
        assert_eq!(
            matrix.filter_by_interpreter("alpha", "cp38"),
            vec![&WheelTag::new("cp38", "cp38", "win_amd64")]
        );
    }

    #[test]
    fn empty_package_stays_registered() {
        let matrix = sample();
        assert!(matrix.contains_package("empty"));
        assert!(matrix.filter_by_interpreter("empty", "cp39").is_empty());
        assert_eq!(matrix.packages().collect::<Vec<_>>(), vec!["alpha", "empty"]);
    }

    #[test]
    fn unknown_package_reads_as_empty() {
        let matrix = sample();
        assert!(!matrix.has_any("missing", "cp39"));
        assert_eq!(matrix.count_matching("missing", "cp39"), 0);
        assert!(matrix.filter_by_interpreter("missing", "cp39").is_empty());
        assert_eq!(matrix.tags("missing").count(), 0);
        assert!(!matrix.contains_package("missing"));
    }

    #[test]
    fn interpreters_are_global_and_sorted() {
        let mut matrix = sample();
        matrix.add_wheel("beta", WheelTag::new("cp27", "cp27mu", "manylinux1_x86_64"));
        assert_eq!(
            matrix.interpreters().collect::<Vec<_>>(),
            vec!["cp27", "cp38", "cp39"]
        );
    }

    #[test]
    fn add_filename_parses_and_registers() {
        let mut matrix = CoverageMatrix::new();
        let tag = matrix
            .add_filename("gamma", "gamma-1.0-cp310-cp310-macosx_11_0_arm64.whl")
            .expect("tag");
        assert_eq!(tag, WheelTag::new("cp310", "cp310", "macosx_11_0_arm64"));
        assert!(matrix.has_any("gamma", "cp310"));
        assert!(matrix.add_filename("gamma", "gamma-1.0.tar.gz").is_err());
        assert_eq!(matrix.count_matching("gamma", "cp310"), 1);
    }
}
