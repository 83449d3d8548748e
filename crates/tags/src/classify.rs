use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Coarse operating-system bucket derived from a platform tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OsCategory {
    Linux,
    Mac,
    Windows,
    /// Unclassified platform tag, kept verbatim (`any`, `linux_armv7l`, ...).
    Other(String),
}

impl OsCategory {
    /// Buckets shown in a coverage cell, in display order.
    pub const DISPLAYED: [OsCategory; 3] = [OsCategory::Linux, OsCategory::Mac, OsCategory::Windows];

    pub fn as_str(&self) -> &str {
        match self {
            OsCategory::Linux => "lin",
            OsCategory::Mac => "mac",
            OsCategory::Windows => "win",
            OsCategory::Other(tag) => tag.as_str(),
        }
    }

    pub fn is_other(&self) -> bool {
        matches!(self, OsCategory::Other(_))
    }
}

impl fmt::Display for OsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn platform_to_os(platform: &str) -> OsCategory {
    if platform.starts_with("manylinux") {
        OsCategory::Linux
    } else if platform.starts_with("macosx") {
        OsCategory::Mac
    } else if platform.starts_with("win") {
        OsCategory::Windows
    } else {
        OsCategory::Other(platform.to_string())
    }
}

fn cpython_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^cp(\d)(\d+)$").expect("static regex"))
}

/// `cp39` -> `3.9`, `cp310` -> `3.10`; any other tag is returned unchanged.
pub fn pretty_interpreter_tag(tag: &str) -> String {
    match cpython_tag_regex().captures(tag) {
        Some(caps) => format!("{}.{}", &caps[1], &caps[2]),
        None => tag.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prettifies_cpython_tags() {
        assert_eq!(pretty_interpreter_tag("cp39"), "3.9");
        assert_eq!(pretty_interpreter_tag("cp27"), "2.7");
        assert_eq!(pretty_interpreter_tag("cp310"), "3.10");
    }

    #[test]
    fn leaves_other_interpreter_tags_alone() {
        assert_eq!(pretty_interpreter_tag("py3"), "py3");
        assert_eq!(pretty_interpreter_tag("pp37"), "pp37");
        assert_eq!(pretty_interpreter_tag("cp3"), "cp3");
        assert_eq!(pretty_interpreter_tag("cp39d"), "cp39d");
        assert_eq!(pretty_interpreter_tag("py2.py3"), "py2.py3");
    }

    #[test]
    fn classifies_platform_prefixes() {
        assert_eq!(platform_to_os("manylinux2010_x86_64"), OsCategory::Linux);
        assert_eq!(platform_to_os("manylinux1_i686"), OsCategory::Linux);
        assert_eq!(platform_to_os("macosx_10_9_x86_64"), OsCategory::Mac);
        assert_eq!(platform_to_os("win_amd64"), OsCategory::Windows);
        assert_eq!(platform_to_os("win32"), OsCategory::Windows);
        assert_eq!(platform_to_os("any"), OsCategory::Other("any".to_string()));
    }

    #[test]
    fn short_names_match_cell_codes() {
        assert_eq!(platform_to_os("manylinux2010_x86_64").as_str(), "lin");
        assert_eq!(platform_to_os("macosx_10_9_x86_64").as_str(), "mac");
        assert_eq!(platform_to_os("win_amd64").as_str(), "win");
        assert_eq!(platform_to_os("linux_armv7l").as_str(), "linux_armv7l");
        assert!(platform_to_os("any").is_other());
    }
}
