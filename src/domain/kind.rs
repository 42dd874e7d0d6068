//! Dependency kind as reported by `npm outdated --long`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which manifest section a dependency belongs to
///
/// Serialized as the raw npm section name so snapshot files keep the same
/// `type` strings npm produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DependencyKind {
    /// `dependencies`
    Production,
    /// `devDependencies`
    Development,
    /// Any other section (`optionalDependencies`, `peerDependencies`, ...)
    Other(String),
}

impl DependencyKind {
    /// Returns the npm manifest section name
    pub fn as_str(&self) -> &str {
        match self {
            DependencyKind::Production => "dependencies",
            DependencyKind::Development => "devDependencies",
            DependencyKind::Other(raw) => raw,
        }
    }

    /// Returns the `npm install` flag that records the dependency in the
    /// matching section, if there is one
    pub fn save_flag(&self) -> Option<&'static str> {
        match self {
            DependencyKind::Production => Some("--save"),
            DependencyKind::Development => Some("--save-dev"),
            DependencyKind::Other(_) => None,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, DependencyKind::Development)
    }
}

impl Default for DependencyKind {
    fn default() -> Self {
        DependencyKind::Other(String::new())
    }
}

impl From<String> for DependencyKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "dependencies" => DependencyKind::Production,
            "devDependencies" => DependencyKind::Development,
            _ => DependencyKind::Other(raw),
        }
    }
}

impl From<&str> for DependencyKind {
    fn from(raw: &str) -> Self {
        DependencyKind::from(raw.to_string())
    }
}

impl From<DependencyKind> for String {
    fn from(kind: DependencyKind) -> Self {
        match kind {
            DependencyKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
