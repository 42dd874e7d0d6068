//! Outdated dependency records

use super::DependencyKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An outdated package as reported by the package manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutdatedDependency {
    /// Package name
    pub name: String,
    /// Installed version (empty when the package is not installed)
    pub current: String,
    /// Highest version satisfying the manifest range
    pub wanted: String,
    /// Latest published version
    pub latest: String,
    /// Install location or manifest path
    pub location: String,
    /// Manifest section the package is declared in
    #[serde(rename = "type")]
    pub kind: DependencyKind,
}

impl OutdatedDependency {
    /// Creates a new outdated dependency record
    pub fn new(
        name: impl Into<String>,
        current: impl Into<String>,
        wanted: impl Into<String>,
        latest: impl Into<String>,
        location: impl Into<String>,
        kind: DependencyKind,
    ) -> Self {
        Self {
            name: name.into(),
            current: current.into(),
            wanted: wanted.into(),
            latest: latest.into(),
            location: location.into(),
            kind,
        }
    }

    /// Package spec pinned to the latest version (`name@latest`)
    pub fn latest_spec(&self) -> String {
        format!("{}@{}", self.name, self.latest)
    }

    /// Package spec pinned to the installed version, if one is known
    pub fn current_spec(&self) -> Option<String> {
        if self.current.is_empty() {
            None
        } else {
            Some(format!("{}@{}", self.name, self.current))
        }
    }
}

impl fmt::Display for OutdatedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} => {})", self.name, self.current, self.latest)
    }
}

/// An outdated dependency tagged with its position in a snapshot
///
/// Ids are dense (`0..N`) and only meaningful within the snapshot that
/// assigned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifiedDependency {
    pub id: usize,
    #[serde(flatten)]
    pub dependency: OutdatedDependency,
}

impl IdentifiedDependency {
    /// Attach a snapshot id to a record
    pub fn new(id: usize, dependency: OutdatedDependency) -> Self {
        Self { id, dependency }
    }

    /// Display label for the id, zero-padded to two digits
    pub fn label(&self) -> String {
        format!("[{:02}]", self.id)
    }
}

impl std::ops::Deref for IdentifiedDependency {
    type Target = OutdatedDependency;

    fn deref(&self) -> &Self::Target {
        &self.dependency
    }
}

impl fmt::Display for IdentifiedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label(), self.dependency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lodash() -> OutdatedDependency {
        OutdatedDependency::new(
            "lodash",
            "4.0.0",
            "4.1.0",
            "5.0.0",
            "node_modules/lodash",
            DependencyKind::Production,
        )
    }

    #[test]
    fn test_latest_spec() {
        assert_eq!(lodash().latest_spec(), "lodash@5.0.0");
    }

    #[test]
    fn test_current_spec() {
        assert_eq!(lodash().current_spec(), Some("lodash@4.0.0".to_string()));

        let mut missing = lodash();
        missing.current = String::new();
        assert_eq!(missing.current_spec(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(lodash().to_string(), "lodash (4.0.0 => 5.0.0)");
        assert_eq!(
            IdentifiedDependency::new(0, lodash()).to_string(),
            "[00] lodash (4.0.0 => 5.0.0)"
        );
    }

    #[test]
    fn test_label_padding() {
        assert_eq!(IdentifiedDependency::new(7, lodash()).label(), "[07]");
        assert_eq!(IdentifiedDependency::new(10, lodash()).label(), "[10]");
        assert_eq!(IdentifiedDependency::new(123, lodash()).label(), "[123]");
    }

    #[test]
    fn test_deref_to_dependency() {
        let identified = IdentifiedDependency::new(3, lodash());
        assert_eq!(identified.name, "lodash");
        assert_eq!(identified.kind, DependencyKind::Production);
    }

    #[test]
    fn test_serialized_field_layout() {
        let identified = IdentifiedDependency::new(0, lodash());
        let value = serde_json::to_value(&identified).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 0,
                "name": "lodash",
                "current": "4.0.0",
                "wanted": "4.1.0",
                "latest": "5.0.0",
                "location": "node_modules/lodash",
                "type": "dependencies"
            })
        );
    }

    #[test]
    fn test_serde_identified_dependency() {
        let identified = IdentifiedDependency::new(2, lodash());
        let json = serde_json::to_string(&identified).unwrap();
        let parsed: IdentifiedDependency = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, identified);
    }
}
