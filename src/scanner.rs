//! Outdated dependency scanner
//!
//! Runs `npm outdated --json --long`, parses the name-keyed mapping it prints
//! and assigns snapshot ids in ascending name order.

use crate::domain::{DependencyKind, IdentifiedDependency, OutdatedDependency};
use crate::error::{AppError, ScanError};
use crate::package_manager::{execute, NpmCommand, PackageManagerRunner};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One value of the `npm outdated --json --long` mapping
#[derive(Debug, Deserialize)]
struct NpmOutdatedEntry {
    #[serde(default)]
    current: String,
    #[serde(default)]
    wanted: String,
    latest: String,
    #[serde(default)]
    location: String,
    #[serde(rename = "type", default)]
    kind: DependencyKind,
}

/// Body of the `{"error": {...}}` object npm prints when `--json` fails
#[derive(Debug, Deserialize)]
struct NpmErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    detail: String,
}

/// Scan the project for outdated dependencies
pub fn scan<R: PackageManagerRunner + ?Sized>(
    runner: &R,
) -> Result<Vec<IdentifiedDependency>, AppError> {
    let output = execute(runner, &NpmCommand::outdated())?;
    let dependencies = parse_outdated(&output.stdout)?;
    tracing::debug!(count = dependencies.len(), "parsed outdated dependencies");
    Ok(assign_ids(dependencies))
}

/// Parse `npm outdated --json --long` output into records
///
/// Empty output means nothing is outdated. Every entry must name a latest
/// version.
pub fn parse_outdated(raw: &str) -> Result<Vec<OutdatedDependency>, ScanError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value =
        serde_json::from_str(raw).map_err(|e| ScanError::invalid_output(e.to_string()))?;
    if let Some(err) = reported_error(&value) {
        return Err(err);
    }

    let entries: BTreeMap<String, NpmOutdatedEntry> =
        serde_json::from_value(value).map_err(|e| ScanError::invalid_output(e.to_string()))?;

    entries
        .into_iter()
        .map(|(name, entry)| {
            if entry.latest.trim().is_empty() {
                return Err(ScanError::invalid_output(format!(
                    "'{}' has no latest version",
                    name
                )));
            }
            Ok(OutdatedDependency::new(
                name,
                entry.current,
                entry.wanted,
                entry.latest,
                entry.location,
                entry.kind,
            ))
        })
        .collect()
}

/// npm's own failure object, as opposed to an outdated package named `error`
fn reported_error(value: &Value) -> Option<ScanError> {
    let body = value.get("error")?;
    if body.get("latest").is_some() || (body.get("code").is_none() && body.get("summary").is_none())
    {
        return None;
    }
    let body: NpmErrorBody = serde_json::from_value(body.clone()).ok()?;
    Some(ScanError::reported(body.code, body.summary, body.detail))
}

/// Sort records by name and number them from zero
pub fn assign_ids(mut dependencies: Vec<OutdatedDependency>) -> Vec<IdentifiedDependency> {
    dependencies.sort_by(|a, b| a.name.cmp(&b.name));
    dependencies
        .into_iter()
        .enumerate()
        .map(|(id, dependency)| IdentifiedDependency::new(id, dependency))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandError;
    use crate::package_manager::CommandOutput;

    const LODASH: &str = r#"{"lodash":{"current":"4.0.0","wanted":"4.1.0","latest":"5.0.0","location":"node_modules/lodash","type":"dependencies"}}"#;

    struct FixedRunner(CommandOutput);

    impl PackageManagerRunner for FixedRunner {
        fn program(&self) -> &str {
            "npm"
        }

        fn run(&self, command: &NpmCommand) -> Result<CommandOutput, CommandError> {
            assert_eq!(command, &NpmCommand::outdated());
            Ok(self.0.clone())
        }
    }

    fn dep(name: &str) -> OutdatedDependency {
        OutdatedDependency::new(name, "1.0.0", "1.0.1", "2.0.0", "", DependencyKind::Production)
    }

    #[test]
    fn test_parse_single_entry() {
        let deps = parse_outdated(LODASH).unwrap();
        assert_eq!(
            deps,
            vec![OutdatedDependency::new(
                "lodash",
                "4.0.0",
                "4.1.0",
                "5.0.0",
                "node_modules/lodash",
                DependencyKind::Production,
            )]
        );
    }

    #[test]
    fn test_parse_missing_fields_default_to_empty() {
        let raw = r#"{"left-pad":{"wanted":"1.3.0","latest":"1.3.0","type":"devDependencies"}}"#;
        let deps = parse_outdated(raw).unwrap();
        assert_eq!(deps[0].current, "");
        assert_eq!(deps[0].location, "");
        assert_eq!(deps[0].kind, DependencyKind::Development);
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let raw = r#"{"a":{"current":"1.0.0","wanted":"1.0.0","latest":"2.0.0","location":"node_modules/a","type":"dependencies","homepage":"https://example.com","dependent":"app"}}"#;
        let deps = parse_outdated(raw).unwrap();
        assert_eq!(deps.len(), 1);
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_outdated("").unwrap().is_empty());
        assert!(parse_outdated("  \n").unwrap().is_empty());
        assert!(parse_outdated("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_output() {
        assert!(parse_outdated("npm ERR! code ENOENT").is_err());
        assert!(parse_outdated("[1, 2]").is_err());
        assert!(parse_outdated(r#"{"a": "not an object"}"#).is_err());
    }

    #[test]
    fn test_parse_npm_error_object() {
        let raw = r#"{"error":{"code":"ENOLOCK","summary":"This command requires an existing lockfile.","detail":"Try creating one first with: npm i --package-lock-only"}}"#;
        let err = parse_outdated(raw).unwrap_err();
        match err {
            ScanError::Reported {
                code,
                summary,
                detail,
            } => {
                assert_eq!(code, "ENOLOCK");
                assert_eq!(summary, "This command requires an existing lockfile.");
                assert!(detail.contains("--package-lock-only"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_package_named_error() {
        let raw = r#"{"error":{"current":"1.0.0","wanted":"1.0.0","latest":"2.0.0","location":"node_modules/error","type":"dependencies"}}"#;
        let deps = parse_outdated(raw).unwrap();
        assert_eq!(deps[0].name, "error");
        assert_eq!(deps[0].latest, "2.0.0");
    }

    #[test]
    fn test_parse_entry_without_latest() {
        let missing = r#"{"a":{"current":"1.0.0","wanted":"1.0.0","type":"dependencies"}}"#;
        assert!(matches!(
            parse_outdated(missing),
            Err(ScanError::InvalidOutput { .. })
        ));

        let empty = r#"{"a":{"current":"1.0.0","wanted":"1.0.0","latest":"","type":"dependencies"}}"#;
        let err = parse_outdated(empty).unwrap_err();
        assert!(err.to_string().contains("'a' has no latest version"));
    }

    #[test]
    fn test_assign_ids_sorted_by_name() {
        let identified = assign_ids(vec![dep("zod"), dep("axios"), dep("react"), dep("lodash")]);
        let names: Vec<_> = identified.iter().map(|d| d.name.as_str()).collect();
        let ids: Vec<_> = identified.iter().map(|d| d.id).collect();
        assert_eq!(names, vec!["axios", "lodash", "react", "zod"]);
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_assign_ids_independent_of_input_order() {
        let forward = assign_ids(vec![dep("a"), dep("b"), dep("c")]);
        let backward = assign_ids(vec![dep("c"), dep("b"), dep("a")]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_assign_ids_scoped_packages() {
        let identified = assign_ids(vec![dep("react"), dep("@types/node"), dep("@babel/core")]);
        let names: Vec<_> = identified.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["@babel/core", "@types/node", "react"]);
    }

    #[test]
    fn test_assign_ids_empty() {
        assert!(assign_ids(Vec::new()).is_empty());
    }

    #[test]
    fn test_scan_non_zero_exit_with_data() {
        let runner = FixedRunner(CommandOutput::failure(1, LODASH, ""));
        let snapshot = scan(&runner).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, 0);
        assert_eq!(snapshot[0].name, "lodash");
        assert_eq!(snapshot[0].latest, "5.0.0");
    }

    #[test]
    fn test_scan_success_without_output() {
        let runner = FixedRunner(CommandOutput::success(""));
        assert!(scan(&runner).unwrap().is_empty());
    }

    #[test]
    fn test_scan_failure_without_output() {
        let runner = FixedRunner(CommandOutput::failure(1, "", "npm ERR! enoent"));
        let err = scan(&runner).unwrap_err();
        assert!(matches!(err, AppError::Command(CommandError::Failed { .. })));
        assert_eq!(err.diagnostic(), Some("npm ERR! enoent"));
    }

    #[test]
    fn test_scan_npm_error_object_is_fatal() {
        let runner = FixedRunner(CommandOutput::failure(
            1,
            r#"{"error":{"code":"ENOLOCK","summary":"This command requires an existing lockfile.","detail":"Try creating one first with: npm i --package-lock-only"}}"#,
            "",
        ));
        let err = scan(&runner).unwrap_err();
        assert!(matches!(err, AppError::Scan(ScanError::Reported { .. })));
        assert!(err.to_string().contains("ENOLOCK"));
        assert!(err.diagnostic().unwrap().contains("--package-lock-only"));
    }

    #[test]
    fn test_scan_malformed_output() {
        let runner = FixedRunner(CommandOutput::failure(1, "not json", ""));
        let err = scan(&runner).unwrap_err();
        assert!(matches!(err, AppError::Scan(_)));
    }
}
