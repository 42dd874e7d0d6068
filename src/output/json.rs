//! JSON output formatter for machine processing
//!
//! A check prints the same records that are written to the snapshot file.
//! An update prints a single report object once every id is processed.

use crate::domain::IdentifiedDependency;
use crate::output::OutputFormatter;
use crate::updater::UpdateReport;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of an update run
#[derive(Serialize)]
struct JsonUpdateReport<'a> {
    /// Dependencies that were replaced, in processing order
    updated: Vec<JsonUpdated<'a>>,
    /// Requested ids missing from the snapshot
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unknown_ids: Vec<usize>,
}

/// JSON representation of a replaced dependency
#[derive(Serialize)]
struct JsonUpdated<'a> {
    id: usize,
    name: &'a str,
    from: &'a str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
}

fn write_json<T: Serialize>(value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)
}

impl OutputFormatter for JsonFormatter {
    fn format_check(
        &self,
        dependencies: &[IdentifiedDependency],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        write_json(&dependencies, writer)
    }

    fn format_update_started(
        &self,
        _dependency: &IdentifiedDependency,
        _writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        Ok(())
    }

    fn format_update_finished(
        &self,
        _dependency: &IdentifiedDependency,
        _writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        Ok(())
    }

    fn format_unknown_id(
        &self,
        _id: usize,
        _snapshot_len: usize,
        _writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        Ok(())
    }

    fn format_rollback(
        &self,
        _dependency: &IdentifiedDependency,
        _restored: bool,
        _writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        Ok(())
    }

    fn format_update_report(
        &self,
        report: &UpdateReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = JsonUpdateReport {
            updated: report
                .updated()
                .map(|dependency| JsonUpdated {
                    id: dependency.id,
                    name: &dependency.name,
                    from: &dependency.current,
                    to: &dependency.latest,
                    kind: dependency.kind.as_str(),
                })
                .collect(),
            unknown_ids: report.unknown_ids(),
        };
        write_json(&output, writer)
    }
}
