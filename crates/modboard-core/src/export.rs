//! Export of session metrics: JSON snapshot and Markdown report
//!
//! The snapshot is meant for archival and inspection. It can be parsed back
//! for display but is never loaded into a tracker.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::path::Path;
use tracing::info;

use crate::catalog::FeatureCatalog;
use crate::error::CoreError;
use crate::metrics::{MetricsTracker, SessionMetrics, SessionStats};
use crate::recommendations::derive_recommendations;
use crate::timeline::derive_timeline;

/// Schema marker written into every snapshot
pub const SNAPSHOT_SCHEMA: &str = "modboard.snapshot.v1";

/// Exported session document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub schema: String,
    pub exported_at: DateTime<Utc>,
    pub metrics: SessionMetrics,
    pub session_stats: SessionStats,
}

impl Snapshot {
    pub fn capture(tracker: &MetricsTracker) -> Self {
        Self {
            schema: SNAPSHOT_SCHEMA.to_string(),
            exported_at: tracker.now(),
            metrics: tracker.metrics(),
            session_stats: tracker.session_stats(),
        }
    }
}

impl MetricsTracker {
    /// Serialize the full state, session stats and export time as pretty JSON
    pub fn export_snapshot(&self) -> Result<String> {
        serde_json::to_string_pretty(&Snapshot::capture(self))
            .context("Failed to serialize metrics snapshot")
    }
}

/// Read a snapshot back, checking the schema marker
pub fn parse_snapshot(content: &str) -> Result<Snapshot, CoreError> {
    let snapshot: Snapshot =
        serde_json::from_str(content).map_err(|e| CoreError::SnapshotParse {
            message: e.to_string(),
            source: Some(e),
        })?;

    if snapshot.schema != SNAPSHOT_SCHEMA {
        return Err(CoreError::SnapshotParse {
            message: format!(
                "unsupported schema '{}' (expected '{}')",
                snapshot.schema, SNAPSHOT_SCHEMA
            ),
            source: None,
        });
    }

    Ok(snapshot)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), CoreError> {
    std::fs::write(path, contents).map_err(|source| CoreError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the JSON snapshot to a file, creating parent directories
pub fn export_snapshot_to_file(tracker: &MetricsTracker, path: &Path) -> Result<()> {
    ensure_parent(path)?;

    let json = tracker.export_snapshot()?;
    write_file(path, json.as_bytes())?;

    info!(path = %path.display(), "Snapshot exported");
    Ok(())
}

// ============================================================================
// Markdown Report
// ============================================================================

/// Render the human-readable session report
///
/// Sections: summary, most used patterns (with alternatives), recommendations,
/// timeline, recent analyses.
pub fn render_report_markdown(
    tracker: &MetricsTracker,
    catalog: &FeatureCatalog,
    top_limit: usize,
    history_limit: usize,
) -> String {
    let mut out = String::new();
    // fmt::Write for String is infallible
    if write_report_markdown(&mut out, tracker, catalog, top_limit, history_limit).is_err() {
        out.clear();
    }
    out
}

/// Write the session report into any `fmt::Write` sink
pub fn write_report_markdown<W: fmt::Write>(
    out: &mut W,
    tracker: &MetricsTracker,
    catalog: &FeatureCatalog,
    top_limit: usize,
    history_limit: usize,
) -> fmt::Result {
    let metrics = tracker.metrics();
    let stats = tracker.session_stats();

    writeln!(out, "# Modernization Report")?;
    writeln!(out)?;
    writeln!(out, "**Generated**: {}", tracker.now().to_rfc3339())?;
    writeln!(
        out,
        "**Session Start**: {}",
        metrics.session_start_timestamp.to_rfc3339()
    )?;
    writeln!(out)?;

    writeln!(out, "## Summary")?;
    writeln!(out)?;
    writeln!(out, "| Metric | Value |")?;
    writeln!(out, "|--------|-------|")?;
    writeln!(out, "| Files Analyzed | {} |", stats.files_analyzed)?;
    writeln!(out, "| Legacy Patterns Found | {} |", stats.issues_found)?;
    writeln!(out, "| Fixes Applied | {} |", stats.fixes_applied)?;
    writeln!(
        out,
        "| Modernization Progress | {}% |",
        metrics.modernization_progress
    )?;
    writeln!(
        out,
        "| Avg Patterns per File | {:.1} |",
        stats.average_issues_per_file
    )?;
    writeln!(out, "| Session Duration | {} min |", stats.duration_minutes)?;
    writeln!(out)?;

    let top = metrics.most_used_features(top_limit);
    if !top.is_empty() {
        writeln!(out, "## Most Used Legacy Patterns")?;
        writeln!(out)?;
        writeln!(out, "| Pattern | Count | Modern Alternative |")?;
        writeln!(out, "|---------|-------|--------------------|")?;
        for entry in &top {
            let alternatives = catalog
                .alternatives_for(&entry.feature)
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let alternatives = if alternatives.is_empty() {
                "-".to_string()
            } else {
                alternatives
            };
            writeln!(
                out,
                "| {} | {} | {} |",
                entry.feature, entry.count, alternatives
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "## Recommendations")?;
    writeln!(out)?;
    for rec in derive_recommendations(&metrics, catalog) {
        writeln!(
            out,
            "- **[{}] {}** ({} impact): {}",
            rec.kind.label(),
            rec.title,
            rec.impact,
            rec.description
        )?;
        if rec.actionable {
            writeln!(out, "  - Action: {}", rec.action)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "## Timeline")?;
    writeln!(out)?;
    writeln!(out, "| Phase | Status | Progress | Duration | Priority |")?;
    writeln!(out, "|-------|--------|----------|----------|----------|")?;
    for phase in derive_timeline(&metrics) {
        writeln!(
            out,
            "| {} | {} | {}% | {} | {} |",
            phase.phase,
            phase.status.label(),
            phase.progress,
            phase.duration,
            phase.priority
        )?;
    }
    writeln!(out)?;

    let history = tracker.analysis_history();
    if !history.is_empty() {
        writeln!(out, "## Recent Analyses")?;
        writeln!(out)?;
        writeln!(out, "| Time | File | Language | Patterns |")?;
        writeln!(out, "|------|------|----------|----------|")?;
        for event in history.iter().take(history_limit) {
            writeln!(
                out,
                "| {} | {} | {} | {} |",
                event.timestamp.format("%Y-%m-%d %H:%M:%S"),
                event.file_name,
                event.language,
                event.issues_count
            )?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Write the Markdown report to a file, creating parent directories
pub fn export_report_to_markdown(
    tracker: &MetricsTracker,
    catalog: &FeatureCatalog,
    top_limit: usize,
    history_limit: usize,
    path: &Path,
) -> Result<()> {
    ensure_parent(path)?;

    let mut report = String::new();
    write_report_markdown(&mut report, tracker, catalog, top_limit, history_limit)
        .context("Failed to render Markdown report")?;
    write_file(path, report.as_bytes())?;

    info!(path = %path.display(), "Report exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::tests::FixedClock;
    use tempfile::TempDir;

    fn sample_tracker() -> MetricsTracker {
        let mut tracker = MetricsTracker::with_clock(FixedClock::new());
        tracker.record_analysis("src/app.js", 4, "javascript");
        tracker.record_analysis("src/site.css", 2, "css");
        tracker.record_feature_usage("var", 3);
        tracker.record_feature_usage("float-layout", 2);
        tracker.record_fix("var", Some("src/app.js"));
        tracker
    }

    #[test]
    fn test_snapshot_round_trip_counters() {
        let tracker = sample_tracker();
        let json = tracker.export_snapshot().unwrap();
        let snapshot = parse_snapshot(&json).unwrap();

        assert_eq!(snapshot.schema, SNAPSHOT_SCHEMA);
        assert_eq!(snapshot.metrics, tracker.metrics());
        assert_eq!(snapshot.session_stats, tracker.session_stats());
        assert_eq!(snapshot.metrics.files_analyzed, 2);
        assert_eq!(snapshot.metrics.issues_found, 6);
        assert_eq!(snapshot.metrics.fixes_applied, 1);
    }

    #[test]
    fn test_snapshot_uses_camel_case_fields() {
        let tracker = sample_tracker();
        let value: serde_json::Value =
            serde_json::from_str(&tracker.export_snapshot().unwrap()).unwrap();

        assert_eq!(value["schema"], SNAPSHOT_SCHEMA);
        assert_eq!(value["metrics"]["filesAnalyzed"], 2);
        assert_eq!(value["metrics"]["modernizationProgress"], 17);
        assert_eq!(value["sessionStats"]["averageIssuesPerFile"], 3.0);
        assert!(value["exportedAt"].is_string());
    }

    #[test]
    fn test_parse_snapshot_rejects_other_schema() {
        let tracker = sample_tracker();
        let json = tracker
            .export_snapshot()
            .unwrap()
            .replace(SNAPSHOT_SCHEMA, "other.v9");

        let result = parse_snapshot(&json);
        assert!(matches!(result, Err(CoreError::SnapshotParse { source: None, .. })));
    }

    #[test]
    fn test_parse_snapshot_rejects_garbage() {
        let result = parse_snapshot("{ not json");
        assert!(matches!(
            result,
            Err(CoreError::SnapshotParse {
                source: Some(_),
                ..
            })
        ));
    }

    #[test]
    fn test_export_snapshot_creates_nested_dirs() {
        let tracker = sample_tracker();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("exports/nested/snapshot.json");

        export_snapshot_to_file(&tracker, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(parse_snapshot(&content).unwrap().metrics.files_analyzed, 2);
    }

    #[test]
    fn test_render_report_sections() {
        let tracker = sample_tracker();
        let report = render_report_markdown(&tracker, FeatureCatalog::builtin(), 10, 20);

        assert!(report.starts_with("# Modernization Report"));
        assert!(report.contains("| Files Analyzed | 2 |"));
        assert!(report.contains("| Modernization Progress | 17% |"));
        assert!(report.contains("| var | 3 | let and const |"));
        assert!(report.contains("| float-layout | 2 | Flexbox, CSS Grid |"));
        assert!(report.contains("[priority] Address Legacy Patterns"));
        assert!(report.contains("| Implementation | in-progress | 17% |"));
        assert!(report.contains("| site.css | css | 2 |"));
    }

    #[test]
    fn test_render_report_empty_session() {
        let tracker = MetricsTracker::with_clock(FixedClock::new());
        let report = render_report_markdown(&tracker, FeatureCatalog::builtin(), 10, 20);

        assert!(!report.contains("## Most Used Legacy Patterns"));
        assert!(!report.contains("## Recent Analyses"));
        assert!(report.contains("## Timeline"));
    }

    #[test]
    fn test_export_into_directory_is_file_write_error() {
        let tracker = sample_tracker();
        let temp_dir = TempDir::new().unwrap();

        let err = export_snapshot_to_file(&tracker, temp_dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::FileWrite { .. })
        ));
    }

    struct RejectingWriter;

    impl fmt::Write for RejectingWriter {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_write_report_propagates_writer_error() {
        let tracker = sample_tracker();
        let result = write_report_markdown(
            &mut RejectingWriter,
            &tracker,
            FeatureCatalog::builtin(),
            10,
            20,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_export_report_writes_file() {
        let tracker = sample_tracker();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.md");

        export_report_to_markdown(&tracker, FeatureCatalog::builtin(), 10, 20, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("## Recommendations"));
    }
}
