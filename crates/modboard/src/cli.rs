//! Terminal rendering for dispatcher replies
//!
//! Every reply renders either as a table (human) or as JSON.

use comfy_table::{Cell, Color, ContentArrangement, Table};
use modboard_core::catalog::{Alternative, FeatureInfo};
use modboard_core::dispatch::{FileAnalysis, Reply};
use modboard_core::metrics::{AnalysisEvent, FeatureCount, FixEvent, SessionMetrics, SessionStats};
use modboard_core::recommendations::{Recommendation, RecommendationKind};
use modboard_core::timeline::{PhaseStatus, TimelinePhase};
use serde_json::json;

/// Output options shared by all renderers
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputStyle {
    pub json: bool,
    pub no_color: bool,
}

// ============================================================================
// Reply Rendering
// ============================================================================

pub fn format_reply(reply: &Reply, style: OutputStyle) -> String {
    match reply {
        Reply::Analyzed(files) => format_analyzed(files, style),
        Reply::Recorded(message) => {
            if style.json {
                json!({ "ok": true, "message": message }).to_string()
            } else {
                format!("✓ {}", message)
            }
        }
        Reply::Metrics(metrics) => format_metrics(metrics, style),
        Reply::TopFeatures(features) => format_top_features(features, style),
        Reply::History { analyses, fixes } => format_history(analyses, fixes, style),
        Reply::Stats(stats) => format_stats(stats, style),
        Reply::Recommendations(recs) => format_recommendations(recs, style),
        Reply::Timeline(phases) => format_timeline(phases, style),
        Reply::Feature(feature) => match feature {
            Some(info) => format_features(std::slice::from_ref(info), style),
            None if style.json => "null".to_string(),
            None => "Feature not found.".to_string(),
        },
        Reply::Alternatives {
            pattern,
            alternatives,
        } => format_alternatives(pattern, alternatives, style),
        Reply::Features(features) => format_features(features, style),
        Reply::Exported(path) => {
            if style.json {
                json!({ "ok": true, "path": path }).to_string()
            } else {
                format!("✓ Written to {}", path.display())
            }
        }
        Reply::Help(lines) => lines
            .iter()
            .map(|(usage, about)| format!("  {:<36} {}", usage, about))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

fn new_table(headers: &[&str], no_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }
    table
}

pub fn format_analyzed(files: &[FileAnalysis], style: OutputStyle) -> String {
    if style.json {
        let items: Vec<_> = files
            .iter()
            .map(|f| {
                json!({
                    "path": f.path,
                    "language": f.language,
                    "issues": f.issues,
                    "patterns": f.patterns.iter().map(|(p, c)| json!({ "pattern": p, "count": c })).collect::<Vec<_>>(),
                })
            })
            .collect();
        return to_json(&items);
    }

    if files.is_empty() {
        return "No supported source files found.".to_string();
    }

    let mut table = new_table(&["File", "Language", "Patterns", "Top Pattern"], style.no_color);
    for file in files {
        let top = file
            .patterns
            .iter()
            .max_by_key(|(_, count)| *count)
            .map(|(p, c)| format!("{} ({})", p, c))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            file.path.display().to_string(),
            file.language.to_string(),
            file.issues.to_string(),
            top,
        ]);
    }
    table.to_string()
}

pub fn format_metrics(metrics: &SessionMetrics, style: OutputStyle) -> String {
    if style.json {
        return to_json(metrics);
    }

    let mut lines = vec![];
    lines.push(format!("Files analyzed:   {}", metrics.files_analyzed));
    lines.push(format!("Patterns found:   {}", metrics.issues_found));
    lines.push(format!("Fixes applied:    {}", metrics.fixes_applied));
    lines.push(format!(
        "Progress:         {} {}%",
        progress_bar(metrics.modernization_progress, 20),
        metrics.modernization_progress
    ));
    lines.push(format!(
        "Last analysis:    {}",
        metrics
            .last_analysis_timestamp
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    lines.push(format!(
        "Session start:    {}",
        metrics.session_start_timestamp.format("%Y-%m-%d %H:%M:%S")
    ));
    lines.join("\n")
}

pub fn format_stats(stats: &SessionStats, style: OutputStyle) -> String {
    if style.json {
        return to_json(stats);
    }

    let mut lines = vec![];
    lines.push(format!("Duration:         {} min", stats.duration_minutes));
    lines.push(format!("Files analyzed:   {}", stats.files_analyzed));
    lines.push(format!("Patterns found:   {}", stats.issues_found));
    lines.push(format!("Fixes applied:    {}", stats.fixes_applied));
    lines.push(format!(
        "Avg per file:     {:.1}",
        stats.average_issues_per_file
    ));
    lines.join("\n")
}

pub fn format_top_features(features: &[FeatureCount], style: OutputStyle) -> String {
    if style.json {
        return to_json(features);
    }
    if features.is_empty() {
        return "No legacy patterns recorded.".to_string();
    }

    let mut table = new_table(&["#", "Pattern", "Count"], style.no_color);
    for (rank, entry) in features.iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            entry.feature.clone(),
            entry.count.to_string(),
        ]);
    }
    table.to_string()
}

pub fn format_history(analyses: &[AnalysisEvent], fixes: &[FixEvent], style: OutputStyle) -> String {
    if style.json {
        return to_json(&json!({ "analyses": analyses, "fixes": fixes }));
    }

    let mut out = Vec::new();
    if analyses.is_empty() {
        out.push("No analyses recorded.".to_string());
    } else {
        let mut table = new_table(&["Time", "File", "Language", "Patterns"], style.no_color);
        for event in analyses {
            table.add_row(vec![
                event.timestamp.format("%H:%M:%S").to_string(),
                event.file_name.clone(),
                event.language.clone(),
                event.issues_count.to_string(),
            ]);
        }
        out.push(table.to_string());
    }

    if !fixes.is_empty() {
        let mut table = new_table(&["Time", "Pattern", "File"], style.no_color);
        for fix in fixes {
            table.add_row(vec![
                fix.timestamp.format("%H:%M:%S").to_string(),
                fix.feature_id.clone(),
                fix.file_name.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
        out.push(table.to_string());
    }

    out.join("\n\n")
}

fn kind_color(kind: RecommendationKind) -> Color {
    match kind {
        RecommendationKind::Priority => Color::Red,
        RecommendationKind::Warning => Color::Yellow,
        RecommendationKind::Suggestion => Color::Green,
        RecommendationKind::Info => Color::Blue,
    }
}

pub fn format_recommendations(recs: &[Recommendation], style: OutputStyle) -> String {
    if style.json {
        return to_json(recs);
    }

    let mut table = new_table(&["Type", "Recommendation", "Impact", "Action"], style.no_color);
    for rec in recs {
        let kind = if style.no_color {
            Cell::new(rec.kind.label())
        } else {
            Cell::new(rec.kind.label()).fg(kind_color(rec.kind))
        };
        let action = if rec.actionable { rec.action.as_str() } else { "-" };
        table.add_row(vec![
            kind,
            Cell::new(format!("{}\n{}", rec.title, rec.description)),
            Cell::new(rec.impact.to_string()),
            Cell::new(action),
        ]);
    }
    table.to_string()
}

pub fn format_timeline(phases: &[TimelinePhase], style: OutputStyle) -> String {
    if style.json {
        return to_json(phases);
    }

    let mut table = new_table(
        &["Phase", "Status", "Progress", "Duration", "Priority", "Details"],
        style.no_color,
    );
    for phase in phases {
        let status = format!("{} {}", phase.status.icon(), phase.status.label());
        let status = if style.no_color {
            Cell::new(status)
        } else {
            let color = match phase.status {
                PhaseStatus::Completed | PhaseStatus::Ready => Color::Green,
                PhaseStatus::InProgress => Color::Yellow,
                PhaseStatus::Pending => Color::DarkGrey,
            };
            Cell::new(status).fg(color)
        };
        table.add_row(vec![
            Cell::new(&phase.phase),
            status,
            Cell::new(format!("{}%", phase.progress)),
            Cell::new(&phase.duration),
            Cell::new(&phase.priority),
            Cell::new(&phase.description),
        ]);
    }
    table.to_string()
}

pub fn format_features(features: &[FeatureInfo], style: OutputStyle) -> String {
    if style.json {
        return to_json(features);
    }
    if features.is_empty() {
        return "No matching features.".to_string();
    }

    let mut table = new_table(
        &["Id", "Name", "Category", "Baseline", "Chrome", "Firefox", "Safari", "Edge"],
        style.no_color,
    );
    for f in features {
        table.add_row(vec![
            f.id.clone(),
            f.name.clone(),
            f.category.clone(),
            f.baseline.label().to_string(),
            f.browser_support.chrome.clone(),
            f.browser_support.firefox.clone(),
            f.browser_support.safari.clone(),
            f.browser_support.edge.clone(),
        ]);
    }
    table.to_string()
}

pub fn format_alternatives(pattern: &str, alternatives: &[Alternative], style: OutputStyle) -> String {
    if style.json {
        return to_json(&json!({ "pattern": pattern, "alternatives": alternatives }));
    }
    if alternatives.is_empty() {
        return format!("No modern alternatives known for '{}'.", pattern);
    }

    let mut table = new_table(&["Alternative", "Why", "Example"], style.no_color);
    for alt in alternatives {
        table.add_row(vec![
            alt.name.clone(),
            alt.description.clone(),
            alt.example.clone(),
        ]);
    }
    table.to_string()
}

// ============================================================================
// Utilities
// ============================================================================

fn progress_bar(pct: u8, width: usize) -> String {
    let filled = (pct.min(100) as usize * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use modboard_core::catalog::FeatureCatalog;
    use modboard_core::{derive_recommendations, derive_timeline, MetricsTracker};

    const PLAIN: OutputStyle = OutputStyle {
        json: false,
        no_color: true,
    };
    const JSON: OutputStyle = OutputStyle {
        json: true,
        no_color: true,
    };

    fn tracker() -> MetricsTracker {
        let mut tracker = MetricsTracker::new();
        tracker.record_analysis("src/app.js", 4, "javascript");
        tracker.record_feature_usage("var", 4);
        tracker.record_fix("var", Some("src/app.js"));
        tracker
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10), "[----------]");
        assert_eq!(progress_bar(50, 10), "[#####-----]");
        assert_eq!(progress_bar(100, 10), "[##########]");
    }

    #[test]
    fn test_format_metrics_plain() {
        let output = format_metrics(&tracker().metrics(), PLAIN);
        assert!(output.contains("Files analyzed:   1"));
        assert!(output.contains("25%"));
    }

    #[test]
    fn test_format_metrics_json() {
        let output = format_metrics(&tracker().metrics(), JSON);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["issuesFound"], 4);
    }

    #[test]
    fn test_format_top_features_empty() {
        assert!(format_top_features(&[], PLAIN).contains("No legacy patterns"));
    }

    #[test]
    fn test_format_recommendations_table() {
        let recs = derive_recommendations(&tracker().metrics(), FeatureCatalog::builtin());
        let output = format_recommendations(&recs, PLAIN);
        assert!(output.contains("priority"));
        assert!(output.contains("Address Legacy Patterns"));
    }

    #[test]
    fn test_format_timeline_json_is_array() {
        let phases = derive_timeline(&tracker().metrics());
        let output = format_timeline(&phases, JSON);
        assert!(output.starts_with('['));
        assert!(output.contains("\"in-progress\""));
    }

    #[test]
    fn test_format_missing_feature() {
        assert_eq!(format_reply(&Reply::Feature(None), PLAIN), "Feature not found.");
        assert_eq!(format_reply(&Reply::Feature(None), JSON), "null");
    }

    #[test]
    fn test_format_alternatives_unknown() {
        let output = format_alternatives("zzz", &[], PLAIN);
        assert_eq!(output, "No modern alternatives known for 'zzz'.");
    }

    #[test]
    fn test_format_help_lists_commands() {
        let output = format_reply(&Reply::Help(modboard_core::dispatch::HELP), PLAIN);
        assert!(output.contains("analyze <path>"));
        assert!(output.contains("export <file>"));
    }
}
