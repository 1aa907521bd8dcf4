//! Session metrics store
//!
//! `MetricsTracker` is the single mutable aggregate of a session. It is
//! owned explicitly by whoever drives the session (see `dispatch`) and only
//! changes through the `record_*` operations and `reset`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Default number of entries returned by `most_used_features`
pub const DEFAULT_TOP_FEATURES: usize = 10;

/// Source of "now" for timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// One recorded file analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisEvent {
    pub timestamp: DateTime<Utc>,
    /// Base name of the analyzed file
    pub file_name: String,
    pub issues_count: u64,
    pub language: String,
}

/// One recorded fix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixEvent {
    pub timestamp: DateTime<Utc>,
    pub feature_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Occurrence count for a legacy pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCount {
    pub feature: String,
    pub count: u64,
}

/// Full state of a session
///
/// Values of this type handed out by the tracker are copies; mutating them
/// has no effect on the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetrics {
    pub files_analyzed: u64,
    pub issues_found: u64,
    pub fixes_applied: u64,
    /// Pattern counts in first-recorded order
    pub feature_usage: Vec<FeatureCount>,
    /// Derived, always in `[0, 100]`
    pub modernization_progress: u8,
    #[serde(default)]
    pub last_analysis_timestamp: Option<DateTime<Utc>>,
    pub session_start_timestamp: DateTime<Utc>,
    pub analysis_history: Vec<AnalysisEvent>,
    pub fix_history: Vec<FixEvent>,
}

impl SessionMetrics {
    fn empty(start: DateTime<Utc>) -> Self {
        Self {
            files_analyzed: 0,
            issues_found: 0,
            fixes_applied: 0,
            feature_usage: Vec::new(),
            modernization_progress: 0,
            last_analysis_timestamp: None,
            session_start_timestamp: start,
            analysis_history: Vec::new(),
            fix_history: Vec::new(),
        }
    }

    /// Count recorded for a pattern (0 when never seen)
    pub fn usage_of(&self, feature_id: &str) -> u64 {
        self.feature_usage
            .iter()
            .find(|f| f.feature == feature_id)
            .map(|f| f.count)
            .unwrap_or(0)
    }

    /// `round(fixes / issues * 100)`, 0 when no issues were found
    ///
    /// Not clamped: more fixes than issues yields values above 100.
    pub fn fix_rate(&self) -> u64 {
        if self.issues_found == 0 {
            return 0;
        }
        (self.fixes_applied as f64 / self.issues_found as f64 * 100.0).round() as u64
    }

    /// `round(issues / files)`, 0 when no files were analyzed
    pub fn rounded_issue_density(&self) -> u64 {
        if self.files_analyzed == 0 {
            return 0;
        }
        (self.issues_found as f64 / self.files_analyzed as f64).round() as u64
    }

    /// Top `limit` patterns by count, descending; ties keep first-recorded order
    pub fn most_used_features(&self, limit: usize) -> Vec<FeatureCount> {
        let mut sorted = self.feature_usage.clone();
        // sort_by is stable
        sorted.sort_by(|a, b| b.count.cmp(&a.count));
        sorted.truncate(limit);
        sorted
    }
}

/// Modernization progress from the three counters
pub fn compute_progress(files_analyzed: u64, issues_found: u64, fixes_applied: u64) -> u8 {
    if files_analyzed == 0 {
        return 0;
    }
    if issues_found == 0 {
        return 100;
    }
    let pct = (fixes_applied as f64 / issues_found as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Summary numbers for the current session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub duration_minutes: i64,
    pub files_analyzed: u64,
    pub issues_found: u64,
    pub fixes_applied: u64,
    /// Rounded to one decimal
    pub average_issues_per_file: f64,
}

/// In-memory metrics store for one session
pub struct MetricsTracker {
    state: SessionMetrics,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for MetricsTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsTracker")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsTracker {
    /// Fresh tracker on the wall clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let start = clock.now();
        Self {
            state: SessionMetrics::empty(start),
            clock,
        }
    }

    /// Record one analyzed file and its issue count
    pub fn record_analysis(&mut self, file: &str, issues_count: u64, language: &str) {
        let now = self.clock.now();

        self.state.files_analyzed += 1;
        self.state.issues_found += issues_count;
        self.state.last_analysis_timestamp = Some(now);
        self.state.analysis_history.push(AnalysisEvent {
            timestamp: now,
            file_name: base_name(file),
            issues_count,
            language: language.to_string(),
        });
        self.update_progress();

        debug!(
            file,
            issues_count,
            language,
            progress = self.state.modernization_progress,
            "Analysis recorded"
        );
    }

    /// Record one applied fix for a pattern
    pub fn record_fix(&mut self, feature_id: &str, file: Option<&str>) {
        let now = self.clock.now();

        self.state.fixes_applied += 1;
        self.state.fix_history.push(FixEvent {
            timestamp: now,
            feature_id: feature_id.to_string(),
            file_name: file.map(base_name),
        });
        self.update_progress();

        debug!(
            feature_id,
            fixes_applied = self.state.fixes_applied,
            progress = self.state.modernization_progress,
            "Fix recorded"
        );
    }

    /// Add `count` occurrences of a pattern
    pub fn record_feature_usage(&mut self, feature_id: &str, count: u64) {
        match self
            .state
            .feature_usage
            .iter_mut()
            .find(|f| f.feature == feature_id)
        {
            Some(entry) => entry.count += count,
            None => self.state.feature_usage.push(FeatureCount {
                feature: feature_id.to_string(),
                count,
            }),
        }
    }

    /// Add a single occurrence of a pattern
    pub fn record_feature_use(&mut self, feature_id: &str) {
        self.record_feature_usage(feature_id, 1);
    }

    /// Snapshot of the current state
    pub fn metrics(&self) -> SessionMetrics {
        self.state.clone()
    }

    pub fn most_used_features(&self, limit: usize) -> Vec<FeatureCount> {
        self.state.most_used_features(limit)
    }

    /// Analyses, most recent first
    pub fn analysis_history(&self) -> Vec<AnalysisEvent> {
        self.state.analysis_history.iter().rev().cloned().collect()
    }

    /// Fixes, most recent first
    pub fn fix_history(&self) -> Vec<FixEvent> {
        self.state.fix_history.iter().rev().cloned().collect()
    }

    pub fn session_stats(&self) -> SessionStats {
        let elapsed = self.clock.now() - self.state.session_start_timestamp;
        let duration_minutes = (elapsed.num_milliseconds() as f64 / 60_000.0).round() as i64;

        let average_issues_per_file = if self.state.files_analyzed == 0 {
            0.0
        } else {
            let avg = self.state.issues_found as f64 / self.state.files_analyzed as f64;
            (avg * 10.0).round() / 10.0
        };

        SessionStats {
            duration_minutes,
            files_analyzed: self.state.files_analyzed,
            issues_found: self.state.issues_found,
            fixes_applied: self.state.fixes_applied,
            average_issues_per_file,
        }
    }

    /// Back to the zero state with a new session start
    pub fn reset(&mut self) {
        self.state = SessionMetrics::empty(self.clock.now());
        info!("Session metrics reset");
    }

    /// Current time on the tracker's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn update_progress(&mut self) {
        self.state.modernization_progress = compute_progress(
            self.state.files_analyzed,
            self.state.issues_found,
            self.state.fixes_applied,
        );
    }
}

fn base_name(file: &str) -> String {
    // Accept both separators: identifiers may come from another platform
    let trimmed = file.trim_end_matches(['/', '\\']);
    let name = trimmed
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(trimmed);

    if name.is_empty() {
        return Path::new(file).display().to_string();
    }
    name.to_string()
}
