//! Five-phase modernization timeline derived from session counters

use serde::{Deserialize, Serialize};

use crate::metrics::SessionMetrics;

/// Fix rate from which the testing phase starts
pub const TESTING_START_PCT: u64 = 80;

/// Progress shown for the testing phase once it has started
pub const TESTING_IN_PROGRESS: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseStatus {
    Pending,
    InProgress,
    Completed,
    Ready,
}

impl PhaseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Ready => "ready",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Pending => "○",
            Self::InProgress => "◐",
            Self::Completed => "●",
            Self::Ready => "✓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePhase {
    pub phase: String,
    pub status: PhaseStatus,
    /// Percent in `[0, 100]`
    pub progress: u8,
    pub description: String,
    pub duration: String,
    pub priority: String,
    pub tasks: Vec<String>,
}

struct PhaseTemplate {
    name: &'static str,
    duration: &'static str,
    priority: &'static str,
    tasks: &'static [&'static str],
}

const PHASES: [PhaseTemplate; 5] = [
    PhaseTemplate {
        name: "Assessment",
        duration: "1-2 weeks",
        priority: "High",
        tasks: &[
            "Scan the codebase for legacy patterns",
            "Identify browser support requirements",
            "Catalog pattern usage per file",
        ],
    },
    PhaseTemplate {
        name: "Planning",
        duration: "1 week",
        priority: "High",
        tasks: &[
            "Prioritize patterns by frequency and impact",
            "Choose modern alternatives",
            "Define a migration order",
        ],
    },
    PhaseTemplate {
        name: "Implementation",
        duration: "2-4 weeks",
        priority: "Medium",
        tasks: &[
            "Apply fixes for high-impact patterns",
            "Replace deprecated APIs",
            "Update build tooling where needed",
        ],
    },
    PhaseTemplate {
        name: "Testing",
        duration: "1-2 weeks",
        priority: "Medium",
        tasks: &[
            "Cross-browser testing",
            "Performance comparison",
            "Regression checks",
        ],
    },
    PhaseTemplate {
        name: "Deployment",
        duration: "1 week",
        priority: "Low",
        tasks: &[
            "Staged rollout",
            "Monitor errors and performance",
            "Document the modernized patterns",
        ],
    },
];

/// Build the timeline for a snapshot; phase order never changes
pub fn derive_timeline(metrics: &SessionMetrics) -> [TimelinePhase; 5] {
    let completion_rate = metrics.fix_rate();
    let completion_pct = completion_rate.min(100) as u8;

    let assessment = if metrics.files_analyzed > 0 {
        (PhaseStatus::Completed, 100)
    } else {
        (PhaseStatus::Pending, 0)
    };

    let planning = if metrics.issues_found > 0 {
        (PhaseStatus::Completed, 100)
    } else {
        (PhaseStatus::Pending, 0)
    };

    let implementation = if completion_rate >= 100 {
        (PhaseStatus::Completed, completion_pct)
    } else if completion_rate > 0 {
        (PhaseStatus::InProgress, completion_pct)
    } else {
        (PhaseStatus::Pending, 0)
    };

    let testing = if completion_rate >= TESTING_START_PCT {
        (PhaseStatus::InProgress, TESTING_IN_PROGRESS)
    } else {
        (PhaseStatus::Pending, 0)
    };

    let deployment = if completion_rate >= 100 {
        (PhaseStatus::Ready, 100)
    } else {
        (PhaseStatus::Pending, 0)
    };

    let descriptions = [
        format!(
            "Analyzed {} files and found {} legacy patterns",
            metrics.files_analyzed, metrics.issues_found
        ),
        format!(
            "Identified {} patterns to modernize across {} files",
            metrics.issues_found, metrics.files_analyzed
        ),
        format!(
            "Applied {} of {} fixes ({}% complete)",
            metrics.fixes_applied, metrics.issues_found, completion_rate
        ),
        format!(
            "Verify {} applied fixes across target browsers ({}% of patterns fixed)",
            metrics.fixes_applied, completion_rate
        ),
        format!(
            "Ship modernized code: {} files, {} fixes, {}% complete",
            metrics.files_analyzed, metrics.fixes_applied, completion_rate
        ),
    ];

    let states = [assessment, planning, implementation, testing, deployment];

    std::array::from_fn(|i| {
        let template = &PHASES[i];
        let (status, progress) = states[i];
        TimelinePhase {
            phase: template.name.to_string(),
            status,
            progress,
            description: descriptions[i].clone(),
            duration: template.duration.to_string(),
            priority: template.priority.to_string(),
            tasks: template.tasks.iter().map(|t| t.to_string()).collect(),
        }
    })
}
