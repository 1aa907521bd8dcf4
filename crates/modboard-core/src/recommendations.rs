//! Recommendation generation
//!
//! Rule-based advice derived from a metrics snapshot. Rules run in a fixed
//! order and the list is rebuilt on every call:
//! 1. Fix rate < 50% with open issues → priority
//! 2. Rounded issues per file > 2 → warning
//! 3. Any pattern usage recorded → info on the most used pattern
//! 4. Always → adoption suggestion
//! 5. Always → browser support summary

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::FeatureCatalog;
use crate::metrics::SessionMetrics;

/// Fix rate (percent) under which fixing is flagged as the priority
pub const LOW_FIX_RATE_PCT: u64 = 50;

/// Rounded issues-per-file above which density is flagged
pub const HIGH_ISSUE_DENSITY: u64 = 2;

/// Support figures shown in the browser support summary (illustrative)
pub const BROWSER_SUPPORT_SUMMARY: [(&str, u8); 4] =
    [("Chrome", 95), ("Firefox", 92), ("Safari", 89), ("Edge", 94)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Priority,
    Warning,
    Suggestion,
    Info,
}

impl RecommendationKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::Warning => "warning",
            Self::Suggestion => "suggestion",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub action: String,
    pub actionable: bool,
    pub impact: Impact,
}

/// Derive the ordered recommendation list for a snapshot
pub fn derive_recommendations(
    metrics: &SessionMetrics,
    catalog: &FeatureCatalog,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    // 1. Low fix rate
    if metrics.issues_found > 0 {
        let fix_rate = metrics.fix_rate();
        if fix_rate < LOW_FIX_RATE_PCT {
            recommendations.push(Recommendation {
                id: "fix-issues".to_string(),
                kind: RecommendationKind::Priority,
                title: "Address Legacy Patterns".to_string(),
                description: format!(
                    "You have {} legacy patterns found with only {}% fixed. Focus on applying modern alternatives.",
                    metrics.issues_found, fix_rate
                ),
                action: "Apply quick fixes for the most common patterns".to_string(),
                actionable: true,
                impact: Impact::High,
            });
        }
    }

    // 2. Issue density
    if metrics.files_analyzed > 0 {
        let density = metrics.rounded_issue_density();
        if density > HIGH_ISSUE_DENSITY {
            recommendations.push(Recommendation {
                id: "high-issue-density".to_string(),
                kind: RecommendationKind::Warning,
                title: "High Legacy Pattern Density".to_string(),
                description: format!(
                    "Average of {} legacy patterns per file. Consider a systematic modernization approach.",
                    density
                ),
                action: "Review the modernization timeline and plan a phased migration".to_string(),
                actionable: true,
                impact: Impact::Medium,
            });
        }
    }

    // 3. Most used pattern
    if let Some(top) = metrics.most_used_features(1).first() {
        let display_name = catalog
            .exact_alternatives(&top.feature)
            .and_then(|alts| alts.first())
            .map(|alt| format!("{} (replace with {})", top.feature, alt.name))
            .unwrap_or_else(|| top.feature.clone());

        recommendations.push(Recommendation {
            id: "focus-feature".to_string(),
            kind: RecommendationKind::Info,
            title: "Focus on Most Common Pattern".to_string(),
            description: format!(
                "'{}' appears {} times. Modernizing it gives the largest improvement.",
                display_name, top.count
            ),
            action: format!("Search the codebase for '{}' and replace it", top.feature),
            actionable: true,
            impact: Impact::Medium,
        });
    }

    // 4. Adoption
    recommendations.push(Recommendation {
        id: "adopt-baseline".to_string(),
        kind: RecommendationKind::Suggestion,
        title: "Adopt Widely Available Features".to_string(),
        description: "Prefer features that are widely available across browsers when writing new code. They need no polyfills or fallbacks.".to_string(),
        action: "Check the feature catalog before introducing new APIs".to_string(),
        actionable: false,
        impact: Impact::Low,
    });

    // 5. Browser support summary
    let support = BROWSER_SUPPORT_SUMMARY
        .iter()
        .map(|(browser, pct)| format!("{} {}%", browser, pct))
        .collect::<Vec<_>>()
        .join(", ");
    recommendations.push(Recommendation {
        id: "browser-support".to_string(),
        kind: RecommendationKind::Info,
        title: "Browser Compatibility".to_string(),
        description: format!("Modern feature support across browsers: {}.", support),
        action: "Use feature detection for newly available features".to_string(),
        actionable: false,
        impact: Impact::Low,
    });

    recommendations
}

/// First recommendation in display order
pub fn top_recommendation(recommendations: &[Recommendation]) -> Option<&Recommendation> {
    recommendations.first()
}
