//! modboard-core - Core library for modboard
//!
//! Tracks legacy web pattern usage for a session and derives modernization
//! progress, recommendations and a migration timeline from it.

pub mod catalog;
pub mod config;
pub mod detector;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod export;
pub mod metrics;
pub mod recommendations;
pub mod timeline;

pub use catalog::{Alternative, BaselineStatus, FeatureCatalog, FeatureInfo};
pub use config::DashboardConfig;
pub use dispatch::{shared_tracker, Command, CommandKind, Dispatcher, Reply, SharedTracker};
pub use error::CoreError;
pub use event::{EventBus, MetricsEvent};
pub use export::{parse_snapshot, Snapshot, SNAPSHOT_SCHEMA};
pub use metrics::{MetricsTracker, SessionMetrics, SessionStats};
pub use recommendations::{derive_recommendations, Recommendation};
pub use timeline::{derive_timeline, PhaseStatus, TimelinePhase};
