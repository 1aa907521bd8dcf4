//! Command dispatch over a shared metrics tracker
//!
//! Front ends (CLI subcommands, the interactive session) turn user input
//! into a `Command` and hand it to a `Dispatcher`. The dispatcher owns the
//! tracker handle and a table from `CommandKind` to handler closures.
//! Commands run to completion one at a time, in the order they arrive.

use anyhow::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::catalog::{Alternative, FeatureCatalog, FeatureInfo};
use crate::config::DashboardConfig;
use crate::detector::{self, Language};
use crate::error::CoreError;
use crate::event::{EventBus, MetricsEvent};
use crate::export;
use crate::metrics::{AnalysisEvent, FeatureCount, FixEvent, MetricsTracker, SessionMetrics, SessionStats};
use crate::recommendations::{derive_recommendations, Recommendation};
use crate::timeline::{derive_timeline, TimelinePhase};

/// Handle to the session's tracker, shared by every consumer
pub type SharedTracker = Arc<RwLock<MetricsTracker>>;

pub fn shared_tracker(tracker: MetricsTracker) -> SharedTracker {
    Arc::new(RwLock::new(tracker))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Analyze,
    RecordAnalysis,
    Fix,
    FeatureUsage,
    Reset,
    Metrics,
    TopFeatures,
    History,
    Stats,
    Recommendations,
    Timeline,
    Lookup,
    Alternatives,
    Search,
    Export,
    Report,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Scan a file or directory and record the results
    Analyze { path: PathBuf },
    /// Record an analysis computed elsewhere
    RecordAnalysis {
        file: String,
        issues: u64,
        language: String,
    },
    Fix {
        feature_id: String,
        file: Option<String>,
    },
    FeatureUsage { feature_id: String, count: u64 },
    Reset,
    Metrics,
    TopFeatures { limit: Option<usize> },
    History,
    Stats,
    Recommendations,
    Timeline,
    Lookup { id: String },
    Alternatives { pattern: String },
    Search { query: String },
    Export { path: PathBuf },
    Report { path: PathBuf },
    Help,
}

/// Usage lines for the session prompt
pub const HELP: &[(&str, &str)] = &[
    ("analyze <path>", "Scan a file or directory for legacy patterns"),
    ("record <file> <issues> [language]", "Record an analysis result"),
    ("fix <pattern> [file]", "Record an applied fix"),
    ("usage <pattern> [count]", "Add pattern occurrences (default 1)"),
    ("reset", "Start a new session"),
    ("metrics", "Show session counters"),
    ("top [limit]", "Most used legacy patterns"),
    ("history", "Recent analyses and fixes"),
    ("stats", "Session statistics"),
    ("recommend", "Derived recommendations"),
    ("timeline", "Modernization timeline"),
    ("lookup <feature>", "Feature details"),
    ("alternatives <pattern>", "Modern alternatives for a pattern"),
    ("search <query>", "Search the feature catalog"),
    ("export <file>", "Write a JSON snapshot"),
    ("report <file>", "Write a Markdown report"),
    ("help", "Show this list"),
];

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Analyze { .. } => CommandKind::Analyze,
            Command::RecordAnalysis { .. } => CommandKind::RecordAnalysis,
            Command::Fix { .. } => CommandKind::Fix,
            Command::FeatureUsage { .. } => CommandKind::FeatureUsage,
            Command::Reset => CommandKind::Reset,
            Command::Metrics => CommandKind::Metrics,
            Command::TopFeatures { .. } => CommandKind::TopFeatures,
            Command::History => CommandKind::History,
            Command::Stats => CommandKind::Stats,
            Command::Recommendations => CommandKind::Recommendations,
            Command::Timeline => CommandKind::Timeline,
            Command::Lookup { .. } => CommandKind::Lookup,
            Command::Alternatives { .. } => CommandKind::Alternatives,
            Command::Search { .. } => CommandKind::Search,
            Command::Export { .. } => CommandKind::Export,
            Command::Report { .. } => CommandKind::Report,
            Command::Help => CommandKind::Help,
        }
    }

    /// Parse one line of session input; `None` for blank lines
    pub fn parse(line: &str) -> Result<Option<Command>, CoreError> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = parts.collect();

        let command = match name.to_lowercase().as_str() {
            "analyze" => Command::Analyze {
                path: PathBuf::from(required(&args, 0, "path")?),
            },
            "record" => {
                let file = required(&args, 0, "file")?.to_string();
                let issues = parse_count(required(&args, 1, "issues")?)?;
                let language = match args.get(2) {
                    Some(lang) => lang.to_string(),
                    None => Language::from_path(std::path::Path::new(&file))
                        .map(|l| l.as_str().to_string())
                        .unwrap_or_else(|| "unknown".to_string()),
                };
                Command::RecordAnalysis {
                    file,
                    issues,
                    language,
                }
            }
            "fix" => Command::Fix {
                feature_id: required(&args, 0, "pattern")?.to_string(),
                file: args.get(1).map(|s| s.to_string()),
            },
            "usage" => Command::FeatureUsage {
                feature_id: required(&args, 0, "pattern")?.to_string(),
                count: match args.get(1) {
                    Some(raw) => parse_count(raw)?,
                    None => 1,
                },
            },
            "reset" => Command::Reset,
            "metrics" => Command::Metrics,
            "top" => Command::TopFeatures {
                limit: match args.first() {
                    Some(raw) => Some(parse_count(raw)? as usize),
                    None => None,
                },
            },
            "history" => Command::History,
            "stats" => Command::Stats,
            "recommend" | "recommendations" => Command::Recommendations,
            "timeline" => Command::Timeline,
            "lookup" => Command::Lookup {
                id: required(&args, 0, "feature")?.to_string(),
            },
            "alternatives" | "alt" => Command::Alternatives {
                pattern: required(&args, 0, "pattern")?.to_string(),
            },
            "search" => {
                if args.is_empty() {
                    return Err(CoreError::invalid_argument("query", "missing value"));
                }
                Command::Search {
                    query: args.join(" "),
                }
            }
            "export" => Command::Export {
                path: PathBuf::from(required(&args, 0, "file")?),
            },
            "report" => Command::Report {
                path: PathBuf::from(required(&args, 0, "file")?),
            },
            "help" | "?" => Command::Help,
            other => {
                return Err(CoreError::UnknownCommand {
                    name: other.to_string(),
                })
            }
        };

        Ok(Some(command))
    }
}

fn required<'a>(args: &[&'a str], index: usize, name: &str) -> Result<&'a str, CoreError> {
    args.get(index)
        .copied()
        .ok_or_else(|| CoreError::invalid_argument(name, "missing value"))
}

/// Parse a user-supplied count; negatives and non-integers are rejected
pub fn parse_count(raw: &str) -> Result<u64, CoreError> {
    if let Ok(signed) = raw.parse::<i64>() {
        if signed < 0 {
            return Err(CoreError::invalid_argument(raw, "count must be non-negative"));
        }
    }
    raw.parse::<u64>()
        .map_err(|_| CoreError::invalid_argument(raw, "count must be an integer"))
}

/// Result of analyzing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub language: Language,
    pub issues: u64,
    pub patterns: Vec<(String, u64)>,
}

/// Typed result of a dispatched command
#[derive(Debug, Clone)]
pub enum Reply {
    Analyzed(Vec<FileAnalysis>),
    Recorded(String),
    Metrics(SessionMetrics),
    TopFeatures(Vec<FeatureCount>),
    History {
        analyses: Vec<AnalysisEvent>,
        fixes: Vec<FixEvent>,
    },
    Stats(SessionStats),
    Recommendations(Vec<Recommendation>),
    Timeline(Vec<TimelinePhase>),
    Feature(Option<FeatureInfo>),
    Alternatives {
        pattern: String,
        alternatives: Vec<Alternative>,
    },
    Features(Vec<FeatureInfo>),
    Exported(PathBuf),
    Help(&'static [(&'static str, &'static str)]),
}

/// State visible to every handler
pub struct DispatchContext {
    pub tracker: SharedTracker,
    pub catalog: &'static FeatureCatalog,
    pub events: EventBus,
    pub config: DashboardConfig,
}

type Handler = Box<dyn Fn(&DispatchContext, Command) -> Result<Reply> + Send + Sync>;

/// Routes commands to handlers over one shared tracker
pub struct Dispatcher {
    context: DispatchContext,
    handlers: HashMap<CommandKind, Handler>,
}

impl Dispatcher {
    pub fn new(
        tracker: SharedTracker,
        catalog: &'static FeatureCatalog,
        config: DashboardConfig,
    ) -> Self {
        let mut dispatcher = Self {
            context: DispatchContext {
                tracker,
                catalog,
                events: EventBus::default_capacity(),
                config,
            },
            handlers: HashMap::new(),
        };
        dispatcher.register_defaults();
        dispatcher
    }

    /// Dispatcher over a fresh tracker and the built-in catalog
    pub fn with_defaults(config: DashboardConfig) -> Self {
        Self::new(
            shared_tracker(MetricsTracker::new()),
            FeatureCatalog::builtin(),
            config,
        )
    }

    pub fn tracker(&self) -> &SharedTracker {
        &self.context.tracker
    }

    pub fn events(&self) -> &EventBus {
        &self.context.events
    }

    pub fn catalog(&self) -> &'static FeatureCatalog {
        self.context.catalog
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.context.config
    }

    /// Replace the handler for a command kind
    pub fn register<F>(&mut self, kind: CommandKind, handler: F)
    where
        F: Fn(&DispatchContext, Command) -> Result<Reply> + Send + Sync + 'static,
    {
        self.handlers.insert(kind, Box::new(handler));
    }

    pub fn dispatch(&self, command: Command) -> Result<Reply> {
        let kind = command.kind();
        let handler = self
            .handlers
            .get(&kind)
            .ok_or_else(|| CoreError::UnknownCommand {
                name: format!("{:?}", kind),
            })?;

        debug!(?kind, "Dispatching command");
        handler(&self.context, command)
    }

    fn register_defaults(&mut self) {
        self.register(CommandKind::Analyze, |ctx, cmd| {
            let Command::Analyze { path } = cmd else {
                return Err(mismatch(CommandKind::Analyze));
            };
            analyze(ctx, path)
        });

        self.register(CommandKind::RecordAnalysis, |ctx, cmd| {
            let Command::RecordAnalysis {
                file,
                issues,
                language,
            } = cmd
            else {
                return Err(mismatch(CommandKind::RecordAnalysis));
            };
            ctx.tracker.write().record_analysis(&file, issues, &language);
            ctx.events.publish(MetricsEvent::AnalysisRecorded {
                file: file.clone(),
                issues,
            });
            Ok(Reply::Recorded(format!(
                "Recorded {} ({} patterns, {})",
                file, issues, language
            )))
        });

        self.register(CommandKind::Fix, |ctx, cmd| {
            let Command::Fix { feature_id, file } = cmd else {
                return Err(mismatch(CommandKind::Fix));
            };
            let progress = {
                let mut tracker = ctx.tracker.write();
                tracker.record_fix(&feature_id, file.as_deref());
                tracker.metrics().modernization_progress
            };
            ctx.events.publish(MetricsEvent::FixRecorded {
                feature_id: feature_id.clone(),
            });
            Ok(Reply::Recorded(format!(
                "Fix recorded for {} (progress {}%)",
                feature_id, progress
            )))
        });

        self.register(CommandKind::FeatureUsage, |ctx, cmd| {
            let Command::FeatureUsage { feature_id, count } = cmd else {
                return Err(mismatch(CommandKind::FeatureUsage));
            };
            ctx.tracker.write().record_feature_usage(&feature_id, count);
            ctx.events.publish(MetricsEvent::FeatureUsageRecorded {
                feature_id: feature_id.clone(),
                count,
            });
            Ok(Reply::Recorded(format!("{} += {}", feature_id, count)))
        });

        self.register(CommandKind::Reset, |ctx, _| {
            ctx.tracker.write().reset();
            ctx.events.publish(MetricsEvent::Reset);
            Ok(Reply::Recorded("Session reset".to_string()))
        });

        self.register(CommandKind::Metrics, |ctx, _| {
            Ok(Reply::Metrics(ctx.tracker.read().metrics()))
        });

        self.register(CommandKind::TopFeatures, |ctx, cmd| {
            let limit = match cmd {
                Command::TopFeatures { limit } => limit.unwrap_or(ctx.config.top_features_limit),
                _ => return Err(mismatch(CommandKind::TopFeatures)),
            };
            Ok(Reply::TopFeatures(ctx.tracker.read().most_used_features(limit)))
        });

        self.register(CommandKind::History, |ctx, _| {
            let tracker = ctx.tracker.read();
            let limit = ctx.config.history_limit;
            Ok(Reply::History {
                analyses: tracker.analysis_history().into_iter().take(limit).collect(),
                fixes: tracker.fix_history().into_iter().take(limit).collect(),
            })
        });

        self.register(CommandKind::Stats, |ctx, _| {
            Ok(Reply::Stats(ctx.tracker.read().session_stats()))
        });

        self.register(CommandKind::Recommendations, |ctx, _| {
            let metrics = ctx.tracker.read().metrics();
            Ok(Reply::Recommendations(derive_recommendations(
                &metrics,
                ctx.catalog,
            )))
        });

        self.register(CommandKind::Timeline, |ctx, _| {
            let metrics = ctx.tracker.read().metrics();
            Ok(Reply::Timeline(derive_timeline(&metrics).to_vec()))
        });

        self.register(CommandKind::Lookup, |ctx, cmd| {
            let Command::Lookup { id } = cmd else {
                return Err(mismatch(CommandKind::Lookup));
            };
            Ok(Reply::Feature(ctx.catalog.lookup_feature(&id).cloned()))
        });

        self.register(CommandKind::Alternatives, |ctx, cmd| {
            let Command::Alternatives { pattern } = cmd else {
                return Err(mismatch(CommandKind::Alternatives));
            };
            let alternatives = ctx
                .catalog
                .alternatives_for(&pattern)
                .into_iter()
                .cloned()
                .collect();
            Ok(Reply::Alternatives {
                pattern,
                alternatives,
            })
        });

        self.register(CommandKind::Search, |ctx, cmd| {
            let Command::Search { query } = cmd else {
                return Err(mismatch(CommandKind::Search));
            };
            Ok(Reply::Features(
                ctx.catalog.search(&query).into_iter().cloned().collect(),
            ))
        });

        self.register(CommandKind::Export, |ctx, cmd| {
            let Command::Export { path } = cmd else {
                return Err(mismatch(CommandKind::Export));
            };
            let path = ctx.config.resolve_export_path(&path);
            export::export_snapshot_to_file(&ctx.tracker.read(), &path)?;
            Ok(Reply::Exported(path))
        });

        self.register(CommandKind::Report, |ctx, cmd| {
            let Command::Report { path } = cmd else {
                return Err(mismatch(CommandKind::Report));
            };
            let path = ctx.config.resolve_export_path(&path);
            export::export_report_to_markdown(
                &ctx.tracker.read(),
                ctx.catalog,
                ctx.config.top_features_limit,
                ctx.config.history_limit,
                &path,
            )?;
            Ok(Reply::Exported(path))
        });

        self.register(CommandKind::Help, |_, _| Ok(Reply::Help(HELP)));
    }
}

fn mismatch(kind: CommandKind) -> anyhow::Error {
    anyhow::anyhow!("handler for {:?} received a different command", kind)
}

/// Scan everything first, then record in one write so a walk failure
/// leaves the tracker untouched. Unreadable files are skipped.
fn analyze(ctx: &DispatchContext, path: PathBuf) -> Result<Reply> {
    let files = detector::discover_sources(&[path.clone()], &ctx.config.exclude_dirs)?;
    if files.is_empty() {
        warn!(path = %path.display(), "No supported source files found");
    }

    let mut results = Vec::with_capacity(files.len());
    for file in files {
        let detection = match detector::analyze_path(&file) {
            Ok(Some(detection)) => detection,
            Ok(None) => continue,
            Err(e @ CoreError::FileRead { .. }) => {
                warn!(path = %file.display(), error = %e, "Skipping unreadable file");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        results.push(FileAnalysis {
            path: file,
            language: detection.language,
            issues: detection.issue_count(),
            patterns: detection.counts_by_pattern(),
        });
    }

    {
        let mut tracker = ctx.tracker.write();
        for result in &results {
            let file = result.path.to_string_lossy();
            tracker.record_analysis(&file, result.issues, result.language.as_str());
            for (pattern, count) in &result.patterns {
                tracker.record_feature_usage(pattern, *count);
            }
        }
    }

    for result in &results {
        ctx.events.publish(MetricsEvent::AnalysisRecorded {
            file: result.path.display().to_string(),
            issues: result.issues,
        });
    }

    Ok(Reply::Analyzed(results))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> Dispatcher {
        Dispatcher::with_defaults(DashboardConfig::default())
    }

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(
            parse("record src/a.js 4"),
            Command::RecordAnalysis {
                file: "src/a.js".to_string(),
                issues: 4,
                language: "javascript".to_string(),
            }
        );
        assert_eq!(
            parse("fix let-const a.js"),
            Command::Fix {
                feature_id: "let-const".to_string(),
                file: Some("a.js".to_string()),
            }
        );
        assert_eq!(
            parse("usage var"),
            Command::FeatureUsage {
                feature_id: "var".to_string(),
                count: 1,
            }
        );
        assert_eq!(parse("TOP 3"), Command::TopFeatures { limit: Some(3) });
        assert_eq!(
            parse("search css grid"),
            Command::Search {
                query: "css grid".to_string()
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_counts() {
        let err = Command::parse("usage var -2").unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { .. }));
        assert!(err.to_string().contains("non-negative"));

        let err = Command::parse("record a.js 1.5").unwrap_err();
        assert!(err.to_string().contains("integer"));

        assert!(matches!(
            Command::parse("record a.js"),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Command::parse("frobnicate"),
            Err(CoreError::UnknownCommand { .. })
        ));
    }

    #[test]
    fn test_mutations_visible_to_next_read() {
        let d = dispatcher();
        d.dispatch(parse("record a.js 4 javascript")).unwrap();
        d.dispatch(parse("fix let-const")).unwrap();
        d.dispatch(parse("fix let-const")).unwrap();

        let Reply::Metrics(m) = d.dispatch(Command::Metrics).unwrap() else {
            panic!("expected metrics reply");
        };
        assert_eq!(m.files_analyzed, 1);
        assert_eq!(m.fixes_applied, 2);
        assert_eq!(m.modernization_progress, 50);
    }

    #[test]
    fn test_analyze_records_files_and_usage() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.js"), "var a = 1;\nvar b = new XMLHttpRequest();\n").unwrap();
        std::fs::write(dir.path().join("clean.css"), ".a { display: grid; }\n").unwrap();

        let d = dispatcher();
        let Reply::Analyzed(files) = d
            .dispatch(Command::Analyze {
                path: dir.path().to_path_buf(),
            })
            .unwrap()
        else {
            panic!("expected analyzed reply");
        };
        assert_eq!(files.len(), 2);

        let m = d.tracker().read().metrics();
        assert_eq!(m.files_analyzed, 2);
        assert_eq!(m.issues_found, 3);
        assert_eq!(m.usage_of("var"), 2);
        assert_eq!(m.usage_of("xmlhttprequest"), 1);
        assert_eq!(m.analysis_history[0].file_name, "app.js");
    }

    #[test]
    fn test_analyze_continues_past_non_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.js"), "var a = 1;\n").unwrap();
        std::fs::write(dir.path().join("b.js"), b"// caf\xe9\nvar b = 2;\n").unwrap();
        std::fs::write(dir.path().join("c.js"), "const c = 3;\n").unwrap();

        let d = dispatcher();
        let Reply::Analyzed(files) = d
            .dispatch(Command::Analyze {
                path: dir.path().to_path_buf(),
            })
            .unwrap()
        else {
            panic!("expected analyzed reply");
        };
        assert_eq!(files.len(), 3);

        let m = d.tracker().read().metrics();
        assert_eq!(m.files_analyzed, 3);
        assert_eq!(m.issues_found, 2);
        assert_eq!(m.usage_of("var"), 2);
    }

    #[test]
    fn test_failed_analyze_leaves_tracker_untouched() {
        let d = dispatcher();
        let result = d.dispatch(Command::Analyze {
            path: PathBuf::from("/nonexistent/modboard/dir"),
        });
        assert!(result.is_err());
        assert_eq!(d.tracker().read().metrics().files_analyzed, 0);
    }

    #[test]
    fn test_derived_views() {
        let d = dispatcher();
        d.dispatch(parse("record a.js 10")).unwrap();
        d.dispatch(parse("record b.js 0")).unwrap();
        d.dispatch(parse("record c.js 0")).unwrap();
        d.dispatch(parse("fix var")).unwrap();

        let Reply::Timeline(phases) = d.dispatch(Command::Timeline).unwrap() else {
            panic!("expected timeline reply");
        };
        assert_eq!(phases.len(), 5);
        assert_eq!(phases[2].progress, 10);

        let Reply::Recommendations(recs) = d.dispatch(Command::Recommendations).unwrap() else {
            panic!("expected recommendations reply");
        };
        assert_eq!(recs[0].id, "fix-issues");
    }

    #[test]
    fn test_catalog_commands() {
        let d = dispatcher();

        let Reply::Feature(Some(info)) = d.dispatch(parse("lookup grid")).unwrap() else {
            panic!("expected feature");
        };
        assert_eq!(info.name, "CSS Grid");

        let Reply::Feature(None) = d.dispatch(parse("lookup nope")).unwrap() else {
            panic!("expected absent feature");
        };

        let Reply::Alternatives { alternatives, .. } =
            d.dispatch(parse("alternatives var")).unwrap()
        else {
            panic!("expected alternatives");
        };
        assert_eq!(alternatives[0].feature_id, "let-const");
    }

    #[test]
    fn test_custom_handler_replaces_default() {
        let mut d = dispatcher();
        d.register(CommandKind::Help, |_, _| {
            Ok(Reply::Recorded("custom".to_string()))
        });

        let Reply::Recorded(msg) = d.dispatch(Command::Help).unwrap() else {
            panic!("expected custom reply");
        };
        assert_eq!(msg, "custom");
    }

    #[test]
    fn test_events_published_for_mutations() {
        let d = dispatcher();
        let mut rx = d.events().subscribe();

        d.dispatch(parse("usage var 3")).unwrap();
        d.dispatch(parse("reset")).unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            MetricsEvent::FeatureUsageRecorded {
                feature_id: "var".to_string(),
                count: 3
            }
        );
        assert_eq!(rx.try_recv().unwrap(), MetricsEvent::Reset);
    }

    #[test]
    fn test_export_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let d = dispatcher();
        d.dispatch(parse("record a.js 2")).unwrap();

        let snapshot = dir.path().join("snap.json");
        let Reply::Exported(path) = d
            .dispatch(Command::Export {
                path: snapshot.clone(),
            })
            .unwrap()
        else {
            panic!("expected export");
        };
        assert_eq!(path, snapshot);
        let parsed = export::parse_snapshot(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.metrics.issues_found, 2);

        let report = dir.path().join("report.md");
        d.dispatch(Command::Report {
            path: report.clone(),
        })
        .unwrap();
        assert!(std::fs::read_to_string(report).unwrap().contains("# Modernization Report"));
    }
}
