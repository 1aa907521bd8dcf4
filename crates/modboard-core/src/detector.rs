//! Legacy pattern detection
//!
//! Line-oriented regex rules, one per legacy pattern id. Rules are compiled
//! once and shared. HTML files get both the script and stylesheet rules
//! since inline `<script>`/`<style>` blocks carry the same patterns.

use crate::error::CoreError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Source language of an analyzed file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Css,
    Html,
}

impl Language {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "js" | "mjs" | "cjs" | "jsx" => Some(Self::JavaScript),
            "ts" | "tsx" | "mts" | "cts" => Some(Self::TypeScript),
            "css" | "scss" | "less" => Some(Self::Css),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Css => "css",
            Self::Html => "html",
        }
    }

    fn is_script(&self) -> bool {
        matches!(self, Self::JavaScript | Self::TypeScript | Self::Html)
    }

    fn is_style(&self) -> bool {
        matches!(self, Self::Css | Self::Html)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleTarget {
    Script,
    Style,
}

/// A compiled detection rule for one legacy pattern
#[derive(Debug)]
pub struct PatternRule {
    pub pattern_id: &'static str,
    target: RuleTarget,
    regex: Regex,
}

impl PatternRule {
    fn applies_to(&self, language: Language) -> bool {
        match self.target {
            RuleTarget::Script => language.is_script(),
            RuleTarget::Style => language.is_style(),
        }
    }
}

const RULE_SOURCES: &[(&str, RuleTarget, &str)] = &[
    ("var", RuleTarget::Script, r"\bvar\s+[A-Za-z_$]"),
    ("xmlhttprequest", RuleTarget::Script, r"\bnew\s+XMLHttpRequest\b"),
    ("jquery-ajax", RuleTarget::Script, r"\$\.(?:ajax|get|post|getJSON)\s*\("),
    ("jquery-selector", RuleTarget::Script, r#"\$\(\s*['"]"#),
    ("function-expression", RuleTarget::Script, r"\bfunction\s*\("),
    ("string-concat", RuleTarget::Script, r#"['"]\s*\+\s*[A-Za-z_$]"#),
    ("arguments", RuleTarget::Script, r"\barguments\b"),
    ("indexof-check", RuleTarget::Script, r"\.indexOf\([^)]*\)\s*(?:!==?|===?|>=?)\s*-?[01]\b"),
    ("and-chain", RuleTarget::Script, r"\b\w+\s*&&\s*\w+\.\w+\s*&&\s*\w+\.\w+\.\w+"),
    ("json-clone", RuleTarget::Script, r"JSON\.parse\(\s*JSON\.stringify\("),
    ("float-layout", RuleTarget::Style, r"\bfloat\s*:\s*(?:left|right)\b"),
    ("table-layout", RuleTarget::Style, r"\bdisplay\s*:\s*table(?:-cell|-row)?\b"),
    ("clearfix", RuleTarget::Style, r"\.clearfix\b|\bclear\s*:\s*both\b"),
    ("padding-hack", RuleTarget::Style, r"\bpadding-(?:top|bottom)\s*:\s*(?:56\.25|75|62\.5)%"),
    ("preprocessor-variables", RuleTarget::Style, r"^\s*[$@][A-Za-z][\w-]*\s*:"),
];

static RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    RULE_SOURCES
        .iter()
        .filter_map(|&(pattern_id, target, source)| match Regex::new(source) {
            Ok(regex) => Some(PatternRule {
                pattern_id,
                target,
                regex,
            }),
            Err(e) => {
                warn!(pattern_id, error = %e, "Skipping invalid detection rule");
                None
            }
        })
        .collect()
});

/// Compiled rules, in detection order
pub fn rules() -> &'static [PatternRule] {
    &RULES
}

/// A single legacy pattern occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternHit {
    pub pattern_id: String,
    /// 1-based line number
    pub line: usize,
}

/// Result of scanning one source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub language: Language,
    pub hits: Vec<PatternHit>,
}

impl Detection {
    pub fn issue_count(&self) -> u64 {
        self.hits.len() as u64
    }

    /// Occurrences per pattern, ordered by first appearance
    pub fn counts_by_pattern(&self) -> Vec<(String, u64)> {
        let mut counts: Vec<(String, u64)> = Vec::new();
        for hit in &self.hits {
            match counts.iter_mut().find(|(id, _)| *id == hit.pattern_id) {
                Some((_, count)) => *count += 1,
                None => counts.push((hit.pattern_id.clone(), 1)),
            }
        }
        counts
    }
}

/// Scan source text for legacy patterns
pub fn detect(source: &str, language: Language) -> Detection {
    let active: Vec<&PatternRule> = rules().iter().filter(|r| r.applies_to(language)).collect();

    let mut hits = Vec::new();
    for (index, line) in source.lines().enumerate() {
        for rule in &active {
            let matches = rule.regex.find_iter(line).count();
            hits.extend((0..matches).map(|_| PatternHit {
                pattern_id: rule.pattern_id.to_string(),
                line: index + 1,
            }));
        }
    }

    Detection { language, hits }
}

/// Read and scan a file; `None` when the extension is not supported
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn analyze_path(path: &Path) -> Result<Option<Detection>, CoreError> {
    let Some(language) = Language::from_path(path) else {
        debug!(path = %path.display(), "Unsupported file type, skipping");
        return Ok(None);
    };

    let bytes = std::fs::read(path).map_err(|source| CoreError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    // Older sources are often Latin-1; invalid bytes never form a pattern
    let source = String::from_utf8_lossy(&bytes);

    let detection = detect(&source, language);
    debug!(
        path = %path.display(),
        language = %language,
        issues = detection.hits.len(),
        "File analyzed"
    );

    Ok(Some(detection))
}

/// Expand files and directories into the supported source files they contain
///
/// Directories named in `exclude_dirs` are not descended into. Results are
/// sorted per root so repeated runs record analyses in the same order.
pub fn discover_sources(
    roots: &[PathBuf],
    exclude_dirs: &[String],
) -> Result<Vec<PathBuf>, CoreError> {
    let mut files = Vec::new();

    for root in roots {
        if root.is_file() {
            if Language::from_path(root).is_some() {
                files.push(root.clone());
            }
            continue;
        }

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !exclude_dirs
                        .iter()
                        .any(|ex| entry.file_name().to_str() == Some(ex.as_str()))
            });

        for entry in walker {
            let entry = entry.map_err(|e| CoreError::Walk {
                path: root.clone(),
                message: e.to_string(),
            })?;
            if entry.file_type().is_file() && Language::from_path(entry.path()).is_some() {
                files.push(entry.into_path());
            }
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern_ids(detection: &Detection) -> Vec<&str> {
        detection.hits.iter().map(|h| h.pattern_id.as_str()).collect()
    }

    #[test]
    fn test_all_rules_compile() {
        assert_eq!(rules().len(), RULE_SOURCES.len());
    }

    #[test]
    fn test_language_from_path() {
        assert_eq!(
            Language::from_path(Path::new("src/app.JS")),
            Some(Language::JavaScript)
        );
        assert_eq!(
            Language::from_path(Path::new("main.tsx")),
            Some(Language::TypeScript)
        );
        assert_eq!(Language::from_path(Path::new("a.scss")), Some(Language::Css));
        assert_eq!(Language::from_path(Path::new("index.htm")), Some(Language::Html));
        assert_eq!(Language::from_path(Path::new("README.md")), None);
        assert_eq!(Language::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_detect_javascript_patterns() {
        let source = "var a = 1;\nvar b = 2;\nconst xhr = new XMLHttpRequest();\nlet s = 'id: ' + a;\n";
        let detection = detect(source, Language::JavaScript);

        assert_eq!(
            pattern_ids(&detection),
            vec!["var", "var", "xmlhttprequest", "string-concat"]
        );
        assert_eq!(detection.hits[2].line, 3);
        assert_eq!(
            detection.counts_by_pattern(),
            vec![
                ("var".to_string(), 2),
                ("xmlhttprequest".to_string(), 1),
                ("string-concat".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_detect_counts_multiple_matches_per_line() {
        let detection = detect("var a = 1, b; var c;", Language::JavaScript);
        assert_eq!(detection.issue_count(), 2);
    }

    #[test]
    fn test_detect_modern_code_is_clean() {
        let source = "const items = await fetch(url).then(r => r.json());\nconst copy = structuredClone(items);\n";
        let detection = detect(source, Language::TypeScript);
        assert_eq!(detection.issue_count(), 0);
    }

    #[test]
    fn test_css_rules_do_not_apply_to_scripts() {
        let detection = detect("const style = 'float: left';", Language::JavaScript);
        assert!(!pattern_ids(&detection).contains(&"float-layout"));
    }

    #[test]
    fn test_detect_css_patterns() {
        let source = ".col { float: left; }\n.clearfix::after { clear: both; }\n.cell { display: table-cell; }\n";
        let detection = detect(source, Language::Css);
        assert_eq!(
            pattern_ids(&detection),
            vec!["float-layout", "clearfix", "clearfix", "table-layout"]
        );
    }

    #[test]
    fn test_html_gets_script_and_style_rules() {
        let source = "<style>.a { float: right; }</style>\n<script>var x = $.ajax({});</script>\n";
        let detection = detect(source, Language::Html);
        let ids = pattern_ids(&detection);
        assert!(ids.contains(&"float-layout"));
        assert!(ids.contains(&"var"));
        assert!(ids.contains(&"jquery-ajax"));
    }

    #[test]
    fn test_analyze_path_skips_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "var x = 1;").unwrap();

        assert!(analyze_path(&path).unwrap().is_none());
    }

    #[test]
    fn test_analyze_path_accepts_latin1_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.js");
        std::fs::write(&path, b"// caf\xe9 menu\nvar total = 0;\n").unwrap();

        let detection = analyze_path(&path).unwrap().unwrap();
        assert_eq!(detection.issue_count(), 1);
        assert_eq!(detection.hits[0].line, 2);
    }

    #[test]
    fn test_analyze_path_missing_file() {
        let result = analyze_path(Path::new("/nonexistent/modboard/app.js"));
        assert!(matches!(result, Err(CoreError::FileRead { .. })));
    }

    #[test]
    fn test_discover_sources_respects_excludes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::create_dir_all(root.join("node_modules/lib")).unwrap();
        std::fs::write(root.join("src/b.js"), "var b;").unwrap();
        std::fs::write(root.join("src/a.css"), ".a {}").unwrap();
        std::fs::write(root.join("src/readme.md"), "# hi").unwrap();
        std::fs::write(root.join("node_modules/lib/x.js"), "var x;").unwrap();

        let files = discover_sources(&[root.to_path_buf()], &["node_modules".to_string()]).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.css", "b.js"]);
    }
}
