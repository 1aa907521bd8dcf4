//! Feature catalog: modern web features and the legacy patterns they replace
//!
//! The built-in catalog is constructed once on first access and never mutated.
//! Lookups return `Option`/empty collections instead of errors.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Cross-browser support maturity of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselineStatus {
    /// Widely available
    High,
    /// Newly available
    Low,
    /// Not yet interoperable
    Unavailable,
}

impl BaselineStatus {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "Widely available",
            Self::Low => "Newly available",
            Self::Unavailable => "Limited availability",
        }
    }
}

/// Minimum browser versions supporting a feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserSupport {
    pub chrome: String,
    pub firefox: String,
    pub safari: String,
    pub edge: String,
}

/// A modern web platform feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub baseline: BaselineStatus,
    pub browser_support: BrowserSupport,
    pub spec_url: String,
}

/// A modern replacement suggested for a legacy pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    /// Id of the catalog feature this alternative points to
    pub feature_id: String,
    pub name: String,
    pub description: String,
    pub example: String,
}

/// Immutable mapping from ids to feature records and from legacy
/// pattern ids to ordered alternatives
#[derive(Debug, Clone, Default)]
pub struct FeatureCatalog {
    features: Vec<FeatureInfo>,
    feature_index: HashMap<String, usize>,
    /// Legacy pattern id -> alternatives, in catalog order
    alternatives: Vec<(String, Vec<Alternative>)>,
}

static BUILTIN: Lazy<FeatureCatalog> = Lazy::new(build_builtin);

impl FeatureCatalog {
    /// Build a catalog from explicit tables
    pub fn new(features: Vec<FeatureInfo>, alternatives: Vec<(String, Vec<Alternative>)>) -> Self {
        let feature_index = features
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id.clone(), i))
            .collect();

        Self {
            features,
            feature_index,
            alternatives,
        }
    }

    /// Catalog shipped with modboard
    pub fn builtin() -> &'static FeatureCatalog {
        &BUILTIN
    }

    pub fn lookup_feature(&self, id: &str) -> Option<&FeatureInfo> {
        self.feature_index.get(id).map(|&i| &self.features[i])
    }

    /// Alternatives for a legacy pattern
    ///
    /// An exact key match wins. Otherwise every key that contains the pattern,
    /// or is contained in it, contributes its alternatives in catalog order.
    /// Alternatives pointing at the same feature are only listed once.
    pub fn alternatives_for(&self, pattern_id: &str) -> Vec<&Alternative> {
        let needle = pattern_id.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        if let Some(alts) = self.exact_alternatives(&needle) {
            return alts.iter().collect();
        }

        let mut seen = HashSet::new();
        self.alternatives
            .iter()
            .filter(|(key, _)| key.contains(&needle) || needle.contains(key.as_str()))
            .flat_map(|(_, alts)| alts.iter())
            .filter(|alt| seen.insert(alt.feature_id.as_str()))
            .collect()
    }

    /// Alternatives registered under exactly this pattern id (case-insensitive)
    pub fn exact_alternatives(&self, pattern_id: &str) -> Option<&[Alternative]> {
        let needle = pattern_id.trim().to_lowercase();
        self.alternatives
            .iter()
            .find(|(key, _)| *key == needle)
            .map(|(_, alts)| alts.as_slice())
    }

    /// Case-insensitive substring search over name, description, id and category
    pub fn search(&self, query: &str) -> Vec<&FeatureInfo> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.features
            .iter()
            .filter(|f| {
                f.name.to_lowercase().contains(&query)
                    || f.description.to_lowercase().contains(&query)
                    || f.id.to_lowercase().contains(&query)
                    || f.category.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn features(&self) -> impl Iterator<Item = &FeatureInfo> {
        self.features.iter()
    }

    /// Legacy pattern ids known to the catalog
    pub fn legacy_patterns(&self) -> impl Iterator<Item = &str> {
        self.alternatives.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

// ============================================================================
// Built-in tables
// ============================================================================

// (id, name, category, baseline, [chrome, firefox, safari, edge], description)
type FeatureRow = (
    &'static str,
    &'static str,
    &'static str,
    BaselineStatus,
    [&'static str; 4],
    &'static str,
);

const FEATURES: &[FeatureRow] = &[
    ("let-const", "let and const", "javascript", BaselineStatus::High, ["49", "44", "10", "14"],
        "Block-scoped variable declarations"),
    ("arrow-functions", "Arrow functions", "javascript", BaselineStatus::High, ["45", "22", "10", "12"],
        "Concise function syntax with lexical this"),
    ("template-literals", "Template literals", "javascript", BaselineStatus::High, ["41", "34", "9", "12"],
        "String interpolation with backtick strings"),
    ("promises", "Promises", "javascript", BaselineStatus::High, ["32", "29", "8", "12"],
        "First-class values for asynchronous results"),
    ("async-await", "async / await", "javascript", BaselineStatus::High, ["55", "52", "10.1", "15"],
        "Sequential-looking asynchronous code on top of promises"),
    ("rest-parameters", "Rest parameters", "javascript", BaselineStatus::High, ["47", "15", "10", "12"],
        "Collect remaining arguments into a real array"),
    ("array-includes", "Array.prototype.includes", "javascript", BaselineStatus::High, ["47", "43", "9", "14"],
        "Membership test without comparing indexOf to -1"),
    ("optional-chaining", "Optional chaining", "javascript", BaselineStatus::High, ["80", "74", "13.1", "80"],
        "Safe property access through the ?. operator"),
    ("structured-clone", "structuredClone()", "javascript", BaselineStatus::High, ["98", "94", "15.4", "98"],
        "Deep copy of values without a JSON round trip"),
    ("fetch", "Fetch API", "api", BaselineStatus::High, ["42", "39", "10.1", "14"],
        "Promise-based HTTP requests replacing XMLHttpRequest"),
    ("queryselector", "querySelector", "api", BaselineStatus::High, ["1", "3.5", "3.2", "12"],
        "CSS selector based element lookup"),
    ("classlist", "Element.classList", "api", BaselineStatus::High, ["8", "3.6", "5.1", "12"],
        "Add, remove and toggle classes without string manipulation"),
    ("popover", "Popover API", "html", BaselineStatus::Low, ["114", "125", "17", "114"],
        "Declarative top-layer popovers without script positioning"),
    ("flexbox", "Flexbox", "css", BaselineStatus::High, ["29", "28", "9", "12"],
        "One-dimensional layout for rows and columns"),
    ("grid", "CSS Grid", "css", BaselineStatus::High, ["57", "52", "10.1", "16"],
        "Two-dimensional layout system"),
    ("flow-root", "display: flow-root", "css", BaselineStatus::High, ["58", "53", "13", "79"],
        "Contain floats without clearfix hacks"),
    ("aspect-ratio", "aspect-ratio", "css", BaselineStatus::High, ["88", "89", "15", "88"],
        "Preferred box ratio without padding hacks"),
    ("custom-properties", "CSS custom properties", "css", BaselineStatus::High, ["49", "31", "9.1", "15"],
        "Runtime variables in stylesheets"),
    ("container-queries", "Container queries", "css", BaselineStatus::Low, ["105", "110", "16", "105"],
        "Style elements based on their container size"),
    ("has-selector", ":has()", "css", BaselineStatus::Low, ["105", "121", "15.4", "105"],
        "Parent selector based on descendants"),
];

// (legacy pattern id, [(feature id, example)])
type PatternRow = (&'static str, &'static [(&'static str, &'static str)]);

const PATTERNS: &[PatternRow] = &[
    ("var", &[("let-const", "const total = items.length;")]),
    ("xmlhttprequest", &[("fetch", "const res = await fetch(url);")]),
    ("jquery-ajax", &[
        ("fetch", "const data = await fetch(url).then(r => r.json());"),
        ("async-await", "async function load() { await save(); }"),
    ]),
    ("jquery-selector", &[
        ("queryselector", "document.querySelector('.item');"),
        ("classlist", "el.classList.toggle('active');"),
    ]),
    ("function-expression", &[("arrow-functions", "items.map(item => item.id);")]),
    ("string-concat", &[("template-literals", "`Hello ${name}!`")]),
    ("callback", &[
        ("promises", "readFile(path).then(parse);"),
        ("async-await", "const text = await readFile(path);"),
    ]),
    ("arguments", &[("rest-parameters", "function sum(...nums) {}")]),
    ("indexof-check", &[("array-includes", "if (list.includes(x)) {}")]),
    ("and-chain", &[("optional-chaining", "user?.address?.city")]),
    ("json-clone", &[("structured-clone", "const copy = structuredClone(obj);")]),
    ("float-layout", &[
        ("flexbox", ".row { display: flex; }"),
        ("grid", ".page { display: grid; }"),
    ]),
    ("table-layout", &[("grid", ".page { display: grid; grid-template-columns: 1fr 3fr; }")]),
    ("clearfix", &[("flow-root", ".container { display: flow-root; }")]),
    ("padding-hack", &[("aspect-ratio", ".video { aspect-ratio: 16 / 9; }")]),
    ("preprocessor-variables", &[("custom-properties", ":root { --brand: #0af; }")]),
    ("media-query-components", &[("container-queries", "@container (min-width: 400px) {}")]),
];

fn build_builtin() -> FeatureCatalog {
    let features: Vec<FeatureInfo> = FEATURES
        .iter()
        .map(|(id, name, category, baseline, [chrome, firefox, safari, edge], description)| {
            FeatureInfo {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                baseline: *baseline,
                browser_support: BrowserSupport {
                    chrome: chrome.to_string(),
                    firefox: firefox.to_string(),
                    safari: safari.to_string(),
                    edge: edge.to_string(),
                },
                spec_url: format!("https://developer.mozilla.org/en-US/search?q={}", id),
            }
        })
        .collect();

    let by_id: HashMap<&str, &FeatureInfo> = features.iter().map(|f| (f.id.as_str(), f)).collect();

    let alternatives = PATTERNS
        .iter()
        .map(|(pattern, targets)| {
            let alts = targets
                .iter()
                .filter_map(|(feature_id, example)| {
                    by_id.get(feature_id).map(|f| Alternative {
                        feature_id: f.id.clone(),
                        name: f.name.clone(),
                        description: f.description.clone(),
                        example: example.to_string(),
                    })
                })
                .collect();
            (pattern.to_string(), alts)
        })
        .collect();

    FeatureCatalog::new(features, alternatives)
}
