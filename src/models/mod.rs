//! Data model for the risk engine: catalogs, categories, criteria tables,
//! assessment input, and report rows.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Five-level risk category used for likelihood, impact and risk.
///
/// Variants are declared in ascending order so the derived `Ord` matches
/// the domain ordering (Very Low < ... < Very High).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Category {
    /// All categories in ascending order.
    pub const ALL: [Category; 5] = [
        Category::VeryLow,
        Category::Low,
        Category::Medium,
        Category::High,
        Category::VeryHigh,
    ];

    /// Numeric priority: Very Low = 1 ... Very High = 5.
    pub fn priority(self) -> u8 {
        match self {
            Category::VeryLow => 1,
            Category::Low => 2,
            Category::Medium => 3,
            Category::High => 4,
            Category::VeryHigh => 5,
        }
    }

    /// Categorize a normalized [0,1] value.
    ///
    /// Buckets are inclusive on their upper boundary: 0.1, 0.4, 0.7, 0.9.
    pub fn from_value(value: f64) -> Self {
        if value <= 0.1 {
            Category::VeryLow
        } else if value <= 0.4 {
            Category::Low
        } else if value <= 0.7 {
            Category::Medium
        } else if value <= 0.9 {
            Category::High
        } else {
            Category::VeryHigh
        }
    }

    /// Parse a display label such as "Very High" (case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "very low" => Some(Category::VeryLow),
            "low" => Some(Category::Low),
            "medium" => Some(Category::Medium),
            "high" => Some(Category::High),
            "very high" => Some(Category::VeryHigh),
            _ => None,
        }
    }

    /// The display label used in catalogs, reports and exports.
    pub fn label(self) -> &'static str {
        match self {
            Category::VeryLow => "Very Low",
            Category::Low => "Low",
            Category::Medium => "Medium",
            Category::High => "High",
            Category::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Immutable catalog asset, referenced by ordinal index for the engine's
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub category: String,
    pub subcategory: String,
    pub component: String,
}

impl Asset {
    pub fn new(
        category: impl Into<String>,
        subcategory: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
            component: component.into(),
        }
    }
}

/// Immutable catalog threat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threat {
    pub name: String,
}

impl Threat {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Immutable catalog security control.
///
/// The `criteria`, `threats_addressed` and `segment` fields are free text
/// exactly as loaded; resolution against the live catalogs happens in the
/// engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    pub id: String,
    pub cluster: String,
    pub title: String,
    /// Comma-separated criterion names this control improves.
    pub criteria: String,
    /// Comma-separated threat names this control addresses.
    pub threats_addressed: String,
    /// Comma-separated segment expression declaring compatible assets.
    pub segment: String,
}

/// Which snapshot a criterion score belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssessmentContext {
    /// The single global asset-baseline snapshot.
    AssetBaseline,
    /// The per-threat snapshot for the threat at this ordinal.
    Threat(usize),
}

/// The seven threat criteria: indices 0-4 feed likelihood, 5-6 feed impact.
pub const THREAT_CRITERIA: [&str; 7] = [
    "Vulnerability effectiveness",
    "Mitigation Presence",
    "Detection Probability",
    "Access Complexity",
    "Privilege Requirement",
    "Response Delay",
    "Resilience Impact",
];

/// The nine asset criteria: indices 0-3 feed likelihood, 4-8 feed impact.
pub const ASSET_CRITERIA: [&str; 9] = [
    "Dependency",
    "Penetration",
    "Cyber Maturity",
    "Trust",
    "Performance",
    "Schedule",
    "Costs",
    "Reputation",
    "Recovery",
];

/// Criterion-index subsets feeding each aggregate.
pub const THREAT_LIKELIHOOD_CRITERIA: [usize; 5] = [0, 1, 2, 3, 4];
pub const THREAT_IMPACT_CRITERIA: [usize; 2] = [5, 6];
pub const ASSET_LIKELIHOOD_CRITERIA: [usize; 4] = [0, 1, 2, 3];
pub const ASSET_IMPACT_CRITERIA: [usize; 5] = [4, 5, 6, 7, 8];

/// Per-threat rollup: the (likelihood, impact, risk) triple of the asset
/// with the maximal risk, or all-`None` when no asset is fully assessed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreatRollup {
    pub likelihood: Option<Category>,
    pub impact: Option<Category>,
    pub risk: Option<Category>,
}

impl ThreatRollup {
    pub fn is_empty(&self) -> bool {
        self.likelihood.is_none() && self.impact.is_none() && self.risk.is_none()
    }
}

/// Externally supplied assessment scores.
///
/// Mirrors the saved-assessment layout: one asset-baseline snapshot and one
/// snapshot per threat, each mapping asset ordinal -> criterion index ->
/// score in 1..=5.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentInput {
    /// Asset-baseline snapshot.
    #[serde(default)]
    pub asset_baseline: HashMap<usize, HashMap<usize, u8>>,
    /// Per-threat snapshots keyed by threat name.
    #[serde(default)]
    pub threats: HashMap<String, HashMap<usize, HashMap<usize, u8>>>,
}

/// Metadata attached to a generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInfo {
    pub generated: String,
    pub asset_count: usize,
    pub threat_count: usize,
    pub applied_controls: Vec<String>,
}

/// One row of the per-threat risk table. Empty strings mean the threat has
/// no fully assessed asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatRiskRow {
    pub threat: String,
    pub likelihood: String,
    pub impact: String,
    pub risk: String,
}

/// Full risk report: one row per catalog threat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    pub info: ReportInfo,
    pub rows: Vec<ThreatRiskRow>,
}
