//! Risk Engine Module - Core scoring state and queries
//!
//! This module contains the main `RiskEngine` struct and its implementation.
//! Split into submodules for maintainability:
//! - `aggregate`: quadratic-mean reduction of criterion scores
//! - `matrix`: the 5x5 category combination table
//! - `matcher`: free-text threat and criterion name resolution
//! - `segment`: control segment compatibility resolution
//! - `controls`: apply/remove bookkeeping for security controls
//! - `rollup`: worst-case per-threat reporting
//! - `scores`: the criterion score store

mod aggregate;
mod controls;
mod matcher;
mod matrix;
mod rollup;
mod scores;
mod segment;

pub use aggregate::aggregate;
pub use matcher::{MatchKind, NameMatch, NameMatcher};
pub use matrix::{compose_same_kind, derive_risk};
pub use scores::ScoreStore;
pub use segment::resolve_segments;

use crate::errors::{RiskError, RiskResult};
use crate::models::{
    Asset, AssessmentContext, AssessmentInput, Category, Control, ReportInfo, RiskReport, Threat,
    ThreatRiskRow, ASSET_CRITERIA, THREAT_CRITERIA,
};

/// Main engine for threat-asset risk scoring and control impact.
///
/// Owns the catalogs (read-only after construction), the criterion score
/// store and the applied-control set. Queries never cache: every rollup is
/// recomputed from current scores. Single-threaded by design; callers
/// serialize access.
pub struct RiskEngine {
    pub(crate) assets: Vec<Asset>,
    pub(crate) threats: Vec<Threat>,
    pub(crate) controls: Vec<Control>,
    pub(crate) scores: ScoreStore,
    pub(crate) applied: Vec<String>,
    pub(crate) matcher: NameMatcher,
}

impl RiskEngine {
    /// Create an engine over already-validated catalogs.
    pub fn new(assets: Vec<Asset>, threats: Vec<Threat>, controls: Vec<Control>) -> Self {
        log::info!(
            "Initializing risk engine: {} assets, {} threats, {} controls",
            assets.len(),
            threats.len(),
            controls.len()
        );

        Self {
            assets,
            threats,
            controls,
            scores: ScoreStore::default(),
            applied: Vec::new(),
            matcher: NameMatcher::new(),
        }
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn threats(&self) -> &[Threat] {
        &self.threats
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Currently applied control ids, in application order.
    pub fn applied_controls(&self) -> &[String] {
        &self.applied
    }

    /// Ordinal of a threat by name (case-insensitive exact match).
    pub fn threat_ordinal(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.threats
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(name))
    }

    fn check_key(
        &self,
        context: AssessmentContext,
        asset: usize,
        criterion: usize,
    ) -> RiskResult<()> {
        if asset >= self.assets.len() {
            return Err(RiskError::UnknownAsset { index: asset });
        }
        let table_len = match context {
            AssessmentContext::AssetBaseline => ASSET_CRITERIA.len(),
            AssessmentContext::Threat(ordinal) => {
                if ordinal >= self.threats.len() {
                    return Err(RiskError::UnknownThreat { index: ordinal });
                }
                THREAT_CRITERIA.len()
            }
        };
        if criterion >= table_len {
            return Err(RiskError::InvalidCriterion { index: criterion });
        }
        Ok(())
    }

    /// Store a criterion score. A value of 0 clears the entry; values
    /// outside 1..=5 are rejected without mutation.
    pub fn set_score(
        &mut self,
        context: AssessmentContext,
        asset: usize,
        criterion: usize,
        value: u8,
    ) -> RiskResult<()> {
        self.check_key(context, asset, criterion)?;
        self.scores.set(context, asset, criterion, value)
    }

    /// Clear a criterion score if present.
    pub fn clear_score(&mut self, context: AssessmentContext, asset: usize, criterion: usize) {
        self.scores.clear(context, asset, criterion);
    }

    /// Read a criterion score.
    pub fn score(
        &self,
        context: AssessmentContext,
        asset: usize,
        criterion: usize,
    ) -> Option<u8> {
        self.scores.get(context, asset, criterion)
    }

    /// Load an externally saved assessment. Invalid entries are skipped
    /// with a diagnostic; they never abort the load.
    pub fn load_assessment(&mut self, input: &AssessmentInput) {
        let mut loaded = 0usize;

        for (&asset, row) in &input.asset_baseline {
            for (&criterion, &value) in row {
                match self.set_score(AssessmentContext::AssetBaseline, asset, criterion, value) {
                    Ok(()) => loaded += 1,
                    Err(e) => log::warn!(
                        "Skipping asset-baseline score (asset {}, criterion {}): {}",
                        asset,
                        criterion,
                        e
                    ),
                }
            }
        }

        for (name, per_asset) in &input.threats {
            let Some(ordinal) = self.threat_ordinal(name) else {
                log::warn!("Assessment references unknown threat '{}'", name);
                continue;
            };
            for (&asset, row) in per_asset {
                for (&criterion, &value) in row {
                    match self.set_score(AssessmentContext::Threat(ordinal), asset, criterion, value)
                    {
                        Ok(()) => loaded += 1,
                        Err(e) => log::warn!(
                            "Skipping score for threat '{}' (asset {}, criterion {}): {}",
                            name,
                            asset,
                            criterion,
                            e
                        ),
                    }
                }
            }
        }

        log::info!("Loaded {} criterion scores from assessment", loaded);
    }

    /// Aggregate the present scores among `subset` for one (context, asset)
    /// pair. Returns `None` when every entry in the subset is absent.
    pub fn aggregate(
        &self,
        context: AssessmentContext,
        asset: usize,
        subset: &[usize],
    ) -> Option<f64> {
        let present = self.scores.present(context, asset, subset);
        aggregate(&present)
    }

    /// Map a normalized [0,1] value to its category.
    pub fn categorize(&self, value: f64) -> Category {
        Category::from_value(value)
    }

    /// Build the full per-threat risk report from current scores.
    pub fn build_report(&self) -> RiskReport {
        let rows = self
            .threats
            .iter()
            .enumerate()
            .map(|(ordinal, threat)| {
                let rollup = self.threat_rollup(ordinal);
                ThreatRiskRow {
                    threat: threat.name.clone(),
                    likelihood: rollup
                        .likelihood
                        .map(|c| c.label().to_string())
                        .unwrap_or_default(),
                    impact: rollup
                        .impact
                        .map(|c| c.label().to_string())
                        .unwrap_or_default(),
                    risk: rollup.risk.map(|c| c.label().to_string()).unwrap_or_default(),
                }
            })
            .collect();

        RiskReport {
            info: ReportInfo {
                generated: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                asset_count: self.assets.len(),
                threat_count: self.threats.len(),
                applied_controls: self.applied.clone(),
            },
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_engine() -> RiskEngine {
        let assets = vec![
            Asset::new("Ground", "Ground Stations", "Tracking"),
            Asset::new("Space", "Platform", "Bus"),
        ];
        let threats = vec![Threat::new("Jamming"), Threat::new("Replay")];
        RiskEngine::new(assets, threats, Vec::new())
    }

    #[test]
    fn test_set_score_bounds() {
        let mut engine = make_engine();

        assert!(engine
            .set_score(AssessmentContext::Threat(0), 0, 0, 3)
            .is_ok());
        assert!(matches!(
            engine.set_score(AssessmentContext::Threat(0), 9, 0, 3),
            Err(RiskError::UnknownAsset { index: 9 })
        ));
        assert!(matches!(
            engine.set_score(AssessmentContext::Threat(7), 0, 0, 3),
            Err(RiskError::UnknownThreat { index: 7 })
        ));
        // Threat criteria stop at index 6, asset criteria at index 8.
        assert!(matches!(
            engine.set_score(AssessmentContext::Threat(0), 0, 7, 3),
            Err(RiskError::InvalidCriterion { index: 7 })
        ));
        assert!(engine
            .set_score(AssessmentContext::AssetBaseline, 0, 8, 3)
            .is_ok());
    }

    #[test]
    fn test_zero_clears_score() {
        let mut engine = make_engine();
        engine
            .set_score(AssessmentContext::Threat(0), 0, 0, 4)
            .unwrap();
        assert_eq!(engine.score(AssessmentContext::Threat(0), 0, 0), Some(4));

        engine
            .set_score(AssessmentContext::Threat(0), 0, 0, 0)
            .unwrap();
        assert_eq!(engine.score(AssessmentContext::Threat(0), 0, 0), None);
    }

    #[test]
    fn test_threat_ordinal_lookup() {
        let engine = make_engine();
        assert_eq!(engine.threat_ordinal("Jamming"), Some(0));
        assert_eq!(engine.threat_ordinal("  jamming "), Some(0));
        assert_eq!(engine.threat_ordinal("Spoofing"), None);
    }

    #[test]
    fn test_load_assessment_skips_invalid_entries() {
        let mut engine = make_engine();
        let json = r#"{
            "asset_baseline": { "0": { "0": 3, "1": 9 } },
            "threats": {
                "Jamming": { "0": { "0": 4 } },
                "Unknown Threat": { "0": { "0": 2 } }
            }
        }"#;
        let input: AssessmentInput = serde_json::from_str(json).unwrap();
        engine.load_assessment(&input);

        assert_eq!(
            engine.score(AssessmentContext::AssetBaseline, 0, 0),
            Some(3)
        );
        // Out-of-range value dropped, unknown threat dropped.
        assert_eq!(engine.score(AssessmentContext::AssetBaseline, 0, 1), None);
        assert_eq!(engine.score(AssessmentContext::Threat(0), 0, 0), Some(4));
        assert_eq!(engine.score(AssessmentContext::Threat(1), 0, 0), None);
    }

    #[test]
    fn test_report_rows_cover_every_threat() {
        let engine = make_engine();
        let report = engine.build_report();
        assert_eq!(report.rows.len(), 2);
        assert!(report.rows.iter().all(|r| r.risk.is_empty()));
        assert_eq!(report.info.threat_count, 2);
    }
}
