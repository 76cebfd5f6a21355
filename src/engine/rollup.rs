//! Worst-case per-threat rollup.
//!
//! A threat's reported risk is the (likelihood, impact, risk) triple of
//! its worst assessed asset. Assets are visited in ascending ordinal
//! order and only a strictly higher risk priority displaces the current
//! candidate, so ties resolve to the lowest ordinal. That iteration order
//! is a documented contract, not an accident of collection order.

use super::matrix::{compose_same_kind, derive_risk};
use super::RiskEngine;
use crate::models::{
    AssessmentContext, Category, ThreatRollup, ASSET_IMPACT_CRITERIA, ASSET_LIKELIHOOD_CRITERIA,
    THREAT_IMPACT_CRITERIA, THREAT_LIKELIHOOD_CRITERIA,
};

impl RiskEngine {
    /// Combined likelihood category for one (threat, asset) pair: the
    /// threat-side aggregate composed with the asset-baseline aggregate.
    /// `None` when either side has no present scores.
    fn combined_likelihood(&self, threat: usize, asset: usize) -> Option<Category> {
        let threat_side = self.aggregate(
            AssessmentContext::Threat(threat),
            asset,
            &THREAT_LIKELIHOOD_CRITERIA,
        )?;
        let asset_side = self.aggregate(
            AssessmentContext::AssetBaseline,
            asset,
            &ASSET_LIKELIHOOD_CRITERIA,
        )?;
        Some(compose_same_kind(
            Category::from_value(threat_side),
            Category::from_value(asset_side),
        ))
    }

    /// Combined impact category, mirroring `combined_likelihood`.
    fn combined_impact(&self, threat: usize, asset: usize) -> Option<Category> {
        let threat_side = self.aggregate(
            AssessmentContext::Threat(threat),
            asset,
            &THREAT_IMPACT_CRITERIA,
        )?;
        let asset_side = self.aggregate(
            AssessmentContext::AssetBaseline,
            asset,
            &ASSET_IMPACT_CRITERIA,
        )?;
        Some(compose_same_kind(
            Category::from_value(threat_side),
            Category::from_value(asset_side),
        ))
    }

    /// Full (likelihood, impact, risk) triple for one (threat, asset)
    /// pair, or `None` unless both aggregates are defined.
    pub fn threat_asset_risk(
        &self,
        threat: usize,
        asset: usize,
    ) -> Option<(Category, Category, Category)> {
        let likelihood = self.combined_likelihood(threat, asset)?;
        let impact = self.combined_impact(threat, asset)?;
        Some((likelihood, impact, derive_risk(likelihood, impact)))
    }

    /// The threat's representative result: the triple of its maximal-risk
    /// assessed asset, or all-empty when no asset is fully assessed.
    pub fn threat_rollup(&self, threat: usize) -> ThreatRollup {
        let mut best: Option<(Category, Category, Category)> = None;

        for asset in self
            .scores
            .assessed_assets(AssessmentContext::Threat(threat))
        {
            let Some(candidate) = self.threat_asset_risk(threat, asset) else {
                continue;
            };
            let displaces = match best {
                None => true,
                Some((_, _, current)) => candidate.2.priority() > current.priority(),
            };
            if displaces {
                best = Some(candidate);
            }
        }

        match best {
            Some((likelihood, impact, risk)) => ThreatRollup {
                likelihood: Some(likelihood),
                impact: Some(impact),
                risk: Some(risk),
            },
            None => ThreatRollup::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Asset, Threat};

    fn make_engine() -> RiskEngine {
        let assets = vec![
            Asset::new("Ground", "Ground Stations", "Tracking"),
            Asset::new("Space", "Platform", "Bus"),
            Asset::new("Link", "Link", "Between Platform and Payload"),
        ];
        let threats = vec![Threat::new("Jamming")];
        RiskEngine::new(assets, threats, Vec::new())
    }

    /// Fill every threat-side and asset-side criterion of one asset with a
    /// single score value.
    fn assess_asset(engine: &mut RiskEngine, asset: usize, threat_score: u8, asset_score: u8) {
        for criterion in 0..7 {
            engine
                .set_score(AssessmentContext::Threat(0), asset, criterion, threat_score)
                .unwrap();
        }
        for criterion in 0..9 {
            engine
                .set_score(
                    AssessmentContext::AssetBaseline,
                    asset,
                    criterion,
                    asset_score,
                )
                .unwrap();
        }
    }

    #[test]
    fn test_empty_rollup_when_nothing_assessed() {
        let engine = make_engine();
        assert!(engine.threat_rollup(0).is_empty());
    }

    #[test]
    fn test_rollup_requires_both_sides() {
        let mut engine = make_engine();
        // Threat-side scores only: no asset baseline means no result.
        for criterion in 0..7 {
            engine
                .set_score(AssessmentContext::Threat(0), 0, criterion, 4)
                .unwrap();
        }
        assert!(engine.threat_rollup(0).is_empty());
        assert_eq!(engine.threat_asset_risk(0, 0), None);
    }

    #[test]
    fn test_rollup_single_asset() {
        let mut engine = make_engine();
        assess_asset(&mut engine, 0, 5, 5);

        let rollup = engine.threat_rollup(0);
        assert_eq!(rollup.likelihood, Some(Category::VeryHigh));
        assert_eq!(rollup.impact, Some(Category::VeryHigh));
        assert_eq!(rollup.risk, Some(Category::VeryHigh));
    }

    #[test]
    fn test_rollup_picks_maximal_risk_asset() {
        let mut engine = make_engine();
        assess_asset(&mut engine, 0, 1, 1); // Very Low everything
        assess_asset(&mut engine, 2, 5, 5); // Very High everything

        let rollup = engine.threat_rollup(0);
        assert_eq!(rollup.risk, Some(Category::VeryHigh));
        assert_eq!(rollup.likelihood, Some(Category::VeryHigh));
    }

    #[test]
    fn test_rollup_tie_keeps_lowest_ordinal() {
        let mut engine = make_engine();
        // Same scores on assets 1 and 2: identical risk, asset 1 must win.
        assess_asset(&mut engine, 1, 3, 3);
        assess_asset(&mut engine, 2, 3, 3);

        let from_asset_1 = engine.threat_asset_risk(0, 1).unwrap();
        let rollup = engine.threat_rollup(0);
        assert_eq!(rollup.risk, Some(from_asset_1.2));

        // Degrade asset 2 below asset 1; the result must not change.
        assess_asset(&mut engine, 2, 1, 1);
        let rollup = engine.threat_rollup(0);
        assert_eq!(rollup.risk, Some(from_asset_1.2));
    }

    #[test]
    fn test_partial_asset_is_skipped_not_fatal() {
        let mut engine = make_engine();
        assess_asset(&mut engine, 0, 2, 2);
        // Asset 1 has threat-side likelihood scores but no impact scores:
        // it cannot produce a triple and must not mask asset 0.
        for criterion in 0..5 {
            engine
                .set_score(AssessmentContext::Threat(0), 1, criterion, 5)
                .unwrap();
        }

        let rollup = engine.threat_rollup(0);
        assert!(!rollup.is_empty());
        assert_eq!(rollup.risk, engine.threat_asset_risk(0, 0).map(|t| t.2));
    }

    #[test]
    fn test_composition_uses_risk_matrix() {
        let mut engine = make_engine();
        // Threat side Very High (5s), asset side Very Low (1s):
        // compose(VeryHigh, VeryLow) = Medium on both axes, and
        // derive(Medium, Medium) = Medium.
        assess_asset(&mut engine, 0, 5, 1);

        let rollup = engine.threat_rollup(0);
        assert_eq!(rollup.likelihood, Some(Category::Medium));
        assert_eq!(rollup.impact, Some(Category::Medium));
        assert_eq!(rollup.risk, Some(Category::Medium));
    }
}
