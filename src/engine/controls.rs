//! Control application and reversal.
//!
//! A control improves (lowers) the threat-criterion scores of every asset
//! in its declared segments, for every threat it addresses. Applying and
//! removing are mirrored ±1 mutations clamped to the 1..=5 score range;
//! membership in the applied set is validated before any score changes.
//!
//! Each application is an independent ±1 subject to its own clamp at the
//! moment it runs. No per-control delta ledger is kept, so a reversal that
//! crossed the floor or cap is not exact.

use std::collections::BTreeSet;

use super::matcher::MatchKind;
use super::segment;
use super::RiskEngine;
use crate::errors::{RiskError, RiskResult};
use crate::models::{AssessmentContext, Control, THREAT_CRITERIA};

fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|s| !s.is_empty())
}

impl RiskEngine {
    fn find_control(&self, id: &str) -> RiskResult<&Control> {
        let id = id.trim();
        self.controls
            .iter()
            .find(|control| control.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| RiskError::UnknownControl { id: id.to_string() })
    }

    fn is_applied(&self, id: &str) -> bool {
        self.applied.iter().any(|applied| applied == id)
    }

    /// Every (threat ordinal, asset ordinal, criterion index) the control
    /// covers: matched threats x resolved criteria x compatible assets.
    /// Unresolvable references shrink the set and emit diagnostics.
    fn control_triples(&self, control: &Control) -> Vec<(usize, usize, usize)> {
        let threat_names: Vec<&str> = self.threats.iter().map(|t| t.name.as_str()).collect();

        let mut threat_ordinals = BTreeSet::new();
        for declared in split_list(&control.threats_addressed) {
            let resolved = self.matcher.resolve(declared, &threat_names);
            if resolved.kind == MatchKind::NoMatch {
                log::warn!(
                    "Control '{}': threat '{}' resolves to no catalog threat",
                    control.id,
                    declared
                );
            }
            threat_ordinals.extend(resolved.indices);
        }

        let mut criterion_indices = BTreeSet::new();
        for declared in split_list(&control.criteria) {
            let resolved = self.matcher.resolve(declared, &THREAT_CRITERIA);
            if resolved.kind == MatchKind::NoMatch {
                log::warn!(
                    "Control '{}': criterion '{}' resolves to no threat criterion",
                    control.id,
                    declared
                );
            }
            criterion_indices.extend(resolved.indices);
        }

        let asset_ordinals = segment::resolve_segments(&control.segment, &self.assets);

        let mut triples = Vec::new();
        for &threat in &threat_ordinals {
            for &criterion in &criterion_indices {
                for &asset in &asset_ordinals {
                    triples.push((threat, asset, criterion));
                }
            }
        }
        triples
    }

    /// Apply a control: decrement every covered score by 1, floored at 1,
    /// then record the id. Returns the number of covered triples that had
    /// a recorded score. Fails with `DuplicateApply` before any mutation
    /// if the control is already in effect.
    pub fn apply_control(&mut self, id: &str) -> RiskResult<usize> {
        let control = self.find_control(id)?.clone();
        if self.is_applied(&control.id) {
            return Err(RiskError::DuplicateApply { id: control.id });
        }

        let triples = self.control_triples(&control);
        if triples.is_empty() {
            log::warn!(
                "Control '{}' covers no (threat, asset, criterion) triple",
                control.id
            );
        }

        let mut touched = 0;
        for (threat, asset, criterion) in triples {
            if let Some(score) =
                self.scores
                    .get_mut(AssessmentContext::Threat(threat), asset, criterion)
            {
                *score = score.saturating_sub(1).max(1);
                touched += 1;
            }
        }

        log::info!("Applied control '{}': {} scores touched", control.id, touched);
        self.applied.push(control.id);
        Ok(touched)
    }

    /// Remove a control: increment every covered score by 1, capped at 5,
    /// then erase the id. Returns the number of covered triples that had a
    /// recorded score. Fails with `NotApplied` before any mutation if the
    /// control is not in effect.
    pub fn remove_control(&mut self, id: &str) -> RiskResult<usize> {
        let control = self.find_control(id)?.clone();
        if !self.is_applied(&control.id) {
            return Err(RiskError::NotApplied { id: control.id });
        }

        let mut touched = 0;
        for (threat, asset, criterion) in self.control_triples(&control) {
            if let Some(score) =
                self.scores
                    .get_mut(AssessmentContext::Threat(threat), asset, criterion)
            {
                *score = (*score + 1).min(5);
                touched += 1;
            }
        }

        log::info!("Removed control '{}': {} scores touched", control.id, touched);
        self.applied.retain(|applied| applied != &control.id);
        Ok(touched)
    }

    /// Remove every currently applied control, ending with an empty set.
    pub fn clear_controls(&mut self) -> RiskResult<usize> {
        let ids = self.applied.clone();
        let mut touched = 0;
        for id in ids {
            touched += self.remove_control(&id)?;
        }
        Ok(touched)
    }
}
