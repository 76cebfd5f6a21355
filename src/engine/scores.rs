//! Criterion score store.
//!
//! Scores are integers in 1..=5 keyed by (assessment context, asset
//! ordinal, criterion index). Entries are only ever created by explicit
//! writes; a missing entry means "not assessed", which the aggregator
//! treats as absent rather than zero.

use std::collections::{BTreeSet, HashMap};

use crate::errors::{RiskError, RiskResult};
use crate::models::AssessmentContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ScoreKey {
    context: AssessmentContext,
    asset: usize,
    criterion: usize,
}

/// The only mutable state of the engine besides the applied-control set.
#[derive(Debug, Clone, Default)]
pub struct ScoreStore {
    scores: HashMap<ScoreKey, u8>,
}

impl ScoreStore {
    /// Store a score. 0 clears the entry, 1..=5 is stored, anything else
    /// is rejected without mutation.
    pub fn set(
        &mut self,
        context: AssessmentContext,
        asset: usize,
        criterion: usize,
        value: u8,
    ) -> RiskResult<()> {
        let key = ScoreKey {
            context,
            asset,
            criterion,
        };
        match value {
            0 => {
                self.scores.remove(&key);
                Ok(())
            }
            1..=5 => {
                self.scores.insert(key, value);
                Ok(())
            }
            _ => Err(RiskError::InvalidScore { value }),
        }
    }

    pub fn get(&self, context: AssessmentContext, asset: usize, criterion: usize) -> Option<u8> {
        self.scores.get(&ScoreKey {
            context,
            asset,
            criterion,
        })
        .copied()
    }

    pub(crate) fn get_mut(
        &mut self,
        context: AssessmentContext,
        asset: usize,
        criterion: usize,
    ) -> Option<&mut u8> {
        self.scores.get_mut(&ScoreKey {
            context,
            asset,
            criterion,
        })
    }

    pub fn clear(&mut self, context: AssessmentContext, asset: usize, criterion: usize) {
        self.scores.remove(&ScoreKey {
            context,
            asset,
            criterion,
        });
    }

    /// The present scores among `subset` for one (context, asset) pair,
    /// in subset order. Absent criteria are skipped, not zero-filled.
    pub fn present(
        &self,
        context: AssessmentContext,
        asset: usize,
        subset: &[usize],
    ) -> Vec<u8> {
        subset
            .iter()
            .filter_map(|&criterion| self.get(context, asset, criterion))
            .collect()
    }

    /// Asset ordinals with at least one recorded score in `context`, in
    /// ascending order.
    pub fn assessed_assets(&self, context: AssessmentContext) -> Vec<usize> {
        let ordinals: BTreeSet<usize> = self
            .scores
            .keys()
            .filter(|key| key.context == context)
            .map(|key| key.asset)
            .collect();
        ordinals.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
