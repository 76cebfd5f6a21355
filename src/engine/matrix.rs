//! ISO 27005-style risk matrix.
//!
//! One 25-entry lookup table combining two categories into one, exposed
//! through two distinctly named entry points so the two semantic uses can
//! diverge later without silently affecting each other. The table is
//! intentionally asymmetric: (Very High, Very Low) gives Medium while
//! (Very Low, Very High) gives Low.

use crate::models::Category::{self, High, Low, Medium, VeryHigh, VeryLow};

/// Row = first operand, column = second operand, both ascending
/// Very Low..Very High.
const RISK_MATRIX: [[Category; 5]; 5] = [
    // second:  Very Low  Low      Medium   High      Very High
    [VeryLow, VeryLow, Low, Low, Low],            // first = Very Low
    [VeryLow, Low, Low, Medium, Medium],          // first = Low
    [Low, Low, Medium, High, High],               // first = Medium
    [Low, Medium, High, High, VeryHigh],          // first = High
    [Medium, High, High, VeryHigh, VeryHigh],     // first = Very High
];

fn combine(first: Category, second: Category) -> Category {
    let row = first.priority() as usize - 1;
    let column = second.priority() as usize - 1;
    RISK_MATRIX[row][column]
}

/// Combine a threat-side aggregate with the asset-side aggregate of the
/// same semantic kind (likelihood with likelihood, impact with impact).
pub fn compose_same_kind(threat_level: Category, asset_level: Category) -> Category {
    combine(threat_level, asset_level)
}

/// Final risk from combined likelihood and combined impact.
pub fn derive_risk(likelihood: Category, impact: Category) -> Category {
    combine(likelihood, impact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asymmetry_is_preserved() {
        assert_eq!(derive_risk(VeryHigh, VeryLow), Medium);
        assert_eq!(derive_risk(VeryLow, VeryHigh), Low);
        assert_eq!(derive_risk(High, VeryLow), Low);
        assert_eq!(derive_risk(VeryLow, High), Low);
        assert_eq!(derive_risk(High, Low), Medium);
        assert_eq!(derive_risk(Low, High), Medium);
    }

    #[test]
    fn test_diagonal() {
        assert_eq!(derive_risk(VeryLow, VeryLow), VeryLow);
        assert_eq!(derive_risk(Low, Low), Low);
        assert_eq!(derive_risk(Medium, Medium), Medium);
        assert_eq!(derive_risk(High, High), High);
        assert_eq!(derive_risk(VeryHigh, VeryHigh), VeryHigh);
    }

    #[test]
    fn test_full_table() {
        // The complete 25-entry table, spelled out so an edit to the
        // constant cannot slip through unnoticed.
        let expected = [
            (VeryLow, VeryLow, VeryLow),
            (VeryLow, Low, VeryLow),
            (VeryLow, Medium, Low),
            (VeryLow, High, Low),
            (VeryLow, VeryHigh, Low),
            (Low, VeryLow, VeryLow),
            (Low, Low, Low),
            (Low, Medium, Low),
            (Low, High, Medium),
            (Low, VeryHigh, Medium),
            (Medium, VeryLow, Low),
            (Medium, Low, Low),
            (Medium, Medium, Medium),
            (Medium, High, High),
            (Medium, VeryHigh, High),
            (High, VeryLow, Low),
            (High, Low, Medium),
            (High, Medium, High),
            (High, High, High),
            (High, VeryHigh, VeryHigh),
            (VeryHigh, VeryLow, Medium),
            (VeryHigh, Low, High),
            (VeryHigh, Medium, High),
            (VeryHigh, High, VeryHigh),
            (VeryHigh, VeryHigh, VeryHigh),
        ];
        for (first, second, result) in expected {
            assert_eq!(
                derive_risk(first, second),
                result,
                "({first:?}, {second:?})"
            );
        }
    }

    #[test]
    fn test_both_entry_points_share_the_table() {
        for first in Category::ALL {
            for second in Category::ALL {
                assert_eq!(
                    compose_same_kind(first, second),
                    derive_risk(first, second)
                );
            }
        }
    }
}
