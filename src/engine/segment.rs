//! Segment compatibility resolution.
//!
//! A control declares the asset segments it is compatible with as a
//! comma-separated free-text expression ("Space", "Ground, Link",
//! "Human", ...). Resolution maps that expression to the set of catalog
//! asset ordinals it covers. An expression that covers nothing is a
//! diagnostic, never an error: the control simply affects no asset.

use std::collections::BTreeSet;

use crate::models::Asset;

/// Resolve a segment expression to the ascending, deduplicated set of
/// asset ordinals it covers.
///
/// Each comma-separated token is trimmed and lowercased; the token
/// "human" is an alias for "user ground segment". A token matches an
/// asset when it equals the asset's category, when it equals or
/// substring-relates to the subcategory (either direction), or when it is
/// "user ground segment"/"human resources" and the asset is a ground
/// asset whose subcategory mentions users.
pub fn resolve_segments(expression: &str, assets: &[Asset]) -> Vec<usize> {
    let tokens: Vec<String> = expression
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .map(|token| {
            if token == "human" {
                "user ground segment".to_string()
            } else {
                token
            }
        })
        .collect();

    if tokens.is_empty() {
        log::warn!(
            "Segment expression '{}' has no usable tokens; control covers no asset",
            expression
        );
        return Vec::new();
    }

    let mut matched = BTreeSet::new();
    for token in &tokens {
        for (ordinal, asset) in assets.iter().enumerate() {
            if token_matches(token, asset) {
                matched.insert(ordinal);
            }
        }
    }

    if matched.is_empty() {
        log::warn!(
            "Segment expression '{}' matches no catalog asset",
            expression
        );
    }

    matched.into_iter().collect()
}

fn token_matches(token: &str, asset: &Asset) -> bool {
    let category = asset.category.to_lowercase();
    let subcategory = asset.subcategory.to_lowercase();

    if token == category {
        return true;
    }

    if !subcategory.is_empty()
        && (subcategory.contains(token) || token.contains(subcategory.as_str()))
    {
        return true;
    }

    (token == "user ground segment" || token == "human resources")
        && category == "ground"
        && subcategory.contains("user")
}
