//! Free-text name resolution.
//!
//! Controls reference threats and criteria by free text that rarely lines
//! up exactly with the live catalogs. Resolution is a pure function of the
//! declared text and the candidate list, kept separate from the engine so
//! it can be tested on its own. A declared name may legitimately resolve
//! to several candidates; callers iterate the whole set.

use regex::Regex;

/// How a declared name resolved against the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Case-insensitive equality with exactly one candidate.
    Exact,
    /// Substring or normalized-form matching over all candidates.
    Fuzzy,
    /// Nothing matched.
    NoMatch,
}

/// Result of resolving one declared name: the match kind and the ordinal
/// indices of every matched candidate.
#[derive(Debug, Clone)]
pub struct NameMatch {
    pub kind: MatchKind,
    pub indices: Vec<usize>,
}

impl NameMatch {
    fn no_match() -> Self {
        Self {
            kind: MatchKind::NoMatch,
            indices: Vec::new(),
        }
    }
}

/// Matcher with pre-compiled normalization patterns.
pub struct NameMatcher {
    parenthetical: Option<Regex>,
    separators: Option<Regex>,
}

impl NameMatcher {
    pub fn new() -> Self {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| {
                    log::warn!("Failed to compile normalization regex '{}': {}", pattern, e);
                    e
                })
                .ok()
        };

        Self {
            parenthetical: compile(r"\([^)]*\)"),
            separators: compile(r"[^a-z0-9]+"),
        }
    }

    /// Normalized form used for equality checks: lowercase, parenthesized
    /// qualifiers removed, whitespace and punctuation stripped.
    pub fn normalize(&self, name: &str) -> String {
        let mut normalized = name.trim().to_lowercase();
        if let Some(pattern) = &self.parenthetical {
            normalized = pattern.replace_all(&normalized, "").into_owned();
        }
        if let Some(pattern) = &self.separators {
            normalized = pattern.replace_all(&normalized, "").into_owned();
        }
        normalized
    }

    /// Resolve a declared name against a candidate list.
    ///
    /// An exact (case-insensitive) equality returns that candidate alone.
    /// Otherwise every candidate matches that contains the declared text,
    /// is contained in it, or shares its normalized form.
    pub fn resolve(&self, declared: &str, candidates: &[&str]) -> NameMatch {
        let declared = declared.trim();
        if declared.is_empty() {
            return NameMatch::no_match();
        }

        if let Some(index) = candidates
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(declared))
        {
            return NameMatch {
                kind: MatchKind::Exact,
                indices: vec![index],
            };
        }

        let declared_lower = declared.to_lowercase();
        let declared_normalized = self.normalize(declared);

        let indices: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter(|(_, candidate)| {
                let candidate_lower = candidate.to_lowercase();
                candidate_lower.contains(&declared_lower)
                    || declared_lower.contains(&candidate_lower)
                    || (!declared_normalized.is_empty()
                        && self.normalize(candidate) == declared_normalized)
            })
            .map(|(index, _)| index)
            .collect();

        if indices.is_empty() {
            NameMatch::no_match()
        } else {
            NameMatch {
                kind: MatchKind::Fuzzy,
                indices,
            }
        }
    }
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREATS: [&str; 5] = [
        "Data Corruption",
        "Denial-of-Service",
        "Jamming",
        "Masquerade/Spoofing",
        "Unauthorized Access/Hijacking",
    ];

    #[test]
    fn test_exact_match_returns_single_candidate() {
        let matcher = NameMatcher::new();
        let result = matcher.resolve("Jamming", &THREATS);
        assert_eq!(result.kind, MatchKind::Exact);
        assert_eq!(result.indices, vec![2]);

        let result = matcher.resolve("  jamming ", &THREATS);
        assert_eq!(result.kind, MatchKind::Exact);
        assert_eq!(result.indices, vec![2]);
    }

    #[test]
    fn test_substring_matches_both_directions() {
        let matcher = NameMatcher::new();

        // Declared text contained in a candidate.
        let result = matcher.resolve("Spoofing", &THREATS);
        assert_eq!(result.kind, MatchKind::Fuzzy);
        assert_eq!(result.indices, vec![3]);

        // Candidate contained in the declared text.
        let result = matcher.resolve("Jamming and meaconing of uplinks", &THREATS);
        assert_eq!(result.kind, MatchKind::Fuzzy);
        assert_eq!(result.indices, vec![2]);
    }

    #[test]
    fn test_normalized_equality() {
        let matcher = NameMatcher::new();
        let result = matcher.resolve("denial of service", &THREATS);
        assert_eq!(result.kind, MatchKind::Fuzzy);
        assert_eq!(result.indices, vec![1]);
    }

    #[test]
    fn test_normalize_strips_parentheticals() {
        let matcher = NameMatcher::new();
        assert_eq!(
            matcher.normalize("Replay (recorded telecommands)"),
            "replay"
        );
        assert_eq!(matcher.normalize("Denial-of-Service"), "denialofservice");
    }

    #[test]
    fn test_multiple_matches_are_all_returned() {
        let matcher = NameMatcher::new();
        let candidates = ["Software Threats: Malware", "Software Threats: Backdoor"];
        let result = matcher.resolve("Software Threats", &candidates);
        assert_eq!(result.kind, MatchKind::Fuzzy);
        assert_eq!(result.indices, vec![0, 1]);
    }

    #[test]
    fn test_no_match() {
        let matcher = NameMatcher::new();
        let result = matcher.resolve("Orbital Debris", &THREATS);
        assert_eq!(result.kind, MatchKind::NoMatch);
        assert!(result.indices.is_empty());

        let result = matcher.resolve("   ", &THREATS);
        assert_eq!(result.kind, MatchKind::NoMatch);
    }
}
