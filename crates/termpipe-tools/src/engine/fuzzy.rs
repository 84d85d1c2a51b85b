//! Similarity-scored "did you mean" search.

use similar::TextDiff;

use super::lines::FileLines;
use super::locate::MatchCandidate;

/// Fuzzy matching knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyConfig {
    /// Minimum ratio for a line to count as similar.
    pub threshold: f64,
    /// Score assigned when one side contains the other.
    pub containment_score: f64,
    /// Maximum candidates returned.
    pub limit: usize,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            threshold: 0.6,
            containment_score: 0.9,
            limit: 5,
        }
    }
}

impl FuzzyConfig {
    /// Same config with a different threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Character similarity `2·M / (len(a) + len(b))`.
///
/// Two empty strings are identical.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    f64::from(TextDiff::from_chars(a, b).ratio())
}

/// Score one line against an already-normalized target.
fn score_line(target: &str, line: &str, config: &FuzzyConfig) -> Option<f64> {
    let candidate = line.trim().to_lowercase();
    if candidate.is_empty() {
        return None;
    }

    if candidate.contains(target) || target.contains(candidate.as_str()) {
        return Some(config.containment_score);
    }

    let ratio = similarity(target, &candidate);
    (ratio >= config.threshold).then_some(ratio)
}

/// Lines similar to `target`, best first.
///
/// Both sides are trimmed and lower-cased; blank lines never match and a
/// blank target yields nothing. Ties keep file order.
#[must_use]
pub fn find_similar(lines: &FileLines, target: &str, config: &FuzzyConfig) -> Vec<MatchCandidate> {
    let normalized = target.trim().to_lowercase();
    if normalized.is_empty() || config.limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<MatchCandidate> = lines
        .numbered()
        .filter_map(|(i, line)| {
            score_line(&normalized, line, config).map(|score| MatchCandidate {
                line: i,
                content: line.to_owned(),
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.line.cmp(&b.line)));
    scored.truncate(config.limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typo_scores_above_threshold() {
        let lines = FileLines::parse("hello world");
        let hits = find_similar(&lines, "helo wrld", &FuzzyConfig::default());
        assert_eq!(hits.len(), 1);
        assert!(hits[0].score >= 0.6, "score was {}", hits[0].score);
    }

    #[test]
    fn test_containment_either_direction() {
        let config = FuzzyConfig::default();
        let lines = FileLines::parse("    let total = compute(items);\nx");

        let hits = find_similar(&lines, "compute(items)", &config);
        assert!((hits[0].score - 0.9).abs() < f64::EPSILON);

        let hits = find_similar(&lines, "let total = compute(items); // done", &config);
        assert!(hits.is_empty() || hits[0].line == 0);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let lines = FileLines::parse("   RETURN Value   ");
        let hits = find_similar(&lines, "return value", &FuzzyConfig::default());
        assert_eq!(hits.len(), 1);
        assert!((hits[0].score - 0.9).abs() < f64::EPSILON);
        assert_eq!(hits[0].content, "   RETURN Value   ");
    }

    #[test]
    fn test_blank_lines_and_target_skipped() {
        let lines = FileLines::parse("\n   \nabc");
        assert!(find_similar(&lines, "   ", &FuzzyConfig::default()).is_empty());
        let hits = find_similar(&lines, "abc", &FuzzyConfig::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].line, 2);
    }

    #[test]
    fn test_sorted_and_limited() {
        let content = (0..10)
            .map(|i| format!("value_{i} = compute()"))
            .collect::<Vec<_>>()
            .join("\n");
        let lines = FileLines::parse(&content);
        let config = FuzzyConfig {
            limit: 3,
            ..FuzzyConfig::default()
        };

        let hits = find_similar(&lines, "value_x = compute()", &config);
        assert_eq!(hits.len(), 3);
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
        // equal scores keep file order
        assert_eq!(hits[0].line, 0);
    }

    #[test]
    fn test_unrelated_lines_rejected() {
        let lines = FileLines::parse("fn main() {}");
        assert!(find_similar(&lines, "zzzz qqqq", &FuzzyConfig::default()).is_empty());
    }

    #[test]
    fn test_similarity_bounds() {
        assert!((similarity("", "") - 1.0).abs() < f64::EPSILON);
        assert!((similarity("abc", "abc") - 1.0).abs() < f64::EPSILON);
        assert!(similarity("abc", "xyz") < 0.01);
    }
}
