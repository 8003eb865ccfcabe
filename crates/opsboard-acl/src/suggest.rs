//! Closest-name lookup for "did you mean" hints.

/// Minimum Jaro-Winkler similarity for a candidate to be suggested.
pub const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Return the candidate most similar to `input`, if it clears the threshold.
pub fn closest<'a, I>(input: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let input = input.to_ascii_lowercase();
    candidates
        .into_iter()
        .map(|c| (c, strsim::jaro_winkler(&input, c)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_picks_best() {
        let names = ["manager", "operator", "agent"];
        assert_eq!(closest("manger", names), Some("manager"));
        assert_eq!(closest("operater", names), Some("operator"));
    }

    #[test]
    fn test_closest_is_case_insensitive() {
        assert_eq!(closest("AGENT", ["agent", "admin"]), Some("agent"));
    }

    #[test]
    fn test_closest_none_when_far() {
        assert_eq!(closest("zzzz", ["manager", "agent"]), None);
    }

    #[test]
    fn test_closest_empty_candidates() {
        assert_eq!(closest("agent", std::iter::empty()), None);
    }
}
