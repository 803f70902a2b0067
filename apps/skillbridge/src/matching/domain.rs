//! Domain Detector: infers the professional discipline a text belongs to from a
//! fixed keyword histogram.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::matching::extractor::NormalizedText;

/// Coarse professional discipline. "Unknown" is modelled as `Option::None` by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    ComputerScience,
    ElectricalEngineering,
    MechanicalEngineering,
    DataScience,
    #[serde(rename = "devops")]
    DevOps,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::ComputerScience => "computer_science",
            Domain::ElectricalEngineering => "electrical_engineering",
            Domain::MechanicalEngineering => "mechanical_engineering",
            Domain::DataScience => "data_science",
            Domain::DevOps => "devops",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of each domain's keywords present in `text`, in table order.
pub fn domain_scores(text: &str, domain_keywords: &BTreeMap<Domain, Vec<String>>) -> Vec<(Domain, usize)> {
    let normalized = NormalizedText::new(text);
    domain_keywords
        .iter()
        .map(|(domain, keywords)| {
            let hits = keywords
                .iter()
                .filter(|kw| normalized.contains_phrase(kw))
                .count();
            (*domain, hits)
        })
        .collect()
}

/// The domain with the strictly highest keyword count.
///
/// Returns `None` when no keyword appears at all, and also when two or more domains
/// share the top count: a tie carries no evidence for either side.
pub fn detect_domain(text: &str, domain_keywords: &BTreeMap<Domain, Vec<String>>) -> Option<Domain> {
    let scores = domain_scores(text, domain_keywords);

    let best = scores.iter().map(|(_, hits)| *hits).max().unwrap_or(0);
    if best == 0 {
        return None;
    }

    let mut leaders = scores.iter().filter(|(_, hits)| *hits == best);
    match (leaders.next(), leaders.next()) {
        (Some((domain, _)), None) => Some(*domain),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::vocabulary::Vocabulary;

    #[test]
    fn test_detects_computer_science() {
        let vocab = Vocabulary::builtin();
        let domain = detect_domain(
            "Backend software engineer writing Python APIs and React frontends",
            vocab.domain_keywords(),
        );
        assert_eq!(domain, Some(Domain::ComputerScience));
    }

    #[test]
    fn test_detects_electrical_engineering() {
        let vocab = Vocabulary::builtin();
        let domain = detect_domain(
            "Design analog circuit boards, PCB layout, VLSI verification and microcontroller firmware",
            vocab.domain_keywords(),
        );
        assert_eq!(domain, Some(Domain::ElectricalEngineering));
    }

    #[test]
    fn test_no_keywords_is_unknown() {
        let vocab = Vocabulary::builtin();
        assert_eq!(
            detect_domain("Barista with five years of latte art", vocab.domain_keywords()),
            None
        );
    }

    #[test]
    fn test_tie_is_unknown() {
        let vocab = Vocabulary::builtin();
        // "python" → computer_science, "terraform" → devops: one hit each.
        assert_eq!(
            detect_domain("python and terraform", vocab.domain_keywords()),
            None
        );
    }

    #[test]
    fn test_shared_keyword_counts_for_both_domains() {
        let vocab = Vocabulary::builtin();
        let scores = domain_scores("docker", vocab.domain_keywords());
        let hits: BTreeMap<Domain, usize> = scores.into_iter().collect();
        assert_eq!(hits[&Domain::ComputerScience], 1);
        assert_eq!(hits[&Domain::DevOps], 1);
        assert_eq!(hits[&Domain::DataScience], 0);
    }

    #[test]
    fn test_domain_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Domain::ElectricalEngineering).unwrap(),
            "\"electrical_engineering\""
        );
        assert_eq!(serde_json::to_string(&Domain::DevOps).unwrap(), "\"devops\"");
        let parsed: Domain = serde_json::from_str("\"data_science\"").unwrap();
        assert_eq!(parsed, Domain::DataScience);
    }

    #[test]
    fn test_display_matches_serde_name() {
        assert_eq!(Domain::MechanicalEngineering.to_string(), "mechanical_engineering");
    }
}
