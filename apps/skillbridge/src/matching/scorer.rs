//! Matcher/Scorer: compares a resume's skills with a job's required skills and
//! produces a clamped percentage, domain verdicts and a suitability bucket.
//!
//! Algorithm:
//! 1. required = job skills, or the vocabulary's default set when the job has none
//! 2. matched = required ∩ resume, missing = required − resume
//! 3. base = |matched| / |required| × 100
//! 4. both domains known and different → subtract `domain_penalty`
//! 5. clamp to [0, 100], bucket by the suitability thresholds

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::domain::{detect_domain, Domain};
use crate::matching::extractor::SkillSet;
use crate::matching::vocabulary::Vocabulary;

/// Scoring constants. Carried in `Config` and injected into every scoring call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub excellent_threshold: f64,
    pub good_threshold: f64,
    pub moderate_threshold: f64,
    /// Percentage points removed on a cross-discipline mismatch.
    pub domain_penalty: f64,
    pub weeks_per_skill: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            excellent_threshold: 80.0,
            good_threshold: 60.0,
            moderate_threshold: 40.0,
            domain_penalty: 30.0,
            weeks_per_skill: 4,
        }
    }
}

/// Qualitative bucket for a match percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suitability {
    Excellent,
    Good,
    Moderate,
    Challenging,
}

impl Suitability {
    pub fn from_percentage(percentage: f64, config: &ScoringConfig) -> Self {
        if percentage >= config.excellent_threshold {
            Suitability::Excellent
        } else if percentage >= config.good_threshold {
            Suitability::Good
        } else if percentage >= config.moderate_threshold {
            Suitability::Moderate
        } else {
            Suitability::Challenging
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Suitability::Excellent => "Excellent",
            Suitability::Good => "Good",
            Suitability::Moderate => "Moderate",
            Suitability::Challenging => "Challenging",
        }
    }
}

impl fmt::Display for Suitability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one resume-vs-job comparison. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub matched: SkillSet,
    pub missing: SkillSet,
    /// Denominator actually used; equals the default set when the job listed nothing.
    pub required: SkillSet,
    pub used_default_requirements: bool,
    pub base_percentage: f64,
    /// Final score, always within [0, 100].
    pub percentage: f64,
    pub resume_domain: Option<Domain>,
    pub job_domain: Option<Domain>,
    pub domain_penalty_applied: bool,
    pub suitability: Suitability,
}

/// Scores `resume_skills` against `required_skills`. Never fails.
pub fn score(
    resume_text: &str,
    job_text: &str,
    resume_skills: &SkillSet,
    required_skills: &SkillSet,
    vocabulary: &Vocabulary,
    config: &ScoringConfig,
) -> MatchResult {
    let used_default_requirements = required_skills.is_empty();
    let required = if used_default_requirements {
        SkillSet::from_skills(vocabulary.default_skills())
    } else {
        required_skills.clone()
    };

    let matched = required.intersection(resume_skills);
    let missing = required.difference(resume_skills);
    debug_assert_eq!(matched.union(&missing).len(), required.len());

    let base_percentage = if required.is_empty() {
        0.0
    } else {
        round2(matched.len() as f64 / required.len() as f64 * 100.0)
    };

    let resume_domain = detect_domain(resume_text, vocabulary.domain_keywords());
    let job_domain = detect_domain(job_text, vocabulary.domain_keywords());

    let domain_penalty_applied = matches!(
        (resume_domain, job_domain),
        (Some(r), Some(j)) if r != j
    );

    let penalized = if domain_penalty_applied {
        debug!(
            "Domain mismatch: resume={:?} job={:?}, applying -{}",
            resume_domain, job_domain, config.domain_penalty
        );
        base_percentage - config.domain_penalty
    } else {
        base_percentage
    };

    let percentage = round2(penalized.clamp(0.0, 100.0));
    let suitability = Suitability::from_percentage(percentage, config);

    MatchResult {
        matched,
        missing,
        required,
        used_default_requirements,
        base_percentage,
        percentage,
        resume_domain,
        job_domain,
        domain_penalty_applied,
        suitability,
    }
}

/// Rounds to two decimals, the precision reported to callers.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::extractor::extract;

    const CS_RESUME: &str = "Software engineer with five years building backend services \
        in Python and Django, React frontends, SQL databases and Docker deployments.";
    const EE_JOB: &str = "Electrical engineer wanted for circuit design, PCB layout, \
        VLSI verification and microcontroller bring-up on new hardware.";
    const CS_JOB: &str = "We are hiring a software engineer to build backend APIs with \
        Python, Django, React, SQL and Docker for our web platform.";

    fn skills(items: &[&str]) -> SkillSet {
        SkillSet::from_skills(items.iter().copied())
    }

    fn run(resume: &SkillSet, required: &SkillSet, resume_text: &str, job_text: &str) -> MatchResult {
        score(
            resume_text,
            job_text,
            resume,
            required,
            &Vocabulary::builtin(),
            &ScoringConfig::default(),
        )
    }

    #[test]
    fn test_cs_resume_vs_ee_job_scores_zero() {
        let vocab = Vocabulary::builtin();
        let resume = extract(CS_RESUME, &vocab);
        let required = extract(EE_JOB, &vocab);

        let result = run(&resume, &required, CS_RESUME, EE_JOB);

        assert!(result.matched.is_empty());
        assert_eq!(result.resume_domain, Some(Domain::ComputerScience));
        assert_eq!(result.job_domain, Some(Domain::ElectricalEngineering));
        assert!(result.domain_penalty_applied);
        assert_eq!(result.percentage, 0.0);
        assert_eq!(result.suitability, Suitability::Challenging);
    }

    #[test]
    fn test_identical_skills_same_domain_is_perfect() {
        let vocab = Vocabulary::builtin();
        let resume = extract(CS_RESUME, &vocab);
        let required = resume.clone();

        let result = run(&resume, &required, CS_RESUME, CS_JOB);

        assert_eq!(result.resume_domain, result.job_domain);
        assert!(!result.domain_penalty_applied);
        assert_eq!(result.percentage, 100.0);
        assert!(result.missing.is_empty());
        assert_eq!(result.suitability, Suitability::Excellent);
    }

    #[test]
    fn test_empty_requirements_use_default_set() {
        let resume = skills(&["communication", "python"]);
        let result = run(&resume, &SkillSet::new(), "", "");

        assert!(result.used_default_requirements);
        assert_eq!(
            result.required.as_slice(),
            ["communication", "problem solving", "teamwork"]
        );
        assert_eq!(result.matched.as_slice(), ["communication"]);
        assert_eq!(result.percentage, 33.33);
    }

    #[test]
    fn test_matched_and_missing_partition_required() {
        let cases = [
            (vec!["python", "sql"], vec!["python", "sql", "docker", "aws"]),
            (vec![], vec!["python"]),
            (vec!["rust", "go"], vec!["java"]),
            (vec!["a", "b", "c"], vec!["c", "b", "a"]),
        ];
        for (resume, required) in cases {
            let resume = skills(&resume);
            let required = skills(&required);
            let result = run(&resume, &required, "", "");

            let union = result.matched.union(&result.missing);
            assert_eq!(union.len(), required.len());
            assert!(required.iter().all(|s| union.contains(s)));
            assert!(result.matched.intersection(&result.missing).is_empty());
        }
    }

    #[test]
    fn test_percentage_always_in_range() {
        let required = skills(&["python", "sql", "docker"]);
        let resumes = [
            skills(&[]),
            skills(&["python"]),
            skills(&["python", "sql", "docker", "extra"]),
        ];
        for resume in &resumes {
            for (rt, jt) in [(CS_RESUME, EE_JOB), (CS_RESUME, CS_JOB), ("", "")] {
                let result = run(resume, &required, rt, jt);
                assert!((0.0..=100.0).contains(&result.percentage));
            }
        }
    }

    #[test]
    fn test_domain_mismatch_subtracts_penalty() {
        // 2 of 3 matched → 66.67 base, mismatch → 36.67.
        let resume = skills(&["circuit", "pcb"]);
        let required = skills(&["circuit", "pcb", "vlsi"]);
        let result = run(&resume, &required, CS_RESUME, EE_JOB);

        assert!(result.domain_penalty_applied);
        assert_eq!(result.base_percentage, 66.67);
        let expected = round2((result.base_percentage - 30.0).max(0.0));
        assert!((result.percentage - expected).abs() < 1e-9);
        assert_eq!(result.suitability, Suitability::Challenging);
    }

    #[test]
    fn test_unknown_domain_skips_penalty() {
        let resume = skills(&["python"]);
        let required = skills(&["python", "sql"]);
        let result = run(&resume, &required, "I like gardening", EE_JOB);

        assert_eq!(result.resume_domain, None);
        assert!(!result.domain_penalty_applied);
        assert_eq!(result.percentage, 50.0);
        assert_eq!(result.suitability, Suitability::Moderate);
    }

    #[test]
    fn test_score_is_idempotent() {
        let vocab = Vocabulary::builtin();
        let resume = extract(CS_RESUME, &vocab);
        let required = extract(CS_JOB, &vocab);
        let first = run(&resume, &required, CS_RESUME, CS_JOB);
        let second = run(&resume, &required, CS_RESUME, CS_JOB);
        assert_eq!(first, second);
    }

    #[test]
    fn test_suitability_thresholds() {
        let config = ScoringConfig::default();
        assert_eq!(Suitability::from_percentage(80.0, &config), Suitability::Excellent);
        assert_eq!(Suitability::from_percentage(79.99, &config), Suitability::Good);
        assert_eq!(Suitability::from_percentage(60.0, &config), Suitability::Good);
        assert_eq!(Suitability::from_percentage(40.0, &config), Suitability::Moderate);
        assert_eq!(Suitability::from_percentage(39.99, &config), Suitability::Challenging);
        assert_eq!(Suitability::from_percentage(0.0, &config), Suitability::Challenging);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(100.0), 100.0);
    }
}
