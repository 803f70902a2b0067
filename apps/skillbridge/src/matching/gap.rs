//! Role gap analysis: candidate skill lists against the role catalog.
//!
//! Unlike resume scoring there is no free text here: the candidate states their
//! skills and the target role's requirements come from `Vocabulary`. Matching is
//! case-insensitive exact equality; results keep the catalog's display casing.

use serde::{Deserialize, Serialize};

use crate::matching::extractor::SkillSet;
use crate::matching::scorer::round2;

/// Most skills planned by the learning-path endpoint.
pub const MAX_LEARNING_SKILLS: usize = 8;

/// A candidate as submitted by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub current_role: String,
    pub skills: Vec<String>,
    pub experience_years: i32,
}

/// Coverage of one role's required skills.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapAnalysis {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// Within [0, 100], two decimals.
    pub match_percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Junior,
    #[serde(rename = "Mid-level")]
    MidLevel,
    Senior,
}

impl ExperienceLevel {
    pub fn from_years(years: i32) -> Self {
        if years < 2 {
            ExperienceLevel::Junior
        } else if years < 5 {
            ExperienceLevel::MidLevel
        } else {
            ExperienceLevel::Senior
        }
    }
}

/// Five-band readiness verdict for a gap percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessLevel {
    #[serde(rename = "Highly Qualified")]
    HighlyQualified,
    #[serde(rename = "Well Qualified")]
    WellQualified,
    #[serde(rename = "Moderately Qualified")]
    ModeratelyQualified,
    #[serde(rename = "Entry Level")]
    EntryLevel,
    #[serde(rename = "Needs Development")]
    NeedsDevelopment,
}

impl ReadinessLevel {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            ReadinessLevel::HighlyQualified
        } else if percentage >= 60.0 {
            ReadinessLevel::WellQualified
        } else if percentage >= 40.0 {
            ReadinessLevel::ModeratelyQualified
        } else if percentage >= 20.0 {
            ReadinessLevel::EntryLevel
        } else {
            ReadinessLevel::NeedsDevelopment
        }
    }
}

/// One row of a candidate comparison.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateRanking {
    pub candidate_name: String,
    pub experience_level: ExperienceLevel,
    pub match_percentage: f64,
    pub readiness_level: ReadinessLevel,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Splits `required` into what the candidate has and what they lack, in `required` order.
pub fn analyze_gap(candidate_skills: &[String], required: &[String]) -> GapAnalysis {
    let have = SkillSet::from_skills(candidate_skills);

    let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = required
        .iter()
        .cloned()
        .partition(|skill| have.contains(skill));

    let match_percentage = if required.is_empty() {
        0.0
    } else {
        round2(matched_skills.len() as f64 / required.len() as f64 * 100.0).clamp(0.0, 100.0)
    };

    GapAnalysis {
        matched_skills,
        missing_skills,
        match_percentage,
    }
}

/// Scores every candidate against `required`, best match first.
/// Equal scores keep submission order.
pub fn rank_candidates(candidates: &[Candidate], required: &[String]) -> Vec<CandidateRanking> {
    let mut rankings: Vec<CandidateRanking> = candidates
        .iter()
        .map(|candidate| {
            let gap = analyze_gap(&candidate.skills, required);
            CandidateRanking {
                candidate_name: candidate.name.clone(),
                experience_level: ExperienceLevel::from_years(candidate.experience_years),
                match_percentage: gap.match_percentage,
                readiness_level: ReadinessLevel::from_percentage(gap.match_percentage),
                matched_skills: gap.matched_skills,
                missing_skills: gap.missing_skills,
            }
        })
        .collect();

    rankings.sort_by(|a, b| b.match_percentage.total_cmp(&a.match_percentage));
    rankings
}

/// Skills to put on a learning plan: the missing ones (capped), or advanced follow-ups
/// when nothing is missing.
pub fn learning_targets(gap: &GapAnalysis, required: &[String]) -> Vec<String> {
    if gap.missing_skills.is_empty() {
        let anchor = required.first().map(String::as_str).unwrap_or("Core Skills");
        return vec![
            format!("Advanced {anchor}"),
            "Industry Best Practices".to_string(),
            "Performance Optimization".to_string(),
        ];
    }

    gap.missing_skills
        .iter()
        .take(MAX_LEARNING_SKILLS)
        .cloned()
        .collect()
}
