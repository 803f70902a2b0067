//! Learning Plan Generator: lays missing skills out on a week-by-week schedule.
//!
//! Skills keep the order they are given in. Each gets a contiguous window of
//! `weeks_per_skill` weeks; windows never overlap. Difficulty escalates with
//! position, two skills per level.

use serde::{Deserialize, Serialize};

use crate::matching::extractor::title_case;

/// Difficulty band assigned by position in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

const LEVELS: [Level; 4] = [
    Level::Beginner,
    Level::Intermediate,
    Level::Advanced,
    Level::Expert,
];

/// Skills sharing one difficulty level before escalating.
const SKILLS_PER_LEVEL: usize = 2;

impl Level {
    pub fn for_position(index: usize) -> Self {
        LEVELS[(index / SKILLS_PER_LEVEL).min(LEVELS.len() - 1)]
    }
}

/// One scheduled skill. Weeks are 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPlanEntry {
    pub skill: String,
    pub start_week: u32,
    pub end_week: u32,
    pub level: Level,
    pub resources: Vec<String>,
}

/// Builds the schedule for `missing`, in order. A zero width is treated as one week.
pub fn plan<S: AsRef<str>>(missing: &[S], weeks_per_skill: u32) -> Vec<LearningPlanEntry> {
    let width = weeks_per_skill.max(1);
    let mut week = 1;

    missing
        .iter()
        .enumerate()
        .map(|(index, skill)| {
            let skill = skill.as_ref();
            let entry = LearningPlanEntry {
                skill: skill.to_string(),
                start_week: week,
                end_week: week + width - 1,
                level: Level::for_position(index),
                resources: resources_for(skill),
            };
            week += width;
            entry
        })
        .collect()
}

/// Canned study resources with the skill name substituted.
pub fn resources_for(skill: &str) -> Vec<String> {
    vec![
        format!("Official {skill} documentation"),
        format!("Comprehensive tutorial: {skill} for beginners"),
        format!("Hands-on project: Build using {skill}"),
        format!("Advanced concepts in {skill}"),
        format!("Industry best practices for {skill}"),
    ]
}

/// Length of the whole plan in weeks: the last entry's end week.
pub fn total_weeks(plan: &[LearningPlanEntry]) -> u32 {
    plan.last().map(|e| e.end_week).unwrap_or(0)
}

/// One human-readable line per entry: `"Week 1-4: Docker"`.
pub fn plan_summary(plan: &[LearningPlanEntry]) -> Vec<String> {
    plan.iter()
        .map(|e| format!("Week {}-{}: {}", e.start_week, e.end_week, title_case(&e.skill)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_skills_four_week_windows() {
        let entries = plan(&["docker", "kubernetes", "terraform"], 4);

        assert_eq!(entries.len(), 3);
        let windows: Vec<(u32, u32)> = entries.iter().map(|e| (e.start_week, e.end_week)).collect();
        assert_eq!(windows, vec![(1, 4), (5, 8), (9, 12)]);
    }

    #[test]
    fn test_windows_are_contiguous_and_non_overlapping() {
        let skills: Vec<String> = (0..9).map(|i| format!("skill-{i}")).collect();
        let entries = plan(&skills, 3);

        for pair in entries.windows(2) {
            assert!(pair[0].end_week < pair[1].start_week);
            assert_eq!(pair[0].end_week + 1, pair[1].start_week);
        }
        for e in &entries {
            assert_eq!(e.end_week - e.start_week + 1, 3);
        }
    }

    #[test]
    fn test_plan_keeps_input_order() {
        let entries = plan(&["zeta", "alpha", "mid"], 4);
        let names: Vec<&str> = entries.iter().map(|e| e.skill.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_levels_escalate_two_per_band_and_cap_at_expert() {
        let levels: Vec<Level> = (0..10).map(Level::for_position).collect();
        assert_eq!(
            levels,
            vec![
                Level::Beginner,
                Level::Beginner,
                Level::Intermediate,
                Level::Intermediate,
                Level::Advanced,
                Level::Advanced,
                Level::Expert,
                Level::Expert,
                Level::Expert,
                Level::Expert,
            ]
        );
    }

    #[test]
    fn test_resources_mention_skill() {
        let resources = resources_for("Kafka");
        assert_eq!(resources.len(), 5);
        assert!(resources.iter().all(|r| r.contains("Kafka")));
    }

    #[test]
    fn test_empty_plan() {
        let entries = plan::<&str>(&[], 4);
        assert!(entries.is_empty());
        assert_eq!(total_weeks(&entries), 0);
    }

    #[test]
    fn test_zero_width_treated_as_one_week() {
        let entries = plan(&["a", "b"], 0);
        assert_eq!((entries[1].start_week, entries[1].end_week), (2, 2));
    }

    #[test]
    fn test_total_weeks_is_last_end_week() {
        let entries = plan(&["a", "b", "c"], 4);
        assert_eq!(total_weeks(&entries), 12);
    }

    #[test]
    fn test_plan_summary_format() {
        let entries = plan(&["rest api", "ci/cd"], 4);
        assert_eq!(
            plan_summary(&entries),
            vec!["Week 1-4: Rest Api".to_string(), "Week 5-8: Ci/Cd".to_string()]
        );
    }

    #[test]
    fn test_level_serializes_as_name() {
        assert_eq!(serde_json::to_string(&Level::Expert).unwrap(), "\"Expert\"");
    }
}
