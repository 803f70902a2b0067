//! Insight generation: picks a prompt for the match outcome, asks the text
//! generator once, and substitutes a deterministic message on any failure.
//!
//! The generator call is bounded by a timeout and never retried. Failures are logged
//! and absorbed here; they never reach the HTTP response as errors.

use std::time::Duration;

use tracing::{info, warn};

use crate::llm_client::{LlmError, TextGenerator};
use crate::matching::extractor::SkillSet;
use crate::matching::prompts::{
    FULL_MATCH_TEMPLATE, GAP_EXPLANATION_TEMPLATE, MINIMAL_MATCH_TEMPLATE, PARTIAL_MATCH_TEMPLATE,
};
use crate::matching::scorer::{round2, MatchResult, Suitability};

/// Required skills listed in a prompt.
const PROMPT_REQUIRED_LIMIT: usize = 10;
/// Missing skills listed in a prompt.
const PROMPT_MISSING_LIMIT: usize = 5;

/// Returned by `explain_gap` without calling the generator.
pub const NO_GAPS_MESSAGE: &str = "You already have all required skills for this role!";

/// Which prompt template a match outcome gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTier {
    /// Some skills matched, some missing.
    PartialMatch,
    /// Nothing missing.
    FullMatch,
    /// Nothing matched.
    MinimalMatch,
}

pub fn select_tier(matched_count: usize, missing_count: usize) -> PromptTier {
    if missing_count == 0 {
        PromptTier::FullMatch
    } else if matched_count == 0 {
        PromptTier::MinimalMatch
    } else {
        PromptTier::PartialMatch
    }
}

/// Everything a match prompt needs besides the scores themselves.
#[derive(Debug, Clone, Copy)]
pub struct InsightContext<'a> {
    pub target_job: &'a str,
    pub current_role: &'a str,
    pub experience_years: i32,
    pub result: &'a MatchResult,
}

pub fn build_prompt(tier: PromptTier, ctx: &InsightContext<'_>) -> String {
    let template = match tier {
        PromptTier::PartialMatch => PARTIAL_MATCH_TEMPLATE,
        PromptTier::FullMatch => FULL_MATCH_TEMPLATE,
        PromptTier::MinimalMatch => MINIMAL_MATCH_TEMPLATE,
    };
    fill_match_template(template, ctx)
}

fn fill_match_template(template: &str, ctx: &InsightContext<'_>) -> String {
    let result = ctx.result;

    let domain_match = if result.domain_penalty_applied {
        format!(
            "different domains ({} vs {}), -{}% applied",
            result
                .resume_domain
                .map(|d| d.as_str())
                .unwrap_or("unknown"),
            result.job_domain.map(|d| d.as_str()).unwrap_or("unknown"),
            round2(result.base_percentage - result.percentage),
        )
    } else {
        "same or undetermined domain".to_string()
    };

    template
        .replace("{target_job}", ctx.target_job)
        .replace("{current_role}", ctx.current_role)
        .replace("{experience_years}", &ctx.experience_years.to_string())
        .replace(
            "{required_skills}",
            &join_or_none(result.required.iter().take(PROMPT_REQUIRED_LIMIT)),
        )
        .replace("{matched_skills}", &join_or_none(result.matched.iter()))
        .replace(
            "{missing_skills}",
            &join_or_none(result.missing.iter().take(PROMPT_MISSING_LIMIT)),
        )
        .replace("{match_percentage}", &result.percentage.to_string())
        .replace("{suitability_lower}", &result.suitability.as_str().to_lowercase())
        .replace("{suitability}", result.suitability.as_str())
        .replace("{domain_match}", &domain_match)
}

/// Deterministic text used whenever the generator does not answer.
pub fn fallback_insight(result: &MatchResult) -> String {
    let tier = result.suitability;
    let matched = result.matched.len();
    let total = result.required.len();
    let top_matched = join_or_none(result.matched.iter().take(2));
    let top_missing = join_or_none(result.missing.iter().take(3));

    match tier {
        Suitability::Excellent => format!(
            "{tier} fit! You have {matched}/{total} required skills. Consider deepening expertise in {top_matched}."
        ),
        Suitability::Good => format!(
            "{tier} fit. You have {matched}/{total} required skills. Priority: Learn {top_missing}."
        ),
        Suitability::Moderate => format!(
            "{tier} fit. With focused effort, you can bridge the gap. Critical gaps: {top_missing}."
        ),
        Suitability::Challenging => format!(
            "{tier} fit. This is a significant career shift. Build foundation in: {top_missing}. Timeline: 6-12 months."
        ),
    }
}

/// One bounded call to `generator`. Blank output counts as a failure.
pub async fn generate_once(
    generator: &dyn TextGenerator,
    prompt: &str,
    timeout: Duration,
) -> Result<String, LlmError> {
    let text = tokio::time::timeout(timeout, generator.generate(prompt))
        .await
        .map_err(|_| LlmError::Timeout(timeout))??;

    let text = text.trim();
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(text.to_string())
}

/// Narrative for a resume-vs-job match: generated text, or the fallback.
pub async fn match_insights(
    generator: &dyn TextGenerator,
    ctx: &InsightContext<'_>,
    timeout: Duration,
) -> String {
    let result = ctx.result;
    let tier = select_tier(result.matched.len(), result.missing.len());
    let prompt = build_prompt(tier, ctx);

    match generate_once(generator, &prompt, timeout).await {
        Ok(text) => {
            info!("Generated {:?} insight for {}", tier, ctx.target_job);
            text
        }
        Err(e) => {
            warn!("LLM unavailable for match insight, using fallback: {e}");
            fallback_insight(result)
        }
    }
}

pub fn gap_explanation_prompt(candidate_skills: &[String], missing: &[String], target_job: &str) -> String {
    GAP_EXPLANATION_TEMPLATE
        .replace("{target_job}", target_job)
        .replace("{candidate_skills}", &join_or_none(candidate_skills.iter()))
        .replace("{missing_skills}", &join_or_none(missing.iter()))
}

pub fn fallback_gap_explanation(missing: &[String], target_job: &str) -> String {
    format!(
        "To prepare for {target_job}, focus on: {}. Start with the first skill and build a small project with each before moving on.",
        join_or_none(missing.iter())
    )
}

/// Narrative for a role-based gap. Skips the generator when nothing is missing.
pub async fn explain_gap(
    generator: &dyn TextGenerator,
    candidate_skills: &[String],
    missing: &[String],
    target_job: &str,
    timeout: Duration,
) -> String {
    if missing.is_empty() {
        return NO_GAPS_MESSAGE.to_string();
    }

    let prompt = gap_explanation_prompt(candidate_skills, missing, target_job);
    match generate_once(generator, &prompt, timeout).await {
        Ok(text) => text,
        Err(e) => {
            warn!("LLM unavailable for gap explanation, using fallback: {e}");
            fallback_gap_explanation(missing, target_job)
        }
    }
}

fn join_or_none<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "None".to_string()
    } else {
        joined
    }
}

/// Skills as a comma list, for log lines.
pub fn describe(skills: &SkillSet) -> String {
    join_or_none(skills.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::llm_client::UnavailableGenerator;
    use crate::matching::scorer::{score, ScoringConfig};
    use crate::matching::vocabulary::Vocabulary;

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct SlowGenerator;

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("too late".to_string())
        }
    }

    #[derive(Default)]
    struct CountingFailure(AtomicUsize);

    #[async_trait]
    impl TextGenerator for CountingFailure {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(LlmError::Api {
                status: 529,
                message: "Overloaded".to_string(),
            })
        }
    }

    fn result_for(resume: &[&str], required: &[&str]) -> MatchResult {
        score(
            "",
            "",
            &SkillSet::from_skills(resume.iter().copied()),
            &SkillSet::from_skills(required.iter().copied()),
            &Vocabulary::builtin(),
            &ScoringConfig::default(),
        )
    }

    fn ctx(result: &MatchResult) -> InsightContext<'_> {
        InsightContext {
            target_job: "Backend Engineer",
            current_role: "Support Engineer",
            experience_years: 3,
            result,
        }
    }

    #[test]
    fn test_select_tier() {
        assert_eq!(select_tier(3, 2), PromptTier::PartialMatch);
        assert_eq!(select_tier(5, 0), PromptTier::FullMatch);
        assert_eq!(select_tier(0, 4), PromptTier::MinimalMatch);
    }

    #[test]
    fn test_full_match_selects_full_match_prompt() {
        let result = result_for(&["python", "sql"], &["python", "sql"]);
        let tier = select_tier(result.matched.len(), result.missing.len());
        assert_eq!(tier, PromptTier::FullMatch);

        let prompt = build_prompt(tier, &ctx(&result));
        assert!(prompt.contains("ALL required skills: python, sql"));
        assert!(prompt.contains("Match score: 100%"));
        assert!(!prompt.contains('{'), "unfilled placeholder in: {prompt}");
    }

    #[test]
    fn test_partial_prompt_lists_gaps() {
        let result = result_for(&["python"], &["python", "docker", "kubernetes"]);
        let prompt = build_prompt(PromptTier::PartialMatch, &ctx(&result));

        assert!(prompt.contains("Matched skills: python"));
        assert!(prompt.contains("Missing skills: docker, kubernetes"));
        assert!(prompt.contains("Support Engineer"));
        assert!(prompt.contains("a challenging fit"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_prompt_caps_missing_list() {
        let required = ["a1", "a2", "a3", "a4", "a5", "a6", "a7"];
        let result = result_for(&[], &required);
        let prompt = build_prompt(PromptTier::PartialMatch, &ctx(&result));
        assert!(prompt.contains("Missing skills: a1, a2, a3, a4, a5\n"));
    }

    #[test]
    fn test_minimal_prompt_has_no_placeholders() {
        let result = result_for(&[], &["rust", "go"]);
        let prompt = build_prompt(PromptTier::MinimalMatch, &ctx(&result));
        assert!(prompt.contains("Required skills: rust, go"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_fallback_by_suitability_bracket() {
        let excellent = result_for(&["a", "b", "c", "d", "e"], &["a", "b", "c", "d", "e"]);
        assert_eq!(
            fallback_insight(&excellent),
            "Excellent fit! You have 5/5 required skills. Consider deepening expertise in a, b."
        );

        let good = result_for(&["a", "b", "c"], &["a", "b", "c", "d", "e"]);
        assert_eq!(
            fallback_insight(&good),
            "Good fit. You have 3/5 required skills. Priority: Learn d, e."
        );

        let moderate = result_for(&["a", "b"], &["a", "b", "c", "d", "e"]);
        assert!(fallback_insight(&moderate).starts_with("Moderate fit. With focused effort"));
        assert!(fallback_insight(&moderate).contains("Critical gaps: c, d, e."));

        let challenging = result_for(&[], &["a", "b", "c", "d", "e"]);
        assert_eq!(
            fallback_insight(&challenging),
            "Challenging fit. This is a significant career shift. Build foundation in: a, b, c. Timeline: 6-12 months."
        );
    }

    #[tokio::test]
    async fn test_match_insights_uses_generator_output() {
        let result = result_for(&["python"], &["python", "sql"]);
        let text = match_insights(
            &FixedGenerator("  Solid foundation, learn SQL next.  "),
            &ctx(&result),
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(text, "Solid foundation, learn SQL next.");
    }

    #[tokio::test]
    async fn test_match_insights_falls_back_when_unavailable() {
        let result = result_for(&["python"], &["python", "sql"]);
        let text = match_insights(&UnavailableGenerator, &ctx(&result), Duration::from_secs(5)).await;
        assert_eq!(text, fallback_insight(&result));
    }

    #[tokio::test]
    async fn test_match_insights_falls_back_on_blank_output() {
        let result = result_for(&["python"], &["python", "sql"]);
        let text = match_insights(&FixedGenerator("   "), &ctx(&result), Duration::from_secs(5)).await;
        assert_eq!(text, fallback_insight(&result));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_once_times_out() {
        let err = generate_once(&SlowGenerator, "prompt", Duration::from_secs(2))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Timeout(d) if d == Duration::from_secs(2)));
    }

    #[tokio::test]
    async fn test_failure_is_not_retried() {
        let generator = CountingFailure::default();
        let result = result_for(&[], &["rust"]);
        let text = match_insights(&generator, &ctx(&result), Duration::from_secs(5)).await;

        assert_eq!(generator.0.load(Ordering::SeqCst), 1);
        assert!(text.starts_with("Challenging fit."));
    }

    #[tokio::test]
    async fn test_explain_gap_short_circuits_without_gaps() {
        let generator = CountingFailure::default();
        let text = explain_gap(
            &generator,
            &["Python".to_string()],
            &[],
            "Data Analyst",
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(text, NO_GAPS_MESSAGE);
        assert_eq!(generator.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_explain_gap_falls_back() {
        let missing = vec!["Tableau".to_string(), "Excel".to_string()];
        let text = explain_gap(
            &UnavailableGenerator,
            &["Python".to_string()],
            &missing,
            "Data Analyst",
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(text, fallback_gap_explanation(&missing, "Data Analyst"));
        assert!(text.contains("Tableau, Excel"));
    }

    #[test]
    fn test_gap_prompt_fills_all_fields() {
        let prompt = gap_explanation_prompt(
            &["Python".to_string(), "SQL".to_string()],
            &["Docker".to_string()],
            "Backend Engineer",
        );
        assert!(prompt.contains("Current skills: Python, SQL"));
        assert!(prompt.contains("Missing skills: Docker"));
        assert!(prompt.contains("Backend Engineer"));
    }

    #[test]
    fn test_join_or_none() {
        assert_eq!(join_or_none(Vec::<String>::new()), "None");
        assert_eq!(describe(&SkillSet::from_skills(["a", "b"])), "a, b");
    }
}
