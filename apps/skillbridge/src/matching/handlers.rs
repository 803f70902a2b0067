//! Axum route handlers for the Matching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::domain::Domain;
use crate::matching::extractor::{extract, title_case};
use crate::matching::gap::{
    analyze_gap, learning_targets, rank_candidates, Candidate, CandidateRanking, ExperienceLevel,
    ReadinessLevel,
};
use crate::matching::insights::{describe, explain_gap, match_insights, InsightContext};
use crate::matching::learning_plan::{plan, plan_summary, total_weeks, LearningPlanEntry};
use crate::matching::scorer::{score, MatchResult, Suitability};
use crate::matching::validation::{
    validate_candidate, validate_candidate_count, validate_experience, validate_long_text,
    validate_name, validate_target_job,
};
use crate::matching::vocabulary::RoleProfile;
use crate::state::AppState;

/// Missing skills turned into improvement areas and plan lines on the score endpoint.
const SCORE_FOCUS_LIMIT: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub candidate_name: String,
    pub current_role: String,
    pub experience_years: i32,
    pub resume_text: String,
    pub target_job: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub candidate_name: String,
    pub target_job: String,
    pub match_percentage: f64,
    pub suitability: Suitability,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub learning_plan: Vec<String>,
    pub ai_insights: String,
    pub resume_domain: Option<Domain>,
    pub job_domain: Option<Domain>,
    pub domain_penalty_applied: bool,
}

#[derive(Debug, Deserialize)]
pub struct GapRequest {
    pub candidate: Candidate,
    pub target_job: String,
}

#[derive(Debug, Serialize)]
pub struct GapResponse {
    pub candidate_name: String,
    pub target_job: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub match_percentage: f64,
    pub experience_level: ExperienceLevel,
    pub readiness_level: ReadinessLevel,
}

#[derive(Debug, Serialize)]
pub struct GapExplanationResponse {
    pub candidate_name: String,
    pub target_job: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub explanation: String,
}

#[derive(Debug, Serialize)]
pub struct LearningPathResponse {
    pub candidate_name: String,
    pub target_job: String,
    pub total_weeks: u32,
    pub learning_plan: Vec<LearningPlanEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub candidates: Vec<Candidate>,
    pub target_job: String,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub target_job: String,
    pub rankings: Vec<CandidateRanking>,
}

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub roles: Vec<RoleProfile>,
    pub default_skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/job-match
///
/// Scores a resume against a free-text job description: skill overlap, domain
/// penalty, suitability, a short study plan and a narrative insight.
pub async fn handle_job_match(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    validate_name("candidate_name", &request.candidate_name)?;
    validate_name("current_role", &request.current_role)?;
    validate_experience(request.experience_years)?;
    validate_target_job(&request.target_job)?;
    validate_long_text("resume_text", &request.resume_text)?;
    validate_long_text("job_description", &request.job_description)?;

    let candidate_name = request.candidate_name.trim().to_string();
    let target_job = request.target_job.trim().to_string();

    let resume_skills = extract(&request.resume_text, &state.vocabulary);
    let job_skills = extract(&request.job_description, &state.vocabulary);
    info!(
        "Job match for {candidate_name} → {target_job}: resume [{}], job [{}]",
        describe(&resume_skills),
        describe(&job_skills)
    );

    let result = score(
        &request.resume_text,
        &request.job_description,
        &resume_skills,
        &job_skills,
        &state.vocabulary,
        &state.config.scoring,
    );

    let ctx = InsightContext {
        target_job: &target_job,
        current_role: request.current_role.trim(),
        experience_years: request.experience_years,
        result: &result,
    };
    let ai_insights =
        match_insights(state.generator.as_ref(), &ctx, state.config.llm_timeout).await;

    let improvement_areas = improvement_areas(&result);
    let learning_plan = score_plan_lines(&result, state.config.scoring.weeks_per_skill);

    info!(
        "Job match for {candidate_name}: {}% ({})",
        result.percentage, result.suitability
    );

    Ok(Json(ScoreResponse {
        candidate_name,
        target_job,
        match_percentage: result.percentage,
        suitability: result.suitability,
        improvement_areas,
        learning_plan,
        ai_insights,
        resume_domain: result.resume_domain,
        job_domain: result.job_domain,
        domain_penalty_applied: result.domain_penalty_applied,
        matched_skills: result.matched.into_vec(),
        missing_skills: result.missing.into_vec(),
    }))
}

/// POST /api/v1/skill-gap
///
/// Compares a candidate's stated skills with the catalog requirements for the target role.
pub async fn handle_skill_gap(
    State(state): State<AppState>,
    Json(request): Json<GapRequest>,
) -> Result<Json<GapResponse>, AppError> {
    let (candidate, target_job) = validate_gap_request(&request)?;

    let required = state.vocabulary.required_skills_for(&target_job);
    let gap = analyze_gap(&candidate.skills, required);
    let match_percentage = gap.match_percentage;

    info!(
        "Skill gap for {} → {target_job}: {match_percentage}% ({} missing)",
        candidate.name,
        gap.missing_skills.len()
    );

    Ok(Json(GapResponse {
        candidate_name: candidate.name,
        target_job,
        matched_skills: gap.matched_skills,
        missing_skills: gap.missing_skills,
        match_percentage,
        experience_level: ExperienceLevel::from_years(candidate.experience_years),
        readiness_level: ReadinessLevel::from_percentage(match_percentage),
    }))
}

/// POST /api/v1/skill-gap/explain
///
/// Skill gap plus a narrative on how to close it. Falls back to a fixed
/// explanation when text generation fails.
pub async fn handle_skill_gap_explain(
    State(state): State<AppState>,
    Json(request): Json<GapRequest>,
) -> Result<Json<GapExplanationResponse>, AppError> {
    let (candidate, target_job) = validate_gap_request(&request)?;

    let required = state.vocabulary.required_skills_for(&target_job);
    let gap = analyze_gap(&candidate.skills, required);

    let explanation = explain_gap(
        state.generator.as_ref(),
        &candidate.skills,
        &gap.missing_skills,
        &target_job,
        state.config.llm_timeout,
    )
    .await;

    Ok(Json(GapExplanationResponse {
        candidate_name: candidate.name,
        target_job,
        matched_skills: gap.matched_skills,
        missing_skills: gap.missing_skills,
        explanation,
    }))
}

/// POST /api/v1/learning-path
///
/// Week-by-week plan for the skills the candidate lacks for the target role.
pub async fn handle_learning_path(
    State(state): State<AppState>,
    Json(request): Json<GapRequest>,
) -> Result<Json<LearningPathResponse>, AppError> {
    let (candidate, target_job) = validate_gap_request(&request)?;

    let required = state.vocabulary.required_skills_for(&target_job);
    let gap = analyze_gap(&candidate.skills, required);
    let targets = learning_targets(&gap, required);

    let learning_plan = plan(&targets, state.config.scoring.weeks_per_skill);
    let total_weeks = total_weeks(&learning_plan);

    info!(
        "Learning path for {} → {target_job}: {} skills over {total_weeks} weeks",
        candidate.name,
        learning_plan.len()
    );

    Ok(Json(LearningPathResponse {
        candidate_name: candidate.name,
        target_job,
        total_weeks,
        learning_plan,
    }))
}

/// POST /api/v1/compare
///
/// Ranks several candidates for one role, best match first.
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, AppError> {
    validate_candidate_count(request.candidates.len())?;
    validate_target_job(&request.target_job)?;

    let candidates = request
        .candidates
        .iter()
        .map(validate_candidate)
        .collect::<Result<Vec<_>, _>>()?;
    let target_job = request.target_job.trim().to_string();

    let required = state.vocabulary.required_skills_for(&target_job);
    let rankings = rank_candidates(&candidates, required);

    info!(
        "Compared {} candidates for {target_job}",
        rankings.len()
    );

    Ok(Json(CompareResponse {
        target_job,
        rankings,
    }))
}

/// GET /api/v1/roles
///
/// The role catalog used by the gap endpoints, plus the fallback requirement set.
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<RolesResponse> {
    Json(RolesResponse {
        roles: state.vocabulary.roles().to_vec(),
        default_skills: state.vocabulary.default_skills().to_vec(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn validate_gap_request(request: &GapRequest) -> Result<(Candidate, String), AppError> {
    let candidate = validate_candidate(&request.candidate)?;
    validate_target_job(&request.target_job)?;
    Ok((candidate, request.target_job.trim().to_string()))
}

fn improvement_areas(result: &MatchResult) -> Vec<String> {
    if result.missing.is_empty() {
        return vec!["Strengthen expertise in core areas".to_string()];
    }
    result
        .missing
        .iter()
        .take(SCORE_FOCUS_LIMIT)
        .map(|skill| format!("Learn {}", title_case(skill)))
        .collect()
}

fn score_plan_lines(result: &MatchResult, weeks_per_skill: u32) -> Vec<String> {
    if result.missing.is_empty() {
        return vec![format!("Week 1-{}: Advanced training", weeks_per_skill.max(1))];
    }
    let focus: Vec<&str> = result.missing.iter().take(SCORE_FOCUS_LIMIT).collect();
    plan_summary(&plan(&focus, weeks_per_skill))
}
