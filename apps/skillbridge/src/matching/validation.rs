//! Request validation: everything the scoring core assumes about its inputs is
//! checked here, before any handler logic runs.

use crate::errors::AppError;
use crate::matching::gap::Candidate;

pub const MIN_TEXT_LEN: usize = 50;
pub const MAX_NAME_LEN: usize = 100;
pub const MIN_TARGET_JOB_LEN: usize = 2;
pub const MAX_TARGET_JOB_LEN: usize = 200;
pub const MAX_SKILLS: usize = 50;
pub const MAX_EXPERIENCE_YEARS: i32 = 70;
pub const MAX_COMPARE_CANDIDATES: usize = 50;

fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

pub fn validate_name(field: &str, value: &str) -> Result<(), AppError> {
    let len = char_len(value);
    if len == 0 {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    if len > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_target_job(value: &str) -> Result<(), AppError> {
    let len = char_len(value);
    if len < MIN_TARGET_JOB_LEN {
        return Err(AppError::Validation(
            "target_job must be specified".to_string(),
        ));
    }
    if len > MAX_TARGET_JOB_LEN {
        return Err(AppError::Validation(format!(
            "target_job must be at most {MAX_TARGET_JOB_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_experience(years: i32) -> Result<(), AppError> {
    if !(0..=MAX_EXPERIENCE_YEARS).contains(&years) {
        return Err(AppError::Validation(format!(
            "experience_years must be between 0 and {MAX_EXPERIENCE_YEARS}"
        )));
    }
    Ok(())
}

pub fn validate_long_text(field: &str, value: &str) -> Result<(), AppError> {
    if char_len(value) < MIN_TEXT_LEN {
        return Err(AppError::Validation(format!(
            "{field} must contain at least {MIN_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

/// Trims every skill and drops blanks. Rejects lists that end up empty or too long.
pub fn clean_skills(skills: &[String]) -> Result<Vec<String>, AppError> {
    let cleaned: Vec<String> = skills
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if cleaned.is_empty() {
        return Err(AppError::Validation(
            "Candidate must have at least one skill".to_string(),
        ));
    }
    if cleaned.len() > MAX_SKILLS {
        return Err(AppError::Validation(format!(
            "Candidate may list at most {MAX_SKILLS} skills"
        )));
    }
    Ok(cleaned)
}

/// Validates a candidate and returns it with trimmed fields and cleaned skills.
pub fn validate_candidate(candidate: &Candidate) -> Result<Candidate, AppError> {
    validate_name("name", &candidate.name)?;
    validate_name("current_role", &candidate.current_role)?;
    validate_experience(candidate.experience_years)?;
    let skills = clean_skills(&candidate.skills)?;

    Ok(Candidate {
        name: candidate.name.trim().to_string(),
        current_role: candidate.current_role.trim().to_string(),
        skills,
        experience_years: candidate.experience_years,
    })
}

pub fn validate_candidate_count(count: usize) -> Result<(), AppError> {
    if count == 0 {
        return Err(AppError::Validation(
            "At least one candidate is required".to_string(),
        ));
    }
    if count > MAX_COMPARE_CANDIDATES {
        return Err(AppError::Validation(format!(
            "At most {MAX_COMPARE_CANDIDATES} candidates can be compared"
        )));
    }
    Ok(())
}
