// LLM prompt templates for match insights and gap explanations.
// System prompt lives in llm_client::prompts.

/// Candidate covers some requirements and misses others.
/// Replace: {target_job}, {current_role}, {experience_years}, {required_skills},
///          {matched_skills}, {missing_skills}, {match_percentage}, {suitability},
///          {suitability_lower}, {domain_match}
pub const PARTIAL_MATCH_TEMPLATE: &str = r#"Assess a candidate for a {target_job} position.

CANDIDATE PROFILE:
- Current role: {current_role}
- Years of experience: {experience_years}

JOB REQUIREMENTS:
- Target role: {target_job}
- Required skills: {required_skills}

MATCH ANALYSIS:
- Matched skills: {matched_skills}
- Missing skills: {missing_skills}
- Match score: {match_percentage}%
- Suitability: {suitability}
- Domain: {domain_match}

In 2-3 sentences answer:
1. Why is this candidate a {suitability_lower} fit for the role?
2. Which missing skill should they address first?
3. What is a realistic timeline to become job-ready?"#;

/// Candidate covers every requirement.
/// Replace: {target_job}, {current_role}, {experience_years}, {matched_skills},
///          {match_percentage}, {suitability}
pub const FULL_MATCH_TEMPLATE: &str = r#"Assess a candidate for a {target_job} position.

CANDIDATE PROFILE:
- Current role: {current_role}
- Years of experience: {experience_years}

MATCH ANALYSIS:
- Match score: {match_percentage}%
- Suitability: {suitability}

The candidate already has ALL required skills: {matched_skills}.

In 2-3 sentences answer:
1. Why are they a strong fit for the role?
2. Which advanced or specialized areas would make them stand out?
3. Which industry best practices should they keep current on?"#;

/// Candidate covers none of the requirements.
/// Replace: {target_job}, {current_role}, {experience_years}, {required_skills},
///          {match_percentage}, {suitability}
pub const MINIMAL_MATCH_TEMPLATE: &str = r#"Assess a candidate for a {target_job} position.

CANDIDATE PROFILE:
- Current role: {current_role}
- Years of experience: {experience_years}

JOB REQUIREMENTS:
- Target role: {target_job}
- Required skills: {required_skills}

MATCH ANALYSIS:
- Match score: {match_percentage}%
- Suitability: {suitability}

The candidate has very few of the required skills.

In 2-3 sentences answer:
1. Is this role realistic from the candidate's current background?
2. What should they learn first?
3. What is a reasonable timeline for acquiring those skills?

Be honest about how hard the transition is."#;

/// Role-based gap explanation.
/// Replace: {target_job}, {candidate_skills}, {missing_skills}
pub const GAP_EXPLANATION_TEMPLATE: &str = r#"A candidate is preparing for a {target_job} role.

Current skills: {candidate_skills}
Missing skills: {missing_skills}

For the missing skills, explain briefly why they matter for this role and give
practical advice on learning them efficiently."#;
