// Resume-vs-job matching engine.
// Implements: skill extraction, domain detection, scoring, learning plans, role gap
// analysis and narrative insights. All text generation goes through llm_client.

pub mod domain;
pub mod extractor;
pub mod gap;
pub mod handlers;
pub mod insights;
pub mod learning_plan;
pub mod prompts;
pub mod scorer;
pub mod validation;
pub mod vocabulary;
