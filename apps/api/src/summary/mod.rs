//! Narrative summary generation, the upstream text-generation collaborator.
//!
//! Runs before document construction; a failure here surfaces as
//! `AppError::Llm` and no layout work starts. Timeout and retry policy live
//! in `LlmClient`, not in the layout engine.

pub mod prompts;

use serde::Deserialize;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::profile::RawProfile;
use crate::summary::prompts::{SUMMARY_PROMPT_TEMPLATE, SUMMARY_SYSTEM};

#[derive(Debug, Deserialize)]
struct GeneratedSummary {
    summary: String,
}

/// Generates the resume's opening summary from the raw profile.
pub async fn generate_summary(
    full_name: &str,
    raw: &RawProfile,
    target_role: Option<&str>,
    llm: &LlmClient,
) -> Result<String, AppError> {
    let prompt = build_summary_prompt(full_name, raw, target_role);
    let result: GeneratedSummary = llm
        .call_json(&prompt, SUMMARY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Summary generation failed: {e}")))?;
    Ok(result.summary)
}

pub(crate) fn build_summary_prompt(
    full_name: &str,
    raw: &RawProfile,
    target_role: Option<&str>,
) -> String {
    let experience = if raw.experience.is_empty() {
        "none listed".to_string()
    } else {
        raw.experience
            .iter()
            .take(3)
            .map(|e| format!("{} at {}", e.position, e.company))
            .collect::<Vec<_>>()
            .join("; ")
    };
    let skills = if raw.skills.is_empty() {
        "none listed".to_string()
    } else {
        raw.skills.join(", ")
    };

    SUMMARY_PROMPT_TEMPLATE
        .replace("{name}", full_name)
        .replace(
            "{career_stage}",
            raw.career_stage.as_deref().unwrap_or("not specified"),
        )
        .replace("{target_role}", target_role.unwrap_or("not specified"))
        .replace("{experience}", &experience)
        .replace("{skills}", &skills)
}
