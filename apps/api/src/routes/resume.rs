//! Axum route handler for resume rendering.
//!
//! Pipeline: fetch candidate → fetch optional career path → generate summary
//! → build the validated document → render → respond with PDF bytes. All
//! upstream failures are resolved before the layout engine runs.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{fetch_candidate, fetch_career_path, CareerPathRow};
use crate::models::profile::{RawProfile, ResumeDocument};
use crate::render::render_resume;
use crate::state::AppState;
use crate::summary::generate_summary;

#[derive(Debug, Default, Deserialize)]
pub struct RenderResumeRequest {
    /// Skills to union into the candidate's stored skills (first occurrence
    /// wins, duplicates collapse).
    #[serde(default)]
    pub additional_skills: Vec<String>,
    /// Optional career path whose title becomes the header subtitle.
    pub career_path_id: Option<Uuid>,
}

/// POST /api/v1/candidates/:id/resume
///
/// Returns the rendered PDF with `X-Page-Count` and `X-Rendered-Sections`
/// metadata headers.
pub async fn handle_render_resume(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
    Json(request): Json<RenderResumeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let candidate = fetch_candidate(&state.db, candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    let target_title = match request.career_path_id {
        Some(path_id) => {
            let path = fetch_career_path(&state.db, path_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Career path {path_id} not found")))?;
            Some(path_title_for(path, candidate_id)?)
        }
        None => None,
    };

    let raw: RawProfile = serde_json::from_value(candidate.profile).map_err(|e| {
        AppError::UnprocessableEntity(format!("Candidate profile is malformed: {e}"))
    })?;

    let summary = generate_summary(
        &candidate.full_name,
        &raw,
        target_title.as_deref(),
        &state.llm,
    )
    .await?;

    let document = ResumeDocument::build(
        &candidate.full_name,
        &candidate.email,
        raw,
        target_title,
        summary,
        &request.additional_skills,
    )
    .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

    let rendered = render_resume(document, state.theme.clone()).await?;

    info!(
        candidate = %candidate_id,
        pages = rendered.page_count,
        sections = rendered.sections.len(),
        "resume rendered"
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    headers.insert(
        "x-page-count",
        HeaderValue::from_str(&rendered.page_count.to_string())
            .map_err(|e| AppError::Internal(e.into()))?,
    );
    headers.insert(
        "x-rendered-sections",
        HeaderValue::from_str(&rendered.sections.join(","))
            .map_err(|e| AppError::Internal(e.into()))?,
    );

    Ok((headers, rendered.pdf))
}

/// Resolves a fetched career path to its title, requiring that the path
/// belongs to the candidate being rendered. A path owned by another candidate
/// is indistinguishable from a missing one.
fn path_title_for(path: CareerPathRow, candidate_id: Uuid) -> Result<String, AppError> {
    if path.candidate_id != candidate_id {
        return Err(AppError::NotFound(format!(
            "Career path {} not found",
            path.id
        )));
    }
    Ok(path.title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_path(candidate_id: Uuid) -> CareerPathRow {
        CareerPathRow {
            id: Uuid::new_v4(),
            candidate_id,
            title: "Staff Engineer".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_path_title_for_owning_candidate() {
        let candidate_id = Uuid::new_v4();
        let title = path_title_for(make_path(candidate_id), candidate_id).expect("owned path");
        assert_eq!(title, "Staff Engineer");
    }

    #[test]
    fn test_path_title_rejects_other_candidates_path() {
        let result = path_title_for(make_path(Uuid::new_v4()), Uuid::new_v4());
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_request_defaults() {
        let request: RenderResumeRequest = serde_json::from_str("{}").expect("deserializes");
        assert!(request.additional_skills.is_empty());
        assert!(request.career_path_id.is_none());
    }

    #[test]
    fn test_request_with_fields() {
        let request: RenderResumeRequest = serde_json::from_str(
            r#"{"additional_skills": ["Rust"], "career_path_id": "b2e7c7a4-8f4e-4f43-9a36-0d9e4f6f2a11"}"#,
        )
        .expect("deserializes");
        assert_eq!(request.additional_skills, vec!["Rust"]);
        assert!(request.career_path_id.is_some());
    }
}
