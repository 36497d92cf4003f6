//! Candidate and career-path rows plus their fetch queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// One candidate record. `profile` is a JSONB blob holding the raw sections
/// (links, education, experience, projects, skills, certifications,
/// interests); it deserializes into `RawProfile` at render time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub profile: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An optional target career path; its title becomes the header subtitle.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareerPathRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

pub async fn fetch_candidate(pool: &PgPool, id: Uuid) -> Result<Option<CandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_career_path(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<CareerPathRow>, sqlx::Error> {
    sqlx::query_as::<_, CareerPathRow>("SELECT * FROM career_paths WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
