//! The validated document model consumed by the layout engine.
//!
//! Raw profile JSON (the candidate row's `profile` column) deserializes into
//! the `Raw*` shapes below. `ResumeDocument::build` trims and validates them
//! once; an entry missing a required field is dropped here and never reaches
//! layout. The engine re-validates nothing.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProfileError {
    /// The name is rendered unconditionally, so a candidate without one
    /// cannot produce a document.
    #[error("candidate has no name")]
    MissingName,
}

// ────────────────────────────────────────────────────────────────────────────
// Raw (pre-validation) shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawProfile {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub career_stage: Option<String>,
    #[serde(default)]
    pub links: Vec<RawLink>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub education: Vec<RawEducation>,
    #[serde(default)]
    pub experience: Vec<RawExperience>,
    #[serde(default)]
    pub projects: Vec<RawProject>,
    #[serde(default)]
    pub certifications: Vec<RawCertification>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawLink {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawEducation {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawExperience {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawProject {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawCertification {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Validated shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ContactLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub technologies: Vec<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CertificationEntry {
    pub title: String,
    pub issuer: String,
    pub date: Option<String>,
    pub link: Option<String>,
}

/// Fully validated input to one render call. Immutable once built; owned
/// exclusively by the render.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Target career-path title, rendered as the header subtitle.
    pub target_title: Option<String>,
    pub summary: String,
    pub links: Vec<ContactLink>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<String>,
    pub certifications: Vec<CertificationEntry>,
    pub interests: Vec<String>,
}

impl ResumeDocument {
    /// Normalizes a raw profile into a renderable document.
    ///
    /// Entries failing their required-field check (empty after trimming) are
    /// dropped with a debug log. Skills are the union of the stored skills
    /// and caller-supplied additions, first occurrence wins.
    pub fn build(
        full_name: &str,
        email: &str,
        raw: RawProfile,
        target_title: Option<String>,
        summary: String,
        additional_skills: &[String],
    ) -> Result<Self, ProfileError> {
        let full_name = non_empty(full_name).ok_or(ProfileError::MissingName)?;

        let links = raw
            .links
            .into_iter()
            .filter_map(|l| {
                let label = non_empty(&l.label)?;
                let url = non_empty(&l.url)?;
                Some(ContactLink { label, url })
            })
            .collect();

        let education = raw
            .education
            .into_iter()
            .filter_map(|e| {
                let degree = non_empty(&e.degree);
                let institution = non_empty(&e.institution);
                match (degree, institution) {
                    (Some(degree), Some(institution)) => Some(EducationEntry {
                        degree,
                        institution,
                        location: e.location.as_deref().and_then(non_empty),
                        start_date: e.start_date.as_deref().and_then(non_empty),
                        end_date: e.end_date.as_deref().and_then(non_empty),
                    }),
                    _ => {
                        debug!(degree = %e.degree, "dropping education entry missing degree or institution");
                        None
                    }
                }
            })
            .collect();

        let experience = raw
            .experience
            .into_iter()
            .filter_map(|e| {
                let company = non_empty(&e.company);
                let position = non_empty(&e.position);
                match (company, position) {
                    (Some(company), Some(position)) => Some(ExperienceEntry {
                        company,
                        position,
                        location: e.location.as_deref().and_then(non_empty),
                        start_date: e.start_date.as_deref().and_then(non_empty),
                        end_date: e.end_date.as_deref().and_then(non_empty),
                        description: e.description.as_deref().and_then(non_empty),
                        highlights: non_empty_list(e.highlights),
                    }),
                    _ => {
                        debug!(company = %e.company, "dropping experience entry missing company or position");
                        None
                    }
                }
            })
            .collect();

        let projects = raw
            .projects
            .into_iter()
            .filter_map(|p| {
                let title = non_empty(&p.title);
                let description = non_empty(&p.description);
                match (title, description) {
                    (Some(title), Some(description)) => Some(ProjectEntry {
                        title,
                        description,
                        link: p.link.as_deref().and_then(non_empty),
                        technologies: non_empty_list(p.technologies),
                        achievements: non_empty_list(p.achievements),
                    }),
                    _ => {
                        debug!(title = %p.title, "dropping project entry missing title or description");
                        None
                    }
                }
            })
            .collect();

        let certifications = raw
            .certifications
            .into_iter()
            .filter_map(|c| {
                let title = non_empty(&c.title);
                let issuer = non_empty(&c.issuer);
                match (title, issuer) {
                    (Some(title), Some(issuer)) => Some(CertificationEntry {
                        title,
                        issuer,
                        date: c.date.as_deref().and_then(non_empty),
                        link: c.link.as_deref().and_then(non_empty),
                    }),
                    _ => {
                        debug!(title = %c.title, "dropping certification entry missing title or issuer");
                        None
                    }
                }
            })
            .collect();

        Ok(Self {
            full_name,
            email: non_empty(email),
            phone: raw.phone.as_deref().and_then(non_empty),
            target_title: target_title.as_deref().and_then(non_empty),
            summary: summary.trim().to_string(),
            links,
            education,
            experience,
            projects,
            skills: union_skills(&non_empty_list(raw.skills), additional_skills),
            certifications,
            interests: non_empty_list(raw.interests),
        })
    }
}

/// Unions two skill sequences preserving first-occurrence order across their
/// concatenation; no value appears twice.
pub fn union_skills(existing: &[String], additional: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    existing
        .iter()
        .chain(additional.iter())
        .filter_map(|s| non_empty(s))
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn non_empty_list(values: Vec<String>) -> Vec<String> {
    values.iter().filter_map(|v| non_empty(v)).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn build_minimal(raw: RawProfile) -> ResumeDocument {
        ResumeDocument::build("Jane Doe", "jane@example.com", raw, None, String::new(), &[])
            .expect("valid document")
    }

    #[test]
    fn test_missing_name_is_an_error() {
        let result = ResumeDocument::build(
            "   ",
            "jane@example.com",
            RawProfile::default(),
            None,
            String::new(),
            &[],
        );
        assert!(matches!(result, Err(ProfileError::MissingName)));
    }

    #[test]
    fn test_skill_union_first_occurrence_order() {
        let existing = vec!["Go".to_string(), "SQL".to_string()];
        let additional = vec!["SQL".to_string(), "Rust".to_string()];
        assert_eq!(union_skills(&existing, &additional), vec!["Go", "SQL", "Rust"]);
    }

    #[test]
    fn test_skill_union_drops_blank_values() {
        let existing = vec!["Go".to_string(), "  ".to_string()];
        let additional = vec!["".to_string(), "Go".to_string()];
        assert_eq!(union_skills(&existing, &additional), vec!["Go"]);
    }

    #[test]
    fn test_education_missing_institution_is_dropped() {
        let raw = RawProfile {
            education: vec![
                RawEducation {
                    degree: "BSc Computer Science".to_string(),
                    institution: "  ".to_string(),
                    ..Default::default()
                },
                RawEducation {
                    degree: "MSc Distributed Systems".to_string(),
                    institution: "ETH Zürich".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let doc = build_minimal(raw);
        assert_eq!(doc.education.len(), 1);
        assert_eq!(doc.education[0].institution, "ETH Zürich");
    }

    #[test]
    fn test_experience_missing_position_is_dropped() {
        let raw = RawProfile {
            experience: vec![RawExperience {
                company: "Acme".to_string(),
                position: String::new(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let doc = build_minimal(raw);
        assert!(doc.experience.is_empty());
    }

    #[test]
    fn test_project_requires_title_and_description() {
        let raw = RawProfile {
            projects: vec![
                RawProject {
                    title: "cachefly".to_string(),
                    description: String::new(),
                    ..Default::default()
                },
                RawProject {
                    title: "cachefly".to_string(),
                    description: "Distributed cache".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let doc = build_minimal(raw);
        assert_eq!(doc.projects.len(), 1);
    }

    #[test]
    fn test_certification_requires_issuer() {
        let raw = RawProfile {
            certifications: vec![RawCertification {
                title: "CKA".to_string(),
                issuer: " ".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let doc = build_minimal(raw);
        assert!(doc.certifications.is_empty());
    }

    #[test]
    fn test_optional_fields_trim_to_none() {
        let raw = RawProfile {
            phone: Some("  ".to_string()),
            experience: vec![RawExperience {
                company: "Acme".to_string(),
                position: "Engineer".to_string(),
                description: Some("   ".to_string()),
                highlights: vec!["Shipped v2".to_string(), "".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let doc = build_minimal(raw);
        assert!(doc.phone.is_none());
        assert!(doc.experience[0].description.is_none());
        assert_eq!(doc.experience[0].highlights, vec!["Shipped v2"]);
    }

    #[test]
    fn test_entry_order_is_preserved() {
        let raw = RawProfile {
            experience: vec![
                RawExperience {
                    company: "Second".to_string(),
                    position: "Engineer".to_string(),
                    ..Default::default()
                },
                RawExperience {
                    company: "First".to_string(),
                    position: "Senior Engineer".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let doc = build_minimal(raw);
        assert_eq!(doc.experience[0].company, "Second");
        assert_eq!(doc.experience[1].company, "First");
    }

    #[test]
    fn test_blank_link_labels_dropped() {
        let raw = RawProfile {
            links: vec![
                RawLink {
                    label: "GitHub".to_string(),
                    url: "https://github.com/janedoe".to_string(),
                },
                RawLink {
                    label: String::new(),
                    url: "https://example.com".to_string(),
                },
            ],
            ..Default::default()
        };
        let doc = build_minimal(raw);
        assert_eq!(doc.links.len(), 1);
    }
}
