//! Section renderers: compose the validated document into draw instructions.
//!
//! Every renderer follows the same template: skip when its collection is
//! empty (no heading, no separator), reserve heading plus a first-entry
//! estimate so a heading is never orphaned at the bottom of a page, then
//! measure and place each block in input order, advancing the cursor after
//! every draw. Heights come from `measure` before anything is pushed, so the
//! page-break decision is always a pre-check.
//!
//! Link policy: when an entry carries a link, its title itself becomes the
//! clickable colored span; no separate "Link" label line is emitted.

use crate::models::profile::{
    CertificationEntry, EducationEntry, ExperienceEntry, ProjectEntry, ResumeDocument,
};
use crate::render::cursor::LayoutCursor;
use crate::render::measure::{measure_height, metrics_for, wrap_text, FontStyle};
use crate::render::page::{DrawOp, PageStream};
use crate::render::theme::{Color, RenderTheme};
use crate::render::RenderError;

/// Lays out the whole document and returns the finished page stream plus the
/// names of the body sections actually rendered.
pub(crate) fn layout_document(
    doc: &ResumeDocument,
    theme: &RenderTheme,
) -> Result<(PageStream, Vec<String>), RenderError> {
    let mut ctx = LayoutContext::new(theme);
    let mut sections = Vec::new();

    ctx.header(doc)?;

    if !doc.summary.is_empty() {
        ctx.summary(&doc.summary)?;
        sections.push("Summary".to_string());
    }
    if !doc.education.is_empty() {
        ctx.education(&doc.education)?;
        sections.push("Education".to_string());
    }
    if !doc.experience.is_empty() {
        ctx.experience(&doc.experience)?;
        sections.push("Experience".to_string());
    }
    if !doc.projects.is_empty() {
        ctx.projects(&doc.projects)?;
        sections.push("Projects".to_string());
    }
    if !doc.skills.is_empty() {
        ctx.joined_values_section("Skills", &doc.skills)?;
        sections.push("Skills".to_string());
    }
    if !doc.certifications.is_empty() {
        ctx.certifications(&doc.certifications)?;
        sections.push("Certifications".to_string());
    }
    if !doc.interests.is_empty() {
        ctx.joined_values_section("Interests", &doc.interests)?;
        sections.push("Interests".to_string());
    }

    Ok((ctx.stream, sections))
}

/// Joins values for the Skills/Interests single-line sections and the header
/// contact line.
const VALUE_SEPARATOR: &str = " • ";
const CONTACT_SEPARATOR: &str = " | ";

// ────────────────────────────────────────────────────────────────────────────
// Layout context
// ────────────────────────────────────────────────────────────────────────────

struct LayoutContext<'a> {
    theme: &'a RenderTheme,
    stream: PageStream,
    cursor: LayoutCursor,
}

impl<'a> LayoutContext<'a> {
    fn new(theme: &'a RenderTheme) -> Self {
        Self {
            theme,
            stream: PageStream::new(),
            cursor: LayoutCursor::new(theme),
        }
    }

    // ── primitive placement ─────────────────────────────────────────────────

    /// Measures `text` wrapped at `width`, guarding against unsizable input.
    fn measured(
        &self,
        text: &str,
        width: f32,
        style: FontStyle,
        size: f32,
    ) -> Result<f32, RenderError> {
        let height = measure_height(text, width, style, size, self.theme);
        if height.is_finite() {
            Ok(height)
        } else {
            Err(RenderError::Measurement {
                detail: format!("cannot size text block of {} chars", text.len()),
            })
        }
    }

    /// Pushes a single pre-wrapped line at `x` and advances one line height.
    fn text_line(&mut self, x: f32, text: &str, style: FontStyle, size: f32, color: Color) {
        self.stream.push(DrawOp::Text {
            x,
            y: self.cursor.y(),
            size,
            style,
            color,
            text: text.to_string(),
            underline: false,
            justify_to: None,
        });
        self.cursor.advance(self.theme.line_height(size));
    }

    /// Centers a single line between the margins and advances one line height.
    fn centered_line(&mut self, text: &str, style: FontStyle, size: f32, color: Color) {
        let width = metrics_for(style).text_width(text, size);
        let x = self.theme.margin + (self.theme.usable_width() - width) / 2.0;
        self.text_line(x, text, style, size, color);
    }

    /// Reserves, wraps, and places a paragraph as one unsplittable block.
    /// When `justify` is set every line except the last stretches to `width`.
    fn paragraph(
        &mut self,
        text: &str,
        x: f32,
        width: f32,
        style: FontStyle,
        size: f32,
        color: Color,
        justify: bool,
    ) -> Result<(), RenderError> {
        let height = self.measured(text, width, style, size)?;
        if height == 0.0 {
            return Ok(());
        }
        self.cursor.reserve(height, &mut self.stream);

        let lines = wrap_text(text, width, style, size);
        let last = lines.len() - 1;
        for (i, line) in lines.iter().enumerate() {
            self.stream.push(DrawOp::Text {
                x,
                y: self.cursor.y(),
                size,
                style,
                color,
                text: line.clone(),
                underline: false,
                justify_to: if justify && i < last { Some(width) } else { None },
            });
            self.cursor.advance(self.theme.line_height(size));
        }
        Ok(())
    }

    /// Places a bulleted list. Each bullet is measured and reserved
    /// individually since bullets can wrap.
    fn bullet_list(&mut self, items: &[String]) -> Result<(), RenderError> {
        let theme = self.theme;
        let text_x = theme.margin + theme.bullet_indent;
        let width = theme.usable_width() - theme.bullet_indent;

        for item in items {
            let height = self.measured(item, width, FontStyle::Regular, theme.body_size)?;
            if height == 0.0 {
                continue;
            }
            self.cursor.reserve(height, &mut self.stream);

            // Glyph on the first line only.
            self.stream.push(DrawOp::Text {
                x: theme.margin,
                y: self.cursor.y(),
                size: theme.body_size,
                style: FontStyle::Regular,
                color: theme.text_color,
                text: "•".to_string(),
                underline: false,
                justify_to: None,
            });
            for line in wrap_text(item, width, FontStyle::Regular, theme.body_size) {
                self.stream.push(DrawOp::Text {
                    x: text_x,
                    y: self.cursor.y(),
                    size: theme.body_size,
                    style: FontStyle::Regular,
                    color: theme.text_color,
                    text: line,
                    underline: false,
                    justify_to: None,
                });
                self.cursor.advance(theme.line_height(theme.body_size));
            }
        }
        Ok(())
    }

    // ── section scaffolding ─────────────────────────────────────────────────

    /// Reserves the heading together with `first_entry_estimate` so the
    /// heading never sits alone at the bottom of a page, then draws it.
    fn section_heading(&mut self, title: &str, first_entry_estimate: f32) {
        let theme = self.theme;
        let heading_height = theme.line_height(theme.heading_size) + theme.heading_gap;
        self.cursor
            .reserve(heading_height + first_entry_estimate, &mut self.stream);
        self.text_line(
            theme.margin,
            title,
            FontStyle::Bold,
            theme.heading_size,
            theme.text_color,
        );
        self.cursor.advance(theme.heading_gap);
    }

    /// Thin rule spanning the usable width, with fixed padding on both sides.
    fn section_rule(&mut self) {
        let theme = self.theme;
        self.cursor
            .reserve(2.0 * theme.rule_padding, &mut self.stream);
        self.cursor.advance(theme.rule_padding);
        self.stream.push(DrawOp::Rule {
            x1: theme.margin,
            x2: theme.page_width - theme.margin,
            y: self.cursor.y(),
            color: theme.rule_color,
            thickness: 0.6,
        });
        self.cursor.advance(theme.rule_padding);
    }

    /// Conservative estimate of the smallest entry: a title line plus a
    /// subtitle line. Used only for heading-orphan avoidance.
    fn min_entry_estimate(&self) -> f32 {
        self.theme.line_height(self.theme.body_size)
            + self.theme.line_height(self.theme.secondary_size)
    }

    /// Title line that becomes a clickable colored span when a link exists,
    /// plain bold otherwise.
    fn entry_title(&mut self, title: &str, link: Option<&str>) {
        let theme = self.theme;
        match link {
            Some(url) => {
                let width = metrics_for(FontStyle::Bold).text_width(title, theme.body_size);
                self.stream.push(DrawOp::Link {
                    x: theme.margin,
                    y: self.cursor.y(),
                    width,
                    height: theme.line_height(theme.body_size),
                    url: url.to_string(),
                });
                self.text_line(
                    theme.margin,
                    title,
                    FontStyle::Bold,
                    theme.body_size,
                    theme.link_color,
                );
            }
            None => self.text_line(
                theme.margin,
                title,
                FontStyle::Bold,
                theme.body_size,
                theme.text_color,
            ),
        }
    }

    fn date_line(&mut self, start: Option<&str>, end: Option<&str>) {
        if let Some(range) = date_range(start, end) {
            let theme = self.theme;
            self.cursor
                .reserve(theme.line_height(theme.secondary_size), &mut self.stream);
            self.text_line(
                theme.margin,
                &range,
                FontStyle::Oblique,
                theme.secondary_size,
                theme.secondary_color,
            );
        }
    }

    // ── header ──────────────────────────────────────────────────────────────

    fn header(&mut self, doc: &ResumeDocument) -> Result<(), RenderError> {
        let theme = self.theme;

        self.centered_line(
            &doc.full_name.to_uppercase(),
            FontStyle::Bold,
            theme.name_size,
            theme.text_color,
        );

        if let Some(target) = &doc.target_title {
            self.centered_line(
                target,
                FontStyle::Regular,
                theme.subtitle_size,
                theme.secondary_color,
            );
        }

        let contact: Vec<&str> = doc
            .email
            .as_deref()
            .into_iter()
            .chain(doc.phone.as_deref())
            .collect();
        if !contact.is_empty() {
            self.centered_line(
                &contact.join(CONTACT_SEPARATOR),
                FontStyle::Regular,
                theme.contact_size,
                theme.secondary_color,
            );
        }

        if !doc.links.is_empty() {
            self.link_row(doc)?;
        }

        // Full-width rule separating header from body.
        self.cursor.advance(theme.rule_padding);
        self.stream.push(DrawOp::Rule {
            x1: theme.margin,
            x2: theme.page_width - theme.margin,
            y: self.cursor.y(),
            color: theme.rule_color,
            thickness: 0.8,
        });
        self.cursor.advance(theme.rule_padding);
        Ok(())
    }

    /// Link labels as individually clickable underlined spans, centered as a
    /// group with fixed inter-link spacing.
    fn link_row(&mut self, doc: &ResumeDocument) -> Result<(), RenderError> {
        let theme = self.theme;
        let metrics = metrics_for(FontStyle::Regular);
        let widths: Vec<f32> = doc
            .links
            .iter()
            .map(|l| metrics.text_width(&l.label, theme.contact_size))
            .collect();
        let total: f32 =
            widths.iter().sum::<f32>() + theme.link_gap * (doc.links.len() - 1) as f32;
        if !total.is_finite() {
            return Err(RenderError::Measurement {
                detail: "cannot size header link row".to_string(),
            });
        }

        let y = self.cursor.y();
        let row_height = theme.line_height(theme.contact_size);
        let mut x = theme.margin + (theme.usable_width() - total) / 2.0;
        for (link, width) in doc.links.iter().zip(&widths) {
            self.stream.push(DrawOp::Link {
                x,
                y,
                width: *width,
                height: row_height,
                url: link.url.clone(),
            });
            self.stream.push(DrawOp::Text {
                x,
                y,
                size: theme.contact_size,
                style: FontStyle::Regular,
                color: theme.link_color,
                text: link.label.clone(),
                underline: true,
                justify_to: None,
            });
            x += width + theme.link_gap;
        }
        self.cursor.advance(row_height);
        Ok(())
    }

    // ── body sections ───────────────────────────────────────────────────────

    fn summary(&mut self, summary: &str) -> Result<(), RenderError> {
        let theme = self.theme;
        let estimate = self.measured(
            summary,
            theme.usable_width(),
            FontStyle::Regular,
            theme.body_size,
        )?;
        let min_entry = self.min_entry_estimate();
        self.section_heading("Summary", estimate.min(min_entry));
        self.paragraph(
            summary,
            theme.margin,
            theme.usable_width(),
            FontStyle::Regular,
            theme.body_size,
            theme.text_color,
            true,
        )?;
        self.section_rule();
        Ok(())
    }

    fn education(&mut self, entries: &[EducationEntry]) -> Result<(), RenderError> {
        let theme = self.theme;
        let min_entry = self.min_entry_estimate();
        self.section_heading("Education", min_entry);

        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                self.cursor.advance(theme.entry_gap);
            }
            self.cursor.reserve(min_entry, &mut self.stream);
            self.entry_title(&entry.degree, None);
            self.text_line(
                theme.margin,
                &subtitle_with_location(&entry.institution, entry.location.as_deref()),
                FontStyle::Regular,
                theme.secondary_size,
                theme.secondary_color,
            );
            self.date_line(entry.start_date.as_deref(), entry.end_date.as_deref());
        }

        self.section_rule();
        Ok(())
    }

    fn experience(&mut self, entries: &[ExperienceEntry]) -> Result<(), RenderError> {
        let theme = self.theme;
        let min_entry = self.min_entry_estimate();
        self.section_heading("Experience", min_entry);

        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                self.cursor.advance(theme.entry_gap);
            }
            self.cursor.reserve(min_entry, &mut self.stream);
            self.entry_title(&entry.position, None);
            self.text_line(
                theme.margin,
                &subtitle_with_location(&entry.company, entry.location.as_deref()),
                FontStyle::Regular,
                theme.secondary_size,
                theme.secondary_color,
            );
            self.date_line(entry.start_date.as_deref(), entry.end_date.as_deref());
            if let Some(description) = &entry.description {
                self.paragraph(
                    description,
                    theme.margin,
                    theme.usable_width(),
                    FontStyle::Regular,
                    theme.body_size,
                    theme.text_color,
                    true,
                )?;
            }
            self.bullet_list(&entry.highlights)?;
        }

        self.section_rule();
        Ok(())
    }

    fn projects(&mut self, entries: &[ProjectEntry]) -> Result<(), RenderError> {
        let theme = self.theme;
        let min_entry = self.min_entry_estimate();
        self.section_heading("Projects", min_entry);

        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                self.cursor.advance(theme.entry_gap);
            }
            self.cursor.reserve(min_entry, &mut self.stream);
            self.entry_title(&entry.title, entry.link.as_deref());
            self.paragraph(
                &entry.description,
                theme.margin,
                theme.usable_width(),
                FontStyle::Regular,
                theme.body_size,
                theme.text_color,
                true,
            )?;
            if !entry.technologies.is_empty() {
                self.labeled_line("Technologies:", &entry.technologies.join(", "))?;
            }
            self.bullet_list(&entry.achievements)?;
        }

        self.section_rule();
        Ok(())
    }

    fn certifications(&mut self, entries: &[CertificationEntry]) -> Result<(), RenderError> {
        let theme = self.theme;
        let min_entry = self.min_entry_estimate();
        self.section_heading("Certifications", min_entry);

        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                self.cursor.advance(theme.entry_gap);
            }
            self.cursor.reserve(min_entry, &mut self.stream);
            self.entry_title(&entry.title, entry.link.as_deref());
            let issuer = match &entry.date {
                Some(date) => format!("{}{}{}", entry.issuer, VALUE_SEPARATOR, date),
                None => entry.issuer.clone(),
            };
            self.text_line(
                theme.margin,
                &issuer,
                FontStyle::Regular,
                theme.secondary_size,
                theme.secondary_color,
            );
        }

        self.section_rule();
        Ok(())
    }

    /// Skills and Interests: a heading and one justified line joining all
    /// values with a fixed separator glyph.
    fn joined_values_section(&mut self, title: &str, values: &[String]) -> Result<(), RenderError> {
        let theme = self.theme;
        let joined = values.join(VALUE_SEPARATOR);
        let estimate = self.measured(
            &joined,
            theme.usable_width(),
            FontStyle::Regular,
            theme.body_size,
        )?;
        let min_entry = self.min_entry_estimate();
        self.section_heading(title, estimate.min(min_entry));
        self.paragraph(
            &joined,
            theme.margin,
            theme.usable_width(),
            FontStyle::Regular,
            theme.body_size,
            theme.text_color,
            true,
        )?;
        self.section_rule();
        Ok(())
    }

    /// Inline bold label followed by a secondary-style value, with
    /// continuation lines hanging under the value column.
    fn labeled_line(&mut self, label: &str, value: &str) -> Result<(), RenderError> {
        let theme = self.theme;
        let label_width =
            metrics_for(FontStyle::Bold).text_width(label, theme.secondary_size)
                + metrics_for(FontStyle::Bold).text_width(" ", theme.secondary_size);
        let value_x = theme.margin + label_width;
        let value_width = theme.usable_width() - label_width;

        let height = self.measured(value, value_width, FontStyle::Regular, theme.secondary_size)?;
        if height == 0.0 {
            return Ok(());
        }
        self.cursor.reserve(height, &mut self.stream);

        self.stream.push(DrawOp::Text {
            x: theme.margin,
            y: self.cursor.y(),
            size: theme.secondary_size,
            style: FontStyle::Bold,
            color: theme.text_color,
            text: label.to_string(),
            underline: false,
            justify_to: None,
        });
        for line in wrap_text(value, value_width, FontStyle::Regular, theme.secondary_size) {
            self.stream.push(DrawOp::Text {
                x: value_x,
                y: self.cursor.y(),
                size: theme.secondary_size,
                style: FontStyle::Regular,
                color: theme.secondary_color,
                text: line,
                underline: false,
                justify_to: None,
            });
            self.cursor.advance(theme.line_height(theme.secondary_size));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Formatting helpers
// ────────────────────────────────────────────────────────────────────────────

/// `start – end`; a missing end renders as `Present`, a missing start leaves
/// the left side empty. Both missing yields no line at all.
fn date_range(start: Option<&str>, end: Option<&str>) -> Option<String> {
    match (start, end) {
        (None, None) => None,
        (Some(start), Some(end)) => Some(format!("{start} – {end}")),
        (Some(start), None) => Some(format!("{start} – Present")),
        (None, Some(end)) => Some(format!("– {end}")),
    }
}

fn subtitle_with_location(name: &str, location: Option<&str>) -> String {
    match location {
        Some(location) => format!("{name}{VALUE_SEPARATOR}{location}"),
        None => name.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{ContactLink, ResumeDocument};
    use crate::render::page::PageOps;

    fn empty_document() -> ResumeDocument {
        ResumeDocument {
            full_name: "Jane Doe".to_string(),
            email: Some("jane@example.com".to_string()),
            phone: None,
            target_title: None,
            summary: String::new(),
            links: Vec::new(),
            education: Vec::new(),
            experience: Vec::new(),
            projects: Vec::new(),
            skills: Vec::new(),
            certifications: Vec::new(),
            interests: Vec::new(),
        }
    }

    fn experience_entry(description: &str, highlights: Vec<&str>) -> ExperienceEntry {
        ExperienceEntry {
            company: "Acme".to_string(),
            position: "Platform Engineer".to_string(),
            location: Some("Berlin".to_string()),
            start_date: Some("2019".to_string()),
            end_date: None,
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
            highlights: highlights.into_iter().map(String::from).collect(),
        }
    }

    fn full_document() -> ResumeDocument {
        let mut doc = empty_document();
        doc.phone = Some("+49 30 1234567".to_string());
        doc.target_title = Some("Staff Engineer".to_string());
        doc.summary = "Engineer with a decade of experience building storage \
                       engines and network services in Rust and Go."
            .to_string();
        doc.links = vec![
            ContactLink {
                label: "GitHub".to_string(),
                url: "https://github.com/janedoe".to_string(),
            },
            ContactLink {
                label: "LinkedIn".to_string(),
                url: "https://linkedin.com/in/janedoe".to_string(),
            },
        ];
        doc.education = vec![EducationEntry {
            degree: "BSc Computer Science".to_string(),
            institution: "TU Berlin".to_string(),
            location: Some("Berlin".to_string()),
            start_date: Some("2010".to_string()),
            end_date: Some("2013".to_string()),
        }];
        doc.experience = vec![experience_entry(
            "Owned the storage layer of a multi-tenant queueing system.",
            vec!["Cut p99 latency by 40%", "Led a team of four"],
        )];
        doc.projects = vec![ProjectEntry {
            title: "cachefly".to_string(),
            description: "Consistent-hashing cache fronting Postgres.".to_string(),
            link: Some("https://github.com/janedoe/cachefly".to_string()),
            technologies: vec!["Rust".to_string(), "Tokio".to_string()],
            achievements: vec!["1.2k GitHub stars".to_string()],
        }];
        doc.skills = vec!["Rust".to_string(), "Go".to_string(), "SQL".to_string()];
        doc.certifications = vec![CertificationEntry {
            title: "CKA".to_string(),
            issuer: "CNCF".to_string(),
            date: Some("2022".to_string()),
            link: None,
        }];
        doc.interests = vec!["Climbing".to_string(), "Baking".to_string()];
        doc
    }

    fn all_text(pages: &[PageOps]) -> String {
        let mut out = String::new();
        for page in pages {
            for op in &page.ops {
                if let DrawOp::Text { text, .. } = op {
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }
        out
    }

    // ── date formatting ─────────────────────────────────────────────────────

    #[test]
    fn test_date_range_variants() {
        assert_eq!(date_range(None, None), None);
        assert_eq!(
            date_range(Some("2019"), Some("2021")),
            Some("2019 – 2021".to_string())
        );
        assert_eq!(
            date_range(Some("2019"), None),
            Some("2019 – Present".to_string())
        );
        assert_eq!(date_range(None, Some("2021")), Some("– 2021".to_string()));
    }

    // ── minimal document ────────────────────────────────────────────────────

    #[test]
    fn test_minimal_document_is_one_page_name_and_rule_only() {
        let theme = RenderTheme::default();
        let (stream, sections) =
            layout_document(&empty_document(), &theme).expect("layout succeeds");
        assert_eq!(stream.page_count(), 1);
        assert!(sections.is_empty(), "no body section rendered");

        let text = all_text(stream.pages());
        assert!(text.contains("JANE DOE"), "name renders upper-cased");
        assert!(text.contains("jane@example.com"));
        assert!(!text.contains("Education"));
        assert!(!text.contains("Experience"));

        // Exactly one rule: the header separator.
        let rules = stream.pages()[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rule { .. }))
            .count();
        assert_eq!(rules, 1);
    }

    // ── section omission ────────────────────────────────────────────────────

    #[test]
    fn test_empty_sections_emit_no_heading_or_separator() {
        let theme = RenderTheme::default();
        let mut doc = full_document();
        doc.projects.clear();
        doc.certifications.clear();
        let (stream, sections) = layout_document(&doc, &theme).expect("layout succeeds");
        let text = all_text(stream.pages());
        assert!(!text.contains("Projects"));
        assert!(!text.contains("Certifications"));
        assert!(!sections.iter().any(|s| s == "Projects"));
        assert!(sections.iter().any(|s| s == "Experience"));
    }

    #[test]
    fn test_full_document_renders_all_sections_in_order() {
        let theme = RenderTheme::default();
        let (stream, sections) = layout_document(&full_document(), &theme).expect("layout");
        assert_eq!(
            sections,
            vec![
                "Summary",
                "Education",
                "Experience",
                "Projects",
                "Skills",
                "Certifications",
                "Interests"
            ]
        );
        let text = all_text(stream.pages());
        assert!(text.contains("Technologies:"));
        assert!(text.contains("Rust, Tokio"));
        assert!(text.contains("2019 – Present"));
        assert!(text.contains("CNCF • 2022"));
        assert!(text.contains("Rust • Go • SQL"));
    }

    // ── link policy ─────────────────────────────────────────────────────────

    #[test]
    fn test_project_title_becomes_clickable_span() {
        let theme = RenderTheme::default();
        let (stream, _) = layout_document(&full_document(), &theme).expect("layout");
        let urls: Vec<&str> = stream
            .pages()
            .iter()
            .flat_map(|p| &p.ops)
            .filter_map(|op| match op {
                DrawOp::Link { url, .. } => Some(url.as_str()),
                _ => None,
            })
            .collect();
        assert!(urls.contains(&"https://github.com/janedoe/cachefly"));
        // Header links are clickable too.
        assert!(urls.contains(&"https://github.com/janedoe"));
        // No standalone "Link" label anywhere.
        assert!(!all_text(stream.pages()).contains("Project Link"));
    }

    // ── page-break invariant ────────────────────────────────────────────────

    #[test]
    fn test_no_block_extends_past_threshold() {
        let theme = RenderTheme::default();
        let mut doc = full_document();
        // Enough entries to force several page breaks, none taller than a page.
        doc.experience = (0..14)
            .map(|i| {
                let mut e = experience_entry(
                    "Built and operated the ingestion pipeline, scaling it from \
                     two to forty million events per day without downtime.",
                    vec![
                        "Migrated the fleet to containerized deploys",
                        "Reduced infrastructure spend by a third",
                    ],
                );
                e.company = format!("Company {i}");
                e
            })
            .collect();

        let (stream, _) = layout_document(&doc, &theme).expect("layout");
        assert!(stream.page_count() > 1, "test data must span pages");

        for page in stream.pages() {
            for op in &page.ops {
                let bottom = match op {
                    DrawOp::Text { y, size, .. } => y + theme.line_height(*size),
                    DrawOp::Rule { y, .. } => *y,
                    DrawOp::Link { y, height, .. } => y + height,
                };
                assert!(
                    bottom <= theme.overflow_threshold + 1e-3,
                    "block extends past threshold: {op:?}"
                );
            }
        }
    }

    #[test]
    fn test_long_description_breaks_before_drawing() {
        let theme = RenderTheme::default();
        let mut doc = empty_document();
        // First entry fills most of the page; the second entry's description
        // alone exceeds the remaining space.
        let filler = "Responsible for the design and operation of the core platform. "
            .repeat(40);
        let long = "Drove the multi-year migration of the monolith into services, \
                    coordinating eleven teams and keeping error budgets intact. "
            .repeat(30);
        doc.experience = vec![
            experience_entry(&filler, vec![]),
            experience_entry(&long, vec![]),
        ];

        let (stream, _) = layout_document(&doc, &theme).expect("layout");
        assert_eq!(stream.page_count(), 2);

        // The long description starts at the top margin of the new page.
        let first_on_page_2 = stream.pages()[1]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { y, .. } => Some(*y),
                _ => None,
            })
            .expect("second page has text");
        assert!((first_on_page_2 - theme.margin).abs() < 1e-3);
    }

    // ── determinism ─────────────────────────────────────────────────────────

    #[test]
    fn test_layout_is_deterministic() {
        let theme = RenderTheme::default();
        let doc = full_document();
        let (first, _) = layout_document(&doc, &theme).expect("layout");
        let (second, _) = layout_document(&doc, &theme).expect("layout");
        assert_eq!(first.pages(), second.pages());
    }
}
