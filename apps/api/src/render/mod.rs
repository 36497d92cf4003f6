//! The resume layout engine.
//!
//! One render is a single synchronous pass: section renderers walk the
//! validated document in a fixed order, measuring every block before placing
//! it and letting the cursor decide page breaks. The pass is CPU-bound, so it
//! runs inside `tokio::task::spawn_blocking`; awaiting that handle is the
//! only suspension point. No state is shared between renders, so concurrent
//! renders for different candidates need no locking.

pub mod cursor;
pub mod measure;
pub mod page;
pub mod sections;
pub mod theme;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

use crate::models::profile::ResumeDocument;

pub use theme::RenderTheme;

/// Failures the layout engine can surface. All-or-nothing: a failed render
/// returns no partial bytes.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The measurer could not size a text block. Should not occur for
    /// validated strings, but must never crash silently mid-page.
    #[error("measurement failed: {detail}")]
    Measurement { detail: String },

    /// The PDF encoder failed to finalize the output. Fatal.
    #[error("PDF serialization failed: {0}")]
    Serialization(String),

    #[error("render task failed: {0}")]
    Join(String),
}

/// A finished render: the document bytes plus derived metadata.
#[derive(Debug, Clone)]
pub struct RenderedResume {
    pub pdf: Bytes,
    pub page_count: usize,
    /// Names of the body sections that actually appear in the output.
    pub sections: Vec<String>,
}

/// Renders a validated document into a multi-page PDF.
///
/// Retry policy, if any, belongs to the caller around this whole call; the
/// engine performs no retries internally.
pub async fn render_resume(
    document: ResumeDocument,
    theme: RenderTheme,
) -> Result<RenderedResume, RenderError> {
    tokio::task::spawn_blocking(move || {
        let (stream, sections) = sections::layout_document(&document, &theme)?;
        let page_count = stream.page_count();
        let pdf = Bytes::from(stream.serialize(&theme)?);
        debug!(
            pages = page_count,
            bytes = pdf.len(),
            "resume render complete"
        );
        Ok(RenderedResume {
            pdf,
            page_count,
            sections,
        })
    })
    .await
    .map_err(|e| RenderError::Join(e.to_string()))?
}
