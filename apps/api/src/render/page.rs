//! Page stream: accumulates draw instructions per page and serializes them
//! to PDF bytes with printpdf.
//!
//! The layout pass never touches the PDF encoder directly: section renderers
//! push `DrawOp`s into the current page, and `serialize` walks the finished
//! pages once at the end. Keeping an inspectable op stream between layout and
//! encoding is what lets the layout invariants be tested without parsing PDF
//! output.
//!
//! Coordinates in `DrawOp` are top-based points: `y` is the distance from the
//! top edge of the page to the top of the drawn box. `serialize` converts to
//! PDF's bottom-left origin.

use std::io::{BufWriter, Cursor};

use printpdf::{
    Actions, BuiltinFont, Color as PdfColor, IndirectFontRef, Line, LinkAnnotation, Mm,
    PdfDocument, PdfLayerReference, Point, Rect, Rgb,
};

use crate::render::measure::{metrics_for, FontStyle};
use crate::render::theme::{Color, RenderTheme};
use crate::render::RenderError;

const PT_TO_MM: f32 = 25.4 / 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Draw instructions
// ────────────────────────────────────────────────────────────────────────────

/// One placeable instruction on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A single already-wrapped line of text. `justify_to` stretches the
    /// inter-word gaps so the line spans exactly that width.
    Text {
        x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        color: Color,
        text: String,
        underline: bool,
        justify_to: Option<f32>,
    },
    /// Thin horizontal stroke from `x1` to `x2` at vertical offset `y`.
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        color: Color,
        thickness: f32,
    },
    /// Clickable region resolving to an external URL.
    Link {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        url: String,
    },
}

/// The draw instructions of one finalized page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageOps {
    pub ops: Vec<DrawOp>,
}

// ────────────────────────────────────────────────────────────────────────────
// Page stream
// ────────────────────────────────────────────────────────────────────────────

/// Accumulates draw instructions into fixed-size pages.
///
/// A stream starts with one open page; `break_page` finalizes it and opens
/// the next. Serialization consumes the stream, so no partial bytes are ever
/// observable if encoding fails.
#[derive(Debug)]
pub struct PageStream {
    pages: Vec<PageOps>,
}

impl PageStream {
    pub fn new() -> Self {
        Self {
            pages: vec![PageOps::default()],
        }
    }

    pub fn push(&mut self, op: DrawOp) {
        // new() seeds one page, so last_mut always succeeds
        self.pages
            .last_mut()
            .expect("page stream always has an open page")
            .ops
            .push(op);
    }

    pub fn break_page(&mut self) {
        self.pages.push(PageOps::default());
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[PageOps] {
        &self.pages
    }

    /// Serializes all pages into a single PDF byte buffer.
    ///
    /// Fatal on any encoder failure; the whole render fails and no bytes are
    /// returned. The PDF creation timestamp written by the encoder is the
    /// only non-deterministic field in the output.
    pub fn serialize(self, theme: &RenderTheme) -> Result<Vec<u8>, RenderError> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            "Resume",
            Mm(theme.page_width * PT_TO_MM),
            Mm(theme.page_height * PT_TO_MM),
            "Layer 1",
        );

        let fonts = FontSet {
            regular: add_font(&doc, BuiltinFont::Helvetica)?,
            bold: add_font(&doc, BuiltinFont::HelveticaBold)?,
            oblique: add_font(&doc, BuiltinFont::HelveticaOblique)?,
        };

        for (index, page) in self.pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page_index, layer_index) = doc.add_page(
                    Mm(theme.page_width * PT_TO_MM),
                    Mm(theme.page_height * PT_TO_MM),
                    "Layer 1",
                );
                doc.get_page(page_index).get_layer(layer_index)
            };
            draw_page(page, &layer, &fonts, theme);
        }

        let mut buf = Vec::new();
        {
            let cursor = Cursor::new(&mut buf);
            let mut writer = BufWriter::new(cursor);
            doc.save(&mut writer)
                .map_err(|e| RenderError::Serialization(e.to_string()))?;
        }
        Ok(buf)
    }
}

struct FontSet {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl FontSet {
    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Oblique => &self.oblique,
        }
    }
}

fn add_font(
    doc: &printpdf::PdfDocumentReference,
    font: BuiltinFont,
) -> Result<IndirectFontRef, RenderError> {
    doc.add_builtin_font(font)
        .map_err(|e| RenderError::Serialization(e.to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Page drawing
// ────────────────────────────────────────────────────────────────────────────

fn draw_page(page: &PageOps, layer: &PdfLayerReference, fonts: &FontSet, theme: &RenderTheme) {
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                style,
                color,
                text,
                underline,
                justify_to,
            } => {
                layer.set_fill_color(pdf_color(*color));
                // Baseline sits at the bottom of the line box.
                let baseline = theme.page_height - (y + size);
                match justify_to {
                    Some(width) => {
                        draw_justified_line(layer, fonts, *style, text, *size, *x, baseline, *width)
                    }
                    None => layer.use_text(
                        text,
                        *size,
                        Mm(x * PT_TO_MM),
                        Mm(baseline * PT_TO_MM),
                        fonts.get(*style),
                    ),
                }
                if *underline {
                    let text_w = metrics_for(*style).text_width(text, *size);
                    let rule_y = baseline - 1.5;
                    stroke(layer, *x, rule_y, x + text_w, rule_y, *color, 0.6);
                }
            }
            DrawOp::Rule {
                x1,
                x2,
                y,
                color,
                thickness,
            } => {
                let line_y = theme.page_height - y;
                stroke(layer, *x1, line_y, *x2, line_y, *color, *thickness);
            }
            DrawOp::Link {
                x,
                y,
                width,
                height,
                url,
            } => {
                let lower = theme.page_height - (y + height);
                let upper = theme.page_height - y;
                layer.add_link_annotation(LinkAnnotation::new(
                    Rect::new(
                        Mm(x * PT_TO_MM),
                        Mm(lower * PT_TO_MM),
                        Mm((x + width) * PT_TO_MM),
                        Mm(upper * PT_TO_MM),
                    ),
                    None,
                    None,
                    Actions::uri(url.clone()),
                    None,
                ));
            }
        }
    }
}

/// Spreads the inter-word gaps of `line` so it spans exactly `width`.
/// Single-word lines draw unchanged.
fn draw_justified_line(
    layer: &PdfLayerReference,
    fonts: &FontSet,
    style: FontStyle,
    line: &str,
    size: f32,
    x: f32,
    baseline: f32,
    width: f32,
) {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() <= 1 {
        layer.use_text(
            line,
            size,
            Mm(x * PT_TO_MM),
            Mm(baseline * PT_TO_MM),
            fonts.get(style),
        );
        return;
    }

    let metrics = metrics_for(style);
    let total_word_width: f32 = words.iter().map(|w| metrics.text_width(w, size)).sum();
    let gap = (width - total_word_width).max(0.0) / (words.len() - 1) as f32;

    let mut cursor_x = x;
    for word in &words {
        layer.use_text(
            *word,
            size,
            Mm(cursor_x * PT_TO_MM),
            Mm(baseline * PT_TO_MM),
            fonts.get(style),
        );
        cursor_x += metrics.text_width(word, size) + gap;
    }
}

fn stroke(
    layer: &PdfLayerReference,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    color: Color,
    thickness: f32,
) {
    layer.set_outline_color(pdf_color(color));
    layer.set_outline_thickness(thickness);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1 * PT_TO_MM), Mm(y1 * PT_TO_MM)), false),
            (Point::new(Mm(x2 * PT_TO_MM), Mm(y2 * PT_TO_MM)), false),
        ],
        is_closed: false,
    });
}

fn pdf_color(c: Color) -> PdfColor {
    PdfColor::Rgb(Rgb::new(c.r, c.g, c.b, None))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
