//! Render theme: the configuration surface for the layout engine.
//!
//! Every geometry and style constant the engine consumes lives here so a
//! caller can swap page size, margins, fonts, or colors without touching the
//! layout algorithm. All lengths are in PostScript points (1/72 inch).

use serde::{Deserialize, Serialize};

/// RGB color with components in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Layout and style constants for a single resume render.
///
/// `overflow_threshold` is the vertical offset (measured from the top of the
/// page) past which no block may start or extend; `LayoutCursor::reserve`
/// breaks the page before that happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderTheme {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub overflow_threshold: f32,

    pub name_size: f32,
    pub subtitle_size: f32,
    pub contact_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    pub secondary_size: f32,
    /// Vertical gap appended after every wrapped line.
    pub line_gap: f32,

    pub text_color: Color,
    pub secondary_color: Color,
    pub link_color: Color,
    pub rule_color: Color,

    /// Space between the heading of a section and its first entry.
    pub heading_gap: f32,
    /// Space between consecutive entries inside one section.
    pub entry_gap: f32,
    /// Space above and below the thin rule that closes a section.
    pub rule_padding: f32,
    /// Horizontal indent of bullet text past the bullet glyph.
    pub bullet_indent: f32,
    /// Horizontal gap between the clickable links in the header.
    pub link_gap: f32,
}

impl RenderTheme {
    /// Width available for text between the left and right margins.
    pub fn usable_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Height of one rendered line at `size`, including the trailing gap.
    pub fn line_height(&self, size: f32) -> f32 {
        size + self.line_gap
    }
}

impl Default for RenderTheme {
    /// US letter (612×792pt) with 50pt margins.
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            margin: 50.0,
            overflow_threshold: 742.0,

            name_size: 22.0,
            subtitle_size: 12.0,
            contact_size: 10.0,
            heading_size: 13.0,
            body_size: 10.0,
            secondary_size: 10.0,
            line_gap: 3.0,

            text_color: Color::new(0.13, 0.13, 0.13),
            secondary_color: Color::new(0.42, 0.42, 0.42),
            link_color: Color::new(0.05, 0.35, 0.71),
            rule_color: Color::new(0.78, 0.78, 0.78),

            heading_gap: 7.0,
            entry_gap: 9.0,
            rule_padding: 9.0,
            bullet_indent: 14.0,
            link_gap: 18.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_sanity() {
        let theme = RenderTheme::default();
        assert_eq!(theme.page_width, 612.0);
        assert_eq!(theme.page_height, 792.0);
        assert!((theme.usable_width() - 512.0).abs() < 1e-4);
        assert_eq!(theme.overflow_threshold, theme.page_height - theme.margin);
    }

    #[test]
    fn test_line_height_includes_gap() {
        let theme = RenderTheme::default();
        assert!((theme.line_height(10.0) - 13.0).abs() < 1e-4);
    }
}
