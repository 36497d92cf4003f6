//! Layout cursor: the vertical write position on the active page.
//!
//! PDF output is write-once: a block cannot be reflowed after it is drawn, so
//! the overflow check is a pre-check. Callers measure first, call `reserve`
//! with the height they are about to consume, draw, then call `advance`.
//! Content is never placed and then retroactively moved.

use crate::render::page::PageStream;
use crate::render::theme::RenderTheme;

/// Tracks the current vertical offset (from the top of the page, in points)
/// and the zero-based index of the active page. Created once per render and
/// discarded afterward.
#[derive(Debug)]
pub struct LayoutCursor {
    y: f32,
    page_index: usize,
    top_margin: f32,
    overflow_threshold: f32,
}

impl LayoutCursor {
    pub fn new(theme: &RenderTheme) -> Self {
        Self {
            y: theme.margin,
            page_index: 0,
            top_margin: theme.margin,
            overflow_threshold: theme.overflow_threshold,
        }
    }

    /// Current vertical offset from the top of the active page.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Zero-based index of the active page.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Ensures `height` points fit below the cursor, breaking the page first
    /// if they do not.
    ///
    /// A block taller than a full page is not split: when the cursor already
    /// sits at the top margin the block is placed there and allowed to
    /// overflow the bottom edge, so `reserve` breaks at most once per call.
    pub fn reserve(&mut self, height: f32, stream: &mut PageStream) {
        if self.y + height > self.overflow_threshold && self.y > self.top_margin {
            stream.break_page();
            self.page_index += 1;
            self.y = self.top_margin;
        }
    }

    /// Records `height` points as consumed after placement.
    pub fn advance(&mut self, height: f32) {
        self.y += height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> RenderTheme {
        RenderTheme::default()
    }

    #[test]
    fn test_new_cursor_starts_at_top_margin() {
        let theme = theme();
        let cursor = LayoutCursor::new(&theme);
        assert_eq!(cursor.y(), theme.margin);
        assert_eq!(cursor.page_index(), 0);
    }

    #[test]
    fn test_reserve_fitting_block_does_not_break() {
        let theme = theme();
        let mut cursor = LayoutCursor::new(&theme);
        let mut stream = PageStream::new();
        cursor.reserve(100.0, &mut stream);
        assert_eq!(stream.page_count(), 1);
        assert_eq!(cursor.page_index(), 0);
        assert_eq!(cursor.y(), theme.margin);
    }

    #[test]
    fn test_reserve_overflowing_block_breaks_page() {
        let theme = theme();
        let mut cursor = LayoutCursor::new(&theme);
        let mut stream = PageStream::new();
        cursor.advance(600.0);
        // 650 + 120 > 742 → break before placing
        cursor.reserve(120.0, &mut stream);
        assert_eq!(stream.page_count(), 2);
        assert_eq!(cursor.page_index(), 1);
        assert_eq!(cursor.y(), theme.margin, "offset resets to top margin");
    }

    #[test]
    fn test_reserve_exact_fit_does_not_break() {
        let theme = theme();
        let mut cursor = LayoutCursor::new(&theme);
        let mut stream = PageStream::new();
        let remaining = theme.overflow_threshold - cursor.y();
        cursor.reserve(remaining, &mut stream);
        assert_eq!(stream.page_count(), 1);
    }

    #[test]
    fn test_oversized_block_at_top_margin_never_splits() {
        let theme = theme();
        let mut cursor = LayoutCursor::new(&theme);
        let mut stream = PageStream::new();
        // Taller than the whole page while already at the top: place anyway.
        cursor.reserve(2000.0, &mut stream);
        assert_eq!(stream.page_count(), 1);
        assert_eq!(cursor.y(), theme.margin);
    }

    #[test]
    fn test_oversized_block_mid_page_breaks_once() {
        let theme = theme();
        let mut cursor = LayoutCursor::new(&theme);
        let mut stream = PageStream::new();
        cursor.advance(300.0);
        cursor.reserve(2000.0, &mut stream);
        assert_eq!(stream.page_count(), 2, "breaks once, then overflows");
        assert_eq!(cursor.y(), theme.margin);
    }

    #[test]
    fn test_advance_accumulates() {
        let theme = theme();
        let mut cursor = LayoutCursor::new(&theme);
        cursor.advance(12.5);
        cursor.advance(7.5);
        assert!((cursor.y() - theme.margin - 20.0).abs() < 1e-4);
    }
}
