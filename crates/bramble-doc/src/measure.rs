#![forbid(unsafe_code)]

//! Text measurement, the one capability the store cannot provide itself.
//!
//! Real hosts measure with whatever they render with (an off-screen DOM
//! element, a canvas context). The store only needs the resulting extents,
//! so the capability is injected as a [`TextMeasurer`] and everything else
//! stays synchronous and deterministic.
//!
//! [`MonospaceMeasurer`] is the bundled implementation: a fixed-advance
//! approximation driven by display width. It is what the test suite and any
//! headless embedding use.

use unicode_width::UnicodeWidthStr;

/// Measured text extent in document units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Font metrics a measurer needs to size a node around its text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    /// Height of one wrapped line.
    pub line_height: f64,
    /// Horizontal advance of one cell for fixed-advance measurers.
    pub char_advance: f64,
    /// Horizontal padding on each side.
    pub padding_x: f64,
    /// Vertical padding on each side.
    pub padding_y: f64,
    /// Auto-fit width floor.
    pub min_width: f64,
    /// Height floor.
    pub min_height: f64,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            line_height: 20.0,
            char_advance: 8.0,
            padding_x: 10.0,
            padding_y: 6.0,
            min_width: 100.0,
            min_height: 32.0,
        }
    }
}

/// Injected text-measurement capability.
pub trait TextMeasurer {
    /// Measure unwrapped text: natural single-line-per-`\n` extent.
    fn measure(&self, text: &str, style: &NodeStyle) -> Extent;

    /// Measure text wrapped into `max_width`: returns `max_width` back as
    /// the width and the wrapped height.
    fn reflow(&self, text: &str, max_width: f64, style: &NodeStyle) -> Extent;
}

/// Fixed-advance measurer using display width.
///
/// Wide characters count as two cells, combining marks as zero, matching
/// how a monospace renderer would lay the text out.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceMeasurer;

impl MonospaceMeasurer {
    fn cells(text: &str) -> usize {
        UnicodeWidthStr::width(text)
    }

    /// Greedy word wrap: number of lines `text` occupies at `cols` columns.
    ///
    /// Words wider than the budget break mid-word rather than overflow.
    fn wrapped_lines(text: &str, cols: usize) -> usize {
        let cols = cols.max(1);
        let mut total = 0usize;
        for line in text.split('\n') {
            let mut used = 0usize;
            let mut lines_here = 1usize;
            for word in line.split_whitespace() {
                let w = Self::cells(word);
                let fits_after_space = used > 0 && used + 1 + w <= cols;
                if fits_after_space {
                    used += 1 + w;
                    continue;
                }
                if used > 0 {
                    lines_here += 1;
                }
                if w <= cols {
                    used = w;
                } else {
                    // Break the long word across full lines.
                    lines_here += (w - 1) / cols;
                    used = match w % cols {
                        0 => cols,
                        rem => rem,
                    };
                }
            }
            total += lines_here;
        }
        total.max(1)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, style: &NodeStyle) -> Extent {
        let widest = text
            .split('\n')
            .map(Self::cells)
            .max()
            .unwrap_or(0);
        let lines = text.split('\n').count().max(1);
        let width = (widest as f64 * style.char_advance + 2.0 * style.padding_x)
            .max(style.min_width);
        let height =
            (lines as f64 * style.line_height + 2.0 * style.padding_y).max(style.min_height);
        Extent::new(width, height)
    }

    fn reflow(&self, text: &str, max_width: f64, style: &NodeStyle) -> Extent {
        let budget = ((max_width - 2.0 * style.padding_x) / style.char_advance).floor();
        let cols = if budget >= 1.0 { budget as usize } else { 1 };
        let lines = Self::wrapped_lines(text, cols);
        let height =
            (lines as f64 * style.line_height + 2.0 * style.padding_y).max(style.min_height);
        Extent::new(max_width, height)
    }
}
