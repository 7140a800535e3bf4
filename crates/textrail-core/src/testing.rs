// this_file: crates/textrail-core/src/testing.rs

//! Deterministic metrics stub shared by the unit tests.

use std::collections::HashMap;

use kurbo::BezPath;

use crate::error::Result;
use crate::metrics::{TextExtents, TextMetrics};

/// Fixed-width metrics provider with an explicit kerning table.
///
/// Glyphs are rectangles sitting on the baseline: uppercase 12 units
/// tall, everything else 8, inset from the advance by `side_bearing`.
/// Spaces render nothing.
pub struct StubMetrics {
    pub char_width: f64,
    pub widths: HashMap<char, f64>,
    pub kern: HashMap<(char, char), f64>,
    pub ascent: f64,
    pub descent: f64,
    pub side_bearing: f64,
}

impl Default for StubMetrics {
    fn default() -> Self {
        Self {
            char_width: 10.0,
            widths: HashMap::new(),
            kern: HashMap::new(),
            ascent: 15.0,
            descent: 5.0,
            side_bearing: 0.0,
        }
    }
}

impl StubMetrics {
    pub fn with_kern(pairs: &[((char, char), f64)]) -> Self {
        Self {
            kern: pairs.iter().copied().collect(),
            ..Self::default()
        }
    }

    fn width_of(&self, c: char) -> f64 {
        self.widths.get(&c).copied().unwrap_or(self.char_width)
    }

    fn glyph_height(c: char) -> f64 {
        if c.is_uppercase() {
            12.0
        } else {
            8.0
        }
    }
}

impl TextMetrics for StubMetrics {
    fn measure(&self, text: &str) -> Result<TextExtents> {
        let mut width = 0.0;
        let mut prev: Option<char> = None;
        for c in text.chars() {
            if let Some(p) = prev {
                width += self.kern.get(&(p, c)).copied().unwrap_or(0.0);
            }
            width += self.width_of(c);
            prev = Some(c);
        }
        Ok(TextExtents {
            width,
            height: self.ascent + self.descent,
            ascent: self.ascent,
            descent: self.descent,
        })
    }

    fn outline(&self, text: &str) -> Result<Option<BezPath>> {
        let mut path = BezPath::new();
        let mut pen = 0.0;
        let mut prev: Option<char> = None;
        for c in text.chars() {
            if let Some(p) = prev {
                pen += self.kern.get(&(p, c)).copied().unwrap_or(0.0);
            }
            let w = self.width_of(c);
            if c != ' ' {
                let x0 = pen + self.side_bearing;
                let x1 = pen + w - self.side_bearing;
                let top = self.ascent - Self::glyph_height(c);
                path.move_to((x0, top));
                path.line_to((x1, top));
                path.line_to((x1, self.ascent));
                path.line_to((x0, self.ascent));
                path.close_path();
            }
            pen += w;
            prev = Some(c);
        }
        Ok(if path.elements().is_empty() {
            None
        } else {
            Some(path)
        })
    }
}
