// this_file: backends/textrail-ttf/src/metrics.rs

//! `TextMetrics` backed by a parsed TrueType or OpenType face.

use std::path::{Path, PathBuf};

use kurbo::BezPath;
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use ttf_parser::GlyphId;

use textrail_core::{Error, Result, TextExtents, TextMetrics};

use crate::outlines::LayerPathBuilder;

/// Metrics provider over one face at a fixed pixel size.
///
/// Advances and kerning come from the font tables, scaled by the size.
/// Kerning uses the plain `kern` table; characters without a glyph fall
/// back to `.notdef`.
#[derive(Debug)]
pub struct TtfMetrics {
    face: OwnedFace,
    size: f64,
}

impl TtfMetrics {
    /// Loads the face at `path`.
    pub fn from_path(path: impl AsRef<Path>, size: f64) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FontNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::InvalidFont {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })?;
        log::debug!("loaded font {} ({} bytes)", path.display(), data.len());
        Self::parse(data, size, path.to_path_buf())
    }

    /// Parses an in-memory font.
    pub fn from_data(data: Vec<u8>, size: f64) -> Result<Self> {
        Self::parse(data, size, PathBuf::from("<memory>"))
    }

    fn parse(data: Vec<u8>, size: f64, origin: PathBuf) -> Result<Self> {
        if size <= 0.0 {
            return Err(Error::Metrics {
                reason: format!("font size must be positive, got {size}"),
            });
        }
        let face = OwnedFace::from_vec(data, 0).map_err(|e| Error::InvalidFont {
            path: origin.clone(),
            reason: e.to_string(),
        })?;
        if face.as_face_ref().units_per_em() == 0 {
            return Err(Error::InvalidFont {
                path: origin,
                reason: "face reports zero units per em".to_string(),
            });
        }
        Ok(Self { face, size })
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    fn scale(&self) -> f64 {
        self.size / self.face.as_face_ref().units_per_em() as f64
    }

    fn glyph_index(&self, c: char) -> GlyphId {
        self.face
            .as_face_ref()
            .glyph_index(c)
            .unwrap_or(GlyphId(0))
    }

    /// Pair adjustment in font units from the `kern` table.
    fn kern_between(&self, left: GlyphId, right: GlyphId) -> f64 {
        let Some(kern) = self.face.as_face_ref().tables().kern else {
            return 0.0;
        };
        for subtable in kern.subtables {
            if !subtable.horizontal || subtable.variable {
                continue;
            }
            if let Some(value) = subtable.glyphs_kerning(left, right) {
                return value as f64;
            }
        }
        0.0
    }
}

impl TextMetrics for TtfMetrics {
    fn measure(&self, text: &str) -> Result<TextExtents> {
        let face = self.face.as_face_ref();
        let scale = self.scale();
        let ascent = face.ascender() as f64 * scale;
        let descent = -(face.descender() as f64) * scale;

        let mut width = 0.0;
        let mut prev: Option<GlyphId> = None;
        for c in text.chars() {
            let glyph = self.glyph_index(c);
            if let Some(prev) = prev {
                width += self.kern_between(prev, glyph) * scale;
            }
            width += face.glyph_hor_advance(glyph).unwrap_or(0) as f64 * scale;
            prev = Some(glyph);
        }

        Ok(TextExtents {
            width,
            height: ascent + descent,
            ascent,
            descent,
        })
    }

    fn outline(&self, text: &str) -> Result<Option<BezPath>> {
        let face = self.face.as_face_ref();
        let scale = self.scale();
        let baseline = face.ascender() as f64 * scale;

        let mut path = BezPath::new();
        let mut pen_x = 0.0;
        let mut prev: Option<GlyphId> = None;
        for c in text.chars() {
            let glyph = self.glyph_index(c);
            if let Some(prev) = prev {
                pen_x += self.kern_between(prev, glyph) * scale;
            }
            let mut builder = LayerPathBuilder::new(&mut path, scale, pen_x, baseline);
            if face.outline_glyph(glyph, &mut builder).is_none() {
                log::trace!("no outline for {c:?}");
            }
            pen_x += face.glyph_hor_advance(glyph).unwrap_or(0) as f64 * scale;
            prev = Some(glyph);
        }

        Ok((!path.elements().is_empty()).then_some(path))
    }
}
