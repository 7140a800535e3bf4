// this_file: crates/textrail-core/src/character.rs

//! Characters prepared for layout.
//!
//! Each character carries its measured extents, its outline and line box
//! in the layer frame, the side margins derived from the outline, and the
//! kerning adjustment against the character that precedes it. Layout then
//! only has to resolve the `position` field.

use kurbo::BezPath;

use crate::error::{Error, Result};
use crate::metrics::TextMetrics;
use crate::options::LayoutMode;
use crate::utils::control_x_range;

/// Characters that occupy width but render nothing.
pub const BLANK_CHARACTERS: &str = " ";

/// Which input sequence a character came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Text,
    Joiner,
}

/// One character of the input, measured and ready for placement.
///
/// Plain value type; repeated layouts clone characters so that every
/// repetition resolves its own position.
#[derive(Debug, Clone)]
pub struct Character {
    pub ch: char,
    /// Advance width, kerning not included.
    pub width: f64,
    /// Line height of the face, ascent plus descent.
    pub height: f64,
    pub class: CharClass,
    /// Outline in the layer frame, `None` for blanks.
    pub outline: Option<BezPath>,
    /// Rectangle spanning advance width and line height, `None` for blanks.
    pub box_outline: Option<BezPath>,
    /// Lowest control point X of the outline.
    pub margin_left: f64,
    /// Advance width minus the highest control point X.
    pub margin_right: f64,
    /// Signed width adjustment against the preceding character.
    pub kerning: f64,
    /// Distance along the stroke to the character's horizontal center.
    pub position: f64,
}

impl Character {
    /// Blanks take part in spacing but are never drawn.
    pub fn is_blank(&self) -> bool {
        self.outline.is_none()
    }
}

/// The measured text and joiner sequences.
#[derive(Debug, Clone)]
pub struct CharacterSet {
    pub text: Vec<Character>,
    pub joiner: Vec<Character>,
}

/// Axis-aligned rectangle from the origin, as a closed path.
fn box_path(width: f64, height: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((width, 0.0));
    path.line_to((width, height));
    path.line_to((0.0, height));
    path.close_path();
    path
}

fn create_character<M: TextMetrics + ?Sized>(
    metrics: &M,
    c: char,
    prev: char,
    class: CharClass,
    use_kerning: bool,
) -> Result<Character> {
    let extents = metrics.measure(&c.to_string())?;
    let mut character = Character {
        ch: c,
        width: extents.width,
        height: extents.height,
        class,
        outline: None,
        box_outline: None,
        margin_left: 0.0,
        margin_right: 0.0,
        kerning: 0.0,
        position: 0.0,
    };
    if !BLANK_CHARACTERS.contains(c) {
        // A provider may return no geometry for exotic whitespace;
        // such characters behave like blanks.
        if let Some(outline) = metrics.outline(&c.to_string())? {
            if let Some((min_x, max_x)) = control_x_range(&outline) {
                character.margin_left = min_x;
                character.margin_right = extents.width - max_x;
            }
            character.box_outline = Some(box_path(extents.width, extents.height));
            character.outline = Some(outline);
        }
    }
    if use_kerning {
        let prev_width = metrics.measure(&prev.to_string())?.width;
        let mut pair = String::new();
        pair.push(prev);
        pair.push(c);
        let pair_width = metrics.measure(&pair)?.width;
        character.kerning = pair_width - (character.width + prev_width);
        log::trace!(
            "kerning {:?} -> {:?}: {:.2} - ({:.2} + {:.2}) = {:.2}",
            prev,
            c,
            pair_width,
            character.width,
            prev_width,
            character.kerning
        );
    }
    Ok(character)
}

/// Measures the text and joiner sequences against `metrics`.
///
/// Every character is kerned against its predecessor. The first text
/// character is kerned against the character that precedes it when the
/// text wraps around: the joiner's last character in repeated layouts,
/// otherwise the text's own last character. The joiner always follows
/// the text, so its first character is kerned against the text's last.
pub fn build_characters<M: TextMetrics + ?Sized>(
    metrics: &M,
    text: &str,
    joiner: &str,
    layout: LayoutMode,
    use_kerning: bool,
) -> Result<CharacterSet> {
    let text_chars: Vec<char> = text.chars().collect();
    let join_chars: Vec<char> = joiner.chars().collect();
    let Some(&last_text) = text_chars.last() else {
        return Err(Error::EmptyText);
    };

    let first_kern = match join_chars.last() {
        Some(&j) if layout == LayoutMode::Repeat => j,
        _ => last_text,
    };
    let mut prev = first_kern;
    let mut text_characters = Vec::with_capacity(text_chars.len());
    for &c in &text_chars {
        text_characters.push(create_character(metrics, c, prev, CharClass::Text, use_kerning)?);
        prev = c;
    }

    let mut prev = last_text;
    let mut join_characters = Vec::with_capacity(join_chars.len());
    for &c in &join_chars {
        join_characters.push(create_character(metrics, c, prev, CharClass::Joiner, use_kerning)?);
        prev = c;
    }

    Ok(CharacterSet {
        text: text_characters,
        joiner: join_characters,
    })
}
