// this_file: crates/textrail-core/src/layout.rs

//! Layout policies.
//!
//! A policy turns the measured character set into the actual character
//! sequence for one stroke and derives the spacing, the covered width
//! and the start offset. `layout_on_stroke` then walks the sequence and
//! resolves each character's position, the distance along the stroke of
//! its pivot point.

use crate::character::{Character, CharacterSet};
use crate::error::{Error, Result};
use crate::options::LayoutMode;

/// Characters with resolved positions, plus the horizontal jitter bound.
#[derive(Debug, Clone)]
pub struct LaidOutRun {
    pub characters: Vec<Character>,
    /// Average room per character, the bound for horizontal jitter.
    pub wiggle_x_max: f64,
}

struct Arrangement {
    characters: Vec<Character>,
    spacing: f64,
    text_width: f64,
    offset: f64,
}

fn check_fit(text_width: f64, stroke_length: f64) -> Result<()> {
    if text_width > stroke_length {
        return Err(Error::DoesNotFit {
            text_width,
            stroke_length,
        });
    }
    Ok(())
}

/// Sum of advances and kerning over the sequence.
fn raw_width(characters: &[Character]) -> f64 {
    characters.iter().map(|c| c.width + c.kerning).sum()
}

/// Width of the sequence when it opens a run: no kerning on the first
/// character, outer margins excluded.
fn first_text_width(characters: &[Character]) -> f64 {
    let mut width = raw_width(characters);
    width -= characters[0].kerning;
    width -= characters[0].margin_left + characters[characters.len() - 1].margin_right;
    width
}

fn plain_text_width(characters: &[Character], extra_spacing: f64) -> f64 {
    let intervals = (characters.len() - 1) as f64;
    first_text_width(characters) + extra_spacing * intervals
}

fn layout_left(text: &[Character], extra_spacing: f64, stroke_length: f64) -> Result<Arrangement> {
    let text_width = plain_text_width(text, extra_spacing);
    check_fit(text_width, stroke_length)?;
    // compensate for the left margin so the first outline starts the stroke
    let offset = -text[0].margin_left;
    Ok(Arrangement {
        characters: text.to_vec(),
        spacing: extra_spacing,
        text_width,
        offset,
    })
}

fn layout_right(text: &[Character], extra_spacing: f64, stroke_length: f64) -> Result<Arrangement> {
    let text_width = plain_text_width(text, extra_spacing);
    check_fit(text_width, stroke_length)?;
    // text_width excludes both outer margins, so backing off by width
    // plus the left margin lands the last outline on the stroke end
    let offset = stroke_length - (text_width + text[0].margin_left);
    Ok(Arrangement {
        characters: text.to_vec(),
        spacing: extra_spacing,
        text_width,
        offset,
    })
}

fn layout_center(text: &[Character], extra_spacing: f64, stroke_length: f64) -> Result<Arrangement> {
    let text_width = plain_text_width(text, extra_spacing);
    check_fit(text_width, stroke_length)?;
    let offset = (stroke_length - text_width) / 2.0 - text[0].margin_left;
    Ok(Arrangement {
        characters: text.to_vec(),
        spacing: extra_spacing,
        text_width,
        offset,
    })
}

/// Spreads the text over the whole stroke. The computed spacing replaces
/// the extra spacing and may collapse below zero, so the text always fits.
fn layout_justified(
    text: &[Character],
    extra_spacing: f64,
    stroke_length: f64,
    closed: bool,
) -> Arrangement {
    let (text_width, intervals) = if closed {
        // the last character abuts the first again, so its kerning counts,
        // margins stay inside the loop and there are as many intervals
        // as characters
        (raw_width(text), text.len())
    } else {
        (plain_text_width(text, extra_spacing), text.len() - 1)
    };
    let offset = -text[0].margin_left;
    Arrangement {
        characters: text.to_vec(),
        spacing: (stroke_length - text_width) / intervals as f64,
        text_width: stroke_length,
        offset,
    }
}

fn layout_repeated(
    set: &CharacterSet,
    extra_spacing: f64,
    stroke_length: f64,
    closed: bool,
) -> Result<Arrangement> {
    if closed {
        layout_repeated_on_closed(set, extra_spacing, stroke_length)
    } else {
        layout_repeated_on_open(set, extra_spacing, stroke_length)
    }
}

fn layout_repeated_on_closed(
    set: &CharacterSet,
    extra_spacing: f64,
    stroke_length: f64,
) -> Result<Arrangement> {
    // the joiner is always part of the unit, and with the loop closed
    // every character keeps its kerning and margins
    let unit: Vec<Character> = set.text.iter().chain(set.joiner.iter()).cloned().collect();
    let raw_unit_width = raw_width(&unit);
    let unit_width = raw_unit_width + extra_spacing * unit.len() as f64;
    // at least one copy has to fit
    check_fit(unit_width, stroke_length)?;
    let repeat = (stroke_length / unit_width).floor() as usize;

    let characters: Vec<Character> = (0..repeat).flat_map(|_| unit.iter().cloned()).collect();
    let raw_full_width = raw_unit_width * repeat as f64;
    let spacing = (stroke_length - raw_full_width) / characters.len() as f64;
    log::debug!(
        "stroke {:.2}, unit {:.2}, repeat {}, full {:.2}, spacing {:.2}",
        stroke_length,
        unit_width,
        repeat,
        raw_full_width,
        spacing
    );
    let offset = -unit[0].margin_left;
    Ok(Arrangement {
        characters,
        spacing,
        text_width: stroke_length,
        offset,
    })
}

fn layout_repeated_on_open(
    set: &CharacterSet,
    extra_spacing: f64,
    stroke_length: f64,
) -> Result<Arrangement> {
    // the first copy stands alone, without the joiner
    let first_unit = &set.text;
    let raw_first_width = first_text_width(first_unit);
    let first_width = raw_first_width + extra_spacing * (first_unit.len() - 1) as f64;
    check_fit(first_width, stroke_length)?;

    // additional copies are joiner then text, every character kerned,
    // with as many intervals as characters
    let more_unit: Vec<Character> = set.joiner.iter().chain(set.text.iter()).cloned().collect();
    let raw_more_width = raw_width(&more_unit);
    let more_width = raw_more_width + extra_spacing * more_unit.len() as f64;
    let repeat = ((stroke_length - first_width) / more_width).floor() as usize;

    let mut characters: Vec<Character> = first_unit.to_vec();
    for _ in 0..repeat {
        characters.extend(more_unit.iter().cloned());
    }
    let raw_full_width = raw_first_width + raw_more_width * repeat as f64;
    let spacing = (stroke_length - raw_full_width) / (characters.len() - 1) as f64;
    log::debug!(
        "stroke {:.2}, first {:.2}, more {:.2}, repeat {}, full {:.2}, spacing {:.2}",
        stroke_length,
        first_width,
        more_width,
        repeat,
        raw_full_width,
        spacing
    );
    let offset = -first_unit[0].margin_left;
    Ok(Arrangement {
        characters,
        spacing,
        text_width: stroke_length,
        offset,
    })
}

/// Lays the character set out along a stroke of the given length.
///
/// Every returned character has its `position` resolved: the distance
/// along the stroke of the character's pivot point.
pub fn layout_on_stroke(
    set: &CharacterSet,
    layout: LayoutMode,
    extra_spacing: f64,
    stroke_length: f64,
    closed: bool,
) -> Result<LaidOutRun> {
    if set.text.is_empty() {
        return Err(Error::EmptyText);
    }
    let arrangement = match layout {
        LayoutMode::Left => layout_left(&set.text, extra_spacing, stroke_length)?,
        LayoutMode::Right => layout_right(&set.text, extra_spacing, stroke_length)?,
        LayoutMode::Center => layout_center(&set.text, extra_spacing, stroke_length)?,
        LayoutMode::Justify => layout_justified(&set.text, extra_spacing, stroke_length, closed),
        LayoutMode::Repeat => layout_repeated(set, extra_spacing, stroke_length, closed)?,
    };

    let Arrangement {
        mut characters,
        spacing,
        text_width,
        offset,
    } = arrangement;
    let wiggle_x_max = text_width / characters.len() as f64;
    log::debug!(
        "stroke length {:.2}, start offset {:.2}, spacing {:.2}, text width {:.2}",
        stroke_length,
        offset,
        spacing,
        text_width
    );

    let mut offset = offset;
    for c in &mut characters {
        let position = offset + c.width / 2.0 + c.kerning;
        offset = position + c.width / 2.0 + spacing;
        c.position = position;
        log::trace!("{:?} at {:.2}", c.ch, position);
    }

    Ok(LaidOutRun {
        characters,
        wiggle_x_max,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::character::{build_characters, CharClass, CharacterSet};
    use crate::testing::StubMetrics;

    fn plain_set(text: &str, joiner: &str, layout: LayoutMode) -> CharacterSet {
        build_characters(&StubMetrics::default(), text, joiner, layout, false).unwrap()
    }

    fn positions(run: &LaidOutRun) -> Vec<f64> {
        run.characters.iter().map(|c| c.position).collect()
    }

    #[test]
    fn test_center_positions() {
        let set = plain_set("AB", "", LayoutMode::Center);
        let run = layout_on_stroke(&set, LayoutMode::Center, 0.0, 100.0, false).unwrap();
        let pos = positions(&run);
        assert_relative_eq!(pos[0], 45.0);
        assert_relative_eq!(pos[1], 55.0);
        assert_relative_eq!(run.wiggle_x_max, 10.0);
    }

    #[test]
    fn test_left_positions() {
        let set = plain_set("AB", "", LayoutMode::Left);
        let run = layout_on_stroke(&set, LayoutMode::Left, 0.0, 100.0, false).unwrap();
        assert_eq!(positions(&run), vec![5.0, 15.0]);
    }

    #[test]
    fn test_right_positions() {
        let set = plain_set("AB", "", LayoutMode::Right);
        let run = layout_on_stroke(&set, LayoutMode::Right, 0.0, 100.0, false).unwrap();
        assert_eq!(positions(&run), vec![85.0, 95.0]);
    }

    #[test]
    fn test_margins_shift_the_run() {
        let metrics = StubMetrics {
            side_bearing: 1.5,
            ..StubMetrics::default()
        };
        let set = build_characters(&metrics, "AB", "", LayoutMode::Left, false).unwrap();
        let run = layout_on_stroke(&set, LayoutMode::Left, 0.0, 100.0, false).unwrap();
        let pos = positions(&run);
        // the first outline's left edge lands on the stroke start
        assert_relative_eq!(pos[0], 3.5);
        assert_relative_eq!(pos[0] - 5.0 + run.characters[0].margin_left, 0.0);
        assert_relative_eq!(pos[1], 13.5);
    }

    #[test]
    fn test_extra_spacing_widens_intervals() {
        let set = plain_set("AB", "", LayoutMode::Left);
        let run = layout_on_stroke(&set, LayoutMode::Left, 4.0, 100.0, false).unwrap();
        assert_eq!(positions(&run), vec![5.0, 19.0]);
    }

    #[test]
    fn test_first_character_keeps_wrap_kerning() {
        let metrics = StubMetrics::with_kern(&[(('A', 'B'), -1.0), (('B', 'A'), -2.0)]);
        let set = build_characters(&metrics, "AB", "", LayoutMode::Left, true).unwrap();
        let run = layout_on_stroke(&set, LayoutMode::Left, 0.0, 100.0, false).unwrap();
        let pos = positions(&run);
        assert_relative_eq!(pos[0], 3.0);
        assert_relative_eq!(pos[1], 12.0);
    }

    #[test]
    fn test_does_not_fit() {
        let set = plain_set("AB", "", LayoutMode::Center);
        let err = layout_on_stroke(&set, LayoutMode::Center, 0.0, 15.0, false).unwrap_err();
        match err {
            Error::DoesNotFit {
                text_width,
                stroke_length,
            } => {
                assert_relative_eq!(text_width, 20.0);
                assert_relative_eq!(stroke_length, 15.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_justify_open_spreads_to_the_end() {
        let set = plain_set("ABC", "", LayoutMode::Justify);
        let run = layout_on_stroke(&set, LayoutMode::Justify, 0.0, 90.0, false).unwrap();
        assert_eq!(positions(&run), vec![5.0, 45.0, 85.0]);
        assert_relative_eq!(run.wiggle_x_max, 30.0);
    }

    #[test]
    fn test_justify_closed_counts_the_wrap_interval() {
        let set = plain_set("ABC", "", LayoutMode::Justify);
        let run = layout_on_stroke(&set, LayoutMode::Justify, 0.0, 90.0, true).unwrap();
        assert_eq!(positions(&run), vec![5.0, 35.0, 65.0]);
    }

    #[test]
    fn test_justify_collapses_rather_than_fail() {
        let set = plain_set("AB", "", LayoutMode::Justify);
        let run = layout_on_stroke(&set, LayoutMode::Justify, 0.0, 15.0, false).unwrap();
        assert_eq!(positions(&run), vec![5.0, 10.0]);
    }

    #[test]
    fn test_repeat_on_closed_tiles_the_loop() {
        let set = plain_set("AB", "-", LayoutMode::Repeat);
        let run = layout_on_stroke(&set, LayoutMode::Repeat, 0.0, 100.0, true).unwrap();
        assert_eq!(run.characters.len(), 9);
        let classes: Vec<CharClass> = run.characters.iter().map(|c| c.class).collect();
        assert_eq!(
            &classes[..3],
            &[CharClass::Text, CharClass::Text, CharClass::Joiner]
        );
        let pos = positions(&run);
        assert_relative_eq!(pos[0], 5.0);
        assert_relative_eq!(pos[1], 15.0 + 10.0 / 9.0);
        assert_relative_eq!(pos[8], 85.0 + 80.0 / 9.0);
    }

    #[test]
    fn test_repeat_on_closed_needs_one_copy() {
        let set = plain_set("AB", "-", LayoutMode::Repeat);
        let err = layout_on_stroke(&set, LayoutMode::Repeat, 0.0, 25.0, true).unwrap_err();
        assert!(matches!(err, Error::DoesNotFit { .. }));
    }

    #[test]
    fn test_repeat_on_open_joins_additional_copies() {
        let set = plain_set("AB", "-", LayoutMode::Repeat);
        let run = layout_on_stroke(&set, LayoutMode::Repeat, 0.0, 100.0, false).unwrap();
        assert_eq!(run.characters.len(), 8);
        let classes: Vec<CharClass> = run.characters.iter().map(|c| c.class).collect();
        assert_eq!(
            classes,
            vec![
                CharClass::Text,
                CharClass::Text,
                CharClass::Joiner,
                CharClass::Text,
                CharClass::Text,
                CharClass::Joiner,
                CharClass::Text,
                CharClass::Text,
            ]
        );
        let pos = positions(&run);
        assert_relative_eq!(pos[0], 5.0);
        // uniform advances, so consecutive centers sit one advance plus
        // one spacing interval apart
        assert_relative_eq!(pos[1] - pos[0], 10.0 + 20.0 / 7.0);
    }

    #[test]
    fn test_repeat_on_open_single_copy_drops_joiner() {
        let set = plain_set("AB", "-", LayoutMode::Repeat);
        let run = layout_on_stroke(&set, LayoutMode::Repeat, 0.0, 25.0, false).unwrap();
        assert_eq!(run.characters.len(), 2);
        assert!(run.characters.iter().all(|c| c.class == CharClass::Text));
        assert_eq!(positions(&run), vec![5.0, 20.0]);
    }

    #[test]
    fn test_repeat_extra_spacing_counts_against_fit() {
        let set = plain_set("AB", "-", LayoutMode::Repeat);
        // unit of three advances plus three spacing intervals
        let run = layout_on_stroke(&set, LayoutMode::Repeat, 2.0, 100.0, true).unwrap();
        assert_eq!(run.characters.len(), 6);
    }

    #[test]
    fn test_empty_set_rejected() {
        let set = CharacterSet {
            text: vec![],
            joiner: vec![],
        };
        let err = layout_on_stroke(&set, LayoutMode::Left, 0.0, 100.0, false).unwrap_err();
        assert!(matches!(err, Error::EmptyText));
    }
}
