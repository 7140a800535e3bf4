// this_file: crates/textrail-core/src/format.rs

//! Run orchestration.
//!
//! Ties the pieces together: measure the text once, then for every
//! stroke of the guide lay the characters out, place them and hand the
//! moved outlines to the collector. The collector is only finished when
//! every stroke succeeded, so a failing stroke discards the whole run.

use crate::character::{build_characters, CharacterSet};
use crate::collect::{GeneratedPath, PathCollector};
use crate::error::{Error, Result};
use crate::layout::layout_on_stroke;
use crate::metrics::TextMetrics;
use crate::options::FormatOptions;
use crate::pivot::{compute_vertical_frame, VerticalFrame};
use crate::place::{Jitter, Placer};
use crate::sampler::StrokeSampler;
use crate::stroke::{GuidePath, Stroke};

/// Text measured against a face, ready to format any number of strokes.
pub struct Formatter<'a> {
    options: &'a FormatOptions,
    set: CharacterSet,
    frame: VerticalFrame,
}

impl<'a> Formatter<'a> {
    /// Measures `text` and `joiner` and resolves the vertical frame.
    pub fn new<M: TextMetrics + ?Sized>(
        metrics: &M,
        text: &str,
        joiner: &str,
        options: &'a FormatOptions,
    ) -> Result<Self> {
        let set = build_characters(metrics, text, joiner, options.layout, options.use_kerning)?;
        let frame = compute_vertical_frame(metrics, options.pivot, options.vertical_adjust)?;
        Ok(Self {
            options,
            set,
            frame,
        })
    }

    /// Lays the text out on one stroke and collects every placed
    /// character. Blanks pass through the collector for bookkeeping but
    /// leave no outline.
    pub fn format_stroke<S: Stroke>(
        &self,
        stroke: &S,
        collector: &mut PathCollector,
        jitter: &mut Jitter,
    ) -> Result<()> {
        let sampler = StrokeSampler::new(stroke, self.options.backwards);
        let run = layout_on_stroke(
            &self.set,
            self.options.layout,
            self.options.extra_spacing,
            sampler.length(),
            sampler.is_closed(),
        )?;
        log::trace!(
            "max wiggle x,y: {:.2},{:.2}",
            run.wiggle_x_max,
            self.frame.wiggle_y_max
        );

        let mut placer = Placer::new(&sampler, self.frame, self.options, run.wiggle_x_max, jitter);
        for (index, character) in run.characters.iter().enumerate() {
            collector.enter_character(index + 1, character.ch);
            let Some(outline) = &character.outline else {
                continue;
            };
            let placement = placer.place(character)?;
            collector.add_character(outline, character.class, &placement);
            if let Some(box_outline) = &character.box_outline {
                collector.add_box(box_outline, character.class, &placement);
            }
        }
        Ok(())
    }
}

fn run_name(text: &str, joiner: &str, guide_name: &str) -> String {
    if joiner.is_empty() {
        format!("'{text}' over <{guide_name}>")
    } else {
        format!("'{text}' + '{joiner}' over <{guide_name}>")
    }
}

/// Places `text` along every stroke of the guide.
///
/// All strokes carry the same text. Returns the collected output paths,
/// or the first error with nothing collected.
pub fn text_along_path<M: TextMetrics + ?Sized>(
    metrics: &M,
    guide: &GuidePath,
    text: &str,
    joiner: &str,
    options: &FormatOptions,
    jitter: &mut Jitter,
) -> Result<Vec<GeneratedPath>> {
    if text.is_empty() {
        return Err(Error::EmptyText);
    }
    if guide.is_empty() {
        return Err(Error::EmptyGuide {
            name: guide.name.clone(),
        });
    }

    let run_name = run_name(text, joiner, &guide.name);
    let mut collector = PathCollector::new(options.grouping, &run_name, options.show_boxes);
    let formatter = Formatter::new(metrics, text, joiner, options)?;
    for (index, stroke) in guide.strokes.iter().enumerate() {
        collector.enter_stroke(index + 1);
        formatter.format_stroke(stroke, &mut collector, jitter)?;
    }
    Ok(collector.finish())
}

/// Places one line of `texts` along each stroke of the guide.
///
/// Carriage returns are dropped and empty lines ignored; the remaining
/// line count has to match the stroke count. Each line is measured on
/// its own, so kerning never leaks across lines.
pub fn text_along_path_multi<M: TextMetrics + ?Sized>(
    metrics: &M,
    guide: &GuidePath,
    texts: &str,
    joiner: &str,
    options: &FormatOptions,
    jitter: &mut Jitter,
) -> Result<Vec<GeneratedPath>> {
    if texts.is_empty() {
        return Err(Error::EmptyText);
    }
    let cleaned = texts.replace('\r', "");
    let lines: Vec<&str> = cleaned.split('\n').filter(|line| !line.is_empty()).collect();
    if guide.strokes.len() != lines.len() {
        return Err(Error::StrokeCountMismatch {
            name: guide.name.clone(),
            strokes: guide.strokes.len(),
            lines: lines.len(),
        });
    }

    let run_name = run_name("<multiple>", joiner, &guide.name);
    let mut collector = PathCollector::new(options.grouping, &run_name, options.show_boxes);
    for (index, (stroke, line)) in guide.strokes.iter().zip(&lines).enumerate() {
        let formatter = Formatter::new(metrics, line, joiner, options)?;
        collector.enter_stroke(index + 1);
        formatter.format_stroke(stroke, &mut collector, jitter)?;
    }
    Ok(collector.finish())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use kurbo::{BezPath, PathEl, Point};

    use super::*;
    use crate::options::{LayoutMode, OutputGrouping};
    use crate::testing::StubMetrics;

    fn line_guide() -> GuidePath {
        GuidePath::from_svg_data("line", "M 0 0 L 100 0").unwrap()
    }

    fn first_point(path: &BezPath) -> Point {
        match path.elements()[0] {
            PathEl::MoveTo(p) => p,
            _ => panic!("path does not start with a move"),
        }
    }

    #[test]
    fn test_centered_run_on_a_line() {
        let metrics = StubMetrics::default();
        let options = FormatOptions::default();
        let mut jitter = Jitter::seeded(1);
        let paths =
            text_along_path(&metrics, &line_guide(), "AB", "", &options, &mut jitter).unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].name, "'AB' over <line>");
        // 'A' centers at 45: box corner (40, -15), glyph top edge at y 3
        let start = first_point(&paths[0].path);
        assert_relative_eq!(start.x, 40.0, epsilon = 1e-9);
        assert_relative_eq!(start.y, -12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_joiner_shows_in_the_run_name() {
        let metrics = StubMetrics::default();
        let options = FormatOptions {
            layout: LayoutMode::Repeat,
            ..FormatOptions::default()
        };
        let mut jitter = Jitter::seeded(1);
        let paths =
            text_along_path(&metrics, &line_guide(), "AB", "-", &options, &mut jitter).unwrap();
        assert_eq!(paths[0].name, "'AB' + '-' over <line>");
    }

    #[test]
    fn test_backwards_places_from_the_far_end() {
        let metrics = StubMetrics::default();
        let options = FormatOptions {
            layout: LayoutMode::Left,
            backwards: true,
            ..FormatOptions::default()
        };
        let mut jitter = Jitter::seeded(1);
        let paths =
            text_along_path(&metrics, &line_guide(), "AB", "", &options, &mut jitter).unwrap();
        // position 5 reads from the stroke end, so 'A' centers at x 95
        let start = first_point(&paths[0].path);
        assert_relative_eq!(start.x, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_text_rejected() {
        let metrics = StubMetrics::default();
        let options = FormatOptions::default();
        let mut jitter = Jitter::seeded(1);
        let err =
            text_along_path(&metrics, &line_guide(), "", "", &options, &mut jitter).unwrap_err();
        assert!(matches!(err, Error::EmptyText));
    }

    #[test]
    fn test_empty_guide_rejected_by_name() {
        let metrics = StubMetrics::default();
        let options = FormatOptions::default();
        let mut jitter = Jitter::seeded(1);
        let guide = GuidePath {
            name: "bare".to_string(),
            strokes: vec![],
        };
        let err = text_along_path(&metrics, &guide, "AB", "", &options, &mut jitter).unwrap_err();
        match err {
            Error::EmptyGuide { name } => assert_eq!(name, "bare"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_overflow_fails_the_whole_run() {
        let metrics = StubMetrics::default();
        let options = FormatOptions::default();
        let mut jitter = Jitter::seeded(1);
        let guide = GuidePath::from_svg_data("short", "M 0 0 L 15 0").unwrap();
        let err = text_along_path(&metrics, &guide, "AB", "", &options, &mut jitter).unwrap_err();
        assert!(matches!(err, Error::DoesNotFit { .. }));
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let metrics = StubMetrics::default();
        let options = FormatOptions {
            wiggle_x_percent: 40.0,
            wiggle_y_percent: 40.0,
            wiggle_tilt: 15.0,
            ..FormatOptions::default()
        };
        let render = |seed: u64| {
            let mut jitter = Jitter::seeded(seed);
            let paths =
                text_along_path(&metrics, &line_guide(), "AB", "", &options, &mut jitter).unwrap();
            paths[0].path.to_svg()
        };
        assert_eq!(render(7), render(7));
        assert_ne!(render(7), render(8));
    }

    #[test]
    fn test_multi_line_per_stroke() {
        let metrics = StubMetrics::default();
        let options = FormatOptions {
            grouping: OutputGrouping::PerStroke,
            ..FormatOptions::default()
        };
        let mut jitter = Jitter::seeded(1);
        let guide = GuidePath::from_svg_data("pair", "M 0 0 L 100 0 M 0 50 L 100 50").unwrap();
        let paths = text_along_path_multi(&metrics, &guide, "AB\r\nCD\n", "", &options, &mut jitter)
            .unwrap();

        let names: Vec<&str> = paths.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["'<multiple>' over <pair>[01]", "'<multiple>' over <pair>[02]"]
        );
        // the second line rides the second stroke, 50 below the first
        let start = first_point(&paths[1].path);
        assert_relative_eq!(start.y, 38.0, epsilon = 1e-9);
    }

    #[test]
    fn test_multi_line_count_mismatch() {
        let metrics = StubMetrics::default();
        let options = FormatOptions::default();
        let mut jitter = Jitter::seeded(1);
        let guide = GuidePath::from_svg_data("pair", "M 0 0 L 100 0 M 0 50 L 100 50").unwrap();
        let err = text_along_path_multi(&metrics, &guide, "AB\nCD\nEF", "", &options, &mut jitter)
            .unwrap_err();
        match err {
            Error::StrokeCountMismatch {
                name,
                strokes,
                lines,
            } => {
                assert_eq!(name, "pair");
                assert_eq!(strokes, 2);
                assert_eq!(lines, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
