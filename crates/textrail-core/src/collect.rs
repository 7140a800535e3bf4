// this_file: crates/textrail-core/src/collect.rs

//! Output path collection.
//!
//! Placed character outlines are copied into named destination paths.
//! The grouping decides how many destinations exist and when they are
//! created: one for the whole run, one per stroke, one per character
//! class, or one per character. Destinations keep their creation order.
//!
//! The collector only accumulates. Callers take the result with
//! [`PathCollector::finish`] on success; dropping the collector
//! discards everything it gathered.

use kurbo::{Affine, BezPath};

use crate::character::CharClass;
use crate::options::OutputGrouping;
use crate::place::Placement;

/// One named output path.
#[derive(Debug, Clone)]
pub struct GeneratedPath {
    pub name: String,
    pub path: BezPath,
}

enum Destinations {
    Combined {
        glyphs: usize,
        boxes: Option<usize>,
    },
    PerStroke {
        glyphs: Option<usize>,
        boxes: Option<usize>,
    },
    SplitByClass {
        glyphs: [usize; 2],
        boxes: Option<[usize; 2]>,
    },
    PerCharacter {
        stroke_name: String,
        current: Option<usize>,
    },
}

fn class_slot(class: CharClass) -> usize {
    match class {
        CharClass::Text => 0,
        CharClass::Joiner => 1,
    }
}

/// Collects placed outlines into destination paths.
pub struct PathCollector {
    run_name: String,
    show_boxes: bool,
    paths: Vec<GeneratedPath>,
    dest: Destinations,
}

impl PathCollector {
    pub fn new(grouping: OutputGrouping, run_name: &str, show_boxes: bool) -> Self {
        let mut collector = Self {
            run_name: run_name.to_string(),
            show_boxes,
            paths: Vec::new(),
            dest: Destinations::PerCharacter {
                stroke_name: String::new(),
                current: None,
            },
        };
        collector.dest = match grouping {
            OutputGrouping::Combined => {
                let glyphs = collector.create(run_name.to_string());
                let boxes = show_boxes.then(|| collector.create(format!("Boxes for {run_name}")));
                Destinations::Combined { glyphs, boxes }
            }
            OutputGrouping::PerStroke => Destinations::PerStroke {
                glyphs: None,
                boxes: None,
            },
            OutputGrouping::SplitByClass => {
                let glyphs = [
                    collector.create(format!("Text for {run_name}")),
                    collector.create(format!("Spacer for {run_name}")),
                ];
                let boxes = show_boxes.then(|| {
                    [
                        collector.create(format!("Text boxes for {run_name}")),
                        collector.create(format!("Spacer boxes for {run_name}")),
                    ]
                });
                Destinations::SplitByClass { glyphs, boxes }
            }
            OutputGrouping::PerCharacter => Destinations::PerCharacter {
                stroke_name: String::new(),
                current: None,
            },
        };
        collector
    }

    fn create(&mut self, name: String) -> usize {
        self.paths.push(GeneratedPath {
            name,
            path: BezPath::new(),
        });
        self.paths.len() - 1
    }

    /// Announces the stroke about to be laid out, 1-based.
    pub fn enter_stroke(&mut self, index: usize) {
        match self.dest {
            Destinations::PerStroke { .. } => {
                let glyphs = Some(self.create(format!("{}[{:02}]", self.run_name, index)));
                let boxes = if self.show_boxes {
                    Some(self.create(format!("Boxes for {}[{:02}]", self.run_name, index)))
                } else {
                    None
                };
                self.dest = Destinations::PerStroke { glyphs, boxes };
            }
            Destinations::PerCharacter {
                ref mut stroke_name,
                ..
            } => {
                *stroke_name = format!("{}[{:02}]", self.run_name, index);
            }
            _ => {}
        }
    }

    /// Announces the character about to be placed, 1-based. Every
    /// character passes through here, blanks included, so per character
    /// grouping keeps one destination per input position.
    pub fn enter_character(&mut self, index: usize, ch: char) {
        if let Destinations::PerCharacter {
            stroke_name,
            current,
        } = &mut self.dest
        {
            let name = format!("{stroke_name}[{index:02}][{ch}]");
            self.paths.push(GeneratedPath {
                name,
                path: BezPath::new(),
            });
            *current = Some(self.paths.len() - 1);
        }
    }

    pub fn add_character(&mut self, outline: &BezPath, class: CharClass, placement: &Placement) {
        let dest = match &self.dest {
            Destinations::Combined { glyphs, .. } => Some(*glyphs),
            Destinations::PerStroke { glyphs, .. } => *glyphs,
            Destinations::SplitByClass { glyphs, .. } => Some(glyphs[class_slot(class)]),
            Destinations::PerCharacter { current, .. } => *current,
        };
        let Some(dest) = dest else {
            log::warn!("character outline dropped, no destination entered yet");
            return;
        };
        self.copy_move(dest, outline, placement);
    }

    pub fn add_box(&mut self, outline: &BezPath, class: CharClass, placement: &Placement) {
        if !self.show_boxes {
            return;
        }
        let dest = match &self.dest {
            Destinations::Combined { boxes, .. } => *boxes,
            Destinations::PerStroke { boxes, .. } => *boxes,
            Destinations::SplitByClass { boxes, .. } => boxes.map(|b| b[class_slot(class)]),
            Destinations::PerCharacter { current, .. } => *current,
        };
        let Some(dest) = dest else {
            log::warn!("character box dropped, no destination entered yet");
            return;
        };
        self.copy_move(dest, outline, placement);
    }

    /// Copies `source` into the destination, moved onto the stroke:
    /// translated so the box corner lands at its layer position, then
    /// rotated about the pivot.
    fn copy_move(&mut self, dest: usize, source: &BezPath, placement: &Placement) {
        let pivot = placement.corner + placement.pivot.to_vec2();
        let transform = Affine::rotate_about(placement.tilt.to_radians(), pivot)
            * Affine::translate(placement.corner.to_vec2());
        let mut moved = source.clone();
        moved.apply_affine(transform);
        let target = &mut self.paths[dest].path;
        for el in moved.elements() {
            target.push(*el);
        }
    }

    /// Takes the collected paths, in creation order.
    pub fn finish(self) -> Vec<GeneratedPath> {
        log::debug!("path collection ended, keeping {} paths", self.paths.len());
        self.paths
    }
}
