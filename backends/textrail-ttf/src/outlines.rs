// this_file: backends/textrail-ttf/src/outlines.rs

//! Glyph outline recording into the layer frame.

use kurbo::{BezPath, Point};
use ttf_parser::OutlineBuilder;

/// Records a glyph outline into a shared path, scaled to layer units.
///
/// Font outlines are Y up around the baseline; the layer frame is Y down
/// with the baseline at the face ascent. Points are flipped and shifted
/// accordingly, and offset along X by the pen position of the glyph.
pub(crate) struct LayerPathBuilder<'a> {
    path: &'a mut BezPath,
    scale: f64,
    pen_x: f64,
    baseline_y: f64,
}

impl<'a> LayerPathBuilder<'a> {
    pub(crate) fn new(path: &'a mut BezPath, scale: f64, pen_x: f64, baseline_y: f64) -> Self {
        Self {
            path,
            scale,
            pen_x,
            baseline_y,
        }
    }

    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(
            self.pen_x + x as f64 * self.scale,
            self.baseline_y - y as f64 * self.scale,
        )
    }
}

impl OutlineBuilder for LayerPathBuilder<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let c = self.point(x1, y1);
        let p = self.point(x, y);
        self.path.quad_to(c, p);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let c1 = self.point(x1, y1);
        let c2 = self.point(x2, y2);
        let p = self.point(x, y);
        self.path.curve_to(c1, c2, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
