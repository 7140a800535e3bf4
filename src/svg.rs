// this_file: src/svg.rs

//! SVG document writer for collected output paths.

use std::fmt::Write;

use kurbo::{Rect, Shape};
use textrail_core::GeneratedPath;

/// Writes collected paths as a standalone SVG document.
pub struct SvgWriter {
    precision: usize,
    margin: f64,
}

impl Default for SvgWriter {
    fn default() -> Self {
        Self {
            precision: 2,
            margin: 10.0,
        }
    }
}

impl SvgWriter {
    pub fn new(precision: usize, margin: f64) -> Self {
        Self { precision, margin }
    }

    /// Renders the paths as `<path id=".." d=".."/>` elements inside a
    /// viewBox covering all of them, plus a margin.
    pub fn write(&self, paths: &[GeneratedPath]) -> String {
        let view = self.view_box(paths);
        let mut svg = String::with_capacity(1024);

        let _ = write!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.p$} {:.p$} {:.p$} {:.p$}">"#,
            view.x0,
            view.y0,
            view.width(),
            view.height(),
            p = self.precision
        );
        svg.push('\n');
        svg.push_str(r#"  <g fill="currentColor">"#);
        svg.push('\n');

        for path in paths {
            if path.path.elements().is_empty() {
                continue;
            }
            let _ = write!(
                &mut svg,
                r#"    <path id="{}" d="{}" />"#,
                escape_attribute(&path.name),
                path.path.to_svg()
            );
            svg.push('\n');
        }

        svg.push_str("  </g>\n");
        svg.push_str("</svg>");
        svg
    }

    fn view_box(&self, paths: &[GeneratedPath]) -> Rect {
        let mut bounds: Option<Rect> = None;
        for path in paths {
            if path.path.elements().is_empty() {
                continue;
            }
            let b = path.path.bounding_box();
            bounds = Some(match bounds {
                Some(prev) => prev.union(b),
                None => b,
            });
        }
        match bounds {
            Some(b) => b.inflate(self.margin, self.margin),
            None => Rect::new(0.0, 0.0, 1.0, 1.0),
        }
    }
}

/// Escapes a string for use inside a double quoted XML attribute.
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
