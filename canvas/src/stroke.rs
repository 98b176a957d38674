//! Stroke rasterization.
//!
//! Strokes are painted one segment at a time as the pointer moves. Each
//! segment covers every pixel whose center lies within half the line width of
//! the segment, which gives round caps and round joins without tracking the
//! path. There is no anti-aliasing: a pixel is either painted or left alone.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use image::Rgba;

use crate::geom::Point;
use crate::input::{Theme, Tool};
use crate::surface::Surface;

/// Minimum effective radius so that hairline widths still paint one pixel.
const MIN_RADIUS: f64 = 0.5;

/// Color the given tool paints with under the given theme.
#[must_use]
pub fn stroke_color(tool: Tool, theme: Theme) -> [u8; 4] {
    match tool {
        Tool::Pen => theme.foreground(),
        Tool::Eraser => theme.background(),
    }
}

/// Resolved paint for the next segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: [u8; 4],
    pub width: f64,
}

impl StrokeStyle {
    #[must_use]
    pub fn new(tool: Tool, theme: Theme, width: f64) -> Self {
        Self { color: stroke_color(tool, theme), width }
    }

    fn radius(self) -> f64 {
        (self.width * 0.5).max(MIN_RADIUS)
    }
}

/// Paint the segment `from → to` onto `surface`. Returns the number of pixels written.
///
/// Parts of the segment outside the surface are clipped. Does nothing on an
/// uninitialized surface.
pub fn draw_segment(surface: &mut Surface, from: Point, to: Point, style: StrokeStyle) -> usize {
    let Some(img) = surface.image_mut() else {
        return 0;
    };
    let r = style.radius();
    let (w, h) = (f64::from(img.width()), f64::from(img.height()));

    let min_x = (from.x.min(to.x) - r).floor().max(0.0);
    let max_x = (from.x.max(to.x) + r).ceil().min(w - 1.0);
    let min_y = (from.y.min(to.y) - r).floor().max(0.0);
    let max_y = (from.y.max(to.y) + r).ceil().min(h - 1.0);
    if min_x > max_x || min_y > max_y {
        return 0;
    }

    let r2 = r * r;
    let mut written = 0;
    for py in (min_y as u32)..=(max_y as u32) {
        for px in (min_x as u32)..=(max_x as u32) {
            let center = Point::new(f64::from(px) + 0.5, f64::from(py) + 0.5);
            if dist2_to_segment(center, from, to) <= r2 {
                img.put_pixel(px, py, Rgba(style.color));
                written += 1;
            }
        }
    }
    written
}

/// Squared distance from `p` to the closest point on segment `a → b`.
fn dist2_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let d = b.offset_from(a);
    let len2 = d.x * d.x + d.y * d.y;
    let t = if len2 <= f64::EPSILON {
        0.0
    } else {
        let ap = p.offset_from(a);
        ((ap.x * d.x + ap.y * d.y) / len2).clamp(0.0, 1.0)
    };
    let dx = p.x - (a.x + t * d.x);
    let dy = p.y - (a.y + t * d.y);
    dx * dx + dy * dy
}
