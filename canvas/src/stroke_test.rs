use super::*;
use crate::consts::BLANK;
use crate::geom::Size;

fn surface(w: u32, h: u32) -> Surface {
    let mut s = Surface::new();
    s.initialize(Size::new(w, h));
    s
}

fn pen(width: f64) -> StrokeStyle {
    StrokeStyle::new(Tool::Pen, Theme::Light, width)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Color selection
// =============================================================

#[test]
fn pen_uses_foreground() {
    assert_eq!(stroke_color(Tool::Pen, Theme::Light), Theme::Light.foreground());
    assert_eq!(stroke_color(Tool::Pen, Theme::Dark), Theme::Dark.foreground());
}

#[test]
fn eraser_uses_background() {
    assert_eq!(stroke_color(Tool::Eraser, Theme::Light), Theme::Light.background());
    assert_eq!(stroke_color(Tool::Eraser, Theme::Dark), Theme::Dark.background());
}

#[test]
fn theme_swap_changes_pen_color() {
    assert_ne!(stroke_color(Tool::Pen, Theme::Light), stroke_color(Tool::Pen, Theme::Dark));
}

#[test]
fn style_carries_width() {
    let style = StrokeStyle::new(Tool::Eraser, Theme::Dark, 7.0);
    assert!((style.width - 7.0).abs() < f64::EPSILON);
    assert_eq!(style.color, Theme::Dark.background());
}

// =============================================================
// Segment rasterization
// =============================================================

#[test]
fn horizontal_segment_paints_along_its_length() {
    let mut s = surface(40, 20);
    let n = draw_segment(&mut s, pt(5.0, 10.0), pt(30.0, 10.0), pen(3.0));
    assert!(n > 0);
    for x in 5..30 {
        assert_eq!(s.pixel(x, 10), Some(Theme::Light.foreground()), "x = {x}");
    }
}

#[test]
fn segment_leaves_far_pixels_alone() {
    let mut s = surface(40, 20);
    draw_segment(&mut s, pt(5.0, 10.0), pt(30.0, 10.0), pen(3.0));
    assert_eq!(s.pixel(17, 2), Some(BLANK));
    assert_eq!(s.pixel(17, 17), Some(BLANK));
    assert_eq!(s.pixel(38, 10), Some(BLANK));
}

#[test]
fn width_controls_thickness() {
    let mut thin = surface(40, 40);
    let mut thick = surface(40, 40);
    let a = draw_segment(&mut thin, pt(5.0, 20.0), pt(35.0, 20.0), pen(2.0));
    let b = draw_segment(&mut thick, pt(5.0, 20.0), pt(35.0, 20.0), pen(10.0));
    assert!(b > a * 3);
    assert_eq!(thick.pixel(20, 16), Some(Theme::Light.foreground()));
    assert_eq!(thin.pixel(20, 16), Some(BLANK));
}

#[test]
fn round_cap_extends_past_endpoint() {
    let mut s = surface(40, 40);
    draw_segment(&mut s, pt(10.0, 20.0), pt(20.0, 20.0), pen(8.0));
    // Three pixels beyond the end point, inside the 4px cap radius.
    assert_eq!(s.pixel(22, 20), Some(Theme::Light.foreground()));
    // Cap corners are rounded off.
    assert_eq!(s.pixel(23, 23), Some(BLANK));
}

#[test]
fn zero_length_segment_paints_a_dot() {
    let mut s = surface(20, 20);
    let n = draw_segment(&mut s, pt(10.0, 10.0), pt(10.0, 10.0), pen(4.0));
    assert!(n > 0);
    assert_eq!(s.pixel(10, 10), Some(Theme::Light.foreground()));
    assert_eq!(s.pixel(15, 15), Some(BLANK));
}

#[test]
fn diagonal_segment_hits_midpoint() {
    let mut s = surface(50, 50);
    draw_segment(&mut s, pt(0.0, 0.0), pt(40.0, 40.0), pen(3.0));
    assert_eq!(s.pixel(20, 20), Some(Theme::Light.foreground()));
    assert_eq!(s.pixel(30, 10), Some(BLANK));
}

#[test]
fn segment_is_clipped_to_surface() {
    let mut s = surface(10, 10);
    let n = draw_segment(&mut s, pt(-20.0, 5.5), pt(30.0, 5.5), pen(1.0));
    assert_eq!(n, 10);
    assert_eq!(s.pixel(0, 5), Some(Theme::Light.foreground()));
    assert_eq!(s.pixel(9, 5), Some(Theme::Light.foreground()));
}

#[test]
fn segment_entirely_outside_paints_nothing() {
    let mut s = surface(10, 10);
    assert_eq!(draw_segment(&mut s, pt(-50.0, -50.0), pt(-40.0, -45.0), pen(3.0)), 0);
    assert_eq!(draw_segment(&mut s, pt(50.0, 50.0), pt(60.0, 60.0), pen(3.0)), 0);
    assert!(s.is_blank());
}

#[test]
fn uninitialized_surface_paints_nothing() {
    let mut s = Surface::new();
    assert_eq!(draw_segment(&mut s, pt(1.0, 1.0), pt(5.0, 5.0), pen(3.0)), 0);
}

#[test]
fn eraser_overwrites_with_background() {
    let mut s = surface(30, 30);
    draw_segment(&mut s, pt(5.0, 15.0), pt(25.0, 15.0), pen(5.0));
    let eraser = StrokeStyle::new(Tool::Eraser, Theme::Light, 5.0);
    draw_segment(&mut s, pt(15.0, 5.0), pt(15.0, 25.0), eraser);
    assert_eq!(s.pixel(15, 15), Some(Theme::Light.background()));
    assert_eq!(s.pixel(7, 15), Some(Theme::Light.foreground()));
}
