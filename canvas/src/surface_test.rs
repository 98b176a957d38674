#![allow(clippy::float_cmp)]

use super::*;
use crate::input::TouchPoint;

const INK: [u8; 4] = [10, 20, 30, 255];

fn surface(w: u32, h: u32) -> Surface {
    let mut s = Surface::new();
    assert!(s.initialize(Size::new(w, h)));
    s
}

fn paint(s: &mut Surface, x: u32, y: u32) {
    if let Some(img) = s.image_mut() {
        img.put_pixel(x, y, Rgba(INK));
    }
}

// =============================================================
// Initialization
// =============================================================

#[test]
fn new_surface_is_uninitialized() {
    let s = Surface::new();
    assert!(!s.is_initialized());
    assert_eq!(s.size(), Size::default());
    assert!(s.snapshot().is_none());
    assert!(s.is_blank());
}

#[test]
fn initialize_matches_container() {
    let s = surface(40, 30);
    assert!(s.is_initialized());
    assert_eq!(s.size(), Size::new(40, 30));
}

#[test]
fn initialize_starts_blank() {
    let s = surface(8, 8);
    assert!(s.is_blank());
    assert_eq!(s.pixel(0, 0), Some(BLANK));
    assert_eq!(s.pixel(7, 7), Some(BLANK));
}

#[test]
fn initialize_empty_container_is_noop() {
    let mut s = Surface::new();
    assert!(!s.initialize(Size::new(0, 100)));
    assert!(!s.is_initialized());
}

#[test]
fn initialize_empty_container_keeps_existing_surface() {
    let mut s = surface(10, 10);
    paint(&mut s, 1, 1);
    assert!(!s.initialize(Size::new(0, 0)));
    assert_eq!(s.pixel(1, 1), Some(INK));
}

#[test]
fn reinitialize_discards_content() {
    let mut s = surface(10, 10);
    paint(&mut s, 2, 2);
    assert!(s.initialize(Size::new(10, 10)));
    assert!(s.is_blank());
}

#[test]
fn reset_drops_buffer() {
    let mut s = surface(10, 10);
    s.reset();
    assert!(!s.is_initialized());
}

// =============================================================
// Resize
// =============================================================

#[test]
fn resize_larger_preserves_content_at_same_position() {
    let mut s = surface(10, 10);
    paint(&mut s, 0, 0);
    paint(&mut s, 9, 9);
    paint(&mut s, 4, 7);

    s.resize(Size::new(20, 15));

    assert_eq!(s.size(), Size::new(20, 15));
    assert_eq!(s.pixel(0, 0), Some(INK));
    assert_eq!(s.pixel(9, 9), Some(INK));
    assert_eq!(s.pixel(4, 7), Some(INK));
    assert_eq!(s.pixel(15, 12), Some(BLANK));
}

#[test]
fn resize_same_size_preserves_everything() {
    let mut s = surface(12, 12);
    paint(&mut s, 11, 0);
    let before = s.snapshot();
    s.resize(Size::new(12, 12));
    assert_eq!(s.snapshot(), before);
}

#[test]
fn resize_smaller_clips() {
    let mut s = surface(10, 10);
    paint(&mut s, 2, 2);
    paint(&mut s, 8, 8);

    s.resize(Size::new(5, 5));

    assert_eq!(s.size(), Size::new(5, 5));
    assert_eq!(s.pixel(2, 2), Some(INK));
    assert_eq!(s.pixel(8, 8), None);
}

#[test]
fn resize_uninitialized_initializes() {
    let mut s = Surface::new();
    s.resize(Size::new(6, 4));
    assert_eq!(s.size(), Size::new(6, 4));
    assert!(s.is_blank());
}

#[test]
fn resize_to_empty_keeps_surface() {
    let mut s = surface(10, 10);
    paint(&mut s, 3, 3);
    s.resize(Size::new(0, 10));
    assert_eq!(s.size(), Size::new(10, 10));
    assert_eq!(s.pixel(3, 3), Some(INK));
}

// =============================================================
// Event mapping
// =============================================================

#[test]
fn map_pointer_uses_offsets() {
    let s = surface(100, 100);
    let p = s.map_event(&PointerSample::Pointer { offset_x: 12.5, offset_y: 40.0 });
    assert_eq!(p, Point::new(12.5, 40.0));
}

#[test]
fn map_touch_uses_first_touch_relative_to_origin() {
    let s = surface(100, 100);
    let sample = PointerSample::Touch {
        touches: vec![
            TouchPoint { client_x: 150.0, client_y: 220.0 },
            TouchPoint { client_x: 999.0, client_y: 999.0 },
        ],
        origin: Point::new(100.0, 200.0),
    };
    assert_eq!(s.map_event(&sample), Point::new(50.0, 20.0));
}

#[test]
fn map_touch_without_contacts_is_origin() {
    let s = surface(100, 100);
    let sample = PointerSample::Touch { touches: Vec::new(), origin: Point::new(5.0, 5.0) };
    assert_eq!(s.map_event(&sample), Point::origin());
}

#[test]
fn map_event_on_uninitialized_surface_is_origin() {
    let s = Surface::new();
    let p = s.map_event(&PointerSample::Pointer { offset_x: 30.0, offset_y: 30.0 });
    assert_eq!(p, Point::origin());
}

// =============================================================
// Snapshot / restore / clear
// =============================================================

#[test]
fn snapshot_captures_size_and_bytes() {
    let mut s = surface(3, 2);
    paint(&mut s, 1, 1);
    let snap = s.snapshot().unwrap();
    assert_eq!(snap.size(), Size::new(3, 2));
    assert_eq!(snap.byte_len(), 3 * 2 * 4);
    let idx = (3 + 1) * 4;
    assert_eq!(&snap.pixels()[idx..idx + 4], &INK);
}

#[test]
fn snapshot_is_independent_of_later_mutation() {
    let mut s = surface(4, 4);
    let snap = s.snapshot().unwrap();
    paint(&mut s, 0, 0);
    assert!(snap.pixels().iter().all(|b| *b == 0));
}

#[test]
fn restore_same_size_replaces_pixels() {
    let mut s = surface(4, 4);
    paint(&mut s, 1, 2);
    let snap = s.snapshot().unwrap();

    s.clear();
    paint(&mut s, 3, 3);
    s.restore(&snap).unwrap();

    assert_eq!(s.pixel(1, 2), Some(INK));
    assert_eq!(s.pixel(3, 3), Some(BLANK));
}

#[test]
fn restore_smaller_snapshot_keeps_size_and_blanks_the_rest() {
    let mut s = surface(4, 4);
    paint(&mut s, 1, 2);
    let snap = s.snapshot().unwrap();

    s.resize(Size::new(8, 8));
    paint(&mut s, 6, 6);
    s.restore(&snap).unwrap();

    assert_eq!(s.size(), Size::new(8, 8));
    assert_eq!(s.pixel(1, 2), Some(INK));
    assert_eq!(s.pixel(6, 6), Some(BLANK));
}

#[test]
fn restore_larger_snapshot_clips() {
    let mut s = surface(8, 8);
    paint(&mut s, 1, 1);
    paint(&mut s, 6, 6);
    let snap = s.snapshot().unwrap();

    s.resize(Size::new(4, 4));
    s.clear();
    s.restore(&snap).unwrap();

    assert_eq!(s.size(), Size::new(4, 4));
    assert_eq!(s.pixel(1, 1), Some(INK));
    assert_eq!(s.pixel(6, 6), None);
}

#[test]
fn restore_onto_uninitialized_adopts_snapshot_size() {
    let mut src = surface(3, 5);
    paint(&mut src, 2, 4);
    let snap = src.snapshot().unwrap();

    let mut s = Surface::new();
    s.restore(&snap).unwrap();
    assert_eq!(s.size(), Size::new(3, 5));
    assert_eq!(s.pixel(2, 4), Some(INK));
}

#[test]
fn restore_rejects_mismatched_snapshot() {
    let mut s = surface(4, 4);
    paint(&mut s, 0, 0);
    let bad = Snapshot::from_raw_parts(Size::new(4, 4), vec![0; 7]);

    let err = s.restore(&bad).unwrap_err();
    assert!(matches!(err, CanvasError::SnapshotMismatch { expected: 64, actual: 7, .. }));
    assert_eq!(s.pixel(0, 0), Some(INK));
}

#[test]
fn clear_blanks_every_pixel() {
    let mut s = surface(5, 5);
    paint(&mut s, 0, 0);
    paint(&mut s, 4, 4);
    s.clear();
    assert!(s.is_blank());
    assert_eq!(s.size(), Size::new(5, 5));
}

#[test]
fn pixel_out_of_bounds_is_none() {
    let s = surface(5, 5);
    assert_eq!(s.pixel(5, 0), None);
    assert_eq!(s.pixel(0, 5), None);
}
