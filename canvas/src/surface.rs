//! Surface: the pixel buffer strokes are painted into.
//!
//! A `Surface` starts out uninitialized and only gains pixels once the host
//! has measured its container and called [`Surface::initialize`]. Hidden
//! surfaces do not keep their pixels, so the engine drops the buffer on
//! collapse and the host initializes again on expand.
//!
//! `Snapshot` is the unit of undo history: an immutable copy of every pixel
//! plus the dimensions they were captured at.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use image::{Rgba, RgbaImage};

use crate::consts::BLANK;
use crate::error::CanvasError;
use crate::geom::{Point, Size};
use crate::input::PointerSample;

/// Immutable full-resolution capture of a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    size: Size,
    pixels: Vec<u8>,
}

impl Snapshot {
    /// Dimensions at capture time.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Raw RGBA8 bytes, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Heap bytes held by this snapshot.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }

    fn to_image(&self) -> Result<RgbaImage, CanvasError> {
        RgbaImage::from_raw(self.size.width, self.size.height, self.pixels.clone()).ok_or(
            CanvasError::SnapshotMismatch {
                size: self.size,
                expected: expected_len(self.size),
                actual: self.pixels.len(),
            },
        )
    }

    #[cfg(test)]
    pub(crate) fn from_raw_parts(size: Size, pixels: Vec<u8>) -> Self {
        Self { size, pixels }
    }
}

fn expected_len(size: Size) -> usize {
    size.width as usize * size.height as usize * 4
}

/// The drawing surface owned by one engine instance.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    image: Option<RgbaImage>,
}

impl Surface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a blank buffer matching the container.
    ///
    /// An empty container leaves the surface untouched and returns `false`.
    /// Any previous content is discarded.
    pub fn initialize(&mut self, container: Size) -> bool {
        if container.is_empty() {
            log::debug!("surface initialize skipped: empty container {container:?}");
            return false;
        }
        self.image = Some(RgbaImage::from_pixel(container.width, container.height, Rgba(BLANK)));
        true
    }

    /// Drop the pixel buffer.
    pub fn reset(&mut self) {
        self.image = None;
    }

    /// Reallocate to `container`, copying prior content back at the origin.
    ///
    /// Shrinking clips; growing leaves the new area blank. If the prior
    /// content cannot be restored it is lost and the surface stays blank.
    pub fn resize(&mut self, container: Size) {
        let previous = self.snapshot();
        if !self.initialize(container) {
            return;
        }
        let Some(previous) = previous else {
            return;
        };
        if let Err(e) = self.paste(&previous) {
            log::warn!("surface resize could not restore content: {e}");
        }
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.image.is_some()
    }

    /// Current dimensions; zero when uninitialized.
    #[must_use]
    pub fn size(&self) -> Size {
        self.image.as_ref().map_or_else(Size::default, |img| Size::new(img.width(), img.height()))
    }

    /// Convert a pointer or touch sample into surface-local coordinates.
    ///
    /// Returns the origin when the surface is uninitialized or a touch event
    /// carries no active contacts.
    #[must_use]
    pub fn map_event(&self, sample: &PointerSample) -> Point {
        if !self.is_initialized() {
            return Point::origin();
        }
        match sample {
            PointerSample::Pointer { offset_x, offset_y } => Point::new(*offset_x, *offset_y),
            PointerSample::Touch { touches, origin } => touches
                .first()
                .map_or_else(Point::origin, |t| Point::new(t.client_x, t.client_y).offset_from(*origin)),
        }
    }

    /// Capture every pixel. `None` when uninitialized.
    #[must_use]
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.image.as_ref().map(|img| Snapshot {
            size: Size::new(img.width(), img.height()),
            pixels: img.as_raw().clone(),
        })
    }

    /// Put `snapshot` back onto the surface at the origin.
    ///
    /// The surface keeps its current dimensions so it stays matched to the
    /// container: a smaller snapshot leaves the rest blank, a larger one is
    /// clipped. An uninitialized surface takes the snapshot's dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::SnapshotMismatch`] if the snapshot's bytes do not
    /// fit its dimensions; the surface is left unchanged.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), CanvasError> {
        let src = snapshot.to_image()?;
        match self.image.as_mut() {
            Some(dst) if dst.dimensions() == src.dimensions() => *dst = src,
            Some(dst) => {
                dst.pixels_mut().for_each(|px| *px = Rgba(BLANK));
                image::imageops::replace(dst, &src, 0, 0);
            }
            None => self.image = Some(src),
        }
        Ok(())
    }

    /// Set every pixel back to blank.
    pub fn clear(&mut self) {
        if let Some(img) = self.image.as_mut() {
            for px in img.pixels_mut() {
                *px = Rgba(BLANK);
            }
        }
    }

    /// RGBA value at `(x, y)`, or `None` when out of bounds or uninitialized.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let img = self.image.as_ref()?;
        if x < img.width() && y < img.height() { Some(img.get_pixel(x, y).0) } else { None }
    }

    /// Whether every pixel is blank. An uninitialized surface counts as blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.image.as_ref().map_or(true, |img| img.pixels().all(|px| px.0 == BLANK))
    }

    /// Read-only view of the pixel buffer.
    #[must_use]
    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub(crate) fn image_mut(&mut self) -> Option<&mut RgbaImage> {
        self.image.as_mut()
    }

    /// Copy `snapshot` onto the current buffer at the origin, clipping to bounds.
    fn paste(&mut self, snapshot: &Snapshot) -> Result<(), CanvasError> {
        let src = snapshot.to_image()?;
        let dst = self.image.as_mut().ok_or(CanvasError::Uninitialized)?;
        image::imageops::replace(dst, &src, 0, 0);
        Ok(())
    }
}
