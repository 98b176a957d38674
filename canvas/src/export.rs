//! Export: PNG encoding and download file naming.
//!
//! Encoding is pure and browser-free. Handing the bytes to the user (a
//! client-side download, or a file on disk for the headless driver) is the
//! caller's job.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::io::Cursor;

use image::ImageFormat;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::consts::EXPORT_PREFIX;
use crate::error::CanvasError;
use crate::surface::Surface;

/// An encoded image ready to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Encode the current surface as PNG.
///
/// # Errors
///
/// Returns [`CanvasError::Uninitialized`] when there is no surface, or
/// [`CanvasError::Encode`] if the encoder fails.
pub fn encode_png(surface: &Surface) -> Result<Vec<u8>, CanvasError> {
    let img = surface.image().ok_or(CanvasError::Uninitialized)?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// File name for an export taken at `at`: `drawing-2024-01-31T09:05:07.250Z.png`.
///
/// The timestamp is UTC with millisecond precision.
///
/// # Errors
///
/// Returns [`CanvasError::Timestamp`] if the time cannot be formatted.
pub fn export_filename(at: OffsetDateTime) -> Result<String, CanvasError> {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
    let stamp = at.to_offset(UtcOffset::UTC).format(format)?;
    Ok(format!("{EXPORT_PREFIX}{stamp}.png"))
}

/// Encode and name in one step.
///
/// # Errors
///
/// Propagates failures from [`encode_png`] and [`export_filename`].
pub fn export_image(surface: &Surface, at: OffsetDateTime) -> Result<ExportedImage, CanvasError> {
    let bytes = encode_png(surface)?;
    let filename = export_filename(at)?;
    Ok(ExportedImage { filename, bytes })
}
