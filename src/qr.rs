//! QR code encoding.
//!
//! Targets are encoded once by the renderer into a [`QrMatrix`]. Formats that
//! need a raster image turn the matrix into a PNG with [`to_png`].

use crate::error::{Error, Result};
use crate::model::QrMatrix;
#[cfg(feature = "qr")]
use crate::template::Color;

/// Quiet-zone width around the code, in modules.
pub const QUIET_ZONE: usize = 4;

/// Pixels per module in rasterized output.
pub const MODULE_PIXELS: u32 = 10;

/// Encode text as a QR code with high error correction.
#[cfg(feature = "qr")]
pub fn encode(target: &str) -> Result<QrMatrix> {
    use qrcode::{EcLevel, QrCode};

    let code = QrCode::with_error_correction_level(target.as_bytes(), EcLevel::H)
        .map_err(|e| Error::Encode(format!("QR encoding error: {}", e)))?;
    let width = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == qrcode::Color::Dark)
        .collect();

    log::debug!("Encoded QR code: {} modules per side", width);
    QrMatrix::new(target, width, modules)
        .ok_or_else(|| Error::Encode("QR encoder returned a non-square matrix".into()))
}

/// Encode text as a QR code.
///
/// This build has no QR encoder; always fails.
#[cfg(not(feature = "qr"))]
pub fn encode(_target: &str) -> Result<QrMatrix> {
    Err(Error::Encode(
        "QR encoding is not available (enable the 'qr' cargo feature)".into(),
    ))
}

/// Rasterize a matrix to PNG bytes, quiet zone included.
#[cfg(feature = "qr")]
pub fn to_png(matrix: &QrMatrix, dark: Color, light: Color) -> Result<Vec<u8>> {
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    if !matrix.is_complete() {
        return Err(Error::Encode(format!(
            "QR matrix for '{}' has no module data",
            matrix.target
        )));
    }

    let side = (matrix.width + 2 * QUIET_ZONE) as u32 * MODULE_PIXELS;
    let quiet = QUIET_ZONE as u32;
    let img = RgbImage::from_fn(side, side, |px, py| {
        let (mx, my) = (px / MODULE_PIXELS, py / MODULE_PIXELS);
        let inside = mx >= quiet && my >= quiet;
        let is_dark = inside && matrix.is_dark((mx - quiet) as usize, (my - quiet) as usize);
        let c = if is_dark { dark } else { light };
        Rgb([c.r, c.g, c.b])
    });

    let mut out = Vec::new();
    DynamicImage::ImageRgb8(img).write_to(&mut Cursor::new(&mut out), ImageFormat::Png)?;
    Ok(out)
}
