//! Embedded image references.
//!
//! The only embedded image a resume carries is a QR code for a profile URL.
//! The renderer stores the encoded module grid, so every exporter works from
//! the same payload: HTML and DOCX rasterize it to PNG, PDF draws it as
//! vector squares.

use serde::{Deserialize, Serialize};

/// Default printed edge length of an embedded image, in points.
pub const DEFAULT_IMAGE_SIZE_PT: f32 = 72.0;

/// An image block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Alternative text
    pub alt_text: String,

    /// Caption shown below the image
    pub caption: Option<String>,

    /// Edge length in points (images are square)
    pub size_pt: f32,

    /// Encoded QR payload
    pub qr: QrMatrix,
}

impl ImageRef {
    /// Create a QR image reference.
    pub fn qr_code(qr: QrMatrix, alt_text: impl Into<String>) -> Self {
        Self {
            alt_text: alt_text.into(),
            caption: None,
            size_pt: DEFAULT_IMAGE_SIZE_PT,
            qr,
        }
    }

    /// Set the caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set the display size.
    pub fn with_size(mut self, size_pt: f32) -> Self {
        self.size_pt = size_pt.max(1.0);
        self
    }
}

/// A square grid of QR code modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrMatrix {
    /// Encoded text
    pub target: String,

    /// Number of modules per side
    pub width: usize,

    /// Row-major module colors, `true` = dark
    #[serde(skip_serializing)]
    #[serde(default)]
    pub modules: Vec<bool>,
}

impl QrMatrix {
    /// Create a matrix.
    ///
    /// Returns `None` if `modules` does not hold exactly `width * width`
    /// entries.
    pub fn new(target: impl Into<String>, width: usize, modules: Vec<bool>) -> Option<Self> {
        if width == 0 || modules.len() != width * width {
            return None;
        }
        Some(Self {
            target: target.into(),
            width,
            modules,
        })
    }

    /// Whether the module at (x, y) is dark. Out-of-range is light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width
            && y < self.width
            && self.modules.get(y * self.width + x).copied().unwrap_or(false)
    }

    /// Check if module data is present for every cell.
    ///
    /// Module data is not serialized, so a matrix read back from JSON is
    /// incomplete.
    pub fn is_complete(&self) -> bool {
        self.width > 0 && self.modules.len() == self.width * self.width
    }

    /// Iterate over the coordinates of dark modules.
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, dark)| **dark)
            .map(move |(i, _)| (i % self.width, i / self.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_matrix_shape_checked() {
        assert!(QrMatrix::new("x", 2, vec![true, false, false]).is_none());
        assert!(QrMatrix::new("x", 0, vec![]).is_none());
        let m = QrMatrix::new("x", 2, vec![true, false, false, true]).unwrap();
        assert!(m.is_dark(0, 0));
        assert!(!m.is_dark(1, 0));
        assert!(m.is_dark(1, 1));
        assert!(!m.is_dark(5, 5));
        assert_eq!(m.dark_modules().collect::<Vec<_>>(), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_image_ref_builder() {
        let m = QrMatrix::new("x", 1, vec![true]).unwrap();
        let img = ImageRef::qr_code(m, "QR").with_caption("Scan").with_size(0.0);
        assert_eq!(img.caption.as_deref(), Some("Scan"));
        assert_eq!(img.size_pt, 1.0);
    }
}
