//! Error types for resumeforge.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::capability::Capability;
use crate::export::ExportFormat;

/// Result type alias for resumeforge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering or exporting a resume.
///
/// Every variant is scoped to a single export attempt; none of them is fatal
/// to the process.
#[derive(Error, Debug)]
pub enum Error {
    /// No template is registered under the requested id.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// A template failed validation at registration time.
    #[error("Invalid template '{id}': {reason}")]
    InvalidTemplate {
        /// Template id
        id: String,
        /// What was wrong with it
        reason: String,
    },

    /// The backing library or resource for a format is not available.
    #[error(
        "{format} export requires the {capability} capability, which is not available \
         (enable the '{}' cargo feature)",
        .capability.cargo_feature()
    )]
    UnsupportedCapability {
        /// Requested output format
        format: ExportFormat,
        /// Missing capability
        capability: Capability,
    },

    /// Writing the destination file failed.
    #[error("Failed to write {}: {source}", .path.display())]
    ExportIo {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// I/O error outside of the destination write.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A format backend failed to encode the output.
    #[error("Encoding error: {0}")]
    Encode(String),

    /// Content that cannot be represented. Inline markup never produces this.
    #[error("Malformed content: {0}")]
    MalformedContent(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the caller can reasonably retry with another format.
    pub fn is_capability_error(&self) -> bool {
        matches!(self, Error::UnsupportedCapability { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Encode(format!("JSON serialization error: {}", err))
    }
}

#[cfg(feature = "docx")]
impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Encode(format!("DOCX packaging error: {}", err)),
        }
    }
}

#[cfg(feature = "docx")]
impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Encode(format!("DOCX XML error: {}", err))
    }
}

#[cfg(feature = "pdf")]
impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Encode(format!("PDF writing error: {}", err)),
        }
    }
}

#[cfg(feature = "qr")]
impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Encode(format!("PNG encoding error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::TemplateNotFound("fancy".to_string());
        assert_eq!(err.to_string(), "Template not found: fancy");

        let err = Error::UnsupportedCapability {
            format: ExportFormat::Docx,
            capability: Capability::DocumentAuthoring,
        };
        let msg = err.to_string();
        assert!(msg.contains("DOCX"));
        assert!(msg.contains("document-authoring"));
        assert!(msg.contains("'docx'"));
        assert!(err.is_capability_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_capability_error());
    }

    #[test]
    fn test_export_io_display_names_path() {
        let err = Error::ExportIo {
            path: PathBuf::from("/tmp/out.pdf"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/out.pdf"));
    }
}
