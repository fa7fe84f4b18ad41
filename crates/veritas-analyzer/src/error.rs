//! Local validation errors.

use thiserror::Error;
use veritas_domain::Modality;

/// Input rejected before anything is sent
///
/// The `Display` text is the short title shown to the user; see
/// [`ValidationError::description`] for the longer hint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Text buffer is empty after trimming
    #[error("No content to analyze")]
    EmptyText,

    /// URL buffer is empty after trimming
    #[error("No URL provided")]
    EmptyUrl,

    /// Image mode without a selected file
    #[error("No image selected")]
    NoImageSelected,

    /// Attachment of the wrong media type
    #[error("Invalid file type")]
    InvalidFileType {
        /// Modality the attachment was meant for
        expected: Modality,
        /// Media type that was declared
        media_type: String,
    },
}

impl ValidationError {
    /// Longer explanation suitable for a toast or status line
    pub fn description(&self) -> &'static str {
        match self {
            ValidationError::EmptyText => "Please enter some text to analyze.",
            ValidationError::EmptyUrl => "Please enter a URL to analyze.",
            ValidationError::NoImageSelected => "Please select an image to analyze.",
            ValidationError::InvalidFileType {
                expected: Modality::Video,
                ..
            } => "Please select a video file (MP4, MOV).",
            ValidationError::InvalidFileType { .. } => {
                "Please select an image file (JPG, PNG, WEBP)."
            }
        }
    }
}
