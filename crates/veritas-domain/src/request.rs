//! Analysis requests and binary attachments

use crate::Modality;

/// A binary file selected for upload
///
/// The media type is whatever the caller declared; it is not sniffed from
/// the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name sent alongside the payload
    pub file_name: String,
    /// Declared media type (e.g. `image/png`)
    pub media_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Create a new attachment
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Whether the declared media type is an image type
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    /// Whether the declared media type is a video type
    pub fn is_video(&self) -> bool {
        self.media_type.starts_with("video/")
    }

    /// Payload size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// One submission for analysis
///
/// Built at dispatch time and consumed by a single remote exchange; nothing
/// keeps it once the exchange resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    /// Free text to classify
    Text {
        /// Text body, sent as-is (validation trims, the request does not)
        body: String,
    },

    /// A web address to classify
    Url {
        /// The address, sent as-is
        address: String,
    },

    /// An image upload
    Image {
        /// The image file
        payload: Attachment,
    },

    /// A video upload
    Video {
        /// The video file, if one was selected
        payload: Option<Attachment>,
    },
}

impl AnalysisRequest {
    /// Modality this request belongs to
    pub fn modality(&self) -> Modality {
        match self {
            AnalysisRequest::Text { .. } => Modality::Text,
            AnalysisRequest::Url { .. } => Modality::Url,
            AnalysisRequest::Image { .. } => Modality::Image,
            AnalysisRequest::Video { .. } => Modality::Video,
        }
    }
}
