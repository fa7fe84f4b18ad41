//! Submission controller.

use crate::error::ValidationError;
use crate::orchestrator::{Orchestrator, PendingAnalysis};
use tracing::{debug, info};
use veritas_domain::{AnalysisRequest, Attachment, Modality};

/// Holds raw user input per modality and gates dispatch
///
/// Buffers are kept when switching modality; only the orchestrator's
/// displayed state is cleared.
#[derive(Debug)]
pub struct SubmissionController {
    orchestrator: Orchestrator,
    modality: Modality,
    text: String,
    url: String,
    image: Option<Attachment>,
    video: Option<Attachment>,
}

impl SubmissionController {
    /// Create a controller in text mode with empty buffers
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            modality: Modality::default(),
            text: String::new(),
            url: String::new(),
            image: None,
            video: None,
        }
    }

    /// The orchestrator this controller dispatches to
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Active modality
    pub fn modality(&self) -> Modality {
        self.modality
    }

    /// Text buffer
    pub fn text(&self) -> &str {
        &self.text
    }

    /// URL buffer
    pub fn url_text(&self) -> &str {
        &self.url
    }

    /// Selected image, if any
    pub fn attachment(&self) -> Option<&Attachment> {
        self.image.as_ref()
    }

    /// Selected video, if any
    pub fn video_attachment(&self) -> Option<&Attachment> {
        self.video.as_ref()
    }

    /// Replace the text buffer
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.text = value.into();
    }

    /// Replace the URL buffer
    pub fn set_url_text(&mut self, value: impl Into<String>) {
        self.url = value.into();
    }

    /// Select an image
    ///
    /// Files whose declared media type is not `image/*` are rejected and the
    /// previous selection is kept.
    pub fn set_attachment(&mut self, file: Attachment) -> Result<(), ValidationError> {
        if !file.is_image() {
            debug!(media_type = %file.media_type, "rejected image attachment");
            return Err(ValidationError::InvalidFileType {
                expected: Modality::Image,
                media_type: file.media_type,
            });
        }
        self.image = Some(file);
        Ok(())
    }

    /// Select a video
    ///
    /// Files whose declared media type is not `video/*` are rejected and the
    /// previous selection is kept.
    pub fn set_video_attachment(&mut self, file: Attachment) -> Result<(), ValidationError> {
        if !file.is_video() {
            debug!(media_type = %file.media_type, "rejected video attachment");
            return Err(ValidationError::InvalidFileType {
                expected: Modality::Video,
                media_type: file.media_type,
            });
        }
        self.video = Some(file);
        Ok(())
    }

    /// Switch the active modality and clear the displayed outcome
    pub fn select_modality(&mut self, mode: Modality) {
        debug!(from = %self.modality, to = %mode, "modality selected");
        self.modality = mode;
        self.orchestrator.reset();
    }

    /// Validate the active buffer and dispatch it
    ///
    /// On success the orchestrator has already entered `InFlight` and the
    /// returned [`PendingAnalysis`] performs the exchange. On failure nothing
    /// is dispatched and the orchestrator state is untouched.
    pub fn dispatch_current(&self) -> Result<PendingAnalysis, ValidationError> {
        let request = self.build_request()?;
        info!(modality = %self.modality, "dispatching submission");
        Ok(self.orchestrator.submit(request))
    }

    fn build_request(&self) -> Result<AnalysisRequest, ValidationError> {
        match self.modality {
            Modality::Text => {
                if self.text.trim().is_empty() {
                    return Err(ValidationError::EmptyText);
                }
                Ok(AnalysisRequest::Text {
                    body: self.text.clone(),
                })
            }
            Modality::Url => {
                if self.url.trim().is_empty() {
                    return Err(ValidationError::EmptyUrl);
                }
                Ok(AnalysisRequest::Url {
                    address: self.url.clone(),
                })
            }
            Modality::Image => {
                let payload = self.image.clone().ok_or(ValidationError::NoImageSelected)?;
                Ok(AnalysisRequest::Image { payload })
            }
            // Video is never validated locally; the orchestrator rejects it.
            Modality::Video => Ok(AnalysisRequest::Video {
                payload: self.video.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use veritas_sdk::{AnalysisClient, MockTransport};

    fn controller() -> SubmissionController {
        let client = AnalysisClient::with_transport(Arc::new(MockTransport::new()));
        SubmissionController::new(Orchestrator::new(client))
    }

    #[test]
    fn test_defaults() {
        let controller = controller();
        assert_eq!(controller.modality(), Modality::Text);
        assert_eq!(controller.text(), "");
        assert!(controller.attachment().is_none());
    }

    #[test]
    fn test_whitespace_text_is_empty() {
        let mut controller = controller();
        controller.set_text("   \n\t ");
        assert_eq!(controller.build_request(), Err(ValidationError::EmptyText));
    }

    #[test]
    fn test_text_is_sent_untrimmed() {
        let mut controller = controller();
        controller.set_text("  Sample claim ");
        assert_eq!(
            controller.build_request(),
            Ok(AnalysisRequest::Text {
                body: "  Sample claim ".to_string()
            })
        );
    }

    #[test]
    fn test_url_requires_value() {
        let mut controller = controller();
        controller.select_modality(Modality::Url);
        assert_eq!(controller.build_request(), Err(ValidationError::EmptyUrl));

        controller.set_url_text("https://example.com/article");
        assert_eq!(
            controller.build_request(),
            Ok(AnalysisRequest::Url {
                address: "https://example.com/article".to_string()
            })
        );
    }

    #[test]
    fn test_image_requires_selection() {
        let mut controller = controller();
        controller.select_modality(Modality::Image);
        assert_eq!(controller.build_request(), Err(ValidationError::NoImageSelected));
    }

    #[test]
    fn test_rejected_attachment_keeps_previous() {
        let mut controller = controller();
        let photo = Attachment::new("photo.jpg", "image/jpeg", vec![1, 2]);
        controller.set_attachment(photo.clone()).unwrap();

        let err = controller
            .set_attachment(Attachment::new("notes.txt", "text/plain", b"x".to_vec()))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid file type");
        assert_eq!(controller.attachment(), Some(&photo));
    }

    #[test]
    fn test_video_slot_accepts_only_video() {
        let mut controller = controller();
        assert!(controller
            .set_video_attachment(Attachment::new("a.png", "image/png", vec![0]))
            .is_err());
        assert!(controller.video_attachment().is_none());

        controller
            .set_video_attachment(Attachment::new("clip.mov", "video/quicktime", vec![0]))
            .unwrap();
        assert!(controller.video_attachment().is_some());
    }

    #[test]
    fn test_video_without_file_carries_no_payload() {
        let mut controller = controller();
        controller.select_modality(Modality::Video);
        assert_eq!(
            controller.build_request(),
            Ok(AnalysisRequest::Video { payload: None })
        );

        let clip = Attachment::new("clip.mp4", "video/mp4", vec![7]);
        controller.set_video_attachment(clip.clone()).unwrap();
        assert_eq!(
            controller.build_request(),
            Ok(AnalysisRequest::Video {
                payload: Some(clip)
            })
        );
    }

    #[test]
    fn test_buffers_survive_modality_switch() {
        let mut controller = controller();
        controller.set_text("keep me");
        controller.select_modality(Modality::Url);
        controller.select_modality(Modality::Text);
        assert_eq!(controller.text(), "keep me");
    }
}
