// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::backends::camera::session::CameraSession;
use crate::backends::camera::types::{CameraDevice, CameraFrame};
use crate::capture::CapturedImage;
use crate::config::Config;
use crate::errors::{CaptureError, SubmitError};
use crate::geolocation::LocationProvider;
use crate::submission::SubmissionClient;
use cosmic::cosmic_config;
use cosmic::widget::about::About;
use std::sync::Arc;

/// Screen-level state machine.
///
/// The captured image lives inside the variants, so an image can exist only
/// while reviewing or submitting, and `Live` can never show a stale still.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum UiState {
    /// Showing the live preview; a camera session may be streaming
    #[default]
    Live,
    /// A captured still is shown for review
    Reviewing { image: Arc<CapturedImage> },
    /// The reviewed still is being submitted
    Submitting { image: Arc<CapturedImage> },
}

impl UiState {
    pub fn is_live(&self) -> bool {
        matches!(self, UiState::Live)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, UiState::Submitting { .. })
    }

    /// The captured image, when one exists
    pub fn captured_image(&self) -> Option<&Arc<CapturedImage>> {
        match self {
            UiState::Live => None,
            UiState::Reviewing { image } | UiState::Submitting { image } => Some(image),
        }
    }

    /// Capture finished: enter review. Only valid from `Live`.
    pub fn photo_captured(&mut self, image: Arc<CapturedImage>) -> bool {
        if !self.is_live() {
            return false;
        }
        *self = UiState::Reviewing { image };
        true
    }

    /// Begin submitting the reviewed image.
    ///
    /// Returns the image for the submission task, or `None` when there is
    /// nothing to submit (wrong state, or a submission already in flight).
    pub fn begin_submit(&mut self) -> Option<Arc<CapturedImage>> {
        match self {
            UiState::Reviewing { image } => {
                let image = Arc::clone(image);
                *self = UiState::Submitting {
                    image: Arc::clone(&image),
                };
                Some(image)
            }
            _ => None,
        }
    }

    /// Submission failed: return to review with the image preserved
    pub fn submit_failed(&mut self) {
        if let UiState::Submitting { image } = self {
            *self = UiState::Reviewing {
                image: Arc::clone(image),
            };
        }
    }

    /// Submission accepted: discard the image and return to the live view
    pub fn submit_succeeded(&mut self) {
        if self.is_submitting() {
            *self = UiState::Live;
        }
    }

    /// Discard the reviewed image and return to the live view.
    ///
    /// Not available while a submission is in flight.
    pub fn retake(&mut self) -> bool {
        match self {
            UiState::Reviewing { .. } => {
                *self = UiState::Live;
                true
            }
            _ => false,
        }
    }
}

/// Feed availability shown on the live view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CameraStatus {
    /// Enumerating devices or waiting for the first frame
    #[default]
    Probing,
    /// Frames are arriving
    Ready,
    /// The stream could not be opened; the live view shows no feed
    Unavailable(String),
}

/// The context page to display in the context drawer
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
}

/// Messages emitted by the application and its widgets
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    /// Open external URL (repository, etc.)
    LaunchUrl(String),
    /// Toggle context drawer page (About, Settings)
    ToggleContextPage(ContextPage),

    // ===== Camera Control =====
    /// Cameras enumerated asynchronously during startup or retry
    CamerasInitialized(Result<Vec<CameraDevice>, String>),
    /// New frame from the stream of the given session generation
    CameraFrame(Arc<CameraFrame>, u64),
    /// The stream of the given generation failed to open or died
    CameraStreamFailed(u64, String),
    /// Switch to the opposite facing direction
    SwitchFacing,
    /// Re-enumerate and restart the camera after a failure
    RetryCamera,

    // ===== Capture & Submission =====
    /// Capture the current preview frame
    Capture,
    /// Still-frame encoding finished
    PhotoCaptured(Result<Arc<CapturedImage>, CaptureError>),
    /// Discard the reviewed image and go back to the live preview
    Retake,
    /// Submit the reviewed image
    Submit,
    /// The submission task finished
    SubmissionFinished(Result<(), SubmitError>),

    // ===== Settings =====
    /// Configuration changed on disk
    UpdateConfig(Config),
    /// Endpoint URL edited in the settings drawer
    EndpointInput(String),
    /// Photo quality preset selected from the dropdown
    SelectPhotoQuality(usize),
}

/// The application model stores app-specific state used to describe its
/// interface and drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined
    pub context_page: ContextPage,
    /// The about page for this app
    pub about: About,
    /// Configuration data that persists between application runs
    pub config: Config,
    /// Configuration handler for saving settings
    pub config_handler: Option<cosmic_config::Config>,
    /// Screen-level state (live / reviewing / submitting)
    pub state: UiState,
    /// Camera session lifecycle and stream identity
    pub session: CameraSession,
    /// Available camera devices
    pub available_cameras: Vec<CameraDevice>,
    /// Feed availability for the live view
    pub camera_status: CameraStatus,
    /// Latest preview frame
    pub current_frame: Option<Arc<CameraFrame>>,
    /// Preview frame as an image handle (rebuilt on every frame)
    pub preview_handle: Option<cosmic::widget::image::Handle>,
    /// Captured still as an image handle (valid while reviewing/submitting)
    pub review_handle: Option<cosmic::widget::image::Handle>,
    /// Whether a capture encode is in flight
    pub is_capturing: bool,
    /// Transient status line (submission errors, save notices)
    pub status_message: Option<String>,
    /// Settings drawer buffer for the endpoint URL field
    pub endpoint_input: String,
    /// Cached dropdown labels for the quality presets
    pub quality_dropdown_options: Vec<String>,
    /// Source of geolocation fixes (GeoClue in production, fakes in tests)
    pub location_provider: Arc<dyn LocationProvider>,
    /// HTTP client for submissions
    pub submission_client: SubmissionClient,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> Arc<CapturedImage> {
        Arc::new(CapturedImage {
            data: vec![0xFF, 0xD8, 0xFF, 0xD9],
            width: 640,
            height: 480,
        })
    }

    #[test]
    fn capture_enters_review() {
        let mut state = UiState::Live;
        assert!(state.photo_captured(image()));
        assert!(state.captured_image().is_some());
        assert!(!state.is_live());
    }

    #[test]
    fn capture_rejected_outside_live() {
        let mut state = UiState::Reviewing { image: image() };
        assert!(!state.photo_captured(image()));
    }

    #[test]
    fn submit_failure_preserves_image() {
        let mut state = UiState::Live;
        let captured = image();
        state.photo_captured(Arc::clone(&captured));

        let in_flight = state.begin_submit().unwrap();
        assert_eq!(in_flight, captured);
        assert!(state.is_submitting());

        state.submit_failed();
        assert_eq!(state.captured_image(), Some(&captured));
        // Back to a submittable state
        assert!(state.begin_submit().is_some());
    }

    #[test]
    fn submit_success_returns_to_live() {
        let mut state = UiState::Live;
        state.photo_captured(image());
        state.begin_submit().unwrap();

        state.submit_succeeded();
        assert!(state.is_live());
        assert!(state.captured_image().is_none());
    }

    #[test]
    fn double_submit_is_rejected() {
        let mut state = UiState::Live;
        state.photo_captured(image());
        assert!(state.begin_submit().is_some());
        assert!(state.begin_submit().is_none());
    }

    #[test]
    fn retake_only_from_review() {
        let mut state = UiState::Live;
        assert!(!state.retake());

        state.photo_captured(image());
        assert!(state.retake());
        assert!(state.is_live());

        state.photo_captured(image());
        state.begin_submit();
        assert!(!state.retake());
    }
}
