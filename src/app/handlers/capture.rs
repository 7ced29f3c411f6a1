// SPDX-License-Identifier: GPL-3.0-only

//! Capture operation handlers

use crate::app::state::{AppModel, Message};
use crate::capture::{self, CapturedImage};
use crate::errors::CaptureError;
use cosmic::Task;
use std::sync::Arc;
use tracing::{info, warn};

impl AppModel {
    /// Snapshot the current preview frame and encode it off-thread.
    ///
    /// The session stops immediately: the camera light goes out the moment
    /// the shutter is pressed, not when encoding finishes.
    pub(crate) fn handle_capture(&mut self) -> Task<cosmic::Action<Message>> {
        if !self.state.is_live() || self.is_capturing {
            return Task::none();
        }

        let Some(frame) = self.current_frame.clone() else {
            info!("No frame available to capture");
            return Task::none();
        };

        // Streams deliver zero-dimension frames before caps negotiation
        // completes; capturing one would produce a degenerate image
        if !frame.has_content() {
            warn!("Rejecting capture before first decoded frame");
            return Task::none();
        }

        info!(width = frame.width, height = frame.height, "Capturing photo");
        self.is_capturing = true;
        self.session.stop();

        let quality = self.config.photo_quality;
        Task::perform(
            async move { capture::encode_frame_task(frame, quality).await },
            |result| cosmic::Action::App(Message::PhotoCaptured(result)),
        )
    }

    pub(crate) fn handle_photo_captured(
        &mut self,
        result: Result<Arc<CapturedImage>, CaptureError>,
    ) -> Task<cosmic::Action<Message>> {
        self.is_capturing = false;

        match result {
            Ok(image) => {
                self.review_handle = Some(cosmic::widget::image::Handle::from_bytes(
                    image.data.clone(),
                ));
                if !self.state.photo_captured(image) {
                    // State moved on while encoding (e.g. shutdown); nothing to review
                    self.review_handle = None;
                    return Task::none();
                }
                self.current_frame = None;
                self.preview_handle = None;
                self.status_message = None;
            }
            Err(error) => {
                // Back to the live feed; the session was already stopped
                warn!(%error, "Photo capture failed");
                self.status_message = Some(error.to_string());
                self.session.start();
            }
        }
        Task::none()
    }
}
