// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function routes messages to focused handler methods
//! implemented in the `handlers` submodules.

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),

            // ===== Camera Control =====
            Message::CamerasInitialized(result) => self.handle_cameras_initialized(result),
            Message::CameraFrame(frame, generation) => self.handle_camera_frame(frame, generation),
            Message::CameraStreamFailed(generation, error) => {
                self.handle_camera_stream_failed(generation, error)
            }
            Message::SwitchFacing => self.handle_switch_facing(),
            Message::RetryCamera => self.handle_retry_camera(),

            // ===== Capture & Submission =====
            Message::Capture => self.handle_capture(),
            Message::PhotoCaptured(result) => self.handle_photo_captured(result),
            Message::Retake => self.handle_retake(),
            Message::Submit => self.handle_submit(),
            Message::SubmissionFinished(result) => self.handle_submission_finished(result),

            // ===== Settings =====
            Message::UpdateConfig(config) => self.handle_update_config(config),
            Message::EndpointInput(value) => self.handle_endpoint_input(value),
            Message::SelectPhotoQuality(index) => self.handle_select_photo_quality(index),
        }
    }
}
