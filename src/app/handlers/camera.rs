// SPDX-License-Identifier: GPL-3.0-only

//! Camera control handlers
//!
//! Handles device enumeration results, incoming frames, stream failures,
//! and facing switches.

use crate::app::state::{AppModel, CameraStatus, Message};
use crate::backends::camera::types::CameraFrame;
use cosmic::Task;
use std::sync::Arc;
use tracing::{debug, info, warn};

impl AppModel {
    pub(crate) fn handle_cameras_initialized(
        &mut self,
        result: Result<Vec<crate::backends::camera::types::CameraDevice>, String>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok(cameras) => {
                info!(count = cameras.len(), "Cameras enumerated");
                self.available_cameras = cameras;
                self.camera_status = CameraStatus::Probing;

                // Bind the preview as soon as devices are known; selection
                // falls back silently when no device matches the facing
                if self.state.is_live() && !self.session.is_active() {
                    self.session.start();
                }
            }
            Err(error) => {
                warn!(%error, "Camera enumeration failed");
                self.camera_status = CameraStatus::Unavailable(error);
            }
        }
        Task::none()
    }

    pub(crate) fn handle_camera_frame(
        &mut self,
        frame: Arc<CameraFrame>,
        generation: u64,
    ) -> Task<cosmic::Action<Message>> {
        // A frame from a torn-down stream must not override the current one
        if !self.session.accepts(generation) {
            debug!(
                generation,
                current = self.session.generation(),
                "Dropping frame from stale stream"
            );
            return Task::none();
        }

        self.preview_handle = Some(cosmic::widget::image::Handle::from_rgba(
            frame.width,
            frame.height,
            frame.data.to_vec(),
        ));
        self.current_frame = Some(frame);
        self.camera_status = CameraStatus::Ready;
        Task::none()
    }

    pub(crate) fn handle_camera_stream_failed(
        &mut self,
        generation: u64,
        error: String,
    ) -> Task<cosmic::Action<Message>> {
        if !self.session.accepts(generation) {
            debug!(generation, "Ignoring failure of stale stream");
            return Task::none();
        }

        // The UI stays in Live with no feed; the status line offers a retry
        warn!(%error, "Camera stream failed");
        self.session.stop();
        self.current_frame = None;
        self.preview_handle = None;
        self.camera_status = CameraStatus::Unavailable(error);
        Task::none()
    }

    pub(crate) fn handle_switch_facing(&mut self) -> Task<cosmic::Action<Message>> {
        if !self.state.is_live() {
            return Task::none();
        }

        // The feed goes dark until the new stream delivers its first frame
        self.session.switch_facing();
        self.current_frame = None;
        self.preview_handle = None;
        self.camera_status = CameraStatus::Probing;

        info!(facing = %self.session.facing(), "Switched camera facing");
        self.config.facing = self.session.facing();
        self.save_config();
        Task::none()
    }

    pub(crate) fn handle_retry_camera(&mut self) -> Task<cosmic::Action<Message>> {
        if !self.state.is_live() {
            return Task::none();
        }

        info!("Retrying camera after failure");
        self.camera_status = CameraStatus::Probing;
        self.session.stop();
        Self::enumerate_cameras_task()
    }
}
