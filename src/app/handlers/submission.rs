// SPDX-License-Identifier: GPL-3.0-only

//! Submission and retake handlers

use crate::app::state::{AppModel, Message};
use crate::errors::SubmitError;
use crate::fl;
use crate::submission::{self, submit_url};
use cosmic::Task;
use std::sync::Arc;
use tracing::{info, warn};

impl AppModel {
    /// Submit the reviewed image: geolocate, build the payload, POST.
    ///
    /// The geolocation fix comes first; when it fails, no network request is
    /// issued and the image stays available for another attempt.
    pub(crate) fn handle_submit(&mut self) -> Task<cosmic::Action<Message>> {
        // Fail fast on a missing endpoint before any work is spent
        let base_url = match submit_url(&self.config.endpoint_url) {
            Ok(_) => self.config.endpoint_url.clone(),
            Err(e) => {
                warn!("Submission endpoint not configured");
                self.status_message = Some(e.to_string());
                return Task::none();
            }
        };

        let Some(image) = self.state.begin_submit() else {
            return Task::none();
        };

        self.status_message = None;
        let provider = Arc::clone(&self.location_provider);
        let client = self.submission_client.clone();

        Task::perform(
            async move {
                submission::submit_with_location(provider.as_ref(), &client, &base_url, &image)
                    .await
            },
            |result| cosmic::Action::App(Message::SubmissionFinished(result)),
        )
    }

    pub(crate) fn handle_submission_finished(
        &mut self,
        result: Result<(), SubmitError>,
    ) -> Task<cosmic::Action<Message>> {
        if !self.state.is_submitting() {
            // A stale completion (e.g. after state was reset) changes nothing
            return Task::none();
        }

        match result {
            Ok(()) => {
                info!("Submission accepted, returning to live preview");
                self.state.submit_succeeded();
                self.review_handle = None;
                self.status_message = Some(fl!("submission-accepted"));
                self.camera_status = crate::app::state::CameraStatus::Probing;
                self.session.start();
            }
            Err(error) => {
                // The image is preserved; the user can retry or retake
                warn!(%error, "Submission failed");
                self.state.submit_failed();
                self.status_message = Some(error.to_string());
            }
        }
        Task::none()
    }

    pub(crate) fn handle_retake(&mut self) -> Task<cosmic::Action<Message>> {
        if !self.state.retake() {
            return Task::none();
        }

        info!(facing = %self.session.facing(), "Retake: restarting preview");
        self.review_handle = None;
        self.status_message = None;
        self.camera_status = crate::app::state::CameraStatus::Probing;
        self.session.start();
        Task::none()
    }
}
