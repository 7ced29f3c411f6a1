// SPDX-License-Identifier: GPL-3.0-only

//! UI navigation and settings handlers

use crate::app::state::{AppModel, ContextPage, Message};
use crate::capture::EncodingQuality;
use crate::config::Config;
use cosmic::Task;
use tracing::{error, info};

impl AppModel {
    pub(crate) fn handle_launch_url(&mut self, url: String) -> Task<cosmic::Action<Message>> {
        if let Err(e) = open::that_detached(&url) {
            error!(url = %url, error = %e, "Failed to open URL");
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_context_page(
        &mut self,
        page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    pub(crate) fn handle_update_config(&mut self, config: Config) -> Task<cosmic::Action<Message>> {
        self.endpoint_input = config.endpoint_url.clone();

        // A facing change from outside (e.g. another instance) restarts the
        // stream under a fresh generation
        if self.config.facing != config.facing {
            self.session.set_facing(config.facing);
            if self.session.is_active() {
                self.session.start();
            }
        }

        self.config = config;
        Task::none()
    }

    pub(crate) fn handle_endpoint_input(&mut self, value: String) -> Task<cosmic::Action<Message>> {
        self.endpoint_input = value.clone();
        self.config.endpoint_url = value;
        self.save_config();
        Task::none()
    }

    pub(crate) fn handle_select_photo_quality(
        &mut self,
        index: usize,
    ) -> Task<cosmic::Action<Message>> {
        if let Some(quality) = EncodingQuality::ALL.get(index) {
            info!(quality = quality.display_name(), "Photo quality selected");
            self.config.photo_quality = *quality;
            self.save_config();
        }
        Task::none()
    }
}
