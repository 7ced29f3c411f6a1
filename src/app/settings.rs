// SPDX-License-Identifier: GPL-3.0-only

//! Settings drawer view

use crate::app::state::{AppModel, Message};
use crate::capture::EncodingQuality;
use crate::constants::app_info;
use crate::fl;
use cosmic::Element;
use cosmic::app::context_drawer;
use cosmic::widget;

impl AppModel {
    /// Create the settings view for the context drawer
    pub fn settings_view(&self) -> context_drawer::ContextDrawer<'_, Message> {
        let spacing = cosmic::theme::spacing();

        // Endpoint URL, persisted on every edit
        let endpoint_input = widget::text_input("https://example.org", &self.endpoint_input)
            .on_input(Message::EndpointInput);

        // Photo quality preset dropdown
        let current_quality_index = EncodingQuality::ALL
            .iter()
            .position(|q| *q == self.config.photo_quality)
            .unwrap_or(2);

        let quality_dropdown = widget::dropdown(
            &self.quality_dropdown_options,
            Some(current_quality_index),
            Message::SelectPhotoQuality,
        );

        let version_info = if app_info::is_flatpak() {
            format!("Version {} (Flatpak)", app_info::version())
        } else {
            format!("Version {}", app_info::version())
        };

        let settings_column: Element<'_, Message> = widget::column()
            .push(
                widget::text(fl!("endpoint-url"))
                    .size(16)
                    .font(cosmic::font::bold()),
            )
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(widget::text(fl!("endpoint-url-description")).size(12))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(endpoint_input)
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::text(fl!("photo-quality"))
                    .size(16)
                    .font(cosmic::font::bold()),
            )
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(quality_dropdown)
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::text(version_info).size(12))
            .into();

        context_drawer::context_drawer(
            settings_column,
            Message::ToggleContextPage(crate::app::state::ContextPage::Settings),
        )
        .title(fl!("settings"))
    }
}
