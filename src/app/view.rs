// SPDX-License-Identifier: GPL-3.0-only

//! Main application views
//!
//! Two screens follow the UI state machine: the live preview with the
//! capture controls, and the review screen showing the captured still with
//! submit/retake actions.

use crate::app::state::{AppModel, CameraStatus, Message, UiState};
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        let content = match &self.state {
            UiState::Live => self.live_view(),
            UiState::Reviewing { .. } | UiState::Submitting { .. } => self.review_view(),
        };

        widget::container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::BLACK)),
                ..Default::default()
            })
            .into()
    }

    /// Live preview with the capture controls overlaid at the bottom
    fn live_view(&self) -> Element<'_, Message> {
        let preview = self.build_preview();

        let controls = widget::row()
            .push(widget::Space::new(Length::Fill, Length::Shrink))
            .push(widget::Space::new(
                Length::Fixed(ui::SIDE_BUTTON_WIDTH),
                Length::Shrink,
            ))
            .push(self.build_capture_button())
            .push(self.build_facing_switcher())
            .push(widget::Space::new(Length::Fill, Length::Shrink))
            .align_y(Alignment::Center)
            .width(Length::Fill);

        let overlay = widget::column()
            .push(widget::Space::new(Length::Shrink, Length::Fill))
            .push(self.build_status_line())
            .push(controls)
            .width(Length::Fill)
            .align_x(Alignment::Center);

        cosmic::iced::widget::stack![preview, overlay]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Review screen: captured still with submit and retake actions
    fn review_view(&self) -> Element<'_, Message> {
        let submitting = self.state.is_submitting();

        let still: Element<'_, Message> = match &self.review_handle {
            Some(handle) => widget::image::Image::new(handle.clone())
                .content_fit(cosmic::iced::ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => widget::text::title4(fl!("captured-photo")).into(),
        };

        let retake_button = if submitting {
            widget::button::standard(fl!("retake"))
        } else {
            widget::button::standard(fl!("retake")).on_press(Message::Retake)
        };

        let submit_button = if submitting {
            widget::button::suggested(fl!("submitting"))
        } else {
            widget::button::suggested(fl!("submit")).on_press(Message::Submit)
        };

        let spacing = cosmic::theme::spacing();
        let actions = widget::row()
            .push(retake_button)
            .push(submit_button)
            .spacing(spacing.space_s)
            .align_y(Alignment::Center);

        widget::column()
            .push(
                widget::container(still)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .center(Length::Fill),
            )
            .push(self.build_status_line())
            .push(
                widget::container(actions)
                    .width(Length::Fill)
                    .center_x(Length::Fill)
                    .padding([spacing.space_s, 0]),
            )
            .width(Length::Fill)
            .align_x(Alignment::Center)
            .into()
    }

    /// Camera preview surface, or a placeholder while no feed is available
    fn build_preview(&self) -> Element<'_, Message> {
        if let Some(handle) = &self.preview_handle {
            return widget::container(
                widget::image::Image::new(handle.clone())
                    .content_fit(cosmic::iced::ContentFit::Contain)
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill)
            .into();
        }

        let placeholder: Element<'_, Message> = match &self.camera_status {
            CameraStatus::Unavailable(_) => {
                // No feed and no stream: offer an explicit way out
                let column = widget::column()
                    .push(widget::text::title4(fl!("no-camera-feed")))
                    .push(
                        widget::button::standard(fl!("retry-camera"))
                            .on_press(Message::RetryCamera),
                    )
                    .spacing(cosmic::theme::spacing().space_s)
                    .align_x(Alignment::Center);
                column.into()
            }
            _ => widget::text::title4(fl!("waiting-for-camera")).into(),
        };

        widget::container(placeholder)
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill)
            .into()
    }

    /// Circular shutter button; grayed out until frames are arriving
    fn build_capture_button(&self) -> Element<'_, Message> {
        let enabled = self.camera_status == CameraStatus::Ready && !self.is_capturing;

        let button_color = if self.is_capturing {
            Color::from_rgb(0.7, 0.7, 0.7)
        } else if enabled {
            Color::WHITE
        } else {
            Color::from_rgba(0.5, 0.5, 0.5, 0.3)
        };

        let button_inner = widget::container(widget::Space::new(
            Length::Fixed(ui::CAPTURE_BUTTON_INNER),
            Length::Fixed(ui::CAPTURE_BUTTON_INNER),
        ))
        .style(move |_theme| widget::container::Style {
            background: Some(Background::Color(button_color)),
            border: cosmic::iced::Border {
                radius: [ui::CAPTURE_BUTTON_RADIUS; 4].into(),
                ..Default::default()
            },
            ..Default::default()
        });

        let mut button = widget::button::custom(button_inner)
            .padding(0)
            .width(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .height(Length::Fixed(ui::CAPTURE_BUTTON_OUTER));

        if enabled {
            button = button.on_press(Message::Capture);
        }

        widget::container(button)
            .width(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .height(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .center_x(ui::CAPTURE_BUTTON_OUTER)
            .center_y(ui::CAPTURE_BUTTON_OUTER)
            .into()
    }

    /// Facing switch button, or a placeholder keeping the shutter centered.
    ///
    /// Hidden when only one device exists; switching would reselect it.
    fn build_facing_switcher(&self) -> Element<'_, Message> {
        if self.available_cameras.len() <= 1 {
            return widget::Space::new(Length::Fixed(ui::SIDE_BUTTON_WIDTH), Length::Shrink)
                .into();
        }

        let icon = widget::icon::from_name("object-flip-horizontal-symbolic")
            .size(32)
            .handle();
        let icon_content = widget::container(widget::icon(icon))
            .width(Length::Fixed(ui::SIDE_BUTTON_WIDTH))
            .height(Length::Fixed(ui::SIDE_BUTTON_WIDTH))
            .center(Length::Fixed(ui::SIDE_BUTTON_WIDTH));

        widget::button::custom(icon_content)
            .padding(0)
            .class(cosmic::theme::Button::Text)
            .on_press(Message::SwitchFacing)
            .into()
    }

    /// Transient status line (errors and notices), empty when quiet
    fn build_status_line(&self) -> Element<'_, Message> {
        let Some(message) = &self.status_message else {
            return widget::Space::new(Length::Shrink, Length::Shrink).into();
        };

        widget::container(widget::text(message.clone()).size(14))
            .padding(cosmic::theme::spacing().space_xs)
            .into()
    }
}
