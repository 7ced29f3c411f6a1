// SPDX-License-Identifier: GPL-3.0-only

//! Main application module for GeoSnap
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, UiState, Message)
//! - `update`: Message dispatch
//! - `handlers`: Message handlers by functional domain
//! - `view`: Live preview and review screens
//! - `settings`: Settings drawer UI

mod handlers;
mod settings;
mod state;
mod update;
mod view;

use crate::backends::camera::session::CameraSession;
use crate::backends::camera::types::{CameraDevice, select_device};
use crate::backends::camera::{CameraBackend, CameraPipeline, PipeWireBackend};
use crate::config::Config;
use crate::constants::pipeline;
use crate::fl;
use crate::geolocation::GeoClueProvider;
use crate::submission::SubmissionClient;
use cosmic::app::context_drawer;
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tracing::{error, info};

pub use state::{AppModel, CameraStatus, ContextPage, Message, UiState};

const REPOSITORY: &str = "https://github.com/cosmic-utils/geosnap";

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.cosmic-utils.geosnap";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .version(env!("GIT_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        let (config_handler, config) = crate::config::load(Self::APP_ID);

        // GStreamer must be initialized before any pipeline is created
        if let Err(e) = gstreamer::init() {
            error!(error = %e, "Failed to initialize GStreamer");
        }

        let session = CameraSession::new(config.facing);
        let endpoint_input = config.endpoint_url.clone();

        let app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            config,
            config_handler,
            state: UiState::default(),
            session,
            available_cameras: Vec::new(),
            camera_status: CameraStatus::default(),
            current_frame: None,
            preview_handle: None,
            review_handle: None,
            is_capturing: false,
            status_message: None,
            endpoint_input,
            // Order matches EncodingQuality::ALL
            quality_dropdown_options: vec![
                fl!("quality-low"),
                fl!("quality-medium"),
                fl!("quality-high"),
                fl!("quality-maximum"),
            ],
            location_provider: Arc::new(GeoClueProvider::new(Self::APP_ID)),
            submission_client: SubmissionClient::new(),
        };

        // Enumerate cameras asynchronously; pw-cli can be slow to answer
        (app, Self::enumerate_cameras_task())
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
        ]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::Settings => self.settings_view(),
        })
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        // The stream is keyed on the session generation: stopping the session
        // or switching facing retires this subscription and starts a fresh
        // one, so at most one pipeline is ever alive.
        let camera_sub = if self.session.is_active() {
            let generation = self.session.generation();
            let cancel_flag = self.session.cancel_flag();
            let device = select_device(&self.available_cameras, self.session.facing())
                .cloned()
                .unwrap_or_else(CameraDevice::auto_select);

            Subscription::run_with_id(
                ("camera", generation),
                cosmic::iced::stream::channel(
                    pipeline::FRAME_CHANNEL_CAPACITY,
                    move |mut output| async move {
                        info!(generation, device = %device.name, "Camera stream starting");

                        let (sender, mut receiver) =
                            futures::channel::mpsc::channel(pipeline::FRAME_CHANNEL_CAPACITY);

                        let stream = match CameraPipeline::open(&device, sender) {
                            Ok(stream) => stream,
                            Err(e) => {
                                error!(error = %e, "Failed to open camera stream");
                                let _ = output
                                    .send(Message::CameraStreamFailed(generation, e.to_string()))
                                    .await;
                                return;
                            }
                        };

                        loop {
                            if cancel_flag.load(Ordering::Acquire) {
                                info!(generation, "Camera stream cancelled");
                                break;
                            }
                            if output.is_closed() {
                                info!(generation, "Output channel closed");
                                break;
                            }

                            // Short poll so cancellation is noticed between frames
                            match tokio::time::timeout(
                                Duration::from_millis(pipeline::FRAME_POLL_MS),
                                receiver.next(),
                            )
                            .await
                            {
                                Ok(Some(frame)) => {
                                    // try_send: dropping frames is fine for live
                                    // preview, we only ever want the latest one
                                    if let Err(e) = output.try_send(Message::CameraFrame(
                                        Arc::new(frame),
                                        generation,
                                    )) && e.is_disconnected()
                                    {
                                        break;
                                    }
                                }
                                Ok(None) => {
                                    let _ = output
                                        .send(Message::CameraStreamFailed(
                                            generation,
                                            "frame stream ended".to_string(),
                                        ))
                                        .await;
                                    break;
                                }
                                Err(_) => continue,
                            }
                        }

                        // Dropping the pipeline stops every element and
                        // releases the camera
                        drop(stream);
                        info!(generation, "Camera stream finished");
                    },
                ),
            )
        } else {
            Subscription::none()
        };

        Subscription::batch([config_sub, camera_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}

impl AppModel {
    /// Spawn the blocking device enumeration off the UI thread
    pub(crate) fn enumerate_cameras_task() -> Task<cosmic::Action<Message>> {
        Task::perform(
            async {
                tokio::task::spawn_blocking(|| PipeWireBackend.enumerate_cameras())
                    .await
                    .map_err(|e| e.to_string())
                    .and_then(|result| result.map_err(|e| e.to_string()))
            },
            |result| cosmic::Action::App(Message::CamerasInitialized(result)),
        )
    }

    /// Persist the current configuration, logging instead of failing
    pub(crate) fn save_config(&self) {
        use cosmic::cosmic_config::CosmicConfigEntry;

        if let Some(handler) = self.config_handler.as_ref()
            && let Err(err) = self.config.write_entry(handler)
        {
            error!(?err, "Failed to save config");
        }
    }
}
