// SPDX-License-Identifier: GPL-3.0-only

//! GeoSnap - geotagged photo capture for the COSMIC desktop environment
//!
//! This library provides the core functionality for the GeoSnap application:
//! live camera preview, still-frame capture, and submission of the captured
//! image together with a geolocation fix to a configured HTTP endpoint.
//!
//! # Architecture
//!
//! - [`app`]: Main application logic and UI
//! - [`backends`]: Camera backend abstraction and session lifecycle
//! - [`capture`]: Still-frame JPEG encoding
//! - [`geolocation`]: One-shot position fix via GeoClue2
//! - [`submission`]: Payload construction and the HTTP client
//! - [`config`]: User configuration handling
//! - [`storage`]: Local saving of captured photos

pub mod app;
pub mod backends;
pub mod capture;
pub mod config;
pub mod constants;
pub mod errors;
pub mod geolocation;
pub mod i18n;
pub mod storage;
pub mod submission;

// Re-export commonly used types
pub use app::{AppModel, Message, UiState};
pub use backends::camera::session::CameraSession;
pub use backends::camera::types::Facing;
pub use capture::CapturedImage;
pub use config::Config;
pub use geolocation::GeoPoint;
pub use submission::SubmissionPayload;
