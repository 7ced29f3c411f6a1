// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend abstraction
//!
//! Device discovery sits behind the [`CameraBackend`] trait so tests can
//! substitute deterministic device lists for real PipeWire enumeration.
//! Streaming itself is handled by [`pipeline::CameraPipeline`], keyed on the
//! session generation managed by [`session::CameraSession`].

pub mod enumeration;
pub mod pipeline;
pub mod session;
pub mod types;

pub use pipeline::CameraPipeline;
pub use session::CameraSession;
pub use types::{CameraDevice, CameraFrame, Facing, FrameSender, select_device};

use crate::errors::CameraError;

/// Device discovery interface
pub trait CameraBackend: Send + Sync {
    /// Enumerate available camera devices
    fn enumerate_cameras(&self) -> Result<Vec<CameraDevice>, CameraError>;
}

/// PipeWire-backed device discovery
#[derive(Debug, Clone, Copy, Default)]
pub struct PipeWireBackend;

impl CameraBackend for PipeWireBackend {
    fn enumerate_cameras(&self) -> Result<Vec<CameraDevice>, CameraError> {
        enumeration::enumerate_pipewire_cameras()
            .ok_or_else(|| CameraError::DeviceUnavailable("PipeWire not available".to_string()))
    }
}
