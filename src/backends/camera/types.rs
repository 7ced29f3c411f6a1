// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for the camera backend

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Which physical camera a stream is requested from.
///
/// PipeWire exposes this as the libcamera `location` device property
/// (`"front"`, `"back"`, or `"external"`). External webcams report no
/// usable location and are treated as back-facing for selection purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Facing {
    /// User-facing camera (selfie)
    Front,
    /// World-facing camera
    #[default]
    Back,
}

impl Facing {
    /// The opposite facing direction
    pub fn flipped(&self) -> Self {
        match self {
            Facing::Front => Facing::Back,
            Facing::Back => Facing::Front,
        }
    }

    /// Parse a libcamera location property value
    pub fn from_location(location: &str) -> Option<Self> {
        match location {
            "front" => Some(Facing::Front),
            "back" => Some(Facing::Back),
            _ => None,
        }
    }
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Facing::Front => write!(f, "front"),
            Facing::Back => write!(f, "back"),
        }
    }
}

/// Represents a camera device discovered through PipeWire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    /// Human-readable device name
    pub name: String,
    /// PipeWire target (serial or node id); empty = let PipeWire auto-select
    pub path: String,
    /// Camera location reported by libcamera, when known
    pub location: Option<Facing>,
}

impl CameraDevice {
    /// Placeholder device that lets PipeWire pick its default camera
    pub fn auto_select() -> Self {
        Self {
            name: "Default Camera (PipeWire)".to_string(),
            path: String::new(),
            location: None,
        }
    }
}

/// A single RGBA preview frame delivered by the pipeline.
///
/// Pixel data is tightly packed (stride == width * 4); the pipeline repacks
/// padded rows before handing the frame over.
#[derive(Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA pixels
    pub data: Arc<[u8]>,
    /// Timestamp when the frame left the pipeline (for latency diagnostics)
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Whether the frame carries decodable pixel content.
    ///
    /// Frames observed before the stream has negotiated its caps can report
    /// zero dimensions; capturing such a frame is rejected upstream.
    pub fn has_content(&self) -> bool {
        self.width > 0 && self.height > 0 && !self.data.is_empty()
    }
}

impl std::fmt::Debug for CameraFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CameraFrame({}x{}, {} bytes)",
            self.width,
            self.height,
            self.data.len()
        )
    }
}

/// Channel used by the pipeline to deliver frames to the application
pub type FrameSender = futures::channel::mpsc::Sender<CameraFrame>;

/// Select the device that best matches the requested facing direction.
///
/// Falls back silently to the first available device when no location
/// metadata matches; the platform decides what the stream actually shows.
pub fn select_device(cameras: &[CameraDevice], facing: Facing) -> Option<&CameraDevice> {
    cameras
        .iter()
        .find(|cam| cam.location == Some(facing))
        .or_else(|| cameras.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(name: &str, location: Option<Facing>) -> CameraDevice {
        CameraDevice {
            name: name.to_string(),
            path: format!("pipewire-{}", name),
            location,
        }
    }

    #[test]
    fn selects_matching_facing() {
        let cameras = vec![
            device("back", Some(Facing::Back)),
            device("front", Some(Facing::Front)),
        ];

        let selected = select_device(&cameras, Facing::Front).unwrap();
        assert_eq!(selected.name, "front");
    }

    #[test]
    fn falls_back_to_first_device() {
        let cameras = vec![device("usb-webcam", None)];

        let selected = select_device(&cameras, Facing::Front).unwrap();
        assert_eq!(selected.name, "usb-webcam");
    }

    #[test]
    fn no_devices_means_no_selection() {
        assert!(select_device(&[], Facing::Back).is_none());
    }

    #[test]
    fn facing_flips_and_parses() {
        assert_eq!(Facing::Front.flipped(), Facing::Back);
        assert_eq!(Facing::Back.flipped(), Facing::Front);
        assert_eq!(Facing::from_location("front"), Some(Facing::Front));
        assert_eq!(Facing::from_location("external"), None);
    }
}
