// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire camera enumeration
//!
//! Camera discovery goes through `pw-cli` when available. PipeWire handles
//! device access and format negotiation internally, so enumeration only needs
//! the node identity and the libcamera location property for facing selection.

use super::types::{CameraDevice, Facing};
use tracing::{debug, info, warn};

/// Enumerate cameras visible through PipeWire.
///
/// Returns `None` when PipeWire itself is unusable (GStreamer init failed or
/// `pipewiresrc` missing); an empty-path auto-select device when `pw-cli` is
/// not installed or lists no video sources.
pub fn enumerate_pipewire_cameras() -> Option<Vec<CameraDevice>> {
    debug!("Attempting to enumerate cameras via PipeWire");

    if gstreamer::init().is_err() {
        warn!("GStreamer init failed");
        return None;
    }

    if gstreamer::ElementFactory::make("pipewiresrc")
        .build()
        .is_err()
    {
        debug!("pipewiresrc not available");
        return None;
    }

    if let Some(cameras) = try_enumerate_with_pw_cli() {
        debug!(count = cameras.len(), "Found PipeWire cameras");
        return Some(cameras);
    }

    // Fallback: let PipeWire pick its default camera
    info!("Using PipeWire auto-selection (default camera)");
    Some(vec![CameraDevice::auto_select()])
}

/// Enumerate video source nodes by parsing `pw-cli ls Node` output
fn try_enumerate_with_pw_cli() -> Option<Vec<CameraDevice>> {
    debug!("Trying pw-cli for camera enumeration");

    let output = std::process::Command::new("pw-cli")
        .args(["ls", "Node"])
        .output()
        .ok()?;

    if !output.status.success() {
        debug!("pw-cli command failed");
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let cameras = parse_pw_cli_nodes(&stdout);

    if cameras.is_empty() {
        None
    } else {
        Some(cameras)
    }
}

/// Accumulator for the properties of one PipeWire node
#[derive(Default)]
struct NodeProps {
    id: Option<String>,
    serial: Option<String>,
    name: Option<String>,
    location: Option<Facing>,
    is_video_source: bool,
}

impl NodeProps {
    fn into_device(self) -> Option<CameraDevice> {
        if !self.is_video_source {
            return None;
        }
        let id = self.id?;
        let name = self.name?;

        // object.serial is the stable target-object value; node id is a fallback
        let path = match self.serial {
            Some(serial) => format!("pipewire-serial-{}", serial),
            None => format!("pipewire-{}", id),
        };

        debug!(id = %id, name = %name, location = ?self.location, "Found video camera");
        Some(CameraDevice {
            name,
            path,
            location: self.location,
        })
    }
}

/// Parse `pw-cli ls Node` output into camera devices
fn parse_pw_cli_nodes(listing: &str) -> Vec<CameraDevice> {
    let mut cameras = Vec::new();
    let mut current = NodeProps::default();

    for line in listing.lines() {
        let trimmed = line.trim();

        // Node boundary: "id 76, type PipeWire:Interface:Node/3"
        if trimmed.starts_with("id ") && trimmed.contains("type PipeWire:Interface:Node") {
            if let Some(device) = std::mem::take(&mut current).into_device() {
                cameras.push(device);
            }

            if let Some(id_str) = trimmed.strip_prefix("id ")
                && let Some(id_num) = id_str.split(',').next()
            {
                current.id = Some(id_num.trim().to_string());
            }
            continue;
        }

        if trimmed.contains("media.class") && trimmed.contains("\"Video/Source\"") {
            current.is_video_source = true;
        }

        if trimmed.contains("object.serial")
            && let Some(value) = extract_quoted_value(trimmed)
        {
            current.serial = Some(value);
        }

        if (trimmed.contains("node.description") || trimmed.contains("node.nick"))
            && current.name.is_none()
            && let Some(value) = extract_quoted_value(trimmed)
        {
            current.name = Some(value);
        }

        // libcamera exposes the sensor placement: "front", "back", or "external"
        if trimmed.contains("api.libcamera.location")
            && let Some(value) = extract_quoted_value(trimmed)
        {
            current.location = Facing::from_location(&value);
        }
    }

    if let Some(device) = current.into_device() {
        cameras.push(device);
    }

    cameras
}

/// Extract the value between the first pair of double quotes
fn extract_quoted_value(line: &str) -> Option<String> {
    let start = line.find('"')? + 1;
    let end = line[start..].find('"')? + start;
    Some(line[start..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
	id 42, type PipeWire:Interface:Node/3
 		media.class = "Video/Source"
 		node.description = "Integrated Camera (V4L2)"
 		object.serial = "2146"
 		api.libcamera.location = "front"
	id 43, type PipeWire:Interface:Node/3
 		media.class = "Audio/Source"
 		node.description = "Built-in Microphone"
	id 51, type PipeWire:Interface:Node/3
 		media.class = "Video/Source"
 		node.description = "USB Webcam"
"#;

    #[test]
    fn parses_video_sources_only() {
        let cameras = parse_pw_cli_nodes(LISTING);
        assert_eq!(cameras.len(), 2);
        assert_eq!(cameras[0].name, "Integrated Camera (V4L2)");
        assert_eq!(cameras[0].path, "pipewire-serial-2146");
        assert_eq!(cameras[0].location, Some(Facing::Front));
        assert_eq!(cameras[1].path, "pipewire-51");
        assert_eq!(cameras[1].location, None);
    }

    #[test]
    fn extracts_quoted_values() {
        assert_eq!(
            extract_quoted_value(r#"object.serial = "123""#),
            Some("123".to_string())
        );
        assert_eq!(extract_quoted_value("no quotes here"), None);
    }
}
