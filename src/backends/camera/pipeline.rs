// SPDX-License-Identifier: GPL-3.0-only

//! GStreamer preview pipeline for PipeWire cameras
//!
//! The pipeline requests no resolution or framerate constraints; PipeWire
//! negotiates whatever the device prefers and `videoconvert` normalizes the
//! output to RGBA for the preview surface and the capture encoder.

use super::types::{CameraDevice, CameraFrame, FrameSender};
use crate::constants::pipeline;
use crate::errors::CameraError;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// A running camera preview pipeline.
///
/// Dropping the pipeline releases the camera: callbacks are cleared and the
/// GStreamer pipeline transitions to `Null`, stopping every element.
pub struct CameraPipeline {
    pipeline: gstreamer::Pipeline,
    appsink: AppSink,
}

impl CameraPipeline {
    /// Open a preview stream for the given device.
    ///
    /// Frames arrive on `frame_sender` as tightly packed RGBA. The channel is
    /// bounded; when the consumer lags, old frames are dropped (live preview
    /// only ever wants the latest frame).
    pub fn open(device: &CameraDevice, frame_sender: FrameSender) -> Result<Self, CameraError> {
        info!(device = %device.name, "Creating camera pipeline");

        gstreamer::init().map_err(|e| CameraError::InitializationFailed(e.to_string()))?;

        let target = pipewire_target_property(&device.path);
        let description = format!(
            "pipewiresrc {}do-timestamp=true ! \
             queue max-size-buffers={} leaky=downstream ! \
             videoconvert ! \
             video/x-raw,format=RGBA ! \
             appsink name=sink",
            target,
            pipeline::MAX_BUFFERS,
        );
        debug!(pipeline = %description, "Launching pipeline");

        let element = gstreamer::parse::launch(&description)
            .map_err(|e| map_launch_error(&e.to_string()))?;
        let gst_pipeline = element
            .downcast::<gstreamer::Pipeline>()
            .map_err(|_| CameraError::InitializationFailed("not a pipeline".to_string()))?;

        let appsink = gst_pipeline
            .by_name("sink")
            .ok_or_else(|| CameraError::InitializationFailed("appsink missing".to_string()))?
            .dynamic_cast::<AppSink>()
            .map_err(|_| CameraError::InitializationFailed("appsink cast failed".to_string()))?;

        // Lowest latency: never block on the sink, drop stale buffers
        appsink.set_property("emit-signals", true);
        appsink.set_property("sync", false);
        appsink.set_property("max-buffers", pipeline::MAX_BUFFERS);
        appsink.set_property("drop", true);
        appsink.set_property("enable-last-sample", false);

        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let frame = pull_rgba_frame(appsink)?;
                    let mut sender = frame_sender.clone();
                    if let Err(e) = sender.try_send(frame) {
                        if e.is_disconnected() {
                            debug!("Frame channel disconnected");
                            return Err(gstreamer::FlowError::Eos);
                        }
                        // Channel full: drop the frame, the preview wants the latest anyway
                    }
                    Ok(gstreamer::FlowSuccess::Ok)
                })
                .build(),
        );

        gst_pipeline.set_state(gstreamer::State::Playing).map_err(|e| {
            CameraError::InitializationFailed(format!("failed to start pipeline: {}", e))
        })?;

        let (result, state, _pending) = gst_pipeline.state(gstreamer::ClockTime::from_seconds(
            pipeline::START_TIMEOUT_SECS,
        ));
        debug!(result = ?result, state = ?state, "Pipeline state after start");
        if state != gstreamer::State::Playing {
            warn!("Pipeline did not reach PLAYING state");
        }

        info!("Camera pipeline running");
        Ok(Self {
            pipeline: gst_pipeline,
            appsink,
        })
    }

    /// Stop the pipeline and release the camera. Idempotent via Drop.
    pub fn stop(self) {
        info!("Stopping camera pipeline");
        // Drop impl does the actual teardown
    }
}

impl Drop for CameraPipeline {
    fn drop(&mut self) {
        // Clear callbacks first so no sample handler runs during teardown
        self.appsink
            .set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());

        if let Err(e) = self.pipeline.set_state(gstreamer::State::Null) {
            warn!(error = %e, "Failed to stop pipeline cleanly");
            return;
        }

        let (result, state, _) = self.pipeline.state(gstreamer::ClockTime::from_seconds(
            pipeline::STOP_TIMEOUT_SECS,
        ));
        match result {
            Ok(_) => info!(state = ?state, "Camera pipeline stopped"),
            Err(e) => debug!(error = ?e, state = ?state, "Pipeline teardown had issues"),
        }
    }
}

/// Pull one sample from the appsink and repack it as a tight RGBA frame
fn pull_rgba_frame(appsink: &AppSink) -> Result<CameraFrame, gstreamer::FlowError> {
    let captured_at = Instant::now();

    let sample = appsink.pull_sample().map_err(|e| {
        error!(error = ?e, "Failed to pull sample");
        gstreamer::FlowError::Eos
    })?;

    let buffer = sample.buffer().ok_or(gstreamer::FlowError::Error)?;
    if buffer.flags().contains(gstreamer::BufferFlags::CORRUPTED) {
        warn!("Buffer marked as corrupted, skipping frame");
        return Err(gstreamer::FlowError::Error);
    }

    let caps = sample.caps().ok_or(gstreamer::FlowError::Error)?;
    let video_info = VideoInfo::from_caps(caps).map_err(|e| {
        error!(error = ?e, "Failed to read video info from caps");
        gstreamer::FlowError::Error
    })?;

    let map = buffer.map_readable().map_err(|e| {
        error!(error = ?e, "Failed to map buffer");
        gstreamer::FlowError::Error
    })?;

    let width = video_info.width();
    let height = video_info.height();
    let stride = video_info.stride()[0] as usize;
    let row_bytes = width as usize * 4;

    // Repack padded rows so downstream consumers see stride == width * 4
    let data: Arc<[u8]> = if stride == row_bytes {
        Arc::from(&map.as_slice()[..row_bytes * height as usize])
    } else {
        let mut packed = Vec::with_capacity(row_bytes * height as usize);
        for row in 0..height as usize {
            let start = row * stride;
            packed.extend_from_slice(&map.as_slice()[start..start + row_bytes]);
        }
        Arc::from(packed.into_boxed_slice())
    };

    Ok(CameraFrame {
        width,
        height,
        data,
        captured_at,
    })
}

/// Map the device path onto a `pipewiresrc` target property clause
fn pipewire_target_property(device_path: &str) -> String {
    if device_path.is_empty() {
        // Empty path = PipeWire auto-select default camera
        return String::new();
    }
    if let Some(serial) = device_path.strip_prefix("pipewire-serial-") {
        return format!("target-object={} ", serial);
    }
    if let Some(node_id) = device_path.strip_prefix("pipewire-") {
        return format!("target-object={} ", node_id);
    }
    warn!(device_path, "Unknown device path format, using path property");
    format!("path={} ", device_path)
}

/// Classify a pipeline launch failure.
///
/// GStreamer reports permission problems as element errors with EACCES in the
/// message; anything else is treated as the device being unavailable.
fn map_launch_error(message: &str) -> CameraError {
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("permission denied") || lowered.contains("not authorized") {
        CameraError::PermissionDenied
    } else {
        CameraError::DeviceUnavailable(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_property_formats() {
        assert_eq!(pipewire_target_property(""), "");
        assert_eq!(
            pipewire_target_property("pipewire-serial-2146"),
            "target-object=2146 "
        );
        assert_eq!(pipewire_target_property("pipewire-42"), "target-object=42 ");
        assert_eq!(
            pipewire_target_property("v4l2:/dev/video0"),
            "path=v4l2:/dev/video0 "
        );
    }

    #[test]
    fn launch_errors_classified() {
        assert!(matches!(
            map_launch_error("Permission denied opening node"),
            CameraError::PermissionDenied
        ));
        assert!(matches!(
            map_launch_error("could not link elements"),
            CameraError::DeviceUnavailable(_)
        ));
    }
}
