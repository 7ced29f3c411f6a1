// SPDX-License-Identifier: GPL-3.0-only

//! Still-frame capture
//!
//! Capturing snapshots the current preview frame at its native resolution
//! and encodes it as JPEG off the UI thread.

pub mod encoding;

pub use encoding::{CapturedImage, EncodingQuality, encode_frame};

use crate::backends::camera::types::CameraFrame;
use crate::errors::CaptureError;
use std::sync::Arc;
use tracing::info;

/// Encode a preview frame on a blocking worker thread.
///
/// JPEG encoding of a full-resolution frame takes tens of milliseconds;
/// running it inline would stall the UI event loop.
pub async fn encode_frame_task(
    frame: Arc<CameraFrame>,
    quality: EncodingQuality,
) -> Result<Arc<CapturedImage>, CaptureError> {
    let image = tokio::task::spawn_blocking(move || encode_frame(&frame, quality))
        .await
        .map_err(|e| CaptureError::EncodingFailed(format!("encode task failed: {}", e)))??;

    info!(
        width = image.width,
        height = image.height,
        bytes = image.data.len(),
        "Captured still frame"
    );
    Ok(Arc::new(image))
}
