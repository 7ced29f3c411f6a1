// SPDX-License-Identifier: GPL-3.0-only

//! JPEG encoding of captured frames

use crate::backends::camera::types::CameraFrame;
use crate::constants::submission::IMAGE_MIME;
use crate::errors::CaptureError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use serde::{Deserialize, Serialize};

/// Encoding quality presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncodingQuality {
    /// Low quality (high compression)
    Low,
    /// Medium quality (balanced)
    Medium,
    /// High quality (low compression)
    #[default]
    High,
    /// Maximum quality (minimal compression)
    Maximum,
}

impl EncodingQuality {
    /// All preset variants for UI iteration
    pub const ALL: [EncodingQuality; 4] = [
        EncodingQuality::Low,
        EncodingQuality::Medium,
        EncodingQuality::High,
        EncodingQuality::Maximum,
    ];

    /// Get JPEG quality value (0-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            EncodingQuality::Low => 60,
            EncodingQuality::Medium => 80,
            EncodingQuality::High => 92,
            EncodingQuality::Maximum => 98,
        }
    }

    /// Display name for the preset
    pub fn display_name(&self) -> &'static str {
        match self {
            EncodingQuality::Low => "Low",
            EncodingQuality::Medium => "Medium",
            EncodingQuality::High => "High",
            EncodingQuality::Maximum => "Maximum",
        }
    }
}

/// An encoded still frame held until it is submitted or discarded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    /// JPEG-encoded image data
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl CapturedImage {
    /// Render the image as a Base64 data URL for the submission payload
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", IMAGE_MIME, BASE64.encode(&self.data))
    }
}

/// Encode an RGBA preview frame as JPEG at its native resolution.
///
/// Frames without decoded dimensions are rejected; a stream delivers such
/// frames only before caps negotiation has completed.
pub fn encode_frame(
    frame: &CameraFrame,
    quality: EncodingQuality,
) -> Result<CapturedImage, CaptureError> {
    if !frame.has_content() {
        return Err(CaptureError::EmptyFrame);
    }

    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() < expected {
        return Err(CaptureError::EncodingFailed(format!(
            "frame data truncated: {} of {} bytes",
            frame.data.len(),
            expected
        )));
    }

    // JPEG has no alpha channel; drop it while repacking
    let mut rgb = Vec::with_capacity(frame.width as usize * frame.height as usize * 3);
    for pixel in frame.data[..expected].chunks_exact(4) {
        rgb.extend_from_slice(&pixel[..3]);
    }

    let rgb_image = RgbImage::from_raw(frame.width, frame.height, rgb)
        .ok_or_else(|| CaptureError::EncodingFailed("frame dimensions mismatch".to_string()))?;

    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, quality.jpeg_quality())
        .encode_image(&rgb_image)
        .map_err(|e| CaptureError::EncodingFailed(e.to_string()))?;

    Ok(CapturedImage {
        data: encoded,
        width: frame.width,
        height: frame.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    fn rgba_frame(width: u32, height: u32) -> CameraFrame {
        CameraFrame {
            width,
            height,
            data: Arc::from(vec![128u8; (width * height * 4) as usize].into_boxed_slice()),
            captured_at: Instant::now(),
        }
    }

    #[test]
    fn encodes_at_native_resolution() {
        let frame = rgba_frame(640, 480);
        let image = encode_frame(&frame, EncodingQuality::High).unwrap();

        assert_eq!(image.width, 640);
        assert_eq!(image.height, 480);
        // JPEG SOI marker
        assert_eq!(&image.data[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn rejects_zero_dimension_frames() {
        let frame = CameraFrame {
            width: 0,
            height: 0,
            data: Arc::from(Vec::new().into_boxed_slice()),
            captured_at: Instant::now(),
        };

        assert!(matches!(
            encode_frame(&frame, EncodingQuality::High),
            Err(CaptureError::EmptyFrame)
        ));
    }

    #[test]
    fn rejects_truncated_frames() {
        let frame = CameraFrame {
            width: 64,
            height: 64,
            data: Arc::from(vec![0u8; 16].into_boxed_slice()),
            captured_at: Instant::now(),
        };

        assert!(matches!(
            encode_frame(&frame, EncodingQuality::High),
            Err(CaptureError::EncodingFailed(_))
        ));
    }

    #[test]
    fn data_url_carries_jpeg_mime() {
        let frame = rgba_frame(8, 8);
        let image = encode_frame(&frame, EncodingQuality::Low).unwrap();
        let url = image.to_data_url();

        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert!(url.len() > "data:image/jpeg;base64,".len());
    }

    #[test]
    fn quality_presets_are_ordered() {
        let qualities: Vec<u8> = EncodingQuality::ALL
            .iter()
            .map(|q| q.jpeg_quality())
            .collect();
        let mut sorted = qualities.clone();
        sorted.sort_unstable();
        assert_eq!(qualities, sorted);
    }
}
