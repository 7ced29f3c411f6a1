// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for headless capture
//!
//! This module provides command-line functionality for:
//! - Listing available cameras with their facing metadata
//! - Capturing a photo and submitting it with a geolocation fix

use futures::StreamExt;
use geosnap::backends::camera::types::{CameraFrame, Facing, select_device};
use geosnap::backends::camera::{CameraBackend, CameraPipeline, PipeWireBackend};
use geosnap::capture::{CapturedImage, encode_frame};
use geosnap::config;
use geosnap::constants::cli as tuning;
use geosnap::geolocation::GeoClueProvider;
use geosnap::submission::{self, SubmissionClient};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Config entry shared with the GUI (same app id, same on-disk entry)
const APP_ID: &str = "io.github.cosmic-utils.geosnap";

/// List all available cameras
pub fn list_cameras() -> Result<(), Box<dyn std::error::Error>> {
    let cameras = PipeWireBackend.enumerate_cameras()?;

    if cameras.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!("Available cameras:");
    println!();
    for camera in &cameras {
        let location = camera
            .location
            .map(|facing| facing.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!("  {}  (facing: {})", camera.name, location);
    }

    Ok(())
}

/// Capture a photo from the camera matching `facing` and submit it
pub fn snap(
    facing: Facing,
    endpoint: Option<String>,
    output: Option<PathBuf>,
    no_submit: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let cameras = PipeWireBackend.enumerate_cameras()?;
    if cameras.is_empty() {
        return Err("No cameras found".into());
    }

    let device = select_device(&cameras, facing)
        .ok_or("No camera device available")?
        .clone();
    println!("Using camera: {}", device.name);

    let runtime = tokio::runtime::Runtime::new()?;

    // Capture one warm frame
    let frame = runtime.block_on(grab_frame(&device))?;
    println!("Captured frame: {}x{}", frame.width, frame.height);

    let (_, app_config) = config::load(APP_ID);
    let image = encode_frame(&frame, app_config.photo_quality)?;

    if let Some(dir) = output.as_deref() {
        let path = geosnap::storage::save_capture(&image, dir)?;
        println!("Saved to {}", path.display());
    } else if no_submit {
        // Nothing would leave the machine; keep a local copy instead
        let path =
            geosnap::storage::save_capture(&image, &geosnap::storage::default_photo_directory())?;
        println!("Saved to {}", path.display());
    }

    if no_submit {
        return Ok(());
    }

    let base_url = endpoint.unwrap_or(app_config.endpoint_url);
    runtime.block_on(submit(&image, &base_url))?;
    println!("Submitted.");

    Ok(())
}

/// Open the preview pipeline and wait for a post-warmup frame
async fn grab_frame(
    device: &geosnap::backends::camera::types::CameraDevice,
) -> Result<CameraFrame, Box<dyn std::error::Error>> {
    println!("Capturing...");
    let (sender, mut receiver) = futures::channel::mpsc::channel(10);
    let pipeline = CameraPipeline::open(device, sender)?;

    let start = Instant::now();
    let timeout = Duration::from_secs(tuning::FRAME_TIMEOUT_SECS);
    let warmup = Duration::from_millis(tuning::WARMUP_MS);
    let mut frame: Option<CameraFrame> = None;

    // Frames during warm-up are discarded so exposure can settle
    while start.elapsed() < timeout {
        match tokio::time::timeout(Duration::from_millis(100), receiver.next()).await {
            Ok(Some(candidate)) => {
                if start.elapsed() >= warmup && candidate.has_content() {
                    frame = Some(candidate);
                    break;
                }
            }
            Ok(None) => break,
            Err(_) => continue,
        }
    }

    pipeline.stop();
    frame.ok_or_else(|| "No frame received from camera".into())
}

/// Geolocate, build the payload, POST to the endpoint
async fn submit(image: &CapturedImage, base_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Acquiring position fix...");
    let provider = GeoClueProvider::new(APP_ID);
    let client = SubmissionClient::new();
    submission::submit_with_location(&provider, &client, base_url, image).await?;
    Ok(())
}
