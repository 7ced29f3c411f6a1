// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Submission endpoint constants
pub mod submission {
    /// Path appended to the configured base URL for image uploads
    pub const SUBMIT_PATH: &str = "/api/images";

    /// Media type used for the captured still and its data URL prefix
    pub const IMAGE_MIME: &str = "image/jpeg";
}

/// Pipeline tuning constants
pub mod pipeline {
    /// Maximum buffers queued in the appsink before old frames are dropped
    pub const MAX_BUFFERS: u32 = 2;

    /// Capacity of the channel carrying frames from the pipeline to the UI
    pub const FRAME_CHANNEL_CAPACITY: usize = 100;

    /// Seconds to wait for the pipeline to reach the Playing state
    pub const START_TIMEOUT_SECS: u64 = 5;

    /// Seconds to wait for the pipeline to reach the Null state on stop
    pub const STOP_TIMEOUT_SECS: u64 = 2;

    /// Poll interval while waiting for frames, in milliseconds.
    /// ~60fps so cancellation is noticed within one frame period.
    pub const FRAME_POLL_MS: u64 = 16;
}

/// Headless capture (CLI) tuning constants
pub mod cli {
    /// Seconds to wait for a usable frame before giving up
    pub const FRAME_TIMEOUT_SECS: u64 = 5;

    /// Milliseconds of warm-up before a frame is trusted.
    /// Exposure on most webcams needs a few frames to settle.
    pub const WARMUP_MS: u64 = 500;
}

/// UI layout constants
pub mod ui {
    /// Outer diameter of the circular capture button
    pub const CAPTURE_BUTTON_OUTER: f32 = 72.0;

    /// Inner circle diameter of the capture button
    pub const CAPTURE_BUTTON_INNER: f32 = 60.0;

    /// Corner radius producing a full circle for the inner button
    pub const CAPTURE_BUTTON_RADIUS: f32 = 30.0;

    /// Width reserved for side buttons so the capture button stays centered
    pub const SIDE_BUTTON_WIDTH: f32 = 52.0;
}

/// Application metadata helpers
pub mod app_info {
    /// Version string baked in at build time (git describe)
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }

    /// Whether we are running inside a flatpak sandbox
    pub fn is_flatpak() -> bool {
        std::path::Path::new("/.flatpak-info").exists()
    }
}
