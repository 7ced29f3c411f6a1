// SPDX-License-Identifier: GPL-3.0-only

//! Storage utilities for captured photos

use crate::capture::CapturedImage;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default photo directory (~/Pictures/geosnap)
pub fn default_photo_directory() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("geosnap")
}

/// Save a captured image under a timestamped filename.
///
/// Creates the directory if necessary and returns the written path.
pub fn save_capture(image: &CapturedImage, dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let filename = format!("snap_{}.jpg", Local::now().format("%Y-%m-%d_%H-%M-%S"));
    let path = dir.join(filename);

    std::fs::write(&path, &image.data)?;
    info!(path = %path.display(), "Saved capture");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saves_jpeg_with_timestamped_name() {
        let dir = std::env::temp_dir().join(format!("geosnap-test-{}", std::process::id()));
        let image = CapturedImage {
            data: vec![0xFF, 0xD8, 0xFF, 0xD9],
            width: 2,
            height: 2,
        };

        let path = save_capture(&image, &dir).unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("snap_"));
        assert_eq!(std::fs::read(&path).unwrap(), image.data);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
