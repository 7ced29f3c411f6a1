// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the GeoSnap application

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera-related errors
    Camera(CameraError),
    /// Still-frame capture errors
    Capture(CaptureError),
    /// Geolocation errors
    Location(LocationError),
    /// Submission errors
    Submit(SubmitError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
}

/// Camera-specific errors
#[derive(Debug, Clone)]
pub enum CameraError {
    /// No camera devices found
    NoCameraFound,
    /// The platform denied access to the camera
    PermissionDenied,
    /// No device matched and none could be opened
    DeviceUnavailable(String),
    /// Pipeline initialization failed
    InitializationFailed(String),
    /// Camera disconnected during operation
    Disconnected,
}

/// Still-frame capture errors
#[derive(Debug, Clone)]
pub enum CaptureError {
    /// No preview frame available for capture
    NoFrameAvailable,
    /// Frame has zero width or height (metadata not yet decoded)
    EmptyFrame,
    /// JPEG encoding failed
    EncodingFailed(String),
}

/// Geolocation errors
#[derive(Debug, Clone)]
pub enum LocationError {
    /// The platform denied access to location services
    PermissionDenied,
    /// The location service is not reachable (e.g. GeoClue not running)
    ServiceUnavailable(String),
    /// The service is reachable but could not produce a fix
    NoFix(String),
}

/// Submission errors
#[derive(Debug, Clone)]
pub enum SubmitError {
    /// No endpoint URL configured
    NotConfigured,
    /// The server answered with a non-success status
    Rejected(u16),
    /// Transport-level failure (DNS, connect, TLS, ...)
    Network(String),
    /// The geolocation fix required for the payload failed
    Location(LocationError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Capture(e) => write!(f, "Capture error: {}", e),
            AppError::Location(e) => write!(f, "Location error: {}", e),
            AppError::Submit(e) => write!(f, "Submission error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NoCameraFound => write!(f, "No camera devices found"),
            CameraError::PermissionDenied => write!(f, "Camera access denied"),
            CameraError::DeviceUnavailable(msg) => write!(f, "Camera unavailable: {}", msg),
            CameraError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            CameraError::Disconnected => write!(f, "Camera disconnected"),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::NoFrameAvailable => write!(f, "No frame available for capture"),
            CaptureError::EmptyFrame => write!(f, "Frame has no decoded dimensions yet"),
            CaptureError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
        }
    }
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::PermissionDenied => write!(f, "Location access denied"),
            LocationError::ServiceUnavailable(msg) => {
                write!(f, "Location service unavailable: {}", msg)
            }
            LocationError::NoFix(msg) => write!(f, "No position fix: {}", msg),
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::NotConfigured => write!(f, "No submission endpoint configured"),
            SubmitError::Rejected(status) => {
                write!(f, "Server rejected submission (HTTP {})", status)
            }
            SubmitError::Network(msg) => write!(f, "Network error: {}", msg),
            SubmitError::Location(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for LocationError {}
impl std::error::Error for SubmitError {}

impl From<CameraError> for AppError {
    fn from(e: CameraError) -> Self {
        AppError::Camera(e)
    }
}

impl From<CaptureError> for AppError {
    fn from(e: CaptureError) -> Self {
        AppError::Capture(e)
    }
}

impl From<LocationError> for AppError {
    fn from(e: LocationError) -> Self {
        AppError::Location(e)
    }
}

impl From<SubmitError> for AppError {
    fn from(e: SubmitError) -> Self {
        AppError::Submit(e)
    }
}

impl From<LocationError> for SubmitError {
    fn from(e: LocationError) -> Self {
        SubmitError::Location(e)
    }
}
