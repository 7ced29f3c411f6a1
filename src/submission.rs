// SPDX-License-Identifier: GPL-3.0-only

//! Submission of captured images to the configured endpoint
//!
//! One POST per submission, no retry. The payload carries the JPEG as a
//! Base64 data URL next to the geolocation fix:
//!
//! ```json
//! { "image": "data:image/jpeg;base64,...",
//!   "location": { "latitude": 52.52, "longitude": 13.405 } }
//! ```

use crate::capture::CapturedImage;
use crate::constants::submission::SUBMIT_PATH;
use crate::errors::SubmitError;
use crate::geolocation::{GeoPoint, LocationProvider};
use serde::Serialize;
use tracing::{info, warn};

/// JSON body of an image submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionPayload {
    /// Base64 data URL of the captured JPEG
    pub image: String,
    pub location: GeoPoint,
}

impl SubmissionPayload {
    /// Build the payload for a captured image and position fix
    pub fn new(image: &CapturedImage, location: GeoPoint) -> Self {
        Self {
            image: image.to_data_url(),
            location,
        }
    }
}

/// Join the configured base URL with the upload path.
///
/// Fails with `NotConfigured` when the base URL is unset; a missing value
/// would otherwise only surface as a connect error against a relative URL.
pub fn submit_url(base_url: &str) -> Result<String, SubmitError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(SubmitError::NotConfigured);
    }
    Ok(format!("{}{}", trimmed, SUBMIT_PATH))
}

/// HTTP client for image submissions
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    client: reqwest::Client,
}

impl SubmissionClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// POST the payload to the endpoint.
    ///
    /// Success is any 2xx status; the response body is not consumed. Any
    /// other status is a rejection, transport failures are network errors.
    pub async fn submit(
        &self,
        base_url: &str,
        payload: &SubmissionPayload,
    ) -> Result<(), SubmitError> {
        let url = submit_url(base_url)?;
        info!(url = %url, "Submitting captured image");

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            info!(status = status.as_u16(), "Submission accepted");
            Ok(())
        } else {
            warn!(status = status.as_u16(), "Submission rejected by server");
            Err(SubmitError::Rejected(status.as_u16()))
        }
    }
}

impl Default for SubmissionClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Full submission sequence: geolocate, build the payload, POST.
///
/// The position fix comes first; when it fails, no network request is made
/// and the caller keeps the image for another attempt.
pub async fn submit_with_location(
    provider: &dyn LocationProvider,
    client: &SubmissionClient,
    base_url: &str,
    image: &CapturedImage,
) -> Result<(), SubmitError> {
    let location = provider.current_position().await?;
    let payload = SubmissionPayload::new(image, location);
    client.submit(base_url, &payload).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> CapturedImage {
        CapturedImage {
            data: vec![0xFF, 0xD8, 0xFF, 0xD9],
            width: 2,
            height: 2,
        }
    }

    #[test]
    fn payload_has_wire_shape() {
        let payload = SubmissionPayload::new(
            &image(),
            GeoPoint {
                latitude: 52.52,
                longitude: 13.405,
            },
        );
        let json = serde_json::to_value(&payload).unwrap();

        assert!(
            json["image"]
                .as_str()
                .unwrap()
                .starts_with("data:image/jpeg;base64,")
        );
        assert_eq!(json["location"]["latitude"], 52.52);
        assert_eq!(json["location"]["longitude"], 13.405);
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn url_joining_normalizes_trailing_slash() {
        assert_eq!(
            submit_url("https://example.org").unwrap(),
            "https://example.org/api/images"
        );
        assert_eq!(
            submit_url("https://example.org/").unwrap(),
            "https://example.org/api/images"
        );
    }

    #[test]
    fn empty_base_url_is_not_configured() {
        assert!(matches!(submit_url(""), Err(SubmitError::NotConfigured)));
        assert!(matches!(submit_url("  "), Err(SubmitError::NotConfigured)));
    }
}
