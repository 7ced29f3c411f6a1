// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the submission sequence

use futures::future::BoxFuture;
use geosnap::errors::{LocationError, SubmitError};
use geosnap::geolocation::{GeoPoint, LocationProvider};
use geosnap::submission::{SubmissionClient, submit_with_location};
use geosnap::{CapturedImage, UiState};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Location provider that denies every request and records being asked
struct DenyingProvider {
    asked: AtomicBool,
}

impl LocationProvider for DenyingProvider {
    fn current_position(&self) -> BoxFuture<'_, Result<GeoPoint, LocationError>> {
        self.asked.store(true, Ordering::SeqCst);
        Box::pin(async { Err(LocationError::PermissionDenied) })
    }
}

/// Location provider that always returns the same fix
struct FixedProvider;

impl LocationProvider for FixedProvider {
    fn current_position(&self) -> BoxFuture<'_, Result<GeoPoint, LocationError>> {
        Box::pin(async {
            Ok(GeoPoint {
                latitude: 52.52,
                longitude: 13.405,
            })
        })
    }
}

fn image() -> CapturedImage {
    CapturedImage {
        data: vec![0xFF, 0xD8, 0xFF, 0xD9],
        width: 640,
        height: 480,
    }
}

#[tokio::test]
async fn denied_location_fails_before_any_network_call() {
    let provider = DenyingProvider {
        asked: AtomicBool::new(false),
    };
    let client = SubmissionClient::new();

    let result =
        submit_with_location(&provider, &client, "http://127.0.0.1:9", &image()).await;

    assert!(provider.asked.load(Ordering::SeqCst));
    // A location failure, not a network one: the POST was never attempted
    assert!(matches!(
        result,
        Err(SubmitError::Location(LocationError::PermissionDenied))
    ));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let client = SubmissionClient::new();

    // Port 9 (discard) is closed; the connect attempt fails
    let result =
        submit_with_location(&FixedProvider, &client, "http://127.0.0.1:9", &image()).await;

    assert!(matches!(result, Err(SubmitError::Network(_))));
}

#[tokio::test]
async fn unset_endpoint_fails_fast() {
    let client = SubmissionClient::new();

    let result = submit_with_location(&FixedProvider, &client, "", &image()).await;

    assert!(matches!(result, Err(SubmitError::NotConfigured)));
}

#[test]
fn failed_submission_leaves_image_submittable() {
    let captured = Arc::new(image());
    let mut state = UiState::Live;
    state.photo_captured(Arc::clone(&captured));

    // Submit, fail, and verify the review screen still holds the image
    let in_flight = state.begin_submit().expect("review state is submittable");
    assert_eq!(in_flight, captured);

    state.submit_failed();
    assert_eq!(state.captured_image(), Some(&captured));
    assert!(state.begin_submit().is_some(), "retry must be possible");
}
