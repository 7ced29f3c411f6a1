// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the capture flow
//!
//! These exercise the session lifecycle and screen state machine together,
//! following the same sequences the UI handlers drive.

use geosnap::backends::camera::session::CameraSession;
use geosnap::backends::camera::types::{CameraFrame, Facing};
use geosnap::capture::{EncodingQuality, encode_frame};
use geosnap::{CapturedImage, UiState};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Instant;

fn frame(width: u32, height: u32) -> CameraFrame {
    CameraFrame {
        width,
        height,
        data: Arc::from(vec![200u8; (width * height * 4) as usize].into_boxed_slice()),
        captured_at: Instant::now(),
    }
}

#[test]
fn switch_facing_is_one_stop_one_start() {
    let mut session = CameraSession::new(Facing::Front);
    session.start();
    let old_flag = session.cancel_flag();
    let old_generation = session.generation();

    session.switch_facing();

    // Exactly one stop (the old stream was cancelled) ...
    assert!(old_flag.load(Ordering::Acquire));
    // ... then one start under the flipped facing
    assert!(session.is_active());
    assert_eq!(session.facing(), Facing::Back);
    assert_eq!(session.generation(), old_generation + 1);
}

#[test]
fn at_most_one_stream_across_switch_sequences() {
    let mut session = CameraSession::new(Facing::Front);
    let mut retired_flags = Vec::new();

    session.start();
    for _ in 0..5 {
        retired_flags.push(session.cancel_flag());
        session.switch_facing();
    }

    // Every retired stream was told to exit; only the newest is accepted
    for flag in &retired_flags {
        assert!(flag.load(Ordering::Acquire));
    }
    assert!(!session.cancel_flag().load(Ordering::Acquire));
    let current = session.generation();
    for stale in 1..current {
        assert!(!session.accepts(stale));
    }
    assert!(session.accepts(current));
}

#[test]
fn capture_moves_live_to_reviewing_and_stops_session() {
    let mut session = CameraSession::new(Facing::Back);
    let mut state = UiState::Live;
    session.start();

    // Capture: snapshot the current frame, stop the stream, enter review
    let image = encode_frame(&frame(640, 480), EncodingQuality::High).unwrap();
    assert_eq!((image.width, image.height), (640, 480));

    session.stop();
    assert!(state.photo_captured(Arc::new(image)));

    assert!(!session.is_active(), "capture must release the camera");
    assert!(state.captured_image().is_some());
    assert!(!state.is_live());
}

#[test]
fn retake_returns_to_live_with_last_facing() {
    let mut session = CameraSession::new(Facing::Front);
    let mut state = UiState::Live;
    session.start();
    session.switch_facing();

    session.stop();
    state.photo_captured(Arc::new(CapturedImage {
        data: vec![0xFF, 0xD8, 0xFF, 0xD9],
        width: 640,
        height: 480,
    }));

    // Retake: discard the still, restart the preview
    assert!(state.retake());
    session.start();

    assert!(state.is_live());
    assert!(session.is_active());
    assert_eq!(
        session.facing(),
        Facing::Back,
        "retake keeps the last-selected facing"
    );
}

#[test]
fn zero_dimension_frame_cannot_be_captured() {
    let degenerate = CameraFrame {
        width: 0,
        height: 0,
        data: Arc::from(Vec::new().into_boxed_slice()),
        captured_at: Instant::now(),
    };

    assert!(!degenerate.has_content());
    assert!(encode_frame(&degenerate, EncodingQuality::High).is_err());
}
