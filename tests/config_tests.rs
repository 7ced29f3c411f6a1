// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use geosnap::Config;
use geosnap::Facing;
use geosnap::capture::EncodingQuality;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(
        config.endpoint_url.is_empty(),
        "Endpoint should start unset; submission validates it"
    );
    assert_eq!(
        config.facing,
        Facing::Back,
        "World-facing camera should be the default"
    );
    assert_eq!(
        config.photo_quality,
        EncodingQuality::High,
        "Photo quality should default to High"
    );
}
