// SPDX-License-Identifier: GPL-3.0-only

//! GeoClue2 D-Bus integration for one-shot position fixes
//!
//! This module provides geolocation via GeoClue2's D-Bus API, which works in
//! both native and flatpak environments (with appropriate D-Bus permissions).
//! The fix is single-shot: the client is started, the first `LocationUpdated`
//! signal is consumed, and the client is stopped again.
//!
//! No timeout is imposed here; a hanging permission prompt blocks the fix
//! until the user answers it, mirroring the submission flow's semantics.

use crate::errors::LocationError;
use futures::StreamExt;
use futures::future::BoxFuture;
use serde::Serialize;
use tracing::{debug, info};
use zbus::zvariant::OwnedObjectPath;

/// GeoClue2 accuracy request: exact position
const ACCURACY_EXACT: u32 = 8;

/// A position fix in floating-point degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Source of one-shot position fixes.
///
/// The production implementation talks to GeoClue2; tests substitute
/// deterministic fakes.
pub trait LocationProvider: Send + Sync {
    /// Acquire the current position (single-shot, not watched)
    fn current_position(&self) -> BoxFuture<'_, Result<GeoPoint, LocationError>>;
}

/// GeoClue2-backed location provider
#[derive(Debug, Clone)]
pub struct GeoClueProvider {
    /// Desktop id announced to GeoClue for its authorization bookkeeping
    desktop_id: String,
}

impl GeoClueProvider {
    pub fn new(desktop_id: impl Into<String>) -> Self {
        Self {
            desktop_id: desktop_id.into(),
        }
    }
}

impl LocationProvider for GeoClueProvider {
    fn current_position(&self) -> BoxFuture<'_, Result<GeoPoint, LocationError>> {
        Box::pin(current_position(&self.desktop_id))
    }
}

/// Acquire a single position fix from GeoClue2
async fn current_position(desktop_id: &str) -> Result<GeoPoint, LocationError> {
    info!("Requesting position fix from GeoClue");

    let connection = zbus::Connection::system()
        .await
        .map_err(|e| LocationError::ServiceUnavailable(format!("system D-Bus: {}", e)))?;

    let manager = zbus::Proxy::new(
        &connection,
        "org.freedesktop.GeoClue2",
        "/org/freedesktop/GeoClue2/Manager",
        "org.freedesktop.GeoClue2.Manager",
    )
    .await
    .map_err(|e| LocationError::ServiceUnavailable(format!("GeoClue manager proxy: {}", e)))?;

    let client_path: OwnedObjectPath = manager
        .call("GetClient", &())
        .await
        .map_err(|e| LocationError::ServiceUnavailable(format!("GetClient failed: {}", e)))?;

    debug!(client = %client_path, "GeoClue client created");

    let client = zbus::Proxy::new(
        &connection,
        "org.freedesktop.GeoClue2",
        client_path.as_str(),
        "org.freedesktop.GeoClue2.Client",
    )
    .await
    .map_err(|e| LocationError::ServiceUnavailable(format!("GeoClue client proxy: {}", e)))?;

    // GeoClue refuses Start without a desktop id to authorize against
    client
        .set_property("DesktopId", desktop_id)
        .await
        .map_err(|e| LocationError::ServiceUnavailable(format!("DesktopId: {}", e)))?;

    client
        .set_property("RequestedAccuracyLevel", ACCURACY_EXACT)
        .await
        .map_err(|e| LocationError::ServiceUnavailable(format!("accuracy level: {}", e)))?;

    let mut updates = client
        .receive_signal("LocationUpdated")
        .await
        .map_err(|e| LocationError::ServiceUnavailable(format!("signal subscription: {}", e)))?;

    if let Err(e) = client.call::<_, _, ()>("Start", &()).await {
        // An agent denial surfaces here as an AccessDenied D-Bus error
        let msg = e.to_string();
        return if msg.contains("AccessDenied") {
            Err(LocationError::PermissionDenied)
        } else {
            Err(LocationError::NoFix(format!("Start failed: {}", msg)))
        };
    }

    // Single-shot: consume the first update, then stop the client
    let signal = updates
        .next()
        .await
        .ok_or_else(|| LocationError::NoFix("location signal stream ended".to_string()))?;

    let (_old, new_path): (OwnedObjectPath, OwnedObjectPath) = signal
        .body()
        .deserialize()
        .map_err(|e| LocationError::NoFix(format!("malformed LocationUpdated: {}", e)))?;

    let location = zbus::Proxy::new(
        &connection,
        "org.freedesktop.GeoClue2",
        new_path.as_str(),
        "org.freedesktop.GeoClue2.Location",
    )
    .await
    .map_err(|e| LocationError::NoFix(format!("location proxy: {}", e)))?;

    let latitude: f64 = location
        .get_property("Latitude")
        .await
        .map_err(|e| LocationError::NoFix(format!("Latitude: {}", e)))?;
    let longitude: f64 = location
        .get_property("Longitude")
        .await
        .map_err(|e| LocationError::NoFix(format!("Longitude: {}", e)))?;

    if let Err(e) = client.call::<_, _, ()>("Stop", &()).await {
        debug!(error = %e, "Failed to stop GeoClue client");
    }

    info!(latitude, longitude, "Position fix acquired");
    Ok(GeoPoint {
        latitude,
        longitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Provider returning a fixed position, for exercising the trait object
    struct FixedProvider(GeoPoint);

    impl LocationProvider for FixedProvider {
        fn current_position(&self) -> BoxFuture<'_, Result<GeoPoint, LocationError>> {
            let point = self.0;
            Box::pin(async move { Ok(point) })
        }
    }

    #[tokio::test]
    async fn trait_object_yields_position() {
        let provider: Box<dyn LocationProvider> = Box::new(FixedProvider(GeoPoint {
            latitude: 52.52,
            longitude: 13.405,
        }));

        let point = provider.current_position().await.unwrap();
        assert_eq!(point.latitude, 52.52);
        assert_eq!(point.longitude, 13.405);
    }

    #[test]
    fn geopoint_serializes_to_named_fields() {
        let json = serde_json::to_value(GeoPoint {
            latitude: 1.5,
            longitude: -2.25,
        })
        .unwrap();

        assert_eq!(json["latitude"], 1.5);
        assert_eq!(json["longitude"], -2.25);
    }
}
