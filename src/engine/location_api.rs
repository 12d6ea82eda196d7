use super::Navigator;

use chrono::Utc;
use tokio::time::timeout;

use crate::{
    api::{Marker, MarkerIcon, Position},
    config::USER_LOCATION_ZOOM,
    entities::{Coordinates, LocationId, UserLocation},
    error::{geolocation_error, geolocation_unsupported_error, Error},
    views::{DetailsView, PopupView},
};

fn user_marker(coordinates: Coordinates) -> Marker {
    Marker {
        coordinates,
        icon: MarkerIcon {
            class_name: "current-location-marker".into(),
            color: "#007bff".into(),
            size: 22,
            anchor: 11,
        },
        popup: PopupView::current_location(),
    }
}

impl Navigator {
    /// One geolocation attempt, bounded by the configured timeout. On failure
    /// the previous user location and its marker stay as they were.
    #[tracing::instrument(skip(self))]
    pub async fn locate(&mut self) -> Result<Coordinates, Error> {
        let options = self.config.geolocation.clone();
        let attempt = self.geolocator.current_position(&options);

        let position = match timeout(options.timeout, attempt).await {
            Ok(Ok(position)) => position,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "geolocation failed");
                return Err(if err == geolocation_unsupported_error() {
                    err
                } else {
                    geolocation_error()
                });
            }
            Err(_) => {
                tracing::warn!(timeout = ?options.timeout, "geolocation timed out");
                return Err(geolocation_error());
            }
        };

        if is_stale(&position, &options.maximum_age) {
            tracing::warn!(timestamp = %position.timestamp, "stale position rejected");
            return Err(geolocation_error());
        }

        let coordinates = position.coordinates;
        self.user_location = Some(UserLocation {
            coordinates,
            accuracy: position.accuracy,
            acquired_at: position.timestamp,
        });

        if let Some(previous) = self.user_marker.take() {
            self.map.remove_marker(previous);
        }
        self.user_marker = Some(self.map.add_marker(user_marker(coordinates)));
        self.map.set_view(coordinates, USER_LOCATION_ZOOM);

        Ok(coordinates)
    }

    pub fn location_details(&self, id: LocationId) -> Result<DetailsView, Error> {
        Ok(DetailsView::new(self.find_location(id)?))
    }
}

fn is_stale(position: &Position, maximum_age: &std::time::Duration) -> bool {
    match chrono::Duration::from_std(*maximum_age) {
        Ok(max) => Utc::now() - position.timestamp > max,
        Err(_) => false,
    }
}

#[tokio::test]
async fn locate_places_single_user_marker() {
    use super::fakes::{position, started_navigator_with, StubGeolocator};

    let geolocator = StubGeolocator::new(vec![
        Ok(position(5.6470, -0.1870)),
        Ok(position(5.6490, -0.1880)),
    ]);
    let (mut navigator, harness) = started_navigator_with(geolocator).await;

    navigator.locate().await.unwrap();
    let second = navigator.locate().await.unwrap();

    assert_eq!(second, Coordinates::new(5.6490, -0.1880));
    let map = harness.map.lock().unwrap();
    assert_eq!(map.markers().len(), 9);
    assert_eq!(map.views.last(), Some(&(second, USER_LOCATION_ZOOM)));
}

#[tokio::test]
async fn failed_locate_keeps_previous_fix() {
    use super::fakes::{position, started_navigator_with, StubGeolocator};

    let geolocator = StubGeolocator::new(vec![Ok(position(5.6470, -0.1870)), Err(geolocation_error())]);
    let (mut navigator, _) = started_navigator_with(geolocator).await;

    let first = navigator.locate().await.unwrap();
    let err = navigator.locate().await.unwrap_err();

    assert_eq!(err.message, "Failed to get your current location");
    assert_eq!(navigator.user_location().map(|u| u.coordinates), Some(first));
}

#[tokio::test]
async fn unsupported_geolocation_is_reported_as_such() {
    let (mut navigator, _) = super::fakes::started_navigator().await;

    let err = navigator.locate().await.unwrap_err();

    assert_eq!(err.code, 104);
    assert!(navigator.user_location().is_none());
}

#[tokio::test]
async fn slow_geolocation_times_out() {
    use super::fakes::{navigator_with, StaticSource, StubGeolocator};
    use crate::config::Config;
    use std::sync::Arc;
    use std::time::Duration;

    let mut config = Config::default();
    config.geolocation.timeout = Duration::from_millis(20);

    let (mut navigator, _) = navigator_with(config, StubGeolocator::slow(Duration::from_secs(5)));
    navigator.start(Arc::new(StaticSource::failing())).await.unwrap();

    assert_eq!(navigator.locate().await.unwrap_err(), geolocation_error());
    assert!(navigator.user_location().is_none());
}

#[tokio::test]
async fn stale_positions_are_rejected() {
    use super::fakes::{position, started_navigator_with, StubGeolocator};

    let mut old = position(5.6470, -0.1870);
    old.timestamp = Utc::now() - chrono::Duration::minutes(5);

    let (mut navigator, _) = started_navigator_with(StubGeolocator::new(vec![Ok(old)])).await;

    assert!(navigator.locate().await.is_err());
    assert!(navigator.user_location().is_none());
}

#[tokio::test]
async fn directions_start_from_fix_when_known() {
    use super::fakes::{position, started_navigator_with, StubGeolocator};
    use crate::entities::Endpoint;

    let geolocator = StubGeolocator::new(vec![Ok(position(5.6470, -0.1870))]);
    let (mut navigator, harness) = started_navigator_with(geolocator).await;

    let here = navigator.locate().await.unwrap();
    let route = navigator.get_directions_to(6).unwrap().clone();

    assert_eq!(navigator.selection().from, Some(Endpoint::Current));
    assert_eq!(route.from, here);
    assert_eq!(harness.routing.lock().unwrap().routes.len(), 1);
}

#[tokio::test]
async fn details_for_known_location() {
    let (navigator, _) = super::fakes::started_navigator().await;

    let details = navigator.location_details(8).unwrap();
    assert_eq!(details.title, "Volta Hall");
    assert_eq!(details.type_label, "Residential Hall");
    assert_eq!(navigator.location_details(42).unwrap_err().code, 103);
}
