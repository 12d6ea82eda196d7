use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    api::{
        ControlId, Geolocator, LayerId, MapWidget, Marker, MarkerId, Position, RoutingWidget,
        TileLayer,
    },
    config::{GeolocationOptions, MapConfig},
    entities::{Coordinates, RouteRequest},
    error::{geolocation_unsupported_error, Error},
};

/// Keeps the map state in memory and traces every change.
#[derive(Debug, Default)]
pub struct ConsoleMap {
    config: Option<MapConfig>,
    layers: Vec<(LayerId, TileLayer)>,
    markers: Vec<(MarkerId, Marker)>,
    center: Option<(Coordinates, u8)>,
    fullscreen: bool,
}

impl ConsoleMap {
    fn zoom_by(&mut self, step: i16) {
        let (min, max) = self
            .config
            .as_ref()
            .map_or((0, 20), |c| (c.min_zoom, c.max_zoom));

        if let Some((center, zoom)) = self.center {
            let zoom = (zoom as i16 + step).clamp(min as i16, max as i16) as u8;
            self.center = Some((center, zoom));
            tracing::debug!(zoom, "map zoom");
        }
    }
}

impl MapWidget for ConsoleMap {
    fn configure(&mut self, config: &MapConfig) -> Result<(), Error> {
        tracing::debug!(center = ?config.center, zoom = config.default_zoom, bounds = ?config.bounds, "map configured");
        self.center = Some((config.center, config.default_zoom));
        self.config = Some(config.clone());
        Ok(())
    }

    fn add_tile_layer(&mut self, layer: TileLayer) -> Result<LayerId, Error> {
        let id = LayerId(Uuid::new_v4());
        tracing::debug!(url = %layer.url, "tile layer added");
        self.layers.push((id, layer));
        Ok(id)
    }

    fn remove_tile_layer(&mut self, id: LayerId) {
        self.layers.retain(|(i, _)| *i != id);
    }

    fn add_marker(&mut self, marker: Marker) -> MarkerId {
        let id = MarkerId(Uuid::new_v4());
        tracing::trace!(title = %marker.popup.title, color = %marker.icon.color, "marker added");
        self.markers.push((id, marker));
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.retain(|(i, _)| *i != id);
    }

    fn open_popup(&mut self, id: MarkerId) {
        if let Some((_, marker)) = self.markers.iter().find(|(i, _)| *i == id) {
            tracing::debug!(title = %marker.popup.title, "popup opened");
        }
    }

    fn set_view(&mut self, center: Coordinates, zoom: u8) {
        tracing::debug!(?center, zoom, "map view");
        self.center = Some((center, zoom));
    }

    fn zoom_in(&mut self) {
        self.zoom_by(1);
    }

    fn zoom_out(&mut self) {
        self.zoom_by(-1);
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        tracing::debug!(fullscreen = self.fullscreen, "fullscreen toggled");
    }
}

#[derive(Debug, Default)]
pub struct ConsoleRouting {
    active: Option<(ControlId, RouteRequest)>,
}

impl RoutingWidget for ConsoleRouting {
    fn add_route(&mut self, route: &RouteRequest) -> Result<ControlId, Error> {
        let id = ControlId(Uuid::new_v4());
        tracing::info!(from = ?route.from, to = ?route.to, color = %route.style.color, "route control added");
        self.active = Some((id, route.clone()));
        Ok(id)
    }

    fn remove_route(&mut self, id: ControlId) {
        if matches!(&self.active, Some((active, _)) if *active == id) {
            self.active = None;
        }
    }
}

/// Reports a fixed position, or no geolocation support at all.
#[derive(Debug, Default)]
pub struct ConsoleGeolocator {
    position: Option<Coordinates>,
}

impl ConsoleGeolocator {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for ConsoleGeolocator {
    async fn current_position(&self, _options: &GeolocationOptions) -> Result<Position, Error> {
        let coordinates = self.position.ok_or_else(geolocation_unsupported_error)?;

        Ok(Position {
            coordinates,
            accuracy: None,
            timestamp: Utc::now(),
        })
    }
}

#[test]
fn zoom_stays_within_configured_range() {
    let mut map = ConsoleMap::default();
    map.configure(&MapConfig::default()).unwrap();

    for _ in 0..10 {
        map.zoom_in();
    }
    assert_eq!(map.center.map(|(_, z)| z), Some(20));

    for _ in 0..10 {
        map.zoom_out();
    }
    assert_eq!(map.center.map(|(_, z)| z), Some(14));
}

#[test]
fn geolocator_without_fix_is_unsupported() {
    use tokio_test::block_on;

    let geolocator = ConsoleGeolocator::default();
    let err = block_on(geolocator.current_position(&GeolocationOptions::default())).unwrap_err();

    assert_eq!(err, geolocation_unsupported_error());
}
