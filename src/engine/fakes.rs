use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::Navigator;
use crate::{
    api::{
        ControlId, Geolocator, LayerId, LocationSource, MapWidget, Marker, MarkerId, Position,
        RoutingWidget, TileLayer,
    },
    config::{Config, GeolocationOptions, MapConfig},
    entities::{Coordinates, LocationRecord, RouteRequest},
    error::{geolocation_unsupported_error, upstream_error, widget_error, Error},
};

pub struct StaticSource {
    result: Result<Vec<LocationRecord>, Error>,
}

impl StaticSource {
    pub fn ok(records: Vec<LocationRecord>) -> Self {
        Self {
            result: Ok(records),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: Err(upstream_error()),
        }
    }
}

#[async_trait]
impl LocationSource for StaticSource {
    async fn fetch_locations(&self) -> Result<Vec<LocationRecord>, Error> {
        self.result.clone()
    }
}

#[derive(Debug, Default)]
pub struct RecordingMap {
    pub fail_configure: bool,
    pub configured: Option<MapConfig>,
    pub layers: Vec<TileLayer>,
    markers: Vec<(MarkerId, Marker)>,
    removed: usize,
    pub popups: Vec<MarkerId>,
    pub views: Vec<(Coordinates, u8)>,
    pub zoom_steps: i32,
    pub fullscreen: bool,
}

impl RecordingMap {
    pub fn markers(&self) -> Vec<&Marker> {
        self.markers.iter().map(|(_, m)| m).collect()
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|(i, _)| *i == id).map(|(_, m)| m)
    }

    pub fn removed(&self) -> usize {
        self.removed
    }
}

impl MapWidget for RecordingMap {
    fn configure(&mut self, config: &MapConfig) -> Result<(), Error> {
        if self.fail_configure {
            return Err(widget_error("map container missing"));
        }
        self.configured = Some(config.clone());
        Ok(())
    }

    fn add_tile_layer(&mut self, layer: TileLayer) -> Result<LayerId, Error> {
        self.layers.push(layer);
        Ok(LayerId(Uuid::new_v4()))
    }

    fn remove_tile_layer(&mut self, _id: LayerId) {
        self.layers.pop();
    }

    fn add_marker(&mut self, marker: Marker) -> MarkerId {
        let id = MarkerId(Uuid::new_v4());
        self.markers.push((id, marker));
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        let before = self.markers.len();
        self.markers.retain(|(i, _)| *i != id);
        self.removed += before - self.markers.len();
    }

    fn open_popup(&mut self, id: MarkerId) {
        self.popups.push(id);
    }

    fn set_view(&mut self, center: Coordinates, zoom: u8) {
        self.views.push((center, zoom));
    }

    fn zoom_in(&mut self) {
        self.zoom_steps += 1;
    }

    fn zoom_out(&mut self) {
        self.zoom_steps -= 1;
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }
}

#[derive(Clone, Default)]
pub struct SharedMap(pub Arc<Mutex<RecordingMap>>);

impl MapWidget for SharedMap {
    fn configure(&mut self, config: &MapConfig) -> Result<(), Error> {
        self.0.lock().unwrap().configure(config)
    }

    fn add_tile_layer(&mut self, layer: TileLayer) -> Result<LayerId, Error> {
        self.0.lock().unwrap().add_tile_layer(layer)
    }

    fn remove_tile_layer(&mut self, id: LayerId) {
        self.0.lock().unwrap().remove_tile_layer(id)
    }

    fn add_marker(&mut self, marker: Marker) -> MarkerId {
        self.0.lock().unwrap().add_marker(marker)
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.0.lock().unwrap().remove_marker(id)
    }

    fn open_popup(&mut self, id: MarkerId) {
        self.0.lock().unwrap().open_popup(id)
    }

    fn set_view(&mut self, center: Coordinates, zoom: u8) {
        self.0.lock().unwrap().set_view(center, zoom)
    }

    fn zoom_in(&mut self) {
        self.0.lock().unwrap().zoom_in()
    }

    fn zoom_out(&mut self) {
        self.0.lock().unwrap().zoom_out()
    }

    fn toggle_fullscreen(&mut self) {
        self.0.lock().unwrap().toggle_fullscreen()
    }
}

#[derive(Debug, Default)]
pub struct RecordingRouting {
    pub routes: Vec<(ControlId, RouteRequest)>,
    pub removed: Vec<ControlId>,
}

#[derive(Clone, Default)]
pub struct SharedRouting(pub Arc<Mutex<RecordingRouting>>);

impl RoutingWidget for SharedRouting {
    fn add_route(&mut self, route: &RouteRequest) -> Result<ControlId, Error> {
        let id = ControlId(Uuid::new_v4());
        self.0.lock().unwrap().routes.push((id, route.clone()));
        Ok(id)
    }

    fn remove_route(&mut self, id: ControlId) {
        let mut routing = self.0.lock().unwrap();
        routing.routes.retain(|(i, _)| *i != id);
        routing.removed.push(id);
    }
}

/// Hands out queued outcomes, one per request.
#[derive(Default)]
pub struct StubGeolocator {
    outcomes: Mutex<VecDeque<Result<Position, Error>>>,
    delay: Option<std::time::Duration>,
}

impl StubGeolocator {
    pub fn new(outcomes: Vec<Result<Position, Error>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            delay: None,
        }
    }

    pub fn slow(delay: std::time::Duration) -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::from(vec![Ok(position(5.6480, -0.1860))])),
            delay: Some(delay),
        }
    }
}

#[async_trait]
impl Geolocator for StubGeolocator {
    async fn current_position(&self, _options: &GeolocationOptions) -> Result<Position, Error> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.outcomes.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(geolocation_unsupported_error()))
    }
}

pub fn position(latitude: f64, longitude: f64) -> Position {
    Position {
        coordinates: Coordinates::new(latitude, longitude),
        accuracy: Some(12.0),
        timestamp: Utc::now(),
    }
}

pub struct Harness {
    pub map: Arc<Mutex<RecordingMap>>,
    pub routing: Arc<Mutex<RecordingRouting>>,
}

pub fn navigator_with(config: Config, geolocator: StubGeolocator) -> (Navigator, Harness) {
    let map = SharedMap::default();
    let routing = SharedRouting::default();
    let harness = Harness {
        map: map.0.clone(),
        routing: routing.0.clone(),
    };

    let navigator = Navigator::new(
        config,
        Box::new(map),
        Box::new(routing),
        Arc::new(geolocator),
    );

    (navigator, harness)
}

/// A navigator running on the sample records with no geolocation fix.
pub async fn started_navigator() -> (Navigator, Harness) {
    started_navigator_with(StubGeolocator::default()).await
}

pub async fn started_navigator_with(geolocator: StubGeolocator) -> (Navigator, Harness) {
    let (mut navigator, harness) = navigator_with(Config::default(), geolocator);
    navigator
        .start(Arc::new(StaticSource::failing()))
        .await
        .unwrap();

    (navigator, harness)
}
