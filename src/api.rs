use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{GeolocationOptions, MapConfig};
use crate::entities::{Coordinates, LocationRecord, RouteRequest};
use crate::error::Error;
use crate::views::PopupView;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub Uuid);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub Uuid);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlId(pub Uuid);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerIcon {
    pub class_name: String,
    pub color: String,
    pub size: u32,
    pub anchor: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub coordinates: Coordinates,
    pub icon: MarkerIcon,
    pub popup: PopupView,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    pub url: String,
    pub attribution: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub coordinates: Coordinates,
    pub accuracy: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// Where location records come from.
#[async_trait]
pub trait LocationSource {
    async fn fetch_locations(&self) -> Result<Vec<LocationRecord>, Error>;
}

/// The interactive map the navigator draws on.
pub trait MapWidget {
    fn configure(&mut self, config: &MapConfig) -> Result<(), Error>;
    fn add_tile_layer(&mut self, layer: TileLayer) -> Result<LayerId, Error>;
    fn remove_tile_layer(&mut self, id: LayerId);
    fn add_marker(&mut self, marker: Marker) -> MarkerId;
    fn remove_marker(&mut self, id: MarkerId);
    fn open_popup(&mut self, id: MarkerId);
    fn set_view(&mut self, center: Coordinates, zoom: u8);
    fn zoom_in(&mut self);
    fn zoom_out(&mut self);
    fn toggle_fullscreen(&mut self);
}

/// Draws a path between waypoints. Path computation is the widget's business.
pub trait RoutingWidget {
    fn add_route(&mut self, route: &RouteRequest) -> Result<ControlId, Error>;
    fn remove_route(&mut self, id: ControlId);
}

#[async_trait]
pub trait Geolocator {
    async fn current_position(&self, options: &GeolocationOptions) -> Result<Position, Error>;
}

pub type DynSource = Arc<dyn LocationSource + Send + Sync>;
pub type DynMap = Box<dyn MapWidget + Send>;
pub type DynRouting = Box<dyn RoutingWidget + Send>;
pub type DynGeolocator = Arc<dyn Geolocator + Send + Sync>;
