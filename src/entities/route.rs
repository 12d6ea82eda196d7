use geo_types::Line;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Coordinates, LocationId};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteStyle {
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            color: "#667eea".into(),
            weight: 6,
            opacity: 0.8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub id: Uuid,
    pub from: Coordinates,
    pub to: Coordinates,
    pub style: RouteStyle,
    pub show_endpoint_markers: bool,
    pub route_while_dragging: bool,
    pub add_waypoints: bool,
}

impl RouteRequest {
    pub fn new(from: Coordinates, to: Coordinates, style: RouteStyle) -> Self {
        RouteRequest {
            id: Uuid::new_v4(),
            from,
            to,
            style,
            show_endpoint_markers: false,
            route_while_dragging: false,
            add_waypoints: false,
        }
    }

    pub fn waypoints(&self) -> [Coordinates; 2] {
        [self.from, self.to]
    }

    pub fn line(&self) -> Line<f64> {
        Line::new(self.from, self.to)
    }
}

/// Starting point chosen in the route selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Current,
    Location(LocationId),
}

impl std::str::FromStr for Endpoint {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "current" => Ok(Endpoint::Current),
            id => Ok(Endpoint::Location(id.parse()?)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSelection {
    pub from: Option<Endpoint>,
    pub to: Option<LocationId>,
}

#[test]
fn route_request_suppresses_endpoint_markers() {
    let from = Coordinates::new(5.6484, -0.1864);
    let to = Coordinates::new(5.6470, -0.1875);
    let route = RouteRequest::new(from, to, RouteStyle::default());

    assert!(!route.show_endpoint_markers);
    assert_eq!(route.waypoints(), [from, to]);
    assert_eq!(route.line().start.x, -0.1864);
    assert_eq!(route.style.weight, 6);
}

#[test]
fn endpoint_parses_selector_values() {
    assert_eq!("current".parse::<Endpoint>().unwrap(), Endpoint::Current);
    assert_eq!(" 8 ".parse::<Endpoint>().unwrap(), Endpoint::Location(8));
    assert!("library".parse::<Endpoint>().is_err());
}
