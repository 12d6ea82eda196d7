use chrono::{DateTime, Utc};
use geo_types::{coord, Coord, Rect};
use serde::{Deserialize, Serialize};

use crate::entities::LocationType;

pub type LocationId = i64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: LocationId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub location_type: LocationType,
}

impl LocationRecord {
    pub fn new(
        id: LocationId,
        name: &str,
        description: &str,
        latitude: f64,
        longitude: f64,
        location_type: LocationType,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: match description {
                "" => None,
                d => Some(d.into()),
            },
            latitude,
            longitude,
            location_type,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Case-insensitive substring match on name or description. `needle` must
    /// already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .map_or(false, |d| d.to_lowercase().contains(needle))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Planar distance in degrees. Good enough at campus scale.
    pub fn planar_distance(&self, other: &Coordinates) -> f64 {
        let delta = Coord::from(*self) - Coord::from(*other);
        delta.x.hypot(delta.y)
    }
}

impl From<Coordinates> for Coord<f64> {
    fn from(c: Coordinates) -> Self {
        coord! { x: c.longitude, y: c.latitude }
    }
}

impl From<Coord<f64>> for Coordinates {
    fn from(c: Coord<f64>) -> Self {
        Coordinates {
            latitude: c.y,
            longitude: c.x,
        }
    }
}

impl From<Coordinates> for String {
    fn from(c: Coordinates) -> Self {
        format!("{:.6}, {:.6}", c.latitude, c.longitude)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    pub fn rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.west, y: self.south },
            coord! { x: self.east, y: self.north },
        )
    }

    pub fn contains(&self, c: &Coordinates) -> bool {
        let rect = self.rect();
        let (min, max) = (rect.min(), rect.max());

        c.longitude >= min.x && c.longitude <= max.x && c.latitude >= min.y && c.latitude <= max.y
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub coordinates: Coordinates,
    pub accuracy: Option<f64>,
    pub acquired_at: DateTime<Utc>,
}

#[test]
fn deserializes_backend_record() {
    let json = r#"{
        "id": 11,
        "name": "Commonwealth Hall",
        "description": null,
        "latitude": 5.6475,
        "longitude": -0.185,
        "type": "RESIDENTIAL_HALL",
        "createdAt": "2024-01-01T00:00:00"
    }"#;

    let record: LocationRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.id, 11);
    assert_eq!(record.description, None);
    assert_eq!(record.location_type, LocationType::ResidentialHall);
}

#[test]
fn text_match_checks_description() {
    let record = LocationRecord::new(
        1,
        "Main Library",
        "Balme Library - The main university library",
        5.6484,
        -0.1864,
        LocationType::Library,
    );

    assert!(record.matches_text("balme"));
    assert!(record.matches_text("main"));
    assert!(!record.matches_text("hall"));
}

#[test]
fn bounds_are_inclusive() {
    let bounds = Bounds {
        north: 5.66,
        south: 5.635,
        east: -0.175,
        west: -0.2,
    };

    assert!(bounds.contains(&Coordinates::new(5.66, -0.2)));
    assert!(bounds.contains(&Coordinates::new(5.6484, -0.1864)));
    assert!(!bounds.contains(&Coordinates::new(5.7, -0.1864)));
}
