use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entities::{Bounds, Coordinates, RouteStyle};
use crate::error::{config_error, Error};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8080";
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";

pub const FOCUS_ZOOM: u8 = 18;
pub const USER_LOCATION_ZOOM: u8 = 17;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub center: Coordinates,
    pub default_zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub bounds: Bounds,
    pub tile_url: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: Coordinates::new(5.6484, -0.1864),
            default_zoom: 16,
            min_zoom: 14,
            max_zoom: 20,
            bounds: Bounds {
                north: 5.66,
                south: 5.635,
                east: -0.175,
                west: -0.2,
            },
            tile_url: DEFAULT_TILE_URL.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeolocationOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    pub maximum_age: Duration,
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(60),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_base: String,
    pub map: MapConfig,
    pub geolocation: GeolocationOptions,
    pub route_style: RouteStyle,
}

impl Config {
    /// Reads `CAMPUS_NAV_*` variables, loading `.env` first when present.
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let defaults = MapConfig::default();

        let map = MapConfig {
            center: Coordinates::new(
                var_or("CAMPUS_NAV_CENTER_LAT", defaults.center.latitude)?,
                var_or("CAMPUS_NAV_CENTER_LON", defaults.center.longitude)?,
            ),
            default_zoom: var_or("CAMPUS_NAV_ZOOM", defaults.default_zoom)?,
            min_zoom: var_or("CAMPUS_NAV_MIN_ZOOM", defaults.min_zoom)?,
            max_zoom: var_or("CAMPUS_NAV_MAX_ZOOM", defaults.max_zoom)?,
            bounds: Bounds {
                north: var_or("CAMPUS_NAV_BOUNDS_NORTH", defaults.bounds.north)?,
                south: var_or("CAMPUS_NAV_BOUNDS_SOUTH", defaults.bounds.south)?,
                east: var_or("CAMPUS_NAV_BOUNDS_EAST", defaults.bounds.east)?,
                west: var_or("CAMPUS_NAV_BOUNDS_WEST", defaults.bounds.west)?,
            },
            tile_url: var_or("CAMPUS_NAV_TILE_URL", defaults.tile_url)?,
        };

        if map.min_zoom > map.max_zoom {
            return Err(config_error("CAMPUS_NAV_MIN_ZOOM"));
        }

        Ok(Self {
            api_base: var_or("CAMPUS_NAV_API_BASE", DEFAULT_API_BASE.to_string())?,
            map,
            geolocation: GeolocationOptions::default(),
            route_style: RouteStyle::default(),
        })
    }
}

/// Parses `CAMPUS_NAV_POSITION` ("lat,lon") if set.
pub fn fixed_position() -> Result<Option<Coordinates>, Error> {
    let raw = match env::var("CAMPUS_NAV_POSITION") {
        Ok(raw) => raw,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    parse_position(&raw)
        .map(Some)
        .ok_or_else(|| config_error("CAMPUS_NAV_POSITION"))
}

fn parse_position(raw: &str) -> Option<Coordinates> {
    let (lat, lon) = raw.split_once(',')?;

    Some(Coordinates::new(
        lat.trim().parse().ok()?,
        lon.trim().parse().ok()?,
    ))
}

fn var_or<T: FromStr>(key: &str, default: T) -> Result<T, Error> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| config_error(key)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err.into()),
    }
}

#[test]
fn parses_positions() {
    assert_eq!(
        parse_position("5.6484, -0.1864"),
        Some(Coordinates::new(5.6484, -0.1864))
    );
    assert_eq!(parse_position("5.6484"), None);
    assert_eq!(parse_position("north,-0.18"), None);
}

#[test]
fn unset_variables_fall_back_to_defaults() {
    assert_eq!(var_or("CAMPUS_NAV_TEST_UNSET_ZOOM", 16u8), Ok(16));
}

#[test]
fn malformed_variables_are_config_errors() {
    env::set_var("CAMPUS_NAV_TEST_BAD_ZOOM", "sixteen");
    let err = var_or("CAMPUS_NAV_TEST_BAD_ZOOM", 16u8).unwrap_err();
    assert_eq!(err.code, 4);
}
