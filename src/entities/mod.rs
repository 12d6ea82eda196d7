mod location;
mod location_type;
mod route;

pub use location::{Bounds, Coordinates, LocationId, LocationRecord, UserLocation};
pub use location_type::{LocationType, DEFAULT_MARKER_COLOR};
pub use route::{Endpoint, RouteRequest, RouteSelection, RouteStyle};
