pub mod locations_api;

pub use locations_api::HttpLocationSource;
