mod filter_api;
mod loader;
mod location_api;
mod map_api;
mod route_api;

#[cfg(test)]
pub(crate) mod fakes;

pub use loader::load_locations;
pub use map_api::MarkerLayer;

use crate::{
    api::{ControlId, DynGeolocator, DynMap, DynRouting, DynSource, MarkerId},
    config::Config,
    entities::{LocationRecord, RouteRequest, RouteSelection, UserLocation},
    error::{initialization_error, Error},
    filter::FilterCriteria,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Initializing,
    Ready,
}

/// The campus map controller. Built once at startup and handed to whatever
/// drives it; every user action goes through a `&mut self` method.
pub struct Navigator {
    config: Config,
    map: DynMap,
    routing: DynRouting,
    geolocator: DynGeolocator,
    state: State,
    locations: Vec<LocationRecord>,
    criteria: FilterCriteria,
    markers: MarkerLayer,
    user_location: Option<UserLocation>,
    user_marker: Option<MarkerId>,
    current_route: Option<(RouteRequest, ControlId)>,
    selection: RouteSelection,
}

impl Navigator {
    pub fn new(
        config: Config,
        map: DynMap,
        routing: DynRouting,
        geolocator: DynGeolocator,
    ) -> Self {
        Self {
            config,
            map,
            routing,
            geolocator,
            state: State::Initializing,
            locations: vec![],
            criteria: FilterCriteria::default(),
            markers: MarkerLayer::default(),
            user_location: None,
            user_marker: None,
            current_route: None,
            selection: RouteSelection::default(),
        }
    }

    /// Map setup, location load, first render. A map failure is reported as
    /// an initialization error but leaves the navigator usable.
    #[tracing::instrument(name = "Navigator::start", skip_all)]
    pub async fn start(&mut self, source: DynSource) -> Result<(), Error> {
        if let Err(err) = self.init_map() {
            tracing::error!(error = %err, "map initialization failed");
            return Err(initialization_error());
        }

        self.locations = load_locations(source.as_ref()).await;
        self.refresh();
        self.state = State::Ready;

        tracing::info!(count = self.locations.len(), "navigator ready");

        Ok(())
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn locations(&self) -> &[LocationRecord] {
        &self.locations
    }

    pub fn user_location(&self) -> Option<&UserLocation> {
        self.user_location.as_ref()
    }

    pub fn current_route(&self) -> Option<&RouteRequest> {
        self.current_route.as_ref().map(|(route, _)| route)
    }

    pub fn selection(&self) -> &RouteSelection {
        &self.selection
    }
}

#[tokio::test]
async fn start_renders_sample_markers() {
    let (navigator, harness) = fakes::started_navigator().await;

    assert_eq!(navigator.state(), State::Ready);
    assert_eq!(navigator.locations().len(), 8);

    let map = harness.map.lock().unwrap();
    assert!(map.configured.is_some());
    assert_eq!(map.layers.len(), 1);
    assert_eq!(map.layers[0].min_zoom, 14);
    assert_eq!(map.markers().len(), 8);
}

#[tokio::test]
async fn map_failure_reports_initialization_error() {
    use std::sync::Arc;

    let (mut navigator, harness) =
        fakes::navigator_with(Config::default(), fakes::StubGeolocator::default());
    harness.map.lock().unwrap().fail_configure = true;

    let err = navigator
        .start(Arc::new(fakes::StaticSource::failing()))
        .await
        .unwrap_err();

    assert_eq!(err, initialization_error());
    assert_eq!(navigator.state(), State::Initializing);
    assert!(harness.map.lock().unwrap().markers().is_empty());
}

#[tokio::test]
async fn focus_opens_popup_when_marker_is_placed() {
    use crate::config::FOCUS_ZOOM;
    use crate::entities::Coordinates;

    let (mut navigator, harness) = fakes::started_navigator().await;

    navigator.focus_location(3).unwrap();
    {
        let map = harness.map.lock().unwrap();
        let opened = map.marker(map.popups[0]).unwrap();
        assert_eq!(opened.popup.title, "Commonwealth Hall");
        assert_eq!(
            map.views.last(),
            Some(&(Coordinates::new(5.6475, -0.1850), FOCUS_ZOOM))
        );
    }

    navigator.search("library");
    navigator.focus_location(3).unwrap();
    assert_eq!(harness.map.lock().unwrap().popups.len(), 1);
    assert_eq!(navigator.focus_location(77).unwrap_err().code, 103);
}
