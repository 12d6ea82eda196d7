use super::Navigator;

use crate::{
    entities::{Coordinates, Endpoint, LocationId, RouteRequest},
    error::{current_location_unavailable_error, missing_route_endpoint_error, Error},
};

impl Navigator {
    pub fn select_route_from(&mut self, from: Option<Endpoint>) {
        self.selection.from = from;
    }

    pub fn select_route_to(&mut self, to: Option<LocationId>) {
        self.selection.to = to;
    }

    /// Resolves the selected endpoints and draws the route between them.
    /// Nothing reaches the routing widget unless both ends resolve.
    #[tracing::instrument(skip(self), fields(selection = ?self.selection))]
    pub fn calculate_route(&mut self) -> Result<&RouteRequest, Error> {
        let (from, to) = match (self.selection.from, self.selection.to) {
            (Some(from), Some(to)) => (from, to),
            _ => return Err(missing_route_endpoint_error()),
        };

        let from = self.resolve(from)?;
        let to = self.find_location(to)?.coordinates();

        self.plan_route(from, to)
    }

    /// Replaces any drawn route with one from `from` to `to`.
    pub fn plan_route(&mut self, from: Coordinates, to: Coordinates) -> Result<&RouteRequest, Error> {
        self.clear_route();

        let route = RouteRequest::new(from, to, self.config.route_style.clone());
        let control = self.routing.add_route(&route)?;

        tracing::info!(route_id = %route.id, "route displayed");

        let (route, _) = self.current_route.insert((route, control));
        Ok(route)
    }

    pub fn clear_route(&mut self) {
        if let Some((route, control)) = self.current_route.take() {
            self.routing.remove_route(control);
            tracing::debug!(route_id = %route.id, "route cleared");
        }
    }

    /// Routes to `id`, starting from the user's position when one is known.
    #[tracing::instrument(skip(self))]
    pub fn get_directions_to(&mut self, id: LocationId) -> Result<&RouteRequest, Error> {
        self.selection.to = Some(id);
        if self.user_location.is_some() {
            self.selection.from = Some(Endpoint::Current);
        }

        self.calculate_route()
    }

    fn resolve(&self, endpoint: Endpoint) -> Result<Coordinates, Error> {
        match endpoint {
            Endpoint::Current => self
                .user_location
                .as_ref()
                .map(|u| u.coordinates)
                .ok_or_else(current_location_unavailable_error),
            Endpoint::Location(id) => Ok(self.find_location(id)?.coordinates()),
        }
    }
}

#[tokio::test]
async fn route_from_current_without_fix_fails() {
    let (mut navigator, harness) = super::fakes::started_navigator().await;

    navigator.select_route_from(Some(Endpoint::Current));
    navigator.select_route_to(Some(3));

    let err = navigator.calculate_route().unwrap_err();
    assert_eq!(err, current_location_unavailable_error());
    assert!(harness.routing.lock().unwrap().routes.is_empty());
    assert!(navigator.current_route().is_none());
}

#[tokio::test]
async fn route_needs_both_endpoints() {
    let (mut navigator, harness) = super::fakes::started_navigator().await;

    navigator.select_route_to(Some(3));

    let err = navigator.calculate_route().unwrap_err();
    assert_eq!(err.code, 101);
    assert!(harness.routing.lock().unwrap().routes.is_empty());
}

#[tokio::test]
async fn unknown_location_is_rejected() {
    let (mut navigator, harness) = super::fakes::started_navigator().await;

    navigator.select_route_from(Some(Endpoint::Location(1)));
    navigator.select_route_to(Some(99));

    assert_eq!(navigator.calculate_route().unwrap_err().code, 103);
    assert!(harness.routing.lock().unwrap().routes.is_empty());
}

#[tokio::test]
async fn new_route_supersedes_previous() {
    let (mut navigator, harness) = super::fakes::started_navigator().await;

    navigator.select_route_from(Some(Endpoint::Location(1)));
    navigator.select_route_to(Some(8));
    let first = navigator.calculate_route().unwrap().id;

    navigator.select_route_to(Some(6));
    let second = navigator.calculate_route().unwrap().clone();

    let routing = harness.routing.lock().unwrap();
    assert_eq!(routing.routes.len(), 1);
    assert_eq!(routing.removed.len(), 1);
    assert_ne!(first, second.id);
    assert_eq!(second.from, Coordinates::new(5.6484, -0.1864));
    assert_eq!(second.to, Coordinates::new(5.6520, -0.1890));
    assert!(!routing.routes[0].1.show_endpoint_markers);
}

#[tokio::test]
async fn clear_route_removes_control() {
    let (mut navigator, harness) = super::fakes::started_navigator().await;

    navigator.select_route_from(Some(Endpoint::Location(2)));
    navigator.select_route_to(Some(3));
    navigator.calculate_route().unwrap();
    navigator.clear_route();
    navigator.clear_route();

    assert!(navigator.current_route().is_none());
    let routing = harness.routing.lock().unwrap();
    assert!(routing.routes.is_empty());
    assert_eq!(routing.removed.len(), 1);
}

#[tokio::test]
async fn directions_keep_previous_start_without_fix() {
    let (mut navigator, _) = super::fakes::started_navigator().await;

    navigator.select_route_from(Some(Endpoint::Location(7)));
    let route = navigator.get_directions_to(8).unwrap();

    assert_eq!(route.from, Coordinates::new(5.6480, -0.1860));
    assert_eq!(navigator.selection().to, Some(8));
}
