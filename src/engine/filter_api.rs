use super::Navigator;

use crate::{
    entities::{Bounds, LocationRecord, LocationType},
    error::{current_location_unavailable_error, Error},
    filter::{self, FilterCriteria},
    views::{LocationListView, RouteSelectors},
};

impl Navigator {
    /// Sets the text criterion and redraws. The type criterion is kept.
    #[tracing::instrument(skip(self))]
    pub fn search(&mut self, query: &str) {
        self.criteria.set_query(query);
        self.refresh();
    }

    /// Sets the type criterion and redraws. The text criterion is kept.
    #[tracing::instrument(skip(self))]
    pub fn filter_by_type(&mut self, location_type: Option<LocationType>) {
        self.criteria.location_type = location_type;
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.refresh();
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn visible_locations(&self) -> Vec<&LocationRecord> {
        self.criteria.apply(&self.locations)
    }

    pub fn locations_list(&self) -> LocationListView {
        LocationListView::new(self.visible_locations())
    }

    /// Selectors always list the full set, whatever the active filter.
    pub fn route_selectors(&self) -> RouteSelectors {
        RouteSelectors::new(&self.locations)
    }

    /// The `limit` loaded locations closest to the user's last fix.
    pub fn nearby(&self, limit: usize) -> Result<Vec<&LocationRecord>, Error> {
        let here = self
            .user_location
            .as_ref()
            .ok_or_else(current_location_unavailable_error)?;

        Ok(filter::nearest(&self.locations, &here.coordinates, limit))
    }

    pub fn within(&self, bounds: &Bounds) -> Vec<&LocationRecord> {
        filter::within_bounds(&self.locations, bounds)
    }

    pub(super) fn refresh(&mut self) {
        self.render();
        tracing::debug!(
            visible = self.markers.len(),
            total = self.locations.len(),
            filtered = !self.criteria.is_empty(),
            "view refreshed"
        );
        if self.markers.is_empty() {
            tracing::debug!("no locations match");
        }
    }
}

#[cfg(test)]
fn visible_ids(navigator: &Navigator) -> Vec<i64> {
    navigator.visible_locations().iter().map(|l| l.id).collect()
}

#[tokio::test]
async fn search_then_type_filter_compose() {
    let (mut navigator, harness) = super::fakes::started_navigator().await;

    navigator.search("hall");
    assert_eq!(visible_ids(&navigator), vec![2, 3, 8]);
    assert_eq!(harness.map.lock().unwrap().markers().len(), 3);

    navigator.filter_by_type(Some(LocationType::ResidentialHall));
    assert_eq!(visible_ids(&navigator), vec![3, 8]);
    assert_eq!(harness.map.lock().unwrap().markers().len(), 2);

    navigator.search("");
    assert_eq!(visible_ids(&navigator), vec![3, 8]);

    navigator.clear_filters();
    assert_eq!(visible_ids(&navigator).len(), 8);
    assert_eq!(harness.map.lock().unwrap().markers().len(), 8);
}

#[tokio::test]
async fn list_tracks_visible_subset() {
    let (mut navigator, _) = super::fakes::started_navigator().await;

    navigator.search("observatory");
    assert!(navigator.locations_list().is_empty());
    assert!(navigator.locations_list().to_html().contains("No locations found"));
    assert_eq!(navigator.route_selectors().to.len(), 9);
}

#[tokio::test]
async fn nearby_needs_a_fix() {
    use super::fakes::{position, started_navigator_with, StubGeolocator};

    let geolocator = StubGeolocator::new(vec![Ok(position(5.6480, -0.1860))]);
    let (mut navigator, _) = started_navigator_with(geolocator).await;

    assert_eq!(
        navigator.nearby(2).unwrap_err(),
        current_location_unavailable_error()
    );

    navigator.locate().await.unwrap();
    let ids: Vec<i64> = navigator.nearby(2).unwrap().iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![7, 1]);
}

#[tokio::test]
async fn within_ignores_active_filter() {
    let (mut navigator, _) = super::fakes::started_navigator().await;
    navigator.search("hall");

    let north_campus = Bounds {
        north: 5.66,
        south: 5.6495,
        east: -0.18,
        west: -0.2,
    };
    let ids: Vec<i64> = navigator.within(&north_campus).iter().map(|l| l.id).collect();

    assert_eq!(ids, vec![4, 6]);
}
