use super::Navigator;

use crate::{
    api::{MapWidget, Marker, MarkerIcon, MarkerId, TileLayer},
    config::{FOCUS_ZOOM, TILE_ATTRIBUTION},
    entities::{LocationId, LocationRecord},
    error::{location_not_found_error, Error},
    views::PopupView,
};

pub(crate) fn location_marker(record: &LocationRecord) -> Marker {
    Marker {
        coordinates: record.coordinates(),
        icon: MarkerIcon {
            class_name: "custom-marker".into(),
            color: record.location_type.marker_color().into(),
            size: 24,
            anchor: 12,
        },
        popup: PopupView::for_location(record),
    }
}

/// Location markers currently on the map, in render order.
#[derive(Debug, Default)]
pub struct MarkerLayer {
    placed: Vec<(LocationId, MarkerId)>,
}

impl MarkerLayer {
    /// Replaces every placed marker with one marker per record.
    pub fn render<'a>(
        &mut self,
        map: &mut dyn MapWidget,
        records: impl IntoIterator<Item = &'a LocationRecord>,
    ) {
        self.clear(map);

        for record in records {
            let id = map.add_marker(location_marker(record));
            self.placed.push((record.id, id));
        }
    }

    pub fn clear(&mut self, map: &mut dyn MapWidget) {
        for (_, id) in self.placed.drain(..) {
            map.remove_marker(id);
        }
    }

    pub fn marker_for(&self, location: LocationId) -> Option<MarkerId> {
        self.placed
            .iter()
            .find(|(l, _)| *l == location)
            .map(|(_, m)| *m)
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

impl Navigator {
    pub(super) fn init_map(&mut self) -> Result<(), Error> {
        let map_config = &self.config.map;

        self.map.configure(map_config)?;
        self.map.add_tile_layer(TileLayer {
            url: map_config.tile_url.clone(),
            attribution: TILE_ATTRIBUTION.into(),
            min_zoom: map_config.min_zoom,
            max_zoom: map_config.max_zoom,
        })?;

        Ok(())
    }

    /// Redraws the markers for the visible subset.
    pub(super) fn render(&mut self) {
        let visible = self.criteria.apply(&self.locations);
        self.markers.render(self.map.as_mut(), visible);
    }

    pub fn rendered_markers(&self) -> usize {
        self.markers.len()
    }

    #[tracing::instrument(skip(self))]
    pub fn focus_location(&mut self, id: LocationId) -> Result<(), Error> {
        let record = self.find_location(id)?;
        let center = record.coordinates();

        self.map.set_view(center, FOCUS_ZOOM);
        if let Some(marker) = self.markers.marker_for(id) {
            self.map.open_popup(marker);
        }

        Ok(())
    }

    pub fn find_location(&self, id: LocationId) -> Result<&LocationRecord, Error> {
        self.locations
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| location_not_found_error(id))
    }

    pub fn zoom_in(&mut self) {
        self.map.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.map.zoom_out();
    }

    pub fn toggle_fullscreen(&mut self) {
        self.map.toggle_fullscreen();
    }
}

#[test]
fn render_is_idempotent() {
    use super::fakes::RecordingMap;

    let records = crate::fallback::locations();
    let mut map = RecordingMap::default();
    let mut layer = MarkerLayer::default();

    layer.render(&mut map, &records);
    layer.render(&mut map, &records);

    assert_eq!(map.markers().len(), 8);
    assert_eq!(layer.len(), 8);
    assert_eq!(map.removed(), 8);
}

#[test]
fn render_replaces_disjoint_sets() {
    use super::fakes::RecordingMap;

    let records = crate::fallback::locations();
    let mut map = RecordingMap::default();
    let mut layer = MarkerLayer::default();

    layer.render(&mut map, &records[..3]);
    layer.render(&mut map, &records[5..]);

    let titles: Vec<String> = map.markers().iter().map(|m| m.popup.title.clone()).collect();
    assert_eq!(titles, vec!["Main Gate", "Student Centre", "Volta Hall"]);
    assert_eq!(layer.marker_for(1), None);
    assert!(layer.marker_for(8).is_some());
}

#[test]
fn marker_color_follows_type() {
    let records = crate::fallback::locations();

    assert_eq!(location_marker(&records[2]).icon.color, "#f39c12");
    assert_eq!(location_marker(&records[0]).icon.color, "#e74c3c");
    assert_eq!(location_marker(&records[0]).popup.actions.len(), 2);
}
