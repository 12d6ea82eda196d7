use serde::{Deserialize, Serialize};

use crate::entities::{Bounds, Coordinates, LocationRecord, LocationType};

/// Active search state. Both criteria apply together.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub query: Option<String>,
    pub location_type: Option<LocationType>,
}

impl FilterCriteria {
    pub fn with_query(mut self, query: &str) -> Self {
        self.set_query(query);
        self
    }

    pub fn with_type(mut self, location_type: Option<LocationType>) -> Self {
        self.location_type = location_type;
        self
    }

    /// Blank queries clear the text criterion.
    pub fn set_query(&mut self, query: &str) {
        let query = query.trim();
        self.query = if query.is_empty() {
            None
        } else {
            Some(query.to_string())
        };
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.location_type.is_none()
    }

    pub fn matches(&self, record: &LocationRecord) -> bool {
        let text = match &self.query {
            Some(query) => record.matches_text(&query.to_lowercase()),
            None => true,
        };
        let kind = match &self.location_type {
            Some(t) => &record.location_type == t,
            None => true,
        };

        text && kind
    }

    pub fn apply<'a>(&self, records: &'a [LocationRecord]) -> Vec<&'a LocationRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

pub fn search<'a>(records: &'a [LocationRecord], query: &str) -> Vec<&'a LocationRecord> {
    FilterCriteria::default().with_query(query).apply(records)
}

pub fn filter_by_type<'a>(
    records: &'a [LocationRecord],
    location_type: Option<&LocationType>,
) -> Vec<&'a LocationRecord> {
    FilterCriteria::default()
        .with_type(location_type.cloned())
        .apply(records)
}

pub fn within_bounds<'a>(records: &'a [LocationRecord], bounds: &Bounds) -> Vec<&'a LocationRecord> {
    records
        .iter()
        .filter(|r| bounds.contains(&r.coordinates()))
        .collect()
}

/// Closest records first. Ties keep their input order.
pub fn nearest<'a>(
    records: &'a [LocationRecord],
    point: &Coordinates,
    limit: usize,
) -> Vec<&'a LocationRecord> {
    let mut ranked: Vec<(f64, &LocationRecord)> = records
        .iter()
        .map(|r| (r.coordinates().planar_distance(point), r))
        .collect();

    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.into_iter().take(limit).map(|(_, r)| r).collect()
}

#[cfg(test)]
fn ids(records: &[&LocationRecord]) -> Vec<i64> {
    records.iter().map(|r| r.id).collect()
}

#[test]
fn hall_search_over_fallback() {
    let records = crate::fallback::locations();

    assert_eq!(ids(&search(&records, "hall")), vec![2, 3, 8]);
    assert_eq!(ids(&search(&records, "  HALL ")), vec![2, 3, 8]);
}

#[test]
fn search_matches_description() {
    let records = crate::fallback::locations();

    // "Balme" only appears in the Main Library description.
    assert_eq!(ids(&search(&records, "balme")), vec![1]);
    assert!(search(&records, "observatory").is_empty());
}

#[test]
fn empty_query_is_identity() {
    let records = crate::fallback::locations();

    assert_eq!(ids(&search(&records, "")), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(ids(&search(&records, "   ")), vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn residential_type_over_fallback() {
    let records = crate::fallback::locations();

    assert_eq!(
        ids(&filter_by_type(&records, Some(&LocationType::ResidentialHall))),
        vec![3, 8]
    );
    assert_eq!(ids(&filter_by_type(&records, None)).len(), 8);
    assert!(filter_by_type(&records, Some(&LocationType::Chapel)).is_empty());
}

#[test]
fn criteria_compose() {
    let records = crate::fallback::locations();
    let criteria = FilterCriteria::default()
        .with_query("hall")
        .with_type(Some(LocationType::ResidentialHall));

    assert_eq!(ids(&criteria.apply(&records)), vec![3, 8]);

    let criteria = criteria.with_type(Some(LocationType::Auditorium));
    assert_eq!(ids(&criteria.apply(&records)), vec![2]);
}

#[test]
fn nearest_orders_by_distance() {
    let records = crate::fallback::locations();
    // Sitting on Student Centre (7); Main Library (1) is next door.
    let here = Coordinates::new(5.6480, -0.1860);

    assert_eq!(ids(&nearest(&records, &here, 2)), vec![7, 1]);
    assert_eq!(nearest(&records, &here, 100).len(), 8);
}

#[test]
fn bounds_filter() {
    let records = crate::fallback::locations();
    let north_campus = Bounds {
        north: 5.66,
        south: 5.6495,
        east: -0.18,
        west: -0.2,
    };

    assert_eq!(ids(&within_bounds(&records, &north_campus)), vec![4, 6]);
}
