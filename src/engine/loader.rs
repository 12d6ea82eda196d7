use crate::{
    api::LocationSource,
    entities::LocationRecord,
    fallback,
};

/// Fetches the location set, substituting the sample records on any failure.
/// Never fails.
#[tracing::instrument(skip_all)]
pub async fn load_locations(source: &(dyn LocationSource + Send + Sync)) -> Vec<LocationRecord> {
    match source.fetch_locations().await {
        Ok(locations) => {
            tracing::debug!(count = locations.len(), "locations loaded");
            locations
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load locations, using sample data");
            fallback::locations()
        }
    }
}

#[test]
fn failing_source_yields_fallback() {
    use super::fakes::StaticSource;
    use tokio_test::block_on;

    let locations = block_on(load_locations(&StaticSource::failing()));
    let ids: Vec<i64> = locations.iter().map(|l| l.id).collect();

    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(locations, fallback::locations());
}

#[test]
fn successful_source_is_used_verbatim() {
    use super::fakes::StaticSource;
    use crate::entities::LocationType;
    use tokio_test::block_on;

    let records = vec![LocationRecord::new(
        31,
        "Pent Bus Stop",
        "Main bus stop for university transport",
        5.6475,
        -0.1855,
        LocationType::BusStop,
    )];

    let locations = block_on(load_locations(&StaticSource::ok(records.clone())));

    assert_eq!(locations, records);
}
