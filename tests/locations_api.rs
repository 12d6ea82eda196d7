use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::json;

use campus_navigator::api::LocationSource;
use campus_navigator::config::Config;
use campus_navigator::console::{ConsoleGeolocator, ConsoleMap, ConsoleRouting};
use campus_navigator::engine::{load_locations, Navigator};
use campus_navigator::entities::LocationType;
use campus_navigator::external::HttpLocationSource;

async fn spawn(app: Router) -> String {
    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    let server = axum::Server::bind(&addr).serve(app.into_make_service());
    let addr = server.local_addr();

    tokio::spawn(server);

    format!("http://{}", addr)
}

fn ids<T: std::ops::Deref<Target = campus_navigator::entities::LocationRecord>>(
    records: impl IntoIterator<Item = T>,
) -> Vec<i64> {
    records.into_iter().map(|r| r.id).collect()
}

#[tokio::test]
async fn loads_records_from_backend() {
    let app = Router::new().route(
        "/api/locations",
        get(|| async {
            Json(json!([
                {
                    "id": 1,
                    "name": "Balme Library",
                    "description": "Main university library",
                    "latitude": 5.6484,
                    "longitude": -0.1864,
                    "type": "LIBRARY",
                    "createdAt": "2024-09-01T08:00:00",
                    "updatedAt": "2024-09-01T08:00:00"
                },
                {
                    "id": 24,
                    "name": "University Mosque",
                    "description": null,
                    "latitude": 5.6472,
                    "longitude": -0.1852,
                    "type": "MOSQUE"
                },
                {
                    "id": 40,
                    "name": "Night Market",
                    "latitude": 5.6461,
                    "longitude": -0.1839,
                    "type": "NIGHT_MARKET"
                }
            ]))
        }),
    );
    let base = spawn(app).await;

    let source = HttpLocationSource::new(&base);
    let records = source.fetch_locations().await.unwrap();

    assert_eq!(ids(records.iter()), vec![1, 24, 40]);
    assert_eq!(records[1].location_type, LocationType::Mosque);
    assert_eq!(records[1].description, None);
    assert_eq!(
        records[2].location_type,
        LocationType::Other("NIGHT_MARKET".into())
    );
}

#[tokio::test]
async fn server_error_falls_back_to_samples() {
    let app = Router::new().route(
        "/api/locations",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn(app).await;

    let source = HttpLocationSource::new(&base);
    assert!(source.fetch_locations().await.is_err());

    let records = load_locations(&source).await;
    assert_eq!(ids(records.iter()), vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[tokio::test]
async fn malformed_body_falls_back_to_samples() {
    let app = Router::new().route("/api/locations", get(|| async { "not json" }));
    let base = spawn(app).await;

    let records = load_locations(&HttpLocationSource::new(&base)).await;
    assert_eq!(records.len(), 8);
    assert_eq!(records[0].name, "Main Library");
}

#[tokio::test]
async fn unreachable_backend_falls_back_to_samples() {
    let addr = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();

    let records = load_locations(&HttpLocationSource::new(&format!("http://{}", addr))).await;
    assert_eq!(ids(records.iter()), vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[tokio::test]
async fn navigator_runs_on_fallback_data() {
    let app = Router::new().route(
        "/api/locations",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    let base = spawn(app).await;

    let mut navigator = Navigator::new(
        Config::default(),
        Box::new(ConsoleMap::default()),
        Box::new(ConsoleRouting::default()),
        Arc::new(ConsoleGeolocator::default()),
    );
    navigator
        .start(Arc::new(HttpLocationSource::new(&base)))
        .await
        .unwrap();

    navigator.search("hall");
    assert_eq!(ids(navigator.visible_locations()), vec![2, 3, 8]);

    navigator.search("");
    navigator.filter_by_type(Some(LocationType::ResidentialHall));
    assert_eq!(ids(navigator.visible_locations()), vec![3, 8]);
    assert_eq!(navigator.rendered_markers(), 2);
}
