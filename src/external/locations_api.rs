use async_trait::async_trait;

use crate::{
    api::LocationSource,
    entities::LocationRecord,
    error::{upstream_error, Error},
};

pub const LOCATIONS_PATH: &str = "/api/locations";

/// Fetches records from the campus backend over HTTP.
#[derive(Clone, Debug)]
pub struct HttpLocationSource {
    client: reqwest::Client,
    url: String,
}

impl HttpLocationSource {
    pub fn new(api_base: &str) -> Self {
        Self::with_client(reqwest::Client::new(), api_base)
    }

    pub fn with_client(client: reqwest::Client, api_base: &str) -> Self {
        Self {
            client,
            url: format!("{}{}", api_base.trim_end_matches('/'), LOCATIONS_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LocationSource for HttpLocationSource {
    #[tracing::instrument(skip(self))]
    async fn fetch_locations(&self) -> Result<Vec<LocationRecord>, Error> {
        let res = self.client.get(&self.url).send().await?;

        if !res.status().is_success() {
            tracing::debug!(url = %self.url, status = res.status().as_u16(), "locations request rejected");
            return Err(upstream_error());
        }

        let locations: Vec<LocationRecord> = res.json().await?;

        Ok(locations)
    }
}

#[test]
fn joins_base_and_path() {
    assert_eq!(
        HttpLocationSource::new("http://localhost:8080/").url(),
        "http://localhost:8080/api/locations"
    );
    assert_eq!(
        HttpLocationSource::new("https://maps.example.edu").url(),
        "https://maps.example.edu/api/locations"
    );
}
