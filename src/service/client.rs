use crate::data::geojson::GeoJson;
use crate::service::description::ServiceDescription;
use crate::traits::FeatureService;
use crate::{Result, ViewerError};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;

/// Shared HTTP client with a custom User-Agent so that public feature
/// services don't reject the request. Building the client once avoids the
/// cost of TLS and connection pool setup for every layer.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent("layerdeck/0.1 (+https://github.com/layerdeck/layerdeck)")
        .build()
        .unwrap_or_default()
});

/// Production [`FeatureService`] backed by the shared reqwest client.
///
/// No retries anywhere: a failed description fetch aborts the refresh, a
/// failed feature query degrades its one layer.
#[derive(Debug, Clone, Default)]
pub struct ServiceClient;

impl ServiceClient {
    pub fn new() -> Self {
        Self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        log::debug!("fetch {}", url);
        let response = HTTP_CLIENT.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ViewerError::Layer(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl FeatureService for ServiceClient {
    async fn fetch_description(&self, service_url: &str) -> Result<ServiceDescription> {
        let url = format!("{}?f=json", service_url.trim_end_matches('/'));
        self.get_json::<ServiceDescription>(&url)
            .await
            .map_err(|e| ViewerError::ServiceUnavailable(e.to_string()))
    }

    async fn fetch_features(&self, query_url: &str) -> Result<GeoJson> {
        self.get_json::<GeoJson>(query_url).await
    }
}
