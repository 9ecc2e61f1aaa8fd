//! Foursquare Places API client
//!
//! Looks up one venue by name near a coordinate to borrow its rating,
//! tip count and price tier. Every failure collapses to "no match".

use crate::core::config::{RatingsConfig, DEFAULT_FOURSQUARE_URL};
use crate::core::error::{Error, Result};
use crate::sources::{VenueLookup, VenueMatch};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_RADIUS: u32 = 1000;

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    results: Vec<VenueMatch>,
}

/// Foursquare places search client
pub struct FoursquareClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
    radius: u32,
}

impl FoursquareClient {
    /// Create a client against the public API
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_config(DEFAULT_FOURSQUARE_URL, api_key, REQUEST_TIMEOUT, DEFAULT_RADIUS)
    }

    /// Create a client with custom endpoint, timeout and search radius
    pub fn with_config(endpoint: &str, api_key: Option<String>, timeout: Duration, radius: u32) -> Self {
        let client = Client::builder()
            .user_agent(concat!("msearch/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            endpoint: endpoint.to_string(),
            api_key,
            timeout,
            radius,
        }
    }

    /// Use a preconfigured HTTP client (proxy, TLS or pool settings)
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Create a client from config, reading the credential from the environment
    pub fn from_config(config: &RatingsConfig) -> Self {
        Self::with_config(
            &config.endpoint,
            config.api_key(),
            config.timeout(),
            config.radius,
        )
    }

    /// Single lookup; `Ok(None)` when the backend has no venue nearby
    async fn lookup(&self, api_key: &str, name: &str, lat: f64, lon: f64) -> Result<Option<VenueMatch>> {
        let ll = format!("{},{}", lat, lon);
        let radius = self.radius.to_string();

        let res = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("query", name),
                ("ll", ll.as_str()),
                ("radius", radius.as_str()),
                ("limit", "1"),
            ])
            .header(AUTHORIZATION, api_key)
            .header(ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Backend {
                service: "Foursquare",
                message: format!("HTTP {} - {}", status, text),
            });
        }

        let body = res.text().await?;
        let response: PlacesResponse = serde_json::from_str(&body)?;
        Ok(response.results.into_iter().next())
    }
}

#[async_trait]
impl VenueLookup for FoursquareClient {
    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search_venue(&self, name: &str, lat: f64, lon: f64) -> Option<VenueMatch> {
        let api_key = self.api_key.as_deref()?;

        match self.lookup(api_key, name, lat, lon).await {
            Ok(Some(venue)) => {
                debug!(query = name, matched = %venue.name, rating = ?venue.rating, "Venue matched");
                Some(venue)
            }
            Ok(None) => {
                debug!(query = name, "No venue nearby");
                None
            }
            Err(e) => {
                debug!(query = name, error = %e, "Venue lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{local_client, serve};
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    const KEY: &str = "fsq-test-key";

    async fn places(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map_or(false, |v| v == KEY);
        if !authorized {
            return (StatusCode::UNAUTHORIZED, Json(json!({"message": "invalid key"})));
        }

        let expected = [
            ("ll", "24.8,125.28"),
            ("radius", "1000"),
            ("limit", "1"),
        ];
        if expected
            .iter()
            .any(|(k, v)| params.get(*k).map(String::as_str) != Some(*v))
        {
            return (StatusCode::BAD_REQUEST, Json(json!({"message": "bad params"})));
        }

        let body = match params.get("query").map(String::as_str) {
            Some("島カフェ") => json!({"results": [
                {"fsq_id": "abc", "name": "Shima Cafe", "rating": 4.5,
                 "stats": {"total_tips": 12}, "price": 2}
            ]}),
            Some("Plain Venue") => json!({"results": [{"name": "Plain Venue"}]}),
            Some("boom") => return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))),
            _ => json!({"results": []}),
        };
        (StatusCode::OK, Json(body))
    }

    async fn client(api_key: Option<&str>) -> FoursquareClient {
        let base = serve(Router::new().route("/places/search", get(places))).await;
        FoursquareClient::with_config(
            &format!("{}/places/search", base),
            api_key.map(String::from),
            Duration::from_secs(5),
            1000,
        )
        .with_http_client(local_client())
    }

    #[tokio::test]
    async fn test_match_with_rating_tips_and_price() {
        let fsq = client(Some(KEY)).await;
        let venue = fsq.search_venue("島カフェ", 24.8, 125.28).await.unwrap();
        assert_eq!(venue.name, "Shima Cafe");
        assert_eq!(venue.rating, Some(4.5));
        assert_eq!(venue.reviews_count(), 12);
        assert_eq!(venue.price, Some(2));
    }

    #[tokio::test]
    async fn test_match_without_optional_fields() {
        let fsq = client(Some(KEY)).await;
        let venue = fsq.search_venue("Plain Venue", 24.8, 125.28).await.unwrap();
        assert_eq!(venue.rating, None);
        assert_eq!(venue.reviews_count(), 0);
        assert_eq!(venue.price, None);
    }

    #[tokio::test]
    async fn test_no_results_is_none() {
        let fsq = client(Some(KEY)).await;
        assert!(fsq.search_venue("Nowhere", 24.8, 125.28).await.is_none());
    }

    #[tokio::test]
    async fn test_errors_are_none() {
        let fsq = client(Some(KEY)).await;
        assert!(fsq.search_venue("boom", 24.8, 125.28).await.is_none());

        let wrong_key = client(Some("wrong")).await;
        assert!(wrong_key.search_venue("島カフェ", 24.8, 125.28).await.is_none());
    }

    #[tokio::test]
    async fn test_without_credentials_never_calls_backend() {
        let fsq = FoursquareClient::with_config(
            "http://127.0.0.1:9/unused",
            None,
            Duration::from_secs(5),
            1000,
        );
        assert!(!fsq.has_credentials());
        assert!(fsq.search_venue("島カフェ", 24.8, 125.28).await.is_none());
    }
}
