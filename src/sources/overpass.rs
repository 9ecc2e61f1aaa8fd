//! OpenStreetMap Overpass API client
//!
//! Posts the region query built by [`RegionQueryBuilder`] and keeps only
//! elements that carry a name and a usable coordinate.

use crate::core::config::{Config, DEFAULT_OVERPASS_URL};
use crate::core::error::{Error, Result};
use crate::core::region::Coordinates;
use crate::search::query::RegionQueryBuilder;
use crate::search::{ElementKind, RawPoi};
use crate::sources::PoiSource;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<serde_json::Value>,
}

/// One element of the `elements` array
#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Present for ways and relations when the query asks for `out center`
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassElement {
    fn coordinates(&self) -> Option<Coordinates> {
        let (lat, lon) = match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => (lat, lon),
            (_, _, Some(center)) => (center.lat, center.lon),
            _ => return None,
        };
        Some(Coordinates::new(lat, lon)).filter(Coordinates::is_valid)
    }

    /// Convert to a [`RawPoi`], or `None` when name or coordinates are missing
    pub fn into_poi(self) -> Option<RawPoi> {
        let has_name = self
            .tags
            .get("name")
            .map_or(false, |name| !name.trim().is_empty());
        if !has_name {
            return None;
        }
        let coords = self.coordinates()?;
        Some(RawPoi {
            id: self.id,
            kind: self.kind,
            lat: coords.lat,
            lon: coords.lng,
            tags: self.tags,
        })
    }
}

/// Keep only well-formed, named, located elements; the rest are dropped silently
pub fn filter_elements(elements: Vec<serde_json::Value>) -> Vec<RawPoi> {
    elements
        .into_iter()
        .filter_map(|value| serde_json::from_value::<OverpassElement>(value).ok())
        .filter_map(OverpassElement::into_poi)
        .collect()
}

/// Overpass interpreter client
pub struct OverpassClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
    query_builder: RegionQueryBuilder,
}

impl OverpassClient {
    /// Create a client against the public interpreter
    pub fn new(query_builder: RegionQueryBuilder) -> Self {
        Self::with_config(query_builder, DEFAULT_OVERPASS_URL, REQUEST_TIMEOUT)
    }

    /// Create a client with custom endpoint and timeout
    pub fn with_config(query_builder: RegionQueryBuilder, endpoint: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(concat!("msearch/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            endpoint: endpoint.to_string(),
            timeout,
            query_builder,
        }
    }

    /// Use a preconfigured HTTP client (proxy, TLS or pool settings)
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn from_config(config: &Config, query_builder: RegionQueryBuilder) -> Self {
        Self::with_config(
            query_builder.with_timeout(config.overpass.query_timeout_secs),
            &config.overpass.endpoint,
            config.overpass.timeout(),
        )
    }

    pub fn query_builder(&self) -> &RegionQueryBuilder {
        &self.query_builder
    }

    /// POST a query and return the raw `elements` array
    async fn fetch(&self, query: &str) -> Result<Vec<serde_json::Value>> {
        let res = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/plain")
            .timeout(self.timeout)
            .body(query.to_string())
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Backend {
                service: "Overpass",
                message: format!("HTTP {} - {}", status, text),
            });
        }

        let body = res.text().await?;
        let response: OverpassResponse = serde_json::from_str(&body)?;
        Ok(response.elements)
    }
}

#[async_trait]
impl PoiSource for OverpassClient {
    async fn search_pois(&self, keyword: &str) -> Vec<RawPoi> {
        let query = self.query_builder.build(keyword);

        match self.fetch(&query).await {
            Ok(elements) => {
                let total = elements.len();
                let pois = filter_elements(elements);
                debug!(keyword, total, kept = pois.len(), "Overpass search completed");
                pois
            }
            Err(e) => {
                // Indistinguishable from "no results" for callers
                warn!(keyword, error = %e, "Overpass request failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::region::MIYAKO_BOUNDS;
    use crate::search::keywords::KeywordResolver;
    use crate::test_support::{local_client, serve};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde_json::json;

    fn builder() -> RegionQueryBuilder {
        RegionQueryBuilder::new(KeywordResolver::default(), MIYAKO_BOUNDS)
    }

    fn fixture_elements() -> serde_json::Value {
        json!([
            {"type": "node", "id": 1, "lat": 24.80, "lon": 125.28,
             "tags": {"name": "島カフェ", "amenity": "cafe"}},
            {"type": "node", "id": 2, "lat": 24.81, "lon": 125.29,
             "tags": {"amenity": "cafe"}},
            {"type": "node", "id": 3, "lat": 24.82, "lon": 125.30,
             "tags": {"name": "  ", "amenity": "cafe"}},
            {"type": "node", "id": 4, "lon": 125.30,
             "tags": {"name": "No latitude"}},
            {"type": "way", "id": 5, "center": {"lat": 24.75, "lon": 125.25},
             "tags": {"name": "Beach Parking"}},
            {"type": "relation", "id": 6, "tags": {"name": "No geometry"}},
            {"type": "node", "id": 7, "lat": 24.70, "lon": 125.20},
            {"type": "node", "lat": 24.70, "lon": 125.20, "tags": {"name": "No id"}},
            {"type": "node", "id": 9, "lat": 124.0, "lon": 125.20, "tags": {"name": "Bad lat"}}
        ])
    }

    fn fixture_vec() -> Vec<serde_json::Value> {
        match fixture_elements() {
            serde_json::Value::Array(items) => items,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_filter_keeps_only_named_located_elements() {
        let pois = filter_elements(fixture_vec());
        let ids: Vec<i64> = pois.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 5]);

        let way = &pois[1];
        assert_eq!(way.kind, ElementKind::Way);
        assert_eq!((way.lat, way.lon), (24.75, 125.25));

        for poi in &pois {
            assert!(!poi.name().is_empty());
            assert!(poi.coordinates().is_valid());
        }
    }

    #[tokio::test]
    async fn test_search_pois_posts_plain_text_query() {
        let app = Router::new().route(
            "/api/interpreter",
            post(|headers: HeaderMap, body: String| async move {
                let plain = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .map_or(false, |v| v.starts_with("text/plain"));
                if !plain || !body.contains("node[amenity=cafe]") || !body.contains("out center;") {
                    return (StatusCode::BAD_REQUEST, String::new());
                }
                let payload = json!({ "elements": fixture_elements() });
                (StatusCode::OK, payload.to_string())
            }),
        );
        let base = serve(app).await;

        let client = OverpassClient::with_config(
            builder(),
            &format!("{}/api/interpreter", base),
            Duration::from_secs(5),
        )
        .with_http_client(local_client());
        let pois = client.search_pois("カフェ").await;
        assert_eq!(pois.len(), 2);
        assert_eq!(pois[0].name(), "島カフェ");
    }

    #[tokio::test]
    async fn test_zero_elements() {
        let app = Router::new().route(
            "/",
            post(|| async { json!({ "version": 0.6, "elements": [] }).to_string() }),
        );
        let base = serve(app).await;

        let client = OverpassClient::with_config(builder(), &base, Duration::from_secs(5))
            .with_http_client(local_client());
        assert!(client.search_pois("レストラン").await.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_yields_empty() {
        let app = Router::new().route(
            "/",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited") }),
        );
        let base = serve(app).await;

        let client = OverpassClient::with_config(builder(), &base, Duration::from_secs(5))
            .with_http_client(local_client());
        assert!(client.search_pois("レストラン").await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_yields_empty() {
        let app = Router::new().route("/", post(|| async { "<html>busy</html>" }));
        let base = serve(app).await;

        let client = OverpassClient::with_config(builder(), &base, Duration::from_secs(5))
            .with_http_client(local_client());
        assert!(client.search_pois("レストラン").await.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_yields_empty() {
        let app = Router::new().route(
            "/",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                json!({ "elements": fixture_elements() }).to_string()
            }),
        );
        let base = serve(app).await;

        let client = OverpassClient::with_config(builder(), &base, Duration::from_millis(200))
            .with_http_client(local_client());
        assert!(client.search_pois("レストラン").await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_backend_yields_empty() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = OverpassClient::with_config(
            builder(),
            &format!("http://{}", addr),
            Duration::from_secs(2),
        )
        .with_http_client(local_client());
        assert!(client.search_pois("レストラン").await.is_empty());
    }
}
