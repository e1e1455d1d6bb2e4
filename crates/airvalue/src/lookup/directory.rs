//! Station directory access.
//!
//! [`StationDirectory`] is the seam between the lookup flow and the network.
//! [`WaqiDirectory`] talks to the WAQI search API:
//!
//! ```text
//! GET {endpoint}?token={token}&keyword={keyword}
//!
//! { "status": "ok", "data": [ { "station": { "name": "..." } }, ... ] }
//! ```
//!
//! On failure WAQI answers `{ "status": "error", "data": "<message>" }`.

use serde::Deserialize;
use tracing::{debug, trace};

use super::redact::redact_token;
use crate::config::Config;
use crate::error::{Error, Result};

/// A searchable directory of air-quality monitoring stations.
#[async_trait::async_trait]
pub trait StationDirectory: Send + Sync {
    /// Search for stations matching `keyword`.
    ///
    /// Returns display names in the order the directory ranks them.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be reached or its answer
    /// cannot be understood.
    async fn search(&self, keyword: &str) -> Result<Vec<String>>;
}

/// Raw search envelope.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    status: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct StationEntry {
    station: Station,
}

#[derive(Debug, Deserialize)]
struct Station {
    name: String,
}

/// Extract station names from a search response body.
///
/// # Errors
///
/// Returns [`Error::Json`] if the body is not a search response and
/// [`Error::UpstreamRejected`] if its status is not `"ok"`.
pub fn parse_search_response(keyword: &str, body: &str) -> Result<Vec<String>> {
    let response: SearchResponse = serde_json::from_str(body)?;

    if response.status != "ok" {
        let message = response
            .data
            .as_str()
            .map_or_else(|| format!("status was '{}'", response.status), str::to_string);
        return Err(Error::upstream_rejected(keyword, message));
    }

    if response.data.is_null() {
        return Ok(Vec::new());
    }

    let entries: Vec<StationEntry> = serde_json::from_value(response.data)?;
    Ok(entries.into_iter().map(|entry| entry.station.name).collect())
}

/// HTTP client for the WAQI station search API.
#[derive(Debug, Clone)]
pub struct WaqiDirectory {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl WaqiDirectory {
    /// Create a directory client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("airvalue/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let token = config
            .lookup
            .token
            .as_ref()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Ok(Self {
            client,
            endpoint: config.lookup.endpoint.clone(),
            token,
        })
    }

    /// The configured search endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the search request for `keyword`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingToken`] without a token, or an HTTP error if
    /// the endpoint is not a valid URL.
    pub fn request(&self, keyword: &str) -> Result<reqwest::Request> {
        let token = self.token.as_deref().ok_or(Error::MissingToken)?;
        let request = self
            .client
            .get(&self.endpoint)
            .query(&[("token", token), ("keyword", keyword)])
            .build()?;
        Ok(request)
    }
}

#[async_trait::async_trait]
impl StationDirectory for WaqiDirectory {
    async fn search(&self, keyword: &str) -> Result<Vec<String>> {
        let request = self.request(keyword)?;
        debug!(url = %redact_token(request.url().as_str()), "Searching station directory");

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream_rejected(keyword, format!("HTTP {status}")));
        }

        let body = response.text().await?;
        trace!(bytes = body.len(), "Station directory responded");
        parse_search_response(keyword, &body)
    }
}

/// In-memory directory for tests.
#[cfg(test)]
pub(crate) mod fake {
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::StationDirectory;
    use crate::error::{Error, Result};

    #[derive(Debug, Default)]
    pub(crate) struct FakeDirectory {
        stations: HashMap<String, Vec<String>>,
        failing: HashSet<String>,
        calls: AtomicUsize,
    }

    impl FakeDirectory {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with(mut self, keyword: &str, names: &[&str]) -> Self {
            self.stations.insert(
                keyword.to_string(),
                names.iter().map(|name| (*name).to_string()).collect(),
            );
            self
        }

        pub(crate) fn failing(mut self, keyword: &str) -> Self {
            self.failing.insert(keyword.to_string());
            self
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl StationDirectory for FakeDirectory {
        async fn search(&self, keyword: &str) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.contains(keyword) {
                return Err(Error::upstream_rejected(keyword, "simulated outage"));
            }
            Ok(self.stations.get(keyword).cloned().unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::lookup::{AreaLookup, LookupOutcome};

    /// Serve a single canned HTTP response on a local port and return the
    /// search endpoint pointing at it.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{addr}/search/")
    }

    fn config_with_token(endpoint: &str, token: Option<&str>) -> Config {
        let mut config = Config::default();
        config.lookup.endpoint = endpoint.to_string();
        config.lookup.token = token.map(str::to_string);
        config.lookup.timeout_secs = 2;
        config
    }

    #[test]
    fn test_parse_ok_response_preserves_order() {
        let body = r#"{
            "status": "ok",
            "data": [
                {"uid": 1, "aqi": "152", "station": {"name": "Anand Vihar, Delhi", "geo": [28.6, 77.3]}},
                {"uid": 2, "aqi": "98", "station": {"name": "ITO, Delhi"}},
                {"uid": 3, "aqi": "-", "station": {"name": "Anand Vihar, Delhi"}}
            ]
        }"#;

        let names = parse_search_response("delhi", body).unwrap();
        assert_eq!(
            names,
            vec!["Anand Vihar, Delhi", "ITO, Delhi", "Anand Vihar, Delhi"]
        );
    }

    #[test]
    fn test_parse_ok_empty_data() {
        let body = r#"{"status": "ok", "data": []}"#;
        assert!(parse_search_response("zzz", body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_ok_missing_data() {
        let body = r#"{"status": "ok"}"#;
        assert!(parse_search_response("zzz", body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_error_status_uses_message() {
        let body = r#"{"status": "error", "data": "Invalid key"}"#;
        let err = parse_search_response("delhi", body).unwrap_err();
        assert!(matches!(err, Error::UpstreamRejected { .. }));
        assert!(err.to_string().contains("Invalid key"));
    }

    #[test]
    fn test_parse_error_status_without_message() {
        let body = r#"{"status": "nug", "data": {"code": 7}}"#;
        let err = parse_search_response("delhi", body).unwrap_err();
        assert!(err.to_string().contains("status was 'nug'"));
    }

    #[test]
    fn test_parse_non_json_body() {
        let err = parse_search_response("delhi", "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_parse_malformed_entries() {
        let body = r#"{"status": "ok", "data": [{"uid": 1}]}"#;
        let err = parse_search_response("delhi", body).unwrap_err();
        assert!(err.is_lookup_failure());
    }

    #[test]
    fn test_request_encodes_keyword() {
        let config = config_with_token("https://api.waqi.info/search/", Some("abc123"));
        let directory = WaqiDirectory::from_config(&config).unwrap();

        let request = directory.request("new delhi & co").unwrap();
        let pairs: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(request.url().path(), "/search/");
        assert_eq!(
            pairs,
            vec![
                ("token".to_string(), "abc123".to_string()),
                ("keyword".to_string(), "new delhi & co".to_string()),
            ]
        );
    }

    #[test]
    fn test_request_without_token() {
        let config = config_with_token("https://api.waqi.info/search/", None);
        let directory = WaqiDirectory::from_config(&config).unwrap();

        assert!(matches!(directory.request("delhi"), Err(Error::MissingToken)));
    }

    #[test]
    fn test_blank_token_treated_as_missing() {
        let config = config_with_token("https://api.waqi.info/search/", Some("  "));
        let directory = WaqiDirectory::from_config(&config).unwrap();

        assert!(matches!(directory.request("delhi"), Err(Error::MissingToken)));
    }

    #[tokio::test]
    async fn test_search_unreachable_endpoint() {
        // Port 9 (discard) is not expected to accept connections
        let config = config_with_token("http://127.0.0.1:9/search/", Some("secret-token"));
        let directory = WaqiDirectory::from_config(&config).unwrap();

        let err = directory.search("delhi").await.unwrap_err();
        assert!(err.is_lookup_failure());
        assert!(!redact_token(&err.to_string()).contains("secret-token"));
    }

    #[tokio::test]
    async fn test_search_ok_response_preserves_order() {
        let endpoint = serve_once(
            "200 OK",
            r#"{"status":"ok","data":[{"station":{"name":"Bawana, Delhi"}},{"station":{"name":"Alipur, Delhi"}}]}"#,
        )
        .await;
        let config = config_with_token(&endpoint, Some("secret-token"));
        let directory = WaqiDirectory::from_config(&config).unwrap();

        let names = directory.search("delhi").await.unwrap();
        assert_eq!(names, vec!["Bawana, Delhi", "Alipur, Delhi"]);
    }

    #[tokio::test]
    async fn test_search_server_error_is_lookup_failure() {
        let endpoint = serve_once("500 Internal Server Error", r#"{"status":"ok","data":[]}"#).await;
        let config = config_with_token(&endpoint, Some("secret-token"));
        let directory = WaqiDirectory::from_config(&config).unwrap();

        let err = directory.search("delhi").await.unwrap_err();
        assert!(matches!(err, Error::UpstreamRejected { .. }));
        assert!(err.is_lookup_failure());
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_area_lookup_server_error_reports_no_data() {
        let endpoint = serve_once("500 Internal Server Error", "").await;
        let config = config_with_token(&endpoint, Some("secret-token"));
        let lookup = AreaLookup::new(WaqiDirectory::from_config(&config).unwrap(), 2);

        let response = lookup.search("delhi").await;
        assert_eq!(response.outcome, LookupOutcome::NoData);
    }

    #[tokio::test]
    async fn test_fake_directory_counts_calls() {
        let directory = fake::FakeDirectory::new()
            .with("pune", &["Karve Road, Pune"])
            .failing("down");

        assert_eq!(
            directory.search("pune").await.unwrap(),
            vec!["Karve Road, Pune"]
        );
        assert!(directory.search("down").await.is_err());
        assert!(directory.search("other").await.unwrap().is_empty());
        assert_eq!(directory.calls(), 3);
    }
}
