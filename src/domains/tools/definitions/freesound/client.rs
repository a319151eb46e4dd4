//! Minimal Freesound API client: one text search request per call.

use reqwest::StatusCode;
use tracing::{debug, instrument};

use super::model::RawSearchResponse;
use crate::core::config::FreesoundConfig;

/// Path of the text search endpoint, relative to the API root.
const TEXT_SEARCH_PATH: &str = "/search/text/";

/// Only the fields the formatter consumes.
pub const SEARCH_FIELDS: &str = "id,name,tags,license,duration,previews,url,username,type,description";

/// Ways a search request can fail.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Freesound answered with a non-success status.
    #[error("API error for {url}: {}", .status.as_u16())]
    UpstreamStatus { url: String, status: StatusCode },

    /// The body was not JSON at all.
    #[error("Invalid JSON response")]
    MalformedResponse,

    /// Anything else: connection, timeout, unexpected payload shape.
    #[error("{0}")]
    Unclassified(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API token in its query string.
        let err = err.without_url();
        if err.is_timeout() {
            Self::Unclassified("Request timed out".to_string())
        } else if err.is_connect() {
            Self::Unclassified(format!("Connection failed: {}", describe_sources(&err)))
        } else {
            Self::Unclassified(describe_sources(&err))
        }
    }
}

/// Join an error and its sources into one line.
fn describe_sources(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Client for the Freesound text search endpoint.
///
/// Each client owns its own connection pool, so dropping it releases the
/// connection used by the request.
pub struct FreesoundClient<'a> {
    http: reqwest::Client,
    config: &'a FreesoundConfig,
}

impl<'a> FreesoundClient<'a> {
    /// Build a client honouring the configured request timeout.
    pub fn new(config: &'a FreesoundConfig) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    /// Full URL of the text search endpoint, without query string.
    pub fn search_url(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            TEXT_SEARCH_PATH
        )
    }

    /// Fetch the first page of results for `query`.
    #[instrument(skip(self))]
    pub async fn search_text(
        &self,
        query: &str,
        page_size: u32,
    ) -> Result<RawSearchResponse, SearchError> {
        let url = self.search_url();
        let page_size = page_size.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("token", self.config.token()),
                ("query", query),
                ("page_size", page_size.as_str()),
                ("fields", SEARCH_FIELDS),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::UpstreamStatus { url, status });
        }

        let body = response.bytes().await?;
        debug!("Search response received: {} bytes", body.len());

        let value: serde_json::Value =
            serde_json::from_slice(&body).map_err(|_| SearchError::MalformedResponse)?;

        serde_json::from_value(value).map_err(|e| SearchError::Unclassified(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> FreesoundConfig {
        FreesoundConfig {
            api_key: Some("test-token".to_string()),
            base_url,
            ..Default::default()
        }
    }

    #[test]
    fn test_search_url_joins_base() {
        let config = test_config("https://freesound.org/apiv2/".to_string());
        let client = FreesoundClient::new(&config).unwrap();
        assert_eq!(
            client.search_url(),
            "https://freesound.org/apiv2/search/text/"
        );
    }

    #[test]
    fn test_error_messages() {
        let err = SearchError::UpstreamStatus {
            url: "https://freesound.org/apiv2/search/text/".to_string(),
            status: StatusCode::UNAUTHORIZED,
        };
        assert_eq!(
            err.to_string(),
            "API error for https://freesound.org/apiv2/search/text/: 401"
        );
        assert_eq!(
            SearchError::MalformedResponse.to_string(),
            "Invalid JSON response"
        );
        assert_eq!(
            SearchError::Unclassified("connection reset".to_string()).to_string(),
            "connection reset"
        );
    }

    #[tokio::test]
    async fn test_search_sends_expected_params() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/text/"))
            .and(query_param("token", "test-token"))
            .and(query_param("query", "dog bark"))
            .and(query_param("page_size", "5"))
            .and(query_param("fields", SEARCH_FIELDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 1,
                "results": [{"id": 9, "name": "Bark"}],
                "next": null
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = test_config(mock_server.uri());
        let client = FreesoundClient::new(&config).unwrap();
        let raw = client.search_text("dog bark", 5).await.unwrap();

        assert_eq!(raw.count, 1);
        assert_eq!(raw.results[0].name.as_deref(), Some("Bark"));
    }

    #[tokio::test]
    async fn test_search_status_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/text/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let config = test_config(mock_server.uri());
        let client = FreesoundClient::new(&config).unwrap();
        let err = client.search_text("x", 10).await.unwrap_err();

        match err {
            SearchError::UpstreamStatus { url, status } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(url, format!("{}/search/text/", mock_server.uri()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/text/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let config = test_config(mock_server.uri());
        let client = FreesoundClient::new(&config).unwrap();
        let err = client.search_text("x", 10).await.unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse));
    }

    #[tokio::test]
    async fn test_search_wrong_shape_is_unclassified() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/text/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[1, 2, 3]"))
            .mount(&mock_server)
            .await;

        let config = test_config(mock_server.uri());
        let client = FreesoundClient::new(&config).unwrap();
        let err = client.search_text("x", 10).await.unwrap_err();
        assert!(matches!(err, SearchError::Unclassified(_)));
    }

    #[tokio::test]
    async fn test_search_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/text/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"count": 0, "results": []}"#)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let config = FreesoundConfig {
            request_timeout: Duration::from_millis(100),
            ..test_config(mock_server.uri())
        };
        let client = FreesoundClient::new(&config).unwrap();
        let err = client.search_text("x", 10).await.unwrap_err();
        assert!(matches!(err, SearchError::Unclassified(_)));

        let message = err.to_string();
        assert_eq!(message, "Request timed out");
        assert!(!message.contains("test-token"));
    }

    #[tokio::test]
    async fn test_connection_refused_hides_token() {
        // Nothing listens on the discard port.
        let config = test_config("http://127.0.0.1:9".to_string());
        let client = FreesoundClient::new(&config).unwrap();
        let err = client.search_text("x", 10).await.unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Connection failed"), "{message}");
        assert!(!message.contains("test-token"));
        assert!(!message.contains("?token="));
    }

    #[test]
    fn test_describe_sources_joins_chain() {
        #[derive(Debug, thiserror::Error)]
        #[error("tcp connect error")]
        struct Wrapper(#[source] std::io::Error);

        let wrapped = Wrapper(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "Connection refused",
        ));
        assert_eq!(
            describe_sources(&wrapped),
            "tcp connect error: Connection refused"
        );
    }
}
