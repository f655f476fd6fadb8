//! reqwest-backed JSON API client.

use super::{MAX_BODY_SIZE, map_reqwest_error, read_bounded};
use async_trait::async_trait;
use parcel_application::ports::api_fetch::{ApiFetchPort, ApiResponse};
use parcel_application::ports::fetch_error::FetchError;
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// [`ApiFetchPort`] over a shared `reqwest::Client`.
///
/// The client pools connections; a request dropped by the engine's timeout
/// releases its connection when the future is dropped.
#[derive(Clone)]
pub struct HttpApiFetcher {
    client: reqwest::Client,
}

impl HttpApiFetcher {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Infrastructure(format!("HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ApiFetchPort for HttpApiFetcher {
    async fn get_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        timeout: Duration,
    ) -> Result<ApiResponse, FetchError> {
        let mut request = self
            .client
            .get(url)
            .timeout(timeout)
            .header(ACCEPT, "application/json");
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = read_bounded(response, MAX_BODY_SIZE).await?;
        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        parse_body(status, &body)
    }
}

/// Decode a response body.
///
/// Blank bodies and unparsable error pages become `body: None`; an
/// unparsable success body is malformed.
fn parse_body(status: u16, body: &[u8]) -> Result<ApiResponse, FetchError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ApiResponse::new(status, None));
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => Ok(ApiResponse::new(status, Some(value))),
        Err(_) if !(200..300).contains(&status) => Ok(ApiResponse::new(status, None)),
        Err(e) => Err(FetchError::Malformed(format!("invalid JSON: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_body() {
        let response = parse_body(200, br#"{"zpid": 12}"#).unwrap();
        assert!(response.is_success());
        assert_eq!(response.body, Some(json!({"zpid": 12})));
    }

    #[test]
    fn test_blank_body() {
        let response = parse_body(204, b"  \n").unwrap();
        assert_eq!(response.body, None);
    }

    #[test]
    fn test_html_error_page_keeps_status() {
        let response = parse_body(429, b"<html>Too Many Requests</html>").unwrap();
        assert_eq!(response.status, 429);
        assert_eq!(response.body, None);
    }

    #[test]
    fn test_invalid_success_body_is_malformed() {
        assert!(matches!(
            parse_body(200, b"{not json"),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn test_client_builds() {
        assert!(HttpApiFetcher::new("parcel-resolver-test").is_ok());
    }
}
