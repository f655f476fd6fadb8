//! HTTP adapters for the fetch ports.
//!
//! | Adapter | Port | Crates |
//! |---------|------|--------|
//! | [`HttpApiFetcher`] | `ApiFetchPort` | `reqwest` |
//! | [`HttpDocumentFetcher`] | `DocumentFetchPort` | `reqwest` + `scraper` |

mod api_fetcher;
mod document_fetcher;

pub use api_fetcher::HttpApiFetcher;
pub use document_fetcher::{DocumentFetcherConfig, HttpDocumentFetcher, extract_embedded_data};

use parcel_application::ports::fetch_error::FetchError;

/// Default User-Agent for outbound requests
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Maximum accepted API body (5 MB)
const MAX_BODY_SIZE: usize = 5 * 1024 * 1024;
/// Maximum accepted page (10 MB); listing pages inline their full state
const MAX_PAGE_SIZE: usize = 10 * 1024 * 1024;

/// Read a response body, refusing anything larger than `limit` bytes.
///
/// A declared `Content-Length` over the limit is rejected before any byte is
/// read; otherwise chunks are accumulated and the read stops as soon as the
/// limit is crossed.
async fn read_bounded(mut response: reqwest::Response, limit: usize) -> Result<Vec<u8>, FetchError> {
    check_declared_length(response.content_length(), limit)?;
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(map_reqwest_error)? {
        append_bounded(&mut body, &chunk, limit)?;
    }
    Ok(body)
}

fn check_declared_length(content_length: Option<u64>, limit: usize) -> Result<(), FetchError> {
    match content_length {
        Some(length) if length > limit as u64 => Err(too_large(length, limit)),
        _ => Ok(()),
    }
}

fn append_bounded(body: &mut Vec<u8>, chunk: &[u8], limit: usize) -> Result<(), FetchError> {
    let total = body.len() + chunk.len();
    if total > limit {
        return Err(too_large(total as u64, limit));
    }
    body.extend_from_slice(chunk);
    Ok(())
}

fn too_large(size: u64, limit: usize) -> FetchError {
    FetchError::Malformed(format!(
        "response too large: {} bytes (max: {} bytes)",
        size, limit
    ))
}

fn map_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_builder() {
        FetchError::Infrastructure(e.to_string())
    } else if e.is_decode() {
        FetchError::Malformed(e.to_string())
    } else {
        FetchError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_length_over_limit_is_rejected() {
        assert!(check_declared_length(None, 10).is_ok());
        assert!(check_declared_length(Some(10), 10).is_ok());
        assert!(matches!(
            check_declared_length(Some(11), 10),
            Err(FetchError::Malformed(msg)) if msg.contains("11 bytes")
        ));
    }

    #[test]
    fn test_undeclared_body_stops_at_limit() {
        let mut body = Vec::new();
        append_bounded(&mut body, b"12345", 8).unwrap();
        append_bounded(&mut body, b"678", 8).unwrap();
        assert_eq!(body, b"12345678");

        let err = append_bounded(&mut body, b"9", 8).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
        assert_eq!(body.len(), 8);
    }
}
