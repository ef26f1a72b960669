//! API utilities for frontend-backend communication
//!
//! The backend serves the compiled frontend itself, so API calls go to the
//! same origin.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Get the base URL for API requests
///
/// # Returns
/// - Origin like "http://localhost:3000"
/// - Empty string if window is not available (relative URLs are used then)
pub fn api_base() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Build a full API URL from a path
///
/// # Example
/// ```ignore
/// let url = api_url("/api/d400/catalog");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Build "?a=1&b=2" with encoded values
pub fn query_string(params: &[(&str, &str)]) -> String {
    let pairs: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect();
    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// GET с разбором JSON ответа
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = Request::get(&api_url(path))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}

/// POST JSON-тела с разбором JSON ответа
pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    let response = Request::post(&api_url(path))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string() {
        assert_eq!(query_string(&[]), "");
        assert_eq!(
            query_string(&[("account_id", "a 1"), ("user_id", "u@x")]),
            "?account_id=a%201&user_id=u%40x"
        );
    }
}
