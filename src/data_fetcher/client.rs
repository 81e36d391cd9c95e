//! HTTP client construction and the generic fetch helper

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::error::AppError;

/// Creates a properly configured HTTP client with connection pooling and
/// timeout handling. One client is built at startup and shared by every
/// fetch for the lifetime of the process.
pub fn create_http_client(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(crate::constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()
}

/// Generic fetch function with comprehensive error handling.
///
/// Performs a single GET request and deserializes the JSON body into `T`.
/// There is deliberately no retry here: a failed cycle is logged by the
/// caller and the next poll starts from scratch.
///
/// # Arguments
/// * `client` - HTTP client for making requests
/// * `url` - URL to fetch data from
///
/// # Returns
/// * `Result<T, AppError>` - Parsed response data or error
pub async fn fetch<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, AppError> {
    info!("Fetching data from URL: {url}");

    let response = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            error!("Request failed for URL {}: {}", url, e);
            return if e.is_timeout() {
                Err(AppError::network_timeout(url))
            } else if e.is_connect() {
                Err(AppError::network_connection(url, e.to_string()))
            } else {
                Err(AppError::ApiFetch(e))
            };
        }
    };

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");

        error!("HTTP {} - {} (URL: {})", status_code, reason, url);

        return Err(match status_code {
            404 => AppError::api_not_found(url),
            429 => AppError::api_rate_limit(reason, url),
            400..=499 => AppError::api_client_error(status_code, reason, url),
            _ => AppError::api_server_error(status_code, reason, url),
        });
    }

    let body = response.text().await.map_err(AppError::ApiFetch)?;
    match serde_json::from_str::<T>(&body) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse response from {}: {}", url, e);
            Err(AppError::ApiParse(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Deserialize)]
    struct Payload {
        value: i64,
    }

    #[tokio::test]
    async fn test_fetch_parses_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": 7})))
            .mount(&server)
            .await;

        let client = create_http_client(5).unwrap();
        let url = format!("{}/data", server.uri());
        let payload: Payload = fetch(&client, &url).await.unwrap();
        assert_eq!(payload.value, 7);
    }

    #[tokio::test]
    async fn test_fetch_maps_404_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = create_http_client(5).unwrap();
        let result: Result<Payload, _> = fetch(&client, &server.uri()).await;
        assert!(matches!(result, Err(AppError::ApiNotFound { .. })));
    }

    #[tokio::test]
    async fn test_fetch_maps_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = create_http_client(5).unwrap();
        let result: Result<Payload, _> = fetch(&client, &server.uri()).await;
        assert!(matches!(result, Err(AppError::ApiServerError { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_fetch_maps_malformed_body_to_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = create_http_client(5).unwrap();
        let result: Result<Payload, _> = fetch(&client, &server.uri()).await;
        assert!(matches!(result, Err(AppError::ApiParse(_))));
    }
}
