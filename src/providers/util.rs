use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::SourceError;

/// Builds the shared HTTP client. The timeout applies to every request; a
/// source that hangs is a transport failure, not a pending dashboard.
pub fn build_client(timeout: Duration) -> Result<Client, SourceError> {
    Client::builder()
        .user_agent(concat!("pulso/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| SourceError::Transport(e.to_string()))
}

/// GET a JSON document. Any transport error, non-2xx status, or body that
/// fails to decode yields a [`SourceError`]; nothing escapes this boundary.
pub async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, SourceError> {
    debug!("Requesting {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SourceError::Transport(format!("{e} for {url}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Transport(format!("HTTP {status} for {url}")));
    }

    let body = response
        .text()
        .await
        .map_err(|e| SourceError::Transport(format!("{e} for {url}")))?;

    serde_json::from_str(&body).map_err(|e| SourceError::Parse(format!("{e} for {url}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, serde::Deserialize)]
    struct Payload {
        value: f64,
    }

    #[tokio::test]
    async fn decodes_a_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"value": 1.5}"#))
            .mount(&server)
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let payload: Payload = get_json(&client, &format!("{}/data", server.uri()))
            .await
            .unwrap();
        assert_eq!(payload.value, 1.5);
    }

    #[tokio::test]
    async fn non_2xx_is_a_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let result: Result<Payload, _> = get_json(&client, &format!("{}/data", server.uri())).await;
        assert!(matches!(result, Err(SourceError::Transport(_))));
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let result: Result<Payload, _> = get_json(&client, &format!("{}/data", server.uri())).await;
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }
}
