use std::time::Duration;

use derive_builder::Builder;
use thiserror::Error;

use crate::data::RawDish;

/// Production dish feed.
pub const DEFAULT_ENDPOINT: &str =
    "https://knightbitesapp-cda7eve7fce3dkgy.eastus2-01.azurewebsites.net/diningfood";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("dish feed unreachable: {0}")]
    Network(#[source] reqwest::Error),

    #[error("dish feed answered with status {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("malformed dish payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// Everything one retrieval needs to know.
#[derive(Builder, Debug, Clone)]
pub struct FetchProps {
    #[builder(setter(into))]
    endpoint: String,
    #[builder(default = "Duration::from_secs(10)")]
    timeout: Duration,
    /// Retry transport failures once. A non-success status is never
    /// retried.
    #[builder(default = "true")]
    retry_once: bool,
}

/// One GET of the whole dish feed. No caching here, the session owns the
/// snapshot.
pub async fn fetch_dishes(props: &FetchProps) -> Result<Vec<RawDish>, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(props.timeout)
        .build()
        .map_err(FetchError::Network)?;

    let response = match client.get(&props.endpoint).send().await {
        Ok(response) => response,
        Err(e) if props.retry_once => {
            tracing::warn!("dish fetch failed, retrying once: {e}");
            client
                .get(&props.endpoint)
                .send()
                .await
                .map_err(FetchError::Network)?
        }
        Err(e) => return Err(FetchError::Network(e)),
    };

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::BadStatus(status));
    }

    let body = response.text().await.map_err(FetchError::Network)?;
    let dishes = serde_json::from_str(&body)?;
    Ok(dishes)
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn server_with(body: &str, status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/diningfood"))
            .respond_with(ResponseTemplate::new(status).set_body_raw(body, "application/json"))
            .mount(&server)
            .await;
        server
    }

    fn props(server: &MockServer) -> FetchProps {
        FetchPropsBuilder::default()
            .endpoint(format!("{}/diningfood", server.uri()))
            .retry_once(false)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn decodes_a_valid_feed() {
        let body = r#"[
            {"name":"Burger","description":"beef","location":"Commons","imageUrl":"https://img/1"},
            {"name":"Burrito","description":"bean","location":"Knollcrest","imageUrl":"https://img/2","calories":900}
        ]"#;
        let server = server_with(body, 200).await;

        let dishes = fetch_dishes(&props(&server)).await.unwrap();
        assert_eq!(dishes.len(), 2);
        assert_eq!(dishes[0].name, "Burger");
        assert_eq!(dishes[1].location, "Knollcrest");
    }

    #[tokio::test]
    async fn missing_required_field_is_malformed() {
        let body = r#"[{"name":"Burger","location":"Commons","imageUrl":"https://img/1"}]"#;
        let server = server_with(body, 200).await;

        let err = fetch_dishes(&props(&server)).await.unwrap_err();
        assert!(matches!(err, FetchError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn non_array_body_is_malformed() {
        let server = server_with(r#"{"oops":true}"#, 200).await;

        let err = fetch_dishes(&props(&server)).await.unwrap_err();
        assert!(matches!(err, FetchError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn server_error_is_bad_status() {
        let server = server_with("boom", 500).await;

        let err = fetch_dishes(&props(&server)).await.unwrap_err();
        assert!(matches!(err, FetchError::BadStatus(s) if s.as_u16() == 500));
    }
}
