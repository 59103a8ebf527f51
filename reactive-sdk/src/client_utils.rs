use crate::ContentServiceError;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

/// Create a JSON POST request, parse the response.
/// Returns a `Status` error on a non-2xx status code.
pub async fn post_json<T: Serialize, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    data: &T,
) -> Result<R, ContentServiceError> {
    let response = client.post(url).json(data).send().await?;
    parse_response(response).await
}

/// Create a GET request with a serialized query string, parse the response.
/// Returns a `Status` error on a non-2xx status code.
pub async fn get_json<Q: Serialize, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &Q,
) -> Result<R, ContentServiceError> {
    let response = client.get(url).query(query).send().await?;
    parse_response(response).await
}

async fn parse_response<R: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<R, ContentServiceError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json::<R>().await?)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ContentServiceError::Status {
            status,
            message: extract_error_message(&body, status),
        })
    }
}

/// Failure bodies carry a `message` field to surface verbatim. Fall back to
/// the raw body, then to the status reason, when the body does not parse.
fn extract_error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn error_message_comes_from_the_message_field() {
        let message = extract_error_message(
            r#"{"message":"AI provider timeout"}"#,
            StatusCode::INTERNAL_SERVER_ERROR,
        );
        assert_eq!(message, "AI provider timeout");
    }

    #[test]
    fn error_message_falls_back_to_the_raw_body() {
        let message = extract_error_message("upstream exploded", StatusCode::BAD_GATEWAY);
        assert_eq!(message, "upstream exploded");
    }

    #[test]
    fn error_message_falls_back_to_the_status_reason() {
        let message = extract_error_message("", StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(message, "Service Unavailable");
    }
}
