//! HTTP transport for the joke endpoint.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderValue};

use crate::resolved::ResolvedConfig;
use crate::types::{ErrorCode, Joke, JokeError};

pub(crate) fn build_client(config: &ResolvedConfig) -> Result<reqwest::Client, JokeError> {
    let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(|e| {
        JokeError::from_code(ErrorCode::Internal, format!("failed to build HTTP client: {e}"))
    })
}

/// `GET` the endpoint and decode the `joke` field.
pub(crate) async fn get_joke(
    client: &reqwest::Client,
    config: &ResolvedConfig,
) -> Result<Joke, JokeError> {
    let response = client
        .get(config.endpoint.clone())
        .header(ACCEPT, HeaderValue::from_static("application/json"))
        .send()
        .await
        .map_err(|e| transport_error(&e, config))?;

    let status = response.status();
    if !status.is_success() {
        return Err(status_error(status, config));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| transport_error(&e, config))?;

    decode_joke(&body)
}

fn decode_joke(body: &[u8]) -> Result<Joke, JokeError> {
    serde_json::from_slice(body).map_err(|e| {
        JokeError::from_code(
            ErrorCode::MalformedResponse,
            format!("response is not a joke: {e}"),
        )
        .with_detail("body_bytes", body.len().to_string())
    })
}

fn transport_error(err: &reqwest::Error, config: &ResolvedConfig) -> JokeError {
    let code = if err.is_timeout() {
        ErrorCode::Timeout
    } else {
        ErrorCode::Network
    };
    JokeError::from_code(code, format!("request failed: {err}"))
        .with_detail("endpoint", config.endpoint.as_str())
}

fn status_error(status: StatusCode, config: &ResolvedConfig) -> JokeError {
    let (code, retryable) = if status.is_server_error() {
        (ErrorCode::Http5xx, true)
    } else if status.is_client_error() {
        // 408 and 429 are transient even though they are client errors.
        let transient = matches!(
            status,
            StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS
        );
        (ErrorCode::Http4xx, transient)
    } else {
        (ErrorCode::Internal, false)
    };

    JokeError::new(code, format!("endpoint returned HTTP {status}"), retryable)
        .with_detail("status", status.as_u16().to_string())
        .with_detail("endpoint", config.endpoint.as_str())
}
