//! Errors produced by the fetch-and-transform pipeline.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    /// The request to the provider could not be completed.
    #[error("weather provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Only produced when the provider is configured to reject non-2xx replies.
    #[error("weather provider responded with status {status}: {body}")]
    UpstreamStatus { status: StatusCode, body: String },

    #[error("failed to decode weather provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("temperature {0} K has no finite Fahrenheit value")]
    NonFiniteTemperature(f64),
}

impl WeatherError {
    pub(crate) fn upstream_status(status: StatusCode, body: &[u8]) -> Self {
        Self::UpstreamStatus {
            status,
            body: truncate_body(&String::from_utf8_lossy(body)),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept_whole() {
        let err = WeatherError::upstream_status(StatusCode::NOT_FOUND, br#"{"cod":"404"}"#);
        assert_eq!(
            err.to_string(),
            r#"weather provider responded with status 404 Not Found: {"cod":"404"}"#
        );
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "é".repeat(300);
        let err = WeatherError::upstream_status(StatusCode::UNAUTHORIZED, body.as_bytes());

        match err {
            WeatherError::UpstreamStatus { body, .. } => {
                assert!(body.ends_with("..."));
                assert_eq!(body.chars().count(), 203);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_errors_carry_serde_message() {
        let serde_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = WeatherError::from(serde_err);

        assert!(err.to_string().starts_with("failed to decode weather provider response"));
    }
}
