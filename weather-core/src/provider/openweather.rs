use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;

use crate::{config::ProviderConfig, error::WeatherError};

use super::WeatherProvider;

/// Client for the OpenWeatherMap "current weather" endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    api_key: Option<String>,
    reject_error_status: bool,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            reject_error_status: config.reject_error_status,
            http,
        })
    }

    fn query<'a>(&'a self, location: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut query = vec![("q", location)];
        if let Some(key) = &self.api_key {
            query.push(("appid", key.as_str()));
        }
        query
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, location: &str) -> Result<Bytes, WeatherError> {
        log::debug!("Requesting current weather for {location:?} from {}", self.base_url);

        let res = self
            .http
            .get(&self.base_url)
            .query(&self.query(location))
            .send()
            .await?;

        let status = res.status();
        let body = res.bytes().await?;

        if !status.is_success() {
            if self.reject_error_status {
                return Err(WeatherError::upstream_status(status, &body));
            }
            log::debug!("OpenWeather replied {status}, decoding body anyway");
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(
        server: &MockServer,
        api_key: Option<&str>,
        reject_error_status: bool,
    ) -> OpenWeatherProvider {
        OpenWeatherProvider::from_config(&ProviderConfig {
            base_url: format!("{}/data/2.5/weather", server.uri()),
            api_key: api_key.map(str::to_string),
            timeout_secs: None,
            reject_error_status,
        })
        .expect("client must build")
    }

    #[tokio::test]
    async fn fetch_returns_raw_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "London"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"name":"London"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let body = provider(&server, None, false).fetch("London").await.unwrap();

        assert_eq!(&body[..], br#"{"name":"London"}"#);
    }

    #[tokio::test]
    async fn fetch_encodes_location_and_sends_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("q", "New York,US"))
            .and(query_param("appid", "SECRET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let body = provider(&server, Some("SECRET"), false)
            .fetch("New York,US")
            .await
            .unwrap();

        assert_eq!(&body[..], b"{}");
    }

    #[tokio::test]
    async fn fetch_omits_key_when_unset() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        provider(&server, None, false).fetch("Paris").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.query_pairs().all(|(k, _)| k != "appid"));
    }

    #[tokio::test]
    async fn error_status_body_is_passed_through_by_default() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"cod":401,"message":"Invalid API key"}"#),
            )
            .mount(&server)
            .await;

        let body = provider(&server, None, false).fetch("London").await.unwrap();

        assert_eq!(&body[..], br#"{"cod":401,"message":"Invalid API key"}"#);
    }

    #[tokio::test]
    async fn error_status_is_rejected_when_configured() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"cod":"404"}"#))
            .mount(&server)
            .await;

        let err = provider(&server, None, true).fetch("Atlantis").await.unwrap_err();

        match err {
            WeatherError::UpstreamStatus { status, body } => {
                assert_eq!(status.as_u16(), 404);
                assert_eq!(body, r#"{"cod":"404"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_failure_is_transport_error() {
        let provider = OpenWeatherProvider::from_config(&ProviderConfig {
            base_url: "http://127.0.0.1:1/data/2.5/weather".to_string(),
            ..ProviderConfig::default()
        })
        .unwrap();

        let err = provider.fetch("London").await.unwrap_err();

        assert!(matches!(err, WeatherError::Transport(_)));
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn slow_provider_times_out_when_bounded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::from_config(&ProviderConfig {
            base_url: server.uri(),
            timeout_secs: Some(1),
            ..ProviderConfig::default()
        })
        .unwrap();

        let err = provider.fetch("London").await.unwrap_err();

        match err {
            WeatherError::Transport(inner) => assert!(inner.is_timeout()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
