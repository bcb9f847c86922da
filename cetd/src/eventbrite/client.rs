use reqwest::header::{self, HeaderMap, HeaderValue};
use failure::Error;
use serde_json::Value;
use super::errors::EventbriteError;
use crate::config::{Config, TOKEN_VARIABLE};

/// Authenticated access to the Eventbrite API.
///
/// Cloning is cheap: clones share the same connection pool, so one client can
/// serve any number of concurrent page fetches.
#[derive(Clone)]
pub struct EventbriteClient {
    http: reqwest::Client,
    base_url: String
}

impl EventbriteClient {
    pub fn new(config: &Config) -> Result<EventbriteClient, Error> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| EventbriteError::Configuration {
                variable: TOKEN_VARIABLE.to_owned(),
                reason: "token contains characters not allowed in an HTTP header".to_owned(),
            })?;
        authorization.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, authorization);

        let base_url = config.base_url.trim_end_matches('/').to_owned();
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|cause| EventbriteError::Transport { url: base_url.clone(), cause })?;
        Ok(EventbriteClient { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Single authenticated GET returning the decoded JSON body.
    ///
    /// No retry happens here: a network failure is reported as
    /// `EventbriteError::Transport`, a non 2xx answer as `EventbriteError::HttpStatus`
    /// and a body that is not JSON as `EventbriteError::DataShape`.
    pub async fn get_json(&self, url: String) -> Result<Value, Error> {
        debug!("GET {}", url);
        let response = self.http.get(&url).send().await
            .map_err(|cause| EventbriteError::Transport { url: url.clone(), cause })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EventbriteError::HttpStatus { status: status.as_u16(), url }.into());
        }

        match response.json::<Value>().await {
            Ok(body) => Ok(body),
            Err(cause) if cause.is_decode() => Err(EventbriteError::DataShape { url, reason: cause.to_string() }.into()),
            Err(cause) => Err(EventbriteError::Transport { url, cause }.into())
        }
    }
}
