use std::env;
use std::fmt;
use std::time::Duration;
use failure::Error;
use crate::eventbrite::errors::EventbriteError;
use crate::eventbrite::{EVENTBRITE_BASE_URL, DEFAULT_TIMEOUT};

pub const TOKEN_VARIABLE: &'static str = "PRIVATE_TOKEN";
pub const BASE_URL_VARIABLE: &'static str = "EVENTBRITE_BASE_URL";
pub const TIMEOUT_VARIABLE: &'static str = "EVENTBRITE_TIMEOUT_SECS";

/// Everything needed to talk to the Eventbrite API.
#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub base_url: String,
    pub timeout: Duration
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    pub fn new(token: &str) -> Config {
        Config {
            token: token.to_owned(),
            base_url: EVENTBRITE_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(self, base_url: &str) -> Config {
        Config { base_url: base_url.trim_end_matches('/').to_owned(), ..self }
    }

    pub fn from_env() -> Result<Config, Error> {
        Config::from_lookup(|variable| env::var(variable).ok())
    }

    /// Builds the configuration from a variable lookup.
    ///
    /// The token is mandatory, a blank one counts as missing.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Config, Error> {
        let token = lookup(TOKEN_VARIABLE)
            .map(|token| token.trim().to_owned())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| configuration_error(TOKEN_VARIABLE, "variable is mandatory"))?;

        let config = match lookup(BASE_URL_VARIABLE).filter(|url| !url.trim().is_empty()) {
            Some(base_url) => Config::new(&token).with_base_url(base_url.trim()),
            None => Config::new(&token)
        };

        match lookup(TIMEOUT_VARIABLE) {
            Some(raw) => raw.trim().parse::<u64>()
                .map(|seconds| Config { timeout: Duration::from_secs(seconds), ..config })
                .map_err(|err| configuration_error(TIMEOUT_VARIABLE, &format!("{} is not a number of seconds ({})", raw, err))),
            None => Ok(config)
        }
    }
}

fn configuration_error(variable: &str, reason: &str) -> Error {
    EventbriteError::Configuration { variable: variable.to_owned(), reason: reason.to_owned() }.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(values: Vec<(&'static str, &'static str)>) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<&str, &str> = values.into_iter().collect();
        move |variable: &str| values.get(variable).map(|value| value.to_string())
    }

    #[test]
    fn test_token_is_mandatory() {
        let actual = Config::from_lookup(lookup_in(vec![]));
        assert!(actual.is_err());
        assert_matches!(actual.unwrap_err().downcast::<EventbriteError>(), Ok(EventbriteError::Configuration { ref variable, .. }) if variable == TOKEN_VARIABLE);

        let actual = Config::from_lookup(lookup_in(vec![(TOKEN_VARIABLE, "   ")]));
        assert!(actual.is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_in(vec![(TOKEN_VARIABLE, "5O5ICDI5I4LUFCAZRSTX")])).unwrap();
        assert_eq!(config.token, "5O5ICDI5I4LUFCAZRSTX");
        assert_eq!(config.base_url, EVENTBRITE_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_in(vec![
            (TOKEN_VARIABLE, "5O5ICDI5I4LUFCAZRSTX"),
            (BASE_URL_VARIABLE, "http://127.0.0.1:8088/v3/"),
            (TIMEOUT_VARIABLE, "3"),
        ])).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8088/v3");
        assert_eq!(config.timeout, Duration::from_secs(3));

        let actual = Config::from_lookup(lookup_in(vec![(TOKEN_VARIABLE, "5O5ICDI5I4LUFCAZRSTX"), (TIMEOUT_VARIABLE, "ten")]));
        assert_matches!(actual.unwrap_err().downcast::<EventbriteError>(), Ok(EventbriteError::Configuration { ref variable, .. }) if variable == TIMEOUT_VARIABLE);
    }

    #[test]
    fn test_debug_hides_token() {
        let config = Config::new("5O5ICDI5I4LUFCAZRSTX");
        assert!(!format!("{:?}", config).contains("5O5ICDI5I4LUFCAZRSTX"));
    }
}
