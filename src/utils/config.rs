use crate::utils::constants::{
    DEFAULT_PAGE_OUT, DEFAULT_SERVER_URL, DEFAULT_THEME_FILE, PAGE_OUT_ENV, REQUEST_TIMEOUT_ENV,
    SERVER_URL_ENV, THEME_FILE_ENV,
};
use crate::utils::get_env::{env_var_or, env_var_parsed};
use crate::utils::urls::check_endpoint;
use anyhow::{Context, Error};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub check_url: Url,
    pub theme_file: PathBuf,
    pub page_out: PathBuf,
    /// None keeps a hung request in Submitting indefinitely.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    // Initialize client config from environment variables
    pub fn from_env() -> Result<Self, Error> {
        let server_url = env_var_or(SERVER_URL_ENV, DEFAULT_SERVER_URL);
        let timeout_secs: Option<u64> = env_var_parsed(REQUEST_TIMEOUT_ENV)
            .with_context(|| format!("{REQUEST_TIMEOUT_ENV} must be a whole number of seconds"))?;

        Ok(Self {
            check_url: check_endpoint(&server_url)
                .with_context(|| format!("invalid {SERVER_URL_ENV}: {server_url}"))?,
            theme_file: PathBuf::from(env_var_or(THEME_FILE_ENV, DEFAULT_THEME_FILE)),
            page_out: PathBuf::from(env_var_or(PAGE_OUT_ENV, DEFAULT_PAGE_OUT)),
            request_timeout: timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
        })
    }

    pub fn with_server(mut self, server_url: &str) -> Result<Self, Error> {
        self.check_url =
            check_endpoint(server_url).with_context(|| format!("invalid server url: {server_url}"))?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_override_rebuilds_endpoint() {
        let config = ClientConfig {
            check_url: check_endpoint(DEFAULT_SERVER_URL).unwrap(),
            theme_file: PathBuf::from(DEFAULT_THEME_FILE),
            page_out: PathBuf::from(DEFAULT_PAGE_OUT),
            request_timeout: None,
        };
        let config = config.with_server("http://10.0.0.7:8080").unwrap();
        assert_eq!(config.check_url.as_str(), "http://10.0.0.7:8080/check");
        assert!(config.clone().with_server("::nope::").is_err());
    }
}
