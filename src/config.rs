//! Client configuration read from the environment.

use std::time::Duration;

/// Used when neither `TASKMASTER_API_URL` nor `VITE_APP_API_BASE_URL` is set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Origin plus path prefix, without a trailing slash.
    pub base_url: String,
    /// Whole-request timeout applied to every call, refresh included.
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Build from process environment variables.
    ///
    /// API base URL: TASKMASTER_API_URL > VITE_APP_API_BASE_URL > localhost default.
    /// Timeouts: TASKMASTER_TIMEOUT_SECS and TASKMASTER_CONNECT_TIMEOUT_SECS.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("TASKMASTER_API_URL")
            .or_else(|| lookup("VITE_APP_API_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let mut config = Self::new(&base_url);
        if let Some(timeout) = seconds(lookup("TASKMASTER_TIMEOUT_SECS"), "TASKMASTER_TIMEOUT_SECS") {
            config.timeout = timeout;
        }
        if let Some(timeout) = seconds(
            lookup("TASKMASTER_CONNECT_TIMEOUT_SECS"),
            "TASKMASTER_CONNECT_TIMEOUT_SECS",
        ) {
            config.connect_timeout = timeout;
        }
        config
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Absolute URL for a path relative to the API base.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn seconds(raw: Option<String>, name: &str) -> Option<Duration> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            log::warn!("Ignoring invalid {}={:?}, using default", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }

    #[test]
    fn test_url_precedence() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TASKMASTER_API_URL", "https://tasks.example.com/api/"),
            ("VITE_APP_API_BASE_URL", "http://vite.local"),
        ]));
        assert_eq!(config.base_url, "https://tasks.example.com/api");

        let config =
            ClientConfig::from_lookup(lookup(&[("VITE_APP_API_BASE_URL", "http://vite.local")]));
        assert_eq!(config.base_url, "http://vite.local");
    }

    #[test]
    fn test_timeouts_and_invalid_values() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TASKMASTER_TIMEOUT_SECS", "5"),
            ("TASKMASTER_CONNECT_TIMEOUT_SECS", "zero"),
        ]));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }

    #[test]
    fn test_url_join() {
        let config = ClientConfig::new("http://localhost:8000/api//");
        assert_eq!(config.url("/category/read"), "http://localhost:8000/api/category/read");
    }
}
