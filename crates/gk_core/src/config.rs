use std::path::PathBuf;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://grokipedia.com";
pub const USER_AGENT: &str = "Grokipedia-API-Client/1.0";

pub const BASE_URL_VAR: &str = "GROKIPEDIA_BASE_URL";
pub const CHROME_PATH_VAR: &str = "GROKIPEDIA_CHROME_PATH";
pub const MAX_SESSIONS_VAR: &str = "GROKIPEDIA_MAX_BROWSER_SESSIONS";

const DEFAULT_MAX_BROWSER_SESSIONS: usize = 4;

/// Characters left untouched by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Immutable service configuration, built once at startup and shared by
/// reference with every component.
#[derive(Debug, Clone)]
pub struct Config {
    base_url: String,
    pub user_agent: String,
    pub fetch_timeout: Duration,
    pub search_timeout: Duration,
    /// Extra wait after the results container shows up, giving client-side
    /// rendering time to populate the result list.
    pub render_settle: Duration,
    pub max_search_results: usize,
    pub max_browser_sessions: usize,
    pub chrome_executable: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            fetch_timeout: Duration::from_secs(30),
            search_timeout: Duration::from_secs(30),
            render_settle: Duration::from_secs(3),
            max_search_results: 20,
            max_browser_sessions: DEFAULT_MAX_BROWSER_SESSIONS,
            chrome_executable: None,
        }
    }
}

impl Config {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::default().with_base_url(base_url)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::default();
        if let Some(base_url) = get(BASE_URL_VAR) {
            config = config.with_base_url(&base_url)?;
        }
        if let Some(path) = get(CHROME_PATH_VAR) {
            config.chrome_executable = Some(PathBuf::from(path));
        }
        if let Some(max) = get(MAX_SESSIONS_VAR) {
            config = config.with_max_browser_sessions(max.parse().map_err(|_| {
                Error::Config(format!("{} must be a positive integer, got {:?}", MAX_SESSIONS_VAR, max))
            })?)?;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL {:?}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(Error::Config(format!(
                "Base URL must be an absolute http(s) URL, got {:?}",
                base_url
            )));
        }
        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_max_browser_sessions(mut self, max: usize) -> Result<Self> {
        if max == 0 {
            return Err(Error::Config(format!("{} must be at least 1", MAX_SESSIONS_VAR)));
        }
        self.max_browser_sessions = max;
        Ok(self)
    }

    pub fn with_chrome_executable(mut self, path: Option<PathBuf>) -> Self {
        self.chrome_executable = path;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an article path; a leading `/` is added when missing.
    pub fn article_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub fn search_url(&self, query: &str) -> String {
        format!("{}/search?q={}", self.base_url, encode_uri_component(query))
    }

    /// Page URL synthesized from a result title: spaces become underscores,
    /// then the slug is percent-encoded.
    pub fn page_url(&self, title: &str) -> String {
        format!("{}/page/{}", self.base_url, encode_uri_component(&title.replace(' ', "_")))
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
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert_eq!(config.search_timeout, Duration::from_secs(30));
        assert_eq!(config.max_search_results, 20);
        assert_eq!(config.max_browser_sessions, 4);
        assert!(config.chrome_executable.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup(&[
            (BASE_URL_VAR, "http://localhost:9000/"),
            (CHROME_PATH_VAR, "/usr/bin/chromium"),
            (MAX_SESSIONS_VAR, "2"),
        ]))
        .unwrap();
        assert_eq!(config.base_url(), "http://localhost:9000");
        assert_eq!(config.chrome_executable, Some(PathBuf::from("/usr/bin/chromium")));
        assert_eq!(config.max_browser_sessions, 2);
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = Config::from_lookup(lookup(&[(BASE_URL_VAR, "  ")])).unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(Config::from_lookup(lookup(&[(BASE_URL_VAR, "not a url")])).is_err());
        assert!(Config::from_lookup(lookup(&[(BASE_URL_VAR, "ftp://example.com")])).is_err());
        assert!(Config::from_lookup(lookup(&[(MAX_SESSIONS_VAR, "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[(MAX_SESSIONS_VAR, "many")])).is_err());
    }

    #[test]
    fn test_article_url_adds_leading_slash() {
        let config = Config::default();
        assert_eq!(config.article_url("page/Rust"), "https://grokipedia.com/page/Rust");
        assert_eq!(config.article_url("/page/Rust"), "https://grokipedia.com/page/Rust");
    }

    #[test]
    fn test_page_url_from_title() {
        let config = Config::default();
        let url = config.page_url("Machine Learning Control");
        assert!(url.ends_with("/page/Machine_Learning_Control"));
        assert_eq!(
            config.page_url("C++ (programming)"),
            "https://grokipedia.com/page/C%2B%2B_(programming)"
        );
        assert_eq!(config.page_url("Café"), "https://grokipedia.com/page/Caf%C3%A9");
    }

    #[test]
    fn test_search_url_encodes_query() {
        let config = Config::default();
        assert_eq!(
            config.search_url("rust & go"),
            "https://grokipedia.com/search?q=rust%20%26%20go"
        );
    }
}
