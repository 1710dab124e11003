//! Configuration types for scraping jobs
//!
//! Client settings as data: base URL, headers, cookies, user agent, and
//! timeouts, deserializable from YAML so CLI runs can be configured from a
//! file instead of flags.

use crate::error::Result;
use crate::http::HttpClientConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Client settings loaded from a YAML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL for requests
    #[serde(default)]
    pub base_url: Option<String>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Cookies sent with every request
    #[serde(default)]
    pub cookies: HashMap<String, String>,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Honor the target site's robots.txt
    #[serde(default = "default_true")]
    pub respect_robots: bool,
}

fn default_user_agent() -> String {
    format!("scrapekit/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            headers: HashMap::new(),
            cookies: HashMap::new(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            respect_robots: true,
        }
    }
}

impl ClientSettings {
    /// Load settings from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Convert into an HTTP client configuration
    pub fn to_http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(&self.user_agent);

        if let Some(ref base_url) = self.base_url {
            builder = builder.base_url(base_url);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        for (key, value) in &self.cookies {
            builder = builder.cookie(key, value);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = ClientSettings::default();
        assert!(settings.base_url.is_none());
        assert_eq!(settings.timeout_secs, 30);
        assert!(settings.respect_robots);
        assert!(settings.user_agent.starts_with("scrapekit/"));
    }

    #[test]
    fn test_from_yaml() {
        let settings = ClientSettings::from_yaml(
            r#"
base_url: https://api.example.com
headers:
  X-API-Key: secret
cookies:
  session: abc
user_agent: mybot/2.0
timeout_secs: 10
respect_robots: false
"#,
        )
        .unwrap();

        assert_eq!(
            settings.base_url,
            Some("https://api.example.com".to_string())
        );
        assert_eq!(settings.headers.get("X-API-Key"), Some(&"secret".to_string()));
        assert_eq!(settings.cookies.get("session"), Some(&"abc".to_string()));
        assert_eq!(settings.user_agent, "mybot/2.0");
        assert_eq!(settings.timeout_secs, 10);
        assert!(!settings.respect_robots);
    }

    #[test]
    fn test_from_yaml_defaults() {
        let settings = ClientSettings::from_yaml("base_url: https://x.test").unwrap();
        assert_eq!(settings.timeout_secs, 30);
        assert!(settings.respect_robots);
        assert!(settings.headers.is_empty());
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: https://files.example.com").unwrap();

        let settings = ClientSettings::from_yaml_file(file.path()).unwrap();
        assert_eq!(
            settings.base_url,
            Some("https://files.example.com".to_string())
        );
    }

    #[test]
    fn test_from_yaml_malformed() {
        let err = ClientSettings::from_yaml("base_url: [unclosed").unwrap_err();
        assert!(matches!(err, crate::error::Error::YamlParse(_)));
    }

    #[test]
    fn test_to_http_config() {
        let settings = ClientSettings::from_yaml(
            r#"
base_url: https://api.example.com
headers:
  X-Trace: "1"
timeout_secs: 5
"#,
        )
        .unwrap();

        let config = settings.to_http_config();
        assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.default_headers.get("X-Trace"), Some(&"1".to_string()));
    }
}
