use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::DatastoreLocation;
use crate::errors::ConfigError;

/// Process configuration, built once at startup and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// host to bind to
    pub host: String,
    /// port to listen on
    pub port: u16,
    /// public base url used in product links
    pub api_base_url: String,
    /// `memory://`, `file://PATH` or a bare path
    pub datastore_uri: String,
    /// tracing filter used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            api_base_url: "http://localhost:4000".to_string(),
            datastore_uri: "file://./data/products.json".to_string(),
            log_filter: "info,emi_storefront=debug".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file; missing keys take defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `HOST`, `PORT`, `API_BASE_URL` and `DATASTORE_URI` overrides.
    ///
    /// `lookup` is `std::env::var(..).ok()` in the binary.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                value: port.clone(),
            })?;
        }
        if let Some(url) = lookup("API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(uri) = lookup("DATASTORE_URI") {
            self.datastore_uri = uri;
        }
        Ok(self)
    }

    pub fn datastore(&self) -> Result<DatastoreLocation, ConfigError> {
        DatastoreLocation::parse(&self.datastore_uri)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| ConfigError::InvalidValue {
            key: "host".to_string(),
            value: self.host.clone(),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 4000);
        assert_eq!(
            config.datastore().unwrap(),
            DatastoreLocation::File(PathBuf::from("./data/products.json"))
        );
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:4000");
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml(
            r#"
            port = 8081
            datastore_uri = "memory://"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.datastore().unwrap(), DatastoreLocation::Memory);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            AppConfig::from_toml("port = \"eighty\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("PORT", "5050"),
            ("DATASTORE_URI", "memory://"),
            ("API_BASE_URL", "https://shop.example"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::default()
            .with_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.port, 5050);
        assert_eq!(config.datastore_uri, "memory://");
        assert_eq!(config.api_base_url, "https://shop.example");
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_port_override() {
        let result = AppConfig::default().with_overrides(|k| (k == "PORT").then(|| "http".to_string()));
        assert!(matches!(result, Err(ConfigError::InvalidValue { key, .. }) if key == "PORT"));
    }

    #[test]
    fn test_invalid_host() {
        let config = AppConfig {
            host: "not-an-ip".to_string(),
            ..AppConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
