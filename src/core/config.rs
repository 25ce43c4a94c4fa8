

use config::{Config, Environment, Map};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::{Display, EnumString};

use super::error::Result;
use crate::{
    DEFAULT_COLLECTION_NAME, DEFAULT_EMBEDDING_SERVICE_NAME, DEFAULT_PORT,
    DEFAULT_SEARCH_LIMIT, DEFAULT_VECTOR_DB_SERVICE_NAME,
};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum McpTransport {
    Http,
    Stdio,
}


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotesConfig {
    pub host: String,
    pub port: u16,


    pub embedding_service_name: String,
    pub vector_db_service_name: String,
    pub collection_name: String,


    pub embedding_model: Option<String>,
    pub request_timeout: u64,
    pub accept_invalid_certs: bool,


    pub db_max_connections: u32,


    pub default_search_limit: usize,
    pub mcp_transport: McpTransport,


    pub database_url: Option<String>,
    pub embedding_api_base: Option<String>,
    pub embedding_api_key: Option<String>,
}

impl QuotesConfig {

    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,

            embedding_service_name: DEFAULT_EMBEDDING_SERVICE_NAME.to_string(),
            vector_db_service_name: DEFAULT_VECTOR_DB_SERVICE_NAME.to_string(),
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),

            embedding_model: None,
            request_timeout: 30,
            accept_invalid_certs: true,

            db_max_connections: 5,

            default_search_limit: DEFAULT_SEARCH_LIMIT,
            mcp_transport: McpTransport::Http,

            database_url: None,
            embedding_api_base: None,
            embedding_api_key: None,
        }
    }

    /// Reads `PORT`, `EMBEDDING_SERVICE_NAME`, `VECTOR_DB_SERVICE_NAME` and the
    /// other fields from the process environment, keeping defaults for the rest.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(None)
    }

    /// Same as [`Self::from_env`] but reads from `vars` when given.
    pub fn from_vars(vars: Option<Map<String, String>>) -> Result<Self> {
        let settings = Config::builder()
            .add_source(Environment::default().source(vars))
            .build()?;

        Ok(settings.try_deserialize::<Self>()?)
    }


    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }


    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", DEFAULT_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = QuotesConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.embedding_service_name, "tanzu-nomic-embed-text");
        assert_eq!(config.vector_db_service_name, "vector-db");
        assert_eq!(config.collection_name, "inspirational_quotes");
        assert_eq!(config.mcp_transport, McpTransport::Http);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_from_vars_empty_keeps_defaults() {
        let config = QuotesConfig::from_vars(Some(Map::new())).unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_from_vars_overrides() {
        let config = QuotesConfig::from_vars(Some(vars(&[
            ("PORT", "9090"),
            ("EMBEDDING_SERVICE_NAME", "my-embedder"),
            ("VECTOR_DB_SERVICE_NAME", "my-db"),
            ("MCP_TRANSPORT", "stdio"),
            ("ACCEPT_INVALID_CERTS", "false"),
            ("DATABASE_URL", "postgres://u:p@localhost/quotes"),
        ])))
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.embedding_service_name, "my-embedder");
        assert_eq!(config.vector_db_service_name, "my-db");
        assert_eq!(config.mcp_transport, McpTransport::Stdio);
        assert!(!config.accept_invalid_certs);
        assert_eq!(config.database_url.as_deref(), Some("postgres://u:p@localhost/quotes"));
    }

    #[test]
    fn test_from_vars_rejects_bad_port() {
        let result = QuotesConfig::from_vars(Some(vars(&[("PORT", "not-a-port")])));
        assert!(result.is_err());
    }

    #[test]
    fn test_transport_parse() {
        assert_eq!("http".parse::<McpTransport>().unwrap(), McpTransport::Http);
        assert_eq!(McpTransport::Stdio.to_string(), "stdio");
    }
}
