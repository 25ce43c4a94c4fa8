

pub mod vcap;

pub use vcap::{BindingError, GenAiBinding, PostgresBinding, ServiceBindings, ServiceInstance};

use tracing::info;

use crate::core::config::QuotesConfig;


/// Embedding endpoint for `config.embedding_service_name`, falling back to
/// `EMBEDDING_API_BASE`/`EMBEDDING_API_KEY` when the service is not bound.
pub fn resolve_genai(
    bindings: &ServiceBindings,
    config: &QuotesConfig,
) -> Result<GenAiBinding, BindingError> {
    match bindings.genai(&config.embedding_service_name) {
        Ok(binding) => Ok(binding),
        Err(err) => match (&config.embedding_api_base, &config.embedding_api_key) {
            (Some(api_base), Some(api_key)) => {
                info!("Using embedding endpoint from configuration: {}", api_base);
                Ok(GenAiBinding::new(
                    config.embedding_service_name.clone(),
                    api_base.clone(),
                    api_key.clone(),
                    None,
                ))
            }
            _ => Err(err),
        },
    }
}


/// Database for `config.vector_db_service_name`, falling back to `DATABASE_URL`.
pub fn resolve_postgres(
    bindings: &ServiceBindings,
    config: &QuotesConfig,
) -> Result<PostgresBinding, BindingError> {
    match bindings.postgres(&config.vector_db_service_name) {
        Ok(binding) => Ok(binding),
        Err(err) => match &config.database_url {
            Some(url) => {
                let binding = PostgresBinding::new(config.vector_db_service_name.clone(), url.clone());
                info!("Using database from configuration: {}", binding.redacted_uri());
                Ok(binding)
            }
            None => Err(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_postgres_falls_back_to_database_url() {
        let mut config = QuotesConfig::default();
        config.database_url = Some("postgres://me:pw@localhost:5432/quotes".to_string());

        let binding = resolve_postgres(&ServiceBindings::default(), &config).unwrap();
        assert_eq!(binding.name, "vector-db");
        assert_eq!(binding.host.as_deref(), Some("localhost"));
    }

    #[test]
    fn test_resolve_postgres_without_binding_or_url() {
        let config = QuotesConfig::default();
        let err = resolve_postgres(&ServiceBindings::default(), &config).unwrap_err();
        assert!(matches!(err, BindingError::ServiceNotFound(_)));
    }

    #[test]
    fn test_resolve_genai_prefers_bound_service() {
        let raw = r#"{"genai": [{"name": "tanzu-nomic-embed-text",
            "credentials": {"endpoint": {"api_base": "https://bound", "api_key": "k"}}}]}"#;
        let bindings = ServiceBindings::from_json(raw).unwrap();

        let mut config = QuotesConfig::default();
        config.embedding_api_base = Some("https://local".to_string());
        config.embedding_api_key = Some("local-key".to_string());

        let binding = resolve_genai(&bindings, &config).unwrap();
        assert_eq!(binding.api_base, "https://bound");
    }

    #[test]
    fn test_resolve_genai_needs_key_for_fallback() {
        let mut config = QuotesConfig::default();
        config.embedding_api_base = Some("https://local".to_string());
        assert!(resolve_genai(&ServiceBindings::default(), &config).is_err());
    }
}
