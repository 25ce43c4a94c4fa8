

use axum::Router;
use rmcp::{
    handler::server::{
        router::tool::ToolRouter,
        router::prompt::PromptRouter,
        wrapper::Parameters,
    },
    model::*,
    tool, tool_handler, tool_router,
    prompt, prompt_handler, prompt_router,
    transport::{
        stdio,
        streamable_http_server::{StreamableHttpService, session::local::LocalSessionManager},
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api;
use crate::core::config::McpTransport;
use crate::core::error::QuotesError;
use crate::core::runtime::SemanticRuntime;
use crate::quotes::{Quote, QUOTE_COUNT};
use crate::search::{ScoredResult, WordSimilarity, parse_limit};


pub const TOOL_NAMES: [&str; 4] = [
    "search_quotes",
    "get_random_quote",
    "get_all_quotes",
    "compare_words",
];


#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct SearchQuotesParams {
    #[schemars(description = "Topic or theme to search for (e.g. 'education', 'kindness', 'perseverance')")]
    pub topic: String,
    #[schemars(description = "Number of results to return (default: 10, max: 24)")]
    pub k: Option<i64>,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct CompareWordsParams {
    #[schemars(description = "First word to compare")]
    pub word1: String,
    #[schemars(description = "Second word to compare")]
    pub word2: String,
}


#[derive(Clone)]
pub struct QuotesMcpServer {
    runtime: Arc<SemanticRuntime>,
    tool_router: ToolRouter<Self>,
    prompt_router: PromptRouter<Self>,
}

impl QuotesMcpServer {

    pub fn new(runtime: Arc<SemanticRuntime>) -> Self {
        Self {
            runtime,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }


    fn convert_error(err: QuotesError) -> McpError {
        match err {
            QuotesError::Validation(msg) => McpError::invalid_params(msg, None),
            QuotesError::Similarity(e) => McpError::invalid_params(e.to_string(), None),
            QuotesError::NotFound(msg) => McpError::resource_not_found(msg, None),
            other => McpError::internal_error(other.to_string(), None),
        }
    }


    fn result_to_json<T: Serialize>(result: T) -> Result<String, McpError> {
        serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }

    /// `k` defaults to the configured search limit, must be at least 1 and is
    /// capped at the dataset size.
    pub async fn search(&self, topic: &str, k: Option<i64>) -> Result<Vec<ScoredResult>, McpError> {
        if topic.trim().is_empty() {
            return Err(McpError::invalid_params("Topic cannot be empty", None));
        }

        let mut limit = match k {
            Some(k) => parse_limit(k).map_err(|e| McpError::invalid_params(e.to_string(), None))?,
            None => self.runtime.config().default_search_limit,
        };
        if limit > QUOTE_COUNT {
            warn!("k={} exceeds the dataset size, using {}", limit, QUOTE_COUNT);
            limit = QUOTE_COUNT;
        }

        let service = self.runtime.service().await.map_err(Self::convert_error)?;
        service.search(topic, limit).await.map_err(Self::convert_error)
    }


    pub async fn random(&self) -> Result<Quote, McpError> {
        let service = self.runtime.service().await.map_err(Self::convert_error)?;
        service.random().await.map_err(Self::convert_error)
    }


    pub async fn all(&self) -> Result<Vec<Quote>, McpError> {
        let service = self.runtime.service().await.map_err(Self::convert_error)?;
        service.all().await.map_err(Self::convert_error)
    }


    pub async fn compare(&self, word1: &str, word2: &str) -> Result<WordSimilarity, McpError> {
        if word1.trim().is_empty() || word2.trim().is_empty() {
            return Err(McpError::invalid_params("Both words must be non-empty", None));
        }

        let service = self.runtime.service().await.map_err(Self::convert_error)?;
        service.compare_words(word1, word2).await.map_err(Self::convert_error)
    }
}

#[tool_router]
impl QuotesMcpServer {

    #[tool(description = "Search for inspirational quotes semantically similar to a topic. Returns: [{text, similarity, category}] sorted by similarity (highest first)")]
    async fn search_quotes(
        &self,
        Parameters(params): Parameters<SearchQuotesParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(
            "🔍 search_quotes: '{}' [k={:?}]",
            crate::safe_truncate_ellipsis(&params.topic, 50),
            params.k
        );

        let results = self.search(&params.topic, params.k).await?;
        info!("✅ Found {} quotes", results.len());

        let json = Self::result_to_json(&results)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }


    #[tool(description = "Get a random inspirational quote. Returns: {text, category}")]
    async fn get_random_quote(&self) -> Result<CallToolResult, McpError> {
        info!("🎲 get_random_quote");

        let quote = self.random().await?;

        let json = Self::result_to_json(&quote)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }


    #[tool(description = "Get all 24 inspirational quotes. Returns: [{text, category}]")]
    async fn get_all_quotes(&self) -> Result<CallToolResult, McpError> {
        info!("📚 get_all_quotes");

        let quotes = self.all().await?;
        info!("✅ Returning {} quotes", quotes.len());

        let json = Self::result_to_json(&quotes)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }


    #[tool(description = "Compare two words using embedding cosine similarity. Returns: {word1, word2, similarity}")]
    async fn compare_words(
        &self,
        Parameters(params): Parameters<CompareWordsParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("⚖️ compare_words: '{}' vs '{}'", params.word1, params.word2);

        let result = self.compare(&params.word1, &params.word2).await?;
        info!("✅ Similarity: {:.4}", result.similarity);

        let json = Self::result_to_json(&result)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}


#[prompt_router]
impl QuotesMcpServer {

    #[prompt(
        name = "tool_selection_guide",
        description = "Guide for choosing the right quotes tool for each task"
    )]
    async fn tool_selection_guide(&self) -> Result<GetPromptResult, McpError> {
        let guide = r#"# Quotes Tools - Selection Guide

## search_quotes
**When to use:** Finding quotes about a theme, mood or situation
**Examples:**
- "Find me quotes about perseverance"
- "Something encouraging after a failed exam"
**Parameters:** topic (required), k (default 10, max 24)

## get_random_quote
**When to use:** The user just wants a quote, with no topic

## get_all_quotes
**When to use:** Listing or browsing the whole collection (24 quotes, 5 categories)

## compare_words
**When to use:** Showing how embeddings relate two words
**Examples:** king/queen (related), banana/car (unrelated), happy/sad (antonyms)

---

## Quick Decision Tree:

1. **Has a topic?** → search_quotes
2. **Wants any quote?** → get_random_quote
3. **Wants the full list?** → get_all_quotes
4. **Asking how similar two words are?** → compare_words"#;

        let messages = vec![
            PromptMessage::new_text(PromptMessageRole::Assistant, guide.to_string()),
        ];

        Ok(GetPromptResult {
            description: Some("Tool selection guide for the quotes server".to_string()),
            messages,
        })
    }
}


#[tool_handler]
#[prompt_handler]
impl ServerHandler for QuotesMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "cf-quotes".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Inspirational quotes with semantic search. Use search_quotes to find quotes \
                 on a topic, get_random_quote for a single quote, get_all_quotes for the full \
                 collection and compare_words to compare two words by embedding similarity."
                    .to_string(),
            ),
        }
    }


    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: vec![
                RawResource::new("config://quotes", "quotes-config".to_string())
                    .no_annotation(),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        match uri.as_str() {
            "config://quotes" => {
                let content = serde_json::to_string_pretty(&self.config_resource())
                    .map_err(|e| McpError::internal_error(e.to_string(), None))?;

                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(content, uri)],
                })
            }
            _ => Err(McpError::resource_not_found(
                format!("Unknown resource: {}", uri),
                Some(json!({ "uri": uri })),
            )),
        }
    }
}

impl QuotesMcpServer {
    fn config_resource(&self) -> serde_json::Value {
        let config = self.runtime.config();
        let model = self
            .runtime
            .ready()
            .map(|service| service.embedder().model().to_string());

        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "services": {
                "embedding": config.embedding_service_name,
                "vector_db": config.vector_db_service_name,
            },
            "collection": config.collection_name,
            "embedding_model": model,
            "initialized": self.runtime.ready().is_some(),
            "tools": TOOL_NAMES,
        })
    }
}


/// Stage 4 router: `/`, `/health` and the MCP endpoint at `/mcp`.
pub fn http_router(runtime: Arc<SemanticRuntime>) -> Router {
    let server = QuotesMcpServer::new(runtime.clone());
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    api::mcp_rest_router(runtime).nest_service("/mcp", service)
}


pub async fn run_server(runtime: Arc<SemanticRuntime>) -> anyhow::Result<()> {
    info!("🚀 Initializing quotes MCP server...");

    let config = runtime.config().clone();
    info!("   📍 Embedding service: {}", config.embedding_service_name);
    info!("   📊 Vector DB service: {}", config.vector_db_service_name);

    runtime.start().await;

    match config.mcp_transport {
        McpTransport::Stdio => {
            info!("✅ Serving MCP over stdio");
            let service = QuotesMcpServer::new(runtime).serve(stdio()).await?;
            service.waiting().await?;
        }
        McpTransport::Http => {
            info!("✅ Serving MCP over streamable HTTP at /mcp");
            api::serve(http_router(runtime), &config.bind_addr()).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::runtime::tests::runtime;

    fn server(failures: usize) -> QuotesMcpServer {
        QuotesMcpServer::new(Arc::new(runtime(failures)))
    }

    #[tokio::test]
    async fn test_search_defaults_to_ten() {
        let results = server(0).search("kindness", None).await.unwrap();
        assert_eq!(results.len(), 10);
    }

    #[tokio::test]
    async fn test_search_uses_configured_limit() {
        use crate::core::config::QuotesConfig;
        use crate::core::runtime::tests::{BOUND, TestConnector};
        use crate::platform::ServiceBindings;

        let config = QuotesConfig { default_search_limit: 3, ..QuotesConfig::default() };
        let runtime = SemanticRuntime::new(
            config,
            ServiceBindings::from_json(BOUND).unwrap(),
            Arc::new(TestConnector::new(0)),
        );
        let server = QuotesMcpServer::new(Arc::new(runtime));

        assert_eq!(server.search("kindness", None).await.unwrap().len(), 3);
        assert_eq!(server.search("kindness", Some(5)).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_search_clamps_large_k() {
        let results = server(0).search("kindness", Some(100)).await.unwrap();
        assert_eq!(results.len(), QUOTE_COUNT);
    }

    #[tokio::test]
    async fn test_search_rejects_bad_input() {
        let server = server(0);

        let err = server.search("   ", None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

        let err = server.search("kindness", Some(0)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

        let err = server.search("kindness", Some(-3)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_random_and_all() {
        let server = server(0);
        assert!(!server.random().await.unwrap().text.is_empty());
        assert_eq!(server.all().await.unwrap().len(), 24);
    }

    #[tokio::test]
    async fn test_compare_words() {
        let server = server(0);
        let result = server.compare("king", "king").await.unwrap();
        assert!((result.similarity - 1.0).abs() < 1e-9);

        let err = server.compare("king", "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_unavailable_backend_is_internal_error() {
        let err = server(5).all().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn test_config_resource() {
        let server = server(0);
        assert_eq!(server.config_resource()["initialized"], false);

        server.all().await.unwrap();
        let config = server.config_resource();
        assert_eq!(config["initialized"], true);
        assert_eq!(config["embedding_model"], "letters");
        assert_eq!(config["services"]["vector_db"], "vector-db");
        assert_eq!(config["tools"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_server_info() {
        let info = server(0).get_info();
        assert_eq!(info.server_info.name, "cf-quotes");
        assert!(info.capabilities.tools.is_some());
    }
}
