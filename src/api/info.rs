

use axum::Json;
use serde_json::{Value, json};


const VERSION: &str = env!("CARGO_PKG_VERSION");


/// Body of `GET /` for the given stage (1 to 4).
pub fn stage_info(stage: u8) -> Value {
    match stage {
        1 => json!({
            "name": "Random Quotes Demo",
            "description": "Cloud Foundry demo with Rust: In-Memory Random Quotes",
            "version": VERSION,
            "stage": 1,
            "features": [
                "In-memory quotes storage",
                "No database required",
                "No service bindings required"
            ],
            "endpoints": {
                "root": "/",
                "health": "/health",
                "random_quote": "/quote",
                "all_quotes": "/quotes"
            }
        }),
        2 => json!({
            "name": "Random Quotes Demo",
            "description": "Cloud Foundry demo with Rust: Random Quotes with PostgreSQL",
            "version": VERSION,
            "stage": 2,
            "features": [
                "PostgreSQL database storage",
                "Cloud Foundry service binding",
                "Service marketplace integration"
            ],
            "endpoints": {
                "root": "/",
                "health": "/health",
                "random_quote": "/quote",
                "all_quotes": "/quotes",
                "init_quotes": "POST /quotes/init",
                "clean_quotes": "POST /quotes/clean"
            }
        }),
        3 => json!({
            "name": "Semantic Quotes Demo - Stage 3",
            "description": "Cloud Foundry demo with Rust: Semantic Quotes with PostgreSQL",
            "version": VERSION,
            "stage": 3,
            "features": [
                "Vector similarity search",
                "AI embedding models",
                "PostgreSQL embedding storage",
                "Semantic search capabilities"
            ],
            "endpoints": {
                "root": "/",
                "health": "/health",
                "quotes": "/quotes?topic=<query>",
                "words": "/words",
                "init": "POST /quotes/init",
                "clean": "POST /quotes/clean"
            }
        }),
        _ => json!({
            "name": "Quotes Demo - Stage 4",
            "description": "Cloud Foundry demo with Rust: Semantic Quotes MCP Server",
            "version": VERSION,
            "stage": 4,
            "features": [
                "MCP Protocol (streamable HTTP)",
                "AI Embedding Service integration",
                "Vector database (PostgreSQL)",
                "Semantic similarity search"
            ],
            "endpoints": {
                "root": "/",
                "health": "/health",
                "mcp": "/mcp (MCP protocol endpoint)"
            },
            "mcp_tools": crate::mcp::TOOL_NAMES
        }),
    }
}


pub async fn root_random() -> Json<Value> {
    Json(stage_info(1))
}

pub async fn root_postgres() -> Json<Value> {
    Json(stage_info(2))
}

pub async fn root_semantic() -> Json<Value> {
    Json(stage_info(3))
}

pub async fn root_mcp() -> Json<Value> {
    Json(stage_info(4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_numbers() {
        for stage in 1..=4 {
            assert_eq!(stage_info(stage)["stage"], stage);
        }
    }

    #[test]
    fn test_stage_four_lists_tools() {
        let info = stage_info(4);
        let tools = info["mcp_tools"].as_array().unwrap();
        assert_eq!(tools.len(), 4);
        assert!(tools.iter().any(|t| t == "search_quotes"));
    }
}
