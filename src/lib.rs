

pub mod api;
pub mod core;
pub mod db;
pub mod llm;
pub mod mcp;
pub mod platform;
pub mod quotes;
pub mod search;
pub mod utils;

pub use utils::safe_truncate_ellipsis;


pub use core::config::{McpTransport, QuotesConfig};
pub use core::error::{QuotesError, Result};
pub use core::runtime::SemanticRuntime;
pub use quotes::{Quote, QuoteStore};
pub use search::{
    Document, ScoredResult, SemanticQuotes, SimilarityError, cosine_similarity,
    rank_by_similarity,
};


pub const DEFAULT_PORT: u16 = 8080;


pub const DEFAULT_EMBEDDING_SERVICE_NAME: &str = "tanzu-nomic-embed-text";


pub const DEFAULT_VECTOR_DB_SERVICE_NAME: &str = "vector-db";


pub const DEFAULT_COLLECTION_NAME: &str = "inspirational_quotes";


pub const DEFAULT_SEARCH_LIMIT: usize = 10;
