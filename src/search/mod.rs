

pub mod ranking;
pub mod semantic;
pub mod similarity;
pub mod vector_store;

pub use ranking::{Document, ScoredResult, parse_limit, rank_by_similarity, rank_scored};
pub use semantic::{DEFAULT_WORD_PAIRS, SemanticQuotes, WordSimilarity};
pub use similarity::{SimilarityError, cosine_similarity, distance_to_similarity};
pub use vector_store::{Entry, MemoryVectorStore, VectorStore};
