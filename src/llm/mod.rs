

pub mod embeddings;

pub use embeddings::{AdvertisedModel, Embedder, EmbeddingError, GenAiEmbeddings};
