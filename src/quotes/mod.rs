

pub mod data;
pub mod store;

pub use data::{Quote, QUOTE_COUNT, all_quotes, categories, quotes_by_category, random_quote};
pub use store::{InMemoryQuoteStore, InitOutcome, InitStatus, QuoteStore};
