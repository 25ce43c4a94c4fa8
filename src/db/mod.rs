

pub mod pool;
pub mod quotes_table;
pub mod vector_store;

pub use pool::DatabasePool;
pub use quotes_table::PgQuoteStore;
pub use vector_store::PgVectorStore;

use crate::core::error::QuotesError;

impl From<r2d2::Error> for QuotesError {
    fn from(err: r2d2::Error) -> Self {
        Self::Database(format!("Connection pool: {}", err))
    }
}

impl From<r2d2_postgres::postgres::Error> for QuotesError {
    fn from(err: r2d2_postgres::postgres::Error) -> Self {
        Self::Database(err.to_string())
    }
}
