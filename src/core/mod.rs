

pub mod config;
pub mod error;
pub mod runtime;

pub use config::{McpTransport, QuotesConfig};
pub use error::{QuotesError, Result};
pub use runtime::{HealthReport, PlatformConnector, SemanticRuntime, ServiceConnector};
