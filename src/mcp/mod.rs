

pub mod server;

pub use server::{QuotesMcpServer, TOOL_NAMES, http_router, run_server};
