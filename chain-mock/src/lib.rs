//! Chain Mock Server Library
//!
//! Stand-in for the remote services the wallet talks to: the price API,
//! the JSON-RPC provider and the transaction status API. Provides both a
//! standalone binary and library components for in-process tests.

pub mod handlers;
pub mod server;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use server::{create_router, run_server, spawn_local};
pub use state::{MockChain, MockFault};
pub use types::*;
