//! Headless wallet front-end
//!
//! HTTP API that dispatches user intents (switch network, send, show, hide
//! and clear history) into a shared [`wallet_core::WalletStore`].

pub mod api;
pub mod error;
