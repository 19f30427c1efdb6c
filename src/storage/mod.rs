//! Storage and persistence layer
//!
//! - File system key-value entries
//! - Transaction history encoding

mod file_system;
mod history;

pub use file_system::Storage;
pub use history::{erase_history, load_history, save_history, HISTORY_KEY, UNREADABLE_PREFIX};
