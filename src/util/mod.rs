// Utility Module
// Display helpers shared by the CLI

pub mod format;

pub use format::{format_sequence, parse_key_size};
