// Claude API client module

pub mod client;
pub mod retry;
pub mod types;

pub use client::ClaudeClient;
pub use types::{ContentBlock, Message, MessageContent, MessageRequest, MessageResponse};
