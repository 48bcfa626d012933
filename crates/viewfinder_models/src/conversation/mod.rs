//! Recorded voice-agent conversations over HTTP.

mod client;
mod dto;

pub use client::{ConversationClient, DEFAULT_CONVERSATION_BASE_URL};
