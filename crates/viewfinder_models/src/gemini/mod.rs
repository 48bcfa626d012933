//! Gemini structured text and Imagen image generation.

mod client;
mod dto;

pub use client::{DEFAULT_GEMINI_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GeminiClient};
