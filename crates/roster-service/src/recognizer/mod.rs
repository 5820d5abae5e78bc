//! Name recognizer adapters

mod gemini;

pub use gemini::{GeminiConfig, GeminiRecognizer};
