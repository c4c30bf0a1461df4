pub mod client;
pub mod gemini;
pub mod utils;

pub use client::TextGenerator;
pub use gemini::{GeminiClient, Model as GeminiModel};
pub use utils::{check_response_status, clean_markdown_response, handle_http_error};
