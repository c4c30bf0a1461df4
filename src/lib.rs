//! CineInfo: movie information served over HTTP, answered by Google's Gemini model
//!
//! # Overview
//!
//! A single endpoint, `POST /chat/completions/movie`, takes a movie title and
//! returns its release date, box office and synopsis. The answer comes from a
//! search-grounded Gemini call whose reply is stripped of markdown fences,
//! decoded as JSON and checked against a fixed four-field schema.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use cineinfo::{GeminiClient, MovieService, Settings, build_router};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_env()?;
//!     let client = GeminiClient::from_settings(&settings)?;
//!     let app = build_router(Arc::new(MovieService::new(client)));
//!
//!     let listener = tokio::net::TcpListener::bind(settings.bind_addr()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

mod backend;
pub mod config;
mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod movie;
pub mod server;

// Re-exports for convenience
pub use backend::{GeminiClient, GeminiModel, TextGenerator, clean_markdown_response};
pub use config::Settings;
pub use error::{CineInfoError, Result};
pub use movie::{MovieInfo, MovieInfoProvider, MovieQuery, MovieService, parse_movie_info};
pub use server::{ApiDoc, ApiError, AppState, ErrorDetail, build_router};
