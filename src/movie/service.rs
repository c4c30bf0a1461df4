use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, info, instrument, trace};

use crate::backend::{TextGenerator, clean_markdown_response};
use crate::error::{CineInfoError, Result};
use crate::movie::MovieInfo;

/// Language every answer is written in.
pub const RESPONSE_LANGUAGE: &str = "Portuguese";

/// Anything that can resolve a movie title to its metadata.
///
/// The HTTP layer holds one of these behind an `Arc`, so tests can swap in a
/// stub without touching the network.
#[async_trait]
pub trait MovieInfoProvider: Send + Sync {
    async fn get_movie_info(&self, title: &str) -> Result<MovieInfo>;
}

/// Looks movies up by asking a text model for a JSON answer.
pub struct MovieService<G> {
    generator: G,
}

impl<G: TextGenerator> MovieService<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }
}

/// Prompt asking for a bare JSON object with the four movie fields.
pub fn build_prompt(title: &str) -> String {
    format!(
        "Please provide detailed information about the movie '{}'. \
         Respond with a JSON object containing the following fields: \
         'title' (string), 'release_date' (string), 'box_office' (string), 'synopsis' (string). \
         Make sure the response contains only valid JSON, with no additional text or explanations. \
         Respond in {}.",
        title, RESPONSE_LANGUAGE
    )
}

/// Turn a raw model reply into a validated `MovieInfo`.
///
/// Markdown fences are stripped, the text is decoded as JSON, a numeric
/// `box_office` is rendered as a string, and the result must then carry all
/// four string fields. Unknown keys are ignored.
///
/// ```
/// use cineinfo::parse_movie_info;
///
/// let raw = "```json\n{\"title\":\"X\",\"release_date\":\"Y\",\"box_office\":1000000,\"synopsis\":\"Z\"}\n```";
/// let movie = parse_movie_info(raw).unwrap();
/// assert_eq!(movie.box_office, "1000000");
/// ```
pub fn parse_movie_info(raw: &str) -> Result<MovieInfo> {
    let json_str = clean_markdown_response(raw);
    trace!(json = %json_str, "Attempting to parse reply as JSON");

    let mut movie_data: Value = serde_json::from_str(&json_str).map_err(|e| {
        error!(error = %e, partial_json = %json_str, "JSON parsing error");
        CineInfoError::InvalidJson(e)
    })?;

    let Some(fields) = movie_data.as_object_mut() else {
        error!(json = %json_str, "Reply is not a JSON object");
        return Err(CineInfoError::ValidationError(
            "expected a JSON object".to_string(),
        ));
    };

    if let Some(Value::Number(amount)) = fields.get("box_office") {
        let amount = amount.to_string();
        debug!(box_office = %amount, "Coercing numeric box_office to string");
        fields.insert("box_office".to_string(), Value::String(amount));
    }

    serde_json::from_value(movie_data).map_err(|e| {
        error!(error = %e, "Reply does not match movie schema");
        CineInfoError::ValidationError(e.to_string())
    })
}

#[async_trait]
impl<G: TextGenerator> MovieInfoProvider for MovieService<G> {
    #[instrument(name = "get_movie_info", skip(self))]
    async fn get_movie_info(&self, title: &str) -> Result<MovieInfo> {
        info!("Getting movie information");

        let prompt = build_prompt(title);
        let reply = self.generator.generate(&prompt).await.map_err(|e| {
            error!(error = %e, "Error generating response");
            e
        })?;
        info!(reply = %reply, "Received reply");

        let movie = parse_movie_info(&reply)?;
        info!(release_date = %movie.release_date, "Movie information ready");
        Ok(movie)
    }
}
