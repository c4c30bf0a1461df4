use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, error, info, instrument, trace};

use crate::backend::{TextGenerator, check_response_status, handle_http_error};
use crate::config::Settings;
use crate::error::{CineInfoError, Result};

/// Official Gemini REST root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Confidence threshold below which the model runs a live Google search
/// before answering.
pub const DYNAMIC_RETRIEVAL_THRESHOLD: f64 = 0.3;

/// Gemini models available for completion
///
/// Any model name can be used through the `Custom` variant or `FromStr`:
///
/// ```rust
/// use cineinfo::GeminiModel;
/// use std::str::FromStr;
///
/// let model = GeminiModel::from_str("gemini-custom").unwrap();
/// assert_eq!(model, GeminiModel::Custom("gemini-custom".to_string()));
/// assert_eq!(GeminiModel::from_string("gemini-2.0-flash"), GeminiModel::Gemini20Flash);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Model {
    /// Gemini 2.5 Pro
    Gemini25Pro,
    /// Gemini 2.5 Flash
    Gemini25Flash,
    /// Gemini 2.0 Flash
    Gemini20Flash,
    /// Gemini 1.5 Pro
    Gemini15Pro,
    /// Gemini 1.5 Flash
    Gemini15Flash,
    /// Custom model name (for new models or Gemini-compatible endpoints)
    Custom(String),
}

impl Model {
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini20Flash => "gemini-2.0-flash",
            Model::Gemini15Pro => "gemini-1.5-pro",
            Model::Gemini15Flash => "gemini-1.5-flash",
            Model::Custom(name) => name,
        }
    }

    /// Create a model from a string. Unknown names become `Custom(name)`.
    pub fn from_string(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.as_str() {
            "gemini-2.5-pro" => Model::Gemini25Pro,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.0-flash" => Model::Gemini20Flash,
            "gemini-1.5-pro" => Model::Gemini15Pro,
            "gemini-1.5-flash" => Model::Gemini15Flash,
            _ => Model::Custom(name),
        }
    }
}

impl FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from_string(s))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::from_string(s)
    }
}

impl From<String> for Model {
    fn from(s: String) -> Self {
        Model::from_string(s)
    }
}

/// Configuration for the Gemini client
#[derive(Clone)]
pub(crate) struct GeminiConfig {
    api_key: String,
    model: Model,
    /// Defaults to [`DEFAULT_BASE_URL`] if not set
    base_url: Option<String>,
}

/// Gemini client for grounded text generation
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

// Gemini API request and response structures
#[derive(Debug, Serialize)]
pub(crate) struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Tool {
    pub google_search_retrieval: GoogleSearchRetrieval,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleSearchRetrieval {
    pub dynamic_retrieval_config: DynamicRetrievalConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DynamicRetrievalConfig {
    pub mode: String,
    pub dynamic_threshold: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentRequest {
    /// One user message with search grounding enabled.
    pub(crate) fn grounded(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            tools: vec![Tool {
                google_search_retrieval: GoogleSearchRetrieval {
                    dynamic_retrieval_config: DynamicRetrievalConfig {
                        mode: "MODE_DYNAMIC".to_string(),
                        dynamic_threshold: DYNAMIC_RETRIEVAL_THRESHOLD,
                    },
                },
            }],
        }
    }
}

impl GeminiClient {
    /// Create a new Gemini client with the provided API key.
    ///
    /// ```no_run
    /// # use cineinfo::{GeminiClient, GeminiModel};
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeminiClient::new("your-gemini-api-key")?.model(GeminiModel::Gemini20Flash);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_client_new", skip(api_key))]
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(CineInfoError::ConfigError(
                "API key cannot be empty".to_string(),
            ));
        }

        let config = GeminiConfig {
            api_key,
            model: Model::Gemini20Flash,
            base_url: None,
        };

        // No timeout override: reqwest defaults apply
        let client = reqwest::Client::new();

        info!(model = %config.model.as_str(), "Created Gemini client");

        Ok(Self { config, client })
    }

    /// Create a client from loaded settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = Self::new(settings.api_key.clone())?.model(settings.model.clone());
        Ok(match &settings.base_url {
            Some(url) => client.base_url(url.clone()),
            None => client,
        })
    }

    /// Set the model to use
    #[tracing::instrument(skip(self))]
    pub fn model(mut self, model: Model) -> Self {
        tracing::debug!(
            previous_model = ?self.config.model,
            new_model = ?model,
            "Setting Gemini model"
        );
        self.config.model = model;
        self
    }

    /// Set a custom base URL for Gemini-compatible APIs.
    ///
    /// * `base_url` - Base URL without trailing slash (e.g., "http://localhost:1234/v1beta")
    #[tracing::instrument(skip(self, base_url))]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url_str = base_url.into();
        tracing::debug!(
            previous_base_url = ?self.config.base_url,
            new_base_url = %base_url_str,
            "Setting custom base URL"
        );
        self.config.base_url = Some(base_url_str);
        self
    }

    fn endpoint(&self) -> String {
        let base_url = self
            .config
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');
        format!(
            "{}/models/{}:generateContent",
            base_url,
            self.config.model.as_str()
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(
        name = "gemini_generate",
        skip(self, prompt),
        fields(
            model = %self.config.model.as_str(),
            prompt_len = prompt.len()
        )
    )]
    async fn generate(&self, prompt: &str) -> Result<String> {
        info!("Generating grounded text response with Gemini");

        let request = GenerateContentRequest::grounded(prompt);
        let url = self.endpoint();
        debug!(url = %url, "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.config.api_key)])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| handle_http_error(e, "Gemini"))?;

        let response = check_response_status(response, "Gemini").await?;

        debug!("Successfully received response from Gemini API");
        let completion: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse JSON response from Gemini API");
            e
        })?;

        let Some(candidate) = completion.candidates.first() else {
            error!("Gemini API returned empty candidates array");
            return Err(CineInfoError::ApiError(
                "No completion candidates returned".to_string(),
            ));
        };
        trace!(finish_reason = ?candidate.finish_reason, "Completion finish reason");

        // Grounded answers may be split across several parts
        let text: String = candidate
            .content
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() {
            error!(finish_reason = ?candidate.finish_reason, "No text content in Gemini response");
            return Err(CineInfoError::ApiError(
                "No text content in response".to_string(),
            ));
        }

        debug!(content_len = text.len(), "Extracted text content from response");
        Ok(text)
    }
}
