use crate::error::{CineInfoError, Result};
use reqwest::Response;
use tracing::error;

/// Remove markdown code fences from a model reply.
///
/// Replies opened with ```` ```json ```` lose every ```` ```json ```` and
/// ```` ``` ```` marker; replies opened with a bare ```` ``` ```` lose every
/// ```` ``` ```` marker. Anything else is only trimmed.
///
/// ```
/// use cineinfo::clean_markdown_response;
///
/// let raw = "```json\n{\"title\": \"Alien\"}\n```";
/// assert_eq!(clean_markdown_response(raw), "{\"title\": \"Alien\"}");
/// ```
pub fn clean_markdown_response(response: &str) -> String {
    let trimmed = response.trim();

    if trimmed.starts_with("```json") {
        trimmed
            .replace("```json", "")
            .replace("```", "")
            .trim()
            .to_string()
    } else if trimmed.starts_with("```") {
        trimmed.replace("```", "").trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Convert a reqwest error to a CineInfoError.
///
/// The request URL is dropped from the error since it carries the API key.
pub fn handle_http_error(e: reqwest::Error, provider_name: &str) -> CineInfoError {
    let e = e.without_url();
    error!(error = %e, "HTTP request to {} failed", provider_name);
    CineInfoError::HttpError(e)
}

/// Check HTTP response status and extract error message if unsuccessful.
pub async fn check_response_status(response: Response, provider_name: &str) -> Result<Response> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await?;
        error!(
            status = %status,
            error = %error_text,
            "{} API returned error response", provider_name
        );
        return Err(CineInfoError::ApiError(format!(
            "{} API error ({}): {}",
            provider_name, status, error_text
        )));
    }
    Ok(response)
}
