//! HTTP surface: `POST /chat/completions/movie` and its OpenAPI document.

use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use utoipa::{OpenApi, ToSchema};

use crate::error::CineInfoError;
use crate::movie::{MovieInfo, MovieInfoProvider, MovieQuery};

pub const MOVIE_ROUTE: &str = "/chat/completions/movie";
pub const OPENAPI_ROUTE: &str = "/openapi.json";

/// Prefix of the `detail` message for failed lookups.
pub const LOOKUP_ERROR_PREFIX: &str = "Error getting movie information";

/// OpenAPI description of the service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CineInfo API",
        description = "CineInfo API provides movie information using Google's Gemini model.",
        version = "1.0.0"
    ),
    paths(get_movie_info),
    components(schemas(MovieQuery, MovieInfo, ErrorDetail)),
    tags((name = "Movies", description = "Movie information lookups"))
)]
pub struct ApiDoc;

/// Error body returned by every failing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    #[schema(examples("Error getting movie information: API error: ..."))]
    pub detail: String,
}

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MovieInfoProvider>,
}

/// Errors surfaced to HTTP clients as `{"detail": ...}`.
#[derive(Debug)]
pub enum ApiError {
    /// Body is not a valid `MovieQuery`
    InvalidRequest(String),
    /// Anything that went wrong while looking the movie up
    Lookup(CineInfoError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::InvalidRequest(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            ApiError::Lookup(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{}: {}", LOOKUP_ERROR_PREFIX, e),
            ),
        };
        (status, Json(ErrorDetail { detail })).into_response()
    }
}

pub fn build_router(provider: Arc<dyn MovieInfoProvider>) -> Router {
    Router::new()
        .route(MOVIE_ROUTE, post(get_movie_info))
        .route(OPENAPI_ROUTE, get(openapi_document))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { provider })
}

#[utoipa::path(
    post,
    path = "/chat/completions/movie",
    tag = "Movies",
    request_body = MovieQuery,
    responses(
        (status = 200, description = "Movie information", body = MovieInfo),
        (status = 422, description = "Request body is not a valid movie query", body = ErrorDetail),
        (status = 500, description = "The lookup failed", body = ErrorDetail)
    )
)]
async fn get_movie_info(
    State(state): State<AppState>,
    payload: Result<Json<MovieQuery>, JsonRejection>,
) -> Result<Json<MovieInfo>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected movie request body");
        ApiError::InvalidRequest(rejection.body_text())
    })?;

    info!(title = %request.title, "Processing movie request");

    match state.provider.get_movie_info(&request.title).await {
        Ok(movie) => {
            info!(title = %request.title, "Movie request completed");
            Ok(Json(movie))
        }
        Err(e) => {
            error!(title = %request.title, error = %e, "Movie request failed");
            Err(ApiError::Lookup(e))
        }
    }
}

async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
