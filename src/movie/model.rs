use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Inbound lookup request.
///
/// `title` is not length-checked: an empty string is a valid query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MovieQuery {
    /// Title of the movie to look up
    #[schema(examples("Interstellar", "The Matrix", "Inception", "Titanic"))]
    pub title: String,
}

/// Movie metadata as produced by the model.
///
/// All values are opaque strings. `box_office` stays text even when the
/// model replies with a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MovieInfo {
    /// Movie title
    #[schema(examples("Interstellar"))]
    pub title: String,
    /// Release date of the movie
    #[schema(examples("2014-11-07"))]
    pub release_date: String,
    /// Box office takings
    #[schema(examples("$677,471,339"))]
    pub box_office: String,
    /// Movie synopsis
    #[schema(examples(
        "Um grupo de exploradores viaja através de um buraco de minhoca próximo a Saturno em uma missão para garantir a sobrevivência da humanidade."
    ))]
    pub synopsis: String,
}
