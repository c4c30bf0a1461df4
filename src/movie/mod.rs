//! Movie lookup: data model and the model-backed service.

mod model;
mod service;

pub use model::{MovieInfo, MovieQuery};
pub use service::{
    MovieInfoProvider, MovieService, RESPONSE_LANGUAGE, build_prompt, parse_movie_info,
};
