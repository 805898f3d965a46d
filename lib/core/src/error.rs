use thiserror::Error;

use crate::entity::EntityKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Actor not found: {0}")]
    ActorNotFound(String),

    #[error("Movie not found: {0}")]
    MovieNotFound(String),

    #[error("{kind} already exists: {name}")]
    DuplicateName { kind: EntityKind, name: String },

    #[error("Unknown {kind} field: {field}")]
    UnknownField { kind: EntityKind, field: String },

    #[error("Cannot aggregate over an empty set of {0}")]
    EmptyAggregate(&'static str),

    #[error("Weighting for movie {movie} produced {actual} weights for {expected} edges")]
    WeightCountMismatch {
        movie: String,
        expected: usize,
        actual: usize,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
