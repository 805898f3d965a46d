// Data shapes crossing into and out of the graph
use serde::{Deserialize, Serialize};

use crate::entity::{Actor, Movie};

/// Actor as produced by scrapers and data files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorRecord {
    pub name: String,
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub total_gross: Option<f64>,
    #[serde(default)]
    pub movies: Vec<String>,
}

/// Movie as produced by scrapers and data files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub name: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub box_office: f64,
    #[serde(default)]
    pub actors: Vec<String>,
}

impl From<ActorRecord> for Actor {
    fn from(record: ActorRecord) -> Self {
        Actor::new(record.name, record.age, record.total_gross).with_movies(record.movies)
    }
}

impl From<MovieRecord> for Movie {
    fn from(record: MovieRecord) -> Self {
        Movie::new(record.name, record.year, record.box_office).with_actors(record.actors)
    }
}

/// Serialized form of an actor, edges rendered as movie names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    pub name: String,
    pub age: i32,
    pub gross_value: Option<f64>,
    pub movies_starred_in: Vec<String>,
    pub edges: Vec<String>,
    pub edge_weights: Vec<f64>,
}

/// Serialized form of a movie, edges rendered as actor names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieView {
    pub name: String,
    pub year_released: i32,
    pub gross_value: f64,
    pub actors: Vec<String>,
    pub edges: Vec<String>,
    pub edge_weights: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_record_defaults() {
        let record: ActorRecord =
            serde_json::from_str(r#"{"name": "Murray Hamilton", "age": 64}"#).unwrap();
        assert_eq!(record.total_gross, None);
        assert!(record.movies.is_empty());

        let actor = Actor::from(record);
        assert_eq!(actor.name, "Murray Hamilton");
        assert_eq!(actor.gross_value, None);
    }

    #[test]
    fn test_movie_record_into_movie() {
        let record: MovieRecord = serde_json::from_str(
            r#"{"name": "Brubaker", "year": 1980, "box_office": 371217082.0,
                "actors": ["Robert Redford", "Yaphet Kotto"]}"#,
        )
        .unwrap();
        let movie = Movie::from(record);
        assert_eq!(movie.year_released, 1980);
        assert_eq!(movie.actors, vec!["Robert Redford", "Yaphet Kotto"]);
        assert_eq!(movie.degree(), 0);
    }
}
