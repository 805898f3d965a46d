// Typed partial updates for actors and movies
use serde::{Deserialize, Serialize};

use crate::entity::{Actor, ActorId, Movie, MovieId};
use crate::{Error, Graph, Result};

/// Mutable actor fields, keyed by their wire names.
///
/// Unknown keys are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActorUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, rename = "total_gross", skip_serializing_if = "Option::is_none")]
    pub gross_value: Option<f64>,
    #[serde(default, rename = "movies", skip_serializing_if = "Option::is_none")]
    pub movies_starred_in: Option<Vec<String>>,
}

/// Mutable movie fields, keyed by their wire names.
///
/// Unknown keys are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MovieUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "year", skip_serializing_if = "Option::is_none")]
    pub year_released: Option<i32>,
    #[serde(default, rename = "box_office", skip_serializing_if = "Option::is_none")]
    pub gross_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<Vec<String>>,
}

impl ActorUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// A new actor built from this update, named `fallback_name` unless
    /// the update carries a name
    pub fn into_actor(self, fallback_name: &str) -> Actor {
        let name = self.name.unwrap_or_else(|| fallback_name.to_string());
        Actor::new(name, self.age.unwrap_or_default(), self.gross_value)
            .with_movies(self.movies_starred_in.unwrap_or_default())
    }
}

impl MovieUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// A new movie built from this update, named `fallback_name` unless
    /// the update carries a name
    pub fn into_movie(self, fallback_name: &str) -> Movie {
        let name = self.name.unwrap_or_else(|| fallback_name.to_string());
        Movie::new(name, self.year_released.unwrap_or_default(), self.gross_value.unwrap_or_default())
            .with_actors(self.actors.unwrap_or_default())
    }
}

impl Graph {
    /// Apply an update to an actor. A rename is applied first; if the new
    /// name is taken nothing changes.
    ///
    /// Edges are not relinked: run the builder again after changing claims.
    pub fn update_actor(&mut self, id: ActorId, update: ActorUpdate) -> Result<()> {
        if let Some(name) = update.name {
            self.rename_actor(id, name)?;
        }
        let actor = self
            .actor_mut(id)
            .ok_or_else(|| Error::ActorNotFound(format!("#{}", id.0)))?;
        if let Some(age) = update.age {
            actor.age = age;
        }
        if let Some(gross) = update.gross_value {
            actor.gross_value = Some(gross);
        }
        if let Some(movies) = update.movies_starred_in {
            actor.movies_starred_in = movies;
        }
        Ok(())
    }

    /// Apply an update to a movie. A rename is applied first; if the new
    /// name is taken nothing changes.
    ///
    /// Edge weights are not recomputed when the gross value changes.
    pub fn update_movie(&mut self, id: MovieId, update: MovieUpdate) -> Result<()> {
        if let Some(name) = update.name {
            self.rename_movie(id, name)?;
        }
        let movie = self
            .movie_mut(id)
            .ok_or_else(|| Error::MovieNotFound(format!("#{}", id.0)))?;
        if let Some(year) = update.year_released {
            movie.year_released = year;
        }
        if let Some(gross) = update.gross_value {
            movie.gross_value = gross;
        }
        if let Some(actors) = update.actors {
            movie.actors = actors;
        }
        Ok(())
    }

    /// Update the named actor, or insert it when absent
    pub fn upsert_actor(&mut self, name: &str, update: ActorUpdate) -> Result<ActorId> {
        match self.actor_id(name) {
            Some(id) => {
                self.update_actor(id, update)?;
                Ok(id)
            }
            None => self.insert_actor(update.into_actor(name)),
        }
    }

    /// Update the named movie, or insert it when absent
    pub fn upsert_movie(&mut self, name: &str, update: MovieUpdate) -> Result<MovieId> {
        match self.movie_id(name) {
            Some(id) => {
                self.update_movie(id, update)?;
                Ok(id)
            }
            None => self.insert_movie(update.into_movie(name)),
        }
    }
}
