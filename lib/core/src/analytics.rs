// Aggregate statistics over sets of actors
use serde::Serialize;

use crate::entity::ActorId;
use crate::{Error, Graph, Result};

/// Added to filmography size when apportioning an actor's gross per movie
pub const FILMOGRAPHY_DAMPING: f64 = 1.0;

/// Headline numbers for a built graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub actor_count: usize,
    pub movie_count: usize,
    pub edge_count: usize,
    pub hub_actors: Vec<String>,
    pub hub_average_gross_per_movie: Option<f64>,
    pub average_gross_per_movie: Option<f64>,
}

impl Graph {
    /// An actor's gross divided by their damped filmography size
    pub fn gross_value_per_movie(&self, id: ActorId) -> Option<f64> {
        let actor = self.actor(id)?;
        let films = actor.movies_starred_in.len() as f64 + FILMOGRAPHY_DAMPING;
        Some(self.actor_gross_value(id) / films)
    }

    /// Mean of [`Graph::gross_value_per_movie`] over the given actors.
    ///
    /// Ids that do not resolve are skipped. Fails on an empty set.
    pub fn average_gross_value_per_movie<I>(&self, actors: I) -> Result<f64>
    where
        I: IntoIterator<Item = ActorId>,
    {
        let (total, count) = actors
            .into_iter()
            .filter_map(|id| self.gross_value_per_movie(id))
            .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
        if count == 0 {
            return Err(Error::EmptyAggregate("actors"));
        }
        Ok(total / count as f64)
    }

    /// [`Graph::average_gross_value_per_movie`] over actors looked up by name
    pub fn average_gross_value_per_movie_by_name<S: AsRef<str>>(&self, names: &[S]) -> Result<f64> {
        self.average_gross_value_per_movie(names.iter().filter_map(|n| self.actor_id(n.as_ref())))
    }

    /// [`Graph::average_gross_value_per_movie`] over every actor
    pub fn average_gross_value_per_movie_all(&self) -> Result<f64> {
        self.average_gross_value_per_movie(self.actor_ids())
    }

    pub fn summary(&self, hubs: usize) -> GraphSummary {
        let hub_actors = self.hub_actors(hubs);
        GraphSummary {
            actor_count: self.actor_count(),
            movie_count: self.movie_count(),
            edge_count: self.edge_count(),
            hub_average_gross_per_movie: self.average_gross_value_per_movie_by_name(hub_actors.as_slice()).ok(),
            average_gross_per_movie: self.average_gross_value_per_movie_all().ok(),
            hub_actors,
        }
    }
}
