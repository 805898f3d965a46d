// Arena-backed bipartite actor/movie graph
use ahash::AHashMap;
use serde::Serialize;
use tracing::warn;

use crate::entity::{Actor, ActorId, Edge, EdgeId, EntityKind, Movie, MovieId};
use crate::record::{ActorRecord, ActorView, MovieRecord, MovieView};
use crate::{Error, Result};

/// Returned by [`Graph::edge_weight`] when the pair is not linked
pub const NO_EDGE_WEIGHT: f64 = -1.0;

/// Two input records that shared a name during ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameCollision {
    pub kind: EntityKind,
    pub name: String,
}

/// Actors, movies and the weighted edges between them.
///
/// Entities are stored in insertion order and addressed by synthetic ids;
/// names are only a lookup key. Removed entities leave a tombstone so ids
/// stay stable for the lifetime of the graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    actors: Vec<Option<Actor>>,
    movies: Vec<Option<Movie>>,
    edges: Vec<Option<Edge>>,
    actor_index: AHashMap<String, ActorId>,
    movie_index: AHashMap<String, MovieId>,
    edge_index: AHashMap<(ActorId, MovieId), EdgeId>,
    collisions: Vec<NameCollision>,
}

impl Graph {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an unlinked graph from raw records.
    ///
    /// A record whose name was already seen replaces the earlier one and is
    /// reported through [`Graph::name_collisions`].
    pub fn from_records<A, M>(actors: A, movies: M) -> Self
    where
        A: IntoIterator<Item = ActorRecord>,
        M: IntoIterator<Item = MovieRecord>,
    {
        Self::from_entities(
            actors.into_iter().map(Actor::from),
            movies.into_iter().map(Movie::from),
        )
    }

    pub fn from_entities<A, M>(actors: A, movies: M) -> Self
    where
        A: IntoIterator<Item = Actor>,
        M: IntoIterator<Item = Movie>,
    {
        let mut graph = Self::new();
        for actor in actors {
            graph.ingest_actor(actor);
        }
        for movie in movies {
            graph.ingest_movie(movie);
        }
        graph
    }

    fn ingest_actor(&mut self, mut actor: Actor) {
        actor.edges.clear();
        match self.actor_index.get(&actor.name).copied() {
            Some(id) => {
                warn!("Duplicate actor name in input: {}", actor.name);
                self.collisions.push(NameCollision {
                    kind: EntityKind::Actor,
                    name: actor.name.clone(),
                });
                if let Some(existing) = self.actors[id.index()].as_mut() {
                    actor.edges = std::mem::take(&mut existing.edges);
                    *existing = actor;
                }
            }
            None => {
                let id = ActorId(self.actors.len() as u32);
                self.actor_index.insert(actor.name.clone(), id);
                self.actors.push(Some(actor));
            }
        }
    }

    fn ingest_movie(&mut self, mut movie: Movie) {
        movie.edges.clear();
        match self.movie_index.get(&movie.name).copied() {
            Some(id) => {
                warn!("Duplicate movie name in input: {}", movie.name);
                self.collisions.push(NameCollision {
                    kind: EntityKind::Movie,
                    name: movie.name.clone(),
                });
                if let Some(existing) = self.movies[id.index()].as_mut() {
                    movie.edges = std::mem::take(&mut existing.edges);
                    *existing = movie;
                }
            }
            None => {
                let id = MovieId(self.movies.len() as u32);
                self.movie_index.insert(movie.name.clone(), id);
                self.movies.push(Some(movie));
            }
        }
    }

    /// Name collisions seen while ingesting records
    #[inline]
    pub fn name_collisions(&self) -> &[NameCollision] {
        &self.collisions
    }

    /// Insert a new, unlinked actor
    pub fn insert_actor(&mut self, mut actor: Actor) -> Result<ActorId> {
        if self.actor_index.contains_key(&actor.name) {
            return Err(Error::DuplicateName {
                kind: EntityKind::Actor,
                name: actor.name,
            });
        }
        actor.edges.clear();
        let id = ActorId(self.actors.len() as u32);
        self.actor_index.insert(actor.name.clone(), id);
        self.actors.push(Some(actor));
        Ok(id)
    }

    /// Insert a new, unlinked movie
    pub fn insert_movie(&mut self, mut movie: Movie) -> Result<MovieId> {
        if self.movie_index.contains_key(&movie.name) {
            return Err(Error::DuplicateName {
                kind: EntityKind::Movie,
                name: movie.name,
            });
        }
        movie.edges.clear();
        let id = MovieId(self.movies.len() as u32);
        self.movie_index.insert(movie.name.clone(), id);
        self.movies.push(Some(movie));
        Ok(id)
    }

    /// Remove an actor and every edge touching it.
    ///
    /// Movie cast lists still name the actor afterwards.
    pub fn remove_actor(&mut self, name: &str) -> Option<Actor> {
        let id = self.actor_index.remove(name)?;
        let mut actor = self.actors[id.index()].take()?;
        for edge_id in std::mem::take(&mut actor.edges) {
            if let Some(edge) = self.edges[edge_id.index()].take() {
                self.edge_index.remove(&(edge.actor, edge.movie));
                if let Some(movie) = self.movies[edge.movie.index()].as_mut() {
                    movie.edges.retain(|e| *e != edge_id);
                }
            }
        }
        Some(actor)
    }

    /// Remove a movie and every edge touching it.
    ///
    /// Actor filmographies still name the movie afterwards.
    pub fn remove_movie(&mut self, name: &str) -> Option<Movie> {
        let id = self.movie_index.remove(name)?;
        let mut movie = self.movies[id.index()].take()?;
        for edge_id in std::mem::take(&mut movie.edges) {
            if let Some(edge) = self.edges[edge_id.index()].take() {
                self.edge_index.remove(&(edge.actor, edge.movie));
                if let Some(actor) = self.actors[edge.actor.index()].as_mut() {
                    actor.edges.retain(|e| *e != edge_id);
                }
            }
        }
        Some(movie)
    }

    pub(crate) fn rename_actor(&mut self, id: ActorId, new_name: String) -> Result<()> {
        let old_name = self.actor(id).map(|a| a.name.clone()).ok_or_else(|| {
            Error::ActorNotFound(format!("#{}", id.0))
        })?;
        if old_name == new_name {
            return Ok(());
        }
        if self.actor_index.contains_key(&new_name) {
            return Err(Error::DuplicateName {
                kind: EntityKind::Actor,
                name: new_name,
            });
        }
        self.actor_index.remove(&old_name);
        self.actor_index.insert(new_name.clone(), id);
        if let Some(actor) = self.actors[id.index()].as_mut() {
            actor.name = new_name;
        }
        Ok(())
    }

    pub(crate) fn rename_movie(&mut self, id: MovieId, new_name: String) -> Result<()> {
        let old_name = self.movie(id).map(|m| m.name.clone()).ok_or_else(|| {
            Error::MovieNotFound(format!("#{}", id.0))
        })?;
        if old_name == new_name {
            return Ok(());
        }
        if self.movie_index.contains_key(&new_name) {
            return Err(Error::DuplicateName {
                kind: EntityKind::Movie,
                name: new_name,
            });
        }
        self.movie_index.remove(&old_name);
        self.movie_index.insert(new_name.clone(), id);
        if let Some(movie) = self.movies[id.index()].as_mut() {
            movie.name = new_name;
        }
        Ok(())
    }

    #[inline]
    pub fn actor_id(&self, name: &str) -> Option<ActorId> {
        self.actor_index.get(name).copied()
    }

    #[inline]
    pub fn movie_id(&self, name: &str) -> Option<MovieId> {
        self.movie_index.get(name).copied()
    }

    #[inline]
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id.index()).and_then(Option::as_mut)
    }

    #[inline]
    pub(crate) fn movie_mut(&mut self, id: MovieId) -> Option<&mut Movie> {
        self.movies.get_mut(id.index()).and_then(Option::as_mut)
    }

    #[inline]
    pub fn actor_by_name(&self, name: &str) -> Option<&Actor> {
        self.actor_id(name).and_then(|id| self.actor(id))
    }

    #[inline]
    pub fn movie_by_name(&self, name: &str) -> Option<&Movie> {
        self.movie_id(name).and_then(|id| self.movie(id))
    }

    /// Live actors in insertion order
    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Actor)> + '_ {
        self.actors
            .iter()
            .enumerate()
            .filter_map(|(i, a)| a.as_ref().map(|a| (ActorId(i as u32), a)))
    }

    /// Live movies in insertion order
    pub fn movies(&self) -> impl Iterator<Item = (MovieId, &Movie)> + '_ {
        self.movies
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.as_ref().map(|m| (MovieId(i as u32), m)))
    }

    #[inline]
    pub fn actor_ids(&self) -> Vec<ActorId> {
        self.actors().map(|(id, _)| id).collect()
    }

    #[inline]
    pub fn movie_ids(&self) -> Vec<MovieId> {
        self.movies().map(|(id, _)| id).collect()
    }

    #[inline]
    pub fn actor_count(&self) -> usize {
        self.actor_index.len()
    }

    #[inline]
    pub fn movie_count(&self) -> usize {
        self.movie_index.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_index.len()
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn find_edge(&self, actor: ActorId, movie: MovieId) -> Option<EdgeId> {
        self.edge_index.get(&(actor, movie)).copied()
    }

    /// Link an actor and a movie, or overwrite the weight of an existing link.
    ///
    /// Repeating the same call leaves the graph unchanged.
    pub fn add_edge(&mut self, actor: ActorId, movie: MovieId, weight: f64) -> Result<EdgeId> {
        if let Some(edge_id) = self.find_edge(actor, movie) {
            self.set_edge_weight(edge_id, weight);
            return Ok(edge_id);
        }

        let edge_id = EdgeId(self.edges.len() as u32);
        let actor_node = self.actors
            .get_mut(actor.index())
            .and_then(Option::as_mut)
            .ok_or_else(|| Error::ActorNotFound(format!("#{}", actor.0)))?;
        let movie_node = self.movies
            .get_mut(movie.index())
            .and_then(Option::as_mut)
            .ok_or_else(|| Error::MovieNotFound(format!("#{}", movie.0)))?;

        actor_node.edges.push(edge_id);
        movie_node.edges.push(edge_id);
        self.edges.push(Some(Edge { actor, movie, weight }));
        self.edge_index.insert((actor, movie), edge_id);
        Ok(edge_id)
    }

    /// Unlink an actor and a movie. Returns the weight the edge carried.
    pub fn remove_edge(&mut self, actor: ActorId, movie: MovieId) -> Option<f64> {
        let edge_id = self.edge_index.remove(&(actor, movie))?;
        let edge = self.edges[edge_id.index()].take()?;
        if let Some(a) = self.actor_mut(actor) {
            a.edges.retain(|e| *e != edge_id);
        }
        if let Some(m) = self.movie_mut(movie) {
            m.edges.retain(|e| *e != edge_id);
        }
        Some(edge.weight)
    }

    /// Weight of the actor/movie edge, or [`NO_EDGE_WEIGHT`]
    pub fn edge_weight(&self, actor: ActorId, movie: MovieId) -> f64 {
        self.find_edge(actor, movie)
            .and_then(|id| self.edge(id))
            .map(|edge| edge.weight)
            .unwrap_or(NO_EDGE_WEIGHT)
    }

    pub(crate) fn set_edge_weight(&mut self, id: EdgeId, weight: f64) {
        if let Some(edge) = self.edges.get_mut(id.index()).and_then(Option::as_mut) {
            edge.weight = weight;
        }
    }

    /// (movie, weight) for each of the actor's edges, in link order
    pub fn actor_edges(&self, id: ActorId) -> impl Iterator<Item = (MovieId, f64)> + '_ {
        self.actor(id)
            .into_iter()
            .flat_map(|a| a.edges.iter())
            .filter_map(move |e| self.edge(*e).map(|edge| (edge.movie, edge.weight)))
    }

    /// (actor, weight) for each of the movie's edges, in link order
    pub fn movie_edges(&self, id: MovieId) -> impl Iterator<Item = (ActorId, f64)> + '_ {
        self.movie(id)
            .into_iter()
            .flat_map(|m| m.edges.iter())
            .filter_map(move |e| self.edge(*e).map(|edge| (edge.actor, edge.weight)))
    }

    /// The actor's gross value: the stored one, else the sum of edge weights
    pub fn actor_gross_value(&self, id: ActorId) -> f64 {
        match self.actor(id) {
            Some(actor) => actor
                .gross_value
                .unwrap_or_else(|| self.actor_edges(id).map(|(_, w)| w).sum()),
            None => 0.0,
        }
    }

    pub fn actor_view(&self, id: ActorId) -> Option<ActorView> {
        let actor = self.actor(id)?;
        let (edges, edge_weights) = self
            .actor_edges(id)
            .filter_map(|(m, w)| self.movie(m).map(|movie| (movie.name.clone(), w)))
            .unzip();
        Some(ActorView {
            name: actor.name.clone(),
            age: actor.age,
            gross_value: actor.gross_value,
            movies_starred_in: actor.movies_starred_in.clone(),
            edges,
            edge_weights,
        })
    }

    pub fn movie_view(&self, id: MovieId) -> Option<MovieView> {
        let movie = self.movie(id)?;
        let (edges, edge_weights) = self
            .movie_edges(id)
            .filter_map(|(a, w)| self.actor(a).map(|actor| (actor.name.clone(), w)))
            .unzip();
        Some(MovieView {
            name: movie.name.clone(),
            year_released: movie.year_released,
            gross_value: movie.gross_value,
            actors: movie.actors.clone(),
            edges,
            edge_weights,
        })
    }
}
