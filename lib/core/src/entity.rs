use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Years at or below this value are placeholders from incomplete sources
pub const SENTINEL_YEAR: i32 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MovieId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

impl ActorId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl MovieId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Actor,
    Movie,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Actor => write!(f, "Actor"),
            EntityKind::Movie => write!(f, "Movie"),
        }
    }
}

/// Per-endpoint edge handles, in the order the edges were linked
pub type EdgeList = SmallVec<[EdgeId; 8]>;

/// A weighted actor/movie relationship.
///
/// There is exactly one record per pair; both endpoints refer to it by
/// [`EdgeId`], so the weight seen from either side is always the same.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub actor: ActorId,
    pub movie: MovieId,
    pub weight: f64,
}

/// An actor and the films they claim to star in.
///
/// Equality is name + age, hashing is by name only: two distinct people
/// sharing a name collide in hashed collections.
#[derive(Debug, Clone)]
pub struct Actor {
    pub name: String,
    pub age: i32,
    /// Total gross. `None` means "derive from edge weights".
    pub gross_value: Option<f64>,
    /// Claimed filmography; may name movies absent from the graph
    pub movies_starred_in: Vec<String>,
    pub(crate) edges: EdgeList,
}

impl Actor {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, age: i32, gross_value: Option<f64>) -> Self {
        Self {
            name: name.into(),
            age,
            gross_value,
            movies_starred_in: Vec::new(),
            edges: EdgeList::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_movies<I, S>(mut self, movies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.movies_starred_in = movies.into_iter().map(Into::into).collect();
        self
    }

    /// Add a movie to the claimed filmography unless already listed
    pub fn add_movie(&mut self, movie: &str) {
        if !self.movies_starred_in.iter().any(|m| m == movie) {
            self.movies_starred_in.push(movie.to_string());
        }
    }

    pub fn remove_movie(&mut self, movie: &str) {
        self.movies_starred_in.retain(|m| m != movie);
    }

    #[inline]
    pub fn edge_ids(&self) -> &[EdgeId] {
        &self.edges
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

impl PartialEq for Actor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.age == other.age
    }
}

impl Eq for Actor {}

impl Hash for Actor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}y/o", self.name, self.age)
    }
}

/// A movie and the cast it claims.
///
/// Equality is name + release year, hashing is by name only.
#[derive(Debug, Clone)]
pub struct Movie {
    pub name: String,
    pub year_released: i32,
    /// Box-office total
    pub gross_value: f64,
    /// Claimed cast in billing order; may name actors absent from the graph
    pub actors: Vec<String>,
    pub(crate) edges: EdgeList,
}

impl Movie {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, year_released: i32, gross_value: f64) -> Self {
        Self {
            name: name.into(),
            year_released,
            gross_value,
            actors: Vec::new(),
            edges: EdgeList::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_actors<I, S>(mut self, actors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actors = actors.into_iter().map(Into::into).collect();
        self
    }

    /// Add an actor to the claimed cast unless already listed
    pub fn add_actor(&mut self, actor: &str) {
        if !self.actors.iter().any(|a| a == actor) {
            self.actors.push(actor.to_string());
        }
    }

    pub fn remove_actor(&mut self, actor: &str) {
        self.actors.retain(|a| a != actor);
    }

    /// Whether the release year is a real one rather than a placeholder
    #[inline]
    pub fn has_valid_year(&self) -> bool {
        self.year_released > SENTINEL_YEAR
    }

    #[inline]
    pub fn edge_ids(&self) -> &[EdgeId] {
        &self.edges
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.year_released == other.year_released
    }
}

impl Eq for Movie {}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}\n${}", self.name, self.year_released, self.gross_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;

    #[test]
    fn test_actor_equality_uses_name_and_age() {
        let a = Actor::new("Morgan Freeman", 80, None);
        let b = Actor::new("Morgan Freeman", 80, Some(1.0));
        let c = Actor::new("Morgan Freeman", 81, None);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_same_name_collides_in_hash_set() {
        let mut set = AHashSet::new();
        set.insert(Movie::new("Glory", 1989, 1.0));
        // Different year: not equal, so both are kept, but they share a bucket
        set.insert(Movie::new("Glory", 1990, 1.0));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Movie::new("Glory", 1989, 0.0)));
    }

    #[test]
    fn test_claim_lists_deduplicate() {
        let mut actor = Actor::new("Jeff Daniels", 63, None);
        actor.add_movie("The Martian");
        actor.add_movie("The Martian");
        assert_eq!(actor.movies_starred_in, vec!["The Martian"]);
        actor.remove_movie("The Martian");
        assert!(actor.movies_starred_in.is_empty());

        let mut movie = Movie::new("Marie", 1985, 2507995.0);
        movie.add_actor("Sissy Spacek");
        movie.add_actor("Sissy Spacek");
        assert_eq!(movie.actors.len(), 1);
    }

    #[test]
    fn test_sentinel_year() {
        assert!(!Movie::new("Unknown", 0, 0.0).has_valid_year());
        assert!(!Movie::new("Unknown", SENTINEL_YEAR, 0.0).has_valid_year());
        assert!(Movie::new("Brubaker", 1980, 0.0).has_valid_year());
    }
}
