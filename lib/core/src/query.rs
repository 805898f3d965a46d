// Read-only traversals and rankings over a built graph
use ahash::AHashSet;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::entity::{ActorId, MovieId};
use crate::Graph;

/// Returned by scalar lookups when the name is unknown
pub const NOT_FOUND_VALUE: f64 = -1.0;

/// Node of a reduced subgraph handed to renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SubgraphNode {
    Actor { name: String, age: i32 },
    Movie { name: String, year_released: i32, gross_value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubgraphEdge {
    pub actor: String,
    pub movie: String,
    pub weight: f64,
}

/// A set of actors, the movies they share, and the edges among them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Subgraph {
    pub nodes: Vec<SubgraphNode>,
    pub edges: Vec<SubgraphEdge>,
}

impl Graph {
    /// Gross value of a movie, or [`NOT_FOUND_VALUE`]
    pub fn movie_gross_value(&self, name: &str) -> f64 {
        self.movie_by_name(name)
            .map(|m| m.gross_value)
            .unwrap_or(NOT_FOUND_VALUE)
    }

    /// Claimed filmography of an actor; empty when unknown
    pub fn movies_starred_in(&self, name: &str) -> &[String] {
        self.actor_by_name(name)
            .map(|a| a.movies_starred_in.as_slice())
            .unwrap_or(&[])
    }

    /// Claimed cast of a movie; empty when unknown
    pub fn starred_actors(&self, name: &str) -> &[String] {
        self.movie_by_name(name)
            .map(|m| m.actors.as_slice())
            .unwrap_or(&[])
    }

    /// Number of distinct names across the cast lists of every movie the
    /// actor is linked to. The actor's own name is counted when it appears
    /// in those lists.
    pub fn reachable_actor_count(&self, id: ActorId) -> usize {
        let mut reachable: AHashSet<&str> = AHashSet::new();
        for (movie_id, _) in self.actor_edges(id) {
            if let Some(movie) = self.movie(movie_id) {
                reachable.extend(movie.actors.iter().map(String::as_str));
            }
        }
        reachable.len()
    }

    /// The `n` actors with the largest 2-hop neighbourhoods.
    ///
    /// Ties keep insertion order.
    pub fn hub_actors(&self, n: usize) -> Vec<String> {
        let mut ranked: Vec<(&str, usize)> = self
            .actors()
            .map(|(id, actor)| (actor.name.as_str(), self.reachable_actor_count(id)))
            .collect();
        ranked.sort_by_key(|(_, count)| Reverse(*count));
        ranked.into_iter().take(n).map(|(name, _)| name.to_string()).collect()
    }

    /// The `n` actors with the highest gross value, highest first
    pub fn n_highest_grossing_actors(&self, n: usize) -> Vec<String> {
        let mut ranked: Vec<(&str, OrderedFloat<f64>)> = self
            .actors()
            .map(|(id, actor)| (actor.name.as_str(), OrderedFloat(self.actor_gross_value(id))))
            .collect();
        ranked.sort_by_key(|(_, gross)| Reverse(*gross));
        ranked.into_iter().take(n).map(|(name, _)| name.to_string()).collect()
    }

    /// The `n` oldest actors, oldest first
    pub fn n_oldest_actors(&self, n: usize) -> Vec<String> {
        let mut ranked: Vec<(&str, i32)> = self
            .actors()
            .map(|(_, actor)| (actor.name.as_str(), actor.age))
            .collect();
        ranked.sort_by_key(|(_, age)| Reverse(*age));
        ranked.into_iter().take(n).map(|(name, _)| name.to_string()).collect()
    }

    /// Movies released in `year`. Placeholder years never match.
    pub fn movies_in_year(&self, year: i32) -> Vec<String> {
        self.movies()
            .filter(|(_, m)| m.has_valid_year() && m.year_released == year)
            .map(|(_, m)| m.name.clone())
            .collect()
    }

    /// Distinct cast members of the movies released in `year`, first seen first
    pub fn actors_in_year(&self, year: i32) -> Vec<String> {
        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut actors = Vec::new();
        for (_, movie) in self.movies() {
            if !movie.has_valid_year() || movie.year_released != year {
                continue;
            }
            for name in &movie.actors {
                if seen.insert(name.as_str()) {
                    actors.push(name.clone());
                }
            }
        }
        actors
    }

    /// Releases per year, placeholder years excluded
    pub fn movies_per_year(&self) -> BTreeMap<i32, usize> {
        let mut histogram = BTreeMap::new();
        for (_, movie) in self.movies().filter(|(_, m)| m.has_valid_year()) {
            *histogram.entry(movie.year_released).or_insert(0) += 1;
        }
        histogram
    }

    /// (age, gross value) for every actor
    pub fn age_gross_series(&self) -> Vec<(i32, f64)> {
        self.actors()
            .map(|(id, actor)| (actor.age, self.actor_gross_value(id)))
            .collect()
    }

    /// (age, size of claimed filmography) for every actor
    pub fn age_movie_count_series(&self) -> Vec<(i32, usize)> {
        self.actors()
            .map(|(_, actor)| (actor.age, actor.movies_starred_in.len()))
            .collect()
    }

    /// Movies linked to at least two of the given actors.
    ///
    /// Unknown names are ignored. Order follows the first actor (in input
    /// order) that reaches each movie.
    pub fn movies_of_actors<S: AsRef<str>>(&self, names: &[S]) -> Vec<MovieId> {
        let ordered: Vec<ActorId> = names
            .iter()
            .filter_map(|name| self.actor_id(name.as_ref()))
            .collect();
        let members: AHashSet<ActorId> = ordered.iter().copied().collect();

        let mut visited: AHashSet<MovieId> = AHashSet::new();
        let mut shared = Vec::new();
        for &actor_id in &ordered {
            for (movie_id, _) in self.actor_edges(actor_id) {
                if !visited.insert(movie_id) {
                    continue;
                }
                let linked_members = self
                    .movie_edges(movie_id)
                    .filter(|(a, _)| members.contains(a))
                    .count();
                if linked_members > 1 {
                    shared.push(movie_id);
                }
            }
        }
        shared
    }

    /// The given actors, their co-starring movies, and the edges among them
    pub fn hub_subgraph<S: AsRef<str>>(&self, names: &[S]) -> Subgraph {
        let movie_ids = self.movies_of_actors(names);
        let shared: AHashSet<MovieId> = movie_ids.iter().copied().collect();
        let mut subgraph = Subgraph::default();

        let mut actor_ids = Vec::new();
        for name in names {
            if let Some(id) = self.actor_id(name.as_ref()) {
                if actor_ids.contains(&id) {
                    continue;
                }
                actor_ids.push(id);
            }
        }

        for &id in &actor_ids {
            if let Some(actor) = self.actor(id) {
                subgraph.nodes.push(SubgraphNode::Actor {
                    name: actor.name.clone(),
                    age: actor.age,
                });
            }
        }
        for &id in &movie_ids {
            if let Some(movie) = self.movie(id) {
                subgraph.nodes.push(SubgraphNode::Movie {
                    name: movie.name.clone(),
                    year_released: movie.year_released,
                    gross_value: movie.gross_value,
                });
            }
        }
        for &actor_id in &actor_ids {
            let Some(actor) = self.actor(actor_id) else { continue };
            for (movie_id, weight) in self.actor_edges(actor_id) {
                if !shared.contains(&movie_id) {
                    continue;
                }
                if let Some(movie) = self.movie(movie_id) {
                    subgraph.edges.push(SubgraphEdge {
                        actor: actor.name.clone(),
                        movie: movie.name.clone(),
                        weight,
                    });
                }
            }
        }
        subgraph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Actor, Movie};
    use crate::make_graph;

    fn sample() -> Graph {
        let mut graph = Graph::from_entities(
            vec![
                Actor::new("Robert Redford", 81, None).with_movies(["Brubaker"]),
                Actor::new("Yaphet Kotto", 78, None).with_movies(["Brubaker", "Alien"]),
                Actor::new("Morgan Freeman", 80, None).with_movies(["Brubaker", "Glory"]),
                Actor::new("Sigourney Weaver", 68, None).with_movies(["Alien"]),
                Actor::new("Denzel Washington", 63, None).with_movies(["Glory"]),
            ],
            vec![
                Movie::new("Brubaker", 1980, 300.0),
                Movie::new("Alien", 1979, 200.0),
                Movie::new("Glory", 1989, 100.0),
                Movie::new("Lost Reel", 0, 5.0),
            ],
        );
        make_graph(&mut graph).unwrap();
        graph
    }

    #[test]
    fn test_direct_lookups_and_sentinels() {
        let graph = sample();
        assert_eq!(graph.movie_gross_value("Glory"), 100.0);
        assert_eq!(graph.movie_gross_value("Nonexistent"), -1.0);
        assert_eq!(graph.movies_starred_in("Yaphet Kotto"), ["Brubaker", "Alien"]);
        assert!(graph.movies_starred_in("Nobody").is_empty());
        assert_eq!(
            graph.starred_actors("Brubaker"),
            ["Robert Redford", "Yaphet Kotto", "Morgan Freeman"]
        );
        assert!(graph.starred_actors("The Shawshank Redemption").is_empty());
    }

    #[test]
    fn test_hub_actors_counts_two_hop_names() {
        let graph = sample();
        let kotto = graph.actor_id("Yaphet Kotto").unwrap();
        // Brubaker cast (3) + Alien cast (Kotto, Weaver) = 4 distinct, self included
        assert_eq!(graph.reachable_actor_count(kotto), 4);
        assert_eq!(graph.hub_actors(2), vec!["Yaphet Kotto", "Morgan Freeman"]);
        assert_eq!(graph.hub_actors(50).len(), 5);
    }

    #[test]
    fn test_grossing_rank_truncates() {
        let graph = sample();
        // Kotto: 300/2 + 200/1, Redford: 300, Freeman: 300/3 + 100
        assert_eq!(
            graph.n_highest_grossing_actors(3),
            vec!["Yaphet Kotto", "Robert Redford", "Morgan Freeman"]
        );
        let all = graph.n_highest_grossing_actors(100);
        assert_eq!(all.len(), 5);
        let grosses: Vec<f64> = all
            .iter()
            .map(|n| graph.actor_gross_value(graph.actor_id(n).unwrap()))
            .collect();
        assert!(grosses.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_oldest_actors() {
        let graph = sample();
        assert_eq!(
            graph.n_oldest_actors(2),
            vec!["Robert Redford", "Morgan Freeman"]
        );
        assert!(graph.n_oldest_actors(0).is_empty());
    }

    #[test]
    fn test_temporal_filters() {
        let graph = sample();
        assert_eq!(graph.movies_in_year(1980), vec!["Brubaker"]);
        assert_eq!(
            graph.actors_in_year(1979),
            vec!["Yaphet Kotto", "Sigourney Weaver"]
        );
        assert!(graph.actors_in_year(1994).is_empty());
        assert!(graph.movies_in_year(0).is_empty());
    }

    #[test]
    fn test_movies_per_year_skips_placeholders() {
        let graph = sample();
        let histogram = graph.movies_per_year();
        assert_eq!(histogram.len(), 3);
        assert_eq!(histogram.get(&1980), Some(&1));
        assert!(!histogram.contains_key(&0));
    }

    #[test]
    fn test_movies_of_actors_requires_two_members() {
        let graph = sample();
        let shared = graph.movies_of_actors(&["Yaphet Kotto", "Sigourney Weaver", "Denzel Washington"]);
        let names: Vec<&str> = shared
            .iter()
            .map(|id| graph.movie(*id).unwrap().name.as_str())
            .collect();
        assert_eq!(names, vec!["Alien"]);

        assert!(graph.movies_of_actors(&["Denzel Washington"]).is_empty());
        assert!(graph.movies_of_actors::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_hub_subgraph() {
        let graph = sample();
        let subgraph = graph.hub_subgraph(&["Robert Redford", "Morgan Freeman", "Nobody"]);
        assert_eq!(subgraph.nodes.len(), 3);
        assert_eq!(subgraph.edges.len(), 2);
        assert!(subgraph.edges.iter().all(|e| e.movie == "Brubaker"));
    }

    #[test]
    fn test_plot_series() {
        let graph = sample();
        let ages: Vec<(i32, usize)> = graph.age_movie_count_series();
        assert_eq!(ages[0], (81, 1));
        assert_eq!(graph.age_gross_series()[0], (81, 300.0));
    }
}
