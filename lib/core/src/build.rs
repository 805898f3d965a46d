//! Graph construction: reconciles the cross-references each side claims
//! into linked, weighted edges.
//!
//! Construction runs three passes over the graph:
//!
//! 1. every actor's claimed filmography is linked to the movies that exist,
//!    and the actor is back-filled into the movie's cast list;
//! 2. every movie's claimed cast is linked to the actors that exist, and the
//!    movie is back-filled into the actor's filmography;
//! 3. each movie's edges receive the weights produced by an
//!    [`EdgeWeighting`] policy.
//!
//! Claims naming an entity that is not in the graph are skipped and counted
//! in the [`BuildReport`]; they never create placeholder nodes.

use serde::Serialize;
use tracing::{debug, info};

use crate::entity::{ActorId, Movie, MovieId};
use crate::{Error, Graph, Result};

/// Maps a movie to one weight per edge, in the movie's link order
pub trait EdgeWeighting {
    fn weights(&self, movie: &Movie) -> Vec<f64>;
}

impl<F> EdgeWeighting for F
where
    F: Fn(&Movie) -> Vec<f64>,
{
    fn weights(&self, movie: &Movie) -> Vec<f64> {
        self(movie)
    }
}

/// Default policy: the i-th linked actor gets `gross / (i + 1)`.
///
/// Cast lists are usually in billing order, so earlier links get a larger
/// share. This is a heuristic, not an apportionment of real earnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct BillingOrderWeighting;

impl EdgeWeighting for BillingOrderWeighting {
    fn weights(&self, movie: &Movie) -> Vec<f64> {
        (0..movie.degree())
            .map(|i| movie.gross_value / (i as f64 + 1.0))
            .collect()
    }
}

/// Outcome of a [`make_graph`] run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Edges that did not exist before this run
    pub edges_created: usize,
    /// Filmography entries naming a movie absent from the graph
    pub dangling_movie_refs: usize,
    /// Cast entries naming an actor absent from the graph
    pub dangling_actor_refs: usize,
}

/// Link and weight the graph with [`BillingOrderWeighting`]
pub fn make_graph(graph: &mut Graph) -> Result<BuildReport> {
    make_graph_with(graph, &BillingOrderWeighting)
}

/// Link and weight the graph with a custom weighting policy.
///
/// Running this again on an unchanged graph yields the same edges and
/// weights.
pub fn make_graph_with<W>(graph: &mut Graph, weighting: &W) -> Result<BuildReport>
where
    W: EdgeWeighting + ?Sized,
{
    let edges_before = graph.edge_count();
    let mut report = BuildReport::default();

    report.dangling_movie_refs = link_actors_to_movies(graph)?;
    report.dangling_actor_refs = link_movies_to_actors(graph)?;
    assign_weights(graph, weighting)?;

    report.edges_created = graph.edge_count() - edges_before;
    info!(
        "Graph built: {} actors, {} movies, {} edges ({} new)",
        graph.actor_count(),
        graph.movie_count(),
        graph.edge_count(),
        report.edges_created
    );
    debug!(
        "Skipped {} dangling movie references and {} dangling actor references",
        report.dangling_movie_refs, report.dangling_actor_refs
    );
    Ok(report)
}

fn link_actors_to_movies(graph: &mut Graph) -> Result<usize> {
    let mut dangling = 0;
    for actor_id in graph.actor_ids() {
        let (actor_name, claimed) = match graph.actor(actor_id) {
            Some(actor) => (actor.name.clone(), actor.movies_starred_in.clone()),
            None => continue,
        };
        for movie_name in &claimed {
            let Some(movie_id) = graph.movie_id(movie_name) else {
                dangling += 1;
                continue;
            };
            link(graph, actor_id, movie_id)?;
            if let Some(movie) = graph.movie_mut(movie_id) {
                movie.add_actor(&actor_name);
            }
        }
    }
    Ok(dangling)
}

fn link_movies_to_actors(graph: &mut Graph) -> Result<usize> {
    let mut dangling = 0;
    for movie_id in graph.movie_ids() {
        let (movie_name, claimed) = match graph.movie(movie_id) {
            Some(movie) => (movie.name.clone(), movie.actors.clone()),
            None => continue,
        };
        for actor_name in &claimed {
            let Some(actor_id) = graph.actor_id(actor_name) else {
                dangling += 1;
                continue;
            };
            link(graph, actor_id, movie_id)?;
            if let Some(actor) = graph.actor_mut(actor_id) {
                actor.add_movie(&movie_name);
            }
        }
    }
    Ok(dangling)
}

// Provisional weight is the movie's raw gross; the weighting pass replaces it
fn link(graph: &mut Graph, actor: ActorId, movie: MovieId) -> Result<()> {
    let gross = graph
        .movie(movie)
        .map(|m| m.gross_value)
        .ok_or_else(|| Error::MovieNotFound(format!("#{}", movie.0)))?;
    graph.add_edge(actor, movie, gross)?;
    Ok(())
}

/// Apply a weighting policy to every movie's edges
pub fn assign_weights<W>(graph: &mut Graph, weighting: &W) -> Result<()>
where
    W: EdgeWeighting + ?Sized,
{
    for movie_id in graph.movie_ids() {
        let Some(movie) = graph.movie(movie_id) else {
            continue;
        };
        let weights = weighting.weights(movie);
        if weights.len() != movie.degree() {
            return Err(Error::WeightCountMismatch {
                movie: movie.name.clone(),
                expected: movie.degree(),
                actual: weights.len(),
            });
        }
        let edge_ids = movie.edge_ids().to_vec();
        for (edge_id, weight) in edge_ids.into_iter().zip(weights) {
            graph.set_edge_weight(edge_id, weight);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Actor;
    use crate::NO_EDGE_WEIGHT;

    fn brubaker_graph() -> Graph {
        Graph::from_entities(
            vec![
                Actor::new("Robert Redford", 81, None).with_movies(["Brubaker"]),
                Actor::new("Morgan Freeman", 80, None).with_movies(["Brubaker", "Glory"]),
            ],
            vec![Movie::new("Brubaker", 1980, 371217082.0)],
        )
    }

    #[test]
    fn test_billing_order_weights() {
        let mut graph = brubaker_graph();
        make_graph(&mut graph).unwrap();

        let m = graph.movie_id("Brubaker").unwrap();
        let weights: Vec<f64> = graph.movie_edges(m).map(|(_, w)| w).collect();
        assert_eq!(weights, vec![371217082.0, 185608541.0]);

        let names: Vec<&str> = graph
            .movie_edges(m)
            .map(|(a, _)| graph.actor(a).unwrap().name.as_str())
            .collect();
        assert_eq!(names, vec!["Robert Redford", "Morgan Freeman"]);
    }

    #[test]
    fn test_backfills_cast_and_filmography() {
        let mut graph = Graph::from_entities(
            vec![
                Actor::new("Robert Redford", 81, None).with_movies(["Brubaker"]),
                Actor::new("Yaphet Kotto", 78, None),
            ],
            vec![Movie::new("Brubaker", 1980, 10.0).with_actors(["Yaphet Kotto"])],
        );
        let report = make_graph(&mut graph).unwrap();
        assert_eq!(report.edges_created, 2);

        let movie = graph.movie_by_name("Brubaker").unwrap();
        assert_eq!(movie.actors, vec!["Yaphet Kotto", "Robert Redford"]);
        let actor = graph.actor_by_name("Yaphet Kotto").unwrap();
        assert_eq!(actor.movies_starred_in, vec!["Brubaker"]);
    }

    #[test]
    fn test_dangling_references_are_skipped() {
        let mut graph = Graph::from_entities(
            vec![Actor::new("Morgan Freeman", 80, None).with_movies(["Glory", "Brubaker"])],
            vec![Movie::new("Brubaker", 1980, 10.0).with_actors(["Jane Alexander"])],
        );
        let report = make_graph(&mut graph).unwrap();
        assert_eq!(report.dangling_movie_refs, 1);
        assert_eq!(report.dangling_actor_refs, 1);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.movie_id("Glory").is_none());
        assert!(graph.actor_id("Jane Alexander").is_none());

        let actor = graph.actor_by_name("Morgan Freeman").unwrap();
        assert_eq!(actor.movies_starred_in, vec!["Glory", "Brubaker"]);
    }

    #[test]
    fn test_make_graph_is_idempotent() {
        let mut graph = brubaker_graph();
        make_graph(&mut graph).unwrap();
        let snapshot: Vec<_> = graph
            .movie_ids()
            .into_iter()
            .flat_map(|m| graph.movie_edges(m).collect::<Vec<_>>())
            .collect();

        let report = make_graph(&mut graph).unwrap();
        assert_eq!(report.edges_created, 0);
        let again: Vec<_> = graph
            .movie_ids()
            .into_iter()
            .flat_map(|m| graph.movie_edges(m).collect::<Vec<_>>())
            .collect();
        assert_eq!(snapshot, again);
        assert_eq!(graph.movie_by_name("Brubaker").unwrap().actors.len(), 2);
    }

    #[test]
    fn test_weights_symmetric_after_build() {
        let mut graph = brubaker_graph();
        make_graph(&mut graph).unwrap();
        for (actor_id, _) in graph.actors() {
            for (movie_id, weight) in graph.actor_edges(actor_id) {
                let from_movie = graph
                    .movie_edges(movie_id)
                    .find(|(a, _)| *a == actor_id)
                    .map(|(_, w)| w);
                assert_eq!(from_movie, Some(weight));
                assert_ne!(graph.edge_weight(actor_id, movie_id), NO_EDGE_WEIGHT);
            }
        }
    }

    #[test]
    fn test_custom_weighting_closure() {
        let mut graph = brubaker_graph();
        let flat = |movie: &Movie| vec![1.0; movie.degree()];
        make_graph_with(&mut graph, &flat).unwrap();
        let m = graph.movie_id("Brubaker").unwrap();
        assert!(graph.movie_edges(m).all(|(_, w)| w == 1.0));
    }

    #[test]
    fn test_weight_count_mismatch_is_an_error() {
        let mut graph = brubaker_graph();
        let short = |_: &Movie| vec![1.0];
        let err = make_graph_with(&mut graph, &short).unwrap_err();
        assert!(matches!(
            err,
            Error::WeightCountMismatch { expected: 2, actual: 1, .. }
        ));
    }
}
