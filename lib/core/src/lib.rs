//! # filmgraph Core
//!
//! Core library for the filmgraph actor/movie store.
//!
//! This crate provides the fundamental data structures and algorithms:
//!
//! - [`Actor`], [`Movie`] - entity records with claimed cross-references
//! - [`Graph`] - arena of entities and shared, weighted edge records
//! - [`make_graph`] - reconciles claims into a bidirectional bipartite graph
//! - Queries and analytics: hub detection, grossing/age ranks, temporal
//!   slices, co-starring subgraphs, average gross per movie
//!
//! ## Example
//!
//! ```rust
//! use filmgraph_core::{make_graph, Actor, Graph, Movie};
//!
//! let mut graph = Graph::from_entities(
//!     vec![
//!         Actor::new("Robert Redford", 81, None).with_movies(["Brubaker"]),
//!         Actor::new("Morgan Freeman", 80, None).with_movies(["Brubaker"]),
//!     ],
//!     vec![Movie::new("Brubaker", 1980, 371217082.0)],
//! );
//! make_graph(&mut graph).unwrap();
//!
//! let hubs = graph.hub_actors(10);
//! assert_eq!(hubs.len(), 2);
//! assert_eq!(graph.movie_gross_value("Nonexistent"), -1.0);
//! ```

pub mod analytics;
pub mod build;
pub mod entity;
pub mod error;
pub mod filter;
pub mod graph;
pub mod query;
pub mod record;
pub mod update;

pub use analytics::{GraphSummary, FILMOGRAPHY_DAMPING};
pub use build::{
    assign_weights, make_graph, make_graph_with, BillingOrderWeighting, BuildReport, EdgeWeighting,
};
pub use entity::{Actor, ActorId, Edge, EdgeId, EntityKind, Movie, MovieId, SENTINEL_YEAR};
pub use error::{Error, Result};
pub use filter::{
    ActorField, ActorFilter, AttributeFilter, Filter, FilterCondition, Filterable, MovieField,
    MovieFilter,
};
pub use graph::{Graph, NameCollision, NO_EDGE_WEIGHT};
pub use query::{Subgraph, SubgraphEdge, SubgraphNode, NOT_FOUND_VALUE};
pub use record::{ActorRecord, ActorView, MovieRecord, MovieView};
pub use update::{ActorUpdate, MovieUpdate};
