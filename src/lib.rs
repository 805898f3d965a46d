//! # filmgraph
//!
//! An in-memory bipartite graph of actors and the movies they appear in.
//!
//! Raw records claim relationships by name; the builder reconciles those
//! claims into weighted edges where each movie's box-office gross is
//! apportioned across its cast by billing order. On top of the graph sit
//! ranking queries, temporal slices, co-starring subgraphs and averages.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! filmgraph serve --data data.json --http-port 8080
//! filmgraph analyze --data data.json --hubs 10 --export graph.json
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use filmgraph::prelude::*;
//!
//! let mut graph = Graph::from_entities(
//!     vec![Actor::new("Bruce Willis", 61, None).with_movies(["The Jackal"])],
//!     vec![Movie::new("The Jackal", 1997, 159330280.0)],
//! );
//! make_graph(&mut graph).unwrap();
//!
//! assert_eq!(graph.hub_actors(1), vec!["Bruce Willis"]);
//! assert_eq!(graph.actors_in_year(1997), vec!["Bruce Willis"]);
//! ```
//!
//! ## Crate Structure
//!
//! - `filmgraph-core` - entities, graph, builder, queries, analytics
//! - `filmgraph-storage` - JSON data files and the shared store
//! - `filmgraph-api` - CRUD REST API

// Re-export core types
pub use filmgraph_core::{
    make_graph, make_graph_with, Actor, ActorId, ActorUpdate, ActorView, BillingOrderWeighting,
    BuildReport, EdgeWeighting, Error, FilterCondition, Graph, GraphSummary, Movie, MovieId,
    MovieUpdate, MovieView, Result, Subgraph, NOT_FOUND_VALUE, NO_EDGE_WEIGHT,
};

// Re-export storage
pub use filmgraph_storage::{export_json, load_combined, load_split, GraphStore, LoadOptions};

// Re-export API
pub use filmgraph_api::{RestApi, ServerConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        make_graph, make_graph_with, Actor, ActorId, ActorUpdate, BillingOrderWeighting,
        EdgeWeighting, Error, Graph, GraphStore, LoadOptions, Movie, MovieId, MovieUpdate,
        Result, RestApi,
    };
}
