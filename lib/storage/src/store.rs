use filmgraph_core::{
    make_graph, ActorField, ActorFilter, ActorUpdate, ActorView, BuildReport, Error,
    FilterCondition, Graph, MovieField, MovieFilter, MovieUpdate, MovieView, Result,
};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::path::Path;
use tracing::{debug, info};

use crate::export::export_json;
use crate::loader::{load_combined, LoadOptions};

/// The shared actor/movie store.
///
/// Every access goes through one lock: readers share it, any mutation
/// takes it exclusively for the whole operation.
pub struct GraphStore {
    graph: RwLock<Graph>,
}

impl GraphStore {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph: RwLock::new(graph),
        }
    }

    /// Load a combined data file and build the graph from it
    pub fn open<P: AsRef<Path>>(path: P, options: LoadOptions) -> anyhow::Result<Self> {
        let mut graph = load_combined(path, options)?.into_graph();
        let report = make_graph(&mut graph)?;
        info!(
            "Store ready: {} edges, {} name collisions",
            report.edges_created,
            graph.name_collisions().len()
        );
        Ok(Self::new(graph))
    }

    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, Graph> {
        self.graph.read()
    }

    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, Graph> {
        self.graph.write()
    }

    /// Re-run the builder, e.g. after claims were edited
    pub fn rebuild(&self) -> Result<BuildReport> {
        make_graph(&mut self.graph.write())
    }

    pub fn export<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        export_json(&self.graph.read(), path)
    }

    #[inline]
    #[must_use]
    pub fn actor_view(&self, name: &str) -> Option<ActorView> {
        let graph = self.graph.read();
        graph.actor_id(name).and_then(|id| graph.actor_view(id))
    }

    #[inline]
    #[must_use]
    pub fn movie_view(&self, name: &str) -> Option<MovieView> {
        let graph = self.graph.read();
        graph.movie_id(name).and_then(|id| graph.movie_view(id))
    }

    pub fn find_actors(&self, condition: FilterCondition<ActorField>) -> Vec<ActorView> {
        let graph = self.graph.read();
        graph
            .filter_actors(&ActorFilter::new(condition))
            .into_iter()
            .filter_map(|id| graph.actor_view(id))
            .collect()
    }

    pub fn find_movies(&self, condition: FilterCondition<MovieField>) -> Vec<MovieView> {
        let graph = self.graph.read();
        graph
            .filter_movies(&MovieFilter::new(condition))
            .into_iter()
            .filter_map(|id| graph.movie_view(id))
            .collect()
    }

    /// Update an existing actor and relink
    pub fn update_actor(&self, name: &str, update: ActorUpdate) -> Result<()> {
        let mut graph = self.graph.write();
        let id = graph
            .actor_id(name)
            .ok_or_else(|| Error::ActorNotFound(name.to_string()))?;
        graph.update_actor(id, update)?;
        debug!("Updated actor {}", name);
        relink(&mut graph)
    }

    /// Update an existing movie and relink
    pub fn update_movie(&self, name: &str, update: MovieUpdate) -> Result<()> {
        let mut graph = self.graph.write();
        let id = graph
            .movie_id(name)
            .ok_or_else(|| Error::MovieNotFound(name.to_string()))?;
        graph.update_movie(id, update)?;
        debug!("Updated movie {}", name);
        relink(&mut graph)
    }

    pub fn upsert_actor(&self, name: &str, update: ActorUpdate) -> Result<()> {
        let mut graph = self.graph.write();
        graph.upsert_actor(name, update)?;
        debug!("Upserted actor {}", name);
        relink(&mut graph)
    }

    pub fn upsert_movie(&self, name: &str, update: MovieUpdate) -> Result<()> {
        let mut graph = self.graph.write();
        graph.upsert_movie(name, update)?;
        debug!("Upserted movie {}", name);
        relink(&mut graph)
    }

    /// `Ok(false)` when no actor has that name
    pub fn delete_actor(&self, name: &str) -> Result<bool> {
        let mut graph = self.graph.write();
        if graph.remove_actor(name).is_none() {
            return Ok(false);
        }
        debug!("Deleted actor {}", name);
        relink(&mut graph)?;
        Ok(true)
    }

    /// `Ok(false)` when no movie has that name
    pub fn delete_movie(&self, name: &str) -> Result<bool> {
        let mut graph = self.graph.write();
        if graph.remove_movie(name).is_none() {
            return Ok(false);
        }
        debug!("Deleted movie {}", name);
        relink(&mut graph)?;
        Ok(true)
    }

    #[inline]
    #[must_use]
    pub fn actor_count(&self) -> usize {
        self.graph.read().actor_count()
    }

    #[inline]
    #[must_use]
    pub fn movie_count(&self) -> usize {
        self.graph.read().movie_count()
    }
}

// Links new claims and reweights every movie. Edges whose claims were
// withdrawn stay until the entity on either side is removed.
fn relink(graph: &mut Graph) -> Result<()> {
    let report = make_graph(graph)?;
    debug!("Relinked graph: {} new edges", report.edges_created);
    Ok(())
}
