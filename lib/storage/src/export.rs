// Atomic JSON export of a built graph
use anyhow::{anyhow, Result};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use filmgraph_core::{ActorView, Graph, MovieView};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Every entity in its output shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    pub actors: Vec<ActorView>,
    pub movies: Vec<MovieView>,
}

impl GraphExport {
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            actors: graph.actors().filter_map(|(id, _)| graph.actor_view(id)).collect(),
            movies: graph.movies().filter_map(|(id, _)| graph.movie_view(id)).collect(),
        }
    }
}

/// Write the graph to `path`, replacing any existing file in one step
pub fn export_json<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<()> {
    let path = path.as_ref();
    let export = GraphExport::from_graph(graph);
    let data = serde_json::to_vec_pretty(&export)?;

    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| f.write_all(&data))
        .map_err(|e| anyhow!("failed to write {}: {}", path.display(), e))?;

    info!(
        "Exported {} actors and {} movies to {:?}",
        export.actors.len(),
        export.movies.len(),
        path
    );
    Ok(())
}
