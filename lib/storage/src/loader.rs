// JSON data files produced by the scraper
use anyhow::{Context, Result};
use filmgraph_core::{ActorRecord, Graph, MovieRecord};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Caps on how many records of each kind are taken from a data file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub max_actors: usize,
    pub max_movies: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_actors: usize::MAX,
            max_movies: usize::MAX,
        }
    }
}

impl LoadOptions {
    #[inline]
    #[must_use]
    pub fn with_limits(max_actors: usize, max_movies: usize) -> Self {
        Self { max_actors, max_movies }
    }
}

#[derive(Deserialize)]
#[serde(tag = "json_class")]
enum TaggedRecord {
    Actor(ActorRecord),
    Movie(MovieRecord),
    #[serde(other)]
    Unknown,
}

/// Raw records read from disk, not yet linked
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    pub actors: Vec<ActorRecord>,
    pub movies: Vec<MovieRecord>,
}

impl DataSet {
    /// Unlinked graph holding these records; run the builder on it next
    pub fn into_graph(self) -> Graph {
        Graph::from_records(self.actors, self.movies)
    }
}

/// Parse the combined format: an array of `{ "<name>": { "json_class": ..., ... } }`
pub fn parse_combined(json: &str, options: LoadOptions) -> filmgraph_core::Result<DataSet> {
    let entries: Vec<BTreeMap<String, TaggedRecord>> = serde_json::from_str(json)?;

    let mut data = DataSet::default();
    let mut skipped = 0usize;
    for (key, record) in entries.into_iter().flatten() {
        match record {
            TaggedRecord::Actor(actor) if data.actors.len() < options.max_actors => {
                data.actors.push(actor);
            }
            TaggedRecord::Movie(movie) if data.movies.len() < options.max_movies => {
                data.movies.push(movie);
            }
            TaggedRecord::Unknown => {
                warn!("Skipping entry {} with unknown json_class", key);
                skipped += 1;
            }
            _ => {}
        }
    }
    if skipped > 0 {
        warn!("Skipped {} entries of unknown kind", skipped);
    }
    Ok(data)
}

pub fn load_combined<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<DataSet> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let data = parse_combined(&json, options)
        .with_context(|| format!("malformed combined data file {}", path.display()))?;
    info!(
        "Loaded {} actors and {} movies from {:?}",
        data.actors.len(),
        data.movies.len(),
        path
    );
    Ok(data)
}

/// Load separate actor and movie files, each a JSON array of records
pub fn load_split<P, Q>(actors_path: P, movies_path: Q) -> Result<DataSet>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let actors = read_array::<ActorRecord>(actors_path.as_ref())?;
    let movies = read_array::<MovieRecord>(movies_path.as_ref())?;
    info!("Loaded {} actors and {} movies", actors.len(), movies.len());
    Ok(DataSet { actors, movies })
}

fn read_array<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json)
        .map_err(filmgraph_core::Error::from)
        .with_context(|| format!("malformed records in {}", path.display()))
}
