pub mod export;
pub mod loader;
pub mod store;

pub use export::{export_json, GraphExport};
pub use loader::{load_combined, load_split, parse_combined, DataSet, LoadOptions};
pub use store::GraphStore;
