use clap::{Parser, Subcommand};
use filmgraph_api::{RestApi, ServerConfig};
use filmgraph_storage::{GraphStore, LoadOptions};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// An in-memory actor/movie relationship graph
#[derive(Parser, Debug)]
#[command(name = "filmgraph")]
#[command(about = "Actor/movie graph analytics and CRUD API", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the CRUD REST API over a sample of the data file
    Serve {
        /// Path to the combined data file
        #[arg(short, long, default_value = "./data.json")]
        data: PathBuf,

        /// Interface to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// HTTP API port
        #[arg(long, default_value_t = 8080)]
        http_port: u16,

        /// Maximum number of actors taken from the data file
        #[arg(long, default_value_t = 50)]
        max_actors: usize,

        /// Maximum number of movies taken from the data file
        #[arg(long, default_value_t = 50)]
        max_movies: usize,
    },
    /// Build the graph from a data file and print a summary
    Analyze {
        /// Path to the combined data file
        #[arg(short, long, default_value = "./data.json")]
        data: PathBuf,

        /// Number of hub actors to report
        #[arg(long, default_value_t = 10)]
        hubs: usize,

        /// Write the built graph to this file
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting filmgraph v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Serve {
            data,
            host,
            http_port,
            max_actors,
            max_movies,
        } => {
            let options = LoadOptions::with_limits(max_actors, max_movies);
            serve(data, ServerConfig { host, port: http_port }, options).await
        }
        Command::Analyze { data, hubs, export } => analyze(data, hubs, export),
    }
}

async fn serve(data: PathBuf, config: ServerConfig, options: LoadOptions) -> anyhow::Result<()> {
    info!("Data file: {:?}", data);
    let store = Arc::new(GraphStore::open(&data, options)?);
    info!(
        "Store initialized with {} actors and {} movies",
        store.actor_count(),
        store.movie_count()
    );

    let port = config.port;
    let http_handle = std::thread::spawn(move || {
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(store, config).await {
                eprintln!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://localhost:{}/", port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn analyze(data: PathBuf, hubs: usize, export: Option<PathBuf>) -> anyhow::Result<()> {
    let store = GraphStore::open(&data, LoadOptions::default())?;
    let summary = store.read().summary(hubs);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(path) = export {
        store.export(&path)?;
        info!("Graph written to {:?}", path);
    }
    Ok(())
}
