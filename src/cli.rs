//! CLI argument parsing and command handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Query;
use crate::output;
use crate::query::QueryEngine;

/// Resweep: regex search and rewrite over directory trees
#[derive(Parser, Debug)]
#[command(
    name = "rsw",
    version,
    about = "A regex search and rewrite engine with preview and commit modes",
    long_about = "Resweep scans a directory tree for files matching a suffix filter, finds \
                  regex matches inside their content, and reports or applies line-level \
                  replacements. Run it as a one-shot CLI query, or serve the same engine \
                  over HTTP together with a web UI and a raw file viewer."
)]
pub struct Cli {
    /// Enable verbose logging (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the query API, raw file viewer, and web UI over HTTP
    ///
    /// Endpoints:
    ///   POST /query          JSON Query in, JSON QueryResponse out
    ///   GET  /view/<path>    raw file content from the data directory
    ///   GET  /health         liveness probe
    ///   GET  /               static web assets (when --static-dir is set)
    Serve {
        /// Directory of files to scan and rewrite
        #[arg(long, value_name = "DIR")]
        data_dir: PathBuf,

        /// Directory of static web assets (omit to serve the API only)
        #[arg(long, value_name = "DIR")]
        static_dir: Option<PathBuf>,

        /// Web server port
        #[arg(short, long, default_value_t = 5432)]
        port: u16,

        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Run a single query against a directory tree and print the results
    ///
    /// Examples:
    ///   rsw query "TODO" --root ./src                # preview matches
    ///   rsw query "v1" -s go,rs -r v2                # preview a rewrite
    ///   rsw query "v1" -s go,rs -r v2 --commit       # apply it
    Query {
        /// Regex pattern to match against file content
        pattern: String,

        /// Root directory to scan
        #[arg(long, value_name = "DIR", default_value = ".")]
        root: PathBuf,

        /// Subdirectory of the root to restrict the scan to
        #[arg(short, long, value_name = "PATH", default_value = "")]
        directory: String,

        /// Allowed file extensions, comma separated (empty = all files)
        #[arg(short, long, value_delimiter = ',')]
        suffixes: Vec<String>,

        /// Replacement template; $1/$name expand to capture groups
        #[arg(short, long, default_value = "")]
        replace: String,

        /// Write replacements back to disk instead of previewing
        #[arg(long)]
        commit: bool,

        /// Output format as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output (only with --json)
        #[arg(long)]
        pretty: bool,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // Setup logging based on verbosity
        let log_level = match self.verbose {
            0 => "warn",   // Default: only warnings and errors
            1 => "info",   // -v: show info messages
            2 => "debug",  // -vv: show debug messages
            _ => "trace",  // -vvv: show trace messages
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();

        match self.command {
            Command::Serve {
                data_dir,
                static_dir,
                port,
                host,
            } => handle_serve(data_dir, static_dir, port, host),
            Command::Query {
                pattern,
                root,
                directory,
                suffixes,
                replace,
                commit,
                json,
                pretty,
            } => handle_query(
                pattern, root, directory, suffixes, replace, commit, json, pretty,
            ),
        }
    }
}

/// Startup validation for operator-supplied directories; failures here are
/// fatal and the process never starts serving.
fn validate_dir(path: &Path, flag: &str) -> Result<()> {
    let metadata =
        fs::metadata(path).with_context(|| format!("{}: cannot access {:?}", flag, path))?;
    if !metadata.is_dir() {
        anyhow::bail!("{}: {:?} is not a directory", flag, path);
    }
    Ok(())
}

/// Handle the `query` subcommand
fn handle_query(
    pattern: String,
    root: PathBuf,
    directory: String,
    suffixes: Vec<String>,
    replace: String,
    commit: bool,
    json: bool,
    pretty: bool,
) -> Result<()> {
    validate_dir(&root, "--root")?;

    let query = Query {
        directory,
        file_suffixes: suffixes,
        match_pattern: pattern,
        replacement: replace,
        commit,
    };

    let engine = QueryEngine::new(&root);
    let response = engine.run(&query);

    if json {
        let serialized = if pretty {
            serde_json::to_string_pretty(&response)?
        } else {
            serde_json::to_string(&response)?
        };
        println!("{}", serialized);
        return Ok(());
    }

    if !response.is_success() {
        anyhow::bail!("{}", response.error);
    }
    output::print_response(&response);
    Ok(())
}

/// Handle the `serve` subcommand
fn handle_serve(
    data_dir: PathBuf,
    static_dir: Option<PathBuf>,
    port: u16,
    host: String,
) -> Result<()> {
    validate_dir(&data_dir, "--data-dir")?;
    if let Some(ref static_dir) = static_dir {
        validate_dir(static_dir, "--static-dir")?;
    }

    log::info!("Starting HTTP server on {}:{}", host, port);

    println!("Starting Resweep HTTP server...");
    println!("  Address:  http://{}:{}", host, port);
    println!("  Data dir: {}", data_dir.display());
    println!("\nEndpoints:");
    println!("  POST /query          JSON query -> JSON response");
    println!("  GET  /view/<path>    raw file content from the data directory");
    println!("  GET  /health");
    if static_dir.is_some() {
        println!("  GET  /               static web assets");
    }
    println!("\nPress Ctrl+C to stop.");

    // Start the server using tokio runtime
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async { run_server(data_dir, static_dir, port, host).await })
}

/// Run the HTTP server
async fn run_server(
    data_dir: PathBuf,
    static_dir: Option<PathBuf>,
    port: u16,
    host: String,
) -> Result<()> {
    use axum::{
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{get, post},
        Router,
    };
    use std::sync::Arc;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::ServeDir;

    use crate::models::QueryResponse;

    // Server state shared across requests
    struct AppState {
        engine: QueryEngine,
    }

    // POST /query endpoint
    async fn handle_query_endpoint(
        State(state): State<Arc<AppState>>,
        Json(query): Json<Query>,
    ) -> Json<QueryResponse> {
        log::info!(
            "Query request: pattern={:?}, directory={:?}, commit={}",
            query.match_pattern,
            query.directory,
            query.commit
        );
        Json(state.engine.run(&query))
    }

    // Health check endpoint
    async fn handle_health() -> impl IntoResponse {
        (StatusCode::OK, "Resweep is running")
    }

    // Create shared state
    let state = Arc::new(AppState {
        engine: QueryEngine::new(&data_dir),
    });

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router: the query API, a read-only passthrough to the data
    // directory for viewing files after a rewrite, and optionally the UI.
    let mut app = Router::new()
        .route("/query", post(handle_query_endpoint))
        .route("/health", get(handle_health))
        .nest_service("/view", ServeDir::new(&data_dir));

    if let Some(ref static_dir) = static_dir {
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    let app = app.layer(cors).with_state(state);

    // Bind to the specified address
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Server listening on {}", addr);

    // Run the server
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
