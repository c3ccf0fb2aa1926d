//! yolo-viewer: a read-only HTTP viewer for YOLO datasets.
//!
//! The viewer serves a directory of images and YOLO label files as a small
//! JSON API, so a browser front end can draw labelled boxes over each image.
//!
//! # Modules
//!
//! - [`dataset`]: Dataset layout, label parsing and the served record types
//! - [`router`]: Path-template routing, dispatch and response serialization
//! - [`api`]: The `/api/...` route table
//! - [`server`]: actix-web transport with a permissive CORS policy
//! - [`error`]: Error types for yolo-viewer operations

pub mod api;
pub mod dataset;
pub mod error;
pub mod router;
pub mod server;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

pub use error::ViewerError;

/// Fallback dataset location, relative to the working directory.
const DEFAULT_DATASET_DIR: &str = "dataset";

/// Older deployments set this instead of `DATASET_DIR`.
const LEGACY_DATASET_ENV: &str = "YOLO_DATASET_DIR";

/// The yolo-viewer CLI application.
#[derive(Parser, Debug)]
#[command(name = "yolo-viewer")]
#[command(version, about)]
struct Cli {
    /// Dataset root containing classes.txt, images/ and labels/.
    #[arg(long, env = "DATASET_DIR")]
    dataset_dir: Option<PathBuf>,

    /// Address to bind the HTTP server to.
    #[arg(long, env = "VIEWER_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the HTTP server to.
    #[arg(long, env = "VIEWER_PORT", default_value_t = 8000)]
    port: u16,
}

impl Cli {
    /// Resolves the dataset root: flag or `DATASET_DIR`, then the legacy
    /// variable, then `./dataset`. The result is made absolute.
    fn dataset_root(&self) -> PathBuf {
        let dir = self
            .dataset_dir
            .clone()
            .or_else(|| std::env::var_os(LEGACY_DATASET_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_DIR));
        std::path::absolute(&dir).unwrap_or(dir)
    }
}

/// Run the yolo-viewer CLI.
///
/// This is the main entry point for the binary, called from `main.rs`. It
/// returns once the server stops, or early if the dataset layout is invalid.
pub fn run() -> Result<(), ViewerError> {
    let cli = Cli::parse();
    tracing_subscriber::fmt::init();

    let root = cli.dataset_root();
    info!(root = %root.display(), "starting yolo-viewer");

    // Startup hooks run here, before any socket is bound.
    let dispatcher = api::router().start(dataset::Dataset::new(root))?;

    let address = format!("{}:{}", cli.host, cli.port);
    actix_web::rt::System::new().block_on(server::serve(dispatcher, &address))
}
