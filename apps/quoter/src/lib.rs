//! # PACs Quoter Library
//!
//! The interactive configurator: loads settings and the price list, then
//! runs the shell on stdin/stdout.
//!
//! ## Module Organization
//! ```text
//! quoter_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── Command line flags
//! ├── repl.rs         ◄─── Line parsing, dispatch, rendering
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState and exports
//! │   ├── catalog.rs  ◄─── Price list (loading / ready / failed)
//! │   ├── cart.rs     ◄─── Cart
//! │   ├── session.rs  ◄─── Open tab and selections
//! │   └── config.rs   ◄─── quoter.toml, env, flags
//! ├── commands/
//! │   ├── configure.rs◄─── show, options, tab, set
//! │   ├── cart.rs     ◄─── confirm, cart, qty, remove, clear
//! │   ├── order.rs    ◄─── order message and deep link
//! │   └── catalog.rs  ◄─── status, reload
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod repl;
pub mod state;

use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::ApiError;
use repl::Shell;
use state::{AppState, ConfigState};

/// Runs the quoter until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,pacs=debug, override with RUST_LOG                  │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • flags > PACS_* env > quoter.toml > defaults                        │
/// │                                                                         │
/// │  3. Start Price List Load ────────────────────────────────────────────► │
/// │     • Background task; the shell is usable while it runs               │
/// │     • Quotes are zero and confirm is refused until it is ready         │
/// │                                                                         │
/// │  4. Run Shell ────────────────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    init_tracing();

    info!("Starting PACs quoter");

    let config = ConfigState::load(cli.config.as_deref(), &cli.overrides())?;
    let state = AppState::new(config);

    match state.catalog_source() {
        Some(source) => {
            info!(path = %source.path.display(), "Loading price list");
            state.catalog.spawn_load(source);
        }
        None => warn!("No price list configured; quotes stay at zero and confirm is refused"),
    }

    let shell = Shell::new(state, cli.json);
    let stdin = BufReader::new(tokio::io::stdin());
    shell
        .run(stdin, tokio::io::stdout())
        .await
        .map_err(|e| ApiError::internal(format!("Terminal I/O failed: {}", e)))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pacs=trace` - Show trace for pacs crates only
/// - Default: `info,pacs=debug`
///
/// Logs go to stderr so stdout stays clean for `--json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,pacs=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
