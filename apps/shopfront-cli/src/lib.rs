//! # Shopfront CLI Library
//!
//! Entry point for the `shopfront` binary.
//!
//! ## Module Organization
//! ```text
//! shopfront_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── args.rs         ◄─── clap definitions
//! ├── commands/
//! │   ├── mod.rs      ◄─── Dispatch, guard checks, output
//! │   ├── auth.rs     ◄─── login, register, logout, whoami
//! │   ├── products.rs ◄─── Catalogue browsing and admin writes
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── orders.rs   ◄─── Order placement and admin status
//! │   └── users.rs    ◄─── User administration
//! └── error.rs        ◄─── User-facing error type
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          CLI Startup                                    │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter (RUST_LOG)                     │
//! │     • Default: warn,shopfront=info; --verbose raises to debug          │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • defaults → client.toml → SHOPFRONT_* env → --api-url             │
//! │                                                                         │
//! │  3. Build ShopClient ─────────────────────────────────────────────────► │
//! │     • API base resolved once                                            │
//! │     • Session file opened                                               │
//! │                                                                         │
//! │  4. Dispatch the command ─────────────────────────────────────────────► │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod args;
pub mod commands;
pub mod error;

use shopfront_client::{ClientConfig, ShopClient};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

use args::Cli;
use error::{CliError, CliResult};

/// Runs one parsed command line to completion.
pub async fn run(cli: Cli) -> CliResult<()> {
    init_tracing(cli.verbose);

    let mut config = ClientConfig::load(cli.config.clone()).map_err(CliError::Config)?;
    if let Some(url) = cli.api_url.clone() {
        config.api.base_url = Some(url);
        config.validate().map_err(CliError::Config)?;
    }

    let client = ShopClient::from_config(&config).map_err(CliError::Config)?;
    debug!(base = %client.base(), "Dispatching command");

    commands::dispatch(&client, cli.command).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays pipeable.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,shopfront=debug"
    } else {
        "warn,shopfront=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (tests driving `run` twice) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .try_init();
}
