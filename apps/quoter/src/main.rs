//! # PACs Quoter Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PACs Quoter                                      │
//! │                                                                         │
//! │  stdin ──► repl ──► commands ──► pacs-core (resolver, pricer, cart)     │
//! │                        │                                                │
//! │                        └──────► CatalogState ◄── pacs-pricelist loader  │
//! │  stdout ◄── text or --json                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs so it can be tested.

use std::process::ExitCode;

use clap::Parser;
use quoter_lib::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match quoter_lib::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", quoter_lib::repl::render_error(&err));
            ExitCode::FAILURE
        }
    }
}
