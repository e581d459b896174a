//! # Shell Commands Module
//!
//! Everything the interactive shell can do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── configure.rs  ◄─── show, options, tab, set
//! ├── cart.rs       ◄─── confirm, cart, qty, remove, clear
//! ├── order.rs      ◄─── order message and deep link
//! └── catalog.rs    ◄─── status, reload
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  stdin: "set ai 2"                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  repl::parse_command ──► ReplCommand::Set { field, value }             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  repl::dispatch                                                         │
//! │  configure::set_field(                                                  │
//! │      &state.catalog,    ◄── only the states it needs                   │
//! │      &state.session,                                                    │
//! │      "ai", "2",                                                         │
//! │  ) -> Result<QuoteResponse, ApiError>                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  text rendering, or JSON with --json                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod catalog;
pub mod configure;
pub mod order;
