//! # winenotes Binary
//!
//! The binary is intentionally thin: everything that touches records and
//! photos lives in the `winenotesapp` library. This crate only adds the
//! front-end concerns:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/cli/)                                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - logging bootstrap (logging.rs)                           │
//! │  - terminal output for offline commands (render.rs)         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  HTTP Layer (src/server/)                                   │
//! │  - axum routes, JSON and multipart decoding                 │
//! │  - error kind → status code mapping                         │
//! │  - CORS and request tracing                                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  winenotesapp::api::WineApi                                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Subcommands
//!
//! - `serve` (default): run the HTTP service
//! - `list`: print every wine as JSON
//! - `doctor [--fix]`: report (and sweep) photos no wine references

mod cli;
mod server;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
