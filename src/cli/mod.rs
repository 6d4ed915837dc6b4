//! CLI command handlers.
//!
//! `main.rs` parses arguments and hands off to these functions, which return
//! the process exit code so they can be driven from tests.

mod check;
mod lookup;

pub use check::{CheckConfig, run_check};
pub use lookup::run_lookup;
