//! Terminal Commands
//!
//! Handlers behind the `supplement-advisor` subcommands. Each takes the
//! initialized [`AppState`](crate::state::AppState).

pub mod assess;
pub mod settings;

pub use assess::*;
pub use settings::*;
