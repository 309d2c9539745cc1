//! CLI domain: parse, route and output only.
//! The snapshot engine lives in `tree`; this layer only wires it to a terminal.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat};
pub use route::RunContext;
