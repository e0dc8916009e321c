pub mod commands;
pub mod context;
pub mod scan;
pub mod submissions;
pub mod submit;

pub use commands::{Cli, Commands};
pub use context::{build_app, load_settings};
