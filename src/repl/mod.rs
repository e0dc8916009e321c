pub mod commands;
pub mod completer;
pub mod confirm;
pub mod progress;
pub mod renderer;
pub mod session;

pub use session::ReplSession;
