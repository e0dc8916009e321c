pub mod command;
pub mod dispatch;
pub mod events;
pub mod state;

pub use command::Command;
pub use dispatch::App;
pub use events::AppEvent;
pub use state::AppState;
