pub mod connection;
pub mod schema;
pub mod slots;

pub use connection::Database;
