pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod repl;
pub mod risk;
pub mod session;
pub mod store;
pub mod utils;

#[cfg(test)]
mod test_support;
