//! Application lifecycle

pub mod server;
pub mod startup;

pub use server::run_server;
pub use startup::{AppServices, prepare_server_startup};
