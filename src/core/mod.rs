//! Process-wide lifecycle state.

pub mod state;

pub use state::{is_shutdown, register_server, setup_shutdown_handler};
