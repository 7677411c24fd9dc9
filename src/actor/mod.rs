//! Actor system for watch mode.
//!
//! Two actors on a small tokio runtime, joined by channels:
//!
//! ```text
//! FsActor --run_series--> [styles, scripts, reload]
//!                                             |
//!     accept loop --[AddClient]--> WsActor <--+ [Reload]
//!                                     |
//!                                 broadcast --> browsers
//! ```
//!
//! - `messages` - actor inbox message types
//! - `fs` - file system watcher with debouncing and bindings
//! - `ws` - WebSocket client registry and broadcast
//! - `coordinator` - wires the actors up and runs them to shutdown

pub mod coordinator;
pub mod fs;
pub mod messages;
pub mod ws;

pub use coordinator::Coordinator;
