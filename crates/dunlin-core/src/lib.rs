//! Core infrastructure for the Dunlin platform.
//!
//! This crate contains the shared client infrastructure that feature crates
//! build on: the app state (the explicit session context handed to every
//! feature), the settings subsystem, the client event bus, and the default
//! in-memory session store.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod events;
pub mod prelude;
pub mod session;
pub mod settings;

// Re-export commonly used types
pub use app::{App, AppBuilder, AppState};
pub use events::{BoxFuture, ClientEvent, EventBus, EventListener};
pub use session::SessionAdapterMemory;

// vim: ts=4
