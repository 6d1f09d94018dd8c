//! Shared types and adapter traits for the Dunlin platform.
//!
//! This crate contains the foundational types that are shared between the
//! client core and all adapter implementations. Extracting these into a
//! separate crate allows adapter crates to compile in parallel with the
//! feature crates.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod disco_adapter;
pub mod error;
pub mod jid;
pub mod prelude;
pub mod session_adapter;
pub mod stanza;
pub mod transport_adapter;
pub mod utils;

// vim: ts=4
