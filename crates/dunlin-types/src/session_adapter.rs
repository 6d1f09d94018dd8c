//! Adapter that stores per-session state.
//!
//! Values live for the duration of one client session; `clear` is called
//! when a new session begins. Keys are flat strings, values arbitrary JSON.

use async_trait::async_trait;

use crate::prelude::*;

#[async_trait]
pub trait SessionAdapter: Send + Sync {
	async fn read_value(&self, key: &str) -> DlResult<Option<serde_json::Value>>;

	async fn write_value(&self, key: &str, value: serde_json::Value) -> DlResult<()>;

	/// Drop all stored values (session reset).
	async fn clear(&self) -> DlResult<()>;
}

// vim: ts=4
