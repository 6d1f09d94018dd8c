//! In-memory session store
//!
//! The canonical [`SessionAdapter`]: values live in process memory and are
//! dropped on `clear`, which matches the lifetime of a client session.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::prelude::*;
use dunlin_types::session_adapter::SessionAdapter;

#[derive(Default)]
pub struct SessionAdapterMemory {
	values: RwLock<HashMap<Box<str>, serde_json::Value>>,
}

impl SessionAdapterMemory {
	pub fn new() -> SessionAdapterMemory {
		SessionAdapterMemory { values: RwLock::new(HashMap::new()) }
	}
}

#[async_trait]
impl SessionAdapter for SessionAdapterMemory {
	async fn read_value(&self, key: &str) -> DlResult<Option<serde_json::Value>> {
		Ok(self.values.read().get(key).cloned())
	}

	async fn write_value(&self, key: &str, value: serde_json::Value) -> DlResult<()> {
		self.values.write().insert(key.into(), value);
		Ok(())
	}

	async fn clear(&self) -> DlResult<()> {
		self.values.write().clear();
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[tokio::test]
	async fn test_write_and_read() {
		let store = SessionAdapterMemory::new();
		store.write_value("k", json!(["a", "b"])).await.unwrap();
		assert_eq!(store.read_value("k").await.unwrap(), Some(json!(["a", "b"])));
	}

	#[tokio::test]
	async fn test_missing_key() {
		let store = SessionAdapterMemory::new();
		assert_eq!(store.read_value("nope").await.unwrap(), None);
	}

	#[tokio::test]
	async fn test_clear_resets_session() {
		let store = SessionAdapterMemory::new();
		store.write_value("k", json!(1)).await.unwrap();
		store.clear().await.unwrap();
		assert_eq!(store.read_value("k").await.unwrap(), None);
	}
}

// vim: ts=4
