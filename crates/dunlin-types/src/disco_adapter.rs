//! Adapter for service discovery (XEP-0030) queries.
//!
//! The negotiation code only ever asks two questions of a remote entity:
//! whether it advertises a feature, and whether it exposes an identity of a
//! given category/type. How the answers are obtained (live disco#info
//! round-trips, entity-capability caches, ...) is up to the adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::prelude::*;

/// A single identity from a disco#info result.
#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoIdentity {
	pub category: Box<str>,
	#[serde(rename = "type")]
	pub identity_type: Box<str>,
	pub name: Option<Box<str>>,
}

#[async_trait]
pub trait DiscoAdapter: Send + Sync {
	/// Does `entity` advertise `feature` in its disco#info?
	///
	/// Queries may fail or time out; the caller decides what a failure means.
	async fn supports_feature(&self, entity: &str, feature: &str) -> DlResult<bool>;

	/// The first identity of `entity` matching the given category and type,
	/// or `None` if it exposes no such identity.
	async fn identity(
		&self,
		entity: &str,
		category: &str,
		identity_type: &str,
	) -> DlResult<Option<DiscoIdentity>>;
}

// vim: ts=4
