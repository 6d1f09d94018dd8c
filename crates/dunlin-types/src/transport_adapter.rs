//! Adapter for the stanza transport.

use async_trait::async_trait;

use crate::prelude::*;
use crate::stanza::Iq;

#[async_trait]
pub trait TransportAdapter: Send + Sync {
	/// Send a request stanza and wait for its outcome.
	///
	/// Resolves once the peer acknowledges the request (an IQ result), and
	/// fails on an IQ error response, a timeout, or a dropped connection.
	async fn send_iq(&self, iq: Iq) -> DlResult<()>;

	/// Fire-and-forget send for non-request stanzas.
	fn send(&self, xml: &str) -> DlResult<()>;
}

// vim: ts=4
