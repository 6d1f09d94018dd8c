//! Per-domain push negotiation
//!
//! For every configured app server entry, the registrar decides (via service
//! discovery) whether an enable or disable request can be sent at all, then
//! fans the requests out concurrently and waits for all of them to settle.
//! A domain is negotiated at most once per session; the set of processed
//! domains is kept in the session store under [`PUSH_ENABLED_KEY`].

use futures::future::join_all;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::HashSet;
use std::sync::Arc;

use crate::prelude::*;
use crate::settings::PUSH_APP_SERVERS;
use crate::stanza::{build_disable_request, build_enable_request};
use dunlin_core::events::BoxFuture;
use dunlin_types::stanza::NS_PUSH;

/// Session store key holding the list of already negotiated domains.
pub const PUSH_ENABLED_KEY: &str = "push_enabled";

/// One entry of the `push_app_servers` setting.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PushAppServer {
	/// JID of the push relay/pubsub service.
	pub jid: Option<Box<str>>,
	/// Pubsub node identifying this device at the relay.
	pub node: Option<Box<str>>,
	/// Shared secret published alongside the enable request.
	pub secret: Option<Box<str>>,
	/// Deregister this entry instead of registering it.
	#[serde(default)]
	pub disable: bool,
}

pub struct PushRegistrar {
	app: App,
	/// Domains with a negotiation currently in flight.
	pending: Mutex<HashSet<Box<str>>>,
}

impl PushRegistrar {
	pub fn new(app: App) -> Arc<PushRegistrar> {
		Arc::new(PushRegistrar { app, pending: Mutex::new(HashSet::new()) })
	}

	/// Negotiate push for `domain` (the own account domain when `None`).
	///
	/// Runs at most once per session per domain; repeated and concurrent
	/// calls for an already handled domain are no-ops. Never fails outward:
	/// the domain is recorded as processed whatever the outcome, so session
	/// startup is not blocked on a broken push service.
	pub async fn register_push(&self, domain: Option<&str>) {
		let own_domain = self.app.jid.domain();
		let domain = domain.unwrap_or(own_domain);

		let enabled = self.enabled_domains().await;
		if enabled.iter().any(|d| d.as_ref() == domain) {
			return;
		}
		if !self.pending.lock().insert(domain.into()) {
			return;
		}

		let servers: Vec<PushAppServer> = match self.app.settings.get_json_as(PUSH_APP_SERVERS) {
			Ok(servers) => servers,
			Err(e) => {
				error!(error = %e, "Invalid push app server configuration");
				Vec::new()
			}
		};

		let (to_enable, to_disable): (Vec<_>, Vec<_>) = servers.iter().partition(|s| !s.disable);

		let mut tasks: Vec<BoxFuture<'_, DlResult<()>>> = Vec::new();
		for server in &to_enable {
			tasks.push(Box::pin(self.enable_app_server(domain, server)));
		}
		for server in &to_disable {
			tasks.push(Box::pin(self.disable_app_server(domain, server)));
		}

		let results = join_all(tasks).await;
		if let Some(e) = results.iter().find_map(|r| r.as_ref().err()) {
			error!(error = %e, "Could not enable or disable push app server");
		}

		// Recorded even after a failed negotiation; the domain is not
		// retried within this session.
		self.record_domain(domain).await;
		self.pending.lock().remove(domain);
	}

	/// Enable one app server against `domain`.
	///
	/// Skips silently on a malformed entry, with a warning when discovery
	/// rules the request out. The send outcome propagates to the caller.
	pub async fn enable_app_server(&self, domain: &str, server: &PushAppServer) -> DlResult<()> {
		let (Some(jid), Some(node)) = (server.jid.as_deref(), server.node.as_deref()) else {
			return Ok(());
		};
		if jid.is_empty() || node.is_empty() {
			return Ok(());
		}

		let identity = self.app.disco.identity(jid, "pubsub", "push").await?;
		if identity.is_none() {
			warn!(
				jid = %jid,
				"Not enabling push app server, it does not have the right disco identity"
			);
			return Ok(());
		}

		let (service, own) = futures::join!(
			self.app.disco.supports_feature(jid, NS_PUSH),
			self.app.disco.supports_feature(domain, NS_PUSH),
		);
		// Either side advertising support is enough to try.
		if !service? && !own? {
			warn!(jid = %jid, domain = %domain, "Not enabling push app server, no disco support");
			return Ok(());
		}

		let iq = build_enable_request(
			self.app.jid.domain(),
			domain,
			jid,
			node,
			server.secret.as_deref(),
		)?;
		self.app.transport.send_iq(iq).await
	}

	/// Disable one app server against `domain`.
	///
	/// Only the domain is consulted for support; a failed send is logged
	/// and absorbed here rather than surfacing to the join.
	pub async fn disable_app_server(&self, domain: &str, server: &PushAppServer) -> DlResult<()> {
		let Some(jid) = server.jid.as_deref() else {
			return Ok(());
		};
		if jid.is_empty() {
			return Ok(());
		}

		if !self.app.disco.supports_feature(domain, NS_PUSH).await? {
			warn!(
				jid = %jid,
				domain = %domain,
				"Not disabling push app server, no disco support from your server"
			);
			return Ok(());
		}

		let node = server.node.as_deref().filter(|n| !n.is_empty());
		let iq = build_disable_request(self.app.jid.domain(), domain, jid, node)?;
		if let Err(e) = self.app.transport.send_iq(iq).await {
			error!(jid = %jid, error = %e, "Could not disable push app server");
		}
		Ok(())
	}

	async fn enabled_domains(&self) -> Vec<Box<str>> {
		match self.app.session.read_value(PUSH_ENABLED_KEY).await {
			Ok(Some(value)) => match serde_json::from_value(value) {
				Ok(domains) => domains,
				Err(e) => {
					warn!(error = %e, "Malformed push session state, starting over");
					Vec::new()
				}
			},
			Ok(None) => Vec::new(),
			Err(e) => {
				warn!(error = %e, "Could not read push session state");
				Vec::new()
			}
		}
	}

	/// Append `domain` to the processed set and persist it.
	async fn record_domain(&self, domain: &str) {
		let mut enabled = self.enabled_domains().await;
		if !enabled.iter().any(|d| d.as_ref() == domain) {
			enabled.push(domain.into());
		}
		match serde_json::to_value(&enabled) {
			Ok(value) => {
				if let Err(e) = self.app.session.write_value(PUSH_ENABLED_KEY, value).await {
					error!(error = %e, "Could not persist push session state");
				}
			}
			Err(e) => error!(error = %e, "Could not serialize push session state"),
		}
	}
}

// vim: ts=4
