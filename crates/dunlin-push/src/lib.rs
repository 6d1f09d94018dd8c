//! Push registration module
//!
//! Registers and deregisters push app servers (XEP-0357) on behalf of the
//! client, so that offline devices keep receiving notifications through an
//! intermediary relay.
//!
//! # Behavior
//!
//! - On session start, each configured app server is enabled (or disabled)
//!   against the user's own server, gated on service discovery.
//! - With `enable_muc_push` set, the same negotiation runs once for every
//!   joined group chat domain.
//! - A domain is negotiated at most once per session, successful or not.
//!
//! # Settings
//!
//! - `push_app_servers` - list of app server entries (`jid`, `node`,
//!   optional `secret`, optional `disable` flag)
//! - `enable_muc_push` - also negotiate for group chat domains

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod hooks;
pub mod registrar;
pub mod settings;
pub mod stanza;

mod prelude;

pub use registrar::{PUSH_ENABLED_KEY, PushAppServer, PushRegistrar};
pub use settings::{ENABLE_MUC_PUSH, PUSH_APP_SERVERS};

use crate::prelude::*;
use std::sync::Arc;

pub fn register_settings(
	registry: &mut dunlin_core::settings::SettingsRegistry,
) -> DlResult<()> {
	settings::register_settings(registry)
}

/// Create the push registrar for `app` and wire it to the client event bus.
pub fn init(app: &App) -> Arc<PushRegistrar> {
	let registrar = PushRegistrar::new(app.clone());
	hooks::register_hooks(app, registrar.clone());
	registrar
}

// vim: ts=4
