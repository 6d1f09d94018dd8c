//! App state type
//!
//! `AppState` is the explicit session context: the account JID, the adapter
//! handles, and the shared subsystems. Feature crates receive an [`App`] and
//! never reach into globals.

use std::sync::Arc;

use crate::events::EventBus;
use crate::prelude::*;
use crate::settings::{FrozenSettingsRegistry, SettingValue, SettingsRegistry, SettingsService};

use dunlin_types::disco_adapter::DiscoAdapter;
use dunlin_types::jid::Jid;
use dunlin_types::session_adapter::SessionAdapter;
use dunlin_types::transport_adapter::TransportAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	/// The user's own bare account JID.
	pub jid: Jid,

	pub disco: Arc<dyn DiscoAdapter>,
	pub transport: Arc<dyn TransportAdapter>,
	pub session: Arc<dyn SessionAdapter>,

	// Settings subsystem
	pub settings: Arc<SettingsService>,
	pub settings_registry: Arc<FrozenSettingsRegistry>,

	pub events: EventBus,
}

pub type App = Arc<AppState>;

/// Builder collecting the account JID, adapters, and settings before the
/// registry is frozen.
pub struct AppBuilder {
	jid: Jid,
	disco: Option<Arc<dyn DiscoAdapter>>,
	transport: Option<Arc<dyn TransportAdapter>>,
	session: Option<Arc<dyn SessionAdapter>>,
	registry: SettingsRegistry,
	values: Vec<(String, SettingValue)>,
}

impl AppBuilder {
	pub fn new(jid: Jid) -> AppBuilder {
		AppBuilder {
			jid,
			disco: None,
			transport: None,
			session: None,
			registry: SettingsRegistry::new(),
			values: Vec::new(),
		}
	}

	pub fn disco(mut self, disco: Arc<dyn DiscoAdapter>) -> AppBuilder {
		self.disco = Some(disco);
		self
	}

	pub fn transport(mut self, transport: Arc<dyn TransportAdapter>) -> AppBuilder {
		self.transport = Some(transport);
		self
	}

	pub fn session(mut self, session: Arc<dyn SessionAdapter>) -> AppBuilder {
		self.session = Some(session);
		self
	}

	/// Run a feature crate's settings registration against the registry.
	pub fn register_settings<F>(mut self, register: F) -> DlResult<AppBuilder>
	where
		F: FnOnce(&mut SettingsRegistry) -> DlResult<()>,
	{
		register(&mut self.registry)?;
		Ok(self)
	}

	/// Queue a configured setting value, applied after the registry freezes.
	pub fn setting(mut self, key: impl Into<String>, value: SettingValue) -> AppBuilder {
		self.values.push((key.into(), value));
		self
	}

	pub fn build(self) -> DlResult<App> {
		let disco =
			self.disco.ok_or_else(|| Error::ConfigError("disco adapter is required".into()))?;
		let transport = self
			.transport
			.ok_or_else(|| Error::ConfigError("transport adapter is required".into()))?;
		let session =
			self.session.ok_or_else(|| Error::ConfigError("session adapter is required".into()))?;

		let settings_registry = Arc::new(self.registry.freeze());
		let settings = Arc::new(SettingsService::new(settings_registry.clone()));
		for (key, value) in self.values {
			settings.set(&key, value)?;
		}

		Ok(Arc::new(AppState {
			jid: self.jid.bare(),
			disco,
			transport,
			session,
			settings,
			settings_registry,
			events: EventBus::new(),
		}))
	}
}

// vim: ts=4
