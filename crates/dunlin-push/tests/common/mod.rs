//! Common test utilities
//!
//! Mock disco/transport adapters plus an app builder wired to the in-memory
//! session store. The mocks answer immediately unless `make_slow` is set,
//! which inserts one scheduler yield per disco query (used to exercise the
//! in-flight guard).

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

use dunlin_core::app::{App, AppBuilder};
use dunlin_core::session::SessionAdapterMemory;
use dunlin_core::settings::SettingValue;
use dunlin_types::disco_adapter::{DiscoAdapter, DiscoIdentity};
use dunlin_types::error::{DlResult, Error};
use dunlin_types::jid::Jid;
use dunlin_types::stanza::Iq;
use dunlin_types::transport_adapter::TransportAdapter;

pub const OWN_JID: &str = "alice@user.example.com";
pub const OWN_DOMAIN: &str = "user.example.com";

#[derive(Default)]
pub struct MockDisco {
	features: Mutex<HashSet<(String, String)>>,
	identities: Mutex<HashSet<(String, String, String)>>,
	failing: Mutex<HashSet<String>>,
	slow: Mutex<bool>,
}

impl MockDisco {
	pub fn advertise_feature(&self, entity: &str, feature: &str) {
		self.features.lock().insert((entity.into(), feature.into()));
	}

	pub fn advertise_identity(&self, entity: &str, category: &str, identity_type: &str) {
		self.identities.lock().insert((entity.into(), category.into(), identity_type.into()));
	}

	/// Make every query against `entity` fail.
	pub fn fail_for(&self, entity: &str) {
		self.failing.lock().insert(entity.into());
	}

	pub fn make_slow(&self) {
		*self.slow.lock() = true;
	}

	async fn gate(&self, entity: &str) -> DlResult<()> {
		if *self.slow.lock() {
			tokio::task::yield_now().await;
		}
		if self.failing.lock().contains(entity) {
			return Err(Error::Timeout);
		}
		Ok(())
	}
}

#[async_trait]
impl DiscoAdapter for MockDisco {
	async fn supports_feature(&self, entity: &str, feature: &str) -> DlResult<bool> {
		self.gate(entity).await?;
		Ok(self.features.lock().contains(&(entity.to_string(), feature.to_string())))
	}

	async fn identity(
		&self,
		entity: &str,
		category: &str,
		identity_type: &str,
	) -> DlResult<Option<DiscoIdentity>> {
		self.gate(entity).await?;
		let key = (entity.to_string(), category.to_string(), identity_type.to_string());
		Ok(self.identities.lock().contains(&key).then(|| DiscoIdentity {
			category: category.into(),
			identity_type: identity_type.into(),
			name: None,
		}))
	}
}

#[derive(Default)]
pub struct MockTransport {
	sent: Mutex<Vec<Iq>>,
	fail_sends: Mutex<bool>,
}

impl MockTransport {
	/// Every subsequent send is recorded, then answered with an error.
	pub fn fail_sends(&self) {
		*self.fail_sends.lock() = true;
	}

	pub fn sent(&self) -> Vec<Iq> {
		self.sent.lock().clone()
	}
}

#[async_trait]
impl TransportAdapter for MockTransport {
	async fn send_iq(&self, iq: Iq) -> DlResult<()> {
		self.sent.lock().push(iq);
		if *self.fail_sends.lock() {
			Err(Error::Transport("iq error response".into()))
		} else {
			Ok(())
		}
	}

	fn send(&self, _xml: &str) -> DlResult<()> {
		Ok(())
	}
}

pub struct TestClient {
	pub app: App,
	pub disco: Arc<MockDisco>,
	pub transport: Arc<MockTransport>,
	pub session: Arc<SessionAdapterMemory>,
}

pub fn build_client(servers: serde_json::Value, enable_muc_push: bool) -> TestClient {
	let disco = Arc::new(MockDisco::default());
	let transport = Arc::new(MockTransport::default());
	let session = Arc::new(SessionAdapterMemory::new());

	let app = AppBuilder::new(Jid::parse(OWN_JID).unwrap())
		.disco(disco.clone())
		.transport(transport.clone())
		.session(session.clone())
		.register_settings(dunlin_push::register_settings)
		.unwrap()
		.setting(dunlin_push::PUSH_APP_SERVERS, SettingValue::Json(servers))
		.setting(dunlin_push::ENABLE_MUC_PUSH, SettingValue::Bool(enable_muc_push))
		.build()
		.unwrap();

	TestClient { app, disco, transport, session }
}

pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}
