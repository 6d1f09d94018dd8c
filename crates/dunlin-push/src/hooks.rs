//! Event bus wiring
//!
//! Session-ready triggers negotiation for the own account domain; a newly
//! joined group chat triggers it for the chat's domain when `enable_muc_push`
//! is set.

use std::sync::Arc;

use crate::prelude::*;
use crate::registrar::PushRegistrar;
use crate::settings::ENABLE_MUC_PUSH;
use dunlin_core::events::ClientEvent;

/// Subscribe the registrar to the client event bus.
pub fn register_hooks(app: &App, registrar: Arc<PushRegistrar>) {
	app.events.listen(Arc::new(move |app, event| {
		let registrar = registrar.clone();
		Box::pin(async move {
			match event {
				ClientEvent::SessionReady => registrar.register_push(None).await,
				ClientEvent::ChatAdded { jid, chatroom: true } => {
					if app.settings.get_bool(ENABLE_MUC_PUSH).unwrap_or(false) {
						registrar.register_push(Some(jid.domain())).await;
					}
				}
				ClientEvent::ChatAdded { .. } => {}
			}
		})
	}));
}

// vim: ts=4
