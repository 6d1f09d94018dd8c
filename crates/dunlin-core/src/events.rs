//! Client event bus
//!
//! Feature crates subscribe listeners; the host emits events as the session
//! progresses. Listeners are async and awaited in subscription order.

use parking_lot::RwLock;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::prelude::*;
use dunlin_types::jid::Jid;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Listener function type
pub type EventListener = Arc<dyn Fn(App, ClientEvent) -> BoxFuture<'static, ()> + Send + Sync>;

/// Session-level events emitted by the host client.
#[derive(Debug, Clone)]
pub enum ClientEvent {
	/// The session is established and the roster/state is initialized.
	SessionReady,
	/// A conversation was added to the set of open chats.
	ChatAdded { jid: Jid, chatroom: bool },
}

#[derive(Default)]
pub struct EventBus {
	listeners: RwLock<Vec<EventListener>>,
}

impl EventBus {
	pub fn new() -> EventBus {
		EventBus { listeners: RwLock::new(Vec::new()) }
	}

	pub fn listen(&self, listener: EventListener) {
		self.listeners.write().push(listener);
	}

	/// Emit an event to every listener, awaiting each in turn.
	pub async fn emit(&self, app: &App, event: ClientEvent) {
		let listeners: Vec<EventListener> = self.listeners.read().clone();
		for listener in listeners {
			listener(app.clone(), event.clone()).await;
		}
	}

	pub fn len(&self) -> usize {
		self.listeners.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.listeners.read().is_empty()
	}
}


// vim: ts=4
