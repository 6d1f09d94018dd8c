//! IQ stanza model and XML serialization
//!
//! Request stanzas are modeled as an [`Iq`] with a pre-rendered payload
//! fragment. Feature crates build their payloads with a `quick_xml::Writer`
//! and hand the fragment over; serialization of the outer `<iq/>` element
//! (including attribute escaping) happens in [`Iq::to_xml`].

use quick_xml::Writer;
use quick_xml::events::{BytesStart, BytesText, Event};

use crate::jid::Jid;
use crate::prelude::*;
use crate::utils;

pub const NS_PUSH: &str = "urn:xmpp:push:0";
pub const NS_DATA_FORMS: &str = "jabber:x:data";
pub const NS_PUBSUB: &str = "http://jabber.org/protocol/pubsub";
pub const NS_DISCO_INFO: &str = "http://jabber.org/protocol/disco#info";

/// IQ stanza type attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IqType {
	Get,
	Set,
	Result,
	Error,
}

impl IqType {
	pub fn as_str(&self) -> &'static str {
		match self {
			IqType::Get => "get",
			IqType::Set => "set",
			IqType::Result => "result",
			IqType::Error => "error",
		}
	}
}

/// An IQ request stanza.
///
/// `to` is omitted from the wire form when unset, which routes the request
/// to the user's own account.
#[derive(Debug, Clone)]
pub struct Iq {
	pub id: Box<str>,
	pub to: Option<Jid>,
	pub iq_type: IqType,
	/// Serialized XML child fragment, produced by [`into_fragment`].
	pub payload: Box<str>,
}

impl Iq {
	/// A set-type request with a fresh random id.
	pub fn set(payload: impl Into<Box<str>>) -> Iq {
		Iq {
			id: utils::random_id().into(),
			to: None,
			iq_type: IqType::Set,
			payload: payload.into(),
		}
	}

	/// Address the request to an explicit routing target.
	pub fn with_to(mut self, to: Jid) -> Iq {
		self.to = Some(to);
		self
	}

	/// Render the full stanza.
	pub fn to_xml(&self) -> DlResult<Box<str>> {
		let mut writer = Writer::new(Vec::new());

		let mut iq = BytesStart::new("iq");
		iq.push_attribute(("type", self.iq_type.as_str()));
		iq.push_attribute(("id", self.id.as_ref()));
		let to = self.to.as_ref().map(Jid::to_string);
		if let Some(to) = &to {
			iq.push_attribute(("to", to.as_str()));
		}

		if self.payload.is_empty() {
			writer.write_event(Event::Empty(iq))?;
		} else {
			let end = iq.to_end().into_owned();
			writer.write_event(Event::Start(iq))?;
			// The payload fragment was produced by a Writer and is already escaped.
			writer.write_event(Event::Text(BytesText::from_escaped(self.payload.as_ref())))?;
			writer.write_event(Event::End(end))?;
		}

		into_fragment(writer)
	}
}

/// Extract the UTF-8 fragment accumulated in a writer.
pub fn into_fragment(writer: Writer<Vec<u8>>) -> DlResult<Box<str>> {
	let bytes = writer.into_inner();
	let s = String::from_utf8(bytes).map_err(|_| Error::Parse)?;
	Ok(s.into())
}


// vim: ts=4
