//! Enable/disable request builders
//!
//! Wire shapes per XEP-0357: an IQ set carrying an `<enable/>` or
//! `<disable/>` element in the push namespace, optionally followed by a
//! submitted publish-options form carrying the relay secret. The routing
//! target is omitted when the request is for the user's own server.

use quick_xml::Writer;
use quick_xml::events::{BytesStart, BytesText, Event};

use crate::prelude::*;
use dunlin_types::jid::Jid;
use dunlin_types::stanza::{Iq, NS_DATA_FORMS, NS_PUBSUB, NS_PUSH, into_fragment};

/// Build the enable request for one app server.
pub fn build_enable_request(
	own_domain: &str,
	domain: &str,
	service_jid: &str,
	node: &str,
	secret: Option<&str>,
) -> DlResult<Iq> {
	let mut writer = Writer::new(Vec::new());

	let mut enable = BytesStart::new("enable");
	enable.push_attribute(("xmlns", NS_PUSH));
	enable.push_attribute(("jid", service_jid));
	enable.push_attribute(("node", node));

	match secret {
		None => writer.write_event(Event::Empty(enable))?,
		Some(secret) => {
			let end = enable.to_end().into_owned();
			writer.write_event(Event::Start(enable))?;
			write_publish_options(&mut writer, secret)?;
			writer.write_event(Event::End(end))?;
		}
	}

	route(Iq::set(into_fragment(writer)?), own_domain, domain)
}

/// Build the disable request for one app server.
pub fn build_disable_request(
	own_domain: &str,
	domain: &str,
	service_jid: &str,
	node: Option<&str>,
) -> DlResult<Iq> {
	let mut writer = Writer::new(Vec::new());

	let mut disable = BytesStart::new("disable");
	disable.push_attribute(("xmlns", NS_PUSH));
	disable.push_attribute(("jid", service_jid));
	if let Some(node) = node {
		disable.push_attribute(("node", node));
	}
	writer.write_event(Event::Empty(disable))?;

	route(Iq::set(into_fragment(writer)?), own_domain, domain)
}

/// Submitted data form carrying the relay secret.
fn write_publish_options(writer: &mut Writer<Vec<u8>>, secret: &str) -> std::io::Result<()> {
	let mut x = BytesStart::new("x");
	x.push_attribute(("xmlns", NS_DATA_FORMS));
	x.push_attribute(("type", "submit"));
	let end = x.to_end().into_owned();

	writer.write_event(Event::Start(x))?;
	write_form_field(writer, "FORM_TYPE", &format!("{}#publish-options", NS_PUBSUB))?;
	write_form_field(writer, "secret", secret)?;
	writer.write_event(Event::End(end))
}

fn write_form_field(writer: &mut Writer<Vec<u8>>, var: &str, value: &str) -> std::io::Result<()> {
	let mut field = BytesStart::new("field");
	field.push_attribute(("var", var));
	let field_end = field.to_end().into_owned();

	let value_start = BytesStart::new("value");
	let value_end = value_start.to_end().into_owned();

	writer.write_event(Event::Start(field))?;
	writer.write_event(Event::Start(value_start))?;
	writer.write_event(Event::Text(BytesText::new(value)))?;
	writer.write_event(Event::End(value_end))?;
	writer.write_event(Event::End(field_end))
}

/// Implicit account routing for the own domain, explicit `to` otherwise.
fn route(iq: Iq, own_domain: &str, domain: &str) -> DlResult<Iq> {
	if domain == own_domain {
		Ok(iq)
	} else {
		Ok(iq.with_to(Jid::from_domain(domain)?))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_enable_request_basic() {
		let iq = build_enable_request(
			"user.example.com",
			"user.example.com",
			"push.example.com",
			"n1",
			None,
		)
		.unwrap();
		assert!(iq.to.is_none());
		assert_eq!(
			iq.payload.as_ref(),
			"<enable xmlns=\"urn:xmpp:push:0\" jid=\"push.example.com\" node=\"n1\"/>"
		);
	}

	#[test]
	fn test_enable_request_with_secret() {
		let iq = build_enable_request(
			"user.example.com",
			"user.example.com",
			"push.example.com",
			"n1",
			Some("s3cr3t"),
		)
		.unwrap();
		assert!(iq.payload.contains("<x xmlns=\"jabber:x:data\" type=\"submit\">"));
		assert!(iq.payload.contains("#publish-options</value>"));
		assert!(iq.payload.contains("<field var=\"secret\"><value>s3cr3t</value></field>"));
		assert!(iq.payload.ends_with("</enable>"));
	}

	#[test]
	fn test_enable_request_routing_target() {
		let iq = build_enable_request(
			"user.example.com",
			"conference.example.com",
			"push.example.com",
			"n1",
			None,
		)
		.unwrap();
		assert_eq!(iq.to.as_ref().map(ToString::to_string).as_deref(), Some("conference.example.com"));
	}

	#[test]
	fn test_disable_request_without_node() {
		let iq = build_disable_request(
			"user.example.com",
			"user.example.com",
			"push.example.com",
			None,
		)
		.unwrap();
		assert!(iq.to.is_none());
		assert_eq!(
			iq.payload.as_ref(),
			"<disable xmlns=\"urn:xmpp:push:0\" jid=\"push.example.com\"/>"
		);
	}

	#[test]
	fn test_disable_request_with_node() {
		let iq = build_disable_request(
			"user.example.com",
			"conference.example.com",
			"push.example.com",
			Some("n1"),
		)
		.unwrap();
		assert!(iq.payload.contains("node=\"n1\""));
		assert!(iq.to.is_some());
	}

	#[test]
	fn test_secret_is_escaped() {
		let iq = build_enable_request(
			"user.example.com",
			"user.example.com",
			"push.example.com",
			"n1",
			Some("s<c&t"),
		)
		.unwrap();
		assert!(iq.payload.contains("s&lt;c&amp;t"));
	}
}

// vim: ts=4
