//! JID parsing and validation
//!
//! A JID is an XMPP address of the form `local@domain/resource`, where both
//! the local and resource parts are optional. Negotiation-level code mostly
//! works with bare JIDs (no resource) and plain domains.

use crate::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// An XMPP address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Jid {
	local: Option<Box<str>>,
	domain: Box<str>,
	resource: Option<Box<str>>,
}

impl Jid {
	/// Parse a JID from its string form, validating each part.
	pub fn parse(input: &str) -> DlResult<Jid> {
		if input.is_empty() {
			return Err(Error::ValidationError("JID cannot be empty".to_string()));
		}

		let (bare, resource) = match input.split_once('/') {
			Some((bare, resource)) => {
				if resource.is_empty() {
					return Err(Error::ValidationError(
						"JID resource part cannot be empty".to_string(),
					));
				}
				(bare, Some(resource))
			}
			None => (input, None),
		};

		let (local, domain) = match bare.split_once('@') {
			Some((local, domain)) => {
				if local.is_empty() {
					return Err(Error::ValidationError(
						"JID local part cannot be empty".to_string(),
					));
				}
				if domain.contains('@') {
					return Err(Error::ValidationError(
						"JID cannot contain multiple '@' separators".to_string(),
					));
				}
				(Some(local), domain)
			}
			None => (None, bare),
		};

		validate_domain(domain)?;

		Ok(Jid {
			local: local.map(Into::into),
			domain: domain.into(),
			resource: resource.map(Into::into),
		})
	}

	/// Build a domain-only JID (e.g. for addressing a server or component).
	pub fn from_domain(domain: &str) -> DlResult<Jid> {
		validate_domain(domain)?;
		Ok(Jid { local: None, domain: domain.into(), resource: None })
	}

	pub fn local(&self) -> Option<&str> {
		self.local.as_deref()
	}

	pub fn domain(&self) -> &str {
		&self.domain
	}

	pub fn resource(&self) -> Option<&str> {
		self.resource.as_deref()
	}

	pub fn is_bare(&self) -> bool {
		self.resource.is_none()
	}

	/// The bare form of this JID (resource dropped).
	pub fn bare(&self) -> Jid {
		Jid { local: self.local.clone(), domain: self.domain.clone(), resource: None }
	}
}

/// Validate the domain part with hostname rules.
fn validate_domain(domain: &str) -> DlResult<()> {
	if domain.is_empty() {
		return Err(Error::ValidationError("JID domain cannot be empty".to_string()));
	}
	if domain.len() > 253 {
		return Err(Error::ValidationError("JID domain too long (max 253 characters)".to_string()));
	}

	let valid_chars = |c: char| c.is_alphanumeric() || c == '.' || c == '-' || c == '_';
	if !domain.chars().all(valid_chars) {
		return Err(Error::ValidationError(
			"Invalid domain characters (allowed: alphanumeric, dot, hyphen, underscore)"
				.to_string(),
		));
	}

	for label in domain.split('.') {
		if label.is_empty() {
			return Err(Error::ValidationError("Domain labels cannot be empty".to_string()));
		}
		if label.starts_with('-') || label.ends_with('-') {
			return Err(Error::ValidationError(
				"Domain labels cannot start or end with hyphen".to_string(),
			));
		}
		if label.len() > 63 {
			return Err(Error::ValidationError(
				"Domain label too long (max 63 characters)".to_string(),
			));
		}
	}

	Ok(())
}

impl std::fmt::Display for Jid {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if let Some(local) = &self.local {
			write!(f, "{}@", local)?;
		}
		write!(f, "{}", self.domain)?;
		if let Some(resource) = &self.resource {
			write!(f, "/{}", resource)?;
		}
		Ok(())
	}
}

impl FromStr for Jid {
	type Err = Error;

	fn from_str(s: &str) -> DlResult<Jid> {
		Jid::parse(s)
	}
}

impl Serialize for Jid {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Jid {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		Jid::parse(&s).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_full_jid() {
		let jid = Jid::parse("alice@example.com/phone").unwrap();
		assert_eq!(jid.local(), Some("alice"));
		assert_eq!(jid.domain(), "example.com");
		assert_eq!(jid.resource(), Some("phone"));
		assert!(!jid.is_bare());
	}

	#[test]
	fn test_parse_bare_jid() {
		let jid = Jid::parse("alice@example.com").unwrap();
		assert_eq!(jid.local(), Some("alice"));
		assert_eq!(jid.resource(), None);
		assert!(jid.is_bare());
	}

	#[test]
	fn test_parse_domain_only() {
		let jid = Jid::parse("conference.example.com").unwrap();
		assert_eq!(jid.local(), None);
		assert_eq!(jid.domain(), "conference.example.com");
		assert!(jid.is_bare());
	}

	#[test]
	fn test_from_domain() {
		let jid = Jid::from_domain("push.example.com").unwrap();
		assert_eq!(jid.to_string(), "push.example.com");
	}

	#[test]
	fn test_parse_errors() {
		// Empty input and empty parts
		assert!(Jid::parse("").is_err());
		assert!(Jid::parse("@example.com").is_err());
		assert!(Jid::parse("alice@").is_err());
		assert!(Jid::parse("alice@example.com/").is_err());
		assert!(Jid::parse("alice@example.com@other").is_err());

		// Domain validation
		assert!(Jid::parse("alice@exa mple.com").is_err());
		assert!(Jid::parse("alice@example..com").is_err());
		assert!(Jid::parse("alice@-example.com").is_err());
		assert!(Jid::parse(&format!("alice@{}.com", "a".repeat(64))).is_err());
	}

	#[test]
	fn test_bare_drops_resource() {
		let jid = Jid::parse("alice@example.com/phone").unwrap();
		assert_eq!(jid.bare().to_string(), "alice@example.com");
	}

	#[test]
	fn test_display_round_trip() {
		for input in ["alice@example.com", "example.org", "bob@muc.example.net/nick"] {
			assert_eq!(Jid::parse(input).unwrap().to_string(), input);
		}
	}

	#[test]
	fn test_serde_round_trip() {
		let jid = Jid::parse("alice@example.com").unwrap();
		let json = serde_json::to_string(&jid).unwrap();
		assert_eq!(json, "\"alice@example.com\"");
		let back: Jid = serde_json::from_str(&json).unwrap();
		assert_eq!(back, jid);
	}
}

// vim: ts=4
