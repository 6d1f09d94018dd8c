//! Settings types and definitions
//!
//! Feature crates declare their recognized settings during app construction;
//! the registry is frozen before the first value is read.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;

/// Type alias for setting validator function
pub type SettingValidator = Box<dyn Fn(&SettingValue) -> DlResult<()> + Send + Sync>;

/// Setting value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)] // No type tag - type inferred from SettingDefinition
pub enum SettingValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	String(String),
	Json(serde_json::Value),
}

impl SettingValue {
	/// Check if this value matches the type of another value
	pub fn matches_type(&self, other: &SettingValue) -> bool {
		matches!(
			(self, other),
			(SettingValue::String(_), SettingValue::String(_))
				| (SettingValue::Int(_), SettingValue::Int(_))
				| (SettingValue::Bool(_), SettingValue::Bool(_))
				| (SettingValue::Json(_), SettingValue::Json(_))
		)
	}

	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::String(_) => "string",
			SettingValue::Int(_) => "int",
			SettingValue::Bool(_) => "bool",
			SettingValue::Json(_) => "json",
		}
	}
}

/// Setting definition - defines metadata for each setting
pub struct SettingDefinition {
	/// Setting key (e.g., "push_app_servers")
	pub key: String,

	/// Human-readable description
	pub description: String,

	/// Optional default value
	/// If None and optional=false, the setting MUST be configured
	pub default: Option<SettingValue>,

	/// Whether this setting is optional (can be unconfigured even without a default)
	pub optional: bool,

	/// Optional validation function
	pub validator: Option<SettingValidator>,
}

impl Clone for SettingDefinition {
	fn clone(&self) -> Self {
		SettingDefinition {
			key: self.key.clone(),
			description: self.description.clone(),
			default: self.default.clone(),
			optional: self.optional,
			validator: None, // Don't clone the validator function
		}
	}
}

impl Debug for SettingDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingDefinition")
			.field("key", &self.key)
			.field("description", &self.description)
			.field("default", &self.default)
			.field("optional", &self.optional)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

impl SettingDefinition {
	/// Create a builder for constructing a SettingDefinition
	pub fn builder(key: impl Into<String>) -> SettingDefinitionBuilder {
		SettingDefinitionBuilder::new(key)
	}
}

/// Builder for SettingDefinition with fluent API
pub struct SettingDefinitionBuilder {
	key: String,
	description: Option<String>,
	default: Option<SettingValue>,
	optional: bool,
	validator: Option<SettingValidator>,
}

impl SettingDefinitionBuilder {
	pub fn new(key: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			description: None,
			default: None,
			optional: false, // Default to required for safety
			validator: None,
		}
	}

	/// Set the description (required)
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Set the default value (optional - if not set, setting is required)
	pub fn default(mut self, value: SettingValue) -> Self {
		self.default = Some(value);
		self
	}

	/// Mark this setting as optional (can be unconfigured)
	pub fn optional(mut self, optional: bool) -> Self {
		self.optional = optional;
		self
	}

	/// Set a validation function
	pub fn validator<F>(mut self, f: F) -> Self
	where
		F: Fn(&SettingValue) -> DlResult<()> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(f));
		self
	}

	/// Build the SettingDefinition
	pub fn build(self) -> DlResult<SettingDefinition> {
		let description = self
			.description
			.ok_or_else(|| Error::ConfigError("Setting description is required".into()))?;

		Ok(SettingDefinition {
			key: self.key,
			description,
			default: self.default,
			optional: self.optional,
			validator: self.validator,
		})
	}
}

/// Mutable registry used during app initialization
pub struct SettingsRegistry {
	definitions: std::collections::HashMap<String, SettingDefinition>,
}

impl SettingsRegistry {
	pub fn new() -> Self {
		Self { definitions: std::collections::HashMap::new() }
	}

	/// Register a new setting definition
	pub fn register(&mut self, def: SettingDefinition) -> DlResult<()> {
		if self.definitions.contains_key(&def.key) {
			return Err(Error::ConfigError(format!("Setting '{}' is already registered", def.key)));
		}

		tracing::debug!("Registering setting: {}", def.key);
		self.definitions.insert(def.key.clone(), def);
		Ok(())
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> FrozenSettingsRegistry {
		tracing::debug!("Freezing settings registry with {} definitions", self.definitions.len());
		FrozenSettingsRegistry { definitions: self.definitions }
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

impl Default for SettingsRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Immutable registry stored in AppState
pub struct FrozenSettingsRegistry {
	definitions: std::collections::HashMap<String, SettingDefinition>,
}

impl FrozenSettingsRegistry {
	/// Get a setting definition by key
	pub fn get(&self, key: &str) -> Option<&SettingDefinition> {
		self.definitions.get(key)
	}

	/// List all registered settings
	pub fn list(&self) -> impl Iterator<Item = &SettingDefinition> {
		self.definitions.values()
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn bool_def(key: &str) -> SettingDefinition {
		SettingDefinition::builder(key)
			.description("test setting")
			.default(SettingValue::Bool(false))
			.build()
			.unwrap()
	}

	#[test]
	fn test_builder_requires_description() {
		assert!(SettingDefinition::builder("x").build().is_err());
	}

	#[test]
	fn test_register_and_freeze() {
		let mut registry = SettingsRegistry::new();
		registry.register(bool_def("a")).unwrap();
		registry.register(bool_def("b")).unwrap();
		let frozen = registry.freeze();
		assert_eq!(frozen.len(), 2);
		assert!(frozen.get("a").is_some());
		assert!(frozen.get("c").is_none());
	}

	#[test]
	fn test_duplicate_registration_fails() {
		let mut registry = SettingsRegistry::new();
		registry.register(bool_def("a")).unwrap();
		assert!(registry.register(bool_def("a")).is_err());
	}

	#[test]
	fn test_value_type_matching() {
		assert!(SettingValue::Bool(true).matches_type(&SettingValue::Bool(false)));
		assert!(!SettingValue::Bool(true).matches_type(&SettingValue::Int(1)));
		assert_eq!(SettingValue::Json(serde_json::json!([])).type_name(), "json");
	}
}

// vim: ts=4
