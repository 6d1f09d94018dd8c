//! Settings service with validation and typed accessors

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;

use crate::prelude::*;

use super::types::{FrozenSettingsRegistry, SettingValue};

/// Settings service - main interface for accessing and managing settings
pub struct SettingsService {
	registry: Arc<FrozenSettingsRegistry>,
	values: RwLock<HashMap<String, SettingValue>>,
}

impl SettingsService {
	pub fn new(registry: Arc<FrozenSettingsRegistry>) -> Self {
		Self { registry, values: RwLock::new(HashMap::new()) }
	}

	/// Get setting value with resolution (configured -> default)
	pub fn get(&self, key: &str) -> DlResult<SettingValue> {
		let def = self
			.registry
			.get(key)
			.ok_or_else(|| Error::ValidationError(format!("Unknown setting: {}", key)))?;

		if let Some(value) = self.values.read().get(key) {
			return Ok(value.clone());
		}

		match &def.default {
			Some(default) => Ok(default.clone()),
			None => Err(Error::ValidationError(format!(
				"Setting '{}' has no default and must be configured",
				key
			))),
		}
	}

	/// Set setting value with validation
	pub fn set(&self, key: &str, value: SettingValue) -> DlResult<()> {
		let def = self
			.registry
			.get(key)
			.ok_or_else(|| Error::ValidationError(format!("Unknown setting: {}", key)))?;

		// Validate type matches definition (if default exists)
		if let Some(default) = &def.default {
			if !value.matches_type(default) {
				return Err(Error::ValidationError(format!(
					"Type mismatch for setting '{}': expected {}, got {}",
					key,
					default.type_name(),
					value.type_name()
				)));
			}
		}

		// Run custom validator if present
		if let Some(validator) = &def.validator {
			validator(&value)?;
		}

		debug!("Setting '{}' updated", key);
		self.values.write().insert(key.to_string(), value);
		Ok(())
	}

	/// Type-safe getters (return an error on type mismatch)
	pub fn get_string(&self, key: &str) -> DlResult<String> {
		match self.get(key)? {
			SettingValue::String(s) => Ok(s),
			v => Err(Error::ValidationError(format!(
				"Setting '{}' is not a string, got {}",
				key,
				v.type_name()
			))),
		}
	}

	pub fn get_int(&self, key: &str) -> DlResult<i64> {
		match self.get(key)? {
			SettingValue::Int(i) => Ok(i),
			v => Err(Error::ValidationError(format!(
				"Setting '{}' is not an integer, got {}",
				key,
				v.type_name()
			))),
		}
	}

	pub fn get_bool(&self, key: &str) -> DlResult<bool> {
		match self.get(key)? {
			SettingValue::Bool(b) => Ok(b),
			v => Err(Error::ValidationError(format!(
				"Setting '{}' is not a boolean, got {}",
				key,
				v.type_name()
			))),
		}
	}

	pub fn get_json(&self, key: &str) -> DlResult<serde_json::Value> {
		match self.get(key)? {
			SettingValue::Json(j) => Ok(j),
			v => Err(Error::ValidationError(format!(
				"Setting '{}' is not JSON, got {}",
				key,
				v.type_name()
			))),
		}
	}

	/// Deserialize a JSON setting into a typed value
	pub fn get_json_as<T: DeserializeOwned>(&self, key: &str) -> DlResult<T> {
		let value = self.get_json(key)?;
		serde_json::from_value(value).map_err(|e| {
			Error::ValidationError(format!("Invalid value for setting '{}': {}", key, e))
		})
	}

	/// Get reference to registry (for listing all settings)
	pub fn registry(&self) -> &Arc<FrozenSettingsRegistry> {
		&self.registry
	}
}


// vim: ts=4
