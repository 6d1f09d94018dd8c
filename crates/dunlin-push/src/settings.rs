//! Push registration settings

use crate::prelude::*;
use dunlin_core::settings::{SettingDefinition, SettingValue, SettingsRegistry};

/// JSON list of [`crate::PushAppServer`] entries.
pub const PUSH_APP_SERVERS: &str = "push_app_servers";

/// Negotiate push for joined group chat domains as well.
pub const ENABLE_MUC_PUSH: &str = "enable_muc_push";

/// Register all push registration settings
pub fn register_settings(registry: &mut SettingsRegistry) -> DlResult<()> {
	registry.register(
		SettingDefinition::builder(PUSH_APP_SERVERS)
			.description("Push app servers to register with (XEP-0357)")
			.default(SettingValue::Json(serde_json::json!([])))
			.build()?,
	)?;

	registry.register(
		SettingDefinition::builder(ENABLE_MUC_PUSH)
			.description("Also negotiate push for joined group chat domains")
			.default(SettingValue::Bool(false))
			.build()?,
	)?;

	Ok(())
}

// vim: ts=4
