//! Settings subsystem types and service

pub mod service;
pub mod types;

pub use service::SettingsService;
pub use types::{
	FrozenSettingsRegistry, SettingDefinition, SettingDefinitionBuilder, SettingValue,
	SettingsRegistry,
};

// vim: ts=4
