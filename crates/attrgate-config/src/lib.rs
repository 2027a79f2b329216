// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for the attribute-access gateway.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`ATTRGATE_*`)
//! - Tracing subscriber setup from the logging section
//!
//! # Usage
//!
//! ```ignore
//! use attrgate_config::{init_tracing, load_config};
//!
//! let config = load_config()?;
//! init_tracing(&config.logging)?;
//! ```

pub mod error;
pub mod layer;
pub mod logging;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::AttrgateConfigLayer;
pub use logging::init_tracing;
pub use sections::*;
pub use sources::{ConfigSource, EnvSource, Precedence, TomlSource, CONFIG_PATH_VAR, SYSTEM_CONFIG_PATH};

use regex::Regex;
use tracing::{debug, info};

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrgateConfig {
	pub gateway: GatewayConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`ATTRGATE_*`)
/// 2. Config file (`$ATTRGATE_CONFIG`, else `/etc/attrgate/attrgate.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<AttrgateConfig, ConfigError> {
	load_from(vec![Box::new(EnvSource), Box::new(TomlSource::discover())])
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<AttrgateConfig, ConfigError> {
	let mut merged = AttrgateConfigLayer::default();
	merged.merge(EnvSource.load()?);
	finalize(merged)
}

/// Load configuration with a config file that must exist.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<AttrgateConfig, ConfigError> {
	load_from(vec![Box::new(EnvSource), Box::new(TomlSource::required(config_path))])
}

fn load_from(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<AttrgateConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = AttrgateConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: AttrgateConfigLayer) -> Result<AttrgateConfig, ConfigError> {
	let gateway = layer.gateway.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&gateway)?;

	info!(
		attribute_name_pattern = %gateway.attribute_name_pattern,
		audit_write_denials = gateway.audit_write_denials,
		max_entityless_key_len = gateway.max_entityless_key_len,
		log_level = %logging.level,
		"Gateway configuration loaded"
	);

	Ok(AttrgateConfig { gateway, logging })
}

/// Validate cross-field configuration rules.
fn validate_config(gateway: &GatewayConfig) -> Result<(), ConfigError> {
	if let Err(e) = Regex::new(&gateway.attribute_name_pattern) {
		return Err(ConfigError::Validation(format!(
			"gateway.attribute_name_pattern is not a valid regex: {e}"
		)));
	}

	if gateway.max_entityless_key_len == 0 {
		return Err(ConfigError::Validation(
			"gateway.max_entityless_key_len must be greater than zero".to_string(),
		));
	}

	Ok(())
}
