// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Where gateway configuration comes from.
//!
//! Two sources exist: a TOML file and `ATTRGATE_*` environment variables.
//! Built-in defaults are not a source; they are applied when the merged
//! layer is finalized. The file is looked up at `ATTRGATE_CONFIG` when that
//! variable is set, and at `/etc/attrgate/attrgate.toml` otherwise.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::error::ConfigError;
use crate::layer::AttrgateConfigLayer;
use crate::sections::{GatewayConfigLayer, LogFormat, LoggingConfigLayer};

/// Variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "ATTRGATE_CONFIG";

/// Config file read when [`CONFIG_PATH_VAR`] is unset.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/attrgate/attrgate.toml";

/// Merge order of sources. Later sources override earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	File,
	Environment,
}

pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<AttrgateConfigLayer, ConfigError>;
}

/// A TOML config file.
///
/// The system file is optional. A file the operator named explicitly must
/// exist.
#[derive(Debug, Clone)]
pub struct TomlSource {
	path: PathBuf,
	required: bool,
}

impl TomlSource {
	pub fn required(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: true,
		}
	}

	pub fn optional(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: false,
		}
	}

	/// The file named by `ATTRGATE_CONFIG`, falling back to the system file.
	pub fn discover() -> Self {
		match env_var(CONFIG_PATH_VAR) {
			Some(path) => Self::required(path),
			None => Self::optional(SYSTEM_CONFIG_PATH),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn is_required(&self) -> bool {
		self.required
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"file"
	}

	fn precedence(&self) -> Precedence {
		Precedence::File
	}

	fn load(&self) -> Result<AttrgateConfigLayer, ConfigError> {
		let content = match std::fs::read_to_string(&self.path) {
			Ok(content) => content,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound && !self.required => {
				debug!(path = %self.path.display(), "no config file");
				return Ok(AttrgateConfigLayer::default());
			}
			Err(source) => {
				return Err(ConfigError::FileRead {
					path: self.path.clone(),
					source,
				})
			}
		};

		toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
			path: self.path.clone(),
			source,
		})
	}
}

/// `ATTRGATE_<SECTION>_<FIELD>` variables. Unset or empty variables leave the
/// field to lower layers; malformed ones are an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<AttrgateConfigLayer, ConfigError> {
		let gateway = GatewayConfigLayer {
			attribute_name_pattern: env_var("ATTRGATE_GATEWAY_ATTRIBUTE_NAME_PATTERN"),
			audit_write_denials: env_bool("ATTRGATE_GATEWAY_AUDIT_WRITE_DENIALS")?,
			max_entityless_key_len: env_parse("ATTRGATE_GATEWAY_MAX_ENTITYLESS_KEY_LEN")?,
		};
		let logging = LoggingConfigLayer {
			level: env_var("ATTRGATE_LOGGING_LEVEL"),
			format: env_parse::<LogFormat>("ATTRGATE_LOGGING_FORMAT")?,
		};
		Ok(AttrgateConfigLayer {
			gateway: Some(gateway),
			logging: Some(logging),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

/// Accepts `true`/`false`/`1`/`0`, case-insensitively.
fn env_bool(name: &str) -> Result<Option<bool>, ConfigError> {
	let Some(raw) = env_var(name) else {
		return Ok(None);
	};
	match raw.trim().to_ascii_lowercase().as_str() {
		"true" | "1" => Ok(Some(true)),
		"false" | "0" => Ok(Some(false)),
		_ => Err(ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("expected true, false, 1 or 0, got '{raw}'"),
		}),
	}
}

fn env_parse<T>(name: &str) -> Result<Option<T>, ConfigError>
where
	T: FromStr,
	T::Err: std::fmt::Display,
{
	env_var(name)
		.map(|raw| {
			raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
				key: name.to_string(),
				message: format!("'{raw}': {e}"),
			})
		})
		.transpose()
}
