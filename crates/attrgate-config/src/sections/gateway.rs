// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Gateway behaviour configuration section.

use serde::{Deserialize, Serialize};

/// Friendly names accepted for new attribute definitions.
pub const DEFAULT_ATTRIBUTE_NAME_PATTERN: &str = "^[-a-zA-Z:0-9]+$";
const DEFAULT_MAX_ENTITYLESS_KEY_LEN: usize = 256;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GatewayConfigLayer {
	pub attribute_name_pattern: Option<String>,
	pub audit_write_denials: Option<bool>,
	pub max_entityless_key_len: Option<usize>,
}

impl GatewayConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.attribute_name_pattern.is_some() {
			self.attribute_name_pattern = other.attribute_name_pattern;
		}
		if other.audit_write_denials.is_some() {
			self.audit_write_denials = other.audit_write_denials;
		}
		if other.max_entityless_key_len.is_some() {
			self.max_entityless_key_len = other.max_entityless_key_len;
		}
	}

	pub fn finalize(self) -> GatewayConfig {
		GatewayConfig {
			attribute_name_pattern: self
				.attribute_name_pattern
				.unwrap_or_else(|| DEFAULT_ATTRIBUTE_NAME_PATTERN.to_string()),
			audit_write_denials: self.audit_write_denials.unwrap_or(true),
			max_entityless_key_len: self
				.max_entityless_key_len
				.unwrap_or(DEFAULT_MAX_ENTITYLESS_KEY_LEN),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayConfig {
	/// Regex a friendly name must match when a definition is created.
	pub attribute_name_pattern: String,
	/// Emit an audit record for every rejected write batch.
	pub audit_write_denials: bool,
	pub max_entityless_key_len: usize,
}

impl Default for GatewayConfig {
	fn default() -> Self {
		GatewayConfigLayer::default().finalize()
	}
}
