// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Argument validation shared by gateway operations.

use attrgate_core::{AttributeDefinition, AttributeName, Namespace};
use regex::Regex;

use crate::error::{GatewayError, Result};

/// Compiles the configured friendly-name pattern.
pub fn compile_name_pattern(pattern: &str) -> Result<Regex> {
	Regex::new(pattern)
		.map_err(|e| GatewayError::InvalidArgument(format!("invalid attribute name pattern '{pattern}': {e}")))
}

/// Validate a friendly name for a new attribute definition.
pub fn validate_friendly_name(pattern: &Regex, friendly_name: &str) -> Result<()> {
	if pattern.is_match(friendly_name) {
		Ok(())
	} else {
		Err(GatewayError::InvalidArgument(format!(
			"friendly name '{friendly_name}' does not match {}",
			pattern.as_str()
		)))
	}
}

/// Validate the key of an entityless attribute.
///
/// Keys must be non-blank and at most `max_len` bytes.
pub fn validate_entityless_key(key: &str, max_len: usize) -> Result<()> {
	if key.trim().is_empty() {
		return Err(GatewayError::InvalidArgument(
			"entityless key must not be empty".to_string(),
		));
	}
	if key.len() > max_len {
		return Err(GatewayError::InvalidArgument(format!(
			"entityless key is {} bytes, limit is {max_len}",
			key.len()
		)));
	}
	Ok(())
}

/// Parse a caller-supplied attribute name that must be entityless.
pub fn parse_entityless_name(name: &str) -> Result<AttributeName> {
	let parsed = AttributeName::parse(name).map_err(|e| GatewayError::InvalidArgument(e.to_string()))?;
	if parsed.namespace != Namespace::Entityless {
		return Err(GatewayError::WrongAttributeAssignment(format!(
			"attribute {name} is not an entityless attribute"
		)));
	}
	Ok(parsed)
}

/// Require a caller-supplied definition to be entityless.
pub fn require_entityless(definition: &AttributeDefinition) -> Result<()> {
	if definition.is_from(Namespace::Entityless) {
		Ok(())
	} else {
		Err(GatewayError::WrongAttributeAssignment(format!(
			"attribute {} is not an entityless attribute",
			definition.name()
		)))
	}
}
