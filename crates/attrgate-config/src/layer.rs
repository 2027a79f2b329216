// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The partially specified configuration each source produces.

use serde::{Deserialize, Serialize};

use crate::sections::{GatewayConfigLayer, LoggingConfigLayer};

/// One layer of configuration. Later layers override earlier ones field by
/// field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AttrgateConfigLayer {
	pub gateway: Option<GatewayConfigLayer>,
	pub logging: Option<LoggingConfigLayer>,
}

impl AttrgateConfigLayer {
	pub fn merge(&mut self, other: Self) {
		merge_section(&mut self.gateway, other.gateway, GatewayConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_section<T>(current: &mut Option<T>, other: Option<T>, merge: fn(&mut T, T)) {
	match (current.as_mut(), other) {
		(Some(existing), Some(other)) => merge(existing, other),
		(None, Some(other)) => *current = Some(other),
		(_, None) => {}
	}
}
