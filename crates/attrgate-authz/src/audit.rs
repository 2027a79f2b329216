// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Audit records for refused and faulted attribute operations.
//!
//! Records are serialisable and emitted through `tracing` under the
//! `attrgate::audit` target, so any subscriber layer can route them to a
//! dedicated sink. READ filtering on batches is not audited; it is the normal
//! shape of a read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use attrgate_core::{Action, Session, UserId};

use crate::batch::Denial;

/// Kinds of audited events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
	/// A write batch was rejected because one attribute failed WRITE.
	WriteDenied,
	/// A strict single read was refused.
	ReadDenied,
	/// An operation needing the administrative role was refused.
	AdminRoleDenied,
	/// Stored data did not fit the operation's scope.
	ConsistencyFault,
}

impl std::fmt::Display for AuditEventType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			AuditEventType::WriteDenied => "write_denied",
			AuditEventType::ReadDenied => "read_denied",
			AuditEventType::AdminRoleDenied => "admin_role_denied",
			AuditEventType::ConsistencyFault => "consistency_fault",
		};
		write!(f, "{s}")
	}
}

/// One audited event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
	pub id: Uuid,
	pub timestamp: DateTime<Utc>,
	pub event_type: AuditEventType,
	/// Principal name of the session.
	pub actor: String,
	pub actor_user_id: Option<UserId>,
	/// Gateway operation, e.g. `set_attributes`.
	pub operation: String,
	pub attribute: Option<String>,
	/// Rendered entity context the decision was made for.
	pub context: Option<String>,
	pub details: serde_json::Value,
}

impl AuditRecord {
	pub fn builder(event_type: AuditEventType, session: &Session, operation: impl Into<String>) -> AuditRecordBuilder {
		AuditRecordBuilder::new(event_type, session, operation)
	}

	/// Record for a rejected strict batch.
	pub fn for_denial(session: &Session, operation: &str, denial: &Denial) -> Self {
		let event_type = match denial.action {
			Action::Read => AuditEventType::ReadDenied,
			Action::Write => AuditEventType::WriteDenied,
		};
		Self::builder(event_type, session, operation)
			.attribute(denial.attribute.clone())
			.context(denial.context.to_string())
			.build()
	}

	/// Writes the record to the audit target.
	pub fn emit(&self) {
		let record = serde_json::to_string(self).unwrap_or_else(|e| format!("{{\"serialization_error\":\"{e}\"}}"));
		warn!(
			target: "attrgate::audit",
			event_type = %self.event_type,
			actor = %self.actor,
			operation = %self.operation,
			%record,
			"audit"
		);
	}
}

#[derive(Debug, Clone)]
pub struct AuditRecordBuilder {
	event_type: AuditEventType,
	actor: String,
	actor_user_id: Option<UserId>,
	operation: String,
	attribute: Option<String>,
	context: Option<String>,
	details: serde_json::Value,
}

impl AuditRecordBuilder {
	pub fn new(event_type: AuditEventType, session: &Session, operation: impl Into<String>) -> Self {
		Self {
			event_type,
			actor: session.actor.clone(),
			actor_user_id: session.user_id,
			operation: operation.into(),
			attribute: None,
			context: None,
			details: serde_json::Value::Null,
		}
	}

	pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
		self.attribute = Some(attribute.into());
		self
	}

	pub fn context(mut self, context: impl Into<String>) -> Self {
		self.context = Some(context.into());
		self
	}

	pub fn details(mut self, details: serde_json::Value) -> Self {
		self.details = details;
		self
	}

	pub fn build(self) -> AuditRecord {
		AuditRecord {
			id: Uuid::new_v4(),
			timestamp: Utc::now(),
			event_type: self.event_type,
			actor: self.actor,
			actor_user_id: self.actor_user_id,
			operation: self.operation,
			attribute: self.attribute,
			context: self.context,
			details: self.details,
		}
	}
}
