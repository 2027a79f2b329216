// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Attribute definitions, values and the request-scoped view handed to callers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::NamespaceError;
use crate::namespace::{AttributeKind, AttributeName, Namespace};
use crate::types::{Action, AttributeId, Role};

/// Semantic type of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
	String,
	Integer,
	Boolean,
	List,
	Map,
}

impl fmt::Display for ValueType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			ValueType::String => "string",
			ValueType::Integer => "integer",
			ValueType::Boolean => "boolean",
			ValueType::List => "list",
			ValueType::Map => "map",
		};
		write!(f, "{s}")
	}
}

/// Identifies one attribute kind, shared by every entity it is set on.
///
/// The namespace is parsed when the definition is built and never changes
/// afterwards; nothing downstream inspects the textual name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeDefinition {
	pub id: AttributeId,
	pub namespace: Namespace,
	pub kind: AttributeKind,
	pub friendly_name: String,
	pub value_type: ValueType,
	pub description: Option<String>,
	pub display_name: Option<String>,
}

impl AttributeDefinition {
	pub fn new(id: AttributeId, name: AttributeName, value_type: ValueType) -> Self {
		Self {
			id,
			namespace: name.namespace,
			kind: name.kind,
			friendly_name: name.friendly_name,
			value_type,
			description: None,
			display_name: None,
		}
	}

	/// Builds a definition from its full URN name.
	pub fn parse(id: AttributeId, name: &str, value_type: ValueType) -> Result<Self, NamespaceError> {
		Ok(Self::new(id, AttributeName::parse(name)?, value_type))
	}

	/// Builder: set the description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Builder: set the display name.
	pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
		self.display_name = Some(display_name.into());
		self
	}

	/// Full URN name, e.g. `urn:perun:user:attribute-def:def:preferredMail`.
	pub fn name(&self) -> String {
		self.attribute_name().to_string()
	}

	pub fn attribute_name(&self) -> AttributeName {
		AttributeName::new(self.namespace, self.kind, self.friendly_name.clone())
	}

	pub fn is_from(&self, namespace: Namespace) -> bool {
		self.namespace == namespace
	}
}

/// A typed attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
	#[default]
	Null,
	String(String),
	Integer(i64),
	Boolean(bool),
	List(Vec<String>),
	Map(BTreeMap<String, String>),
}

impl AttributeValue {
	pub fn is_null(&self) -> bool {
		matches!(self, AttributeValue::Null)
	}

	/// True when the value is null or carries the given type.
	pub fn fits(&self, value_type: ValueType) -> bool {
		matches!(
			(self, value_type),
			(AttributeValue::Null, _)
				| (AttributeValue::String(_), ValueType::String)
				| (AttributeValue::Integer(_), ValueType::Integer)
				| (AttributeValue::Boolean(_), ValueType::Boolean)
				| (AttributeValue::List(_), ValueType::List)
				| (AttributeValue::Map(_), ValueType::Map)
		)
	}
}

impl From<&str> for AttributeValue {
	fn from(value: &str) -> Self {
		AttributeValue::String(value.to_string())
	}
}

impl From<String> for AttributeValue {
	fn from(value: String) -> Self {
		AttributeValue::String(value)
	}
}

impl From<i64> for AttributeValue {
	fn from(value: i64) -> Self {
		AttributeValue::Integer(value)
	}
}

impl From<bool> for AttributeValue {
	fn from(value: bool) -> Self {
		AttributeValue::Boolean(value)
	}
}

impl From<Vec<String>> for AttributeValue {
	fn from(value: Vec<String>) -> Self {
		AttributeValue::List(value)
	}
}

/// A definition together with the value held for one entity context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
	pub definition: AttributeDefinition,
	pub value: AttributeValue,
}

impl Attribute {
	pub fn new(definition: AttributeDefinition, value: impl Into<AttributeValue>) -> Self {
		Self {
			definition,
			value: value.into(),
		}
	}

	/// An attribute with no value set.
	pub fn empty(definition: AttributeDefinition) -> Self {
		Self {
			definition,
			value: AttributeValue::Null,
		}
	}

	pub fn id(&self) -> AttributeId {
		self.definition.id
	}

	pub fn namespace(&self) -> Namespace {
		self.definition.namespace
	}

	pub fn name(&self) -> String {
		self.definition.name()
	}
}

/// An attribute as returned to one caller, annotated with whether that caller
/// may write it in the context it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeView {
	pub attribute: Attribute,
	pub writable: bool,
}

impl AttributeView {
	pub fn new(attribute: Attribute, writable: bool) -> Self {
		Self { attribute, writable }
	}

	pub fn into_attribute(self) -> Attribute {
		self.attribute
	}
}

/// A definition the caller may read in some context, with whether they may
/// also write it there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionView {
	pub definition: AttributeDefinition,
	pub writable: bool,
}

impl From<AttributeView> for DefinitionView {
	fn from(view: AttributeView) -> Self {
		Self {
			definition: view.attribute.definition,
			writable: view.writable,
		}
	}
}

/// Actions a role is granted on one attribute definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRights {
	pub attribute_id: AttributeId,
	pub role: Role,
	pub rights: Vec<Action>,
}

impl AttributeRights {
	pub fn new(attribute_id: AttributeId, role: Role, rights: Vec<Action>) -> Self {
		Self {
			attribute_id,
			role,
			rights,
		}
	}

	pub fn grants(&self, action: Action) -> bool {
		self.rights.contains(&action)
	}
}
