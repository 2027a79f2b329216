// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The closed attribute namespace taxonomy.
//!
//! Every attribute name is a URN of the form
//! `urn:perun:<namespace>:attribute-def:<kind>:<friendlyName>`. The
//! `<namespace>` segment decides which entity (or entity pair) the attribute is
//! defined over; [`Namespace::required_kinds`] is the single table the
//! dispatcher consults to build an entity context.
//!
//! Names are parsed exactly once, when an [`AttributeDefinition`] is built.
//! Anything outside the taxonomy is rejected there, so no code downstream ever
//! compares namespace strings.
//!
//! [`AttributeDefinition`]: crate::AttributeDefinition

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NamespaceError;
use crate::types::EntityKind;

const URN_PREFIX: &str = "urn:perun:";
const ATTRIBUTE_DEF: &str = "attribute-def";

/// Attribute namespaces, one per entity or entity pair attributes bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
	Vo,
	Group,
	Resource,
	Member,
	User,
	Facility,
	Host,
	#[serde(rename = "ues")]
	UserExtSource,
	MemberResource,
	MemberGroup,
	GroupResource,
	UserFacility,
	/// Bound to an arbitrary string key instead of a managed entity.
	Entityless,
}

impl Namespace {
	/// Returns every namespace of the taxonomy.
	pub fn all() -> &'static [Namespace] {
		&[
			Namespace::Vo,
			Namespace::Group,
			Namespace::Resource,
			Namespace::Member,
			Namespace::User,
			Namespace::Facility,
			Namespace::Host,
			Namespace::UserExtSource,
			Namespace::MemberResource,
			Namespace::MemberGroup,
			Namespace::GroupResource,
			Namespace::UserFacility,
			Namespace::Entityless,
		]
	}

	/// Entity kinds an attribute of this namespace is authorized against, in
	/// the order the entity context lists them.
	///
	/// Entityless attributes require no entity at all.
	pub fn required_kinds(self) -> &'static [EntityKind] {
		match self {
			Namespace::Vo => &[EntityKind::Vo],
			Namespace::Group => &[EntityKind::Group],
			Namespace::Resource => &[EntityKind::Resource],
			Namespace::Member => &[EntityKind::Member],
			Namespace::User => &[EntityKind::User],
			Namespace::Facility => &[EntityKind::Facility],
			Namespace::Host => &[EntityKind::Host],
			Namespace::UserExtSource => &[EntityKind::UserExtSource],
			Namespace::MemberResource => &[EntityKind::Member, EntityKind::Resource],
			Namespace::MemberGroup => &[EntityKind::Member, EntityKind::Group],
			Namespace::GroupResource => &[EntityKind::Group, EntityKind::Resource],
			Namespace::UserFacility => &[EntityKind::User, EntityKind::Facility],
			Namespace::Entityless => &[],
		}
	}

	/// True for namespaces bound to two entities.
	pub fn is_pair(self) -> bool {
		self.required_kinds().len() == 2
	}

	/// The entity segment used inside attribute URNs.
	pub fn segment(self) -> &'static str {
		match self {
			Namespace::Vo => "vo",
			Namespace::Group => "group",
			Namespace::Resource => "resource",
			Namespace::Member => "member",
			Namespace::User => "user",
			Namespace::Facility => "facility",
			Namespace::Host => "host",
			Namespace::UserExtSource => "ues",
			Namespace::MemberResource => "member_resource",
			Namespace::MemberGroup => "member_group",
			Namespace::GroupResource => "group_resource",
			Namespace::UserFacility => "user_facility",
			Namespace::Entityless => "entityless",
		}
	}

	/// The namespace URN without storage kind, e.g. `urn:perun:user:attribute-def`.
	pub fn urn(self) -> String {
		format!("{URN_PREFIX}{}:{ATTRIBUTE_DEF}", self.segment())
	}

	fn from_segment(segment: &str) -> Option<Self> {
		Namespace::all()
			.iter()
			.copied()
			.find(|ns| ns.segment() == segment)
	}
}

impl fmt::Display for Namespace {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.segment())
	}
}

impl FromStr for Namespace {
	type Err = NamespaceError;

	/// Accepts either the bare segment (`member_resource`) or the namespace URN
	/// (`urn:perun:member_resource:attribute-def`).
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let segment = match s.strip_prefix(URN_PREFIX) {
			Some(rest) => rest
				.strip_suffix(":attribute-def")
				.ok_or_else(|| NamespaceError::Malformed(s.to_string()))?,
			None => s,
		};
		Namespace::from_segment(segment).ok_or_else(|| NamespaceError::Unknown(segment.to_string()))
	}
}

/// Storage class of an attribute, the URN segment after `attribute-def`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
	/// Stored value.
	Def,
	/// Optional stored value.
	Opt,
	/// Mirrors a core property of the entity.
	Core,
	/// Computed by an attribute module.
	Virt,
}

impl AttributeKind {
	pub fn as_str(self) -> &'static str {
		match self {
			AttributeKind::Def => "def",
			AttributeKind::Opt => "opt",
			AttributeKind::Core => "core",
			AttributeKind::Virt => "virt",
		}
	}
}

impl fmt::Display for AttributeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl FromStr for AttributeKind {
	type Err = NamespaceError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"def" => Ok(AttributeKind::Def),
			"opt" => Ok(AttributeKind::Opt),
			"core" => Ok(AttributeKind::Core),
			"virt" => Ok(AttributeKind::Virt),
			other => Err(NamespaceError::UnknownKind(other.to_string())),
		}
	}
}

/// A fully parsed attribute name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeName {
	pub namespace: Namespace,
	pub kind: AttributeKind,
	pub friendly_name: String,
}

impl AttributeName {
	pub fn new(namespace: Namespace, kind: AttributeKind, friendly_name: impl Into<String>) -> Self {
		Self {
			namespace,
			kind,
			friendly_name: friendly_name.into(),
		}
	}

	/// Parses `urn:perun:<ns>:attribute-def:<kind>:<friendlyName>`.
	///
	/// Friendly names may themselves contain `:`, so everything after the kind
	/// segment belongs to the friendly name.
	pub fn parse(name: &str) -> Result<Self, NamespaceError> {
		let malformed = || NamespaceError::Malformed(name.to_string());

		let rest = name.strip_prefix(URN_PREFIX).ok_or_else(malformed)?;
		let (segment, rest) = rest.split_once(':').ok_or_else(malformed)?;
		let rest = rest
			.strip_prefix(ATTRIBUTE_DEF)
			.and_then(|r| r.strip_prefix(':'))
			.ok_or_else(malformed)?;
		let (kind, friendly_name) = rest.split_once(':').ok_or_else(malformed)?;
		if friendly_name.is_empty() {
			return Err(malformed());
		}

		let namespace =
			Namespace::from_segment(segment).ok_or_else(|| NamespaceError::Unknown(segment.to_string()))?;
		Ok(Self {
			namespace,
			kind: kind.parse()?,
			friendly_name: friendly_name.to_string(),
		})
	}
}

impl fmt::Display for AttributeName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}:{}", self.namespace.urn(), self.kind, self.friendly_name)
	}
}
