// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions shared by the gateway.
//!
//! - **ID newtypes**: type-safe wrappers around UUIDs for every managed entity
//!   ([`VoId`], [`GroupId`], [`MemberId`], ...) so a member id can never be
//!   passed where a resource id is expected
//! - **Entity kinds**: [`EntityKind`] and the tagged [`EntityRef`] used for
//!   existence checks and error reporting
//! - **Authorization vocabulary**: [`Action`] and [`Role`]
//! - **Sessions**: the caller identity handed to the authorization oracle

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}
	};
}

define_id_type!(VoId, "Unique identifier for a virtual organization.");
define_id_type!(GroupId, "Unique identifier for a group within a VO.");
define_id_type!(ResourceId, "Unique identifier for a resource.");
define_id_type!(MemberId, "Unique identifier for a VO membership.");
define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(FacilityId, "Unique identifier for a facility.");
define_id_type!(HostId, "Unique identifier for a host of a facility.");
define_id_type!(UserExtSourceId, "Unique identifier for a user's external identity source.");
define_id_type!(AttributeId, "Unique identifier for an attribute definition.");
define_id_type!(ServiceId, "Unique identifier for a provisioned service.");

// =============================================================================
// Entities
// =============================================================================

/// Kinds of managed entities attributes can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
	Vo,
	Group,
	Resource,
	Member,
	User,
	Facility,
	Host,
	UserExtSource,
}

impl EntityKind {
	/// The entity kind another kind can be derived from, if any.
	///
	/// A User is reachable from the Member it owns, a Facility from a Resource
	/// hosted on it. Every other kind must be supplied by the caller.
	pub fn derived_from(self) -> Option<EntityKind> {
		match self {
			EntityKind::User => Some(EntityKind::Member),
			EntityKind::Facility => Some(EntityKind::Resource),
			_ => None,
		}
	}
}

impl fmt::Display for EntityKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			EntityKind::Vo => "vo",
			EntityKind::Group => "group",
			EntityKind::Resource => "resource",
			EntityKind::Member => "member",
			EntityKind::User => "user",
			EntityKind::Facility => "facility",
			EntityKind::Host => "host",
			EntityKind::UserExtSource => "user_ext_source",
		};
		write!(f, "{s}")
	}
}

/// A reference to one concrete entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
	Vo(VoId),
	Group(GroupId),
	Resource(ResourceId),
	Member(MemberId),
	User(UserId),
	Facility(FacilityId),
	Host(HostId),
	UserExtSource(UserExtSourceId),
}

impl EntityRef {
	pub fn kind(&self) -> EntityKind {
		match self {
			EntityRef::Vo(_) => EntityKind::Vo,
			EntityRef::Group(_) => EntityKind::Group,
			EntityRef::Resource(_) => EntityKind::Resource,
			EntityRef::Member(_) => EntityKind::Member,
			EntityRef::User(_) => EntityKind::User,
			EntityRef::Facility(_) => EntityKind::Facility,
			EntityRef::Host(_) => EntityKind::Host,
			EntityRef::UserExtSource(_) => EntityKind::UserExtSource,
		}
	}

	fn raw_id(&self) -> Uuid {
		match self {
			EntityRef::Vo(id) => id.into_inner(),
			EntityRef::Group(id) => id.into_inner(),
			EntityRef::Resource(id) => id.into_inner(),
			EntityRef::Member(id) => id.into_inner(),
			EntityRef::User(id) => id.into_inner(),
			EntityRef::Facility(id) => id.into_inner(),
			EntityRef::Host(id) => id.into_inner(),
			EntityRef::UserExtSource(id) => id.into_inner(),
		}
	}
}

impl fmt::Display for EntityRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.kind(), self.raw_id())
	}
}

// =============================================================================
// Authorization vocabulary
// =============================================================================

/// Actions the authorization oracle decides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
	Read,
	Write,
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Action::Read => write!(f, "read"),
			Action::Write => write!(f, "write"),
		}
	}
}

/// Roles a principal can hold.
///
/// Only [`Role::PerunAdmin`] is interpreted by the gateway itself (entityless
/// attributes and definition administration). The rest appear in attribute
/// rights and are meaningful only to the authorization oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	/// Platform administrator.
	PerunAdmin,
	VoAdmin,
	GroupAdmin,
	FacilityAdmin,
	/// The user the attribute belongs to.
	SelfService,
}

impl Role {
	/// Returns all available roles.
	pub fn all() -> &'static [Role] {
		&[
			Role::PerunAdmin,
			Role::VoAdmin,
			Role::GroupAdmin,
			Role::FacilityAdmin,
			Role::SelfService,
		]
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Role::PerunAdmin => write!(f, "perun_admin"),
			Role::VoAdmin => write!(f, "vo_admin"),
			Role::GroupAdmin => write!(f, "group_admin"),
			Role::FacilityAdmin => write!(f, "facility_admin"),
			Role::SelfService => write!(f, "self"),
		}
	}
}

// =============================================================================
// Session
// =============================================================================

/// The authenticated caller of a gateway operation.
///
/// Credential validation happens before a session reaches the gateway; the
/// gateway only forwards it to the authorization oracle and never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	/// Principal name as presented by the authentication layer.
	pub actor: String,
	/// The user the principal is mapped to, if any.
	pub user_id: Option<UserId>,
}

impl Session {
	pub fn new(actor: impl Into<String>) -> Self {
		Self {
			actor: actor.into(),
			user_id: None,
		}
	}

	/// Builder: set the mapped user.
	pub fn with_user(mut self, user_id: UserId) -> Self {
		self.user_id = Some(user_id);
		self
	}
}
