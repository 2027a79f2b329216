// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Entity contexts: the concrete entities one attribute is authorized against.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::namespace::Namespace;
use crate::types::{
	EntityKind, EntityRef, FacilityId, GroupId, HostId, MemberId, ResourceId, UserExtSourceId, UserId, VoId,
};

/// The resolved tuple of entities a single attribute is bound to.
///
/// One variant per [`Namespace`]; the shape of the context always matches the
/// namespace of the attribute it was built for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "namespace", rename_all = "snake_case")]
pub enum EntityContext {
	Vo { vo: VoId },
	Group { group: GroupId },
	Resource { resource: ResourceId },
	Member { member: MemberId },
	User { user: UserId },
	Facility { facility: FacilityId },
	Host { host: HostId },
	#[serde(rename = "ues")]
	UserExtSource { user_ext_source: UserExtSourceId },
	MemberResource { member: MemberId, resource: ResourceId },
	MemberGroup { member: MemberId, group: GroupId },
	GroupResource { group: GroupId, resource: ResourceId },
	UserFacility { user: UserId, facility: FacilityId },
	Entityless { key: String },
}

impl EntityContext {
	pub fn namespace(&self) -> Namespace {
		match self {
			EntityContext::Vo { .. } => Namespace::Vo,
			EntityContext::Group { .. } => Namespace::Group,
			EntityContext::Resource { .. } => Namespace::Resource,
			EntityContext::Member { .. } => Namespace::Member,
			EntityContext::User { .. } => Namespace::User,
			EntityContext::Facility { .. } => Namespace::Facility,
			EntityContext::Host { .. } => Namespace::Host,
			EntityContext::UserExtSource { .. } => Namespace::UserExtSource,
			EntityContext::MemberResource { .. } => Namespace::MemberResource,
			EntityContext::MemberGroup { .. } => Namespace::MemberGroup,
			EntityContext::GroupResource { .. } => Namespace::GroupResource,
			EntityContext::UserFacility { .. } => Namespace::UserFacility,
			EntityContext::Entityless { .. } => Namespace::Entityless,
		}
	}

	/// Builds the context for `namespace` from a set of entities.
	///
	/// Returns `None` when a required entity is missing. Entityless contexts
	/// are never assembled here, they are keyed by a string instead.
	pub fn assemble(namespace: Namespace, entities: &KnownEntities) -> Option<Self> {
		let e = entities;
		let context = match namespace {
			Namespace::Vo => EntityContext::Vo { vo: e.vo? },
			Namespace::Group => EntityContext::Group { group: e.group? },
			Namespace::Resource => EntityContext::Resource { resource: e.resource? },
			Namespace::Member => EntityContext::Member { member: e.member? },
			Namespace::User => EntityContext::User { user: e.user? },
			Namespace::Facility => EntityContext::Facility { facility: e.facility? },
			Namespace::Host => EntityContext::Host { host: e.host? },
			Namespace::UserExtSource => EntityContext::UserExtSource {
				user_ext_source: e.user_ext_source?,
			},
			Namespace::MemberResource => EntityContext::MemberResource {
				member: e.member?,
				resource: e.resource?,
			},
			Namespace::MemberGroup => EntityContext::MemberGroup {
				member: e.member?,
				group: e.group?,
			},
			Namespace::GroupResource => EntityContext::GroupResource {
				group: e.group?,
				resource: e.resource?,
			},
			Namespace::UserFacility => EntityContext::UserFacility {
				user: e.user?,
				facility: e.facility?,
			},
			Namespace::Entityless => return None,
		};
		Some(context)
	}

	/// Entities of the context, in the order of [`Namespace::required_kinds`].
	pub fn entities(&self) -> Vec<EntityRef> {
		match self {
			EntityContext::Vo { vo } => vec![EntityRef::Vo(*vo)],
			EntityContext::Group { group } => vec![EntityRef::Group(*group)],
			EntityContext::Resource { resource } => vec![EntityRef::Resource(*resource)],
			EntityContext::Member { member } => vec![EntityRef::Member(*member)],
			EntityContext::User { user } => vec![EntityRef::User(*user)],
			EntityContext::Facility { facility } => vec![EntityRef::Facility(*facility)],
			EntityContext::Host { host } => vec![EntityRef::Host(*host)],
			EntityContext::UserExtSource { user_ext_source } => {
				vec![EntityRef::UserExtSource(*user_ext_source)]
			}
			EntityContext::MemberResource { member, resource } => {
				vec![EntityRef::Member(*member), EntityRef::Resource(*resource)]
			}
			EntityContext::MemberGroup { member, group } => {
				vec![EntityRef::Member(*member), EntityRef::Group(*group)]
			}
			EntityContext::GroupResource { group, resource } => {
				vec![EntityRef::Group(*group), EntityRef::Resource(*resource)]
			}
			EntityContext::UserFacility { user, facility } => {
				vec![EntityRef::User(*user), EntityRef::Facility(*facility)]
			}
			EntityContext::Entityless { .. } => Vec::new(),
		}
	}
}

impl fmt::Display for EntityContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let EntityContext::Entityless { key } = self {
			return write!(f, "entityless[{key}]");
		}
		let parts: Vec<String> = self.entities().iter().map(ToString::to_string).collect();
		write!(f, "{}[{}]", self.namespace(), parts.join(", "))
	}
}

/// Entities an operation was invoked with, plus any derived so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownEntities {
	pub vo: Option<VoId>,
	pub group: Option<GroupId>,
	pub resource: Option<ResourceId>,
	pub member: Option<MemberId>,
	pub user: Option<UserId>,
	pub facility: Option<FacilityId>,
	pub host: Option<HostId>,
	pub user_ext_source: Option<UserExtSourceId>,
}

impl KnownEntities {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_vo(mut self, vo: VoId) -> Self {
		self.vo = Some(vo);
		self
	}

	pub fn with_group(mut self, group: GroupId) -> Self {
		self.group = Some(group);
		self
	}

	pub fn with_resource(mut self, resource: ResourceId) -> Self {
		self.resource = Some(resource);
		self
	}

	pub fn with_member(mut self, member: MemberId) -> Self {
		self.member = Some(member);
		self
	}

	pub fn with_user(mut self, user: UserId) -> Self {
		self.user = Some(user);
		self
	}

	pub fn with_facility(mut self, facility: FacilityId) -> Self {
		self.facility = Some(facility);
		self
	}

	pub fn with_host(mut self, host: HostId) -> Self {
		self.host = Some(host);
		self
	}

	pub fn with_user_ext_source(mut self, user_ext_source: UserExtSourceId) -> Self {
		self.user_ext_source = Some(user_ext_source);
		self
	}

	pub fn has(&self, kind: EntityKind) -> bool {
		match kind {
			EntityKind::Vo => self.vo.is_some(),
			EntityKind::Group => self.group.is_some(),
			EntityKind::Resource => self.resource.is_some(),
			EntityKind::Member => self.member.is_some(),
			EntityKind::User => self.user.is_some(),
			EntityKind::Facility => self.facility.is_some(),
			EntityKind::Host => self.host.is_some(),
			EntityKind::UserExtSource => self.user_ext_source.is_some(),
		}
	}

	/// All present entities as references.
	pub fn refs(&self) -> Vec<EntityRef> {
		let mut refs = Vec::new();
		refs.extend(self.vo.map(EntityRef::Vo));
		refs.extend(self.group.map(EntityRef::Group));
		refs.extend(self.resource.map(EntityRef::Resource));
		refs.extend(self.member.map(EntityRef::Member));
		refs.extend(self.user.map(EntityRef::User));
		refs.extend(self.facility.map(EntityRef::Facility));
		refs.extend(self.host.map(EntityRef::Host));
		refs.extend(self.user_ext_source.map(EntityRef::UserExtSource));
		refs
	}
}
