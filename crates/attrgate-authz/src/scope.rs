// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Operation scopes.
//!
//! A [`Scope`] records the entities a gateway operation was invoked with and
//! the namespaces whose attributes that operation may touch. One constructor
//! exists per entity combination the gateway serves; an attribute outside the
//! scope's namespaces is never dispatched.

use attrgate_core::{
	EntityRef, FacilityId, GroupId, HostId, KnownEntities, MemberId, Namespace, ResourceId,
	UserExtSourceId, UserId, VoId,
};
use std::fmt;

/// Cross-entity relationships checked before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
	/// The resource is hosted on the facility.
	FacilityResource(FacilityId, ResourceId),
	/// Group and resource belong to the same VO.
	GroupResource(GroupId, ResourceId),
	/// Member and group belong to the same VO.
	MemberGroup(MemberId, GroupId),
	/// Member and resource belong to the same VO.
	MemberResource(MemberId, ResourceId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
	label: &'static str,
	entities: KnownEntities,
	namespaces: &'static [Namespace],
	facility_derived: bool,
}

impl Scope {
	fn new(label: &'static str, entities: KnownEntities, namespaces: &'static [Namespace]) -> Self {
		Self {
			label,
			entities,
			namespaces,
			facility_derived: false,
		}
	}

	/// Marks the facility as looked up from the resource by the gateway, so
	/// it needs no facility-resource check.
	pub(crate) fn with_derived_facility(mut self) -> Self {
		self.facility_derived = true;
		self
	}

	pub fn vo(vo: VoId) -> Self {
		Self::new("vo", KnownEntities::new().with_vo(vo), &[Namespace::Vo])
	}

	pub fn group(group: GroupId) -> Self {
		Self::new("group", KnownEntities::new().with_group(group), &[Namespace::Group])
	}

	pub fn resource(resource: ResourceId) -> Self {
		Self::new(
			"resource",
			KnownEntities::new().with_resource(resource),
			&[Namespace::Resource],
		)
	}

	pub fn member(member: MemberId) -> Self {
		Self::new("member", KnownEntities::new().with_member(member), &[Namespace::Member])
	}

	/// Member attributes together with those of the member's user.
	pub fn member_with_user(member: MemberId) -> Self {
		Self::new(
			"member_with_user",
			KnownEntities::new().with_member(member),
			&[Namespace::Member, Namespace::User],
		)
	}

	pub fn user(user: UserId) -> Self {
		Self::new("user", KnownEntities::new().with_user(user), &[Namespace::User])
	}

	pub fn facility(facility: FacilityId) -> Self {
		Self::new(
			"facility",
			KnownEntities::new().with_facility(facility),
			&[Namespace::Facility],
		)
	}

	pub fn host(host: HostId) -> Self {
		Self::new("host", KnownEntities::new().with_host(host), &[Namespace::Host])
	}

	pub fn user_ext_source(user_ext_source: UserExtSourceId) -> Self {
		Self::new(
			"user_ext_source",
			KnownEntities::new().with_user_ext_source(user_ext_source),
			&[Namespace::UserExtSource],
		)
	}

	pub fn member_resource(member: MemberId, resource: ResourceId) -> Self {
		Self::new(
			"member_resource",
			KnownEntities::new().with_member(member).with_resource(resource),
			&[Namespace::MemberResource],
		)
	}

	/// Member-resource attributes plus member, user and user-facility ones.
	/// The user and facility are derived.
	pub fn member_resource_with_user(member: MemberId, resource: ResourceId) -> Self {
		Self::new(
			"member_resource_with_user",
			KnownEntities::new().with_member(member).with_resource(resource),
			&[
				Namespace::Member,
				Namespace::User,
				Namespace::UserFacility,
				Namespace::MemberResource,
			],
		)
	}

	pub fn member_group(member: MemberId, group: GroupId) -> Self {
		Self::new(
			"member_group",
			KnownEntities::new().with_member(member).with_group(group),
			&[Namespace::MemberGroup],
		)
	}

	pub fn member_group_with_user(member: MemberId, group: GroupId) -> Self {
		Self::new(
			"member_group_with_user",
			KnownEntities::new().with_member(member).with_group(group),
			&[Namespace::MemberGroup, Namespace::Member, Namespace::User],
		)
	}

	pub fn group_resource(group: GroupId, resource: ResourceId) -> Self {
		Self::new(
			"group_resource",
			KnownEntities::new().with_group(group).with_resource(resource),
			&[Namespace::GroupResource],
		)
	}

	pub fn group_resource_with_group(group: GroupId, resource: ResourceId) -> Self {
		Self::new(
			"group_resource_with_group",
			KnownEntities::new().with_group(group).with_resource(resource),
			&[Namespace::Group, Namespace::GroupResource],
		)
	}

	pub fn user_facility(user: UserId, facility: FacilityId) -> Self {
		Self::new(
			"user_facility",
			KnownEntities::new().with_user(user).with_facility(facility),
			&[Namespace::UserFacility],
		)
	}

	/// Everything a member needs on a resource of the given facility.
	pub fn facility_resource_user_member(
		facility: FacilityId,
		resource: ResourceId,
		member: MemberId,
	) -> Self {
		Self::new(
			"facility_resource_user_member",
			KnownEntities::new()
				.with_facility(facility)
				.with_resource(resource)
				.with_member(member),
			&[
				Namespace::Member,
				Namespace::User,
				Namespace::UserFacility,
				Namespace::MemberResource,
			],
		)
	}

	/// As [`Scope::facility_resource_user_member`], plus member-group attributes.
	pub fn facility_resource_group_user_member(
		facility: FacilityId,
		resource: ResourceId,
		group: GroupId,
		member: MemberId,
	) -> Self {
		Self::new(
			"facility_resource_group_user_member",
			KnownEntities::new()
				.with_facility(facility)
				.with_resource(resource)
				.with_group(group)
				.with_member(member),
			&[
				Namespace::Member,
				Namespace::User,
				Namespace::UserFacility,
				Namespace::MemberResource,
				Namespace::MemberGroup,
			],
		)
	}

	pub fn label(&self) -> &'static str {
		self.label
	}

	pub fn entities(&self) -> &KnownEntities {
		&self.entities
	}

	pub fn namespaces(&self) -> &'static [Namespace] {
		self.namespaces
	}

	pub fn allows(&self, namespace: Namespace) -> bool {
		self.namespaces.contains(&namespace)
	}

	/// Entities supplied by the caller, in the order they are existence-checked.
	pub fn supplied(&self) -> Vec<EntityRef> {
		self.entities.refs()
	}

	/// Relationships checked before dispatch, in order.
	///
	/// A supplied group and resource are always checked first, whatever the
	/// namespaces. A supplied facility must host the supplied resource. The
	/// remaining pairs follow from the pair namespaces; the user-facility pair
	/// carries no VO constraint.
	pub fn relationships(&self) -> Vec<Relationship> {
		let e = &self.entities;
		let mut rels = Vec::new();
		if let Some((g, r)) = e.group.zip(e.resource) {
			rels.push(Relationship::GroupResource(g, r));
		}
		if !self.facility_derived {
			if let Some((f, r)) = e.facility.zip(e.resource) {
				rels.push(Relationship::FacilityResource(f, r));
			}
		}
		for namespace in self.namespaces {
			let rel = match namespace {
				Namespace::MemberGroup => e
					.member
					.zip(e.group)
					.map(|(m, g)| Relationship::MemberGroup(m, g)),
				Namespace::MemberResource => e
					.member
					.zip(e.resource)
					.map(|(m, r)| Relationship::MemberResource(m, r)),
				_ => None,
			};
			if let Some(rel) = rel {
				if !rels.contains(&rel) {
					rels.push(rel);
				}
			}
		}
		rels
	}
}

impl fmt::Display for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let parts: Vec<String> = self.supplied().iter().map(ToString::to_string).collect();
		write!(f, "{}[{}]", self.label, parts.join(", "))
	}
}
