// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Entity context resolution with per-operation memoization.
//!
//! Some namespaces need entities the caller never supplied: a member's user,
//! or the facility a resource lives on. [`EntityResolver`] derives those
//! lazily through the [`EntityDirectory`] the first time an attribute needs
//! them, and caches the answer for the rest of the operation. A resolver is
//! created per top-level operation and dropped with it, so nothing leaks
//! between requests.

use std::collections::HashMap;

use attrgate_core::{
	EntityContext, EntityKind, EntityRef, FacilityId, KnownEntities, MemberId, Namespace, ResourceId,
	UserId,
};
use tracing::{debug, trace};

use crate::collaborators::EntityDirectory;
use crate::error::{GatewayError, Result};

/// A derived-entity lookup: which entity to derive, from which source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivationKey {
	UserOfMember(MemberId),
	FacilityOfResource(ResourceId),
}

/// Derived entities computed during one operation.
#[derive(Debug, Default)]
pub struct DerivedCache {
	entries: HashMap<DerivationKey, EntityRef>,
	lookups: usize,
}

impl DerivedCache {
	pub fn get(&self, key: &DerivationKey) -> Option<EntityRef> {
		self.entries.get(key).copied()
	}

	fn insert(&mut self, key: DerivationKey, entity: EntityRef) {
		self.lookups += 1;
		self.entries.insert(key, entity);
	}

	/// Number of directory lookups that populated this cache.
	pub fn lookups(&self) -> usize {
		self.lookups
	}
}

/// Builds entity contexts for one operation.
pub struct EntityResolver<'a, D: EntityDirectory + ?Sized> {
	directory: &'a D,
	known: KnownEntities,
	cache: DerivedCache,
}

impl<'a, D: EntityDirectory + ?Sized> EntityResolver<'a, D> {
	pub fn new(directory: &'a D, known: KnownEntities) -> Self {
		Self {
			directory,
			known,
			cache: DerivedCache::default(),
		}
	}

	pub fn known(&self) -> &KnownEntities {
		&self.known
	}

	pub fn cache(&self) -> &DerivedCache {
		&self.cache
	}

	/// Resolves the context an attribute of `namespace` is authorized against.
	///
	/// Fails with [`GatewayError::Consistency`] when the namespace needs an
	/// entity that is neither known nor derivable from a known one.
	pub async fn resolve(&mut self, namespace: Namespace) -> Result<EntityContext> {
		let mut entities = self.known;
		for kind in namespace.required_kinds() {
			if entities.has(*kind) {
				continue;
			}
			match self.derive(*kind).await? {
				EntityRef::User(user) => entities.user = Some(user),
				EntityRef::Facility(facility) => entities.facility = Some(facility),
				other => {
					return Err(GatewayError::Consistency(format!(
						"derived unexpected entity {other} for {namespace}"
					)))
				}
			}
		}

		EntityContext::assemble(namespace, &entities).ok_or_else(|| {
			GatewayError::Consistency(format!("cannot build entity context for namespace {namespace}"))
		})
	}

	async fn derive(&mut self, kind: EntityKind) -> Result<EntityRef> {
		let key = match (kind, self.known.member, self.known.resource) {
			(EntityKind::User, Some(member), _) => DerivationKey::UserOfMember(member),
			(EntityKind::Facility, _, Some(resource)) => DerivationKey::FacilityOfResource(resource),
			_ => {
				return Err(GatewayError::Consistency(format!(
					"no {kind} available and none derivable from the operation's entities"
				)))
			}
		};

		if let Some(entity) = self.cache.get(&key) {
			trace!(?key, "derived entity cache hit");
			return Ok(entity);
		}

		let entity = match key {
			DerivationKey::UserOfMember(member) => {
				let user: UserId = self.directory.user_of_member(member).await?;
				EntityRef::User(user)
			}
			DerivationKey::FacilityOfResource(resource) => {
				let facility: FacilityId = self.directory.facility_of_resource(resource).await?;
				EntityRef::Facility(facility)
			}
		};
		debug!(?key, derived = %entity, "derived entity");
		self.cache.insert(key, entity);
		Ok(entity)
	}
}
