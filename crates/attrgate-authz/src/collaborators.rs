// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Interfaces of the systems the gateway delegates to.
//!
//! The gateway owns none of the data it guards. Attribute values and
//! definitions live behind [`AttributeStore`], entity lookups behind
//! [`EntityDirectory`], and every privilege decision is made by an
//! [`AuthorizationOracle`]. The store is only invoked for a write once the
//! whole batch has been authorized.

use async_trait::async_trait;

use attrgate_core::{
	Action, Attribute, AttributeDefinition, AttributeId, AttributeRights, EntityContext, EntityRef,
	FacilityId, GroupId, MemberId, ResourceId, Role, ServiceId, Session, UserId, VoId,
};

use crate::error::{DirectoryError, StoreError};
use crate::scope::Scope;

pub type StoreResult<T> = std::result::Result<T, StoreError>;
pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;

/// Attribute persistence and value logic.
///
/// Scoped reads return attributes of every namespace the scope allows; the
/// store derives any user or facility it needs on its own.
#[async_trait]
pub trait AttributeStore: Send + Sync {
	// Scoped reads
	async fn get_attributes(&self, scope: &Scope) -> StoreResult<Vec<Attribute>>;
	async fn get_attributes_by_names(&self, scope: &Scope, names: &[String]) -> StoreResult<Vec<Attribute>>;
	/// Attributes the given services require, with empty values where unset.
	/// An empty service list means every service.
	async fn get_required_attributes(&self, scope: &Scope, services: &[ServiceId]) -> StoreResult<Vec<Attribute>>;
	/// A single attribute; unset attributes come back with a null value.
	async fn get_attribute(&self, scope: &Scope, name: &str) -> StoreResult<Attribute>;
	async fn get_attribute_by_id(&self, scope: &Scope, id: AttributeId) -> StoreResult<Attribute>;

	// Scoped writes
	async fn set_attributes(&self, scope: &Scope, attributes: &[Attribute]) -> StoreResult<()>;
	async fn remove_attributes(&self, scope: &Scope, definitions: &[AttributeDefinition]) -> StoreResult<()>;
	async fn remove_all_attributes(&self, scope: &Scope) -> StoreResult<()>;
	async fn check_attributes_value(&self, scope: &Scope, attributes: &[Attribute]) -> StoreResult<()>;
	/// Computes default values for the given attributes without storing them.
	async fn fill_attributes(&self, scope: &Scope, attributes: Vec<Attribute>) -> StoreResult<Vec<Attribute>>;
	/// Fails with [`StoreError::DefinitionNotFound`] for the first unknown definition.
	async fn check_attributes_exist(&self, definitions: &[AttributeDefinition]) -> StoreResult<()>;

	// Entityless
	async fn get_entityless_attributes_by_key(&self, key: &str) -> StoreResult<Vec<Attribute>>;
	/// Values of one definition under every key.
	async fn get_entityless_attributes(&self, name: &str) -> StoreResult<Vec<Attribute>>;
	async fn get_entityless_keys(&self, definition: &AttributeDefinition) -> StoreResult<Vec<String>>;
	async fn get_entityless_values(&self, definition: &AttributeDefinition) -> StoreResult<Vec<(String, Attribute)>>;
	async fn get_entityless_attribute(&self, key: &str, name: &str) -> StoreResult<Attribute>;
	async fn set_entityless_attribute(&self, key: &str, attribute: &Attribute) -> StoreResult<()>;
	async fn remove_entityless_attribute(&self, key: &str, definition: &AttributeDefinition) -> StoreResult<()>;

	// Definitions
	async fn create_definition(&self, definition: AttributeDefinition) -> StoreResult<AttributeDefinition>;
	async fn get_definition(&self, name: &str) -> StoreResult<AttributeDefinition>;
	async fn get_definition_by_id(&self, id: AttributeId) -> StoreResult<AttributeDefinition>;
	async fn list_definitions(&self) -> StoreResult<Vec<AttributeDefinition>>;
	/// Definitions the given services require. An empty list means every service.
	async fn get_required_definitions(&self, services: &[ServiceId]) -> StoreResult<Vec<AttributeDefinition>>;
	async fn update_definition(&self, definition: AttributeDefinition) -> StoreResult<AttributeDefinition>;
	/// Without `force`, fails with [`StoreError::DefinitionInUse`] while values exist.
	async fn delete_definition(&self, id: AttributeId, force: bool) -> StoreResult<()>;

	// Rights
	async fn get_rights(&self, id: AttributeId) -> StoreResult<Vec<AttributeRights>>;
	async fn set_rights(&self, rights: &[AttributeRights]) -> StoreResult<()>;
}

/// Entity existence and relationship lookups.
#[async_trait]
pub trait EntityDirectory: Send + Sync {
	/// Fails with [`DirectoryError::NotFound`] when the entity does not exist.
	async fn check_exists(&self, entity: &EntityRef) -> DirectoryResult<()>;
	async fn user_of_member(&self, member: MemberId) -> DirectoryResult<UserId>;
	async fn facility_of_resource(&self, resource: ResourceId) -> DirectoryResult<FacilityId>;
	async fn vo_of_group(&self, group: GroupId) -> DirectoryResult<VoId>;
	async fn vo_of_resource(&self, resource: ResourceId) -> DirectoryResult<VoId>;
	async fn vo_of_member(&self, member: MemberId) -> DirectoryResult<VoId>;
	/// Services assigned to the resource.
	async fn services_of_resource(&self, resource: ResourceId) -> DirectoryResult<Vec<ServiceId>>;
}

/// The privilege decision function.
///
/// Decisions are pure: the same inputs always yield the same answer within one
/// operation, so the gateway never caches them.
pub trait AuthorizationOracle: Send + Sync {
	fn is_authorized_for_attribute(
		&self,
		session: &Session,
		action: Action,
		definition: &AttributeDefinition,
		context: &EntityContext,
	) -> bool;

	fn is_authorized(&self, session: &Session, role: Role) -> bool;
}
