// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory collaborators for tests and local experimentation.
//!
//! [`MemoryDirectory`] and [`MemoryStore`] keep everything in process memory
//! and count the calls tests care about. [`RuleOracle`] answers decisions from
//! a per-attribute rule table.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use attrgate_core::{
	Action, Attribute, AttributeDefinition, AttributeId, AttributeRights, AttributeValue, EntityContext,
	EntityRef, FacilityId, GroupId, HostId, KnownEntities, MemberId, ResourceId, Role, ServiceId, Session,
	UserExtSourceId, UserId, VoId,
};

use crate::collaborators::{
	AttributeStore, AuthorizationOracle, DirectoryResult, EntityDirectory, StoreResult,
};
use crate::error::{DirectoryError, StoreError};
use crate::scope::Scope;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// Directory
// =============================================================================

#[derive(Debug, Default)]
struct DirectoryState {
	vos: HashSet<VoId>,
	users: HashSet<UserId>,
	members: HashMap<MemberId, (VoId, UserId)>,
	groups: HashMap<GroupId, VoId>,
	facilities: HashSet<FacilityId>,
	resources: HashMap<ResourceId, (VoId, FacilityId)>,
	hosts: HashMap<HostId, FacilityId>,
	user_ext_sources: HashMap<UserExtSourceId, UserId>,
	services: HashMap<ResourceId, Vec<ServiceId>>,
}

/// Entity directory backed by hash maps.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
	state: Mutex<DirectoryState>,
	user_lookups: AtomicUsize,
	facility_lookups: AtomicUsize,
	vo_lookups: AtomicUsize,
	existence_checks: AtomicUsize,
}

impl MemoryDirectory {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_vo(&self, vo: VoId) {
		lock(&self.state).vos.insert(vo);
	}

	pub fn add_user(&self, user: UserId) {
		lock(&self.state).users.insert(user);
	}

	pub fn add_member(&self, member: MemberId, vo: VoId, user: UserId) {
		lock(&self.state).members.insert(member, (vo, user));
	}

	pub fn add_group(&self, group: GroupId, vo: VoId) {
		lock(&self.state).groups.insert(group, vo);
	}

	pub fn add_facility(&self, facility: FacilityId) {
		lock(&self.state).facilities.insert(facility);
	}

	pub fn add_resource(&self, resource: ResourceId, vo: VoId, facility: FacilityId) {
		lock(&self.state).resources.insert(resource, (vo, facility));
	}

	pub fn add_host(&self, host: HostId, facility: FacilityId) {
		lock(&self.state).hosts.insert(host, facility);
	}

	pub fn add_user_ext_source(&self, user_ext_source: UserExtSourceId, user: UserId) {
		lock(&self.state).user_ext_sources.insert(user_ext_source, user);
	}

	pub fn assign_service(&self, resource: ResourceId, service: ServiceId) {
		lock(&self.state)
			.services
			.entry(resource)
			.or_default()
			.push(service);
	}

	/// The member's user, without counting a lookup.
	pub fn member_user(&self, member: MemberId) -> Option<UserId> {
		lock(&self.state).members.get(&member).map(|(_, user)| *user)
	}

	/// The resource's facility, without counting a lookup.
	pub fn resource_facility(&self, resource: ResourceId) -> Option<FacilityId> {
		lock(&self.state).resources.get(&resource).map(|(_, facility)| *facility)
	}

	pub fn user_lookups(&self) -> usize {
		self.user_lookups.load(Ordering::SeqCst)
	}

	pub fn facility_lookups(&self) -> usize {
		self.facility_lookups.load(Ordering::SeqCst)
	}

	pub fn vo_lookups(&self) -> usize {
		self.vo_lookups.load(Ordering::SeqCst)
	}

	pub fn existence_checks(&self) -> usize {
		self.existence_checks.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl EntityDirectory for MemoryDirectory {
	async fn check_exists(&self, entity: &EntityRef) -> DirectoryResult<()> {
		self.existence_checks.fetch_add(1, Ordering::SeqCst);
		let state = lock(&self.state);
		let exists = match entity {
			EntityRef::Vo(id) => state.vos.contains(id),
			EntityRef::Group(id) => state.groups.contains_key(id),
			EntityRef::Resource(id) => state.resources.contains_key(id),
			EntityRef::Member(id) => state.members.contains_key(id),
			EntityRef::User(id) => state.users.contains(id),
			EntityRef::Facility(id) => state.facilities.contains(id),
			EntityRef::Host(id) => state.hosts.contains_key(id),
			EntityRef::UserExtSource(id) => state.user_ext_sources.contains_key(id),
		};
		if exists {
			Ok(())
		} else {
			Err(DirectoryError::NotFound(*entity))
		}
	}

	async fn user_of_member(&self, member: MemberId) -> DirectoryResult<UserId> {
		self.user_lookups.fetch_add(1, Ordering::SeqCst);
		self.member_user(member)
			.ok_or(DirectoryError::NotFound(EntityRef::Member(member)))
	}

	async fn facility_of_resource(&self, resource: ResourceId) -> DirectoryResult<FacilityId> {
		self.facility_lookups.fetch_add(1, Ordering::SeqCst);
		self.resource_facility(resource)
			.ok_or(DirectoryError::NotFound(EntityRef::Resource(resource)))
	}

	async fn vo_of_group(&self, group: GroupId) -> DirectoryResult<VoId> {
		self.vo_lookups.fetch_add(1, Ordering::SeqCst);
		lock(&self.state)
			.groups
			.get(&group)
			.copied()
			.ok_or(DirectoryError::NotFound(EntityRef::Group(group)))
	}

	async fn vo_of_resource(&self, resource: ResourceId) -> DirectoryResult<VoId> {
		self.vo_lookups.fetch_add(1, Ordering::SeqCst);
		lock(&self.state)
			.resources
			.get(&resource)
			.map(|(vo, _)| *vo)
			.ok_or(DirectoryError::NotFound(EntityRef::Resource(resource)))
	}

	async fn vo_of_member(&self, member: MemberId) -> DirectoryResult<VoId> {
		self.vo_lookups.fetch_add(1, Ordering::SeqCst);
		lock(&self.state)
			.members
			.get(&member)
			.map(|(vo, _)| *vo)
			.ok_or(DirectoryError::NotFound(EntityRef::Member(member)))
	}

	async fn services_of_resource(&self, resource: ResourceId) -> DirectoryResult<Vec<ServiceId>> {
		let state = lock(&self.state);
		if !state.resources.contains_key(&resource) {
			return Err(DirectoryError::NotFound(EntityRef::Resource(resource)));
		}
		Ok(state.services.get(&resource).cloned().unwrap_or_default())
	}
}

// =============================================================================
// Store
// =============================================================================

#[derive(Debug, Default)]
struct StoreState {
	definitions: Vec<AttributeDefinition>,
	values: HashMap<(EntityContext, AttributeId), AttributeValue>,
	entityless: BTreeMap<(String, AttributeId), AttributeValue>,
	required: HashMap<ServiceId, Vec<AttributeId>>,
	defaults: HashMap<AttributeId, AttributeValue>,
	rights: Vec<AttributeRights>,
	strays: Vec<Attribute>,
}

impl StoreState {
	fn definition(&self, name: &str) -> StoreResult<AttributeDefinition> {
		self.definitions
			.iter()
			.find(|d| d.name() == name)
			.cloned()
			.ok_or_else(|| StoreError::DefinitionNotFound(name.to_string()))
	}

	fn definition_by_id(&self, id: AttributeId) -> StoreResult<AttributeDefinition> {
		self.definitions
			.iter()
			.find(|d| d.id == id)
			.cloned()
			.ok_or_else(|| StoreError::DefinitionNotFound(id.to_string()))
	}

	fn required_ids(&self, services: &[ServiceId]) -> HashSet<AttributeId> {
		self.required
			.iter()
			.filter(|(service, _)| services.is_empty() || services.contains(service))
			.flat_map(|(_, ids)| ids.iter().copied())
			.collect()
	}

	fn value(&self, context: &EntityContext, id: AttributeId) -> AttributeValue {
		self.values
			.get(&(context.clone(), id))
			.cloned()
			.unwrap_or_default()
	}
}

/// Attribute store backed by in-process maps.
///
/// Scoped operations derive users and facilities through the shared
/// [`MemoryDirectory`] without touching its lookup counters.
#[derive(Debug)]
pub struct MemoryStore {
	directory: Arc<MemoryDirectory>,
	state: Mutex<StoreState>,
	writes: AtomicUsize,
}

impl MemoryStore {
	pub fn new(directory: Arc<MemoryDirectory>) -> Self {
		Self {
			directory,
			state: Mutex::new(StoreState::default()),
			writes: AtomicUsize::new(0),
		}
	}

	/// Registers a definition directly, bypassing the gateway.
	pub fn define(&self, definition: AttributeDefinition) -> AttributeDefinition {
		lock(&self.state).definitions.push(definition.clone());
		definition
	}

	/// Stores a value directly, bypassing the gateway.
	pub fn put(&self, context: EntityContext, id: AttributeId, value: impl Into<AttributeValue>) {
		lock(&self.state).values.insert((context, id), value.into());
	}

	pub fn put_entityless(&self, key: impl Into<String>, id: AttributeId, value: impl Into<AttributeValue>) {
		lock(&self.state)
			.entityless
			.insert((key.into(), id), value.into());
	}

	/// Marks an attribute as required by a service.
	pub fn require(&self, service: ServiceId, id: AttributeId) {
		lock(&self.state).required.entry(service).or_default().push(id);
	}

	/// Value `fill_attributes` assigns to an unset attribute.
	pub fn set_default(&self, id: AttributeId, value: impl Into<AttributeValue>) {
		lock(&self.state).defaults.insert(id, value.into());
	}

	/// Makes every scoped read also return `attribute`, whatever the scope.
	pub fn inject_stray(&self, attribute: Attribute) {
		lock(&self.state).strays.push(attribute);
	}

	pub fn value(&self, context: &EntityContext, id: AttributeId) -> Option<AttributeValue> {
		lock(&self.state).values.get(&(context.clone(), id)).cloned()
	}

	pub fn entityless_value(&self, key: &str, id: AttributeId) -> Option<AttributeValue> {
		lock(&self.state)
			.entityless
			.get(&(key.to_string(), id))
			.cloned()
	}

	/// Number of mutating calls that reached the store.
	pub fn writes(&self) -> usize {
		self.writes.load(Ordering::SeqCst)
	}

	fn expand(&self, scope: &Scope) -> KnownEntities {
		let mut entities = *scope.entities();
		if entities.user.is_none() {
			entities.user = entities.member.and_then(|m| self.directory.member_user(m));
		}
		if entities.facility.is_none() {
			entities.facility = entities.resource.and_then(|r| self.directory.resource_facility(r));
		}
		entities
	}

	fn context(&self, scope: &Scope, definition: &AttributeDefinition) -> StoreResult<EntityContext> {
		if !scope.allows(definition.namespace) {
			return Err(StoreError::Backend(format!(
				"{} is outside scope {}",
				definition.name(),
				scope.label()
			)));
		}
		EntityContext::assemble(definition.namespace, &self.expand(scope)).ok_or_else(|| {
			StoreError::Backend(format!("cannot resolve {} for {}", definition.namespace, scope))
		})
	}

	fn contexts(&self, scope: &Scope) -> Vec<EntityContext> {
		let entities = self.expand(scope);
		scope
			.namespaces()
			.iter()
			.filter_map(|ns| EntityContext::assemble(*ns, &entities))
			.collect()
	}

	fn check_value(attribute: &Attribute) -> StoreResult<()> {
		if attribute.value.fits(attribute.definition.value_type) {
			Ok(())
		} else {
			Err(StoreError::InvalidValue {
				name: attribute.name(),
				message: format!("expected {}", attribute.definition.value_type),
			})
		}
	}

	fn record_write(&self) {
		self.writes.fetch_add(1, Ordering::SeqCst);
	}
}

#[async_trait]
impl AttributeStore for MemoryStore {
	async fn get_attributes(&self, scope: &Scope) -> StoreResult<Vec<Attribute>> {
		let state = lock(&self.state);
		let mut attributes = Vec::new();
		for definition in state.definitions.iter().filter(|d| scope.allows(d.namespace)) {
			let context = self.context(scope, definition)?;
			let value = state.value(&context, definition.id);
			if !value.is_null() {
				attributes.push(Attribute::new(definition.clone(), value));
			}
		}
		attributes.extend(state.strays.iter().cloned());
		Ok(attributes)
	}

	async fn get_attributes_by_names(&self, scope: &Scope, names: &[String]) -> StoreResult<Vec<Attribute>> {
		let state = lock(&self.state);
		let mut attributes = Vec::new();
		for name in names {
			let definition = state.definition(name)?;
			if !scope.allows(definition.namespace) {
				continue;
			}
			let context = self.context(scope, &definition)?;
			let value = state.value(&context, definition.id);
			attributes.push(Attribute::new(definition, value));
		}
		attributes.extend(state.strays.iter().cloned());
		Ok(attributes)
	}

	async fn get_required_attributes(&self, scope: &Scope, services: &[ServiceId]) -> StoreResult<Vec<Attribute>> {
		let state = lock(&self.state);
		let required = state.required_ids(services);

		let mut attributes = Vec::new();
		for definition in state
			.definitions
			.iter()
			.filter(|d| required.contains(&d.id) && scope.allows(d.namespace))
		{
			let context = self.context(scope, definition)?;
			let value = state.value(&context, definition.id);
			attributes.push(Attribute::new(definition.clone(), value));
		}
		Ok(attributes)
	}

	async fn get_attribute(&self, scope: &Scope, name: &str) -> StoreResult<Attribute> {
		let definition = lock(&self.state).definition(name)?;
		self.get_attribute_by_id(scope, definition.id).await
	}

	async fn get_attribute_by_id(&self, scope: &Scope, id: AttributeId) -> StoreResult<Attribute> {
		let state = lock(&self.state);
		let definition = state.definition_by_id(id)?;
		if !scope.allows(definition.namespace) {
			return Ok(Attribute::empty(definition));
		}
		let context = self.context(scope, &definition)?;
		let value = state.value(&context, id);
		Ok(Attribute::new(definition, value))
	}

	async fn set_attributes(&self, scope: &Scope, attributes: &[Attribute]) -> StoreResult<()> {
		let mut writes = Vec::with_capacity(attributes.len());
		for attribute in attributes {
			Self::check_value(attribute)?;
			writes.push((self.context(scope, &attribute.definition)?, attribute));
		}

		let mut state = lock(&self.state);
		for (context, attribute) in writes {
			let key = (context, attribute.id());
			if attribute.value.is_null() {
				state.values.remove(&key);
			} else {
				state.values.insert(key, attribute.value.clone());
			}
		}
		self.record_write();
		Ok(())
	}

	async fn remove_attributes(&self, scope: &Scope, definitions: &[AttributeDefinition]) -> StoreResult<()> {
		let mut keys = Vec::with_capacity(definitions.len());
		for definition in definitions {
			keys.push((self.context(scope, definition)?, definition.id));
		}

		let mut state = lock(&self.state);
		for key in keys {
			state.values.remove(&key);
		}
		self.record_write();
		Ok(())
	}

	async fn remove_all_attributes(&self, scope: &Scope) -> StoreResult<()> {
		let contexts = self.contexts(scope);
		lock(&self.state)
			.values
			.retain(|(context, _), _| !contexts.contains(context));
		self.record_write();
		Ok(())
	}

	async fn check_attributes_value(&self, _scope: &Scope, attributes: &[Attribute]) -> StoreResult<()> {
		attributes.iter().try_for_each(Self::check_value)
	}

	async fn fill_attributes(&self, _scope: &Scope, attributes: Vec<Attribute>) -> StoreResult<Vec<Attribute>> {
		let state = lock(&self.state);
		Ok(attributes
			.into_iter()
			.map(|mut attribute| {
				if attribute.value.is_null() {
					if let Some(default) = state.defaults.get(&attribute.id()) {
						attribute.value = default.clone();
					}
				}
				attribute
			})
			.collect())
	}

	async fn check_attributes_exist(&self, definitions: &[AttributeDefinition]) -> StoreResult<()> {
		let state = lock(&self.state);
		for definition in definitions {
			let known = state.definition_by_id(definition.id)?;
			if known.name() != definition.name() {
				return Err(StoreError::DefinitionNotFound(definition.name()));
			}
		}
		Ok(())
	}

	async fn get_entityless_attributes_by_key(&self, key: &str) -> StoreResult<Vec<Attribute>> {
		let state = lock(&self.state);
		let mut attributes = Vec::new();
		for ((k, id), value) in &state.entityless {
			if k == key {
				attributes.push(Attribute::new(state.definition_by_id(*id)?, value.clone()));
			}
		}
		Ok(attributes)
	}

	async fn get_entityless_attributes(&self, name: &str) -> StoreResult<Vec<Attribute>> {
		let state = lock(&self.state);
		let definition = state.definition(name)?;
		Ok(state
			.entityless
			.iter()
			.filter(|((_, id), _)| *id == definition.id)
			.map(|(_, value)| Attribute::new(definition.clone(), value.clone()))
			.collect())
	}

	async fn get_entityless_keys(&self, definition: &AttributeDefinition) -> StoreResult<Vec<String>> {
		let state = lock(&self.state);
		state.definition_by_id(definition.id)?;
		Ok(state
			.entityless
			.keys()
			.filter(|(_, id)| *id == definition.id)
			.map(|(key, _)| key.clone())
			.collect())
	}

	async fn get_entityless_values(&self, definition: &AttributeDefinition) -> StoreResult<Vec<(String, Attribute)>> {
		let state = lock(&self.state);
		let definition = state.definition_by_id(definition.id)?;
		Ok(state
			.entityless
			.iter()
			.filter(|((_, id), _)| *id == definition.id)
			.map(|((key, _), value)| (key.clone(), Attribute::new(definition.clone(), value.clone())))
			.collect())
	}

	async fn get_entityless_attribute(&self, key: &str, name: &str) -> StoreResult<Attribute> {
		let state = lock(&self.state);
		let definition = state.definition(name)?;
		let value = state
			.entityless
			.get(&(key.to_string(), definition.id))
			.cloned()
			.unwrap_or_default();
		Ok(Attribute::new(definition, value))
	}

	async fn set_entityless_attribute(&self, key: &str, attribute: &Attribute) -> StoreResult<()> {
		Self::check_value(attribute)?;
		let mut state = lock(&self.state);
		let entry = (key.to_string(), attribute.id());
		if attribute.value.is_null() {
			state.entityless.remove(&entry);
		} else {
			state.entityless.insert(entry, attribute.value.clone());
		}
		self.record_write();
		Ok(())
	}

	async fn remove_entityless_attribute(&self, key: &str, definition: &AttributeDefinition) -> StoreResult<()> {
		lock(&self.state)
			.entityless
			.remove(&(key.to_string(), definition.id));
		self.record_write();
		Ok(())
	}

	async fn create_definition(&self, definition: AttributeDefinition) -> StoreResult<AttributeDefinition> {
		let mut state = lock(&self.state);
		let name = definition.name();
		if state.definitions.iter().any(|d| d.id == definition.id || d.name() == name) {
			return Err(StoreError::DefinitionExists(name));
		}
		state.definitions.push(definition.clone());
		self.record_write();
		Ok(definition)
	}

	async fn get_definition(&self, name: &str) -> StoreResult<AttributeDefinition> {
		lock(&self.state).definition(name)
	}

	async fn get_definition_by_id(&self, id: AttributeId) -> StoreResult<AttributeDefinition> {
		lock(&self.state).definition_by_id(id)
	}

	async fn list_definitions(&self) -> StoreResult<Vec<AttributeDefinition>> {
		Ok(lock(&self.state).definitions.clone())
	}

	async fn get_required_definitions(&self, services: &[ServiceId]) -> StoreResult<Vec<AttributeDefinition>> {
		let state = lock(&self.state);
		let required = state.required_ids(services);
		Ok(state
			.definitions
			.iter()
			.filter(|d| required.contains(&d.id))
			.cloned()
			.collect())
	}

	/// Only the description and display name of a definition can change.
	async fn update_definition(&self, definition: AttributeDefinition) -> StoreResult<AttributeDefinition> {
		let mut state = lock(&self.state);
		let existing = state
			.definitions
			.iter_mut()
			.find(|d| d.id == definition.id)
			.ok_or_else(|| StoreError::DefinitionNotFound(definition.name()))?;
		existing.description = definition.description;
		existing.display_name = definition.display_name;
		let updated = existing.clone();
		self.record_write();
		Ok(updated)
	}

	async fn delete_definition(&self, id: AttributeId, force: bool) -> StoreResult<()> {
		let mut state = lock(&self.state);
		let definition = state.definition_by_id(id)?;
		let in_use = state.values.keys().any(|(_, value_id)| *value_id == id)
			|| state.entityless.keys().any(|(_, value_id)| *value_id == id);
		if in_use && !force {
			return Err(StoreError::DefinitionInUse(definition.name()));
		}

		state.definitions.retain(|d| d.id != id);
		state.values.retain(|(_, value_id), _| *value_id != id);
		state.entityless.retain(|(_, value_id), _| *value_id != id);
		state.rights.retain(|r| r.attribute_id != id);
		for ids in state.required.values_mut() {
			ids.retain(|required| *required != id);
		}
		self.record_write();
		Ok(())
	}

	async fn get_rights(&self, id: AttributeId) -> StoreResult<Vec<AttributeRights>> {
		Ok(lock(&self.state)
			.rights
			.iter()
			.filter(|r| r.attribute_id == id)
			.cloned()
			.collect())
	}

	async fn set_rights(&self, rights: &[AttributeRights]) -> StoreResult<()> {
		let mut state = lock(&self.state);
		for entry in rights {
			state
				.rights
				.retain(|r| !(r.attribute_id == entry.attribute_id && r.role == entry.role));
			state.rights.push(entry.clone());
		}
		self.record_write();
		Ok(())
	}
}

// =============================================================================
// Oracle
// =============================================================================

/// One attribute decision the oracle was asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionCall {
	pub action: Action,
	pub attribute: AttributeId,
	pub context: EntityContext,
}

/// Oracle answering from per-attribute rules with a fallback.
#[derive(Debug, Default)]
pub struct RuleOracle {
	fallback: bool,
	admin: bool,
	rules: HashMap<(Action, AttributeId), bool>,
	calls: Mutex<Vec<DecisionCall>>,
	role_calls: AtomicUsize,
}

impl RuleOracle {
	/// Every decision and the administrative role are granted.
	pub fn allow_all() -> Self {
		Self {
			fallback: true,
			admin: true,
			..Self::default()
		}
	}

	/// Every decision and the administrative role are refused.
	pub fn deny_all() -> Self {
		Self::default()
	}

	pub fn allow(mut self, action: Action, attribute: AttributeId) -> Self {
		self.rules.insert((action, attribute), true);
		self
	}

	pub fn deny(mut self, action: Action, attribute: AttributeId) -> Self {
		self.rules.insert((action, attribute), false);
		self
	}

	pub fn with_admin(mut self, admin: bool) -> Self {
		self.admin = admin;
		self
	}

	/// Number of attribute decisions made.
	pub fn calls(&self) -> usize {
		lock(&self.calls).len()
	}

	pub fn decisions(&self) -> Vec<DecisionCall> {
		lock(&self.calls).clone()
	}

	pub fn role_calls(&self) -> usize {
		self.role_calls.load(Ordering::SeqCst)
	}
}

impl AuthorizationOracle for RuleOracle {
	fn is_authorized_for_attribute(
		&self,
		_session: &Session,
		action: Action,
		definition: &AttributeDefinition,
		context: &EntityContext,
	) -> bool {
		lock(&self.calls).push(DecisionCall {
			action,
			attribute: definition.id,
			context: context.clone(),
		});
		self.rules
			.get(&(action, definition.id))
			.copied()
			.unwrap_or(self.fallback)
	}

	fn is_authorized(&self, _session: &Session, role: Role) -> bool {
		self.role_calls.fetch_add(1, Ordering::SeqCst);
		role == Role::PerunAdmin && self.admin
	}
}
