// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The attribute gateway.
//!
//! Every scoped operation runs the same pipeline:
//!
//! 1. **Existence**: each entity the caller supplied must exist
//! 2. **Relationships**: entity pairs must share a VO, a resource must be on
//!    the supplied facility
//! 3. **Dispatch**: each attribute is mapped to its entity context and decided
//! 4. **Policy**: reads are filtered, writes are all-or-nothing
//!
//! Only after step 4 succeeds does a write reach the store. Entityless
//! attributes skip the pipeline and require the administrative role instead.

use std::sync::Arc;

use attrgate_config::GatewayConfig;
use attrgate_core::{
	Action, Attribute, AttributeDefinition, AttributeId, AttributeView, EntityRef, FacilityId, MemberId,
	ResourceId, ServiceId, Session, UserId,
};
use regex::Regex;
use tracing::{debug, instrument, warn};

use crate::audit::{AuditEventType, AuditRecord};
use crate::batch::{AuthorizedBatch, Denial, PendingBatch};
use crate::collaborators::{AttributeStore, AuthorizationOracle, EntityDirectory};
use crate::dispatch::{self, Dispatcher};
use crate::error::{GatewayError, Result};
use crate::relationship;
use crate::scope::Scope;
use crate::validation::{
	compile_name_pattern, parse_entityless_name, require_entityless, validate_entityless_key,
};

/// Friendly-name prefix of user login attributes.
pub const LOGIN_NAMESPACE_PREFIX: &str = "login-namespace:";

/// Authorization-enforcing front of the attribute store.
pub struct AttributeGateway {
	pub(crate) store: Arc<dyn AttributeStore>,
	pub(crate) directory: Arc<dyn EntityDirectory>,
	pub(crate) oracle: Arc<dyn AuthorizationOracle>,
	pub(crate) config: GatewayConfig,
	pub(crate) name_pattern: Regex,
}

impl AttributeGateway {
	pub fn new(
		store: Arc<dyn AttributeStore>,
		directory: Arc<dyn EntityDirectory>,
		oracle: Arc<dyn AuthorizationOracle>,
		config: GatewayConfig,
	) -> Result<Self> {
		let name_pattern = compile_name_pattern(&config.attribute_name_pattern)?;
		Ok(Self {
			store,
			directory,
			oracle,
			config,
			name_pattern,
		})
	}

	pub fn config(&self) -> &GatewayConfig {
		&self.config
	}

	// =========================================================================
	// Lenient reads
	// =========================================================================

	/// All attributes of the scope the session may read, annotated with
	/// whether it may also write them.
	#[instrument(level = "debug", skip(self, session, scope), fields(actor = %session.actor, scope = %scope))]
	pub async fn get_attributes(&self, session: &Session, scope: &Scope) -> Result<Vec<AttributeView>> {
		self.prepare(scope).await?;
		let attributes = self.store.get_attributes(scope).await?;
		self.filter_readable(session, scope, "get_attributes", attributes).await
	}

	#[instrument(level = "debug", skip(self, session, scope, names), fields(actor = %session.actor, scope = %scope, requested = names.len()))]
	pub async fn get_attributes_by_names(
		&self,
		session: &Session,
		scope: &Scope,
		names: &[String],
	) -> Result<Vec<AttributeView>> {
		self.prepare(scope).await?;
		let attributes = self.store.get_attributes_by_names(scope, names).await?;
		self.filter_readable(session, scope, "get_attributes_by_names", attributes)
			.await
	}

	/// Readable attributes with a value whose friendly name starts with `prefix`.
	#[instrument(level = "debug", skip(self, session, scope), fields(actor = %session.actor, scope = %scope))]
	pub async fn get_attributes_with_prefix(
		&self,
		session: &Session,
		scope: &Scope,
		prefix: &str,
	) -> Result<Vec<AttributeView>> {
		self.prepare(scope).await?;
		let attributes: Vec<Attribute> = self
			.store
			.get_attributes(scope)
			.await?
			.into_iter()
			.filter(|a| !a.value.is_null() && a.definition.friendly_name.starts_with(prefix))
			.collect();
		self.filter_readable(session, scope, "get_attributes_with_prefix", attributes)
			.await
	}

	/// Readable attributes the given services require. An empty service list
	/// means every service.
	#[instrument(level = "debug", skip(self, session, scope, services), fields(actor = %session.actor, scope = %scope))]
	pub async fn get_required_attributes(
		&self,
		session: &Session,
		scope: &Scope,
		services: &[ServiceId],
	) -> Result<Vec<AttributeView>> {
		self.prepare(scope).await?;
		let attributes = self.store.get_required_attributes(scope, services).await?;
		self.filter_readable(session, scope, "get_required_attributes", attributes)
			.await
	}

	/// Required attributes of many members on one resource.
	///
	/// The facility is looked up once for the whole call. Each member is
	/// checked and filtered on its own, with its own derived user.
	#[instrument(level = "debug", skip(self, session, services, members), fields(actor = %session.actor, resource = %resource, members = members.len()))]
	pub async fn get_attributes_for_members(
		&self,
		session: &Session,
		services: &[ServiceId],
		resource: ResourceId,
		members: &[MemberId],
	) -> Result<Vec<(MemberId, Vec<AttributeView>)>> {
		let facility: FacilityId = self.directory.facility_of_resource(resource).await?;

		let mut result = Vec::with_capacity(members.len());
		for member in members {
			let scope = Scope::facility_resource_user_member(facility, resource, *member).with_derived_facility();
			self.prepare(&scope).await?;
			let attributes = self.store.get_required_attributes(&scope, services).await?;
			let views = self
				.filter_readable(session, &scope, "get_attributes_for_members", attributes)
				.await?;
			result.push((*member, views));
		}
		Ok(result)
	}

	/// Readable attributes required by the services assigned to
	/// `services_from`, read for `scope`.
	///
	/// `services_from` need not be part of the scope. A resource without
	/// services requires nothing.
	#[instrument(level = "debug", skip(self, session, scope), fields(actor = %session.actor, services_from = %services_from, scope = %scope))]
	pub async fn get_resource_required_attributes(
		&self,
		session: &Session,
		services_from: ResourceId,
		scope: &Scope,
	) -> Result<Vec<AttributeView>> {
		self.directory
			.check_exists(&EntityRef::Resource(services_from))
			.await?;
		self.prepare(scope).await?;
		let services = self.directory.services_of_resource(services_from).await?;
		if services.is_empty() {
			return Ok(Vec::new());
		}
		let attributes = self.store.get_required_attributes(scope, &services).await?;
		self.filter_readable(session, scope, "get_resource_required_attributes", attributes)
			.await
	}

	/// Required user-facility attributes of many users on one facility.
	#[instrument(level = "debug", skip(self, session, services, users), fields(actor = %session.actor, facility = %facility, users = users.len()))]
	pub async fn get_attributes_for_users(
		&self,
		session: &Session,
		services: &[ServiceId],
		facility: FacilityId,
		users: &[UserId],
	) -> Result<Vec<(UserId, Vec<AttributeView>)>> {
		let mut result = Vec::with_capacity(users.len());
		for user in users {
			let scope = Scope::user_facility(*user, facility);
			self.prepare(&scope).await?;
			let attributes = self.store.get_required_attributes(&scope, services).await?;
			let views = self
				.filter_readable(session, &scope, "get_attributes_for_users", attributes)
				.await?;
			result.push((*user, views));
		}
		Ok(result)
	}

	/// The user's logins: set `login-namespace:*` user attributes the session
	/// may read.
	#[instrument(level = "debug", skip(self, session), fields(actor = %session.actor, user = %user))]
	pub async fn get_logins(&self, session: &Session, user: UserId) -> Result<Vec<AttributeView>> {
		self.get_attributes_with_prefix(session, &Scope::user(user), LOGIN_NAMESPACE_PREFIX)
			.await
	}

	// =========================================================================
	// Strict reads
	// =========================================================================

	/// One attribute. A READ denial is a privilege failure.
	#[instrument(level = "debug", skip(self, session, scope), fields(actor = %session.actor, scope = %scope))]
	pub async fn get_attribute(&self, session: &Session, scope: &Scope, name: &str) -> Result<AttributeView> {
		self.prepare(scope).await?;
		let attribute = self.store.get_attribute(scope, name).await?;
		self.require_single(session, scope, "get_attribute", Action::Read, attribute)
			.await
	}

	#[instrument(level = "debug", skip(self, session, scope), fields(actor = %session.actor, scope = %scope))]
	pub async fn get_attribute_by_id(
		&self,
		session: &Session,
		scope: &Scope,
		id: AttributeId,
	) -> Result<AttributeView> {
		self.prepare(scope).await?;
		let attribute = self.store.get_attribute_by_id(scope, id).await?;
		self.require_single(session, scope, "get_attribute_by_id", Action::Read, attribute)
			.await
	}

	// =========================================================================
	// Strict writes
	// =========================================================================

	/// Stores every attribute or none of them.
	#[instrument(level = "debug", skip(self, session, scope, attributes), fields(actor = %session.actor, scope = %scope, count = attributes.len()))]
	pub async fn set_attributes(&self, session: &Session, scope: &Scope, attributes: Vec<Attribute>) -> Result<()> {
		self.set_batch(session, scope, "set_attributes", attributes).await
	}

	#[instrument(level = "debug", skip(self, session, scope, attribute), fields(actor = %session.actor, scope = %scope, attribute = %attribute.name()))]
	pub async fn set_attribute(&self, session: &Session, scope: &Scope, attribute: Attribute) -> Result<()> {
		self.set_batch(session, scope, "set_attribute", vec![attribute]).await
	}

	#[instrument(level = "debug", skip(self, session, scope, definitions), fields(actor = %session.actor, scope = %scope, count = definitions.len()))]
	pub async fn remove_attributes(
		&self,
		session: &Session,
		scope: &Scope,
		definitions: Vec<AttributeDefinition>,
	) -> Result<()> {
		self.remove_batch(session, scope, "remove_attributes", definitions).await
	}

	#[instrument(level = "debug", skip(self, session, scope, definition), fields(actor = %session.actor, scope = %scope, attribute = %definition.name()))]
	pub async fn remove_attribute(
		&self,
		session: &Session,
		scope: &Scope,
		definition: AttributeDefinition,
	) -> Result<()> {
		self.remove_batch(session, scope, "remove_attribute", vec![definition])
			.await
	}

	/// Removes every stored attribute of the scope, provided the session may
	/// write each one of them.
	#[instrument(level = "debug", skip(self, session, scope), fields(actor = %session.actor, scope = %scope))]
	pub async fn remove_all_attributes(&self, session: &Session, scope: &Scope) -> Result<()> {
		const OPERATION: &str = "remove_all_attributes";
		self.prepare(scope).await?;
		let stored = self.store.get_attributes(scope).await?;
		self.require_all(session, scope, OPERATION, Action::Write, PendingBatch::stored(stored))
			.await?;
		self.store.remove_all_attributes(scope).await?;
		Ok(())
	}

	/// Asks the store whether the values are valid, provided the session may
	/// write every attribute.
	#[instrument(level = "debug", skip(self, session, scope, attributes), fields(actor = %session.actor, scope = %scope, count = attributes.len()))]
	pub async fn check_attributes_value(
		&self,
		session: &Session,
		scope: &Scope,
		attributes: Vec<Attribute>,
	) -> Result<()> {
		const OPERATION: &str = "check_attributes_value";
		self.prepare(scope).await?;
		self.check_exist(&attributes).await?;
		let authorized = self
			.require_all(session, scope, OPERATION, Action::Write, PendingBatch::supplied(attributes))
			.await?;
		self.store
			.check_attributes_value(scope, &authorized.into_attributes())
			.await?;
		Ok(())
	}

	// =========================================================================
	// Fill
	// =========================================================================

	/// Computes default values, keeping only attributes the session may write.
	#[instrument(level = "debug", skip(self, session, scope, attributes), fields(actor = %session.actor, scope = %scope, count = attributes.len()))]
	pub async fn fill_attributes(
		&self,
		session: &Session,
		scope: &Scope,
		attributes: Vec<Attribute>,
	) -> Result<Vec<AttributeView>> {
		const OPERATION: &str = "fill_attributes";
		self.prepare(scope).await?;
		self.check_exist(&attributes).await?;

		let mut dispatcher = self.dispatcher(session, scope);
		PendingBatch::supplied(attributes.clone())
			.classify(&mut dispatcher)
			.await?;
		let filled = self.store.fill_attributes(scope, attributes).await?;
		let classified = PendingBatch::stored(filled)
			.classify(&mut dispatcher)
			.await
			.map_err(|e| self.fault(session, OPERATION, e))?;
		Ok(classified.filter_writable(&dispatcher).finalize())
	}

	/// Computes the default value of one attribute the session must be able
	/// to write.
	#[instrument(level = "debug", skip(self, session, scope, attribute), fields(actor = %session.actor, scope = %scope, attribute = %attribute.name()))]
	pub async fn fill_attribute(&self, session: &Session, scope: &Scope, attribute: Attribute) -> Result<AttributeView> {
		const OPERATION: &str = "fill_attribute";
		self.prepare(scope).await?;
		self.check_exist(std::slice::from_ref(&attribute)).await?;
		self.require_all(
			session,
			scope,
			OPERATION,
			Action::Write,
			PendingBatch::supplied(vec![attribute.clone()]),
		)
		.await?;

		let filled = self.store.fill_attributes(scope, vec![attribute]).await?;
		let attribute = single(OPERATION, filled)?;
		Ok(AttributeView::new(attribute, true))
	}

	// =========================================================================
	// Entityless
	// =========================================================================

	#[instrument(level = "debug", skip(self, session), fields(actor = %session.actor))]
	pub async fn get_entityless_attributes_by_key(&self, session: &Session, key: &str) -> Result<Vec<AttributeView>> {
		const OPERATION: &str = "get_entityless_attributes_by_key";
		validate_entityless_key(key, self.config.max_entityless_key_len)?;
		self.require_admin(session, OPERATION)?;
		let attributes = self.store.get_entityless_attributes_by_key(key).await?;
		self.all_writable(session, OPERATION, attributes)
	}

	/// Values of one entityless attribute under every key.
	#[instrument(level = "debug", skip(self, session), fields(actor = %session.actor))]
	pub async fn get_entityless_attributes(&self, session: &Session, name: &str) -> Result<Vec<AttributeView>> {
		const OPERATION: &str = "get_entityless_attributes";
		let name = parse_entityless_name(name)?;
		self.require_admin(session, OPERATION)?;
		let attributes = self.store.get_entityless_attributes(&name.to_string()).await?;
		self.all_writable(session, OPERATION, attributes)
	}

	#[instrument(level = "debug", skip(self, session, definition), fields(actor = %session.actor, attribute = %definition.name()))]
	pub async fn get_entityless_keys(&self, session: &Session, definition: &AttributeDefinition) -> Result<Vec<String>> {
		require_entityless(definition)?;
		self.require_admin(session, "get_entityless_keys")?;
		Ok(self.store.get_entityless_keys(definition).await?)
	}

	/// Every value of an entityless definition, paired with its key.
	#[instrument(level = "debug", skip(self, session, definition), fields(actor = %session.actor, attribute = %definition.name()))]
	pub async fn get_attributes_by_definition(
		&self,
		session: &Session,
		definition: &AttributeDefinition,
	) -> Result<Vec<(String, AttributeView)>> {
		require_entityless(definition)?;
		self.require_admin(session, "get_attributes_by_definition")?;
		let values = self.store.get_entityless_values(definition).await?;
		Ok(values
			.into_iter()
			.map(|(key, attribute)| (key, AttributeView::new(attribute, true)))
			.collect())
	}

	#[instrument(level = "debug", skip(self, session), fields(actor = %session.actor))]
	pub async fn get_entityless_attribute(&self, session: &Session, key: &str, name: &str) -> Result<AttributeView> {
		const OPERATION: &str = "get_entityless_attribute";
		validate_entityless_key(key, self.config.max_entityless_key_len)?;
		let name = parse_entityless_name(name)?;
		self.require_admin(session, OPERATION)?;
		let attribute = self
			.store
			.get_entityless_attribute(key, &name.to_string())
			.await?;
		let mut views = self.all_writable(session, OPERATION, vec![attribute])?;
		views
			.pop()
			.ok_or_else(|| GatewayError::Consistency(format!("{OPERATION} returned no attribute")))
	}

	#[instrument(level = "debug", skip(self, session, attribute), fields(actor = %session.actor, attribute = %attribute.name()))]
	pub async fn set_entityless_attribute(&self, session: &Session, key: &str, attribute: Attribute) -> Result<()> {
		validate_entityless_key(key, self.config.max_entityless_key_len)?;
		require_entityless(&attribute.definition)?;
		self.require_admin(session, "set_entityless_attribute")?;
		self.check_exist(std::slice::from_ref(&attribute)).await?;
		self.store.set_entityless_attribute(key, &attribute).await?;
		Ok(())
	}

	#[instrument(level = "debug", skip(self, session, definition), fields(actor = %session.actor, attribute = %definition.name()))]
	pub async fn remove_entityless_attribute(
		&self,
		session: &Session,
		key: &str,
		definition: &AttributeDefinition,
	) -> Result<()> {
		validate_entityless_key(key, self.config.max_entityless_key_len)?;
		require_entityless(definition)?;
		self.require_admin(session, "remove_entityless_attribute")?;
		self.store
			.check_attributes_exist(std::slice::from_ref(definition))
			.await?;
		self.store.remove_entityless_attribute(key, definition).await?;
		Ok(())
	}

	// =========================================================================
	// Pipeline
	// =========================================================================

	fn dispatcher<'a>(&'a self, session: &'a Session, scope: &'a Scope) -> Dispatcher<'a> {
		Dispatcher::new(session, self.oracle.as_ref(), self.directory.as_ref(), scope)
	}

	/// Existence checks, then relationship checks. Both precede any decision.
	pub(crate) async fn prepare(&self, scope: &Scope) -> Result<()> {
		for entity in scope.supplied() {
			self.directory.check_exists(&entity).await?;
		}
		relationship::validate(self.directory.as_ref(), scope).await
	}

	async fn check_exist(&self, attributes: &[Attribute]) -> Result<()> {
		let definitions: Vec<AttributeDefinition> = attributes.iter().map(|a| a.definition.clone()).collect();
		self.store.check_attributes_exist(&definitions).await?;
		Ok(())
	}

	pub(crate) async fn filter_readable(
		&self,
		session: &Session,
		scope: &Scope,
		operation: &str,
		attributes: Vec<Attribute>,
	) -> Result<Vec<AttributeView>> {
		let mut dispatcher = self.dispatcher(session, scope);
		let classified = PendingBatch::stored(attributes)
			.classify(&mut dispatcher)
			.await
			.map_err(|e| self.fault(session, operation, e))?;
		let views = classified.filter_readable(&dispatcher).finalize();
		debug!(
			operation,
			returned = views.len(),
			derived_lookups = dispatcher.derived_lookups(),
			"read completed"
		);
		Ok(views)
	}

	async fn require_all(
		&self,
		session: &Session,
		scope: &Scope,
		operation: &str,
		action: Action,
		batch: PendingBatch,
	) -> Result<AuthorizedBatch> {
		let mut dispatcher = self.dispatcher(session, scope);
		let classified = batch
			.classify(&mut dispatcher)
			.await
			.map_err(|e| self.fault(session, operation, e))?;
		classified
			.require(action, &dispatcher)
			.map_err(|denial| self.reject(session, operation, denial))
	}

	async fn require_single(
		&self,
		session: &Session,
		scope: &Scope,
		operation: &str,
		action: Action,
		attribute: Attribute,
	) -> Result<AttributeView> {
		let authorized = self
			.require_all(session, scope, operation, action, PendingBatch::supplied(vec![attribute]))
			.await?;
		single(operation, authorized.finalize())
	}

	async fn set_batch(&self, session: &Session, scope: &Scope, operation: &str, attributes: Vec<Attribute>) -> Result<()> {
		self.prepare(scope).await?;
		self.check_exist(&attributes).await?;
		let authorized = self
			.require_all(session, scope, operation, Action::Write, PendingBatch::supplied(attributes))
			.await?;
		self.store
			.set_attributes(scope, &authorized.into_attributes())
			.await?;
		Ok(())
	}

	async fn remove_batch(
		&self,
		session: &Session,
		scope: &Scope,
		operation: &str,
		definitions: Vec<AttributeDefinition>,
	) -> Result<()> {
		self.prepare(scope).await?;
		self.store.check_attributes_exist(&definitions).await?;
		let attributes = definitions.iter().cloned().map(Attribute::empty).collect();
		self.require_all(session, scope, operation, Action::Write, PendingBatch::supplied(attributes))
			.await?;
		self.store.remove_attributes(scope, &definitions).await?;
		Ok(())
	}

	/// Entityless results: every attribute must be entityless and is writable
	/// for the administrator who already passed the role check.
	fn all_writable(&self, session: &Session, operation: &str, attributes: Vec<Attribute>) -> Result<Vec<AttributeView>> {
		attributes
			.into_iter()
			.map(|attribute| {
				require_entityless(&attribute.definition)
					.map_err(|_| {
						self.fault(
							session,
							operation,
							GatewayError::Consistency(format!(
								"store returned non-entityless attribute {}",
								attribute.name()
							)),
						)
					})
					.map(|_| AttributeView::new(attribute, true))
			})
			.collect()
	}

	pub(crate) fn require_admin(&self, session: &Session, operation: &str) -> Result<()> {
		dispatch::require_admin(self.oracle.as_ref(), session, operation).inspect_err(|_| {
			AuditRecord::builder(AuditEventType::AdminRoleDenied, session, operation)
				.build()
				.emit();
		})
	}

	/// Converts a denial into a privilege failure, auditing it.
	fn reject(&self, session: &Session, operation: &str, denial: Denial) -> GatewayError {
		warn!(
			actor = %session.actor,
			operation,
			action = %denial.action,
			attribute = %denial.attribute,
			context = %denial.context,
			"attribute batch rejected"
		);
		if denial.action == Action::Read || self.config.audit_write_denials {
			AuditRecord::for_denial(session, operation, &denial).emit();
		}
		GatewayError::Privilege(format!(
			"{} on {} denied for {}",
			denial.action, denial.attribute, denial.context
		))
	}

	/// Audits consistency faults on their way out.
	fn fault(&self, session: &Session, operation: &str, err: GatewayError) -> GatewayError {
		if let GatewayError::Consistency(message) = &err {
			AuditRecord::builder(AuditEventType::ConsistencyFault, session, operation)
				.details(serde_json::json!({ "message": message }))
				.build()
				.emit();
		}
		err
	}
}

fn single<T>(operation: &str, items: Vec<T>) -> Result<T> {
	let mut items = items.into_iter();
	match (items.next(), items.next()) {
		(Some(item), None) => Ok(item),
		_ => Err(GatewayError::Consistency(format!(
			"{operation} expected exactly one attribute"
		))),
	}
}
