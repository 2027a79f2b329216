// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Attribute definition and rights administration.
//!
//! Definitions are public knowledge: any session may look them up. Creating,
//! changing or deleting them, and managing the rights attached to them, needs
//! the administrative role. [`AttributeGateway::attribute_definitions_with_rights`]
//! is the exception: it reports what one caller may do with each definition
//! for the given entities, so it runs the full read pipeline.

use attrgate_core::{
	Attribute, AttributeDefinition, AttributeId, AttributeRights, DefinitionView, Namespace, ServiceId, Session,
};
use tracing::{info, instrument};

use crate::error::Result;
use crate::gateway::AttributeGateway;
use crate::scope::Scope;
use crate::validation::validate_friendly_name;

impl AttributeGateway {
	#[instrument(level = "debug", skip(self, session), fields(actor = %session.actor))]
	pub async fn get_attribute_definition(&self, session: &Session, name: &str) -> Result<AttributeDefinition> {
		Ok(self.store.get_definition(name).await?)
	}

	#[instrument(level = "debug", skip(self, session), fields(actor = %session.actor, id = %id))]
	pub async fn get_attribute_definition_by_id(
		&self,
		session: &Session,
		id: AttributeId,
	) -> Result<AttributeDefinition> {
		Ok(self.store.get_definition_by_id(id).await?)
	}

	#[instrument(level = "debug", skip(self, session), fields(actor = %session.actor))]
	pub async fn list_attribute_definitions(&self, session: &Session) -> Result<Vec<AttributeDefinition>> {
		Ok(self.store.list_definitions().await?)
	}

	#[instrument(level = "debug", skip(self, session), fields(actor = %session.actor, namespace = %namespace))]
	pub async fn attribute_definitions_by_namespace(
		&self,
		session: &Session,
		namespace: Namespace,
	) -> Result<Vec<AttributeDefinition>> {
		let definitions = self.store.list_definitions().await?;
		Ok(definitions
			.into_iter()
			.filter(|d| d.is_from(namespace))
			.collect())
	}

	/// Definitions the given services require. An empty list means every service.
	#[instrument(level = "debug", skip(self, session, services), fields(actor = %session.actor, services = services.len()))]
	pub async fn get_required_attribute_definitions(
		&self,
		session: &Session,
		services: &[ServiceId],
	) -> Result<Vec<AttributeDefinition>> {
		Ok(self.store.get_required_definitions(services).await?)
	}

	/// Definitions of the scope's namespaces the caller may read for its
	/// entities, each marked writable or not.
	#[instrument(level = "debug", skip(self, session, scope), fields(actor = %session.actor, scope = %scope))]
	pub async fn attribute_definitions_with_rights(
		&self,
		session: &Session,
		scope: &Scope,
	) -> Result<Vec<DefinitionView>> {
		self.prepare(scope).await?;
		let attributes: Vec<Attribute> = self
			.store
			.list_definitions()
			.await?
			.into_iter()
			.filter(|d| scope.allows(d.namespace))
			.map(Attribute::empty)
			.collect();
		let views = self
			.filter_readable(session, scope, "attribute_definitions_with_rights", attributes)
			.await?;
		Ok(views.into_iter().map(DefinitionView::from).collect())
	}

	#[instrument(level = "debug", skip(self, session, definition), fields(actor = %session.actor, attribute = %definition.name()))]
	pub async fn create_attribute_definition(
		&self,
		session: &Session,
		definition: AttributeDefinition,
	) -> Result<AttributeDefinition> {
		validate_friendly_name(&self.name_pattern, &definition.friendly_name)?;
		self.require_admin(session, "create_attribute_definition")?;
		let created = self.store.create_definition(definition).await?;
		info!(attribute = %created.name(), id = %created.id, "attribute definition created");
		Ok(created)
	}

	#[instrument(level = "debug", skip(self, session, definition), fields(actor = %session.actor, attribute = %definition.name()))]
	pub async fn update_attribute_definition(
		&self,
		session: &Session,
		definition: AttributeDefinition,
	) -> Result<AttributeDefinition> {
		self.require_admin(session, "update_attribute_definition")?;
		Ok(self.store.update_definition(definition).await?)
	}

	/// Deletes a definition. Without `force` the store refuses while values
	/// of it exist.
	#[instrument(level = "debug", skip(self, session), fields(actor = %session.actor, id = %id))]
	pub async fn delete_attribute_definition(&self, session: &Session, id: AttributeId, force: bool) -> Result<()> {
		self.require_admin(session, "delete_attribute_definition")?;
		self.store.delete_definition(id, force).await?;
		info!(%id, force, "attribute definition deleted");
		Ok(())
	}

	#[instrument(level = "debug", skip(self, session), fields(actor = %session.actor, id = %id))]
	pub async fn get_attribute_rights(&self, session: &Session, id: AttributeId) -> Result<Vec<AttributeRights>> {
		self.require_admin(session, "get_attribute_rights")?;
		self.store.get_definition_by_id(id).await?;
		Ok(self.store.get_rights(id).await?)
	}

	#[instrument(level = "debug", skip(self, session, rights), fields(actor = %session.actor, count = rights.len()))]
	pub async fn set_attribute_rights(&self, session: &Session, rights: Vec<AttributeRights>) -> Result<()> {
		self.require_admin(session, "set_attribute_rights")?;
		for entry in &rights {
			self.store.get_definition_by_id(entry.attribute_id).await?;
		}
		self.store.set_rights(&rights).await?;
		Ok(())
	}
}
