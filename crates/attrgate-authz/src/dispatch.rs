// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Namespace dispatch.
//!
//! Every attribute is routed by its namespace to the entity context it is
//! authorized against, then the oracle decides on that exact context. There is
//! one generic path for all namespaces; the scope decides which namespaces an
//! operation accepts.
//!
//! An attribute whose namespace the scope does not accept is never shown to the
//! oracle. When it came from the store the data is inconsistent
//! ([`GatewayError::Consistency`]); when the caller supplied it the request is
//! wrong ([`GatewayError::WrongAttributeAssignment`]).

use attrgate_core::{Action, AttributeDefinition, EntityContext, Role, Session};
use tracing::{debug, instrument, warn};

use crate::collaborators::{AuthorizationOracle, EntityDirectory};
use crate::error::{GatewayError, Result};
use crate::resolver::EntityResolver;
use crate::scope::Scope;

/// Where the attributes of a batch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
	/// Read back from the store.
	Stored,
	/// Handed in by the caller.
	Supplied,
}

/// Routes attributes of one operation to their entity contexts and decisions.
pub struct Dispatcher<'a> {
	session: &'a Session,
	oracle: &'a dyn AuthorizationOracle,
	scope: &'a Scope,
	resolver: EntityResolver<'a, dyn EntityDirectory + 'a>,
}

impl<'a> Dispatcher<'a> {
	pub fn new(
		session: &'a Session,
		oracle: &'a dyn AuthorizationOracle,
		directory: &'a (dyn EntityDirectory + 'a),
		scope: &'a Scope,
	) -> Self {
		Self {
			session,
			oracle,
			scope,
			resolver: EntityResolver::new(directory, *scope.entities()),
		}
	}

	pub fn scope(&self) -> &Scope {
		self.scope
	}

	pub fn session(&self) -> &Session {
		self.session
	}

	/// Directory lookups performed so far to derive entities.
	pub fn derived_lookups(&self) -> usize {
		self.resolver.cache().lookups()
	}

	/// Maps an attribute to the entity context it is authorized against.
	pub async fn classify(&mut self, definition: &AttributeDefinition, origin: Origin) -> Result<EntityContext> {
		let namespace = definition.namespace;
		if !self.scope.allows(namespace) {
			let message = format!(
				"attribute {} is not from a namespace accepted by {}",
				definition.name(),
				self.scope.label()
			);
			return Err(match origin {
				Origin::Stored => {
					warn!(attribute = %definition.name(), scope = self.scope.label(), "store returned attribute outside scope");
					GatewayError::Consistency(message)
				}
				Origin::Supplied => GatewayError::WrongAttributeAssignment(message),
			});
		}
		self.resolver.resolve(namespace).await
	}

	/// Asks the oracle whether the session may perform `action` on the
	/// attribute in `context`.
	#[instrument(
		level = "debug",
		skip(self, definition, context),
		fields(
			actor = %self.session.actor,
			action = %action,
			attribute = %definition.name(),
			context = %context,
		)
	)]
	pub fn decide(&self, action: Action, definition: &AttributeDefinition, context: &EntityContext) -> bool {
		let allowed = self
			.oracle
			.is_authorized_for_attribute(self.session, action, definition, context);
		debug!(allowed, "attribute decision");
		allowed
	}
}

/// Requires the administrative role, used for entityless attributes and
/// definition management.
pub fn require_admin(oracle: &dyn AuthorizationOracle, session: &Session, operation: &str) -> Result<()> {
	if oracle.is_authorized(session, Role::PerunAdmin) {
		return Ok(());
	}
	warn!(actor = %session.actor, operation, "administrative role required");
	Err(GatewayError::Privilege(format!(
		"{operation} requires the {} role",
		Role::PerunAdmin
	)))
}
