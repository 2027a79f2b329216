// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Attribute definition administration.
//!
//! Key invariant: anyone may look definitions up, only the administrative
//! role may change them or their rights.

use attrgate_authz::testing::RuleOracle;
use attrgate_authz::{
	Action, AttributeDefinition, AttributeId, AttributeRights, EntityContext, GatewayError, Namespace, Role, Scope,
	ServiceId, StoreError, ValueType,
};

use super::support::{admin, session, TestWorld};

fn new_definition(name: &str) -> AttributeDefinition {
	AttributeDefinition::parse(AttributeId::generate(), name, ValueType::String).unwrap()
}

#[tokio::test]
async fn admin_creates_and_anyone_reads() {
	let world = TestWorld::new();
	let (gateway, _) = world.gateway(RuleOracle::allow_all());
	let definition = new_definition("urn:perun:user:attribute-def:def:preferredMail");

	let created = gateway
		.create_attribute_definition(&admin(), definition.clone())
		.await
		.unwrap();
	assert_eq!(created, definition);

	let (reader, _) = world.gateway(RuleOracle::deny_all());
	let found = reader
		.get_attribute_definition(&session(), &definition.name())
		.await
		.unwrap();
	assert_eq!(found.id, definition.id);
	let by_id = reader
		.get_attribute_definition_by_id(&session(), definition.id)
		.await
		.unwrap();
	assert_eq!(by_id.name(), definition.name());
	assert_eq!(reader.list_attribute_definitions(&session()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn non_admin_cannot_create() {
	let world = TestWorld::new();
	let (gateway, _) = world.gateway(RuleOracle::allow_all().with_admin(false));

	let err = gateway
		.create_attribute_definition(&session(), new_definition("urn:perun:user:attribute-def:def:mail"))
		.await
		.unwrap_err();
	assert!(matches!(err, GatewayError::Privilege(_)));
	assert_eq!(world.store.writes(), 0);
}

#[tokio::test]
async fn friendly_name_must_match_pattern() {
	let world = TestWorld::new();
	let (gateway, _) = world.gateway(RuleOracle::allow_all());

	let err = gateway
		.create_attribute_definition(&admin(), new_definition("urn:perun:user:attribute-def:def:bad.name"))
		.await
		.unwrap_err();
	assert!(matches!(err, GatewayError::InvalidArgument(_)));
}

#[tokio::test]
async fn duplicate_definition_is_rejected_by_store() {
	let world = TestWorld::new();
	world.define("urn:perun:vo:attribute-def:def:contact", ValueType::String);
	let (gateway, _) = world.gateway(RuleOracle::allow_all());

	let err = gateway
		.create_attribute_definition(&admin(), new_definition("urn:perun:vo:attribute-def:def:contact"))
		.await
		.unwrap_err();
	assert!(matches!(err, GatewayError::Store(StoreError::DefinitionExists(_))));
}

#[tokio::test]
async fn definitions_filter_by_namespace() {
	let world = TestWorld::new();
	world.define("urn:perun:vo:attribute-def:def:contact", ValueType::String);
	world.define("urn:perun:user:attribute-def:def:mail", ValueType::String);
	world.define("urn:perun:user:attribute-def:def:phone", ValueType::String);
	let (gateway, _) = world.gateway(RuleOracle::deny_all());

	let users = gateway
		.attribute_definitions_by_namespace(&session(), Namespace::User)
		.await
		.unwrap();
	assert_eq!(users.len(), 2);
	assert!(users.iter().all(|d| d.namespace == Namespace::User));
}

#[tokio::test]
async fn update_changes_description_only() {
	let world = TestWorld::new();
	let original = world.define("urn:perun:vo:attribute-def:def:contact", ValueType::String);
	let (gateway, _) = world.gateway(RuleOracle::allow_all());

	let mut changed = original.clone().with_description("Contact address");
	changed.value_type = ValueType::Integer;
	let updated = gateway
		.update_attribute_definition(&admin(), changed)
		.await
		.unwrap();

	assert_eq!(updated.description.as_deref(), Some("Contact address"));
	assert_eq!(updated.value_type, ValueType::String);
}

#[tokio::test]
async fn delete_in_use_needs_force() {
	let world = TestWorld::new();
	let vo = world.fixtures.vo;
	let contact = world.define("urn:perun:vo:attribute-def:def:contact", ValueType::String);
	world.store.put(EntityContext::Vo { vo }, contact.id, "ops@example.org");
	let (gateway, _) = world.gateway(RuleOracle::allow_all());

	let err = gateway
		.delete_attribute_definition(&admin(), contact.id, false)
		.await
		.unwrap_err();
	assert!(matches!(err, GatewayError::Store(StoreError::DefinitionInUse(_))));

	gateway
		.delete_attribute_definition(&admin(), contact.id, true)
		.await
		.unwrap();
	assert!(world.store.value(&EntityContext::Vo { vo }, contact.id).is_none());
	assert!(gateway
		.get_attribute_definition_by_id(&session(), contact.id)
		.await
		.is_err());
}

#[tokio::test]
async fn required_definitions_follow_services() {
	let world = TestWorld::new();
	let service = ServiceId::generate();
	let shell = world.define("urn:perun:user_facility:attribute-def:def:shell", ValueType::String);
	let quota = world.define("urn:perun:resource:attribute-def:def:quota", ValueType::Integer);
	world.define("urn:perun:vo:attribute-def:def:contact", ValueType::String);
	world.store.require(service, shell.id);
	world.store.require(ServiceId::generate(), quota.id);
	let (gateway, _) = world.gateway(RuleOracle::deny_all());

	let required = gateway
		.get_required_attribute_definitions(&session(), &[service])
		.await
		.unwrap();
	assert_eq!(required, vec![shell.clone()]);

	let every = gateway.get_required_attribute_definitions(&session(), &[]).await.unwrap();
	assert_eq!(every.len(), 2);
}

mod with_rights {
	use super::*;

	#[tokio::test]
	async fn readable_definitions_are_marked_writable_or_not() {
		let world = TestWorld::new();
		let member = world.fixtures.member;
		let user = world.fixtures.user;
		let status = world.define("urn:perun:member:attribute-def:def:status", ValueType::String);
		let mail = world.define("urn:perun:user:attribute-def:def:preferredMail", ValueType::String);
		let hidden = world.define("urn:perun:member:attribute-def:def:internalNote", ValueType::String);
		world.define("urn:perun:vo:attribute-def:def:contact", ValueType::String);
		let oracle = RuleOracle::deny_all()
			.allow(Action::Read, status.id)
			.allow(Action::Read, mail.id)
			.allow(Action::Write, mail.id);
		let (gateway, oracle) = world.gateway(oracle);

		let views = gateway
			.attribute_definitions_with_rights(&session(), &Scope::member_with_user(member))
			.await
			.unwrap();

		let returned: Vec<_> = views.iter().map(|v| (v.definition.id, v.writable)).collect();
		assert_eq!(returned, vec![(status.id, false), (mail.id, true)]);
		assert!(!returned.iter().any(|(id, _)| *id == hidden.id));
		assert!(oracle
			.decisions()
			.iter()
			.any(|d| d.attribute == mail.id && d.context == EntityContext::User { user }));
	}

	#[tokio::test]
	async fn related_entities_are_checked_first() {
		let world = TestWorld::new();
		world.define("urn:perun:member_group:attribute-def:def:groupStatus", ValueType::String);
		let (gateway, oracle) = world.gateway(RuleOracle::allow_all());

		let err = gateway
			.attribute_definitions_with_rights(
				&session(),
				&Scope::member_group(world.fixtures.member, world.fixtures.foreign_group),
			)
			.await
			.unwrap_err();
		assert!(matches!(err, GatewayError::MemberGroupMismatch { .. }));
		assert_eq!(oracle.calls(), 0);
	}
}

mod rights {
	use super::*;

	#[tokio::test]
	async fn admin_manages_rights() {
		let world = TestWorld::new();
		let contact = world.define("urn:perun:vo:attribute-def:def:contact", ValueType::String);
		let (gateway, _) = world.gateway(RuleOracle::allow_all());

		gateway
			.set_attribute_rights(
				&admin(),
				vec![
					AttributeRights::new(contact.id, Role::VoAdmin, vec![Action::Read, Action::Write]),
					AttributeRights::new(contact.id, Role::SelfService, vec![Action::Read]),
				],
			)
			.await
			.unwrap();
		gateway
			.set_attribute_rights(
				&admin(),
				vec![AttributeRights::new(contact.id, Role::SelfService, vec![])],
			)
			.await
			.unwrap();

		let rights = gateway.get_attribute_rights(&admin(), contact.id).await.unwrap();
		assert_eq!(rights.len(), 2);
		let self_service = rights.iter().find(|r| r.role == Role::SelfService).unwrap();
		assert!(!self_service.grants(Action::Read));
	}

	#[tokio::test]
	async fn rights_for_unknown_definition_fail() {
		let world = TestWorld::new();
		let (gateway, _) = world.gateway(RuleOracle::allow_all());

		let err = gateway
			.get_attribute_rights(&admin(), AttributeId::generate())
			.await
			.unwrap_err();
		assert!(matches!(err, GatewayError::Store(StoreError::DefinitionNotFound(_))));
	}

	#[tokio::test]
	async fn non_admin_cannot_read_rights() {
		let world = TestWorld::new();
		let contact = world.define("urn:perun:vo:attribute-def:def:contact", ValueType::String);
		let (gateway, _) = world.gateway(RuleOracle::allow_all().with_admin(false));

		let err = gateway.get_attribute_rights(&session(), contact.id).await.unwrap_err();
		assert!(matches!(err, GatewayError::Privilege(_)));
	}
}
