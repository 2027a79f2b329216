// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Read operations.
//!
//! Key invariant: batch reads silently drop what the session may not read,
//! single reads fail instead.

use attrgate_authz::testing::RuleOracle;
use attrgate_authz::{
	Action, Attribute, AttributeValue, EntityContext, EntityRef, GatewayError, MemberId, Scope, ServiceId, ValueType,
	VoId,
};

use super::support::{session, TestWorld};

#[tokio::test]
async fn batch_read_drops_unreadable_and_marks_writable() {
	let world = TestWorld::new();
	let resource = world.fixtures.resource;
	let context = EntityContext::Resource { resource };
	let quota = world.define("urn:perun:resource:attribute-def:def:quota", ValueType::Integer);
	let shell = world.define("urn:perun:resource:attribute-def:def:shell", ValueType::String);
	let secret = world.define("urn:perun:resource:attribute-def:def:secret", ValueType::String);
	world.store.put(context.clone(), quota.id, 10_i64);
	world.store.put(context.clone(), shell.id, "/bin/bash");
	world.store.put(context, secret.id, "hunter2");

	let oracle = RuleOracle::deny_all()
		.allow(Action::Read, quota.id)
		.allow(Action::Read, shell.id)
		.allow(Action::Write, shell.id);
	let (gateway, _) = world.gateway(oracle);

	let views = gateway
		.get_attributes(&session(), &Scope::resource(resource))
		.await
		.unwrap();

	let returned: Vec<_> = views.iter().map(|v| (v.attribute.id(), v.writable)).collect();
	assert_eq!(returned, vec![(quota.id, false), (shell.id, true)]);
}

#[tokio::test]
async fn batch_read_with_nothing_readable_is_empty_not_error() {
	let world = TestWorld::new();
	let member = world.fixtures.member;
	let status = world.define("urn:perun:member:attribute-def:def:status", ValueType::String);
	world.store.put(EntityContext::Member { member }, status.id, "VALID");
	let (gateway, _) = world.gateway(RuleOracle::deny_all());

	let views = gateway.get_attributes(&session(), &Scope::member(member)).await.unwrap();
	assert!(views.is_empty());
}

#[tokio::test]
async fn repeated_reads_return_the_same_views() {
	let world = TestWorld::new();
	let member = world.fixtures.member;
	let status = world.define("urn:perun:member:attribute-def:def:status", ValueType::String);
	world.store.put(EntityContext::Member { member }, status.id, "VALID");
	let (gateway, _) = world.gateway(RuleOracle::allow_all().deny(Action::Write, status.id));

	let first = gateway.get_attributes(&session(), &Scope::member(member)).await.unwrap();
	let second = gateway.get_attributes(&session(), &Scope::member(member)).await.unwrap();
	assert_eq!(first, second);
	assert_eq!(first.len(), 1);
	assert!(!first[0].writable);
}

#[tokio::test]
async fn user_attributes_are_decided_against_the_derived_user() {
	let world = TestWorld::new();
	let member = world.fixtures.member;
	let user = world.fixtures.user;
	let mail = world.define("urn:perun:user:attribute-def:def:preferredMail", ValueType::String);
	let status = world.define("urn:perun:member:attribute-def:def:status", ValueType::String);
	world.store.put(EntityContext::User { user }, mail.id, "alice@example.org");
	world.store.put(EntityContext::Member { member }, status.id, "VALID");
	let (gateway, oracle) = world.gateway(RuleOracle::allow_all());

	let views = gateway
		.get_attributes(&session(), &Scope::member_with_user(member))
		.await
		.unwrap();
	assert_eq!(views.len(), 2);

	let contexts: Vec<_> = oracle
		.decisions()
		.into_iter()
		.filter(|d| d.action == Action::Read)
		.map(|d| (d.attribute, d.context))
		.collect();
	assert!(contexts.contains(&(mail.id, EntityContext::User { user })));
	assert!(contexts.contains(&(status.id, EntityContext::Member { member })));
}

#[tokio::test]
async fn prefix_read_matches_friendly_name_and_skips_empty_values() {
	let world = TestWorld::new();
	let user = world.fixtures.user;
	let einfra = world.define("urn:perun:user:attribute-def:def:login-namespace:einfra", ValueType::String);
	let cesnet = world.define("urn:perun:user:attribute-def:def:login-namespace:cesnet", ValueType::String);
	let mail = world.define("urn:perun:user:attribute-def:def:preferredMail", ValueType::String);
	world.store.put(EntityContext::User { user }, einfra.id, "alice");
	world.store.put(EntityContext::User { user }, mail.id, "alice@example.org");
	let (gateway, _) = world.gateway(RuleOracle::allow_all());

	let views = gateway
		.get_attributes_with_prefix(&session(), &Scope::user(user), "login-namespace:")
		.await
		.unwrap();

	let ids: Vec<_> = views.iter().map(|v| v.attribute.id()).collect();
	assert_eq!(ids, vec![einfra.id]);
	assert!(!ids.contains(&cesnet.id));
}

#[tokio::test]
async fn required_attributes_include_unset_values() {
	let world = TestWorld::new();
	let facility = world.fixtures.facility;
	let service = ServiceId::generate();
	let homes = world.define("urn:perun:facility:attribute-def:def:homeMountPoints", ValueType::List);
	let other = world.define("urn:perun:facility:attribute-def:def:unrelated", ValueType::String);
	world.store.require(service, homes.id);
	world.store.put(EntityContext::Facility { facility }, other.id, "x");
	let (gateway, _) = world.gateway(RuleOracle::allow_all());

	let views = gateway
		.get_required_attributes(&session(), &Scope::facility(facility), &[service])
		.await
		.unwrap();

	assert_eq!(views.len(), 1);
	assert_eq!(views[0].attribute.id(), homes.id);
	assert!(views[0].attribute.value.is_null());
}

#[tokio::test]
async fn stored_attribute_outside_scope_is_a_consistency_fault() {
	let world = TestWorld::new();
	let member = world.fixtures.member;
	let contact = world.define("urn:perun:vo:attribute-def:def:contact", ValueType::String);
	world.store.inject_stray(Attribute::new(contact, "ops@example.org"));
	let (gateway, _) = world.gateway(RuleOracle::allow_all());

	let err = gateway
		.get_attributes(&session(), &Scope::member(member))
		.await
		.unwrap_err();
	assert!(matches!(err, GatewayError::Consistency(_)));
	assert!(err.is_internal());
}

#[tokio::test]
async fn unknown_entity_is_not_found() {
	let world = TestWorld::new();
	let (gateway, oracle) = world.gateway(RuleOracle::allow_all());
	let ghost = MemberId::generate();

	let err = gateway.get_attributes(&session(), &Scope::member(ghost)).await.unwrap_err();
	assert!(matches!(err, GatewayError::EntityNotFound(EntityRef::Member(id)) if id == ghost));
	assert_eq!(oracle.calls(), 0);
}

mod single {
	use super::*;

	#[tokio::test]
	async fn denied_single_read_is_privilege_error() {
		let world = TestWorld::new();
		let vo = world.fixtures.vo;
		let contact = world.define("urn:perun:vo:attribute-def:def:contact", ValueType::String);
		world.store.put(EntityContext::Vo { vo }, contact.id, "ops@example.org");
		let (gateway, _) = world.gateway(RuleOracle::allow_all().deny(Action::Read, contact.id));

		let err = gateway
			.get_attribute(&session(), &Scope::vo(vo), &contact.name())
			.await
			.unwrap_err();
		assert!(matches!(err, GatewayError::Privilege(_)));
	}

	#[tokio::test]
	async fn allowed_single_read_reports_write_right() {
		let world = TestWorld::new();
		let vo = world.fixtures.vo;
		let contact = world.define("urn:perun:vo:attribute-def:def:contact", ValueType::String);
		world.store.put(EntityContext::Vo { vo }, contact.id, "ops@example.org");
		let (gateway, _) = world.gateway(RuleOracle::deny_all().allow(Action::Read, contact.id));

		let view = gateway
			.get_attribute_by_id(&session(), &Scope::vo(vo), contact.id)
			.await
			.unwrap();
		assert_eq!(view.attribute.value, AttributeValue::from("ops@example.org"));
		assert!(!view.writable);
	}

	#[tokio::test]
	async fn single_read_from_wrong_namespace_is_wrong_assignment() {
		let world = TestWorld::new();
		let vo = world.fixtures.vo;
		let status = world.define("urn:perun:member:attribute-def:def:status", ValueType::String);
		let (gateway, oracle) = world.gateway(RuleOracle::allow_all());

		let err = gateway
			.get_attribute(&session(), &Scope::vo(vo), &status.name())
			.await
			.unwrap_err();
		assert!(matches!(err, GatewayError::WrongAttributeAssignment(_)));
		assert_eq!(oracle.calls(), 0);
	}

	#[tokio::test]
	async fn unset_single_attribute_comes_back_empty() {
		let world = TestWorld::new();
		let vo = VoId::generate();
		world.directory.add_vo(vo);
		let contact = world.define("urn:perun:vo:attribute-def:def:contact", ValueType::String);
		let (gateway, _) = world.gateway(RuleOracle::allow_all());

		let view = gateway
			.get_attribute(&session(), &Scope::vo(vo), &contact.name())
			.await
			.unwrap();
		assert!(view.attribute.value.is_null());
		assert!(view.writable);
	}
}

mod services {
	use super::*;
	use attrgate_authz::{FacilityId, ResourceId};

	#[tokio::test]
	async fn services_come_from_the_named_resource() {
		let world = TestWorld::new();
		let member = world.fixtures.member;
		let resource = world.fixtures.resource;
		let assigned = ServiceId::generate();
		let unassigned = ServiceId::generate();
		let status = world.define("urn:perun:member:attribute-def:def:status", ValueType::String);
		let phone = world.define("urn:perun:member:attribute-def:def:phone", ValueType::String);
		world.store.require(assigned, status.id);
		world.store.require(unassigned, phone.id);
		world.directory.assign_service(resource, assigned);
		world.store.put(EntityContext::Member { member }, status.id, "VALID");
		let (gateway, _) = world.gateway(RuleOracle::allow_all());

		let views = gateway
			.get_resource_required_attributes(&session(), resource, &Scope::member(member))
			.await
			.unwrap();

		let ids: Vec<_> = views.iter().map(|v| v.attribute.id()).collect();
		assert_eq!(ids, vec![status.id]);
	}

	#[tokio::test]
	async fn resource_without_services_requires_nothing() {
		let world = TestWorld::new();
		let member = world.fixtures.member;
		let status = world.define("urn:perun:member:attribute-def:def:status", ValueType::String);
		world.store.require(ServiceId::generate(), status.id);
		let (gateway, _) = world.gateway(RuleOracle::allow_all());

		let views = gateway
			.get_resource_required_attributes(&session(), world.fixtures.resource, &Scope::member(member))
			.await
			.unwrap();
		assert!(views.is_empty());
	}

	#[tokio::test]
	async fn unknown_services_resource_is_not_found() {
		let world = TestWorld::new();
		let missing = ResourceId::generate();
		let (gateway, oracle) = world.gateway(RuleOracle::allow_all());

		let err = gateway
			.get_resource_required_attributes(&session(), missing, &Scope::member(world.fixtures.member))
			.await
			.unwrap_err();
		assert!(matches!(err, GatewayError::EntityNotFound(EntityRef::Resource(r)) if r == missing));
		assert_eq!(oracle.calls(), 0);
	}

	#[tokio::test]
	async fn users_on_a_facility_are_read_one_by_one() {
		let world = TestWorld::new();
		let facility = world.fixtures.facility;
		let service = ServiceId::generate();
		let shell = world.define("urn:perun:user_facility:attribute-def:def:shell", ValueType::String);
		let mail = world.define("urn:perun:user:attribute-def:def:preferredMail", ValueType::String);
		world.store.require(service, shell.id);
		world.store.require(service, mail.id);

		let first = world.fixtures.user;
		let (_, second) = world.add_member();
		world
			.store
			.put(EntityContext::UserFacility { user: first, facility }, shell.id, "/bin/zsh");
		let (gateway, oracle) = world.gateway(RuleOracle::deny_all().allow(Action::Read, shell.id));

		let result = gateway
			.get_attributes_for_users(&session(), &[service], facility, &[first, second])
			.await
			.unwrap();

		assert_eq!(result.len(), 2);
		assert_eq!(result[0].0, first);
		assert_eq!(result[1].0, second);
		for (user, views) in &result {
			assert_eq!(views.len(), 1, "user-facility only");
			assert_eq!(views[0].attribute.id(), shell.id);
			assert!(!views[0].writable);
			assert!(oracle
				.decisions()
				.iter()
				.any(|d| d.context == EntityContext::UserFacility { user: *user, facility }));
		}
		assert_eq!(result[0].1[0].attribute.value, AttributeValue::from("/bin/zsh"));
		assert!(result[1].1[0].attribute.value.is_null());
	}

	#[tokio::test]
	async fn unknown_facility_fails_users_read() {
		let world = TestWorld::new();
		let missing = FacilityId::generate();
		let (gateway, _) = world.gateway(RuleOracle::allow_all());

		let err = gateway
			.get_attributes_for_users(&session(), &[], missing, &[world.fixtures.user])
			.await
			.unwrap_err();
		assert!(matches!(err, GatewayError::EntityNotFound(EntityRef::Facility(f)) if f == missing));
	}
}

mod logins {
	use super::*;

	#[tokio::test]
	async fn logins_are_readable_login_namespaces() {
		let world = TestWorld::new();
		let user = world.fixtures.user;
		let einfra = world.define("urn:perun:user:attribute-def:def:login-namespace:einfra", ValueType::String);
		let cesnet = world.define("urn:perun:user:attribute-def:def:login-namespace:cesnet", ValueType::String);
		let mail = world.define("urn:perun:user:attribute-def:def:preferredMail", ValueType::String);
		for (def, value) in [(&einfra, "alice"), (&cesnet, "alice2"), (&mail, "alice@example.org")] {
			world.store.put(EntityContext::User { user }, def.id, value);
		}
		let oracle = RuleOracle::deny_all()
			.allow(Action::Read, einfra.id)
			.allow(Action::Read, mail.id);
		let (gateway, _) = world.gateway(oracle);

		let logins = gateway.get_logins(&session(), user).await.unwrap();

		let ids: Vec<_> = logins.iter().map(|v| v.attribute.id()).collect();
		assert_eq!(ids, vec![einfra.id]);
	}

	#[tokio::test]
	async fn unknown_user_has_no_logins() {
		let world = TestWorld::new();
		let (gateway, _) = world.gateway(RuleOracle::allow_all());

		let err = gateway
			.get_logins(&session(), attrgate_authz::UserId::generate())
			.await
			.unwrap_err();
		assert!(matches!(err, GatewayError::EntityNotFound(EntityRef::User(_))));
	}
}
