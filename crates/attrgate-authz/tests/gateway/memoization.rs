// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Derived entity lookups.
//!
//! Key invariant: within one operation a derived user or facility is looked
//! up at most once, however many attributes need it.

use attrgate_authz::testing::RuleOracle;
use attrgate_authz::{EntityContext, Scope, ServiceId, ValueType};

use super::support::{session, TestWorld};

#[tokio::test]
async fn user_is_derived_once_per_batch() {
	let world = TestWorld::new();
	let member = world.fixtures.member;
	let user = world.fixtures.user;
	for i in 0..5 {
		let def = world.define(&format!("urn:perun:user:attribute-def:def:attr{i}"), ValueType::String);
		world.store.put(EntityContext::User { user }, def.id, format!("value{i}"));
	}
	let (gateway, oracle) = world.gateway(RuleOracle::allow_all());

	let views = gateway
		.get_attributes(&session(), &Scope::member_with_user(member))
		.await
		.unwrap();

	assert_eq!(views.len(), 5);
	assert_eq!(world.directory.user_lookups(), 1);
	assert!(oracle.calls() >= 5);
}

#[tokio::test]
async fn no_lookup_when_nothing_needs_deriving() {
	let world = TestWorld::new();
	let member = world.fixtures.member;
	let def = world.define("urn:perun:member:attribute-def:def:status", ValueType::String);
	world.store.put(EntityContext::Member { member }, def.id, "VALID");
	let (gateway, _) = world.gateway(RuleOracle::allow_all());

	gateway
		.get_attributes(&session(), &Scope::member_with_user(member))
		.await
		.unwrap();
	assert_eq!(world.directory.user_lookups(), 0);
}

#[tokio::test]
async fn each_operation_derives_afresh() {
	let world = TestWorld::new();
	let member = world.fixtures.member;
	let user = world.fixtures.user;
	let def = world.define("urn:perun:user:attribute-def:def:preferredMail", ValueType::String);
	world.store.put(EntityContext::User { user }, def.id, "alice@example.org");
	let (gateway, _) = world.gateway(RuleOracle::allow_all());

	for _ in 0..3 {
		gateway
			.get_attributes(&session(), &Scope::member_with_user(member))
			.await
			.unwrap();
	}
	assert_eq!(world.directory.user_lookups(), 3);
}

#[tokio::test]
async fn multi_member_read_looks_up_facility_once() {
	let world = TestWorld::new();
	let resource = world.fixtures.resource;
	let facility = world.fixtures.facility;
	let service = ServiceId::generate();

	let member_status = world.define("urn:perun:member:attribute-def:def:status", ValueType::String);
	let user_mail = world.define("urn:perun:user:attribute-def:def:preferredMail", ValueType::String);
	let shell = world.define("urn:perun:user_facility:attribute-def:def:shell", ValueType::String);
	let quota = world.define("urn:perun:member_resource:attribute-def:def:dataQuota", ValueType::Integer);
	for def in [&member_status, &user_mail, &shell, &quota] {
		world.store.require(service, def.id);
	}

	let mut members = vec![(world.fixtures.member, world.fixtures.user)];
	members.push(world.add_member());
	members.push(world.add_member());
	for (member, user) in &members {
		world
			.store
			.put(EntityContext::UserFacility { user: *user, facility }, shell.id, "/bin/zsh");
		world
			.store
			.put(EntityContext::Member { member: *member }, member_status.id, "VALID");
	}

	let (gateway, _) = world.gateway(RuleOracle::allow_all());
	let ids: Vec<_> = members.iter().map(|(member, _)| *member).collect();
	let result = gateway
		.get_attributes_for_members(&session(), &[service], resource, &ids)
		.await
		.unwrap();

	assert_eq!(result.len(), 3);
	for ((member, views), expected) in result.iter().zip(&ids) {
		assert_eq!(member, expected);
		assert_eq!(views.len(), 4);
	}
	assert_eq!(world.directory.facility_lookups(), 1);
	assert_eq!(world.directory.user_lookups(), 3);
}
