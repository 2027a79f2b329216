// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Entityless attributes.
//!
//! Key invariant: every entityless operation requires the administrative
//! role, however permissive the per-attribute decisions are.

use attrgate_authz::testing::RuleOracle;
use attrgate_authz::{Attribute, AttributeValue, GatewayError, ValueType};

use super::support::{admin, session, TestWorld};

const NAMESPACE_UID: &str = "urn:perun:entityless:attribute-def:def:namespace-uid";

#[tokio::test]
async fn non_admin_is_refused_everywhere() {
	let world = TestWorld::new();
	let uid = world.define(NAMESPACE_UID, ValueType::Integer);
	world.store.put_entityless("einfra", uid.id, 1000_i64);
	let (gateway, _) = world.gateway(RuleOracle::allow_all().with_admin(false));
	let s = session();

	let results = vec![
		gateway.get_entityless_attributes_by_key(&s, "einfra").await.map(drop),
		gateway.get_entityless_attributes(&s, NAMESPACE_UID).await.map(drop),
		gateway.get_entityless_keys(&s, &uid).await.map(drop),
		gateway.get_attributes_by_definition(&s, &uid).await.map(drop),
		gateway.get_entityless_attribute(&s, "einfra", NAMESPACE_UID).await.map(drop),
		gateway
			.set_entityless_attribute(&s, "einfra", Attribute::new(uid.clone(), 2000_i64))
			.await,
		gateway.remove_entityless_attribute(&s, "einfra", &uid).await,
	];

	for result in results {
		assert!(matches!(result, Err(GatewayError::Privilege(_))), "{result:?}");
	}
	assert_eq!(world.store.writes(), 0);
	assert_eq!(world.store.entityless_value("einfra", uid.id), Some(AttributeValue::from(1000_i64)));
}

#[tokio::test]
async fn admin_reads_values_as_writable() {
	let world = TestWorld::new();
	let uid = world.define(NAMESPACE_UID, ValueType::Integer);
	world.store.put_entityless("einfra", uid.id, 1000_i64);
	world.store.put_entityless("cesnet", uid.id, 5000_i64);
	let (gateway, oracle) = world.gateway(RuleOracle::deny_all().with_admin(true));

	let view = gateway
		.get_entityless_attribute(&admin(), "einfra", NAMESPACE_UID)
		.await
		.unwrap();
	assert_eq!(view.attribute.value, AttributeValue::from(1000_i64));
	assert!(view.writable);

	let mut keys = gateway.get_entityless_keys(&admin(), &uid).await.unwrap();
	keys.sort();
	assert_eq!(keys, vec!["cesnet".to_string(), "einfra".to_string()]);

	let by_definition = gateway.get_attributes_by_definition(&admin(), &uid).await.unwrap();
	assert_eq!(by_definition.len(), 2);
	assert!(by_definition.iter().all(|(_, view)| view.writable));

	let by_key = gateway
		.get_entityless_attributes_by_key(&admin(), "cesnet")
		.await
		.unwrap();
	assert_eq!(by_key.len(), 1);

	assert_eq!(oracle.calls(), 0);
}

#[tokio::test]
async fn admin_sets_and_removes_values() {
	let world = TestWorld::new();
	let uid = world.define(NAMESPACE_UID, ValueType::Integer);
	let (gateway, _) = world.gateway(RuleOracle::allow_all());

	gateway
		.set_entityless_attribute(&admin(), "einfra", Attribute::new(uid.clone(), 1000_i64))
		.await
		.unwrap();
	assert_eq!(world.store.entityless_value("einfra", uid.id), Some(AttributeValue::from(1000_i64)));

	gateway
		.remove_entityless_attribute(&admin(), "einfra", &uid)
		.await
		.unwrap();
	assert_eq!(world.store.entityless_value("einfra", uid.id), None);
}

mod arguments {
	use super::*;

	#[tokio::test]
	async fn empty_key_is_invalid_argument() {
		let world = TestWorld::new();
		let (gateway, _) = world.gateway(RuleOracle::allow_all());

		let err = gateway
			.get_entityless_attributes_by_key(&admin(), "")
			.await
			.unwrap_err();
		assert!(matches!(err, GatewayError::InvalidArgument(_)));
	}

	#[tokio::test]
	async fn key_is_validated_before_role() {
		let world = TestWorld::new();
		let (gateway, oracle) = world.gateway(RuleOracle::deny_all());

		let err = gateway
			.get_entityless_attribute(&session(), "  ", NAMESPACE_UID)
			.await
			.unwrap_err();
		assert!(matches!(err, GatewayError::InvalidArgument(_)));
		assert_eq!(oracle.role_calls(), 0);
	}

	#[tokio::test]
	async fn overlong_key_is_invalid_argument() {
		let world = TestWorld::new();
		let uid = world.define(NAMESPACE_UID, ValueType::Integer);
		let (gateway, _) = world.gateway(RuleOracle::allow_all());
		let key = "k".repeat(gateway.config().max_entityless_key_len + 1);

		let err = gateway
			.set_entityless_attribute(&admin(), &key, Attribute::new(uid, 1_i64))
			.await
			.unwrap_err();
		assert!(matches!(err, GatewayError::InvalidArgument(_)));
		assert_eq!(world.store.writes(), 0);
	}

	#[tokio::test]
	async fn non_entityless_attribute_is_wrong_assignment() {
		let world = TestWorld::new();
		let mail = world.define("urn:perun:user:attribute-def:def:preferredMail", ValueType::String);
		let (gateway, _) = world.gateway(RuleOracle::allow_all());

		let err = gateway
			.set_entityless_attribute(&admin(), "einfra", Attribute::new(mail.clone(), "x"))
			.await
			.unwrap_err();
		assert!(matches!(err, GatewayError::WrongAttributeAssignment(_)));

		let err = gateway
			.get_entityless_attributes(&admin(), &mail.name())
			.await
			.unwrap_err();
		assert!(matches!(err, GatewayError::WrongAttributeAssignment(_)));
	}
}
