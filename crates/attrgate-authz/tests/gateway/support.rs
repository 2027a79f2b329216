// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use attrgate_authz::testing::{MemoryDirectory, MemoryStore, RuleOracle};
use attrgate_authz::{
	AttributeDefinition, AttributeGateway, AttributeId, FacilityId, GroupId, MemberId, ResourceId,
	Session, UserId, ValueType, VoId,
};
use attrgate_config::GatewayConfig;

/// Entities seeded into every test world.
///
/// `vo` holds the member, group and resource; `other_vo` holds the foreign
/// group and resource used for relationship checks.
#[derive(Debug, Clone, Copy)]
pub struct Fixtures {
	pub vo: VoId,
	pub other_vo: VoId,
	pub user: UserId,
	pub member: MemberId,
	pub group: GroupId,
	pub foreign_group: GroupId,
	pub facility: FacilityId,
	pub resource: ResourceId,
	pub foreign_resource: ResourceId,
}

pub struct TestWorld {
	pub directory: Arc<MemoryDirectory>,
	pub store: Arc<MemoryStore>,
	pub fixtures: Fixtures,
}

impl TestWorld {
	pub fn new() -> Self {
		let directory = Arc::new(MemoryDirectory::new());
		let fixtures = Fixtures {
			vo: VoId::generate(),
			other_vo: VoId::generate(),
			user: UserId::generate(),
			member: MemberId::generate(),
			group: GroupId::generate(),
			foreign_group: GroupId::generate(),
			facility: FacilityId::generate(),
			resource: ResourceId::generate(),
			foreign_resource: ResourceId::generate(),
		};

		directory.add_vo(fixtures.vo);
		directory.add_vo(fixtures.other_vo);
		directory.add_user(fixtures.user);
		directory.add_member(fixtures.member, fixtures.vo, fixtures.user);
		directory.add_group(fixtures.group, fixtures.vo);
		directory.add_group(fixtures.foreign_group, fixtures.other_vo);
		directory.add_facility(fixtures.facility);
		directory.add_resource(fixtures.resource, fixtures.vo, fixtures.facility);
		directory.add_resource(fixtures.foreign_resource, fixtures.other_vo, fixtures.facility);

		let store = Arc::new(MemoryStore::new(directory.clone()));
		Self {
			directory,
			store,
			fixtures,
		}
	}

	/// Adds another member of `vo` with a user of its own.
	pub fn add_member(&self) -> (MemberId, UserId) {
		let member = MemberId::generate();
		let user = UserId::generate();
		self.directory.add_user(user);
		self.directory.add_member(member, self.fixtures.vo, user);
		(member, user)
	}

	pub fn define(&self, name: &str, value_type: ValueType) -> AttributeDefinition {
		let definition = AttributeDefinition::parse(AttributeId::generate(), name, value_type).unwrap();
		self.store.define(definition)
	}

	pub fn gateway(&self, oracle: RuleOracle) -> (AttributeGateway, Arc<RuleOracle>) {
		self.gateway_with_config(oracle, GatewayConfig::default())
	}

	pub fn gateway_with_config(&self, oracle: RuleOracle, config: GatewayConfig) -> (AttributeGateway, Arc<RuleOracle>) {
		let oracle = Arc::new(oracle);
		let gateway = AttributeGateway::new(self.store.clone(), self.directory.clone(), oracle.clone(), config).unwrap();
		(gateway, oracle)
	}
}

pub fn session() -> Session {
	Session::new("alice")
}

pub fn admin() -> Session {
	Session::new("perun")
}
