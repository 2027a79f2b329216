// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Consistency checks for entity pairs: same VO, or resource on facility.

use tracing::{instrument, warn};

use crate::collaborators::EntityDirectory;
use crate::error::{GatewayError, Result};
use crate::scope::{Relationship, Scope};

/// Verifies every relationship the scope implies.
///
/// Runs once per operation, before any authorization decision. The first
/// violated relationship fails the whole operation.
#[instrument(level = "debug", skip(directory, scope), fields(scope = scope.label()))]
pub async fn validate<D: EntityDirectory + ?Sized>(directory: &D, scope: &Scope) -> Result<()> {
	for relationship in scope.relationships() {
		check(directory, relationship).await?;
	}
	Ok(())
}

async fn check<D: EntityDirectory + ?Sized>(directory: &D, relationship: Relationship) -> Result<()> {
	let (left, right, mismatch) = match relationship {
		Relationship::FacilityResource(facility, resource) => {
			let host = directory.facility_of_resource(resource).await?;
			if host != facility {
				warn!(?relationship, actual = %host, "resource is on another facility");
				return Err(GatewayError::FacilityResourceMismatch { facility, resource });
			}
			return Ok(());
		}
		Relationship::GroupResource(group, resource) => (
			directory.vo_of_group(group).await?,
			directory.vo_of_resource(resource).await?,
			GatewayError::GroupResourceMismatch { group, resource },
		),
		Relationship::MemberGroup(member, group) => (
			directory.vo_of_member(member).await?,
			directory.vo_of_group(group).await?,
			GatewayError::MemberGroupMismatch { member, group },
		),
		Relationship::MemberResource(member, resource) => (
			directory.vo_of_member(member).await?,
			directory.vo_of_resource(resource).await?,
			GatewayError::MemberResourceMismatch { member, resource },
		),
	};

	if left != right {
		warn!(?relationship, left_vo = %left, right_vo = %right, "entities belong to different VOs");
		return Err(mismatch);
	}
	Ok(())
}
