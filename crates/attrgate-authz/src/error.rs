// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the attribute gateway and its collaborators.

use attrgate_core::{EntityRef, FacilityId, GroupId, MemberId, ResourceId};
use thiserror::Error;

/// Failures reported by an [`AttributeStore`](crate::AttributeStore).
#[derive(Debug, Error)]
pub enum StoreError {
	#[error("attribute definition not found: {0}")]
	DefinitionNotFound(String),

	#[error("attribute definition already exists: {0}")]
	DefinitionExists(String),

	#[error("attribute definition {0} still has values")]
	DefinitionInUse(String),

	#[error("invalid value for {name}: {message}")]
	InvalidValue { name: String, message: String },

	#[error("store backend error: {0}")]
	Backend(String),
}

/// Failures reported by an [`EntityDirectory`](crate::EntityDirectory).
#[derive(Debug, Error)]
pub enum DirectoryError {
	#[error("entity not found: {0}")]
	NotFound(EntityRef),

	#[error("directory backend error: {0}")]
	Backend(String),
}

/// Errors returned by gateway operations.
///
/// A denied READ on a batch is never an error: the attribute is left out of
/// the result.
#[derive(Debug, Error)]
pub enum GatewayError {
	/// The session may not perform the operation.
	#[error("insufficient privileges: {0}")]
	Privilege(String),

	#[error("resource {resource} is not on facility {facility}")]
	FacilityResourceMismatch { facility: FacilityId, resource: ResourceId },

	#[error("group {group} and resource {resource} belong to different VOs")]
	GroupResourceMismatch { group: GroupId, resource: ResourceId },

	#[error("member {member} and group {group} belong to different VOs")]
	MemberGroupMismatch { member: MemberId, group: GroupId },

	#[error("member {member} and resource {resource} belong to different VOs")]
	MemberResourceMismatch { member: MemberId, resource: ResourceId },

	#[error("entity not found: {0}")]
	EntityNotFound(EntityRef),

	/// Stored data did not fit the operation. Never reported as a denial.
	#[error("internal consistency error: {0}")]
	Consistency(String),

	/// A caller-supplied attribute belongs to a namespace the operation does
	/// not accept.
	#[error("wrong attribute assignment: {0}")]
	WrongAttributeAssignment(String),

	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	#[error(transparent)]
	Store(#[from] StoreError),

	#[error(transparent)]
	Directory(DirectoryError),
}

impl GatewayError {
	/// True for faults of the gateway or its backends rather than the caller.
	pub fn is_internal(&self) -> bool {
		matches!(
			self,
			GatewayError::Consistency(_)
				| GatewayError::Store(StoreError::Backend(_))
				| GatewayError::Directory(_)
		)
	}
}

impl From<DirectoryError> for GatewayError {
	fn from(err: DirectoryError) -> Self {
		match err {
			DirectoryError::NotFound(entity) => GatewayError::EntityNotFound(entity),
			other => GatewayError::Directory(other),
		}
	}
}

pub type Result<T> = std::result::Result<T, GatewayError>;
