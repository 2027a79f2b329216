// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for attribute names and definitions.

use thiserror::Error;

/// Errors raised while parsing attribute names or building definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamespaceError {
	/// Name is not a `urn:perun:<ns>:attribute-def:<kind>:<name>` URN
	#[error("malformed attribute name: {0}")]
	Malformed(String),

	/// Namespace segment outside the taxonomy
	#[error("unknown attribute namespace: {0}")]
	Unknown(String),

	/// Storage kind other than def, opt, core or virt
	#[error("unknown attribute kind: {0}")]
	UnknownKind(String),
}

pub type Result<T> = std::result::Result<T, NamespaceError>;
