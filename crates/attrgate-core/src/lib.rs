// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared vocabulary of the attribute-access gateway.
//!
//! This crate provides:
//! - Typed entity identifiers and references
//! - The closed namespace taxonomy and attribute-name parsing
//! - Attribute definitions, values and the caller-facing [`AttributeView`]
//! - Entity contexts an attribute is authorized against

pub mod attribute;
pub mod context;
pub mod error;
pub mod namespace;
pub mod types;

pub use attribute::{Attribute, AttributeDefinition, AttributeRights, AttributeValue, AttributeView, DefinitionView, ValueType};
pub use context::{EntityContext, KnownEntities};
pub use error::NamespaceError;
pub use namespace::{AttributeKind, AttributeName, Namespace};
pub use types::*;
