// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization gateway for typed entity attributes.
//!
//! This crate sits between callers and an attribute store, deciding for every
//! attribute whether the calling session may read or write it.
//!
//! # Architecture
//!
//! - `scope` - Entity combinations an operation is invoked with
//! - `resolver` - Per-operation entity derivation with memoized lookups
//! - `relationship` - Cross-entity VO checks run before any decision
//! - `dispatch` - Namespace to entity context mapping and oracle calls
//! - `batch` - Lenient read filtering and all-or-nothing write checks
//! - `gateway` - The public operations
//! - `testing` - In-memory store, directory and oracle
//!
//! # Example
//!
//! ```ignore
//! use attrgate_authz::{AttributeGateway, Scope};
//!
//! let gateway = AttributeGateway::new(store, directory, oracle, config.gateway)?;
//!
//! // Only the attributes the session may read come back
//! let views = gateway.get_attributes(&session, &Scope::member(member)).await?;
//!
//! // Nothing is stored unless every attribute may be written
//! gateway.set_attributes(&session, &Scope::member(member), attributes).await?;
//! ```

pub mod audit;
pub mod batch;
pub mod collaborators;
pub mod definitions;
pub mod dispatch;
pub mod error;
pub mod gateway;
pub mod relationship;
pub mod resolver;
pub mod scope;
pub mod testing;
pub mod validation;

pub use audit::{AuditEventType, AuditRecord, AuditRecordBuilder};
pub use batch::{AuthorizedBatch, ClassifiedBatch, Denial, PendingBatch};
pub use collaborators::{AttributeStore, AuthorizationOracle, DirectoryResult, EntityDirectory, StoreResult};
pub use dispatch::{Dispatcher, Origin};
pub use error::{DirectoryError, GatewayError, Result, StoreError};
pub use gateway::{AttributeGateway, LOGIN_NAMESPACE_PREFIX};
pub use resolver::{DerivationKey, DerivedCache, EntityResolver};
pub use scope::{Relationship, Scope};

// Re-export core types for convenience
pub use attrgate_core::*;
