// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Batch filtering and annotation.
//!
//! A batch moves through `PendingBatch -> ClassifiedBatch -> AuthorizedBatch`
//! and is finalized into the views handed back to the caller. Which transition
//! is taken out of [`ClassifiedBatch`] decides the policy:
//!
//! - [`ClassifiedBatch::filter_readable`]: drop what the session may not read,
//!   annotate the rest with a fresh WRITE decision
//! - [`ClassifiedBatch::filter_writable`]: drop what the session may not write,
//!   the rest is writable
//! - [`ClassifiedBatch::require`]: every attribute must pass, otherwise the
//!   whole batch is rejected and nothing reaches the store

use attrgate_core::{Action, Attribute, AttributeView, EntityContext};
use tracing::debug;

use crate::dispatch::{Dispatcher, Origin};
use crate::error::Result;

/// An attribute the session was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
	pub action: Action,
	pub attribute: String,
	pub context: EntityContext,
}

/// Attributes not yet mapped to entity contexts.
#[derive(Debug)]
pub struct PendingBatch {
	attributes: Vec<Attribute>,
	origin: Origin,
}

impl PendingBatch {
	/// A batch read back from the store.
	pub fn stored(attributes: Vec<Attribute>) -> Self {
		Self {
			attributes,
			origin: Origin::Stored,
		}
	}

	/// A batch handed in by the caller.
	pub fn supplied(attributes: Vec<Attribute>) -> Self {
		Self {
			attributes,
			origin: Origin::Supplied,
		}
	}

	pub fn len(&self) -> usize {
		self.attributes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.attributes.is_empty()
	}

	/// Resolves the entity context of every attribute. Any namespace the scope
	/// does not accept fails the whole batch.
	pub async fn classify(self, dispatcher: &mut Dispatcher<'_>) -> Result<ClassifiedBatch> {
		let mut entries = Vec::with_capacity(self.attributes.len());
		for attribute in self.attributes {
			let context = dispatcher.classify(&attribute.definition, self.origin).await?;
			entries.push((attribute, context));
		}
		Ok(ClassifiedBatch { entries })
	}
}

/// Attributes paired with the context they are authorized against.
#[derive(Debug)]
pub struct ClassifiedBatch {
	entries: Vec<(Attribute, EntityContext)>,
}

impl ClassifiedBatch {
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn contexts(&self) -> impl Iterator<Item = &EntityContext> {
		self.entries.iter().map(|(_, context)| context)
	}

	/// Lenient read: unreadable attributes are dropped silently.
	pub fn filter_readable(self, dispatcher: &Dispatcher<'_>) -> AuthorizedBatch {
		let total = self.entries.len();
		let views: Vec<AttributeView> = self
			.entries
			.into_iter()
			.filter(|(attribute, context)| dispatcher.decide(Action::Read, &attribute.definition, context))
			.map(|(attribute, context)| {
				let writable = dispatcher.decide(Action::Write, &attribute.definition, &context);
				AttributeView::new(attribute, writable)
			})
			.collect();
		debug!(total, returned = views.len(), "filtered batch on read");
		AuthorizedBatch { views }
	}

	/// Lenient write: attributes the session may not write are dropped, the
	/// rest are marked writable.
	pub fn filter_writable(self, dispatcher: &Dispatcher<'_>) -> AuthorizedBatch {
		let total = self.entries.len();
		let views: Vec<AttributeView> = self
			.entries
			.into_iter()
			.filter(|(attribute, context)| dispatcher.decide(Action::Write, &attribute.definition, context))
			.map(|(attribute, _)| AttributeView::new(attribute, true))
			.collect();
		debug!(total, returned = views.len(), "filtered batch on write");
		AuthorizedBatch { views }
	}

	/// Strict: the first attribute failing `action` rejects the batch.
	///
	/// Passing a READ requirement still annotates each view with its WRITE
	/// decision; a passed WRITE requirement makes every view writable.
	pub fn require(self, action: Action, dispatcher: &Dispatcher<'_>) -> std::result::Result<AuthorizedBatch, Denial> {
		let mut views = Vec::with_capacity(self.entries.len());
		for (attribute, context) in self.entries {
			if !dispatcher.decide(action, &attribute.definition, &context) {
				return Err(Denial {
					action,
					attribute: attribute.definition.name(),
					context,
				});
			}
			let writable = match action {
				Action::Write => true,
				Action::Read => dispatcher.decide(Action::Write, &attribute.definition, &context),
			};
			views.push(AttributeView::new(attribute, writable));
		}
		Ok(AuthorizedBatch { views })
	}
}

/// Attributes the session is allowed to receive or write.
#[derive(Debug)]
pub struct AuthorizedBatch {
	views: Vec<AttributeView>,
}

impl AuthorizedBatch {
	pub fn len(&self) -> usize {
		self.views.len()
	}

	pub fn is_empty(&self) -> bool {
		self.views.is_empty()
	}

	/// The annotated views returned to the caller.
	pub fn finalize(self) -> Vec<AttributeView> {
		self.views
	}

	/// The bare attributes, for handing an authorized write to the store.
	pub fn into_attributes(self) -> Vec<Attribute> {
		self.views.into_iter().map(AttributeView::into_attribute).collect()
	}
}
