// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Dataset service: combines the command parser, access control, and the
//! storage backend into authorized list/fetch/store/remove operations.
//!
//! Validation order is fixed: command syntax, then category validity, then
//! address shape for the action, then authorization, then storage. A caller
//! therefore never learns whether a resource exists before passing the
//! authorization checks.

use std::sync::Arc;

use bytes::Bytes;
use tracing::instrument;

use abacus_common_command::{CommandAddress, MalformedCommand};
use abacus_server_auth::{AccessControl, AccessError, Action, Principal};
use abacus_server_store::{DatasetStore, StoreError};

/// The result of a successfully dispatched command.
#[derive(Debug)]
pub enum Outcome {
	/// Resource names within a category, sorted.
	Listing(Vec<String>),
	/// The bytes of one resource.
	Content { name: String, bytes: Bytes },
	/// A resource was stored (created or overwritten).
	Stored { category: String, name: String },
	/// A resource was removed.
	Removed { category: String, name: String },
}

/// Everything that can go wrong between a raw command path and a storage
/// outcome. Each variant maps to one protocol-level response.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
	#[error(transparent)]
	Malformed(#[from] MalformedCommand),

	#[error("unknown category '{0}'")]
	UnknownCategory(String),

	/// Uploads are category-scoped; the stored name comes from the payload,
	/// never from a three-part address.
	#[error("uploads must address a category, not a resource")]
	ResourceAddressedUpload,

	#[error("{action} requires a resource name")]
	ResourceRequired { action: Action },

	#[error(transparent)]
	Denied(#[from] AccessError),

	#[error(transparent)]
	Store(#[from] StoreError),
}

/// An upload payload: the resource name carried by the content itself, plus
/// its bytes.
#[derive(Debug, Clone)]
pub struct Upload {
	pub name: String,
	pub bytes: Bytes,
}

/// Stateless request-scoped dataset service. The tables it holds are
/// read-only after startup; the filesystem is the only shared mutable
/// resource, and concurrent access to the same resource is not serialized.
#[derive(Clone)]
pub struct DatasetService {
	access: Arc<AccessControl>,
	store: Arc<dyn DatasetStore>,
}

impl DatasetService {
	pub fn new(access: Arc<AccessControl>, store: Arc<dyn DatasetStore>) -> Self {
		Self { access, store }
	}

	pub fn access(&self) -> &AccessControl {
		&self.access
	}

	/// Parse a command path and perform the addressed operation.
	#[instrument(skip(self, payload), fields(user = %principal.username, %action, path))]
	pub async fn dispatch(
		&self,
		principal: &Principal,
		action: Action,
		path: &str,
		payload: Option<Upload>,
	) -> Result<Outcome, ServiceError> {
		let address = abacus_common_command::parse(path)?;

		let category = address.category();
		if !abacus_common_catalog::is_valid(category) {
			return Err(ServiceError::UnknownCategory(category.to_string()));
		}

		match (action, &address) {
			(Action::Write, CommandAddress::Resource { .. }) => {
				return Err(ServiceError::ResourceAddressedUpload);
			}
			(Action::Delete, CommandAddress::Category { .. }) => {
				return Err(ServiceError::ResourceRequired { action });
			}
			_ => {}
		}

		self.access.authorize(principal, action, category)?;

		match (action, address) {
			(Action::Read, CommandAddress::Category { category }) => {
				let names = match self.store.list(&category).await {
					Ok(names) => names,
					// A category that has never been written to is empty,
					// not an error.
					Err(StoreError::CategoryDirectoryMissing { .. }) => Vec::new(),
					Err(e) => return Err(e.into()),
				};
				Ok(Outcome::Listing(names))
			}
			(Action::Read, CommandAddress::Resource { category, name }) => {
				let bytes = self.store.read(&category, &name).await?;
				Ok(Outcome::Content { name, bytes })
			}
			(Action::Write, CommandAddress::Category { category }) => {
				let upload = payload.ok_or(ServiceError::ResourceRequired { action })?;
				self.store
					.write(&category, &upload.name, upload.bytes)
					.await?;
				Ok(Outcome::Stored {
					category,
					name: upload.name,
				})
			}
			(Action::Delete, CommandAddress::Resource { category, name }) => {
				self.store.delete(&category, &name).await?;
				Ok(Outcome::Removed { category, name })
			}
			// Shape mismatches were rejected above.
			(Action::Write, CommandAddress::Resource { .. })
			| (Action::Delete, CommandAddress::Category { .. }) => unreachable!(),
		}
	}
}
