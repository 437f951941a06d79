// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Category-partitioned dataset storage.
//!
//! A dataset resource is an opaque byte sequence identified by
//! `(category, name)`, stored as one file per resource under one directory
//! per category. Two backends implement the same [`DatasetStore`] contract:
//! [`FsStore`] over a real directory tree, and [`MemStore`] for exercising
//! the contract in unit tests without touching a filesystem.
//!
//! The store does not parse resource content; workbooks are blobs here.
//! Writes are not atomic against concurrent readers of the same resource;
//! the filesystem is the only synchronization point (accepted weak
//! consistency for a low-concurrency internal store).

pub mod fs;
pub mod mem;

pub use fs::FsStore;
pub use mem::MemStore;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// The recognized spreadsheet extension. Resource names must carry it.
pub const SPREADSHEET_EXT: &str = ".xlsx";

/// Storage failure taxonomy.
#[derive(Debug, Error)]
pub enum StoreError {
	/// The category has no backing directory yet. Not necessarily an error
	/// to the caller: LIST reports this as an empty listing.
	#[error("category directory missing: {category}")]
	CategoryDirectoryMissing { category: String },

	#[error("resource not found: {category}/{name}")]
	ResourceNotFound { category: String, name: String },

	/// The caller-supplied name failed path-safety validation.
	#[error("invalid resource name: {0}")]
	InvalidResourceName(String),

	#[error("IO error: {0}")]
	Io(String),
}

impl From<std::io::Error> for StoreError {
	fn from(err: std::io::Error) -> Self {
		StoreError::Io(err.to_string())
	}
}

/// Validates a caller-supplied resource name before it is joined into a
/// filesystem path.
///
/// Names come verbatim from uploads, so anything that could escape the
/// category directory is rejected: separators, traversal segments, absolute
/// prefixes, drive-qualified paths. The name must also be non-empty and end
/// in [`SPREADSHEET_EXT`].
pub fn validate_resource_name(name: &str) -> Result<(), StoreError> {
	if name.is_empty() {
		return Err(StoreError::InvalidResourceName(
			"name is empty".to_string(),
		));
	}
	if name.contains('/') || name.contains('\\') {
		return Err(StoreError::InvalidResourceName(format!(
			"{name:?} contains a path separator"
		)));
	}
	if name.contains(':') {
		return Err(StoreError::InvalidResourceName(format!(
			"{name:?} contains a drive qualifier"
		)));
	}
	if name == "." || name == ".." || name.split('.').all(str::is_empty) {
		return Err(StoreError::InvalidResourceName(format!(
			"{name:?} is a traversal segment"
		)));
	}
	if name.contains('\0') {
		return Err(StoreError::InvalidResourceName(
			"name contains a NUL byte".to_string(),
		));
	}
	if !name.ends_with(SPREADSHEET_EXT) || name.len() == SPREADSHEET_EXT.len() {
		return Err(StoreError::InvalidResourceName(format!(
			"{name:?} is not a {SPREADSHEET_EXT} workbook name"
		)));
	}
	Ok(())
}

/// Contract shared by all storage backends. Every operation is rooted at
/// `base/category/`; category keys are validated against the catalog by
/// callers before they get here.
#[async_trait]
pub trait DatasetStore: Send + Sync {
	/// Lists resource names in a category, sorted. Fails with
	/// [`StoreError::CategoryDirectoryMissing`] when the category has never
	/// been written to.
	async fn list(&self, category: &str) -> Result<Vec<String>, StoreError>;

	/// Reads a resource's content.
	async fn read(&self, category: &str, name: &str) -> Result<Bytes, StoreError>;

	/// Writes a resource, creating the category directory if absent and
	/// silently overwriting an existing resource of the same name.
	async fn write(&self, category: &str, name: &str, content: Bytes) -> Result<(), StoreError>;

	/// Removes a resource.
	async fn delete(&self, category: &str, name: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn valid_names_pass() {
		for name in ["Q1.xlsx", "births 2024.xlsx", "a.b.xlsx"] {
			assert!(validate_resource_name(name).is_ok(), "{name}");
		}
	}

	#[test]
	fn traversal_and_separator_names_are_rejected() {
		for name in [
			"../etc/passwd.xlsx",
			"..",
			".",
			"a/b.xlsx",
			"a\\b.xlsx",
			"/etc/passwd.xlsx",
			"C:evil.xlsx",
		] {
			assert!(
				matches!(
					validate_resource_name(name),
					Err(StoreError::InvalidResourceName(_))
				),
				"{name} should be rejected"
			);
		}
	}

	#[test]
	fn empty_and_extension_only_names_are_rejected() {
		for name in ["", ".xlsx", "report.csv", "report", "report.XLSX"] {
			assert!(validate_resource_name(name).is_err(), "{name}");
		}
	}
}
