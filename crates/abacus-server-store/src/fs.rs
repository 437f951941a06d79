// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Filesystem-backed dataset store.

use crate::{validate_resource_name, DatasetStore, StoreError};
use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Dataset store rooted at a base directory, one subdirectory per category.
///
/// Directory presence is the category's existence signal; there are no
/// sidecar metadata files.
#[derive(Debug, Clone)]
pub struct FsStore {
	base_dir: PathBuf,
}

impl FsStore {
	pub fn new(base_dir: impl Into<PathBuf>) -> Self {
		Self {
			base_dir: base_dir.into(),
		}
	}

	pub fn base_dir(&self) -> &Path {
		&self.base_dir
	}

	fn category_dir(&self, category: &str) -> PathBuf {
		self.base_dir.join(category)
	}

	/// Joins `category/name` under the base directory. Name validation runs
	/// first so the join can never escape the category directory.
	fn resource_path(&self, category: &str, name: &str) -> Result<PathBuf, StoreError> {
		validate_resource_name(name)?;
		Ok(self.category_dir(category).join(name))
	}
}

#[async_trait]
impl DatasetStore for FsStore {
	async fn list(&self, category: &str) -> Result<Vec<String>, StoreError> {
		let dir = self.category_dir(category);
		let mut entries = match fs::read_dir(&dir).await {
			Ok(entries) => entries,
			Err(e) if e.kind() == ErrorKind::NotFound => {
				return Err(StoreError::CategoryDirectoryMissing {
					category: category.to_string(),
				});
			}
			Err(e) => return Err(e.into()),
		};

		let mut names = Vec::new();
		while let Some(entry) = entries.next_entry().await? {
			if !entry.file_type().await?.is_file() {
				continue;
			}
			let name = entry.file_name().to_string_lossy().into_owned();
			// Only well-formed workbook names are part of the listing;
			// stray files in the directory are ignored.
			if validate_resource_name(&name).is_ok() {
				names.push(name);
			}
		}
		names.sort_unstable();
		Ok(names)
	}

	async fn read(&self, category: &str, name: &str) -> Result<Bytes, StoreError> {
		let path = self.resource_path(category, name)?;
		match fs::read(&path).await {
			Ok(content) => Ok(Bytes::from(content)),
			Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::ResourceNotFound {
				category: category.to_string(),
				name: name.to_string(),
			}),
			Err(e) => Err(e.into()),
		}
	}

	async fn write(&self, category: &str, name: &str, content: Bytes) -> Result<(), StoreError> {
		let path = self.resource_path(category, name)?;
		fs::create_dir_all(self.category_dir(category)).await?;
		fs::write(&path, &content).await?;
		tracing::debug!(%category, %name, bytes = content.len(), "wrote resource");
		Ok(())
	}

	async fn delete(&self, category: &str, name: &str) -> Result<(), StoreError> {
		let path = self.resource_path(category, name)?;
		match fs::remove_file(&path).await {
			Ok(()) => {
				tracing::debug!(%category, %name, "deleted resource");
				Ok(())
			}
			Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::ResourceNotFound {
				category: category.to_string(),
				name: name.to_string(),
			}),
			Err(e) => Err(e.into()),
		}
	}
}
