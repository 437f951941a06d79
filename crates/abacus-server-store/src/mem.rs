// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory dataset store for tests and local experimentation.

use crate::{validate_resource_name, DatasetStore, StoreError};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

/// Dataset store backed by a map. A category exists once something has been
/// written into it, mirroring how a directory appears on first write.
#[derive(Debug, Default)]
pub struct MemStore {
	// Lock is never held across an await point.
	categories: RwLock<HashMap<String, BTreeMap<String, Bytes>>>,
}

impl MemStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl DatasetStore for MemStore {
	async fn list(&self, category: &str) -> Result<Vec<String>, StoreError> {
		let categories = self.categories.read().unwrap();
		match categories.get(category) {
			Some(resources) => Ok(resources.keys().cloned().collect()),
			None => Err(StoreError::CategoryDirectoryMissing {
				category: category.to_string(),
			}),
		}
	}

	async fn read(&self, category: &str, name: &str) -> Result<Bytes, StoreError> {
		validate_resource_name(name)?;
		let categories = self.categories.read().unwrap();
		categories
			.get(category)
			.and_then(|resources| resources.get(name))
			.cloned()
			.ok_or_else(|| StoreError::ResourceNotFound {
				category: category.to_string(),
				name: name.to_string(),
			})
	}

	async fn write(&self, category: &str, name: &str, content: Bytes) -> Result<(), StoreError> {
		validate_resource_name(name)?;
		let mut categories = self.categories.write().unwrap();
		categories
			.entry(category.to_string())
			.or_default()
			.insert(name.to_string(), content);
		Ok(())
	}

	async fn delete(&self, category: &str, name: &str) -> Result<(), StoreError> {
		validate_resource_name(name)?;
		let mut categories = self.categories.write().unwrap();
		let removed = categories
			.get_mut(category)
			.and_then(|resources| resources.remove(name));
		match removed {
			Some(_) => Ok(()),
			None => Err(StoreError::ResourceNotFound {
				category: category.to_string(),
				name: name.to_string(),
			}),
		}
	}
}
