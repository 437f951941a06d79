// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Dataset storage configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Maximum accepted upload body, matching the historical 16 MiB cap.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Storage configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct StorageConfig {
	pub base_dir: PathBuf,
	pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
	fn default() -> Self {
		Self {
			base_dir: PathBuf::from("datasets"),
			max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
		}
	}
}

/// Storage configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfigLayer {
	#[serde(default)]
	pub base_dir: Option<PathBuf>,
	#[serde(default)]
	pub max_upload_bytes: Option<usize>,
}

impl StorageConfigLayer {
	pub fn merge(&mut self, other: StorageConfigLayer) {
		if other.base_dir.is_some() {
			self.base_dir = other.base_dir;
		}
		if other.max_upload_bytes.is_some() {
			self.max_upload_bytes = other.max_upload_bytes;
		}
	}

	pub fn finalize(self) -> StorageConfig {
		let defaults = StorageConfig::default();
		StorageConfig {
			base_dir: self.base_dir.unwrap_or(defaults.base_dir),
			max_upload_bytes: self.max_upload_bytes.unwrap_or(defaults.max_upload_bytes),
		}
	}
}
