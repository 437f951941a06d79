// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration errors.

use std::path::PathBuf;

/// Errors raised while loading or finalizing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read config file {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config file {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },

	#[error("organization '{organization}' grants unknown category '{category}'")]
	UnknownCategory {
		organization: String,
		category: String,
	},

	#[error("user '{username}' references unknown organization '{organization}'")]
	UnknownOrganization {
		username: String,
		organization: String,
	},

	#[error("user '{username}' has unrecognized role: {source}")]
	InvalidRole {
		username: String,
		#[source]
		source: abacus_server_auth::RoleParseError,
	},
}
