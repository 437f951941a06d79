// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User directory configuration.
//!
//! Users carry Argon2 password hashes, never plaintext. Use the server's
//! `hash-password` subcommand to produce entries.

use abacus_server_auth::Role;
use serde::Deserialize;

use crate::error::ConfigError;

/// A configured user (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct UserConfig {
	pub username: String,
	pub password_hash: String,
	pub role: Role,
	pub organization: String,
}

/// Auth configuration (runtime, fully resolved).
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
	pub users: Vec<UserConfig>,
}

/// A declared user entry, before role parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct UserSpec {
	pub username: String,
	pub password_hash: String,
	pub role: String,
	pub organization: String,
}

/// Auth configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub users: Option<Vec<UserSpec>>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		// The user list replaces wholesale, same as the organization table.
		if other.users.is_some() {
			self.users = other.users;
		}
	}

	pub fn finalize(self) -> Result<AuthConfig, ConfigError> {
		let mut users = Vec::new();
		for spec in self.users.unwrap_or_default() {
			let role: Role = spec.role.parse().map_err(|source| ConfigError::InvalidRole {
				username: spec.username.clone(),
				source,
			})?;
			users.push(UserConfig {
				username: spec.username,
				password_hash: spec.password_hash,
				role,
				organization: spec.organization,
			});
		}
		Ok(AuthConfig { users })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_is_empty() {
		let config = AuthConfigLayer::default().finalize().unwrap();
		assert!(config.users.is_empty());
	}

	#[test]
	fn test_role_is_parsed() {
		let layer: AuthConfigLayer = toml::from_str(
			r#"
			[[users]]
			username = "ichrakstats"
			password_hash = "$argon2id$stub"
			role = "Manager"
			organization = "rak statistics"
			"#,
		)
		.unwrap();
		let config = layer.finalize().unwrap();
		assert_eq!(config.users.len(), 1);
		assert_eq!(config.users[0].role, Role::Manager);
	}

	#[test]
	fn test_unknown_role_is_rejected() {
		let layer: AuthConfigLayer = toml::from_str(
			r#"
			[[users]]
			username = "eve"
			password_hash = "$argon2id$stub"
			role = "Administrator"
			organization = "aurak"
			"#,
		)
		.unwrap();
		let err = layer.finalize().unwrap_err();
		assert!(matches!(err, ConfigError::InvalidRole { .. }));
	}
}
