// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User directory: the verification table behind HTTP Basic authentication.
//!
//! The directory is built once from configuration and never mutated. It maps
//! usernames to argon2 password hashes plus the (role, organization) pair a
//! successful login resolves to. Identity lifecycle (creating users, rotating
//! passwords) is an operational concern handled outside the service.

use crate::types::{Principal, Role};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString};
use argon2::{Argon2, PasswordVerifier};
use std::collections::HashMap;

/// One configured user.
#[derive(Debug, Clone)]
pub struct UserRecord {
	/// PHC-format argon2 hash of the user's password.
	pub password_hash: String,
	pub role: Role,
	pub organization: String,
}

/// Immutable username → record map.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
	users: HashMap<String, UserRecord>,
}

impl UserDirectory {
	pub fn new(users: impl IntoIterator<Item = (String, UserRecord)>) -> Self {
		Self {
			users: users.into_iter().collect(),
		}
	}

	/// Number of configured users.
	pub fn len(&self) -> usize {
		self.users.len()
	}

	pub fn is_empty(&self) -> bool {
		self.users.is_empty()
	}

	/// Verifies a username/password pair, resolving to a [`Principal`] on
	/// success. Unknown users and bad passwords are indistinguishable to the
	/// caller; both yield `None`.
	pub fn verify(&self, username: &str, password: &str) -> Option<Principal> {
		let record = self.users.get(username)?;

		let parsed = match PasswordHash::new(&record.password_hash) {
			Ok(hash) => hash,
			Err(e) => {
				tracing::error!(%username, error = %e, "stored password hash is not valid PHC");
				return None;
			}
		};

		if Argon2::default()
			.verify_password(password.as_bytes(), &parsed)
			.is_err()
		{
			tracing::debug!(%username, "password verification failed");
			return None;
		}

		Some(Principal {
			username: username.to_string(),
			role: record.role,
			organization: record.organization.clone(),
		})
	}
}

/// Hashes a password into PHC format for storage in configuration.
///
/// Exposed for operational tooling and tests.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
	let salt = SaltString::generate(&mut OsRng);
	Ok(Argon2::default()
		.hash_password(password.as_bytes(), &salt)?
		.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn directory_with(username: &str, password: &str, role: Role, org: &str) -> UserDirectory {
		UserDirectory::new([(
			username.to_string(),
			UserRecord {
				password_hash: hash_password(password).unwrap(),
				role,
				organization: org.to_string(),
			},
		)])
	}

	#[test]
	fn verify_resolves_principal() {
		let dir = directory_with("ichrakstats", "hunter2", Role::Manager, "rak statistics");

		let principal = dir.verify("ichrakstats", "hunter2").unwrap();
		assert_eq!(principal.username, "ichrakstats");
		assert_eq!(principal.role, Role::Manager);
		assert_eq!(principal.organization, "rak statistics");
	}

	#[test]
	fn wrong_password_is_rejected() {
		let dir = directory_with("ichrakstats", "hunter2", Role::Manager, "rak statistics");
		assert!(dir.verify("ichrakstats", "hunter3").is_none());
	}

	#[test]
	fn unknown_user_is_rejected() {
		let dir = directory_with("ichrakstats", "hunter2", Role::Manager, "rak statistics");
		assert!(dir.verify("nobody", "hunter2").is_none());
	}

	#[test]
	fn malformed_stored_hash_fails_closed() {
		let dir = UserDirectory::new([(
			"broken".to_string(),
			UserRecord {
				password_hash: "not-a-phc-hash".to_string(),
				role: Role::Student,
				organization: "aurak".to_string(),
			},
		)]);
		assert!(dir.verify("broken", "anything").is_none());
	}

	#[test]
	fn hash_password_round_trips() {
		let hash = hash_password("s3cret").unwrap();
		let parsed = PasswordHash::new(&hash).unwrap();
		assert!(Argon2::default()
			.verify_password(b"s3cret", &parsed)
			.is_ok());
	}
}
