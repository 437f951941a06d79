// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for authentication and authorization.
//!
//! - [`Role`]: fixed permission levels mapping to allowed [`Action`]s
//! - [`Action`]: the closed set of operations a request can perform
//! - [`Organization`] / [`OrgScope`]: which categories an org may address
//! - [`Principal`]: the authenticated caller triple the engine evaluates
//!
//! All of these are immutable after startup and shared freely across
//! concurrent request handlers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Actions that can be performed on dataset resources.
///
/// `Read` covers listing and downloading, `Write` covers upload and
/// overwrite, `Delete` removes a resource. The enum is exhaustively matched
/// everywhere, so adding an action is a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
	Read,
	Write,
	Delete,
}

impl Action {
	/// Returns all available actions.
	pub fn all() -> &'static [Action] {
		&[Action::Read, Action::Write, Action::Delete]
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Action::Read => write!(f, "read"),
			Action::Write => write!(f, "write"),
			Action::Delete => write!(f, "delete"),
		}
	}
}

/// Permission levels. The enumeration is fixed at deployment; there are no
/// per-user overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	Student,
	Employee,
	Supervisor,
	Manager,
}

impl Role {
	/// Returns all available roles.
	pub fn all() -> &'static [Role] {
		&[
			Role::Student,
			Role::Employee,
			Role::Supervisor,
			Role::Manager,
		]
	}

	/// The set of actions this role may perform. Absence from the returned
	/// slice is denial, not an error.
	pub fn allowed_actions(&self) -> &'static [Action] {
		match self {
			Role::Student | Role::Employee => &[Action::Read],
			Role::Supervisor => &[Action::Read, Action::Write],
			Role::Manager => &[Action::Read, Action::Write, Action::Delete],
		}
	}

	/// Returns true if this role may perform `action`.
	pub fn permits(&self, action: Action) -> bool {
		self.allowed_actions().contains(&action)
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Role::Student => write!(f, "student"),
			Role::Employee => write!(f, "employee"),
			Role::Supervisor => write!(f, "supervisor"),
			Role::Manager => write!(f, "manager"),
		}
	}
}

/// Error type for role parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
	type Err = RoleParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"student" => Ok(Role::Student),
			"employee" => Ok(Role::Employee),
			"supervisor" => Ok(Role::Supervisor),
			"manager" => Ok(Role::Manager),
			other => Err(RoleParseError(other.to_string())),
		}
	}
}

/// Which categories an organization may address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgScope {
	/// The full catalog. The degenerate case of the role-only login model.
	All,
	/// An explicit subset of category keys.
	Categories(BTreeSet<String>),
}

impl OrgScope {
	/// Returns true if `category` is inside this scope.
	pub fn contains(&self, category: &str) -> bool {
		match self {
			OrgScope::All => true,
			OrgScope::Categories(keys) => keys.contains(category),
		}
	}
}

/// A named organization and its category scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
	pub name: String,
	pub scope: OrgScope,
}

/// An authenticated caller: the sole input the core needs for authorization
/// decisions. Identity lifecycle (sessions, credentials) lives outside the
/// core; by the time a `Principal` exists, authentication already happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
	pub username: String,
	pub role: Role,
	pub organization: String,
}

impl Principal {
	pub fn new(
		username: impl Into<String>,
		role: Role,
		organization: impl Into<String>,
	) -> Self {
		Self {
			username: username.into(),
			role,
			organization: organization.into(),
		}
	}
}
