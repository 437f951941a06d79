// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization engine.
//!
//! [`AccessControl::authorize`] is the main entry point. It evaluates two
//! orthogonal checks and preserves which one failed:
//!
//! 1. **Role check**: is the action inside the role's allowed set?
//! 2. **Organization check**: is the category inside the org's scope?
//!
//! Both must pass; an action permitted for the role but whose category is
//! outside the organization's scope is still denied, and vice versa. All
//! decisions are pure functions over immutable startup configuration, making
//! them easy to test and reason about.

use crate::types::{Action, OrgScope, Organization, Principal};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::instrument;

/// Authorization failure, with the specific denial reason preserved so
/// callers can produce distinct diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
	#[error("unknown organization: {0}")]
	UnknownOrganization(String),

	#[error("role {role} is not permitted to {action}")]
	ActionNotPermittedForRole {
		role: crate::types::Role,
		action: Action,
	},

	#[error("organization {organization:?} has no access to category {category:?}")]
	CategoryNotPermittedForOrganization {
		organization: String,
		category: String,
	},
}

impl AccessError {
	/// Stable machine-readable code for protocol responses.
	pub fn code(&self) -> &'static str {
		match self {
			AccessError::UnknownOrganization(_) => "unknown_organization",
			AccessError::ActionNotPermittedForRole { .. } => "action_not_permitted",
			AccessError::CategoryNotPermittedForOrganization { .. } => "category_not_permitted",
		}
	}
}

/// Immutable role/organization permission tables, built once at startup and
/// passed into the API service (never reached for globally).
#[derive(Debug, Clone)]
pub struct AccessControl {
	organizations: BTreeMap<String, OrgScope>,
}

impl AccessControl {
	/// Builds the control tables from configured organizations.
	pub fn new(organizations: impl IntoIterator<Item = Organization>) -> Self {
		Self {
			organizations: organizations
				.into_iter()
				.map(|org| (org.name, org.scope))
				.collect(),
		}
	}

	/// The names of all configured organizations, in sorted order.
	pub fn organization_names(&self) -> impl Iterator<Item = &str> {
		self.organizations.keys().map(String::as_str)
	}

	/// The category keys `organization` may address, drawn from the catalog.
	///
	/// An org scoped `All` resolves to the full catalog.
	pub fn allowed_categories(
		&self,
		organization: &str,
	) -> Result<BTreeSet<&'static str>, AccessError> {
		let scope = self
			.organizations
			.get(organization)
			.ok_or_else(|| AccessError::UnknownOrganization(organization.to_string()))?;

		Ok(abacus_common_catalog::keys()
			.filter(|key| scope.contains(key))
			.collect())
	}

	/// Evaluates whether `principal` may perform `action` on `category`.
	///
	/// The category must already be a known catalog key; unknown keys are the
	/// caller's concern (rejected with a dedicated error before this point).
	#[instrument(
		level = "debug",
		skip(self, principal),
		fields(
			username = %principal.username,
			role = %principal.role,
			organization = %principal.organization,
			action = %action,
			category = %category,
		)
	)]
	pub fn authorize(
		&self,
		principal: &Principal,
		action: Action,
		category: &str,
	) -> Result<(), AccessError> {
		if !principal.role.permits(action) {
			tracing::info!("access denied: action not permitted for role");
			return Err(AccessError::ActionNotPermittedForRole {
				role: principal.role,
				action,
			});
		}

		let scope = self
			.organizations
			.get(&principal.organization)
			.ok_or_else(|| AccessError::UnknownOrganization(principal.organization.clone()))?;

		if !scope.contains(category) {
			tracing::info!("access denied: category outside organization scope");
			return Err(AccessError::CategoryNotPermittedForOrganization {
				organization: principal.organization.clone(),
				category: category.to_string(),
			});
		}

		tracing::debug!("access granted");
		Ok(())
	}
}
