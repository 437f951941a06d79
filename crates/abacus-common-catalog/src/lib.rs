// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Static dataset category catalog.
//!
//! The universe of categories is fixed at deployment time. Every category key
//! maps 1:1 to a storage subdirectory name, so the catalog must be consulted
//! before any storage or authorization check that references a key: unknown
//! keys are rejected up front instead of silently resolving to a missing
//! directory.

use serde::Serialize;
use std::fmt;

/// A dataset category: a short key plus a human-readable display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
	/// Immutable identifier, doubles as the storage subdirectory name.
	pub key: &'static str,
	/// Display label for presentation layers.
	pub label: &'static str,
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.key)
	}
}

/// The fixed category universe, in display order.
const CATALOG: &[Category] = &[
	Category {
		key: "health",
		label: "Health",
	},
	Category {
		key: "education",
		label: "Education",
	},
	Category {
		key: "marriage_and_divorce",
		label: "Marriage and Divorce",
	},
	Category {
		key: "births_and_deaths",
		label: "Births and Deaths",
	},
	Category {
		key: "mosques_and_endowments",
		label: "Mosques and Endowments",
	},
	Category {
		key: "justice_and_security",
		label: "Justice and Security",
	},
	Category {
		key: "labor_force",
		label: "Labor Force",
	},
];

/// Returns all categories in display order.
pub fn categories() -> &'static [Category] {
	CATALOG
}

/// Returns true if `key` names a known category.
pub fn is_valid(key: &str) -> bool {
	find(key).is_some()
}

/// Looks up a category by key.
pub fn find(key: &str) -> Option<&'static Category> {
	CATALOG.iter().find(|c| c.key == key)
}

/// Returns all category keys in display order.
pub fn keys() -> impl Iterator<Item = &'static str> {
	CATALOG.iter().map(|c| c.key)
}
