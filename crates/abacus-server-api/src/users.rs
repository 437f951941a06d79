// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// The authenticated caller's identity and effective access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PrincipalResponse {
	pub username: String,
	pub role: String,
	pub organization: String,
	/// Category keys the caller's organization may reach, sorted.
	pub allowed_categories: Vec<String>,
}
