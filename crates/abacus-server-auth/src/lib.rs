// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication and access control for the Abacus dataset service.
//!
//! Authorization is two independent, orthogonal checks: what a role may *do*
//! (role × action) and what an organization may *see* (organization ×
//! category). This keeps the permission matrix small and lets new users reuse
//! existing roles and organizations without new rules.

pub mod directory;
pub mod engine;
pub mod middleware;
pub mod types;

pub use directory::{hash_password, UserDirectory, UserRecord};
pub use engine::{AccessControl, AccessError};
pub use middleware::{BasicAuthLayer, RequirePrincipal};
pub use types::{Action, OrgScope, Organization, Principal, Role, RoleParseError};
