// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections, each with a resolved type and a mergeable layer.

mod access;
mod auth;
mod http;
mod logging;
mod storage;

pub use access::{AccessConfig, AccessConfigLayer, OrgScopeSpec};
pub use auth::{AuthConfig, AuthConfigLayer, UserConfig, UserSpec};
pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use storage::{StorageConfig, StorageConfigLayer, DEFAULT_MAX_UPLOAD_BYTES};
