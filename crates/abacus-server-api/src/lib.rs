// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod datasets;
pub mod health;
pub mod users;

pub use datasets::{DatasetErrorResponse, DatasetSuccessResponse, ListFilesResponse};
pub use health::HealthResponse;
pub use users::PrincipalResponse;
