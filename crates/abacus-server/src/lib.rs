// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Abacus dataset server.
//!
//! This crate provides an HTTP server over a category-partitioned spreadsheet
//! store, gated by a role × action / organization × category access-control
//! model.

pub mod api;
pub mod api_docs;
pub mod api_response;
pub mod routes;
pub mod service;

pub use api::{create_app_state, create_app_state_with_store, create_router, AppState};
pub use api_docs::ApiDoc;
pub use abacus_server_config::ServerConfig;
pub use service::{DatasetService, Outcome, ServiceError, Upload};
