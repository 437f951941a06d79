// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health HTTP handler.

use axum::{http::StatusCode, response::IntoResponse, Json};

pub use abacus_server_api::health::HealthResponse;

#[utoipa::path(
	get,
	path = "/health",
	responses(
		(status = 200, description = "Server is up", body = HealthResponse)
	),
	tag = "health"
)]
/// GET /health - Liveness check.
pub async fn health_check() -> impl IntoResponse {
	(
		StatusCode::OK,
		Json(HealthResponse {
			status: "ok".to_string(),
			version: env!("CARGO_PKG_VERSION").to_string(),
		}),
	)
}
