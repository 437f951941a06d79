// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Current-user HTTP handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

pub use abacus_server_api::users::PrincipalResponse;
use abacus_server_api::DatasetErrorResponse;
use abacus_server_auth::RequirePrincipal;

use crate::{api::AppState, api_response::forbidden};

#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "The caller's identity and access", body = PrincipalResponse),
        (status = 401, description = "Not authenticated", body = DatasetErrorResponse)
    ),
    tag = "users"
)]
/// GET /api/me - Who am I, and which categories can I reach.
#[tracing::instrument(skip(state, principal), fields(user = %principal.username))]
pub async fn current_user(
	State(state): State<AppState>,
	RequirePrincipal(principal): RequirePrincipal,
) -> impl IntoResponse {
	let allowed = match state.datasets.access().allowed_categories(&principal.organization) {
		Ok(keys) => keys,
		Err(e) => {
			tracing::error!(error = %e, "principal references unknown organization");
			return forbidden::<DatasetErrorResponse>(e.code(), e.to_string()).into_response();
		}
	};

	(
		StatusCode::OK,
		Json(PrincipalResponse {
			username: principal.username,
			role: principal.role.to_string(),
			organization: principal.organization,
			allowed_categories: allowed.into_iter().map(str::to_string).collect(),
		}),
	)
		.into_response()
}
