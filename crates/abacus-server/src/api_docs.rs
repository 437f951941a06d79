// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenAPI document for the Abacus server.

use utoipa::OpenApi;

use abacus_server_api::{
	DatasetErrorResponse, DatasetSuccessResponse, HealthResponse, ListFilesResponse,
	PrincipalResponse,
};

use crate::routes;

#[derive(OpenApi)]
#[openapi(
	info(
		title = "Abacus Dataset Server",
		description = "Access-controlled, category-partitioned spreadsheet dataset store"
	),
	paths(
		routes::health::health_check,
		routes::datasets::list_files,
		routes::datasets::download_file,
		routes::datasets::upload_file,
		routes::datasets::delete_file,
		routes::users::current_user,
	),
	components(schemas(
		DatasetErrorResponse,
		DatasetSuccessResponse,
		HealthResponse,
		ListFilesResponse,
		PrincipalResponse,
	)),
	tags(
		(name = "health", description = "Liveness"),
		(name = "datasets", description = "Dataset storage operations"),
		(name = "users", description = "Caller identity"),
	)
)]
pub struct ApiDoc;
