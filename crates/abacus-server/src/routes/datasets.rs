// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Dataset HTTP handlers: list, download, upload, delete.
//!
//! Every handler rebuilds the slash-delimited command path from its route
//! parameters and hands it to the dataset service, so the same parsing and
//! authorization pipeline runs regardless of transport.

use axum::{
	extract::{Multipart, Path, State},
	http::{header, StatusCode},
	response::IntoResponse,
	Json,
};
use bytes::Bytes;

pub use abacus_server_api::datasets::*;
use abacus_server_auth::{AccessError, Action, RequirePrincipal};
use abacus_server_store::StoreError;

use crate::{
	api::AppState,
	api_response::{
		bad_request, forbidden, internal_error, not_found, not_found_with_code, payload_too_large,
	},
	impl_api_error_response,
	service::{Outcome, ServiceError, Upload},
};

impl_api_error_response!(DatasetErrorResponse);

const XLSX_CONTENT_TYPE: &str =
	"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Multipart field carrying the uploaded workbook.
const UPLOAD_FIELD: &str = "file";

fn service_error_response(e: ServiceError) -> (StatusCode, Json<DatasetErrorResponse>) {
	match e {
		ServiceError::Malformed(e) => bad_request("malformed_command", e.to_string()),
		ServiceError::UnknownCategory(category) => not_found_with_code(
			"unknown_category",
			format!("Category '{category}' does not exist"),
		),
		err @ (ServiceError::ResourceAddressedUpload | ServiceError::ResourceRequired { .. }) => {
			bad_request("invalid_address", err.to_string())
		}
		ServiceError::Denied(denial) => match &denial {
			AccessError::ActionNotPermittedForRole { .. }
			| AccessError::CategoryNotPermittedForOrganization { .. } => {
				forbidden(denial.code(), denial.to_string())
			}
			AccessError::UnknownOrganization(org) => {
				// Startup validation makes this unreachable for configured
				// users; keep the diagnostic anyway.
				tracing::error!(organization = %org, "principal references unknown organization");
				forbidden(denial.code(), denial.to_string())
			}
		},
		ServiceError::Store(StoreError::ResourceNotFound { category, name }) => {
			not_found(format!("File '{name}' not found in '{category}'"))
		}
		ServiceError::Store(StoreError::CategoryDirectoryMissing { category }) => {
			not_found(format!("Category '{category}' has no files"))
		}
		ServiceError::Store(StoreError::InvalidResourceName(name)) => {
			bad_request("invalid_resource_name", format!("Invalid file name '{name}'"))
		}
		ServiceError::Store(StoreError::Io(e)) => {
			tracing::error!(error = %e, "storage operation failed");
			internal_error("An internal error occurred")
		}
	}
}

#[utoipa::path(
    get,
    path = "/datasets/{category}",
    params(("category" = String, Path, description = "Category key")),
    responses(
        (status = 200, description = "Files in the category", body = ListFilesResponse),
        (status = 403, description = "Access denied", body = DatasetErrorResponse),
        (status = 404, description = "Unknown category", body = DatasetErrorResponse)
    ),
    tag = "datasets"
)]
/// GET /datasets/{category} - List files in a category.
#[tracing::instrument(skip(state, principal), fields(user = %principal.username, %category))]
pub async fn list_files(
	State(state): State<AppState>,
	RequirePrincipal(principal): RequirePrincipal,
	Path(category): Path<String>,
) -> impl IntoResponse {
	let path = format!("/datasets/{category}");
	match state.datasets.dispatch(&principal, Action::Read, &path, None).await {
		Ok(Outcome::Listing(files)) => {
			(StatusCode::OK, Json(ListFilesResponse { files })).into_response()
		}
		Ok(_) => internal_error::<DatasetErrorResponse>("Unexpected outcome").into_response(),
		Err(e) => service_error_response(e).into_response(),
	}
}

#[utoipa::path(
    get,
    path = "/datasets/{category}/{filename}",
    params(
        ("category" = String, Path, description = "Category key"),
        ("filename" = String, Path, description = "Workbook file name")
    ),
    responses(
        (status = 200, description = "Workbook bytes", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 403, description = "Access denied", body = DatasetErrorResponse),
        (status = 404, description = "File not found", body = DatasetErrorResponse)
    ),
    tag = "datasets"
)]
/// GET /datasets/{category}/{filename} - Download one workbook.
#[tracing::instrument(skip(state, principal), fields(user = %principal.username, %category, %filename))]
pub async fn download_file(
	State(state): State<AppState>,
	RequirePrincipal(principal): RequirePrincipal,
	Path((category, filename)): Path<(String, String)>,
) -> impl IntoResponse {
	let path = format!("/datasets/{category}/{filename}");
	match state.datasets.dispatch(&principal, Action::Read, &path, None).await {
		Ok(Outcome::Content { name, bytes }) => (
			StatusCode::OK,
			[
				(header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
				(
					header::CONTENT_DISPOSITION,
					format!("attachment; filename=\"{name}\""),
				),
			],
			bytes,
		)
			.into_response(),
		Ok(_) => internal_error::<DatasetErrorResponse>("Unexpected outcome").into_response(),
		Err(e) => service_error_response(e).into_response(),
	}
}

#[utoipa::path(
    post,
    path = "/datasets/{category}",
    params(("category" = String, Path, description = "Category key")),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = DatasetSuccessResponse),
        (status = 400, description = "Missing or invalid file", body = DatasetErrorResponse),
        (status = 403, description = "Access denied", body = DatasetErrorResponse),
        (status = 413, description = "Payload too large", body = DatasetErrorResponse)
    ),
    tag = "datasets"
)]
/// POST /datasets/{category} - Upload a workbook into a category.
///
/// The stored name comes from the multipart `file` field's filename; the URL
/// never names the resource.
#[tracing::instrument(skip(state, principal, multipart), fields(user = %principal.username, %category))]
pub async fn upload_file(
	State(state): State<AppState>,
	RequirePrincipal(principal): RequirePrincipal,
	Path(category): Path<String>,
	mut multipart: Multipart,
) -> impl IntoResponse {
	let upload = match read_upload(&mut multipart).await {
		Ok(Some(upload)) => upload,
		Ok(None) => {
			return bad_request::<DatasetErrorResponse>(
				"missing_file",
				format!("Multipart field '{UPLOAD_FIELD}' with a filename is required"),
			)
			.into_response();
		}
		Err(response) => return response,
	};

	let name = upload.name.clone();
	let path = format!("/datasets/{category}");
	match state
		.datasets
		.dispatch(&principal, Action::Write, &path, Some(upload))
		.await
	{
		Ok(Outcome::Stored { category, name }) => (
			StatusCode::OK,
			Json(DatasetSuccessResponse {
				message: format!("File '{name}' uploaded to '{category}'"),
			}),
		)
			.into_response(),
		Ok(_) => internal_error::<DatasetErrorResponse>("Unexpected outcome").into_response(),
		Err(e) => {
			tracing::debug!(%name, "upload rejected");
			service_error_response(e).into_response()
		}
	}
}

async fn read_upload(
	multipart: &mut Multipart,
) -> Result<Option<Upload>, axum::response::Response> {
	loop {
		let field = match multipart.next_field().await {
			Ok(Some(field)) => field,
			Ok(None) => return Ok(None),
			Err(e) => return Err(multipart_error_response(e)),
		};

		if field.name() != Some(UPLOAD_FIELD) {
			continue;
		}
		let Some(filename) = field.file_name().map(str::to_string) else {
			return Ok(None);
		};
		if filename.is_empty() {
			return Ok(None);
		}

		let bytes: Bytes = match field.bytes().await {
			Ok(bytes) => bytes,
			Err(e) => return Err(multipart_error_response(e)),
		};
		return Ok(Some(Upload {
			name: filename,
			bytes,
		}));
	}
}

fn multipart_error_response(e: axum::extract::multipart::MultipartError) -> axum::response::Response {
	if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
		return payload_too_large::<DatasetErrorResponse>("Upload exceeds the configured size cap")
			.into_response();
	}
	bad_request::<DatasetErrorResponse>("invalid_multipart", e.to_string()).into_response()
}

#[utoipa::path(
    delete,
    path = "/datasets/{category}/{filename}",
    params(
        ("category" = String, Path, description = "Category key"),
        ("filename" = String, Path, description = "Workbook file name")
    ),
    responses(
        (status = 200, description = "File removed", body = DatasetSuccessResponse),
        (status = 403, description = "Access denied", body = DatasetErrorResponse),
        (status = 404, description = "File not found", body = DatasetErrorResponse)
    ),
    tag = "datasets"
)]
/// DELETE /datasets/{category}/{filename} - Remove one workbook.
#[tracing::instrument(skip(state, principal), fields(user = %principal.username, %category, %filename))]
pub async fn delete_file(
	State(state): State<AppState>,
	RequirePrincipal(principal): RequirePrincipal,
	Path((category, filename)): Path<(String, String)>,
) -> impl IntoResponse {
	let path = format!("/datasets/{category}/{filename}");
	match state
		.datasets
		.dispatch(&principal, Action::Delete, &path, None)
		.await
	{
		Ok(Outcome::Removed { category, name }) => (
			StatusCode::OK,
			Json(DatasetSuccessResponse {
				message: format!("File '{name}' deleted from '{category}'"),
			}),
		)
			.into_response(),
		Ok(_) => internal_error::<DatasetErrorResponse>("Unexpected outcome").into_response(),
		Err(e) => service_error_response(e).into_response(),
	}
}
