// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP API routes and application state.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use utoipa::OpenApi;

use abacus_server_auth::{
	AccessControl, BasicAuthLayer, Organization, UserDirectory, UserRecord,
};
use abacus_server_config::ServerConfig;
use abacus_server_store::{DatasetStore, FsStore};

use crate::{routes, service::DatasetService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
	pub datasets: DatasetService,
	pub directory: Arc<UserDirectory>,
	pub max_upload_bytes: usize,
}

/// Build application state from resolved configuration, with a
/// filesystem-backed store rooted at the configured base directory.
pub fn create_app_state(config: &ServerConfig) -> AppState {
	let store: Arc<dyn DatasetStore> = Arc::new(FsStore::new(&config.storage.base_dir));
	create_app_state_with_store(config, store)
}

/// Build application state around an explicit store implementation.
pub fn create_app_state_with_store(config: &ServerConfig, store: Arc<dyn DatasetStore>) -> AppState {
	let access = AccessControl::new(config.access.organizations.iter().map(|(name, scope)| {
		Organization {
			name: name.clone(),
			scope: scope.clone(),
		}
	}));

	let directory = UserDirectory::new(config.auth.users.iter().map(|user| {
		(
			user.username.clone(),
			UserRecord {
				password_hash: user.password_hash.clone(),
				role: user.role,
				organization: user.organization.clone(),
			},
		)
	}));

	if directory.is_empty() {
		tracing::warn!("no users configured; every authenticated request will be rejected");
	}

	AppState {
		datasets: DatasetService::new(Arc::new(access), store),
		directory: Arc::new(directory),
		max_upload_bytes: config.storage.max_upload_bytes,
	}
}

/// Build the full router: public health and docs routes, plus the
/// authenticated dataset surface.
pub fn create_router(state: AppState) -> Router {
	let public = Router::new()
		.route("/health", get(routes::health::health_check))
		.route(
			"/api/openapi.json",
			get(|| async { Json(crate::api_docs::ApiDoc::openapi()) }),
		);

	let authed = Router::new()
		.route("/datasets/{category}", get(routes::datasets::list_files))
		.route("/datasets/{category}", post(routes::datasets::upload_file))
		.route(
			"/datasets/{category}/{filename}",
			get(routes::datasets::download_file),
		)
		.route(
			"/datasets/{category}/{filename}",
			delete(routes::datasets::delete_file),
		)
		.route("/api/me", get(routes::users::current_user))
		.route_layer(BasicAuthLayer::new(state.directory.clone()))
		.layer(DefaultBodyLimit::max(state.max_upload_bytes));

	public.merge(authed).with_state(state)
}

#[cfg(test)]
mod tests {
	use super::*;
	use abacus_server_auth::{hash_password, Role};
	use abacus_server_config::{
		AccessConfig, AuthConfig, HttpConfig, LoggingConfig, StorageConfig, UserConfig,
	};
	use axum::body::Body;
	use axum::http::{header, Request, StatusCode};
	use http_body_util::BodyExt;
	use tower::ServiceExt;

	const PASSWORD: &str = "correct horse";

	fn test_config(base_dir: &std::path::Path) -> ServerConfig {
		let hash = hash_password(PASSWORD).unwrap();
		let users = [
			("ichrakstats", Role::Manager, "rak statistics"),
			("marwanaurak", Role::Manager, "aurak"),
			("karimcourts", Role::Employee, "courts department"),
			("saracourts", Role::Supervisor, "courts department"),
		];

		ServerConfig {
			http: HttpConfig::default(),
			storage: StorageConfig {
				base_dir: base_dir.to_path_buf(),
				..StorageConfig::default()
			},
			access: AccessConfig::default(),
			auth: AuthConfig {
				users: users
					.iter()
					.map(|(username, role, org)| UserConfig {
						username: username.to_string(),
						password_hash: hash.clone(),
						role: *role,
						organization: org.to_string(),
					})
					.collect(),
			},
			logging: LoggingConfig::default(),
		}
	}

	fn basic(username: &str) -> String {
		use base64::Engine as _;
		let credentials =
			base64::engine::general_purpose::STANDARD.encode(format!("{username}:{PASSWORD}"));
		format!("Basic {credentials}")
	}

	fn app(base_dir: &std::path::Path) -> Router {
		let config = test_config(base_dir);
		create_router(create_app_state(&config))
	}

	async fn body_json(response: axum::response::Response) -> serde_json::Value {
		let bytes = response.into_body().collect().await.unwrap().to_bytes();
		serde_json::from_slice(&bytes).unwrap()
	}

	fn multipart_body(filename: &str, content: &[u8]) -> (String, Vec<u8>) {
		let boundary = "abacus-test-boundary";
		let mut body = Vec::new();
		body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
		body.extend_from_slice(
			format!(
				"Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\r\n"
			)
			.as_bytes(),
		);
		body.extend_from_slice(content);
		body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
		(format!("multipart/form-data; boundary={boundary}"), body)
	}

	#[tokio::test]
	async fn health_is_public() {
		let dir = tempfile::tempdir().unwrap();
		let response = app(dir.path())
			.oneshot(Request::get("/health").body(Body::empty()).unwrap())
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
	}

	#[tokio::test]
	async fn datasets_require_authentication() {
		let dir = tempfile::tempdir().unwrap();
		let response = app(dir.path())
			.oneshot(Request::get("/datasets/health").body(Body::empty()).unwrap())
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
		assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
	}

	#[tokio::test]
	async fn upload_list_download_delete_cycle() {
		let dir = tempfile::tempdir().unwrap();
		let app = app(dir.path());
		let (content_type, body) = multipart_body("Q1.xlsx", b"workbook");

		let response = app
			.clone()
			.oneshot(
				Request::post("/datasets/health")
					.header(header::AUTHORIZATION, basic("ichrakstats"))
					.header(header::CONTENT_TYPE, content_type)
					.body(Body::from(body))
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);

		let response = app
			.clone()
			.oneshot(
				Request::get("/datasets/health")
					.header(header::AUTHORIZATION, basic("ichrakstats"))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		let json = body_json(response).await;
		assert_eq!(json["files"], serde_json::json!(["Q1.xlsx"]));

		let response = app
			.clone()
			.oneshot(
				Request::get("/datasets/health/Q1.xlsx")
					.header(header::AUTHORIZATION, basic("ichrakstats"))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(
			response.headers()[header::CONTENT_DISPOSITION],
			"attachment; filename=\"Q1.xlsx\""
		);
		let bytes = response.into_body().collect().await.unwrap().to_bytes();
		assert_eq!(&bytes[..], b"workbook");

		let response = app
			.clone()
			.oneshot(
				Request::delete("/datasets/health/Q1.xlsx")
					.header(header::AUTHORIZATION, basic("ichrakstats"))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);

		let response = app
			.oneshot(
				Request::get("/datasets/health/Q1.xlsx")
					.header(header::AUTHORIZATION, basic("ichrakstats"))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn employee_delete_is_denied_with_role_reason() {
		let dir = tempfile::tempdir().unwrap();
		let response = app(dir.path())
			.oneshot(
				Request::delete("/datasets/justice_and_security/case1.xlsx")
					.header(header::AUTHORIZATION, basic("karimcourts"))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::FORBIDDEN);
		let json = body_json(response).await;
		assert_eq!(json["error"], "action_not_permitted");
	}

	#[tokio::test]
	async fn out_of_scope_category_is_denied_with_org_reason() {
		let dir = tempfile::tempdir().unwrap();
		let response = app(dir.path())
			.oneshot(
				Request::get("/datasets/health")
					.header(header::AUTHORIZATION, basic("marwanaurak"))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::FORBIDDEN);
		let json = body_json(response).await;
		assert_eq!(json["error"], "category_not_permitted");
	}

	#[tokio::test]
	async fn unknown_category_is_404() {
		let dir = tempfile::tempdir().unwrap();
		let response = app(dir.path())
			.oneshot(
				Request::get("/datasets/astrology")
					.header(header::AUTHORIZATION, basic("ichrakstats"))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::NOT_FOUND);
		let json = body_json(response).await;
		assert_eq!(json["error"], "unknown_category");
	}

	#[tokio::test]
	async fn listing_an_empty_category_is_ok() {
		let dir = tempfile::tempdir().unwrap();
		let response = app(dir.path())
			.oneshot(
				Request::get("/datasets/labor_force")
					.header(header::AUTHORIZATION, basic("ichrakstats"))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		let json = body_json(response).await;
		assert_eq!(json["files"], serde_json::json!([]));
	}

	#[tokio::test]
	async fn upload_without_file_field_is_400() {
		let dir = tempfile::tempdir().unwrap();
		let boundary = "abacus-test-boundary";
		let body = format!(
			"--{boundary}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{boundary}--\r\n"
		);
		let response = app(dir.path())
			.oneshot(
				Request::post("/datasets/health")
					.header(header::AUTHORIZATION, basic("ichrakstats"))
					.header(
						header::CONTENT_TYPE,
						format!("multipart/form-data; boundary={boundary}"),
					)
					.body(Body::from(body))
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
		let json = body_json(response).await;
		assert_eq!(json["error"], "missing_file");
	}

	#[tokio::test]
	async fn non_workbook_filename_is_rejected() {
		let dir = tempfile::tempdir().unwrap();
		let app = app(dir.path());
		let (content_type, body) = multipart_body("notes.txt", b"x");

		let response = app
			.oneshot(
				Request::post("/datasets/health")
					.header(header::AUTHORIZATION, basic("ichrakstats"))
					.header(header::CONTENT_TYPE, content_type)
					.body(Body::from(body))
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
		let json = body_json(response).await;
		assert_eq!(json["error"], "invalid_resource_name");
	}

	#[tokio::test]
	async fn oversized_upload_is_413_and_nothing_is_stored() {
		use abacus_server_store::{MemStore, StoreError};

		let dir = tempfile::tempdir().unwrap();
		let store = Arc::new(MemStore::new());
		let mut config = test_config(dir.path());
		config.storage.max_upload_bytes = 1024;
		let app = create_router(create_app_state_with_store(&config, store.clone()));

		let (content_type, body) = multipart_body("huge.xlsx", &[0u8; 4096]);
		let response = app
			.oneshot(
				Request::post("/datasets/health")
					.header(header::AUTHORIZATION, basic("ichrakstats"))
					.header(header::CONTENT_TYPE, content_type)
					.body(Body::from(body))
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
		let json = body_json(response).await;
		assert_eq!(json["error"], "payload_too_large");

		// The cap fires before the store sees the upload.
		assert!(matches!(
			store.list("health").await,
			Err(StoreError::CategoryDirectoryMissing { .. })
		));
	}

	#[tokio::test]
	async fn supervisor_may_upload_but_not_delete() {
		let dir = tempfile::tempdir().unwrap();
		let app = app(dir.path());
		let (content_type, body) = multipart_body("verdicts.xlsx", b"x");

		let response = app
			.clone()
			.oneshot(
				Request::post("/datasets/marriage_and_divorce")
					.header(header::AUTHORIZATION, basic("saracourts"))
					.header(header::CONTENT_TYPE, content_type)
					.body(Body::from(body))
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);

		let response = app
			.oneshot(
				Request::delete("/datasets/marriage_and_divorce/verdicts.xlsx")
					.header(header::AUTHORIZATION, basic("saracourts"))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::FORBIDDEN);
	}

	#[tokio::test]
	async fn current_user_reports_scope() {
		let dir = tempfile::tempdir().unwrap();
		let response = app(dir.path())
			.oneshot(
				Request::get("/api/me")
					.header(header::AUTHORIZATION, basic("karimcourts"))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		let json = body_json(response).await;
		assert_eq!(json["username"], "karimcourts");
		assert_eq!(json["role"], "employee");
		assert_eq!(
			json["allowed_categories"],
			serde_json::json!(["justice_and_security", "marriage_and_divorce"])
		);
	}
}
