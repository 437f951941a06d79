// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP Basic authentication layer and principal extractor.
//!
//! [`BasicAuthLayer`] is a Tower layer applied to authenticated routes. It
//! decodes the `Authorization: Basic` header, verifies the credentials
//! against the [`UserDirectory`], and inserts the resolved [`Principal`] into
//! request extensions. Handlers then take it with the [`RequirePrincipal`]
//! extractor.
//!
//! # Security Properties
//!
//! - Unauthenticated or unverifiable requests are rejected with 401
//! - Usernames are logged, passwords never
//! - Verification is stateless per request; there is no session store

use crate::directory::UserDirectory;
use crate::types::Principal;
use axum::{
	body::Body,
	extract::FromRequestParts,
	http::{header, request::Parts, Request, StatusCode},
	response::{IntoResponse, Response},
	Json,
};
use base64::Engine as _;
use pin_project_lite::pin_project;
use serde::Serialize;
use std::sync::Arc;
use std::{
	future::Future,
	pin::Pin,
	task::{Context, Poll},
};
use tower::{Layer, Service};

#[derive(Debug, Serialize)]
struct AuthErrorBody {
	error: String,
	message: String,
}

fn unauthorized_response() -> Response {
	(
		StatusCode::UNAUTHORIZED,
		[(header::WWW_AUTHENTICATE, "Basic realm=\"abacus\"")],
		Json(AuthErrorBody {
			error: "unauthorized".to_string(),
			message: "Authentication required".to_string(),
		}),
	)
		.into_response()
}

/// Decodes a `Basic` authorization header value into (username, password).
fn decode_basic(header_value: &str) -> Option<(String, String)> {
	let encoded = header_value.strip_prefix("Basic ")?;
	let decoded = base64::engine::general_purpose::STANDARD
		.decode(encoded.trim())
		.ok()?;
	let decoded = String::from_utf8(decoded).ok()?;
	let (username, password) = decoded.split_once(':')?;
	Some((username.to_string(), password.to_string()))
}

/// Route layer that authenticates requests with HTTP Basic credentials.
#[derive(Clone)]
pub struct BasicAuthLayer {
	directory: Arc<UserDirectory>,
}

impl BasicAuthLayer {
	pub fn new(directory: Arc<UserDirectory>) -> Self {
		Self { directory }
	}
}

impl<S> Layer<S> for BasicAuthLayer {
	type Service = BasicAuthService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		BasicAuthService {
			inner,
			directory: Arc::clone(&self.directory),
		}
	}
}

/// Service wrapper for [`BasicAuthLayer`].
#[derive(Clone)]
pub struct BasicAuthService<S> {
	inner: S,
	directory: Arc<UserDirectory>,
}

impl<S> Service<Request<Body>> for BasicAuthService<S>
where
	S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
	S::Future: Send,
{
	type Response = Response;
	type Error = S::Error;
	type Future = BasicAuthFuture<S::Future>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, mut req: Request<Body>) -> Self::Future {
		let credentials = req
			.headers()
			.get(header::AUTHORIZATION)
			.and_then(|v| v.to_str().ok())
			.and_then(decode_basic);

		let Some((username, password)) = credentials else {
			tracing::debug!("auth denied: missing or undecodable Basic credentials");
			return BasicAuthFuture::Rejected {
				resp: Some(unauthorized_response()),
			};
		};

		let Some(principal) = self.directory.verify(&username, &password) else {
			tracing::info!(%username, "auth denied: verification failed");
			return BasicAuthFuture::Rejected {
				resp: Some(unauthorized_response()),
			};
		};

		tracing::debug!(
			username = %principal.username,
			role = %principal.role,
			organization = %principal.organization,
			"authenticated"
		);
		req.extensions_mut().insert(principal);

		BasicAuthFuture::Inner {
			fut: self.inner.call(req),
		}
	}
}

pin_project! {
	/// Future for [`BasicAuthService`].
	#[project = BasicAuthFutureProj]
	pub enum BasicAuthFuture<F> {
		Inner { #[pin] fut: F },
		Rejected { resp: Option<Response> },
	}
}

impl<F, E> Future for BasicAuthFuture<F>
where
	F: Future<Output = Result<Response, E>>,
{
	type Output = Result<Response, E>;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		match self.project() {
			BasicAuthFutureProj::Inner { fut } => fut.poll(cx),
			BasicAuthFutureProj::Rejected { resp } => {
				Poll::Ready(Ok(resp.take().expect("polled after completion")))
			}
		}
	}
}

/// Extractor for the authenticated [`Principal`].
///
/// Rejects with 401 when the request reached the handler without passing
/// through [`BasicAuthLayer`] (or when the layer did not authenticate it).
pub struct RequirePrincipal(pub Principal);

impl<S> FromRequestParts<S> for RequirePrincipal
where
	S: Send + Sync,
{
	type Rejection = Response;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		parts
			.extensions
			.get::<Principal>()
			.cloned()
			.map(RequirePrincipal)
			.ok_or_else(unauthorized_response)
	}
}
