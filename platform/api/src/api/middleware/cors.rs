use std::sync::Arc;

use common::http::RouteError;
use hyper::header::{self, HeaderMap, HeaderValue};
use hyper::Body;
use routerify::Middleware;

use crate::api::error::ApiError;
use crate::global::ApiGlobal;

pub fn apply_cors_headers(headers: &mut HeaderMap) {
	headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
	headers.insert(
		header::ACCESS_CONTROL_ALLOW_METHODS,
		HeaderValue::from_static("GET, POST, DELETE, OPTIONS"),
	);
	headers.insert(
		header::ACCESS_CONTROL_ALLOW_HEADERS,
		HeaderValue::from_static("Content-Type, Authorization"),
	);
	headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400"));
}

/// Covers every response a handler produces. Responses built by the error
/// handler skip post middlewares when a pre middleware fails, so
/// [`crate::api::error_handler`] applies the same headers.
pub fn cors_middleware<G: ApiGlobal>(_: &Arc<G>) -> Middleware<Body, RouteError<ApiError>> {
	Middleware::post(|mut resp| async move {
		apply_cors_headers(resp.headers_mut());

		Ok(resp)
	})
}
