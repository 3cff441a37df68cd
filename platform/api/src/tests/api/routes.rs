use hyper::{header, Method, Request, StatusCode};
use serde_json::json;

use crate::tests::global::mock_global_state;
use crate::tests::utils::{body_json, request, send, service};

fn allow_origin(resp: &hyper::Response<hyper::Body>) -> Option<&[u8]> {
	resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).map(|v| v.as_bytes())
}

#[tokio::test]
async fn test_health() {
	let (global, _handler) = mock_global_state(Default::default());

	let resp = request(&global, Method::GET, "/api/health", None, None).await;

	assert_eq!(resp.status(), StatusCode::OK);
	assert_eq!(allow_origin(&resp), Some(b"*".as_slice()));
	assert_eq!(body_json(resp).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_not_found() {
	let (global, _handler) = mock_global_state(Default::default());

	let resp = request(&global, Method::GET, "/api/does/not/exist", None, None).await;

	assert_eq!(resp.status(), StatusCode::NOT_FOUND);
	assert_eq!(body_json(resp).await, json!({"error": "not_found"}));
}

#[tokio::test]
async fn test_requires_session() {
	let (global, _handler) = mock_global_state(Default::default());

	for (method, uri) in [
		(Method::GET, "/api/livestream"),
		(Method::GET, "/api/livestream/1"),
		(Method::POST, "/api/livestream/1/enter"),
		(Method::DELETE, "/api/livestream/1/exit"),
		(Method::GET, "/api/livestream/1/report"),
		(Method::GET, "/api/user/alice/livestream"),
		(Method::POST, "/api/livestream/reservation"),
	] {
		let resp = request(&global, method.clone(), uri, None, None).await;

		assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
		assert_eq!(
			body_json(resp).await,
			json!({"message": "not logged in", "success": false}),
			"{method} {uri}"
		);
	}
}

#[tokio::test]
async fn test_rejects_non_bearer_token() {
	let (global, _handler) = mock_global_state(Default::default());

	let req = Request::builder()
		.method(Method::GET)
		.uri("/api/livestream")
		.header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
		.body(hyper::Body::empty())
		.expect("failed to build request");

	let resp = send(&mut service(&global), req).await;

	assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(allow_origin(&resp), Some(b"*".as_slice()));
	assert_eq!(
		body_json(resp).await,
		json!({"message": "token must be a bearer token", "success": false})
	);
}

#[tokio::test]
async fn test_search_rejects_bad_limit() {
	let (global, _handler) = mock_global_state(Default::default());

	let resp = request(&global, Method::GET, "/api/livestream/search?limit=ten", None, None).await;

	assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	assert_eq!(
		body_json(resp).await,
		json!({"message": "limit query parameter must be integer", "success": false})
	);
}

#[tokio::test]
async fn test_search_ignores_limit_with_tag() {
	let (global, _handler) = mock_global_state(Default::default());

	// With a tag the limit is never parsed, so the request gets as far as the
	// database, which the mock pool cannot reach.
	let resp = request(&global, Method::GET, "/api/livestream/search?tag=rust&limit=ten", None, None).await;

	assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(
		body_json(resp).await,
		json!({"message": "failed to begin transaction", "success": false})
	);
}

#[tokio::test]
async fn test_preflight() {
	let (global, _handler) = mock_global_state(Default::default());

	for uri in ["/api/livestream/reservation", "/api/livestream/1/exit", "/api/tag"] {
		let req = Request::builder()
			.method(Method::OPTIONS)
			.uri(uri)
			.header(header::ORIGIN, "https://example.com")
			.header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
			.header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization, content-type")
			.body(hyper::Body::empty())
			.expect("failed to build request");

		let resp = send(&mut service(&global), req).await;

		assert_eq!(resp.status(), StatusCode::NO_CONTENT, "{uri}");
		assert_eq!(allow_origin(&resp), Some(b"*".as_slice()), "{uri}");
		assert_eq!(
			resp.headers()
				.get(header::ACCESS_CONTROL_ALLOW_HEADERS)
				.map(|v| v.as_bytes()),
			Some(b"Content-Type, Authorization".as_slice()),
			"{uri}"
		);
	}
}

#[tokio::test]
async fn test_shutting_down() {
	let (global, _handler) = mock_global_state(Default::default());

	let mut service = service(&global);
	drop(global);

	let req = Request::builder()
		.method(Method::GET)
		.uri("/api/livestream/search")
		.body(hyper::Body::empty())
		.expect("failed to build request");

	let resp = send(&mut service, req).await;

	assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(allow_origin(&resp), Some(b"*".as_slice()));
	assert_eq!(
		body_json(resp).await,
		json!({"message": "server is shutting down", "success": false})
	);
}
