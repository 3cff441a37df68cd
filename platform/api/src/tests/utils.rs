use std::net::SocketAddr;
use std::sync::Arc;

use common::http::RouteError;
use hyper::service::Service;
use hyper::{header, Body, Method, Request, Response};
use routerify::{RequestService, RequestServiceBuilder};
use serde_json::Value;

use crate::api;
use crate::api::error::ApiError;
use crate::global::ApiGlobal;

pub fn service<G: ApiGlobal>(global: &Arc<G>) -> RequestService<Body, RouteError<ApiError>> {
	let router = api::routes(global).expect("failed to build router");

	RequestServiceBuilder::new(router)
		.expect("failed to build request service")
		.build(SocketAddr::from(([127, 0, 0, 1], 40000)))
}

pub async fn send(service: &mut RequestService<Body, RouteError<ApiError>>, req: Request<Body>) -> Response<Body> {
	service.call(req).await.expect("failed to handle request")
}

pub async fn request<G: ApiGlobal>(
	global: &Arc<G>,
	method: Method,
	uri: &str,
	token: Option<&str>,
	body: Option<Value>,
) -> Response<Body> {
	let mut req = Request::builder().method(method).uri(uri);

	if let Some(token) = token {
		req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
	}

	let req = match body {
		Some(body) => req
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(body.to_string())),
		None => req.body(Body::empty()),
	}
	.expect("failed to build request");

	send(&mut service(global), req).await
}

pub async fn body_json(resp: Response<Body>) -> Value {
	let body = hyper::body::to_bytes(resp.into_body()).await.expect("failed to read body");
	serde_json::from_slice(&body).expect("body is not json")
}
