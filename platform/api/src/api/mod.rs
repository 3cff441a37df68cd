use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use common::http::ext::ResultExt;
use common::http::RouteError;
use common::make_response;
use common::prelude::FutureTimeout;
use hyper::body::HttpBody;
use hyper::server::conn::Http;
use hyper::{Body, Response, StatusCode};
use routerify::{RequestInfo, RequestServiceBuilder, Router};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpSocket;
use tokio::select;

use self::error::{ApiError, Result};
use crate::config::ApiConfig;
use crate::global::ApiGlobal;

pub mod auth;
pub mod error;
pub mod fill;
pub mod health;
pub mod livestream;
pub mod middleware;
pub mod models;
pub mod request_context;
pub mod tag;

pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Result<Response<Body>> {
	let body =
		serde_json::to_string(body).map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to encode response"))?;

	Ok(make_response!(status, body))
}

/// Upper bound for JSON request bodies.
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Collects a request body, failing with 413 once it grows past `limit`.
pub async fn read_body(mut body: Body, limit: usize) -> Result<Vec<u8>> {
	let too_large = || RouteError::<ApiError>::from((StatusCode::PAYLOAD_TOO_LARGE, "request body is too large"));

	// A declared Content-Length is rejected before anything is read.
	if body.size_hint().lower() > limit as u64 {
		return Err(too_large());
	}

	let mut buf = Vec::new();
	while let Some(chunk) = body.data().await {
		let chunk = chunk.map_err_route((StatusCode::BAD_REQUEST, "failed to read the request body"))?;
		if buf.len() + chunk.len() > limit {
			return Err(too_large());
		}

		buf.extend_from_slice(&chunk);
	}

	Ok(buf)
}

/// Shared route error handling plus the CORS headers every response carries.
pub async fn error_handler(err: routerify::RouteError, info: RequestInfo) -> Response<Body> {
	let mut resp = common::http::error_handler::<ApiError>(err, info).await;
	middleware::cors::apply_cors_headers(resp.headers_mut());
	resp
}

async fn preflight(_: hyper::Request<Body>) -> Result<Response<Body>> {
	let mut resp = Response::new(Body::empty());
	*resp.status_mut() = StatusCode::NO_CONTENT;
	Ok(resp)
}

pub fn routes<G: ApiGlobal>(global: &Arc<G>) -> std::result::Result<Router<Body, RouteError<ApiError>>, routerify::RouteError> {
	let weak = Arc::downgrade(global);
	Router::builder()
		.data(weak)
		// Resolves the bearer token into a session without failing anonymous requests.
		.middleware(middleware::auth::auth_middleware(global))
		.middleware(middleware::cors::cors_middleware(global))
		.get("/api/health", health::health)
		.get("/api/tag", tag::tags::<G>)
		.get("/api/user/:username/livestream", livestream::user_livestreams::<G>)
		// Static segments must be registered before `:livestream_id` captures them.
		.post("/api/livestream/reservation", livestream::reserve::<G>)
		.get("/api/livestream/search", livestream::search::<G>)
		.get("/api/livestream", livestream::mine::<G>)
		.get("/api/livestream/:livestream_id", livestream::get::<G>)
		.post("/api/livestream/:livestream_id/enter", livestream::enter::<G>)
		.delete("/api/livestream/:livestream_id/exit", livestream::exit::<G>)
		.get("/api/livestream/:livestream_id/report", livestream::reports::<G>)
		.options("/*", preflight)
		.any(|_| async move {
			Ok(make_response!(
				StatusCode::NOT_FOUND,
				json!({
					"error": "not_found",
				})
			))
		})
		.err_handler_with_info(error_handler)
		.build()
}

pub async fn run<G: ApiGlobal>(global: Arc<G>) -> anyhow::Result<()> {
	let config = global.config::<ApiConfig>();

	tracing::info!("listening on {}", config.bind_address);
	let socket = if config.bind_address.is_ipv6() {
		TcpSocket::new_v6()?
	} else {
		TcpSocket::new_v4()?
	};

	socket.set_reuseaddr(true)?;
	socket.set_reuseport(true)?;
	socket.bind(config.bind_address)?;
	let listener = socket.listen(1024)?;

	let tls_acceptor = if let Some(tls) = &config.tls {
		tracing::info!("TLS enabled");
		let cert = tokio::fs::read(&tls.cert).await.context("failed to read api ssl cert")?;
		let key = tokio::fs::read(&tls.key)
			.await
			.context("failed to read api ssl private key")?;

		let key = rustls_pemfile::pkcs8_private_keys(&mut io::BufReader::new(io::Cursor::new(key)))?
			.into_iter()
			.next()
			.map(rustls::PrivateKey)
			.ok_or_else(|| anyhow::anyhow!("failed to find private key in api private key file"))?;

		let certs = rustls_pemfile::certs(&mut io::BufReader::new(io::Cursor::new(cert)))?
			.into_iter()
			.map(rustls::Certificate)
			.collect();

		Some(Arc::new(tokio_rustls::TlsAcceptor::from(Arc::new(
			rustls::ServerConfig::builder()
				.with_safe_defaults()
				.with_no_client_auth()
				.with_single_cert(certs, key)?,
		))))
	} else {
		None
	};

	// Routes only hold a Weak reference to the global state. A keep-alive
	// connection keeps its request service alive, and a strong reference there
	// would stop the global state from ever being dropped on shutdown.
	let router = routes(&global).map_err(|err| anyhow::anyhow!("failed to build router: {err}"))?;
	let request_service =
		RequestServiceBuilder::new(router).map_err(|err| anyhow::anyhow!("failed to build request service: {err}"))?;

	loop {
		select! {
			_ = global.ctx().done() => {
				return Ok(());
			},
			r = listener.accept() => {
				let (socket, addr) = r?;

				let tls_acceptor = tls_acceptor.clone();
				let service = request_service.build(addr);

				tracing::debug!("accepted connection from {}", addr);

				tokio::spawn(async move {
					if let Some(tls_acceptor) = tls_acceptor {
						let Ok(Ok(socket)) = tls_acceptor.accept(socket).timeout(Duration::from_secs(5)).await else {
							return;
						};
						tracing::debug!("TLS handshake complete");
						Http::new().serve_connection(
							socket,
							service,
						).with_upgrades().await.ok();
					} else {
						Http::new().serve_connection(
							socket,
							service,
						).with_upgrades().await.ok();
					}
				});
			},
		}
	}
}
