use std::sync::Arc;

use common::http::ext::{RequestGlobalExt, ResultExt};
use common::http::RouteError;
use hyper::http::header;
use hyper::{Body, StatusCode};
use routerify::ext::RequestExt;
use routerify::Middleware;

use crate::api::auth::{AuthData, AuthError};
use crate::api::error::ApiError;
use crate::api::request_context::RequestContext;
use crate::database::Session;
use crate::global::ApiGlobal;

/// Resolves the bearer token into a session. Requests without an
/// Authorization header pass through anonymously, a header that does not lead
/// to a live session is rejected here.
pub fn auth_middleware<G: ApiGlobal>(_: &Arc<G>) -> Middleware<Body, RouteError<ApiError>> {
	Middleware::pre(|req| async move {
		let context = RequestContext::default();
		req.set_context(context.clone());

		let Some(token) = req.headers().get(header::AUTHORIZATION) else {
			return Ok(req);
		};

		let token = token
			.to_str()
			.map_err(|_| AuthError::HeaderToStr)?
			.strip_prefix("Bearer ")
			.ok_or(AuthError::NotBearerToken)?;

		let global = req.get_global::<G, ApiError>()?;

		let session: Option<Session> = sqlx::query_as("SELECT * FROM user_sessions WHERE id = $1")
			.bind(token)
			.fetch_optional(global.db().as_ref())
			.await
			.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to fetch session"))?;

		let session = session.ok_or(AuthError::InvalidToken)?;
		if !session.is_valid() {
			return Err(AuthError::SessionExpired.into());
		}

		tracing::debug!(user_id = session.user_id, "authenticated request");

		context.set_auth(AuthData { session }).await;

		Ok(req)
	})
}
