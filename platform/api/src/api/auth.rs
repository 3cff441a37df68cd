use common::http::RouteError;
use hyper::{Body, Request, StatusCode};
use routerify::ext::RequestExt;

use super::error::{ApiError, Result};
use super::request_context::RequestContext;
use crate::database::Session;

#[derive(thiserror::Error, Debug, Clone)]
pub enum AuthError {
	#[error("token must be ascii only")]
	HeaderToStr,
	#[error("token must be a bearer token")]
	NotBearerToken,
	#[error("not logged in")]
	NotLoggedIn,
	#[error("invalid token")]
	InvalidToken,
	#[error("session expired")]
	SessionExpired,
}

impl From<AuthError> for RouteError<ApiError> {
	#[track_caller]
	fn from(value: AuthError) -> Self {
		let message = match &value {
			AuthError::HeaderToStr => "token must be ascii only",
			AuthError::NotBearerToken => "token must be a bearer token",
			AuthError::NotLoggedIn => "not logged in",
			AuthError::InvalidToken => "invalid token",
			AuthError::SessionExpired => "session expired",
		};

		RouteError::from((StatusCode::UNAUTHORIZED, message)).with_source(Some(ApiError::Auth(value)))
	}
}

#[derive(Debug, Clone)]
pub struct AuthData {
	pub session: Session,
}

impl AuthData {
	pub fn user_id(&self) -> i64 {
		self.session.user_id
	}
}

/// The signed-in user of the request, or 401.
pub async fn require_auth(req: &Request<Body>) -> Result<AuthData> {
	let Some(context) = req.context::<RequestContext>() else {
		return Err((StatusCode::INTERNAL_SERVER_ERROR, "missing request context").into());
	};

	Ok(context.auth().await?.ok_or(AuthError::NotLoggedIn)?)
}
