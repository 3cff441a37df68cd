use common::http::RouteError;

use super::auth::AuthError;
use super::fill::FillError;

pub type Result<T, E = RouteError<ApiError>> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
	#[error("failed to read http body: {0}")]
	ReadHttpBody(#[from] hyper::Error),
	#[error("failed to parse json: {0}")]
	ParseJson(#[from] serde_json::Error),
	#[error("failed to parse integer: {0}")]
	ParseInt(#[from] std::num::ParseIntError),
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
	#[error("failed to fill response: {0}")]
	Fill(#[from] FillError),
	#[error("auth error: {0}")]
	Auth(AuthError),
}
