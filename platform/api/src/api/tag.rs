use common::http::ext::{RequestGlobalExt, ResultExt};
use hyper::{Body, Request, Response, StatusCode};
use serde::Serialize;

use super::error::{ApiError, Result};
use super::json_response;
use super::models::Tag;
use crate::database;
use crate::global::ApiGlobal;

#[derive(Debug, Serialize)]
pub struct TagsResponse {
	pub tags: Vec<Tag>,
}

pub async fn tags<G: ApiGlobal>(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.get_global::<G, ApiError>()?;

	let tags: Vec<database::Tag> = sqlx::query_as("SELECT * FROM tags ORDER BY id")
		.fetch_all(global.db().as_ref())
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to get tags"))?;

	json_response(
		StatusCode::OK,
		&TagsResponse {
			tags: tags.into_iter().map(Tag::from).collect(),
		},
	)
}
