use common::http::ext::{RequestGlobalExt, ResultExt};
use hyper::{Body, Request, Response, StatusCode};
use routerify::ext::RequestExt;

use super::{livestream_id, query_param};
use crate::api::auth::require_auth;
use crate::api::error::{ApiError, Result};
use crate::api::{fill, json_response};
use crate::database::{Livestream, Tag, User};
use crate::global::ApiGlobal;

/// An absent or empty `limit` means no limit.
pub fn parse_limit(limit: Option<&str>) -> Result<Option<i64>> {
	let Some(limit) = limit.filter(|l| !l.is_empty()) else {
		return Ok(None);
	};

	let limit: i64 = limit
		.parse()
		.map_err_route((StatusCode::BAD_REQUEST, "limit query parameter must be integer"))?;

	if limit < 0 {
		return Err((StatusCode::BAD_REQUEST, "limit query parameter must not be negative").into());
	}

	Ok(Some(limit))
}

pub async fn search<G: ApiGlobal>(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.get_global::<G, ApiError>()?;

	let tag = query_param(&req, "tag").filter(|t| !t.is_empty());
	// A tag search always returns every tagged livestream.
	let limit = match tag {
		Some(_) => None,
		None => parse_limit(query_param(&req, "limit").as_deref())?,
	};

	let mut tx = global
		.db()
		.begin()
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to begin transaction"))?;

	let livestreams: Vec<Livestream> = if let Some(tag) = tag {
		let tag: Option<Tag> = sqlx::query_as("SELECT * FROM tags WHERE name = $1")
			.bind(&tag)
			.fetch_optional(&mut *tx)
			.await
			.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to get tag"))?;

		let livestream_ids: Vec<i64> = match tag {
			Some(tag) => {
				sqlx::query_scalar("SELECT livestream_id FROM livestream_tags WHERE tag_id = $1 ORDER BY livestream_id DESC")
					.bind(tag.id)
					.fetch_all(&mut *tx)
					.await
					.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to get livestream tags"))?
			}
			None => Vec::new(),
		};

		if livestream_ids.is_empty() {
			Vec::new()
		} else {
			sqlx::query_as("SELECT * FROM livestreams WHERE id = ANY($1) ORDER BY id DESC")
				.bind(&livestream_ids)
				.fetch_all(&mut *tx)
				.await
				.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to get livestreams"))?
		}
	} else {
		// Postgres treats `LIMIT NULL` as no limit.
		sqlx::query_as("SELECT * FROM livestreams ORDER BY id DESC LIMIT $1")
			.bind(limit)
			.fetch_all(&mut *tx)
			.await
			.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to get livestreams"))?
	};

	let livestreams = fill::fill_livestreams(&mut *tx, livestreams)
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to fill livestreams"))?;

	tx.commit()
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to commit transaction"))?;

	json_response(StatusCode::OK, &livestreams)
}

pub async fn mine<G: ApiGlobal>(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.get_global::<G, ApiError>()?;
	let auth = require_auth(&req).await?;

	let mut tx = global
		.db()
		.begin()
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to begin transaction"))?;

	let livestreams: Vec<Livestream> = sqlx::query_as("SELECT * FROM livestreams WHERE user_id = $1 ORDER BY id")
		.bind(auth.user_id())
		.fetch_all(&mut *tx)
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to get livestreams"))?;

	let livestreams = fill::fill_livestreams(&mut *tx, livestreams)
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to fill livestreams"))?;

	tx.commit()
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to commit transaction"))?;

	json_response(StatusCode::OK, &livestreams)
}

pub async fn user_livestreams<G: ApiGlobal>(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.get_global::<G, ApiError>()?;
	require_auth(&req).await?;

	let username = req.param("username").cloned().unwrap_or_default();

	let mut tx = global
		.db()
		.begin()
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to begin transaction"))?;

	let user: Option<User> = sqlx::query_as("SELECT id, name, display_name, description FROM users WHERE name = $1")
		.bind(&username)
		.fetch_optional(&mut *tx)
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to get user"))?;

	let user = user.ok_or((StatusCode::NOT_FOUND, "user not found"))?;

	let livestreams: Vec<Livestream> = sqlx::query_as("SELECT * FROM livestreams WHERE user_id = $1 ORDER BY id")
		.bind(user.id)
		.fetch_all(&mut *tx)
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to get livestreams"))?;

	let livestreams = fill::fill_livestreams(&mut *tx, livestreams)
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to fill livestreams"))?;

	tx.commit()
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to commit transaction"))?;

	json_response(StatusCode::OK, &livestreams)
}

pub async fn get<G: ApiGlobal>(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.get_global::<G, ApiError>()?;
	require_auth(&req).await?;

	let livestream_id = livestream_id(&req)?;

	let mut tx = global
		.db()
		.begin()
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to begin transaction"))?;

	let livestream: Option<Livestream> = sqlx::query_as("SELECT * FROM livestreams WHERE id = $1")
		.bind(livestream_id)
		.fetch_optional(&mut *tx)
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to get livestream"))?;

	let livestream = livestream.ok_or((StatusCode::NOT_FOUND, "not found livestream that has the given id"))?;

	let livestream = fill::fill_livestream(&mut *tx, livestream)
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to fill livestream"))?;

	tx.commit()
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to commit transaction"))?;

	json_response(StatusCode::OK, &livestream)
}
