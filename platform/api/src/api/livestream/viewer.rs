use common::http::ext::{RequestGlobalExt, ResultExt};
use common::http::RouteError;
use hyper::{Body, Request, Response, StatusCode};

use super::{is_foreign_key_violation, livestream_id};
use crate::api::auth::require_auth;
use crate::api::error::{ApiError, Result};
use crate::database::LivestreamViewer;
use crate::global::ApiGlobal;

pub async fn enter<G: ApiGlobal>(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.get_global::<G, ApiError>()?;
	let auth = require_auth(&req).await?;

	let livestream_id = livestream_id(&req)?;

	let mut tx = global
		.db()
		.begin()
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to begin transaction"))?;

	let viewer: LivestreamViewer = sqlx::query_as(
		"INSERT INTO livestream_viewers_history (user_id, livestream_id, created_at) VALUES ($1, $2, $3) RETURNING *",
	)
	.bind(auth.user_id())
	.bind(livestream_id)
	.bind(chrono::Utc::now().timestamp())
	.fetch_one(&mut *tx)
	.await
	.map_err(|err| {
		if is_foreign_key_violation(&err) {
			RouteError::<ApiError>::from((StatusCode::NOT_FOUND, "livestream not found", err))
		} else {
			RouteError::<ApiError>::from((
				StatusCode::INTERNAL_SERVER_ERROR,
				"failed to insert livestream viewer history",
				err,
			))
		}
	})?;

	tx.commit()
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to commit transaction"))?;

	tracing::debug!(user_id = viewer.user_id, livestream_id = viewer.livestream_id, "viewer entered");

	Ok(Response::new(Body::empty()))
}

pub async fn exit<G: ApiGlobal>(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.get_global::<G, ApiError>()?;
	let auth = require_auth(&req).await?;

	let livestream_id = livestream_id(&req)?;

	let mut tx = global
		.db()
		.begin()
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to begin transaction"))?;

	let removed = sqlx::query("DELETE FROM livestream_viewers_history WHERE user_id = $1 AND livestream_id = $2")
		.bind(auth.user_id())
		.bind(livestream_id)
		.execute(&mut *tx)
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to delete livestream viewer history"))?
		.rows_affected();

	tx.commit()
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to commit transaction"))?;

	tracing::debug!(user_id = auth.user_id(), livestream_id, removed, "viewer exited");

	Ok(Response::new(Body::empty()))
}
