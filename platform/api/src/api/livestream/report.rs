use common::http::ext::{RequestGlobalExt, ResultExt};
use hyper::{Body, Request, Response, StatusCode};

use super::livestream_id;
use crate::api::auth::require_auth;
use crate::api::error::{ApiError, Result};
use crate::api::{fill, json_response};
use crate::database::{LivecommentReport, Livestream};
use crate::global::ApiGlobal;

/// Reports filed against a livestream's comments. Only the owner may read them.
pub async fn reports<G: ApiGlobal>(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.get_global::<G, ApiError>()?;
	let auth = require_auth(&req).await?;

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

	if livestream.user_id != auth.user_id() {
		return Err((StatusCode::FORBIDDEN, "can't get other streamer's livecomment reports").into());
	}

	let reports: Vec<LivecommentReport> =
		sqlx::query_as("SELECT * FROM livecomment_reports WHERE livestream_id = $1 ORDER BY id")
			.bind(livestream.id)
			.fetch_all(&mut *tx)
			.await
			.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to get livecomment reports"))?;

	let reports = fill::fill_livecomment_reports(&mut *tx, reports)
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to fill livecomment reports"))?;

	tx.commit()
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to commit transaction"))?;

	json_response(StatusCode::OK, &reports)
}
