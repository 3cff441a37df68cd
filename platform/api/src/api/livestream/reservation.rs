use common::http::ext::{RequestGlobalExt, ResultExt};
use common::http::RouteError;
use hyper::{Body, Request, Response, StatusCode};

use super::is_foreign_key_violation;
use crate::api::auth::require_auth;
use crate::api::error::{ApiError, Result};
use crate::api::{fill, json_response, read_body, MAX_BODY_SIZE};
use crate::database::{Livestream, ReservationSlot};
use crate::global::ApiGlobal;

/// 2023-11-25T01:00:00Z, the first reservable second.
pub const TERM_START_AT: i64 = 1700874000;
/// 2024-11-25T01:00:00Z, the end of the reservable term (exclusive).
pub const TERM_END_AT: i64 = 1732496400;

/// Absent fields and `null` tags decode to their zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ReserveLivestreamRequest {
	pub tags: Option<Vec<i64>>,
	pub title: String,
	pub description: String,
	pub playlist_url: String,
	pub thumbnail_url: String,
	pub start_at: i64,
	pub end_at: i64,
}

/// Whether the requested window overlaps the reservable term.
pub fn check_term(start_at: i64, end_at: i64) -> bool {
	start_at < TERM_END_AT && end_at > TERM_START_AT
}

pub fn first_full_slot(slots: &[ReservationSlot]) -> Option<&ReservationSlot> {
	slots.iter().find(|slot| slot.slot < 1)
}

pub async fn reserve<G: ApiGlobal>(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.get_global::<G, ApiError>()?;
	let auth = require_auth(&req).await?;

	let body = read_body(req.into_body(), MAX_BODY_SIZE).await?;

	let request: ReserveLivestreamRequest = serde_json::from_slice(&body)
		.map_err_route((StatusCode::BAD_REQUEST, "failed to decode the request body as json"))?;

	let mut tx = global
		.db()
		.begin()
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to begin transaction"))?;

	if !check_term(request.start_at, request.end_at) {
		return Err((StatusCode::BAD_REQUEST, "bad reservation time range").into());
	}

	// Locking every slot in the window keeps concurrent reservations from
	// observing the same remaining count.
	let slots: Vec<ReservationSlot> =
		sqlx::query_as("SELECT * FROM reservation_slots WHERE start_at >= $1 AND end_at <= $2 FOR UPDATE")
			.bind(request.start_at)
			.bind(request.end_at)
			.fetch_all(&mut *tx)
			.await
			.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to lock reservation slots"))?;

	for slot in &slots {
		tracing::info!(
			slot_id = slot.id,
			start_at = slot.start_at,
			end_at = slot.end_at,
			remaining = slot.slot,
			"reservation slot"
		);
	}

	if let Some(slot) = first_full_slot(&slots) {
		tracing::debug!(slot_id = slot.id, user_id = auth.user_id(), "reservation slot is full");

		return Err(RouteError::from((
			StatusCode::BAD_REQUEST,
			format!(
				"reservation term {TERM_START_AT} ~ {TERM_END_AT} has no free slot for {} ~ {}",
				request.start_at, request.end_at
			),
		)));
	}

	sqlx::query("UPDATE reservation_slots SET slot = slot - 1 WHERE start_at >= $1 AND end_at <= $2")
		.bind(request.start_at)
		.bind(request.end_at)
		.execute(&mut *tx)
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to update reservation slots"))?;

	let livestream: Livestream = sqlx::query_as(
		r#"
		INSERT INTO livestreams (
			user_id,
			title,
			description,
			playlist_url,
			thumbnail_url,
			start_at,
			end_at
		) VALUES (
			$1,
			$2,
			$3,
			$4,
			$5,
			$6,
			$7
		) RETURNING *
		"#,
	)
	.bind(auth.user_id())
	.bind(&request.title)
	.bind(&request.description)
	.bind(&request.playlist_url)
	.bind(&request.thumbnail_url)
	.bind(request.start_at)
	.bind(request.end_at)
	.fetch_one(&mut *tx)
	.await
	.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to insert livestream"))?;

	let tags = request.tags.unwrap_or_default();
	if !tags.is_empty() {
		sqlx::query("INSERT INTO livestream_tags (livestream_id, tag_id) SELECT $1, UNNEST($2::BIGINT[])")
			.bind(livestream.id)
			.bind(&tags)
			.execute(&mut *tx)
			.await
			.map_err(|err| {
				if is_foreign_key_violation(&err) {
					RouteError::<ApiError>::from((StatusCode::BAD_REQUEST, "unknown tag id", err))
				} else {
					RouteError::<ApiError>::from((
						StatusCode::INTERNAL_SERVER_ERROR,
						"failed to insert livestream tags",
						err,
					))
				}
			})?;
	}

	let livestream = fill::fill_livestream(&mut *tx, livestream)
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to fill livestream"))?;

	tx.commit()
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to commit transaction"))?;

	tracing::info!(user_id = auth.user_id(), livestream_id = livestream.id, "livestream reserved");

	json_response(StatusCode::CREATED, &livestream)
}
