//! Joins database rows into response models.
//!
//! Every `fill_*` function issues a fixed number of batched queries no matter
//! how many rows it is given. The `join_*` functions do the in-memory part and
//! never touch the database.

use std::collections::HashMap;

use itertools::Itertools;
use sqlx::PgConnection;

use super::models;
use crate::database;

/// Icon hash of the placeholder image shown for users without an icon.
pub const FALLBACK_ICON_HASH: &str = "d9f8294e9d895f81ce62e73dc7d5dff862a4fa40bd4e0fecf53f7526a8edcac0";

#[derive(thiserror::Error, Debug)]
pub enum FillError {
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
	#[error("user {0} not found")]
	UserNotFound(i64),
	#[error("livestream {0} not found")]
	LivestreamNotFound(i64),
	#[error("livecomment {0} not found")]
	LivecommentNotFound(i64),
}

/// Users keyed by id. The lowest-id theme of a user applies, the highest-id
/// icon is the current one.
pub fn join_users(
	users: Vec<database::User>,
	themes: Vec<database::Theme>,
	icons: Vec<database::Icon>,
) -> HashMap<i64, models::User> {
	let mut themes_by_user = HashMap::new();
	for theme in themes.into_iter().sorted_by_key(|t| t.id) {
		themes_by_user.entry(theme.user_id).or_insert(theme);
	}

	let icons_by_user: HashMap<i64, String> = icons
		.into_iter()
		.sorted_by_key(|i| i.id)
		.map(|i| (i.user_id, i.icon_hash))
		.collect();

	users
		.into_iter()
		.map(|user| {
			let theme = themes_by_user.remove(&user.id).map(models::Theme::from).unwrap_or_default();
			let icon_hash = icons_by_user
				.get(&user.id)
				.cloned()
				.unwrap_or_else(|| FALLBACK_ICON_HASH.to_string());

			(
				user.id,
				models::User {
					id: user.id,
					name: user.name,
					display_name: user.display_name,
					description: user.description,
					theme,
					icon_hash,
				},
			)
		})
		.collect()
}

/// Livestreams in input order. Tags follow `livestream_tags` id order, tag ids
/// missing from `tags` are dropped.
pub fn join_livestreams(
	livestreams: Vec<database::Livestream>,
	owners: &HashMap<i64, models::User>,
	livestream_tags: Vec<database::LivestreamTag>,
	tags: &HashMap<i64, models::Tag>,
) -> Result<Vec<models::Livestream>, FillError> {
	let mut tag_ids_by_livestream = livestream_tags
		.into_iter()
		.sorted_by_key(|lt| lt.id)
		.map(|lt| (lt.livestream_id, lt.tag_id))
		.into_group_map();

	livestreams
		.into_iter()
		.map(|livestream| {
			let owner = owners
				.get(&livestream.user_id)
				.cloned()
				.ok_or(FillError::UserNotFound(livestream.user_id))?;

			let tags = tag_ids_by_livestream
				.remove(&livestream.id)
				.unwrap_or_default()
				.into_iter()
				.filter_map(|tag_id| tags.get(&tag_id).cloned())
				.collect();

			Ok(models::Livestream {
				id: livestream.id,
				owner,
				title: livestream.title,
				description: livestream.description,
				playlist_url: livestream.playlist_url,
				thumbnail_url: livestream.thumbnail_url,
				tags,
				start_at: livestream.start_at,
				end_at: livestream.end_at,
			})
		})
		.collect()
}

/// Reports in input order.
pub fn join_livecomment_reports(
	reports: Vec<database::LivecommentReport>,
	livecomments: &HashMap<i64, database::Livecomment>,
	livestreams: &HashMap<i64, models::Livestream>,
	users: &HashMap<i64, models::User>,
) -> Result<Vec<models::LivecommentReport>, FillError> {
	let user = |id: i64| users.get(&id).cloned().ok_or(FillError::UserNotFound(id));

	reports
		.into_iter()
		.map(|report| {
			let livecomment = livecomments
				.get(&report.livecomment_id)
				.ok_or(FillError::LivecommentNotFound(report.livecomment_id))?;

			let livestream = livestreams
				.get(&livecomment.livestream_id)
				.cloned()
				.ok_or(FillError::LivestreamNotFound(livecomment.livestream_id))?;

			Ok(models::LivecommentReport {
				id: report.id,
				reporter: user(report.user_id)?,
				livecomment: models::Livecomment {
					id: livecomment.id,
					user: user(livecomment.user_id)?,
					livestream,
					comment: livecomment.comment.clone(),
					tip: livecomment.tip,
					created_at: livecomment.created_at,
				},
				created_at: report.created_at,
			})
		})
		.collect()
}

pub async fn fetch_users(conn: &mut PgConnection, ids: &[i64]) -> Result<HashMap<i64, models::User>, FillError> {
	let ids: Vec<i64> = ids.iter().copied().unique().collect();
	if ids.is_empty() {
		return Ok(HashMap::new());
	}

	let users: Vec<database::User> =
		sqlx::query_as("SELECT id, name, display_name, description FROM users WHERE id = ANY($1)")
			.bind(&ids)
			.fetch_all(&mut *conn)
			.await?;

	let themes: Vec<database::Theme> = sqlx::query_as("SELECT * FROM themes WHERE user_id = ANY($1)")
		.bind(&ids)
		.fetch_all(&mut *conn)
		.await?;

	let icons: Vec<database::Icon> = sqlx::query_as("SELECT id, user_id, icon_hash FROM icons WHERE user_id = ANY($1)")
		.bind(&ids)
		.fetch_all(&mut *conn)
		.await?;

	Ok(join_users(users, themes, icons))
}

pub async fn fill_livestreams(
	conn: &mut PgConnection,
	livestreams: Vec<database::Livestream>,
) -> Result<Vec<models::Livestream>, FillError> {
	if livestreams.is_empty() {
		return Ok(Vec::new());
	}

	let livestream_ids: Vec<i64> = livestreams.iter().map(|l| l.id).collect();

	let livestream_tags: Vec<database::LivestreamTag> =
		sqlx::query_as("SELECT * FROM livestream_tags WHERE livestream_id = ANY($1)")
			.bind(&livestream_ids)
			.fetch_all(&mut *conn)
			.await?;

	let tag_ids: Vec<i64> = livestream_tags.iter().map(|lt| lt.tag_id).unique().collect();
	let tags: HashMap<i64, models::Tag> = if tag_ids.is_empty() {
		HashMap::new()
	} else {
		sqlx::query_as::<_, database::Tag>("SELECT * FROM tags WHERE id = ANY($1)")
			.bind(&tag_ids)
			.fetch_all(&mut *conn)
			.await?
			.into_iter()
			.map(|tag| (tag.id, models::Tag::from(tag)))
			.collect()
	};

	let owner_ids: Vec<i64> = livestreams.iter().map(|l| l.user_id).collect();
	let owners = fetch_users(conn, &owner_ids).await?;

	join_livestreams(livestreams, &owners, livestream_tags, &tags)
}

pub async fn fill_livestream(
	conn: &mut PgConnection,
	livestream: database::Livestream,
) -> Result<models::Livestream, FillError> {
	let id = livestream.id;

	fill_livestreams(conn, vec![livestream])
		.await?
		.pop()
		.ok_or(FillError::LivestreamNotFound(id))
}

pub async fn fill_livecomment_reports(
	conn: &mut PgConnection,
	reports: Vec<database::LivecommentReport>,
) -> Result<Vec<models::LivecommentReport>, FillError> {
	if reports.is_empty() {
		return Ok(Vec::new());
	}

	let livecomment_ids: Vec<i64> = reports.iter().map(|r| r.livecomment_id).unique().collect();
	let livecomments: HashMap<i64, database::Livecomment> =
		sqlx::query_as::<_, database::Livecomment>("SELECT * FROM livecomments WHERE id = ANY($1)")
			.bind(&livecomment_ids)
			.fetch_all(&mut *conn)
			.await?
			.into_iter()
			.map(|l| (l.id, l))
			.collect();

	let livestream_ids: Vec<i64> = livecomments.values().map(|l| l.livestream_id).unique().collect();
	let livestreams: Vec<database::Livestream> = sqlx::query_as("SELECT * FROM livestreams WHERE id = ANY($1)")
		.bind(&livestream_ids)
		.fetch_all(&mut *conn)
		.await?;
	let livestreams: HashMap<i64, models::Livestream> = fill_livestreams(conn, livestreams)
		.await?
		.into_iter()
		.map(|l| (l.id, l))
		.collect();

	let user_ids: Vec<i64> = reports
		.iter()
		.map(|r| r.user_id)
		.chain(livecomments.values().map(|l| l.user_id))
		.collect();
	let users = fetch_users(conn, &user_ids).await?;

	join_livecomment_reports(reports, &livecomments, &livestreams, &users)
}
