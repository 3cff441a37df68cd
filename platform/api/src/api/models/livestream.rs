use serde::{Deserialize, Serialize};

use super::{Tag, User};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Livestream {
	pub id: i64,
	pub owner: User,
	pub title: String,
	pub description: String,
	pub playlist_url: String,
	pub thumbnail_url: String,
	pub tags: Vec<Tag>,
	pub start_at: i64,
	pub end_at: i64,
}
