use serde::{Deserialize, Serialize};

use super::{Livestream, User};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Livecomment {
	pub id: i64,
	pub user: User,
	pub livestream: Livestream,
	pub comment: String,
	pub tip: i64,
	pub created_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivecommentReport {
	pub id: i64,
	pub reporter: User,
	pub livecomment: Livecomment,
	pub created_at: i64,
}
