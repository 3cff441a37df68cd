#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct Livecomment {
	pub id: i64,
	/// The author of the comment.
	pub user_id: i64,
	pub livestream_id: i64,
	pub comment: String,
	pub tip: i64,
	pub created_at: i64,
}
