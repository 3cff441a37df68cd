#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct LivecommentReport {
	pub id: i64,
	/// The user who filed the report.
	pub user_id: i64,
	pub livestream_id: i64,
	/// The reported comment.
	pub livecomment_id: i64,
	pub created_at: i64,
}
