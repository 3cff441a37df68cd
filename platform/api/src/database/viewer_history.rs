/// A row exists for as long as the user is watching the livestream.
#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct LivestreamViewer {
	pub id: i64,
	pub user_id: i64,
	pub livestream_id: i64,
	pub created_at: i64,
}
