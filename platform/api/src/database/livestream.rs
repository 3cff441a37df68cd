#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct Livestream {
	/// The unique identifier for the livestream.
	pub id: i64,
	/// The user who reserved the livestream.
	pub user_id: i64,
	pub title: String,
	pub description: String,
	pub playlist_url: String,
	pub thumbnail_url: String,
	/// UNIX time the reserved window opens.
	pub start_at: i64,
	/// UNIX time the reserved window closes.
	pub end_at: i64,
}
