/// Only the columns needed to render a user, the image itself stays in the
/// database.
#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct Icon {
	pub id: i64,
	pub user_id: i64,
	/// Hex encoded SHA-256 of the image.
	pub icon_hash: String,
}
