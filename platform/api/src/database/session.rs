#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct Session {
	/// The opaque token handed to the client.
	pub id: String,
	/// Foreign key to the user table.
	pub user_id: i64,
	/// UNIX time after which the session is no longer accepted.
	pub expires_at: i64,
}

impl Session {
	pub fn is_valid(&self) -> bool {
		self.expires_at > chrono::Utc::now().timestamp()
	}
}
