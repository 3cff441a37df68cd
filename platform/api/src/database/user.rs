#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
	/// The unique identifier for the user.
	pub id: i64,
	/// The unique login name of the user.
	pub name: String,
	/// The name shown to other users.
	pub display_name: String,
	/// Free-form profile text.
	pub description: String,
}
