#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct Theme {
	pub id: i64,
	pub user_id: i64,
	pub dark_mode: bool,
}
