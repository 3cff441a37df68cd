#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct Tag {
	pub id: i64,
	pub name: String,
}
