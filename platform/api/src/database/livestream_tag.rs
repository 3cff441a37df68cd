#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct LivestreamTag {
	pub id: i64,
	pub livestream_id: i64,
	pub tag_id: i64,
}
