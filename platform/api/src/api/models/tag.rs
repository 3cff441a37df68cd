use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
	pub id: i64,
	pub name: String,
}

impl From<crate::database::Tag> for Tag {
	fn from(value: crate::database::Tag) -> Self {
		Self {
			id: value.id,
			name: value.name,
		}
	}
}
