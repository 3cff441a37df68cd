use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
	pub id: i64,
	pub dark_mode: bool,
}

impl From<crate::database::Theme> for Theme {
	fn from(value: crate::database::Theme) -> Self {
		Self {
			id: value.id,
			dark_mode: value.dark_mode,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: i64,
	pub name: String,
	pub display_name: String,
	pub description: String,
	pub theme: Theme,
	pub icon_hash: String,
}
