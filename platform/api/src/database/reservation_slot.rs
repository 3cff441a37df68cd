#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct ReservationSlot {
	/// The unique identifier for the slot.
	pub id: i64,
	/// Remaining number of livestreams that may still be reserved in this window.
	pub slot: i64,
	/// UNIX time the window opens.
	pub start_at: i64,
	/// UNIX time the window closes.
	pub end_at: i64,
}
