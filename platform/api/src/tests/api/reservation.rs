use crate::api::livestream::{check_term, first_full_slot, ReserveLivestreamRequest, TERM_END_AT, TERM_START_AT};
use crate::database::ReservationSlot;

#[test]
fn test_check_term() {
	let hour = 3600;

	assert!(check_term(TERM_START_AT, TERM_START_AT + hour));
	assert!(check_term(TERM_END_AT - hour, TERM_END_AT));
	// Overlapping either edge is still accepted.
	assert!(check_term(TERM_START_AT - hour, TERM_START_AT + hour));
	assert!(check_term(TERM_END_AT - hour, TERM_END_AT + hour));

	assert!(!check_term(TERM_START_AT - 2 * hour, TERM_START_AT));
	assert!(!check_term(TERM_END_AT, TERM_END_AT + hour));
}

#[test]
fn test_first_full_slot() {
	let slot = |id, slot| ReservationSlot {
		id,
		slot,
		start_at: TERM_START_AT,
		end_at: TERM_START_AT + 3600,
	};

	assert_eq!(first_full_slot(&[]), None);
	assert_eq!(first_full_slot(&[slot(1, 5), slot(2, 1)]), None);
	assert_eq!(first_full_slot(&[slot(1, 5), slot(2, 0), slot(3, 0)]).map(|s| s.id), Some(2));
}

#[test]
fn test_decode_request() {
	let request: ReserveLivestreamRequest = serde_json::from_str(
		r#"{
			"title": "title",
			"description": "description",
			"playlist_url": "https://example.com/playlist.m3u8",
			"thumbnail_url": "https://example.com/thumbnail.jpg",
			"start_at": 1700874000,
			"end_at": 1700877600
		}"#,
	)
	.expect("failed to decode request");

	assert_eq!(request.tags, None);
	assert_eq!(request.start_at, TERM_START_AT);

	let request: ReserveLivestreamRequest =
		serde_json::from_str(r#"{"tags": null, "title": "title"}"#).expect("null tags should decode");
	assert_eq!(request.tags, None);
	assert_eq!(request.title, "title");
	assert_eq!(request.end_at, 0);

	let request: ReserveLivestreamRequest =
		serde_json::from_str(r#"{"tags": [1, 2]}"#).expect("failed to decode tags");
	assert_eq!(request.tags, Some(vec![1, 2]));

	assert_eq!(
		serde_json::from_str::<ReserveLivestreamRequest>("{}").expect("empty object should decode"),
		ReserveLivestreamRequest::default()
	);

	assert!(serde_json::from_str::<ReserveLivestreamRequest>(r#"{"title": 1}"#).is_err());
	assert!(serde_json::from_str::<ReserveLivestreamRequest>(r#"{"start_at": "soon"}"#).is_err());
	assert!(serde_json::from_str::<ReserveLivestreamRequest>(r#"{"tags": ["rust"]}"#).is_err());
}
