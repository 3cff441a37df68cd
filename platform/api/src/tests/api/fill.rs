use std::collections::HashMap;

use crate::api::fill::{join_livecomment_reports, join_livestreams, join_users, FillError, FALLBACK_ICON_HASH};
use crate::api::models;
use crate::database;

fn user(id: i64, name: &str) -> database::User {
	database::User {
		id,
		name: name.to_string(),
		display_name: name.to_uppercase(),
		description: format!("{name} description"),
	}
}

fn livestream(id: i64, user_id: i64) -> database::Livestream {
	database::Livestream {
		id,
		user_id,
		title: format!("stream {id}"),
		..Default::default()
	}
}

fn livestream_tag(id: i64, livestream_id: i64, tag_id: i64) -> database::LivestreamTag {
	database::LivestreamTag {
		id,
		livestream_id,
		tag_id,
	}
}

#[test]
fn test_join_users_theme_and_icon() {
	let users = join_users(
		vec![user(1, "alice"), user(2, "bob")],
		vec![
			database::Theme {
				id: 7,
				user_id: 1,
				dark_mode: false,
			},
			database::Theme {
				id: 3,
				user_id: 1,
				dark_mode: true,
			},
		],
		vec![
			database::Icon {
				id: 10,
				user_id: 1,
				icon_hash: "new".to_string(),
			},
			database::Icon {
				id: 4,
				user_id: 1,
				icon_hash: "old".to_string(),
			},
		],
	);

	let alice = &users[&1];
	assert_eq!(alice.theme, models::Theme { id: 3, dark_mode: true });
	assert_eq!(alice.icon_hash, "new");
	assert_eq!(alice.display_name, "ALICE");

	let bob = &users[&2];
	assert_eq!(bob.theme, models::Theme { id: 0, dark_mode: false });
	assert_eq!(bob.icon_hash, FALLBACK_ICON_HASH);
}

#[test]
fn test_join_livestreams_keeps_order() {
	let owners = join_users(vec![user(1, "alice"), user(2, "bob")], vec![], vec![]);
	let tags: HashMap<i64, models::Tag> = [(1, "rust"), (2, "music")]
		.into_iter()
		.map(|(id, name)| {
			(
				id,
				models::Tag {
					id,
					name: name.to_string(),
				},
			)
		})
		.collect();

	let livestreams = join_livestreams(
		vec![livestream(9, 2), livestream(3, 1), livestream(5, 1)],
		&owners,
		vec![
			livestream_tag(3, 3, 1),
			livestream_tag(1, 3, 2),
			livestream_tag(2, 9, 42),
			livestream_tag(4, 9, 1),
		],
		&tags,
	)
	.expect("failed to join livestreams");

	assert_eq!(livestreams.iter().map(|l| l.id).collect::<Vec<_>>(), vec![9, 3, 5]);
	assert_eq!(livestreams[0].owner.name, "bob");

	// Unknown tag 42 is dropped.
	assert_eq!(livestreams[0].tags.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1]);
	// livestream_tags order, not tag order.
	assert_eq!(livestreams[1].tags.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 1]);
	assert!(livestreams[2].tags.is_empty());
}

#[test]
fn test_join_livestreams_missing_owner() {
	let err = join_livestreams(vec![livestream(1, 99)], &HashMap::new(), vec![], &HashMap::new())
		.expect_err("owner should be missing");

	assert!(matches!(err, FillError::UserNotFound(99)));
}

#[test]
fn test_join_livecomment_reports() {
	let users = join_users(vec![user(1, "owner"), user(2, "viewer"), user(3, "reporter")], vec![], vec![]);
	let stream = join_livestreams(vec![livestream(5, 1)], &users, vec![], &HashMap::new())
		.expect("failed to join livestreams")
		.remove(0);

	let livecomments = HashMap::from([(
		8,
		database::Livecomment {
			id: 8,
			user_id: 2,
			livestream_id: 5,
			comment: "spam".to_string(),
			tip: 0,
			created_at: 100,
		},
	)]);
	let livestreams = HashMap::from([(5, stream)]);

	let reports = join_livecomment_reports(
		vec![database::LivecommentReport {
			id: 1,
			user_id: 3,
			livestream_id: 5,
			livecomment_id: 8,
			created_at: 200,
		}],
		&livecomments,
		&livestreams,
		&users,
	)
	.expect("failed to join reports");

	assert_eq!(reports.len(), 1);
	assert_eq!(reports[0].reporter.name, "reporter");
	assert_eq!(reports[0].livecomment.user.name, "viewer");
	assert_eq!(reports[0].livecomment.livestream.owner.name, "owner");
	assert_eq!(reports[0].livecomment.comment, "spam");
	assert_eq!(reports[0].created_at, 200);

	let err = join_livecomment_reports(
		vec![database::LivecommentReport {
			livecomment_id: 404,
			..Default::default()
		}],
		&livecomments,
		&livestreams,
		&users,
	)
	.expect_err("livecomment should be missing");

	assert!(matches!(err, FillError::LivecommentNotFound(404)));
}
