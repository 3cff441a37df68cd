use hyper::StatusCode;

use crate::api::livestream::parse_limit;

#[test]
fn test_parse_limit() {
	assert_eq!(parse_limit(None).expect("no limit"), None);
	assert_eq!(parse_limit(Some("")).expect("empty limit"), None);
	assert_eq!(parse_limit(Some("10")).expect("valid limit"), Some(10));
	assert_eq!(parse_limit(Some("0")).expect("zero limit"), Some(0));

	let err = parse_limit(Some("ten")).expect_err("limit is not an integer");
	assert_eq!(err.status(), StatusCode::BAD_REQUEST);

	let err = parse_limit(Some("-1")).expect_err("limit is negative");
	assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}
