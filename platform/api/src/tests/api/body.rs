use hyper::body::Bytes;
use hyper::{Body, StatusCode};

use crate::api::{read_body, MAX_BODY_SIZE};

#[tokio::test]
async fn test_read_body_within_limit() {
	let body = read_body(Body::from(r#"{"title": "title"}"#), MAX_BODY_SIZE)
		.await
		.expect("failed to read body");

	assert_eq!(body, br#"{"title": "title"}"#);
}

#[tokio::test]
async fn test_read_body_rejects_declared_length() {
	let err = read_body(Body::from(vec![b'a'; 10]), 4)
		.await
		.expect_err("body over the limit should be rejected");

	assert_eq!(err.response().status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_read_body_rejects_streamed_length() {
	let (mut sender, body) = Body::channel();

	// A chunked body declares no length up front.
	tokio::spawn(async move {
		for _ in 0..4 {
			if sender.send_data(Bytes::from_static(b"aaaa")).await.is_err() {
				break;
			}
		}
	});

	let err = read_body(body, 10)
		.await
		.expect_err("body over the limit should be rejected");

	assert_eq!(err.response().status(), StatusCode::PAYLOAD_TOO_LARGE);
}
