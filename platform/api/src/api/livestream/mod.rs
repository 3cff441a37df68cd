use hyper::{Body, Request, StatusCode};
use routerify::ext::RequestExt;

use super::error::Result;

mod report;
mod reservation;
mod search;
mod viewer;

pub use report::reports;
pub use reservation::{check_term, first_full_slot, reserve, ReserveLivestreamRequest, TERM_END_AT, TERM_START_AT};
pub use search::{get, mine, parse_limit, search, user_livestreams};
pub use viewer::{enter, exit};

fn livestream_id(req: &Request<Body>) -> Result<i64> {
	req.param("livestream_id")
		.and_then(|id| id.parse().ok())
		.ok_or_else(|| (StatusCode::BAD_REQUEST, "livestream_id in path must be integer").into())
}

fn query_param(req: &Request<Body>, key: &str) -> Option<String> {
	req.uri().query().and_then(|v| {
		url::form_urlencoded::parse(v.as_bytes()).find_map(|(k, v)| if k == key { Some(v.to_string()) } else { None })
	})
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
	err.as_database_error()
		.is_some_and(|err| err.is_foreign_key_violation())
}
