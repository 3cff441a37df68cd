use std::fmt::{Debug, Display};
use std::panic::Location;

use hyper::{Body, Response, StatusCode};
use routerify::RequestInfo;
use serde_json::json;

#[macro_export]
macro_rules! make_response {
	($status:expr, $body:expr) => {
		hyper::Response::builder()
			.status($status)
			.header("Content-Type", "application/json")
			.body(hyper::Body::from($body.to_string()))
			.expect("failed to build response")
	};
}

fn error_body(message: &str) -> serde_json::Value {
	json!({ "message": message, "success": false })
}

/// Router error handler. Turns a [`RouteError`] back into its response and
/// logs it according to [`RouteError::should_log`].
pub async fn error_handler<E: std::error::Error + 'static>(
	err: Box<(dyn std::error::Error + Send + Sync + 'static)>,
	info: RequestInfo,
) -> Response<Body> {
	match err.downcast::<RouteError<E>>() {
		Ok(err) => {
			let location = err.location();

			err.span().in_scope(|| match err.should_log() {
				ShouldLog::Yes => {
					tracing::error!(path = %info.uri(), method = %info.method(), location = %location, error = ?err, "http error")
				}
				ShouldLog::Debug => {
					tracing::debug!(path = %info.uri(), method = %info.method(), location = %location, error = ?err, "http error")
				}
				ShouldLog::No => (),
			});

			err.response()
		}
		Err(err) => {
			tracing::error!(path = %info.uri(), method = %info.method(), error = ?err, "unhandled http error");
			make_response!(StatusCode::INTERNAL_SERVER_ERROR, error_body("Internal Server Error"))
		}
	}
}

pub struct RouteError<E> {
	source: Option<E>,
	location: &'static Location<'static>,
	span: tracing::Span,
	response: Response<Body>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShouldLog {
	Yes,
	Debug,
	No,
}

impl<E> RouteError<E> {
	#[track_caller]
	fn new(response: Response<Body>) -> Self {
		Self {
			source: None,
			location: Location::caller(),
			span: tracing::Span::current(),
			response,
		}
	}

	pub fn span(&self) -> &tracing::Span {
		&self.span
	}

	pub fn location(&self) -> &'static Location<'static> {
		self.location
	}

	pub fn status(&self) -> StatusCode {
		self.response.status()
	}

	pub fn source_ref(&self) -> Option<&E> {
		self.source.as_ref()
	}

	pub fn response(self) -> Response<Body> {
		self.response
	}

	/// Server errors are always logged, client errors only at debug level and
	/// only when they wrap an underlying error.
	pub fn should_log(&self) -> ShouldLog {
		if self.response.status().is_server_error() {
			ShouldLog::Yes
		} else if self.source.is_some() {
			ShouldLog::Debug
		} else {
			ShouldLog::No
		}
	}

	pub fn with_source(mut self, source: Option<E>) -> Self {
		self.source = source;
		self
	}

	pub fn with_location(mut self, location: &'static Location<'static>) -> Self {
		self.location = location;
		self
	}
}

impl<E> From<Response<Body>> for RouteError<E> {
	#[track_caller]
	fn from(res: Response<Body>) -> Self {
		Self::new(res)
	}
}

impl<E, S: AsRef<str>> From<(StatusCode, S)> for RouteError<E> {
	#[track_caller]
	fn from((status, message): (StatusCode, S)) -> Self {
		Self::new(make_response!(status, error_body(message.as_ref())))
	}
}

impl<E, S: AsRef<str>, T> From<(StatusCode, S, T)> for RouteError<E>
where
	T: Into<E>,
{
	#[track_caller]
	fn from((status, message, source): (StatusCode, S, T)) -> Self {
		Self::new(make_response!(status, error_body(message.as_ref()))).with_source(Some(source.into()))
	}
}

impl<E> From<&'_ str> for RouteError<E> {
	#[track_caller]
	fn from(message: &'_ str) -> Self {
		Self::new(make_response!(StatusCode::INTERNAL_SERVER_ERROR, error_body(message)))
	}
}

impl<E: Debug> Debug for RouteError<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.source {
			Some(err) => write!(f, "RouteError({}): {:?}", self.response.status(), err),
			None => write!(f, "RouteError({}): Unknown Source", self.response.status()),
		}
	}
}

impl<E: Display> Display for RouteError<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.source {
			Some(err) => write!(f, "RouteError({}): {}", self.response.status(), err),
			None => write!(f, "RouteError({}): Unknown Source", self.response.status()),
		}
	}
}

impl<E: std::error::Error + 'static> std::error::Error for RouteError<E> {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match &self.source {
			Some(err) => Some(err),
			None => None,
		}
	}
}

pub mod ext {
	use std::panic::Location;
	use std::sync::{Arc, Weak};

	use hyper::StatusCode;

	use super::RouteError;

	pub trait ResultExt<T, E, E2>: Sized {
		fn map_err_route<C>(self, ctx: C) -> std::result::Result<T, RouteError<E2>>
		where
			RouteError<E2>: From<C>,
			E2: From<E>;
	}

	impl<T, E, E2> ResultExt<T, E, E2> for std::result::Result<T, E> {
		#[track_caller]
		fn map_err_route<C>(self, ctx: C) -> std::result::Result<T, RouteError<E2>>
		where
			RouteError<E2>: From<C>,
			E2: From<E>,
		{
			match self {
				Ok(val) => Ok(val),
				Err(err) => Err(RouteError::from(ctx)
					.with_source(Some(err.into()))
					.with_location(Location::caller())),
			}
		}
	}

	pub trait OptionExt<T, E>: Sized {
		fn map_err_route<C>(self, ctx: C) -> std::result::Result<T, RouteError<E>>
		where
			RouteError<E>: From<C>;
	}

	impl<T, E> OptionExt<T, E> for std::option::Option<T> {
		#[track_caller]
		fn map_err_route<C>(self, ctx: C) -> std::result::Result<T, RouteError<E>>
		where
			RouteError<E>: From<C>,
		{
			match self {
				Some(val) => Ok(val),
				None => Err(RouteError::from(ctx).with_location(Location::caller())),
			}
		}
	}

	pub trait RequestGlobalExt {
		/// Upgrades the `Weak<G>` the router was built with. Fails once the
		/// global state has been dropped for shutdown.
		fn get_global<G: Sync + Send + 'static, E>(&self) -> std::result::Result<Arc<G>, RouteError<E>>;
	}

	impl<B> RequestGlobalExt for hyper::Request<B>
	where
		Self: routerify::ext::RequestExt,
	{
		#[track_caller]
		fn get_global<G: Sync + Send + 'static, E>(&self) -> std::result::Result<Arc<G>, RouteError<E>> {
			use routerify::ext::RequestExt;

			self.data::<Weak<G>>()
				.and_then(Weak::upgrade)
				.ok_or_else(|| (StatusCode::SERVICE_UNAVAILABLE, "server is shutting down").into())
		}
	}
}
