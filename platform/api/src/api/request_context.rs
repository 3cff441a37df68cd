use std::sync::Arc;

use tokio::sync::RwLock;

use super::auth::{AuthData, AuthError};

#[derive(Default, Clone)]
pub struct ContextData {
	pub auth: Option<AuthData>,
}

/// Per-request state shared between the middlewares and the handler.
#[derive(Default, Clone)]
pub struct RequestContext(Arc<RwLock<ContextData>>);

impl RequestContext {
	pub async fn set_auth(&self, data: AuthData) {
		let mut guard = self.0.write().await;
		guard.auth = Some(data);
	}

	/// A session can expire while a keep-alive request is still being handled.
	pub async fn auth(&self) -> Result<Option<AuthData>, AuthError> {
		match self.0.read().await.auth.clone() {
			Some(auth) if !auth.session.is_valid() => Err(AuthError::SessionExpired),
			auth => Ok(auth),
		}
	}
}
