use std::sync::Arc;

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

struct Alive(#[allow(dead_code)] oneshot::Sender<()>);

/// A cancellation signal shared by every task of the process.
///
/// Clones keep the process "busy": [`Handler::cancel`] only resolves once the
/// last clone is dropped.
#[derive(Clone)]
pub struct Context {
	token: CancellationToken,
	_alive: Arc<Alive>,
}

pub struct Handler {
	token: CancellationToken,
	recv: oneshot::Receiver<()>,
}

impl Context {
	#[must_use]
	pub fn new() -> (Self, Handler) {
		let (sender, recv) = oneshot::channel();
		let token = CancellationToken::new();

		(
			Self {
				token: token.clone(),
				_alive: Arc::new(Alive(sender)),
			},
			Handler { token, recv },
		)
	}

	pub async fn done(&self) {
		self.token.cancelled().await
	}

	pub fn is_done(&self) -> bool {
		self.token.is_cancelled()
	}
}

impl Handler {
	/// Cancels all contexts and waits for them to be dropped.
	pub async fn cancel(self) {
		self.token.cancel();

		let _ = self.recv.await;
	}
}
