use tokio::signal::unix::SignalKind;
use tokio::sync::mpsc;

pub struct SignalHandler {
	signal_send: mpsc::Sender<SignalKind>,
	signal_recv: mpsc::Receiver<SignalKind>,
}

impl Default for SignalHandler {
	fn default() -> Self {
		let (signal_send, signal_recv) = mpsc::channel(1);
		Self { signal_send, signal_recv }
	}
}

impl SignalHandler {
	pub fn new() -> Self {
		Self::default()
	}

	/// SIGINT and SIGTERM, the signals a supervisor sends to stop the process.
	pub fn shutdown() -> std::io::Result<Self> {
		Self::new()
			.with_signal(SignalKind::interrupt())?
			.with_signal(SignalKind::terminate())
	}

	pub fn with_signal(self, kind: SignalKind) -> std::io::Result<Self> {
		let mut signal = tokio::signal::unix::signal(kind)?;

		let send = self.signal_send.clone();
		tokio::spawn(async move {
			while signal.recv().await.is_some() {
				if send.send(kind).await.is_err() {
					break;
				}
			}
		});

		Ok(self)
	}

	/// Resolves with the next received signal. Pending forever when none of the
	/// registered listeners can fire any more.
	pub async fn recv(&mut self) -> SignalKind {
		match self.signal_recv.recv().await {
			Some(kind) => kind,
			None => std::future::pending().await,
		}
	}
}
