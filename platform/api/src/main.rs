use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use common::context::Context;
use common::{logging, signal};
use livestream_api::config::{ApiConfig, AppConfig};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::ConnectOptions;
use tokio::{select, time};

struct GlobalState {
	ctx: Context,
	config: AppConfig,
	db: Arc<sqlx::PgPool>,
}

impl common::global::GlobalCtx for GlobalState {
	#[inline(always)]
	fn ctx(&self) -> &Context {
		&self.ctx
	}
}

impl common::global::GlobalConfig for GlobalState {}

impl common::global::GlobalConfigProvider<ApiConfig> for GlobalState {
	#[inline(always)]
	fn provide_config(&self) -> &ApiConfig {
		&self.config.api
	}
}

impl common::global::GlobalDb for GlobalState {
	#[inline(always)]
	fn db(&self) -> &Arc<sqlx::PgPool> {
		&self.db
	}
}

async fn setup_database(config: &AppConfig) -> anyhow::Result<Arc<sqlx::PgPool>> {
	let options = PgConnectOptions::from_str(&config.database.uri)
		.context("failed to parse database uri")?
		.application_name(&config.name)
		.disable_statement_logging();

	let db = PgPoolOptions::new()
		.max_connections(config.database.max_connections)
		.connect_with(options)
		.await
		.context("failed to connect to database")?;

	if config.database.migrate {
		sqlx::migrate!("./migrations")
			.run(&db)
			.await
			.context("failed to run migrations")?;
		tracing::info!("database migrations applied");
	}

	tracing::info!("connected to database");

	Ok(Arc::new(db))
}

async fn run() -> anyhow::Result<()> {
	let config = AppConfig::parse()
		.map_err(|err| {
			let _ = logging::init("info", Default::default());
			err
		})
		.context("failed to parse config")?;

	logging::init(&config.logging.level, config.logging.mode).context("failed to init logging")?;

	if let Some(file) = &config.config_file {
		tracing::info!(file = file, "loaded config from file");
	}

	tracing::info!(name = config.name, "starting up");
	tracing::debug!("config: {:#?}", config);

	let (ctx, handler) = Context::new();

	let db = setup_database(&config).await?;

	let global = Arc::new(GlobalState { ctx, config, db });

	let api_future = tokio::spawn(livestream_api::api::run(global.clone()));

	let mut signal_handler = signal::SignalHandler::shutdown().context("failed to register signal handlers")?;

	select! {
		r = api_future => match r {
			Ok(Ok(())) => tracing::warn!("api stopped"),
			Ok(Err(err)) => tracing::error!("api stopped unexpectedly: {:#}", err),
			Err(err) => tracing::error!("api task panicked: {}", err),
		},
		_ = signal_handler.recv() => tracing::info!("shutting down"),
	}

	// Holding a context here would keep the handler waiting forever.
	drop(global);

	tracing::info!("waiting for tasks to finish");

	select! {
		_ = time::sleep(Duration::from_secs(60)) => tracing::warn!("force shutting down"),
		_ = signal_handler.recv() => tracing::warn!("force shutting down"),
		_ = handler.cancel() => tracing::info!("shutting down"),
	}

	Ok(())
}

#[tokio::main]
async fn main() {
	if let Err(err) = run().await {
		tracing::error!("{:#}", err);
		std::process::exit(1);
	}
}
