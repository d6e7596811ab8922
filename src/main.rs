#![warn(clippy::pedantic)]

mod config;
mod cookie;
mod error;
mod extract;
mod humanize;
mod model;
mod route;
mod store;
mod theme;
mod trace;
mod view;


use std::sync::Arc;

use axum::Router;
use sqlx::postgres::PgPoolOptions;

pub type Database = sqlx::Pool<sqlx::Postgres>;
pub type AppState = State;

/// The shared application state.
///
/// The store is the only shared dependency: view models are built per
/// request and never share state with each other.
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub store: store::SharedStore,
}

/// Builds the application router over the given state.
pub fn app(state: State) -> Router {
	trace::layer(route::routes()).with_state(state)
}

#[tokio::main]
async fn main() {
	dotenvy::dotenv().ok();
	trace::init_tracing_subscriber();

	let config = config::Config::from_env().expect("invalid configuration");

	let database = PgPoolOptions::new()
		.max_connections(config.max_connections)
		.connect(&config.database_url)
		.await
		.expect("failed to connect to database");

	if config.run_migrations {
		sqlx::migrate!()
			.run(&database)
			.await
			.expect("failed to run migrations");

		tracing::info!("migrations applied");
	}

	let state = State {
		store: Arc::new(store::PgStore::new(database)),
	};

	let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
		.await
		.expect("failed to bind to port");

	tracing::info!("listening on {}:{}", config.host, config.port);

	axum::serve(listener, app(state))
		.await
		.expect("server error");
}
