#![warn(clippy::pedantic)]

mod config;
mod error;
mod extract;
mod hal;
mod model;
mod openapi;
mod route;
mod store;
mod trace;

use std::sync::Arc;

use aide::{axum::ApiRouter, openapi::OpenApi};
use axum::{middleware, Extension, Router};
use tower_http::cors::CorsLayer;

use crate::{
	config::Config,
	hal::LinkBuilder,
	route::post::PostService,
	store::{MemoryStore, PgStore, PostStore},
};

pub type Database = sqlx::Pool<sqlx::Postgres>;
pub type AppState = State;

/// The canonical path of the post collection.
pub const BOARDS_PATH: &str = "/boards";

/// The shared application state.
///
/// Built once at startup. Handlers only reach the store through
/// the post service.
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub posts: PostService,
	pub links: LinkBuilder,
}

impl State {
	pub fn new(store: Arc<dyn PostStore>, public_url: &str) -> Self {
		Self {
			posts: PostService::new(store),
			links: LinkBuilder::new(public_url, BOARDS_PATH),
		}
	}
}

/// Builds the full router, including the API documentation.
pub fn app(state: AppState) -> Router {
	let mut api = OpenApi::default();

	ApiRouter::new()
		.nest_api_service(BOARDS_PATH, route::post::routes().with_state(state))
		.nest_api_service("/docs", route::docs::routes())
		.finish_api_with(&mut api, openapi::docs)
		.fallback(error::not_found)
		.layer(Extension(Arc::new(api)))
		.layer(middleware::map_response(error::bare_responses))
		.layer(CorsLayer::permissive())
		.layer(trace::http_layer())
}

#[tokio::main]
async fn main() {
	let config = Config::from_env().expect("invalid configuration");

	trace::init_tracing_subscriber(config.log_level);

	let store: Arc<dyn PostStore> = if let Some(url) = &config.database_url {
		Arc::new(
			PgStore::connect(url, config.database_max_connections)
				.await
				.expect("failed to connect to database"),
		)
	} else {
		tracing::warn!("DATABASE_URL is not set, posts will only be kept in memory");

		Arc::new(MemoryStore::new())
	};

	let state = State::new(store, &config.public_url);

	if config.seed_posts > 0 {
		state
			.posts
			.seed(config.seed_posts)
			.await
			.expect("failed to seed posts");

		tracing::info!(count = config.seed_posts, "seeded demo posts");
	}

	let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
		.await
		.expect("failed to bind to port");

	tracing::info!("listening on {}:{}", config.host, config.port);

	axum::serve(listener, app(state))
		.with_graceful_shutdown(shutdown_signal())
		.await
		.expect("server error");
}

async fn shutdown_signal() {
	if let Err(error) = tokio::signal::ctrl_c().await {
		tracing::error!(%error, "failed to listen for ctrl-c");
		std::future::pending::<()>().await;
	}

	tracing::info!("shutting down");
}

#[cfg(test)]
mod test {
	use std::sync::Arc;

	pub use axum_test::TestServer;
	pub use serde_json::{json, Value};

	use crate::store::MemoryStore;

	/// A server backed by an empty in-memory store.
	pub fn app() -> TestServer {
		let state = super::State::new(Arc::new(MemoryStore::new()), "");

		TestServer::new(super::app(state)).unwrap()
	}

	#[tokio::test]
	async fn test_docs_are_served() {
		let app = app();

		let response = app.get("/docs/private/api.json").await;

		assert_eq!(response.status_code(), 200);
		let api = response.json::<Value>();
		let paths = api["paths"].as_object().unwrap();

		assert!(paths.keys().any(|path| path.starts_with("/boards")));
	}

	#[tokio::test]
	async fn test_unknown_routes_get_an_error_body() {
		let app = app();

		for path in ["/nope", "/boards/1/comments"] {
			let response = app.get(path).await;

			assert_eq!(response.status_code(), 404);

			let body = response.json::<Value>();

			assert_eq!(body["status"], 404);
			assert_eq!(body["message"], "not found");
			assert_eq!(body["errors"][0]["details"]["path"], path);
		}
	}
}
