use std::borrow::Cow;

use aide::axum::{routing::get_with, ApiRouter};
use axum::http::StatusCode;
use serde_json::json;

use crate::{error, store, AppState};

pub mod model;
pub mod route;
mod service;

pub use service::PostService;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown post {0}")]
	UnknownPost(i64),
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("store error: {0}")]
	Store(#[from] store::Error),
}

pub type RouteError = error::RouteError<Error>;

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/",
			get_with(get_posts, get_posts_docs).post_with(create_post, create_post_docs),
		)
		.api_route(
			"/:id",
			get_with(get_post, get_post_docs)
				.put_with(update_post, update_post_docs)
				.delete_with(delete_post, delete_post_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownPost(..) => StatusCode::NOT_FOUND,
			// Anything unclassified is reported as a bad request.
			Self::Validation(..) | Self::Store(..) => StatusCode::BAD_REQUEST,
		}
	}

	fn message(&self) -> Cow<'_, str> {
		match self {
			Self::UnknownPost(..) => "unknown post".into(),
			Self::Validation(..) => "invalid input".into(),
			Self::Store(..) => "request failed".into(),
		}
	}

	fn errors(&self) -> Vec<error::Message<'_>> {
		match self {
			Self::UnknownPost(post) => vec![error::Message {
				content: "unknown_post".into(),
				field: None,
				details: Some(Cow::Owned({
					let mut map = error::Map::new();
					map.insert("post".into(), json!(post));
					map
				})),
			}],
			Self::Validation(errors) => error::validation_messages(errors),
			Self::Store(..) => Vec::new(),
		}
	}

	fn internal(&self) -> bool {
		matches!(self, Self::Store(..))
	}
}
