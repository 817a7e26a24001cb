use std::borrow::Cow;

use aide::OperationOutput;
use axum::{
	body::Body,
	extract::rejection,
	http::{header, Response, StatusCode, Uri},
	response::IntoResponse,
	Json,
};
use schemars::JsonSchema;
use serde::Serialize;

pub type Map = serde_json::Map<String, serde_json::Value>;

/// A single message describing what went wrong.
///
/// `field` is set when the message belongs to a specific input field.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Message<'a> {
	pub content: Cow<'a, str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<Cow<'a, str>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Cow<'a, Map>>,
}

/// The body of every error response.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErrorResponse<'a> {
	/// The HTTP status code, repeated for clients that only see the body.
	pub status: u16,
	pub message: Cow<'a, str>,
	pub errors: Vec<Message<'a>>,
}

/// Describes how an error is presented to the client.
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information. Only [`ErrorShape::message`] and
/// [`ErrorShape::errors`] end up in the response body.
pub trait ErrorShape: std::error::Error {
	fn status(&self) -> StatusCode;

	fn message(&self) -> Cow<'_, str> {
		self.status()
			.canonical_reason()
			.unwrap_or("request failed")
			.to_lowercase()
			.into()
	}

	fn errors(&self) -> Vec<Message<'_>> {
		Vec::new()
	}

	/// Whether the error originates on our side and should be logged as such.
	fn internal(&self) -> bool {
		false
	}
}

/// Wraps a route-specific error so it can be returned from a handler.
#[derive(Debug)]
pub struct RouteError<E>(pub E);

impl<E> From<E> for RouteError<E> {
	fn from(error: E) -> Self {
		Self(error)
	}
}

impl<E> IntoResponse for RouteError<E>
where
	E: ErrorShape,
{
	fn into_response(self) -> Response<Body> {
		let error = self.0;
		let status = error.status();

		if error.internal() {
			tracing::error!(status = status.as_u16(), %error, "request failed");
		} else {
			tracing::warn!(status = status.as_u16(), %error, "request rejected");
		}

		(
			status,
			Json(ErrorResponse {
				status: status.as_u16(),
				message: error.message(),
				errors: error.errors(),
			}),
		)
			.into_response()
	}
}

impl<E> OperationOutput for RouteError<E> {
	type Inner = ErrorResponse<'static>;
}

/// Errors raised at the HTTP boundary, before a request reaches a route.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("json error: {0}")]
	Json(#[from] rejection::JsonRejection),
	#[error("query error: {0}")]
	Query(#[from] rejection::QueryRejection),
	#[error("path error: {0}")]
	Path(#[from] rejection::PathRejection),
	#[error("method not allowed")]
	MethodNotAllowed,
	#[error("no route for {0}")]
	NotFound(String),
}

impl ErrorShape for AppError {
	fn status(&self) -> StatusCode {
		match self {
			Self::Json(rejection) if rejection.status() == StatusCode::UNSUPPORTED_MEDIA_TYPE => {
				StatusCode::UNSUPPORTED_MEDIA_TYPE
			}
			Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
			Self::NotFound(..) => StatusCode::NOT_FOUND,
			Self::Validation(..) | Self::Json(..) | Self::Query(..) | Self::Path(..) => {
				StatusCode::BAD_REQUEST
			}
		}
	}

	fn message(&self) -> Cow<'_, str> {
		match self {
			Self::Validation(..) => "invalid input".into(),
			Self::Json(rejection) if rejection.status() == StatusCode::UNSUPPORTED_MEDIA_TYPE => {
				"unsupported media type".into()
			}
			Self::Json(..) => "malformed request body".into(),
			Self::Query(..) => "malformed query string".into(),
			Self::Path(..) => "malformed path".into(),
			Self::MethodNotAllowed => "method not allowed".into(),
			Self::NotFound(..) => "not found".into(),
		}
	}

	fn errors(&self) -> Vec<Message<'_>> {
		let content = match self {
			Self::Validation(errors) => return validation_messages(errors),
			Self::Json(rejection) => rejection.body_text(),
			Self::Query(rejection) => rejection.body_text(),
			Self::Path(rejection) => rejection.body_text(),
			Self::MethodNotAllowed => return Vec::new(),
			Self::NotFound(path) => {
				return vec![Message {
					content: "unknown_route".into(),
					field: None,
					details: Some(Cow::Owned({
						let mut map = Map::new();
						map.insert("path".into(), serde_json::json!(path));
						map
					})),
				}]
			}
		};

		vec![Message {
			content: content.into(),
			field: None,
			details: None,
		}]
	}
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response<Body> {
		RouteError(self).into_response()
	}
}

/// Flattens validation errors into one message per violated rule.
///
/// The rejected `value` is left out of the details so user input is
/// never echoed back.
pub fn validation_messages(errors: &validator::ValidationErrors) -> Vec<Message<'_>> {
	errors
		.field_errors()
		.into_iter()
		.flat_map(|(field, errors)| {
			let field = field.to_string();

			errors.iter().map(move |error| Message {
				content: error.message.clone().unwrap_or_else(|| error.code.clone()),
				field: Some(Cow::Owned(field.clone())),
				details: Some(Cow::Owned(
					error
						.params
						.iter()
						.filter(|(key, _)| **key != "value")
						.map(|(key, value)| (key.to_string(), value.clone()))
						.collect(),
				)),
			})
		})
		.collect()
}

/// Fallback for paths no route matches.
pub async fn not_found(uri: Uri) -> AppError {
	AppError::NotFound(uri.path().to_owned())
}

/// Gives the bare 404 and 405 responses produced by the router a JSON body.
///
/// Nested services answer unknown paths without going through the outer
/// fallback, so their empty 404s are caught here as well. A 404 that already
/// has a content type came from a route and is left alone.
pub async fn bare_responses(uri: Uri, response: Response<Body>) -> Response<Body> {
	let error = match response.status() {
		StatusCode::METHOD_NOT_ALLOWED => AppError::MethodNotAllowed,
		StatusCode::NOT_FOUND if !response.headers().contains_key(header::CONTENT_TYPE) => {
			AppError::NotFound(uri.path().to_owned())
		}
		_ => return response,
	};

	let allow = response.headers().get(header::ALLOW).cloned();
	let mut response = error.into_response();

	if let Some(allow) = allow {
		response.headers_mut().insert(header::ALLOW, allow);
	}

	response
}

#[cfg(test)]
mod test {
	use validator::Validate;

	use super::*;

	#[derive(Validate)]
	struct Input {
		#[validate(length(min = 2, message = "too short"))]
		name: String,
	}

	#[test]
	fn test_validation_messages() {
		let errors = Input { name: "a".into() }.validate().unwrap_err();
		let messages = validation_messages(&errors);

		assert_eq!(messages.len(), 1);
		assert_eq!(messages[0].content, "too short");
		assert_eq!(messages[0].field.as_deref(), Some("name"));

		let details = messages[0].details.as_ref().unwrap();

		assert_eq!(details["min"], 2);
		assert!(!details.contains_key("value"));
	}

	#[test]
	fn test_app_error_status() {
		assert_eq!(
			AppError::MethodNotAllowed.status(),
			StatusCode::METHOD_NOT_ALLOWED
		);

		let errors = Input { name: "a".into() }.validate().unwrap_err();

		assert_eq!(
			AppError::Validation(errors).status(),
			StatusCode::BAD_REQUEST
		);
	}

	#[test]
	fn test_not_found_names_the_path() {
		let error = AppError::NotFound("/nope".into());
		let messages = error.errors();

		assert_eq!(error.status(), StatusCode::NOT_FOUND);
		assert_eq!(error.message(), "not found");
		assert_eq!(messages[0].content, "unknown_route");
		assert_eq!(messages[0].details.as_ref().unwrap()["path"], "/nope");
	}
}
