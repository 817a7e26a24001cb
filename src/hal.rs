//! Hypermedia (HAL) envelopes for responses.
//!
//! Resources carry their navigation links under `_links`, collections embed
//! their items under `_embedded`.

use std::sync::Arc;

use aide::{
	gen::GenContext,
	openapi::{Operation, Response as ApiResponse},
	OperationOutput,
};
use axum::{
	body::Body,
	http::{header, HeaderValue, Response, StatusCode},
	response::IntoResponse,
};
use schemars::JsonSchema;
use serde::Serialize;

pub const HAL_JSON: &str = "application/hal+json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Link {
	pub href: String,
}

/// The relations a response can link to. Absent relations are not serialized.
#[derive(Debug, Clone, Default, Serialize, JsonSchema)]
pub struct Links {
	#[serde(rename = "self", skip_serializing_if = "Option::is_none")]
	pub this: Option<Link>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub get: Option<Link>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub edit: Option<Link>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub delete: Option<Link>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub list: Option<Link>,
}

/// A single resource with its links.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Resource<T> {
	#[serde(flatten)]
	pub inner: T,
	#[serde(rename = "_links")]
	pub links: Links,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct Embedded<T> {
	pub posts: Vec<Resource<T>>,
}

/// A page of resources with a link back to the collection.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Collection<T> {
	#[serde(rename = "_embedded")]
	pub embedded: Embedded<T>,
	#[serde(rename = "_links")]
	pub links: Links,
}

/// Builds links below the canonical path of a collection.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
	base: Arc<str>,
}

impl LinkBuilder {
	/// `public_url` may be empty, in which case links are path-relative.
	pub fn new(public_url: &str, path: &str) -> Self {
		Self {
			base: format!("{}{}", public_url.trim_end_matches('/'), path).into(),
		}
	}

	pub fn collection(&self) -> Link {
		Link {
			href: self.base.to_string(),
		}
	}

	pub fn item(&self, id: i64) -> Link {
		Link {
			href: format!("{}/{id}", self.base),
		}
	}
}

/// A JSON response served as `application/hal+json`.
pub struct Hal<T>(pub T);

impl<T> IntoResponse for Hal<T>
where
	T: Serialize,
{
	fn into_response(self) -> Response<Body> {
		with_hal_content_type(axum::Json(self.0).into_response())
	}
}

impl<T> OperationOutput for Hal<T>
where
	T: JsonSchema,
{
	type Inner = T;

	fn operation_response(ctx: &mut GenContext, operation: &mut Operation) -> Option<ApiResponse> {
		axum::Json::<T>::operation_response(ctx, operation)
	}

	fn inferred_responses(
		ctx: &mut GenContext,
		operation: &mut Operation,
	) -> Vec<(Option<u16>, ApiResponse)> {
		axum::Json::<T>::inferred_responses(ctx, operation)
	}
}

/// A `201 Created` response pointing at the new resource.
pub struct Created<T> {
	pub location: Link,
	pub body: T,
}

impl<T> IntoResponse for Created<T>
where
	T: Serialize,
{
	fn into_response(self) -> Response<Body> {
		let response = (
			StatusCode::CREATED,
			[(header::LOCATION, self.location.href)],
			axum::Json(self.body),
		)
			.into_response();

		with_hal_content_type(response)
	}
}

impl<T> OperationOutput for Created<T>
where
	T: JsonSchema,
{
	type Inner = T;

	fn operation_response(ctx: &mut GenContext, operation: &mut Operation) -> Option<ApiResponse> {
		axum::Json::<T>::operation_response(ctx, operation)
	}

	fn inferred_responses(
		ctx: &mut GenContext,
		operation: &mut Operation,
	) -> Vec<(Option<u16>, ApiResponse)> {
		Self::operation_response(ctx, operation)
			.map(|response| vec![(Some(201), response)])
			.unwrap_or_default()
	}
}

fn with_hal_content_type(mut response: Response<Body>) -> Response<Body> {
	if response.status().is_success() {
		response
			.headers_mut()
			.insert(header::CONTENT_TYPE, HeaderValue::from_static(HAL_JSON));
	}

	response
}
