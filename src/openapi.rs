use std::borrow::Cow;

use aide::{openapi::Tag, transform::TransformOpenApi};

use crate::{error, extract::Json};

/// Where the generated OpenAPI document is served.
pub const SPEC_PATH: &str = "/docs/private/api.json";

pub mod tag {
	pub const POST: &str = "Post";
}

pub fn docs(api: TransformOpenApi) -> TransformOpenApi {
	api.title("Board API")
		.summary("A bulletin board backend")
		.description(include_str!("../README.md"))
		.tag(Tag {
			name: tag::POST.into(),
			description: Some("Board posts".into()),
			..Default::default()
		})
		.default_response_with::<Json<error::ErrorResponse>, _>(|res| {
			res.example(error::ErrorResponse {
				status: 400,
				message: "invalid input".into(),
				errors: vec![error::Message {
					content: "content must be between 2 and 300 characters".into(),
					field: Some("content".into()),
					details: Some(Cow::Owned({
						let mut map = error::Map::new();
						map.insert("min".into(), serde_json::json!(2));
						map.insert("max".into(), serde_json::json!(300));
						map
					})),
				}],
			})
		})
}
