pub use crate::route::model::{IdInput, Paginate};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
	hal::{Collection, Embedded, LinkBuilder, Links, Resource},
	model::Post,
};

/// `yyyy-MM-dd hh:mm:ss`, with a 12-hour clock hour.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %I:%M:%S";

/// A single post, as presented to the client.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct PostModel {
	/// The sequential number of the post.
	pub id: i64,
	/// The name of whoever wrote the post.
	pub author: String,
	/// The text of the post.
	pub content: String,
	/// The creation time of the post, formatted as `yyyy-MM-dd hh:mm:ss` in UTC.
	pub created_at: String,
}

impl From<Post> for PostModel {
	fn from(post: Post) -> Self {
		Self {
			id: post.id,
			author: post.author,
			content: post.content,
			created_at: post.created_at.format(CREATED_AT_FORMAT).to_string(),
		}
	}
}

impl PostModel {
	/// Wraps the post with every link that applies to a single post.
	pub fn into_resource(self, links: &LinkBuilder) -> Resource<Self> {
		let item = links.item(self.id);

		Resource {
			links: Links {
				this: Some(item.clone()),
				get: Some(item.clone()),
				edit: Some(item.clone()),
				delete: Some(item),
				list: Some(links.collection()),
			},
			inner: self,
		}
	}

	/// Wraps the post for use inside a collection, which only links to reading
	/// and deleting each entry.
	pub fn into_entry(self, links: &LinkBuilder) -> Resource<Self> {
		let item = links.item(self.id);

		Resource {
			links: Links {
				get: Some(item.clone()),
				delete: Some(item),
				..Default::default()
			},
			inner: self,
		}
	}

	pub fn into_collection(posts: Vec<Self>, links: &LinkBuilder) -> Collection<Self> {
		Collection {
			embedded: Embedded {
				posts: posts
					.into_iter()
					.map(|post| post.into_entry(links))
					.collect(),
			},
			links: Links {
				this: Some(links.collection()),
				..Default::default()
			},
		}
	}
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
	if value.trim().is_empty() {
		let mut error = ValidationError::new("blank");
		error.message = Some("author must not be blank".into());

		return Err(error);
	}

	Ok(())
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct CreatePostInput {
	/// The name of whoever writes the post.
	#[validate(
		length(
			min = 1,
			max = 64,
			message = "author must be between 1 and 64 characters"
		),
		custom(function = "validate_not_blank")
	)]
	pub author: String,
	/// The text of the post.
	#[validate(length(
		min = 2,
		max = 300,
		message = "content must be between 2 and 300 characters"
	))]
	pub content: String,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct UpdatePostInput {
	/// The new text of the post.
	#[validate(length(
		min = 2,
		max = 300,
		message = "content must be between 2 and 300 characters"
	))]
	pub content: String,
}

/// Confirms that a post was removed.
#[derive(Debug, Serialize, JsonSchema)]
pub struct DeletedPost {
	pub deleted_id: i64,
}

impl DeletedPost {
	pub fn into_resource(self, links: &LinkBuilder) -> Resource<Self> {
		Resource {
			links: Links {
				this: Some(links.item(self.deleted_id)),
				list: Some(links.collection()),
				..Default::default()
			},
			inner: self,
		}
	}
}

#[cfg(test)]
mod test {
	use chrono::{TimeZone, Utc};
	use validator::Validate;

	use super::*;

	fn post() -> Post {
		Post {
			id: 3,
			author: "u1".into(),
			content: "hello world".into(),
			created_at: Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
		}
	}

	#[test]
	fn test_created_at_uses_twelve_hour_clock() {
		let model = PostModel::from(post());

		assert_eq!(model.created_at, "2024-03-09 02:05:07");
	}

	#[test]
	fn test_resource_links() {
		let links = LinkBuilder::new("", "/boards");
		let value = serde_json::to_value(PostModel::from(post()).into_resource(&links)).unwrap();

		assert_eq!(value["id"], 3);
		assert_eq!(value["author"], "u1");
		assert_eq!(value["_links"]["self"]["href"], "/boards/3");
		assert_eq!(value["_links"]["get"]["href"], "/boards/3");
		assert_eq!(value["_links"]["edit"]["href"], "/boards/3");
		assert_eq!(value["_links"]["delete"]["href"], "/boards/3");
		assert_eq!(value["_links"]["list"]["href"], "/boards");
	}

	#[test]
	fn test_collection_entry_links() {
		let links = LinkBuilder::new("", "/boards");
		let value = serde_json::to_value(PostModel::into_collection(
			vec![PostModel::from(post())],
			&links,
		))
		.unwrap();

		let entry = &value["_embedded"]["posts"][0];

		assert_eq!(value["_links"]["self"]["href"], "/boards");
		assert_eq!(entry["_links"]["get"]["href"], "/boards/3");
		assert_eq!(entry["_links"]["delete"]["href"], "/boards/3");
		assert!(entry["_links"].get("edit").is_none());
		assert!(entry["_links"].get("self").is_none());
	}

	#[test]
	fn test_content_length_is_counted_in_characters() {
		let input = UpdatePostInput {
			content: "가".repeat(300),
		};

		assert!(input.validate().is_ok());

		for content in [String::new(), "a".into(), "a".repeat(301)] {
			assert!(UpdatePostInput { content }.validate().is_err());
		}
	}

	#[test]
	fn test_author_is_required() {
		for author in ["", "   ", "\t\n"] {
			let input = CreatePostInput {
				author: author.into(),
				content: "hello world".into(),
			};

			assert!(input.validate().is_err());
		}

		let input = CreatePostInput {
			author: " u1 ".into(),
			content: "hello world".into(),
		};

		assert!(input.validate().is_ok());
	}

	#[test]
	fn test_deleted_post_links() {
		let links = LinkBuilder::new("", "/boards");
		let value =
			serde_json::to_value(DeletedPost { deleted_id: 5 }.into_resource(&links)).unwrap();

		assert_eq!(value["deleted_id"], 5);
		assert_eq!(value["_links"]["self"]["href"], "/boards/5");
		assert_eq!(value["_links"]["list"]["href"], "/boards");

		for relation in ["get", "edit", "delete"] {
			assert!(value["_links"].get(relation).is_none());
		}
	}
}
