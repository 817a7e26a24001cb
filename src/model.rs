use chrono::{DateTime, Utc};

/// A single board post, as stored.
///
/// `id` is assigned by the store on insert. Only `content` ever changes
/// after that.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Post {
	pub id: i64,
	pub author: String,
	pub content: String,
	pub created_at: DateTime<Utc>,
}

/// A post that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewPost {
	pub author: String,
	pub content: String,
	pub created_at: DateTime<Utc>,
}

impl NewPost {
	/// Attaches the id handed out by the store.
	pub fn into_post(self, id: i64) -> Post {
		Post {
			id,
			author: self.author,
			content: self.content,
			created_at: self.created_at,
		}
	}
}

impl Post {
	/// Returns the post with its content replaced, leaving everything else untouched.
	#[must_use]
	pub fn with_content(self, content: String) -> Self {
		Self { content, ..self }
	}
}
