//! Persistence for posts.
//!
//! Every store hands out unique, increasing ids on insert and keeps posts
//! in insertion order when listing.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;

use crate::model::{NewPost, Post};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
	#[error("migration error: {0}")]
	Migrate(#[from] sqlx::migrate::MigrateError),
}

#[async_trait]
pub trait PostStore: Send + Sync {
	/// Stores a new post, returning it with its assigned id.
	async fn insert(&self, post: NewPost) -> Result<Post, Error>;

	async fn find(&self, id: i64) -> Result<Option<Post>, Error>;

	/// Returns up to `limit` posts after skipping `offset`, oldest first.
	async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Post>, Error>;

	/// Writes the content of `post` over the stored post with the same id.
	///
	/// Returns `None` if the post no longer exists.
	async fn update(&self, post: &Post) -> Result<Option<Post>, Error>;

	/// Removes a post permanently, returning whether it existed.
	async fn delete(&self, id: i64) -> Result<bool, Error>;
}
