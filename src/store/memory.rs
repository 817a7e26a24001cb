use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Error, PostStore};
use crate::model::{NewPost, Post};

/// A [`PostStore`] that keeps everything in process memory.
///
/// Used when no database is configured, and in tests. Ids start at 1 and
/// are never reused, even after a delete.
#[derive(Debug, Default)]
pub struct MemoryStore {
	inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
	last_id: i64,
	posts: BTreeMap<i64, Post>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl PostStore for MemoryStore {
	async fn insert(&self, post: NewPost) -> Result<Post, Error> {
		let mut inner = self.inner.write().await;

		inner.last_id += 1;

		let post = post.into_post(inner.last_id);
		inner.posts.insert(post.id, post.clone());

		Ok(post)
	}

	async fn find(&self, id: i64) -> Result<Option<Post>, Error> {
		Ok(self.inner.read().await.posts.get(&id).cloned())
	}

	async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Post>, Error> {
		let limit = usize::try_from(limit).unwrap_or(0);
		let offset = usize::try_from(offset).unwrap_or(0);

		Ok(self
			.inner
			.read()
			.await
			.posts
			.values()
			.skip(offset)
			.take(limit)
			.cloned()
			.collect())
	}

	async fn update(&self, post: &Post) -> Result<Option<Post>, Error> {
		let mut inner = self.inner.write().await;

		Ok(inner.posts.get_mut(&post.id).map(|stored| {
			stored.content.clone_from(&post.content);
			stored.clone()
		}))
	}

	async fn delete(&self, id: i64) -> Result<bool, Error> {
		Ok(self.inner.write().await.posts.remove(&id).is_some())
	}
}
