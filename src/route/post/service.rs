use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
	model::{NewPost, Post},
	store::PostStore,
};

use super::{model, Error};

/// Business operations on posts.
///
/// Content is validated here as well as at the HTTP boundary, so the length
/// invariant holds no matter how the service is called.
#[derive(Clone)]
pub struct PostService {
	store: Arc<dyn PostStore>,
}

impl PostService {
	pub fn new(store: Arc<dyn PostStore>) -> Self {
		Self { store }
	}

	#[tracing::instrument(skip_all, fields(author = %input.author))]
	pub async fn create(&self, input: model::CreatePostInput) -> Result<model::PostModel, Error> {
		input.validate()?;

		let post = self
			.store
			.insert(NewPost {
				author: input.author,
				content: input.content,
				created_at: Utc::now(),
			})
			.await?;

		tracing::info!(id = post.id, "created post");

		Ok(post.into())
	}

	pub async fn get(&self, id: i64) -> Result<model::PostModel, Error> {
		Ok(self.find(id).await?.into())
	}

	/// Returns a page of posts, oldest first. A page past the end is empty.
	pub async fn list(&self, paginate: &model::Paginate) -> Result<Vec<model::PostModel>, Error> {
		let posts = self
			.store
			.list(paginate.limit(), paginate.offset())
			.await?;

		Ok(posts.into_iter().map(Into::into).collect())
	}

	/// Replaces the content of a post. The author and creation time never change.
	#[tracing::instrument(skip(self, input))]
	pub async fn edit(
		&self,
		id: i64,
		input: model::UpdatePostInput,
	) -> Result<model::PostModel, Error> {
		let post = self.find(id).await?;

		input.validate()?;

		let post = self
			.store
			.update(&post.with_content(input.content))
			.await?
			.ok_or(Error::UnknownPost(id))?;

		tracing::info!("edited post");

		Ok(post.into())
	}

	/// Removes a post permanently, returning `false` if it did not exist.
	#[tracing::instrument(skip(self))]
	pub async fn delete(&self, id: i64) -> Result<bool, Error> {
		let deleted = self.store.delete(id).await?;

		if deleted {
			tracing::info!("deleted post");
		}

		Ok(deleted)
	}

	/// Inserts `count` demo posts, written by `user1` through `user{count}`.
	pub async fn seed(&self, count: u32) -> Result<(), Error> {
		for n in 1..=count {
			self.create(model::CreatePostInput {
				author: format!("user{n}"),
				content: format!("content of post {n} by user{n}"),
			})
			.await?;
		}

		Ok(())
	}

	async fn find(&self, id: i64) -> Result<Post, Error> {
		self.store.find(id).await?.ok_or(Error::UnknownPost(id))
	}
}
