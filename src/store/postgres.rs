use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;

use super::{Error, PostStore};
use crate::{
	model::{NewPost, Post},
	Database,
};

/// A [`PostStore`] backed by the `post` table.
#[derive(Clone)]
pub struct PgStore {
	database: Database,
}

impl PgStore {
	pub fn new(database: Database) -> Self {
		Self { database }
	}

	/// Connects to the database and brings the schema up to date.
	pub async fn connect(url: &str, max_connections: u32) -> Result<Self, Error> {
		let database = PgPoolOptions::new()
			.max_connections(max_connections)
			.connect(url)
			.await?;

		sqlx::migrate!("./migrations").run(&database).await?;

		Ok(Self::new(database))
	}
}

#[async_trait]
impl PostStore for PgStore {
	async fn insert(&self, post: NewPost) -> Result<Post, Error> {
		let post = sqlx::query_as::<_, Post>(
			r#"
				INSERT INTO post (author, content, created_at)
				VALUES ($1, $2, $3)
				RETURNING *
			"#,
		)
		.bind(post.author)
		.bind(post.content)
		.bind(post.created_at)
		.fetch_one(&self.database)
		.await?;

		Ok(post)
	}

	async fn find(&self, id: i64) -> Result<Option<Post>, Error> {
		let post = sqlx::query_as::<_, Post>(
			r#"
				SELECT * FROM post
				WHERE id = $1
			"#,
		)
		.bind(id)
		.fetch_optional(&self.database)
		.await?;

		Ok(post)
	}

	async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Post>, Error> {
		let posts = sqlx::query_as::<_, Post>(
			r#"
				SELECT * FROM post
				ORDER BY id ASC
				LIMIT $1 OFFSET $2
			"#,
		)
		.bind(limit)
		.bind(offset)
		.fetch_all(&self.database)
		.await?;

		Ok(posts)
	}

	async fn update(&self, post: &Post) -> Result<Option<Post>, Error> {
		let post = sqlx::query_as::<_, Post>(
			r#"
				UPDATE post
				SET content = $1
				WHERE id = $2
				RETURNING *
			"#,
		)
		.bind(&post.content)
		.bind(post.id)
		.fetch_optional(&self.database)
		.await?;

		Ok(post)
	}

	async fn delete(&self, id: i64) -> Result<bool, Error> {
		let result = sqlx::query(
			r#"
				DELETE FROM post
				WHERE id = $1
			"#,
		)
		.bind(id)
		.execute(&self.database)
		.await?;

		Ok(result.rows_affected() > 0)
	}
}

#[cfg(test)]
mod test {
	use chrono::Utc;

	use super::*;

	fn new_post(content: &str) -> NewPost {
		NewPost {
			author: "u1".into(),
			content: content.into(),
			created_at: Utc::now(),
		}
	}

	#[sqlx::test(migrations = "./migrations")]
	#[ignore = "requires DATABASE_URL to point at a PostgreSQL server"]
	async fn test_crud(pool: Database) {
		let store = PgStore::new(pool);

		let first = store.insert(new_post("hello world")).await.unwrap();
		let second = store.insert(new_post("second post")).await.unwrap();

		assert!(second.id > first.id);
		assert_eq!(store.find(first.id).await.unwrap(), Some(first.clone()));

		let page = store.list(1, 1).await.unwrap();

		assert_eq!(page, vec![second.clone()]);

		let updated = store
			.update(&first.clone().with_content("updated text".into()))
			.await
			.unwrap()
			.unwrap();

		assert_eq!(updated.content, "updated text");
		assert_eq!(updated.created_at, first.created_at);

		assert!(store.delete(first.id).await.unwrap());
		assert!(!store.delete(first.id).await.unwrap());
		assert_eq!(store.find(first.id).await.unwrap(), None);
		assert_eq!(store.update(&first).await.unwrap(), None);
	}
}
