use axum::extract::State;
use macros::route;

use crate::{
	extract::{Json, Path, Query},
	hal::{Collection, Created, Hal, LinkBuilder, Resource},
	openapi::tag,
};

use super::{model, Error, PostService, RouteError};

/// List posts
/// Returns a page of posts, oldest first. Pages are 0-indexed.
#[route(tag = tag::POST)]
pub async fn get_posts(
	State(posts): State<PostService>,
	State(links): State<LinkBuilder>,
	Query(paginate): Query<model::Paginate>,
) -> Result<Hal<Collection<model::PostModel>>, RouteError> {
	let page = posts.list(&paginate).await?;

	Ok(Hal(model::PostModel::into_collection(page, &links)))
}

/// Get single post
/// Returns a single post by its sequential number.
#[route(tag = tag::POST)]
pub async fn get_post(
	State(posts): State<PostService>,
	State(links): State<LinkBuilder>,
	Path(model::IdInput { id }): Path<model::IdInput>,
) -> Result<Hal<Resource<model::PostModel>>, RouteError> {
	let post = posts.get(id).await?;

	Ok(Hal(post.into_resource(&links)))
}

/// Create post
/// Creates a new post. The `Location` header points at the new post.
#[route(
	tag = tag::POST,
	response(status = 201, description = "Post created.", shape = "Created<Resource<model::PostModel>>")
)]
pub async fn create_post(
	State(posts): State<PostService>,
	State(links): State<LinkBuilder>,
	Json(input): Json<model::CreatePostInput>,
) -> Result<Created<Resource<model::PostModel>>, RouteError> {
	let post = posts.create(input).await?;

	Ok(Created {
		location: links.item(post.id),
		body: post.into_resource(&links),
	})
}

/// Update post
/// Replaces the content of an existing post. The author and creation time never change.
#[route(tag = tag::POST)]
pub async fn update_post(
	State(posts): State<PostService>,
	State(links): State<LinkBuilder>,
	Path(model::IdInput { id }): Path<model::IdInput>,
	Json(input): Json<model::UpdatePostInput>,
) -> Result<Hal<Resource<model::PostModel>>, RouteError> {
	let post = posts.edit(id, input).await?;

	Ok(Hal(post.into_resource(&links)))
}

/// Delete post
/// Deletes an existing post permanently.
#[route(tag = tag::POST)]
pub async fn delete_post(
	State(posts): State<PostService>,
	State(links): State<LinkBuilder>,
	Path(model::IdInput { id }): Path<model::IdInput>,
) -> Result<Hal<Resource<model::DeletedPost>>, RouteError> {
	if !posts.delete(id).await? {
		return Err(Error::UnknownPost(id).into());
	}

	Ok(Hal(model::DeletedPost { deleted_id: id }.into_resource(&links)))
}
