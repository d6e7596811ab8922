use axum::{
	extract::State,
	response::{IntoResponse, Response},
};

use super::model;
use crate::{
	extract::{Json, PostId, Preferences},
	store::SharedStore,
	view::detail::DetailViewModel,
};

/// Loads the detail view, or produces the redirect away from it.
async fn load(store: &SharedStore, id: uuid::Uuid) -> Result<DetailViewModel, Response> {
	let mut view = DetailViewModel::new(id);

	match view.load(store.as_ref()).await {
		Some(navigation) => Err(navigation.into_response()),
		None => Ok(view),
	}
}

/// Get post
/// Shows a single post with its comments, newest first.
pub async fn get_post(
	State(store): State<SharedStore>,
	PostId(id): PostId,
	preferences: Preferences,
) -> Response {
	match load(&store, id).await {
		Ok(view) => model::DetailPage::render(&view, preferences.theme().theme()),
		Err(redirect) => redirect,
	}
}

/// Upvote post
/// Adds one to the post's upvote count.
pub async fn upvote_post(
	State(store): State<SharedStore>,
	PostId(id): PostId,
	preferences: Preferences,
) -> Response {
	let mut view = match load(&store, id).await {
		Ok(view) => view,
		Err(redirect) => return redirect,
	};

	view.upvote(store.as_ref()).await;

	model::DetailPage::render(&view, preferences.theme().theme())
}

/// Add comment
/// Adds a comment to the top of the post's comments.
pub async fn add_comment(
	State(store): State<SharedStore>,
	PostId(id): PostId,
	preferences: Preferences,
	Json(input): Json<model::CommentInput>,
) -> Response {
	let mut view = match load(&store, id).await {
		Ok(view) => view,
		Err(redirect) => return redirect,
	};

	view.set_draft(input.content);
	view.add_comment(store.as_ref()).await;

	model::DetailPage::render(&view, preferences.theme().theme())
}

/// Delete post
/// Deletes the post once confirmed, returning to the home page.
pub async fn delete_post(
	State(store): State<SharedStore>,
	PostId(id): PostId,
	preferences: Preferences,
	Json(input): Json<model::DeleteInput>,
) -> Response {
	let mut view = match load(&store, id).await {
		Ok(view) => view,
		Err(redirect) => return redirect,
	};

	match view.delete(store.as_ref(), |_| input.confirm).await {
		Some(navigation) => navigation.into_response(),
		None => model::DetailPage::render(&view, preferences.theme().theme()),
	}
}
