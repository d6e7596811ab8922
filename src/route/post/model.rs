use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
	extract::Json,
	route::model::{CommentView, Navbar, PostView},
	theme::Theme,
	view::{detail::DetailViewModel, Navigation},
};

#[derive(Debug, Deserialize, Validate)]
pub struct CommentInput {
	/// Blank comments are ignored rather than rejected.
	#[serde(default)]
	pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DeleteInput {
	/// The answer to the delete confirmation prompt.
	#[serde(default)]
	pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct DetailPage {
	pub navbar: Navbar,
	pub post: PostView,
	/// Newest first.
	pub comments: Vec<CommentView>,
	/// The unsent comment text.
	pub draft: String,
	pub edit: String,
	pub delete_prompt: &'static str,
}

impl DetailPage {
	/// Renders a loaded view, or redirects home if it holds no post.
	pub fn render(view: &DetailViewModel, theme: Theme) -> Response {
		let Some(post) = view.post() else {
			return Navigation::Home.into_response();
		};

		let now = Utc::now();

		Json(Self {
			navbar: Navbar::new(theme),
			post: PostView::new(post, now),
			comments: view
				.comments()
				.iter()
				.map(|comment| CommentView::new(comment, now))
				.collect(),
			draft: view.draft().to_owned(),
			edit: Navigation::Edit(post.id).path(),
			delete_prompt: crate::view::detail::DELETE_PROMPT,
		})
		.into_response()
	}
}
