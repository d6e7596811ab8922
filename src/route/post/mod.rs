use axum::{
	routing::{get, post},
	Router,
};

use crate::AppState;

pub mod model;
pub mod route;

pub fn routes() -> Router<AppState> {
	use route::*;

	Router::new()
		.route("/:id", get(get_post))
		.route("/:id/upvote", post(upvote_post))
		.route("/:id/comments", post(add_comment))
		.route("/:id/delete", post(delete_post))
}
