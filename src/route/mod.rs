//! The navigation surface: one route per page of the forum.

use axum::{
	body::Body,
	http::Response,
	response::{IntoResponse, Redirect},
	routing::get,
	Router,
};

use crate::{view::Navigation, AppState};

pub mod form;
pub mod home;
pub mod model;
pub mod post;
pub mod theme;

/// Moving to another page is a `303 See Other` to its path.
impl IntoResponse for Navigation {
	fn into_response(self) -> Response<Body> {
		tracing::debug!(to = %self.path(), "navigating");

		Redirect::to(&self.path()).into_response()
	}
}

pub fn routes() -> Router<AppState> {
	Router::new()
		.route("/", get(home::home))
		.nest("/posts", post::routes())
		.route("/create", get(form::new_post).post(form::create_post))
		.route("/edit/:id", get(form::edit_post).post(form::update_post))
		.route("/theme", get(theme::get_theme).post(theme::toggle_theme))
}
