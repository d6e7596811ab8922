use axum::extract::State;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::{Navbar, PostView};
use crate::{
	extract::{Json, Preferences, Query},
	model::SortKey,
	store::SharedStore,
	view::{home::ListViewModel, Navigation},
};

#[derive(Debug, Deserialize, Validate)]
pub struct HomeQuery {
	#[serde(default)]
	pub sort: SortKey,
	/// Search text matched against post titles.
	#[serde(default)]
	pub q: String,
}

#[derive(Debug, Serialize)]
pub struct HomePage {
	pub navbar: Navbar,
	pub sort: SortKey,
	pub query: String,
	pub loading: bool,
	pub posts: Vec<PostView>,
	/// No post matches: show the "create one" prompt instead.
	pub empty: bool,
	pub create: String,
}

/// Home
/// Lists every post in the chosen order, filtered by title.
pub async fn home(
	State(store): State<SharedStore>,
	preferences: Preferences,
	Query(query): Query<HomeQuery>,
) -> Json<HomePage> {
	let mut view = ListViewModel::new();

	view.set_sort(store.as_ref(), query.sort).await;
	view.set_query(query.q);

	let now = Utc::now();

	Json(HomePage {
		navbar: Navbar::new(preferences.theme().theme()),
		sort: view.sort(),
		query: view.query().to_owned(),
		loading: view.is_loading(),
		posts: view
			.visible()
			.into_iter()
			.map(|post| PostView::new(post, now))
			.collect(),
		empty: view.is_empty_state(),
		create: Navigation::Create.path(),
	})
}
