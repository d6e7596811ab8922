use axum::{
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use serde::Serialize;

use super::model::Navbar;
use crate::{
	extract::{Json, PostId, Preferences},
	store::SharedStore,
	theme::Theme,
	view::form::{FormMode, FormViewModel, PostDraft},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	Create,
	Edit,
}

#[derive(Debug, Serialize)]
pub struct FormPage {
	pub navbar: Navbar,
	pub mode: Mode,
	#[serde(flatten)]
	pub draft: PostDraft,
	/// The image to preview under the URL field, if one was entered.
	pub preview: Option<String>,
	pub error: Option<String>,
	pub loading: bool,
	pub saving: bool,
	pub cancel: String,
}

impl FormPage {
	pub fn new(form: &FormViewModel, theme: Theme) -> Self {
		let draft = form.draft().clone();
		let preview = Some(draft.image_url.trim())
			.filter(|url| !url.is_empty())
			.map(ToOwned::to_owned);

		Self {
			navbar: Navbar::new(theme),
			mode: match form.mode() {
				FormMode::Create => Mode::Create,
				FormMode::Edit(..) => Mode::Edit,
			},
			draft,
			preview,
			error: form.error().map(ToOwned::to_owned),
			loading: form.is_loading(),
			saving: form.is_saving(),
			cancel: form.cancel().path(),
		}
	}
}

/// Submits the form, redirecting to the saved post or re-rendering it with
/// the error set.
async fn submit(store: &SharedStore, mut form: FormViewModel, theme: Theme) -> Response {
	match form.submit(store.as_ref()).await {
		Some(navigation) => navigation.into_response(),
		None => (
			StatusCode::UNPROCESSABLE_ENTITY,
			Json(FormPage::new(&form, theme)),
		)
			.into_response(),
	}
}

/// New post form
/// Returns an empty create form.
pub async fn new_post(preferences: Preferences) -> Json<FormPage> {
	Json(FormPage::new(
		&FormViewModel::create(),
		preferences.theme().theme(),
	))
}

/// Create post
/// Creates a post from the submitted draft.
pub async fn create_post(
	State(store): State<SharedStore>,
	preferences: Preferences,
	Json(draft): Json<PostDraft>,
) -> Response {
	let mut form = FormViewModel::create();
	form.set_draft(draft);

	submit(&store, form, preferences.theme().theme()).await
}

/// Edit post form
/// Returns the edit form filled from the stored post.
pub async fn edit_post(
	State(store): State<SharedStore>,
	PostId(id): PostId,
	preferences: Preferences,
) -> Response {
	let mut form = FormViewModel::edit(id);

	if let Some(navigation) = form.load(store.as_ref()).await {
		return navigation.into_response();
	}

	Json(FormPage::new(&form, preferences.theme().theme())).into_response()
}

/// Update post
/// Saves the submitted draft over the existing post.
pub async fn update_post(
	State(store): State<SharedStore>,
	PostId(id): PostId,
	preferences: Preferences,
	Json(draft): Json<PostDraft>,
) -> Response {
	let form = FormViewModel::resume(id, draft);

	submit(&store, form, preferences.theme().theme()).await
}
