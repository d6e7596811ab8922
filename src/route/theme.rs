use axum::{
	http::header,
	response::{AppendHeaders, IntoResponse},
};
use serde::Serialize;

use crate::{
	extract::{Json, Preferences},
	theme::Theme,
};

#[derive(Debug, Serialize)]
pub struct ThemePage {
	pub theme: Theme,
}

/// Get theme
/// Returns the active theme.
pub async fn get_theme(preferences: Preferences) -> Json<ThemePage> {
	Json(ThemePage {
		theme: preferences.theme().theme(),
	})
}

/// Toggle theme
/// Switches between light and dark, persisting the choice in a cookie.
pub async fn toggle_theme(mut preferences: Preferences) -> impl IntoResponse {
	let mut context = preferences.theme();
	let theme = context.toggle(&mut preferences.storage);

	let cookies = preferences
		.storage
		.set_cookie_headers()
		.into_iter()
		.map(|cookie| (header::SET_COOKIE, cookie));

	(
		AppendHeaders(cookies),
		Json(ThemePage { theme }),
	)
}
