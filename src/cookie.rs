use cookie::{Cookie, CookieJar, SameSite};

use crate::theme::PreferenceStore;

/// Preferences outlive the session, so they are kept for a year.
const PREFERENCE_MAX_AGE_DAYS: i64 = 365;

/// Creates a long-lived cookie holding a single preference.
pub fn preference_cookie(key: &str, value: &str) -> Cookie<'static> {
	Cookie::build((key.to_owned(), value.to_owned()))
		.secure(!cfg!(debug_assertions))
		.same_site(SameSite::Lax)
		.path("/")
		.max_age(cookie::time::Duration::days(PREFERENCE_MAX_AGE_DAYS))
		.into()
}

/// A [`PreferenceStore`] over the cookies of one request.
///
/// Writes are collected and sent back as `Set-Cookie` headers.
#[derive(Debug, Default)]
pub struct CookiePreferences {
	jar: CookieJar,
}

impl CookiePreferences {
	/// Parses a `Cookie` request header, skipping malformed pairs.
	pub fn from_header(header: &str) -> Self {
		let mut jar = CookieJar::new();

		for cookie in Cookie::split_parse(header).filter_map(Result::ok) {
			jar.add_original(cookie.into_owned());
		}

		Self { jar }
	}

	/// The `Set-Cookie` header values for every preference written.
	pub fn set_cookie_headers(&self) -> Vec<String> {
		self.jar.delta().map(ToString::to_string).collect()
	}
}

impl PreferenceStore for CookiePreferences {
	fn get(&self, key: &str) -> Option<String> {
		self.jar.get(key).map(|cookie| cookie.value().to_owned())
	}

	fn set(&mut self, key: &str, value: &str) {
		self.jar.add(preference_cookie(key, value));
	}
}
