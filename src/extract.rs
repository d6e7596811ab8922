use axum::{
	body::Body,
	extract::{FromRequest, FromRequestParts, Request},
	http::{header, request, HeaderMap, Response},
	response::IntoResponse,
};
use serde::de;
use uuid::Uuid;

use crate::{
	cookie::CookiePreferences,
	error::Error,
	theme::{Theme, ThemeContext},
	view::Navigation,
};

/// Client hint carrying the browser's colour scheme preference.
pub const PREFERS_COLOR_SCHEME: &str = "sec-ch-prefers-color-scheme";

/// Extractor that deserializes a JSON body and validates it.
pub struct Json<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for Json<T>
where
	T: de::DeserializeOwned + validator::Validate,
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let result = axum::extract::Json::<T>::from_request(req, state).await?.0;

		result.validate().map_err(Error::Validation)?;
		Ok(Self(result))
	}
}

impl<T> IntoResponse for Json<T>
where
	T: serde::Serialize,
{
	fn into_response(self) -> Response<Body> {
		axum::extract::Json(self.0).into_response()
	}
}

/// Extractor that deserializes a query string and validates it.
pub struct Query<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for Query<T>
where
	T: de::DeserializeOwned + validator::Validate,
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let result = axum::extract::Query::<T>::from_request_parts(parts, state)
			.await?
			.0;

		result.validate().map_err(Error::Validation)?;
		Ok(Self(result))
	}
}

/// Extracts the post identifier from the `:id` path segment.
///
/// An identifier that cannot name a post is handled like a missing post:
/// the request is redirected to the home page.
#[derive(Debug, Clone, Copy)]
pub struct PostId(pub Uuid);

#[axum::async_trait]
impl<S> FromRequestParts<S> for PostId
where
	S: Send + Sync,
{
	type Rejection = Navigation;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let axum::extract::Path(id) =
			axum::extract::Path::<String>::from_request_parts(parts, state)
				.await
				.map_err(|_| Navigation::Home)?;

		match Uuid::parse_str(&id) {
			Ok(id) => Ok(Self(id)),
			Err(error) => {
				tracing::info!(%error, id, "malformed post id");
				Err(Navigation::Home)
			}
		}
	}
}

/// The preferences persisted in the request's cookies, plus the system
/// colour scheme reported by the browser.
#[derive(Debug)]
pub struct Preferences {
	pub storage: CookiePreferences,
	pub system: Option<Theme>,
}

impl Preferences {
	pub fn from_headers(headers: &HeaderMap) -> Self {
		let cookies = headers
			.get_all(header::COOKIE)
			.iter()
			.filter_map(|value| value.to_str().ok())
			.collect::<Vec<_>>()
			.join("; ");

		let system = headers
			.get(PREFERS_COLOR_SCHEME)
			.and_then(|value| value.to_str().ok())
			.and_then(Theme::parse);

		Self {
			storage: CookiePreferences::from_header(&cookies),
			system,
		}
	}

	pub fn theme(&self) -> ThemeContext {
		ThemeContext::load(&self.storage, self.system)
	}
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Preferences
where
	S: Send + Sync,
{
	type Rejection = std::convert::Infallible;

	async fn from_request_parts(
		parts: &mut request::Parts,
		_state: &S,
	) -> Result<Self, Self::Rejection> {
		Ok(Self::from_headers(&parts.headers))
	}
}
