use axum::{
	body::Body,
	extract::rejection,
	http::{Response, StatusCode},
	response::IntoResponse,
	Json,
};
use serde::Serialize;

/// Error type for rejected requests.
///
/// Remote store failures never end up here: the view models log them and
/// turn them into page state or a redirect instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("json error: {0}")]
	Json(#[from] rejection::JsonRejection),
	#[error("query error: {0}")]
	Query(#[from] rejection::QueryRejection),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub success: bool,
	pub errors: Vec<String>,
}

impl IntoResponse for Error {
	fn into_response(self) -> Response<Body> {
		tracing::debug!(error = %self, "rejected request");

		let errors = match self {
			Error::Validation(errors) => errors
				.field_errors()
				.into_iter()
				.flat_map(|(field, errors)| {
					errors
						.iter()
						.map(move |error| format!("{field}: {error}"))
				})
				.collect(),
			Error::Json(error) => vec![error.body_text()],
			Error::Query(error) => vec![error.body_text()],
		};

		(
			StatusCode::BAD_REQUEST,
			Json(ErrorResponse {
				success: false,
				errors,
			}),
		)
			.into_response()
	}
}
