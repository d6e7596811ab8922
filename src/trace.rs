use axum::{extract::Request, http::HeaderName, Router};
use tower::ServiceBuilder;
use tower_http::{
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};
use tracing::{level_filters::LevelFilter, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Initializes the global tracing subscriber, printing INFO and above.
///
/// The diagnostic output of every view model goes through here.
pub fn init_tracing_subscriber() {
	tracing_subscriber::registry()
		.with(LevelFilter::from_level(Level::INFO))
		.with(tracing_subscriber::fmt::layer().with_ansi(true))
		.init();
}

/// Wraps the router with request tracing and an `x-request-id` header,
/// generated when the client did not send one.
pub fn layer<S>(router: Router<S>) -> Router<S>
where
	S: Clone + Send + Sync + 'static,
{
	router.layer(
		ServiceBuilder::new()
			.layer(SetRequestIdLayer::new(
				REQUEST_ID_HEADER,
				MakeRequestUuid,
			))
			.layer(
				TraceLayer::new_for_http().make_span_with(|request: &Request| {
					let request_id = request
						.headers()
						.get(REQUEST_ID_HEADER)
						.and_then(|value| value.to_str().ok())
						.unwrap_or_default();

					tracing::info_span!(
						"request",
						method = %request.method(),
						uri = %request.uri(),
						request_id,
					)
				}),
			)
			.layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER)),
	)
}
