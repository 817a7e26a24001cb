use tower_http::{
	classify::{ServerErrorsAsFailures, SharedClassifier},
	trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{level_filters::LevelFilter, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes the global tracing subscriber, printing events at `level` and above.
pub fn init_tracing_subscriber(level: Level) {
	tracing_subscriber::registry()
		.with(LevelFilter::from_level(level))
		.with(tracing_subscriber::fmt::layer().with_ansi(cfg!(debug_assertions)))
		.init();
}

/// Constructs a [`TraceLayer`] that opens a span per request and logs every response.
pub fn http_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
	TraceLayer::new_for_http()
		.make_span_with(DefaultMakeSpan::new().level(Level::INFO))
		.on_response(DefaultOnResponse::new().level(Level::INFO))
}
