use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::constants::DEFAULT_LOG_FILTER;

pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
