//! Login rate limiting.
//!
//! The back-office is reached directly rather than through a CDN, so the key
//! is the peer address (or a forwarding header when one is present). The
//! server must be started with `into_make_service_with_connect_info`.

use std::sync::Arc;

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::GovernorLayer;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::SmartIpKeyExtractor;

/// Rate limiter layer type for Axum.
pub type LoginRateLimiter =
    GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// One password attempt every 6 seconds per client, burst of 5.
///
/// # Panics
///
/// Never; both settings are non-zero constants.
#[must_use]
pub fn login_rate_limiter() -> LoginRateLimiter {
    let config = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_second(6)
        .burst_size(5)
        .finish()
        .expect("rate limiter config with per_second(6) and burst_size(5) is valid");
    GovernorLayer::new(Arc::new(config))
}
