//! Rate limiting middleware using token bucket algorithm.
//!
//! Limiters key on the socket peer address, so the router must be served with
//! `into_make_service_with_connect_info::<SocketAddr>()`.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

type PeerIpGovernorLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

fn peer_ip_layer(per_second: u64, burst_size: u32) -> PeerIpGovernorLayer {
    let mut builder = GovernorConfigBuilder::default();
    builder.per_second(per_second).burst_size(burst_size);

    // Only zero values make `finish` fail.
    let governor_conf = Arc::new(
        builder
            .finish()
            .expect("rate limit period and burst are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Creates a rate limiter for portal pages.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn layer() -> PeerIpGovernorLayer {
    peer_ip_layer(2, 100)
}

/// Creates a stricter rate limiter for sign-in attempts.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
///
/// Slows down token guessing against `POST /login`.
pub fn login_layer() -> PeerIpGovernorLayer {
    peer_ip_layer(1, 10)
}
