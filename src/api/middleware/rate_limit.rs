//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

type Governor<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a per-client rate limiter keyed by the socket peer address.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/t/{short_id}", get(redirect_handler))
///     .layer(rate_limit::layer(2, 100)?);
/// ```
pub fn layer(per_second: u64, burst_size: u32) -> Result<Governor<PeerIpKeyExtractor>> {
    build(PeerIpKeyExtractor, per_second, burst_size)
}

/// Creates a rate limiter for deployments behind a trusted reverse proxy.
///
/// The client address is read from `X-Forwarded-For`, `X-Real-IP` or
/// `Forwarded`, falling back to the peer address.
pub fn proxy_layer(per_second: u64, burst_size: u32) -> Result<Governor<SmartIpKeyExtractor>> {
    build(SmartIpKeyExtractor, per_second, burst_size)
}

fn build<K>(key_extractor: K, per_second: u64, burst_size: u32) -> Result<Governor<K>>
where
    K: KeyExtractor,
{
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(key_extractor)
        .per_second(per_second)
        .burst_size(burst_size)
        .finish()
        .context("rate limit period and burst size must be non-zero")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_limits() {
        assert!(layer(2, 100).is_ok());
        assert!(proxy_layer(1, 10).is_ok());
    }

    #[test]
    fn test_zero_limits_rejected() {
        assert!(layer(0, 100).is_err());
        assert!(layer(2, 0).is_err());
    }
}
