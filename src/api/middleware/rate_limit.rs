//! Per-client rate limiting using the token bucket algorithm.

use anyhow::Context;
use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    GovernorLayer,
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Token bucket parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    /// Sustained requests per second. Must be between 1 and 1000.
    pub per_second: u64,
    /// Bucket size. Zero disables rate limiting.
    pub burst: u32,
    /// Read the client IP from `X-Forwarded-For` / `X-Real-IP` instead of the
    /// socket peer address.
    pub behind_proxy: bool,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            per_second: 10,
            burst: 100,
            behind_proxy: false,
        }
    }
}

impl RateLimitSettings {
    pub fn is_enabled(&self) -> bool {
        self.burst > 0
    }
}

/// Wraps `router` with a per-IP rate limiter.
///
/// Requests exceeding the limit receive `429 Too Many Requests`. The peer
/// address key requires the router to be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Errors
///
/// Returns an error if the settings do not form a valid quota
/// (for example `per_second == 0`).
///
/// # Example
///
/// ```rust,ignore
/// let app = rate_limit::apply(routes::app_router(state), settings)?;
/// ```
pub fn apply(router: Router, settings: RateLimitSettings) -> anyhow::Result<Router> {
    if !settings.is_enabled() {
        tracing::warn!("Rate limiting disabled (RATE_LIMIT_BURST=0)");
        return Ok(router);
    }

    if settings.behind_proxy {
        Ok(router.layer(layer(SmartIpKeyExtractor, settings)?))
    } else {
        Ok(router.layer(layer(PeerIpKeyExtractor, settings)?))
    }
}

/// Highest accepted `per_second`, one token per millisecond.
pub const MAX_PER_SECOND: u64 = 1000;

fn layer<K>(
    key_extractor: K,
    settings: RateLimitSettings,
) -> anyhow::Result<GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>>
where
    K: KeyExtractor,
{
    Ok(GovernorLayer::new(Arc::new(governor_config(
        key_extractor,
        settings,
    )?)))
}

fn governor_config<K>(
    key_extractor: K,
    settings: RateLimitSettings,
) -> anyhow::Result<GovernorConfig<K, NoOpMiddleware<QuantaInstant>>>
where
    K: KeyExtractor,
{
    anyhow::ensure!(
        (1..=MAX_PER_SECOND).contains(&settings.per_second),
        "RATE_LIMIT_PER_SECOND must be between 1 and {MAX_PER_SECOND}"
    );

    // The builder takes the interval between replenished tokens.
    let period = u32::try_from(settings.per_second)
        .ok()
        .and_then(|n| Duration::from_secs(1).checked_div(n))
        .context("Invalid RATE_LIMIT_PER_SECOND")?;

    GovernorConfigBuilder::default()
        .key_extractor(key_extractor)
        .period(period)
        .burst_size(settings.burst)
        .finish()
        .context("Invalid rate limit settings")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_burst_disables() {
        let settings = RateLimitSettings {
            burst: 0,
            ..Default::default()
        };

        assert!(!settings.is_enabled());
        assert!(apply(Router::new(), settings).is_ok());
    }

    #[test]
    fn test_zero_rate_is_rejected() {
        let settings = RateLimitSettings {
            per_second: 0,
            ..Default::default()
        };

        assert!(apply(Router::new(), settings).is_err());
    }

    #[test]
    fn test_period_matches_configured_rate() {
        let settings = RateLimitSettings {
            per_second: 600,
            ..Default::default()
        };

        let config = governor_config(PeerIpKeyExtractor, settings).unwrap();

        assert_eq!(config.period(), Duration::from_nanos(1_666_666));
        assert_eq!(config.burst_size(), 100);

        let config = governor_config(
            PeerIpKeyExtractor,
            RateLimitSettings {
                per_second: 300,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(config.period(), Duration::from_nanos(3_333_333));
    }

    #[test]
    fn test_rate_above_one_per_millisecond_is_rejected() {
        let settings = RateLimitSettings {
            per_second: 5000,
            ..Default::default()
        };

        assert!(apply(Router::new(), settings).is_err());
    }

    #[test]
    fn test_default_settings_build() {
        assert!(apply(Router::new(), RateLimitSettings::default()).is_ok());
        assert!(
            apply(
                Router::new(),
                RateLimitSettings {
                    behind_proxy: true,
                    ..Default::default()
                }
            )
            .is_ok()
        );
    }
}
