use std::time::Duration;

use rand::Rng;

/// How long to wait before the next attempt.
#[derive(Clone, Debug)]
pub enum Backoff {
    /// The same delay every time.
    Fixed(Duration),
    /// `base * factor^attempt`, capped at `max`.
    Exponential {
        /// Delay before the first retry.
        base: Duration,
        factor: f64,
        max: Duration,
        /// Scale each delay by a random factor in 0.5..=1.5.
        jitter: bool,
    },
}

impl Backoff {
    /// Delay before retry number `attempt` (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        match self {
            Self::Fixed(d) => *d,
            Self::Exponential {
                base,
                factor,
                max,
                jitter,
            } => {
                let exp = factor.powi(i32::try_from(attempt).unwrap_or(i32::MAX));
                let raw = base.as_secs_f64() * exp;
                let capped = raw.min(max.as_secs_f64());
                let secs = if *jitter {
                    capped * rand::rng().random_range(0.5..=1.5)
                } else {
                    capped
                };
                Duration::from_secs_f64(secs.min(max.as_secs_f64()))
            }
        }
    }
}

/// Retry policy for upstream GETs.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    pub enabled: bool,
    /// Retries after the first attempt; a request is sent at most `max_retries + 1` times.
    pub max_retries: u32,
    pub backoff: Backoff,
    /// Statuses worth another attempt.
    pub retry_on_status: Vec<u16>,
    pub retry_on_timeout: bool,
    pub retry_on_connect: bool,
}

impl RetryConfig {
    /// A policy that sends every request exactly once.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub(crate) fn should_retry_status(&self, status: u16) -> bool {
        self.retry_on_status.contains(&status)
    }

    pub(crate) fn should_retry_error(&self, err: &reqwest::Error) -> bool {
        (self.retry_on_timeout && err.is_timeout()) || (self.retry_on_connect && err.is_connect())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 2,
            backoff: Backoff::Exponential {
                base: Duration::from_millis(200),
                factor: 2.0,
                max: Duration::from_secs(3),
                jitter: true,
            },
            retry_on_status: vec![408, 429, 500, 502, 503, 504],
            retry_on_timeout: true,
            retry_on_connect: true,
        }
    }
}

/// How a single call uses the response cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// Serve a fresh cached body if there is one, otherwise fetch and store.
    #[default]
    Use,
    /// Fetch even on a hit, then store the new body.
    Refresh,
    /// Neither read nor write the cache.
    Bypass,
}
