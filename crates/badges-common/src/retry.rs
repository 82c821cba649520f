//! Bounded retry policies shared by the API clients.
//!
//! A policy only describes the delay schedule; the clients drive it through
//! [`tokio_retry::RetryIf`] together with their own "is this worth retrying"
//! predicate.

use std::{cell::Cell, future::Future, time::Duration};
use tokio_retry::{
    strategy::{ExponentialBackoff, FixedInterval},
    RetryIf,
};
use tracing::warn;

/// How the delay grows between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// `base * 2^(n-1)` before retry `n`
    Exponential,
    /// `base * n` before retry `n`
    Linear,
    /// `base` before every retry
    Fixed,
}

/// Attempt budget and delay schedule for one kind of request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_attempts: usize,
    /// Delay unit the backoff is computed from
    pub base_delay: Duration,
    /// Upper bound for a single delay (before jitter)
    pub max_delay: Duration,
    /// Upper bound of the random extra delay added to each wait
    pub jitter: Duration,
    /// Growth mode
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Exponential backoff: waits `base`, `2*base`, `4*base`, ...
    pub fn exponential(max_attempts: usize, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            max_delay: Duration::from_secs(30),
            jitter: Duration::ZERO,
            backoff: Backoff::Exponential,
        }
    }

    /// Linear backoff: waits `base`, `2*base`, `3*base`, ...
    pub fn linear(max_attempts: usize, base_delay: Duration) -> Self {
        Self {
            backoff: Backoff::Linear,
            ..Self::exponential(max_attempts, base_delay)
        }
    }

    /// Same wait between every attempt
    pub fn fixed(max_attempts: usize, delay: Duration) -> Self {
        Self {
            backoff: Backoff::Fixed,
            ..Self::exponential(max_attempts, delay)
        }
    }

    /// Policy used for GitHub GraphQL calls (4 attempts, 700 ms steps)
    pub fn github_default() -> Self {
        Self::linear(4, Duration::from_millis(700))
    }

    /// Policy used for WakaTime calls (4 attempts, 1s/2s/4s plus up to 400 ms jitter)
    pub fn wakatime_default() -> Self {
        Self::exponential(4, Duration::from_millis(1000)).with_jitter(Duration::from_millis(400))
    }

    /// Policy used for the profile-views badge (3 attempts, 3 s apart)
    pub fn views_default() -> Self {
        Self::fixed(3, Duration::from_secs(3))
    }

    /// A policy that never waits, handy for tests against local mock servers
    pub fn immediate(max_attempts: usize) -> Self {
        Self::fixed(max_attempts, Duration::ZERO)
    }

    /// Set the random extra delay bound
    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    /// Set the cap for a single delay
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Delay schedule, one entry per retry (so `max_attempts - 1` entries).
    pub fn delays(&self) -> Vec<Duration> {
        let retries = self.max_attempts.saturating_sub(1);
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);

        let schedule: Vec<Duration> = match self.backoff {
            // from_millis(2) yields 2, 4, 8, ... which the factor scales to base, 2*base, ...
            Backoff::Exponential if base_ms >= 2 => ExponentialBackoff::from_millis(2)
                .factor(base_ms / 2)
                .max_delay(self.max_delay)
                .take(retries)
                .collect(),
            Backoff::Exponential | Backoff::Fixed => {
                FixedInterval::new(self.base_delay).take(retries).collect()
            }
            Backoff::Linear => (1..=retries as u32)
                .map(|n| (self.base_delay * n).min(self.max_delay))
                .collect(),
        };

        if self.jitter.is_zero() {
            return schedule;
        }

        let jitter_ms = u64::try_from(self.jitter.as_millis()).unwrap_or(u64::MAX);
        schedule
            .into_iter()
            .map(|d| d + Duration::from_millis(fastrand::u64(0..=jitter_ms)))
            .collect()
    }

    /// Run `action` until it succeeds, `condition` rejects the error, or the
    /// attempt budget is spent. The last error is returned on failure.
    pub async fn run<T, E, Fut, A, C>(&self, what: &str, mut action: A, mut condition: C) -> Result<T, E>
    where
        A: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        C: FnMut(&E) -> bool,
        E: std::fmt::Display,
    {
        let attempt = Cell::new(0usize);
        let max_attempts = self.max_attempts.max(1);
        RetryIf::spawn(
            self.delays(),
            || {
                attempt.set(attempt.get() + 1);
                action()
            },
            |err: &E| {
                let retry = condition(err);
                let attempt = attempt.get();
                if retry && attempt < max_attempts {
                    warn!(what, attempt, max_attempts, error = %err, "attempt failed, retrying");
                }
                retry
            },
        )
        .await
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::github_default()
    }
}
