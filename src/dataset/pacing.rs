//! Delay applied before every API request.

use std::time::Duration;

pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Decides how long to wait before each request.
///
/// The wait happens before every fetch, including the first one and those
/// following a failed fetch.
pub trait Pacing {
    fn delay(&self) -> Duration;
}

/// Waits the same amount of time before every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

impl Default for FixedDelay {
    fn default() -> Self {
        FixedDelay(DEFAULT_REQUEST_DELAY)
    }
}

impl Pacing for FixedDelay {
    fn delay(&self) -> Duration {
        self.0
    }
}

/// Never waits. Meant for tests and local endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDelay;

impl Pacing for NoDelay {
    fn delay(&self) -> Duration {
        Duration::ZERO
    }
}
