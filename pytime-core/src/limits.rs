//! Representable range of the host date primitive
//!
//! `mktime` enforces two independent boundaries. The lower one is a policy
//! choice of this runtime (no dates before 1900). The upper one is inherited
//! from the host's date primitive, which can only represent instants within
//! 100,000,000 days of the epoch. A host with a different primitive only needs
//! a different `HostDateLimits`; the converter itself carries no literals.

use crate::primitives::calendar::{SECONDS_PER_DAY, days_from_civil};

/// Range limits applied by the time converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostDateLimits {
    /// Earliest calendar year `mktime` accepts (default: 1900)
    pub min_year: i64,

    /// First representable day relative to 1970-01-01 (default: -100,000,000)
    pub min_epoch_day: i64,

    /// First day past the representable range (default: 100,000,000, i.e. 275760-09-13)
    pub max_epoch_day: i64,
}

impl Default for HostDateLimits {
    fn default() -> Self {
        HostDateLimits {
            min_year: 1900,
            min_epoch_day: -100_000_000,
            max_epoch_day: 100_000_000,
        }
    }
}

impl HostDateLimits {
    /// Day number of January 1st of `min_year`.
    pub fn min_policy_day(&self) -> i64 {
        days_from_civil(self.min_year, 1, 1)
    }

    /// First representable instant, in seconds since the epoch.
    pub fn min_instant(&self) -> i64 {
        self.min_epoch_day.saturating_mul(SECONDS_PER_DAY)
    }

    /// First instant past the representable range.
    pub fn max_instant(&self) -> i64 {
        self.max_epoch_day.saturating_mul(SECONDS_PER_DAY)
    }

    /// Whether an instant (UTC seconds) falls inside the host primitive's range.
    pub fn contains_instant(&self, seconds: i64) -> bool {
        (self.min_instant()..self.max_instant()).contains(&seconds)
    }

    pub fn with_min_year(mut self, min_year: i64) -> Self {
        self.min_year = min_year;
        self
    }
}
