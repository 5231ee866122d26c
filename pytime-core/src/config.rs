//! Runtime configuration
//!
//! Build-time choices are cargo features (`complex_numbers`). Run-time choices
//! are collected in `TimeConfig`, which can be read from the environment:
//!
//! - `PYTIME_UTC_OFFSET`: standard offset in seconds east of UTC. When unset the
//!   system zone is used.
//! - `PYTIME_MIN_YEAR`: earliest year `mktime` accepts (default 1900).

use crate::hardware::linux::LinuxZoneSource;
use crate::limits::HostDateLimits;
use crate::time_source::{FixedZone, ZoneSource};
use crate::value::{Result, RuntimeError};

pub const UTC_OFFSET_VAR: &str = "PYTIME_UTC_OFFSET";
pub const MIN_YEAR_VAR: &str = "PYTIME_MIN_YEAR";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeConfig {
    pub limits: HostDateLimits,
    /// Fixed standard offset; `None` selects the system zone
    pub utc_offset: Option<i32>,
}

impl TimeConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = TimeConfig::default();

        if let Some(raw) = lookup(UTC_OFFSET_VAR) {
            let offset = parse_setting::<i32>(UTC_OFFSET_VAR, &raw)?;
            if offset.unsigned_abs() >= 86_400 {
                return Err(RuntimeError::DomainError(format!(
                    "{} must be less than one day in magnitude, got {}",
                    UTC_OFFSET_VAR, offset
                )));
            }
            config.utc_offset = Some(offset);
        }

        if let Some(raw) = lookup(MIN_YEAR_VAR) {
            config.limits.min_year = parse_setting::<i64>(MIN_YEAR_VAR, &raw)?;
        }

        Ok(config)
    }

    /// The zone source this configuration selects.
    pub fn zone_source(&self) -> Box<dyn ZoneSource> {
        match self.utc_offset {
            Some(offset) => Box::new(FixedZone::east(offset)),
            None => Box::new(LinuxZoneSource::new()),
        }
    }
}

fn parse_setting<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim().parse::<T>().map_err(|_| {
        RuntimeError::DomainError(format!("invalid value for {}: {:?}", key, raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_environment() {
        let config = TimeConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, TimeConfig::default());
        assert_eq!(config.limits.min_year, 1900);
        assert_eq!(config.utc_offset, None);
    }

    #[test]
    fn test_fixed_offset_from_lookup() {
        let config = TimeConfig::from_lookup(|key| match key {
            UTC_OFFSET_VAR => Some("-18000".to_string()),
            MIN_YEAR_VAR => Some(" 1800 ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.utc_offset, Some(-18_000));
        assert_eq!(config.limits.min_year, 1800);
        assert_eq!(config.zone_source().utc_offset(), -18_000);
    }

    #[test]
    fn test_invalid_settings() {
        let bad_offset = TimeConfig::from_lookup(|key| {
            (key == UTC_OFFSET_VAR).then(|| "east".to_string())
        });
        assert!(matches!(bad_offset, Err(RuntimeError::DomainError(_))));

        let too_far = TimeConfig::from_lookup(|key| {
            (key == UTC_OFFSET_VAR).then(|| "90000".to_string())
        });
        assert!(matches!(too_far, Err(RuntimeError::DomainError(_))));
    }
}
