/// Zone abstraction for local-time conversions.
///
/// `mktime` interprets calendar fields as local time, so the interpreter needs
/// to know how far the local wall clock is from UTC. Embedding applications
/// inject a `ZoneSource` the same way they would inject any other host service;
/// tests use a `FixedZone` so results do not depend on the machine they run on.
///
/// The offset reported is always the *standard* (non-DST) offset. Daylight
/// saving is applied separately from the `tm_isdst` flag of the input.
///
/// # Examples
///
/// ```
/// use pytime_core::time_source::{FixedZone, ZoneSource};
///
/// // US Eastern standard time, five hours west of UTC
/// let eastern = FixedZone::west(18_000);
/// assert_eq!(eastern.utc_offset(), -18_000);
/// assert_eq!(eastern.name(), "UTC-05:00");
/// ```
pub trait ZoneSource: Send + Sync {
    /// Standard offset from UTC in seconds.
    ///
    /// Positive east of UTC, negative west:
    /// - UTC: 0
    /// - EST (UTC-5): -18000
    /// - JST (UTC+9): +32400
    fn utc_offset(&self) -> i32;

    /// Name reported in `tm_zone` of local struct_time values.
    fn name(&self) -> &str;
}

/// A zone with a constant offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedZone {
    offset: i32,
    name: String,
}

impl FixedZone {
    /// Zone `seconds` east of UTC.
    pub fn east(seconds: i32) -> Self {
        FixedZone {
            offset: seconds,
            name: offset_name(seconds),
        }
    }

    /// Zone `seconds` west of UTC.
    pub fn west(seconds: i32) -> Self {
        Self::east(-seconds)
    }

    pub fn utc() -> Self {
        Self::east(0)
    }

    pub fn with_name(offset: i32, name: &str) -> Self {
        FixedZone {
            offset,
            name: name.to_string(),
        }
    }
}

impl ZoneSource for FixedZone {
    fn utc_offset(&self) -> i32 {
        self.offset
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// "UTC", "UTC+09:00", "UTC-05:30"
pub(crate) fn offset_name(offset: i32) -> String {
    if offset == 0 {
        return "UTC".to_string();
    }
    let sign = if offset < 0 { '-' } else { '+' };
    let magnitude = offset.unsigned_abs();
    format!("UTC{}{:02}:{:02}", sign, magnitude / 3_600, magnitude % 3_600 / 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_zone_offsets() {
        assert_eq!(FixedZone::utc().utc_offset(), 0);
        assert_eq!(FixedZone::east(32_400).utc_offset(), 32_400);
        assert_eq!(FixedZone::west(18_000).utc_offset(), -18_000);
    }

    #[test]
    fn test_zone_names() {
        assert_eq!(FixedZone::utc().name(), "UTC");
        assert_eq!(FixedZone::east(32_400).name(), "UTC+09:00");
        assert_eq!(FixedZone::west(19_800).name(), "UTC-05:30");
        assert_eq!(FixedZone::with_name(-18_000, "EST").name(), "EST");
    }
}
