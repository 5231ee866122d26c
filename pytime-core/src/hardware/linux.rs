// Platform-specific ZoneSource implementation for Linux/desktop
// Uses chrono to read the system's local zone

use chrono::{Datelike, Local, Offset, TimeZone};

use crate::time_source::{ZoneSource, offset_name};

/// Linux/desktop zone source using the system's local time zone.
///
/// The standard offset is sampled once at construction: the smaller of the
/// January 1st and July 1st offsets of the current year (daylight saving time
/// only ever moves the clock forward, in either hemisphere).
pub struct LinuxZoneSource {
    offset: i32,
    name: String,
}

impl LinuxZoneSource {
    pub fn new() -> Self {
        let year = Local::now().year();
        let sample = |month: u32| -> Option<i32> {
            Local
                .with_ymd_and_hms(year, month, 1, 12, 0, 0)
                .earliest()
                .map(|instant| instant.offset().fix().local_minus_utc())
        };

        let offset = match (sample(1), sample(7)) {
            (Some(january), Some(july)) => january.min(july),
            (Some(only), None) | (None, Some(only)) => only,
            (None, None) => Local::now().offset().fix().local_minus_utc(),
        };
        tracing::debug!(offset, "sampled system standard offset");

        LinuxZoneSource {
            offset,
            name: offset_name(offset),
        }
    }
}

impl Default for LinuxZoneSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneSource for LinuxZoneSource {
    fn utc_offset(&self) -> i32 {
        self.offset
    }

    fn name(&self) -> &str {
        &self.name
    }
}
