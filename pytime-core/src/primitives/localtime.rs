// gmtime / localtime: seconds since the epoch -> struct_time
//
// The inverse direction of mktime. Both require an explicit timestamp; the
// result is fully populated, including weekday, day of year, zone name and
// offset. DST is never reported because zones carry only a standard offset.

use std::sync::Arc;

use num_traits::ToPrimitive;

use crate::limits::HostDateLimits;
use crate::primitives::calendar::{day_of_year, weekday, CivilDateTime, SECONDS_PER_DAY};
use crate::primitives::struct_time::StructTime;
use crate::time_source::ZoneSource;
use crate::value::{Result, RuntimeError, Value};

const OUT_OF_RANGE: &str = "timestamp out of range for platform time_t";

/// `time.gmtime(secs)`: broken-down UTC time.
pub fn gmtime(args: &[Value], limits: &HostDateLimits) -> Result<StructTime> {
    let seconds = timestamp_argument("gmtime", args)?;
    broken_down(seconds, 0, "UTC", limits)
}

/// `time.localtime(secs)`: broken-down time in the given zone.
pub fn localtime(args: &[Value], zone: &dyn ZoneSource, limits: &HostDateLimits) -> Result<StructTime> {
    let seconds = timestamp_argument("localtime", args)?;
    broken_down(seconds, zone.utc_offset(), zone.name(), limits)
}

/// Whole seconds of a timestamp argument, rounded toward negative infinity.
fn timestamp_argument(function: &str, args: &[Value]) -> Result<i64> {
    let [arg] = args else {
        return Err(RuntimeError::ArgumentCount(format!(
            "{}() takes exactly one argument ({} given)",
            function,
            args.len()
        )));
    };

    match arg {
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Int(i) => Ok(*i),
        Value::BigInt(_) => Err(RuntimeError::Overflow(OUT_OF_RANGE.to_string())),
        Value::Float(x) if x.is_nan() => Err(RuntimeError::DomainError(
            "Invalid value NaN (not a number)".to_string(),
        )),
        Value::Float(x) => x
            .floor()
            .to_i64()
            .ok_or_else(|| RuntimeError::Overflow(OUT_OF_RANGE.to_string())),
        other => Err(RuntimeError::TypeMismatch(format!(
            "'{}' object cannot be interpreted as an integer",
            other.type_name()
        ))),
    }
}

// The host range bounds the instant; its local reading may fall a day outside
fn broken_down(seconds: i64, offset: i32, zone_name: &str, limits: &HostDateLimits) -> Result<StructTime> {
    if !limits.contains_instant(seconds) {
        return Err(RuntimeError::Overflow(OUT_OF_RANGE.to_string()));
    }
    let local = seconds + i64::from(offset);
    let day = local.div_euclid(SECONDS_PER_DAY);

    let reading = CivilDateTime::from_epoch_seconds(local);
    let slots = [
        reading.year,
        reading.month,
        reading.day,
        reading.hour,
        reading.minute,
        reading.second,
        weekday(day),
        day_of_year(day),
        0,
    ];
    tracing::trace!(seconds, offset, ?slots, "broken down");

    Ok(StructTime::from_fields(
        slots,
        Some(Value::Str(Arc::from(zone_name))),
        Some(Value::Int(i64::from(offset))),
    ))
}
