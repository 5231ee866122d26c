// mktime: calendar fields in local time -> seconds since the epoch
//
// Pipeline: validate the argument shape, narrow the nine fields to C ints,
// fold them into a local wall-clock reading, check the two range boundaries,
// shift by the zone offset and the DST flag.

use crate::limits::HostDateLimits;
use crate::primitives::calendar::{CivilDateTime, SECONDS_PER_DAY, SECONDS_PER_HOUR};
use crate::primitives::struct_time::{N_SEQUENCE_FIELDS, StructTime};
use crate::time_source::ZoneSource;
use crate::value::{Result, RuntimeError, Value};

/// The nine fields of a time tuple, narrowed to C `int`.
pub type TimeTuple = [i32; N_SEQUENCE_FIELDS];

const ISDST: usize = 8;

/// `time.mktime(t)`: exactly one positional argument, a 9-tuple or a struct_time.
pub fn mktime(args: &[Value], zone: &dyn ZoneSource, limits: &HostDateLimits) -> Result<f64> {
    let [arg] = args else {
        return Err(RuntimeError::ArgumentCount(format!(
            "mktime() takes exactly one argument ({} given)",
            args.len()
        )));
    };
    let fields = time_tuple(arg)?;
    mktime_fields(&fields, zone, limits)
}

/// Validate a mktime argument and extract its nine fields.
///
/// Only tuples and struct_time values are time tuples; a list, range, string
/// or mapping is rejected even though struct_time() would accept it.
pub fn time_tuple(value: &Value) -> Result<TimeTuple> {
    let st = match value {
        Value::StructTime(st) => st.as_ref().clone(),
        Value::Tuple(items) => {
            if items.len() != N_SEQUENCE_FIELDS {
                return Err(RuntimeError::Length(format!(
                    "function takes exactly 9 arguments ({} given)",
                    items.len()
                )));
            }
            StructTime::from_elements(items.to_vec())?
        }
        _ => {
            return Err(RuntimeError::TypeMismatch(
                "Tuple or struct_time argument required".to_string(),
            ));
        }
    };

    let mut fields = [0i32; N_SEQUENCE_FIELDS];
    for (field, slot) in fields.iter_mut().zip(st.iter()) {
        *field = narrow_to_c_int(slot)?;
    }
    Ok(fields)
}

fn narrow_to_c_int(value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|_| {
        let message = if value > 0 {
            "signed integer is greater than maximum"
        } else {
            "signed integer is less than minimum"
        };
        RuntimeError::Overflow(message.to_string())
    })
}

/// Convert validated fields to a timestamp.
///
/// The local reading is checked against the policy floor (`limits.min_year`)
/// first. The instant it names in standard time is then checked against the
/// host primitive's representable range. A set DST flag means the reading is
/// daylight time, one hour ahead of standard time.
pub fn mktime_fields(
    fields: &TimeTuple,
    zone: &dyn ZoneSource,
    limits: &HostDateLimits,
) -> Result<f64> {
    let [year, month, day, hour, minute, second, ..] = fields.map(i64::from);
    let local = CivilDateTime::new(year, month, day, hour, minute, second).to_epoch_seconds();

    if local.div_euclid(SECONDS_PER_DAY) < limits.min_policy_day() {
        return Err(RuntimeError::Overflow("mktime argument out of range".to_string()));
    }

    let instant = local - i64::from(zone.utc_offset());
    if instant >= limits.max_instant() {
        return Err(RuntimeError::Overflow(
            "signed integer is greater than maximum".to_string(),
        ));
    }
    if instant < limits.min_instant() {
        return Err(RuntimeError::Overflow(
            "signed integer is less than minimum".to_string(),
        ));
    }

    let mut timestamp = instant;
    if fields[ISDST] == 1 {
        timestamp -= SECONDS_PER_HOUR;
    }

    tracing::debug!(?fields, local, timestamp, "mktime");
    Ok(timestamp as f64)
}
