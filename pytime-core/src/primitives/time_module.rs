// The `time` module: struct_time, mktime, gmtime, localtime, timezone, altzone
//
// Functions read the zone source and host limits from the interpreter, so an
// embedding application controls what "local time" means.

use std::sync::Arc;

use crate::interpreter::Interpreter;
use crate::primitives::calendar::SECONDS_PER_HOUR;
use crate::primitives::localtime::{gmtime, localtime};
use crate::primitives::mktime::mktime;
use crate::value::{BuiltinFn, Result, RuntimeError, Value};

pub const MODULE_NAME: &str = "time";

pub const MODULE_DOC: &str = "Conversions between seconds since the epoch and struct_time values.\n\
    Functions: mktime(tuple), gmtime(secs), localtime(secs)\n\
    Types: struct_time\n\
    Attributes: timezone, altzone";

/// (name, function, documentation) of every callable in the module
pub const FUNCTIONS: &[(&str, BuiltinFn, &str)] = &[
    (
        "mktime",
        mktime_impl,
        "mktime(tuple) -> floating point number\n\nConvert a time tuple in local time to seconds since the Epoch.\nThe tuple must be a 9-tuple or a struct_time.",
    ),
    (
        "gmtime",
        gmtime_impl,
        "gmtime(seconds) -> struct_time\n\nConvert seconds since the Epoch to a time tuple expressing UTC.",
    ),
    (
        "localtime",
        localtime_impl,
        "localtime(seconds) -> struct_time\n\nConvert seconds since the Epoch to a time tuple expressing local time.",
    ),
];

pub const STRUCT_TIME_DOC: &str = "struct_time(sequence)\n\n\
    The time value as returned by gmtime() and localtime().\n\
    Nine integer fields (tm_year .. tm_isdst) form the sequence; tm_zone and\n\
    tm_gmtoff are available by name only.";

/// Attribute lookup on the module object.
pub fn attribute(interp: &Interpreter, name: &str) -> Result<Value> {
    if let Some((found, func, _)) = FUNCTIONS.iter().find(|(n, _, _)| *n == name) {
        return Ok(Value::Builtin { name: *found, func: *func });
    }

    let timezone = -i64::from(interp.zone().utc_offset());
    match name {
        "struct_time" => Ok(Value::Type("time.struct_time")),
        "timezone" => Ok(Value::Int(timezone)),
        "altzone" => Ok(Value::Int(timezone - SECONDS_PER_HOUR)),
        "__name__" => Ok(Value::str(MODULE_NAME)),
        _ => Err(RuntimeError::Attribute(format!(
            "module '{}' has no attribute '{}'",
            MODULE_NAME, name
        ))),
    }
}

pub fn mktime_impl(interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    let seconds = mktime(&args, interp.zone(), &interp.limits)?;
    Ok(Value::Float(seconds))
}

pub fn gmtime_impl(interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    let st = gmtime(&args, &interp.limits)?;
    Ok(Value::StructTime(Arc::new(st)))
}

pub fn localtime_impl(interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    let st = localtime(&args, interp.zone(), &interp.limits)?;
    Ok(Value::StructTime(Arc::new(st)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_source::FixedZone;

    fn eastern() -> Interpreter {
        let mut interp = Interpreter::new();
        interp.set_zone_source(Box::new(FixedZone::west(18_000)));
        interp
    }

    #[test]
    fn test_zone_attributes() {
        let interp = eastern();
        assert!(attribute(&interp, "timezone").unwrap().py_eq(&Value::Int(18_000)));
        assert!(attribute(&interp, "altzone").unwrap().py_eq(&Value::Int(14_400)));
    }

    #[test]
    fn test_function_attributes() {
        let interp = eastern();
        assert!(matches!(
            attribute(&interp, "mktime"),
            Ok(Value::Builtin { name: "mktime", .. })
        ));
        assert_eq!(
            attribute(&interp, "struct_time").unwrap().repr(),
            "<class 'time.struct_time'>"
        );
        let err = attribute(&interp, "sleep").unwrap_err();
        assert_eq!(err.to_string(), "AttributeError: module 'time' has no attribute 'sleep'");
    }

    #[test]
    fn test_mktime_builtin_returns_float() {
        let mut interp = eastern();
        let epoch = Value::tuple([1970, 1, 1, 0, 0, 0, 0, 0, 0].iter().map(|f| Value::Int(*f)).collect());
        let seconds = mktime_impl(&mut interp, vec![epoch]).unwrap();
        assert_eq!(seconds.repr(), "18000.0");
    }

    #[test]
    fn test_localtime_builtin() {
        let mut interp = eastern();
        let st = localtime_impl(&mut interp, vec![Value::Int(18_000)]).unwrap();
        let Value::StructTime(st) = st else { panic!("expected struct_time") };
        assert_eq!(st.tm_year(), 1970);
        assert_eq!(st.tm_hour(), 0);

        let st = gmtime_impl(&mut interp, vec![Value::Int(18_000)]).unwrap();
        let Value::StructTime(st) = st else { panic!("expected struct_time") };
        assert_eq!(st.tm_hour(), 5);
    }
}
