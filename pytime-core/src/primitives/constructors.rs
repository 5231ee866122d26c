// Builtin type constructors: bytes, bytearray, range, set, frozenset, list,
// tuple, dict, slice, str, type
//
// Calling a type value (e.g. `list(x)` or `type(x)(y)`) dispatches through
// `constructor`, so `list` is both a class you can print and a function.

use std::sync::Arc;

use crate::interpreter::Interpreter;
use crate::primitives::sequence::iterate;
use crate::primitives::struct_time::StructTime;
use crate::value::{BuiltinFn, Result, RuntimeError, Value};

/// Constructor for a callable type name.
pub fn constructor(type_name: &str) -> Option<BuiltinFn> {
    let func: BuiltinFn = match type_name {
        "bytes" => bytes_impl,
        "bytearray" => bytearray_impl,
        "range" => range_impl,
        "set" => set_impl,
        "frozenset" => frozenset_impl,
        "list" => list_impl,
        "tuple" => tuple_impl,
        "dict" => dict_impl,
        "slice" => slice_impl,
        "str" => str_impl,
        "type" => type_impl,
        "time.struct_time" => struct_time_impl,
        _ => return None,
    };
    Some(func)
}

// RUST CONCEPT: Deduplicating builders
// Python sets and dicts hash their members; here membership is py_eq over an
// insertion-ordered vector, so iteration order is the order of first insertion
pub fn build_set(items: Vec<Value>) -> Result<Arc<[Value]>> {
    let mut members: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        require_hashable(&item)?;
        if !members.iter().any(|m| m.py_eq(&item)) {
            members.push(item);
        }
    }
    Ok(Arc::from(members))
}

/// Later duplicates replace the value but keep the first key's position.
pub fn build_dict(pairs: Vec<(Value, Value)>) -> Result<Arc<[(Value, Value)]>> {
    let mut entries: Vec<(Value, Value)> = Vec::with_capacity(pairs.len());
    for (key, value) in pairs {
        require_hashable(&key)?;
        match entries.iter_mut().find(|(k, _)| k.py_eq(&key)) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
    }
    Ok(Arc::from(entries))
}

fn require_hashable(value: &Value) -> Result<()> {
    if value.is_hashable() {
        Ok(())
    } else {
        Err(RuntimeError::TypeMismatch(format!(
            "unhashable type: '{}'",
            value.type_name()
        )))
    }
}

fn at_most(name: &str, args: &[Value], max: usize) -> Result<()> {
    if args.len() > max {
        let plural = if max == 1 { "argument" } else { "arguments" };
        return Err(RuntimeError::ArgumentCount(format!(
            "{}() takes at most {} {} ({} given)",
            name,
            max,
            plural,
            args.len()
        )));
    }
    Ok(())
}

fn index_arg(value: &Value) -> Result<i64> {
    match value {
        Value::Bool(_) | Value::Int(_) => Ok(value.to_i64().unwrap_or_default()),
        Value::BigInt(_) => Err(RuntimeError::Overflow(
            "Python int too large to convert to C ssize_t".to_string(),
        )),
        other => Err(RuntimeError::TypeMismatch(format!(
            "'{}' object cannot be interpreted as an integer",
            other.type_name()
        ))),
    }
}

fn everything(value: &Value) -> Result<Vec<Value>> {
    iterate(value, usize::MAX)
}

fn byte_values(name: &str, args: &[Value]) -> Result<Vec<u8>> {
    at_most(name, args, 1)?;
    let Some(source) = args.first() else {
        return Ok(Vec::new());
    };
    match source {
        Value::Str(_) => Err(RuntimeError::TypeMismatch(
            "string argument without an encoding".to_string(),
        )),
        Value::Bool(_) | Value::Int(_) | Value::BigInt(_) => {
            let count = index_arg(source)?;
            let count = usize::try_from(count)
                .map_err(|_| RuntimeError::DomainError("negative count".to_string()))?;
            Ok(vec![0u8; count])
        }
        Value::Float(_) => Err(RuntimeError::TypeMismatch(
            "cannot convert 'float' object to bytes".to_string(),
        )),
        other => everything(other)?
            .iter()
            .map(|item| {
                let value = index_arg(item)?;
                u8::try_from(value).map_err(|_| {
                    RuntimeError::DomainError("bytes must be in range(0, 256)".to_string())
                })
            })
            .collect(),
    }
}

pub fn bytes_impl(_interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    Ok(Value::Bytes(Arc::from(byte_values("bytes", &args)?)))
}

pub fn bytearray_impl(_interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    Ok(Value::ByteArray(Arc::from(byte_values("bytearray", &args)?)))
}

pub fn range_impl(_interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    let bounds = args.iter().map(index_arg).collect::<Result<Vec<_>>>()?;
    let (start, stop, step) = match bounds.as_slice() {
        [stop] => (0, *stop, 1),
        [start, stop] => (*start, *stop, 1),
        [start, stop, step] => (*start, *stop, *step),
        [] => {
            return Err(RuntimeError::ArgumentCount(
                "range expected at least 1 argument, got 0".to_string(),
            ));
        }
        more => {
            return Err(RuntimeError::ArgumentCount(format!(
                "range expected at most 3 arguments, got {}",
                more.len()
            )));
        }
    };
    if step == 0 {
        return Err(RuntimeError::DomainError("range() arg 3 must not be zero".to_string()));
    }
    Ok(Value::Range { start, stop, step })
}

pub fn set_impl(_interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    at_most("set", &args, 1)?;
    let items = match args.first() {
        Some(source) => everything(source)?,
        None => Vec::new(),
    };
    Ok(Value::Set(build_set(items)?))
}

pub fn frozenset_impl(_interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    at_most("frozenset", &args, 1)?;
    let items = match args.first() {
        Some(source) => everything(source)?,
        None => Vec::new(),
    };
    Ok(Value::FrozenSet(build_set(items)?))
}

pub fn list_impl(_interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    at_most("list", &args, 1)?;
    match args.first() {
        Some(source) => Ok(Value::list(everything(source)?)),
        None => Ok(Value::list(Vec::new())),
    }
}

pub fn tuple_impl(_interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    at_most("tuple", &args, 1)?;
    match args.first() {
        Some(source) => Ok(Value::tuple(everything(source)?)),
        None => Ok(Value::tuple(Vec::new())),
    }
}

// dict(), dict(mapping), dict(iterable of pairs)
pub fn dict_impl(_interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    at_most("dict", &args, 1)?;
    let Some(source) = args.first() else {
        return Ok(Value::Dict(Arc::from(Vec::new())));
    };
    if let Value::Dict(pairs) = source {
        return Ok(Value::Dict(pairs.clone()));
    }

    let mut pairs = Vec::new();
    for (position, item) in everything(source)?.iter().enumerate() {
        let pair = iterate(item, usize::MAX).map_err(|_| {
            RuntimeError::TypeMismatch(format!(
                "cannot convert dictionary update sequence element #{} to a sequence",
                position
            ))
        })?;
        let [key, value] = <[Value; 2]>::try_from(pair).map_err(|pair| {
            RuntimeError::DomainError(format!(
                "dictionary update sequence element #{} has length {}; 2 is required",
                position,
                pair.len()
            ))
        })?;
        pairs.push((key, value));
    }
    Ok(Value::Dict(build_dict(pairs)?))
}

pub fn slice_impl(_interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    let parts = match args.len() {
        1 => (Value::None, args[0].clone(), Value::None),
        2 => (args[0].clone(), args[1].clone(), Value::None),
        3 => (args[0].clone(), args[1].clone(), args[2].clone()),
        0 => {
            return Err(RuntimeError::ArgumentCount(
                "slice expected at least 1 argument, got 0".to_string(),
            ));
        }
        n => {
            return Err(RuntimeError::ArgumentCount(format!(
                "slice expected at most 3 arguments, got {}",
                n
            )));
        }
    };
    Ok(Value::Slice(Arc::new(parts)))
}

pub fn str_impl(_interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    at_most("str", &args, 1)?;
    match args.first() {
        Some(value) => Ok(Value::str(&value.to_string())),
        None => Ok(Value::str("")),
    }
}

pub fn type_impl(_interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    match args.as_slice() {
        [value] => Ok(Value::Type(value.type_name())),
        _ => Err(RuntimeError::ArgumentCount("type() takes 1 argument".to_string())),
    }
}

// time.struct_time(sequence)
pub fn struct_time_impl(_interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    match args.as_slice() {
        [sequence] => Ok(Value::StructTime(Arc::new(StructTime::from_value(sequence)?))),
        [] => Err(RuntimeError::ArgumentCount(
            "struct_time() missing required argument 'sequence' (pos 1)".to_string(),
        )),
        more => Err(RuntimeError::ArgumentCount(format!(
            "struct_time() takes exactly 1 argument ({} given)",
            more.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_source::FixedZone;

    fn interp() -> Interpreter {
        let mut interp = Interpreter::new();
        interp.set_zone_source(Box::new(FixedZone::utc()));
        interp
    }

    fn seed() -> Vec<Value> {
        (1..10).map(Value::Int).collect()
    }

    #[test]
    fn test_set_deduplicates_in_insertion_order() {
        let items = vec![Value::Int(3), Value::Int(1), Value::Bool(true), Value::Float(3.0)];
        let set = build_set(items).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(Value::Set(set).repr(), "{3, 1}");
    }

    #[test]
    fn test_unhashable_members() {
        let err = build_set(vec![Value::list(vec![])]).unwrap_err();
        assert_eq!(err.to_string(), "TypeError: unhashable type: 'list'");
    }

    #[test]
    fn test_dict_from_pairs() {
        let pairs: Vec<Value> = seed()
            .into_iter()
            .map(|v| Value::tuple(vec![v.clone(), v]))
            .collect();
        let dict = dict_impl(&mut interp(), vec![Value::list(pairs)]).unwrap();
        let Value::Dict(entries) = &dict else { panic!("expected dict") };
        assert_eq!(entries.len(), 9);

        let bad = Value::list(vec![Value::tuple(vec![Value::Int(1)])]);
        let err = dict_impl(&mut interp(), vec![bad]).unwrap_err();
        assert_eq!(
            err.message(),
            "dictionary update sequence element #0 has length 1; 2 is required"
        );
    }

    #[test]
    fn test_dict_keeps_first_key_position() {
        let dict = build_dict(vec![
            (Value::Int(1), Value::str("a")),
            (Value::Int(2), Value::str("b")),
            (Value::Float(1.0), Value::str("c")),
        ])
        .unwrap();
        assert_eq!(Value::Dict(dict).repr(), "{1: 'c', 2: 'b'}");
    }

    #[test]
    fn test_bytes() {
        let made = bytes_impl(&mut interp(), vec![Value::list(seed())]).unwrap();
        assert_eq!(made.repr(), "b'\\x01\\x02\\x03\\x04\\x05\\x06\\x07\\x08\\t'");
        let zeros = bytes_impl(&mut interp(), vec![Value::Int(2)]).unwrap();
        assert_eq!(zeros.repr(), "b'\\x00\\x00'");
        let err = bytes_impl(&mut interp(), vec![Value::list(vec![Value::Int(256)])]).unwrap_err();
        assert_eq!(err.to_string(), "ValueError: bytes must be in range(0, 256)");
        let array = bytearray_impl(&mut interp(), vec![Value::list(vec![Value::Int(1); 2])]).unwrap();
        assert_eq!(array.repr(), "bytearray(b'\\x01\\x01')");
    }

    #[test]
    fn test_range() {
        let r = range_impl(&mut interp(), vec![Value::Int(1), Value::Int(10)]).unwrap();
        assert_eq!(r.repr(), "range(1, 10)");
        let err = range_impl(&mut interp(), vec![Value::Int(1), Value::Int(2), Value::Int(0)]).unwrap_err();
        assert_eq!(err.to_string(), "ValueError: range() arg 3 must not be zero");
        assert!(range_impl(&mut interp(), vec![Value::Float(1.0)]).is_err());
    }

    #[test]
    fn test_slice_and_type() {
        let s = slice_impl(&mut interp(), vec![Value::Int(1), Value::Int(2), Value::Int(3)]).unwrap();
        assert_eq!(s.repr(), "slice(1, 2, 3)");
        let s = slice_impl(&mut interp(), vec![Value::Int(5)]).unwrap();
        assert_eq!(s.repr(), "slice(None, 5, None)");

        let t = type_impl(&mut interp(), vec![Value::list(vec![])]).unwrap();
        assert_eq!(t.repr(), "<class 'list'>");
        assert!(constructor("list").is_some());
        assert!(constructor("int").is_none());
    }

    #[test]
    fn test_struct_time_constructor() {
        let st = struct_time_impl(&mut interp(), vec![Value::list(seed())]).unwrap();
        assert!(matches!(st, Value::StructTime(_)));
        assert!(matches!(
            struct_time_impl(&mut interp(), vec![]),
            Err(RuntimeError::ArgumentCount(_))
        ));
        let err = struct_time_impl(&mut interp(), vec![Value::Int(1)]).unwrap_err();
        assert_eq!(err.message(), "constructor requires a sequence");
    }
}
