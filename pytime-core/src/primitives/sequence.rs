// Sequence coercion
// Turns the input shapes struct_time accepts into an ordered list of raw elements.
// Each accepted shape has its own extraction rule; anything else is a type error.

use crate::value::{Result, RuntimeError, Value};

/// Number of elements of a range, computed without overflow.
pub fn range_len(start: i64, stop: i64, step: i64) -> usize {
    let (start, stop, step) = (i128::from(start), i128::from(stop), i128::from(step));
    let len = if step > 0 && start < stop {
        (stop - start + step - 1) / step
    } else if step < 0 && start > stop {
        (start - stop - step - 1) / -step
    } else {
        0
    };
    usize::try_from(len).unwrap_or(usize::MAX)
}

fn range_items(start: i64, stop: i64, step: i64, limit: usize) -> Vec<Value> {
    let count = range_len(start, stop, step).min(limit);
    (0..count)
        .map(|i| Value::Int((i128::from(start) + i as i128 * i128::from(step)) as i64))
        .collect()
}

/// Python iteration protocol: the first `limit` items a `for` loop would see.
///
/// Strings yield one-character strings, mappings yield their keys, byte
/// containers yield integers.
pub fn iterate(value: &Value, limit: usize) -> Result<Vec<Value>> {
    let items = match value {
        Value::Bytes(bytes) | Value::ByteArray(bytes) => bytes
            .iter()
            .take(limit)
            .map(|byte| Value::Int(i64::from(*byte)))
            .collect(),
        Value::List(items)
        | Value::Tuple(items)
        | Value::Set(items)
        | Value::FrozenSet(items) => items.iter().take(limit).cloned().collect(),
        Value::Range { start, stop, step } => range_items(*start, *stop, *step, limit),
        Value::Str(text) => text
            .chars()
            .take(limit)
            .map(|ch| Value::str(ch.encode_utf8(&mut [0u8; 4])))
            .collect(),
        Value::Dict(pairs) => pairs.iter().take(limit).map(|(key, _)| key.clone()).collect(),
        Value::StructTime(st) => st.iter().take(limit).map(Value::Int).collect(),
        other => {
            return Err(RuntimeError::TypeMismatch(format!(
                "'{}' object is not iterable",
                other.type_name()
            )));
        }
    };
    Ok(items)
}

/// Normalize a struct_time constructor argument into at most `limit` raw elements.
///
/// - bytes: each byte as an integer
/// - list, tuple, range: elements in order
/// - str: each decimal digit as its integer value (other characters are kept
///   as one-character strings and rejected later by slot coercion)
/// - set, frozenset: elements in insertion order
/// - dict: the values, in key order
///
/// bytearray is not accepted. Scalars (bool, int, float, complex), None and
/// NotImplemented fail with "constructor requires a sequence".
pub fn coerce_sequence(value: &Value, limit: usize) -> Result<Vec<Value>> {
    tracing::trace!(kind = value.type_name(), limit, "coercing sequence");
    match value {
        Value::Dict(pairs) => Ok(pairs
            .iter()
            .take(limit)
            .map(|(_, item)| item.clone())
            .collect()),
        Value::Str(text) => Ok(text
            .chars()
            .take(limit)
            .map(|ch| match ch.to_digit(10) {
                Some(digit) => Value::Int(i64::from(digit)),
                None => Value::str(ch.encode_utf8(&mut [0u8; 4])),
            })
            .collect()),
        Value::Bytes(_)
        | Value::List(_)
        | Value::Tuple(_)
        | Value::Range { .. }
        | Value::Set(_)
        | Value::FrozenSet(_)
        | Value::StructTime(_) => iterate(value, limit),
        _ => Err(RuntimeError::TypeMismatch(
            "constructor requires a sequence".to_string(),
        )),
    }
}

fn slice_bound(value: &Value) -> Result<Option<i64>> {
    match value {
        Value::None => Ok(None),
        Value::Bool(_) | Value::Int(_) => Ok(value.to_i64()),
        // Huge bounds clamp exactly like i64 extremes would
        Value::BigInt(i) if i.sign() == num_bigint::Sign::Minus => Ok(Some(i64::MIN)),
        Value::BigInt(_) => Ok(Some(i64::MAX)),
        _ => Err(RuntimeError::TypeMismatch(
            "slice indices must be integers or None or have an __index__ method".to_string(),
        )),
    }
}

/// Positions selected by `start:stop:step` over a sequence of `length` items,
/// with Python's clamping of out-of-range and negative bounds.
pub fn slice_positions(start: &Value, stop: &Value, step: &Value, length: usize) -> Result<Vec<usize>> {
    let step = slice_bound(step)?.unwrap_or(1);
    if step == 0 {
        return Err(RuntimeError::DomainError("slice step cannot be zero".to_string()));
    }
    let length = length as i64;

    let clamp = |bound: i64, low: i64, high: i64| -> i64 {
        let bound = if bound < 0 { bound.saturating_add(length) } else { bound };
        bound.clamp(low, high)
    };

    let mut positions = Vec::new();
    if step > 0 {
        let first = slice_bound(start)?.map_or(0, |b| clamp(b, 0, length));
        let end = slice_bound(stop)?.map_or(length, |b| clamp(b, 0, length));
        let mut i = first;
        while i < end {
            positions.push(i as usize);
            i = i.saturating_add(step);
        }
    } else {
        let first = slice_bound(start)?.map_or(length - 1, |b| clamp(b, -1, length - 1));
        let end = slice_bound(stop)?.map_or(-1, |b| clamp(b, -1, length - 1));
        let mut i = first;
        while i > end {
            positions.push(i as usize);
            i = i.saturating_add(step);
        }
    }
    Ok(positions)
}
