// struct_time: the fixed-shape calendar record
//
// Nine integer slots form the sequence view (len, iteration, indexing) and are
// also reachable by name. Two more named-only fields, tm_zone and tm_gmtoff,
// hold whatever the 10th and 11th source elements were, or nothing.
// There are no setters: a StructTime never changes after construction.

use std::fmt;

use crate::primitives::sequence::{coerce_sequence, slice_positions};
use crate::value::{Result, RuntimeError, Value};

pub const N_SEQUENCE_FIELDS: usize = 9;
pub const N_FIELDS: usize = 11;
pub const N_UNNAMED_FIELDS: usize = 2;

/// Field names in declaration order; the first nine are the sequence view.
pub const FIELD_NAMES: [&str; N_FIELDS] = [
    "tm_year", "tm_mon", "tm_mday", "tm_hour", "tm_min", "tm_sec", "tm_wday", "tm_yday",
    "tm_isdst", "tm_zone", "tm_gmtoff",
];

const TYPE_NAME: &str = "time.struct_time";

#[derive(Debug, Clone)]
pub struct StructTime {
    slots: [i64; N_SEQUENCE_FIELDS],
    tm_zone: Option<Value>,
    tm_gmtoff: Option<Value>,
}

// RUST CONCEPT: Generated named accessors
// Each name is a view onto one slot of the same array the index accessor reads
macro_rules! slot_accessors {
    ($($name:ident => $index:expr),* $(,)?) => {
        $(
            pub fn $name(&self) -> i64 {
                self.slots[$index]
            }
        )*
    };
}

impl StructTime {
    /// Build a struct_time from nine slots and optional zone fields.
    pub fn from_fields(
        slots: [i64; N_SEQUENCE_FIELDS],
        tm_zone: Option<Value>,
        tm_gmtoff: Option<Value>,
    ) -> Self {
        StructTime {
            slots,
            tm_zone,
            tm_gmtoff,
        }
    }

    /// Constructor semantics: a struct_time passes through unchanged, anything
    /// else goes through sequence coercion.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::StructTime(st) => Ok(st.as_ref().clone()),
            other => Self::from_elements(coerce_sequence(other, N_FIELDS)?),
        }
    }

    /// Build from already coerced elements. At least nine are required; the
    /// 10th and 11th populate tm_zone and tm_gmtoff; the rest are ignored.
    pub fn from_elements(elements: Vec<Value>) -> Result<Self> {
        if elements.len() < N_SEQUENCE_FIELDS {
            return Err(RuntimeError::Length(format!(
                "time.struct_time() takes an at least 9-sequence ({}-sequence given)",
                elements.len()
            )));
        }

        let mut slots = [0i64; N_SEQUENCE_FIELDS];
        for (slot, element) in slots.iter_mut().zip(elements.iter()) {
            *slot = slot_int(element)?;
        }

        let mut extras = elements.into_iter().skip(N_SEQUENCE_FIELDS);
        Ok(StructTime {
            slots,
            tm_zone: extras.next(),
            tm_gmtoff: extras.next(),
        })
    }

    slot_accessors! {
        tm_year => 0,
        tm_mon => 1,
        tm_mday => 2,
        tm_hour => 3,
        tm_min => 4,
        tm_sec => 5,
        tm_wday => 6,
        tm_yday => 7,
        tm_isdst => 8,
    }

    pub fn tm_zone(&self) -> Option<&Value> {
        self.tm_zone.as_ref()
    }

    pub fn tm_gmtoff(&self) -> Option<&Value> {
        self.tm_gmtoff.as_ref()
    }

    pub fn slots(&self) -> &[i64; N_SEQUENCE_FIELDS] {
        &self.slots
    }

    /// Length of the sequence view (always 9).
    pub fn len(&self) -> usize {
        N_SEQUENCE_FIELDS
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.slots.iter().copied()
    }

    /// Python-style subscript over the sequence view.
    ///
    /// Integer indices wrap from the end (-1 is tm_isdst) and must lie in
    /// -9..=8. Slices return a tuple.
    pub fn get_item(&self, index: &Value) -> Result<Value> {
        match index {
            Value::Bool(_) | Value::Int(_) | Value::BigInt(_) => {
                let position = index.to_i64().ok_or_else(|| {
                    RuntimeError::IndexRange(
                        "cannot fit 'int' into an index-sized integer".to_string(),
                    )
                })?;
                let length = N_SEQUENCE_FIELDS as i64;
                let resolved = if position < 0 { position + length } else { position };
                if (0..length).contains(&resolved) {
                    Ok(Value::Int(self.slots[resolved as usize]))
                } else {
                    Err(RuntimeError::IndexRange("tuple index out of range".to_string()))
                }
            }
            Value::Slice(parts) => {
                let positions = slice_positions(&parts.0, &parts.1, &parts.2, N_SEQUENCE_FIELDS)?;
                Ok(Value::tuple(
                    positions.into_iter().map(|i| Value::Int(self.slots[i])).collect(),
                ))
            }
            other => Err(RuntimeError::TypeMismatch(format!(
                "tuple indices must be integers or slices, not {}",
                other.type_name()
            ))),
        }
    }

    /// Named field access, including the n_* metadata constants.
    pub fn get_attr(&self, name: &str) -> Result<Value> {
        if let Some(position) = FIELD_NAMES[..N_SEQUENCE_FIELDS].iter().position(|f| *f == name) {
            return Ok(Value::Int(self.slots[position]));
        }
        match name {
            "tm_zone" => Ok(self.tm_zone.clone().unwrap_or(Value::None)),
            "tm_gmtoff" => Ok(self.tm_gmtoff.clone().unwrap_or(Value::None)),
            "n_fields" => Ok(Value::Int(N_FIELDS as i64)),
            "n_sequence_fields" => Ok(Value::Int(N_SEQUENCE_FIELDS as i64)),
            "n_unnamed_fields" => Ok(Value::Int(N_UNNAMED_FIELDS as i64)),
            _ => Err(no_attribute(name)),
        }
    }

    /// Attribute assignment always fails: struct_time is immutable.
    pub fn set_attr(&self, name: &str, _value: Value) -> Result<()> {
        if FIELD_NAMES.contains(&name) {
            Err(RuntimeError::Attribute("readonly attribute".to_string()))
        } else {
            Err(no_attribute(name))
        }
    }

    /// Item assignment always fails: struct_time is immutable.
    pub fn set_item(&self, _index: &Value, _value: Value) -> Result<()> {
        Err(RuntimeError::TypeMismatch(format!(
            "'{}' object does not support item assignment",
            TYPE_NAME
        )))
    }

    /// Fully qualified rendering naming all eleven fields.
    pub fn repr(&self) -> String {
        let zone = self.tm_zone.as_ref().map_or_else(|| "None".to_string(), Value::repr);
        let gmtoff = self.tm_gmtoff.as_ref().map_or_else(|| "None".to_string(), Value::repr);
        format!(
            "{}({}, tm_zone={}, tm_gmtoff={})",
            TYPE_NAME,
            self.named_slots(),
            zone,
            gmtoff
        )
    }

    fn named_slots(&self) -> String {
        FIELD_NAMES
            .iter()
            .zip(self.slots.iter())
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// Concise rendering: the nine sequence fields
impl fmt::Display for StructTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", TYPE_NAME, self.named_slots())
    }
}

// Equality is sequence-view equality, like the tuple a struct_time stands for
impl PartialEq for StructTime {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl Eq for StructTime {}

fn no_attribute(name: &str) -> RuntimeError {
    RuntimeError::Attribute(format!(
        "'{}' object has no attribute '{}'",
        TYPE_NAME, name
    ))
}

// RUST CONCEPT: Integer slot coercion
// bool is an int subclass in Python, so True/False are accepted as 1/0
fn slot_int(value: &Value) -> Result<i64> {
    match value {
        Value::Bool(_) | Value::Int(_) | Value::BigInt(_) => value.to_i64().ok_or_else(|| {
            RuntimeError::Overflow("Python int too large to convert to C long".to_string())
        }),
        Value::Float(_) => Err(RuntimeError::TypeMismatch(
            "'float' object cannot be interpreted as an integer".to_string(),
        )),
        other => Err(RuntimeError::TypeMismatch(format!(
            "an integer is required (got type {})",
            other.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn ones(count: usize) -> Value {
        Value::list(vec![Value::Int(1); count])
    }

    fn counting() -> StructTime {
        StructTime::from_value(&Value::list((0..11).map(Value::Int).collect())).unwrap()
    }

    #[test]
    fn test_valid_lengths() {
        for count in [9, 10, 11, 12, 20] {
            let st = StructTime::from_value(&ones(count)).unwrap();
            assert_eq!(st.len(), 9);
        }
    }

    #[test]
    fn test_too_short() {
        let err = StructTime::from_value(&ones(8)).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::Length(
                "time.struct_time() takes an at least 9-sequence (8-sequence given)".to_string()
            )
        );
    }

    #[test]
    fn test_extra_fields() {
        let nine = StructTime::from_value(&ones(9)).unwrap();
        assert!(nine.tm_zone().is_none());
        assert!(nine.get_attr("tm_gmtoff").unwrap().py_eq(&Value::None));

        let eleven = StructTime::from_value(&ones(11)).unwrap();
        assert!(eleven.get_attr("tm_zone").unwrap().py_eq(&Value::Int(1)));
        assert!(eleven.get_attr("tm_gmtoff").unwrap().py_eq(&Value::Int(1)));
    }

    #[test]
    fn test_named_and_indexed_views_agree() {
        let st = counting();
        for (position, name) in FIELD_NAMES[..N_SEQUENCE_FIELDS].iter().enumerate() {
            let by_name = st.get_attr(name).unwrap();
            let by_index = st.get_item(&Value::Int(position as i64)).unwrap();
            assert!(by_name.py_eq(&by_index), "{} disagrees", name);
        }
        assert_eq!(st.tm_year(), 0);
        assert_eq!(st.tm_isdst(), 8);
    }

    #[test]
    fn test_index_wraparound_from_minus_12_to_12() {
        let st = counting();
        for index in -12i64..=12 {
            let result = st.get_item(&Value::Int(index));
            if (-9..=8).contains(&index) {
                let expected = if index < 0 { index + 9 } else { index };
                assert!(result.unwrap().py_eq(&Value::Int(expected)), "index {}", index);
            } else {
                assert_eq!(
                    result.unwrap_err(),
                    RuntimeError::IndexRange("tuple index out of range".to_string()),
                    "index {}",
                    index
                );
            }
        }
    }

    #[test]
    fn test_slicing() {
        let st = counting();
        let slice = |a: Value, b: Value, c: Value| Value::Slice(Arc::new((a, b, c)));

        let head = st.get_item(&slice(Value::None, Value::Int(3), Value::None)).unwrap();
        assert_eq!(head.repr(), "(0, 1, 2)");

        let reversed = st.get_item(&slice(Value::None, Value::None, Value::Int(-1))).unwrap();
        assert_eq!(reversed.repr(), "(8, 7, 6, 5, 4, 3, 2, 1, 0)");

        let stepped = st.get_item(&slice(Value::Int(-4), Value::Int(100), Value::Int(2))).unwrap();
        assert_eq!(stepped.repr(), "(5, 7)");

        let zero_step = st.get_item(&slice(Value::None, Value::None, Value::Int(0)));
        assert!(matches!(zero_step, Err(RuntimeError::DomainError(_))));
    }

    #[test]
    fn test_bad_index_types() {
        let st = counting();
        let err = st.get_item(&Value::str("a")).unwrap_err();
        assert_eq!(err.message(), "tuple indices must be integers or slices, not str");
        assert!(st.get_item(&Value::Bool(true)).unwrap().py_eq(&Value::Int(1)));
    }

    #[test]
    fn test_metadata_constants() {
        let st = counting();
        assert!(st.get_attr("n_fields").unwrap().py_eq(&Value::Int(11)));
        assert!(st.get_attr("n_sequence_fields").unwrap().py_eq(&Value::Int(9)));
        assert!(st.get_attr("n_unnamed_fields").unwrap().py_eq(&Value::Int(2)));
        assert!(matches!(st.get_attr("tm_bogus"), Err(RuntimeError::Attribute(_))));
    }

    #[test]
    fn test_immutable() {
        let st = counting();
        assert_eq!(
            st.set_attr("tm_year", Value::Int(2000)).unwrap_err(),
            RuntimeError::Attribute("readonly attribute".to_string())
        );
        assert!(matches!(
            st.set_item(&Value::Int(0), Value::Int(2000)),
            Err(RuntimeError::TypeMismatch(_))
        ));
        assert_eq!(st.tm_year(), 0);
    }

    #[test]
    fn test_slot_coercion() {
        let mut fields: Vec<Value> = vec![Value::Int(1970); 9];

        fields[1] = Value::Bool(true);
        assert_eq!(StructTime::from_elements(fields.clone()).unwrap().tm_mon(), 1);

        fields[1] = Value::Float(1.0);
        assert_eq!(
            StructTime::from_elements(fields.clone()).unwrap_err().message(),
            "'float' object cannot be interpreted as an integer"
        );

        fields[1] = Value::str("1");
        assert_eq!(
            StructTime::from_elements(fields.clone()).unwrap_err().message(),
            "an integer is required (got type str)"
        );

        fields[1] = Value::BigInt(num_bigint::BigInt::from(i64::MAX) * num_bigint::BigInt::from(4));
        assert!(matches!(
            StructTime::from_elements(fields),
            Err(RuntimeError::Overflow(_))
        ));
    }

    #[test]
    fn test_passthrough() {
        let st = counting();
        let again = StructTime::from_value(&Value::StructTime(Arc::new(st.clone()))).unwrap();
        assert_eq!(st, again);
    }

    #[test]
    fn test_renderings() {
        let st = StructTime::from_value(&ones(9)).unwrap();
        assert_eq!(
            st.to_string(),
            "time.struct_time(tm_year=1, tm_mon=1, tm_mday=1, tm_hour=1, tm_min=1, \
             tm_sec=1, tm_wday=1, tm_yday=1, tm_isdst=1)"
        );
        assert_eq!(
            st.repr(),
            "time.struct_time(tm_year=1, tm_mon=1, tm_mday=1, tm_hour=1, tm_min=1, \
             tm_sec=1, tm_wday=1, tm_yday=1, tm_isdst=1, tm_zone=None, tm_gmtoff=None)"
        );
    }

    #[test]
    fn test_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StructTime>();
        assert_send_sync::<Value>();
    }
}
