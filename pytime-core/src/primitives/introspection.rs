// len, repr and help

use crate::interpreter::Interpreter;
use crate::primitives::sequence::range_len;
use crate::value::{Result, RuntimeError, Value};

fn one_argument(name: &str, args: Vec<Value>) -> Result<Value> {
    let count = args.len();
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(value), None) => Ok(value),
        _ => Err(RuntimeError::ArgumentCount(format!(
            "{}() takes exactly one argument ({} given)",
            name, count
        ))),
    }
}

pub fn len_impl(_interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    let value = one_argument("len", args)?;
    let length = match &value {
        Value::Str(s) => s.chars().count(),
        Value::Bytes(b) | Value::ByteArray(b) => b.len(),
        Value::List(items) | Value::Tuple(items) | Value::Set(items) | Value::FrozenSet(items) => {
            items.len()
        }
        Value::Dict(pairs) => pairs.len(),
        Value::Range { start, stop, step } => range_len(*start, *stop, *step),
        Value::StructTime(st) => st.len(),
        other => {
            return Err(RuntimeError::TypeMismatch(format!(
                "object of type '{}' has no len()",
                other.type_name()
            )));
        }
    };
    i64::try_from(length)
        .map(Value::Int)
        .map_err(|_| RuntimeError::Overflow("Python int too large to convert to C ssize_t".to_string()))
}

pub fn repr_impl(_interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    let value = one_argument("repr", args)?;
    Ok(Value::str(&value.repr()))
}

// help(obj): print the documentation recorded for a builtin, type or module
pub fn help_impl(interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    let value = one_argument("help", args)?;
    let text = match &value {
        Value::Builtin { name, .. } => {
            let doc = crate::builtins::doc_for(interp, name).unwrap_or("No documentation.");
            format!("Help on built-in function {}:\n\n{}", name, doc)
        }
        Value::Type(name) => {
            let doc = crate::builtins::doc_for(interp, name).unwrap_or("No documentation.");
            format!("Help on class {}:\n\n{}", name, doc)
        }
        Value::Module(name) => {
            let doc = crate::builtins::doc_for(interp, name).unwrap_or("No documentation.");
            format!("Help on built-in module {}:\n\n{}", name, doc)
        }
        other => format!("Help on {} object:\n\n{}", other.type_name(), other.repr()),
    };
    interp.writeln(&text)?;
    Ok(Value::None)
}
