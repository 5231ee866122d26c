// print(*values): str() of each value, space separated, one line

use crate::interpreter::Interpreter;
use crate::value::{Result, Value};

pub fn print_impl(interp: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    let line = args
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    interp.writeln(&line)?;
    Ok(Value::None)
}
