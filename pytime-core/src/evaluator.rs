// This module implements the AST-walking evaluator
//
// EXECUTION MODEL:
// 1. The whole source is parsed first; a syntax error executes nothing
// 2. Statements run in order; the first runtime error stops execution and is
//    returned, with `interp.current_pos` naming the failing statement
// 3. In REPL mode, expression statements echo the repr of a non-None result
//
// RUST LEARNING NOTES:
// - Expressions evaluate recursively; `?` propagates the first error outward
// - Values are cheap to clone: containers share their storage through Arc

use std::sync::Arc;

use crate::builtins;
use crate::interpreter::Interpreter;
use crate::parser::{Expr, Statement, StmtKind, Target, UnaryOp, parse};
use crate::primitives::arithmetic;
use crate::primitives::constructors::{build_dict, build_set};
use crate::primitives::sequence::slice_positions;
use crate::value::{Result, RuntimeError, Value};

/// Parse and run a program.
pub fn execute_string(source: &str, interp: &mut Interpreter) -> Result<()> {
    let statements = parse(source)?;
    for statement in &statements {
        execute(statement, interp)?;
    }
    Ok(())
}

/// Run one statement; returns the value of an expression statement.
pub fn execute(statement: &Statement, interp: &mut Interpreter) -> Result<Option<Value>> {
    interp.current_pos = Some(statement.pos.clone());
    tracing::debug!(line = statement.pos.line, "execute statement");

    match &statement.kind {
        StmtKind::Import(module) => {
            let value = builtins::import_module(module)?;
            interp.assign(module, value);
            Ok(None)
        }
        StmtKind::Assign { target, value } => {
            let value = evaluate(value, interp)?;
            assign(target, value, interp)?;
            Ok(None)
        }
        StmtKind::Expr(expr) => {
            let value = evaluate(expr, interp)?;
            if interp.repl_mode && !matches!(value, Value::None) {
                interp.writeln(&value.repr())?;
            }
            Ok(Some(value))
        }
    }
}

fn assign(target: &Target, value: Value, interp: &mut Interpreter) -> Result<()> {
    match target {
        Target::Name(name) => {
            interp.assign(name, value);
            Ok(())
        }
        Target::Attribute { object, name } => match evaluate(object, interp)? {
            Value::StructTime(st) => st.set_attr(name, value),
            other => Err(RuntimeError::Attribute(format!(
                "'{}' object attribute '{}' is read-only",
                other.type_name(),
                name
            ))),
        },
        Target::Subscript { object, index } => {
            let object = evaluate(object, interp)?;
            let index = evaluate(index, interp)?;
            match object {
                Value::StructTime(st) => st.set_item(&index, value),
                other => Err(RuntimeError::TypeMismatch(format!(
                    "'{}' object does not support item assignment",
                    other.type_name()
                ))),
            }
        }
    }
}

/// Evaluate an expression to a value.
pub fn evaluate(expr: &Expr, interp: &mut Interpreter) -> Result<Value> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Name(name) => interp.lookup(name),
        Expr::Tuple(items) => Ok(Value::tuple(evaluate_all(items, interp)?)),
        Expr::List(items) => Ok(Value::list(evaluate_all(items, interp)?)),
        Expr::Set(items) => Ok(Value::Set(build_set(evaluate_all(items, interp)?)?)),
        Expr::Dict(pairs) => {
            let mut evaluated = Vec::with_capacity(pairs.len());
            for (key, value) in pairs {
                let key = evaluate(key, interp)?;
                let value = evaluate(value, interp)?;
                evaluated.push((key, value));
            }
            Ok(Value::Dict(build_dict(evaluated)?))
        }
        Expr::Call { callee, args } => {
            let callee = evaluate(callee, interp)?;
            let args = evaluate_all(args, interp)?;
            builtins::call(interp, &callee, args)
        }
        Expr::Attribute { object, name } => {
            let object = evaluate(object, interp)?;
            get_attribute(interp, &object, name)
        }
        Expr::Subscript { object, index } => {
            let object = evaluate(object, interp)?;
            let index = evaluate(index, interp)?;
            get_item(&object, &index)
        }
        Expr::Slice { start, stop, step } => {
            let mut part = |bound: &Option<Box<Expr>>| match bound {
                Some(expr) => evaluate(expr, interp),
                None => Ok(Value::None),
            };
            let parts = (part(start)?, part(stop)?, part(step)?);
            Ok(Value::Slice(Arc::new(parts)))
        }
        Expr::Unary { op, operand } => {
            let operand = evaluate(operand, interp)?;
            match op {
                UnaryOp::Negate => arithmetic::negate(&operand),
                UnaryOp::Plus => arithmetic::positive(&operand),
            }
        }
        Expr::Binary { op, left, right } => {
            let left = evaluate(left, interp)?;
            let right = evaluate(right, interp)?;
            arithmetic::binary(*op, &left, &right)
        }
    }
}

fn evaluate_all(exprs: &[Expr], interp: &mut Interpreter) -> Result<Vec<Value>> {
    exprs.iter().map(|expr| evaluate(expr, interp)).collect()
}

fn get_attribute(interp: &Interpreter, object: &Value, name: &str) -> Result<Value> {
    match object {
        Value::Module(module) => builtins::module_attribute(interp, module, name),
        Value::StructTime(st) => st.get_attr(name),
        Value::Slice(parts) => match name {
            "start" => Ok(parts.0.clone()),
            "stop" => Ok(parts.1.clone()),
            "step" => Ok(parts.2.clone()),
            _ => Err(no_attribute(object, name)),
        },
        Value::Range { start, stop, step } => match name {
            "start" => Ok(Value::Int(*start)),
            "stop" => Ok(Value::Int(*stop)),
            "step" => Ok(Value::Int(*step)),
            _ => Err(no_attribute(object, name)),
        },
        #[cfg(feature = "complex_numbers")]
        Value::Complex(c) => match name {
            "real" => Ok(Value::Float(c.re)),
            "imag" => Ok(Value::Float(c.im)),
            _ => Err(no_attribute(object, name)),
        },
        _ => Err(no_attribute(object, name)),
    }
}

fn no_attribute(object: &Value, name: &str) -> RuntimeError {
    RuntimeError::Attribute(format!(
        "'{}' object has no attribute '{}'",
        object.type_name(),
        name
    ))
}

// Subscript on the sequence types; struct_time has its own rules
fn get_item(object: &Value, index: &Value) -> Result<Value> {
    match object {
        Value::StructTime(st) => st.get_item(index),
        Value::Tuple(items) => index_sequence(items, index, "tuple", Value::tuple),
        Value::List(items) => index_sequence(items, index, "list", Value::list),
        Value::Str(text) => {
            let chars: Vec<Value> = text
                .chars()
                .map(|ch| Value::str(ch.encode_utf8(&mut [0u8; 4])))
                .collect();
            index_sequence(&chars, index, "string", |parts| {
                let joined: String = parts.iter().map(|p| p.to_string()).collect();
                Value::str(&joined)
            })
        }
        Value::Bytes(bytes) => {
            let items: Vec<Value> = bytes.iter().map(|b| Value::Int(i64::from(*b))).collect();
            index_sequence(&items, index, "index", |parts| {
                let bytes: Vec<u8> = parts
                    .iter()
                    .filter_map(|p| p.to_i64().and_then(|b| u8::try_from(b).ok()))
                    .collect();
                Value::Bytes(Arc::from(bytes))
            })
        }
        Value::Dict(pairs) => pairs
            .iter()
            .find(|(key, _)| key.py_eq(index))
            .map(|(_, value)| value.clone())
            .ok_or_else(|| RuntimeError::Key(index.repr())),
        other => Err(RuntimeError::TypeMismatch(format!(
            "'{}' object is not subscriptable",
            other.type_name()
        ))),
    }
}

// RUST CONCEPT: Generic indexing with a rebuild function
// Integer indices wrap from the end; slices collect the selected items and
// hand them to `rebuild` to produce the right container type
fn index_sequence<F>(items: &[Value], index: &Value, kind: &str, rebuild: F) -> Result<Value>
where
    F: Fn(Vec<Value>) -> Value,
{
    match index {
        Value::Bool(_) | Value::Int(_) | Value::BigInt(_) => {
            let length = items.len() as i64;
            let position = index.to_i64().unwrap_or(i64::MAX);
            let resolved = if position < 0 { position.saturating_add(length) } else { position };
            usize::try_from(resolved)
                .ok()
                .and_then(|i| items.get(i))
                .cloned()
                .ok_or_else(|| RuntimeError::IndexRange(format!("{} index out of range", kind)))
        }
        Value::Slice(parts) => {
            let positions = slice_positions(&parts.0, &parts.1, &parts.2, items.len())?;
            Ok(rebuild(positions.into_iter().map(|i| items[i].clone()).collect()))
        }
        other => Err(RuntimeError::TypeMismatch(format!(
            "{} indices must be integers or slices, not {}",
            kind,
            other.type_name()
        ))),
    }
}
