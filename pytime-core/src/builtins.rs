use crate::interpreter::{DictEntry, Interpreter};
use crate::primitives::{constructors, introspection, print, time_module};
use crate::value::{BuiltinFn, Result, RuntimeError, Value};

/// Modules `import` can bind, with their documentation
const MODULES: &[(&str, &str)] = &[(time_module::MODULE_NAME, time_module::MODULE_DOC)];

pub fn register_builtins(interp: &mut Interpreter) {
    // Helper to add a builtin function with documentation
    let add_builtin = |interp: &mut Interpreter, name: &'static str, func: BuiltinFn, doc: &'static str| {
        interp.dictionary.insert(
            name,
            DictEntry {
                value: Value::Builtin { name, func },
                doc: Some(doc),
            },
        );
    };

    // Types are values too; calling one runs its constructor
    let add_type = |interp: &mut Interpreter, name: &'static str, doc: &'static str| {
        interp.dictionary.insert(
            name,
            DictEntry {
                value: Value::Type(name),
                doc: Some(doc),
            },
        );
    };

    // I/O and introspection
    add_builtin(interp, "print", print::print_impl,
        "print(*values)\n\nPrint the str() of each value, separated by spaces.");
    add_builtin(interp, "repr", introspection::repr_impl,
        "repr(obj)\n\nReturn the canonical string representation of the object.");
    add_builtin(interp, "len", introspection::len_impl,
        "len(obj)\n\nReturn the number of items in a container.");
    add_builtin(interp, "help", introspection::help_impl,
        "help(obj)\n\nShow the documentation of a builtin, type or module.");

    // Constructors
    add_type(interp, "str", "str(object='') -> str\n\nReturn the str() rendering of the object.");
    add_type(interp, "type", "type(object) -> the object's type");
    add_type(interp, "bytes", "bytes(iterable_of_ints) -> bytes\nbytes(int) -> bytes of size given by the parameter initialized with null bytes");
    add_type(interp, "bytearray", "bytearray(iterable_of_ints) -> bytearray\nbytearray(int) -> bytes array of size given by the parameter initialized with null bytes");
    add_type(interp, "range", "range(stop) -> range object\nrange(start, stop[, step]) -> range object");
    add_type(interp, "set", "set() -> new empty set object\nset(iterable) -> new set object");
    add_type(interp, "frozenset", "frozenset() -> empty frozenset object\nfrozenset(iterable) -> frozenset object");
    add_type(interp, "list", "list(iterable=()) -> new list");
    add_type(interp, "tuple", "tuple(iterable=()) -> new tuple");
    add_type(interp, "dict", "dict() -> new empty dictionary\ndict(mapping) -> new dictionary from a mapping\ndict(iterable) -> new dictionary from (key, value) pairs");
    add_type(interp, "slice", "slice(stop)\nslice(start, stop[, step])");

    // Singletons that are names rather than keywords
    interp.dictionary.insert(
        "NotImplemented",
        DictEntry {
            value: Value::NotImplemented,
            doc: None,
        },
    );
}

/// Bind a module for `import name`.
pub fn import_module(name: &str) -> Result<Value> {
    MODULES
        .iter()
        .find(|(module, _)| *module == name)
        .map(|(module, _)| Value::Module(*module))
        .ok_or_else(|| RuntimeError::ModuleNotFound(name.to_string()))
}

/// Attribute of a module object.
pub fn module_attribute(interp: &Interpreter, module: &str, name: &str) -> Result<Value> {
    match module {
        time_module::MODULE_NAME => time_module::attribute(interp, name),
        _ => Err(RuntimeError::Attribute(format!(
            "module '{}' has no attribute '{}'",
            module, name
        ))),
    }
}

/// Documentation for a builtin, type or module name.
pub fn doc_for(interp: &Interpreter, name: &str) -> Option<&'static str> {
    if let Some(entry) = interp.dictionary.get(name) {
        return entry.doc;
    }
    if let Some((_, _, doc)) = time_module::FUNCTIONS.iter().find(|(n, _, _)| *n == name) {
        return Some(*doc);
    }
    if name == "time.struct_time" {
        return Some(time_module::STRUCT_TIME_DOC);
    }
    MODULES.iter().find(|(module, _)| *module == name).map(|(_, doc)| *doc)
}

/// Call any callable value with evaluated arguments.
pub fn call(interp: &mut Interpreter, callee: &Value, args: Vec<Value>) -> Result<Value> {
    match callee {
        Value::Builtin { name, func } => {
            tracing::trace!(function = *name, argc = args.len(), "call");
            func(interp, args)
        }
        Value::Type(name) => match constructors::constructor(name) {
            Some(func) => func(interp, args),
            None => Err(RuntimeError::TypeMismatch(format!(
                "cannot create '{}' instances",
                name
            ))),
        },
        other => Err(RuntimeError::TypeMismatch(format!(
            "'{}' object is not callable",
            other.type_name()
        ))),
    }
}
