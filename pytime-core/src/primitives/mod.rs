// Primitives module - organized into separate files for maintainability

// Calendar arithmetic and sequence helpers
pub mod calendar;
pub mod sequence;

// The time module
pub mod struct_time;
pub mod mktime;
pub mod localtime;
pub mod time_module;

// Builtin types and functions
pub mod constructors;
pub mod print;
pub mod introspection;
pub mod arithmetic;
