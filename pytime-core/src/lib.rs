//! # Pytime Core
//!
//! A small Python-compatible runtime built around the `time` module's
//! `struct_time` type and its `mktime` conversion.
//!
//! ## Features
//!
//! - **struct_time**: construction from any sequence of 9 to 11 elements,
//!   read-only attributes, indexing and slicing, CPython `str`/`repr`
//! - **mktime**: local broken-down time to epoch seconds, with CPython's
//!   range checks and messages
//! - **Pluggable local time**: the zone source and host date limits are
//!   injected, so results are reproducible in tests
//! - **Script subset**: `import`, assignments, calls, attributes, subscripts
//!   and the literal forms needed to build arguments
//!
//! ## Example
//!
//! ```
//! use pytime_core::{BufferOutput, FixedZone, Interpreter, execute_string};
//!
//! let mut interp = Interpreter::new();
//! interp.set_zone_source(Box::new(FixedZone::west(18_000)));
//! let output = BufferOutput::new();
//! interp.set_output(Box::new(output.clone()));
//!
//! execute_string("import time\nprint(time.mktime((1970, 1, 1, 0, 0, 0, 0, 0, 0)))", &mut interp).unwrap();
//! assert_eq!(output.contents(), "18000.0\n");
//! ```

// Public modules
pub mod output;
pub mod value;
pub mod interpreter;
pub mod tokenizer;
pub mod parser;
pub mod builtins;
pub mod evaluator;
pub mod primitives;

// Local time services
pub mod time_source;
pub mod hardware;
pub mod limits;
pub mod config;

// Re-exports for convenience
pub use interpreter::{DictEntry, Interpreter};
pub use value::{Result, RuntimeError, Value};
pub use output::{BufferOutput, Output};
pub use evaluator::{execute, execute_string};
pub use primitives::struct_time::StructTime;
pub use primitives::mktime::mktime;
pub use config::TimeConfig;
pub use time_source::{FixedZone, ZoneSource};
pub use limits::HostDateLimits;
