use std::collections::HashMap;

use crate::config::TimeConfig;
use crate::limits::HostDateLimits;
use crate::output::Output;
use crate::time_source::ZoneSource;
use crate::tokenizer::SourcePos;
use crate::value::{Result, RuntimeError, Value};

// RUST CONCEPT: Dictionary entry with metadata
// Builtins carry a short help text next to their value
#[derive(Debug, Clone)]
pub struct DictEntry {
    pub value: Value,
    pub doc: Option<&'static str>,
}

pub struct Interpreter {
    pub variables: HashMap<String, Value>,
    pub dictionary: HashMap<&'static str, DictEntry>,
    pub current_pos: Option<SourcePos>, // Statement being executed, for error reports
    pub repl_mode: bool,                // Echo the repr of expression statements

    output: Option<Box<dyn Output>>, // Optional output for print (discarded when absent)

    // Host services for the time module
    zone: Box<dyn ZoneSource>,
    pub limits: HostDateLimits,
}

impl Interpreter {
    /// Interpreter over the configuration found in the environment's defaults:
    /// the system zone and the default host limits.
    pub fn new() -> Self {
        Self::with_config(&TimeConfig::default())
    }

    pub fn with_config(config: &TimeConfig) -> Self {
        let mut interpreter = Self {
            variables: HashMap::new(),
            dictionary: HashMap::new(),
            current_pos: None,
            repl_mode: false,
            output: None,
            zone: config.zone_source(),
            limits: config.limits,
        };

        // Builtins are always present; modules are bound by `import`
        crate::builtins::register_builtins(&mut interpreter);

        interpreter
    }

    /// Resolve a name: variables shadow builtins.
    pub fn lookup(&self, name: &str) -> Result<Value> {
        if let Some(value) = self.variables.get(name) {
            return Ok(value.clone());
        }
        self.dictionary
            .get(name)
            .map(|entry| entry.value.clone())
            .ok_or_else(|| RuntimeError::UndefinedName(name.to_string()))
    }

    pub fn assign(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    // RUST CONCEPT: Output management (used by print and REPL echo)
    pub fn set_output(&mut self, output: Box<dyn Output>) {
        self.output = Some(output);
    }

    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    /// Write a line to the output if available
    pub fn writeln(&mut self, text: &str) -> Result<()> {
        if let Some(output) = &mut self.output {
            let failed = || RuntimeError::Io("failed to write to output".to_string());
            output.write(text.as_bytes()).map_err(|_| failed())?;
            output.write(b"\n").map_err(|_| failed())?;
            output.flush().map_err(|_| failed())?;
        }
        Ok(())
    }

    // RUST CONCEPT: ZoneSource management for local-time conversions
    pub fn set_zone_source(&mut self, zone: Box<dyn ZoneSource>) {
        self.zone = zone;
    }

    pub fn zone(&self) -> &dyn ZoneSource {
        self.zone.as_ref()
    }

    pub fn set_limits(&mut self, limits: HostDateLimits) {
        self.limits = limits;
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::BufferOutput;
    use crate::time_source::FixedZone;

    #[test]
    fn test_variables_shadow_builtins() {
        let mut interp = Interpreter::new();
        assert!(matches!(interp.lookup("len"), Ok(Value::Builtin { name: "len", .. })));

        interp.assign("len", Value::Int(3));
        assert!(matches!(interp.lookup("len"), Ok(Value::Int(3))));
    }

    #[test]
    fn test_undefined_name() {
        let interp = Interpreter::new();
        let err = interp.lookup("spam").unwrap_err();
        assert_eq!(err, RuntimeError::UndefinedName("spam".to_string()));
    }

    #[test]
    fn test_time_module_needs_import() {
        let interp = Interpreter::new();
        assert!(interp.lookup("time").is_err());
    }

    #[test]
    fn test_writeln() {
        let mut interp = Interpreter::new();
        // Without output, writes are dropped
        assert!(interp.writeln("lost").is_ok());

        let buffer = BufferOutput::new();
        interp.set_output(Box::new(buffer.clone()));
        assert!(interp.has_output());
        interp.writeln("18000.0").unwrap();
        assert_eq!(buffer.contents(), "18000.0\n");
    }

    #[test]
    fn test_config_selects_zone_and_limits() {
        let config = TimeConfig {
            limits: HostDateLimits::default().with_min_year(1970),
            utc_offset: Some(32_400),
        };
        let interp = Interpreter::with_config(&config);
        assert_eq!(interp.zone().utc_offset(), 32_400);
        assert_eq!(interp.limits.min_year, 1970);

        let mut interp = interp;
        interp.set_zone_source(Box::new(FixedZone::west(18_000)));
        assert_eq!(interp.zone().utc_offset(), -18_000);
    }
}
