// Script runner: execute a file, report the first exception with its location

use std::io::Write;

use pytime_core::{Interpreter, TimeConfig, execute_string};

use crate::stdout_output::StdoutOutput;

/// Run the script at `path`; returns the process exit code.
pub fn run_script(path: &str, config: &TimeConfig) -> Result<i32, Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;

    let mut interp = Interpreter::with_config(config);
    interp.set_output(Box::new(StdoutOutput::new()));

    match execute_string(&source, &mut interp) {
        Ok(()) => Ok(0),
        Err(err) => {
            tracing::debug!(error = %err, "script raised");
            let mut stdout = std::io::stdout();
            writeln!(stdout, "### EXCEPTION ###")?;
            writeln!(stdout, "{}", err)?;
            if let Some(pos) = &interp.current_pos {
                writeln!(stdout, "    {}:{}", display_name(path), pos.line)?;
            }
            stdout.flush()?;
            Ok(1)
        }
    }
}

fn display_name(path: &str) -> &str {
    std::path::Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}
