// REPL implementation using editline

use editline::{LineEditor, terminals::StdioTerminal};
use std::io::Write;
use pytime_core::{Interpreter, TimeConfig, execute_string};

use crate::stdout_output::StdoutOutput;

pub fn run_repl(config: &TimeConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!();
    println!("pytime v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Type `quit` or press Ctrl-D to exit");
    println!("Type `import time` to load the time module");
    println!("Type `help(name)` to get help for a builtin, type or module");
    println!();

    // Expression results are echoed, like the Python prompt
    let mut interp = Interpreter::with_config(config);
    interp.set_output(Box::new(StdoutOutput::new()));
    interp.repl_mode = true;

    let mut editor = LineEditor::new(1024, 50);
    let mut terminal = StdioTerminal::new();

    loop {
        print!(">>> ");
        std::io::stdout().flush()?;

        match editor.read_line(&mut terminal) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "quit" {
                    break;
                }

                if let Err(e) = execute_string(trimmed, &mut interp) {
                    eprintln!("Error: {}", e);
                }
            }
            Err(editline::Error::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(editline::Error::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    Ok(())
}
