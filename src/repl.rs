use crate::runner::{self, Mode, RunOptions};
use std::io::{self, Write};

/// Line-oriented REPL.
///
/// Each line is an independent run: lines starting with `BEGIN` are programs
/// and print their final scope, anything else is an arithmetic expression.
pub fn start() {
    println!("SPI Interpreter v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' or press Ctrl+D to quit");
    println!();

    loop {
        print!("spi> ");
        if let Err(error) = io::stdout().flush() {
            eprintln!("Error writing prompt: {}", error);
            break;
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                // EOF (Ctrl+D or piped input ended)
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    println!("Goodbye!");
                    break;
                }

                runner::run(line, None, mode_for(line), RunOptions::default());
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }
}

fn mode_for(line: &str) -> Mode {
    if line.starts_with("BEGIN") {
        Mode::Program
    } else {
        Mode::Expression
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_selects_program_mode() {
        assert_eq!(mode_for("BEGIN x := 1 END."), Mode::Program);
        assert_eq!(mode_for("1 + 2"), Mode::Expression);
        assert_eq!(mode_for("begin"), Mode::Expression);
    }
}
