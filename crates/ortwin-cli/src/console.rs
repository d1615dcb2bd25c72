//! Stdin/stdout operator console.

use ortwin_core::OperatorConsole;
use std::io::{self, BufRead, Write};

/// Console backed by the process's stdin and stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl OperatorConsole for StdConsole {
    fn say(&mut self, line: &str) {
        println!("{line}");
    }

    fn prompt(&mut self, message: &str) -> io::Result<String> {
        print!("{message}");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\n', '\r']).to_owned())
    }
}
