//! Terminal I/O behind a trait so the interactive flow can be scripted

use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::utils::Result;

/// Where prompts go and answers come from
#[async_trait]
pub trait Console: Send {
    /// Print one line of output
    fn say(&mut self, text: &str);

    /// Print `prompt` and read one line. `None` means input is closed.
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Console on the process's stdin/stdout
pub struct StdConsole {
    lines: Lines<BufReader<Stdin>>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    fn say(&mut self, text: &str) {
        println!("{}", text);
    }

    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;
        Ok(self.lines.next_line().await?)
    }
}
