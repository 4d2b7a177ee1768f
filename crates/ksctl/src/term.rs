//! Interactive terminal session.
//!
//! Wraps the input and output streams every command talks to the operator
//! through: leveled output, structured object previews and the
//! confirmation prompts that gate every mutation. Debug-level detail goes
//! to the tracing logger instead of the operator's screen.

use std::io::{self, BufRead, Write};

use serde::Serialize;
use tracing::debug;

use crate::{Error, Result};

const BANNER: &str = "------------------------------------------------------";

/// Metadata fields managed by the API server. Stripped from previews so
/// operators only see state that is meaningful to the decision at hand.
const STRIPPED_METADATA_FIELDS: &[&str] = &[
    "managedFields",
    "resourceVersion",
    "uid",
    "generation",
    "creationTimestamp",
];

/// One command invocation's interactive session.
pub struct Terminal {
    input: Box<dyn BufRead + Send>,
    output: Box<dyn Write + Send>,
    default_answer: Option<bool>,
}

impl Terminal {
    pub fn new(input: Box<dyn BufRead + Send>, output: Box<dyn Write + Send>) -> Self {
        Self {
            input,
            output,
            default_answer: None,
        }
    }

    /// A session on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(
            Box::new(io::BufReader::new(io::stdin())),
            Box::new(io::stdout()),
        )
    }

    /// Pre-set the answer every confirmation prompt returns. Used by
    /// `--yes` automation and by tests; the prompt is still printed.
    pub fn assume(&mut self, answer: bool) {
        self.default_answer = Some(answer);
    }

    pub fn println(&mut self, line: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    pub fn info(&mut self, message: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "INFO: {}", message.as_ref())?;
        Ok(())
    }

    /// Warnings are visually distinguished to flag risk.
    pub fn warn(&mut self, message: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "WARNING: {}", message.as_ref())?;
        Ok(())
    }

    /// Render `object` as a YAML block under a titled banner, with
    /// server-managed bookkeeping stripped.
    ///
    /// A render failure aborts the command before any prompt: no
    /// confirmation may ever be asked without a visible preview.
    pub fn print_object<T: Serialize>(&mut self, title: &str, object: &T) -> Result<()> {
        let rendered = render_object(object)?;
        writeln!(self.output, "{BANNER}")?;
        writeln!(self.output, "{title}")?;
        writeln!(self.output, "{BANNER}")?;
        writeln!(self.output, "{rendered}")?;
        Ok(())
    }

    /// Ask a yes/no question and block for a single line of input.
    ///
    /// Accepts case-insensitive y/yes/n/no and re-asks on anything else.
    /// This is the only gate through which a destructive action may
    /// proceed. A failed read aborts with the error, target untouched.
    pub fn confirm(&mut self, question: impl AsRef<str>) -> Result<bool> {
        let question = question.as_ref();

        if let Some(answer) = self.default_answer {
            writeln!(
                self.output,
                "{question} [y/n]: {}",
                if answer { "y" } else { "n" }
            )?;
            debug!("confirmation bypassed with pre-set answer {}", answer);
            return Ok(answer);
        }

        loop {
            write!(self.output, "{question} [y/n]: ")?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self.input.read_line(&mut line).map_err(Error::Input)?;
            if read == 0 {
                return Err(Error::Input(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before an answer was given",
                )));
            }

            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                other => {
                    writeln!(self.output, "'{other}' is not a valid answer, answer y or n")?;
                }
            }
        }
    }

    /// Danger-zone confirmation: prints the irreversible-consequence
    /// banner, then asks the same yes/no question.
    pub fn confirm_destructive(
        &mut self,
        warning: impl AsRef<str>,
        question: impl AsRef<str>,
    ) -> Result<bool> {
        writeln!(self.output, "{BANNER}")?;
        self.warn("!!! THIS OPERATION CANNOT BE UNDONE !!!")?;
        self.warn(warning)?;
        writeln!(self.output, "{BANNER}")?;
        self.confirm(question)
    }
}

fn render_object<T: Serialize>(object: &T) -> Result<String> {
    let mut value = serde_json::to_value(object).map_err(|e| Error::Render(e.to_string()))?;

    if let Some(metadata) = value.get_mut("metadata").and_then(|m| m.as_object_mut()) {
        for field in STRIPPED_METADATA_FIELDS {
            metadata.remove(*field);
        }
    }

    serde_yaml::to_string(&value).map_err(|e| Error::Render(e.to_string()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    use super::*;

    /// A cloneable in-memory writer so tests can inspect output after the
    /// terminal has been moved into the code under test.
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Terminal {
        /// A terminal reading from `input` and writing to an inspectable
        /// buffer.
        pub(crate) fn test(input: &str) -> (Terminal, SharedBuffer) {
            let buffer = SharedBuffer::default();
            let terminal = Terminal::new(
                Box::new(Cursor::new(input.to_string())),
                Box::new(buffer.clone()),
            );
            (terminal, buffer)
        }
    }
}
