/// External code formatter driven over stdin/stdout
///
/// The command line is split on whitespace; every `{width}` in an argument
/// is replaced with the width budget of the fragment being formatted.
use std::io::Write;
use std::process::{Command, Stdio};

use super::{CodeFormatter, FormatOutcome};

const WIDTH_PLACEHOLDER: &str = "{width}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    /// Parse a command line such as `rufo --line-width {width}`.
    ///
    /// Returns `None` for a blank command line.
    #[must_use]
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut words = command_line.split_whitespace().map(str::to_string);
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
        })
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments with `{width}` substituted
    #[must_use]
    pub fn args_for(&self, width: usize) -> Vec<String> {
        let width = width.to_string();
        self.args
            .iter()
            .map(|arg| arg.replace(WIDTH_PLACEHOLDER, &width))
            .collect()
    }

    fn run(&self, code: &str, width: usize) -> std::io::Result<Option<String>> {
        let mut child = Command::new(&self.program)
            .args(self.args_for(width))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(code.as_bytes())?;
        }
        let output = child.wait_with_output()?;
        if !output.status.success() {
            tracing::debug!(program = %self.program, status = %output.status, "code formatter failed");
            return Ok(None);
        }

        let formatted = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        Ok((!formatted.is_empty()).then_some(formatted))
    }
}

impl CodeFormatter for CommandFormatter {
    fn format_code(&self, code: &str, width: usize) -> FormatOutcome {
        match self.run(code, width) {
            Ok(Some(formatted)) => FormatOutcome::Formatted(formatted),
            Ok(None) => FormatOutcome::Unchanged,
            Err(e) => {
                tracing::debug!(program = %self.program, error = %e, "could not run code formatter");
                FormatOutcome::Unchanged
            }
        }
    }
}
