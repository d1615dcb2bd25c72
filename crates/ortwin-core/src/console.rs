//! Operator console seam.
//!
//! All operator-facing text leaves the engine through this trait, and every
//! blocking question comes back through it. The front end decides what a
//! "console" actually is; [`ScriptedConsole`] is the test double.

use std::collections::VecDeque;
use std::io;

/// Blocking, line-oriented operator channel.
pub trait OperatorConsole {
    /// Show a line to the operator.
    fn say(&mut self, line: &str);

    /// Show a message and block for one line of operator input.
    fn prompt(&mut self, message: &str) -> io::Result<String>;
}

/// Console with canned replies, recording everything said to it.
///
/// Replies are consumed in order; prompting past the script yields an empty
/// line, mirroring an operator who just presses Enter.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    replies: VecDeque<String>,
    /// Every line surfaced via [`OperatorConsole::say`].
    pub transcript: Vec<String>,
    /// Every prompt message shown, in order.
    pub prompts: Vec<String>,
}

impl ScriptedConsole {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Whether any transcript line contains `needle`.
    #[must_use]
    pub fn said(&self, needle: &str) -> bool {
        self.transcript.iter().any(|l| l.contains(needle))
    }
}

impl OperatorConsole for ScriptedConsole {
    fn say(&mut self, line: &str) {
        self.transcript.push(line.to_owned());
    }

    fn prompt(&mut self, message: &str) -> io::Result<String> {
        self.prompts.push(message.to_owned());
        Ok(self.replies.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_replies_in_order() {
        let mut console = ScriptedConsole::with_replies(["yes", "12"]);
        assert_eq!(console.prompt("a? ").unwrap(), "yes");
        assert_eq!(console.prompt("b? ").unwrap(), "12");
        assert_eq!(console.prompt("c? ").unwrap(), "");
        assert_eq!(console.prompts.len(), 3);
    }

    #[test]
    fn test_transcript_recorded() {
        let mut console = ScriptedConsole::new();
        console.say("Performing step: Position Patient...");
        assert!(console.said("Position Patient"));
    }
}
