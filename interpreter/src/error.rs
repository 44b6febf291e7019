use std::fmt::Display;
use std::io;

/// A recoverable condition. The offending operation is skipped and execution
/// carries on.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Warning {
    CellOverflow { index: usize, cursor: usize },
    CellUnderflow { index: usize, cursor: usize },
    CursorPastEnd { index: usize, cursor: usize },
    CursorBeforeStart { index: usize, cursor: usize },
    InputOutOfRange { index: usize, cursor: usize, byte: u8 },
    LineTooLong { length: usize, max: usize },
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::CellOverflow { index, cursor } => write!(
                f,
                "cell {cursor} is already at the ASCII maximum, '+' at index {index} ignored"
            ),
            Warning::CellUnderflow { index, cursor } => write!(
                f,
                "cell {cursor} is already zero, '-' at index {index} ignored"
            ),
            Warning::CursorPastEnd { index, cursor } => write!(
                f,
                "cursor is on the last cell ({cursor}), '>' at index {index} ignored"
            ),
            Warning::CursorBeforeStart { index, cursor } => write!(
                f,
                "cursor is on the first cell ({cursor}), '<' at index {index} ignored"
            ),
            Warning::InputOutOfRange {
                index,
                cursor,
                byte,
            } => write!(
                f,
                "input byte {byte} is outside the ASCII range, ',' at index {index} stored 127 in cell {cursor}"
            ),
            Warning::LineTooLong { length, max } => write!(
                f,
                "line is {length} bytes long, the limit is {max}; line ignored"
            ),
        }
    }
}

impl std::error::Error for Warning {}

/// A fatal condition. Execution of the whole session stops.
#[derive(Debug)]
pub enum Error {
    UnmatchedLoopOpen { index: usize },
    UnmatchedLoopClose { index: usize },
    LoopStackOverflow { index: usize, capacity: usize },
    Io(io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnmatchedLoopOpen { index } => {
                write!(f, "missing ']' for '[' at index {index}")
            }
            Error::UnmatchedLoopClose { index } => {
                write!(f, "missing '[' before ']' at index {index}")
            }
            Error::LoopStackOverflow { index, capacity } => write!(
                f,
                "loop stack overflow at index {index}, limit nested '[...]' to {capacity}"
            ),
            Error::Io(err) => write!(f, "I/O failure: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

/// Receives the diagnostics and prompts produced while executing a line.
pub trait Reporter {
    fn warning(&mut self, warning: Warning);

    /// Called right before a `,` blocks on input.
    fn input_requested(&mut self, _cursor: usize) {}
}

impl Reporter for Vec<Warning> {
    fn warning(&mut self, warning: Warning) {
        self.push(warning);
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn warning(&mut self, warning: Warning) {
        (**self).warning(warning)
    }

    fn input_requested(&mut self, cursor: usize) {
        (**self).input_requested(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_message_mentions_capacity() {
        let err = Error::LoopStackOverflow {
            index: 12,
            capacity: 8,
        };
        let message = err.to_string();
        assert!(message.contains("12"));
        assert!(message.contains('8'));
    }

    #[test]
    fn test_vec_reporter_collects() {
        let mut warnings: Vec<Warning> = vec![];
        warnings.warning(Warning::CursorBeforeStart {
            index: 0,
            cursor: 0,
        });
        (&mut warnings).warning(Warning::CursorBeforeStart {
            index: 3,
            cursor: 0,
        });
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_warning_converts_into_anyhow() {
        let err: anyhow::Error = Warning::CellUnderflow {
            index: 1,
            cursor: 4,
        }
        .into();
        assert!(err.to_string().contains("cell 4"));
    }
}
