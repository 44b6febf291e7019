use crate::config::Config;
use crate::error::Warning;
use crate::loop_stack::LoopStack;
use colored::*;
use std::fmt::Display;

/// Cells never go past the ASCII range.
pub const MAX_CELL_VALUE: u8 = 127;

const ROW_WIDTH: usize = 16;

/// Everything that survives from one line to the next: the tape, the cursor
/// and the open loops.
#[derive(Debug)]
pub struct MachineState {
    tape: Box<[u8]>,
    cursor: usize,
    loops: LoopStack,
}

impl MachineState {
    pub fn new(config: &Config) -> Self {
        Self {
            tape: vec![0; config.tape_capacity].into_boxed_slice(),
            cursor: 0,
            loops: LoopStack::with_capacity(config.loop_capacity),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cell(&self) -> u8 {
        self.tape[self.cursor]
    }

    pub fn set_cell(&mut self, value: u8) {
        self.tape[self.cursor] = value;
    }

    pub fn tape(&self) -> &[u8] {
        &self.tape
    }

    pub fn loops(&self) -> &LoopStack {
        &self.loops
    }

    pub fn loops_mut(&mut self) -> &mut LoopStack {
        &mut self.loops
    }

    // `index` is the position of the operator in the line, for diagnostics.

    pub fn increment(&mut self, index: usize) -> Result<(), Warning> {
        let cursor = self.cursor;
        let cell = &mut self.tape[cursor];
        if *cell >= MAX_CELL_VALUE {
            return Err(Warning::CellOverflow { index, cursor });
        }
        *cell += 1;
        Ok(())
    }

    pub fn decrement(&mut self, index: usize) -> Result<(), Warning> {
        let cursor = self.cursor;
        let cell = &mut self.tape[cursor];
        if *cell == 0 {
            return Err(Warning::CellUnderflow { index, cursor });
        }
        *cell -= 1;
        Ok(())
    }

    /// Stores a byte read by `,`. Bytes past the ASCII range are clamped to
    /// [`MAX_CELL_VALUE`].
    pub fn store_input(&mut self, index: usize, byte: u8) -> Result<(), Warning> {
        if byte > MAX_CELL_VALUE {
            self.set_cell(MAX_CELL_VALUE);
            return Err(Warning::InputOutOfRange {
                index,
                cursor: self.cursor,
                byte,
            });
        }
        self.set_cell(byte);
        Ok(())
    }

    pub fn move_right(&mut self, index: usize) -> Result<(), Warning> {
        if self.cursor + 1 >= self.tape.len() {
            return Err(Warning::CursorPastEnd {
                index,
                cursor: self.cursor,
            });
        }
        self.cursor += 1;
        Ok(())
    }

    pub fn move_left(&mut self, index: usize) -> Result<(), Warning> {
        if self.cursor == 0 {
            return Err(Warning::CursorBeforeStart {
                index,
                cursor: self.cursor,
            });
        }
        self.cursor -= 1;
        Ok(())
    }
}

/// Hex dump of the rows around the cursor, with the current cell
/// highlighted.
impl Display for MachineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // A single byte to display.
        struct CellByte {
            highlighted: bool,
            byte: u8,
        }

        impl Display for CellByte {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let byte_str = format!("{:02x}", self.byte);
                if self.highlighted {
                    write!(f, "{}", byte_str.green().bold())
                } else {
                    write!(f, "{byte_str}")
                }
            }
        }

        let cursor_row = self.cursor / ROW_WIDTH;
        let first_row = cursor_row.saturating_sub(1);
        let last_row = (cursor_row + 1).min((self.tape.len() - 1) / ROW_WIDTH);

        writeln!(
            f,
            "cursor: {}, value: {}, open loops: {}",
            self.cursor,
            self.cell(),
            self.loops.depth()
        )?;
        for row in first_row..=last_row {
            let row_offset = row * ROW_WIDTH;
            let row_end = (row_offset + ROW_WIDTH).min(self.tape.len());
            write!(f, "{row_offset:08x}")?;
            for (pair_idx, pair) in self.tape[row_offset..row_end].chunks(2).enumerate() {
                write!(f, " ")?;
                for (inner_idx, &byte) in pair.iter().enumerate() {
                    let highlighted = row_offset + pair_idx * 2 + inner_idx == self.cursor;
                    CellByte { highlighted, byte }.fmt(f)?;
                }
            }
            if row != last_row {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn state() -> MachineState {
        MachineState::new(&Config::default())
    }

    #[test]
    fn test_increment_saturates() {
        let mut state = state();
        for _ in 0..127 {
            assert_eq!(state.increment(0), Ok(()));
        }
        assert_eq!(state.cell(), 127);
        assert_eq!(
            state.increment(5),
            Err(Warning::CellOverflow {
                index: 5,
                cursor: 0
            })
        );
        assert_eq!(state.cell(), 127);
    }

    #[test]
    fn test_decrement_saturates() -> Result<()> {
        let mut state = state();
        assert_eq!(
            state.decrement(0),
            Err(Warning::CellUnderflow {
                index: 0,
                cursor: 0
            })
        );
        assert_eq!(state.cell(), 0);
        state.increment(0)?;
        state.decrement(1)?;
        assert_eq!(state.cell(), 0);
        Ok(())
    }

    #[test]
    fn test_input_is_clamped_to_ascii() {
        let mut state = state();
        assert_eq!(state.store_input(0, b'a'), Ok(()));
        assert_eq!(state.cell(), b'a');
        assert_eq!(
            state.store_input(3, 0xc3),
            Err(Warning::InputOutOfRange {
                index: 3,
                cursor: 0,
                byte: 0xc3
            })
        );
        assert_eq!(state.cell(), 127);
    }

    #[test]
    fn test_cursor_stays_on_tape() -> Result<()> {
        let mut state = state();
        assert_eq!(
            state.move_left(2),
            Err(Warning::CursorBeforeStart {
                index: 2,
                cursor: 0
            })
        );
        for _ in 0..29999 {
            state.move_right(0)?;
        }
        assert_eq!(state.cursor(), 29999);
        assert_eq!(
            state.move_right(7),
            Err(Warning::CursorPastEnd {
                index: 7,
                cursor: 29999
            })
        );
        assert_eq!(state.cursor(), 29999);
        state.move_left(0)?;
        assert_eq!(state.cursor(), 29998);
        Ok(())
    }

    #[test]
    fn test_display_window() -> Result<()> {
        colored::control::set_override(false);
        let mut state = state();
        for _ in 0..17 {
            state.move_right(0)?;
        }
        state.set_cell(0x41);
        let rendered = state.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "cursor: 17, value: 65, open loops: 0");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("00000000 0000"));
        assert!(lines[2].starts_with("00000010 0041 0000"));
        assert!(lines[3].starts_with("00000020"));
        Ok(())
    }
}
