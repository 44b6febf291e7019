use crate::brackets::find_matching_close;
use crate::error::{Error, Reporter, Warning};
use crate::loop_stack::LoopFrame;
use crate::state::MachineState;
use crate::token::{LineBuffer, Token, END_OF_LINE};
use std::io::{ErrorKind, Read, Write};

/// Executes lines of source against a [`MachineState`], reading `,` bytes
/// from `input`, writing `.` bytes to `output` and handing every warning to
/// the reporter.
#[derive(Debug)]
pub struct Engine<Input: Read, Output: Write, Report: Reporter> {
    input: Input,
    output: Output,
    reporter: Report,
    exhausted: bool,
}

impl<Input: Read, Output: Write, Report: Reporter> Engine<Input, Output, Report> {
    pub fn new(input: Input, output: Output, reporter: Report) -> Self {
        Self {
            input,
            output,
            reporter,
            exhausted: false,
        }
    }

    /// Runs one line to completion. Any error is fatal for the session.
    pub fn execute_line(&mut self, state: &mut MachineState, line: &[u8]) -> Result<(), Error> {
        log::debug!("executing line {:?}", String::from_utf8_lossy(line));
        let mut buffer = LineBuffer::new(line);
        while let Some((index, token)) = buffer.next_token() {
            match token {
                Token::Next => self.report(state.move_right(index)),
                Token::Prev => self.report(state.move_left(index)),
                Token::Incr => self.report(state.increment(index)),
                Token::Decr => self.report(state.decrement(index)),
                Token::Output => {
                    self.output.write_all(&[state.cell()])?;
                    self.output.flush()?;
                }
                Token::Input => self.read_input(state, index)?,
                Token::LoopOpen => {
                    // Reached again through `]`, which only jumps back on a
                    // non-zero cell.
                    if state.loops().current(index).is_some() {
                        continue;
                    }
                    let end = find_matching_close(buffer.bytes(), index + 1)
                        .ok_or(Error::UnmatchedLoopOpen { index })?;
                    if state.cell() == 0 {
                        buffer.seek(end + 1);
                    } else {
                        state.loops_mut().enter(LoopFrame { start: index, end })?;
                    }
                }
                Token::LoopClose => {
                    if state.cell() != 0 {
                        let start = state.loops().jump_back(index)?;
                        buffer.seek(start);
                    } else {
                        state.loops_mut().exit(index)?;
                    }
                }
                Token::Ignored(_) => (),
            }
        }
        // Every pushed frame has its `]` on this line, and the scan only gets
        // past that `]` by popping the frame.
        debug_assert!(state.loops().is_empty());
        self.output.flush()?;
        Ok(())
    }

    /// Whether a `,` has hit the end of the input. Once set, it stays set.
    pub fn input_exhausted(&self) -> bool {
        self.exhausted
    }

    fn report(&mut self, result: Result<(), Warning>) {
        if let Err(warning) = result {
            log::debug!("warning: {warning}");
            self.reporter.warning(warning);
        }
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Error> {
        let mut buf: [u8; 1] = [0; 1];
        loop {
            match self.input.read(&mut buf[..]) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(None);
                }
                Ok(_) => return Ok(Some(buf[0])),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Stores the first byte of the next input line in the current cell and
    /// discards the rest of that line. Exhausted input stores zero and is
    /// never read again.
    fn read_input(&mut self, state: &mut MachineState, index: usize) -> Result<(), Error> {
        if self.exhausted {
            state.set_cell(0);
            return Ok(());
        }
        self.output.flush()?;
        self.reporter.input_requested(state.cursor());
        match self.read_byte()? {
            None => {
                log::debug!("input exhausted, cell {} set to 0", state.cursor());
                state.set_cell(0);
            }
            Some(byte) => {
                let stored = state.store_input(index, byte);
                self.report(stored);
                if byte != END_OF_LINE {
                    while let Some(byte) = self.read_byte()? {
                        if byte == END_OF_LINE {
                            break;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn get_output(&self) -> &Output {
        &self.output
    }

    pub fn get_reporter(&self) -> &Report {
        &self.reporter
    }

    pub fn get_reporter_mut(&mut self) -> &mut Report {
        &mut self.reporter
    }
}
