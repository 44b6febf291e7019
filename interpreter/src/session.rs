use crate::config::Config;
use crate::engine::Engine;
use crate::error::{Error, Reporter, Warning};
use crate::state::MachineState;
use anyhow::Result;
use std::io::{self, BufRead, Read, Write};

/// Supplies the lines of a session. `Ok(None)` ends the session.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<Vec<u8>>>;
}

/// Reads lines from any buffered reader, ignoring the prompt.
#[derive(Debug)]
pub struct BufReadLines<R: BufRead>(pub R);

impl<R: BufRead> LineSource for BufReadLines<R> {
    fn read_line(&mut self, _prompt: &str) -> io::Result<Option<Vec<u8>>> {
        let mut line = vec![];
        if self.0.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with(b"\n") {
            line.pop();
            if line.ends_with(b"\r") {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

/// Owns the machine state and feeds it one line at a time until the lines
/// run out or a fatal error occurs.
#[derive(Debug)]
pub struct Session<Lines: LineSource, Input: Read, Output: Write, Report: Reporter> {
    lines: Lines,
    engine: Engine<Input, Output, Report>,
    state: MachineState,
    max_line_length: usize,
}

impl<Lines, Input, Output, Report> Session<Lines, Input, Output, Report>
where
    Lines: LineSource,
    Input: Read,
    Output: Write,
    Report: Reporter,
{
    pub fn new(config: &Config, lines: Lines, engine: Engine<Input, Output, Report>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            lines,
            engine,
            state: MachineState::new(config),
            max_line_length: config.max_line_length,
        })
    }

    pub fn prompt(&self) -> String {
        format!(
            "<C:[{}] V:[{}] BFI> ",
            self.state.cursor(),
            self.state.cell()
        )
    }

    /// Reads and executes a single line. Returns `false` once there are no
    /// more lines, or once a `,` has run out of input.
    pub fn step(&mut self) -> Result<bool, Error> {
        if self.engine.input_exhausted() {
            log::info!("input exhausted, ending the session");
            return Ok(false);
        }
        let prompt = self.prompt();
        let line = match self.lines.read_line(&prompt)? {
            Some(line) => line,
            None => return Ok(false),
        };
        if line.len() > self.max_line_length {
            self.engine.get_reporter_mut().warning(Warning::LineTooLong {
                length: line.len(),
                max: self.max_line_length,
            });
            return Ok(true);
        }
        self.engine.execute_line(&mut self.state, &line)?;
        Ok(true)
    }

    pub fn run(&mut self) -> Result<(), Error> {
        self.run_with(|_| ())
    }

    /// Like [`Session::run`], calling `after_line` with the state after every
    /// line.
    pub fn run_with<F: FnMut(&MachineState)>(&mut self, mut after_line: F) -> Result<(), Error> {
        log::info!("session started");
        while self.step()? {
            after_line(&self.state);
        }
        log::info!("end of input, session finished");
        Ok(())
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn engine(&self) -> &Engine<Input, Output, Report> {
        &self.engine
    }
}
