//! A line-at-a-time brainfuck interpreter.
//!
//! Each line is tokenized and executed on its own against a [`MachineState`]
//! that lives for the whole session. Cells are capped to the ASCII range and
//! the cursor never leaves the tape: going past either bound produces a
//! [`Warning`] instead of wrapping. Unbalanced loops and loop-stack overflow
//! are fatal [`Error`]s.

pub mod brackets;
pub mod config;
pub mod engine;
pub mod error;
pub mod loop_stack;
pub mod session;
pub mod state;
pub mod token;

pub use config::Config;
pub use engine::Engine;
pub use error::{Error, Reporter, Warning};
pub use loop_stack::{LoopFrame, LoopStack};
pub use session::{BufReadLines, LineSource, Session};
pub use state::MachineState;
pub use token::{LineBuffer, Token};
