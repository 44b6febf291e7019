use crate::error::Error;

/// Byte offsets, into the current line, of a `[` and its matching `]`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct LoopFrame {
    pub start: usize,
    pub end: usize,
}

/// The loops that are currently open, innermost last. Never grows past its
/// capacity.
#[derive(Debug)]
pub struct LoopStack {
    frames: Vec<LoopFrame>,
    capacity: usize,
}

impl LoopStack {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn top(&self) -> Option<&LoopFrame> {
        self.frames.last()
    }

    /// The innermost frame, if it was opened by the `[` at `start`. A hit
    /// means the body is being repeated and nothing must be pushed.
    pub fn current(&self, start: usize) -> Option<&LoopFrame> {
        self.top().filter(|frame| frame.start == start)
    }

    pub fn enter(&mut self, frame: LoopFrame) -> Result<(), Error> {
        if self.frames.len() >= self.capacity {
            return Err(Error::LoopStackOverflow {
                index: frame.start,
                capacity: self.capacity,
            });
        }
        log::trace!("entering loop {}..={}", frame.start, frame.end);
        self.frames.push(frame);
        Ok(())
    }

    /// Position to resume scanning from when the `]` at `index` repeats its
    /// body.
    pub fn jump_back(&self, index: usize) -> Result<usize, Error> {
        self.top()
            .map(|frame| frame.start)
            .ok_or(Error::UnmatchedLoopClose { index })
    }

    pub fn exit(&mut self, index: usize) -> Result<LoopFrame, Error> {
        let frame = self
            .frames
            .pop()
            .ok_or(Error::UnmatchedLoopClose { index })?;
        log::trace!("leaving loop {}..={}", frame.start, frame.end);
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_enter_and_exit() -> Result<()> {
        let mut stack = LoopStack::with_capacity(2);
        stack.enter(LoopFrame { start: 1, end: 9 })?;
        stack.enter(LoopFrame { start: 3, end: 5 })?;
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.jump_back(5)?, 3);
        assert_eq!(stack.exit(5)?, LoopFrame { start: 3, end: 5 });
        assert_eq!(stack.jump_back(9)?, 1);
        stack.exit(9)?;
        assert!(stack.is_empty());
        Ok(())
    }

    #[test]
    fn test_current_only_matches_innermost() -> Result<()> {
        let mut stack = LoopStack::with_capacity(8);
        stack.enter(LoopFrame { start: 0, end: 10 })?;
        stack.enter(LoopFrame { start: 2, end: 4 })?;
        assert!(stack.current(2).is_some());
        assert!(stack.current(0).is_none());
        Ok(())
    }

    #[test]
    fn test_overflow_reports_capacity() -> Result<()> {
        let mut stack = LoopStack::with_capacity(8);
        for start in 0..8 {
            stack.enter(LoopFrame {
                start,
                end: 20 - start,
            })?;
        }
        match stack.enter(LoopFrame { start: 8, end: 12 }) {
            Err(Error::LoopStackOverflow { index, capacity }) => {
                assert_eq!(index, 8);
                assert_eq!(capacity, 8);
            }
            other => panic!("expected an overflow, got {other:?}"),
        }
        assert_eq!(stack.depth(), 8);
        Ok(())
    }

    #[test]
    fn test_empty_stack_is_an_unmatched_close() {
        let mut stack = LoopStack::with_capacity(8);
        assert!(matches!(
            stack.jump_back(4),
            Err(Error::UnmatchedLoopClose { index: 4 })
        ));
        assert!(matches!(
            stack.exit(7),
            Err(Error::UnmatchedLoopClose { index: 7 })
        ));
    }
}
