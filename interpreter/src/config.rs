use anyhow::{anyhow, Result};

pub const MIN_TAPE_CAPACITY: usize = 30000;
pub const DEFAULT_MAX_LINE_LENGTH: usize = 4096;
pub const DEFAULT_LOOP_CAPACITY: usize = 8;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Config {
    /// Number of cells on the tape.
    pub tape_capacity: usize,
    /// Longest line, in bytes, the session will execute.
    pub max_line_length: usize,
    /// How many loops may be open at the same time.
    pub loop_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tape_capacity: MIN_TAPE_CAPACITY,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            loop_capacity: DEFAULT_LOOP_CAPACITY,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.tape_capacity < MIN_TAPE_CAPACITY {
            return Err(anyhow!(
                "The tape needs at least {} cells, got {}.",
                MIN_TAPE_CAPACITY,
                self.tape_capacity
            ));
        }
        if self.max_line_length == 0 {
            return Err(anyhow!("The maximum line length must be positive."));
        }
        if self.loop_capacity == 0 {
            return Err(anyhow!("The loop stack must hold at least one loop."));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() -> Result<()> {
        let config = Config::default();
        config.validate()?;
        assert_eq!(config.tape_capacity, 30000);
        assert_eq!(config.loop_capacity, 8);
        Ok(())
    }

    #[test]
    fn test_rejects_small_tape() {
        let config = Config {
            tape_capacity: 100,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_limits() {
        let no_loops = Config {
            loop_capacity: 0,
            ..Default::default()
        };
        assert!(no_loops.validate().is_err());
        let no_line = Config {
            max_line_length: 0,
            ..Default::default()
        };
        assert!(no_line.validate().is_err());
    }
}
