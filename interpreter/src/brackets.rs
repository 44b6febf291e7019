use crate::token::{Token, END_OF_LINE};

/// Finds the `]` closing the `[` that sits just before `after_open`.
///
/// Only the rest of the current line is searched, so a loop can never be
/// closed on a later line.
pub fn find_matching_close(line: &[u8], after_open: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, &byte) in line.iter().enumerate().skip(after_open) {
        if byte == END_OF_LINE {
            return None;
        }
        match Token::from_byte(byte) {
            Token::LoopOpen => depth += 1,
            Token::LoopClose => {
                depth -= 1;
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => (),
        }
    }
    None
}
