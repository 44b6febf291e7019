use std::fmt::Display;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    Next,        // >
    Prev,        // <
    Incr,        // +
    Decr,        // -
    Output,      // .
    Input,       // ,
    LoopOpen,    // [
    LoopClose,   // ]
    Ignored(u8), // anything else, treated as a comment
}

impl Token {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'>' => Token::Next,
            b'<' => Token::Prev,
            b'+' => Token::Incr,
            b'-' => Token::Decr,
            b'.' => Token::Output,
            b',' => Token::Input,
            b'[' => Token::LoopOpen,
            b']' => Token::LoopClose,
            other => Token::Ignored(other),
        }
    }

    pub fn is_operator(&self) -> bool {
        !matches!(self, Token::Ignored(_))
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Token::Next => '>',
                Token::Prev => '<',
                Token::Incr => '+',
                Token::Decr => '-',
                Token::Output => '.',
                Token::Input => ',',
                Token::LoopOpen => '[',
                Token::LoopClose => ']',
                Token::Ignored(byte) => char::from(*byte),
            }
        )
    }
}

/// Marks the end of a line. Scanning never moves past it.
pub const END_OF_LINE: u8 = b'\n';

/// One line of source text together with the index of the next unconsumed
/// byte.
#[derive(Debug)]
pub struct LineBuffer<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> LineBuffer<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn seek(&mut self, position: usize) {
        self.position = position.min(self.bytes.len());
    }

    /// Returns the next operator and its index, or `None` once the end of
    /// the line is reached. The end-of-line marker itself is not consumed.
    pub fn next_token(&mut self) -> Option<(usize, Token)> {
        while let Some(&byte) = self.bytes.get(self.position) {
            if byte == END_OF_LINE {
                return None;
            }
            let index = self.position;
            self.position += 1;
            let token = Token::from_byte(byte);
            if token.is_operator() {
                return Some((index, token));
            }
        }
        None
    }
}
