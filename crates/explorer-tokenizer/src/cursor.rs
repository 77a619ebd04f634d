use std::str::Chars;

use text_size::{TextLen, TextSize};

pub(crate) const EOF_CHAR: char = '\0';

pub(crate) struct Cursor<'a> {
    chars: Chars<'a>,
    len: TextSize,
    previous: char,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { chars: text.chars(), len: text.text_len(), previous: EOF_CHAR }
    }

    /// Remaining length of the input.
    pub(crate) fn len(&self) -> TextSize {
        TextSize::new(self.chars.as_str().len() as u32)
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    pub(crate) fn previous(&self) -> char {
        self.previous
    }

    pub(crate) fn pos_within_token(&self) -> TextSize {
        self.len - self.len()
    }

    pub(crate) fn reset_pos_within_token(&mut self) {
        self.len = self.len();
    }

    pub(crate) fn peek(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn second(&self) -> char {
        self.nth(1)
    }

    pub(crate) fn nth(&self, n: usize) -> char {
        self.chars.clone().nth(n).unwrap_or(EOF_CHAR)
    }

    pub(crate) fn matches(&self, c: char) -> bool {
        self.peek() == c
    }

    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.chars.as_str().starts_with(prefix)
    }

    pub(crate) fn advance(&mut self) -> char {
        self.previous = self.chars.next().unwrap_or(EOF_CHAR);
        self.previous
    }

    pub(crate) fn advance_while(&mut self, f: impl Fn(char) -> bool + Copy) {
        while !self.is_eof() && f(self.peek()) {
            self.advance();
        }
    }
}
