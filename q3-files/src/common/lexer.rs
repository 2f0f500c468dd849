//! Tokenizer shared by the text based formats (the BSP entities lump and shader scripts).
//!
//! Tokens are separated by whitespace, `{` and `}` are always tokens on their own, double quotes
//! group a token (no escapes) and both `//` and `/* */` comments are skipped. Every token carries
//! the line it started on, because shader directives are terminated by the end of line.

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub line: usize,
    pub quoted: bool,
}

impl Token<'_> {
    pub fn is_open_brace(&self) -> bool {
        !self.quoted && self.text == "{"
    }

    pub fn is_close_brace(&self) -> bool {
        !self.quoted && self.text == "}"
    }
}

pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0, line: 1 }
    }

    /// Line the lexer currently is on, which after exhaustion is the last line of the input.
    pub fn line(&self) -> usize {
        self.line
    }

    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + offset).copied()
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(c) = self.peek_byte(0) {
            match c {
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                c if c.is_ascii_whitespace() => self.pos += 1,
                b'/' if self.peek_byte(1) == Some(b'/') => {
                    while let Some(c) = self.peek_byte(0) {
                        if c == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                b'/' if self.peek_byte(1) == Some(b'*') => {
                    self.pos += 2;
                    // an unterminated block comment swallows the rest of the input
                    while let Some(c) = self.peek_byte(0) {
                        if c == b'*' && self.peek_byte(1) == Some(b'/') {
                            self.pos += 2;
                            break;
                        }
                        if c == b'\n' {
                            self.line += 1;
                        }
                        self.pos += 1;
                    }
                }
                _ => return,
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace_and_comments();
        let first = self.peek_byte(0)?;
        let line = self.line;

        if first == b'{' || first == b'}' {
            let text = &self.src[self.pos..self.pos + 1];
            self.pos += 1;
            return Some(Token { text, line, quoted: false });
        }

        if first == b'"' {
            self.pos += 1;
            let start = self.pos;
            while let Some(c) = self.peek_byte(0) {
                if c == b'"' || c == b'\n' {
                    break;
                }
                self.pos += 1;
            }
            let text = &self.src[start..self.pos];
            if self.peek_byte(0) == Some(b'"') {
                self.pos += 1;
            }
            return Some(Token { text, line, quoted: true });
        }

        let start = self.pos;
        while let Some(c) = self.peek_byte(0) {
            if c.is_ascii_whitespace() || c == b'{' || c == b'}' || c == b'"' {
                break;
            }
            self.pos += 1;
        }

        Some(Token {
            text: &self.src[start..self.pos],
            line,
            quoted: false,
        })
    }
}
