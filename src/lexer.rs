use crate::error::ErrorCode;

/// The keyword literals of the grammar.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Literal {
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
}

const KEYWORDS: [(&[u8], Literal); 3] = [
    (b"true", Literal::True),
    (b"false", Literal::False),
    (b"null", Literal::Null),
];

/// The text of a well-formed number literal.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct NumberLiteral<'a> {
    pub text: &'a str,
    /// False once a `.` or an exponent marker was seen.
    pub integral: bool,
}

/// A byte cursor over the input that keeps the current line number.
///
/// The scanner owns the lexical productions (trivia, strings, numbers and keyword
/// literals). It reports failures as bare [`ErrorCode`]s and leaves the cursor at
/// the byte where the problem was found, so the caller can read the position.
pub struct Scanner<'a> {
    input: &'a [u8],
    position: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            position: 0,
            line: 1,
        }
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    /// 1-based line of the cursor.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.input.len().saturating_sub(self.position)
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.input.get(self.position + ahead).copied()
    }

    fn rest(&self) -> &'a [u8] {
        self.input.get(self.position..).unwrap_or_default()
    }

    pub fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.position += 1;
        if byte == b'\n' {
            self.line += 1;
        }
        Some(byte)
    }

    /// Consumes `expected` if it is the next byte.
    pub fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.position;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.position += 1;
        }
        self.position - start
    }

    // === Trivia ===

    /// Skips whitespace and, when allowed, comments.
    ///
    /// A comment opener met while comments are disallowed stops the cursor on
    /// its `/` and yields `CommentIsDisallowed`.
    pub fn skip_trivia(&mut self, allow_comments: bool) -> Result<(), ErrorCode> {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(b' ' | b'\t' | b'\n' | b'\r'), _) => {
                    self.advance();
                }
                (Some(b'/'), Some(b'/' | b'*')) if !allow_comments => {
                    return Err(ErrorCode::CommentIsDisallowed);
                }
                (Some(b'/'), Some(b'/')) => self.skip_line_comment(),
                (Some(b'/'), Some(b'*')) => self.skip_block_comment(),
                _ => return Ok(()),
            }
        }
    }

    fn skip_line_comment(&mut self) {
        self.position += 2; // Consume the `//`
        while let Some(b) = self.peek() {
            if b == b'\n' {
                break;
            }
            self.position += 1;
        }
    }

    fn skip_block_comment(&mut self) {
        self.position += 2; // Consume the `/*`
        while !self.is_at_end() {
            if self.rest().starts_with(b"*/") {
                self.position += 2;
                return;
            }
            self.advance();
        }
    }

    // === Literals ===

    /// Matches `true`, `false` or `null` exactly.
    pub fn scan_literal(&mut self) -> Option<Literal> {
        let rest = self.rest();
        let (word, literal) = KEYWORDS
            .iter()
            .find(|(word, _)| rest.starts_with(word))?;
        self.position += word.len();
        Some(*literal)
    }

    // === Numbers ===

    /// Scans `'-'? ('0' | [1-9][0-9]*) ('.' [0-9]+)? ([eE][+-]?[0-9]+)?`.
    ///
    /// The cursor must be on a `-` or a digit.
    pub fn scan_number(&mut self) -> Result<NumberLiteral<'a>, ErrorCode> {
        let start = self.position;
        let mut integral = true;

        if self.eat(b'-') && !self.peek().is_some_and(|b| b.is_ascii_digit()) {
            return Err(ErrorCode::MissingDigitsAfterMinus);
        }
        if !self.eat(b'0') {
            self.eat_digits();
        }

        if self.eat(b'.') {
            integral = false;
            if self.eat_digits() == 0 {
                return Err(ErrorCode::MissingDigitsAfterDot);
            }
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.position += 1;
            integral = false;
            if self.eat(b'+') || self.eat(b'-') {
                if self.eat_digits() == 0 {
                    return Err(ErrorCode::MissingDigitsAfterPlusOrMinus);
                }
            } else if self.eat_digits() == 0 {
                return Err(ErrorCode::MissingPlusOrMinusAfterExponent);
            }
        }

        // Only ASCII digits and signs were consumed.
        let text = std::str::from_utf8(&self.input[start..self.position])
            .map_err(|_| ErrorCode::InvalidUtf8)?;
        Ok(NumberLiteral { text, integral })
    }

    // === Strings ===

    /// Scans a double-quoted string and returns its decoded contents.
    ///
    /// The cursor must be on the opening quote. Decoding stops with
    /// `StringIsTooLong` as soon as the contents exceed `max_length` bytes.
    pub fn scan_string(&mut self, max_length: usize) -> Result<String, ErrorCode> {
        self.advance(); // Consume the opening quote
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(ErrorCode::MissingDoubleQuote),
                Some(b'"') => {
                    self.advance();
                    return Ok(value);
                }
                Some(b'\\') => {
                    self.advance();
                    self.scan_escape(&mut value)?;
                }
                Some(b) if b.is_ascii() => {
                    self.advance();
                    value.push(b as char);
                }
                Some(_) => self.scan_multibyte(&mut value)?,
            }
            if value.len() > max_length {
                return Err(ErrorCode::StringIsTooLong);
            }
        }
    }

    fn scan_multibyte(&mut self, value: &mut String) -> Result<(), ErrorCode> {
        let rest = self.rest();
        let width = match rest.first() {
            Some(0xC2..=0xDF) => 2,
            Some(0xE0..=0xEF) => 3,
            Some(0xF0..=0xF4) => 4,
            _ => return Err(ErrorCode::InvalidUtf8),
        };
        let encoded = rest.get(..width).ok_or(ErrorCode::InvalidUtf8)?;
        let decoded = std::str::from_utf8(encoded).map_err(|_| ErrorCode::InvalidUtf8)?;
        value.push_str(decoded);
        self.position += width;
        Ok(())
    }

    fn scan_escape(&mut self, value: &mut String) -> Result<(), ErrorCode> {
        let decoded = match self.peek() {
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\u{08}',
            Some(b'f') => '\u{0C}',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            Some(b'u') => {
                self.advance();
                return self.scan_unicode_escape(value);
            }
            _ => return Err(ErrorCode::MissingControlCharacterAfterBackslash),
        };
        self.advance();
        value.push(decoded);
        Ok(())
    }

    /// Decodes the digits of a `\uXXXX` escape, pairing surrogates when a low
    /// surrogate escape follows a high one. Unpaired surrogates become U+FFFD.
    fn scan_unicode_escape(&mut self, value: &mut String) -> Result<(), ErrorCode> {
        let mut unit = self.scan_hex4()?;
        loop {
            if (0xD800..=0xDBFF).contains(&unit) && self.rest().starts_with(b"\\u") {
                self.position += 2;
                let next = self.scan_hex4()?;
                if (0xDC00..=0xDFFF).contains(&next) {
                    let code_point = 0x10000 + ((unit - 0xD800) << 10) + (next - 0xDC00);
                    value.push(char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER));
                    return Ok(());
                }
                value.push(char::REPLACEMENT_CHARACTER);
                unit = next;
                continue;
            }
            value.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
            return Ok(());
        }
    }

    fn scan_hex4(&mut self) -> Result<u32, ErrorCode> {
        let mut unit = 0;
        for _ in 0..4 {
            let digit = self
                .peek()
                .and_then(|b| char::from(b).to_digit(16))
                .ok_or(ErrorCode::MissingHexDigitsAfterBackslashU)?;
            self.position += 1;
            unit = unit << 4 | digit;
        }
        Ok(unit)
    }
}
