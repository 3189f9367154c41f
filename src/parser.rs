use crate::error::{ErrorCode, ErrorInfo};
use crate::lexer::{Literal, Scanner};
use crate::settings::ParserSettings;
use crate::value::Value;
use log::{debug, trace};
use std::collections::BTreeMap;

/// What a parse produced: the latched error (or `NoError`) and the value.
///
/// When `error_info.is_error()` the value is whatever was assembled before the
/// failure: `Uninitialized`, or a container holding the siblings that were
/// complete when a later child failed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseResult {
    pub error_info: ErrorInfo,
    pub value: Value,
}

impl ParseResult {
    pub fn is_error(&self) -> bool {
        self.error_info.is_error()
    }

    /// Keeps the value only if the parse succeeded.
    pub fn into_result(self) -> Result<Value, ErrorInfo> {
        if self.is_error() {
            Err(self.error_info)
        } else {
            Ok(self.value)
        }
    }
}

/// A recursive descent parser over a byte slice.
///
/// A `Parser` carries the state of exactly one parse and is consumed by
/// [`Parser::parse`]. The first error is latched; every production checks the
/// latch after each nested call and unwinds without consuming more input.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    settings: &'a ParserSettings,
    error: ErrorInfo,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8], settings: &'a ParserSettings) -> Self {
        Self {
            scanner: Scanner::new(input),
            settings,
            error: ErrorInfo::default(),
        }
    }

    /// Runs the parse. Never fails: problems are reported in the result.
    pub fn parse(mut self) -> ParseResult {
        debug!("parsing document of {} bytes", self.scanner.remaining());
        let value = self.parse_document();
        if self.error.is_error() {
            debug!("parse failed: {}", self.error);
        } else {
            debug!("parsed {} value", value.value_type());
        }
        ParseResult {
            error_info: self.error,
            value,
        }
    }

    // === Main Parsing Methods ===

    /// Document ::= ws* [ Value ] ws*
    ///
    /// Empty input is not an error and yields `Uninitialized`.
    fn parse_document(&mut self) -> Value {
        if !self.skip_trivia() || self.scanner.is_at_end() {
            return Value::Uninitialized;
        }
        let value = self.parse_value(0);
        if !self.failed() && !self.scanner.is_at_end() {
            self.latch(ErrorCode::UnexpectedTrailingCharacters);
        }
        value
    }

    /// Value ::= ws* ( Object | Array | String | Number | Literal ) ws*
    ///
    /// `depth` is the number of arrays and objects enclosing this value.
    fn parse_value(&mut self, depth: usize) -> Value {
        if !self.skip_trivia() {
            return Value::Uninitialized;
        }
        let value = match self.scanner.peek() {
            Some(b'{') => self.parse_object(depth),
            Some(b'[') => self.parse_array(depth),
            Some(b'"') => self.parse_string(),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => self.parse_literal(),
            None => self.fail(ErrorCode::NoCorrespondingValue),
        };
        if !self.failed() {
            self.skip_trivia();
        }
        value
    }

    /// Object ::= "{" ws* ( "}" | Member { "," ws* Member } "}" )
    /// Member ::= String ws* ":" Value
    fn parse_object(&mut self, depth: usize) -> Value {
        let depth = depth + 1;
        if depth > self.settings.max_depth {
            return self.fail(ErrorCode::ObjectDepthLimitExceed);
        }
        self.scanner.advance(); // Consume the '{'

        let mut members = BTreeMap::new();
        if !self.skip_trivia() || self.scanner.eat(b'}') {
            return Value::Object(members);
        }

        loop {
            if !self.skip_trivia() {
                break;
            }
            let (line, offset) = self.mark();
            let Some(key) = self.parse_key() else {
                break;
            };

            if !self.skip_trivia() {
                break;
            }
            if !self.scanner.eat(b':') {
                self.latch(ErrorCode::MissingColon);
                break;
            }

            let value = self.parse_value(depth);
            if self.failed() {
                break;
            }
            // Checked once the member is well formed, so a malformed member is
            // reported as malformed.
            if !members.contains_key(&key) && members.len() >= self.settings.max_num_members {
                self.latch_at(ErrorCode::ObjectHasTooManyMembers, line, offset);
                break;
            }
            members.insert(key, value);

            if self.scanner.eat(b',') {
                continue;
            }
            if !self.scanner.eat(b'}') {
                self.latch(ErrorCode::MissingCommaOrCurlyBracket);
            }
            break;
        }
        Value::Object(members)
    }

    /// Array ::= "[" ws* ( "]" | Value { "," Value } "]" )
    fn parse_array(&mut self, depth: usize) -> Value {
        let depth = depth + 1;
        if depth > self.settings.max_depth {
            return self.fail(ErrorCode::ObjectDepthLimitExceed);
        }
        self.scanner.advance(); // Consume the '['

        let mut items = Vec::new();
        if !self.skip_trivia() || self.scanner.eat(b']') {
            return Value::Array(items);
        }

        loop {
            if !self.skip_trivia() {
                break;
            }
            let (line, offset) = self.mark();
            let item = self.parse_value(depth);
            if self.failed() {
                break;
            }
            if items.len() >= self.settings.max_array_length {
                self.latch_at(ErrorCode::ArrayIsTooLong, line, offset);
                break;
            }
            items.push(item);

            if self.scanner.eat(b',') {
                continue;
            }
            if !self.scanner.eat(b']') {
                self.latch(ErrorCode::MissingCommaOrSquareBracket);
            }
            break;
        }
        Value::Array(items)
    }

    /// String ::= '"' { Char | Escape } '"'
    fn parse_string(&mut self) -> Value {
        match self.scanner.scan_string(self.settings.max_string_length) {
            Ok(text) => Value::String(text),
            Err(code) => self.fail(code),
        }
    }

    /// Member names must be strings.
    fn parse_key(&mut self) -> Option<String> {
        if self.scanner.peek() != Some(b'"') {
            self.latch(ErrorCode::MissingDoubleQuote);
            return None;
        }
        match self.scanner.scan_string(self.settings.max_string_length) {
            Ok(key) => Some(key),
            Err(code) => {
                self.latch(code);
                None
            }
        }
    }

    /// Number ::= [ "-" ] Int [ Frac ] [ Exp ]
    ///
    /// A literal with no fraction or exponent that fits in an `i64` is an
    /// `Integer`; everything else is a `Fraction`. Range errors point at the
    /// start of the literal.
    fn parse_number(&mut self) -> Value {
        let (line, offset) = self.mark();
        let literal = match self.scanner.scan_number() {
            Ok(literal) => literal,
            Err(code) => return self.fail(code),
        };

        if literal.integral {
            if let Ok(n) = literal.text.parse::<i64>() {
                return if n > self.settings.max_integer {
                    self.fail_at(ErrorCode::IntegerIsTooLarge, line, offset)
                } else if n < self.settings.min_integer {
                    self.fail_at(ErrorCode::IntegerIsTooSmall, line, offset)
                } else {
                    Value::Integer(n)
                };
            }
        }

        match literal.text.parse::<f64>() {
            Ok(x) if x > self.settings.max_fraction => {
                self.fail_at(ErrorCode::FractionIsTooLarge, line, offset)
            }
            Ok(x) if x < self.settings.min_fraction => {
                self.fail_at(ErrorCode::FractionIsTooSmall, line, offset)
            }
            Ok(x) => Value::Fraction(x),
            Err(_) => self.fail_at(ErrorCode::NoCorrespondingValue, line, offset),
        }
    }

    /// Literal ::= "true" | "false" | "null"
    fn parse_literal(&mut self) -> Value {
        match self.scanner.scan_literal() {
            Some(Literal::True) => Value::Boolean(true),
            Some(Literal::False) => Value::Boolean(false),
            Some(Literal::Null) => Value::Null,
            None => self.fail(ErrorCode::NoCorrespondingValue),
        }
    }

    // === Error Latch Helpers ===

    fn failed(&self) -> bool {
        self.error.is_error()
    }

    fn mark(&self) -> (usize, usize) {
        (self.scanner.line(), self.scanner.position())
    }

    /// Returns false if trivia could not be skipped and an error was latched.
    fn skip_trivia(&mut self) -> bool {
        match self.scanner.skip_trivia(self.settings.allow_comments) {
            Ok(()) => true,
            Err(code) => {
                self.latch(code);
                false
            }
        }
    }

    fn latch(&mut self, code: ErrorCode) {
        let (line, offset) = self.mark();
        self.latch_at(code, line, offset);
    }

    /// Records `code` unless an earlier error is already latched.
    fn latch_at(&mut self, code: ErrorCode, line: usize, offset: usize) {
        if self.error.is_error() {
            return;
        }
        trace!("latched {code:?} at line {line}, offset {offset}");
        self.error = ErrorInfo::new(code, line, offset);
    }

    fn fail(&mut self, code: ErrorCode) -> Value {
        self.latch(code);
        Value::Uninitialized
    }

    fn fail_at(&mut self, code: ErrorCode, line: usize, offset: usize) -> Value {
        self.latch_at(code, line, offset);
        Value::Uninitialized
    }
}
