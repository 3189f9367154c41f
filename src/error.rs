use crate::utils::get_line_and_column;
use crate::value::ValueType;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::fmt::{self, Display};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum JsonError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseDiagnostic),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),
}

/// Every reason a parse can stop early.
///
/// Codes are data, not faults: the parser records one in an [`ErrorInfo`] and
/// returns normally. `NoError` is the success sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorCode {
    #[default]
    NoError,

    // == Limit violations ==
    CommentIsDisallowed,
    IntegerIsTooLarge,
    IntegerIsTooSmall,
    FractionIsTooLarge,
    FractionIsTooSmall,
    StringIsTooLong,
    ArrayIsTooLong,
    ObjectHasTooManyMembers,
    ObjectDepthLimitExceed,

    // == Number format ==
    MissingDigitsAfterMinus,
    MissingDigitsAfterDot,
    MissingPlusOrMinusAfterExponent,
    MissingDigitsAfterPlusOrMinus,

    // == String format ==
    MissingDoubleQuote,
    MissingControlCharacterAfterBackslash,
    MissingHexDigitsAfterBackslashU,
    InvalidUtf8,

    // == Array format ==
    MissingCommaOrSquareBracket,

    // == Object format ==
    MissingColon,
    MissingCommaOrCurlyBracket,

    // == Value format ==
    NoCorrespondingValue,
    UnexpectedTrailingCharacters,
}

impl ErrorCode {
    /// Human-readable description of the failure.
    pub const fn reason(self) -> &'static str {
        match self {
            ErrorCode::NoError => "no error",
            ErrorCode::CommentIsDisallowed => "comments are disallowed by the parser settings",
            ErrorCode::IntegerIsTooLarge => "integer is larger than the configured maximum",
            ErrorCode::IntegerIsTooSmall => "integer is smaller than the configured minimum",
            ErrorCode::FractionIsTooLarge => "fraction is larger than the configured maximum",
            ErrorCode::FractionIsTooSmall => "fraction is smaller than the configured minimum",
            ErrorCode::StringIsTooLong => "string is longer than the configured maximum",
            ErrorCode::ArrayIsTooLong => "array has more elements than the configured maximum",
            ErrorCode::ObjectHasTooManyMembers => {
                "object has more members than the configured maximum"
            }
            ErrorCode::ObjectDepthLimitExceed => "nesting is deeper than the configured maximum",
            ErrorCode::MissingDigitsAfterMinus => "expected a digit after '-'",
            ErrorCode::MissingDigitsAfterDot => "expected a digit after '.'",
            ErrorCode::MissingPlusOrMinusAfterExponent => {
                "expected '+', '-' or a digit after the exponent marker"
            }
            ErrorCode::MissingDigitsAfterPlusOrMinus => "expected a digit after the exponent sign",
            ErrorCode::MissingDoubleQuote => "expected '\"'",
            ErrorCode::MissingControlCharacterAfterBackslash => {
                "expected one of '\"', '\\', '/', 'b', 'f', 'n', 'r', 't', 'u' after '\\'"
            }
            ErrorCode::MissingHexDigitsAfterBackslashU => "expected four hex digits after '\\u'",
            ErrorCode::InvalidUtf8 => "string contains bytes that are not valid UTF-8",
            ErrorCode::MissingCommaOrSquareBracket => "expected ',' or ']'",
            ErrorCode::MissingColon => "expected ':' after the member name",
            ErrorCode::MissingCommaOrCurlyBracket => "expected ',' or '}'",
            ErrorCode::NoCorrespondingValue => "expected a value",
            ErrorCode::UnexpectedTrailingCharacters => "unexpected characters after the value",
        }
    }

    /// A suggestion shown under rendered diagnostics, where one is useful.
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            ErrorCode::CommentIsDisallowed => {
                Some("Remove the comment or enable `allow_comments` in the parser settings.")
            }
            ErrorCode::ObjectDepthLimitExceed => {
                Some("Flatten the document or raise `max_depth` in the parser settings.")
            }
            ErrorCode::MissingPlusOrMinusAfterExponent => {
                Some("Exponents are written like `1e5`, `1e+5` or `1e-5`.")
            }
            ErrorCode::MissingDoubleQuote => {
                Some("Strings and member names must be enclosed in double quotes.")
            }
            ErrorCode::NoCorrespondingValue => Some(
                "A value is an object, array, string, number, `true`, `false` or `null`. Trailing commas are not allowed.",
            ),
            _ => None,
        }
    }

    /// Input was well formed but broke a configured bound or a disabled feature.
    pub const fn is_limit_violation(self) -> bool {
        matches!(
            self,
            ErrorCode::CommentIsDisallowed
                | ErrorCode::IntegerIsTooLarge
                | ErrorCode::IntegerIsTooSmall
                | ErrorCode::FractionIsTooLarge
                | ErrorCode::FractionIsTooSmall
                | ErrorCode::StringIsTooLong
                | ErrorCode::ArrayIsTooLong
                | ErrorCode::ObjectHasTooManyMembers
                | ErrorCode::ObjectDepthLimitExceed
        )
    }

    /// Input does not follow the grammar.
    pub const fn is_grammar_violation(self) -> bool {
        !matches!(self, ErrorCode::NoError) && !self.is_limit_violation()
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// The latched outcome of a parse: what went wrong and where.
///
/// `line` is 1-based; `offset` is the 0-based byte offset at which the
/// problem was detected. A successful parse carries `NoError` at line 0,
/// offset 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorInfo {
    code: ErrorCode,
    line: usize,
    offset: usize,
}

impl ErrorInfo {
    pub fn new(code: ErrorCode, line: usize, offset: usize) -> Self {
        Self { code, line, offset }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.code != ErrorCode::NoError
    }

    #[inline]
    pub fn error_code(&self) -> ErrorCode {
        self.code
    }

    #[inline]
    pub fn line_number(&self) -> usize {
        self.line
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn reason(&self) -> &'static str {
        self.code.reason()
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_error() {
            write!(
                f,
                "{} at line {}, offset {}",
                self.code, self.line, self.offset
            )
        } else {
            f.write_str(self.code.reason())
        }
    }
}

/// A latched parse error bound to the text it came from, for rendering.
#[derive(Error, Debug, Diagnostic, Clone)]
#[error("{message} (line {line}, column {column})")]
#[diagnostic(code(parser::syntax))]
pub struct ParseDiagnostic {
    pub kind: ErrorCode,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
    message: &'static str,
    #[source_code]
    src: NamedSource<String>,
    #[label("{message}")]
    span: SourceSpan,
    #[help]
    help: Option<String>,
}

impl ParseDiagnostic {
    /// `info.offset()` must be a byte offset into `source`. An offset inside a
    /// character is moved back to the start of that character.
    pub fn new(info: ErrorInfo, name: &str, source: &str) -> Self {
        let mut offset = info.offset().min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let (_, column) = get_line_and_column(source, offset);
        // Point at one character, or at nothing when the input ran out.
        let width = source[offset..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);

        Self {
            kind: info.error_code(),
            line: info.line_number(),
            column,
            offset,
            message: info.reason(),
            src: NamedSource::new(name, source.to_string()),
            span: (offset, width).into(),
            help: info.error_code().hint().map(str::to_string),
        }
    }
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("The value type is not {expected} (found {found})")]
    #[diagnostic(
        code(value::type_mismatch),
        help("Check the type with the `is_*` predicates before accessing the payload.")
    )]
    TypeMismatch {
        expected: ValueType,
        found: ValueType,
    },

    #[error("Index {index} is out of bounds for an array of length {len}")]
    #[diagnostic(code(value::index_out_of_bounds))]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Object has no member named {key:?}")]
    #[diagnostic(code(value::missing_member))]
    MissingMember { key: String },
}

#[derive(Error, Debug, Diagnostic)]
pub enum SettingsError {
    #[error("Invalid JSON parser settings")]
    #[diagnostic(code(settings::json))]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML parser settings")]
    #[diagnostic(code(settings::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Inconsistent parser settings: {reason}")]
    #[diagnostic(
        code(settings::bounds),
        help("Every minimum must be less than or equal to its maximum.")
    )]
    InvalidBounds { reason: String },
}

#[derive(Error, Debug, Diagnostic)]
pub enum SourceError {
    #[error("Failed to open {}", .path.display())]
    #[diagnostic(code(source::open))]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to map {} into memory", .path.display())]
    #[diagnostic(code(source::map))]
    Map {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
