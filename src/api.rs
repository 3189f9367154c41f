use crate::error::{ErrorInfo, JsonError, ParseDiagnostic, SourceError};
use crate::parser::{ParseResult, Parser};
use crate::settings::ParserSettings;
use crate::source::MappedSource;
use crate::value::Value;
use std::path::Path;

/// Parses `input` with the default settings.
pub fn parse(input: &[u8]) -> ParseResult {
    parse_with_settings(input, &ParserSettings::default())
}

/// Parses UTF-8 text with the default settings.
pub fn parse_str(text: &str) -> ParseResult {
    parse(text.as_bytes())
}

/// Parses `input` under `settings`. Never fails; check
/// [`ParseResult::is_error`] before trusting the value.
pub fn parse_with_settings(input: &[u8], settings: &ParserSettings) -> ParseResult {
    Parser::new(input, settings).parse()
}

/// Maps the file at `path` and parses it.
///
/// # Errors
/// Returns a `SourceError` only if the file cannot be opened or mapped; parse
/// problems are reported inside the `ParseResult`.
pub fn parse_file(
    path: impl AsRef<Path>,
    settings: &ParserSettings,
) -> Result<ParseResult, SourceError> {
    let source = MappedSource::open(path)?;
    Ok(parse_with_settings(source.as_bytes(), settings))
}

/// Parses a document and turns a latched error into a renderable diagnostic.
///
/// This is the entry point for tools that want to show errors to people: the
/// returned `JsonError` can be wrapped in a `miette::Report` to print the
/// offending line with a label.
///
/// # Arguments
///
/// * `source` - The document text.
/// * `file_name` - The name shown in rendered diagnostics.
/// * `settings` - Limits to enforce.
///
/// # Errors
///
/// Returns `JsonError::Parse` if the document does not parse.
pub fn analyze(
    source: &str,
    file_name: &str,
    settings: &ParserSettings,
) -> Result<Value, JsonError> {
    parse_with_settings(source.as_bytes(), settings)
        .into_result()
        .map_err(|info| ParseDiagnostic::new(info, file_name, source).into())
}

/// Like [`analyze`], reading the document from a file.
///
/// # Errors
///
/// Returns `JsonError::Source` if the file cannot be read and
/// `JsonError::Parse` if it does not parse.
pub fn analyze_file(path: impl AsRef<Path>, settings: &ParserSettings) -> Result<Value, JsonError> {
    let source = MappedSource::open(path)?;
    let bytes = source.as_bytes();
    parse_with_settings(bytes, settings)
        .into_result()
        .map_err(|info| {
            let name = source.path().display().to_string();
            let diagnostic = match std::str::from_utf8(bytes) {
                Ok(text) => ParseDiagnostic::new(info, &name, text),
                Err(_) => {
                    // Invalid bytes widen to U+FFFD, so the raw offset is moved
                    // to where the same prefix ends in the lossy text.
                    let text = String::from_utf8_lossy(bytes);
                    let prefix = &bytes[..info.offset().min(bytes.len())];
                    let offset = String::from_utf8_lossy(prefix).len();
                    let info = ErrorInfo::new(info.error_code(), info.line_number(), offset);
                    ParseDiagnostic::new(info, &name, &text)
                }
            };
            diagnostic.into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_str() {
        let result = parse_str(r#"{"a": [1, 2.5, "x"]}"#);
        assert!(!result.is_error());
        assert_eq!(result.value["a"][1], Value::Fraction(2.5));
    }

    #[test]
    fn test_analyze_ok() {
        let value = analyze("[true]", "test.json", &ParserSettings::default()).unwrap();
        assert_eq!(value, Value::Array(vec![Value::Boolean(true)]));
    }

    #[test]
    fn test_analyze_file_with_invalid_utf8_comment() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"//\xFF\xFF\xFF\n-").unwrap();
        file.flush().unwrap();

        let err = analyze_file(file.path(), &ParserSettings::default()).unwrap_err();
        match err {
            JsonError::Parse(diagnostic) => {
                assert_eq!(diagnostic.kind, ErrorCode::MissingDigitsAfterMinus);
                assert_eq!(diagnostic.line, 2);
                assert_eq!(diagnostic.column, 2);
                // Three replacement characters of three bytes each, the
                // slashes, the newline and the minus sign.
                assert_eq!(diagnostic.offset, 13);
            }
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_analyze_error_becomes_diagnostic() {
        let source = "[\n  1,\n  2 3\n]";
        let err = analyze(source, "test.json", &ParserSettings::default()).unwrap_err();
        match err {
            JsonError::Parse(diagnostic) => {
                assert_eq!(diagnostic.kind, ErrorCode::MissingCommaOrSquareBracket);
                assert_eq!(diagnostic.line, 3);
                assert_eq!(diagnostic.column, 5);
            }
            other => panic!("Expected parse error, got {other:?}"),
        }
    }
}
