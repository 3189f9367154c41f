//! A recursive-descent JSON parser that reports problems instead of failing.
//!
//! Parsing is total: [`parse`] always returns a [`ParseResult`] holding an
//! [`ErrorInfo`] (code, line, byte offset) and the [`Value`] that was built.
//! Resource limits (string, array and object sizes, nesting depth, numeric
//! range) and comment support are configured through [`ParserSettings`].
//!
//! ```
//! use simple_json_core::{parse_str, ErrorCode, Value};
//!
//! let result = parse_str(r#"{"a": 1, "a": 2}"#);
//! assert!(!result.is_error());
//! assert_eq!(result.value["a"], Value::Integer(2));
//!
//! let result = parse_str("[1, 2,]");
//! assert_eq!(result.error_info.error_code(), ErrorCode::NoCorrespondingValue);
//! ```

pub mod api;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod settings;
pub mod source;
pub mod utils;
pub mod value;

pub use api::{analyze, analyze_file, parse, parse_file, parse_str, parse_with_settings};
pub use error::{ErrorCode, ErrorInfo, JsonError, ValueError};
pub use parser::{ParseResult, Parser};
pub use settings::ParserSettings;
pub use source::MappedSource;
pub use value::{Value, ValueType};
