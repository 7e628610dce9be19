//! Basic low-level byte parser functionality shared by the format parsers.

pub mod byte_parser;
pub mod byte_source;
pub mod in_memory_byte_source;
pub mod parsing_error;
pub mod utils;

pub use byte_parser::ByteParser;
pub use parsing_error::{ParsingError, ParsingErrorType};
