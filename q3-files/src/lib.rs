use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("The file's magic value does not match the expectation {magic}")]
    InvalidMagicValue { magic: u32 },

    #[error("Unsupported format version {version}")]
    UnsupportedVersion { version: i32 },

    #[error("The file is violating the expected format, because: {reason}")]
    FormatError { reason: &'static str },

    /// A text format (entities lump, shader script) ended in the middle of a block.
    #[error("Unexpected end of input at line {line}")]
    UnexpectedEnd { line: usize },

    /// A text format contained a token that is not valid at this position.
    #[error("Unexpected token {token:?} at line {line}")]
    UnexpectedToken { token: String, line: usize },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    UTF8ConversationError(#[from] std::string::FromUtf8Error),
}

pub mod bsp;
pub mod common;
pub mod md3;
pub mod shader;
