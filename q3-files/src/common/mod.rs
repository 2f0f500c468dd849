pub mod lexer;
pub mod reader;
