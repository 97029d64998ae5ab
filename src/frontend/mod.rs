pub mod lexer;
pub mod parser;
pub mod token;

pub use lexer::Lexer;
pub use parser::Parser;
pub use token::Token;

use crate::ast::Statement;
use crate::utils::errors::SqlResult;
use crate::LineNumber;

/// Scans and parses `source` into one tree per statement.
pub fn parse(source: &str) -> SqlResult<Vec<Statement>> {
    let mut state = LineNumber::default();
    let tokens = lexer::scan(&mut state, source)?;
    Parser::new(&tokens).parse()
}
