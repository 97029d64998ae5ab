// Tree dump format
pub mod trace {
    // Spaces added per nesting level
    pub const INDENT_WIDTH: usize = 4;

    // Rendered in place of an absent optional field
    pub const EMPTY_MARKER: &str = "null";

    pub const STATEMENT_TYPE_PREFIX: &str = "statementType: ";

    pub fn indent(depth: usize) -> String {
        " ".repeat(depth * INDENT_WIDTH)
    }

    pub fn or_empty(value: Option<&str>) -> &str {
        value.unwrap_or(EMPTY_MARKER)
    }
}

// Parser constants
pub mod parser {
    use crate::frontend::token::Token;
    use lazy_static::lazy_static;
    use std::collections::HashMap;

    lazy_static! {
        // Keys are lowercase; the lexer folds identifiers before lookup.
        pub static ref KEYWORDS: HashMap<&'static str, Token> = [
            ("select", Token::Select),
            ("update", Token::Update),
            ("delete", Token::Delete),
            ("from", Token::From),
            ("where", Token::Where),
            ("set", Token::Set),
            ("as", Token::As),
            ("with", Token::With),
            ("current", Token::Current),
            ("of", Token::Of),
            ("null", Token::Null),
        ]
        .into_iter()
        .collect();
    }

    pub fn keyword(word: &str) -> Option<Token> {
        KEYWORDS.get(word.to_ascii_lowercase().as_str()).cloned()
    }
}

// Source files accepted by the command-line tool
pub mod input {
    pub const SOURCE_EXTENSION: &str = "sql";
}
