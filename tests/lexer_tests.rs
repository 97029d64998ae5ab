use sqlnode::errors::{SqlError, SqlResult};
use sqlnode::frontend::lexer::scan;
use sqlnode::frontend::token::Token;
use sqlnode::LineNumber;

#[test]
fn test_positioned_update_tokens() -> SqlResult<()> {
    let source = "UPDATE t SET x = 1 WHERE CURRENT OF cur1";
    let mut state = LineNumber::default();
    let tokens = scan(&mut state, source)?;
    assert_eq!(
        tokens,
        vec![
            (Token::Update, 1),
            (Token::Ident("t".to_string()), 1),
            (Token::Set, 1),
            (Token::Ident("x".to_string()), 1),
            (Token::Equal, 1),
            (Token::Number(1), 1),
            (Token::Where, 1),
            (Token::Current, 1),
            (Token::Of, 1),
            (Token::Ident("cur1".to_string()), 1),
            (Token::Eof, 1),
        ]
    );
    Ok(())
}

#[test]
fn test_mixed_case_keywords() -> SqlResult<()> {
    let source = "dElEtE From orders wHeRe current OF c";
    let mut state = LineNumber::default();
    let tokens = scan(&mut state, source)?;
    let kinds: Vec<Token> = tokens.into_iter().map(|(token, _)| token).collect();
    assert_eq!(
        kinds,
        vec![
            Token::Delete,
            Token::From,
            Token::Ident("orders".to_string()),
            Token::Where,
            Token::Current,
            Token::Of,
            Token::Ident("c".to_string()),
            Token::Eof,
        ]
    );
    Ok(())
}

#[test]
fn test_comments_and_line_numbers() -> SqlResult<()> {
    let source = "-- leading comment\nSELECT a\n  FROM t; -- trailing\n";
    let mut state = LineNumber::default();
    let tokens = scan(&mut state, source)?;
    assert_eq!(
        tokens,
        vec![
            (Token::Select, 2),
            (Token::Ident("a".to_string()), 2),
            (Token::From, 3),
            (Token::Ident("t".to_string()), 3),
            (Token::Semicolon, 3),
            (Token::Eof, 4),
        ]
    );
    Ok(())
}

#[test]
fn test_string_literal_with_escaped_quote() -> SqlResult<()> {
    let mut state = LineNumber::default();
    let tokens = scan(&mut state, "'it''s'")?;
    assert_eq!(tokens[0], (Token::StringLiteral("it's".to_string()), 1));
    Ok(())
}

#[test]
fn test_quoted_identifier_keeps_keyword_text() -> SqlResult<()> {
    let mut state = LineNumber::default();
    let tokens = scan(&mut state, "\"select\"")?;
    assert_eq!(tokens[0], (Token::Ident("select".to_string()), 1));
    Ok(())
}

#[test]
fn test_unterminated_string_literal() {
    let mut state = LineNumber::default();
    let result = scan(&mut state, "SET x = 'open");
    if let Err(SqlError::UnterminatedString { line }) = result {
        assert_eq!(line, 1);
    } else {
        panic!("Expected UnterminatedString, but got: {:?}", result);
    }
}

#[test]
fn test_invalid_chars() {
    let mut state = LineNumber::default();
    let result = scan(&mut state, "SELECT a FROM t\n WHERE a = 1 + 2");
    assert!(matches!(
        result,
        Err(SqlError::UnknownToken { token: '+', line: 2 })
    ));
}
