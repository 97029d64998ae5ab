/*
* statement   = select | update | delete ;
* select      = "SELECT" column { "," column } "FROM" table { "," table } [ "WHERE" predicate ] ;
* update      = "UPDATE" table "SET" assignment { "," assignment } [ where ] ;
* delete      = "DELETE" "FROM" table [ where ] ;
* table       = ident [ [ "AS" ] ident ] [ "WITH" "(" property { "," property } ")" ] ;
* property    = ident "=" ( ident | number | string ) ;
* where       = "WHERE" ( "CURRENT" "OF" ident | predicate ) ;
* predicate   = operand "=" operand ;
* assignment  = ident "=" operand ;
* column      = operand [ [ "AS" ] ident ] ;
* operand     = ident | number | string | "NULL" ;
*/

use crate::ast::{
    BaseTable, DeleteStatement, Expr, Expression, FromTable, Literal, PropertyBag, ResultColumn,
    SelectNode, SelectStatement, Statement, UpdateStatement, WhereClause,
};
use crate::frontend::token::Token;
use crate::utils::errors::{SqlError, SqlResult};
use log::debug;
use std::slice::Iter;

pub struct Parser<'a> {
    current_token: Token,
    line_number: usize,
    iter: Iter<'a, (Token, usize)>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [(Token, usize)]) -> Self {
        let mut parser = Self {
            current_token: Token::Eof,
            line_number: 1,
            iter: tokens.iter(),
        };
        parser.next();
        parser
    }

    fn next(&mut self) {
        if let Some((element, line)) = self.iter.next() {
            self.current_token = element.clone();
            self.line_number = *line;
        } else {
            self.current_token = Token::Eof;
        }
    }

    fn expect(&mut self, expected: Token) -> SqlResult<()> {
        if std::mem::discriminant(&expected) != std::mem::discriminant(&self.current_token) {
            return Err(SqlError::syntax_error(
                expected.to_string(),
                self.current_token.to_string(),
                self.line_number,
            ));
        }
        self.next();
        Ok(())
    }

    fn accept(&mut self, token: Token) -> bool {
        if self.current_token == token {
            self.next();
            true
        } else {
            false
        }
    }

    fn expect_ident(&mut self) -> SqlResult<String> {
        match &self.current_token {
            Token::Ident(name) => {
                let name = name.clone();
                self.next();
                Ok(name)
            }
            other => Err(SqlError::syntax_error(
                "identifier",
                other.to_string(),
                self.line_number,
            )),
        }
    }

    /// Parses every statement up to end of input. Empty statements are skipped.
    pub fn parse(&mut self) -> SqlResult<Vec<Statement>> {
        let mut statements = Vec::new();
        loop {
            while self.accept(Token::Semicolon) {}
            if self.current_token == Token::Eof {
                break;
            }
            statements.push(self.parse_statement()?);
            if self.current_token != Token::Eof {
                self.expect(Token::Semicolon)?;
            }
        }
        debug!("parsed {} statements", statements.len());
        Ok(statements)
    }

    pub fn parse_statement(&mut self) -> SqlResult<Statement> {
        let line = self.line_number;
        match self.current_token {
            Token::Select => Ok(self.parse_select()?.at(line).into()),
            Token::Update => Ok(self.parse_update()?.at(line).into()),
            Token::Delete => Ok(self.parse_delete()?.at(line).into()),
            _ => Err(SqlError::UnsupportedStatement {
                found: self.current_token.to_string(),
                line,
            }),
        }
    }

    fn parse_select(&mut self) -> SqlResult<SelectStatement> {
        let line = self.line_number;
        self.expect(Token::Select)?;
        let mut columns = vec![self.parse_result_column()?];
        while self.accept(Token::Comma) {
            columns.push(self.parse_result_column()?);
        }
        self.expect(Token::From)?;
        let mut from_list = vec![FromTable::Base(self.parse_table()?)];
        while self.accept(Token::Comma) {
            from_list.push(FromTable::Base(self.parse_table()?));
        }
        let predicate = if self.accept(Token::Where) {
            Some(self.parse_predicate()?)
        } else {
            None
        };
        let query = SelectNode::new(columns, from_list, predicate).at(line);
        Ok(SelectStatement::new(query))
    }

    fn parse_update(&mut self) -> SqlResult<UpdateStatement> {
        self.expect(Token::Update)?;
        let target = self.parse_table()?;
        self.expect(Token::Set)?;
        let mut assignments = vec![self.parse_assignment()?];
        while self.accept(Token::Comma) {
            assignments.push(self.parse_assignment()?);
        }
        let where_clause = self.parse_where()?;
        Ok(UpdateStatement::new(target, assignments, where_clause))
    }

    fn parse_delete(&mut self) -> SqlResult<DeleteStatement> {
        self.expect(Token::Delete)?;
        self.expect(Token::From)?;
        let target = self.parse_table()?;
        let where_clause = self.parse_where()?;
        Ok(DeleteStatement::new(target, where_clause))
    }

    fn parse_table(&mut self) -> SqlResult<BaseTable> {
        let line = self.line_number;
        let name = self.expect_ident()?;
        let correlation_name = if self.accept(Token::As) {
            Some(self.expect_ident()?)
        } else if matches!(self.current_token, Token::Ident(_)) {
            Some(self.expect_ident()?)
        } else {
            None
        };
        let properties = if self.accept(Token::With) {
            Some(self.parse_properties()?)
        } else {
            None
        };
        let mut table = BaseTable::at(name, line);
        table.initialize(correlation_name, properties)?;
        Ok(table)
    }

    fn parse_properties(&mut self) -> SqlResult<PropertyBag> {
        self.expect(Token::LParen)?;
        let mut properties = PropertyBag::new();
        loop {
            let name = self.expect_ident()?;
            self.expect(Token::Equal)?;
            let value = match &self.current_token {
                Token::Ident(value) | Token::StringLiteral(value) => value.clone(),
                Token::Number(n) => n.to_string(),
                other => {
                    return Err(SqlError::syntax_error(
                        "property value",
                        other.to_string(),
                        self.line_number,
                    ))
                }
            };
            if properties.get(&name).is_some() {
                return Err(SqlError::DuplicateProperty {
                    name,
                    line: self.line_number,
                });
            }
            self.next();
            properties.insert(name, value);
            if !self.accept(Token::Comma) {
                break;
            }
        }
        self.expect(Token::RParen)?;
        Ok(properties)
    }

    fn parse_where(&mut self) -> SqlResult<Option<WhereClause>> {
        if !self.accept(Token::Where) {
            return Ok(None);
        }
        if self.accept(Token::Current) {
            self.expect(Token::Of)?;
            let cursor = self.expect_ident()?;
            return Ok(Some(WhereClause::CurrentOf(cursor)));
        }
        Ok(Some(WhereClause::Searched(self.parse_predicate()?)))
    }

    fn parse_predicate(&mut self) -> SqlResult<Expression> {
        let line = self.line_number;
        let left = self.parse_operand()?;
        self.expect(Token::Equal)?;
        let right = self.parse_operand()?;
        Ok(Expression::at(
            Expr::Equals(Box::new(left), Box::new(right)),
            line,
        ))
    }

    fn parse_assignment(&mut self) -> SqlResult<ResultColumn> {
        let line = self.line_number;
        let column = self.expect_ident()?;
        self.expect(Token::Equal)?;
        Ok(ResultColumn::at(Some(column), self.parse_operand()?, line))
    }

    fn parse_result_column(&mut self) -> SqlResult<ResultColumn> {
        let line = self.line_number;
        let expression = self.parse_operand()?;
        let name = if self.accept(Token::As) {
            Some(self.expect_ident()?)
        } else if matches!(self.current_token, Token::Ident(_)) {
            Some(self.expect_ident()?)
        } else {
            match expression.expr() {
                Expr::Column(name) => Some(name.clone()),
                _ => None,
            }
        };
        Ok(ResultColumn::at(name, expression, line))
    }

    fn parse_operand(&mut self) -> SqlResult<Expression> {
        let line = self.line_number;
        let expr = match &self.current_token {
            Token::Ident(name) => Expr::Column(name.clone()),
            Token::Number(n) => Expr::Constant(Literal::Integer(*n)),
            Token::StringLiteral(s) => Expr::Constant(Literal::String(s.clone())),
            Token::Null => Expr::Constant(Literal::Null),
            other => {
                return Err(SqlError::syntax_error(
                    "column or literal",
                    other.to_string(),
                    line,
                ))
            }
        };
        self.next();
        Ok(Expression::at(expr, line))
    }
}
