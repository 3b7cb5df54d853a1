//! Recursive descent parser for DDL statements.
//!
//! Every grammar rule is a method of `StatementParser` that returns the
//! matching AST node. A rule decides what a keyword means on its own: `SET`
//! is a data type inside `parse_data_type` but part of `SET NULL` inside
//! `parse_reference_option`, and there is no global keyword-to-meaning table.
//!
//! Optional clauses are tried in grammar order and consumed only when their
//! leading token matches. Decisions use one token of lookahead, except for
//! `DEFAULT CHARACTER SET` in `ALTER TABLE` and for commas that may either
//! continue an inner list or separate outer items, which peek one more token.

mod alter_table;
mod create_table;
mod drop_table;
mod index;

use alloc::vec;
use alloc::vec::Vec;
use core::str::FromStr;

use crate::ast::{Identifier, Literal, Statement};
use crate::errors::{ParseError, Position};
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

const TRACING_TARGET: &str = "mysql_ddl::parse";

/// DDL parser.
///
/// The parser keeps no state between calls, so a single instance can be
/// shared freely and reused for any number of statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    /// Create a new parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse a single statement.
    ///
    /// The statement may end with one `;`. Anything after it is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be tokenized or does not match
    /// the grammar. No partial tree is ever returned.
    pub fn parse(&self, input: &str) -> Result<Statement, ParseError> {
        let span = tracing::debug_span!(target: TRACING_TARGET, "parse", len = input.len());
        let _guard = span.enter();

        let result = StatementParser::new(input).parse_statement();
        match &result {
            Ok(statement) => tracing::debug!(
                target: TRACING_TARGET,
                statement = statement.statement_type(),
                "parsed statement"
            ),
            Err(error) => tracing::debug!(target: TRACING_TARGET, %error, "rejected statement"),
        }
        result
    }
}

/// Parse a single statement with a default [`Parser`].
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn parse(input: &str) -> Result<Statement, ParseError> {
    Parser::new().parse(input)
}

impl FromStr for Statement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parsing state for one call: the lexer over the statement text.
struct StatementParser<'input> {
    lexer: Lexer<'input>,
}

impl<'input> StatementParser<'input> {
    fn new(input: &'input str) -> Self {
        Self {
            lexer: Lexer::new(input),
        }
    }

    /// `statement := (create_table | alter_table | drop_table | create_index) [";"]`
    fn parse_statement(mut self) -> Result<Statement, ParseError> {
        let statement = match self.peek_keyword()? {
            Some(Keyword::Create) => {
                if self.at_keyword_nth(1, Keyword::Table)? {
                    Statement::CreateTable(self.parse_create_table()?)
                } else if self.at_keyword_nth(1, Keyword::Index)?
                    || self.at_keyword_nth(1, Keyword::Unique)?
                {
                    Statement::CreateIndex(self.parse_create_index()?)
                } else {
                    self.lexer.next()?;
                    return Err(self.error_at_next(&["TABLE", "INDEX", "UNIQUE"]));
                }
            }
            Some(Keyword::Alter) => Statement::AlterTable(self.parse_alter_table()?),
            Some(Keyword::Drop) => Statement::DropTable(self.parse_drop_table()?),
            _ => return Err(self.error_at_next(&["CREATE", "ALTER", "DROP"])),
        };

        self.eat(&TokenKind::Semicolon)?;
        self.expect(&TokenKind::Eof)?;

        Ok(statement)
    }

    fn position_of(&self, token: &Token<'_>) -> Position {
        Position::locate(self.lexer.input(), token.pos)
    }

    /// Builds the error for `token` appearing where one of `expected` was required.
    fn unexpected(&self, token: &Token<'_>, expected: &[&'static str]) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_vec(),
            found: token.kind.describe(),
            position: self.position_of(token),
        }
    }

    /// Consumes the next token and reports it as unexpected.
    fn error_at_next(&mut self, expected: &[&'static str]) -> ParseError {
        match self.lexer.next() {
            Ok(token) => self.unexpected(&token, expected),
            Err(error) => error.into(),
        }
    }

    /// The keyword at the front of the input, if the next token is one.
    fn peek_keyword(&mut self) -> Result<Option<Keyword>, ParseError> {
        Ok(match self.lexer.peek()?.kind {
            TokenKind::Keyword(keyword) => Some(keyword),
            _ => None,
        })
    }

    fn at(&mut self, kind: &TokenKind<'input>) -> Result<bool, ParseError> {
        Ok(self.lexer.peek()?.kind == *kind)
    }

    fn at_keyword(&mut self, keyword: Keyword) -> Result<bool, ParseError> {
        self.at_keyword_nth(0, keyword)
    }

    fn at_keyword_nth(&mut self, n: usize, keyword: Keyword) -> Result<bool, ParseError> {
        Ok(self.lexer.peek_nth(n)?.kind == TokenKind::Keyword(keyword))
    }

    /// Whether the token `n` positions ahead can be read as an identifier.
    fn at_identifier_nth(&mut self, n: usize) -> Result<bool, ParseError> {
        Ok(match &self.lexer.peek_nth(n)?.kind {
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) => true,
            TokenKind::Keyword(keyword) => !keyword.is_reserved(),
            _ => false,
        })
    }

    fn at_identifier(&mut self) -> Result<bool, ParseError> {
        self.at_identifier_nth(0)
    }

    /// Consumes the next token if it is `kind`.
    fn eat(&mut self, kind: &TokenKind<'input>) -> Result<bool, ParseError> {
        if self.at(kind)? {
            self.lexer.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes the next token if it is `keyword`.
    fn eat_keyword(&mut self, keyword: Keyword) -> Result<bool, ParseError> {
        if self.at_keyword(keyword)? {
            self.lexer.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Expect a specific punctuation token.
    fn expect(&mut self, expected: &TokenKind<'input>) -> Result<Token<'input>, ParseError> {
        let token = self.lexer.next()?;
        if token.kind == *expected {
            Ok(token)
        } else {
            Err(self.unexpected(&token, &[expected.static_name()]))
        }
    }

    /// Expect a specific keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        self.expect_any_keyword(&[keyword]).map(|_| ())
    }

    /// Expect one of `keywords` and return the one found.
    fn expect_any_keyword(&mut self, keywords: &[Keyword]) -> Result<Keyword, ParseError> {
        let token = self.lexer.next()?;
        if let TokenKind::Keyword(keyword) = token.kind {
            if keywords.contains(&keyword) {
                return Ok(keyword);
            }
        }
        Err(ParseError::UnexpectedToken {
            expected: keywords.iter().map(|keyword| keyword.as_str()).collect(),
            found: token.kind.describe(),
            position: self.position_of(&token),
        })
    }

    /// Expect an identifier and return its name.
    ///
    /// Non-reserved keywords are accepted with their source spelling.
    fn expect_identifier(&mut self) -> Result<Identifier, ParseError> {
        let token = self.lexer.next()?;
        match token.kind {
            TokenKind::Identifier(name) => Ok(Identifier::from(name)),
            TokenKind::QuotedIdentifier(name) if !name.is_empty() => {
                Ok(Identifier::new(name.into_owned()))
            }
            TokenKind::Keyword(keyword) if !keyword.is_reserved() => {
                Ok(Identifier::from(token.text))
            }
            _ => Err(self.unexpected(&token, &["identifier"])),
        }
    }

    /// `[ID]`
    fn parse_optional_identifier(&mut self) -> Result<Option<Identifier>, ParseError> {
        if self.at_identifier()? {
            self.expect_identifier().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Expect a number that fits in a `u32`.
    fn expect_u32(&mut self) -> Result<u32, ParseError> {
        let token = self.lexer.next()?;
        let TokenKind::Number(value) = token.kind else {
            return Err(self.unexpected(&token, &["number"]));
        };
        u32::try_from(value).map_err(|_| ParseError::NumberOutOfRange {
            value,
            position: self.position_of(&token),
        })
    }

    /// `["(" NUMBER ")"]`
    fn parse_optional_width(&mut self) -> Result<Option<u32>, ParseError> {
        if !self.eat(&TokenKind::LParen)? {
            return Ok(None);
        }
        let width = self.expect_u32()?;
        self.expect(&TokenKind::RParen)?;
        Ok(Some(width))
    }

    /// `STRING | NUMBER`, the only literals a `DEFAULT` clause accepts.
    fn parse_default_value(&mut self) -> Result<Literal, ParseError> {
        let token = self.lexer.next()?;
        match token.kind {
            TokenKind::StringLiteral(value) => Ok(Literal::String(value.into_owned())),
            TokenKind::Number(value) => Ok(Literal::Integer(value)),
            _ => Err(self.unexpected(&token, &["string", "number"])),
        }
    }

    /// `item ("," item)*`, returning at least one item.
    fn parse_comma_separated<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = vec![item(self)?];
        while self.eat(&TokenKind::Comma)? {
            items.push(item(self)?);
        }
        Ok(items)
    }

    /// `"(" item ("," item)* ")"`
    fn parse_parenthesized<T>(
        &mut self,
        item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let items = self.parse_comma_separated(item)?;
        self.expect(&TokenKind::RParen)?;
        Ok(items)
    }
}
