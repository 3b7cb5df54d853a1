//! Index columns, index options, lock options and `CREATE INDEX`.

use alloc::vec::Vec;

use super::StatementParser;
use crate::ast::{CreateIndex, IndexColumn, IndexOption, IndexType, LockOption, SortOrder};
use crate::errors::ParseError;
use crate::lexer::{Keyword, TokenKind};

impl StatementParser<'_> {
    /// `CREATE [UNIQUE] INDEX name [USING type] ON table (columns)`, followed by
    /// index options and lock options.
    pub(super) fn parse_create_index(&mut self) -> Result<CreateIndex, ParseError> {
        self.expect_keyword(Keyword::Create)?;
        let unique = self.eat_keyword(Keyword::Unique)?;
        self.expect_keyword(Keyword::Index)?;
        let index_name = self.expect_identifier()?;
        let index_type = self.parse_optional_index_type()?;
        self.expect_keyword(Keyword::On)?;
        let table_name = self.expect_identifier()?;
        let columns = self.parse_index_columns()?;
        let options = self.parse_index_options()?;

        let mut lock_options = Vec::new();
        if self.at_keyword(Keyword::Lock)? {
            lock_options.push(self.parse_lock_option()?);
            while self.eat(&TokenKind::Comma)? || self.at_keyword(Keyword::Lock)? {
                lock_options.push(self.parse_lock_option()?);
            }
        }

        Ok(CreateIndex {
            unique,
            index_name,
            index_type,
            table_name,
            columns,
            options,
            lock_options,
        })
    }

    /// `USING (BTREE|HASH)`
    fn parse_index_type(&mut self) -> Result<IndexType, ParseError> {
        self.expect_keyword(Keyword::Using)?;
        let keyword = self.expect_any_keyword(&[Keyword::Btree, Keyword::Hash])?;
        Ok(if keyword == Keyword::Hash {
            IndexType::Hash
        } else {
            IndexType::Btree
        })
    }

    /// `[index_type]`, defaulting to B-tree.
    pub(super) fn parse_optional_index_type(&mut self) -> Result<IndexType, ParseError> {
        if self.at_keyword(Keyword::Using)? {
            self.parse_index_type()
        } else {
            Ok(IndexType::default())
        }
    }

    /// `"(" index_col_name ("," index_col_name)* ")"`
    pub(super) fn parse_index_columns(&mut self) -> Result<Vec<IndexColumn>, ParseError> {
        self.parse_parenthesized(Self::parse_index_column)
    }

    /// `ID ["(" NUMBER ")"] [ASC|DESC]`
    fn parse_index_column(&mut self) -> Result<IndexColumn, ParseError> {
        let name = self.expect_identifier()?;
        let prefix_length = self.parse_optional_width()?;
        let order = if self.eat_keyword(Keyword::Asc)? {
            Some(SortOrder::Asc)
        } else if self.eat_keyword(Keyword::Desc)? {
            Some(SortOrder::Desc)
        } else {
            None
        };

        Ok(IndexColumn {
            name,
            prefix_length,
            order,
        })
    }

    /// Whether the token `n` positions ahead starts an `index_option`.
    ///
    /// `KEY_BLOCK_SIZE` is also a valid column name, so it only counts when
    /// `=` or a number follows it.
    fn at_index_option_nth(&mut self, n: usize) -> Result<bool, ParseError> {
        Ok(match self.lexer.peek_nth(n)?.kind {
            TokenKind::Keyword(Keyword::Using | Keyword::With) => true,
            TokenKind::Keyword(Keyword::KeyBlockSize) => matches!(
                self.lexer.peek_nth(n + 1)?.kind,
                TokenKind::Equals | TokenKind::Number(_)
            ),
            _ => false,
        })
    }

    /// `index_option*`, separated by whitespace or commas.
    ///
    /// A comma is taken as a separator only when another option follows it,
    /// so the comma ending a `create_definition` is left for the caller.
    pub(super) fn parse_index_options(&mut self) -> Result<Vec<IndexOption>, ParseError> {
        let mut options = Vec::new();
        while self.at_index_option_nth(0)? {
            options.push(self.parse_index_option()?);
            if self.at(&TokenKind::Comma)? && self.at_index_option_nth(1)? {
                self.lexer.next()?;
            }
        }
        Ok(options)
    }

    /// `KEY_BLOCK_SIZE ["="] NUMBER | index_type | WITH PARSER ID`
    fn parse_index_option(&mut self) -> Result<IndexOption, ParseError> {
        if self.at_keyword(Keyword::Using)? {
            return self.parse_index_type().map(IndexOption::IndexType);
        }
        if self.eat_keyword(Keyword::With)? {
            self.expect_keyword(Keyword::Parser)?;
            return self.expect_identifier().map(IndexOption::WithParser);
        }
        self.expect_keyword(Keyword::KeyBlockSize)?;
        self.eat(&TokenKind::Equals)?;
        self.expect_u32().map(IndexOption::KeyBlockSize)
    }

    /// `LOCK ["="] (DEFAULT|NONE|SHARED|EXCLUSIVE)`
    pub(super) fn parse_lock_option(&mut self) -> Result<LockOption, ParseError> {
        self.expect_keyword(Keyword::Lock)?;
        self.eat(&TokenKind::Equals)?;
        let keyword = self.expect_any_keyword(&[
            Keyword::Default,
            Keyword::None,
            Keyword::Shared,
            Keyword::Exclusive,
        ])?;
        Ok(match keyword {
            Keyword::Default => LockOption::Default,
            Keyword::None => LockOption::None,
            Keyword::Shared => LockOption::Shared,
            _ => LockOption::Exclusive,
        })
    }
}
