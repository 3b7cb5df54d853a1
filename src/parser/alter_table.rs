//! `ALTER TABLE` and its alter specifications.

use alloc::vec;
use alloc::vec::Vec;

use super::StatementParser;
use crate::ast::{AlterSpecification, AlterTable, ColumnPosition, IndexDefinition};
use crate::errors::ParseError;
use crate::lexer::{Keyword, TokenKind};

const ALTER_SPECIFICATIONS: &[&str] = &[
    "ADD", "ALTER", "CHANGE", "CHARACTER", "CONVERT", "DEFAULT", "DROP", "LOCK", "MODIFY",
    "ORDER", "RENAME",
];

impl StatementParser<'_> {
    /// `ALTER TABLE ID [alter_specification ("," alter_specification)*]`
    pub(super) fn parse_alter_table(&mut self) -> Result<AlterTable, ParseError> {
        self.expect_keyword(Keyword::Alter)?;
        self.expect_keyword(Keyword::Table)?;
        let table_name = self.expect_identifier()?;

        let specifications =
            if self.at(&TokenKind::Eof)? || self.at(&TokenKind::Semicolon)? {
                Vec::new()
            } else {
                self.parse_comma_separated(Self::parse_alter_specification)?
            };

        Ok(AlterTable {
            table_name,
            specifications,
        })
    }

    fn parse_alter_specification(&mut self) -> Result<AlterSpecification, ParseError> {
        match self.peek_keyword()? {
            Some(Keyword::Add) => self.parse_add(),
            Some(Keyword::Alter) => self.parse_alter_column_default(),
            Some(Keyword::Change) => self.parse_change_column(),
            Some(Keyword::Character) => self.parse_default_character_set(),
            Some(Keyword::Default) => {
                if self.at_keyword_nth(1, Keyword::Character)? {
                    self.parse_default_character_set()
                } else {
                    self.lexer.next()?;
                    Err(self.error_at_next(&["CHARACTER"]))
                }
            }
            Some(Keyword::Convert) => self.parse_convert_to_character_set(),
            Some(Keyword::Drop) => self.parse_drop(),
            Some(Keyword::Lock) => self.parse_lock_option().map(AlterSpecification::Lock),
            Some(Keyword::Modify) => self.parse_modify_column(),
            Some(Keyword::Order) => self.parse_order_by(),
            Some(Keyword::Rename) => self.parse_rename(),
            _ => Err(self.error_at_next(ALTER_SPECIFICATIONS)),
        }
    }

    fn parse_add(&mut self) -> Result<AlterSpecification, ParseError> {
        self.expect_keyword(Keyword::Add)?;
        match self.peek_keyword()? {
            Some(Keyword::Index | Keyword::Key) => {
                self.lexer.next()?;
                let index_name = self.parse_optional_identifier()?;
                let index_type = self.parse_optional_index_type()?;
                let columns = self.parse_index_columns()?;
                let options = self.parse_index_options()?;
                Ok(AlterSpecification::AddIndex(IndexDefinition {
                    index_name,
                    index_type,
                    columns,
                    options,
                }))
            }
            Some(Keyword::Primary) => self
                .parse_primary_key()
                .map(AlterSpecification::AddPrimaryKey),
            Some(Keyword::Unique) => self.parse_unique().map(AlterSpecification::AddUnique),
            Some(Keyword::Foreign) => self
                .parse_foreign_key()
                .map(AlterSpecification::AddForeignKey),
            _ => {
                self.eat_keyword(Keyword::Column)?;
                if self.at(&TokenKind::LParen)? {
                    return self
                        .parse_parenthesized(Self::parse_column_definition)
                        .map(AlterSpecification::AddColumns);
                }
                let column = self.parse_column_definition()?;
                let position = self.parse_column_position()?;
                Ok(AlterSpecification::AddColumn { column, position })
            }
        }
    }

    /// `[FIRST | AFTER ID]`
    fn parse_column_position(&mut self) -> Result<Option<ColumnPosition>, ParseError> {
        if self.eat_keyword(Keyword::First)? {
            Ok(Some(ColumnPosition::First))
        } else if self.eat_keyword(Keyword::After)? {
            Ok(Some(ColumnPosition::After(self.expect_identifier()?)))
        } else {
            Ok(None)
        }
    }

    /// `ALTER [COLUMN] ID (SET DEFAULT (STRING|NUMBER) | DROP DEFAULT)`
    fn parse_alter_column_default(&mut self) -> Result<AlterSpecification, ParseError> {
        self.expect_keyword(Keyword::Alter)?;
        self.eat_keyword(Keyword::Column)?;
        let column = self.expect_identifier()?;

        let set = self.expect_any_keyword(&[Keyword::Set, Keyword::Drop])? == Keyword::Set;
        self.expect_keyword(Keyword::Default)?;
        let default = if set {
            Some(self.parse_default_value()?)
        } else {
            None
        };

        Ok(AlterSpecification::AlterColumnDefault { column, default })
    }

    /// `CHANGE [COLUMN] ID ID column_definition [FIRST | AFTER ID]`
    fn parse_change_column(&mut self) -> Result<AlterSpecification, ParseError> {
        self.expect_keyword(Keyword::Change)?;
        self.eat_keyword(Keyword::Column)?;
        let old_name = self.expect_identifier()?;
        let column = self.parse_column_definition()?;
        let position = self.parse_column_position()?;

        Ok(AlterSpecification::ChangeColumn {
            old_name,
            column,
            position,
        })
    }

    /// `MODIFY [COLUMN] ID column_definition [FIRST | AFTER ID]`
    fn parse_modify_column(&mut self) -> Result<AlterSpecification, ParseError> {
        self.expect_keyword(Keyword::Modify)?;
        self.eat_keyword(Keyword::Column)?;
        let column = self.parse_column_definition()?;
        let position = self.parse_column_position()?;

        Ok(AlterSpecification::ModifyColumn { column, position })
    }

    /// `[DEFAULT] CHARACTER SET ["="] ID [COLLATE ["="] ID]`
    fn parse_default_character_set(&mut self) -> Result<AlterSpecification, ParseError> {
        self.eat_keyword(Keyword::Default)?;
        self.expect_keyword(Keyword::Character)?;
        self.expect_keyword(Keyword::Set)?;
        self.eat(&TokenKind::Equals)?;
        let character_set = self.expect_identifier()?;

        let collation = if self.eat_keyword(Keyword::Collate)? {
            self.eat(&TokenKind::Equals)?;
            Some(self.expect_identifier()?)
        } else {
            None
        };

        Ok(AlterSpecification::DefaultCharacterSet {
            character_set,
            collation,
        })
    }

    /// `CONVERT TO CHARACTER SET ID [COLLATE ID]`
    fn parse_convert_to_character_set(&mut self) -> Result<AlterSpecification, ParseError> {
        self.expect_keyword(Keyword::Convert)?;
        self.expect_keyword(Keyword::To)?;
        self.expect_keyword(Keyword::Character)?;
        self.expect_keyword(Keyword::Set)?;
        let character_set = self.expect_identifier()?;

        let collation = if self.eat_keyword(Keyword::Collate)? {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        Ok(AlterSpecification::ConvertToCharacterSet {
            character_set,
            collation,
        })
    }

    fn parse_drop(&mut self) -> Result<AlterSpecification, ParseError> {
        self.expect_keyword(Keyword::Drop)?;
        match self.peek_keyword()? {
            Some(Keyword::Index | Keyword::Key) => {
                self.lexer.next()?;
                self.expect_identifier().map(AlterSpecification::DropIndex)
            }
            Some(Keyword::Primary) => {
                self.lexer.next()?;
                self.expect_keyword(Keyword::Key)?;
                Ok(AlterSpecification::DropPrimaryKey)
            }
            Some(Keyword::Foreign) => {
                self.lexer.next()?;
                self.expect_keyword(Keyword::Key)?;
                self.expect_identifier().map(AlterSpecification::DropForeignKey)
            }
            _ => {
                self.eat_keyword(Keyword::Column)?;
                self.expect_identifier().map(AlterSpecification::DropColumn)
            }
        }
    }

    /// `ORDER BY ID ("," ID)*`
    ///
    /// A comma followed by anything but an identifier ends the list and is
    /// left to separate the next alter specification.
    fn parse_order_by(&mut self) -> Result<AlterSpecification, ParseError> {
        self.expect_keyword(Keyword::Order)?;
        self.expect_keyword(Keyword::By)?;

        let mut columns = vec![self.expect_identifier()?];
        while self.at(&TokenKind::Comma)? && self.at_identifier_nth(1)? {
            self.lexer.next()?;
            columns.push(self.expect_identifier()?);
        }

        Ok(AlterSpecification::OrderBy(columns))
    }

    /// `RENAME (INDEX|KEY) ID TO ID | RENAME [TO] ID`
    fn parse_rename(&mut self) -> Result<AlterSpecification, ParseError> {
        self.expect_keyword(Keyword::Rename)?;

        if self.eat_keyword(Keyword::Index)? || self.eat_keyword(Keyword::Key)? {
            let old_name = self.expect_identifier()?;
            self.expect_keyword(Keyword::To)?;
            let new_name = self.expect_identifier()?;
            return Ok(AlterSpecification::RenameIndex { old_name, new_name });
        }

        self.eat_keyword(Keyword::To)?;
        self.expect_identifier().map(AlterSpecification::RenameTable)
    }
}
