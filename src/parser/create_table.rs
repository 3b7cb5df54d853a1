//! `CREATE TABLE` and the column and constraint rules shared with `ALTER TABLE`.

use alloc::string::String;

use super::StatementParser;
use crate::ast::{
    CharsetOptions, ColumnDefinition, CreateDefinition, CreateTable, DataType, ForeignKey,
    PrimaryKey, ReferenceDefinition, ReferenceOption, Unique,
};
use crate::errors::ParseError;
use crate::lexer::{Keyword, TokenKind};

const DATA_TYPES: &[&str] = &[
    "INT",
    "DOUBLE",
    "DECIMAL",
    "DATE",
    "TIME",
    "TIMESTAMP",
    "DATETIME",
    "TEXT",
    "ENUM",
    "SET",
    "JSON",
];

impl StatementParser<'_> {
    /// `CREATE TABLE [IF NOT EXISTS] ID "(" create_definition ("," create_definition)* ")"`
    pub(super) fn parse_create_table(&mut self) -> Result<CreateTable, ParseError> {
        self.expect_keyword(Keyword::Create)?;
        self.expect_keyword(Keyword::Table)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let table_name = self.expect_identifier()?;
        let definitions = self.parse_parenthesized(Self::parse_create_definition)?;

        Ok(CreateTable {
            if_not_exists,
            table_name,
            definitions,
        })
    }

    fn parse_if_not_exists(&mut self) -> Result<bool, ParseError> {
        if !self.eat_keyword(Keyword::If)? {
            return Ok(false);
        }
        self.expect_keyword(Keyword::Not)?;
        self.expect_keyword(Keyword::Exists)?;
        Ok(true)
    }

    fn parse_create_definition(&mut self) -> Result<CreateDefinition, ParseError> {
        match self.peek_keyword()? {
            Some(Keyword::Primary) => self.parse_primary_key().map(CreateDefinition::PrimaryKey),
            Some(Keyword::Unique) => self.parse_unique().map(CreateDefinition::Unique),
            Some(Keyword::Foreign) => self.parse_foreign_key().map(CreateDefinition::ForeignKey),
            _ if self.at_identifier()? => {
                self.parse_column_definition().map(CreateDefinition::Column)
            }
            _ => Err(self.error_at_next(&["identifier", "PRIMARY", "UNIQUE", "FOREIGN"])),
        }
    }

    /// `ID data_type [NOT NULL | NULL] [DEFAULT (STRING|NUMBER)] [AUTO_INCREMENT]`
    pub(super) fn parse_column_definition(&mut self) -> Result<ColumnDefinition, ParseError> {
        let name = self.expect_identifier()?;
        let data_type = self.parse_data_type()?;

        let allow_null = if self.eat_keyword(Keyword::Not)? {
            self.expect_keyword(Keyword::Null)?;
            false
        } else {
            self.eat_keyword(Keyword::Null)?;
            true
        };

        let default = if self.eat_keyword(Keyword::Default)? {
            Some(self.parse_default_value()?)
        } else {
            None
        };

        let auto_increment = self.eat_keyword(Keyword::AutoIncrement)?;

        Ok(ColumnDefinition {
            name,
            data_type,
            allow_null,
            default,
            auto_increment,
        })
    }

    pub(super) fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let token = self.lexer.next()?;
        let TokenKind::Keyword(keyword) = token.kind else {
            return Err(self.unexpected(&token, DATA_TYPES));
        };

        Ok(match keyword {
            Keyword::Int => DataType::Int,
            Keyword::Double => DataType::Double,
            Keyword::Decimal => DataType::Decimal,
            Keyword::Date => DataType::Date,
            Keyword::Time => DataType::Time {
                precision: self.parse_optional_width()?,
            },
            Keyword::Timestamp => DataType::Timestamp {
                precision: self.parse_optional_width()?,
            },
            Keyword::DateTime => DataType::DateTime {
                precision: self.parse_optional_width()?,
            },
            Keyword::Text => DataType::Text {
                length: self.parse_optional_width()?,
                charset: self.parse_charset_options()?,
            },
            Keyword::Enum => DataType::Enum {
                values: self.parse_parenthesized(Self::parse_enum_value)?,
                charset: self.parse_charset_options()?,
            },
            Keyword::Set => DataType::Set {
                values: self.parse_parenthesized(Self::parse_enum_value)?,
                charset: self.parse_charset_options()?,
            },
            Keyword::Json => DataType::Json,
            _ => return Err(self.unexpected(&token, DATA_TYPES)),
        })
    }

    /// `[CHARACTER SET ID] [COLLATE ID]`
    fn parse_charset_options(&mut self) -> Result<CharsetOptions, ParseError> {
        let character_set = if self.eat_keyword(Keyword::Character)? {
            self.expect_keyword(Keyword::Set)?;
            Some(self.expect_identifier()?)
        } else {
            None
        };
        let collation = if self.eat_keyword(Keyword::Collate)? {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        Ok(CharsetOptions {
            character_set,
            collation,
        })
    }

    /// A member of an `ENUM` or `SET` list, with its quotes removed.
    fn parse_enum_value(&mut self) -> Result<String, ParseError> {
        let token = self.lexer.next()?;
        match token.kind {
            TokenKind::StringLiteral(value) => Ok(value.into_owned()),
            TokenKind::Identifier(name) => Ok(String::from(name)),
            TokenKind::QuotedIdentifier(name) if !name.is_empty() => Ok(name.into_owned()),
            TokenKind::Keyword(keyword) if !keyword.is_reserved() => Ok(String::from(token.text)),
            _ => Err(self.unexpected(&token, &["string", "identifier"])),
        }
    }

    /// `PRIMARY KEY [index_type] "(" index_col_name ("," index_col_name)* ")" index_option*`
    pub(super) fn parse_primary_key(&mut self) -> Result<PrimaryKey, ParseError> {
        self.expect_keyword(Keyword::Primary)?;
        self.expect_keyword(Keyword::Key)?;
        let index_type = self.parse_optional_index_type()?;
        let columns = self.parse_index_columns()?;
        let options = self.parse_index_options()?;

        Ok(PrimaryKey {
            index_type,
            columns,
            options,
        })
    }

    /// `UNIQUE [INDEX|KEY] [ID] [index_type] "(" index_col_name ("," index_col_name)* ")" index_option*`
    pub(super) fn parse_unique(&mut self) -> Result<Unique, ParseError> {
        self.expect_keyword(Keyword::Unique)?;
        if !self.eat_keyword(Keyword::Index)? {
            self.eat_keyword(Keyword::Key)?;
        }
        let index_name = self.parse_optional_identifier()?;
        let index_type = self.parse_optional_index_type()?;
        let columns = self.parse_index_columns()?;
        let options = self.parse_index_options()?;

        Ok(Unique {
            index_name,
            index_type,
            columns,
            options,
        })
    }

    /// `FOREIGN KEY [ID] "(" index_col_name ("," index_col_name)* ")" reference_definition`
    pub(super) fn parse_foreign_key(&mut self) -> Result<ForeignKey, ParseError> {
        self.expect_keyword(Keyword::Foreign)?;
        self.expect_keyword(Keyword::Key)?;
        let index_name = self.parse_optional_identifier()?;
        let columns = self.parse_index_columns()?;
        let reference = self.parse_reference_definition()?;

        Ok(ForeignKey {
            index_name,
            columns,
            reference,
        })
    }

    fn parse_reference_definition(&mut self) -> Result<ReferenceDefinition, ParseError> {
        self.expect_keyword(Keyword::References)?;
        let table_name = self.expect_identifier()?;
        let columns = self.parse_index_columns()?;

        // `ON` alone does not say which action follows.
        let on_delete =
            if self.at_keyword(Keyword::On)? && self.at_keyword_nth(1, Keyword::Delete)? {
                self.lexer.next()?;
                self.lexer.next()?;
                Some(self.parse_reference_option()?)
            } else {
                None
            };
        let on_update = if self.eat_keyword(Keyword::On)? {
            if on_delete.is_some() {
                self.expect_keyword(Keyword::Update)?;
            } else {
                self.expect_any_keyword(&[Keyword::Delete, Keyword::Update])?;
            }
            Some(self.parse_reference_option()?)
        } else {
            None
        };

        Ok(ReferenceDefinition {
            table_name,
            columns,
            on_delete,
            on_update,
        })
    }

    /// `RESTRICT | CASCADE | SET NULL | NO ACTION | SET DEFAULT`
    pub(super) fn parse_reference_option(&mut self) -> Result<ReferenceOption, ParseError> {
        let keyword = self.expect_any_keyword(&[
            Keyword::Restrict,
            Keyword::Cascade,
            Keyword::Set,
            Keyword::No,
        ])?;
        Ok(match keyword {
            Keyword::Restrict => ReferenceOption::Restrict,
            Keyword::Cascade => ReferenceOption::Cascade,
            Keyword::Set => {
                if self.expect_any_keyword(&[Keyword::Null, Keyword::Default])? == Keyword::Null {
                    ReferenceOption::SetNull
                } else {
                    ReferenceOption::SetDefault
                }
            }
            _ => {
                self.expect_keyword(Keyword::Action)?;
                ReferenceOption::NoAction
            }
        })
    }
}
