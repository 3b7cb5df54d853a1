//! Typed syntax tree produced by the parser.
//!
//! Every node is a plain value: the parser builds it once and hands ownership
//! to the caller. Alternatives of a grammar rule are modelled as enums, so
//! matching on a node is checked for exhaustiveness at compile time.

mod alter_table;
mod create_table;
mod data_type;
mod drop_table;
mod index;

use alloc::string::String;
use core::fmt;

pub use alter_table::{AlterSpecification, AlterTable, ColumnPosition};
pub use create_table::{
    ColumnDefinition, CreateDefinition, CreateTable, ForeignKey, PrimaryKey, ReferenceDefinition,
    ReferenceOption, Unique,
};
pub use data_type::{CharsetOptions, DataType, DataTypeKind};
pub use drop_table::{DropBehavior, DropTable};
pub use index::{
    CreateIndex, IndexColumn, IndexDefinition, IndexOption, IndexType, LockOption, SortOrder,
};

/// The name of a table, column, index or character set.
///
/// Identifiers keep the spelling used in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Identifier(String);

impl Identifier {
    /// Creates an identifier from its text.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A literal column default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    /// String value, quotes removed.
    String(String),
    /// Unsigned integer value.
    Integer(u64),
}

/// A parsed DDL statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statement {
    /// `CREATE TABLE` statement.
    CreateTable(CreateTable),
    /// `ALTER TABLE` statement.
    AlterTable(AlterTable),
    /// `DROP TABLE` statement.
    DropTable(DropTable),
    /// `CREATE INDEX` statement.
    CreateIndex(CreateIndex),
}

impl Statement {
    /// The leading keywords of the statement, e.g. `"CREATE TABLE"`.
    #[must_use]
    pub fn statement_type(&self) -> &'static str {
        match self {
            Statement::CreateTable(_) => "CREATE TABLE",
            Statement::AlterTable(_) => "ALTER TABLE",
            Statement::DropTable(_) => "DROP TABLE",
            Statement::CreateIndex(_) => "CREATE INDEX",
        }
    }
}
