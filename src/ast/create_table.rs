//! Nodes of the `CREATE TABLE` statement.

use alloc::vec::Vec;

use super::{DataType, Identifier, IndexColumn, IndexOption, IndexType, Literal};

/// A `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateTable {
    /// Whether `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// Table name.
    pub table_name: Identifier,
    /// Column and constraint definitions, in source order. Never empty.
    pub definitions: Vec<CreateDefinition>,
}

impl CreateTable {
    /// Iterates over the column definitions, skipping constraints.
    pub fn columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.definitions.iter().filter_map(|definition| match definition {
            CreateDefinition::Column(column) => Some(column),
            _ => None,
        })
    }

    /// Looks up a column definition by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns().find(|column| column.name == name)
    }

    /// The table-level primary key, if any.
    #[must_use]
    pub fn primary_key(&self) -> Option<&PrimaryKey> {
        self.definitions.iter().find_map(|definition| match definition {
            CreateDefinition::PrimaryKey(primary_key) => Some(primary_key),
            _ => None,
        })
    }
}

/// One entry of the parenthesized `CREATE TABLE` body.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CreateDefinition {
    /// A column.
    Column(ColumnDefinition),
    /// A `PRIMARY KEY` constraint.
    PrimaryKey(PrimaryKey),
    /// A `UNIQUE` constraint.
    Unique(Unique),
    /// A `FOREIGN KEY` constraint.
    ForeignKey(ForeignKey),
}

/// A column name together with its type and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnDefinition {
    /// Column name.
    pub name: Identifier,
    /// Column type.
    pub data_type: DataType,
    /// `false` only when `NOT NULL` was given.
    pub allow_null: bool,
    /// The `DEFAULT` value, if any.
    pub default: Option<Literal>,
    /// Whether `AUTO_INCREMENT` was given.
    pub auto_increment: bool,
}

/// `PRIMARY KEY [index_type] (index_col_name, ...) [index_option] ...`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrimaryKey {
    /// Index type; B-tree unless `USING HASH` was given.
    pub index_type: IndexType,
    /// Key columns. Never empty.
    pub columns: Vec<IndexColumn>,
    /// Options following the column list.
    pub options: Vec<IndexOption>,
}

/// `UNIQUE [INDEX|KEY] [index_name] [index_type] (index_col_name, ...) [index_option] ...`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unique {
    /// Index name.
    pub index_name: Option<Identifier>,
    /// Index type; B-tree unless `USING HASH` was given.
    pub index_type: IndexType,
    /// Key columns. Never empty.
    pub columns: Vec<IndexColumn>,
    /// Options following the column list.
    pub options: Vec<IndexOption>,
}

/// `FOREIGN KEY [index_name] (index_col_name, ...) reference_definition`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForeignKey {
    /// Index name.
    pub index_name: Option<Identifier>,
    /// Referencing columns. Never empty.
    pub columns: Vec<IndexColumn>,
    /// The referenced table and columns.
    pub reference: ReferenceDefinition,
}

/// `REFERENCES tbl_name (index_col_name, ...) [ON DELETE ...] [ON UPDATE ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceDefinition {
    /// Referenced table.
    pub table_name: Identifier,
    /// Referenced columns. Never empty.
    pub columns: Vec<IndexColumn>,
    /// Action on delete; `None` when the clause is absent.
    pub on_delete: Option<ReferenceOption>,
    /// Action on update; `None` when the clause is absent.
    pub on_update: Option<ReferenceOption>,
}

/// Referential action of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferenceOption {
    /// `RESTRICT`
    Restrict,
    /// `CASCADE`
    Cascade,
    /// `SET NULL`
    SetNull,
    /// `NO ACTION`
    NoAction,
    /// `SET DEFAULT`
    SetDefault,
}
