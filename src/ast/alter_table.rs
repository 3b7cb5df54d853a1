//! Nodes of the `ALTER TABLE` statement.

use alloc::vec::Vec;

use super::{
    ColumnDefinition, ForeignKey, Identifier, IndexDefinition, Literal, LockOption, PrimaryKey,
    Unique,
};

/// An `ALTER TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlterTable {
    /// Table name.
    pub table_name: Identifier,
    /// Alterations, in source order. May be empty.
    pub specifications: Vec<AlterSpecification>,
}

/// Where an added or redefined column is placed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnPosition {
    /// `FIRST`
    First,
    /// `AFTER col_name`
    After(Identifier),
}

/// A single alteration of an `ALTER TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlterSpecification {
    /// `ADD [COLUMN] col_name column_definition [FIRST | AFTER col_name]`
    AddColumn {
        /// The new column.
        column: ColumnDefinition,
        /// Placement of the column.
        position: Option<ColumnPosition>,
    },
    /// `ADD [COLUMN] (col_name column_definition, ...)`
    AddColumns(Vec<ColumnDefinition>),
    /// `ADD {INDEX | KEY} [index_name] [index_type] (index_col_name, ...) [index_option] ...`
    AddIndex(IndexDefinition),
    /// `ADD PRIMARY KEY ...`
    AddPrimaryKey(PrimaryKey),
    /// `ADD UNIQUE ...`
    AddUnique(Unique),
    /// `ADD FOREIGN KEY ...`
    AddForeignKey(ForeignKey),
    /// `ALTER [COLUMN] col_name {SET DEFAULT literal | DROP DEFAULT}`
    AlterColumnDefault {
        /// The altered column.
        column: Identifier,
        /// The new default, or `None` for `DROP DEFAULT`.
        default: Option<Literal>,
    },
    /// `CHANGE [COLUMN] old_col_name new_col_name column_definition [FIRST | AFTER col_name]`
    ChangeColumn {
        /// Current column name.
        old_name: Identifier,
        /// The new name and definition.
        column: ColumnDefinition,
        /// Placement of the column.
        position: Option<ColumnPosition>,
    },
    /// `[DEFAULT] CHARACTER SET [=] charset_name [COLLATE [=] collation_name]`
    DefaultCharacterSet {
        /// Character set name.
        character_set: Identifier,
        /// Collation name.
        collation: Option<Identifier>,
    },
    /// `CONVERT TO CHARACTER SET charset_name [COLLATE collation_name]`
    ConvertToCharacterSet {
        /// Character set name.
        character_set: Identifier,
        /// Collation name.
        collation: Option<Identifier>,
    },
    /// `DROP [COLUMN] col_name`
    DropColumn(Identifier),
    /// `DROP {INDEX | KEY} index_name`
    DropIndex(Identifier),
    /// `DROP PRIMARY KEY`
    DropPrimaryKey,
    /// `DROP FOREIGN KEY fk_symbol`
    DropForeignKey(Identifier),
    /// `LOCK [=] {DEFAULT | NONE | SHARED | EXCLUSIVE}`
    Lock(LockOption),
    /// `MODIFY [COLUMN] col_name column_definition [FIRST | AFTER col_name]`
    ModifyColumn {
        /// The new definition.
        column: ColumnDefinition,
        /// Placement of the column.
        position: Option<ColumnPosition>,
    },
    /// `ORDER BY col_name [, col_name] ...`
    OrderBy(Vec<Identifier>),
    /// `RENAME {INDEX | KEY} old_index_name TO new_index_name`
    RenameIndex {
        /// Current index name.
        old_name: Identifier,
        /// New index name.
        new_name: Identifier,
    },
    /// `RENAME [TO] new_tbl_name`
    RenameTable(Identifier),
}
