//! Index columns, index options and the `CREATE INDEX` statement.

use alloc::vec::Vec;

use super::Identifier;

/// Storage structure of an index, from `USING {BTREE | HASH}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexType {
    /// B-tree index, used when no `USING` clause is given.
    #[default]
    Btree,
    /// Hash index.
    Hash,
}

impl IndexType {
    /// Lower-case name: `"btree"` or `"hash"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            IndexType::Btree => "btree",
            IndexType::Hash => "hash",
        }
    }
}

/// `ASC` or `DESC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// `col_name [(length)] [ASC | DESC]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexColumn {
    /// Column name.
    pub name: Identifier,
    /// Number of leading characters indexed.
    pub prefix_length: Option<u32>,
    /// Explicit sort order.
    pub order: Option<SortOrder>,
}

/// An option following an index column list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexOption {
    /// `KEY_BLOCK_SIZE [=] value`
    KeyBlockSize(u32),
    /// `USING {BTREE | HASH}`
    IndexType(IndexType),
    /// `WITH PARSER parser_name`
    WithParser(Identifier),
}

/// `LOCK [=] {DEFAULT | NONE | SHARED | EXCLUSIVE}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LockOption {
    /// `DEFAULT`
    Default,
    /// `NONE`
    None,
    /// `SHARED`
    Shared,
    /// `EXCLUSIVE`
    Exclusive,
}

/// A plain index added with `ALTER TABLE ... ADD {INDEX | KEY}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexDefinition {
    /// Index name.
    pub index_name: Option<Identifier>,
    /// Index type; B-tree unless `USING HASH` was given.
    pub index_type: IndexType,
    /// Indexed columns. Never empty.
    pub columns: Vec<IndexColumn>,
    /// Options following the column list.
    pub options: Vec<IndexOption>,
}

/// A `CREATE [UNIQUE] INDEX` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateIndex {
    /// Whether `UNIQUE` was given.
    pub unique: bool,
    /// Index name.
    pub index_name: Identifier,
    /// Index type; B-tree unless `USING HASH` was given.
    pub index_type: IndexType,
    /// Indexed table.
    pub table_name: Identifier,
    /// Indexed columns. Never empty.
    pub columns: Vec<IndexColumn>,
    /// Options following the column list.
    pub options: Vec<IndexOption>,
    /// `LOCK` clauses, in source order.
    pub lock_options: Vec<LockOption>,
}
