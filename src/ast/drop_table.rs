//! The `DROP TABLE` statement.

use alloc::vec::Vec;

use super::Identifier;

/// A `DROP TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropTable {
    /// Whether `IF EXISTS` was given.
    pub if_exists: bool,
    /// Dropped tables, in source order. Never empty.
    pub table_names: Vec<Identifier>,
    /// Trailing `RESTRICT` or `CASCADE`.
    pub on_conflict: Option<DropBehavior>,
}

/// Trailing `RESTRICT` / `CASCADE` of `DROP TABLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropBehavior {
    /// `RESTRICT`
    Restrict,
    /// `CASCADE`
    Cascade,
}
