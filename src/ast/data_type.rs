//! Column data types.

use alloc::string::String;
use alloc::vec::Vec;

use super::Identifier;

/// `[CHARACTER SET charset_name] [COLLATE collation_name]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharsetOptions {
    /// Character set name.
    pub character_set: Option<Identifier>,
    /// Collation name.
    pub collation: Option<Identifier>,
}

/// The type of a column.
///
/// Each variant carries only the attributes the grammar allows for it: a
/// fractional seconds precision for the time types, a length for `TEXT`,
/// character set options for the string types and the member list for `ENUM`
/// and `SET`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    /// `INT`
    Int,
    /// `DOUBLE`
    Double,
    /// `DECIMAL`
    Decimal,
    /// `DATE`
    Date,
    /// `TIME [(fsp)]`
    Time {
        /// Fractional seconds precision.
        precision: Option<u32>,
    },
    /// `TIMESTAMP [(fsp)]`
    Timestamp {
        /// Fractional seconds precision.
        precision: Option<u32>,
    },
    /// `DATETIME [(fsp)]`
    DateTime {
        /// Fractional seconds precision.
        precision: Option<u32>,
    },
    /// `TEXT [(length)] [CHARACTER SET ...] [COLLATE ...]`
    Text {
        /// Maximum length.
        length: Option<u32>,
        /// Character set and collation.
        charset: CharsetOptions,
    },
    /// `ENUM(value, ...) [CHARACTER SET ...] [COLLATE ...]`
    Enum {
        /// Permitted values, quotes removed. Never empty.
        values: Vec<String>,
        /// Character set and collation.
        charset: CharsetOptions,
    },
    /// `SET(value, ...) [CHARACTER SET ...] [COLLATE ...]`
    Set {
        /// Permitted members, quotes removed. Never empty.
        values: Vec<String>,
        /// Character set and collation.
        charset: CharsetOptions,
    },
    /// `JSON`
    Json,
}

/// The type name of a [`DataType`], without its attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataTypeKind {
    /// `INT`
    Int,
    /// `DOUBLE`
    Double,
    /// `DECIMAL`
    Decimal,
    /// `DATE`
    Date,
    /// `TIME`
    Time,
    /// `TIMESTAMP`
    Timestamp,
    /// `DATETIME`
    DateTime,
    /// `TEXT`
    Text,
    /// `ENUM`
    Enum,
    /// `SET`
    Set,
    /// `JSON`
    Json,
}

impl DataTypeKind {
    /// The SQL spelling of the type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DataTypeKind::Int => "INT",
            DataTypeKind::Double => "DOUBLE",
            DataTypeKind::Decimal => "DECIMAL",
            DataTypeKind::Date => "DATE",
            DataTypeKind::Time => "TIME",
            DataTypeKind::Timestamp => "TIMESTAMP",
            DataTypeKind::DateTime => "DATETIME",
            DataTypeKind::Text => "TEXT",
            DataTypeKind::Enum => "ENUM",
            DataTypeKind::Set => "SET",
            DataTypeKind::Json => "JSON",
        }
    }
}

impl DataType {
    /// The type name.
    #[must_use]
    pub fn kind(&self) -> DataTypeKind {
        match self {
            DataType::Int => DataTypeKind::Int,
            DataType::Double => DataTypeKind::Double,
            DataType::Decimal => DataTypeKind::Decimal,
            DataType::Date => DataTypeKind::Date,
            DataType::Time { .. } => DataTypeKind::Time,
            DataType::Timestamp { .. } => DataTypeKind::Timestamp,
            DataType::DateTime { .. } => DataTypeKind::DateTime,
            DataType::Text { .. } => DataTypeKind::Text,
            DataType::Enum { .. } => DataTypeKind::Enum,
            DataType::Set { .. } => DataTypeKind::Set,
            DataType::Json => DataTypeKind::Json,
        }
    }

    /// Fractional seconds precision of `TIME`, `TIMESTAMP` and `DATETIME`.
    #[must_use]
    pub fn precision(&self) -> Option<u32> {
        match self {
            DataType::Time { precision }
            | DataType::Timestamp { precision }
            | DataType::DateTime { precision } => *precision,
            _ => None,
        }
    }

    /// Length of `TEXT`.
    #[must_use]
    pub fn length(&self) -> Option<u32> {
        match self {
            DataType::Text { length, .. } => *length,
            _ => None,
        }
    }

    fn charset(&self) -> Option<&CharsetOptions> {
        match self {
            DataType::Text { charset, .. }
            | DataType::Enum { charset, .. }
            | DataType::Set { charset, .. } => Some(charset),
            _ => None,
        }
    }

    /// Character set of the string types.
    #[must_use]
    pub fn character_set(&self) -> Option<&Identifier> {
        self.charset()?.character_set.as_ref()
    }

    /// Collation of the string types.
    #[must_use]
    pub fn collation(&self) -> Option<&Identifier> {
        self.charset()?.collation.as_ref()
    }

    /// Members of `ENUM` and `SET`.
    #[must_use]
    pub fn enum_values(&self) -> Option<&[String]> {
        match self {
            DataType::Enum { values, .. } | DataType::Set { values, .. } => {
                Some(values.as_slice())
            }
            _ => None,
        }
    }
}
