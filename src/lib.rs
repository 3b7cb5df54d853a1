#![doc = include_str!("../README.md")]
#![no_std]
#![deny(clippy::mod_module_files)]

extern crate alloc;

pub mod ast;
pub mod errors;
pub mod lexer;
mod parser;
#[cfg(feature = "testing")]
pub mod testing;

// Re-export main types
pub use ast::{
    AlterSpecification, AlterTable, CharsetOptions, ColumnDefinition, ColumnPosition,
    CreateDefinition, CreateIndex, CreateTable, DataType, DataTypeKind, DropBehavior, DropTable,
    ForeignKey, Identifier, IndexColumn, IndexDefinition, IndexOption, IndexType, Literal,
    LockOption, PrimaryKey, ReferenceDefinition, ReferenceOption, SortOrder, Statement, Unique,
};
pub use parser::{Parser, parse};

// Re-export errors
pub use errors::{ParseError, Position};
pub use lexer::LexerError;
