//! Fuzzing and regression helpers.
//!
//! This module is gated behind the `testing` feature. The honggfuzz harnesses
//! in `fuzz/` and the replay tests in `tests/fuzz_regression.rs` call the same
//! functions, so a crash found while fuzzing is reproduced by `cargo test`.
//!
//! # Provided helpers
//!
//! - [`FuzzStatement`]: grammar-shaped input built from `arbitrary` bytes
//! - [`test_parse_deterministic`]: parse twice and check the result is sound
//! - [`run_crash_dir_regression`]: replay every stored crash input of a harness

extern crate std;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use arbitrary::Arbitrary;

use crate::ast::{
    AlterSpecification, ColumnDefinition, CreateDefinition, Identifier, IndexColumn, Statement,
};
use crate::errors::{ParseError, Position};
use crate::lexer::Keyword;
use crate::parser::Parser;

/// Names used for generated identifiers.
///
/// A small pool makes repeated names likely, and the pool mixes plain words
/// with non-reserved keywords that must still parse as identifiers.
const NAMES: &[&str] = &[
    "a", "b", "id", "name", "t", "users", "created_at", "date", "action", "hash", "first",
];

/// An identifier drawn from a fixed pool.
#[derive(Debug, Clone, Copy, Arbitrary)]
pub struct FuzzName(u8);

impl FuzzName {
    /// The identifier text.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        NAMES[usize::from(self.0) % NAMES.len()]
    }
}

/// One token of a generated statement.
#[derive(Debug, Clone, Arbitrary)]
pub enum FuzzToken {
    /// A keyword, spelled in upper case.
    Keyword(Keyword),
    /// A bare identifier.
    Identifier(FuzzName),
    /// A backtick-quoted identifier.
    QuotedIdentifier(FuzzName),
    /// An unsigned integer.
    Number(u64),
    /// A single-quoted string, with embedded quotes doubled.
    String(String),
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `=`
    Equals,
    /// Any character, to reach the lexer error paths.
    Raw(char),
}

impl FuzzToken {
    fn write_to(&self, out: &mut String) {
        match self {
            FuzzToken::Keyword(keyword) => out.push_str(keyword.as_str()),
            FuzzToken::Identifier(name) => out.push_str(name.as_str()),
            FuzzToken::QuotedIdentifier(name) => {
                let _ = write!(out, "`{}`", name.as_str());
            }
            FuzzToken::Number(value) => {
                let _ = write!(out, "{value}");
            }
            FuzzToken::String(value) => {
                let _ = write!(
                    out,
                    "'{}'",
                    value.replace('\\', "\\\\").replace('\'', "''")
                );
            }
            FuzzToken::LParen => out.push('('),
            FuzzToken::RParen => out.push(')'),
            FuzzToken::Comma => out.push(','),
            FuzzToken::Equals => out.push('='),
            FuzzToken::Raw(c) => out.push(*c),
        }
    }
}

/// The leading keywords of a generated statement.
#[derive(Debug, Clone, Copy, Arbitrary)]
pub enum FuzzHead {
    /// `CREATE TABLE`
    CreateTable,
    /// `CREATE INDEX`
    CreateIndex,
    /// `CREATE UNIQUE INDEX`
    CreateUniqueIndex,
    /// `ALTER TABLE`
    AlterTable,
    /// `DROP TABLE`
    DropTable,
    /// No fixed head.
    Free,
}

impl FuzzHead {
    fn as_str(self) -> &'static str {
        match self {
            FuzzHead::CreateTable => "CREATE TABLE",
            FuzzHead::CreateIndex => "CREATE INDEX",
            FuzzHead::CreateUniqueIndex => "CREATE UNIQUE INDEX",
            FuzzHead::AlterTable => "ALTER TABLE",
            FuzzHead::DropTable => "DROP TABLE",
            FuzzHead::Free => "",
        }
    }
}

/// A statement-shaped token sequence.
///
/// Raw bytes rarely get past the first keyword; starting from a valid head and
/// drawing tokens from the grammar's vocabulary reaches the deeper rules.
#[derive(Debug, Clone, Arbitrary)]
pub struct FuzzStatement {
    /// Leading keywords.
    pub head: FuzzHead,
    /// Tokens after the head.
    pub tokens: Vec<FuzzToken>,
    /// Whether a trailing `;` is appended.
    pub semicolon: bool,
}

impl FuzzStatement {
    /// Renders the statement as SQL text, tokens separated by single spaces.
    #[must_use]
    pub fn render(&self) -> String {
        let mut sql = String::from(self.head.as_str());
        for token in &self.tokens {
            if !sql.is_empty() {
                sql.push(' ');
            }
            token.write_to(&mut sql);
        }
        if self.semicolon {
            sql.push(';');
        }
        sql
    }
}

/// Parses `sql` twice and checks that the outcome is deterministic and sound.
///
/// A successful parse must satisfy the non-empty invariants of the tree. A
/// failed parse must report a position inside the input that agrees with
/// [`Position::locate`].
///
/// # Panics
///
/// Panics if any of the checks fails.
pub fn test_parse_deterministic(sql: &str) {
    let parser = Parser::new();
    let first = parser.parse(sql);
    let second = parser.parse(sql);
    assert_eq!(first, second, "Parsing {sql:?} is not deterministic");

    match first {
        Ok(statement) => assert_statement_invariants(&statement),
        Err(error) => assert_error_position(sql, &error),
    }
}

fn assert_error_position(sql: &str, error: &ParseError) {
    let position = error.position();
    assert!(
        position.offset <= sql.len(),
        "Error offset {} past the end of {sql:?}",
        position.offset
    );
    assert_eq!(
        Position::locate(sql, position.offset),
        position,
        "Inconsistent position for {error} in {sql:?}"
    );
}

fn assert_identifier(identifier: &Identifier) {
    assert!(!identifier.as_str().is_empty(), "Empty identifier");
}

fn assert_index_columns(columns: &[IndexColumn]) {
    assert!(!columns.is_empty(), "Empty index column list");
    for column in columns {
        assert_identifier(&column.name);
    }
}

fn assert_column(column: &ColumnDefinition) {
    assert_identifier(&column.name);
    if let Some(values) = column.data_type.enum_values() {
        assert!(!values.is_empty(), "Empty ENUM or SET member list");
    }
}

fn assert_statement_invariants(statement: &Statement) {
    match statement {
        Statement::CreateTable(create) => {
            assert_identifier(&create.table_name);
            assert!(!create.definitions.is_empty(), "Empty table body");
            for definition in &create.definitions {
                match definition {
                    CreateDefinition::Column(column) => assert_column(column),
                    CreateDefinition::PrimaryKey(primary_key) => {
                        assert_index_columns(&primary_key.columns);
                    }
                    CreateDefinition::Unique(unique) => assert_index_columns(&unique.columns),
                    CreateDefinition::ForeignKey(foreign_key) => {
                        assert_index_columns(&foreign_key.columns);
                        assert_index_columns(&foreign_key.reference.columns);
                    }
                }
            }
        }
        Statement::AlterTable(alter) => {
            assert_identifier(&alter.table_name);
            for specification in &alter.specifications {
                match specification {
                    AlterSpecification::AddColumn { column, .. }
                    | AlterSpecification::ChangeColumn { column, .. }
                    | AlterSpecification::ModifyColumn { column, .. } => assert_column(column),
                    AlterSpecification::AddColumns(columns) => {
                        assert!(!columns.is_empty(), "Empty ADD column list");
                        columns.iter().for_each(assert_column);
                    }
                    AlterSpecification::AddIndex(index) => assert_index_columns(&index.columns),
                    AlterSpecification::AddPrimaryKey(primary_key) => {
                        assert_index_columns(&primary_key.columns);
                    }
                    AlterSpecification::AddUnique(unique) => assert_index_columns(&unique.columns),
                    AlterSpecification::AddForeignKey(foreign_key) => {
                        assert_index_columns(&foreign_key.columns);
                    }
                    AlterSpecification::OrderBy(columns) => {
                        assert!(!columns.is_empty(), "Empty ORDER BY list");
                    }
                    _ => {}
                }
            }
        }
        Statement::DropTable(drop) => {
            assert!(!drop.table_names.is_empty(), "Empty DROP TABLE list");
            drop.table_names.iter().for_each(assert_identifier);
        }
        Statement::CreateIndex(index) => {
            assert_identifier(&index.index_name);
            assert_identifier(&index.table_name);
            assert_index_columns(&index.columns);
        }
    }
}

/// Replays every crash input of a fuzz harness through `test`.
///
/// `.fuzz` files found in `workspace_dir`, the honggfuzz workspace of the
/// harness, are first copied into `crash_dir` so that new crashes become
/// permanent regression inputs. Every `.fuzz` file in `crash_dir` is then
/// passed to `test`, in file name order.
///
/// # Panics
///
/// Panics if `test` panics, if a single input takes longer than
/// `time_limit`, or if a crash input cannot be copied or read.
pub fn run_crash_dir_regression(
    crash_dir: &str,
    workspace_dir: &str,
    time_limit: Duration,
    test: impl Fn(&[u8]),
) {
    let crash_dir = Path::new(crash_dir);
    let is_crash_file =
        |path: &Path| path.is_file() && path.extension().is_some_and(|ext| ext == "fuzz");

    if let Ok(entries) = fs::read_dir(workspace_dir) {
        for path in entries.filter_map(Result::ok).map(|entry| entry.path()) {
            let Some(file_name) = path.file_name() else {
                continue;
            };
            let target = crash_dir.join(file_name);
            if is_crash_file(path.as_path()) && !target.exists() {
                fs::create_dir_all(crash_dir).unwrap_or_else(|err| {
                    panic!("Failed to create {}: {err}", crash_dir.display())
                });
                fs::copy(&path, &target).unwrap_or_else(|err| {
                    panic!(
                        "Failed to copy {} to {}: {err}",
                        path.display(),
                        target.display()
                    )
                });
            }
        }
    }

    let Ok(entries) = fs::read_dir(crash_dir) else {
        return;
    };
    let mut paths: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_crash_file(path.as_path()))
        .collect();
    paths.sort();

    for path in paths {
        let data = fs::read(&path)
            .unwrap_or_else(|err| panic!("Failed to read {}: {err}", path.display()));
        let start = Instant::now();
        test(&data);
        let elapsed = start.elapsed();
        assert!(
            elapsed <= time_limit,
            "Crash input {} took {elapsed:?}, limit is {time_limit:?}",
            path.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbitrary::Unstructured;

    #[test]
    fn test_render() {
        let statement = FuzzStatement {
            head: FuzzHead::CreateTable,
            tokens: alloc::vec![
                FuzzToken::Identifier(FuzzName(0)),
                FuzzToken::LParen,
                FuzzToken::QuotedIdentifier(FuzzName(2)),
                FuzzToken::Keyword(Keyword::Text),
                FuzzToken::Keyword(Keyword::Default),
                FuzzToken::String(String::from("it's")),
                FuzzToken::RParen,
            ],
            semicolon: true,
        };
        let sql = statement.render();
        assert_eq!(sql, "CREATE TABLE a ( `id` TEXT DEFAULT 'it''s' );");
        test_parse_deterministic(&sql);
    }

    #[test]
    fn test_render_escapes_backslashes() {
        let statement = FuzzStatement {
            head: FuzzHead::CreateTable,
            tokens: alloc::vec![
                FuzzToken::Identifier(FuzzName(0)),
                FuzzToken::LParen,
                FuzzToken::Identifier(FuzzName(1)),
                FuzzToken::Keyword(Keyword::Text),
                FuzzToken::Keyword(Keyword::Default),
                FuzzToken::String(String::from(r"C:\dir\")),
                FuzzToken::RParen,
            ],
            semicolon: false,
        };
        let sql = statement.render();
        assert!(sql.contains(r"'C:\\dir\\'"), "{sql}");
        let Statement::CreateTable(create) = Parser::new().parse(&sql).unwrap() else {
            panic!("Expected CreateTable");
        };
        let column = create.columns().next().unwrap();
        assert_eq!(
            column.default,
            Some(crate::ast::Literal::String(String::from(r"C:\dir\")))
        );
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(alloc::format!(
            "mysql-ddl-rs-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_crash_files_are_copied_and_replayed() {
        let root = scratch_dir("copy");
        let workspace = root.join("workspace");
        let crash_dir = root.join("crashes");
        fs::create_dir_all(&workspace).unwrap();
        fs::write(workspace.join("one.fuzz"), "DROP TABLE t").unwrap();
        fs::write(workspace.join("notes.txt"), "ignored").unwrap();

        let replayed = std::cell::RefCell::new(Vec::new());
        run_crash_dir_regression(
            crash_dir.to_str().unwrap(),
            workspace.to_str().unwrap(),
            Duration::from_secs(2),
            |data| replayed.borrow_mut().push(data.to_vec()),
        );

        assert!(crash_dir.join("one.fuzz").is_file());
        assert!(!crash_dir.join("notes.txt").exists());
        assert_eq!(replayed.into_inner(), [b"DROP TABLE t".to_vec()]);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    #[should_panic(expected = "Failed to create")]
    fn test_uncopyable_crash_file_panics() {
        let root = scratch_dir("blocked");
        let workspace = root.join("workspace");
        fs::create_dir_all(&workspace).unwrap();
        fs::write(workspace.join("one.fuzz"), "DROP TABLE t").unwrap();
        // A regular file where the crash directory should be.
        let crash_dir = root.join("crashes");
        fs::write(&crash_dir, "").unwrap();

        run_crash_dir_regression(
            crash_dir.to_str().unwrap(),
            workspace.to_str().unwrap(),
            Duration::from_secs(2),
            |_| {},
        );
    }

    #[test]
    fn test_arbitrary_statements() {
        let data: Vec<u8> = (0..1024u32)
            .flat_map(|i| i.wrapping_mul(2_654_435_761).to_le_bytes())
            .collect();
        let mut u = Unstructured::new(&data);
        for _ in 0..64 {
            if u.is_empty() {
                break;
            }
            let Ok(statement) = FuzzStatement::arbitrary(&mut u) else {
                break;
            };
            test_parse_deterministic(&statement.render());
        }
    }

    #[test]
    fn test_error_positions() {
        for sql in [
            "",
            "CREATE",
            "CREATE TABLE t (\n  a INT,\n  b BLOB)",
            "DROP TABLE 'x'",
            "ALTER TABLE t ADD @",
        ] {
            test_parse_deterministic(sql);
        }
    }
}
