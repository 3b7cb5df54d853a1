//! JSON round trips of parsed syntax trees.
//!
//! Requires the `serde` feature.

#![cfg(feature = "serde")]

use mysql_ddl_rs::{Identifier, IndexType, Statement, parse};

fn round_trip(sql: &str) -> Statement {
    let statement = parse(sql).expect("Failed to parse SQL");
    let json = serde_json::to_string(&statement).expect("Failed to serialize");
    let decoded: Statement = serde_json::from_str(&json).expect("Failed to deserialize");
    assert_eq!(decoded, statement, "{json}");
    decoded
}

#[test]
fn test_every_statement_kind_round_trips() {
    for sql in [
        "CREATE TABLE IF NOT EXISTS t (
            id INT NOT NULL AUTO_INCREMENT,
            kind ENUM('a', 'b') CHARACTER SET latin1 DEFAULT 'a',
            at TIMESTAMP(3),
            PRIMARY KEY USING HASH (id) KEY_BLOCK_SIZE 4,
            UNIQUE KEY uq (kind(2) DESC),
            FOREIGN KEY (id) REFERENCES o (id) ON DELETE SET NULL
        )",
        "ALTER TABLE t ADD c JSON FIRST, DROP PRIMARY KEY, RENAME INDEX a TO b, LOCK NONE",
        "DROP TABLE IF EXISTS a, b RESTRICT",
        "CREATE UNIQUE INDEX i USING BTREE ON t (a) WITH PARSER ngram LOCK SHARED",
    ] {
        round_trip(sql);
    }
}

#[test]
fn test_identifier_is_a_plain_string() {
    assert_eq!(
        serde_json::to_string(&Identifier::from("users")).unwrap(),
        "\"users\""
    );
}

#[test]
fn test_index_type_in_json() {
    let Statement::CreateIndex(index) = round_trip("CREATE INDEX i USING HASH ON t (a)") else {
        panic!("Expected CreateIndex");
    };
    assert_eq!(index.index_type, IndexType::Hash);
    assert_eq!(serde_json::to_value(index.index_type).unwrap(), "Hash");
}
