//! Grammar-shaped fuzzer for the DDL parser.
//!
//! Builds a statement from a valid head followed by tokens drawn from the
//! grammar's vocabulary, so that inputs reach the rules behind the first
//! keyword far more often than raw bytes do.

use honggfuzz::fuzz;
use mysql_ddl_rs::testing::{FuzzStatement, test_parse_deterministic};

fn main() {
    loop {
        fuzz!(|statement: FuzzStatement| {
            test_parse_deterministic(&statement.render());
        });
    }
}
