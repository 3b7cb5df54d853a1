//! Raw text fuzzer for the DDL parser.
//!
//! Feeds arbitrary UTF-8 strings to the parser and checks that parsing never
//! panics, is deterministic and reports error positions inside the input.

use honggfuzz::fuzz;
use mysql_ddl_rs::testing::test_parse_deterministic;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok(sql) = std::str::from_utf8(data) {
                test_parse_deterministic(sql);
            }
        });
    }
}
