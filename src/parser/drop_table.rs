//! `DROP TABLE`.

use super::StatementParser;
use crate::ast::{DropBehavior, DropTable};
use crate::errors::ParseError;
use crate::lexer::Keyword;

impl StatementParser<'_> {
    /// `DROP TABLE [IF EXISTS] ID ("," ID)* [RESTRICT|CASCADE]`
    pub(super) fn parse_drop_table(&mut self) -> Result<DropTable, ParseError> {
        self.expect_keyword(Keyword::Drop)?;
        self.expect_keyword(Keyword::Table)?;

        let if_exists = self.eat_keyword(Keyword::If)?;
        if if_exists {
            self.expect_keyword(Keyword::Exists)?;
        }

        let table_names = self.parse_comma_separated(Self::expect_identifier)?;

        let on_conflict = if self.eat_keyword(Keyword::Restrict)? {
            Some(DropBehavior::Restrict)
        } else if self.eat_keyword(Keyword::Cascade)? {
            Some(DropBehavior::Cascade)
        } else {
            None
        };

        Ok(DropTable {
            if_exists,
            table_names,
            on_conflict,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{DropBehavior, DropTable, Statement};
    use crate::errors::ParseError;
    use crate::parser::parse;

    fn drop_table(sql: &str) -> DropTable {
        match parse(sql).unwrap() {
            Statement::DropTable(drop) => drop,
            other => panic!("Expected DropTable, got {other:?}"),
        }
    }

    #[test]
    fn test_drop_if_exists_cascade() {
        let drop = drop_table("DROP TABLE IF EXISTS x, y CASCADE");
        assert!(drop.if_exists);
        assert_eq!(drop.table_names, ["x", "y"]);
        assert_eq!(drop.on_conflict, Some(DropBehavior::Cascade));
    }

    #[test]
    fn test_drop_single_table() {
        let drop = drop_table("drop table `user`;");
        assert!(!drop.if_exists);
        assert_eq!(drop.table_names, ["user"]);
        assert_eq!(drop.on_conflict, None);
    }

    #[test]
    fn test_drop_restrict() {
        let drop = drop_table("DROP TABLE a RESTRICT");
        assert_eq!(drop.on_conflict, Some(DropBehavior::Restrict));
    }

    #[test]
    fn test_drop_requires_table_name() {
        let err = parse("DROP TABLE IF EXISTS").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { ref expected, .. } if expected == &["identifier"]
        ));
    }

    #[test]
    fn test_drop_dangling_comma() {
        assert!(parse("DROP TABLE a,").is_err());
    }
}
