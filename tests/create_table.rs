//! Integration tests for `CREATE TABLE` parsing.
//!
//! These tests go through the public entry points only: the free `parse`
//! function, `Parser::parse` and `str::parse::<Statement>()`.

use mysql_ddl_rs::{
    ColumnDefinition, CreateDefinition, CreateTable, DataType, DataTypeKind, IndexType, Literal,
    ParseError, Parser, ReferenceOption, Statement, parse,
};

fn create_table(sql: &str) -> CreateTable {
    match parse(sql).expect("Failed to parse SQL") {
        Statement::CreateTable(create) => create,
        other => panic!("Expected CreateTable, got {other:?}"),
    }
}

fn column(definition: &CreateDefinition) -> &ColumnDefinition {
    match definition {
        CreateDefinition::Column(column) => column,
        other => panic!("Expected a column, got {other:?}"),
    }
}

// =============================================================================
// Statement shape
// =============================================================================

#[test]
fn test_columns_and_primary_key() {
    let create = create_table("CREATE TABLE a (num INT, name TEXT(20), PRIMARY KEY (num))");

    assert!(!create.if_not_exists);
    assert_eq!(create.table_name, "a");
    assert_eq!(create.definitions.len(), 3);

    let num = column(&create.definitions[0]);
    assert_eq!(num.name, "num");
    assert_eq!(num.data_type, DataType::Int);

    let name = column(&create.definitions[1]);
    assert_eq!(name.name, "name");
    assert_eq!(name.data_type.kind(), DataTypeKind::Text);
    assert_eq!(name.data_type.length(), Some(20));

    let CreateDefinition::PrimaryKey(primary_key) = &create.definitions[2] else {
        panic!("Expected PrimaryKey");
    };
    assert_eq!(primary_key.index_type, IndexType::Btree);
    assert_eq!(primary_key.columns.len(), 1);
    assert_eq!(primary_key.columns[0].name, "num");
}

#[test]
fn test_if_not_exists_and_auto_increment() {
    let create = create_table("CREATE TABLE IF NOT EXISTS t (id INT AUTO_INCREMENT)");

    assert!(create.if_not_exists);
    let id = create.column("id").unwrap();
    assert!(id.auto_increment);
    assert!(id.allow_null);
}

#[test]
fn test_missing_table_name() {
    let err = parse("CREATE TABLE (id INT)").unwrap_err();

    let ParseError::UnexpectedToken {
        expected,
        found,
        position,
    } = err
    else {
        panic!("Expected UnexpectedToken");
    };
    assert_eq!(expected, ["identifier"]);
    assert_eq!(found, "`(`");
    assert_eq!((position.line, position.column), (1, 14));
}

#[test]
fn test_definitions_keep_source_order() {
    let create = create_table(
        "CREATE TABLE t (
            UNIQUE (b),
            a INT,
            FOREIGN KEY (a) REFERENCES o (id),
            b INT,
            PRIMARY KEY (a)
        )",
    );

    let kinds: Vec<&str> = create
        .definitions
        .iter()
        .map(|definition| match definition {
            CreateDefinition::Column(_) => "column",
            CreateDefinition::PrimaryKey(_) => "primary key",
            CreateDefinition::Unique(_) => "unique",
            CreateDefinition::ForeignKey(_) => "foreign key",
        })
        .collect();
    assert_eq!(
        kinds,
        ["unique", "column", "foreign key", "column", "primary key"]
    );
}

// =============================================================================
// Defaults and literals
// =============================================================================

#[test]
fn test_absent_clauses_use_defaults() {
    let create = create_table(
        "CREATE TABLE t (a INT, UNIQUE (a), FOREIGN KEY (a) REFERENCES o (id))",
    );

    let a = create.column("a").unwrap();
    assert!(a.allow_null);
    assert_eq!(a.default, None);
    assert!(!a.auto_increment);
    assert_eq!(a.data_type.precision(), None);
    assert_eq!(a.data_type.length(), None);

    let CreateDefinition::Unique(unique) = &create.definitions[1] else {
        panic!("Expected Unique");
    };
    assert_eq!(unique.index_name, None);
    assert_eq!(unique.index_type, IndexType::Btree);

    let CreateDefinition::ForeignKey(foreign_key) = &create.definitions[2] else {
        panic!("Expected ForeignKey");
    };
    assert_eq!(foreign_key.reference.on_delete, None);
    assert_eq!(foreign_key.reference.on_update, None);
}

#[test]
fn test_default_literals() {
    let create = create_table(
        "CREATE TABLE t (a INT DEFAULT 0, b TEXT DEFAULT \"it's\", c TEXT NOT NULL DEFAULT '')",
    );

    assert_eq!(create.column("a").unwrap().default, Some(Literal::Integer(0)));
    assert_eq!(
        create.column("b").unwrap().default,
        Some(Literal::String("it's".to_string()))
    );
    let c = create.column("c").unwrap();
    assert!(!c.allow_null);
    assert_eq!(c.default, Some(Literal::String(String::new())));
}

#[test]
fn test_default_must_be_string_or_number() {
    for sql in [
        "CREATE TABLE t (a INT DEFAULT true)",
        "CREATE TABLE t (a INT DEFAULT NULL)",
        "CREATE TABLE t (a INT DEFAULT (1))",
    ] {
        let err = parse(sql).unwrap_err();
        assert!(
            matches!(
                &err,
                ParseError::UnexpectedToken { expected, .. } if expected == &["string", "number"]
            ),
            "{sql}: {err}"
        );
    }
}

#[test]
fn test_enum_values_are_unquoted() {
    let create = create_table("CREATE TABLE t (size ENUM('S', 'M', 'L') NOT NULL DEFAULT 'M')");

    let size = create.column("size").unwrap();
    assert_eq!(size.data_type.kind(), DataTypeKind::Enum);
    assert_eq!(size.data_type.enum_values().unwrap(), ["S", "M", "L"]);
    assert_eq!(size.default, Some(Literal::String("M".to_string())));
}

#[test]
fn test_doubled_quotes_in_enum_values() {
    let create = create_table("CREATE TABLE t (q SET('it''s', 'plain'))");
    assert_eq!(
        create.column("q").unwrap().data_type.enum_values().unwrap(),
        ["it's", "plain"]
    );
}

#[test]
fn test_backslash_escaped_quotes() {
    let create = create_table(
        r#"CREATE TABLE t (a TEXT DEFAULT "a\"b", b TEXT DEFAULT 'it\'s', c ENUM('x\ty'))"#,
    );

    assert_eq!(
        create.column("a").unwrap().default,
        Some(Literal::String("a\"b".to_string()))
    );
    assert_eq!(
        create.column("b").unwrap().default,
        Some(Literal::String("it's".to_string()))
    );
    assert_eq!(
        create.column("c").unwrap().data_type.enum_values().unwrap(),
        ["x\ty"]
    );
}

// =============================================================================
// Foreign keys
// =============================================================================

#[test]
fn test_foreign_key_reference() {
    let create = create_table(
        "CREATE TABLE orders (
            customer_id INT,
            FOREIGN KEY fk_customer (customer_id)
                REFERENCES customers (id)
                ON DELETE NO ACTION
                ON UPDATE SET DEFAULT
        )",
    );

    let CreateDefinition::ForeignKey(foreign_key) = &create.definitions[1] else {
        panic!("Expected ForeignKey");
    };
    assert_eq!(foreign_key.index_name.as_ref().unwrap(), "fk_customer");
    assert_eq!(foreign_key.columns[0].name, "customer_id");
    assert_eq!(foreign_key.reference.table_name, "customers");
    assert_eq!(foreign_key.reference.columns[0].name, "id");
    assert_eq!(
        foreign_key.reference.on_delete,
        Some(ReferenceOption::NoAction)
    );
    assert_eq!(
        foreign_key.reference.on_update,
        Some(ReferenceOption::SetDefault)
    );
}

#[test]
fn test_on_update_before_on_delete_rejected() {
    assert!(
        parse("CREATE TABLE t (a INT, FOREIGN KEY (a) REFERENCES o (id) ON UPDATE CASCADE ON DELETE CASCADE)")
            .is_err()
    );
}

// =============================================================================
// Entry points and lexical details
// =============================================================================

#[test]
fn test_entry_points_agree() {
    let sql = "create table `Users` (`id` int, -- primary\n name text /* inline */)";

    let from_fn = parse(sql).unwrap();
    let from_parser = Parser::new().parse(sql).unwrap();
    let from_str: Statement = sql.parse().unwrap();

    assert_eq!(from_fn, from_parser);
    assert_eq!(from_fn, from_str);

    let Statement::CreateTable(create) = from_fn else {
        panic!("Expected CreateTable");
    };
    assert_eq!(create.table_name, "Users");
    assert_eq!(create.columns().count(), 2);
}

#[test]
fn test_keywords_are_case_insensitive() {
    let upper = parse("CREATE TABLE t (a INT NOT NULL)").unwrap();
    let mixed = parse("Create Table t (a Int Not Null)").unwrap();
    assert_eq!(upper, mixed);
}

#[test]
fn test_error_position_on_later_line() {
    let err = parse("CREATE TABLE t (\n  a INT,\n  b VARCHAR(10)\n)").unwrap_err();
    let position = err.position();
    assert_eq!(position.line, 3);
    assert_eq!(position.column, 5);
    assert!(err.to_string().contains("line 3, column 5"));
}

#[test]
fn test_empty_body_rejected() {
    assert!(parse("CREATE TABLE t ()").is_err());
}

#[test]
fn test_unterminated_string() {
    let err = parse("CREATE TABLE t (a TEXT DEFAULT 'abc)").unwrap_err();
    assert!(matches!(err, ParseError::Lexer(_)));
    assert_eq!(err.position().column, 32);
}
