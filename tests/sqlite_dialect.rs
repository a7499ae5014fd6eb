//! Reading and writing SQLite, and translating between SQLite and the other
//! dialects.

use pretty_assertions::assert_eq;
use sqlbridge::{transpile, DialectId, GenerateOptions};

const SQLITE: DialectId = DialectId::SQLite;

/// Translate a single statement, panicking with a diagnostic on failure.
fn translate(sql: &str, read: DialectId, write: DialectId, pretty: bool) -> String {
    let options = GenerateOptions {
        pretty,
        ..GenerateOptions::default()
    };
    match transpile(sql, read, write, options) {
        Ok(mut statements) => {
            assert_eq!(statements.len(), 1, "expected one statement in {:?}", sql);
            statements.remove(0)
        }
        Err(err) => {
            err.emit();
            panic!("could not translate {:?} from {} to {}", sql, read, write);
        }
    }
}

/// SQLite `sql` reads and writes unchanged.
fn validate_identity(sql: &str) {
    assert_eq!(translate(sql, SQLITE, SQLITE, false), sql);
}

/// SQLite `sql` is read from each `(dialect, source)` pair, and written as
/// each `(dialect, expected)` pair.
fn validate_all(sql: &str, read: &[(DialectId, &str)], write: &[(DialectId, &str)]) {
    for &(dialect, source) in read {
        assert_eq!(
            translate(source, dialect, SQLITE, false),
            sql,
            "reading {} {:?}",
            dialect,
            source
        );
    }
    for &(dialect, expected) in write {
        assert_eq!(
            translate(sql, SQLITE, dialect, false),
            expected,
            "writing {} {:?}",
            dialect,
            sql
        );
    }
}

#[test]
fn insert_conflict_actions() {
    for action in ["ABORT", "FAIL", "IGNORE", "REPLACE", "ROLLBACK"] {
        validate_identity(&format!(
            "INSERT OR {} INTO foo (x, y) VALUES (1, 2)",
            action
        ));
    }
}

#[test]
fn primary_key_ordering() {
    validate_all(
        "CREATE TABLE foo (id INTEGER PRIMARY KEY ASC)",
        &[],
        &[(SQLITE, "CREATE TABLE foo (id INTEGER PRIMARY KEY ASC)")],
    );
}

#[test]
fn repeated_foreign_keys() {
    let sql = r#"
        CREATE TABLE "Track"
        (
            CONSTRAINT "PK_Track" FOREIGN KEY ("TrackId"),
            FOREIGN KEY ("AlbumId") REFERENCES "Album" ("AlbumId")
                ON DELETE NO ACTION ON UPDATE NO ACTION,
            FOREIGN KEY ("AlbumId") ON DELETE CASCADE ON UPDATE RESTRICT,
            FOREIGN KEY ("AlbumId") ON DELETE SET NULL ON UPDATE SET DEFAULT
        )
    "#;
    assert_eq!(
        translate(sql, SQLITE, SQLITE, true),
        r#"CREATE TABLE "Track" (
  CONSTRAINT "PK_Track" FOREIGN KEY ("TrackId"),
  FOREIGN KEY ("AlbumId") REFERENCES "Album"("AlbumId") ON DELETE NO ACTION ON UPDATE NO ACTION,
  FOREIGN KEY ("AlbumId") ON DELETE CASCADE ON UPDATE RESTRICT,
  FOREIGN KEY ("AlbumId") ON DELETE SET NULL ON UPDATE SET DEFAULT
)"#
    );
}

#[test]
fn autoincrement() {
    validate_all(
        "CREATE TABLE z (a INTEGER UNIQUE PRIMARY KEY AUTOINCREMENT)",
        &[(
            DialectId::MySQL,
            "CREATE TABLE z (a INT UNIQUE PRIMARY KEY AUTO_INCREMENT)",
        )],
        &[
            (
                SQLITE,
                "CREATE TABLE z (a INTEGER UNIQUE PRIMARY KEY AUTOINCREMENT)",
            ),
            (
                DialectId::MySQL,
                "CREATE TABLE z (a INT UNIQUE PRIMARY KEY AUTO_INCREMENT)",
            ),
            (
                DialectId::Postgres,
                "CREATE TABLE z (a INT GENERATED BY DEFAULT AS IDENTITY NOT NULL UNIQUE PRIMARY KEY)",
            ),
        ],
    );
}

#[test]
fn character_types_keep_their_length() {
    validate_all(
        r#"CREATE TABLE "x" ("Name" NVARCHAR(200) NOT NULL)"#,
        &[],
        &[
            (SQLITE, r#"CREATE TABLE "x" ("Name" TEXT(200) NOT NULL)"#),
            (
                DialectId::MySQL,
                "CREATE TABLE `x` (`Name` VARCHAR(200) NOT NULL)",
            ),
        ],
    );
}

#[test]
fn current_date_and_time() {
    for keyword in ["CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP"] {
        validate_all(
            keyword,
            &[
                (DialectId::Generic, keyword),
                (DialectId::Snowflake, &format!("{}()", keyword)),
            ],
            &[],
        );
    }
}

#[test]
fn casts_to_date_become_functions() {
    validate_all(
        "SELECT DATE('2020-01-01 16:03:05')",
        &[(
            DialectId::Snowflake,
            "SELECT CAST('2020-01-01 16:03:05' AS DATE)",
        )],
        &[],
    );
}

#[test]
fn bracket_quotes_and_small_integers() {
    validate_all(
        "SELECT CAST([a].[b] AS SMALLINT) FROM foo",
        &[],
        &[
            (SQLITE, r#"SELECT CAST("a"."b" AS INTEGER) FROM foo"#),
            (DialectId::Spark, "SELECT CAST(`a`.`b` AS SHORT) FROM foo"),
        ],
    );
}

#[test]
fn edit_distance() {
    validate_all(
        "EDITDIST3(col1, col2)",
        &[
            (SQLITE, "EDITDIST3(col1, col2)"),
            (DialectId::Spark, "LEVENSHTEIN(col1, col2)"),
        ],
        &[
            (SQLITE, "EDITDIST3(col1, col2)"),
            (DialectId::Spark, "LEVENSHTEIN(col1, col2)"),
        ],
    );
}

#[test]
fn explicit_null_ordering() {
    validate_all(
        "SELECT fname, lname, age FROM person ORDER BY age DESC NULLS FIRST, fname ASC NULLS LAST, lname",
        &[],
        &[
            (
                DialectId::Spark,
                "SELECT fname, lname, age FROM person ORDER BY age DESC NULLS FIRST, fname NULLS LAST, lname",
            ),
            (
                SQLITE,
                "SELECT fname, lname, age FROM person ORDER BY age DESC NULLS FIRST, fname NULLS LAST, lname",
            ),
        ],
    );
}

#[test]
fn least_and_min() {
    validate_all("x", &[(DialectId::Snowflake, "LEAST(x)")], &[]);
    validate_all(
        "MIN(x)",
        &[(DialectId::Snowflake, "MIN(x)")],
        &[(DialectId::Snowflake, "MIN(x)")],
    );
    validate_all(
        "MIN(x, y, z)",
        &[(DialectId::Snowflake, "LEAST(x, y, z)")],
        &[(DialectId::Snowflake, "LEAST(x, y, z)")],
    );
}

#[test]
fn datediff() {
    validate_all(
        "DATEDIFF(a, b, 'day')",
        &[],
        &[(SQLITE, "CAST((JULIANDAY(a) - JULIANDAY(b)) AS INTEGER)")],
    );
    validate_all(
        "DATEDIFF(a, b, 'hour')",
        &[],
        &[(SQLITE, "CAST((JULIANDAY(a) - JULIANDAY(b)) * 24.0 AS INTEGER)")],
    );
    validate_all(
        "DATEDIFF(a, b, 'year')",
        &[],
        &[(SQLITE, "CAST((JULIANDAY(a) - JULIANDAY(b)) / 365.0 AS INTEGER)")],
    );
}

#[test]
fn hexadecimal_literal() {
    validate_all(
        "SELECT 0XCC",
        &[],
        &[(SQLITE, "SELECT x'CC'"), (DialectId::MySQL, "SELECT x'CC'")],
    );
}

#[test]
fn window_functions() {
    validate_all(
        "SELECT FIRST_VALUE(Name) OVER (PARTITION BY AlbumId ORDER BY Bytes DESC) AS LargestTrack FROM tracks",
        &[],
        &[(
            SQLITE,
            "SELECT FIRST_VALUE(Name) OVER (PARTITION BY AlbumId ORDER BY Bytes DESC) AS LargestTrack FROM tracks",
        )],
    );
}

#[test]
fn longvarchar() {
    validate_all(
        "CREATE TABLE foo (bar LONGVARCHAR)",
        &[],
        &[(SQLITE, "CREATE TABLE foo (bar TEXT)")],
    );
}
