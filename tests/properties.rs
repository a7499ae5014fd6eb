//! Properties that should hold for every dialect.

use pretty_assertions::assert_eq;
use rusqlite::{types::Value, Connection};
use sqlbridge::{
    ast::{NullsPlacement, SortDirection},
    generate, parse, transpile, DialectId, GenerateOptions,
};

/// Statements that every dialect can represent.
const PORTABLE_SQL: &[&str] = &[
    "SELECT a, b AS c FROM t WHERE a > 1 ORDER BY a DESC, b",
    "SELECT LEAST(a, b), GREATEST(a), RANDOM() FROM t",
    "SELECT DATEDIFF(a, b, 'hour'), DATEDIFF(a, b) FROM t",
    "SELECT 0xCC",
    "SELECT 'it''s', -1.5e3, NULL, TRUE",
    "INSERT INTO t (a, b) VALUES (1, 'x'), (2, 'y')",
    "CREATE TABLE t (id INT PRIMARY KEY, name VARCHAR(20) NOT NULL, \
     FOREIGN KEY (id) REFERENCES u(id) ON DELETE CASCADE)",
    "CREATE TABLE z (a INT UNIQUE PRIMARY KEY AUTO_INCREMENT)",
    "SELECT a FROM t LEFT JOIN u ON t.id = u.id \
     WHERE b IS NOT NULL AND c IN (1, 2) GROUP BY a HAVING COUNT(*) > 1",
    "SELECT CASE WHEN a BETWEEN 1 AND 2 THEN 'x' ELSE 'y' END FROM t LIMIT 10 OFFSET 5",
    "WITH s AS (SELECT a FROM t) SELECT * FROM s UNION ALL SELECT a FROM u",
    "SELECT ROW_NUMBER() OVER (PARTITION BY a ORDER BY b DESC) AS n FROM t",
    "SELECT CAST(a AS DOUBLE), CAST(b AS DATETIME), my_udf(c) FROM t",
    "DELETE FROM t WHERE a NOT LIKE 'x%'",
    r"SELECT 'C:\new', 'a\_b', '50%', 'tab\t' FROM t",
    r"DELETE FROM t WHERE a LIKE '50\%' OR a LIKE 'x\_y\\'",
    "SELECT 0xABC, café, a$b FROM t",
];

fn options(pretty: bool) -> GenerateOptions {
    GenerateOptions {
        pretty,
        ..GenerateOptions::default()
    }
}

fn translate(sql: &str, read: DialectId, write: DialectId) -> String {
    match transpile(sql, read, write, options(false)) {
        Ok(statements) => statements.join(";\n"),
        Err(err) => {
            err.emit();
            panic!("could not translate {:?} from {} to {}", sql, read, write);
        }
    }
}

/// Parse `sql` in `dialect` and generate it again.
fn regenerate(sql: &str, dialect: DialectId, pretty: bool) -> String {
    let program = parse(sql, dialect).unwrap_or_else(|err| {
        err.emit();
        panic!("could not parse {} output {:?}", dialect, sql);
    });
    program
        .statements
        .iter()
        .map(|statement| generate(statement, dialect, options(pretty)).unwrap())
        .collect::<Vec<_>>()
        .join(";\n")
}

#[test]
fn generation_is_idempotent() {
    for &dialect in DialectId::ALL {
        for pretty in [false, true] {
            for sql in PORTABLE_SQL {
                let once = transpile(sql, DialectId::Generic, dialect, options(pretty))
                    .unwrap()
                    .join(";\n");
                let twice = regenerate(&once, dialect, pretty);
                assert_eq!(twice, once, "regenerating {} output of {:?}", dialect, sql);
            }
        }
    }
}

#[test]
fn datediff_expands_in_sqlite() {
    let cases = [
        ("day", "CAST((JULIANDAY(a) - JULIANDAY(b)) AS INTEGER)"),
        ("hour", "CAST((JULIANDAY(a) - JULIANDAY(b)) * 24.0 AS INTEGER)"),
        ("year", "CAST((JULIANDAY(a) - JULIANDAY(b)) / 365.0 AS INTEGER)"),
    ];
    for (unit, expected) in cases {
        let sql = format!("DATEDIFF(a,b,'{}')", unit);
        assert_eq!(translate(&sql, DialectId::Generic, DialectId::SQLite), expected);
    }
}

/// Decode a hex or decimal literal as written by one of our dialects.
fn decode_integer(literal: &str) -> u128 {
    match literal
        .strip_prefix("x'")
        .or_else(|| literal.strip_prefix("X'"))
    {
        Some(rest) => u128::from_str_radix(rest.trim_end_matches('\''), 16).unwrap(),
        None => literal.parse().unwrap(),
    }
}

#[test]
fn hex_literals_keep_their_value() {
    for &dialect in DialectId::ALL {
        let out = translate("SELECT 0xCC", DialectId::SQLite, dialect);
        let literal = out.strip_prefix("SELECT ").unwrap();
        assert_eq!(decode_integer(literal), 204, "{} wrote {:?}", dialect, out);
    }
}

#[test]
fn default_null_ordering_is_made_explicit() {
    for &read in DialectId::ALL {
        for &write in DialectId::ALL {
            let source_default = read.dialect().default_null_order(SortDirection::Desc);
            let target_default = write.dialect().default_null_order(SortDirection::Desc);
            let out = translate("SELECT a FROM t ORDER BY a DESC", read, write);
            if source_default == target_default {
                assert_eq!(out, "SELECT a FROM t ORDER BY a DESC");
            } else if write.dialect().nulls_clause {
                let keyword = match source_default {
                    NullsPlacement::First => "FIRST",
                    NullsPlacement::Last => "LAST",
                };
                assert_eq!(
                    out,
                    format!("SELECT a FROM t ORDER BY a DESC NULLS {}", keyword),
                    "{} to {}",
                    read,
                    write
                );
            } else {
                assert!(out.contains("CASE WHEN a IS NULL"), "{} to {}: {}", read, write, out);
            }
        }
    }
}

#[test]
fn repeated_foreign_keys_are_preserved() {
    let sql = "CREATE TABLE t (a INT, b INT, \
               FOREIGN KEY (a) REFERENCES x(id), \
               FOREIGN KEY (b) REFERENCES y(id), \
               FOREIGN KEY (a) REFERENCES z(id))";
    for &dialect in DialectId::ALL {
        let out = translate(sql, DialectId::Generic, dialect);
        assert_eq!(out.matches("FOREIGN KEY").count(), 3, "{}: {}", dialect, out);
        let x = out.find("REFERENCES x").unwrap();
        let y = out.find("REFERENCES y").unwrap();
        let z = out.find("REFERENCES z").unwrap();
        assert!(x < y && y < z, "{}: {}", dialect, out);

        // And back again.
        assert_eq!(
            translate(&out, dialect, DialectId::Generic),
            translate(sql, DialectId::Generic, DialectId::Generic)
        );
    }
}

#[test]
fn insert_or_ignore_is_unchanged_in_sqlite() {
    let sql = "INSERT OR IGNORE INTO foo (x, y) VALUES (1, 2)";
    assert_eq!(translate(sql, DialectId::SQLite, DialectId::SQLite), sql);
}

#[test]
fn min_depends_on_argument_count() {
    assert_eq!(translate("MIN(x)", DialectId::SQLite, DialectId::SQLite), "MIN(x)");
    for &dialect in DialectId::ALL {
        let expected = if dialect == DialectId::SQLite {
            "MIN(x, y, z)"
        } else {
            "LEAST(x, y, z)"
        };
        assert_eq!(translate("MIN(x, y, z)", DialectId::SQLite, dialect), expected);
        assert_eq!(translate("MIN(x)", DialectId::SQLite, dialect), "MIN(x)");
    }
}

/// Run `sql` in SQLite and return the first column of each row.
fn query_sqlite(conn: &Connection, sql: &str) -> Vec<Value> {
    let mut stmt = conn.prepare(sql).unwrap();
    let rows = stmt.query_map([], |row| row.get::<_, Value>(0)).unwrap();
    rows.collect::<Result<Vec<_>, _>>().unwrap()
}

#[test]
fn sqlite_output_executes() {
    let conn = Connection::open_in_memory().unwrap();
    let setup = transpile(
        "CREATE TABLE t (id INT PRIMARY KEY, a INT, d VARCHAR(10));
         INSERT INTO t (id, a, d) VALUES (1, 2, '2020-01-03'), (2, NULL, '2020-01-01'), (3, 1, '2020-01-02')",
        DialectId::Postgres,
        DialectId::SQLite,
        options(false),
    )
    .unwrap();
    for statement in setup {
        conn.execute(&statement, []).unwrap();
    }

    // Postgres sorts NULLs last when ascending.
    let sql = translate("SELECT a FROM t ORDER BY a", DialectId::Postgres, DialectId::SQLite);
    assert_eq!(
        query_sqlite(&conn, &sql),
        vec![Value::Integer(1), Value::Integer(2), Value::Null]
    );

    let sql = translate(
        "SELECT DATEDIFF('2020-01-03', '2020-01-01', 'hour')",
        DialectId::Generic,
        DialectId::SQLite,
    );
    assert_eq!(query_sqlite(&conn, &sql), vec![Value::Integer(48)]);

    let sql = translate("SELECT LEAST(3, 1, 2)", DialectId::Generic, DialectId::SQLite);
    assert_eq!(query_sqlite(&conn, &sql), vec![Value::Integer(1)]);

    let sql = translate("SELECT 0xCC", DialectId::Generic, DialectId::SQLite);
    assert_eq!(query_sqlite(&conn, &sql), vec![Value::Blob(vec![0xCC])]);
}
