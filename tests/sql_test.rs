use cli_test_dir::*;

#[test]
fn run_sql_tests() {
    let testdir = TestDir::new("sqlbridge", "run_sql_tests");
    let sql_test_dir = testdir.src_path("tests/sql/");
    testdir
        .cmd()
        .arg("sql-test")
        .arg(&sql_test_dir)
        .expect_success();
}

#[test]
fn transpile_a_file() {
    let testdir = TestDir::new("sqlbridge", "transpile_a_file");
    testdir.create_file("input.sql", "SELECT LEAST(a, b) FROM t; SELECT 0xCC\n");
    let output = testdir
        .cmd()
        .args(["transpile", "--write", "sqlite", "input.sql"])
        .expect_success();
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "SELECT MIN(a, b) FROM t;\nSELECT x'CC';\n"
    );
}

#[test]
fn transpile_reports_parse_errors() {
    let testdir = TestDir::new("sqlbridge", "transpile_reports_parse_errors");
    testdir.create_file("input.sql", "SELECT FROM WHERE\n");
    testdir
        .cmd()
        .args(["transpile", "input.sql"])
        .expect_failure();
}

#[test]
fn parse_a_csv_file() {
    let testdir = TestDir::new("sqlbridge", "parse_a_csv_file");
    testdir.create_file(
        "queries.csv",
        "id,query\nq1,SELECT COUNT(*) FROM t\nq2,SELECT FROM\nq3,\"SELECT COUNT(a), LEAST(a, b) FROM t\"\n",
    );
    let output = testdir
        .cmd()
        .args(["parse", "--count-function-calls", "queries.csv"])
        .expect_success();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("OK q1\n"));
    assert!(stdout.contains("ERR q2\n"));
    assert!(stdout.contains("Parsed 2 of 3 queries\n"));
    assert!(stdout.contains("      1 COUNT(*)\n"));
    assert!(stdout.contains("      1 LEAST(..)\n"));
}
