//! Entry points that tie the tokenizer, parser and generator together.

use tracing::{debug, instrument};

use crate::{
    ast::{self, SqlProgram, Statement},
    dialects::DialectId,
    emit::{Emit, GenerateOptions, Generator},
    errors::Result,
    tokenizer::{tokenize_sql, TokenStream},
};

/// The name we use for SQL source in error messages.
const SOURCE_NAME: &str = "<input>";

/// Translate `sql` from the `read` dialect to the `write` dialect, returning
/// one string per statement.
#[instrument(level = "debug", skip(sql, options), fields(read = %read, write = %write))]
pub fn transpile(
    sql: &str,
    read: DialectId,
    write: DialectId,
    options: GenerateOptions,
) -> Result<Vec<String>> {
    let program = parse(sql, read)?;
    program
        .statements
        .iter()
        .map(|statement| generate(statement, write, options))
        .collect()
}

/// Tokenize `sql` using the lexical rules of `dialect`.
pub fn tokenize(sql: &str, dialect: DialectId) -> Result<TokenStream> {
    let tokens = tokenize_sql(SOURCE_NAME, sql, dialect.dialect())?;
    debug!(count = tokens.tokens().len(), "tokenized");
    Ok(tokens)
}

/// Parse `sql` as written in `dialect`. Fails on the first error.
#[instrument(level = "debug", skip(sql), fields(dialect = %dialect))]
pub fn parse(sql: &str, dialect: DialectId) -> Result<SqlProgram> {
    let program = ast::parse_sql(SOURCE_NAME, sql, dialect.dialect())?;
    debug!(statements = program.statements.len(), "parsed");
    Ok(program)
}

/// Parse each statement in `sql` independently, so that one bad statement
/// doesn't hide the others. Errors in tokenizing still fail the whole call,
/// because we can't find statement boundaries without tokens.
#[instrument(level = "debug", skip(sql), fields(dialect = %dialect))]
pub fn parse_each(sql: &str, dialect: DialectId) -> Result<Vec<Result<Statement>>> {
    let tokens = tokenize(sql, dialect)?;
    let statements = tokens
        .split_statements()
        .iter()
        .map(|statement| ast::parse_statement(SOURCE_NAME, sql, statement, dialect.dialect()))
        .collect::<Vec<_>>();
    debug!(
        statements = statements.len(),
        failed = statements.iter().filter(|s| s.is_err()).count(),
        "parsed statements independently"
    );
    Ok(statements)
}

/// Generate SQL for `node` in `dialect`.
#[instrument(level = "debug", skip(node, options), fields(dialect = %dialect))]
pub fn generate<T: Emit + ?Sized>(
    node: &T,
    dialect: DialectId,
    options: GenerateOptions,
) -> Result<String> {
    let mut generator = Generator::new(dialect.dialect(), options);
    node.emit(&mut generator)?;
    Ok(generator.finish())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::errors::{Error, SourceErrorKind};

    #[test]
    fn transpile_returns_one_string_per_statement() {
        let out = transpile(
            "SELECT 1; SELECT RANDOM();",
            DialectId::SQLite,
            DialectId::MySQL,
            GenerateOptions::default(),
        )
        .unwrap();
        assert_eq!(out, vec!["SELECT 1".to_owned(), "SELECT RAND()".to_owned()]);
    }

    #[test]
    fn parse_each_keeps_going_after_errors() {
        let results = parse_each("SELECT 1; SELECT FROM; SELECT 2", DialectId::Generic).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        let err = results[1].as_ref().unwrap_err();
        assert_eq!(err.source_error().map(|e| e.kind), Some(SourceErrorKind::Parse));
        assert!(results[2].is_ok());
    }

    #[test]
    fn lex_errors_fail_the_whole_call() {
        let err = parse_each("SELECT 1; SELECT 'oops", DialectId::Generic).unwrap_err();
        assert!(matches!(err, Error::Source(e) if e.kind == SourceErrorKind::Lex));
    }

    #[test]
    fn generate_works_on_any_node() {
        let program = parse("SELECT a + 1 FROM t", DialectId::Generic).unwrap();
        let sql = generate(&program, DialectId::Postgres, GenerateOptions::default()).unwrap();
        assert_eq!(sql, "SELECT a + 1 FROM t");
        let statement = &program.statements[0];
        let sql = generate(statement, DialectId::Spark, GenerateOptions::default()).unwrap();
        assert_eq!(sql, "SELECT a + 1 FROM t");
    }

    #[test]
    fn tokenize_counts_tokens() {
        let tokens = tokenize("SELECT a, b FROM t", DialectId::Generic).unwrap();
        assert_eq!(tokens.tokens().len(), 6);
    }
}
