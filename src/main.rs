use std::process::exit;

use clap::Parser;
use tracing::info_span;
use tracing_subscriber::{fmt, EnvFilter};

mod cmd;

use cmd::{
    parse::{cmd_parse, ParseOpt},
    sql_test::{cmd_sql_test, SqlTestOpt},
    transpile::{cmd_transpile, TranspileOpt},
};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
enum Opt {
    /// Parse SQL from a CSV file containing `id` and `query` columns.
    Parse(ParseOpt),
    /// Run SQL tests from a directory.
    SqlTest(SqlTestOpt),
    /// Transpile SQL from one dialect to another.
    Transpile(TranspileOpt),
}

fn main() {
    // Configure tracing. Our output goes to stdout, so logs go to stderr.
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let _span = info_span!("sqlbridge").entered();

    let opt = Opt::parse();
    let result = match opt {
        Opt::Parse(parse_opt) => cmd_parse(&parse_opt),
        Opt::SqlTest(sql_test_opt) => cmd_sql_test(&sql_test_opt),
        Opt::Transpile(transpile_opt) => cmd_transpile(&transpile_opt),
    };
    if let Err(e) = result {
        e.emit();
        exit(1);
    }
}
