//! Transpile code to another dialect of SQL.

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use clap::Parser;
use tracing::instrument;

use sqlbridge::{
    errors::{Context, Result},
    transpile, DialectId, GenerateOptions,
};

/// Transpile SQL from one dialect to another.
#[derive(Debug, Parser)]
pub struct TranspileOpt {
    /// An SQL file to transpile. Reads standard input if omitted.
    sql_path: Option<PathBuf>,

    /// The dialect to read.
    #[clap(long, short = 'r', default_value_t)]
    read: DialectId,

    /// The dialect to write.
    #[clap(long, short = 'w', default_value_t)]
    write: DialectId,

    /// Write one clause per line, with indentation.
    #[clap(long)]
    pretty: bool,

    /// Quote every identifier.
    #[clap(long)]
    identify: bool,

    /// Case-fold unquoted identifiers the way the target dialect does.
    #[clap(long)]
    normalize: bool,
}

/// Transpile a file (or standard input) and print the result.
#[instrument(skip(opt))]
pub fn cmd_transpile(opt: &TranspileOpt) -> Result<()> {
    let sql = match &opt.sql_path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read SQL file: {}", path.display()))?,
        None => {
            let mut sql = String::new();
            io::stdin()
                .read_to_string(&mut sql)
                .context("Failed to read SQL from standard input")?;
            sql
        }
    };

    let options = GenerateOptions {
        pretty: opt.pretty,
        identify: opt.identify,
        normalize: opt.normalize,
    };
    for statement in transpile(&sql, opt.read, opt.write, options)? {
        println!("{};", statement);
    }
    Ok(())
}
