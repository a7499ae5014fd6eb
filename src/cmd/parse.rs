//! Parse queries from a CSV file.

use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use sqlbridge::{
    analyze::FunctionCallCounts,
    ast,
    errors::{Context, Result},
    DialectId,
};

/// Parse SQL from a CSV file containing `id` and `query` columns.
#[derive(Debug, Parser)]
pub struct ParseOpt {
    /// The CSV file to read.
    csv_path: PathBuf,

    /// The dialect the queries are written in.
    #[clap(long, short = 'd', default_value_t)]
    dialect: DialectId,

    /// Print the AST of each query as JSON.
    #[clap(long)]
    json: bool,

    /// Count how often each function is called.
    #[clap(long)]
    count_function_calls: bool,
}

/// A row in our CSV file.
#[derive(Debug, Deserialize)]
struct Row {
    /// Query ID.
    id: String,
    /// Query text.
    query: String,
}

/// Parse queries from a CSV file.
pub fn cmd_parse(opt: &ParseOpt) -> Result<()> {
    let csv_path = &opt.csv_path;

    // Keep track of how many rows we've processed and how many queries we've
    // successfully parsed.
    let mut row_count = 0;
    let mut ok_count = 0;

    // We can optionally count function calls.
    let mut function_call_counts = FunctionCallCounts::default();

    // Read CSV file.
    let mut rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;
    for result in rdr.deserialize() {
        let row: Row =
            result.with_context(|| format!("Failed to parse CSV file: {}", csv_path.display()))?;
        row_count += 1;

        // Parse query.
        match ast::parse_sql(&row.id, &row.query, opt.dialect.dialect()) {
            Ok(sql_program) => {
                ok_count += 1;
                println!("OK {}", row.id);
                if opt.json {
                    let json = serde_json::to_string_pretty(&sql_program)
                        .with_context(|| format!("Failed to serialize AST for {}", row.id))?;
                    println!("{}", json);
                }
                if opt.count_function_calls {
                    function_call_counts.visit(&sql_program);
                }
            }
            Err(e) => {
                println!("ERR {}", row.id);
                e.emit();
            }
        }
    }

    println!("Parsed {} of {} queries", ok_count, row_count);

    if opt.count_function_calls {
        println!();
        println!("Function call counts:");
        for (function_name, count) in function_call_counts.counts() {
            println!("  {:>5} {}", count, function_name);
        }
    }

    Ok(())
}
