//! Various routines to analyze an [`SqlProgram`]. We rely heavily on
//! [`derive_visitor`] to traverse the AST.

use std::collections::HashMap;

use derive_visitor::{Drive, Visitor};

use crate::ast::{DateDiff, FunctionCall, FunctionName, SqlProgram};

/// A `phf` set of functions that are known to take any number of arguments.
static KNOWN_VARARG_FUNCTIONS: phf::Set<&'static str> = phf::phf_set! {
    "COALESCE", "CONCAT", "GREATEST", "LEAST",
};

/// Count all the function calls in a [`SqlProgram`].
#[derive(Debug, Default, Visitor)]
#[visitor(FunctionCall(enter), DateDiff(enter))]
pub struct FunctionCallCounts {
    counts: HashMap<String, usize>,
}

impl FunctionCallCounts {
    /// Find all the function calls in a [`SqlProgram`].
    pub fn visit(&mut self, sql_program: &SqlProgram) {
        sql_program.drive(self)
    }

    fn record_call(&mut self, name: String) {
        let count = self.counts.entry(name).or_default();
        *count += 1;
    }

    fn enter_function_call(&mut self, function_call: &FunctionCall) {
        let base_name = match &function_call.name {
            FunctionName::Known(known) => known.canonical_name().to_owned(),
            FunctionName::Other(name) => name
                .parts
                .iter()
                .map(|part| part.name.to_ascii_uppercase())
                .collect::<Vec<_>>()
                .join("."),
        };
        let mut name = format!("{}(", base_name);
        if function_call.star {
            name.push('*');
        } else if KNOWN_VARARG_FUNCTIONS.contains(base_name.as_str()) {
            name.push_str("..");
        } else {
            // Push '_' separated by ','.
            for i in 0..function_call.args.len() {
                if i > 0 {
                    name.push(',');
                }
                name.push('_');
            }
        }
        name.push(')');
        if function_call.over.is_some() {
            name.push_str(" OVER(..)");
        }
        self.record_call(name);
    }

    fn enter_date_diff(&mut self, date_diff: &DateDiff) {
        self.record_call(format!("DATEDIFF(_,_,{})", date_diff.unit.keyword()));
    }

    /// Get a list of functions and how often they were called, sorted by
    /// decreasing frequency. Ties are sorted by name.
    pub fn counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<_> = self.counts.iter().map(|(f, c)| (f.as_str(), *c)).collect();
        counts.sort_by(|(f1, c1), (f2, c2)| c2.cmp(c1).then_with(|| f1.cmp(f2)));
        counts
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ast::parse_sql, dialects::DialectId};

    #[test]
    fn count_function_calls() {
        let program = parse_sql(
            "test.sql",
            "SELECT COUNT(*), MIN(a), MIN(a, b), coalesce(a, b, c), \
             ROW_NUMBER() OVER (ORDER BY a), DATEDIFF(a, b, 'hour') \
             FROM t WHERE lower(name) = lower('X')",
            DialectId::SQLite.dialect(),
        )
        .unwrap();
        let mut counts = FunctionCallCounts::default();
        counts.visit(&program);
        assert_eq!(
            counts.counts(),
            vec![
                ("LOWER(_)", 2),
                ("COALESCE(..)", 1),
                ("COUNT(*)", 1),
                ("DATEDIFF(_,_,HOUR)", 1),
                ("LEAST(..)", 1),
                ("MIN(_)", 1),
                ("ROW_NUMBER() OVER(..)", 1),
            ]
        );
    }
}
