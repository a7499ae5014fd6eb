//! Translate SQL between dialects.
//!
//! SQL is tokenized and parsed using the rules of a source dialect into a
//! dialect-neutral AST, which is then written out using the rules of a target
//! dialect. See [`transpile`] for the main entry point.
//!
//! ```
//! use sqlbridge::{transpile, DialectId, GenerateOptions};
//!
//! let sql = transpile(
//!     "SELECT LEAST(a, b) FROM t",
//!     DialectId::Generic,
//!     DialectId::SQLite,
//!     GenerateOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(sql, vec!["SELECT MIN(a, b) FROM t"]);
//! ```

pub mod analyze;
pub mod ast;
pub mod dialects;
pub mod emit;
pub mod errors;
pub mod tokenizer;
pub mod transpile;
mod util;

pub use dialects::DialectId;
pub use emit::{Emit, GenerateOptions};
pub use errors::{Error, Result};
pub use transpile::{generate, parse, parse_each, tokenize, transpile};
