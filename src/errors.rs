// Our basic error type.

use std::{error, fmt, result};

use codespan_reporting::{
    diagnostic::{Diagnostic, Label},
    files::SimpleFile,
    term::{
        self,
        termcolor::{ColorChoice, StandardStream},
    },
};
use thiserror::Error;

use crate::dialects::DialectId;

/// Our standard result type.
pub type Result<T, E = Error> = result::Result<T, E>;

/// Our standard error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An error occurred in SQL source code supplied by the user, either while
    /// tokenizing or while parsing.
    Source(#[from] Box<SourceError>),

    /// The AST contains something we don't know how to write in the target
    /// dialect.
    Unsupported {
        dialect: DialectId,
        construct: String,
    },

    /// An internal invariant was violated while generating SQL.
    Generation(String),

    /// The caller asked for a dialect we don't know about.
    UnknownDialect(String),

    /// An error with extra context. We may replace this with more specific
    /// errors later.
    Context {
        context: String,
        #[source]
        source: Box<Error>,
    },

    /// An unknown error occurred.
    Other(#[source] Box<dyn error::Error + Send + Sync + 'static>),
}

impl Error {
    /// Create a new `Error::Unsupported`.
    pub fn unsupported(dialect: DialectId, construct: impl Into<String>) -> Self {
        Error::Unsupported {
            dialect,
            construct: construct.into(),
        }
    }

    /// Create a new `Error::Generation`.
    pub fn generation(message: impl Into<String>) -> Self {
        Error::Generation(message.into())
    }

    /// Create a new `Error::Other` from an error value.
    pub fn other<E>(e: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        Error::Other(Box::<E>::new(e))
    }

    /// If this error points at a location in the SQL source, return it.
    pub fn source_error(&self) -> Option<&SourceError> {
        match self {
            Error::Source(e) => Some(e),
            _ => None,
        }
    }

    /// Emit this error to stderr. This does extra formatting for `SourceError`,
    /// with colors and source code snippets.
    pub fn emit(&self) {
        match self {
            Error::Source(e) => {
                e.emit();
            }
            _ => {
                let next = self.skip_transparent();
                eprintln!("ERROR: {}", next);
                let mut source = next.source();
                while let Some(cause) = source {
                    eprintln!("  caused by: {}", cause);
                    source = cause.source();
                }
            }
        }
    }

    /// Skip "transparent" errors, like `Source` and `Other`.
    pub fn skip_transparent(&self) -> &(dyn error::Error + 'static) {
        match self {
            Error::Source(e) => e.as_ref(),
            Error::Other(e) => e.as_ref(),
            Error::Unsupported { .. }
            | Error::Generation(_)
            | Error::UnknownDialect(_)
            | Error::Context { .. } => self,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // We include transparent errors here, in case someone prints them
        // without a full chain.
        match self {
            Error::Source(e) => write!(f, "{}", e),
            Error::Unsupported { dialect, construct } => {
                write!(f, "cannot write {} in {} SQL", construct, dialect)
            }
            Error::Generation(message) => write!(f, "SQL generation failed: {}", message),
            Error::UnknownDialect(name) => write!(f, "unknown SQL dialect: {:?}", name),
            Error::Context { context, source } => write!(f, "{}: {}", context, source),
            Error::Other(e) => write!(f, "{}", e),
        }
    }
}

/// Format an error message.
#[macro_export]
macro_rules! format_err {
    ($($arg:tt)*) => {
        $crate::errors::Error::Other(format!($($arg)*).into())
    };
}

// Make `format_err!` available as `errors::format_err`, too.
pub use crate::format_err;

/// Helper trait used to attach a message to an error.
pub trait Context<T, E>: Sized {
    fn with_context<S, F>(self, context_fn: F) -> Result<T>
    where
        S: Into<String>,
        F: FnOnce() -> S,
    {
        self.context(context_fn())
    }

    fn context<S>(self, context: S) -> Result<T>
    where
        S: Into<String>;
}

impl<T, E> Context<T, E> for Result<T, E>
where
    E: error::Error + Send + Sync + 'static,
{
    fn context<S>(self, context: S) -> Result<T>
    where
        S: Into<String>,
    {
        self.map_err(|e| Error::Context {
            context: context.into(),
            source: Box::new(Error::other(e)),
        })
    }
}

/// Which stage rejected the SQL source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// An unterminated string, identifier or comment.
    Lex,
    /// No grammar rule matched.
    Parse,
}

/// An error at a specific location in SQL source code.
#[derive(Debug)]
pub struct SourceError {
    pub kind: SourceErrorKind,
    /// Byte offset of the offending token.
    pub offset: usize,
    /// The tokens we would have accepted, sorted and deduplicated.
    pub expected: Vec<String>,
    pub files: SimpleFile<String, String>,
    pub diagnostic: Diagnostic<()>,
}

impl SourceError {
    /// Build a new error and its diagnostic.
    pub fn new(
        kind: SourceErrorKind,
        filename: &str,
        sql: &str,
        offset: usize,
        expected: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut expected = expected.into_iter().collect::<Vec<_>>();
        expected.sort();
        expected.dedup();

        let message = match kind {
            SourceErrorKind::Lex => "Failed to tokenize SQL",
            SourceErrorKind::Parse => "Failed to parse SQL",
        };
        let end = (offset + 1).min(sql.len()).max(offset);
        let diagnostic = Diagnostic::error()
            .with_message(message)
            .with_labels(vec![Label::primary((), offset..end)
                .with_message(format!("expected {}", expected.join(", ")))]);
        SourceError {
            kind,
            offset,
            expected,
            files: SimpleFile::new(filename.to_owned(), sql.to_owned()),
            diagnostic,
        }
    }

    pub fn emit(&self) {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = term::Config::default();
        if term::emit(&mut writer.lock(), &config, &self.files, &self.diagnostic).is_err() {
            eprintln!("{}", self);
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.kind {
            SourceErrorKind::Lex => "lexer",
            SourceErrorKind::Parse => "parser",
        };
        write!(
            f,
            "{} error at offset {}: expected {}",
            stage,
            self.offset,
            self.expected.join(", ")
        )
    }
}

impl error::Error for SourceError {}

impl From<SourceError> for Error {
    fn from(e: SourceError) -> Self {
        Error::Source(Box::new(e))
    }
}
