//! The dialect registry.
//!
//! Each supported dialect is described by a single immutable [`Dialect`]
//! record. The record is pure data: `phf` tables mapping between canonical
//! names and dialect spellings, plus a handful of small tagged enums that
//! describe how structural rewrites should be performed. The tokenizer, parser
//! and generator all read these records, and nothing ever mutates them.

use std::{fmt, str::FromStr};

use crate::{
    ast::{DataTypeKind, DateUnit, KnownFunction, NullsPlacement, SortDirection, TypeName},
    errors::{Error, Result},
    util::is_bare_ident,
};

pub mod generic;
pub mod mysql;
pub mod postgres;
pub mod snowflake;
pub mod spark;
pub mod sqlite;

/// The dialects we know how to read and write.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum DialectId {
    /// Dialect-neutral SQL. This is the default when no dialect is given.
    #[default]
    Generic,
    SQLite,
    MySQL,
    Postgres,
    Spark,
    Snowflake,
}

impl DialectId {
    /// All known dialects.
    pub const ALL: &'static [DialectId] = &[
        DialectId::Generic,
        DialectId::SQLite,
        DialectId::MySQL,
        DialectId::Postgres,
        DialectId::Spark,
        DialectId::Snowflake,
    ];

    /// The name used to select this dialect. The generic dialect is named by
    /// the empty string.
    pub fn as_str(self) -> &'static str {
        match self {
            DialectId::Generic => "",
            DialectId::SQLite => "sqlite",
            DialectId::MySQL => "mysql",
            DialectId::Postgres => "postgres",
            DialectId::Spark => "spark",
            DialectId::Snowflake => "snowflake",
        }
    }

    /// Look up the configuration for this dialect.
    pub fn dialect(self) -> &'static Dialect {
        match self {
            DialectId::Generic => &generic::DIALECT,
            DialectId::SQLite => &sqlite::DIALECT,
            DialectId::MySQL => &mysql::DIALECT,
            DialectId::Postgres => &postgres::DIALECT,
            DialectId::Spark => &spark::DIALECT,
            DialectId::Snowflake => &snowflake::DIALECT,
        }
    }
}

impl fmt::Display for DialectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialectId::Generic => write!(f, "generic"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl FromStr for DialectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "generic" => Ok(DialectId::Generic),
            "sqlite" | "sqlite3" => Ok(DialectId::SQLite),
            "mysql" => Ok(DialectId::MySQL),
            "postgres" | "postgresql" => Ok(DialectId::Postgres),
            "spark" => Ok(DialectId::Spark),
            "snowflake" => Ok(DialectId::Snowflake),
            _ => Err(Error::UnknownDialect(s.to_owned())),
        }
    }
}

/// Words reserved in every dialect. The parser matches these as keywords, and
/// the generator quotes identifiers that collide with them.
pub static COMMON_KEYWORDS: phf::Set<&'static str> = phf::phf_set! {
    "ALL", "AND", "AS", "ASC", "BETWEEN", "BY", "CASE", "CAST", "CHECK",
    "CONSTRAINT", "CREATE", "CROSS", "CURRENT_DATE", "CURRENT_TIME",
    "CURRENT_TIMESTAMP", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP",
    "ELSE", "END", "EXCEPT", "EXISTS", "FALSE", "FOREIGN", "FROM", "FULL",
    "GROUP", "HAVING", "IN", "INNER", "INSERT", "INTERSECT", "INTO", "IS",
    "JOIN", "LEFT", "LIKE", "LIMIT", "NOT", "NULL", "ON", "OR", "ORDER",
    "OUTER", "PRIMARY", "REFERENCES", "RIGHT", "SELECT", "TABLE", "THEN",
    "TRUE", "UNION", "UNIQUE", "USING", "VALUES", "WHEN", "WHERE", "WITH",
};

/// Type spellings understood by every dialect.
pub static COMMON_TYPE_NAMES: phf::Map<&'static str, DataTypeKind> = phf::phf_map! {
    "BOOLEAN" => DataTypeKind::Boolean,
    "BOOL" => DataTypeKind::Boolean,
    "TINYINT" => DataTypeKind::TinyInt,
    "SMALLINT" => DataTypeKind::SmallInt,
    "INT" => DataTypeKind::Int,
    "INTEGER" => DataTypeKind::Int,
    "BIGINT" => DataTypeKind::BigInt,
    "FLOAT" => DataTypeKind::Float,
    "REAL" => DataTypeKind::Float,
    "DOUBLE" => DataTypeKind::Double,
    "DOUBLE PRECISION" => DataTypeKind::Double,
    "DECIMAL" => DataTypeKind::Decimal,
    "NUMERIC" => DataTypeKind::Decimal,
    "CHAR" => DataTypeKind::Char,
    "CHARACTER" => DataTypeKind::Char,
    "VARCHAR" => DataTypeKind::VarChar,
    "CHARACTER VARYING" => DataTypeKind::VarChar,
    "NCHAR" => DataTypeKind::NChar,
    "NVARCHAR" => DataTypeKind::NVarChar,
    "TEXT" => DataTypeKind::Text,
    "BINARY" => DataTypeKind::Binary,
    "VARBINARY" => DataTypeKind::VarBinary,
    "BLOB" => DataTypeKind::Blob,
    "DATE" => DataTypeKind::Date,
    "TIME" => DataTypeKind::Time,
    "TIMESTAMP" => DataTypeKind::Timestamp,
    "DATETIME" => DataTypeKind::DateTime,
    "JSON" => DataTypeKind::Json,
    "UUID" => DataTypeKind::Uuid,
};

/// Function spellings understood by every dialect, unless the dialect
/// overrides them.
pub static COMMON_FUNCTION_NAMES: phf::Map<&'static str, FunctionParse> = phf::phf_map! {
    "LEAST" => FunctionParse::Canonical(KnownFunction::Least),
    "GREATEST" => FunctionParse::Canonical(KnownFunction::Greatest),
    "MIN" => FunctionParse::Canonical(KnownFunction::Min),
    "MAX" => FunctionParse::Canonical(KnownFunction::Max),
    "LEVENSHTEIN" => FunctionParse::Canonical(KnownFunction::Levenshtein),
    "RANDOM" => FunctionParse::Canonical(KnownFunction::Random),
    "DATEDIFF" => FunctionParse::DateDiff(UnitPosition::Last),
    "TIMESTAMPDIFF" => FunctionParse::DateDiff(UnitPosition::First),
};

/// Lexical rules used by the tokenizer.
#[derive(Debug)]
pub struct LexicalRules {
    /// Opening and closing quote characters for quoted identifiers.
    pub identifier_quotes: &'static [(char, char)],
    /// Quote characters for string literals.
    pub string_quotes: &'static [char],
    /// Do string literals support `\n`-style escapes?
    pub backslash_escapes: bool,
    /// Do we accept `0xCC` hex numbers?
    pub hex_numbers: bool,
    /// Do we accept `x'CC'` hex strings?
    pub hex_strings: bool,
    /// Do we accept `# comment` line comments?
    pub hash_comments: bool,
}

impl LexicalRules {
    /// Does `c` open a quoted string or identifier?
    pub fn starts_quote(&self, c: char) -> bool {
        self.string_quotes.contains(&c) || self.identifier_quotes.iter().any(|(open, _)| *open == c)
    }

    /// If `c` opens a quoted identifier, return the matching close quote.
    pub fn identifier_close_quote(&self, c: char) -> Option<char> {
        self.identifier_quotes
            .iter()
            .find(|(open, _)| *open == c)
            .map(|(_, close)| *close)
    }
}

/// Optional grammar extensions. The parser tries each enabled extension
/// before the common rule at the same position.
#[derive(Debug)]
pub struct GrammarExtensions {
    /// `INSERT OR IGNORE INTO ...`
    pub insert_or_action: bool,
    /// `INSERT IGNORE INTO ...`
    pub insert_ignore: bool,
    /// `REPLACE INTO ...`
    pub replace_into: bool,
    /// `INSERT INTO ... ON CONFLICT DO NOTHING`
    pub on_conflict_do_nothing: bool,
    /// `FOREIGN KEY (a) ON DELETE CASCADE`, with no `REFERENCES`.
    pub foreign_key_without_references: bool,
    /// `x::INT`
    pub double_colon_cast: bool,
}

/// How string literals escape special characters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StringEscape {
    /// `'it''s'`
    Doubled,
    /// `'it\'s'`
    Backslash,
}

/// What happens to unquoted identifiers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CaseFolding {
    Preserve,
    Lower,
    Upper,
}

/// How to write hexadecimal literals.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HexLiteralStyle {
    /// `x'CC'`, using the given prefix.
    Quoted { prefix: &'static str },
    /// Write the decimal value.
    Decimal,
}

/// Where NULLs sort when no `NULLS` clause is given.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NullOrdering {
    /// NULLs compare smaller than everything else.
    NullsAreSmall,
    /// NULLs compare larger than everything else.
    NullsAreLarge,
}

/// What to do with the parameters of a type, such as `VARCHAR(200)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParamPolicy {
    Keep,
    Drop,
    /// Replace any parameters with these.
    Fixed(&'static [&'static str]),
}

/// How a canonical type is spelled in a dialect.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TypeSpelling {
    pub name: &'static str,
    pub params: ParamPolicy,
}

/// What a dialect-specific function name means.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FunctionParse {
    /// Always the same canonical function.
    Canonical(KnownFunction),
    /// One canonical function for a single argument, and another for more.
    ByArity {
        single: KnownFunction,
        multiple: KnownFunction,
    },
    /// A date difference. Three-argument calls take the unit in the given
    /// position. Two-argument calls always mean `end - start` in days.
    DateDiff(UnitPosition),
}

/// Where the unit goes in a three-argument date difference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnitPosition {
    /// `DATEDIFF(DAY, start, end)`
    First,
    /// `DATEDIFF(end, start, 'day')`
    Last,
}

/// How to write a canonical function.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FunctionRendering {
    Rename(&'static str),
    /// Use a multi-argument function for two or more arguments, and do
    /// something else for exactly one.
    ArityRename {
        single: SingleArgument,
        multiple: &'static str,
    },
    DateDiff(DateDiffRendering),
}

/// What to do with a single-argument call under [`FunctionRendering::ArityRename`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SingleArgument {
    /// Replace the call with its argument.
    Unwrap,
    Rename(&'static str),
}

/// How to write a date difference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DateDiffRendering {
    /// `NAME(end, start, 'unit')`
    UnitLast { name: &'static str },
    /// `NAME(UNIT, start, end)`
    UnitFirst { name: &'static str },
    /// `CAST((TO_NUMBER(end) - TO_NUMBER(start)) <scale> AS <cast_to>)`, where
    /// `TO_NUMBER` converts a date to a fractional day number.
    DayNumberDelta {
        to_number: &'static str,
        scales: &'static [(DateUnit, Scale)],
        cast_to: DataTypeKind,
    },
    /// `CAST(EXTRACT(EPOCH FROM CAST(end AS TIMESTAMP) - CAST(start AS TIMESTAMP))
    /// / <seconds> AS <cast_to>)`
    EpochDelta {
        seconds: &'static [(DateUnit, Scale)],
        cast_to: DataTypeKind,
    },
}

/// A scale factor applied to a day or second count.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scale {
    Identity,
    Multiply(&'static str),
    Divide(&'static str),
}

/// How to write an auto-increment column constraint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AutoIncrementRendering {
    /// A keyword such as `AUTOINCREMENT`.
    Keyword(&'static str),
    /// `GENERATED BY DEFAULT AS IDENTITY NOT NULL`, moved to the front of the
    /// column's constraints.
    Identity,
}

/// How to write `INSERT OR <action>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConflictRendering {
    /// `INSERT OR IGNORE INTO`
    OrAction,
    /// `INSERT IGNORE INTO` and `REPLACE INTO`.
    IgnoreOrReplaceKeyword,
    /// `INSERT INTO ... ON CONFLICT DO NOTHING`
    OnConflictDoNothing,
    /// No conflict actions at all.
    Unsupported,
}

/// Pretty-printing layout.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Layout {
    pub indent: usize,
}

/// Everything we know about a dialect.
#[derive(Debug)]
pub struct Dialect {
    pub id: DialectId,
    /// Reserved words in addition to [`COMMON_KEYWORDS`].
    pub keywords: &'static phf::Set<&'static str>,
    pub lexical: LexicalRules,
    pub grammar: GrammarExtensions,
    /// Quotes used when writing identifiers.
    pub identifier_quote: (char, char),
    pub string_escape: StringEscape,
    pub case_folding: CaseFolding,
    pub hex_literal: HexLiteralStyle,
    pub null_ordering: NullOrdering,
    /// Can we write `NULLS FIRST` and `NULLS LAST`?
    pub nulls_clause: bool,
    /// Dialect spelling to canonical type, consulted before [`COMMON_TYPE_NAMES`].
    pub type_names: &'static phf::Map<&'static str, DataTypeKind>,
    /// Canonical type name to dialect spelling.
    pub type_spellings: &'static phf::Map<&'static str, TypeSpelling>,
    /// Dialect spelling to canonical function, consulted before
    /// [`COMMON_FUNCTION_NAMES`].
    pub function_names: &'static phf::Map<&'static str, FunctionParse>,
    /// Canonical function name to rendering rule.
    pub function_renderings: &'static phf::Map<&'static str, FunctionRendering>,
    /// Types whose casts are written as a conversion function call.
    pub cast_functions: &'static [(DataTypeKind, &'static str)],
    pub auto_increment: AutoIncrementRendering,
    pub insert_conflict: ConflictRendering,
    pub layout: Layout,
}

impl Dialect {
    /// Is `word` a reserved word in this dialect?
    pub fn is_keyword(&self, word: &str) -> bool {
        let upper = word.to_ascii_uppercase();
        COMMON_KEYWORDS.contains(upper.as_str()) || self.keywords.contains(upper.as_str())
    }

    /// Must `name` be quoted to be read back as the same identifier?
    pub fn needs_quotes(&self, name: &str) -> bool {
        !is_bare_ident(name) || self.is_keyword(name)
    }

    /// How should we spell `kind`?
    pub fn type_for(&self, kind: DataTypeKind) -> TypeSpelling {
        self.type_spellings
            .get(kind.canonical_name())
            .copied()
            .unwrap_or(TypeSpelling {
                name: kind.canonical_name(),
                params: ParamPolicy::Keep,
            })
    }

    /// What canonical type does `spelling` refer to? Unknown spellings are
    /// preserved as [`TypeName::Custom`].
    pub fn canonical_for(&self, spelling: &str) -> TypeName {
        let upper = spelling.to_ascii_uppercase();
        self.type_names
            .get(upper.as_str())
            .or_else(|| COMMON_TYPE_NAMES.get(upper.as_str()))
            .map(|kind| TypeName::Known(*kind))
            .unwrap_or_else(|| TypeName::Custom(spelling.to_owned()))
    }

    /// What does the function `name` mean in this dialect, if it's one of the
    /// functions we rewrite?
    pub fn function_for(&self, name: &str) -> Option<FunctionParse> {
        let upper = name.to_ascii_uppercase();
        self.function_names
            .get(upper.as_str())
            .or_else(|| COMMON_FUNCTION_NAMES.get(upper.as_str()))
            .copied()
    }

    /// How should we write the canonical function `name`?
    pub fn function_rendering(&self, name: &'static str) -> FunctionRendering {
        self.function_renderings
            .get(name)
            .copied()
            .unwrap_or(FunctionRendering::Rename(name))
    }

    /// Should a cast to `kind` be written as a function call instead?
    pub fn cast_function(&self, kind: DataTypeKind) -> Option<&'static str> {
        self.cast_functions
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, name)| *name)
    }

    /// Where do NULLs sort for `direction` when there's no `NULLS` clause?
    pub fn default_null_order(&self, direction: SortDirection) -> NullsPlacement {
        match (self.null_ordering, direction) {
            (NullOrdering::NullsAreSmall, SortDirection::Asc)
            | (NullOrdering::NullsAreLarge, SortDirection::Desc) => NullsPlacement::First,
            (NullOrdering::NullsAreSmall, SortDirection::Desc)
            | (NullOrdering::NullsAreLarge, SortDirection::Asc) => NullsPlacement::Last,
        }
    }

    /// Apply our case folding rules to an unquoted identifier.
    pub fn fold_case(&self, name: &str) -> String {
        match self.case_folding {
            CaseFolding::Preserve => name.to_owned(),
            CaseFolding::Lower => name.to_lowercase(),
            CaseFolding::Upper => name.to_uppercase(),
        }
    }

    /// Wrap `name` so that it formats as a quoted identifier.
    pub fn quoted_ident<'a>(&self, name: &'a str) -> QuotedIdent<'a> {
        QuotedIdent {
            name,
            quotes: self.identifier_quote,
        }
    }

    /// Wrap `value` so that it formats as a string literal.
    pub fn quoted_string<'a>(&self, value: &'a str) -> QuotedString<'a> {
        QuotedString {
            value,
            escape: self.string_escape,
        }
    }
}

/// Formatting wrapper for quoted identifiers. A closing quote inside the name
/// is doubled.
pub struct QuotedIdent<'a> {
    name: &'a str,
    quotes: (char, char),
}

impl fmt::Display for QuotedIdent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = self.quotes;
        write!(f, "{}", open)?;
        for c in self.name.chars() {
            if c == close {
                write!(f, "{}", close)?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, "{}", close)
    }
}

/// Formatting wrapper for single-quoted strings.
pub struct QuotedString<'a> {
    value: &'a str,
    escape: StringEscape,
}

impl fmt::Display for QuotedString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'")?;
        let mut chars = self.value.chars().peekable();
        while let Some(c) = chars.next() {
            match (self.escape, c) {
                (StringEscape::Doubled, '\'') => write!(f, "''")?,
                (StringEscape::Backslash, '\'') => write!(f, "\\'")?,
                // Backslash dialects read `\%` and `\_` as two characters.
                (StringEscape::Backslash, '\\') if matches!(chars.peek(), Some('%' | '_')) => {
                    write!(f, "\\")?
                }
                (StringEscape::Backslash, '\\') => write!(f, "\\\\")?,
                (StringEscape::Backslash, '\n') => write!(f, "\\n")?,
                (StringEscape::Backslash, '\r') => write!(f, "\\r")?,
                (StringEscape::Backslash, '\t') => write!(f, "\\t")?,
                (StringEscape::Backslash, '\0') => write!(f, "\\0")?,
                _ => write!(f, "{}", c)?,
            }
        }
        write!(f, "'")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_dialect_ids() {
        assert_eq!("".parse::<DialectId>().unwrap(), DialectId::Generic);
        assert_eq!("SQLite".parse::<DialectId>().unwrap(), DialectId::SQLite);
        assert_eq!(
            "postgresql".parse::<DialectId>().unwrap(),
            DialectId::Postgres
        );
        for &id in DialectId::ALL {
            assert_eq!(id.as_str().parse::<DialectId>().unwrap(), id);
            assert_eq!(id.dialect().id, id);
        }
    }

    #[test]
    fn unknown_dialect_is_a_config_error() {
        let err = "oracle".parse::<DialectId>().unwrap_err();
        assert!(matches!(err, Error::UnknownDialect(name) if name == "oracle"));
    }

    #[test]
    fn type_lookups_are_total() {
        let kinds = [
            DataTypeKind::Boolean,
            DataTypeKind::TinyInt,
            DataTypeKind::SmallInt,
            DataTypeKind::Int,
            DataTypeKind::BigInt,
            DataTypeKind::Float,
            DataTypeKind::Double,
            DataTypeKind::Decimal,
            DataTypeKind::Char,
            DataTypeKind::VarChar,
            DataTypeKind::NChar,
            DataTypeKind::NVarChar,
            DataTypeKind::Text,
            DataTypeKind::Binary,
            DataTypeKind::VarBinary,
            DataTypeKind::Blob,
            DataTypeKind::Date,
            DataTypeKind::Time,
            DataTypeKind::Timestamp,
            DataTypeKind::DateTime,
            DataTypeKind::Json,
            DataTypeKind::Uuid,
        ];
        for &id in DialectId::ALL {
            for kind in kinds {
                let spelling = id.dialect().type_for(kind);
                assert!(!spelling.name.is_empty());
                // Every spelling we write must be readable by the same dialect.
                assert!(
                    matches!(id.dialect().canonical_for(spelling.name), TypeName::Known(_)),
                    "{} cannot read back {}",
                    id,
                    spelling.name
                );
            }
        }
    }

    #[test]
    fn sqlite_type_map() {
        let sqlite = DialectId::SQLite.dialect();
        assert_eq!(sqlite.type_for(DataTypeKind::SmallInt).name, "INTEGER");
        assert_eq!(sqlite.type_for(DataTypeKind::NVarChar).name, "TEXT");
        assert_eq!(
            sqlite.type_for(DataTypeKind::NVarChar).params,
            ParamPolicy::Keep
        );
        assert_eq!(
            sqlite.canonical_for("longvarchar"),
            TypeName::Known(DataTypeKind::Text)
        );
        assert_eq!(
            sqlite.canonical_for("WIDGET"),
            TypeName::Custom("WIDGET".to_owned())
        );
    }

    #[test]
    fn function_lookups() {
        let sqlite = DialectId::SQLite.dialect();
        assert_eq!(
            sqlite.function_for("min"),
            Some(FunctionParse::ByArity {
                single: KnownFunction::Min,
                multiple: KnownFunction::Least,
            })
        );
        assert_eq!(
            sqlite.function_rendering("LEVENSHTEIN"),
            FunctionRendering::Rename("EDITDIST3")
        );
        assert_eq!(
            DialectId::Spark.dialect().function_rendering("LEVENSHTEIN"),
            FunctionRendering::Rename("LEVENSHTEIN")
        );
        assert_eq!(sqlite.function_for("my_udf"), None);
    }

    #[test]
    fn null_ordering_defaults() {
        let sqlite = DialectId::SQLite.dialect();
        let postgres = DialectId::Postgres.dialect();
        assert_eq!(
            sqlite.default_null_order(SortDirection::Asc),
            NullsPlacement::First
        );
        assert_eq!(
            sqlite.default_null_order(SortDirection::Desc),
            NullsPlacement::Last
        );
        assert_eq!(
            postgres.default_null_order(SortDirection::Asc),
            NullsPlacement::Last
        );
        assert_eq!(
            postgres.default_null_order(SortDirection::Desc),
            NullsPlacement::First
        );
    }

    #[test]
    fn keywords_vary_by_dialect() {
        assert!(DialectId::SQLite.dialect().is_keyword("autoincrement"));
        assert!(!DialectId::MySQL.dialect().is_keyword("autoincrement"));
        assert!(DialectId::MySQL.dialect().is_keyword("AUTO_INCREMENT"));
        assert!(DialectId::Postgres.dialect().needs_quotes("user"));
        assert!(!DialectId::SQLite.dialect().needs_quotes("user"));
        assert!(DialectId::SQLite.dialect().needs_quotes("two words"));
    }

    #[test]
    fn quoting() {
        let mysql = DialectId::MySQL.dialect();
        assert_eq!(mysql.quoted_ident("a`b").to_string(), "`a``b`");
        assert_eq!(mysql.quoted_string("it's").to_string(), "'it\\'s'");
        let sqlite = DialectId::SQLite.dialect();
        assert_eq!(sqlite.quoted_ident("a\"b").to_string(), "\"a\"\"b\"");
        assert_eq!(sqlite.quoted_string("it's").to_string(), "'it''s'");
    }

    #[test]
    fn backslash_lexers_write_backslash_escapes() {
        for &id in DialectId::ALL {
            let dialect = id.dialect();
            let expected = if dialect.lexical.backslash_escapes {
                StringEscape::Backslash
            } else {
                StringEscape::Doubled
            };
            assert_eq!(dialect.string_escape, expected, "{}", id);
        }
    }

    #[test]
    fn like_escapes_survive_backslash_quoting() {
        let mysql = DialectId::MySQL.dialect();
        assert_eq!(mysql.quoted_string(r"50\%").to_string(), r"'50\%'");
        assert_eq!(mysql.quoted_string(r"a\_b").to_string(), r"'a\_b'");
        assert_eq!(mysql.quoted_string(r"C:\new").to_string(), r"'C:\\new'");
        let sqlite = DialectId::SQLite.dialect();
        assert_eq!(sqlite.quoted_string(r"50\%").to_string(), r"'50\%'");
    }

    #[test]
    fn bare_identifiers_follow_the_lexer() {
        let postgres = DialectId::Postgres.dialect();
        assert!(!postgres.needs_quotes("café"));
        assert!(!postgres.needs_quotes("a$b"));
        assert!(postgres.needs_quotes("$a"));
        assert!(postgres.needs_quotes("1a"));
    }
}
