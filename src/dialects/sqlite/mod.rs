//! SQLite.
//!
//! SQLite has very loose typing, so most canonical types collapse onto one of
//! its storage classes. It has no `LEAST`/`GREATEST`, but its scalar `MIN` and
//! `MAX` accept several arguments, and it has no `DATEDIFF`, so we do date
//! arithmetic over `JULIANDAY`.

use crate::ast::{DataTypeKind, DateUnit, KnownFunction};

use super::{
    AutoIncrementRendering, CaseFolding, ConflictRendering, DateDiffRendering, Dialect, DialectId,
    FunctionParse, FunctionRendering, GrammarExtensions, HexLiteralStyle, Layout, LexicalRules,
    NullOrdering, ParamPolicy, Scale, SingleArgument, StringEscape, TypeSpelling,
};

static KEYWORDS: phf::Set<&'static str> = phf::phf_set! {
    "AUTOINCREMENT",
};

static TYPE_NAMES: phf::Map<&'static str, DataTypeKind> = phf::phf_map! {
    "LONGVARCHAR" => DataTypeKind::Text,
    "CLOB" => DataTypeKind::Text,
};

static TYPE_SPELLINGS: phf::Map<&'static str, TypeSpelling> = phf::phf_map! {
    "BOOLEAN" => TypeSpelling { name: "INTEGER", params: ParamPolicy::Drop },
    "TINYINT" => TypeSpelling { name: "INTEGER", params: ParamPolicy::Drop },
    "SMALLINT" => TypeSpelling { name: "INTEGER", params: ParamPolicy::Drop },
    "INT" => TypeSpelling { name: "INTEGER", params: ParamPolicy::Drop },
    "BIGINT" => TypeSpelling { name: "INTEGER", params: ParamPolicy::Drop },
    "FLOAT" => TypeSpelling { name: "REAL", params: ParamPolicy::Drop },
    "DOUBLE" => TypeSpelling { name: "REAL", params: ParamPolicy::Drop },
    "DECIMAL" => TypeSpelling { name: "REAL", params: ParamPolicy::Drop },
    "CHAR" => TypeSpelling { name: "TEXT", params: ParamPolicy::Keep },
    "VARCHAR" => TypeSpelling { name: "TEXT", params: ParamPolicy::Keep },
    "NCHAR" => TypeSpelling { name: "TEXT", params: ParamPolicy::Keep },
    "NVARCHAR" => TypeSpelling { name: "TEXT", params: ParamPolicy::Keep },
    "UUID" => TypeSpelling { name: "TEXT", params: ParamPolicy::Drop },
    "BINARY" => TypeSpelling { name: "BLOB", params: ParamPolicy::Drop },
    "VARBINARY" => TypeSpelling { name: "BLOB", params: ParamPolicy::Drop },
};

static FUNCTION_NAMES: phf::Map<&'static str, FunctionParse> = phf::phf_map! {
    "MIN" => FunctionParse::ByArity {
        single: KnownFunction::Min,
        multiple: KnownFunction::Least,
    },
    "MAX" => FunctionParse::ByArity {
        single: KnownFunction::Max,
        multiple: KnownFunction::Greatest,
    },
    "EDITDIST3" => FunctionParse::Canonical(KnownFunction::Levenshtein),
};

/// Convert a difference in Julian days to other units.
static JULIAN_DAY_SCALES: &[(DateUnit, Scale)] = &[
    (DateUnit::Day, Scale::Identity),
    (DateUnit::Week, Scale::Divide("7.0")),
    (DateUnit::Month, Scale::Divide("30.0")),
    (DateUnit::Year, Scale::Divide("365.0")),
    (DateUnit::Hour, Scale::Multiply("24.0")),
    (DateUnit::Minute, Scale::Multiply("1440.0")),
    (DateUnit::Second, Scale::Multiply("86400.0")),
];

static FUNCTION_RENDERINGS: phf::Map<&'static str, FunctionRendering> = phf::phf_map! {
    "LEAST" => FunctionRendering::ArityRename {
        single: SingleArgument::Unwrap,
        multiple: "MIN",
    },
    "GREATEST" => FunctionRendering::ArityRename {
        single: SingleArgument::Unwrap,
        multiple: "MAX",
    },
    "LEVENSHTEIN" => FunctionRendering::Rename("EDITDIST3"),
    "DATEDIFF" => FunctionRendering::DateDiff(DateDiffRendering::DayNumberDelta {
        to_number: "JULIANDAY",
        scales: JULIAN_DAY_SCALES,
        cast_to: DataTypeKind::Int,
    }),
};

pub static DIALECT: Dialect = Dialect {
    id: DialectId::SQLite,
    keywords: &KEYWORDS,
    lexical: LexicalRules {
        identifier_quotes: &[('"', '"'), ('`', '`'), ('[', ']')],
        string_quotes: &['\''],
        backslash_escapes: false,
        hex_numbers: true,
        hex_strings: true,
        hash_comments: false,
    },
    grammar: GrammarExtensions {
        insert_or_action: true,
        insert_ignore: false,
        replace_into: false,
        on_conflict_do_nothing: false,
        foreign_key_without_references: true,
        double_colon_cast: false,
    },
    identifier_quote: ('"', '"'),
    string_escape: StringEscape::Doubled,
    case_folding: CaseFolding::Preserve,
    hex_literal: HexLiteralStyle::Quoted { prefix: "x" },
    null_ordering: NullOrdering::NullsAreSmall,
    nulls_clause: true,
    type_names: &TYPE_NAMES,
    type_spellings: &TYPE_SPELLINGS,
    function_names: &FUNCTION_NAMES,
    function_renderings: &FUNCTION_RENDERINGS,
    cast_functions: &[
        (DataTypeKind::Date, "DATE"),
        (DataTypeKind::Timestamp, "DATETIME"),
        (DataTypeKind::DateTime, "DATETIME"),
    ],
    auto_increment: AutoIncrementRendering::Keyword("AUTOINCREMENT"),
    insert_conflict: ConflictRendering::OrAction,
    layout: Layout { indent: 2 },
};
