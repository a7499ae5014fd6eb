//! PostgreSQL.
//!
//! Postgres folds unquoted identifiers to lower case, sorts NULLs as if they
//! were larger than any other value, and has no `DATEDIFF`. We compute date
//! differences from the epoch seconds of an interval instead.

use crate::ast::{DataTypeKind, DateUnit, KnownFunction};

use super::{
    AutoIncrementRendering, CaseFolding, ConflictRendering, DateDiffRendering, Dialect, DialectId,
    FunctionParse, FunctionRendering, GrammarExtensions, HexLiteralStyle, Layout, LexicalRules,
    NullOrdering, ParamPolicy, Scale, StringEscape, TypeSpelling,
};

static KEYWORDS: phf::Set<&'static str> = phf::phf_set! {
    "ANALYSE", "ANALYZE", "ARRAY", "ASYMMETRIC", "COLLATE", "LATERAL", "ONLY",
    "PLACING", "RETURNING", "SYMMETRIC", "USER", "VARIADIC", "WINDOW",
};

static TYPE_NAMES: phf::Map<&'static str, DataTypeKind> = phf::phf_map! {
    "INT2" => DataTypeKind::SmallInt,
    "INT4" => DataTypeKind::Int,
    "INT8" => DataTypeKind::BigInt,
    "FLOAT4" => DataTypeKind::Float,
    "FLOAT8" => DataTypeKind::Double,
    "BYTEA" => DataTypeKind::VarBinary,
};

static TYPE_SPELLINGS: phf::Map<&'static str, TypeSpelling> = phf::phf_map! {
    "TINYINT" => TypeSpelling { name: "SMALLINT", params: ParamPolicy::Drop },
    "SMALLINT" => TypeSpelling { name: "SMALLINT", params: ParamPolicy::Drop },
    "INT" => TypeSpelling { name: "INT", params: ParamPolicy::Drop },
    "BIGINT" => TypeSpelling { name: "BIGINT", params: ParamPolicy::Drop },
    "FLOAT" => TypeSpelling { name: "REAL", params: ParamPolicy::Drop },
    "DOUBLE" => TypeSpelling { name: "DOUBLE PRECISION", params: ParamPolicy::Drop },
    "NCHAR" => TypeSpelling { name: "CHAR", params: ParamPolicy::Keep },
    "NVARCHAR" => TypeSpelling { name: "VARCHAR", params: ParamPolicy::Keep },
    "BINARY" => TypeSpelling { name: "BYTEA", params: ParamPolicy::Drop },
    "VARBINARY" => TypeSpelling { name: "BYTEA", params: ParamPolicy::Drop },
    "BLOB" => TypeSpelling { name: "BYTEA", params: ParamPolicy::Drop },
    "DATETIME" => TypeSpelling { name: "TIMESTAMP", params: ParamPolicy::Keep },
};

static FUNCTION_NAMES: phf::Map<&'static str, FunctionParse> = phf::phf_map! {
    "RANDOM" => FunctionParse::Canonical(KnownFunction::Random),
};

/// Seconds in each unit.
static EPOCH_SCALES: &[(DateUnit, Scale)] = &[
    (DateUnit::Second, Scale::Identity),
    (DateUnit::Minute, Scale::Divide("60")),
    (DateUnit::Hour, Scale::Divide("3600")),
    (DateUnit::Day, Scale::Divide("86400")),
    (DateUnit::Week, Scale::Divide("604800")),
    (DateUnit::Month, Scale::Divide("2592000")),
    (DateUnit::Quarter, Scale::Divide("7776000")),
    (DateUnit::Year, Scale::Divide("31536000")),
];

static FUNCTION_RENDERINGS: phf::Map<&'static str, FunctionRendering> = phf::phf_map! {
    "DATEDIFF" => FunctionRendering::DateDiff(DateDiffRendering::EpochDelta {
        seconds: EPOCH_SCALES,
        cast_to: DataTypeKind::BigInt,
    }),
};

pub static DIALECT: Dialect = Dialect {
    id: DialectId::Postgres,
    keywords: &KEYWORDS,
    lexical: LexicalRules {
        identifier_quotes: &[('"', '"')],
        string_quotes: &['\''],
        backslash_escapes: false,
        hex_numbers: false,
        hex_strings: true,
        hash_comments: false,
    },
    grammar: GrammarExtensions {
        insert_or_action: false,
        insert_ignore: false,
        replace_into: false,
        on_conflict_do_nothing: true,
        foreign_key_without_references: false,
        double_colon_cast: true,
    },
    identifier_quote: ('"', '"'),
    string_escape: StringEscape::Doubled,
    case_folding: CaseFolding::Lower,
    hex_literal: HexLiteralStyle::Quoted { prefix: "x" },
    null_ordering: NullOrdering::NullsAreLarge,
    nulls_clause: true,
    type_names: &TYPE_NAMES,
    type_spellings: &TYPE_SPELLINGS,
    function_names: &FUNCTION_NAMES,
    function_renderings: &FUNCTION_RENDERINGS,
    cast_functions: &[],
    auto_increment: AutoIncrementRendering::Identity,
    insert_conflict: ConflictRendering::OnConflictDoNothing,
    layout: Layout { indent: 2 },
};
