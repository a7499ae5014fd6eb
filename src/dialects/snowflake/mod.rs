//! Snowflake.
//!
//! Snowflake folds unquoted identifiers to upper case and sorts NULLs as
//! larger than any other value. Several niladic functions may be written with
//! or without trailing parentheses.

use crate::ast::{DataTypeKind, KnownFunction};

use super::{
    AutoIncrementRendering, CaseFolding, ConflictRendering, DateDiffRendering, Dialect, DialectId,
    FunctionParse, FunctionRendering, GrammarExtensions, HexLiteralStyle, Layout, LexicalRules,
    NullOrdering, ParamPolicy, StringEscape, TypeSpelling, UnitPosition,
};

static KEYWORDS: phf::Set<&'static str> = phf::phf_set! {
    "AUTOINCREMENT", "ILIKE", "LATERAL", "QUALIFY", "SAMPLE",
};

static TYPE_NAMES: phf::Map<&'static str, DataTypeKind> = phf::phf_map! {
    "STRING" => DataTypeKind::Text,
    "NUMBER" => DataTypeKind::Decimal,
    "TIMESTAMP_NTZ" => DataTypeKind::DateTime,
    "VARIANT" => DataTypeKind::Json,
};

static TYPE_SPELLINGS: phf::Map<&'static str, TypeSpelling> = phf::phf_map! {
    "NCHAR" => TypeSpelling { name: "CHAR", params: ParamPolicy::Keep },
    "NVARCHAR" => TypeSpelling { name: "VARCHAR", params: ParamPolicy::Keep },
    "BLOB" => TypeSpelling { name: "BINARY", params: ParamPolicy::Drop },
    "DATETIME" => TypeSpelling { name: "TIMESTAMP_NTZ", params: ParamPolicy::Keep },
    "JSON" => TypeSpelling { name: "VARIANT", params: ParamPolicy::Drop },
    "UUID" => TypeSpelling { name: "VARCHAR", params: ParamPolicy::Fixed(&["36"]) },
};

static FUNCTION_NAMES: phf::Map<&'static str, FunctionParse> = phf::phf_map! {
    "EDITDISTANCE" => FunctionParse::Canonical(KnownFunction::Levenshtein),
    "DATEDIFF" => FunctionParse::DateDiff(UnitPosition::First),
};

static FUNCTION_RENDERINGS: phf::Map<&'static str, FunctionRendering> = phf::phf_map! {
    "LEVENSHTEIN" => FunctionRendering::Rename("EDITDISTANCE"),
    "DATEDIFF" => FunctionRendering::DateDiff(DateDiffRendering::UnitFirst { name: "DATEDIFF" }),
};

pub static DIALECT: Dialect = Dialect {
    id: DialectId::Snowflake,
    keywords: &KEYWORDS,
    lexical: LexicalRules {
        identifier_quotes: &[('"', '"')],
        string_quotes: &['\''],
        backslash_escapes: true,
        hex_numbers: false,
        hex_strings: true,
        hash_comments: false,
    },
    grammar: GrammarExtensions {
        insert_or_action: false,
        insert_ignore: false,
        replace_into: false,
        on_conflict_do_nothing: false,
        foreign_key_without_references: false,
        double_colon_cast: true,
    },
    identifier_quote: ('"', '"'),
    string_escape: StringEscape::Backslash,
    case_folding: CaseFolding::Upper,
    hex_literal: HexLiteralStyle::Quoted { prefix: "x" },
    null_ordering: NullOrdering::NullsAreLarge,
    nulls_clause: true,
    type_names: &TYPE_NAMES,
    type_spellings: &TYPE_SPELLINGS,
    function_names: &FUNCTION_NAMES,
    function_renderings: &FUNCTION_RENDERINGS,
    cast_functions: &[],
    auto_increment: AutoIncrementRendering::Keyword("AUTOINCREMENT"),
    insert_conflict: ConflictRendering::Unsupported,
    layout: Layout { indent: 2 },
};
