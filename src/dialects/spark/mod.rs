//! Spark SQL.

use crate::ast::{DataTypeKind, KnownFunction};

use super::{
    AutoIncrementRendering, CaseFolding, ConflictRendering, DateDiffRendering, Dialect, DialectId,
    FunctionParse, FunctionRendering, GrammarExtensions, HexLiteralStyle, Layout, LexicalRules,
    NullOrdering, ParamPolicy, StringEscape, TypeSpelling, UnitPosition,
};

static KEYWORDS: phf::Set<&'static str> = phf::phf_set! {
    "LATERAL", "RLIKE", "REGEXP",
};

static TYPE_NAMES: phf::Map<&'static str, DataTypeKind> = phf::phf_map! {
    "STRING" => DataTypeKind::Text,
    "BYTE" => DataTypeKind::TinyInt,
    "SHORT" => DataTypeKind::SmallInt,
    "LONG" => DataTypeKind::BigInt,
};

static TYPE_SPELLINGS: phf::Map<&'static str, TypeSpelling> = phf::phf_map! {
    "TINYINT" => TypeSpelling { name: "BYTE", params: ParamPolicy::Drop },
    "SMALLINT" => TypeSpelling { name: "SHORT", params: ParamPolicy::Drop },
    "INT" => TypeSpelling { name: "INT", params: ParamPolicy::Drop },
    "BIGINT" => TypeSpelling { name: "LONG", params: ParamPolicy::Drop },
    "TEXT" => TypeSpelling { name: "STRING", params: ParamPolicy::Drop },
    "NCHAR" => TypeSpelling { name: "CHAR", params: ParamPolicy::Keep },
    "NVARCHAR" => TypeSpelling { name: "VARCHAR", params: ParamPolicy::Keep },
    "VARBINARY" => TypeSpelling { name: "BINARY", params: ParamPolicy::Drop },
    "BLOB" => TypeSpelling { name: "BINARY", params: ParamPolicy::Drop },
    "DATETIME" => TypeSpelling { name: "TIMESTAMP", params: ParamPolicy::Drop },
    "TIME" => TypeSpelling { name: "TIMESTAMP", params: ParamPolicy::Drop },
    "JSON" => TypeSpelling { name: "STRING", params: ParamPolicy::Drop },
    "UUID" => TypeSpelling { name: "STRING", params: ParamPolicy::Drop },
};

static FUNCTION_NAMES: phf::Map<&'static str, FunctionParse> = phf::phf_map! {
    "RAND" => FunctionParse::Canonical(KnownFunction::Random),
    "DATEDIFF" => FunctionParse::DateDiff(UnitPosition::First),
};

static FUNCTION_RENDERINGS: phf::Map<&'static str, FunctionRendering> = phf::phf_map! {
    "RANDOM" => FunctionRendering::Rename("RAND"),
    "DATEDIFF" => FunctionRendering::DateDiff(DateDiffRendering::UnitFirst { name: "DATEDIFF" }),
};

pub static DIALECT: Dialect = Dialect {
    id: DialectId::Spark,
    keywords: &KEYWORDS,
    lexical: LexicalRules {
        identifier_quotes: &[('`', '`')],
        string_quotes: &['\'', '"'],
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
        double_colon_cast: false,
    },
    identifier_quote: ('`', '`'),
    string_escape: StringEscape::Backslash,
    case_folding: CaseFolding::Preserve,
    hex_literal: HexLiteralStyle::Quoted { prefix: "X" },
    null_ordering: NullOrdering::NullsAreSmall,
    nulls_clause: true,
    type_names: &TYPE_NAMES,
    type_spellings: &TYPE_SPELLINGS,
    function_names: &FUNCTION_NAMES,
    function_renderings: &FUNCTION_RENDERINGS,
    cast_functions: &[],
    auto_increment: AutoIncrementRendering::Identity,
    insert_conflict: ConflictRendering::Unsupported,
    layout: Layout { indent: 2 },
};
