//! MySQL.

use crate::ast::{DataTypeKind, KnownFunction};

use super::{
    AutoIncrementRendering, CaseFolding, ConflictRendering, DateDiffRendering, Dialect, DialectId,
    FunctionParse, FunctionRendering, GrammarExtensions, HexLiteralStyle, Layout, LexicalRules,
    NullOrdering, ParamPolicy, StringEscape, TypeSpelling, UnitPosition,
};

static KEYWORDS: phf::Set<&'static str> = phf::phf_set! {
    "AUTO_INCREMENT", "DUAL", "INTERVAL", "KEY", "REGEXP", "RLIKE",
};

static TYPE_NAMES: phf::Map<&'static str, DataTypeKind> = phf::phf_map! {
    "TINYTEXT" => DataTypeKind::Text,
    "MEDIUMTEXT" => DataTypeKind::Text,
    "LONGTEXT" => DataTypeKind::Text,
    "TINYBLOB" => DataTypeKind::Blob,
    "MEDIUMBLOB" => DataTypeKind::Blob,
    "LONGBLOB" => DataTypeKind::Blob,
    "MEDIUMINT" => DataTypeKind::Int,
};

static TYPE_SPELLINGS: phf::Map<&'static str, TypeSpelling> = phf::phf_map! {
    "NCHAR" => TypeSpelling { name: "CHAR", params: ParamPolicy::Keep },
    "NVARCHAR" => TypeSpelling { name: "VARCHAR", params: ParamPolicy::Keep },
    "UUID" => TypeSpelling { name: "VARCHAR", params: ParamPolicy::Fixed(&["36"]) },
    "BOOLEAN" => TypeSpelling { name: "BOOLEAN", params: ParamPolicy::Drop },
};

static FUNCTION_NAMES: phf::Map<&'static str, FunctionParse> = phf::phf_map! {
    "RAND" => FunctionParse::Canonical(KnownFunction::Random),
    "TIMESTAMPDIFF" => FunctionParse::DateDiff(UnitPosition::First),
};

static FUNCTION_RENDERINGS: phf::Map<&'static str, FunctionRendering> = phf::phf_map! {
    "RANDOM" => FunctionRendering::Rename("RAND"),
    "DATEDIFF" => FunctionRendering::DateDiff(DateDiffRendering::UnitFirst { name: "TIMESTAMPDIFF" }),
};

pub static DIALECT: Dialect = Dialect {
    id: DialectId::MySQL,
    keywords: &KEYWORDS,
    lexical: LexicalRules {
        identifier_quotes: &[('`', '`')],
        string_quotes: &['\'', '"'],
        backslash_escapes: true,
        hex_numbers: true,
        hex_strings: true,
        hash_comments: true,
    },
    grammar: GrammarExtensions {
        insert_or_action: false,
        insert_ignore: true,
        replace_into: true,
        on_conflict_do_nothing: false,
        foreign_key_without_references: false,
        double_colon_cast: false,
    },
    identifier_quote: ('`', '`'),
    string_escape: StringEscape::Backslash,
    case_folding: CaseFolding::Preserve,
    hex_literal: HexLiteralStyle::Quoted { prefix: "x" },
    null_ordering: NullOrdering::NullsAreSmall,
    nulls_clause: false,
    type_names: &TYPE_NAMES,
    type_spellings: &TYPE_SPELLINGS,
    function_names: &FUNCTION_NAMES,
    function_renderings: &FUNCTION_RENDERINGS,
    cast_functions: &[],
    auto_increment: AutoIncrementRendering::Keyword("AUTO_INCREMENT"),
    insert_conflict: ConflictRendering::IgnoreOrReplaceKeyword,
    layout: Layout { indent: 2 },
};
