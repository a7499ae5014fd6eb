//! Dialect-neutral SQL.
//!
//! This is what we read and write when no dialect is named. It accepts the
//! union of the common extensions, and writes canonical names for everything.

use crate::ast::{DataTypeKind, KnownFunction};

use super::{
    AutoIncrementRendering, CaseFolding, ConflictRendering, DateDiffRendering, Dialect, DialectId,
    FunctionParse, FunctionRendering, GrammarExtensions, HexLiteralStyle, Layout, LexicalRules,
    NullOrdering, ParamPolicy, StringEscape, TypeSpelling,
};

static KEYWORDS: phf::Set<&'static str> = phf::phf_set! {
    "AUTOINCREMENT", "AUTO_INCREMENT",
};

static TYPE_NAMES: phf::Map<&'static str, DataTypeKind> = phf::phf_map! {
    "STRING" => DataTypeKind::Text,
};

static TYPE_SPELLINGS: phf::Map<&'static str, TypeSpelling> = phf::phf_map! {
    "BOOLEAN" => TypeSpelling { name: "BOOLEAN", params: ParamPolicy::Drop },
};

static FUNCTION_NAMES: phf::Map<&'static str, FunctionParse> = phf::phf_map! {
    "RAND" => FunctionParse::Canonical(KnownFunction::Random),
};

static FUNCTION_RENDERINGS: phf::Map<&'static str, FunctionRendering> = phf::phf_map! {
    "DATEDIFF" => FunctionRendering::DateDiff(DateDiffRendering::UnitLast { name: "DATEDIFF" }),
};

pub static DIALECT: Dialect = Dialect {
    id: DialectId::Generic,
    keywords: &KEYWORDS,
    lexical: LexicalRules {
        identifier_quotes: &[('"', '"')],
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
        foreign_key_without_references: false,
        double_colon_cast: false,
    },
    identifier_quote: ('"', '"'),
    string_escape: StringEscape::Doubled,
    case_folding: CaseFolding::Preserve,
    hex_literal: HexLiteralStyle::Decimal,
    null_ordering: NullOrdering::NullsAreSmall,
    nulls_clause: true,
    type_names: &TYPE_NAMES,
    type_spellings: &TYPE_SPELLINGS,
    function_names: &FUNCTION_NAMES,
    function_renderings: &FUNCTION_RENDERINGS,
    cast_functions: &[],
    auto_increment: AutoIncrementRendering::Keyword("AUTO_INCREMENT"),
    insert_conflict: ConflictRendering::OrAction,
    layout: Layout { indent: 2 },
};
