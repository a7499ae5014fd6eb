//! Convert raw strings into a series of tokens.
//!
//! This is a lexer, separate from our actual SQL grammar. Splitting the two
//! lets the grammar in [`crate::ast`] work on whole tokens instead of
//! characters, and it lets each dialect decide how words, quotes and numbers
//! are spelled without cluttering the grammar itself.
//!
//! The lexer is parameterized by a [`Dialect`], so the same text may tokenize
//! differently depending on who wrote it. For example, `AUTOINCREMENT` is a
//! keyword in SQLite but an ordinary identifier in MySQL, and `0xCC` is a hex
//! number in SQLite but the number `0` followed by the identifier `xCC` in
//! PostgreSQL.

use std::{fmt, ops::Range};

use peg::{Parse, ParseElem, RuleResult};

use crate::{
    dialects::Dialect,
    errors::{Result, SourceError, SourceErrorKind},
    util::{is_ident_char, is_ident_start},
};

/// A source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Loc {
    /// The byte offset of this location.
    pub offset: usize,
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset={}", self.offset)
    }
}

/// A span of source code, in bytes.
pub type Span = Range<usize>;

/// A token.
#[derive(Clone, PartialEq, Eq)]
pub enum Token {
    /// An identifier, either bare or quoted.
    Ident(Ident),

    /// A word reserved by the active dialect.
    Keyword(Keyword),

    /// A literal.
    Literal(Literal),

    /// A punctuation or operator token.
    Punct(Punct),

    /// A character that starts no token we know about. The tokenizer accepts
    /// these and leaves the parser to reject them.
    Unknown(Punct),
}

impl Token {
    /// What kind of token is this?
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Ident(ident) if ident.quoted => TokenKind::QuotedIdentifier,
            Token::Ident(_) => TokenKind::Identifier,
            Token::Keyword(_) => TokenKind::Keyword,
            Token::Literal(literal) => match literal.value {
                LiteralValue::Number(_) => TokenKind::Number,
                LiteralValue::Hex(_) => TokenKind::HexNumber,
                LiteralValue::String(_) => TokenKind::String,
            },
            Token::Punct(_) => TokenKind::Punctuation,
            Token::Unknown(_) => TokenKind::Unknown,
        }
    }

    /// The text of this token, after removing any quotes and escapes.
    pub fn text(&self) -> &str {
        match self {
            Token::Ident(ident) => &ident.name,
            Token::Keyword(keyword) => &keyword.text,
            Token::Literal(literal) => match &literal.value {
                LiteralValue::Number(s) | LiteralValue::Hex(s) | LiteralValue::String(s) => s,
            },
            Token::Punct(punct) | Token::Unknown(punct) => &punct.text,
        }
    }

    /// Where did this token come from?
    pub fn span(&self) -> &Span {
        match self {
            Token::Ident(ident) => &ident.span,
            Token::Keyword(keyword) => &keyword.span,
            Token::Literal(literal) => &literal.span,
            Token::Punct(punct) | Token::Unknown(punct) => &punct.span,
        }
    }

    /// The byte offset where this token starts.
    pub fn start_offset(&self) -> usize {
        self.span().start
    }
}

// The default output would include spans for every token, which makes token
// dumps unreadable.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(ident) if ident.quoted => write!(f, "QI:{}", ident.name),
            Token::Ident(ident) => write!(f, "I:{}", ident.name),
            Token::Keyword(keyword) => write!(f, "K:{}", keyword.text),
            Token::Literal(literal) => write!(f, "L:{:?}", literal.value),
            Token::Punct(punct) => write!(f, "P:{}", punct.text),
            Token::Unknown(punct) => write!(f, "?:{}", punct.text),
        }
    }
}

/// The kinds of token we produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    QuotedIdentifier,
    Keyword,
    String,
    Number,
    HexNumber,
    Punctuation,
    Unknown,
}

/// An identifier token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    /// The identifier, with quotes removed and escapes decoded.
    pub name: String,
    /// Was this identifier quoted in the source?
    pub quoted: bool,
    pub span: Span,
}

/// A keyword token. We keep the original spelling, but compare keywords
/// ignoring case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keyword {
    pub text: String,
    pub span: Span,
}

/// A literal token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal {
    pub value: LiteralValue,
    pub span: Span,
}

/// A literal value.
///
/// Does not include literals like `TRUE`, `FALSE` or `NULL`, which are
/// keywords at this level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiteralValue {
    /// A decimal number, exactly as written.
    Number(String),

    /// The digits of a hexadecimal literal, written either as `0xCC` or
    /// `x'CC'`.
    Hex(String),

    /// A string, with quotes removed and escapes decoded.
    String(String),
}

/// A punctuation token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Punct {
    pub text: String,
    pub span: Span,
}

/// A token stream.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    /// Where the input ended, so that we can report errors at end of input.
    end_offset: usize,
}

impl TokenStream {
    /// Our tokens.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Split this stream into statements at each top-level `;`. Empty
    /// statements are dropped.
    pub fn split_statements(&self) -> Vec<TokenStream> {
        let mut statements = vec![];
        let mut current = vec![];
        let mut depth = 0usize;
        for token in &self.tokens {
            match token {
                Token::Punct(p) if p.text == "(" => depth += 1,
                Token::Punct(p) if p.text == ")" => depth = depth.saturating_sub(1),
                Token::Punct(p) if p.text == ";" && depth == 0 => {
                    if !current.is_empty() {
                        let end_offset = p.span.start;
                        statements.push(TokenStream {
                            tokens: std::mem::take(&mut current),
                            end_offset,
                        });
                    }
                    continue;
                }
                _ => {}
            }
            current.push(token.clone());
        }
        if !current.is_empty() {
            statements.push(TokenStream {
                tokens: current,
                end_offset: self.end_offset,
            });
        }
        statements
    }

    /// Parse a literal.
    pub fn literal(&self, pos: usize) -> RuleResult<Literal> {
        match self.tokens.get(pos) {
            Some(Token::Literal(literal)) => RuleResult::Matched(pos + 1, literal.clone()),
            _ => RuleResult::Failed,
        }
    }

    /// Parse an identifier. This preserves case.
    pub fn ident(&self, pos: usize) -> RuleResult<Ident> {
        match self.tokens.get(pos) {
            Some(Token::Ident(ident)) => RuleResult::Matched(pos + 1, ident.clone()),
            _ => RuleResult::Failed,
        }
    }

    /// Parse a reserved keyword matching a specific string.
    pub fn keyword(&self, pos: usize, s: &'static str) -> RuleResult<()> {
        match self.tokens.get(pos) {
            Some(Token::Keyword(keyword)) if keyword.text.eq_ignore_ascii_case(s) => {
                RuleResult::Matched(pos + 1, ())
            }
            _ => RuleResult::Failed,
        }
    }

    /// Parse a word matching a specific string, ignoring case. The word may be
    /// either a keyword or an unquoted identifier. We use this for words like
    /// `NULLS` or `PARTITION` that are only special in specific contexts, and
    /// which don't normally need to be quoted when used as column names.
    pub fn word_eq(&self, pos: usize, s: &'static str) -> RuleResult<()> {
        match self.tokens.get(pos) {
            Some(Token::Keyword(Keyword { text, .. }))
            | Some(Token::Ident(Ident {
                name: text,
                quoted: false,
                ..
            })) if text.eq_ignore_ascii_case(s) => RuleResult::Matched(pos + 1, ()),
            _ => RuleResult::Failed,
        }
    }

    /// Parse any word, either a keyword or an unquoted identifier, returning
    /// its original spelling.
    pub fn any_word(&self, pos: usize) -> RuleResult<String> {
        match self.tokens.get(pos) {
            Some(Token::Keyword(Keyword { text, .. }))
            | Some(Token::Ident(Ident {
                name: text,
                quoted: false,
                ..
            })) => RuleResult::Matched(pos + 1, text.clone()),
            _ => RuleResult::Failed,
        }
    }

    /// Parse a punctuation token matching a specific string.
    pub fn punct_eq(&self, pos: usize, s: &'static str) -> RuleResult<()> {
        match self.tokens.get(pos) {
            Some(Token::Punct(punct)) if punct.text == s => RuleResult::Matched(pos + 1, ()),
            _ => RuleResult::Failed,
        }
    }
}

impl Parse for TokenStream {
    type PositionRepr = Loc;

    fn start(&self) -> usize {
        0
    }

    fn is_eof(&self, pos: usize) -> bool {
        pos >= self.tokens.len()
    }

    fn position_repr(&self, pos: usize) -> Self::PositionRepr {
        let offset = self
            .tokens
            .get(pos)
            .map(Token::start_offset)
            .unwrap_or(self.end_offset);
        Loc { offset }
    }
}

impl<'input> ParseElem<'input> for TokenStream {
    type Element = &'input Token;

    fn parse_elem(&'input self, pos: usize) -> RuleResult<Self::Element> {
        match self.tokens.get(pos) {
            Some(c) => RuleResult::Matched(pos + 1, c),
            None => RuleResult::Failed,
        }
    }
}

/// Convert `sql` into a series of tokens, using the lexical rules of
/// `dialect`. `filename` is only used for error messages.
pub fn tokenize_sql(filename: &str, sql: &str, dialect: &'static Dialect) -> Result<TokenStream> {
    match lexer::tokens(sql, dialect) {
        Ok(tokens) => Ok(TokenStream {
            tokens,
            end_offset: sql.len(),
        }),
        Err(err) => Err(SourceError::new(
            SourceErrorKind::Lex,
            filename,
            sql,
            err.location.offset,
            err.expected.tokens().map(|t| t.to_owned()),
        )
        .into()),
    }
}

/// Turn a one-character escape code into the character it stands for.
fn escaped_char(c: char) -> char {
    match c {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        '0' => '\0',
        'b' => '\x08',
        'Z' => '\x1A',
        other => other,
    }
}

peg::parser! {
    grammar lexer(dialect: &'static Dialect) for str {
        pub rule tokens() -> Vec<Token>
            = _ tokens:(t:token() _ { t })* { tokens }

        rule token() -> Token
            = literal:literal() { Token::Literal(literal) }
            / ident:quoted_ident() { Token::Ident(ident) }
            / word()
            / punct:punct() { Token::Punct(punct) }
            / unknown:unknown() { Token::Unknown(unknown) }

        rule literal() -> Literal
            = hex_number()
            / hex_string()
            / number()
            / string()

        rule hex_number() -> Literal
            = enabled(dialect.lexical.hex_numbers)
              s:position!() "0" ['x' | 'X'] digits:$(hex_digit()+) !ident_char() e:position!() {
                Literal { value: LiteralValue::Hex(digits.to_owned()), span: s..e }
            }

        rule hex_string() -> Literal
            = enabled(dialect.lexical.hex_strings)
              s:position!() ['x' | 'X'] "'" digits:$(hex_digit()*) "'" e:position!() {
                Literal { value: LiteralValue::Hex(digits.to_owned()), span: s..e }
            }

        rule number() -> Literal
            = s:position!()
              n:$((digits() ("." digits()?)? / "." digits()) exponent()?)
              e:position!() {
                Literal { value: LiteralValue::Number(n.to_owned()), span: s..e }
            }
        rule digits() = ['0'..='9']+
        rule exponent() = ['e' | 'E'] ['+' | '-']? digits()

        rule string() -> Literal
            = s:position!() q:string_quote() parts:quiet! { string_char(q)* } closing(q) e:position!() {
                Literal { value: LiteralValue::String(parts.concat()), span: s..e }
            }
        rule string_quote() -> char
            = [c if dialect.lexical.string_quotes.contains(&c)]
        // `\%` and `\_` keep their backslash, so that they still match a
        // literal `%` or `_` in a `LIKE` pattern.
        rule string_char(q: char) -> String
            = enabled(dialect.lexical.backslash_escapes) "\\" c:['%' | '_'] { format!("\\{}", c) }
            / enabled(dialect.lexical.backslash_escapes) "\\" c:[_] { escaped_char(c).to_string() }
            / [c if c == q] [c if c == q] { q.to_string() }
            / ch:[c if c != q] { ch.to_string() }

        rule quoted_ident() -> Ident
            = s:position!() quotes:identifier_quotes()
              chars:quiet! { quoted_ident_char(quotes.1)* } closing(quotes.1) e:position!() {
                Ident { name: chars.into_iter().collect(), quoted: true, span: s..e }
            }
        rule identifier_quotes() -> (char, char)
            = open:[c if dialect.lexical.identifier_close_quote(c).is_some()] {
                (open, dialect.lexical.identifier_close_quote(open).unwrap_or(open))
            }
        rule quoted_ident_char(close: char) -> char
            = [c if c == close] [c if c == close] { close }
            / [c if c != close]

        rule closing(q: char)
            = quiet! { [c if c == q] } / expected!("closing quote")

        rule word() -> Token
            = s:position!() w:$(ident_start() ident_char()*) e:position!() {
                if dialect.is_keyword(w) {
                    Token::Keyword(Keyword { text: w.to_owned(), span: s..e })
                } else {
                    Token::Ident(Ident { name: w.to_owned(), quoted: false, span: s..e })
                }
            }
        rule ident_start() = [c if is_ident_start(c)]
        rule ident_char() = [c if is_ident_char(c)]

        rule punct() -> Punct
            // When multiple tokens start with the same character, list them from
            // longest to shortest.
            = s:position!()
              p:$("<>" / "!=" / "<=" / ">=" / "||" / "::"
                  / "(" / ")" / "," / "." / ";" / "=" / "<" / ">"
                  / "+" / "-" / "*" / "/" !"*" / "%")
              e:position!() {
                Punct { text: p.to_owned(), span: s..e }
            }

        // Anything else, except the start of a quoted token or comment, which
        // must be properly closed.
        rule unknown() -> Punct
            = s:position!() !(quote_start() / "/*") c:$([_]) e:position!() {
                Punct { text: c.to_owned(), span: s..e }
            }
        rule quote_start() = [c if dialect.lexical.starts_quote(c)]

        rule hex_digit() = ['0'..='9' | 'a'..='f' | 'A'..='F']

        // Succeed without consuming input if `flag` is set.
        rule enabled(flag: bool)
            = quiet! { {? if flag { Ok(()) } else { Err("") } } }

        // Whitespace, including comments. We don't want whitespace to show up
        // as an "expected" token in error messages, so we enclose _most_ of
        // this in `quiet!`. The exception is the closing "*/" of a block
        // comment, which we want to mention explicitly.
        rule _ = (whitespace_char() / line_comment() / block_comment())*
        rule whitespace_char() = quiet! { [' ' | '\t' | '\r' | '\n'] }
        rule line_comment()
            = quiet! {
                ("--" / enabled(dialect.lexical.hash_comments) "#")
                (!['\n'] [_])* ("\n" / ![_])
            }
        rule block_comment() = quiet! { "/*" (!"*/" [_])* } "*/"
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dialects::DialectId;

    fn lex(sql: &str, id: DialectId) -> Vec<Token> {
        match tokenize_sql("test.sql", sql, id.dialect()) {
            Ok(tokens) => tokens.tokens,
            Err(err) => {
                err.emit();
                panic!("failed to tokenize {:?}", sql);
            }
        }
    }

    fn kinds(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
        tokens.iter().map(|t| (t.kind(), t.text())).collect()
    }

    #[test]
    fn tokenize_simple_select() {
        let tokens = lex("SELECT a, 'it''s' FROM t;", DialectId::SQLite);
        assert_eq!(
            kinds(&tokens),
            vec![
                (TokenKind::Keyword, "SELECT"),
                (TokenKind::Identifier, "a"),
                (TokenKind::Punctuation, ","),
                (TokenKind::String, "it's"),
                (TokenKind::Keyword, "FROM"),
                (TokenKind::Identifier, "t"),
                (TokenKind::Punctuation, ";"),
            ]
        );
        assert_eq!(tokens[1].start_offset(), 7);
        assert_eq!(tokens[3].span(), &(10..17));
    }

    #[test]
    fn keywords_depend_on_dialect() {
        let sqlite = lex("autoincrement", DialectId::SQLite);
        assert_eq!(sqlite[0].kind(), TokenKind::Keyword);
        let mysql = lex("autoincrement", DialectId::MySQL);
        assert_eq!(mysql[0].kind(), TokenKind::Identifier);
    }

    #[test]
    fn hex_literals_depend_on_dialect() {
        let sqlite = lex("0xCC x'cc'", DialectId::SQLite);
        assert_eq!(
            kinds(&sqlite),
            vec![(TokenKind::HexNumber, "CC"), (TokenKind::HexNumber, "cc")]
        );
        let postgres = lex("0xCC x'cc'", DialectId::Postgres);
        assert_eq!(
            kinds(&postgres),
            vec![
                (TokenKind::Number, "0"),
                (TokenKind::Identifier, "xCC"),
                (TokenKind::HexNumber, "cc"),
            ]
        );
    }

    #[test]
    fn numbers() {
        let tokens = lex("1 2.5 .5 1e10 3.", DialectId::Generic);
        assert_eq!(
            kinds(&tokens),
            vec![
                (TokenKind::Number, "1"),
                (TokenKind::Number, "2.5"),
                (TokenKind::Number, ".5"),
                (TokenKind::Number, "1e10"),
                (TokenKind::Number, "3."),
            ]
        );
    }

    #[test]
    fn quoted_identifiers() {
        let sqlite = lex("[a].\"b\"\"c\".`d`", DialectId::SQLite);
        assert_eq!(
            kinds(&sqlite),
            vec![
                (TokenKind::QuotedIdentifier, "a"),
                (TokenKind::Punctuation, "."),
                (TokenKind::QuotedIdentifier, "b\"c"),
                (TokenKind::Punctuation, "."),
                (TokenKind::QuotedIdentifier, "d"),
            ]
        );
        let mysql = lex("`a``b` \"str\"", DialectId::MySQL);
        assert_eq!(
            kinds(&mysql),
            vec![
                (TokenKind::QuotedIdentifier, "a`b"),
                (TokenKind::String, "str"),
            ]
        );
    }

    #[test]
    fn string_escapes_depend_on_dialect() {
        let mysql = lex(r"'it\'s\n'", DialectId::MySQL);
        assert_eq!(kinds(&mysql), vec![(TokenKind::String, "it's\n")]);
        let sqlite = lex(r"'a\'", DialectId::SQLite);
        assert_eq!(kinds(&sqlite), vec![(TokenKind::String, "a\\")]);
    }

    #[test]
    fn like_wildcard_escapes_keep_their_backslash() {
        let mysql = lex(r"'50\%' 'a\_b' 'c\\%'", DialectId::MySQL);
        assert_eq!(
            kinds(&mysql),
            vec![
                (TokenKind::String, r"50\%"),
                (TokenKind::String, r"a\_b"),
                (TokenKind::String, r"c\%"),
            ]
        );
    }

    #[test]
    fn identifiers_allow_unicode_and_dollars() {
        let texts = lex("café a$b", DialectId::Postgres)
            .iter()
            .map(|t| t.text().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(texts, vec!["café", "a$b"]);
    }

    #[test]
    fn operators_and_comments() {
        let tokens = lex(
            "a <> b -- note\n /* block */ || c::INT >= 1",
            DialectId::Postgres,
        );
        let texts = tokens.iter().map(|t| t.text()).collect::<Vec<_>>();
        assert_eq!(
            texts,
            vec!["a", "<>", "b", "||", "c", "::", "INT", ">=", "1"]
        );
    }

    #[test]
    fn hash_comments_only_in_mysql() {
        assert_eq!(lex("1 # note", DialectId::MySQL).len(), 1);
        let sqlite = lex("1 # note", DialectId::SQLite);
        assert_eq!(sqlite[1].kind(), TokenKind::Unknown);
    }

    #[test]
    fn unterminated_constructs_fail() {
        for (sql, expected) in [
            ("SELECT 'abc", "closing quote"),
            ("SELECT \"abc", "closing quote"),
            ("SELECT 1 /* abc", "*/"),
        ] {
            let err = tokenize_sql("test.sql", sql, DialectId::SQLite.dialect()).unwrap_err();
            let source = err.source_error().expect("should be a source error");
            assert_eq!(source.kind, SourceErrorKind::Lex);
            assert_eq!(source.offset, sql.len());
            assert_eq!(source.expected, vec![expected.to_owned()]);
        }
    }

    #[test]
    fn split_statements_at_top_level() {
        let tokens = tokenize_sql(
            "test.sql",
            "SELECT (1; 2); ; SELECT 3;",
            DialectId::Generic.dialect(),
        )
        .unwrap();
        let statements = tokens.split_statements();
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].tokens().len(), 6);
        assert_eq!(statements[1].tokens().len(), 2);
    }

    // A tiny grammar, to make sure `TokenStream` works as `peg` input.
    peg::parser! {
        grammar toy_parser() for TokenStream {
            pub rule select() -> Vec<String>
                = k("SELECT") names:(ident() ++ p(",")) { names }

            rule ident() -> String
                = ident:##ident() { ident.name }
                / expected!("identifier")

            rule k(s: &'static str)
                = ##keyword(s) / expected!(s)

            rule p(s: &'static str)
                = ##punct_eq(s) / expected!(s)
        }
    }

    #[test]
    fn toy_parser_operates_on_token_stream() {
        let tokens = tokenize_sql("test.sql", "select a, b", DialectId::Generic.dialect()).unwrap();
        let parsed = toy_parser::select(&tokens).unwrap();
        assert_eq!(parsed, vec!["a".to_owned(), "b".to_owned()]);

        let tokens = tokenize_sql("test.sql", "select a,", DialectId::Generic.dialect()).unwrap();
        let err = toy_parser::select(&tokens).unwrap_err();
        assert_eq!(err.location.offset, 9);
    }

    #[test]
    fn tokenize_sql_fixtures() {
        let tests_sql_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("sql");
        let tests_sql_str = tests_sql_path
            .to_str()
            .expect("tests/sql path is not valid UTF-8");

        for entry in
            glob::glob(&format!("{}/**/*.sql", tests_sql_str)).expect("failed to read glob pattern")
        {
            let path = entry.expect("failed to read glob entry");
            let sql = std::fs::read_to_string(&path).expect("failed to read SQL test file");
            let dialect = sql
                .lines()
                .find_map(|line| line.strip_prefix("--! read:"))
                .map(|name| name.parse::<DialectId>().expect("bad dialect"))
                .unwrap_or_default();
            let tokens = match tokenize_sql(&path.to_string_lossy(), &sql, dialect.dialect()) {
                Ok(tokens) => tokens,
                Err(err) => {
                    err.emit();
                    panic!("failed to tokenize {:?}", path);
                }
            };
            assert!(tokens
                .tokens()
                .iter()
                .all(|t| t.kind() != TokenKind::Unknown));
        }
    }
}
