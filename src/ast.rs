//! Our abstract syntax tree and parser.
//!
//! The tree is dialect-neutral. Every dialect's parser produces it and every
//! dialect's generator consumes it, so anything dialect-specific is resolved
//! while parsing: type spellings become [`DataTypeKind`]s, functions we know
//! how to rewrite become [`KnownFunction`]s or [`DateDiff`] nodes, and `ORDER
//! BY` keys record where the source dialect put NULLs.
//!
//! Nodes implement the following traits:
//!
//! - [`crate::emit::Emit`]: Write the node as SQL for a target dialect.
//! - [`Drive`] and [`DriveMut`]: Provided by the [`derive-visitor`
//!   crate](https://github.com/nikis05/derive-visitor). This lets us walk the
//!   tree generically using the [`derive_visitor::Visitor`] trait. Children are
//!   visited in field declaration order, which matches the order in which the
//!   clauses appear in SQL.
//! - [`Serialize`]: So that we can dump the tree as JSON.

// Don't bother with `Box`-ing everything for now. Allow huge enum values.
#![allow(clippy::large_enum_variant)]

use derive_visitor::{Drive, DriveMut};
use peg::error::ParseError;
use serde::Serialize;

use crate::{
    dialects::{Dialect, FunctionParse, UnitPosition},
    errors::{Error, Result, SourceError, SourceErrorKind},
    tokenizer::{self, tokenize_sql, Loc, TokenStream},
};

/// Canonical data types.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum DataTypeKind {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Decimal,
    Char,
    VarChar,
    NChar,
    NVarChar,
    Text,
    Binary,
    VarBinary,
    Blob,
    Date,
    Time,
    Timestamp,
    DateTime,
    Json,
    Uuid,
}

impl DataTypeKind {
    /// The name we use for this type inside the registry. This is also the
    /// spelling we write when a dialect has no opinion.
    pub fn canonical_name(self) -> &'static str {
        match self {
            DataTypeKind::Boolean => "BOOLEAN",
            DataTypeKind::TinyInt => "TINYINT",
            DataTypeKind::SmallInt => "SMALLINT",
            DataTypeKind::Int => "INT",
            DataTypeKind::BigInt => "BIGINT",
            DataTypeKind::Float => "FLOAT",
            DataTypeKind::Double => "DOUBLE",
            DataTypeKind::Decimal => "DECIMAL",
            DataTypeKind::Char => "CHAR",
            DataTypeKind::VarChar => "VARCHAR",
            DataTypeKind::NChar => "NCHAR",
            DataTypeKind::NVarChar => "NVARCHAR",
            DataTypeKind::Text => "TEXT",
            DataTypeKind::Binary => "BINARY",
            DataTypeKind::VarBinary => "VARBINARY",
            DataTypeKind::Blob => "BLOB",
            DataTypeKind::Date => "DATE",
            DataTypeKind::Time => "TIME",
            DataTypeKind::Timestamp => "TIMESTAMP",
            DataTypeKind::DateTime => "DATETIME",
            DataTypeKind::Json => "JSON",
            DataTypeKind::Uuid => "UUID",
        }
    }
}

/// The name of a type: either a canonical type, or a spelling we don't
/// recognize, preserved exactly as written.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum TypeName {
    Known(DataTypeKind),
    Custom(String),
}

/// Functions that some dialect spells differently, or rewrites.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum KnownFunction {
    /// The smallest of several arguments.
    Least,
    /// The largest of several arguments.
    Greatest,
    /// The aggregate `MIN`.
    Min,
    /// The aggregate `MAX`.
    Max,
    Levenshtein,
    Random,
}

impl KnownFunction {
    pub fn canonical_name(self) -> &'static str {
        match self {
            KnownFunction::Least => "LEAST",
            KnownFunction::Greatest => "GREATEST",
            KnownFunction::Min => "MIN",
            KnownFunction::Max => "MAX",
            KnownFunction::Levenshtein => "LEVENSHTEIN",
            KnownFunction::Random => "RANDOM",
        }
    }
}

/// Units for date differences.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum DateUnit {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl DateUnit {
    /// Upper-case keyword for this unit.
    pub fn keyword(self) -> &'static str {
        match self {
            DateUnit::Year => "YEAR",
            DateUnit::Quarter => "QUARTER",
            DateUnit::Month => "MONTH",
            DateUnit::Week => "WEEK",
            DateUnit::Day => "DAY",
            DateUnit::Hour => "HOUR",
            DateUnit::Minute => "MINUTE",
            DateUnit::Second => "SECOND",
        }
    }

    /// Look up a unit by name, accepting the usual abbreviations and plurals.
    pub fn from_name(name: &str) -> Option<DateUnit> {
        let lower = name.to_ascii_lowercase();
        let unit = match lower.as_str() {
            "year" | "yy" | "yyyy" | "y" => DateUnit::Year,
            "quarter" | "qq" | "q" => DateUnit::Quarter,
            "month" | "mm" | "mon" => DateUnit::Month,
            "week" | "wk" | "ww" | "w" => DateUnit::Week,
            "day" | "dd" | "d" => DateUnit::Day,
            "hour" | "hh" | "h" => DateUnit::Hour,
            "minute" | "mi" | "min" | "n" => DateUnit::Minute,
            "second" | "ss" | "sec" | "s" => DateUnit::Second,
            plural if plural.len() > 1 && plural.ends_with('s') => {
                return DateUnit::from_name(&plural[..plural.len() - 1]);
            }
            _ => return None,
        };
        Some(unit)
    }

    /// Read a unit from a function argument, which may be a string or a bare
    /// word.
    fn from_expression(expr: &Expression) -> Option<DateUnit> {
        match expr {
            Expression::Literal(LiteralValue::String(s)) => DateUnit::from_name(s),
            Expression::Column(ObjectName { parts }) => match &parts[..] {
                [part] if !part.quoted => DateUnit::from_name(&part.name),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Where NULLs go in a sort.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum NullsPlacement {
    First,
    Last,
}

impl NullsPlacement {
    pub fn keyword(self) -> &'static str {
        match self {
            NullsPlacement::First => "FIRST",
            NullsPlacement::Last => "LAST",
        }
    }
}

/// What to do when an `INSERT` would violate a constraint.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ConflictAction {
    Abort,
    Fail,
    Ignore,
    Replace,
    Rollback,
}

impl ConflictAction {
    pub fn keyword(self) -> &'static str {
        match self {
            ConflictAction::Abort => "ABORT",
            ConflictAction::Fail => "FAIL",
            ConflictAction::Ignore => "IGNORE",
            ConflictAction::Replace => "REPLACE",
            ConflictAction::Rollback => "ROLLBACK",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum UnaryOp {
    Not,
    Minus,
    Plus,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Concat,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Or => "OR",
            BinaryOp::And => "AND",
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Concat => "||",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }
}

/// `CURRENT_DATE` and friends.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum CurrentTimeKind {
    Date,
    Time,
    Timestamp,
}

impl CurrentTimeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            CurrentTimeKind::Date => "CURRENT_DATE",
            CurrentTimeKind::Time => "CURRENT_TIME",
            CurrentTimeKind::Timestamp => "CURRENT_TIMESTAMP",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum JoinKind {
    /// A plain `JOIN`.
    Join,
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

impl SetOperator {
    pub fn keyword(self) -> &'static str {
        match self {
            SetOperator::Union => "UNION",
            SetOperator::Intersect => "INTERSECT",
            SetOperator::Except => "EXCEPT",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum FrameUnits {
    Rows,
    Range,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum FrameBoundKind {
    UnboundedPreceding,
    Preceding,
    CurrentRow,
    Following,
    UnboundedFollowing,
}

/// Column constraints that are just keywords.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum SimpleConstraint {
    NotNull,
    Null,
    Unique,
    /// `AUTOINCREMENT`, `AUTO_INCREMENT` or similar.
    AutoIncrement,
}

/// `GENERATED ... AS IDENTITY`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum IdentityGeneration {
    Always,
    ByDefault,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ReferentialEvent {
    Delete,
    Update,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ReferentialAction {
    NoAction,
    Cascade,
    Restrict,
    SetNull,
    SetDefault,
}

impl ReferentialAction {
    pub fn keywords(self) -> &'static str {
        match self {
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::SetDefault => "SET DEFAULT",
        }
    }
}

/// `ON DELETE CASCADE`, etc.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct ReferentialTrigger {
    pub event: ReferentialEvent,
    pub action: ReferentialAction,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ObjectKind {
    Table,
    View,
}

/// A literal value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    /// A decimal number, exactly as written.
    Number(String),
    /// Upper-case hex digits, from either `0xCC` or `x'CC'`.
    Hex(String),
    String(String),
}

/// An identifier, such as a column or table name.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct Identifier {
    /// The name, with any quotes removed.
    #[drive(skip)]
    pub name: String,
    /// Was this quoted in the source? If so, we always quote it on output.
    #[drive(skip)]
    pub quoted: bool,
}

impl Identifier {
    /// Create a new unquoted identifier.
    pub fn new(name: &str) -> Identifier {
        Identifier {
            name: name.to_owned(),
            quoted: false,
        }
    }
}

/// A possibly-qualified name, like `schema.table` or `table.column`.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ObjectName {
    pub parts: Vec<Identifier>,
}

/// A series of SQL statements.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct SqlProgram {
    pub statements: Vec<Statement>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub enum Statement {
    Query(Query),
    Insert(InsertStatement),
    CreateTable(CreateTableStatement),
    CreateView(CreateViewStatement),
    Drop(DropStatement),
    Delete(DeleteStatement),
    /// A bare expression, which some tools pass us instead of a statement.
    Expression(Expression),
}

/// A query, including the clauses that apply to a whole set operation.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct Query {
    pub with: Option<WithClause>,
    pub body: QueryBody,
    pub order_by: Option<OrderBy>,
    pub limit: Option<Limit>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct WithClause {
    #[drive(skip)]
    pub recursive: bool,
    pub ctes: Vec<CommonTableExpression>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct CommonTableExpression {
    pub name: Identifier,
    pub columns: Vec<Identifier>,
    pub query: Box<Query>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub enum QueryBody {
    Select(Box<Select>),
    Nested(Box<Query>),
    SetOperation {
        left: Box<QueryBody>,
        #[drive(skip)]
        operator: SetOperator,
        #[drive(skip)]
        all: bool,
        right: Box<QueryBody>,
    },
}

/// A `SELECT` expression, without `ORDER BY` or `LIMIT`.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct Select {
    #[drive(skip)]
    pub distinct: bool,
    pub items: Vec<SelectItem>,
    pub from: Option<FromClause>,
    pub where_clause: Option<Expression>,
    pub group_by: Vec<Expression>,
    pub having: Option<Expression>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub enum SelectItem {
    /// `*` or `t.*`.
    Wildcard { table: Option<ObjectName> },
    Expression {
        expression: Expression,
        alias: Option<Identifier>,
    },
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct FromClause {
    pub items: Vec<FromItem>,
}

/// A relation, plus anything joined to it.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct FromItem {
    pub relation: Relation,
    pub joins: Vec<Join>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub enum Relation {
    Table {
        name: ObjectName,
        alias: Option<Identifier>,
    },
    Subquery {
        query: Box<Query>,
        alias: Option<Identifier>,
    },
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct Join {
    #[drive(skip)]
    pub kind: JoinKind,
    /// Did we see `OUTER`?
    #[drive(skip)]
    pub outer: bool,
    pub relation: Relation,
    pub constraint: Option<JoinConstraint>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub enum JoinConstraint {
    On(Expression),
    Using(Vec<Identifier>),
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct OrderBy {
    pub items: Vec<OrderByItem>,
}

/// A sort key. The NULL placement is always recorded, whether or not the
/// source said it out loud, because the generator needs to preserve the
/// source dialect's behavior.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct OrderByItem {
    pub expr: Expression,
    #[drive(skip)]
    pub direction: SortDirection,
    #[drive(skip)]
    pub nulls: NullsPlacement,
    #[drive(skip)]
    pub nulls_explicit: bool,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct Limit {
    pub count: Expression,
    pub offset: Option<Expression>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub enum Expression {
    Literal(#[drive(skip)] LiteralValue),
    Column(ObjectName),
    Unary {
        #[drive(skip)]
        op: UnaryOp,
        expr: Box<Expression>,
    },
    Binary {
        left: Box<Expression>,
        #[drive(skip)]
        op: BinaryOp,
        right: Box<Expression>,
    },
    IsNull {
        expr: Box<Expression>,
        #[drive(skip)]
        negated: bool,
    },
    InList {
        expr: Box<Expression>,
        #[drive(skip)]
        negated: bool,
        list: Vec<Expression>,
    },
    InSubquery {
        expr: Box<Expression>,
        #[drive(skip)]
        negated: bool,
        query: Box<Query>,
    },
    Between {
        expr: Box<Expression>,
        #[drive(skip)]
        negated: bool,
        low: Box<Expression>,
        high: Box<Expression>,
    },
    Like {
        expr: Box<Expression>,
        #[drive(skip)]
        negated: bool,
        pattern: Box<Expression>,
    },
    Case(CaseExpression),
    Cast(Cast),
    Extract {
        #[drive(skip)]
        field: String,
        expr: Box<Expression>,
    },
    Function(FunctionCall),
    DateDiff(DateDiff),
    CurrentTime(#[drive(skip)] CurrentTimeKind),
    /// An expression in parentheses. We keep these so that we never need to
    /// work out where parentheses are required when writing SQL back out.
    Nested(Box<Expression>),
    Subquery(Box<Query>),
    Exists(Box<Query>),
}

impl Expression {
    fn unary(op: UnaryOp, expr: Expression) -> Expression {
        Expression::Unary {
            op,
            expr: Box::new(expr),
        }
    }

    fn binary(left: Expression, op: BinaryOp, right: Expression) -> Expression {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Can this expression be placed next to an operator without adding
    /// parentheses?
    pub fn is_atomic(&self) -> bool {
        match self {
            Expression::Literal(LiteralValue::Number(n)) => !n.starts_with('-'),
            Expression::Literal(_)
            | Expression::Column(_)
            | Expression::Case(_)
            | Expression::Cast(_)
            | Expression::Extract { .. }
            | Expression::Function(_)
            | Expression::DateDiff(_)
            | Expression::CurrentTime(_)
            | Expression::Nested(_)
            | Expression::Subquery(_)
            | Expression::Exists(_) => true,
            Expression::Unary { .. }
            | Expression::Binary { .. }
            | Expression::IsNull { .. }
            | Expression::InList { .. }
            | Expression::InSubquery { .. }
            | Expression::Between { .. }
            | Expression::Like { .. } => false,
        }
    }
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct CaseExpression {
    pub operand: Option<Box<Expression>>,
    pub when_clauses: Vec<CaseWhen>,
    pub else_result: Option<Box<Expression>>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct CaseWhen {
    pub condition: Expression,
    pub result: Expression,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct Cast {
    pub expr: Box<Expression>,
    pub data_type: DataType,
}

/// A type, with any parameters exactly as written.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct DataType {
    #[drive(skip)]
    pub name: TypeName,
    #[drive(skip)]
    pub params: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum FunctionName {
    Known(KnownFunction),
    /// A function we don't rewrite, spelled as in the source.
    Other(ObjectName),
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct FunctionCall {
    #[drive(skip)]
    pub name: FunctionName,
    #[drive(skip)]
    pub distinct: bool,
    /// `COUNT(*)`.
    #[drive(skip)]
    pub star: bool,
    pub args: Vec<Expression>,
    pub over: Option<WindowSpec>,
}

/// The difference `end - start`, measured in `unit`s.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct DateDiff {
    pub end: Box<Expression>,
    pub start: Box<Expression>,
    #[drive(skip)]
    pub unit: DateUnit,
}

impl DateDiff {
    /// Interpret the arguments of a date difference function. Returns `None`
    /// if the arguments don't look like a date difference we understand.
    fn from_args(position: UnitPosition, args: &[Expression]) -> Option<DateDiff> {
        let (end, start, unit) = match (position, args) {
            (_, [end, start]) => (end, start, DateUnit::Day),
            (UnitPosition::Last, [end, start, unit]) => {
                (end, start, DateUnit::from_expression(unit)?)
            }
            (UnitPosition::First, [unit, start, end]) => {
                (end, start, DateUnit::from_expression(unit)?)
            }
            _ => return None,
        };
        Some(DateDiff {
            end: Box::new(end.clone()),
            start: Box::new(start.clone()),
            unit,
        })
    }
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct WindowSpec {
    pub partition_by: Vec<Expression>,
    pub order_by: Option<OrderBy>,
    pub frame: Option<WindowFrame>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct WindowFrame {
    #[drive(skip)]
    pub units: FrameUnits,
    pub start: FrameBound,
    pub end: Option<FrameBound>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct FrameBound {
    #[drive(skip)]
    pub kind: FrameBoundKind,
    /// The `n` in `n PRECEDING`.
    pub offset: Option<Box<Expression>>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct InsertStatement {
    #[drive(skip)]
    pub conflict: Option<ConflictAction>,
    pub table: ObjectName,
    pub columns: Vec<Identifier>,
    pub source: InsertSource,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub enum InsertSource {
    Values(Vec<Row>),
    Query(Box<Query>),
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct Row {
    pub values: Vec<Expression>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct CreateTableStatement {
    #[drive(skip)]
    pub temporary: bool,
    #[drive(skip)]
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub definition: TableDefinition,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub enum TableDefinition {
    Elements(Vec<TableElement>),
    As(Box<Query>),
}

/// Column definitions and table constraints, in source order.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub enum TableElement {
    Column(ColumnDefinition),
    Constraint(TableConstraint),
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ColumnDefinition {
    pub name: Identifier,
    /// SQLite allows columns without types.
    pub data_type: Option<DataType>,
    pub constraints: Vec<ColumnConstraint>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub enum ColumnConstraint {
    Simple(#[drive(skip)] SimpleConstraint),
    Default(Expression),
    /// `PRIMARY KEY`, with an optional sort order.
    PrimaryKey(#[drive(skip)] Option<SortDirection>),
    GeneratedIdentity(#[drive(skip)] IdentityGeneration),
    References {
        reference: ForeignKeyReference,
        #[drive(skip)]
        actions: Vec<ReferentialTrigger>,
    },
    Check(Expression),
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct TableConstraint {
    /// `CONSTRAINT name`
    pub name: Option<Identifier>,
    pub kind: TableConstraintKind,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub enum TableConstraintKind {
    PrimaryKey {
        columns: Vec<Identifier>,
    },
    Unique {
        columns: Vec<Identifier>,
    },
    ForeignKey {
        columns: Vec<Identifier>,
        /// SQLite lets us leave this out.
        references: Option<ForeignKeyReference>,
        #[drive(skip)]
        actions: Vec<ReferentialTrigger>,
    },
    Check {
        expr: Expression,
    },
}

/// `REFERENCES table (columns)`
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ForeignKeyReference {
    pub table: ObjectName,
    pub columns: Vec<Identifier>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct CreateViewStatement {
    #[drive(skip)]
    pub or_replace: bool,
    #[drive(skip)]
    pub temporary: bool,
    #[drive(skip)]
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub columns: Vec<Identifier>,
    pub query: Box<Query>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct DropStatement {
    #[drive(skip)]
    pub kind: ObjectKind,
    #[drive(skip)]
    pub if_exists: bool,
    pub name: ObjectName,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct DeleteStatement {
    pub table: ObjectName,
    pub where_clause: Option<Expression>,
}

/// Parse SQL written in `dialect`.
pub fn parse_sql(filename: &str, sql: &str, dialect: &'static Dialect) -> Result<SqlProgram> {
    let tokens = tokenize_sql(filename, sql, dialect)?;
    sql_program::sql_program(&tokens, dialect).map_err(|e| parse_error(filename, sql, e))
}

/// Parse a single statement from `tokens`, which must have been produced from
/// `sql` by [`tokenize_sql`].
pub fn parse_statement(
    filename: &str,
    sql: &str,
    tokens: &TokenStream,
    dialect: &'static Dialect,
) -> Result<Statement> {
    sql_program::single_statement(tokens, dialect).map_err(|e| parse_error(filename, sql, e))
}

/// Prepare a user-friendly error message.
fn parse_error(filename: &str, sql: &str, e: ParseError<Loc>) -> Error {
    SourceError::new(
        SourceErrorKind::Parse,
        filename,
        sql,
        e.location.offset,
        e.expected.tokens().map(|t| t.to_owned()),
    )
    .into()
}

impl From<tokenizer::Literal> for LiteralValue {
    fn from(literal: tokenizer::Literal) -> Self {
        match literal.value {
            tokenizer::LiteralValue::Number(n) => LiteralValue::Number(n),
            tokenizer::LiteralValue::Hex(digits) => LiteralValue::Hex(digits.to_ascii_uppercase()),
            tokenizer::LiteralValue::String(s) => LiteralValue::String(s),
        }
    }
}

impl From<tokenizer::Ident> for Identifier {
    fn from(ident: tokenizer::Ident) -> Self {
        Identifier {
            name: ident.name,
            quoted: ident.quoted,
        }
    }
}

/// Build a function call, recognizing the functions that `dialect` spells in
/// its own way.
fn function_call(
    dialect: &Dialect,
    name: ObjectName,
    distinct: bool,
    star: bool,
    args: Vec<Expression>,
    over: Option<WindowSpec>,
) -> Expression {
    let meaning = match &name.parts[..] {
        [part] if !part.quoted && !star => dialect.function_for(&part.name),
        _ => None,
    };
    let name = match meaning {
        Some(FunctionParse::Canonical(known)) => FunctionName::Known(known),
        Some(FunctionParse::ByArity { single, multiple }) => {
            if args.len() == 1 {
                FunctionName::Known(single)
            } else {
                FunctionName::Known(multiple)
            }
        }
        Some(FunctionParse::DateDiff(position)) if !distinct && over.is_none() => {
            match DateDiff::from_args(position, &args) {
                Some(date_diff) => return Expression::DateDiff(date_diff),
                None => FunctionName::Other(name),
            }
        }
        _ => FunctionName::Other(name),
    };
    Expression::Function(FunctionCall {
        name,
        distinct,
        star,
        args,
        over,
    })
}

// We use `rust-peg` to parse SQL. `rust-peg` uses a [Parsing Expression
// Grammar](https://en.wikipedia.org/wiki/Parsing_expression_grammar), which is
// conceptually sort of like a recursive regex with named rules.
//
// Grammar notes:
//   - We parse a `TokenStream`, not a string. See `crate::tokenizer`.
//   - Reserved keywords are matched using `k` (eg `k("SELECT")`), words that
//     are only special in context using `w` (eg `w("NULLS")`), and
//     punctuation using `p` (eg `p("(")`).
//   - Dialect extensions are guarded by `ext(flag)`, and always come before
//     the common rule they compete with. PEG alternatives are ordered, so
//     the extension wins whenever it matches.
peg::parser! {
    /// A grammar covering the SQL shared by our dialects, plus each dialect's
    /// extensions.
    pub grammar sql_program(dialect: &'static Dialect) for TokenStream {
        /// Main entry point.
        pub rule sql_program() -> SqlProgram
            = p(";")* statements:(statement() ** (p(";")+)) p(";")* {
                SqlProgram { statements }
            }

        /// Entry point for a single statement with no semicolons.
        pub rule single_statement() -> Statement
            = statement()

        rule statement() -> Statement
            = q:query() { Statement::Query(q) }
            / i:insert_statement() { Statement::Insert(i) }
            / c:create_table_statement() { Statement::CreateTable(c) }
            / c:create_view_statement() { Statement::CreateView(c) }
            / d:drop_statement() { Statement::Drop(d) }
            / d:delete_statement() { Statement::Delete(d) }
            / e:expression() { Statement::Expression(e) }

        rule query() -> Query
            = with:with_clause()? body:query_body() order_by:order_by()? limit:limit()? {
                Query { with, body, order_by, limit }
            }

        rule with_clause() -> WithClause
            = k("WITH") recursive:(w("RECURSIVE") { () })? ctes:(common_table_expression() ++ p(",")) {
                WithClause { recursive: recursive.is_some(), ctes }
            }

        rule common_table_expression() -> CommonTableExpression
            = name:ident() columns:column_list()? k("AS") p("(") query:query() p(")") {
                CommonTableExpression {
                    name,
                    columns: columns.unwrap_or_default(),
                    query: Box::new(query),
                }
            }

        rule query_body() -> QueryBody = precedence! {
            left:(@) operator:set_operator() all:set_quantifier() right:@ {
                QueryBody::SetOperation {
                    left: Box::new(left),
                    operator,
                    all,
                    right: Box::new(right),
                }
            }
            --
            select:select() { QueryBody::Select(Box::new(select)) }
            p("(") query:query() p(")") { QueryBody::Nested(Box::new(query)) }
        }

        rule set_operator() -> SetOperator
            = k("UNION") { SetOperator::Union }
            / k("INTERSECT") { SetOperator::Intersect }
            / k("EXCEPT") { SetOperator::Except }

        rule set_quantifier() -> bool
            = k("ALL") { true }
            / k("DISTINCT")? { false }

        rule select() -> Select
            = k("SELECT") distinct:(k("DISTINCT") { true } / k("ALL")? { false })
              items:(select_item() ++ p(","))
              from:from_clause()?
              where_clause:(k("WHERE") e:expression() { e })?
              group_by:(k("GROUP") k("BY") e:(expression() ++ p(",")) { e })?
              having:(k("HAVING") e:expression() { e })?
            {
                Select {
                    distinct,
                    items,
                    from,
                    where_clause,
                    group_by: group_by.unwrap_or_default(),
                    having,
                }
            }

        rule select_item() -> SelectItem
            = p("*") { SelectItem::Wildcard { table: None } }
            / table:object_name() p(".") p("*") { SelectItem::Wildcard { table: Some(table) } }
            / expression:expression() alias:alias()? { SelectItem::Expression { expression, alias } }

        rule alias() -> Identifier
            = k("AS")? alias:ident() { alias }

        rule from_clause() -> FromClause
            = k("FROM") items:(from_item() ++ p(",")) { FromClause { items } }

        rule from_item() -> FromItem
            = relation:relation() joins:join()* { FromItem { relation, joins } }

        rule relation() -> Relation
            = p("(") query:query() p(")") alias:alias()? {
                Relation::Subquery { query: Box::new(query), alias }
            }
            / name:object_name() alias:alias()? { Relation::Table { name, alias } }

        rule join() -> Join
            = k("CROSS") k("JOIN") relation:relation() {
                Join { kind: JoinKind::Cross, outer: false, relation, constraint: None }
            }
            / kind_outer:join_kind() k("JOIN") relation:relation() constraint:join_constraint()? {
                let (kind, outer) = kind_outer;
                Join { kind, outer, relation, constraint }
            }

        rule join_kind() -> (JoinKind, bool)
            = k("INNER") { (JoinKind::Inner, false) }
            / k("LEFT") outer:(k("OUTER") { () })? { (JoinKind::Left, outer.is_some()) }
            / k("RIGHT") outer:(k("OUTER") { () })? { (JoinKind::Right, outer.is_some()) }
            / k("FULL") outer:(k("OUTER") { () })? { (JoinKind::Full, outer.is_some()) }
            / { (JoinKind::Join, false) }

        rule join_constraint() -> JoinConstraint
            = k("ON") e:expression() { JoinConstraint::On(e) }
            / k("USING") columns:column_list() { JoinConstraint::Using(columns) }

        rule order_by() -> OrderBy
            = k("ORDER") k("BY") items:(order_by_item() ++ p(",")) { OrderBy { items } }

        /// Sort keys record the source dialect's NULL placement when no
        /// `NULLS` clause is given.
        rule order_by_item() -> OrderByItem
            = expr:expression() direction:sort_direction()? nulls:nulls_placement()? {
                let direction = direction.unwrap_or(SortDirection::Asc);
                OrderByItem {
                    expr,
                    direction,
                    nulls: nulls.unwrap_or_else(|| dialect.default_null_order(direction)),
                    nulls_explicit: nulls.is_some(),
                }
            }

        rule sort_direction() -> SortDirection
            = k("ASC") { SortDirection::Asc }
            / k("DESC") { SortDirection::Desc }

        rule nulls_placement() -> NullsPlacement
            = w("NULLS") placement:(w("FIRST") { NullsPlacement::First } / w("LAST") { NullsPlacement::Last }) {
                placement
            }

        /// `LIMIT n`, `LIMIT n OFFSET m`, or MySQL's `LIMIT m, n`.
        rule limit() -> Limit
            = k("LIMIT") offset:expression() p(",") count:expression() {
                Limit { count, offset: Some(offset) }
            }
            / k("LIMIT") count:expression() offset:(w("OFFSET") e:expression() { e })? {
                Limit { count, offset }
            }

        rule insert_statement() -> InsertStatement
            = prefix_conflict:insert_prefix()
              table:object_name()
              columns:column_list()?
              source:insert_source()
              suffix_conflict:on_conflict_do_nothing()?
            {
                InsertStatement {
                    conflict: prefix_conflict.or(suffix_conflict),
                    table,
                    columns: columns.unwrap_or_default(),
                    source,
                }
            }

        rule insert_prefix() -> Option<ConflictAction>
            = ext(dialect.grammar.insert_or_action) k("INSERT") k("OR") action:conflict_action() k("INTO") {
                Some(action)
            }
            / ext(dialect.grammar.insert_ignore) k("INSERT") w("IGNORE") k("INTO") {
                Some(ConflictAction::Ignore)
            }
            / ext(dialect.grammar.replace_into) w("REPLACE") k("INTO") {
                Some(ConflictAction::Replace)
            }
            / k("INSERT") k("INTO") { None }

        rule conflict_action() -> ConflictAction
            = w("ABORT") { ConflictAction::Abort }
            / w("FAIL") { ConflictAction::Fail }
            / w("IGNORE") { ConflictAction::Ignore }
            / w("REPLACE") { ConflictAction::Replace }
            / w("ROLLBACK") { ConflictAction::Rollback }

        rule on_conflict_do_nothing() -> ConflictAction
            = ext(dialect.grammar.on_conflict_do_nothing) k("ON") w("CONFLICT") w("DO") w("NOTHING") {
                ConflictAction::Ignore
            }

        rule insert_source() -> InsertSource
            = k("VALUES") rows:(row() ++ p(",")) { InsertSource::Values(rows) }
            / query:query() { InsertSource::Query(Box::new(query)) }

        rule row() -> Row
            = p("(") values:(expression() ** p(",")) p(")") { Row { values } }

        rule create_table_statement() -> CreateTableStatement
            = k("CREATE") temporary:temporary() k("TABLE") if_not_exists:if_not_exists()
              name:object_name() definition:table_definition()
            {
                CreateTableStatement { temporary, if_not_exists, name, definition }
            }

        rule table_definition() -> TableDefinition
            = p("(") elements:(table_element() ++ p(",")) p(")") { TableDefinition::Elements(elements) }
            / k("AS") query:query() { TableDefinition::As(Box::new(query)) }

        rule table_element() -> TableElement
            = constraint:table_constraint() { TableElement::Constraint(constraint) }
            / column:column_definition() { TableElement::Column(column) }

        rule column_definition() -> ColumnDefinition
            = name:ident() data_type:data_type()? constraints:column_constraint()* {
                ColumnDefinition { name, data_type, constraints }
            }

        rule column_constraint() -> ColumnConstraint
            = k("NOT") k("NULL") { ColumnConstraint::Simple(SimpleConstraint::NotNull) }
            / k("NULL") { ColumnConstraint::Simple(SimpleConstraint::Null) }
            / k("DEFAULT") e:expression_no_and() { ColumnConstraint::Default(e) }
            / k("UNIQUE") w("KEY")? { ColumnConstraint::Simple(SimpleConstraint::Unique) }
            / k("PRIMARY") w("KEY") ordering:sort_direction()? { ColumnConstraint::PrimaryKey(ordering) }
            / auto_increment() { ColumnConstraint::Simple(SimpleConstraint::AutoIncrement) }
            / w("GENERATED") generation:identity_generation() k("AS") w("IDENTITY") {
                ColumnConstraint::GeneratedIdentity(generation)
            }
            / reference:references() actions:referential_trigger()* {
                ColumnConstraint::References { reference, actions }
            }
            / k("CHECK") p("(") e:expression() p(")") { ColumnConstraint::Check(e) }

        /// Only matches in dialects that reserve one of these words.
        rule auto_increment()
            = k("AUTOINCREMENT") / k("AUTO_INCREMENT")

        rule identity_generation() -> IdentityGeneration
            = w("ALWAYS") { IdentityGeneration::Always }
            / k("BY") k("DEFAULT") { IdentityGeneration::ByDefault }

        rule table_constraint() -> TableConstraint
            = name:(k("CONSTRAINT") name:ident() { name })? kind:table_constraint_kind() {
                TableConstraint { name, kind }
            }

        rule table_constraint_kind() -> TableConstraintKind
            = k("PRIMARY") w("KEY") columns:column_list() { TableConstraintKind::PrimaryKey { columns } }
            / k("UNIQUE") w("KEY")? columns:column_list() { TableConstraintKind::Unique { columns } }
            / ext(dialect.grammar.foreign_key_without_references)
              k("FOREIGN") w("KEY") columns:column_list() !k("REFERENCES") actions:referential_trigger()*
            {
                TableConstraintKind::ForeignKey { columns, references: None, actions }
            }
            / k("FOREIGN") w("KEY") columns:column_list() reference:references() actions:referential_trigger()* {
                TableConstraintKind::ForeignKey { columns, references: Some(reference), actions }
            }
            / k("CHECK") p("(") expr:expression() p(")") { TableConstraintKind::Check { expr } }

        rule references() -> ForeignKeyReference
            = k("REFERENCES") table:object_name() columns:column_list()? {
                ForeignKeyReference { table, columns: columns.unwrap_or_default() }
            }

        rule referential_trigger() -> ReferentialTrigger
            = k("ON") event:(k("DELETE") { ReferentialEvent::Delete } / w("UPDATE") { ReferentialEvent::Update })
              action:referential_action()
            {
                ReferentialTrigger { event, action }
            }

        rule referential_action() -> ReferentialAction
            = w("NO") w("ACTION") { ReferentialAction::NoAction }
            / w("CASCADE") { ReferentialAction::Cascade }
            / w("RESTRICT") { ReferentialAction::Restrict }
            / w("SET") k("NULL") { ReferentialAction::SetNull }
            / w("SET") k("DEFAULT") { ReferentialAction::SetDefault }

        rule create_view_statement() -> CreateViewStatement
            = k("CREATE") or_replace:(k("OR") w("REPLACE"))? temporary:temporary() w("VIEW")
              if_not_exists:if_not_exists() name:object_name() columns:column_list()?
              k("AS") query:query()
            {
                CreateViewStatement {
                    or_replace: or_replace.is_some(),
                    temporary,
                    if_not_exists,
                    name,
                    columns: columns.unwrap_or_default(),
                    query: Box::new(query),
                }
            }

        rule drop_statement() -> DropStatement
            = k("DROP") kind:(k("TABLE") { ObjectKind::Table } / w("VIEW") { ObjectKind::View })
              if_exists:(w("IF") k("EXISTS"))? name:object_name()
            {
                DropStatement { kind, if_exists: if_exists.is_some(), name }
            }

        rule delete_statement() -> DeleteStatement
            = k("DELETE") k("FROM") table:object_name() where_clause:(k("WHERE") e:expression() { e })? {
                DeleteStatement { table, where_clause }
            }

        rule temporary() -> bool
            = (w("TEMPORARY") / w("TEMP")) { true }
            / { false }

        rule if_not_exists() -> bool
            = w("IF") k("NOT") k("EXISTS") { true }
            / { false }

        rule column_list() -> Vec<Identifier>
            = p("(") columns:(ident() ++ p(",")) p(")") { columns }

        /// Expressions.
        ///
        /// We split `expression` and `expression_no_and` because `AND` also
        /// appears in `x BETWEEN y AND z`, and we don't want to parse that as
        /// `x BETWEEN (y AND z)`. But `peg` is greedy and will do that if we
        /// let it.
        rule expression() -> Expression = precedence! {
            left:(@) k("OR") right:@ { Expression::binary(left, BinaryOp::Or, right) }
            --
            left:(@) k("AND") right:@ { Expression::binary(left, BinaryOp::And, right) }
            --
            expr:expression_no_and() { expr }
        }

        rule expression_no_and() -> Expression = precedence! {
            k("NOT") expr:@ { Expression::unary(UnaryOp::Not, expr) }
            --
            expr:(@) k("IS") negated:negated() k("NULL") {
                Expression::IsNull { expr: Box::new(expr), negated }
            }
            expr:(@) negated:negated() k("IN") p("(") query:query() p(")") {
                Expression::InSubquery { expr: Box::new(expr), negated, query: Box::new(query) }
            }
            expr:(@) negated:negated() k("IN") p("(") list:(expression() ++ p(",")) p(")") {
                Expression::InList { expr: Box::new(expr), negated, list }
            }
            expr:(@) negated:negated() k("BETWEEN") low:expression_no_and() k("AND") high:@ {
                Expression::Between {
                    expr: Box::new(expr),
                    negated,
                    low: Box::new(low),
                    high: Box::new(high),
                }
            }
            expr:(@) negated:negated() k("LIKE") pattern:@ {
                Expression::Like { expr: Box::new(expr), negated, pattern: Box::new(pattern) }
            }
            left:(@) p("=") right:@ { Expression::binary(left, BinaryOp::Eq, right) }
            left:(@) p("<>") right:@ { Expression::binary(left, BinaryOp::NotEq, right) }
            left:(@) p("!=") right:@ { Expression::binary(left, BinaryOp::NotEq, right) }
            left:(@) p("<") right:@ { Expression::binary(left, BinaryOp::Lt, right) }
            left:(@) p("<=") right:@ { Expression::binary(left, BinaryOp::LtEq, right) }
            left:(@) p(">") right:@ { Expression::binary(left, BinaryOp::Gt, right) }
            left:(@) p(">=") right:@ { Expression::binary(left, BinaryOp::GtEq, right) }
            --
            left:(@) p("||") right:@ { Expression::binary(left, BinaryOp::Concat, right) }
            --
            left:(@) p("+") right:@ { Expression::binary(left, BinaryOp::Add, right) }
            left:(@) p("-") right:@ { Expression::binary(left, BinaryOp::Sub, right) }
            --
            left:(@) p("*") right:@ { Expression::binary(left, BinaryOp::Mul, right) }
            left:(@) p("/") right:@ { Expression::binary(left, BinaryOp::Div, right) }
            left:(@) p("%") right:@ { Expression::binary(left, BinaryOp::Mod, right) }
            --
            p("-") expr:@ { Expression::unary(UnaryOp::Minus, expr) }
            p("+") expr:@ { Expression::unary(UnaryOp::Plus, expr) }
            --
            expr:(@) ext(dialect.grammar.double_colon_cast) p("::") data_type:data_type() {
                Expression::Cast(Cast { expr: Box::new(expr), data_type })
            }
            --
            k("CASE") operand:(!k("WHEN") e:expression() { e })? when_clauses:case_when()+
              else_result:(k("ELSE") e:expression() { e })? k("END")
            {
                Expression::Case(CaseExpression {
                    operand: operand.map(Box::new),
                    when_clauses,
                    else_result: else_result.map(Box::new),
                })
            }
            k("CAST") p("(") expr:expression() k("AS") data_type:data_type() p(")") {
                Expression::Cast(Cast { expr: Box::new(expr), data_type })
            }
            w("EXTRACT") p("(") field:##any_word() k("FROM") expr:expression() p(")") {
                Expression::Extract { field: field.to_ascii_uppercase(), expr: Box::new(expr) }
            }
            k("EXISTS") p("(") query:query() p(")") { Expression::Exists(Box::new(query)) }
            kind:current_time() { Expression::CurrentTime(kind) }
            call:function_call() { call }
            p("(") query:query() p(")") { Expression::Subquery(Box::new(query)) }
            p("(") expr:expression() p(")") { Expression::Nested(Box::new(expr)) }
            value:literal() { Expression::Literal(value) }
            name:object_name() { Expression::Column(name) }
        }

        rule negated() -> bool
            = k("NOT") { true }
            / { false }

        rule case_when() -> CaseWhen
            = k("WHEN") condition:expression() k("THEN") result:expression() {
                CaseWhen { condition, result }
            }

        /// These may be written with or without empty parentheses.
        rule current_time() -> CurrentTimeKind
            = kind:(
                k("CURRENT_DATE") { CurrentTimeKind::Date }
                / k("CURRENT_TIMESTAMP") { CurrentTimeKind::Timestamp }
                / k("CURRENT_TIME") { CurrentTimeKind::Time }
              )
              (p("(") p(")"))?
            {
                kind
            }

        rule function_call() -> Expression
            = name:function_name() p("(") distinct:(k("DISTINCT") { () })? args:function_args() p(")")
              over:over_clause()?
            {
                let (star, args) = args;
                function_call(dialect, name, distinct.is_some(), star, args, over)
            }

        rule function_name() -> ObjectName
            = object_name()
            // `LEFT` and `RIGHT` are reserved for joins, but they're also
            // common string functions.
            / quiet! { word:##any_word() {?
                if word.eq_ignore_ascii_case("LEFT") || word.eq_ignore_ascii_case("RIGHT") {
                    Ok(ObjectName { parts: vec![Identifier::new(&word)] })
                } else {
                    Err("function name")
                }
            } }

        rule function_args() -> (bool, Vec<Expression>)
            = p("*") { (true, vec![]) }
            / args:(expression() ** p(",")) { (false, args) }

        rule over_clause() -> WindowSpec
            = w("OVER") p("(")
              partition_by:(w("PARTITION") k("BY") e:(expression() ++ p(",")) { e })?
              order_by:order_by()?
              frame:window_frame()?
              p(")")
            {
                WindowSpec { partition_by: partition_by.unwrap_or_default(), order_by, frame }
            }

        rule window_frame() -> WindowFrame
            = units:(w("ROWS") { FrameUnits::Rows } / w("RANGE") { FrameUnits::Range })
              bounds:(
                  k("BETWEEN") start:frame_bound() k("AND") end:frame_bound() { (start, Some(end)) }
                  / start:frame_bound() { (start, None) }
              )
            {
                let (start, end) = bounds;
                WindowFrame { units, start, end }
            }

        rule frame_bound() -> FrameBound
            = w("UNBOUNDED") w("PRECEDING") { FrameBound { kind: FrameBoundKind::UnboundedPreceding, offset: None } }
            / w("UNBOUNDED") w("FOLLOWING") { FrameBound { kind: FrameBoundKind::UnboundedFollowing, offset: None } }
            / w("CURRENT") w("ROW") { FrameBound { kind: FrameBoundKind::CurrentRow, offset: None } }
            / e:expression_no_and() kind:(w("PRECEDING") { FrameBoundKind::Preceding } / w("FOLLOWING") { FrameBoundKind::Following }) {
                FrameBound { kind, offset: Some(Box::new(e)) }
            }

        rule literal() -> LiteralValue
            = k("NULL") { LiteralValue::Null }
            / k("TRUE") { LiteralValue::Boolean(true) }
            / k("FALSE") { LiteralValue::Boolean(false) }
            / literal:##literal() { LiteralValue::from(literal) }
            / expected!("literal")

        rule data_type() -> DataType
            = name:type_name() params:(p("(") params:(type_param() ++ p(",")) p(")") { params })? {
                DataType { name: dialect.canonical_for(&name), params: params.unwrap_or_default() }
            }

        rule type_name() -> String
            = w("DOUBLE") w("PRECISION") { "DOUBLE PRECISION".to_owned() }
            / w("CHARACTER") w("VARYING") { "CHARACTER VARYING".to_owned() }
            // `GENERATED` may follow a column name without a type.
            / !w("GENERATED") ident:##ident() {?
                if ident.quoted {
                    Err("type name")
                } else {
                    Ok(ident.name)
                }
            }
            / expected!("type name")

        rule type_param() -> String
            = literal:##literal() {?
                match literal.value {
                    tokenizer::LiteralValue::Number(n) => Ok(n),
                    _ => Err("number"),
                }
            }
            / word:##any_word() { word }

        rule object_name() -> ObjectName
            = parts:(ident() ++ p(".")) { ObjectName { parts } }

        rule ident() -> Identifier
            = ident:##ident() { Identifier::from(ident) }
            / expected!("identifier")

        /// Reserved keywords.
        rule k(kw: &'static str)
            = ##keyword(kw) / expected!(kw)

        /// Words that are only special in context, which may also be used as
        /// identifiers.
        rule w(word: &'static str)
            = ##word_eq(word) / expected!(word)

        /// Punctuation.
        rule p(punct: &'static str)
            = ##punct_eq(punct) / expected!(punct)

        /// Succeed without consuming input if this dialect enables a grammar
        /// extension.
        rule ext(flag: bool)
            = quiet! { {? if flag { Ok(()) } else { Err("") } } }
    }
}
