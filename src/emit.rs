//! Generating SQL from our AST.
//!
//! Every AST node implements [`Emit`], which writes the node to a
//! [`Generator`]. The generator holds the target [`Dialect`] and consults its
//! registry entries whenever a node has more than one possible spelling.
//! Children are always rendered through the same generator, so quoting, type
//! spellings and function rewrites apply at every depth.

use tracing::trace;

use crate::{
    ast::{
        CaseExpression, Cast, ColumnConstraint, ColumnDefinition,
        CommonTableExpression, ConflictAction, CreateTableStatement, CreateViewStatement,
        DataType, DateDiff, DateUnit, DeleteStatement, DropStatement, Expression, FrameBound,
        FrameBoundKind, FrameUnits, FromClause, FromItem, FunctionCall, FunctionName,
        IdentityGeneration, Identifier, InsertSource, InsertStatement, Join, JoinConstraint,
        JoinKind, Limit, LiteralValue, NullsPlacement, ObjectKind, ObjectName, OrderBy,
        OrderByItem, Query, QueryBody, ReferentialEvent, ReferentialTrigger, Relation, Row,
        Select, SelectItem, SimpleConstraint, SortDirection, SqlProgram, Statement,
        TableConstraint, TableConstraintKind, TableDefinition, TableElement, TypeName, UnaryOp,
        WindowFrame, WindowSpec, WithClause, ForeignKeyReference, DataTypeKind,
    },
    dialects::{
        AutoIncrementRendering, ConflictRendering, DateDiffRendering, Dialect, FunctionRendering,
        HexLiteralStyle, ParamPolicy, Scale, SingleArgument,
    },
    errors::{Error, Result},
    util::{hex_value, is_bare_ident},
};

/// Options for generating SQL.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GenerateOptions {
    /// Lay out statements one clause per line, with indentation.
    pub pretty: bool,
    /// Quote every identifier.
    pub identify: bool,
    /// Case-fold unquoted identifiers the way the target dialect would.
    pub normalize: bool,
}

/// Write an AST node as SQL.
pub trait Emit {
    fn emit(&self, g: &mut Generator) -> Result<()>;
}

impl<T: Emit + ?Sized> Emit for Box<T> {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        self.as_ref().emit(g)
    }
}

/// Accumulates generated SQL for one target dialect.
pub struct Generator {
    dialect: &'static Dialect,
    options: GenerateOptions,
    out: String,
    indent: usize,
}

impl Generator {
    pub fn new(dialect: &'static Dialect, options: GenerateOptions) -> Self {
        Generator {
            dialect,
            options,
            out: String::new(),
            indent: 0,
        }
    }

    pub fn dialect(&self) -> &'static Dialect {
        self.dialect
    }

    /// Return the generated text.
    pub fn finish(self) -> String {
        self.out
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Start a new line at the current indentation.
    fn newline(&mut self) {
        self.out.push('\n');
        let width = self.indent * self.dialect.layout.indent;
        self.out.extend(std::iter::repeat(' ').take(width));
    }

    /// Separate two clauses: a new line in pretty mode, a space otherwise.
    fn clause_break(&mut self) {
        if self.options.pretty {
            self.newline();
        } else {
            self.write(" ");
        }
    }

    fn indented<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.indent += 1;
        let result = f(self);
        self.indent -= 1;
        result
    }

    /// Write `items` separated by commas, on one line.
    fn comma_list<T: Emit>(&mut self, items: &[T]) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            item.emit(self)?;
        }
        Ok(())
    }

    /// Write the body of a clause like `SELECT` or `GROUP BY`. In pretty mode,
    /// each item goes on its own indented line.
    fn clause_list<T: Emit>(&mut self, items: &[T]) -> Result<()> {
        if self.options.pretty {
            self.indented(|g| {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        g.write(",");
                    }
                    g.newline();
                    item.emit(g)?;
                }
                Ok(())
            })
        } else {
            self.write(" ");
            self.comma_list(items)
        }
    }

    /// Write the body of a single-expression clause like `WHERE`.
    fn clause_body(&mut self, expr: &Expression) -> Result<()> {
        if self.options.pretty {
            self.indented(|g| {
                g.newline();
                expr.emit(g)
            })
        } else {
            self.write(" ");
            expr.emit(self)
        }
    }

    /// Write `( query )`, indenting the query in pretty mode.
    fn parenthesized_query(&mut self, query: &Query) -> Result<()> {
        self.write("(");
        if self.options.pretty {
            self.indented(|g| {
                g.newline();
                query.emit(g)
            })?;
            self.newline();
        } else {
            query.emit(self)?;
        }
        self.write(")");
        Ok(())
    }

    /// Write `(a, b)` with no leading space.
    fn column_list(&mut self, columns: &[Identifier]) -> Result<()> {
        self.write("(");
        self.comma_list(columns)?;
        self.write(")");
        Ok(())
    }

    /// Write an expression next to an operator, adding parentheses if it
    /// would otherwise bind differently.
    fn operand(&mut self, expr: &Expression) -> Result<()> {
        if expr.is_atomic() {
            expr.emit(self)
        } else {
            self.write("(");
            expr.emit(self)?;
            self.write(")");
            Ok(())
        }
    }

    fn write_not(&mut self, negated: bool) {
        if negated {
            self.write(" NOT");
        }
    }

    /// Write a canonical type using the target dialect's spelling.
    fn known_type(&mut self, kind: DataTypeKind, params: &[String]) {
        let spelling = self.dialect.type_for(kind);
        self.write(spelling.name);
        match spelling.params {
            ParamPolicy::Keep => self.type_params(params),
            ParamPolicy::Drop => {
                if !params.is_empty() {
                    trace!(kind = kind.canonical_name(), "dropping type parameters");
                }
            }
            ParamPolicy::Fixed(fixed) => {
                let fixed = fixed.iter().map(|p| p.to_string()).collect::<Vec<_>>();
                self.type_params(&fixed);
            }
        }
    }

    fn type_params(&mut self, params: &[String]) {
        if !params.is_empty() {
            self.write("(");
            self.write(&params.join(", "));
            self.write(")");
        }
    }
}

impl Emit for SqlProgram {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                g.write(";\n");
            }
            statement.emit(g)?;
        }
        Ok(())
    }
}

impl Emit for Statement {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        match self {
            Statement::Query(query) => query.emit(g),
            Statement::Insert(insert) => insert.emit(g),
            Statement::CreateTable(create) => create.emit(g),
            Statement::CreateView(create) => create.emit(g),
            Statement::Drop(drop) => drop.emit(g),
            Statement::Delete(delete) => delete.emit(g),
            Statement::Expression(expr) => expr.emit(g),
        }
    }
}

impl Emit for Query {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        if let Some(with) = &self.with {
            with.emit(g)?;
            g.clause_break();
        }
        self.body.emit(g)?;
        if let Some(order_by) = &self.order_by {
            g.clause_break();
            order_by.emit(g)?;
        }
        if let Some(limit) = &self.limit {
            g.clause_break();
            limit.emit(g)?;
        }
        Ok(())
    }
}

impl Emit for WithClause {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        g.write("WITH ");
        if self.recursive {
            g.write("RECURSIVE ");
        }
        g.comma_list(&self.ctes)
    }
}

impl Emit for CommonTableExpression {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        self.name.emit(g)?;
        if !self.columns.is_empty() {
            g.write(" ");
            g.column_list(&self.columns)?;
        }
        g.write(" AS ");
        g.parenthesized_query(&self.query)
    }
}

impl Emit for QueryBody {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        match self {
            QueryBody::Select(select) => select.emit(g),
            QueryBody::Nested(query) => g.parenthesized_query(query),
            QueryBody::SetOperation {
                left,
                operator,
                all,
                right,
            } => {
                left.emit(g)?;
                g.clause_break();
                g.write(operator.keyword());
                if *all {
                    g.write(" ALL");
                }
                g.clause_break();
                right.emit(g)
            }
        }
    }
}

impl Emit for Select {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        g.write("SELECT");
        if self.distinct {
            g.write(" DISTINCT");
        }
        g.clause_list(&self.items)?;
        if let Some(from) = &self.from {
            g.clause_break();
            from.emit(g)?;
        }
        if let Some(where_clause) = &self.where_clause {
            g.clause_break();
            g.write("WHERE");
            g.clause_body(where_clause)?;
        }
        if !self.group_by.is_empty() {
            g.clause_break();
            g.write("GROUP BY");
            g.clause_list(&self.group_by)?;
        }
        if let Some(having) = &self.having {
            g.clause_break();
            g.write("HAVING");
            g.clause_body(having)?;
        }
        Ok(())
    }
}

impl Emit for SelectItem {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        match self {
            SelectItem::Wildcard { table } => {
                if let Some(table) = table {
                    table.emit(g)?;
                    g.write(".");
                }
                g.write("*");
                Ok(())
            }
            SelectItem::Expression { expression, alias } => {
                expression.emit(g)?;
                if let Some(alias) = alias {
                    g.write(" AS ");
                    alias.emit(g)?;
                }
                Ok(())
            }
        }
    }
}

impl Emit for FromClause {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        g.write("FROM ");
        g.comma_list(&self.items)
    }
}

impl Emit for FromItem {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        self.relation.emit(g)?;
        for join in &self.joins {
            g.clause_break();
            join.emit(g)?;
        }
        Ok(())
    }
}

impl Emit for Relation {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        let alias = match self {
            Relation::Table { name, alias } => {
                name.emit(g)?;
                alias
            }
            Relation::Subquery { query, alias } => {
                g.parenthesized_query(query)?;
                alias
            }
        };
        if let Some(alias) = alias {
            g.write(" AS ");
            alias.emit(g)?;
        }
        Ok(())
    }
}

impl Emit for Join {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        let kind = match self.kind {
            JoinKind::Join => "",
            JoinKind::Inner => "INNER ",
            JoinKind::Left => "LEFT ",
            JoinKind::Right => "RIGHT ",
            JoinKind::Full => "FULL ",
            JoinKind::Cross => "CROSS ",
        };
        g.write(kind);
        if self.outer {
            g.write("OUTER ");
        }
        g.write("JOIN ");
        self.relation.emit(g)?;
        match &self.constraint {
            Some(JoinConstraint::On(expr)) => {
                g.write(" ON ");
                expr.emit(g)
            }
            Some(JoinConstraint::Using(columns)) => {
                g.write(" USING ");
                g.column_list(columns)
            }
            None => Ok(()),
        }
    }
}

impl Emit for OrderBy {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        g.write("ORDER BY");
        g.clause_list(&self.items)
    }
}

impl Emit for OrderByItem {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        let dialect = g.dialect;
        let target_default = dialect.default_null_order(self.direction);
        let force_nulls = self.nulls != target_default;
        if force_nulls && !dialect.nulls_clause {
            // No `NULLS` clause here, so sort on NULL-ness first.
            trace!(dialect = %dialect.id, nulls = ?self.nulls, "emulating NULLS placement");
            g.write("CASE WHEN ");
            g.operand(&self.expr)?;
            g.write(match self.nulls {
                NullsPlacement::Last => " IS NULL THEN 1 ELSE 0 END, ",
                NullsPlacement::First => " IS NULL THEN 0 ELSE 1 END, ",
            });
        }
        self.expr.emit(g)?;
        if self.direction == SortDirection::Desc {
            g.write(" DESC");
        }
        if force_nulls && dialect.nulls_clause {
            if !self.nulls_explicit {
                trace!(dialect = %dialect.id, nulls = ?self.nulls, "making NULLS placement explicit");
            }
            g.write(" NULLS ");
            g.write(self.nulls.keyword());
        }
        Ok(())
    }
}

impl Emit for Limit {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        g.write("LIMIT ");
        self.count.emit(g)?;
        if let Some(offset) = &self.offset {
            g.write(" OFFSET ");
            offset.emit(g)?;
        }
        Ok(())
    }
}

impl Emit for Identifier {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        let dialect = g.dialect;
        let name = if g.options.normalize && !self.quoted {
            dialect.fold_case(&self.name)
        } else {
            self.name.clone()
        };
        if self.quoted || g.options.identify || dialect.needs_quotes(&name) {
            g.write(&dialect.quoted_ident(&name).to_string());
        } else {
            g.write(&name);
        }
        Ok(())
    }
}

impl Emit for ObjectName {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                g.write(".");
            }
            part.emit(g)?;
        }
        Ok(())
    }
}

/// Hex strings hold whole bytes, so odd digit counts get a leading zero.
fn padded_hex(digits: &str) -> String {
    if digits.len() % 2 == 1 {
        format!("0{}", digits)
    } else {
        digits.to_owned()
    }
}

impl Emit for LiteralValue {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        match self {
            LiteralValue::Null => g.write("NULL"),
            LiteralValue::Boolean(true) => g.write("TRUE"),
            LiteralValue::Boolean(false) => g.write("FALSE"),
            LiteralValue::Number(n) => g.write(n),
            LiteralValue::String(s) => {
                let quoted = g.dialect.quoted_string(s).to_string();
                g.write(&quoted);
            }
            LiteralValue::Hex(digits) => match g.dialect.hex_literal {
                HexLiteralStyle::Quoted { prefix } => {
                    g.write(&format!("{}'{}'", prefix, padded_hex(digits)))
                }
                HexLiteralStyle::Decimal => match hex_value(digits) {
                    Some(value) => g.write(&value.to_string()),
                    None => {
                        trace!(digits = %digits, "hex literal too large for a decimal");
                        g.write(&format!("x'{}'", padded_hex(digits)));
                    }
                },
            },
        }
        Ok(())
    }
}

impl Emit for Expression {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        match self {
            Expression::Literal(value) => value.emit(g),
            Expression::Column(name) => name.emit(g),
            Expression::Unary { op, expr } => {
                match op {
                    UnaryOp::Not => g.write("NOT "),
                    UnaryOp::Minus => g.write("-"),
                    UnaryOp::Plus => g.write("+"),
                }
                // Don't write `--`, which starts a comment.
                if matches!(
                    expr.as_ref(),
                    Expression::Unary {
                        op: UnaryOp::Minus | UnaryOp::Plus,
                        ..
                    }
                ) {
                    g.write(" ");
                }
                expr.emit(g)
            }
            Expression::Binary { left, op, right } => {
                left.emit(g)?;
                g.write(" ");
                g.write(op.as_str());
                g.write(" ");
                right.emit(g)
            }
            Expression::IsNull { expr, negated } => {
                expr.emit(g)?;
                g.write(" IS");
                g.write_not(*negated);
                g.write(" NULL");
                Ok(())
            }
            Expression::InList {
                expr,
                negated,
                list,
            } => {
                expr.emit(g)?;
                g.write_not(*negated);
                g.write(" IN (");
                g.comma_list(list)?;
                g.write(")");
                Ok(())
            }
            Expression::InSubquery {
                expr,
                negated,
                query,
            } => {
                expr.emit(g)?;
                g.write_not(*negated);
                g.write(" IN ");
                g.parenthesized_query(query)
            }
            Expression::Between {
                expr,
                negated,
                low,
                high,
            } => {
                expr.emit(g)?;
                g.write_not(*negated);
                g.write(" BETWEEN ");
                low.emit(g)?;
                g.write(" AND ");
                high.emit(g)
            }
            Expression::Like {
                expr,
                negated,
                pattern,
            } => {
                expr.emit(g)?;
                g.write_not(*negated);
                g.write(" LIKE ");
                pattern.emit(g)
            }
            Expression::Case(case) => case.emit(g),
            Expression::Cast(cast) => cast.emit(g),
            Expression::Extract { field, expr } => {
                g.write("EXTRACT(");
                g.write(field);
                g.write(" FROM ");
                expr.emit(g)?;
                g.write(")");
                Ok(())
            }
            Expression::Function(call) => call.emit(g),
            Expression::DateDiff(date_diff) => date_diff.emit(g),
            Expression::CurrentTime(kind) => {
                g.write(kind.keyword());
                Ok(())
            }
            Expression::Nested(expr) => {
                g.write("(");
                expr.emit(g)?;
                g.write(")");
                Ok(())
            }
            Expression::Subquery(query) => g.parenthesized_query(query),
            Expression::Exists(query) => {
                g.write("EXISTS ");
                g.parenthesized_query(query)
            }
        }
    }
}

impl Emit for CaseExpression {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        g.write("CASE");
        if let Some(operand) = &self.operand {
            g.write(" ");
            operand.emit(g)?;
        }
        for when in &self.when_clauses {
            g.write(" WHEN ");
            when.condition.emit(g)?;
            g.write(" THEN ");
            when.result.emit(g)?;
        }
        if let Some(else_result) = &self.else_result {
            g.write(" ELSE ");
            else_result.emit(g)?;
        }
        g.write(" END");
        Ok(())
    }
}

impl Emit for Cast {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        let function = match &self.data_type.name {
            TypeName::Known(kind) => g.dialect.cast_function(*kind),
            TypeName::Custom(_) => None,
        };
        if let Some(function) = function {
            trace!(function, "rendering CAST as a function call");
            g.write(function);
            g.write("(");
            self.expr.emit(g)?;
            g.write(")");
        } else {
            g.write("CAST(");
            self.expr.emit(g)?;
            g.write(" AS ");
            self.data_type.emit(g)?;
            g.write(")");
        }
        Ok(())
    }
}

impl Emit for DataType {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        match &self.name {
            TypeName::Known(kind) => g.known_type(*kind, &self.params),
            TypeName::Custom(name) => {
                g.write(name);
                g.type_params(&self.params);
            }
        }
        Ok(())
    }
}

impl FunctionCall {
    /// Write our argument list, with parentheses.
    fn emit_args(&self, g: &mut Generator) -> Result<()> {
        g.write("(");
        if self.distinct {
            g.write("DISTINCT ");
        }
        if self.star {
            g.write("*");
        } else {
            g.comma_list(&self.args)?;
        }
        g.write(")");
        if let Some(over) = &self.over {
            g.write(" OVER (");
            over.emit(g)?;
            g.write(")");
        }
        Ok(())
    }
}

impl Emit for FunctionCall {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        let known = match &self.name {
            FunctionName::Known(known) => *known,
            FunctionName::Other(name) => {
                // Function names keep their source spelling.
                for (i, part) in name.parts.iter().enumerate() {
                    if i > 0 {
                        g.write(".");
                    }
                    if part.quoted || !is_bare_ident(&part.name) {
                        let quoted = g.dialect.quoted_ident(&part.name).to_string();
                        g.write(&quoted);
                    } else {
                        g.write(&part.name);
                    }
                }
                return self.emit_args(g);
            }
        };

        match g.dialect.function_rendering(known.canonical_name()) {
            FunctionRendering::Rename(name) => {
                g.write(name);
                self.emit_args(g)
            }
            FunctionRendering::ArityRename { .. } if self.distinct || self.over.is_some() => {
                // The renamed form would be read back as an aggregate.
                Err(Error::unsupported(
                    g.dialect.id,
                    format!("{} with DISTINCT or OVER", known.canonical_name()),
                ))
            }
            FunctionRendering::ArityRename { single, multiple } => {
                match (single, &self.args[..]) {
                    (SingleArgument::Unwrap, [arg]) => {
                        trace!(function = known.canonical_name(), "unwrapping single argument");
                        g.operand(arg)
                    }
                    (SingleArgument::Rename(name), [_]) => {
                        g.write(name);
                        self.emit_args(g)
                    }
                    _ => {
                        trace!(function = known.canonical_name(), renamed = multiple, "renaming by arity");
                        g.write(multiple);
                        self.emit_args(g)
                    }
                }
            }
            FunctionRendering::DateDiff(_) => Err(Error::generation(format!(
                "{} has a date difference rendering in {}",
                known.canonical_name(),
                g.dialect.id,
            ))),
        }
    }
}

impl Emit for DateDiff {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        let dialect = g.dialect;
        let rendering = match dialect.function_rendering("DATEDIFF") {
            FunctionRendering::DateDiff(rendering) => rendering,
            FunctionRendering::Rename(name) => {
                trace!(dialect = %dialect.id, name, "no DATEDIFF rewrite, using unit-last call");
                DateDiffRendering::UnitLast { name }
            }
            FunctionRendering::ArityRename { .. } => {
                return Err(Error::generation(format!(
                    "DATEDIFF cannot be renamed by arity in {}",
                    dialect.id
                )))
            }
        };

        match rendering {
            DateDiffRendering::UnitLast { name } => {
                g.write(name);
                g.write("(");
                self.end.emit(g)?;
                g.write(", ");
                self.start.emit(g)?;
                g.write(", ");
                let unit = dialect
                    .quoted_string(&self.unit.keyword().to_ascii_lowercase())
                    .to_string();
                g.write(&unit);
                g.write(")");
            }
            DateDiffRendering::UnitFirst { name } => {
                g.write(name);
                g.write("(");
                g.write(self.unit.keyword());
                g.write(", ");
                self.start.emit(g)?;
                g.write(", ");
                self.end.emit(g)?;
                g.write(")");
            }
            DateDiffRendering::DayNumberDelta {
                to_number,
                scales,
                cast_to,
            } => {
                let scale = self.scale(g, scales)?;
                trace!(dialect = %dialect.id, unit = ?self.unit, "expanding DATEDIFF over {}", to_number);
                g.write("CAST((");
                g.write(to_number);
                g.write("(");
                self.end.emit(g)?;
                g.write(") - ");
                g.write(to_number);
                g.write("(");
                self.start.emit(g)?;
                g.write("))");
                write_scale(g, scale);
                g.write(" AS ");
                g.known_type(cast_to, &[]);
                g.write(")");
            }
            DateDiffRendering::EpochDelta { seconds, cast_to } => {
                let scale = self.scale(g, seconds)?;
                trace!(dialect = %dialect.id, unit = ?self.unit, "expanding DATEDIFF over epoch seconds");
                g.write("CAST(EXTRACT(EPOCH FROM CAST(");
                self.end.emit(g)?;
                g.write(" AS ");
                g.known_type(DataTypeKind::Timestamp, &[]);
                g.write(") - CAST(");
                self.start.emit(g)?;
                g.write(" AS ");
                g.known_type(DataTypeKind::Timestamp, &[]);
                g.write("))");
                write_scale(g, scale);
                g.write(" AS ");
                g.known_type(cast_to, &[]);
                g.write(")");
            }
        }
        Ok(())
    }
}

impl DateDiff {
    /// Find the scale factor for our unit.
    fn scale(&self, g: &Generator, scales: &[(DateUnit, Scale)]) -> Result<Scale> {
        scales
            .iter()
            .find(|(unit, _)| *unit == self.unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(|| {
                Error::unsupported(
                    g.dialect.id,
                    format!("DATEDIFF by {}", self.unit.keyword()),
                )
            })
    }
}

fn write_scale(g: &mut Generator, scale: Scale) {
    match scale {
        Scale::Identity => {}
        Scale::Multiply(factor) => {
            g.write(" * ");
            g.write(factor);
        }
        Scale::Divide(divisor) => {
            g.write(" / ");
            g.write(divisor);
        }
    }
}

impl Emit for WindowSpec {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        let mut need_space = false;
        if !self.partition_by.is_empty() {
            g.write("PARTITION BY ");
            g.comma_list(&self.partition_by)?;
            need_space = true;
        }
        if let Some(order_by) = &self.order_by {
            if need_space {
                g.write(" ");
            }
            // Window ordering always stays on one line.
            g.write("ORDER BY ");
            g.comma_list(&order_by.items)?;
            need_space = true;
        }
        if let Some(frame) = &self.frame {
            if need_space {
                g.write(" ");
            }
            frame.emit(g)?;
        }
        Ok(())
    }
}

impl Emit for WindowFrame {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        g.write(match self.units {
            FrameUnits::Rows => "ROWS ",
            FrameUnits::Range => "RANGE ",
        });
        match &self.end {
            Some(end) => {
                g.write("BETWEEN ");
                self.start.emit(g)?;
                g.write(" AND ");
                end.emit(g)
            }
            None => self.start.emit(g),
        }
    }
}

impl Emit for FrameBound {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        if let Some(offset) = &self.offset {
            offset.emit(g)?;
            g.write(" ");
        }
        g.write(match self.kind {
            FrameBoundKind::UnboundedPreceding => "UNBOUNDED PRECEDING",
            FrameBoundKind::Preceding => "PRECEDING",
            FrameBoundKind::CurrentRow => "CURRENT ROW",
            FrameBoundKind::Following => "FOLLOWING",
            FrameBoundKind::UnboundedFollowing => "UNBOUNDED FOLLOWING",
        });
        Ok(())
    }
}

impl Emit for InsertStatement {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        let dialect = g.dialect;
        let mut suffix = None;
        match (self.conflict, dialect.insert_conflict) {
            (None, _) => g.write("INSERT INTO "),
            (Some(action), ConflictRendering::OrAction) => {
                g.write("INSERT OR ");
                g.write(action.keyword());
                g.write(" INTO ");
            }
            (Some(ConflictAction::Ignore), ConflictRendering::IgnoreOrReplaceKeyword) => {
                g.write("INSERT IGNORE INTO ")
            }
            (Some(ConflictAction::Replace), ConflictRendering::IgnoreOrReplaceKeyword) => {
                g.write("REPLACE INTO ")
            }
            (Some(ConflictAction::Ignore), ConflictRendering::OnConflictDoNothing) => {
                g.write("INSERT INTO ");
                suffix = Some(" ON CONFLICT DO NOTHING");
            }
            (Some(action), _) => {
                return Err(Error::unsupported(
                    dialect.id,
                    format!("INSERT OR {}", action.keyword()),
                ))
            }
        }
        self.table.emit(g)?;
        if !self.columns.is_empty() {
            g.write(" ");
            g.column_list(&self.columns)?;
        }
        g.clause_break();
        self.source.emit(g)?;
        if let Some(suffix) = suffix {
            g.write(suffix);
        }
        Ok(())
    }
}

impl Emit for InsertSource {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        match self {
            InsertSource::Values(rows) => {
                g.write("VALUES");
                g.clause_list(rows)
            }
            InsertSource::Query(query) => query.emit(g),
        }
    }
}

impl Emit for Row {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        g.write("(");
        g.comma_list(&self.values)?;
        g.write(")");
        Ok(())
    }
}

impl Emit for CreateTableStatement {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        g.write("CREATE ");
        if self.temporary {
            g.write("TEMPORARY ");
        }
        g.write("TABLE ");
        if self.if_not_exists {
            g.write("IF NOT EXISTS ");
        }
        self.name.emit(g)?;
        match &self.definition {
            TableDefinition::Elements(elements) => {
                g.write(" (");
                if g.options.pretty {
                    g.indented(|g| {
                        for (i, element) in elements.iter().enumerate() {
                            if i > 0 {
                                g.write(",");
                            }
                            g.newline();
                            element.emit(g)?;
                        }
                        Ok(())
                    })?;
                    g.newline();
                } else {
                    g.comma_list(elements)?;
                }
                g.write(")");
                Ok(())
            }
            TableDefinition::As(query) => {
                g.write(" AS");
                g.clause_break();
                query.emit(g)
            }
        }
    }
}

impl Emit for TableElement {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        match self {
            TableElement::Column(column) => column.emit(g),
            TableElement::Constraint(constraint) => constraint.emit(g),
        }
    }
}

impl Emit for ColumnDefinition {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        self.name.emit(g)?;
        if let Some(data_type) = &self.data_type {
            g.write(" ");
            data_type.emit(g)?;
        }

        // Identity columns put the identity clause first, and need to be
        // NOT NULL.
        let auto_increment = ColumnConstraint::Simple(SimpleConstraint::AutoIncrement);
        let identity = g.dialect.auto_increment == AutoIncrementRendering::Identity
            && self.constraints.contains(&auto_increment);
        if identity {
            trace!(dialect = %g.dialect.id, "rewriting auto-increment as an identity column");
            g.write(" GENERATED BY DEFAULT AS IDENTITY");
            let not_null = ColumnConstraint::Simple(SimpleConstraint::NotNull);
            if !self.constraints.contains(&not_null) {
                g.write(" NOT NULL");
            }
        }
        for constraint in &self.constraints {
            if identity && *constraint == auto_increment {
                continue;
            }
            g.write(" ");
            constraint.emit(g)?;
        }
        Ok(())
    }
}

impl Emit for ColumnConstraint {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        match self {
            ColumnConstraint::Simple(simple) => match simple {
                SimpleConstraint::NotNull => g.write("NOT NULL"),
                SimpleConstraint::Null => g.write("NULL"),
                SimpleConstraint::Unique => g.write("UNIQUE"),
                SimpleConstraint::AutoIncrement => match g.dialect.auto_increment {
                    AutoIncrementRendering::Keyword(keyword) => g.write(keyword),
                    AutoIncrementRendering::Identity => {
                        g.write("GENERATED BY DEFAULT AS IDENTITY")
                    }
                },
            },
            ColumnConstraint::Default(expr) => {
                g.write("DEFAULT ");
                expr.emit(g)?;
            }
            ColumnConstraint::PrimaryKey(direction) => {
                g.write("PRIMARY KEY");
                match direction {
                    Some(SortDirection::Asc) => g.write(" ASC"),
                    Some(SortDirection::Desc) => g.write(" DESC"),
                    None => {}
                }
            }
            ColumnConstraint::GeneratedIdentity(generation) => {
                match (g.dialect.auto_increment, generation) {
                    (AutoIncrementRendering::Keyword(keyword), _) => {
                        trace!(dialect = %g.dialect.id, "rewriting identity column as {}", keyword);
                        g.write(keyword)
                    }
                    (AutoIncrementRendering::Identity, IdentityGeneration::Always) => {
                        g.write("GENERATED ALWAYS AS IDENTITY")
                    }
                    (AutoIncrementRendering::Identity, IdentityGeneration::ByDefault) => {
                        g.write("GENERATED BY DEFAULT AS IDENTITY")
                    }
                }
            }
            ColumnConstraint::References { reference, actions } => {
                reference.emit(g)?;
                emit_triggers(g, actions);
            }
            ColumnConstraint::Check(expr) => {
                g.write("CHECK (");
                expr.emit(g)?;
                g.write(")");
            }
        }
        Ok(())
    }
}

impl Emit for TableConstraint {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        if let Some(name) = &self.name {
            g.write("CONSTRAINT ");
            name.emit(g)?;
            g.write(" ");
        }
        match &self.kind {
            TableConstraintKind::PrimaryKey { columns } => {
                g.write("PRIMARY KEY ");
                g.column_list(columns)?;
            }
            TableConstraintKind::Unique { columns } => {
                g.write("UNIQUE ");
                g.column_list(columns)?;
            }
            TableConstraintKind::ForeignKey {
                columns,
                references,
                actions,
            } => {
                g.write("FOREIGN KEY ");
                g.column_list(columns)?;
                match references {
                    Some(reference) => {
                        g.write(" ");
                        reference.emit(g)?;
                    }
                    None if g.dialect.grammar.foreign_key_without_references => {}
                    None => {
                        return Err(Error::unsupported(
                            g.dialect.id,
                            "FOREIGN KEY without REFERENCES",
                        ))
                    }
                }
                emit_triggers(g, actions);
            }
            TableConstraintKind::Check { expr } => {
                g.write("CHECK (");
                expr.emit(g)?;
                g.write(")");
            }
        }
        Ok(())
    }
}

impl Emit for ForeignKeyReference {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        g.write("REFERENCES ");
        self.table.emit(g)?;
        if !self.columns.is_empty() {
            g.column_list(&self.columns)?;
        }
        Ok(())
    }
}

fn emit_triggers(g: &mut Generator, triggers: &[ReferentialTrigger]) {
    for trigger in triggers {
        g.write(match trigger.event {
            ReferentialEvent::Delete => " ON DELETE ",
            ReferentialEvent::Update => " ON UPDATE ",
        });
        g.write(trigger.action.keywords());
    }
}

impl Emit for CreateViewStatement {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        g.write("CREATE ");
        if self.or_replace {
            g.write("OR REPLACE ");
        }
        if self.temporary {
            g.write("TEMPORARY ");
        }
        g.write("VIEW ");
        if self.if_not_exists {
            g.write("IF NOT EXISTS ");
        }
        self.name.emit(g)?;
        if !self.columns.is_empty() {
            g.write(" ");
            g.column_list(&self.columns)?;
        }
        g.write(" AS");
        g.clause_break();
        self.query.emit(g)
    }
}

impl Emit for DropStatement {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        g.write(match self.kind {
            ObjectKind::Table => "DROP TABLE ",
            ObjectKind::View => "DROP VIEW ",
        });
        if self.if_exists {
            g.write("IF EXISTS ");
        }
        self.name.emit(g)
    }
}

impl Emit for DeleteStatement {
    fn emit(&self, g: &mut Generator) -> Result<()> {
        g.write("DELETE FROM ");
        self.table.emit(g)?;
        if let Some(where_clause) = &self.where_clause {
            g.clause_break();
            g.write("WHERE");
            g.clause_body(where_clause)?;
        }
        Ok(())
    }
}
