/// Printers for the AST.
///
/// `Display` on [`Expr`] and [`Stmt`] renders the tag tree used in tests and
/// by `moo parse`, e.g. `Binary(Identifier(a), ADD, Literal(1))`. Offsets are
/// never printed, so two trees print the same exactly when they have the same
/// shape.
///
/// [`to_source`] and [`expr_to_source`] render canonical source text that
/// parses back to the same tree, string literals included.

use std::fmt;

use crate::ast::{ElseBranch, Expr, IfStmt, LiteralKind, Stmt};

const INDENT: &str = "    ";

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier { name, .. } => write!(f, "Identifier({name})"),
            Expr::Literal { raw, .. } => write!(f, "Literal({raw})"),
            Expr::Parenthesized { inner, .. } => write!(f, "Parenthesized({inner})"),
            Expr::Unary { op, operand, .. } => write!(f, "Unary({}, {operand})", op.tag()),
            Expr::Binary { op, lhs, rhs, .. } => {
                write!(f, "Binary({lhs}, {}, {rhs})", op.tag())
            }
            Expr::List { elements, .. } => {
                f.write_str("List(")?;
                write_seq(f, elements)?;
                f.write_str(")")
            }
            Expr::PropertyRef {
                object, property, ..
            } => write!(f, "PropertyRef({object}, {property})"),
            Expr::VerbCall {
                object, verb, args, ..
            } => {
                write!(f, "VerbCall({object}, {verb}, ")?;
                write_seq(f, args)?;
                f.write_str(")")
            }
            Expr::Index { object, index, .. } => write!(f, "Index({object}, {index})"),
            Expr::Slice {
                object, low, high, ..
            } => write!(f, "Slice({object}, {low}, {high})"),
            Expr::Range { low, high, .. } => write!(f, "Range({low}, {high})"),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Empty { .. } => f.write_str("Empty"),
            Stmt::Expr { expr, .. } => write!(f, "Expr({expr})"),
            Stmt::Return { value, .. } => write!(f, "Return({value})"),
            Stmt::If(stmt) => fmt::Display::fmt(stmt, f),
            Stmt::ForRange {
                var, range, body, ..
            } => {
                write!(f, "ForRange({var}, {range}, ")?;
                write_seq(f, body)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for IfStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "If({}, ", self.condition)?;
        write_seq(f, &self.then_body)?;
        match &self.else_branch {
            Some(branch) => write!(f, ", {branch})"),
            None => f.write_str(")"),
        }
    }
}

impl fmt::Display for ElseBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElseBranch::ElseIf(clause) => fmt::Display::fmt(clause, f),
            ElseBranch::Else { body, .. } => {
                f.write_str("Else(")?;
                write_seq(f, body)?;
                f.write_str(")")
            }
        }
    }
}

fn write_seq<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        fmt::Display::fmt(item, f)?;
    }
    f.write_str("]")
}

// ============================================================================
// Canonical source
// ============================================================================

/// Render statements as source, one per line, bodies indented by four spaces.
///
/// ```
/// use moo_parser::{parse_program, printer::to_source};
///
/// let stmts = parse_program("if (a) x=1; else y; endif").unwrap();
/// assert_eq!(to_source(&stmts), "if (a)\n    x = 1;\nelse\n    y;\nendif\n");
/// ```
pub fn to_source(stmts: &[Stmt]) -> String {
    let mut w = SourceWriter::default();
    w.block(stmts, 0);
    w.out
}

/// Render one expression as source. Only a second string literal breaks the
/// line.
pub fn expr_to_source(expr: &Expr) -> String {
    let mut w = SourceWriter::default();
    w.expr(expr);
    w.out
}

/// A string literal extends to the last quote on its line, so at most one
/// string may be written per line; later ones go on a continuation line.
#[derive(Default)]
struct SourceWriter {
    out: String,
    depth: usize,
    string_on_line: bool,
}

impl SourceWriter {
    fn start_line(&mut self, depth: usize) {
        self.depth = depth;
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
    }

    fn end_line(&mut self) {
        let len = self.out.trim_end_matches(' ').len();
        self.out.truncate(len);
        self.out.push('\n');
        self.string_on_line = false;
    }

    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn string_literal(&mut self, raw: &str) {
        if self.string_on_line {
            self.end_line();
            for _ in 0..=self.depth {
                self.out.push_str(INDENT);
            }
        }
        self.push(raw);
        self.string_on_line = true;
    }

    fn block(&mut self, stmts: &[Stmt], depth: usize) {
        for stmt in stmts {
            self.stmt(stmt, depth);
        }
    }

    fn stmt(&mut self, stmt: &Stmt, depth: usize) {
        self.start_line(depth);
        match stmt {
            Stmt::Empty { .. } => self.push(";"),
            Stmt::Expr { expr, .. } => {
                self.expr(expr);
                self.push(";");
            }
            Stmt::Return { value, .. } => {
                self.push("return ");
                self.expr(value);
                self.push(";");
            }
            Stmt::If(clause) => {
                self.push("if ");
                self.if_clause(clause, depth);
                self.start_line(depth);
                self.push("endif");
            }
            Stmt::ForRange {
                var, range, body, ..
            } => {
                self.push("for ");
                self.push(var);
                self.push(" in ");
                self.expr(range);
                self.end_line();
                self.block(body, depth + 1);
                self.start_line(depth);
                self.push("endfor");
            }
        }
        self.end_line();
    }

    /// Condition and bodies of an `if` chain, after the leading keyword and
    /// before the shared `endif`.
    fn if_clause(&mut self, clause: &IfStmt, depth: usize) {
        self.expr(&clause.condition);
        // A `;` right after the condition ends the header, so an empty first
        // statement needs a second one.
        if matches!(clause.then_body.first(), Some(Stmt::Empty { .. })) {
            self.push(";");
        }
        self.end_line();
        self.block(&clause.then_body, depth + 1);
        match &clause.else_branch {
            Some(ElseBranch::ElseIf(next)) => {
                self.start_line(depth);
                self.push("elseif ");
                self.if_clause(next, depth);
            }
            Some(ElseBranch::Else { body, .. }) => {
                self.start_line(depth);
                self.push("else");
                self.end_line();
                self.block(body, depth + 1);
            }
            None => {}
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Identifier { name, .. } => self.push(name),
            Expr::Literal {
                kind: LiteralKind::String,
                raw,
                ..
            } => self.string_literal(raw),
            Expr::Literal { raw, .. } => self.push(raw),
            Expr::Parenthesized { inner, .. } => {
                self.push("(");
                self.expr(inner);
                self.push(")");
            }
            Expr::Unary { op, operand, .. } => {
                self.push(op.symbol());
                self.expr(operand);
            }
            Expr::Binary { op, lhs, rhs, .. } => {
                self.expr(lhs);
                self.push(" ");
                self.push(op.symbol());
                self.push(" ");
                self.expr(rhs);
            }
            Expr::List { elements, .. } => {
                self.push("{");
                self.args(elements);
                self.push("}");
            }
            Expr::PropertyRef {
                object, property, ..
            } => {
                self.expr(object);
                self.push(".");
                self.member_name(property);
            }
            Expr::VerbCall {
                object, verb, args, ..
            } => {
                self.expr(object);
                self.push(":");
                self.member_name(verb);
                self.push("(");
                self.args(args);
                self.push(")");
            }
            Expr::Index { object, index, .. } => {
                self.expr(object);
                self.push("[");
                self.expr(index);
                self.push("]");
            }
            Expr::Slice {
                object, low, high, ..
            } => {
                self.expr(object);
                self.bounds(low, high);
            }
            Expr::Range { low, high, .. } => self.bounds(low, high),
        }
    }

    /// Bare identifier, or a computed name in parentheses.
    fn member_name(&mut self, name: &Expr) {
        if let Expr::Identifier { name, .. } = name {
            self.push(name);
            return;
        }
        self.push("(");
        self.expr(name);
        self.push(")");
    }

    fn bounds(&mut self, low: &Expr, high: &Expr) {
        self.push("[");
        self.expr(low);
        self.push("..");
        self.expr(high);
        self.push("]");
    }

    fn args(&mut self, exprs: &[Expr]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.expr(expr);
        }
    }
}
