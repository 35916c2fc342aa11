/// Owned AST types for MOO-style programs.
///
/// Nodes are built once by the parser and never mutated. Each node keeps the
/// byte offsets of the tokens that introduced it; offsets are provenance only
/// and carry no meaning for evaluation.
use serde::Serialize;

/// Statement variants.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Stmt {
    /// A bare `;`.
    Empty { offset: usize },
    Expr { expr: Expr, offset: usize },
    Return { value: Expr, offset: usize },
    If(IfStmt),
    ForRange {
        var: String,
        var_offset: usize,
        /// Always an [`Expr::Range`].
        range: Expr,
        body: Vec<Stmt>,
        offset: usize,
    },
}

impl Stmt {
    pub fn offset(&self) -> usize {
        match self {
            Stmt::Empty { offset }
            | Stmt::Expr { offset, .. }
            | Stmt::Return { offset, .. }
            | Stmt::ForRange { offset, .. } => *offset,
            Stmt::If(stmt) => stmt.offset,
        }
    }
}

/// `if` / `elseif` clause with its optional continuation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Vec<Stmt>,
    pub else_branch: Option<ElseBranch>,
    /// Offset of the `if` or `elseif` keyword.
    pub offset: usize,
}

/// Else branch: either a chained `elseif` or a final `else` body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ElseBranch {
    ElseIf(Box<IfStmt>),
    Else { body: Vec<Stmt>, offset: usize },
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Expr {
    Identifier {
        name: String,
        offset: usize,
    },
    /// Literal kept as its raw source text; numeric interpretation is left to
    /// later stages.
    Literal {
        kind: LiteralKind,
        raw: String,
        offset: usize,
    },
    Parenthesized {
        inner: Box<Expr>,
        lparen: usize,
        rparen: usize,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        offset: usize,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        /// Offset of the operator token.
        offset: usize,
    },
    List {
        elements: Vec<Expr>,
        lbrace: usize,
        rbrace: usize,
    },
    /// `obj.name` or `obj.(expr)`. A computed name is stored as the bare
    /// inner expression.
    PropertyRef {
        object: Box<Expr>,
        property: Box<Expr>,
        offset: usize,
    },
    /// `obj:name(args)` or `obj:(expr)(args)`.
    VerbCall {
        object: Box<Expr>,
        verb: Box<Expr>,
        args: Vec<Expr>,
        offset: usize,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
        lbracket: usize,
        rbracket: usize,
    },
    Slice {
        object: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        lbracket: usize,
        rbracket: usize,
    },
    /// `[low..high]` with no object in front of it.
    Range {
        low: Box<Expr>,
        high: Box<Expr>,
        lbracket: usize,
        rbracket: usize,
    },
}

impl Expr {
    /// Offset of the leftmost token of the expression.
    pub fn offset(&self) -> usize {
        match self {
            Expr::Identifier { offset, .. }
            | Expr::Literal { offset, .. }
            | Expr::Unary { offset, .. } => *offset,
            Expr::Parenthesized { lparen, .. } => *lparen,
            Expr::List { lbrace, .. } => *lbrace,
            Expr::Range { lbracket, .. } => *lbracket,
            Expr::Binary { lhs, .. } => lhs.offset(),
            Expr::PropertyRef { object, .. }
            | Expr::VerbCall { object, .. }
            | Expr::Index { object, .. }
            | Expr::Slice { object, .. } => object.offset(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LiteralKind {
    Int,
    Float,
    String,
    ObjectRef,
}

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Assign,
    Or,
    And,
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Assign => "=",
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }

    /// Upper-case tag used by the tree printer.
    pub fn tag(self) -> &'static str {
        match self {
            BinaryOp::Assign => "ASSIGN",
            BinaryOp::Or => "OR",
            BinaryOp::And => "AND",
            BinaryOp::Eq => "EQ",
            BinaryOp::Neq => "NE",
            BinaryOp::Lt => "LT",
            BinaryOp::Le => "LE",
            BinaryOp::Gt => "GT",
            BinaryOp::Ge => "GE",
            BinaryOp::Add => "ADD",
            BinaryOp::Sub => "SUB",
            BinaryOp::Mul => "MUL",
            BinaryOp::Div => "DIV",
            BinaryOp::Mod => "MOD",
        }
    }
}

/// Prefix operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            UnaryOp::Plus => "ADD",
            UnaryOp::Neg => "SUB",
            UnaryOp::Not => "NOT",
        }
    }
}
