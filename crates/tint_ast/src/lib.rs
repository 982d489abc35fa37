pub mod diag;
pub mod scope;

pub use diag::Diagnostic;
pub use scope::ScopeStack;

use tint_lexer::Span;

/// A complete Tint stylesheet
#[derive(Debug, Clone)]
pub struct Stylesheet {
    pub items: Vec<Item>,
}

/// Top-level items
#[derive(Debug, Clone)]
pub enum Item {
    Rule(Stylerule),
    Variable(VariableAssignment),
}

/// A style rule: one or more selectors and a body
#[derive(Debug, Clone)]
pub struct Stylerule {
    pub selectors: Vec<Selector>,
    pub body: Vec<BodyItem>,
    pub span: Span,
}

/// Selector with span
#[derive(Debug, Clone)]
pub struct Selector {
    pub kind: SelectorKind,
    pub span: Span,
}

/// Selector kinds; class and id selectors keep their source marker (`.`, `#`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorKind {
    Tag(String),
    Class(String),
    Id(String),
}

impl SelectorKind {
    pub fn text(&self) -> &str {
        match self {
            SelectorKind::Tag(s) | SelectorKind::Class(s) | SelectorKind::Id(s) => s,
        }
    }
}

/// Items allowed inside a rule, if or else body
#[derive(Debug, Clone)]
pub enum BodyItem {
    Declaration(Declaration),
    Variable(VariableAssignment),
    If(IfClause),
}

/// Property declaration: `width: 10px;`
#[derive(Debug, Clone)]
pub struct Declaration {
    pub property: Ident,
    pub value: Expr,
    pub span: Span,
}

/// Variable assignment: `LinkColor := #ff0000;`
#[derive(Debug, Clone)]
pub struct VariableAssignment {
    pub name: Ident,
    pub value: Expr,
    pub span: Span,
}

/// Conditional block: `if [Cond] { ... } else { ... }`
#[derive(Debug, Clone)]
pub struct IfClause {
    pub condition: Expr,
    pub body: Vec<BodyItem>,
    pub else_clause: Option<ElseClause>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ElseClause {
    pub body: Vec<BodyItem>,
    pub span: Span,
}

/// Expressions
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Pixel literal: 10px
    Pixel(i32),
    /// Percentage literal: 50%
    Percentage(i32),
    /// Dimensionless integer literal: 3
    Scalar(i32),
    /// Color literal, marker included: #ff0000
    Color(String),
    /// Boolean literal: TRUE, FALSE
    Bool(bool),
    /// Variable reference: LinkColor
    Variable(String),
    /// Binary operation: a + b
    Binary(Box<Expr>, BinOp, Box<Expr>),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
}

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinOp::Add => write!(f, "+"),
            BinOp::Sub => write!(f, "-"),
            BinOp::Mul => write!(f, "*"),
        }
    }
}

/// Identifier with span
#[derive(Debug, Clone)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: String, span: Span) -> Self {
        Self { name, span }
    }
}

/// A folded literal value: what an expression evaluates to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Pixel(i32),
    Percentage(i32),
    Scalar(i32),
    Color(String),
    Bool(bool),
}

impl Value {
    /// Kind name for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Pixel(_) => "pixel",
            Value::Percentage(_) => "percentage",
            Value::Scalar(_) => "scalar",
            Value::Color(_) => "color",
            Value::Bool(_) => "boolean",
        }
    }

    pub fn into_expr_kind(self) -> ExprKind {
        match self {
            Value::Pixel(n) => ExprKind::Pixel(n),
            Value::Percentage(n) => ExprKind::Percentage(n),
            Value::Scalar(n) => ExprKind::Scalar(n),
            Value::Color(s) => ExprKind::Color(s),
            Value::Bool(b) => ExprKind::Bool(b),
        }
    }
}

impl Expr {
    /// The literal value of this expression, if it is already folded
    pub fn as_value(&self) -> Option<Value> {
        match &self.kind {
            ExprKind::Pixel(n) => Some(Value::Pixel(*n)),
            ExprKind::Percentage(n) => Some(Value::Percentage(*n)),
            ExprKind::Scalar(n) => Some(Value::Scalar(*n)),
            ExprKind::Color(s) => Some(Value::Color(s.clone())),
            ExprKind::Bool(b) => Some(Value::Bool(*b)),
            ExprKind::Variable(_) | ExprKind::Binary(..) => None,
        }
    }
}

// === Pretty Printing ===

impl Stylesheet {
    pub fn pretty_print(&self) -> String {
        let mut out = String::from("Stylesheet\n");
        for item in &self.items {
            match item {
                Item::Rule(rule) => out.push_str(&rule.pretty_print(1)),
                Item::Variable(var) => out.push_str(&var.pretty_print(1)),
            }
        }
        out
    }
}

impl Stylerule {
    pub fn pretty_print(&self, indent: usize) -> String {
        let ind = "  ".repeat(indent);
        let selectors = self
            .selectors
            .iter()
            .map(|s| s.kind.text())
            .collect::<Vec<_>>()
            .join(", ");
        let mut out = format!("{}Stylerule '{}'\n", ind, selectors);
        for item in &self.body {
            out.push_str(&item.pretty_print(indent + 1));
        }
        out
    }
}

impl BodyItem {
    pub fn pretty_print(&self, indent: usize) -> String {
        match self {
            BodyItem::Declaration(d) => d.pretty_print(indent),
            BodyItem::Variable(v) => v.pretty_print(indent),
            BodyItem::If(i) => i.pretty_print(indent),
        }
    }
}

impl Declaration {
    pub fn pretty_print(&self, indent: usize) -> String {
        let ind = "  ".repeat(indent);
        let mut out = format!("{}Declaration '{}' =\n", ind, self.property.name);
        out.push_str(&self.value.pretty_print_indented(indent + 1));
        out
    }
}

impl VariableAssignment {
    pub fn pretty_print(&self, indent: usize) -> String {
        let ind = "  ".repeat(indent);
        let mut out = format!("{}VariableAssignment '{}' =\n", ind, self.name.name);
        out.push_str(&self.value.pretty_print_indented(indent + 1));
        out
    }
}

impl IfClause {
    pub fn pretty_print(&self, indent: usize) -> String {
        let ind = "  ".repeat(indent);
        let mut out = format!("{}If\n", ind);
        out.push_str(&format!("{}condition:\n", "  ".repeat(indent + 1)));
        out.push_str(&self.condition.pretty_print_indented(indent + 2));
        out.push_str(&format!("{}then:\n", "  ".repeat(indent + 1)));
        for item in &self.body {
            out.push_str(&item.pretty_print(indent + 2));
        }
        if let Some(else_clause) = &self.else_clause {
            out.push_str(&format!("{}else:\n", "  ".repeat(indent + 1)));
            for item in &else_clause.body {
                out.push_str(&item.pretty_print(indent + 2));
            }
        }
        out
    }
}

impl Expr {
    /// Pretty print with indentation for full AST display
    pub fn pretty_print_indented(&self, indent: usize) -> String {
        let ind = "  ".repeat(indent);
        match &self.kind {
            ExprKind::Pixel(n) => format!("{}Pixel({})\n", ind, n),
            ExprKind::Percentage(n) => format!("{}Percentage({})\n", ind, n),
            ExprKind::Scalar(n) => format!("{}Scalar({})\n", ind, n),
            ExprKind::Color(s) => format!("{}Color({})\n", ind, s),
            ExprKind::Bool(b) => format!("{}Bool({})\n", ind, b),
            ExprKind::Variable(name) => format!("{}Variable({})\n", ind, name),
            ExprKind::Binary(l, op, r) => {
                let mut out = format!("{}Binary({})\n", ind, op);
                out.push_str(&l.pretty_print_indented(indent + 1));
                out.push_str(&r.pretty_print_indented(indent + 1));
                out
            }
        }
    }

    /// Compact pretty print (for inline display)
    pub fn pretty_print(&self) -> String {
        match &self.kind {
            ExprKind::Pixel(n) => format!("{}px", n),
            ExprKind::Percentage(n) => format!("{}%", n),
            ExprKind::Scalar(n) => format!("{}", n),
            ExprKind::Color(s) => s.clone(),
            ExprKind::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            ExprKind::Variable(name) => name.clone(),
            ExprKind::Binary(l, op, r) => {
                format!("({} {} {})", l.pretty_print(), op, r.pretty_print())
            }
        }
    }
}
