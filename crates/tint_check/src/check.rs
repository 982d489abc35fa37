//! Semantic checking pass

use crate::types::ExprType;
use tint_ast::*;
use tint_lexer::Span;

/// Scope-aware validation pass.
///
/// Collects every error it finds instead of stopping at the first one; the
/// caller treats a non-empty result as a failed compilation. The tree is
/// never modified.
pub struct Checker {
    /// Innermost scope last; a variable's type is looked up innermost-first
    variable_types: ScopeStack<Option<ExprType>>,
    diagnostics: Vec<Diagnostic>,
}

impl Checker {
    fn new() -> Self {
        Self {
            variable_types: ScopeStack::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Check a stylesheet and return every diagnostic found.
    pub fn check(sheet: &Stylesheet) -> Vec<Diagnostic> {
        let mut checker = Checker::new();
        checker.check_stylesheet(sheet);
        checker.diagnostics
    }

    fn error(&mut self, message: String, span: Span) {
        self.diagnostics.push(Diagnostic::new(message, span));
    }

    fn check_stylesheet(&mut self, sheet: &Stylesheet) {
        self.variable_types.push_scope(); // global scope

        for item in &sheet.items {
            match item {
                Item::Variable(var) => self.check_variable_assignment(var),
                Item::Rule(rule) => {
                    // A scope per stylerule keeps variables rule-local
                    self.variable_types.push_scope();
                    self.check_body(&rule.body);
                    self.variable_types.pop_scope();
                }
            }
        }

        self.variable_types.pop_scope();
    }

    fn check_body(&mut self, body: &[BodyItem]) {
        for item in body {
            match item {
                BodyItem::Declaration(decl) => self.check_declaration(decl),
                BodyItem::Variable(var) => self.check_variable_assignment(var),
                BodyItem::If(if_clause) => {
                    self.variable_types.push_scope();
                    self.check_if_clause(if_clause);
                    self.variable_types.pop_scope();
                }
            }
        }
    }

    fn check_if_clause(&mut self, if_clause: &IfClause) {
        self.check_expr(&if_clause.condition);

        // An unknown condition type already produced a diagnostic at the
        // reference; only a *known* non-boolean is reported here.
        if let Some(ty) = self.expr_type(&if_clause.condition) {
            if ty != ExprType::Bool {
                self.error(
                    format!("if condition must be a boolean, found {}", ty),
                    if_clause.condition.span,
                );
            }
        }

        self.check_body(&if_clause.body);
        if let Some(else_clause) = &if_clause.else_clause {
            self.check_body(&else_clause.body);
        }
    }

    fn check_variable_assignment(&mut self, var: &VariableAssignment) {
        let ty = self.expr_type(&var.value);
        self.variable_types.bind(&var.name.name, ty);
        self.check_expr(&var.value);
    }

    fn check_declaration(&mut self, decl: &Declaration) {
        self.check_expr(&decl.value);

        // An undefined reference already has its diagnostic
        if let ExprKind::Variable(name) = &decl.value.kind {
            if self.variable_types.lookup(name).is_none() {
                return;
            }
        }

        let ty = self.expr_type(&decl.value);
        match decl.property.name.as_str() {
            "width" | "height" => {
                if !matches!(ty, Some(ExprType::Pixel) | Some(ExprType::Percentage)) {
                    self.error(
                        format!(
                            "property '{}' needs a pixel or percentage value",
                            decl.property.name
                        ),
                        decl.span,
                    );
                }
            }
            "color" | "background-color" => {
                if ty != Some(ExprType::Color) {
                    self.error(
                        format!("property '{}' needs a color value", decl.property.name),
                        decl.span,
                    );
                }
            }
            _ => {
                self.error(
                    format!("'{}' is not a valid property", decl.property.name),
                    decl.property.span,
                );
            }
        }
    }

    fn check_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Variable(name) => {
                if self.variable_types.lookup(name).is_none() {
                    self.error(
                        format!("variable '{}' is not defined in the current scope", name),
                        expr.span,
                    );
                }
            }
            ExprKind::Binary(lhs, op, rhs) => {
                // Both operands first, so nested errors all surface
                self.check_expr(lhs);
                self.check_expr(rhs);
                self.check_operation(*op, lhs, rhs, expr.span);
            }
            _ => {}
        }
    }

    fn check_operation(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr, span: Span) {
        let lhs_type = self.expr_type(lhs);
        let rhs_type = self.expr_type(rhs);

        // Colors are never arithmetic operands
        if lhs_type == Some(ExprType::Color) || rhs_type == Some(ExprType::Color) {
            self.error(
                format!("color may not be used in a {} operation", op_name(op)),
                span,
            );
            return;
        }

        // An unknown operand type already has a diagnostic at its reference
        let (Some(lhs_type), Some(rhs_type)) = (lhs_type, rhs_type) else {
            return;
        };

        match op {
            BinOp::Mul => {
                if lhs_type != ExprType::Scalar && rhs_type != ExprType::Scalar {
                    self.error(
                        "multiply operation needs at least one scalar operand".to_string(),
                        span,
                    );
                }
            }
            BinOp::Add | BinOp::Sub => {
                if lhs_type != rhs_type {
                    self.error(
                        format!("cannot {} {} and {}", op_name(op), lhs_type, rhs_type),
                        span,
                    );
                }
            }
        }
    }

    /// The type of an expression, computed bottom-up. `None` means unknown:
    /// an unresolved reference or an operation with no defined result.
    fn expr_type(&self, expr: &Expr) -> Option<ExprType> {
        match &expr.kind {
            ExprKind::Pixel(_) => Some(ExprType::Pixel),
            ExprKind::Percentage(_) => Some(ExprType::Percentage),
            ExprKind::Scalar(_) => Some(ExprType::Scalar),
            ExprKind::Color(_) => Some(ExprType::Color),
            ExprKind::Bool(_) => Some(ExprType::Bool),
            ExprKind::Variable(name) => self.variable_types.lookup(name).copied().flatten(),
            ExprKind::Binary(lhs, op, rhs) => {
                let lhs_type = self.expr_type(lhs)?;
                let rhs_type = self.expr_type(rhs)?;
                match op {
                    BinOp::Mul => {
                        if lhs_type == ExprType::Scalar {
                            Some(rhs_type)
                        } else if rhs_type == ExprType::Scalar {
                            Some(lhs_type)
                        } else {
                            None
                        }
                    }
                    BinOp::Add | BinOp::Sub => {
                        if lhs_type == rhs_type {
                            Some(lhs_type)
                        } else {
                            None
                        }
                    }
                }
            }
        }
    }
}

fn op_name(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "add",
        BinOp::Sub => "subtract",
        BinOp::Mul => "multiply",
    }
}
