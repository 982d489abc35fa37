//! Constant folding and conditional elimination

use tint_ast::*;
use tint_lexer::Span;

/// Tree-rewriting pass producing a minimized stylesheet.
///
/// The pass is total: it runs whether or not the checker found problems,
/// and every failure it meets (undefined reference, operand combination
/// with no value rule, non-boolean condition) is recorded as a diagnostic
/// instead of aborting. Callers are expected to discard the output tree
/// when any diagnostics exist.
pub struct Evaluator {
    /// Innermost scope last; a variable's value is looked up innermost-first
    variable_values: ScopeStack<Value>,
    diagnostics: Vec<Diagnostic>,
}

impl Evaluator {
    fn new() -> Self {
        Self {
            variable_values: ScopeStack::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Evaluate a stylesheet into its minimized form.
    pub fn evaluate(sheet: &Stylesheet) -> (Stylesheet, Vec<Diagnostic>) {
        let mut evaluator = Evaluator::new();
        let minimized = evaluator.eval_stylesheet(sheet);
        (minimized, evaluator.diagnostics)
    }

    fn error(&mut self, message: String, span: Span) {
        self.diagnostics.push(Diagnostic::new(message, span));
    }

    fn eval_stylesheet(&mut self, sheet: &Stylesheet) -> Stylesheet {
        self.variable_values.push_scope(); // global scope

        let mut items = Vec::new();
        for item in &sheet.items {
            match item {
                // Assignments bind their value and vanish from the output
                Item::Variable(var) => self.eval_variable_assignment(var),
                Item::Rule(rule) => items.push(Item::Rule(self.eval_stylerule(rule))),
            }
        }

        self.variable_values.pop_scope();
        Stylesheet { items }
    }

    fn eval_variable_assignment(&mut self, var: &VariableAssignment) {
        if let Some(value) = self.eval_expr(&var.value) {
            self.variable_values.bind(&var.name.name, value);
        }
    }

    fn eval_stylerule(&mut self, rule: &Stylerule) -> Stylerule {
        self.variable_values.push_scope();

        let mut body = Vec::new();
        for item in &rule.body {
            self.eval_body_item(item, &mut body);
        }

        self.variable_values.pop_scope();
        Stylerule {
            selectors: rule.selectors.clone(),
            body,
            span: rule.span,
        }
    }

    /// Process one body item into the accumulator. If-clauses never reach
    /// the accumulator themselves; the surviving branch is flattened into
    /// it, in source order.
    fn eval_body_item(&mut self, item: &BodyItem, out: &mut Vec<BodyItem>) {
        match item {
            BodyItem::Declaration(decl) => {
                out.push(BodyItem::Declaration(self.eval_declaration(decl)));
            }
            BodyItem::Variable(var) => self.eval_variable_assignment(var),
            BodyItem::If(if_clause) => {
                let selected = match self.eval_expr(&if_clause.condition) {
                    Some(Value::Bool(true)) => Some(&if_clause.body),
                    Some(Value::Bool(false)) => {
                        if_clause.else_clause.as_ref().map(|e| &e.body)
                    }
                    Some(value) => {
                        self.error(
                            format!(
                                "if condition must be a boolean, found {}",
                                value.kind_name()
                            ),
                            if_clause.condition.span,
                        );
                        None
                    }
                    // A failed fold already carries its diagnostic
                    None => None,
                };

                if let Some(selected) = selected {
                    for child in selected {
                        self.eval_body_item(child, out);
                    }
                }
            }
        }
    }

    fn eval_declaration(&mut self, decl: &Declaration) -> Declaration {
        match self.eval_expr(&decl.value) {
            Some(value) => Declaration {
                property: decl.property.clone(),
                value: Expr {
                    kind: value.into_expr_kind(),
                    span: decl.value.span,
                },
                span: decl.span,
            },
            // Fail-soft: the failure is recorded, the expression stays
            None => decl.clone(),
        }
    }

    /// Fold an expression to its value, or record why it cannot be folded.
    fn eval_expr(&mut self, expr: &Expr) -> Option<Value> {
        match &expr.kind {
            ExprKind::Variable(name) => match self.variable_values.lookup(name) {
                Some(value) => Some(value.clone()),
                None => {
                    self.error(
                        format!("variable '{}' is not defined in the current scope", name),
                        expr.span,
                    );
                    None
                }
            },
            ExprKind::Binary(lhs, op, rhs) => {
                let lhs_value = self.eval_expr(lhs);
                let rhs_value = self.eval_expr(rhs);
                // A failed operand is already reported; don't pile on
                let (Some(lhs_value), Some(rhs_value)) = (lhs_value, rhs_value) else {
                    return None;
                };
                self.apply_operation(*op, lhs_value, rhs_value, expr.span)
            }
            _ => expr.as_value(),
        }
    }

    /// Unit propagation: multiply needs a scalar side, add/subtract need
    /// equal kinds among pixel, percentage and scalar.
    fn apply_operation(
        &mut self,
        op: BinOp,
        lhs: Value,
        rhs: Value,
        span: Span,
    ) -> Option<Value> {
        use Value::*;

        let result = match (op, &lhs, &rhs) {
            (BinOp::Mul, Scalar(a), Pixel(b)) | (BinOp::Mul, Pixel(b), Scalar(a)) => {
                Some(Pixel(a * b))
            }
            (BinOp::Mul, Scalar(a), Percentage(b)) | (BinOp::Mul, Percentage(b), Scalar(a)) => {
                Some(Percentage(a * b))
            }
            (BinOp::Mul, Scalar(a), Scalar(b)) => Some(Scalar(a * b)),

            (BinOp::Add, Pixel(a), Pixel(b)) => Some(Pixel(a + b)),
            (BinOp::Add, Percentage(a), Percentage(b)) => Some(Percentage(a + b)),
            (BinOp::Add, Scalar(a), Scalar(b)) => Some(Scalar(a + b)),

            (BinOp::Sub, Pixel(a), Pixel(b)) => Some(Pixel(a - b)),
            (BinOp::Sub, Percentage(a), Percentage(b)) => Some(Percentage(a - b)),
            (BinOp::Sub, Scalar(a), Scalar(b)) => Some(Scalar(a - b)),

            _ => None,
        };

        if result.is_none() {
            self.error(
                format!(
                    "cannot {} {} and {}",
                    op_name(op),
                    lhs.kind_name(),
                    rhs.kind_name()
                ),
                span,
            );
        }
        result
    }
}

fn op_name(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "add",
        BinOp::Sub => "subtract",
        BinOp::Mul => "multiply",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tint_parser::Parser;

    fn eval_source(source: &str) -> (Stylesheet, Vec<Diagnostic>) {
        let sheet = Parser::parse(source).unwrap();
        Evaluator::evaluate(&sheet)
    }

    fn rule_declarations(sheet: &Stylesheet, index: usize) -> Vec<(String, String)> {
        let Item::Rule(rule) = &sheet.items[index] else {
            panic!("expected a style rule at {}", index);
        };
        rule.body
            .iter()
            .map(|item| match item {
                BodyItem::Declaration(d) => {
                    (d.property.name.clone(), d.value.pretty_print())
                }
                other => panic!("unexpected body item: {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_assignments_are_folded_away() {
        let (sheet, diagnostics) = eval_source(
            "Width := 10px;\n\
             p { width: Width; }",
        );
        assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);
        assert_eq!(sheet.items.len(), 1);
        assert_eq!(
            rule_declarations(&sheet, 0),
            vec![("width".to_string(), "10px".to_string())]
        );
    }

    #[test]
    fn test_multiply_folds_with_units() {
        let (sheet, diagnostics) = eval_source("p { width: 2 * 10px; height: 50% * 2; }");
        assert!(diagnostics.is_empty());
        assert_eq!(
            rule_declarations(&sheet, 0),
            vec![
                ("width".to_string(), "20px".to_string()),
                ("height".to_string(), "100%".to_string()),
            ]
        );
    }

    #[test]
    fn test_add_and_subtract_fold() {
        let (sheet, diagnostics) = eval_source("p { width: 10px + 5px - 2px; }");
        assert!(diagnostics.is_empty());
        assert_eq!(
            rule_declarations(&sheet, 0),
            vec![("width".to_string(), "13px".to_string())]
        );
    }

    #[test]
    fn test_scalar_chain_folds() {
        let (sheet, diagnostics) = eval_source("p { width: 2 * 3 * 5px; }");
        assert!(diagnostics.is_empty());
        assert_eq!(
            rule_declarations(&sheet, 0),
            vec![("width".to_string(), "30px".to_string())]
        );
    }

    #[test]
    fn test_if_true_keeps_body_drops_else() {
        let (sheet, diagnostics) = eval_source(
            "p { if [TRUE] { width: 10px; } else { width: 20px; } }",
        );
        assert!(diagnostics.is_empty());
        assert_eq!(
            rule_declarations(&sheet, 0),
            vec![("width".to_string(), "10px".to_string())]
        );
    }

    #[test]
    fn test_if_false_keeps_else() {
        let (sheet, diagnostics) = eval_source(
            "p { if [FALSE] { width: 10px; } else { width: 20px; } }",
        );
        assert!(diagnostics.is_empty());
        assert_eq!(
            rule_declarations(&sheet, 0),
            vec![("width".to_string(), "20px".to_string())]
        );
    }

    #[test]
    fn test_if_false_without_else_folds_to_nothing() {
        let (sheet, diagnostics) = eval_source("p { if [FALSE] { width: 10px; } }");
        assert!(diagnostics.is_empty());
        assert_eq!(rule_declarations(&sheet, 0), vec![]);
    }

    #[test]
    fn test_surviving_branch_keeps_relative_order() {
        let (sheet, diagnostics) = eval_source(
            "p {\n\
               width: 1px;\n\
               if [TRUE] { height: 2px; color: #ffffff; }\n\
               background-color: #000000;\n\
             }",
        );
        assert!(diagnostics.is_empty());
        let properties: Vec<String> = rule_declarations(&sheet, 0)
            .into_iter()
            .map(|(p, _)| p)
            .collect();
        assert_eq!(properties, vec!["width", "height", "color", "background-color"]);
    }

    #[test]
    fn test_nested_if_resolves_fully() {
        let (sheet, diagnostics) = eval_source(
            "Outer := TRUE;\n\
             Inner := FALSE;\n\
             p { if [Outer] { if [Inner] { width: 1px; } else { width: 2px; } } }",
        );
        assert!(diagnostics.is_empty());
        assert_eq!(
            rule_declarations(&sheet, 0),
            vec![("width".to_string(), "2px".to_string())]
        );
    }

    #[test]
    fn test_condition_via_variable() {
        let (sheet, diagnostics) = eval_source(
            "UseBig := TRUE;\n\
             p { if [UseBig] { width: 100px; } }",
        );
        assert!(diagnostics.is_empty());
        assert_eq!(
            rule_declarations(&sheet, 0),
            vec![("width".to_string(), "100px".to_string())]
        );
    }

    #[test]
    fn test_rule_local_shadowing() {
        let (sheet, diagnostics) = eval_source(
            "Size := 10px;\n\
             p { Size := 20px; width: Size; }\n\
             a { width: Size; }",
        );
        assert!(diagnostics.is_empty());
        assert_eq!(
            rule_declarations(&sheet, 0),
            vec![("width".to_string(), "20px".to_string())]
        );
        assert_eq!(
            rule_declarations(&sheet, 1),
            vec![("width".to_string(), "10px".to_string())]
        );
    }

    #[test]
    fn test_undefined_variable_is_a_diagnostic() {
        let (sheet, diagnostics) = eval_source("p { width: Missing; }");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("'Missing' is not defined"));

        // The declaration survives with its expression unchanged
        let Item::Rule(rule) = &sheet.items[0] else {
            panic!("expected a style rule");
        };
        let BodyItem::Declaration(decl) = &rule.body[0] else {
            panic!("expected a declaration");
        };
        assert!(matches!(decl.value.kind, ExprKind::Variable(ref s) if s == "Missing"));
    }

    #[test]
    fn test_unfoldable_operands_are_a_diagnostic() {
        let (_, diagnostics) = eval_source("p { width: TRUE + FALSE; }");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("cannot add boolean and boolean"));

        let (_, diagnostics) = eval_source("p { width: 10px * 2px; }");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("cannot multiply pixel and pixel"));
    }

    #[test]
    fn test_non_boolean_condition_drops_both_branches() {
        let (sheet, diagnostics) = eval_source(
            "p { if [10px] { width: 1px; } else { width: 2px; } }",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0]
            .message
            .contains("if condition must be a boolean, found pixel"));
        assert_eq!(rule_declarations(&sheet, 0), vec![]);
    }

    #[test]
    fn test_failed_operand_reports_once() {
        let (_, diagnostics) = eval_source("p { width: Missing + 10px; }");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("'Missing' is not defined"));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let (minimized, diagnostics) = eval_source(
            "Base := 10px;\n\
             p { if [TRUE] { width: Base; } height: 2 * Base; }",
        );
        assert!(diagnostics.is_empty());

        let (again, diagnostics) = Evaluator::evaluate(&minimized);
        assert!(diagnostics.is_empty());
        assert_eq!(minimized.pretty_print(), again.pretty_print());
    }
}
