//! CSS generation for Tint
//!
//! Serializes a minimized stylesheet (no variable assignments, no
//! if-clauses, literal declaration values) to plain CSS text. No scoping
//! or type logic lives here.

use tint_ast::{BodyItem, Declaration, Expr, ExprKind, Item, Stylerule, Stylesheet};

/// Generate CSS text for a minimized stylesheet.
pub fn generate(sheet: &Stylesheet) -> String {
    let mut out = String::new();

    let mut first = true;
    for item in &sheet.items {
        if let Item::Rule(rule) = item {
            if !first {
                out.push('\n');
            }
            first = false;
            generate_stylerule(rule, &mut out);
        }
    }
    out
}

fn generate_stylerule(rule: &Stylerule, out: &mut String) {
    let selectors = rule
        .selectors
        .iter()
        .map(|s| s.kind.text())
        .collect::<Vec<_>>()
        .join(", ");
    out.push_str(&selectors);
    out.push_str(" {\n");

    for item in &rule.body {
        if let BodyItem::Declaration(decl) = item {
            generate_declaration(decl, out);
        }
    }
    out.push_str("}\n");
}

fn generate_declaration(decl: &Declaration, out: &mut String) {
    out.push_str("  ");
    out.push_str(&decl.property.name);
    out.push_str(": ");
    out.push_str(&expression_text(&decl.value));
    out.push('\n');
}

fn expression_text(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Pixel(n) => format!("{}px", n),
        ExprKind::Percentage(n) => format!("{}%", n),
        ExprKind::Scalar(n) => format!("{}", n),
        ExprKind::Color(s) => s.clone(),
        ExprKind::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        // Unfolded expressions only survive failed compilations, whose
        // output callers discard anyway
        ExprKind::Variable(_) | ExprKind::Binary(..) => expr.pretty_print(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tint_check::Checker;
    use tint_eval::Evaluator;
    use tint_parser::Parser;

    /// Full pipeline: parse, check, evaluate, generate
    fn compile(source: &str) -> String {
        let sheet = Parser::parse(source).unwrap();
        let diagnostics = Checker::check(&sheet);
        assert!(diagnostics.is_empty(), "check failed: {:?}", diagnostics);
        let (minimized, diagnostics) = Evaluator::evaluate(&sheet);
        assert!(diagnostics.is_empty(), "evaluation failed: {:?}", diagnostics);
        generate(&minimized)
    }

    #[test]
    fn test_constant_rule() {
        let css = compile("a { width: 2 * 10px; color: #ffffff; }");
        assert_eq!(css, "a {\n  width: 20px\n  color: #ffffff\n}\n");
    }

    #[test]
    fn test_variables_and_conditionals_compile_away() {
        let css = compile(
            "UseRed := TRUE;\n\
             Base := 10px;\n\
             .menu {\n\
               width: Base + 5px;\n\
               if [UseRed] { color: #ff0000; } else { color: #000000; }\n\
             }",
        );
        assert_eq!(css, ".menu {\n  width: 15px\n  color: #ff0000\n}\n");
    }

    #[test]
    fn test_blocks_are_separated_by_a_blank_line() {
        let css = compile("a { width: 10px; }\np { height: 50%; }");
        assert_eq!(css, "a {\n  width: 10px\n}\n\np {\n  height: 50%\n}\n");
    }

    #[test]
    fn test_selector_list_in_one_header() {
        let css = compile("a, .menu, #header { width: 10px; }");
        assert_eq!(css, "a, .menu, #header {\n  width: 10px\n}\n");
    }

    #[test]
    fn test_empty_rule_after_false_condition() {
        let css = compile("p { if [FALSE] { width: 10px; } }");
        assert_eq!(css, "p {\n}\n");
    }

    #[test]
    fn test_checker_reports_exactly_one_error_for_bad_width() {
        let sheet = Parser::parse("a { width: #ffffff; }").unwrap();
        let diagnostics = Checker::check(&sheet);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0]
            .message
            .contains("property 'width' needs a pixel or percentage value"));
    }

    #[test]
    fn test_well_typed_input_minimizes_completely() {
        let source = "\
Scale := 2;
UseWide := TRUE;
a {
  Base := 10px;
  if [UseWide] { width: Scale * Base; } else { width: Base; }
  color: #336699;
}";
        let sheet = Parser::parse(source).unwrap();
        assert!(Checker::check(&sheet).is_empty());

        let (minimized, diagnostics) = Evaluator::evaluate(&sheet);
        assert!(diagnostics.is_empty());
        for item in &minimized.items {
            let Item::Rule(rule) = item else {
                panic!("variable assignment left in output");
            };
            for body_item in &rule.body {
                let BodyItem::Declaration(decl) = body_item else {
                    panic!("non-declaration left in rule body");
                };
                assert!(decl.value.as_value().is_some(), "unfolded declaration value");
            }
        }

        assert_eq!(
            generate(&minimized),
            "a {\n  width: 20px\n  color: #336699\n}\n"
        );
    }
}
