use ariadne::{Color, Label, Report, ReportKind, Source};
use std::env;
use std::fs;
use std::path::Path;
use tint_ast::{Diagnostic, Item, Stylesheet};
use tint_check::Checker;
use tint_eval::Evaluator;
use tint_lexer::{Lexer, Span, Token};
use tint_parser::Parser;

fn print_usage() {
    eprintln!("Tint Compiler");
    eprintln!();
    eprintln!("Usage: tint <command> <file.tint>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  build <file>    Compile to CSS");
    eprintln!("  check <file>    Run semantic checks only");
    eprintln!("  eval <file>     Show the minimized AST");
    eprintln!("  lex <file>      Show lexer output (tokens)");
    eprintln!("  parse <file>    Show parser output (AST)");
    eprintln!("  help            Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  tint build styles.tint");
    eprintln!("  tint check styles.tint");
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    if args[1] == "help" || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        std::process::exit(0);
    }

    let commands = ["build", "check", "eval", "lex", "parse"];

    let (mode, file_path) = if commands.contains(&args[1].as_str()) {
        if args.len() < 3 {
            eprintln!("Usage: tint {} <file.tint>", args[1]);
            std::process::exit(1);
        }
        (args[1].as_str(), &args[2])
    } else {
        // Default: treat the argument as a file and build it
        ("build", &args[1])
    };

    let source = match fs::read_to_string(file_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", file_path, e);
            std::process::exit(1);
        }
    };

    match mode {
        "build" => run_build(&source, file_path),
        "check" => run_check(&source, file_path),
        "eval" => run_eval(&source, file_path),
        "lex" => run_lexer(&source, file_path),
        "parse" => run_parser(&source, file_path),
        _ => unreachable!(),
    }
}

/// Render one error over its source span
fn report_error(source: &str, file_path: &str, message: &str, span: Span) {
    Report::build(ReportKind::Error, file_path, span.start)
        .with_message(message)
        .with_label(
            Label::new((file_path, span.start..span.end))
                .with_message(message)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((file_path, Source::from(source)))
        .ok();
}

fn report_diagnostics(source: &str, file_path: &str, diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        report_error(source, file_path, &d.message, d.span);
    }
}

fn parse_or_exit(source: &str, file_path: &str) -> Stylesheet {
    match Parser::parse(source) {
        Ok(sheet) => sheet,
        Err(e) => {
            report_error(source, file_path, &e.message, e.span);
            std::process::exit(1);
        }
    }
}

fn run_build(source: &str, file_path: &str) {
    let sheet = parse_or_exit(source, file_path);

    let diagnostics = Checker::check(&sheet);
    if !diagnostics.is_empty() {
        report_diagnostics(source, file_path, &diagnostics);
        std::process::exit(1);
    }

    let (minimized, diagnostics) = Evaluator::evaluate(&sheet);
    if !diagnostics.is_empty() {
        report_diagnostics(source, file_path, &diagnostics);
        std::process::exit(1);
    }

    let css = tint_codegen::generate(&minimized);

    let output_path = Path::new(file_path).with_extension("css");
    if let Err(e) = fs::write(&output_path, &css) {
        eprintln!("Failed to write '{}': {}", output_path.display(), e);
        std::process::exit(1);
    }

    println!("Wrote {} bytes to {}", css.len(), output_path.display());
}

fn run_check(source: &str, file_path: &str) {
    let sheet = parse_or_exit(source, file_path);

    let diagnostics = Checker::check(&sheet);
    if diagnostics.is_empty() {
        println!("{}: no problems found", file_path);
    } else {
        report_diagnostics(source, file_path, &diagnostics);
        std::process::exit(1);
    }
}

fn run_eval(source: &str, file_path: &str) {
    println!("=== Minimized AST for {} ===\n", file_path);

    let sheet = parse_or_exit(source, file_path);

    let (minimized, diagnostics) = Evaluator::evaluate(&sheet);
    if !diagnostics.is_empty() {
        report_diagnostics(source, file_path, &diagnostics);
    }
    println!("{}", minimized.pretty_print());
}

fn run_parser(source: &str, file_path: &str) {
    println!("=== Parser Output for {} ===\n", file_path);

    let sheet = parse_or_exit(source, file_path);
    println!("{}", sheet.pretty_print());

    println!("=== Summary ===");
    let rule_count = sheet
        .items
        .iter()
        .filter(|i| matches!(i, Item::Rule(_)))
        .count();
    let variable_count = sheet
        .items
        .iter()
        .filter(|i| matches!(i, Item::Variable(_)))
        .count();
    println!("Style rules:      {}", rule_count);
    println!("Top-level variables: {}", variable_count);
}

fn run_lexer(source: &str, file_path: &str) {
    println!("=== Lexer Output for {} ===\n", file_path);

    match Lexer::tokenize(source) {
        Ok(tokens) => {
            println!("{:<8} {:<12} {}", "SPAN", "TOKEN TYPE", "VALUE");
            println!("{}", "-".repeat(40));

            for spanned in &tokens {
                let span_str = format!("{}..{}", spanned.span.start, spanned.span.end);
                println!(
                    "{:<8} {:<12} {}",
                    span_str,
                    token_type_name(&spanned.token),
                    spanned.token
                );
            }

            println!("\nTotal tokens: {}", tokens.len());
        }
        Err(e) => {
            report_error(source, file_path, &e.message, e.span);
            std::process::exit(1);
        }
    }
}

fn token_type_name(token: &Token) -> &'static str {
    match token {
        Token::If | Token::Else | Token::True | Token::False => "KEYWORD",

        Token::PixelLiteral(_)
        | Token::PercentageLiteral(_)
        | Token::ScalarLiteral(_)
        | Token::ColorLiteral(_) => "LITERAL",

        Token::Ident(_) | Token::CapitalIdent(_) => "IDENT",

        Token::ClassIdent(_) | Token::IdIdent(_) => "SELECTOR",

        Token::Assign | Token::Plus | Token::Minus | Token::Star => "OPERATOR",

        Token::LBrace | Token::RBrace | Token::LBracket | Token::RBracket => "DELIMITER",

        Token::Colon | Token::Semi | Token::Comma => "PUNCTUATION",

        Token::Eof => "EOF",
    }
}
