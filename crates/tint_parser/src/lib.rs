use tint_ast::*;
use tint_lexer::{Lexer, Span, SpannedToken, Token};

pub struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}..{}", self.message, self.span.start, self.span.end)
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

impl Parser {
    pub fn new(source: &str) -> ParseResult<Self> {
        let tokens = Lexer::tokenize(source).map_err(|e| ParseError {
            message: e.message,
            span: e.span,
        })?;
        Ok(Self { tokens, pos: 0 })
    }

    pub fn parse(source: &str) -> ParseResult<Stylesheet> {
        let mut parser = Parser::new(source)?;
        parser.parse_stylesheet()
    }

    // === Token Access ===

    fn current(&self) -> &SpannedToken {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.current().token
    }

    fn peek_span(&self) -> Span {
        self.current().span
    }

    fn advance(&mut self) -> &SpannedToken {
        let tok = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof)
    }

    fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    fn expect(&mut self, expected: Token) -> ParseResult<SpannedToken> {
        if self.check(&expected) {
            Ok(self.advance().clone())
        } else {
            Err(ParseError {
                message: format!("expected '{}', found '{}'", expected, self.peek()),
                span: self.peek_span(),
            })
        }
    }

    fn expect_property(&mut self) -> ParseResult<Ident> {
        match self.peek().clone() {
            Token::Ident(name) => {
                let span = self.peek_span();
                self.advance();
                Ok(Ident::new(name, span))
            }
            _ => Err(ParseError {
                message: format!("expected property name, found '{}'", self.peek()),
                span: self.peek_span(),
            }),
        }
    }

    fn expect_variable(&mut self) -> ParseResult<Ident> {
        match self.peek().clone() {
            Token::CapitalIdent(name) => {
                let span = self.peek_span();
                self.advance();
                Ok(Ident::new(name, span))
            }
            _ => Err(ParseError {
                message: format!("expected variable name, found '{}'", self.peek()),
                span: self.peek_span(),
            }),
        }
    }

    // === Parsing ===

    fn parse_stylesheet(&mut self) -> ParseResult<Stylesheet> {
        let mut items = Vec::new();

        while !self.is_at_end() {
            match self.peek() {
                Token::CapitalIdent(_) => {
                    items.push(Item::Variable(self.parse_variable_assignment()?));
                }
                Token::Ident(_) | Token::ClassIdent(_) | Token::IdIdent(_) => {
                    items.push(Item::Rule(self.parse_stylerule()?));
                }
                _ => {
                    return Err(ParseError {
                        message: format!(
                            "expected variable assignment or style rule, found '{}'",
                            self.peek()
                        ),
                        span: self.peek_span(),
                    });
                }
            }
        }

        Ok(Stylesheet { items })
    }

    fn parse_variable_assignment(&mut self) -> ParseResult<VariableAssignment> {
        let name = self.expect_variable()?;
        self.expect(Token::Assign)?;
        let value = self.parse_expr()?;
        let semi = self.expect(Token::Semi)?;

        let span = Span::new(name.span.start, semi.span.end);
        Ok(VariableAssignment { name, value, span })
    }

    fn parse_stylerule(&mut self) -> ParseResult<Stylerule> {
        let start = self.peek_span();

        let mut selectors = vec![self.parse_selector()?];
        while self.check(&Token::Comma) {
            self.advance();
            selectors.push(self.parse_selector()?);
        }

        self.expect(Token::LBrace)?;
        let body = self.parse_body()?;
        let close = self.expect(Token::RBrace)?;

        Ok(Stylerule {
            selectors,
            body,
            span: Span::new(start.start, close.span.end),
        })
    }

    fn parse_selector(&mut self) -> ParseResult<Selector> {
        let span = self.peek_span();
        let kind = match self.peek().clone() {
            Token::Ident(name) => SelectorKind::Tag(name),
            Token::ClassIdent(name) => SelectorKind::Class(name),
            Token::IdIdent(name) => SelectorKind::Id(name),
            other => {
                return Err(ParseError {
                    message: format!("expected selector, found '{}'", other),
                    span,
                });
            }
        };
        self.advance();
        Ok(Selector { kind, span })
    }

    /// Body items up to (not including) the closing brace
    fn parse_body(&mut self) -> ParseResult<Vec<BodyItem>> {
        let mut body = Vec::new();

        while !self.check(&Token::RBrace) && !self.is_at_end() {
            match self.peek() {
                Token::Ident(_) => {
                    body.push(BodyItem::Declaration(self.parse_declaration()?));
                }
                Token::CapitalIdent(_) => {
                    body.push(BodyItem::Variable(self.parse_variable_assignment()?));
                }
                Token::If => {
                    body.push(BodyItem::If(self.parse_if_clause()?));
                }
                _ => {
                    return Err(ParseError {
                        message: format!(
                            "expected declaration, variable assignment or if clause, found '{}'",
                            self.peek()
                        ),
                        span: self.peek_span(),
                    });
                }
            }
        }

        Ok(body)
    }

    fn parse_declaration(&mut self) -> ParseResult<Declaration> {
        let property = self.expect_property()?;
        self.expect(Token::Colon)?;
        let value = self.parse_expr()?;
        let semi = self.expect(Token::Semi)?;

        let span = Span::new(property.span.start, semi.span.end);
        Ok(Declaration {
            property,
            value,
            span,
        })
    }

    fn parse_if_clause(&mut self) -> ParseResult<IfClause> {
        let start = self.peek_span();
        self.expect(Token::If)?;
        self.expect(Token::LBracket)?;
        let condition = self.parse_expr()?;
        self.expect(Token::RBracket)?;

        self.expect(Token::LBrace)?;
        let body = self.parse_body()?;
        let mut end = self.expect(Token::RBrace)?.span;

        let else_clause = if self.check(&Token::Else) {
            let else_start = self.peek_span();
            self.advance();
            self.expect(Token::LBrace)?;
            let else_body = self.parse_body()?;
            let close = self.expect(Token::RBrace)?;
            end = close.span;
            Some(ElseClause {
                body: else_body,
                span: Span::new(else_start.start, close.span.end),
            })
        } else {
            None
        };

        Ok(IfClause {
            condition,
            body,
            else_clause,
            span: Span::new(start.start, end.end),
        })
    }

    // === Expressions ===

    /// expression := term (('+' | '-') term)*
    fn parse_expr(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_term()?;

        loop {
            let op = match self.peek() {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_term()?;
            let span = Span::new(lhs.span.start, rhs.span.end);
            lhs = Expr {
                kind: ExprKind::Binary(Box::new(lhs), op, Box::new(rhs)),
                span,
            };
        }

        Ok(lhs)
    }

    /// term := factor ('*' factor)*
    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_factor()?;

        while self.check(&Token::Star) {
            self.advance();
            let rhs = self.parse_factor()?;
            let span = Span::new(lhs.span.start, rhs.span.end);
            lhs = Expr {
                kind: ExprKind::Binary(Box::new(lhs), BinOp::Mul, Box::new(rhs)),
                span,
            };
        }

        Ok(lhs)
    }

    fn parse_factor(&mut self) -> ParseResult<Expr> {
        let span = self.peek_span();
        let kind = match self.peek().clone() {
            Token::PixelLiteral(n) => ExprKind::Pixel(n),
            Token::PercentageLiteral(n) => ExprKind::Percentage(n),
            Token::ScalarLiteral(n) => ExprKind::Scalar(n),
            Token::ColorLiteral(s) => ExprKind::Color(s),
            Token::True => ExprKind::Bool(true),
            Token::False => ExprKind::Bool(false),
            Token::CapitalIdent(name) => ExprKind::Variable(name),
            other => {
                return Err(ParseError {
                    message: format!("expected expression, found '{}'", other),
                    span,
                });
            }
        };
        self.advance();
        Ok(Expr { kind, span })
    }
}
