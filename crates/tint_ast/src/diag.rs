//! Semantic diagnostics

use tint_lexer::Span;

/// A semantic error tied to the node (span) that caused it.
///
/// Diagnostics are recorded, never thrown: both semantic passes run to
/// completion over the whole tree and report everything they find. A
/// compilation failed iff any pass produced at least one diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}..{}", self.message, self.span.start, self.span.end)
    }
}

impl std::error::Error for Diagnostic {}
