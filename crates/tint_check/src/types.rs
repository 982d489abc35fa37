//! Expression types for checking

/// The type of an expression, derived from its literal kind.
///
/// Types are structural and never declared: a variable has whatever type
/// its bound expression has. Unresolved references have no type and are
/// modeled as `None` wherever this enum is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprType {
    Pixel,
    Percentage,
    Scalar,
    Color,
    Bool,
}

impl std::fmt::Display for ExprType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprType::Pixel => write!(f, "pixel"),
            ExprType::Percentage => write!(f, "percentage"),
            ExprType::Scalar => write!(f, "scalar"),
            ExprType::Color => write!(f, "color"),
            ExprType::Bool => write!(f, "boolean"),
        }
    }
}
